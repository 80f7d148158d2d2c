//! Core error type and node model.
//!
//! [`Error`] is a cheaply clonable handle over an immutable node
//! graph. Each node is one of a closed set of variants: a plain
//! message, a contextual wrapper, a stack-trace carrier, a multi-error
//! aggregate, a recovered panic, a keyed value annotation, or an
//! adapter for foreign [`std::error::Error`] values. Clones share
//! identity; nothing is mutated after construction, so a graph can be
//! traversed and rendered from any number of threads at once.

use std::any::Any;
use std::collections::HashMap;
use std::error::Error as StdError;
use std::sync::Arc;

use crate::panic::PanicPayload;
use crate::stacktrace::Callers;

/// An error node: one link in an error composition graph.
///
/// Produced by the crate's constructors ([`message`](crate::message),
/// [`new!`](crate::new), [`append`](crate::append), ...). The handle
/// is `Clone + Send + Sync`; clones are identical for the purposes of
/// [`Error::is`].
#[derive(Clone)]
pub struct Error {
    node: Arc<Node>,
}

/// Closed variant set behind an [`Error`] handle.
pub(crate) enum Node {
    /// Leaf with a fixed message. Distinct constructions are never
    /// identical, even with equal text.
    Message { msg: String },
    /// Contextual wrapper. The wrapper branch participates in identity
    /// and type queries but is not part of the primary chain. Always
    /// carries a wrapper or a message override.
    Wrapper {
        wrapper: Option<Error>,
        next: Error,
        msg: Option<String>,
    },
    /// Stack-trace carrier, the only variant contributing a trace.
    Stack { next: Error, stack: Callers },
    /// Ordered aggregate of independent errors.
    Multi { errors: Vec<Error> },
    /// Recovered unwind payload.
    Panic { payload: PanicPayload },
    /// Keyed value annotation; message and rendering delegate to
    /// `next`.
    Value {
        next: Error,
        key: String,
        value: Arc<dyn Any + Send + Sync>,
    },
    /// Adapter admitting a foreign error into the model unchanged.
    External {
        inner: Box<dyn StdError + Send + Sync>,
    },
}

impl Error {
    pub(crate) fn from_node(node: Node) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    pub(crate) fn node(&self) -> &Node {
        &self.node
    }

    /// Single-line message, identical to the `Display` form.
    pub(crate) fn message_string(&self) -> String {
        match &*self.node {
            Node::Message { msg } => msg.clone(),
            Node::Wrapper { wrapper, next, msg } => match (msg, wrapper) {
                (Some(msg), _) => msg.clone(),
                (None, Some(wrapper)) => {
                    format!("{}: {}", wrapper.message_string(), next.message_string())
                }
                (None, None) => next.message_string(),
            },
            Node::Stack { next, .. } | Node::Value { next, .. } => next.message_string(),
            Node::Multi { errors } => {
                let mut out = String::from("the following errors occurred: [");
                for (n, err) in errors.iter().enumerate() {
                    if n > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&err.message_string());
                }
                out.push(']');
                out
            }
            Node::Panic { payload } => format!("panic: {}", payload.as_str()),
            Node::External { inner } => inner.to_string(),
        }
    }

    /// Multi-line supplementary text contributed by this node, beyond
    /// its single-line message.
    ///
    /// Only stack carriers and aggregates have detail. The returned
    /// text always ends with a newline; `None` and the empty string
    /// are equivalent for rendering purposes.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match &*self.node {
            Node::Stack { next, stack } => {
                if stack.is_empty() {
                    return None;
                }
                Some(format!("{}\n{stack}", next.message_string()))
            }
            Node::Multi { errors } => {
                if errors.is_empty() {
                    return None;
                }
                let mut out = String::new();
                for (n, err) in errors.iter().enumerate() {
                    out.push_str(&(n + 1).to_string());
                    out.push_str(". ");
                    out.push_str(&crate::display::indent(&crate::display::sprint(err)));
                }
                Some(out)
            }
            _ => None,
        }
    }

    /// The next link of the primary chain, if any.
    ///
    /// Aggregates fan out through [`Error::children`] instead, and a
    /// wrapper's context branch is deliberately not reachable from
    /// here.
    #[must_use]
    pub fn next(&self) -> Option<&Error> {
        match &*self.node {
            Node::Wrapper { next, .. } | Node::Stack { next, .. } | Node::Value { next, .. } => {
                Some(next)
            }
            _ => None,
        }
    }

    /// Fan-out children of an aggregate, in insertion order. Empty for
    /// every other variant.
    #[must_use]
    pub fn children(&self) -> &[Error] {
        match &*self.node {
            Node::Multi { errors } => errors,
            _ => &[],
        }
    }

    /// Identity test across the whole node graph.
    ///
    /// True when `target` is this error (clones share identity), when
    /// the wrapper branch matches, when any aggregate child matches,
    /// or recursively down the primary chain. Two separately
    /// constructed errors never match, even with identical text.
    #[must_use]
    pub fn is(&self, target: &Error) -> bool {
        if Arc::ptr_eq(&self.node, &target.node) {
            return true;
        }
        match &*self.node {
            Node::Wrapper { wrapper, next, .. } => {
                wrapper.as_ref().map_or(false, |w| w.is(target)) || next.is(target)
            }
            Node::Stack { next, .. } | Node::Value { next, .. } => next.is(target),
            Node::Multi { errors } => errors.iter().any(|err| err.is(target)),
            _ => false,
        }
    }

    /// Find a foreign error of type `T` anywhere in the graph.
    ///
    /// Same traversal shape as [`Error::is`]: the wrapper branch and
    /// aggregate children are searched in addition to the primary
    /// chain. For adapted foreign errors the `source()` chain of the
    /// boxed value is searched too.
    #[must_use]
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: StdError + 'static,
    {
        match &*self.node {
            Node::External { inner } => {
                let mut source: Option<&(dyn StdError + 'static)> = Some(&**inner);
                while let Some(err) = source {
                    if let Some(found) = err.downcast_ref::<T>() {
                        return Some(found);
                    }
                    source = err.source();
                }
                None
            }
            Node::Wrapper { wrapper, next, .. } => wrapper
                .as_ref()
                .and_then(Error::downcast_ref)
                .or_else(|| next.downcast_ref()),
            Node::Stack { next, .. } | Node::Value { next, .. } => next.downcast_ref(),
            Node::Multi { errors } => errors.iter().find_map(Error::downcast_ref),
            _ => None,
        }
    }

    /// The recovered unwind payload carried by this error, if any.
    #[must_use]
    pub fn panic_payload(&self) -> Option<&PanicPayload> {
        match &*self.node {
            Node::Panic { payload } => Some(payload),
            Node::Wrapper { wrapper, next, .. } => wrapper
                .as_ref()
                .and_then(Error::panic_payload)
                .or_else(|| next.panic_payload()),
            Node::Stack { next, .. } | Node::Value { next, .. } => next.panic_payload(),
            Node::Multi { errors } => errors.iter().find_map(Error::panic_payload),
            _ => None,
        }
    }

    /// The first captured stack trace on the primary chain.
    ///
    /// Aggregate children and wrapper branches are not searched; only
    /// `next` links are followed.
    #[must_use]
    pub fn stack_trace(&self) -> Option<&Callers> {
        let mut current = Some(self);
        while let Some(err) = current {
            if let Node::Stack { stack, .. } = &*err.node {
                return Some(stack);
            }
            current = err.next();
        }
        None
    }

    /// Keyed value annotations on the primary chain.
    ///
    /// When several annotations share a key, the outermost one wins.
    #[must_use]
    pub fn values(&self) -> HashMap<String, Arc<dyn Any + Send + Sync>> {
        let mut values: HashMap<String, Arc<dyn Any + Send + Sync>> = HashMap::new();
        let mut current = Some(self);
        while let Some(err) = current {
            if let Node::Value { key, value, .. } = &*err.node {
                values
                    .entry(key.clone())
                    .or_insert_with(|| Arc::clone(value));
            }
            current = err.next();
        }
        values
    }

    /// Typed view of the outermost annotation for `key`, when its
    /// value is a `T`.
    #[must_use]
    pub fn value_ref<T: Any>(&self, key: &str) -> Option<&T> {
        let mut current = Some(self);
        while let Some(err) = current {
            if let Node::Value { key: k, value, .. } = &*err.node {
                if k == key {
                    return value.downcast_ref::<T>();
                }
            }
            current = err.next();
        }
        None
    }
}
