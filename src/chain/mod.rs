//! Chain Module
//!
//! The error value itself. A `Fail` is either a plain leaf error or a node
//! that layers a new error over an older one, together with the stack
//! snapshot taken when the layer was added.

use std::error::Error;
use std::fmt;
use std::mem;
use std::sync::{Arc, OnceLock};

mod render;
mod traverse;
mod wrap;

pub use render::Verb;
pub use traverse::{first, last, second, Chain};
pub use wrap::{wrap, wrap_with, ResultExt, Wrapper};

/// Plain error objects shared by leaves.
pub type DynError = dyn Error + Send + Sync + 'static;

/// Leaf created from a bare message
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct Message(pub String);

/// An error, possibly carrying context layered over a cause.
#[derive(Clone)]
pub enum Fail {
    /// An error that does not wrap anything
    Leaf(Arc<DynError>),
    /// A wrap point
    Chain(Arc<Node>),
}

/// One wrap point: `current` was added on top of `inner`.
pub struct Node {
    current: Fail,
    inner: Fail,
    trace: Vec<u8>,
}

impl Node {
    pub(crate) fn new(current: Fail, inner: Fail, trace: Vec<u8>) -> Self {
        Self {
            current,
            inner,
            trace,
        }
    }

    /// The error supplied as context at this wrap point
    pub fn current(&self) -> &Fail {
        &self.current
    }

    /// The error this node wraps
    pub fn inner(&self) -> &Fail {
        &self.inner
    }

    /// Stack snapshot captured when the node was built
    pub fn trace(&self) -> &[u8] {
        &self.trace
    }
}

// Dropping field by field would recurse once per level, so chain links are
// moved onto a heap worklist and released here instead.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.unlink(&mut pending);

        while let Some(err) = pending.pop() {
            if let Fail::Chain(node) = err {
                // Shared nodes are still reachable elsewhere; dropping our
                // reference only decrements the count.
                if let Ok(mut node) = Arc::try_unwrap(node) {
                    node.unlink(&mut pending);
                }
            }
        }
    }
}

impl Node {
    fn unlink(&mut self, pending: &mut Vec<Fail>) {
        for slot in [&mut self.current, &mut self.inner] {
            if slot.is_chain() {
                pending.push(mem::replace(slot, Fail::unlinked()));
            }
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("current", &self.current.to_string())
            .field("inner", &self.inner.to_string())
            .field("trace_len", &self.trace.len())
            .finish()
    }
}

impl Fail {
    /// Turn any error into a leaf.
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Fail::Leaf(Arc::new(error))
    }

    /// Shared empty leaf left behind in a node being torn down
    fn unlinked() -> Self {
        static UNLINKED: OnceLock<Arc<DynError>> = OnceLock::new();
        let leaf = UNLINKED.get_or_init(|| Arc::new(Message(String::new())));
        Fail::Leaf(Arc::clone(leaf))
    }

    /// Leaf holding only a message.
    pub fn msg(message: impl fmt::Display) -> Self {
        Fail::new(Message(message.to_string()))
    }

    /// The chain capability: `Some` when this value is a wrap point.
    pub fn node(&self) -> Option<&Node> {
        match self {
            Fail::Chain(node) => Some(node),
            Fail::Leaf(_) => None,
        }
    }

    pub fn is_chain(&self) -> bool {
        matches!(self, Fail::Chain(_))
    }

    /// Identity comparison. Clones of one value compare equal, separately
    /// built values never do, whatever their messages say.
    pub fn ptr_eq(&self, other: &Fail) -> bool {
        match (self, other) {
            (Fail::Leaf(a), Fail::Leaf(b)) => Arc::ptr_eq(a, b),
            (Fail::Chain(a), Fail::Chain(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Typed access to a leaf's error. Always `None` for chain nodes; call
    /// it on [`last`] to inspect the cause.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        match self {
            Fail::Leaf(error) => error.downcast_ref::<E>(),
            Fail::Chain(_) => None,
        }
    }
}

impl fmt::Display for Fail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let extended = f.sign_plus();
        self.render(f, Verb::Str, extended)
    }
}

impl fmt::Debug for Fail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let extended = f.sign_plus();
        self.render(f, Verb::Value, extended)
    }
}

impl Error for Fail {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Fail::Leaf(error) => error.source(),
            Fail::Chain(node) => Some(&node.inner),
        }
    }
}

impl From<Message> for Fail {
    fn from(message: Message) -> Self {
        Fail::new(message)
    }
}

impl From<&str> for Fail {
    fn from(message: &str) -> Self {
        Fail::msg(message)
    }
}

impl From<String> for Fail {
    fn from(message: String) -> Self {
        Fail::new(Message(message))
    }
}

impl From<Box<DynError>> for Fail {
    fn from(error: Box<DynError>) -> Self {
        Fail::Leaf(Arc::from(error))
    }
}

impl From<Arc<DynError>> for Fail {
    fn from(error: Arc<DynError>) -> Self {
        Fail::Leaf(error)
    }
}
