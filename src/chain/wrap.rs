use std::sync::Arc;

use tracing::trace;

use super::{Fail, Node};
use crate::trace::{StackTracer, Tracer};

/// Wrap `original` with `new` to give it more context.
///
/// The result reads as `new`, keeps `original` reachable through
/// [`second`](super::second) and [`last`](super::last), and carries the call
/// stack of this call.
pub fn wrap(original: impl Into<Fail>, new: impl Into<Fail>) -> Fail {
    wrap_with(original, new, &StackTracer)
}

/// [`wrap`] with the stack snapshot taken by `tracer`.
pub fn wrap_with<T>(original: impl Into<Fail>, new: impl Into<Fail>, tracer: &T) -> Fail
where
    T: Tracer + ?Sized,
{
    let inner = original.into();
    let current = new.into();
    let snapshot = tracer.capture();

    trace!(
        target: "fail::wrap",
        current = %current,
        inner = %inner,
        trace_len = snapshot.len(),
        "wrapped error"
    );

    Fail::Chain(Arc::new(Node::new(current, inner, snapshot)))
}

/// Wraps errors using one configured tracer.
#[derive(Clone)]
pub struct Wrapper {
    tracer: Arc<dyn Tracer>,
}

impl Wrapper {
    pub fn new(tracer: Arc<dyn Tracer>) -> Self {
        Self { tracer }
    }

    pub fn wrap(&self, original: impl Into<Fail>, new: impl Into<Fail>) -> Fail {
        wrap_with(original, new, self.tracer.as_ref())
    }

    pub fn tracer(&self) -> &Arc<dyn Tracer> {
        &self.tracer
    }
}

impl Default for Wrapper {
    fn default() -> Self {
        Self::new(Arc::new(StackTracer))
    }
}

impl std::fmt::Debug for Wrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wrapper").finish_non_exhaustive()
    }
}

/// Context helpers for `Result`.
pub trait ResultExt<T> {
    /// Wrap the error, if any, with `new`.
    fn wrap_err<N>(self, new: N) -> Result<T, Fail>
    where
        N: Into<Fail>;

    /// Like [`ResultExt::wrap_err`] but only builds the context on error.
    fn wrap_err_with<N, F>(self, new: F) -> Result<T, Fail>
    where
        N: Into<Fail>,
        F: FnOnce() -> N;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<Fail>,
{
    fn wrap_err<N>(self, new: N) -> Result<T, Fail>
    where
        N: Into<Fail>,
    {
        self.map_err(|err| wrap(err, new))
    }

    fn wrap_err_with<N, F>(self, new: F) -> Result<T, Fail>
    where
        N: Into<Fail>,
        F: FnOnce() -> N,
    {
        self.map_err(|err| wrap(err, new()))
    }
}
