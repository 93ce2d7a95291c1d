//! Trace Module
//!
//! Stack snapshot capture. `wrap` asks a [`Tracer`] for the bytes to store
//! in the new node, so the snapshot source can be swapped out (fixed text in
//! tests, nothing at all when capture is turned off).

use std::backtrace::Backtrace;

/// Produces the diagnostic blob stored in a chain node.
pub trait Tracer: Send + Sync {
    fn capture(&self) -> Vec<u8>;
}

impl<F> Tracer for F
where
    F: Fn() -> Vec<u8> + Send + Sync,
{
    fn capture(&self) -> Vec<u8> {
        self()
    }
}

/// Captures the current call stack, regardless of `RUST_BACKTRACE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackTracer;

impl Tracer for StackTracer {
    fn capture(&self) -> Vec<u8> {
        Backtrace::force_capture().to_string().into_bytes()
    }
}

/// Always returns the same bytes
#[derive(Debug, Clone, Default)]
pub struct FixedTracer(Vec<u8>);

impl FixedTracer {
    pub fn new(trace: impl Into<Vec<u8>>) -> Self {
        Self(trace.into())
    }
}

impl Tracer for FixedTracer {
    fn capture(&self) -> Vec<u8> {
        self.0.clone()
    }
}

/// Captures nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTracer;

impl Tracer for NoTracer {
    fn capture(&self) -> Vec<u8> {
        Vec::new()
    }
}

/// Caps what another tracer returns at `max_bytes`.
#[derive(Debug, Clone)]
pub struct Truncate<T> {
    inner: T,
    max_bytes: usize,
}

impl<T: Tracer> Truncate<T> {
    pub fn new(inner: T, max_bytes: usize) -> Self {
        Self { inner, max_bytes }
    }
}

impl<T: Tracer> Tracer for Truncate<T> {
    fn capture(&self) -> Vec<u8> {
        let mut trace = self.inner.capture();
        if trace.len() > self.max_bytes {
            let end = utf8_boundary(&trace, self.max_bytes);
            trace.truncate(end);
        }
        trace
    }
}

/// Largest cut point `<= max` that doesn't split a UTF-8 sequence.
fn utf8_boundary(bytes: &[u8], max: usize) -> usize {
    let mut end = max.min(bytes.len());
    // continuation bytes look like 0b10xx_xxxx
    while end > 0 && end < bytes.len() && (bytes[end] & 0xC0) == 0x80 {
        end -= 1;
    }
    end
}
