//! Execution tracing hooks.
//!
//! The interpreter is parameterized over a [`Tracer`], with hook points at
//! user-function call boundaries. [`NoopTracer`] is the production
//! default; its empty methods compile away through monomorphization.
//! [`StderrTracer`] emits a human-readable call log for debugging scripts.

/// Hook points invoked during interpretation.
///
/// Both methods have empty default bodies, so implementations only
/// override the events they care about.
pub trait Tracer {
    /// A user function call pushed a new frame; `depth` is the frame depth
    /// after the push.
    fn on_call(&mut self, name: &str, depth: usize) {
        let _ = (name, depth);
    }

    /// A user function call popped its frame; `depth` is the frame depth
    /// after the pop.
    fn on_return(&mut self, depth: usize) {
        let _ = depth;
    }
}

/// Zero-cost no-op tracer, the production default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracer;

impl Tracer for NoopTracer {}

/// Tracer that logs every event to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrTracer;

impl Tracer for StderrTracer {
    fn on_call(&mut self, name: &str, depth: usize) {
        eprintln!("[trace] {:width$}call {name}", "", width = depth.saturating_sub(1) * 2);
    }

    fn on_return(&mut self, depth: usize) {
        eprintln!("[trace] {:width$}return", "", width = depth * 2);
    }
}
