// src/progress.rs
/// Lightweight progress reporting for a refresh pass.
/// Frontends implement this to surface status to users.
pub trait Progress: Send {
    /// Called when the fetch starts.
    fn begin(&mut self, _url: &str) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
