// src/progress.rs
/// Lightweight progress reporting used by long-running batch collection.
/// Frontends (the CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one game has been fetched and transformed.
    fn item_done(&mut self, _id: &str) {}

    /// Called when one game could not be fetched or transformed.
    fn item_failed(&mut self, _id: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
