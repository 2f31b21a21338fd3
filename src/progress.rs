// src/progress.rs
/// Lightweight progress reporting used by long-running collection runs.
/// Frontends (CLI, or whatever presentation layer hosts the engine)
/// implement this to surface status to users. Purely cosmetic: outcomes are
/// carried by the collection manifest, never by this trait.
pub trait Progress {
    /// Called at the start with the total number of storefronts.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one storefront finished (fetched, empty or skipped).
    fn item_done(&mut self, _index: usize, _name: &str) {}

    /// Called when one storefront failed or was blocked.
    fn item_failed(&mut self, _index: usize, _name: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
