use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set-only flag shared by the orchestrator and the collector.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag; returns `true` if this call was the one that raised it.
    pub fn raise(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
