use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared flag for cancelling a running scaffold invocation.
///
/// Cancelling during the render phase discards all rendered output;
/// cancelling during the write phase rolls back like a write failure.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
