//! Run-level interrupt flag.
//!
//! The pipeline polls the flag between page requests and between
//! categories. An in-flight request is never cancelled, so whatever a
//! category has accumulated when the flag is seen is returned intact.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cheaply cloneable handle; all clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag {
    requested: Arc<AtomicBool>,
}

impl InterruptFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        if !self.requested.swap(true, Ordering::SeqCst) {
            tracing::warn!("interrupt requested, stopping after the current request");
        }
    }

    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Spawns a task that sets the flag on the first Ctrl-C.
    pub fn install_ctrl_c_handler(&self) {
        let flag = self.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                flag.request();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let flag = InterruptFlag::new();
        let clone = flag.clone();
        assert!(!clone.is_requested());
        flag.request();
        assert!(clone.is_requested());
    }

    #[test]
    fn request_is_idempotent() {
        let flag = InterruptFlag::new();
        flag.request();
        flag.request();
        assert!(flag.is_requested());
    }
}
