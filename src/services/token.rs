//! Cancellation of in-flight catalog loads.
//!
//! Every load carries a [`LoadToken`]. Starting a new load through a
//! [`LoadTracker`] cancels the previous token, and a cancelled load stops at
//! its next step boundary without producing a catalog.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{CatalogError, Result};

/// Cancellation handle for one catalog load.
#[derive(Debug, Clone, Default)]
pub struct LoadToken {
    generation: u64,
    cancelled: Arc<AtomicBool>,
}

impl LoadToken {
    /// A token nobody else can cancel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load generation this token belongs to.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancels the load.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// True once cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns [`CatalogError::Cancelled`] once the token was cancelled.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(CatalogError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Hands out load tokens, cancelling the previous one on every switch.
#[derive(Debug, Default)]
pub struct LoadTracker {
    next_generation: AtomicU64,
    current: Mutex<Option<LoadToken>>,
}

impl LoadTracker {
    /// A tracker with no load in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the running load (if any) and returns a token for a new one.
    pub fn begin(&self) -> LoadToken {
        let token = LoadToken {
            generation: self.next_generation.fetch_add(1, Ordering::SeqCst) + 1,
            cancelled: Arc::new(AtomicBool::new(false)),
        };
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(previous) = current.replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    /// True if `token` belongs to the most recent load and was not cancelled.
    #[must_use]
    pub fn is_current(&self, token: &LoadToken) -> bool {
        let current = self
            .current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        current
            .as_ref()
            .is_some_and(|current| current.generation == token.generation)
            && !token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_cancels_previous() {
        let tracker = LoadTracker::new();
        let first = tracker.begin();
        assert!(tracker.is_current(&first));

        let second = tracker.begin();
        assert!(first.is_cancelled());
        assert!(matches!(first.check(), Err(CatalogError::Cancelled)));
        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));
        assert!(second.generation() > first.generation());
    }

    #[test]
    fn test_standalone_token() {
        let token = LoadToken::new();
        assert!(token.check().is_ok());
        token.cancel();
        assert!(token.check().is_err());
    }
}
