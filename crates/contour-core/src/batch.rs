//! Scoped non-interactive rendering mode.
//!
//! The tracing facility runs a rendering pass to produce geometry; that pass
//! must not pop up an interactive display. The interactive-rendering flag is
//! process-wide mutable state, so it is only ever toggled through a guard
//! that restores the prior mode on every exit path, including panics.
//! Concurrent contour computations must be serialized externally.

use std::sync::atomic::{AtomicBool, Ordering};

static INTERACTIVE_RENDERING: AtomicBool = AtomicBool::new(true);

/// Whether interactive rendering is currently enabled.
pub fn interactive_rendering_enabled() -> bool {
    INTERACTIVE_RENDERING.load(Ordering::SeqCst)
}

/// RAII guard that disables interactive rendering for its lifetime.
#[derive(Debug)]
pub struct BatchGuard {
    prior: bool,
}

impl BatchGuard {
    /// Disable interactive rendering, remembering the prior mode.
    pub fn enter() -> Self {
        let prior = INTERACTIVE_RENDERING.swap(false, Ordering::SeqCst);
        Self { prior }
    }
}

impl Drop for BatchGuard {
    fn drop(&mut self) {
        INTERACTIVE_RENDERING.store(self.prior, Ordering::SeqCst);
    }
}

/// Serializes unit tests that assert on the absolute state of the
/// process-wide flag.
#[cfg(test)]
pub(crate) static TEST_MODE_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_restores_prior_mode() {
        let _lock = TEST_MODE_LOCK.lock().unwrap();
        assert!(interactive_rendering_enabled());
        {
            let _guard = BatchGuard::enter();
            assert!(!interactive_rendering_enabled());
            {
                // nested guards restore the intermediate (batch) state
                let _inner = BatchGuard::enter();
                assert!(!interactive_rendering_enabled());
            }
            assert!(!interactive_rendering_enabled());
        }
        assert!(interactive_rendering_enabled());

        // restored even when the scope unwinds
        let result = std::panic::catch_unwind(|| {
            let _guard = BatchGuard::enter();
            panic!("unwind through the guard");
        });
        assert!(result.is_err());
        assert!(interactive_rendering_enabled());
    }
}
