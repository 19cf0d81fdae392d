//! Idle Timer - Single-slot cancellable deferred task
//!
//! A one-shot timer where arming cancels any previously armed instance.
//! At most one armed instance is observable at any time.
//!
//! # Pattern
//!
//! - `arm(delay, f)` schedules `f` on a timer thread after `delay`
//! - Arming again (or `cancel()`) invalidates the previous instance
//! - Cancellation is generation-based: a fired instance whose generation
//!   is stale runs nothing
//! - `f` receives a liveness check to re-verify the generation after
//!   taking whatever lock guards the state it mutates: a re-arm racing
//!   the fire must win
//!
//! # Example
//!
//! ```ignore
//! use stockscan::state::timer::IdleTimer;
//! use std::time::Duration;
//!
//! let timer = IdleTimer::new();
//! timer.arm(Duration::from_millis(100), |_| {
//!     println!("idle for 100ms");
//! });
//!
//! // A later arm replaces the earlier one
//! timer.arm(Duration::from_millis(100), |still_armed| {
//!     let mut state = shared.lock().unwrap();
//!     if still_armed() {
//!         state.clear();
//!     }
//! });
//!
//! timer.cancel(); // Neither fires
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

// =============================================================================
// IDLE TIMER
// =============================================================================

/// Single-slot cancellable one-shot timer.
///
/// Clones share the same slot: arming through any clone cancels an
/// instance armed through another.
#[derive(Clone)]
pub struct IdleTimer {
    /// Current generation. Bumped on every arm and cancel; a sleeping
    /// instance only fires if its generation is still current.
    generation: Arc<AtomicU64>,
}

impl IdleTimer {
    /// Create a timer with nothing armed.
    pub fn new() -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Arm the timer: run `f` after `delay` unless cancelled or re-armed
    /// first. Any previously armed instance is invalidated.
    ///
    /// `f` is handed a liveness check. The pre-check here and `f`'s body
    /// are not one atomic step, so `f` must call the check again while
    /// holding the lock that guards whatever it mutates; a stale result
    /// means a cancel or re-arm won the race and `f` must do nothing.
    pub fn arm<F>(&self, delay: Duration, f: F)
    where
        F: FnOnce(&dyn Fn() -> bool) + Send + 'static,
    {
        let armed = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = self.generation.clone();

        thread::spawn(move || {
            thread::sleep(delay);
            let still_armed = move || generation.load(Ordering::SeqCst) == armed;
            if still_armed() {
                f(&still_armed);
            }
        });
    }

    /// Invalidate any armed instance. Safe to call when nothing is armed.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for IdleTimer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    #[test]
    fn test_armed_timer_fires() {
        let timer = IdleTimer::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();

        timer.arm(Duration::from_millis(20), move |_| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(80));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancel_prevents_fire() {
        let timer = IdleTimer::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();

        timer.arm(Duration::from_millis(30), move |_| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });
        timer.cancel();

        thread::sleep(Duration::from_millis(90));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_rearm_replaces_previous() {
        let timer = IdleTimer::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let first_clone = first.clone();
        timer.arm(Duration::from_millis(30), move |_| {
            first_clone.fetch_add(1, Ordering::SeqCst);
        });

        let second_clone = second.clone();
        timer.arm(Duration::from_millis(30), move |_| {
            second_clone.fetch_add(1, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(100));
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancel_without_arm_is_safe() {
        let timer = IdleTimer::new();
        timer.cancel();
        timer.cancel();
    }

    #[test]
    fn test_clones_share_slot() {
        let timer = IdleTimer::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();

        timer.arm(Duration::from_millis(30), move |_| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        // Cancelling through a clone invalidates the original arm
        let other = timer.clone();
        other.cancel();

        thread::sleep(Duration::from_millis(90));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_stale_fire_is_noop_under_shared_lock() {
        let timer = IdleTimer::new();
        let state = Arc::new(Mutex::new(String::from("kept")));

        // The fire body blocks on the lock we hold; while it waits, the
        // instance is invalidated. The inner check must see that.
        let state_timer = state.clone();
        let guard = state.lock().unwrap();
        timer.arm(Duration::from_millis(20), move |still_armed| {
            let mut state = state_timer.lock().unwrap();
            if still_armed() {
                state.clear();
            }
        });

        thread::sleep(Duration::from_millis(60));
        timer.cancel();
        drop(guard);

        thread::sleep(Duration::from_millis(40));
        assert_eq!(state.lock().unwrap().as_str(), "kept");
    }
}
