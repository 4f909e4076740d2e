// Copyright 2026 the Windrow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Windrow Timing: host-clock-driven timer primitives.
//!
//! Interactive list surfaces need two kinds of delayed behavior:
//!
//! - **Debounce**: "the user stopped scrolling" is detected by a quiet period
//!   after the last scroll event ([`DebounceTimer`]).
//! - **Cool-down**: "don't trigger this again for a while" rate-limits actions
//!   such as load-more requests near the end of a feed ([`Cooldown`]).
//!
//! Neither type owns an OS timer or a thread. Time is whatever the host says
//! it is: every operation that depends on the clock takes a `now_ms` argument,
//! a monotonic millisecond timestamp of the host's choosing. This keeps the
//! crate `no_std`, makes the timers deterministic under test, and resolves
//! teardown for free: dropping a timer *is* canceling it, and
//! [`DebounceTimer::cancel`] covers the case where the owner outlives the
//! triggering condition.
//!
//! ## Scroll-end detection
//!
//! ```rust
//! use windrow_timing::DebounceTimer;
//!
//! let mut timer = DebounceTimer::new(150);
//!
//! // Scroll events keep re-arming the quiet period.
//! timer.arm(1_000);
//! timer.arm(1_060);
//!
//! // Not enough quiet time yet.
//! assert!(!timer.fire(1_200));
//! // 150ms after the last event the timer fires, exactly once.
//! assert!(timer.fire(1_210));
//! assert!(!timer.fire(1_211));
//! ```

#![no_std]

/// Detects a quiet period after a burst of events.
///
/// The timer is armed (or re-armed) on every triggering event; it fires once
/// when `delay_ms` elapses with no further arming. A new [`arm`](Self::arm)
/// supersedes any pending deadline, so only the most recent event counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceTimer {
    delay_ms: u64,
    deadline: Option<u64>,
}

impl DebounceTimer {
    /// Creates a timer with the given quiet period in milliseconds.
    #[must_use]
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    /// Returns the configured quiet period in milliseconds.
    #[must_use]
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Sets the quiet period for subsequent arms.
    ///
    /// A deadline that is already pending is left as scheduled.
    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    /// Starts (or restarts) the quiet period at `now_ms`.
    ///
    /// Any previously pending deadline is superseded.
    pub fn arm(&mut self, now_ms: u64) {
        self.deadline = Some(now_ms.saturating_add(self.delay_ms));
    }

    /// Clears any pending deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns `true` if a deadline is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns the pending deadline timestamp, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Fires the timer if the quiet period has elapsed.
    ///
    /// Returns `true` exactly once per armed deadline; the deadline is cleared
    /// on fire. A canceled timer never fires.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Rate-limits repeated triggers of an action.
///
/// The first [`try_fire`](Self::try_fire) always succeeds; subsequent calls
/// succeed only after `window_ms` has elapsed since the last success. Failed
/// attempts do not extend the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cooldown {
    window_ms: u64,
    last_fired_ms: Option<u64>,
}

impl Cooldown {
    /// Creates a cool-down with the given window in milliseconds.
    #[must_use]
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_fired_ms: None,
        }
    }

    /// Returns the configured window in milliseconds.
    #[must_use]
    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Sets the window used for subsequent attempts.
    pub fn set_window_ms(&mut self, window_ms: u64) {
        self.window_ms = window_ms;
    }

    /// Attempts to fire at `now_ms`.
    ///
    /// Returns `true` and records the timestamp if the window has elapsed
    /// since the last successful fire (or if the cool-down has never fired).
    pub fn try_fire(&mut self, now_ms: u64) -> bool {
        let ready = match self.last_fired_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.window_ms,
            None => true,
        };
        if ready {
            self.last_fired_ms = Some(now_ms);
        }
        ready
    }

    /// Forgets the last fire, so the next attempt succeeds immediately.
    pub fn reset(&mut self) {
        self.last_fired_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{Cooldown, DebounceTimer};

    #[test]
    fn debounce_fires_once_after_quiet_period() {
        let mut timer = DebounceTimer::new(150);
        assert!(!timer.is_pending());
        assert!(!timer.fire(0));

        timer.arm(1_000);
        assert!(timer.is_pending());
        assert_eq!(timer.deadline(), Some(1_150));

        assert!(!timer.fire(1_149));
        assert!(timer.fire(1_150));
        assert!(!timer.is_pending());
        assert!(!timer.fire(10_000));
    }

    #[test]
    fn rearming_supersedes_pending_deadline() {
        let mut timer = DebounceTimer::new(150);
        timer.arm(1_000);
        timer.arm(1_100);

        // The first deadline (1150) no longer counts.
        assert!(!timer.fire(1_150));
        assert!(timer.fire(1_250));
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut timer = DebounceTimer::new(150);
        timer.arm(1_000);
        timer.cancel();
        assert!(!timer.is_pending());
        assert!(!timer.fire(2_000));
    }

    #[test]
    fn set_delay_applies_to_next_arm() {
        let mut timer = DebounceTimer::new(150);
        timer.arm(0);
        timer.set_delay_ms(500);
        // Pending deadline keeps the old delay.
        assert!(timer.fire(150));

        timer.arm(1_000);
        assert!(!timer.fire(1_150));
        assert!(timer.fire(1_500));
    }

    #[test]
    fn cooldown_first_fire_always_succeeds() {
        let mut cd = Cooldown::new(500);
        assert!(cd.try_fire(42));
    }

    #[test]
    fn cooldown_blocks_within_window() {
        let mut cd = Cooldown::new(500);
        assert!(cd.try_fire(1_000));
        assert!(!cd.try_fire(1_200));
        assert!(!cd.try_fire(1_499));
        assert!(cd.try_fire(1_500));
    }

    #[test]
    fn failed_attempts_do_not_extend_window() {
        let mut cd = Cooldown::new(500);
        assert!(cd.try_fire(1_000));
        // Repeated failures at various times must not push the deadline out.
        assert!(!cd.try_fire(1_100));
        assert!(!cd.try_fire(1_400));
        assert!(cd.try_fire(1_500));
    }

    #[test]
    fn reset_reopens_the_window() {
        let mut cd = Cooldown::new(500);
        assert!(cd.try_fire(1_000));
        cd.reset();
        assert!(cd.try_fire(1_001));
    }
}
