#![forbid(unsafe_code)]

//! One-shot deadlines on the host-supplied monotonic clock.
//!
//! The core never owns a real timer. It records *when* something is due and
//! the host asks for the earliest pending deadline after every dispatch,
//! scheduling a single wake-up for it.

use core::time::Duration;

/// A one-shot deadline that is either armed at an instant or idle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Duration>,
}

impl Deadline {
    /// An idle deadline.
    #[must_use]
    pub const fn idle() -> Self {
        Self { at: None }
    }

    /// Arm (or re-arm) to fire `after` past `now`.
    pub fn arm(&mut self, now: Duration, after: Duration) {
        self.at = Some(now.saturating_add(after));
    }

    /// Arm at an absolute instant.
    pub fn arm_at(&mut self, at: Duration) {
        self.at = Some(at);
    }

    /// Disarm. Returns whether it was armed.
    pub fn cancel(&mut self) -> bool {
        self.at.take().is_some()
    }

    /// Instant this deadline fires, if armed.
    #[inline]
    #[must_use]
    pub const fn due(&self) -> Option<Duration> {
        self.at
    }

    /// Whether the deadline is armed and `now` has reached it.
    #[must_use]
    pub fn expired(&self, now: Duration) -> bool {
        self.at.is_some_and(|at| now >= at)
    }

    /// Disarm and return `true` if expired at `now`; otherwise leave it.
    pub fn take_expired(&mut self, now: Duration) -> bool {
        if self.expired(now) {
            self.at = None;
            true
        } else {
            false
        }
    }
}

/// Earliest of two optional instants.
#[must_use]
pub fn earliest(a: Option<Duration>, b: Option<Duration>) -> Option<Duration> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}
