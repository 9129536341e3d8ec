#![forbid(unsafe_code)]

//! Autoplay scheduling with orthogonal suspend conditions.
//!
//! # Invariants
//!
//! 1. The deadline is armed iff no [`Suspend`] flag is set.
//! 2. Clearing the last flag re-arms at `now + interval`, so autoplay always
//!    fires within one interval of resuming.
//! 3. [`Autoplay::poll`] fires at most once per call. A late poll re-arms at
//!    `due + interval`, or at `now + interval` when that has also passed, so a
//!    stalled host never triggers a burst of catch-up advances.

use core::time::Duration;

use bitflags::bitflags;

use crate::timer::Deadline;

bitflags! {
    /// Conditions that pause autoplay. Any set flag suspends it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Suspend: u8 {
        /// The pointer is over the carousel.
        const HOVERED  = 0b001;
        /// A drag session is open.
        const DRAGGING = 0b010;
        /// The page is in the background.
        const HIDDEN   = 0b100;
    }
}

/// Recurring advance timer.
#[derive(Debug, Clone)]
pub struct Autoplay {
    interval: Duration,
    suspend: Suspend,
    deadline: Deadline,
}

impl Autoplay {
    /// Start running with the first advance one `interval` after `now`.
    #[must_use]
    pub fn new(interval: Duration, now: Duration) -> Self {
        let mut deadline = Deadline::idle();
        deadline.arm(now, interval);
        Self {
            interval,
            suspend: Suspend::empty(),
            deadline,
        }
    }

    /// Currently set suspend flags.
    #[inline]
    #[must_use]
    pub const fn suspend(&self) -> Suspend {
        self.suspend
    }

    /// Whether no suspend condition holds.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.suspend.is_empty()
    }

    /// Set or clear `flag`. Returns `true` if the running state changed.
    pub fn set(&mut self, flag: Suspend, on: bool, now: Duration) -> bool {
        let was_running = self.is_running();
        self.suspend.set(flag, on);
        let running = self.is_running();
        match (was_running, running) {
            (true, false) => {
                self.deadline.cancel();
                true
            }
            (false, true) => {
                self.deadline.arm(now, self.interval);
                true
            }
            _ => false,
        }
    }

    /// Restart the countdown from `now`. No effect while suspended.
    pub fn restart(&mut self, now: Duration) {
        if self.is_running() {
            self.deadline.arm(now, self.interval);
        }
    }

    /// Returns `true` when an advance is due at `now`, re-arming for the next.
    pub fn poll(&mut self, now: Duration) -> bool {
        let Some(due) = self.deadline.due() else {
            return false;
        };
        if now < due {
            return false;
        }
        let next = due.saturating_add(self.interval);
        if next > now {
            self.deadline.arm_at(next);
        } else {
            self.deadline.arm(now, self.interval);
        }
        true
    }

    /// Instant of the next advance, if running.
    #[must_use]
    pub const fn next_deadline(&self) -> Option<Duration> {
        self.deadline.due()
    }
}
