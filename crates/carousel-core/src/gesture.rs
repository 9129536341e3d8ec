#![forbid(unsafe_code)]

//! Drag tracking: turns horizontal pointer/touch positions into a live track
//! offset and, on release, a slide decision.
//!
//! # State Machine
//!
//! `Idle → Dragging → Idle`. [`DragTracker::begin`] opens a session,
//! [`DragTracker::update`] moves it, [`DragTracker::finish`] or
//! [`DragTracker::cancel`] closes it.
//!
//! # Decision rule
//!
//! On release, with `delta = end_x - start_x` and
//! `velocity = |delta| / max(elapsed, 1ms)` in px/ms, a slide commits when
//! `|delta| >= min_distance` or `velocity > swipe_velocity`. Dragging right
//! (positive delta) reveals the previous card; dragging left the next one.
//!
//! # Invariants
//!
//! 1. At most one session is open; a second `begin` is ignored.
//! 2. `offset()` is `0.0` whenever no session is open.
//! 3. `moved` is monotonic within a session: once past the jitter threshold
//!    it stays set until the session closes.

use core::time::Duration;

use crate::config::CarouselConfig;

const MIN_ELAPSED: Duration = Duration::from_millis(1);

/// Thresholds for committing a drag into a slide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConfig {
    /// Distance (px) that always commits.
    pub min_distance: f64,
    /// Movement (px) that separates a drag from click jitter.
    pub jitter: f64,
    /// Release velocity (px/ms) that commits regardless of distance.
    pub swipe_velocity: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self::from(&CarouselConfig::default())
    }
}

impl From<&CarouselConfig> for DragConfig {
    fn from(config: &CarouselConfig) -> Self {
        Self {
            min_distance: config.min_drag_distance,
            jitter: config.drag_jitter,
            swipe_velocity: config.swipe_velocity,
        }
    }
}

/// Mouse button that pressed down on the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
    Other(u16),
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub const fn from_dom(code: i16) -> Self {
        match code {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            other => Self::Other(other.unsigned_abs()),
        }
    }
}

/// Input device that opened a drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse(MouseButton),
    /// First touch point of a touch sequence.
    Touch,
}

impl PointerSource {
    /// Only the primary mouse button and touches start a drag.
    #[must_use]
    pub const fn can_drag(self) -> bool {
        matches!(self, Self::Mouse(MouseButton::Primary) | Self::Touch)
    }
}

/// Direction of a committed slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    Prev,
    Next,
}

impl SlideDirection {
    /// Index delta for this direction.
    #[must_use]
    pub const fn delta(self) -> i64 {
        match self {
            Self::Prev => -1,
            Self::Next => 1,
        }
    }
}

/// Ephemeral state of one drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub source: PointerSource,
    pub start_x: f64,
    pub start_time: Duration,
    pub offset: f64,
    /// Movement exceeded the jitter threshold at some point.
    pub moved: bool,
}

/// Summary of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    pub delta: f64,
    pub elapsed: Duration,
    /// Release velocity in px/ms.
    pub velocity: f64,
    pub moved: bool,
    pub decision: Option<SlideDirection>,
}

/// Stateful drag tracker.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    config: DragConfig,
    session: Option<DragSession>,
}

impl DragTracker {
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Open a session at `x`. Returns `false` if a session is already open,
    /// the source cannot drag, or `x` is not finite.
    pub fn begin(&mut self, x: f64, now: Duration, source: PointerSource) -> bool {
        if self.session.is_some() || !source.can_drag() || !x.is_finite() {
            return false;
        }
        self.session = Some(DragSession {
            source,
            start_x: x,
            start_time: now,
            offset: 0.0,
            moved: false,
        });
        true
    }

    /// Move the open session to `x`. Returns the new offset, or `None` when
    /// idle. Non-finite positions are ignored.
    pub fn update(&mut self, x: f64) -> Option<f64> {
        let jitter = self.config.jitter;
        let session = self.session.as_mut()?;
        if x.is_finite() {
            session.offset = x - session.start_x;
            if session.offset.abs() > jitter {
                session.moved = true;
            }
        }
        Some(session.offset)
    }

    /// Close the session at `x` and decide whether to slide.
    pub fn finish(&mut self, x: f64, now: Duration) -> Option<DragRelease> {
        self.update(x)?;
        let session = self.session.take()?;
        let delta = session.offset;
        let elapsed = now.saturating_sub(session.start_time).max(MIN_ELAPSED);
        let velocity = delta.abs() / (elapsed.as_secs_f64() * 1000.0);
        let commit = delta.abs() >= self.config.min_distance || velocity > self.config.swipe_velocity;
        let decision = match commit {
            false => None,
            true if delta > 0.0 => Some(SlideDirection::Prev),
            true if delta < 0.0 => Some(SlideDirection::Next),
            // Zero delta can only commit with a zero distance threshold.
            true => None,
        };
        Some(DragRelease {
            delta,
            elapsed,
            velocity,
            moved: session.moved,
            decision,
        })
    }

    /// Abandon the open session without a decision.
    pub fn cancel(&mut self) -> Option<DragSession> {
        self.session.take()
    }

    /// Live offset (0 when idle).
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.session.map_or(0.0, |session| session.offset)
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the open session moved past the jitter threshold.
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.session.is_some_and(|session| session.moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: Duration = Duration::from_millis(1_000);
    const MS_300: Duration = Duration::from_millis(300);
    const MOUSE: PointerSource = PointerSource::Mouse(MouseButton::Primary);

    fn tracker() -> DragTracker {
        DragTracker::new(DragConfig::default())
    }

    #[test]
    fn drag_right_past_threshold_goes_prev() {
        let mut t = tracker();
        assert!(t.begin(100.0, T0, MOUSE));
        t.update(150.0);
        let release = t.finish(150.0, T0 + MS_300).expect("session open");
        assert_eq!(release.decision, Some(SlideDirection::Prev));
        assert!(release.moved);
        assert_eq!(t.offset(), 0.0);
        assert!(!t.is_dragging());
    }

    #[test]
    fn drag_left_past_threshold_goes_next() {
        let mut t = tracker();
        t.begin(100.0, T0, PointerSource::Touch);
        let release = t.finish(50.0, T0 + MS_300).expect("session open");
        assert_eq!(release.decision, Some(SlideDirection::Next));
        assert!((release.delta + 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn short_slow_drag_snaps_back() {
        let mut t = tracker();
        t.begin(100.0, T0, MOUSE);
        assert_eq!(t.update(120.0), Some(20.0));
        let release = t.finish(120.0, T0 + MS_300).expect("session open");
        assert_eq!(release.decision, None);
        assert!(release.velocity < 0.5);
        assert_eq!(t.offset(), 0.0);
    }

    #[test]
    fn short_fast_flick_commits() {
        let mut t = tracker();
        t.begin(100.0, T0, PointerSource::Touch);
        let release = t
            .finish(80.0, T0 + Duration::from_millis(20))
            .expect("session open");
        assert!((release.velocity - 1.0).abs() < 1e-9);
        assert_eq!(release.decision, Some(SlideDirection::Next));
    }

    #[test]
    fn zero_elapsed_is_clamped() {
        let mut t = tracker();
        t.begin(0.0, T0, MOUSE);
        let release = t.finish(0.0, T0).expect("session open");
        assert_eq!(release.elapsed, Duration::from_millis(1));
        assert_eq!(release.velocity, 0.0);
        assert_eq!(release.decision, None);
    }

    #[test]
    fn jitter_threshold_is_exclusive() {
        let mut t = tracker();
        t.begin(0.0, T0, MOUSE);
        t.update(5.0);
        assert!(!t.has_moved());
        t.update(5.5);
        assert!(t.has_moved());
        // Coming back inside the threshold keeps the flag.
        t.update(1.0);
        assert!(t.has_moved());
    }

    #[test]
    fn second_begin_is_ignored() {
        let mut t = tracker();
        assert!(t.begin(10.0, T0, MOUSE));
        assert!(!t.begin(99.0, T0, PointerSource::Touch));
        assert_eq!(t.update(20.0), Some(10.0));
    }

    #[test]
    fn idle_tracker_ignores_move_and_finish() {
        let mut t = tracker();
        assert_eq!(t.update(10.0), None);
        assert!(t.finish(10.0, T0).is_none());
        assert!(t.cancel().is_none());
    }

    #[test]
    fn only_primary_button_drags() {
        let mut t = tracker();
        assert!(!t.begin(0.0, T0, PointerSource::Mouse(MouseButton::Secondary)));
        assert!(!t.begin(0.0, T0, PointerSource::Mouse(MouseButton::from_dom(1))));
        assert!(!t.is_dragging());
        assert_eq!(MouseButton::from_dom(0), MouseButton::Primary);
        assert_eq!(MouseButton::from_dom(4), MouseButton::Other(4));
    }

    #[test]
    fn non_finite_positions_are_ignored() {
        let mut t = tracker();
        assert!(!t.begin(f64::NAN, T0, MOUSE));
        t.begin(0.0, T0, MOUSE);
        t.update(-30.0);
        assert_eq!(t.update(f64::INFINITY), Some(-30.0));
    }
}
