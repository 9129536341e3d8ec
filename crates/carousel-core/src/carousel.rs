#![forbid(unsafe_code)]

//! The carousel state machine.
//!
//! [`Carousel::update`] is the single entry point: every host signal is a
//! [`Msg`], processed to completion against a host-supplied monotonic
//! timestamp, and answered with zero or more [`Effect`]s. After each
//! dispatch the host asks [`Carousel::next_deadline`] and schedules one
//! wake-up that delivers [`Msg::Tick`].
//!
//! # Phases
//!
//! ```text
//!            slide                 transition end / safety expiry
//!   Idle ───────────▶ Transitioning ──────────────────────────────▶ Idle
//!    │  ▲                  │
//!    │  │ drag end/cancel  │ drag start (transition cut short, remapped)
//!    ▼  │                  ▼
//!   Dragging ◀─────────────┘
//! ```
//!
//! Autoplay is orthogonal to the phase and is paused by [`Suspend`] flags.
//!
//! # Invariants
//!
//! 1. The virtual index is always inside the extended sequence.
//! 2. Whenever the phase is `Idle`, the virtual index is in the real band.
//! 3. A transition never outlives its safety deadline by more than one
//!    dispatch.
//! 4. Autoplay never fires while hovered, dragging, or hidden.
//!
//! # Failure Modes
//!
//! - Slide requests whose target falls outside the extended sequence (more
//!   rapid slides than there are clones) are dropped.
//! - A missing completion signal is recovered by the safety deadline and
//!   logged at `warn`.
//! - `SetItems` with an empty list and zero-width resizes are ignored.

use core::time::Duration;

use tracing::{debug, trace, warn};

use crate::autoplay::{Autoplay, Suspend};
use crate::config::CarouselConfig;
use crate::error::CarouselError;
use crate::gesture::{DragConfig, DragRelease, DragTracker, PointerSource, SlideDirection};
use crate::index::{IndexModel, LoopWindow};
use crate::item::{CarouselItem, Items};
use crate::render::{self, Layout, RenderFrame, TransitionStyle};
use crate::sequence::ExtendedSequence;
use crate::timer::{Deadline, earliest};

/// Interaction phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// At rest on a real slot.
    Idle,
    /// A slide is animating; `safety` is when it is forced to complete.
    Transitioning { safety: Duration },
    /// A drag session is open.
    Dragging,
}

impl Phase {
    #[must_use]
    pub const fn is_transitioning(self) -> bool {
        matches!(self, Self::Transitioning { .. })
    }

    #[must_use]
    pub const fn is_dragging(self) -> bool {
        matches!(self, Self::Dragging)
    }
}

/// Host signal.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Pointer or touch pressed on the track.
    DragStart { x: f64, source: PointerSource },
    /// Pointer or touch moved while pressed.
    DragMove { x: f64 },
    /// Pointer or touch released.
    DragEnd { x: f64 },
    /// Gesture interrupted (touch cancel, lost capture).
    DragCancel,
    /// Scheduled wake-up; fires due deadlines.
    Tick,
    /// The track's transform transition finished.
    TransitionEnd,
    /// Page visibility changed.
    VisibilityChanged { visible: bool },
    /// The container was measured at a new width.
    Resize { container_width: f64 },
    /// Pointer entered or left the carousel.
    HoverChanged { hovering: bool },
    /// Previous control activated.
    Prev,
    /// Next control activated.
    Next,
    /// Indicator for real item `item` activated.
    GoTo { item: usize },
    /// Card at virtual slot `slot` clicked or activated by keyboard.
    Activate { slot: usize },
    /// Replace the item list.
    SetItems(Vec<CarouselItem>),
}

/// Side effect requested from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open a URL in a new browsing context with `noopener,noreferrer`.
    OpenUrl(String),
    /// Start routing pointer move/up events to the carousel globally.
    CapturePointer,
    /// Stop global pointer routing.
    ReleasePointer,
}

/// What initiated a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlideCause {
    /// Prev/next, indicator, or committed drag; restarts the autoplay countdown.
    User,
    Autoplay,
}

/// Headless infinite carousel.
#[derive(Debug, Clone)]
pub struct Carousel {
    config: CarouselConfig,
    items: Items,
    layout: Layout,
    sequence: ExtendedSequence,
    generation: u64,
    index: IndexModel,
    phase: Phase,
    drag: DragTracker,
    autoplay: Autoplay,
    has_dragged: bool,
    click_grace: Deadline,
}

impl Carousel {
    /// Build a carousel at the first real item with autoplay running from
    /// `now`.
    pub fn new(items: Items, config: CarouselConfig, now: Duration) -> Result<Self, CarouselError> {
        config.ensure_valid()?;
        let layout = Layout::design(&config);
        let sequence = ExtendedSequence::build(items.count(), layout.clone_count());
        let index = IndexModel::new(sequence.window());
        debug!(
            target: "carousel_core::carousel",
            items = items.count().get(),
            clone_count = sequence.window().clone_count(),
            "carousel created"
        );
        Ok(Self {
            drag: DragTracker::new(DragConfig::from(&config)),
            autoplay: Autoplay::new(config.auto_slide_interval(), now),
            config,
            items,
            layout,
            sequence,
            generation: 0,
            index,
            phase: Phase::Idle,
            has_dragged: false,
            click_grace: Deadline::idle(),
        })
    }

    /// Process one message at host time `now`.
    pub fn update(&mut self, msg: Msg, now: Duration) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.fire_due(now);
        match msg {
            Msg::Tick => {}
            Msg::DragStart { x, source } => self.drag_start(x, source, now, &mut effects),
            Msg::DragMove { x } => self.drag_move(x),
            Msg::DragEnd { x } => self.drag_end(x, now, &mut effects),
            Msg::DragCancel => self.drag_cancel(now, &mut effects),
            Msg::TransitionEnd => self.transition_end(),
            Msg::VisibilityChanged { visible } => self.visibility(visible, now, &mut effects),
            Msg::Resize { container_width } => self.resize(container_width),
            Msg::HoverChanged { hovering } => {
                if self.autoplay.set(Suspend::HOVERED, hovering, now) {
                    debug!(target: "carousel_core::autoplay", hovering, "hover changed autoplay");
                }
            }
            Msg::Prev => self.slide_by(SlideDirection::Prev, now, SlideCause::User),
            Msg::Next => self.slide_by(SlideDirection::Next, now, SlideCause::User),
            Msg::GoTo { item } => self.go_to(item, now),
            Msg::Activate { slot } => self.activate(slot, now, &mut effects),
            Msg::SetItems(items) => self.set_items(items),
        }
        effects
    }

    /// Earliest instant at which a `Tick` has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        let safety = match self.phase {
            Phase::Transitioning { safety } => Some(safety),
            _ => None,
        };
        earliest(
            earliest(safety, self.click_grace.due()),
            self.autoplay.next_deadline(),
        )
    }

    /// Paint description of the current state.
    #[must_use]
    pub fn frame(&self) -> RenderFrame<'_> {
        let dragging = self.phase.is_dragging();
        let transition = (self.phase.is_transitioning() && !dragging)
            .then(|| TransitionStyle::from_config(&self.config));
        let real_index = self.index.real_index();
        RenderFrame {
            translate_x: render::translate_x(
                self.index.current(),
                self.layout.card_width(),
                self.drag.offset(),
            ),
            transition,
            card_size: self.layout.card_width(),
            dragging,
            generation: self.generation,
            current: self.index.current(),
            real_index,
            cards: render::cards(&self.sequence, &self.items),
            indicators: render::indicators(&self.items, self.sequence.window(), real_index),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Current virtual index.
    #[inline]
    #[must_use]
    pub const fn current(&self) -> usize {
        self.index.current()
    }

    /// Real item currently shown.
    #[must_use]
    pub fn real_index(&self) -> usize {
        self.index.real_index()
    }

    #[must_use]
    pub const fn window(&self) -> LoopWindow {
        self.index.window()
    }

    #[must_use]
    pub fn sequence(&self) -> &ExtendedSequence {
        &self.sequence
    }

    #[must_use]
    pub fn items(&self) -> &Items {
        &self.items
    }

    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    #[must_use]
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Sequence generation; bumped on every rebuild.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn suspend(&self) -> Suspend {
        self.autoplay.suspend()
    }

    /// Next autoplay advance, if running.
    #[must_use]
    pub const fn autoplay_deadline(&self) -> Option<Duration> {
        self.autoplay.next_deadline()
    }

    /// Whether card clicks are currently suppressed after a drag.
    #[must_use]
    pub const fn has_dragged(&self) -> bool {
        self.has_dragged
    }

    /// Live drag offset in pixels.
    #[must_use]
    pub fn drag_offset(&self) -> f64 {
        self.drag.offset()
    }

    /// Whether the open drag has moved past the jitter threshold.
    #[must_use]
    pub fn drag_moved(&self) -> bool {
        self.drag.has_moved()
    }

    // -----------------------------------------------------------------------
    // Timers
    // -----------------------------------------------------------------------

    fn fire_due(&mut self, now: Duration) {
        if let Phase::Transitioning { safety } = self.phase
            && now >= safety
        {
            self.phase = Phase::Idle;
            let stalled = self.index.current();
            self.index.normalize();
            self.index.settle();
            warn!(
                target: "carousel_core::carousel",
                stalled,
                recovered = self.index.current(),
                "transition end not observed; forced completion"
            );
        }

        if self.click_grace.take_expired(now) {
            self.has_dragged = false;
            trace!(target: "carousel_core::gesture", "click grace expired");
        }

        if self.autoplay.poll(now) {
            trace!(target: "carousel_core::autoplay", "autoplay advance");
            self.slide_by(SlideDirection::Next, now, SlideCause::Autoplay);
        }
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    fn slide_by(&mut self, direction: SlideDirection, now: Duration, cause: SlideCause) {
        let target = self.index.current() as i64 + direction.delta();
        self.slide_to(target, now, cause);
    }

    fn go_to(&mut self, item: usize, now: Duration) {
        if item >= self.items.count().get() {
            debug!(target: "carousel_core::carousel", item, "indicator out of range; ignored");
            return;
        }
        let target = self.sequence.window().slot_of(item) as i64;
        self.slide_to(target, now, SlideCause::User);
    }

    fn slide_to(&mut self, target: i64, now: Duration, cause: SlideCause) {
        if self.phase.is_dragging() {
            debug!(target: "carousel_core::carousel", target, "slide during drag; ignored");
            return;
        }
        if target == self.index.current() as i64 {
            return;
        }
        if !self.index.slide_to(target) {
            debug!(
                target: "carousel_core::carousel",
                target,
                extended_len = self.sequence.len(),
                "slide target outside sequence; dropped"
            );
            return;
        }
        self.phase = Phase::Transitioning {
            safety: now.saturating_add(self.config.safety_timeout()),
        };
        if cause == SlideCause::User {
            self.autoplay.restart(now);
        }
        trace!(
            target: "carousel_core::carousel",
            index = self.index.current(),
            real = self.index.real_index(),
            ?cause,
            "slide"
        );
    }

    fn transition_end(&mut self) {
        if !self.phase.is_transitioning() {
            trace!(target: "carousel_core::carousel", "stray transition end");
            return;
        }
        self.phase = Phase::Idle;
        if let Some(from) = self.index.settle() {
            trace!(
                target: "carousel_core::carousel",
                from,
                to = self.index.current(),
                "remapped clone slot"
            );
        }
    }

    // -----------------------------------------------------------------------
    // Gestures
    // -----------------------------------------------------------------------

    fn drag_start(&mut self, x: f64, source: PointerSource, now: Duration, effects: &mut Vec<Effect>) {
        if self.phase.is_dragging() || !self.drag.begin(x, now, source) {
            return;
        }
        if self.phase.is_transitioning() {
            // The transition style is suppressed while dragging, so the
            // in-flight slide completes on the spot.
            self.index.settle();
        }
        self.phase = Phase::Dragging;
        self.has_dragged = false;
        self.click_grace.cancel();
        self.autoplay.set(Suspend::DRAGGING, true, now);
        effects.push(Effect::CapturePointer);
        trace!(target: "carousel_core::gesture", x, ?source, "drag start");
    }

    fn drag_move(&mut self, x: f64) {
        if !self.phase.is_dragging() {
            return;
        }
        self.drag.update(x);
        if self.drag.has_moved() {
            self.has_dragged = true;
        }
    }

    fn drag_end(&mut self, x: f64, now: Duration, effects: &mut Vec<Effect>) {
        if !self.phase.is_dragging() {
            return;
        }
        let release = self.drag.finish(x, now);
        self.close_drag(now, effects);
        let Some(DragRelease {
            delta,
            velocity,
            moved,
            decision,
            ..
        }) = release
        else {
            return;
        };
        if moved {
            self.has_dragged = true;
            self.click_grace.arm(now, self.config.click_grace());
        }
        debug!(
            target: "carousel_core::gesture",
            delta,
            velocity,
            ?decision,
            "drag end"
        );
        if let Some(direction) = decision {
            self.slide_by(direction, now, SlideCause::User);
        }
    }

    fn drag_cancel(&mut self, now: Duration, effects: &mut Vec<Effect>) {
        if !self.phase.is_dragging() {
            return;
        }
        let moved = self.drag.cancel().is_some_and(|session| session.moved);
        self.close_drag(now, effects);
        if moved {
            self.click_grace.arm(now, self.config.click_grace());
        }
        debug!(target: "carousel_core::gesture", moved, "drag cancelled");
    }

    fn close_drag(&mut self, now: Duration, effects: &mut Vec<Effect>) {
        self.phase = Phase::Idle;
        self.autoplay.set(Suspend::DRAGGING, false, now);
        effects.push(Effect::ReleasePointer);
    }

    fn activate(&mut self, slot: usize, now: Duration, effects: &mut Vec<Effect>) {
        if self.has_dragged {
            debug!(target: "carousel_core::gesture", slot, "click after drag suppressed");
            return;
        }
        let Some(item) = self.sequence.get(slot).and_then(|s| self.items.get(s.item)) else {
            debug!(target: "carousel_core::carousel", slot, "activate on unknown slot");
            return;
        };
        trace!(target: "carousel_core::carousel", slot, id = item.id, ?now, "open card");
        effects.push(Effect::OpenUrl(item.landing_page.clone()));
    }

    // -----------------------------------------------------------------------
    // Environment
    // -----------------------------------------------------------------------

    fn visibility(&mut self, visible: bool, now: Duration, effects: &mut Vec<Effect>) {
        if !visible {
            self.autoplay.set(Suspend::HIDDEN, true, now);
            self.drag_cancel(now, effects);
            debug!(target: "carousel_core::autoplay", "page hidden; autoplay paused");
            return;
        }
        if !self.phase.is_dragging() {
            self.phase = Phase::Idle;
            self.index.normalize();
            self.index.settle();
        }
        self.autoplay.set(Suspend::HIDDEN, false, now);
        self.autoplay.restart(now);
        debug!(
            target: "carousel_core::autoplay",
            index = self.index.current(),
            "page visible; autoplay resumed"
        );
    }

    fn resize(&mut self, container_width: f64) {
        let Some(layout) = Layout::measure(container_width, &self.config) else {
            debug!(target: "carousel_core::carousel", container_width, "unusable width; ignored");
            return;
        };
        self.layout = layout;
        let clone_count = layout.clone_count();
        if clone_count != self.sequence.window().clone_count() {
            self.rebuild(self.items.count(), clone_count);
        }
        trace!(
            target: "carousel_core::carousel",
            container_width,
            card_width = layout.card_width(),
            clone_count,
            "resized"
        );
    }

    fn set_items(&mut self, items: Vec<CarouselItem>) {
        let items = match Items::new(items) {
            Ok(items) => items,
            Err(err) => {
                warn!(target: "carousel_core::carousel", %err, "item update rejected; keeping current items");
                return;
            }
        };
        let count = items.count();
        self.items = items;
        self.rebuild(count, self.sequence.window().clone_count());
    }

    fn rebuild(&mut self, item_count: core::num::NonZeroUsize, clone_count: usize) {
        self.sequence = ExtendedSequence::build(item_count, clone_count);
        self.index.rebase(self.sequence.window());
        if self.phase.is_transitioning() {
            self.phase = Phase::Idle;
        }
        self.generation = self.generation.wrapping_add(1);
        debug!(
            target: "carousel_core::carousel",
            items = item_count.get(),
            clone_count,
            index = self.index.current(),
            generation = self.generation,
            "sequence rebuilt"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::MouseButton;

    const MOUSE: PointerSource = PointerSource::Mouse(MouseButton::Primary);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn items(n: u64) -> Vec<CarouselItem> {
        (0..n)
            .map(|i| {
                CarouselItem::new(
                    i + 1,
                    format!("Item {i}"),
                    format!("https://img.test/{i}.jpg"),
                    format!("https://land.test/{i}"),
                )
            })
            .collect()
    }

    fn carousel(n: u64) -> Carousel {
        let items = Items::new(items(n)).expect("non-empty");
        Carousel::new(items, CarouselConfig::default(), ms(0)).expect("valid config")
    }

    #[test]
    fn starts_at_first_real_item() {
        let c = carousel(6);
        assert_eq!(c.window().clone_count(), 4);
        assert_eq!(c.current(), 4);
        assert_eq!(c.real_index(), 0);
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.next_deadline(), Some(ms(3000)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let items = Items::new(items(2)).expect("non-empty");
        let config = CarouselConfig {
            card_width: -1.0,
            ..CarouselConfig::default()
        };
        assert!(matches!(
            Carousel::new(items, config, ms(0)),
            Err(CarouselError::InvalidConfig(_))
        ));
    }

    #[test]
    fn next_then_transition_end() {
        let mut c = carousel(6);
        c.update(Msg::Next, ms(10));
        assert_eq!(c.current(), 5);
        assert!(c.phase().is_transitioning());
        assert!(c.frame().transition.is_some());
        c.update(Msg::TransitionEnd, ms(420));
        assert_eq!(c.phase(), Phase::Idle);
        assert!(c.frame().transition.is_none());
    }

    #[test]
    fn prev_from_home_wraps_through_clone() {
        let mut c = carousel(6);
        c.update(Msg::Prev, ms(10));
        assert_eq!(c.current(), 3);
        assert_eq!(c.real_index(), 5);
        c.update(Msg::TransitionEnd, ms(420));
        assert_eq!(c.current(), 9);
        assert_eq!(c.real_index(), 5);
    }

    #[test]
    fn safety_deadline_forces_completion() {
        let mut c = carousel(6);
        c.update(Msg::Prev, ms(10));
        assert_eq!(c.next_deadline(), Some(ms(510)));
        c.update(Msg::Tick, ms(510));
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.current(), 9);
    }

    #[test]
    fn new_slide_rearms_safety_deadline() {
        let mut c = carousel(6);
        c.update(Msg::Next, ms(0));
        c.update(Msg::Next, ms(300));
        assert_eq!(c.phase(), Phase::Transitioning { safety: ms(800) });
        c.update(Msg::Tick, ms(500));
        assert!(c.phase().is_transitioning());
    }

    #[test]
    fn go_to_and_out_of_range_indicator() {
        let mut c = carousel(6);
        c.update(Msg::GoTo { item: 3 }, ms(0));
        assert_eq!(c.current(), 7);
        c.update(Msg::TransitionEnd, ms(400));
        c.update(Msg::GoTo { item: 6 }, ms(500));
        assert_eq!(c.current(), 7);
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn slide_to_current_is_noop() {
        let mut c = carousel(6);
        c.update(Msg::GoTo { item: 0 }, ms(0));
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn rapid_slides_stop_at_sequence_edge() {
        let mut c = carousel(2);
        // clone_count 4, extended_len 10, home 4.
        for _ in 0..10 {
            c.update(Msg::Next, ms(1));
        }
        assert_eq!(c.current(), 9);
        c.update(Msg::TransitionEnd, ms(400));
        assert!(c.window().is_real(c.current()));
    }

    #[test]
    fn drag_start_emits_capture_and_suspends() {
        let mut c = carousel(6);
        let fx = c.update(Msg::DragStart { x: 100.0, source: MOUSE }, ms(0));
        assert_eq!(fx, vec![Effect::CapturePointer]);
        assert!(c.suspend().contains(Suspend::DRAGGING));
        assert_eq!(c.autoplay_deadline(), None);
        c.update(Msg::DragMove { x: 130.0 }, ms(50));
        assert_eq!(c.frame().translate_x, -1200.0 + 30.0);
        assert!(c.frame().dragging);
        let fx = c.update(Msg::DragEnd { x: 130.0 }, ms(300));
        assert_eq!(fx, vec![Effect::ReleasePointer]);
        assert_eq!(c.autoplay_deadline(), Some(ms(3300)));
    }

    #[test]
    fn secondary_button_does_not_drag() {
        let mut c = carousel(3);
        let fx = c.update(
            Msg::DragStart {
                x: 0.0,
                source: PointerSource::Mouse(MouseButton::Secondary),
            },
            ms(0),
        );
        assert!(fx.is_empty());
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn drag_start_cuts_transition_short() {
        let mut c = carousel(6);
        c.update(Msg::Prev, ms(0));
        assert_eq!(c.current(), 3);
        c.update(Msg::DragStart { x: 0.0, source: PointerSource::Touch }, ms(100));
        assert_eq!(c.current(), 9);
        assert!(c.phase().is_dragging());
    }

    #[test]
    fn navigation_ignored_while_dragging() {
        let mut c = carousel(6);
        c.update(Msg::DragStart { x: 0.0, source: MOUSE }, ms(0));
        c.update(Msg::Next, ms(10));
        c.update(Msg::GoTo { item: 2 }, ms(20));
        assert_eq!(c.current(), 4);
    }

    #[test]
    fn click_grace_expires() {
        let mut c = carousel(6);
        c.update(Msg::DragStart { x: 100.0, source: MOUSE }, ms(0));
        c.update(Msg::DragMove { x: 110.0 }, ms(100));
        c.update(Msg::DragEnd { x: 110.0 }, ms(200));
        assert!(c.has_dragged());
        assert!(c.update(Msg::Activate { slot: 4 }, ms(250)).is_empty());
        assert_eq!(c.next_deadline(), Some(ms(300)));
        let fx = c.update(Msg::Activate { slot: 4 }, ms(300));
        assert_eq!(fx, vec![Effect::OpenUrl("https://land.test/0".into())]);
    }

    #[test]
    fn jitter_drag_does_not_suppress_click() {
        let mut c = carousel(6);
        c.update(Msg::DragStart { x: 100.0, source: MOUSE }, ms(0));
        c.update(Msg::DragMove { x: 103.0 }, ms(50));
        c.update(Msg::DragEnd { x: 103.0 }, ms(100));
        assert!(!c.has_dragged());
        let fx = c.update(Msg::Activate { slot: 5 }, ms(101));
        assert_eq!(fx, vec![Effect::OpenUrl("https://land.test/1".into())]);
    }

    #[test]
    fn hidden_cancels_drag() {
        let mut c = carousel(6);
        c.update(Msg::DragStart { x: 0.0, source: PointerSource::Touch }, ms(0));
        c.update(Msg::DragMove { x: -80.0 }, ms(50));
        let fx = c.update(Msg::VisibilityChanged { visible: false }, ms(60));
        assert_eq!(fx, vec![Effect::ReleasePointer]);
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.current(), 4);
        assert_eq!(c.drag_offset(), 0.0);
        assert!(c.suspend().contains(Suspend::HIDDEN));
        assert!(!c.suspend().contains(Suspend::DRAGGING));
    }

    #[test]
    fn resize_rebuilds_and_keeps_item() {
        let mut c = carousel(6);
        c.update(Msg::GoTo { item: 2 }, ms(0));
        c.update(Msg::TransitionEnd, ms(400));
        assert_eq!(c.current(), 6);
        c.update(Msg::Resize { container_width: 1500.0 }, ms(500));
        assert_eq!(c.window().clone_count(), 6);
        assert_eq!(c.current(), 8);
        assert_eq!(c.real_index(), 2);
        assert_eq!(c.generation(), 1);
        assert_eq!(c.sequence().len(), 18);

        // Same clone count: layout changes, sequence does not.
        c.update(Msg::Resize { container_width: 1400.0 }, ms(600));
        assert_eq!(c.generation(), 1);
        c.update(Msg::Resize { container_width: 0.0 }, ms(700));
        assert_eq!(c.layout().container_width(), 1400.0);
    }

    #[test]
    fn huge_resize_caps_clone_count() {
        let mut c = carousel(3);
        c.update(Msg::GoTo { item: 1 }, ms(0));
        c.update(Msg::TransitionEnd, ms(400));
        for (i, width) in [3e7, 1e300, f64::MAX].into_iter().enumerate() {
            c.update(Msg::Resize { container_width: width }, ms(500 + i as u64));
            let window = c.window();
            assert_eq!(window.clone_count(), crate::sequence::MAX_CLONE_COUNT);
            assert_eq!(c.sequence().len(), 2 * crate::sequence::MAX_CLONE_COUNT + 3);
            assert!(window.is_real(c.current()));
            assert_eq!(c.real_index(), 1);
            assert_eq!(c.frame().cards.len(), c.sequence().len());
        }
        // Only the first resize changed the clone count.
        assert_eq!(c.generation(), 1);

        c.update(Msg::Next, ms(600));
        c.update(Msg::TransitionEnd, ms(1000));
        assert_eq!(c.real_index(), 2);
        c.update(Msg::Resize { container_width: 750.0 }, ms(1100));
        assert_eq!(c.window().clone_count(), 4);
        assert_eq!(c.real_index(), 2);
    }

    #[test]
    fn empty_set_items_is_ignored() {
        let mut c = carousel(3);
        c.update(Msg::SetItems(Vec::new()), ms(0));
        assert_eq!(c.items().count().get(), 3);
        assert_eq!(c.generation(), 0);

        c.update(Msg::SetItems(items(5)), ms(10));
        assert_eq!(c.items().count().get(), 5);
        assert_eq!(c.sequence().len(), 13);
        assert_eq!(c.generation(), 1);
    }
}
