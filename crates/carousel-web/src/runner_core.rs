#![forbid(unsafe_code)]

//! Platform-independent runner core wrapping [`Carousel`].
//!
//! Shared between the wasm-bindgen exports, the DOM mount, and the native
//! test harness. No JS/WASM types here.
//!
//! # Invariants
//! - The runner clock never goes backwards; stale host timestamps are
//!   clamped to the last observed time.
//! - Effects accumulate until [`RunnerCore::take_effects`] drains them, in
//!   the order the reducer produced them.

use core::time::Duration;

use carousel_core::{Carousel, CarouselConfig, CarouselItem, Effect, Items, Msg};
use tracing::debug;

use crate::error::HostError;
use crate::input::HostEvent;

/// Host-side driver: clock, reducer, and effect queue.
#[derive(Debug, Clone)]
pub struct RunnerCore {
    carousel: Carousel,
    now: Duration,
    effects: Vec<Effect>,
}

/// Convert a host millisecond timestamp to a clock reading.
///
/// Non-finite and negative values map to zero.
#[must_use]
pub fn duration_from_ms(ms: f64) -> Duration {
    if !ms.is_finite() || ms <= 0.0 {
        return Duration::ZERO;
    }
    let secs = (ms / 1000.0).min(Duration::MAX.as_secs_f64());
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

impl RunnerCore {
    /// Build from JSON-encoded items and config at host time `t_ms`.
    ///
    /// An empty `config_json` selects defaults.
    pub fn new(items_json: &str, config_json: &str, t_ms: f64) -> Result<Self, HostError> {
        let items = Items::from_json_str(items_json)?;
        let config = if config_json.trim().is_empty() {
            CarouselConfig::default()
        } else {
            CarouselConfig::from_json_str(config_json)?
        };
        Ok(Self::from_parts(items, config, t_ms)?)
    }

    /// Build from already-decoded parts.
    pub fn from_parts(
        items: Items,
        config: CarouselConfig,
        t_ms: f64,
    ) -> Result<Self, carousel_core::CarouselError> {
        let now = duration_from_ms(t_ms);
        Ok(Self {
            carousel: Carousel::new(items, config, now)?,
            now,
            effects: Vec::new(),
        })
    }

    /// Advance the clock to `t_ms`. Earlier timestamps are ignored.
    pub fn set_time_ms(&mut self, t_ms: f64) {
        self.now = self.now.max(duration_from_ms(t_ms));
    }

    #[inline]
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Feed one host event. Returns `true` if it mapped to a message.
    pub fn handle(&mut self, event: &HostEvent) -> bool {
        self.set_time_ms(event.t_ms());
        match event.to_msg() {
            Some(msg) => {
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }

    /// Parse a JSON-encoded host event and feed it.
    ///
    /// Returns `false` if the event was malformed or ignored.
    pub fn push_encoded_input(&mut self, json: &str) -> bool {
        match HostEvent::from_json_str(json) {
            Ok(event) => self.handle(&event),
            Err(err) => {
                debug!(target: "carousel_web::runner", error = %err, "host event rejected");
                false
            }
        }
    }

    /// Run one message at the current clock.
    pub fn dispatch(&mut self, msg: Msg) {
        let effects = self.carousel.update(msg, self.now);
        self.effects.extend(effects);
    }

    /// Replace the items from a JSON array.
    ///
    /// Malformed JSON is an error; an empty list is logged and ignored by
    /// the reducer.
    pub fn set_items_json(&mut self, json: &str) -> Result<(), HostError> {
        let items: Vec<CarouselItem> = serde_json::from_str(json)?;
        self.dispatch(Msg::SetItems(items));
        Ok(())
    }

    /// Drain pending effects.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Milliseconds until the next timer-driven change, or `None` if nothing
    /// is scheduled. Zero when a deadline has already passed.
    #[must_use]
    pub fn wake_delay_ms(&self) -> Option<f64> {
        self.carousel
            .next_deadline()
            .map(|at| at.saturating_sub(self.now).as_secs_f64() * 1000.0)
    }

    /// Current render frame as JSON.
    pub fn frame_json(&self) -> Result<String, HostError> {
        Ok(serde_json::to_string(&self.carousel.frame())?)
    }

    /// `true` while a drag session owns the pointer.
    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.carousel.phase().is_dragging()
    }

    #[must_use]
    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }
}
