#![forbid(unsafe_code)]

//! Tunable parameters for the carousel.
//!
//! Every field has a default matching the widget's design constants, so
//! `CarouselConfig::default()` is always valid. Time values are stored as
//! integer milliseconds (`*_ms`) so the struct round-trips through JSON
//! without a custom duration format; use the accessor methods to obtain
//! [`Duration`]s.
//!
//! ```rust,ignore
//! let config = CarouselConfig::from_json_str(r#"{ "auto_slide_interval_ms": 5000 }"#)?;
//! assert_eq!(config.auto_slide_interval(), Duration::from_secs(5));
//! ```

use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::CarouselError;

/// Design card width in CSS pixels.
pub const DEFAULT_CARD_WIDTH: f64 = 300.0;
/// Design viewport width in CSS pixels (2.5 cards at design width).
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 750.0;
/// Interval between automatic advances.
pub const DEFAULT_AUTO_SLIDE_INTERVAL_MS: u64 = 3000;
/// Drag distance that always commits a slide.
pub const DEFAULT_MIN_DRAG_DISTANCE: f64 = 40.0;
/// Movement below this many pixels is click jitter, not a drag.
pub const DEFAULT_DRAG_JITTER: f64 = 5.0;
/// Release velocity (px/ms) that commits a slide regardless of distance.
pub const DEFAULT_SWIPE_VELOCITY: f64 = 0.5;
/// Slide animation length.
pub const DEFAULT_ANIMATION_MS: u64 = 400;
/// Extra wait past the animation before the stalled-transition fallback fires.
pub const DEFAULT_SAFETY_MARGIN_MS: u64 = 100;
/// How long a finished drag keeps suppressing card clicks.
pub const DEFAULT_CLICK_GRACE_MS: u64 = 100;
/// `cubic-bezier(0.25, 0.1, 0.25, 1)`, the CSS `ease` curve.
pub const DEFAULT_EASING: [f64; 4] = [0.25, 0.1, 0.25, 1.0];

/// Carousel configuration supplied by the embedding caller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselConfig {
    /// Milliseconds between automatic advances. Default: 3000.
    pub auto_slide_interval_ms: u64,
    /// Pixel distance that commits a drag into a slide. Default: 40.
    pub min_drag_distance: f64,
    /// Pixel distance separating a drag from click jitter. Default: 5.
    pub drag_jitter: f64,
    /// Release velocity in px/ms that commits a slide. Default: 0.5.
    pub swipe_velocity: f64,
    /// Maximum (design) card width in pixels. Default: 300.
    pub card_width: f64,
    /// Design viewport width in pixels. Default: 750.
    pub viewport_width: f64,
    /// Slide animation duration. Default: 400.
    pub animation_ms: u64,
    /// Margin added to the animation before forcing completion. Default: 100.
    pub safety_margin_ms: u64,
    /// Click suppression window after a drag. Default: 100.
    pub click_grace_ms: u64,
    /// Cubic-bezier control points `[x1, y1, x2, y2]` for the slide easing.
    pub easing: [f64; 4],
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_slide_interval_ms: DEFAULT_AUTO_SLIDE_INTERVAL_MS,
            min_drag_distance: DEFAULT_MIN_DRAG_DISTANCE,
            drag_jitter: DEFAULT_DRAG_JITTER,
            swipe_velocity: DEFAULT_SWIPE_VELOCITY,
            card_width: DEFAULT_CARD_WIDTH,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            animation_ms: DEFAULT_ANIMATION_MS,
            safety_margin_ms: DEFAULT_SAFETY_MARGIN_MS,
            click_grace_ms: DEFAULT_CLICK_GRACE_MS,
            easing: DEFAULT_EASING,
        }
    }
}

impl CarouselConfig {
    /// Load from a JSON string. Missing fields take their defaults.
    ///
    /// The result is validated; any violation is returned as
    /// [`CarouselError::InvalidConfig`].
    #[cfg(feature = "serde")]
    pub fn from_json_str(s: &str) -> Result<Self, CarouselError> {
        let config: Self = serde_json::from_str(s)?;
        config.ensure_valid()?;
        Ok(config)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of violations. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.auto_slide_interval_ms == 0 {
            errors.push("auto_slide_interval_ms must be > 0".into());
        }
        if !self.min_drag_distance.is_finite() || self.min_drag_distance < 0.0 {
            errors.push(format!(
                "min_drag_distance must be finite and >= 0, got {}",
                self.min_drag_distance
            ));
        }
        if !self.drag_jitter.is_finite() || self.drag_jitter < 0.0 {
            errors.push(format!(
                "drag_jitter must be finite and >= 0, got {}",
                self.drag_jitter
            ));
        }
        if !self.swipe_velocity.is_finite() || self.swipe_velocity < 0.0 {
            errors.push(format!(
                "swipe_velocity must be finite and >= 0, got {}",
                self.swipe_velocity
            ));
        }
        if !self.card_width.is_finite() || self.card_width <= 0.0 {
            errors.push(format!(
                "card_width must be finite and > 0, got {}",
                self.card_width
            ));
        }
        if !self.viewport_width.is_finite() || self.viewport_width <= 0.0 {
            errors.push(format!(
                "viewport_width must be finite and > 0, got {}",
                self.viewport_width
            ));
        }
        if self.animation_ms == 0 {
            errors.push("animation_ms must be > 0".into());
        }

        let [x1, y1, x2, y2] = self.easing;
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            errors.push(format!(
                "easing x control points must be in [0, 1], got {x1} and {x2}"
            ));
        }
        if !y1.is_finite() || !y2.is_finite() {
            errors.push("easing y control points must be finite".into());
        }

        errors
    }

    /// Validate and convert the violation list into a result.
    pub fn ensure_valid(&self) -> Result<(), CarouselError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CarouselError::InvalidConfig(errors))
        }
    }

    /// Interval between automatic advances.
    #[must_use]
    pub const fn auto_slide_interval(&self) -> Duration {
        Duration::from_millis(self.auto_slide_interval_ms)
    }

    /// Slide animation duration.
    #[must_use]
    pub const fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    /// Wait before a transition with no completion signal is forced to end.
    #[must_use]
    pub const fn safety_timeout(&self) -> Duration {
        Duration::from_millis(self.animation_ms.saturating_add(self.safety_margin_ms))
    }

    /// Click suppression window after a drag.
    #[must_use]
    pub const fn click_grace(&self) -> Duration {
        Duration::from_millis(self.click_grace_ms)
    }

    /// Cards visible at design width (2.5 with the defaults).
    #[must_use]
    pub fn design_visible_cards(&self) -> f64 {
        self.viewport_width / self.card_width
    }
}
