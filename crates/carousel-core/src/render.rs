#![forbid(unsafe_code)]

//! Render surface: a pure projection of carousel state into paintable values.
//!
//! A [`RenderFrame`] carries everything a host needs to paint one frame:
//! the track offset, whether the offset change should animate, the square
//! card size, every card of the extended sequence, and the indicator dots.
//! The DOM host paints it directly; other hosts can serialize it.

use core::time::Duration;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::config::CarouselConfig;
use crate::index::LoopWindow;
use crate::item::Items;
use crate::sequence::{ExtendedSequence, SlotKey};

/// Responsive card sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Layout {
    container_width: f64,
    card_width: f64,
}

impl Layout {
    /// Layout at the configured design viewport.
    #[must_use]
    pub fn design(config: &CarouselConfig) -> Self {
        Self {
            container_width: config.viewport_width,
            card_width: config.card_width,
        }
    }

    /// Size cards for a measured container so the design number of cards
    /// stays visible, capped at the design card width.
    ///
    /// Returns `None` for a zero, negative, or non-finite width (e.g. a
    /// container that is not laid out yet).
    #[must_use]
    pub fn measure(container_width: f64, config: &CarouselConfig) -> Option<Self> {
        if !container_width.is_finite() || container_width <= 0.0 {
            return None;
        }
        let visible = config.design_visible_cards();
        let card_width = (container_width / visible).min(config.card_width);
        Some(Self {
            container_width,
            card_width,
        })
    }

    #[inline]
    #[must_use]
    pub const fn container_width(&self) -> f64 {
        self.container_width
    }

    /// Card edge length; cards are square.
    #[inline]
    #[must_use]
    pub const fn card_width(&self) -> f64 {
        self.card_width
    }

    /// Clones needed on each side for this layout.
    #[must_use]
    pub fn clone_count(&self) -> usize {
        crate::sequence::clone_count_for(self.container_width, self.card_width)
    }
}

/// Track offset for a virtual index: `-(index * card_width) + drag_offset`.
#[must_use]
pub fn translate_x(index: usize, card_width: f64, drag_offset: f64) -> f64 {
    -(index as f64 * card_width) + drag_offset
}

/// Animated transform transition.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TransitionStyle {
    pub duration_ms: u64,
    /// `cubic-bezier` control points.
    pub easing: [f64; 4],
}

impl TransitionStyle {
    #[must_use]
    pub fn from_config(config: &CarouselConfig) -> Self {
        Self {
            duration_ms: config.animation_ms,
            easing: config.easing,
        }
    }

    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// CSS `transition` value, e.g.
    /// `transform 0.4s cubic-bezier(0.25, 0.1, 0.25, 1)`.
    #[must_use]
    pub fn css(&self) -> String {
        let [x1, y1, x2, y2] = self.easing;
        format!(
            "transform {}s cubic-bezier({x1}, {y1}, {x2}, {y2})",
            self.duration().as_secs_f64()
        )
    }
}

/// One card of the extended sequence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CardView<'a> {
    pub key: SlotKey,
    /// Virtual slot index.
    pub slot: usize,
    /// Real item index.
    pub item: usize,
    pub title: &'a str,
    pub image: &'a str,
}

/// One indicator dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct IndicatorView {
    /// Item id, stable across frames.
    pub id: u64,
    pub item: usize,
    /// Slot the indicator navigates to.
    pub target: usize,
    pub active: bool,
}

/// Complete paint description of one frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RenderFrame<'a> {
    pub translate_x: f64,
    /// `Some` only while a slide is animating and no drag is active.
    pub transition: Option<TransitionStyle>,
    pub card_size: f64,
    pub dragging: bool,
    /// Bumped whenever the card list changes; hosts rebuild cards on change.
    pub generation: u64,
    pub current: usize,
    pub real_index: usize,
    pub cards: Vec<CardView<'a>>,
    pub indicators: Vec<IndicatorView>,
}

impl RenderFrame<'_> {
    /// CSS `transition` value: the animated style or `none`.
    #[must_use]
    pub fn transition_css(&self) -> String {
        self.transition
            .map_or_else(|| "none".to_owned(), |style| style.css())
    }

    /// CSS `transform` value for the track.
    #[must_use]
    pub fn transform_css(&self) -> String {
        format!("translateX({}px)", self.translate_x)
    }
}

/// Cards for every slot of `sequence`.
#[must_use]
pub fn cards<'a>(sequence: &ExtendedSequence, items: &'a Items) -> Vec<CardView<'a>> {
    sequence
        .slots()
        .iter()
        .enumerate()
        .filter_map(|(slot, s)| {
            items.get(s.item).map(|item| CardView {
                key: s.key,
                slot,
                item: s.item,
                title: item.title.as_str(),
                image: item.image.as_str(),
            })
        })
        .collect()
}

/// One indicator per real item, the one for `real_index` active.
#[must_use]
pub fn indicators(items: &Items, window: LoopWindow, real_index: usize) -> Vec<IndicatorView> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| IndicatorView {
            id: item.id,
            item: i,
            target: window.slot_of(i),
            active: i == real_index,
        })
        .collect()
}
