#![forbid(unsafe_code)]

//! Extended sequence construction for the infinite-loop illusion.
//!
//! The real items are padded with `clone_count` copies of the tail on the
//! left and `clone_count` copies of the head on the right, so a slide past
//! either end lands on a card that looks identical to a real one. After the
//! slide settles the virtual index is silently moved onto the real twin
//! (see [`crate::index::IndexModel::settle`]).
//!
//! Slot `i` shows item `(i - clone_count) mod item_count`. With at least
//! `clone_count` items this is exactly "last `clone_count` items, all items,
//! first `clone_count` items"; with fewer items the clones simply repeat.

use core::fmt;
use core::num::NonZeroUsize;

#[cfg(feature = "serde")]
use serde::Serialize;

use tracing::debug;

use crate::index::LoopWindow;

/// Upper bound on clones per side. At the design card width this covers
/// containers up to about 19 000 px; wider layouts wrap with fewer clones
/// than visible cards.
pub const MAX_CLONE_COUNT: usize = 64;

/// Clone count needed so every simultaneously visible card plus one buffer
/// card can be served from a clone: `ceil(viewport / card) + 1`, capped at
/// [`MAX_CLONE_COUNT`].
///
/// Non-finite or non-positive inputs fall back to a single buffer card.
#[must_use]
pub fn clone_count_for(viewport_width: f64, card_width: f64) -> usize {
    if !(viewport_width.is_finite() && card_width.is_finite()) || card_width <= 0.0 {
        return 1;
    }
    let visible = (viewport_width / card_width).max(0.0);
    // A few ulps of float noise must not add a whole clone.
    let visible = ((visible * 1e9).round() / 1e9).ceil();
    if visible.is_nan() || visible >= (MAX_CLONE_COUNT - 1) as f64 {
        debug!(
            target: "carousel_core::sequence",
            viewport_width,
            card_width,
            max = MAX_CLONE_COUNT,
            "clone count capped"
        );
        return MAX_CLONE_COUNT;
    }
    visible as usize + 1
}

/// Stable identity of a slot for DOM reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "band", content = "ordinal", rename_all = "snake_case"))]
pub enum SlotKey {
    /// Tail clone placed before the real band.
    CloneStart(usize),
    /// Real item.
    Original(usize),
    /// Head clone placed after the real band.
    CloneEnd(usize),
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CloneStart(i) => write!(f, "clone-start-{i}"),
            Self::Original(i) => write!(f, "original-{i}"),
            Self::CloneEnd(i) => write!(f, "clone-end-{i}"),
        }
    }
}

/// One slot of the extended sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub key: SlotKey,
    /// Index into the caller's item list.
    pub item: usize,
}

/// Read-only extended sequence derived from the item count and clone count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedSequence {
    window: LoopWindow,
    slots: Vec<Slot>,
}

impl ExtendedSequence {
    /// Build the sequence for `item_count` items and `clone_count` clones per
    /// side. O(item_count + clone_count).
    #[must_use]
    pub fn build(item_count: NonZeroUsize, clone_count: usize) -> Self {
        let window = LoopWindow::new(clone_count, item_count);
        let n = item_count.get();
        let slots = (0..window.extended_len())
            .map(|slot| {
                let key = if slot < clone_count {
                    SlotKey::CloneStart(slot)
                } else if slot < clone_count + n {
                    SlotKey::Original(slot - clone_count)
                } else {
                    SlotKey::CloneEnd(slot - clone_count - n)
                };
                Slot {
                    key,
                    item: window.real_index(slot),
                }
            })
            .collect();
        Self { window, slots }
    }

    /// Geometry of this sequence.
    #[inline]
    #[must_use]
    pub const fn window(&self) -> LoopWindow {
        self.window
    }

    /// All slots, left to right.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slot at a virtual index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Slot> {
        self.slots.get(index).copied()
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`: a sequence holds at least one real item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Item indices, left to right.
    pub fn items(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().map(|slot| slot.item)
    }
}
