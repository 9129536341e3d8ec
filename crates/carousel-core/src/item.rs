#![forbid(unsafe_code)]

//! Caller-owned carousel items.

use core::num::NonZeroUsize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::CarouselError;

/// One card's worth of caller data. The carousel never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CarouselItem {
    /// Stable identifier, used to key indicator dots.
    pub id: u64,
    /// Display title rendered in the card overlay.
    pub title: String,
    /// Image URL.
    pub image: String,
    /// Destination opened when the card is activated.
    pub landing_page: String,
}

impl CarouselItem {
    /// Convenience constructor.
    #[must_use]
    pub fn new(
        id: u64,
        title: impl Into<String>,
        image: impl Into<String>,
        landing_page: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            image: image.into(),
            landing_page: landing_page.into(),
        }
    }
}

/// A non-empty, ordered item list.
///
/// The infinite loop is undefined for zero items, so emptiness is rejected
/// here once and the rest of the crate can rely on [`Items::count`] being
/// non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Items {
    items: Vec<CarouselItem>,
}

impl Items {
    /// Wrap a list, rejecting an empty one.
    pub fn new(items: Vec<CarouselItem>) -> Result<Self, CarouselError> {
        if items.is_empty() {
            return Err(CarouselError::EmptyItems);
        }
        Ok(Self { items })
    }

    /// Parse a JSON array of items.
    #[cfg(feature = "serde")]
    pub fn from_json_str(s: &str) -> Result<Self, CarouselError> {
        let items: Vec<CarouselItem> = serde_json::from_str(s)?;
        Self::new(items)
    }

    /// Number of real items (never zero).
    #[must_use]
    pub fn count(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.items.len()).unwrap_or(NonZeroUsize::MIN)
    }

    /// Item at a real index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CarouselItem> {
        self.items.get(index)
    }

    /// Iterate in caller order.
    pub fn iter(&self) -> impl Iterator<Item = &CarouselItem> {
        self.items.iter()
    }
}
