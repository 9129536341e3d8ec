#![forbid(unsafe_code)]

//! Virtual index arithmetic over the extended (cloned) item sequence.
//!
//! The extended sequence has `clone_count` tail clones, then the
//! `item_count` real items, then `clone_count` head clones. A virtual index
//! addresses a slot in that sequence; the real item it shows is derived by
//! modular arithmetic.
//!
//! # Invariants
//!
//! 1. [`IndexModel::current`] is always in `[0, extended_len)`.
//! 2. [`LoopWindow::normalize`] is idempotent for every `i64` input.
//! 3. [`LoopWindow::real_index`] is always in `[0, item_count)`.
//! 4. `item_count` is a [`NonZeroUsize`], so no modulo by zero is reachable.

use core::num::NonZeroUsize;

/// Geometry of the extended sequence: clone band width and real item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopWindow {
    clone_count: usize,
    item_count: NonZeroUsize,
}

impl LoopWindow {
    /// Create a window with `clone_count` clones on each side.
    #[must_use]
    pub const fn new(clone_count: usize, item_count: NonZeroUsize) -> Self {
        Self {
            clone_count,
            item_count,
        }
    }

    /// Clones on each side of the real band.
    #[inline]
    #[must_use]
    pub const fn clone_count(&self) -> usize {
        self.clone_count
    }

    /// Number of real items.
    #[inline]
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count.get()
    }

    /// Total slots in the extended sequence.
    #[inline]
    #[must_use]
    pub const fn extended_len(&self) -> usize {
        self.clone_count * 2 + self.item_count.get()
    }

    /// Slot of the first real item; the initial virtual index.
    #[inline]
    #[must_use]
    pub const fn home(&self) -> usize {
        self.clone_count
    }

    /// Whether `index` addresses a slot at all.
    #[must_use]
    pub fn contains(&self, index: i64) -> bool {
        index >= 0 && (index as u64) < self.extended_len() as u64
    }

    /// Whether `index` lies in the real band (no remap due).
    #[must_use]
    pub const fn is_real(&self, index: usize) -> bool {
        index >= self.clone_count && index < self.clone_count + self.item_count.get()
    }

    /// Corrective mapping used after visibility changes and stalled
    /// transitions.
    ///
    /// - outside the sequence: reset to the first real slot;
    /// - deep in the tail-clone band (`< clone_count - 1`): fold into the
    ///   real band;
    /// - deep in the head-clone band (`> clone_count + item_count`): fold
    ///   into the real band;
    /// - otherwise unchanged. The two slots adjacent to the real band are
    ///   left alone; they are settled by [`LoopWindow::fold`] on the next
    ///   transition end.
    #[must_use]
    pub fn normalize(&self, index: i64) -> usize {
        if !self.contains(index) {
            return self.clone_count;
        }
        let cc = self.clone_count as i64;
        let n = self.item_count.get() as i64;
        if index < cc - 1 {
            return (cc + index.rem_euclid(n)) as usize;
        }
        if index > cc + n {
            return (cc + (index - cc).rem_euclid(n)) as usize;
        }
        index as usize
    }

    /// Real item shown at `index`, in `[0, item_count)`.
    #[must_use]
    pub fn real_index(&self, index: usize) -> usize {
        let n = self.item_count.get() as i64;
        (index as i64 - self.clone_count as i64).rem_euclid(n) as usize
    }

    /// Slot in the real band showing the same item as `index`.
    #[must_use]
    pub fn fold(&self, index: usize) -> usize {
        self.clone_count + self.real_index(index)
    }

    /// Slot in the real band for real item `real`.
    #[must_use]
    pub fn slot_of(&self, real: usize) -> usize {
        self.clone_count + real % self.item_count.get()
    }
}

/// Current virtual position inside a [`LoopWindow`].
///
/// Mutated only through [`IndexModel::slide_to`] (animated moves, decided by
/// the reducer) and the silent remaps [`IndexModel::settle`],
/// [`IndexModel::normalize`] and [`IndexModel::rebase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexModel {
    window: LoopWindow,
    current: usize,
}

impl IndexModel {
    /// Start at the first real item.
    #[must_use]
    pub const fn new(window: LoopWindow) -> Self {
        Self {
            window,
            current: window.home(),
        }
    }

    /// Window geometry.
    #[inline]
    #[must_use]
    pub const fn window(&self) -> LoopWindow {
        self.window
    }

    /// Current virtual index.
    #[inline]
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Real item currently shown.
    #[must_use]
    pub fn real_index(&self) -> usize {
        self.window.real_index(self.current)
    }

    /// Whether the current slot is a clone.
    #[must_use]
    pub const fn in_clone_band(&self) -> bool {
        !self.window.is_real(self.current)
    }

    /// Move to `target`. Returns `false` (and leaves the index untouched) if
    /// `target` lies outside the extended sequence.
    pub fn slide_to(&mut self, target: i64) -> bool {
        if !self.window.contains(target) {
            return false;
        }
        self.current = target as usize;
        true
    }

    /// Remap a clone-band position to its real twin. Returns the previous
    /// index when a remap happened.
    pub fn settle(&mut self) -> Option<usize> {
        if !self.in_clone_band() {
            return None;
        }
        let previous = self.current;
        self.current = self.window.fold(previous);
        Some(previous)
    }

    /// Apply `normalize` to the current index.
    pub fn normalize(&mut self) {
        self.current = self.window.normalize(self.current as i64);
    }

    /// Swap in a new window (clone count or item count changed), keeping
    /// the same real item on screen.
    pub fn rebase(&mut self, window: LoopWindow) {
        let real = self.real_index();
        self.window = window;
        self.current = window.slot_of(real);
    }
}
