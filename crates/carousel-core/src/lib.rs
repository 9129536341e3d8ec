#![forbid(unsafe_code)]

//! Core: headless state machine for an infinite, draggable image carousel.
//!
//! # Role in the workspace
//! `carousel-core` owns every decision the widget makes: virtual-index
//! arithmetic over a cloned item buffer, clone-band repair after slides,
//! drag-gesture classification, and autoplay/visibility coordination. It
//! has no DOM, no threads and no wall clock. The host feeds it [`Msg`]s
//! stamped with a monotonic [`core::time::Duration`], performs the returned
//! [`Effect`]s, and paints [`RenderFrame`]s.
//!
//! # Primary responsibilities
//! - **Index model** ([`index`]): `normalize`, `real_index`, and slide bounds.
//! - **Loop stitcher** ([`sequence`]): the extended sequence with clones at
//!   both ends.
//! - **Gesture tracker** ([`gesture`]): drag offset and release decision.
//! - **Autoplay** ([`autoplay`], [`timer`]): deadline-driven advances with
//!   suspend flags.
//! - **Render surface** ([`render`]): pure projection of state for painting.
//! - **Reducer** ([`carousel`]): the single `update(msg, now)` entry point.
//!
//! # How it fits in the system
//! `carousel-web` maps browser events into [`Msg`]s, schedules one wake-up
//! per [`Carousel::next_deadline`], and paints frames into the DOM.

pub mod autoplay;
pub mod carousel;
pub mod config;
pub mod error;
pub mod gesture;
pub mod index;
pub mod item;
pub mod render;
pub mod sequence;
pub mod timer;

pub use autoplay::{Autoplay, Suspend};
pub use carousel::{Carousel, Effect, Msg, Phase};
pub use config::CarouselConfig;
pub use error::CarouselError;
pub use gesture::{DragConfig, DragRelease, DragTracker, MouseButton, PointerSource, SlideDirection};
pub use index::{IndexModel, LoopWindow};
pub use item::{CarouselItem, Items};
pub use render::{CardView, IndicatorView, Layout, RenderFrame, TransitionStyle};
pub use sequence::{ExtendedSequence, MAX_CLONE_COUNT, Slot, SlotKey, clone_count_for};
pub use timer::Deadline;
