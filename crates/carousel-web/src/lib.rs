#![forbid(unsafe_code)]

//! Web host for the infinite carousel.
//!
//! - [`input`]: JSON-friendly host event schema.
//! - [`runner_core`]: clock, reducer, and effect queue; no JS types.
//! - `wasm` (wasm32 only): `CarouselRunner` bindings and console logging.
//! - `dom` (wasm32 only): `mountCarousel`, which builds the widget markup,
//!   wires browser events, schedules wake-ups, and paints frames.

pub mod error;
pub mod input;
pub mod runner_core;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use error::HostError;
pub use input::{HostEvent, NavDirection, PointerPhase};
pub use runner_core::RunnerCore;

#[cfg(target_arch = "wasm32")]
pub use dom::{CarouselHandle, mount_carousel};
#[cfg(target_arch = "wasm32")]
pub use wasm::CarouselRunner;
