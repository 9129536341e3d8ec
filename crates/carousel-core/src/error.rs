#![forbid(unsafe_code)]

//! Error type for carousel construction and configuration loading.
//!
//! Runtime inconsistencies (out-of-range indices, stalled transitions) are
//! never surfaced as errors; they are repaired inside the reducer. Only
//! precondition violations reach the caller.

use thiserror::Error;

/// Errors returned when a carousel cannot be constructed.
#[derive(Debug, Error)]
pub enum CarouselError {
    /// The item list was empty; the loop needs at least one item.
    #[error("carousel requires at least one item")]
    EmptyItems,
    /// One or more configuration fields are out of range.
    #[error("invalid carousel config: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),
    /// JSON input did not match the expected schema.
    #[cfg(feature = "serde")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
