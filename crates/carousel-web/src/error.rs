#![forbid(unsafe_code)]

//! Host-side errors.

use carousel_core::CarouselError;
use thiserror::Error;

/// Failures surfaced to the embedding page.
#[derive(Debug, Error)]
pub enum HostError {
    /// Items or config were rejected by the core.
    #[error(transparent)]
    Carousel(#[from] CarouselError),
    /// A host event or frame could not be (de)serialized.
    #[error("host JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The mount root does not exist in the document.
    #[error("element #{0} not found")]
    MissingElement(String),
    /// A DOM call failed.
    #[error("DOM error: {0}")]
    Dom(String),
}

#[cfg(target_arch = "wasm32")]
impl From<HostError> for wasm_bindgen::JsValue {
    fn from(err: HostError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
