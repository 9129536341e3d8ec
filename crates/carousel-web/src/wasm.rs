#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the carousel runner.
//!
//! This module wraps [`super::runner_core::RunnerCore`] with JS-friendly
//! types for hosts that own their own DOM and event loop. Pages that want
//! the stock widget use `mountCarousel` instead. Only compiled on `wasm32`
//! targets.

use std::io;
use std::str::FromStr;

use carousel_core::Effect;
use js_sys::{Array, Object, Reflect};
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::runner_core::RunnerCore;

pub(crate) fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

pub(crate) fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

pub(crate) fn effect_to_js(effect: &Effect) -> JsValue {
    let obj = Object::new();
    match effect {
        Effect::OpenUrl(url) => {
            set_js(&obj, "kind", JsValue::from_str("open_url"));
            set_js(&obj, "url", JsValue::from_str(url));
        }
        Effect::CapturePointer => set_js(&obj, "kind", JsValue::from_str("capture_pointer")),
        Effect::ReleasePointer => set_js(&obj, "kind", JsValue::from_str("release_pointer")),
    }
    obj.into()
}

// ---------------------------------------------------------------------------
// Console logging
// ---------------------------------------------------------------------------

/// Buffers one formatted event and flushes it to the matching console
/// method on drop.
pub(crate) struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let line = JsValue::from_str(text.trim_end());
        match self.level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

pub(crate) struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

/// Route `tracing` output to the browser console at `level`
/// (`error`, `warn`, `info`, `debug`, `trace`; unknown values select
/// `info`). Only the first call installs a subscriber.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) -> bool {
    let level = Level::from_str(level).unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_max_level(level)
        .try_init()
        .is_ok()
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Headless carousel runner.
///
/// Host-driven: JavaScript forwards encoded events, schedules a timeout for
/// `wakeDelay()`, sends a `tick` when it fires, and paints `frameJson()`.
#[wasm_bindgen]
pub struct CarouselRunner {
    inner: RunnerCore,
}

#[wasm_bindgen]
impl CarouselRunner {
    /// Create a runner from a JSON item array and optional JSON config at
    /// host time `t_ms`.
    #[wasm_bindgen(constructor)]
    pub fn new(items_json: &str, config_json: &str, t_ms: f64) -> Result<CarouselRunner, JsValue> {
        install_panic_hook();
        Ok(Self {
            inner: RunnerCore::new(items_json, config_json, t_ms)?,
        })
    }

    /// Parse a JSON-encoded host event and apply it.
    /// Returns `true` if accepted, `false` if malformed or ignored.
    #[wasm_bindgen(js_name = pushEncodedInput)]
    pub fn push_encoded_input(&mut self, json: &str) -> bool {
        self.inner.push_encoded_input(json)
    }

    /// Advance the clock without delivering an event.
    #[wasm_bindgen(js_name = setTime)]
    pub fn set_time(&mut self, t_ms: f64) {
        self.inner.set_time_ms(t_ms);
    }

    /// Replace items from a JSON array.
    #[wasm_bindgen(js_name = setItems)]
    pub fn set_items(&mut self, items_json: &str) -> Result<(), JsValue> {
        Ok(self.inner.set_items_json(items_json)?)
    }

    /// Milliseconds until the next scheduled change, or `undefined`.
    #[wasm_bindgen(js_name = wakeDelay)]
    pub fn wake_delay(&self) -> Option<f64> {
        self.inner.wake_delay_ms()
    }

    /// Current render frame as JSON.
    #[wasm_bindgen(js_name = frameJson)]
    pub fn frame_json(&self) -> Result<String, JsValue> {
        Ok(self.inner.frame_json()?)
    }

    /// Drain pending effects as `{ kind, url? }` objects.
    #[wasm_bindgen(js_name = takeEffects)]
    pub fn take_effects(&mut self) -> Array {
        self.inner
            .take_effects()
            .iter()
            .map(effect_to_js)
            .collect()
    }

    /// Real item currently shown.
    #[wasm_bindgen(js_name = realIndex)]
    pub fn real_index(&self) -> usize {
        self.inner.carousel().real_index()
    }

    /// `true` while a drag owns the pointer.
    #[wasm_bindgen(js_name = isCapturing)]
    pub fn is_capturing(&self) -> bool {
        self.inner.is_capturing()
    }
}
