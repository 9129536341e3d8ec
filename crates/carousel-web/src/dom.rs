#![forbid(unsafe_code)]

//! Stock DOM widget: builds the carousel markup under a root element,
//! translates browser events into [`HostEvent`]s, schedules one timeout per
//! pending deadline, and paints each [`RenderFrame`](carousel_core::RenderFrame).
//!
//! # Markup
//! ```text
//! .carousel-wrapper
//!   .carousel-container[.is-dragging]      height = card size
//!     .carousel-track                       transform + transition
//!       .carousel-card[data-slot]           role=button, tabindex=0
//!         img.carousel-card-image
//!         .carousel-card-overlay > h3.carousel-card-title
//!   .carousel-indicators > button.carousel-indicator[.active][data-item]
//!   button.carousel-nav.carousel-nav-prev
//!   button.carousel-nav.carousel-nav-next
//! ```
//!
//! # Invariants
//! - Window-level move/up listeners exist only between `CapturePointer`
//!   and `ReleasePointer` effects.
//! - At most one wake-up timeout is pending.
//! - A listener or timer closure is never dropped while it runs: removed
//!   closures are parked and released at the start of the next callback.
//!
//! # Failure Modes
//! - Paint errors are logged and the next event repaints from scratch state.
//! - Dropping the [`CarouselHandle`] removes the markup and every listener.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use carousel_core::{Effect, RenderFrame};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent,
    MouseEvent, Performance, TouchEvent, Window,
};

use crate::error::HostError;
use crate::input::{HostEvent, NavDirection, PointerPhase};
use crate::runner_core::RunnerCore;
use crate::wasm::install_panic_hook;

const CHEVRON_LEFT: &str = r#"<svg viewBox="0 0 24 24" width="24" height="24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><polyline points="15 18 9 12 15 6"></polyline></svg>"#;
const CHEVRON_RIGHT: &str = r#"<svg viewBox="0 0 24 24" width="24" height="24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><polyline points="9 18 15 12 9 6"></polyline></svg>"#;

type EventClosure = Closure<dyn FnMut(Event)>;
type TimerClosure = Closure<dyn FnMut()>;

// ---------------------------------------------------------------------------
// Listener and timer guards
// ---------------------------------------------------------------------------

/// Registered event listener; removed from its target on drop.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Option<EventClosure>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        closure: EventClosure,
        options: Option<&AddEventListenerOptions>,
    ) -> Result<Self, JsValue> {
        let callback = closure.as_ref().unchecked_ref();
        match options {
            Some(options) => target
                .add_event_listener_with_callback_and_add_event_listener_options(
                    kind, callback, options,
                )?,
            None => target.add_event_listener_with_callback(kind, callback)?,
        }
        Ok(Self {
            target: target.clone(),
            kind,
            closure: Some(closure),
        })
    }

    fn detach(&self) {
        if let Some(closure) = &self.closure {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.kind, closure.as_ref().unchecked_ref());
        }
    }

    /// Detach now and hand back the closure for deferred release.
    fn retire(mut self) -> Option<EventClosure> {
        self.detach();
        self.closure.take()
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Pending wake-up timeout; cleared on drop.
struct Wake {
    window: Window,
    handle: i32,
    closure: Option<TimerClosure>,
}

impl Wake {
    fn retire(mut self) -> Option<TimerClosure> {
        self.window.clear_timeout_with_handle(self.handle);
        self.closure.take()
    }
}

impl Drop for Wake {
    fn drop(&mut self) {
        self.window.clear_timeout_with_handle(self.handle);
    }
}

// ---------------------------------------------------------------------------
// Markup
// ---------------------------------------------------------------------------

struct Elements {
    wrapper: HtmlElement,
    container: HtmlElement,
    track: HtmlElement,
    indicators: HtmlElement,
}

fn create(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let el = document.create_element(tag)?.dyn_into::<HtmlElement>()?;
    el.set_class_name(class);
    Ok(el)
}

fn nav_button(document: &Document, class: &str, label: &str, icon: &str) -> Result<HtmlElement, JsValue> {
    let button = create(document, "button", class)?;
    button.set_attribute("type", "button")?;
    button.set_attribute("aria-label", label)?;
    button.set_inner_html(icon);
    Ok(button)
}

impl Elements {
    fn build(document: &Document, root: &Element) -> Result<Self, JsValue> {
        let wrapper = create(document, "div", "carousel-wrapper")?;
        let container = create(document, "div", "carousel-container")?;
        let track = create(document, "div", "carousel-track")?;
        let indicators = create(document, "div", "carousel-indicators")?;
        container.append_child(&track)?;
        wrapper.append_child(&container)?;
        wrapper.append_child(&indicators)?;
        wrapper.append_child(&nav_button(
            document,
            "carousel-nav carousel-nav-prev",
            "Previous slide",
            CHEVRON_LEFT,
        )?)?;
        wrapper.append_child(&nav_button(
            document,
            "carousel-nav carousel-nav-next",
            "Next slide",
            CHEVRON_RIGHT,
        )?)?;
        root.append_child(&wrapper)?;
        Ok(Self {
            wrapper,
            container,
            track,
            indicators,
        })
    }
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn closest(el: &Element, selector: &str) -> Option<Element> {
    el.closest(selector).ok().flatten()
}

fn data_index(el: &Element, attr: &str) -> Option<usize> {
    el.get_attribute(attr)?.parse().ok()
}

// ---------------------------------------------------------------------------
// Mount
// ---------------------------------------------------------------------------

struct Mount {
    runner: RefCell<RunnerCore>,
    window: Window,
    document: Document,
    performance: Option<Performance>,
    els: Elements,
    cards: RefCell<Vec<HtmlElement>>,
    dots: RefCell<Vec<HtmlElement>>,
    painted_generation: Cell<Option<u64>>,
    painted_size: Cell<f64>,
    listeners: RefCell<Vec<Listener>>,
    capture: RefCell<Vec<Listener>>,
    wake: RefCell<Option<Wake>>,
    retired_listeners: RefCell<Vec<EventClosure>>,
    retired_timers: RefCell<Vec<TimerClosure>>,
}

impl Mount {
    fn now_ms(&self) -> f64 {
        self.performance.as_ref().map_or(0.0, Performance::now)
    }

    /// Release closures parked by earlier callbacks.
    fn reap(&self) {
        self.retired_listeners.borrow_mut().clear();
        self.retired_timers.borrow_mut().clear();
    }

    fn listen<E: JsCast + 'static>(
        self: &Rc<Self>,
        target: &EventTarget,
        kind: &'static str,
        options: Option<&AddEventListenerOptions>,
        handler: fn(&Rc<Mount>, E),
    ) -> Result<Listener, JsValue> {
        let weak: Weak<Mount> = Rc::downgrade(self);
        let closure = Closure::wrap(Box::new(move |event: Event| {
            let Some(mount) = weak.upgrade() else {
                return;
            };
            let Ok(event) = event.dyn_into::<E>() else {
                return;
            };
            mount.reap();
            handler(&mount, event);
        }) as Box<dyn FnMut(Event)>);
        Listener::attach(target, kind, closure, options)
    }

    fn attach_listeners(self: &Rc<Self>) -> Result<(), JsValue> {
        let wrapper: &EventTarget = self.els.wrapper.as_ref();
        let container: &EventTarget = self.els.container.as_ref();
        let track: &EventTarget = self.els.track.as_ref();
        let document: &EventTarget = self.document.as_ref();
        let window: &EventTarget = self.window.as_ref();
        let listeners = vec![
            self.listen(wrapper, "click", None, on_click)?,
            self.listen(track, "keydown", None, on_key_down)?,
            self.listen(track, "mousedown", None, on_mouse_down)?,
            self.listen(track, "touchstart", None, on_touch_start)?,
            self.listen(track, "transitionend", None, on_transition_end)?,
            self.listen(container, "mouseenter", None, on_mouse_enter)?,
            self.listen(container, "mouseleave", None, on_mouse_leave)?,
            self.listen(document, "visibilitychange", None, on_visibility_change)?,
            self.listen(window, "resize", None, on_resize)?,
        ];
        *self.listeners.borrow_mut() = listeners;
        Ok(())
    }

    fn capture_pointer(self: &Rc<Self>) -> Result<(), JsValue> {
        if !self.capture.borrow().is_empty() {
            return Ok(());
        }
        let window: &EventTarget = self.window.as_ref();
        let active = AddEventListenerOptions::new();
        active.set_passive(false);
        let listeners = vec![
            self.listen(window, "mousemove", None, on_capture_mouse_move)?,
            self.listen(window, "mouseup", None, on_capture_mouse_up)?,
            self.listen(window, "touchmove", Some(&active), on_capture_touch_move)?,
            self.listen(window, "touchend", None, on_capture_touch_end)?,
            self.listen(window, "touchcancel", None, on_capture_touch_cancel)?,
        ];
        *self.capture.borrow_mut() = listeners;
        Ok(())
    }

    fn release_pointer(&self) {
        let drained: Vec<Listener> = self.capture.borrow_mut().drain(..).collect();
        self.retired_listeners
            .borrow_mut()
            .extend(drained.into_iter().filter_map(Listener::retire));
    }

    fn open_url(&self, url: &str) {
        if let Err(err) =
            self.window
                .open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer")
        {
            warn!(target: "carousel_web::dom", url, error = ?err, "window.open failed");
        }
    }

    fn send(self: &Rc<Self>, event: HostEvent) {
        let accepted = self.runner.borrow_mut().handle(&event);
        if accepted {
            self.flush();
        }
    }

    /// Apply pending effects, repaint, and reschedule the wake-up.
    fn flush(self: &Rc<Self>) {
        let effects = self.runner.borrow_mut().take_effects();
        for effect in effects {
            match effect {
                Effect::OpenUrl(url) => self.open_url(&url),
                Effect::CapturePointer => {
                    if let Err(err) = self.capture_pointer() {
                        warn!(target: "carousel_web::dom", error = ?err, "pointer capture failed");
                    }
                }
                Effect::ReleasePointer => self.release_pointer(),
            }
        }
        if let Err(err) = self.paint() {
            warn!(target: "carousel_web::dom", error = ?err, "paint failed");
        }
        self.schedule_wake();
    }

    fn schedule_wake(self: &Rc<Self>) {
        if let Some(old) = self.wake.borrow_mut().take()
            && let Some(closure) = old.retire()
        {
            self.retired_timers.borrow_mut().push(closure);
        }
        let Some(delay) = self.runner.borrow().wake_delay_ms() else {
            return;
        };
        let weak: Weak<Mount> = Rc::downgrade(self);
        let closure = Closure::wrap(Box::new(move || {
            let Some(mount) = weak.upgrade() else {
                return;
            };
            mount.reap();
            let t_ms = mount.now_ms();
            mount.send(HostEvent::Tick { t_ms });
        }) as Box<dyn FnMut()>);
        let timeout = delay.ceil().clamp(0.0, f64::from(i32::MAX)) as i32;
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                timeout,
            ) {
            Ok(handle) => {
                *self.wake.borrow_mut() = Some(Wake {
                    window: self.window.clone(),
                    handle,
                    closure: Some(closure),
                });
            }
            Err(err) => warn!(target: "carousel_web::dom", error = ?err, "setTimeout failed"),
        }
    }

    // -----------------------------------------------------------------------
    // Paint
    // -----------------------------------------------------------------------

    fn paint(&self) -> Result<(), JsValue> {
        let runner = self.runner.borrow();
        let frame = runner.carousel().frame();
        if self.painted_generation.get() != Some(frame.generation) {
            let image_transition = format!(
                "transform {}s ease",
                runner.carousel().config().animation().as_secs_f64()
            );
            self.build_cards(&frame, &image_transition)?;
            self.build_indicators(&frame)?;
            self.painted_generation.set(Some(frame.generation));
            self.painted_size.set(f64::NAN);
        }

        let track = self.els.track.style();
        track.set_property("transform", &frame.transform_css())?;
        track.set_property("transition", &frame.transition_css())?;

        if self.painted_size.get() != frame.card_size {
            let size = format!("{}px", frame.card_size);
            self.els.container.style().set_property("height", &size)?;
            for card in self.cards.borrow().iter() {
                let style = card.style();
                style.set_property("width", &size)?;
                style.set_property("height", &size)?;
            }
            self.painted_size.set(frame.card_size);
        }

        self.els
            .container
            .class_list()
            .toggle_with_force("is-dragging", frame.dragging)?;
        for (dot, view) in self.dots.borrow().iter().zip(&frame.indicators) {
            dot.class_list().toggle_with_force("active", view.active)?;
        }
        Ok(())
    }

    fn build_cards(&self, frame: &RenderFrame<'_>, image_transition: &str) -> Result<(), JsValue> {
        self.els.track.set_inner_html("");
        let mut cards = Vec::with_capacity(frame.cards.len());
        for view in &frame.cards {
            let card = create(&self.document, "div", "carousel-card")?;
            card.set_attribute("role", "button")?;
            card.set_attribute("tabindex", "0")?;
            card.set_attribute("data-slot", &view.slot.to_string())?;

            let image = create(&self.document, "img", "carousel-card-image")?;
            image.set_attribute("src", view.image)?;
            image.set_attribute("alt", view.title)?;
            image.set_attribute("draggable", "false")?;
            image.style().set_property("transition", image_transition)?;

            let overlay = create(&self.document, "div", "carousel-card-overlay")?;
            let title = create(&self.document, "h3", "carousel-card-title")?;
            title.set_text_content(Some(view.title));
            overlay.append_child(&title)?;

            card.append_child(&image)?;
            card.append_child(&overlay)?;
            self.els.track.append_child(&card)?;
            cards.push(card);
        }
        *self.cards.borrow_mut() = cards;
        Ok(())
    }

    fn build_indicators(&self, frame: &RenderFrame<'_>) -> Result<(), JsValue> {
        self.els.indicators.set_inner_html("");
        let mut dots = Vec::with_capacity(frame.indicators.len());
        for view in &frame.indicators {
            let dot = create(&self.document, "button", "carousel-indicator")?;
            dot.set_attribute("type", "button")?;
            dot.set_attribute("data-item", &view.item.to_string())?;
            dot.set_attribute("aria-label", &format!("Go to slide {}", view.item + 1))?;
            self.els.indicators.append_child(&dot)?;
            dots.push(dot);
        }
        *self.dots.borrow_mut() = dots;
        Ok(())
    }

    fn teardown(&self) {
        self.listeners.borrow_mut().clear();
        self.capture.borrow_mut().clear();
        self.wake.borrow_mut().take();
        self.reap();
        self.els.wrapper.remove();
        debug!(target: "carousel_web::dom", "carousel unmounted");
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn on_click(m: &Rc<Mount>, ev: MouseEvent) {
    let Some(target) = event_element(&ev) else {
        return;
    };
    let t_ms = m.now_ms();
    let event = if let Some(card) = closest(&target, ".carousel-card") {
        data_index(&card, "data-slot").map(|slot| HostEvent::Click { t_ms, slot })
    } else if let Some(dot) = closest(&target, ".carousel-indicator") {
        data_index(&dot, "data-item").map(|item| HostEvent::Indicator { t_ms, item })
    } else if closest(&target, ".carousel-nav-prev").is_some() {
        Some(HostEvent::Nav {
            t_ms,
            direction: NavDirection::Prev,
        })
    } else if closest(&target, ".carousel-nav-next").is_some() {
        Some(HostEvent::Nav {
            t_ms,
            direction: NavDirection::Next,
        })
    } else {
        None
    };
    if let Some(event) = event {
        m.send(event);
    }
}

fn on_key_down(m: &Rc<Mount>, ev: KeyboardEvent) {
    let Some(target) = event_element(&ev) else {
        return;
    };
    let Some(slot) = closest(&target, ".carousel-card").and_then(|c| data_index(&c, "data-slot"))
    else {
        return;
    };
    m.send(HostEvent::Key {
        t_ms: m.now_ms(),
        slot,
        key: ev.key(),
    });
}

fn on_mouse_down(m: &Rc<Mount>, ev: MouseEvent) {
    if ev.button() == 0 {
        ev.prevent_default();
    }
    m.send(HostEvent::Mouse {
        phase: PointerPhase::Down,
        t_ms: m.now_ms(),
        x: f64::from(ev.client_x()),
        button: ev.button(),
    });
}

fn on_touch_start(m: &Rc<Mount>, ev: TouchEvent) {
    let Some(touch) = ev.touches().get(0) else {
        return;
    };
    m.send(HostEvent::Touch {
        phase: PointerPhase::Down,
        t_ms: m.now_ms(),
        x: f64::from(touch.client_x()),
    });
}

fn on_transition_end(m: &Rc<Mount>, ev: Event) {
    // Card image transitions bubble up from below the track.
    let track: &JsValue = m.els.track.as_ref();
    let on_track = ev.target().is_some_and(|t| {
        let t: &JsValue = t.as_ref();
        t == track
    });
    if on_track {
        m.send(HostEvent::TransitionEnd { t_ms: m.now_ms() });
    }
}

fn on_mouse_enter(m: &Rc<Mount>, _ev: MouseEvent) {
    m.send(HostEvent::Hover {
        t_ms: m.now_ms(),
        hovering: true,
    });
}

fn on_mouse_leave(m: &Rc<Mount>, _ev: MouseEvent) {
    m.send(HostEvent::Hover {
        t_ms: m.now_ms(),
        hovering: false,
    });
}

fn on_visibility_change(m: &Rc<Mount>, _ev: Event) {
    m.send(HostEvent::Visibility {
        t_ms: m.now_ms(),
        visible: !m.document.hidden(),
    });
}

fn on_resize(m: &Rc<Mount>, _ev: Event) {
    m.send(HostEvent::Resize {
        t_ms: m.now_ms(),
        width: f64::from(m.els.container.client_width()),
    });
}

fn on_capture_mouse_move(m: &Rc<Mount>, ev: MouseEvent) {
    m.send(HostEvent::Mouse {
        phase: PointerPhase::Move,
        t_ms: m.now_ms(),
        x: f64::from(ev.client_x()),
        button: ev.button(),
    });
}

fn on_capture_mouse_up(m: &Rc<Mount>, ev: MouseEvent) {
    m.send(HostEvent::Mouse {
        phase: PointerPhase::Up,
        t_ms: m.now_ms(),
        x: f64::from(ev.client_x()),
        button: ev.button(),
    });
}

fn on_capture_touch_move(m: &Rc<Mount>, ev: TouchEvent) {
    let Some(touch) = ev.touches().get(0) else {
        return;
    };
    m.send(HostEvent::Touch {
        phase: PointerPhase::Move,
        t_ms: m.now_ms(),
        x: f64::from(touch.client_x()),
    });
    // Horizontal drags own the gesture; keep the page from scrolling.
    if m.runner.borrow().carousel().drag_moved() {
        ev.prevent_default();
    }
}

fn on_capture_touch_end(m: &Rc<Mount>, ev: TouchEvent) {
    let t_ms = m.now_ms();
    let event = match ev.changed_touches().get(0) {
        Some(touch) => HostEvent::Touch {
            phase: PointerPhase::Up,
            t_ms,
            x: f64::from(touch.client_x()),
        },
        None => HostEvent::Touch {
            phase: PointerPhase::Cancel,
            t_ms,
            x: 0.0,
        },
    };
    m.send(event);
}

fn on_capture_touch_cancel(m: &Rc<Mount>, _ev: TouchEvent) {
    m.send(HostEvent::Touch {
        phase: PointerPhase::Cancel,
        t_ms: m.now_ms(),
        x: 0.0,
    });
}

// ---------------------------------------------------------------------------
// Public surface
// ---------------------------------------------------------------------------

/// Owner of a mounted carousel. Dropping it (or calling `destroy`)
/// unmounts the widget.
#[wasm_bindgen]
pub struct CarouselHandle {
    mount: Option<Rc<Mount>>,
}

#[wasm_bindgen]
impl CarouselHandle {
    /// Remove the markup and every listener. Idempotent.
    pub fn destroy(&mut self) {
        if let Some(mount) = self.mount.take() {
            mount.teardown();
        }
    }

    /// Replace the items from a JSON array.
    #[wasm_bindgen(js_name = setItems)]
    pub fn set_items(&mut self, items_json: &str) -> Result<(), JsValue> {
        let Some(mount) = &self.mount else {
            return Ok(());
        };
        let t_ms = mount.now_ms();
        {
            let mut runner = mount.runner.borrow_mut();
            runner.set_time_ms(t_ms);
            runner.set_items_json(items_json)?;
        }
        mount.flush();
        Ok(())
    }

    pub fn next(&mut self) {
        self.nav(NavDirection::Next);
    }

    pub fn prev(&mut self) {
        self.nav(NavDirection::Prev);
    }

    /// Real item currently shown, or `undefined` after `destroy`.
    #[wasm_bindgen(js_name = realIndex)]
    pub fn real_index(&self) -> Option<usize> {
        let mount = self.mount.as_ref()?;
        Some(mount.runner.borrow().carousel().real_index())
    }
}

impl CarouselHandle {
    fn nav(&mut self, direction: NavDirection) {
        if let Some(mount) = &self.mount {
            let t_ms = mount.now_ms();
            mount.send(HostEvent::Nav { t_ms, direction });
        }
    }
}

impl Drop for CarouselHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Build the carousel inside the element with id `root_id`.
///
/// `items_json` is an array of `{id, title, image, landing_page}`;
/// `config_json` may be empty for defaults.
#[wasm_bindgen(js_name = mountCarousel)]
pub fn mount_carousel(
    root_id: &str,
    items_json: &str,
    config_json: &str,
) -> Result<CarouselHandle, JsValue> {
    install_panic_hook();
    let window = web_sys::window().ok_or_else(|| HostError::Dom("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| HostError::Dom("no document".into()))?;
    let root = document
        .get_element_by_id(root_id)
        .ok_or_else(|| HostError::MissingElement(root_id.to_owned()))?;
    let performance = window.performance();
    let t_ms = performance.as_ref().map_or(0.0, Performance::now);
    let runner = RunnerCore::new(items_json, config_json, t_ms)?;
    let els = Elements::build(&document, &root)?;

    let mount = Rc::new(Mount {
        runner: RefCell::new(runner),
        window,
        document,
        performance,
        els,
        cards: RefCell::new(Vec::new()),
        dots: RefCell::new(Vec::new()),
        painted_generation: Cell::new(None),
        painted_size: Cell::new(f64::NAN),
        listeners: RefCell::new(Vec::new()),
        capture: RefCell::new(Vec::new()),
        wake: RefCell::new(None),
        retired_listeners: RefCell::new(Vec::new()),
        retired_timers: RefCell::new(Vec::new()),
    });
    if let Err(err) = mount.attach_listeners() {
        mount.teardown();
        return Err(err);
    }
    debug!(target: "carousel_web::dom", root = root_id, "carousel mounted");

    mount.flush();
    mount.send(HostEvent::Resize {
        t_ms,
        width: f64::from(mount.els.container.client_width()),
    });
    if mount.document.hidden() {
        mount.send(HostEvent::Visibility {
            t_ms,
            visible: false,
        });
    }
    Ok(CarouselHandle { mount: Some(mount) })
}
