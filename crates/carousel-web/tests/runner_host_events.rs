//! Native harness for the runner core: encoded host events in, effects and
//! frames out. Mirrors what the DOM mount does without a browser.

use carousel_core::{Effect, MAX_CLONE_COUNT, Phase};
use carousel_web::{HostError, RunnerCore};
use pretty_assertions::assert_eq;

const ITEMS: &str = r#"[
    {"id": 1, "title": "Alpha", "image": "a.png", "landing_page": "https://a.example"},
    {"id": 2, "title": "Beta", "image": "b.png", "landing_page": "https://b.example"},
    {"id": 3, "title": "Gamma", "image": "c.png", "landing_page": "https://c.example"}
]"#;

fn runner() -> RunnerCore {
    RunnerCore::new(ITEMS, "", 0.0).expect("valid items and default config")
}

fn push(runner: &mut RunnerCore, json: &str) {
    assert!(runner.push_encoded_input(json), "rejected: {json}");
}

fn assert_delay(runner: &RunnerCore, expected_ms: f64) {
    let delay = runner.wake_delay_ms().expect("a deadline is pending");
    assert!(
        (delay - expected_ms).abs() < 1e-6,
        "wake delay {delay} != {expected_ms}"
    );
}

#[test]
fn autoplay_is_the_first_wake_up() {
    let runner = runner();
    assert_delay(&runner, 3000.0);
    assert_eq!(runner.carousel().real_index(), 0);
}

#[test]
fn nav_schedules_safety_then_autoplay() {
    let mut runner = runner();
    push(&mut runner, r#"{"kind":"nav","t_ms":10,"direction":"next"}"#);
    assert_eq!(runner.carousel().real_index(), 1);
    assert_delay(&runner, 500.0);

    push(&mut runner, r#"{"kind":"transition_end","t_ms":400}"#);
    assert_eq!(runner.carousel().phase(), Phase::Idle);
    assert_delay(&runner, 2610.0);
}

#[test]
fn tick_fires_autoplay() {
    let mut runner = runner();
    push(&mut runner, r#"{"kind":"tick","t_ms":3000}"#);
    assert_eq!(runner.carousel().real_index(), 1);
    assert!(runner.carousel().phase().is_transitioning());
}

#[test]
fn drag_captures_then_releases_and_suppresses_click() {
    let mut runner = runner();
    push(
        &mut runner,
        r#"{"kind":"mouse","phase":"down","t_ms":1000,"x":300,"button":0}"#,
    );
    assert!(runner.is_capturing());
    assert_eq!(runner.take_effects(), vec![Effect::CapturePointer]);

    push(&mut runner, r#"{"kind":"mouse","phase":"move","t_ms":1050,"x":270}"#);
    push(&mut runner, r#"{"kind":"mouse","phase":"up","t_ms":1100,"x":240}"#);
    assert!(!runner.is_capturing());
    assert_eq!(runner.take_effects(), vec![Effect::ReleasePointer]);
    assert_eq!(runner.carousel().real_index(), 1);

    let slot = runner.carousel().current();
    push(
        &mut runner,
        &format!(r#"{{"kind":"click","t_ms":1150,"slot":{slot}}}"#),
    );
    assert!(runner.take_effects().is_empty());

    push(
        &mut runner,
        &format!(r#"{{"kind":"click","t_ms":1300,"slot":{slot}}}"#),
    );
    assert_eq!(
        runner.take_effects(),
        vec![Effect::OpenUrl("https://b.example".into())]
    );
}

#[test]
fn secondary_button_does_not_drag() {
    let mut runner = runner();
    push(
        &mut runner,
        r#"{"kind":"mouse","phase":"down","t_ms":5,"x":300,"button":2}"#,
    );
    assert!(!runner.is_capturing());
    assert!(runner.take_effects().is_empty());
}

#[test]
fn touch_swipe_commits_prev() {
    let mut runner = runner();
    push(&mut runner, r#"{"kind":"touch","phase":"down","t_ms":100,"x":100}"#);
    push(&mut runner, r#"{"kind":"touch","phase":"up","t_ms":160,"x":150}"#);
    assert_eq!(runner.carousel().real_index(), 2);
}

#[test]
fn enter_key_opens_and_tab_is_ignored() {
    let mut runner = runner();
    let slot = runner.carousel().current();
    assert!(!runner.push_encoded_input(&format!(
        r#"{{"kind":"key","t_ms":1,"slot":{slot},"key":"Tab"}}"#
    )));
    push(
        &mut runner,
        &format!(r#"{{"kind":"key","t_ms":2,"slot":{slot},"key":"Enter"}}"#),
    );
    assert_eq!(
        runner.take_effects(),
        vec![Effect::OpenUrl("https://a.example".into())]
    );
}

#[test]
fn malformed_input_is_rejected() {
    let mut runner = runner();
    assert!(!runner.push_encoded_input("not json"));
    assert!(!runner.push_encoded_input(r#"{"kind":"nav","t_ms":1}"#));
    assert_eq!(runner.carousel().real_index(), 0);
}

#[test]
fn stale_timestamps_do_not_rewind_the_clock() {
    let mut runner = runner();
    push(&mut runner, r#"{"kind":"hover","t_ms":2000,"hovering":false}"#);
    push(&mut runner, r#"{"kind":"hover","t_ms":500,"hovering":false}"#);
    assert_eq!(runner.now().as_millis(), 2000);
}

#[test]
fn hidden_page_clears_the_wake_up() {
    let mut runner = runner();
    push(&mut runner, r#"{"kind":"visibility","t_ms":10,"visible":false}"#);
    assert_eq!(runner.wake_delay_ms(), None);
    push(&mut runner, r#"{"kind":"visibility","t_ms":20,"visible":true}"#);
    assert_delay(&runner, 3000.0);
}

#[test]
fn frame_json_reports_track_state() {
    let mut runner = runner();
    push(&mut runner, r#"{"kind":"resize","t_ms":1,"width":600}"#);
    let frame: serde_json::Value =
        serde_json::from_str(&runner.frame_json().expect("frame serializes")).expect("json");
    assert_eq!(frame["card_size"], 240.0);
    assert_eq!(frame["real_index"], 0);
    assert_eq!(frame["indicators"].as_array().map(Vec::len), Some(3));
}

#[test]
fn oversized_resize_widths_are_bounded() {
    let mut runner = runner();
    for width in ["3e7", "1e300", "1.7976931348623157e308"] {
        push(
            &mut runner,
            &format!(r#"{{"kind":"resize","t_ms":1,"width":{width}}}"#),
        );
        let carousel = runner.carousel();
        assert_eq!(carousel.window().clone_count(), MAX_CLONE_COUNT);
        assert!(carousel.window().is_real(carousel.current()));
        assert_eq!(carousel.real_index(), 0);
    }
    push(&mut runner, r#"{"kind":"nav","t_ms":2,"direction":"prev"}"#);
    push(&mut runner, r#"{"kind":"transition_end","t_ms":400}"#);
    assert_eq!(runner.carousel().real_index(), 2);
    assert!(runner.frame_json().is_ok());
}

#[test]
fn set_items_json_validates() {
    let mut runner = runner();
    assert!(matches!(
        runner.set_items_json("{"),
        Err(HostError::Json(_))
    ));
    runner.set_items_json("[]").expect("empty list is ignored, not an error");
    assert_eq!(runner.carousel().items().count().get(), 3);

    runner
        .set_items_json(r#"[{"id":9,"title":"Solo","image":"s.png","landing_page":"/s"}]"#)
        .expect("valid items");
    assert_eq!(runner.carousel().items().count().get(), 1);
}

#[test]
fn invalid_config_is_a_core_error() {
    let err = RunnerCore::new(ITEMS, r#"{"card_width": -1}"#, 0.0).expect_err("rejected");
    assert!(matches!(err, HostError::Carousel(_)));
    let err = RunnerCore::new("[]", "", 0.0).expect_err("rejected");
    assert_eq!(err.to_string(), "carousel requires at least one item");
}
