#![forbid(unsafe_code)]

//! JSON loading for configuration and items.
//!
//! Run:
//!   cargo test -p carousel-core --features serde --test config_json

use std::time::Duration;

use carousel_core::{
    Carousel, CarouselConfig, CarouselError, Items, SlotKey, TransitionStyle,
};
use pretty_assertions::assert_eq;

const ITEMS_JSON: &str = r#"[
    { "id": 1, "title": "Lagoon", "image": "https://img.test/1.jpg", "landing_page": "https://land.test/1" },
    { "id": 2, "title": "Dunes",  "image": "https://img.test/2.jpg", "landing_page": "https://land.test/2" },
    { "id": 3, "title": "Fjord",  "image": "https://img.test/3.jpg", "landing_page": "https://land.test/3" }
]"#;

#[test]
fn empty_object_yields_defaults() {
    let config = CarouselConfig::from_json_str("{}").expect("defaults are valid");
    assert_eq!(config, CarouselConfig::default());
}

#[test]
fn partial_object_overrides_fields() {
    let config = CarouselConfig::from_json_str(
        r#"{ "auto_slide_interval_ms": 5000, "swipe_velocity": 0.8, "easing": [0.4, 0.0, 0.2, 1.0] }"#,
    )
    .expect("valid overrides");
    assert_eq!(config.auto_slide_interval(), Duration::from_secs(5));
    assert_eq!(config.swipe_velocity, 0.8);
    assert_eq!(config.min_drag_distance, 40.0);
    assert_eq!(
        TransitionStyle::from_config(&config).css(),
        "transform 0.4s cubic-bezier(0.4, 0, 0.2, 1)"
    );
}

#[test]
fn invalid_values_are_collected() {
    let err = CarouselConfig::from_json_str(r#"{ "auto_slide_interval_ms": 0, "card_width": -3 }"#)
        .expect_err("two violations");
    match err {
        CarouselError::InvalidConfig(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(errors[0].contains("auto_slide_interval_ms"));
            assert!(errors[1].contains("card_width"));
        }
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_a_json_error() {
    let err = CarouselConfig::from_json_str("{ not json").expect_err("syntax error");
    assert!(matches!(err, CarouselError::Json(_)));
    let err = CarouselConfig::from_json_str(r#"{ "animation_ms": "fast" }"#).expect_err("type error");
    assert!(matches!(err, CarouselError::Json(_)));
}

#[test]
fn config_round_trips_through_json() {
    let config = CarouselConfig {
        click_grace_ms: 250,
        ..CarouselConfig::default()
    };
    let json = serde_json::to_string(&config).expect("serialize");
    assert_eq!(CarouselConfig::from_json_str(&json).expect("valid"), config);
}

#[test]
fn items_parse_with_landing_page_field() {
    let items = Items::from_json_str(ITEMS_JSON).expect("three items");
    assert_eq!(items.count().get(), 3);
    assert_eq!(items.get(1).map(|item| item.landing_page.as_str()), Some("https://land.test/2"));
}

#[test]
fn empty_item_array_is_rejected() {
    assert!(matches!(Items::from_json_str("[]"), Err(CarouselError::EmptyItems)));
}

#[test]
fn frame_serializes_for_custom_hosts() {
    let items = Items::from_json_str(ITEMS_JSON).expect("three items");
    let config = CarouselConfig::from_json_str(r#"{ "viewport_width": 300 }"#).expect("valid");
    let carousel = Carousel::new(items, config, Duration::ZERO).expect("valid");
    let value = serde_json::to_value(carousel.frame()).expect("serialize frame");

    assert_eq!(value["translate_x"], -600.0);
    assert_eq!(value["transition"], serde_json::Value::Null);
    assert_eq!(value["card_size"], 300.0);
    assert_eq!(value["cards"].as_array().map(Vec::len), Some(7));
    assert_eq!(
        value["cards"][0]["key"],
        serde_json::json!({ "band": "clone_start", "ordinal": 0 })
    );
    assert_eq!(value["cards"][2]["title"], "Lagoon");
    assert_eq!(value["indicators"][0]["active"], true);
    assert_eq!(
        SlotKey::Original(2).to_string(),
        "original-2"
    );
}
