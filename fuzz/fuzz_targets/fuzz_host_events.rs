#![no_main]

use carousel_web::RunnerCore;
use libfuzzer_sys::fuzz_target;

const ITEMS: &str = r#"[
    {"id": 1, "title": "a", "image": "a.png", "landing_page": "/a"},
    {"id": 2, "title": "b", "image": "b.png", "landing_page": "/b"},
    {"id": 3, "title": "c", "image": "c.png", "landing_page": "/c"}
]"#;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(mut runner) = RunnerCore::new(ITEMS, "", 0.0) else {
        return;
    };
    // One encoded event per line.
    for line in text.lines() {
        runner.push_encoded_input(line);
        let carousel = runner.carousel();
        assert!(carousel.window().contains(carousel.current() as i64));
        assert!(carousel.real_index() < 3);
        if let Some(delay) = runner.wake_delay_ms() {
            assert!(delay.is_finite() && delay >= 0.0);
        }
    }
    let _ = runner.frame_json().expect("frame serializes");
});
