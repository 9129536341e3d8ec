#![no_main]

use std::time::Duration;

use carousel_core::{
    Carousel, CarouselConfig, CarouselItem, Items, MAX_CLONE_COUNT, MouseButton, Msg,
    PointerSource,
};
use libfuzzer_sys::fuzz_target;

fn decode(op: u8, arg: u8) -> Msg {
    let x = f64::from(arg) * 4.0 - 512.0;
    match op % 14 {
        0 => Msg::DragStart {
            x,
            source: PointerSource::Mouse(MouseButton::Primary),
        },
        1 => Msg::DragStart {
            x,
            source: PointerSource::Touch,
        },
        2 => Msg::DragMove { x },
        3 => Msg::DragEnd { x },
        4 => Msg::DragCancel,
        5 => Msg::Tick,
        6 => Msg::TransitionEnd,
        7 => Msg::VisibilityChanged {
            visible: arg % 2 == 0,
        },
        // Low args cover real layouts; high args sweep up to f64::MAX.
        8 => Msg::Resize {
            container_width: if arg < 128 {
                f64::from(arg) * 16.0
            } else {
                10f64.powi(i32::from(arg - 128) * 308 / 127)
            },
        },
        9 => Msg::HoverChanged {
            hovering: arg % 2 == 0,
        },
        10 => Msg::Prev,
        11 => Msg::Next,
        12 => Msg::GoTo {
            item: usize::from(arg % 12),
        },
        _ => Msg::Activate {
            slot: usize::from(arg),
        },
    }
}

fuzz_target!(|data: &[u8]| {
    // First byte picks the item count (1..=8).
    let Some((&n, rest)) = data.split_first() else {
        return;
    };
    let n = u64::from(n % 8) + 1;
    let items = (0..n)
        .map(|i| CarouselItem::new(i, format!("t{i}"), format!("{i}.png"), format!("/{i}")))
        .collect();
    let Ok(items) = Items::new(items) else {
        return;
    };
    let Ok(mut carousel) = Carousel::new(items, CarouselConfig::default(), Duration::ZERO) else {
        return;
    };

    // Each op is (kind, arg, time step in 10 ms units).
    let mut now = Duration::ZERO;
    for chunk in rest.chunks_exact(3) {
        now += Duration::from_millis(u64::from(chunk[2]) * 10);
        carousel.update(decode(chunk[0], chunk[1]), now);

        let window = carousel.window();
        assert!(window.contains(carousel.current() as i64), "index left the sequence");
        assert!(carousel.real_index() < n as usize, "real index out of range");
        if !carousel.phase().is_transitioning() {
            assert!(window.is_real(carousel.current()), "settled outside the real band");
        }
        assert!(window.clone_count() <= MAX_CLONE_COUNT, "clone count unbounded");
        if !carousel.suspend().is_empty() {
            assert_eq!(carousel.autoplay_deadline(), None, "autoplay armed while suspended");
        }
    }
});
