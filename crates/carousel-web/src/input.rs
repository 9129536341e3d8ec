#![forbid(unsafe_code)]

//! Deterministic, JSON-friendly host event schema.
//!
//! Every browser signal the carousel reacts to has a [`HostEvent`] encoding
//! with a millisecond timestamp taken from `performance.now()`. The DOM
//! mount builds these values directly; recorded streams can be replayed
//! through [`crate::runner_core::RunnerCore::push_encoded_input`].
//!
//! ```json
//! {"kind":"mouse","phase":"down","t_ms":1520.5,"x":311,"button":0}
//! {"kind":"touch","phase":"move","t_ms":1544.0,"x":280}
//! {"kind":"nav","t_ms":2000,"direction":"next"}
//! ```

use carousel_core::{MouseButton, Msg, PointerSource};
use serde::{Deserialize, Serialize};

use crate::error::HostError;

/// Lifecycle phase of a mouse or touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Prev/next control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavDirection {
    Prev,
    Next,
}

/// One host signal with its timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostEvent {
    Mouse {
        phase: PointerPhase,
        t_ms: f64,
        #[serde(default)]
        x: f64,
        /// DOM `MouseEvent.button`; only read on `down`.
        #[serde(default)]
        button: i16,
    },
    Touch {
        phase: PointerPhase,
        t_ms: f64,
        /// `clientX` of the first touch (changed touch on `up`).
        #[serde(default)]
        x: f64,
    },
    TransitionEnd {
        t_ms: f64,
    },
    Visibility {
        t_ms: f64,
        visible: bool,
    },
    Resize {
        t_ms: f64,
        width: f64,
    },
    Hover {
        t_ms: f64,
        hovering: bool,
    },
    Nav {
        t_ms: f64,
        direction: NavDirection,
    },
    Indicator {
        t_ms: f64,
        item: usize,
    },
    Click {
        t_ms: f64,
        slot: usize,
    },
    Key {
        t_ms: f64,
        slot: usize,
        key: String,
    },
    Tick {
        t_ms: f64,
    },
}

impl HostEvent {
    pub fn from_json_str(s: &str) -> Result<Self, HostError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json_string(&self) -> Result<String, HostError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Host timestamp in milliseconds.
    #[must_use]
    pub fn t_ms(&self) -> f64 {
        match *self {
            Self::Mouse { t_ms, .. }
            | Self::Touch { t_ms, .. }
            | Self::TransitionEnd { t_ms }
            | Self::Visibility { t_ms, .. }
            | Self::Resize { t_ms, .. }
            | Self::Hover { t_ms, .. }
            | Self::Nav { t_ms, .. }
            | Self::Indicator { t_ms, .. }
            | Self::Click { t_ms, .. }
            | Self::Key { t_ms, .. }
            | Self::Tick { t_ms } => t_ms,
        }
    }

    /// Core message for this event, or `None` if the carousel ignores it
    /// (e.g. keys other than Enter/Space).
    #[must_use]
    pub fn to_msg(&self) -> Option<Msg> {
        let msg = match *self {
            Self::Mouse {
                phase, x, button, ..
            } => pointer_msg(phase, x, PointerSource::Mouse(MouseButton::from_dom(button))),
            Self::Touch { phase, x, .. } => pointer_msg(phase, x, PointerSource::Touch),
            Self::TransitionEnd { .. } => Msg::TransitionEnd,
            Self::Visibility { visible, .. } => Msg::VisibilityChanged { visible },
            Self::Resize { width, .. } => Msg::Resize {
                container_width: width,
            },
            Self::Hover { hovering, .. } => Msg::HoverChanged { hovering },
            Self::Nav {
                direction: NavDirection::Prev,
                ..
            } => Msg::Prev,
            Self::Nav {
                direction: NavDirection::Next,
                ..
            } => Msg::Next,
            Self::Indicator { item, .. } => Msg::GoTo { item },
            Self::Click { slot, .. } => Msg::Activate { slot },
            Self::Key { slot, ref key, .. } => {
                if !is_activation_key(key) {
                    return None;
                }
                Msg::Activate { slot }
            }
            Self::Tick { .. } => Msg::Tick,
        };
        Some(msg)
    }
}

fn pointer_msg(phase: PointerPhase, x: f64, source: PointerSource) -> Msg {
    match phase {
        PointerPhase::Down => Msg::DragStart { x, source },
        PointerPhase::Move => Msg::DragMove { x },
        PointerPhase::Up => Msg::DragEnd { x },
        PointerPhase::Cancel => Msg::DragCancel,
    }
}

/// Keys that activate a focused card.
#[must_use]
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mouse_down_maps_button() {
        let ev = HostEvent::from_json_str(
            r#"{"kind":"mouse","phase":"down","t_ms":12.5,"x":300,"button":2}"#,
        )
        .expect("valid event");
        assert_eq!(ev.t_ms(), 12.5);
        assert_eq!(
            ev.to_msg(),
            Some(Msg::DragStart {
                x: 300.0,
                source: PointerSource::Mouse(MouseButton::Secondary),
            })
        );
    }

    #[test]
    fn touch_cancel_without_position() {
        let ev = HostEvent::from_json_str(r#"{"kind":"touch","phase":"cancel","t_ms":5}"#)
            .expect("x defaults");
        assert_eq!(ev.to_msg(), Some(Msg::DragCancel));
    }

    #[test]
    fn keys_other_than_enter_or_space_are_ignored() {
        let enter = HostEvent::Key {
            t_ms: 0.0,
            slot: 3,
            key: "Enter".into(),
        };
        let space = HostEvent::Key {
            t_ms: 0.0,
            slot: 3,
            key: " ".into(),
        };
        let tab = HostEvent::Key {
            t_ms: 0.0,
            slot: 3,
            key: "Tab".into(),
        };
        assert_eq!(enter.to_msg(), Some(Msg::Activate { slot: 3 }));
        assert_eq!(space.to_msg(), Some(Msg::Activate { slot: 3 }));
        assert_eq!(tab.to_msg(), None);
    }

    #[test]
    fn encodes_with_kind_tag() {
        let ev = HostEvent::Nav {
            t_ms: 100.0,
            direction: NavDirection::Prev,
        };
        let json = ev.to_json_string().expect("serialize");
        assert_eq!(json, r#"{"kind":"nav","t_ms":100.0,"direction":"prev"}"#);
        assert_eq!(HostEvent::from_json_str(&json).expect("parse"), ev);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(matches!(
            HostEvent::from_json_str(r#"{"kind":"wheel","t_ms":0}"#),
            Err(HostError::Json(_))
        ));
    }
}
