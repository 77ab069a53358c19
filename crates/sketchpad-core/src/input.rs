//! Normalized input events and pointer tracking.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    /// Adds to the selection instead of replacing it.
    pub fn multi_select(&self) -> bool {
        self.shift
    }

    /// Turns the wheel into zoom and letters into commands.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Delete,
    Backspace,
    Character(char),
}

/// One event from the input source. Positions are in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown {
        button: MouseButton,
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        position: Point,
    },
    PointerUp {
        #[serde(default)]
        modifiers: Modifiers,
    },
    Wheel {
        delta: Vec2,
        #[serde(default)]
        modifiers: Modifiers,
    },
    KeyDown {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

/// Tracks pointer state across events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Last known pointer position in screen coordinates.
    pub pointer_position: Option<Point>,
    /// Where the first held button went down.
    drag_origin: Option<Point>,
    pub modifiers: Modifiers,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update tracking from an event before the editor acts on it.
    pub fn observe(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown {
                position, modifiers, ..
            } => {
                self.pointer_position = Some(position);
                self.drag_origin.get_or_insert(position);
                self.modifiers = modifiers;
            }
            InputEvent::PointerMove { position } => {
                self.pointer_position = Some(position);
            }
            InputEvent::PointerUp { modifiers } => {
                self.drag_origin = None;
                self.modifiers = modifiers;
            }
            InputEvent::Wheel { modifiers, .. } | InputEvent::KeyDown { modifiers, .. } => {
                self.modifiers = modifiers;
            }
        }
    }

    /// Pointer travel since the button went down, in screen units.
    pub fn drag_delta(&self) -> Option<Vec2> {
        Some(self.pointer_position? - self.drag_origin?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_tracking() {
        let mut state = InputState::new();
        state.observe(&InputEvent::PointerDown {
            button: MouseButton::Left,
            position: Point::new(100.0, 100.0),
            modifiers: Modifiers::NONE,
        });
        state.observe(&InputEvent::PointerMove {
            position: Point::new(150.0, 120.0),
        });
        assert_eq!(state.drag_delta(), Some(Vec2::new(50.0, 20.0)));

        // A second press mid-drag keeps the first origin.
        state.observe(&InputEvent::PointerDown {
            button: MouseButton::Right,
            position: Point::new(150.0, 120.0),
            modifiers: Modifiers::NONE,
        });
        assert_eq!(state.drag_delta(), Some(Vec2::new(50.0, 20.0)));

        state.observe(&InputEvent::PointerUp {
            modifiers: Modifiers::NONE,
        });
        assert_eq!(state.drag_delta(), None);
        assert_eq!(state.pointer_position, Some(Point::new(150.0, 120.0)));
    }

    #[test]
    fn test_modifier_helpers() {
        assert!(Modifiers::SHIFT.multi_select());
        assert!(!Modifiers::SHIFT.command());
        assert!(Modifiers::CTRL.command());
        let meta = Modifiers {
            meta: true,
            ..Default::default()
        };
        assert!(meta.command());
    }

    #[test]
    fn test_event_json_defaults_modifiers() {
        let json = r#"{"PointerDown":{"button":"Left","position":{"x":1.0,"y":2.0}}}"#;
        let event: InputEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            InputEvent::PointerDown {
                button: MouseButton::Left,
                position: Point::new(1.0, 2.0),
                modifiers: Modifiers::NONE,
            }
        );

        let key: InputEvent =
            serde_json::from_str(r#"{"KeyDown":{"key":{"Character":"z"},"modifiers":{"ctrl":true}}}"#).unwrap();
        assert_eq!(
            key,
            InputEvent::KeyDown {
                key: Key::Character('z'),
                modifiers: Modifiers::CTRL,
            }
        );
    }
}
