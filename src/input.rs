//! Keyboard input mapping
//!
//! Works on `KeyboardEvent.code` strings so it stays independent of any
//! browser binding.

use serde::{Deserialize, Serialize};

use crate::sim::Direction;

pub const ARROW_UP: &str = "ArrowUp";
pub const ARROW_DOWN: &str = "ArrowDown";
pub const ARROW_LEFT: &str = "ArrowLeft";
pub const ARROW_RIGHT: &str = "ArrowRight";

/// Map a key code to a movement intent. Anything but the arrows is `None`.
pub fn decode(code: &str) -> Option<Direction> {
    match code {
        ARROW_UP => Some(Direction::Up),
        ARROW_DOWN => Some(Direction::Down),
        ARROW_LEFT => Some(Direction::Left),
        ARROW_RIGHT => Some(Direction::Right),
        _ => None,
    }
}

/// Which key events get their browser default suppressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreventDefault {
    /// Every keydown
    #[default]
    All,
    /// Only keys that decode to a direction
    Arrows,
    /// Never
    None,
}

/// What to do with one raw key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDispatch {
    pub prevent_default: bool,
    pub intent: Option<Direction>,
}

/// Turns raw key events into intents plus a default-prevention decision.
///
/// The decision is made once per event, before the intent is dispatched.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputController {
    policy: PreventDefault,
}

impl InputController {
    pub fn new(policy: PreventDefault) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> PreventDefault {
        self.policy
    }

    pub fn dispatch(&self, code: &str) -> KeyDispatch {
        let intent = decode(code);
        let prevent_default = match self.policy {
            PreventDefault::All => true,
            PreventDefault::Arrows => intent.is_some(),
            PreventDefault::None => false,
        };
        KeyDispatch {
            prevent_default,
            intent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_arrows() {
        assert_eq!(decode("ArrowUp"), Some(Direction::Up));
        assert_eq!(decode("ArrowDown"), Some(Direction::Down));
        assert_eq!(decode("ArrowLeft"), Some(Direction::Left));
        assert_eq!(decode("ArrowRight"), Some(Direction::Right));
    }

    #[test]
    fn test_decode_ignores_other_keys() {
        for code in ["KeyA", "KeyW", "Space", "", "arrowup", "Up"] {
            assert_eq!(decode(code), None, "{code:?} should not decode");
        }
    }

    #[test]
    fn test_prevent_default_policies() {
        let all = InputController::new(PreventDefault::All);
        assert!(all.dispatch("KeyA").prevent_default);
        assert!(all.dispatch("ArrowUp").prevent_default);

        let arrows = InputController::new(PreventDefault::Arrows);
        assert!(!arrows.dispatch("KeyA").prevent_default);
        assert!(arrows.dispatch("ArrowLeft").prevent_default);

        let none = InputController::new(PreventDefault::None);
        let d = none.dispatch("ArrowRight");
        assert!(!d.prevent_default);
        assert_eq!(d.intent, Some(Direction::Right));
    }
}
