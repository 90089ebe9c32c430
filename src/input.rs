//! Human input mapping
//!
//! The window/gamepad backend polls devices once per frame and hands over
//! plain snapshots; this module turns them into one discrete [`Action`].

use serde::{Deserialize, Serialize};

use crate::sim::Action;

/// Stick deflection needed to count as up/down
pub const STICK_DEADZONE: f32 = 0.3;
/// Trigger travel needed to count as pressed
pub const TRIGGER_THRESHOLD: f32 = 0.5;

/// Buttons that accelerate on common pad layouts (A, RB, Start)
const ACCEL_BUTTONS: [usize; 3] = [0, 5, 7];
/// Right trigger axis index differs between drivers
const TRIGGER_AXES: [usize; 3] = [5, 4, 2];
/// Left stick vertical axis
const STICK_Y_AXIS: usize = 1;

/// Keys held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub right: bool,
    pub space: bool,
}

impl KeyState {
    /// Accelerate beats up, up beats down
    pub fn action(&self) -> Action {
        if self.space || self.right {
            Action::Accelerate
        } else if self.up {
            Action::MoveUp
        } else if self.down {
            Action::MoveDown
        } else {
            Action::Noop
        }
    }
}

/// First connected gamepad, as reported by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GamepadState {
    pub buttons: Vec<bool>,
    /// D-pad as (x, y), each -1, 0 or 1; y is positive up
    pub hat: (i8, i8),
    pub axes: Vec<f32>,
}

impl GamepadState {
    fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    fn axis(&self, index: usize) -> Option<f32> {
        self.axes.get(index).copied()
    }

    /// Action requested by the pad, `None` if it is idle
    pub fn action(&self) -> Option<Action> {
        let accelerate = ACCEL_BUTTONS.iter().any(|&b| self.button(b))
            || self.hat.0 > 0
            || TRIGGER_AXES
                .iter()
                .filter_map(|&a| self.axis(a))
                .any(|v| v > TRIGGER_THRESHOLD);
        if accelerate {
            return Some(Action::Accelerate);
        }

        if self.hat.1 > 0 {
            return Some(Action::MoveUp);
        }
        if self.hat.1 < 0 {
            return Some(Action::MoveDown);
        }

        match self.axis(STICK_Y_AXIS) {
            Some(y) if y < -STICK_DEADZONE => Some(Action::MoveUp),
            Some(y) if y > STICK_DEADZONE => Some(Action::MoveDown),
            _ => None,
        }
    }
}

/// Combine devices; an active gamepad takes priority over the keyboard
pub fn map_input(keys: &KeyState, gamepad: Option<&GamepadState>) -> Action {
    gamepad
        .and_then(GamepadState::action)
        .unwrap_or_else(|| keys.action())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_priority() {
        let keys = KeyState {
            up: true,
            down: true,
            right: false,
            space: true,
        };
        assert_eq!(keys.action(), Action::Accelerate);

        let keys = KeyState {
            up: true,
            down: true,
            ..Default::default()
        };
        assert_eq!(keys.action(), Action::MoveUp);

        let keys = KeyState {
            down: true,
            ..Default::default()
        };
        assert_eq!(keys.action(), Action::MoveDown);
        assert_eq!(KeyState::default().action(), Action::Noop);
    }

    #[test]
    fn test_gamepad_accelerate_sources() {
        let pad = GamepadState {
            buttons: vec![false, false, false, false, false, true],
            ..Default::default()
        };
        assert_eq!(pad.action(), Some(Action::Accelerate));

        let pad = GamepadState {
            hat: (1, 1),
            ..Default::default()
        };
        assert_eq!(pad.action(), Some(Action::Accelerate));

        let pad = GamepadState {
            axes: vec![0.0, 0.0, 0.9],
            ..Default::default()
        };
        assert_eq!(pad.action(), Some(Action::Accelerate));
    }

    #[test]
    fn test_gamepad_vertical() {
        let pad = GamepadState {
            hat: (0, -1),
            ..Default::default()
        };
        assert_eq!(pad.action(), Some(Action::MoveDown));

        let pad = GamepadState {
            axes: vec![0.0, -0.8],
            ..Default::default()
        };
        assert_eq!(pad.action(), Some(Action::MoveUp));

        // Inside the deadzone
        let pad = GamepadState {
            axes: vec![0.0, 0.2],
            ..Default::default()
        };
        assert_eq!(pad.action(), None);
    }

    #[test]
    fn test_idle_pad_falls_back_to_keyboard() {
        let keys = KeyState {
            down: true,
            ..Default::default()
        };
        let idle = GamepadState::default();
        assert_eq!(map_input(&keys, Some(&idle)), Action::MoveDown);
        assert_eq!(map_input(&keys, None), Action::MoveDown);

        let pad = GamepadState {
            hat: (0, 1),
            ..Default::default()
        };
        assert_eq!(map_input(&keys, Some(&pad)), Action::MoveUp);
    }
}
