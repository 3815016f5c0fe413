//! Player input handling.
//!
//! Raw per-frame button state arrives as a [`PlayerInput`]. The simulation
//! pairs it with the previous frame's state to form an [`IntentSnapshot`],
//! which answers the "down" and "pressed" queries the character polls.

use glam::Vec2;
use sandstep_physics::MoveIntent;
use serde::{Deserialize, Serialize};

/// Logical buttons the movement code reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Forward,
    Backward,
    Left,
    Right,
    Run,
    Jump,
    Duck,
}

impl Button {
    pub const ALL: [Button; 7] = [
        Button::Forward,
        Button::Backward,
        Button::Left,
        Button::Right,
        Button::Run,
        Button::Jump,
        Button::Duck,
    ];

    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of held buttons, packed into a byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ButtonSet(pub u8);

impl ButtonSet {
    pub const EMPTY: Self = Self(0);

    /// Build a set from a list of buttons.
    pub fn of(buttons: &[Button]) -> Self {
        buttons.iter().fold(Self::EMPTY, |set, &button| set.with(button))
    }

    #[inline]
    pub fn contains(self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    /// Copy of this set with `button` held.
    #[inline]
    pub fn with(self, button: Button) -> Self {
        Self(self.0 | button.bit())
    }

    #[inline]
    pub fn press(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    #[inline]
    pub fn release(&mut self, button: Button) {
        self.0 &= !button.bit();
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Raw player input for a single frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Buttons held this frame.
    pub buttons: ButtonSet,

    /// Look delta this frame in radians: `x` is pitch, `y` is yaw.
    pub look_delta: Vec2,
}

impl PlayerInput {
    pub fn new(buttons: ButtonSet) -> Self {
        Self {
            buttons,
            look_delta: Vec2::ZERO,
        }
    }

    /// Same buttons, with a look delta.
    pub fn looking(mut self, pitch_delta: f32, yaw_delta: f32) -> Self {
        self.look_delta = Vec2::new(pitch_delta, yaw_delta);
        self
    }
}

/// Polled input queries.
pub trait InputIntent {
    /// Whether `button` is held this frame.
    fn down(&self, button: Button) -> bool;

    /// Whether `button` went down this frame.
    fn pressed(&self, button: Button) -> bool;

    /// Look delta in radians (pitch, yaw).
    fn look_delta(&self) -> Vec2 {
        Vec2::ZERO
    }
}

/// Held buttons for this frame together with the previous frame's, for edge
/// detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentSnapshot {
    held: ButtonSet,
    previous: ButtonSet,
    look_delta: Vec2,
}

impl IntentSnapshot {
    /// First frame: nothing was held before.
    pub fn new(input: PlayerInput) -> Self {
        Self {
            held: input.buttons,
            previous: ButtonSet::EMPTY,
            look_delta: input.look_delta,
        }
    }

    /// Snapshot for the next frame.
    pub fn advance(&self, input: PlayerInput) -> Self {
        Self {
            held: input.buttons,
            previous: self.held,
            look_delta: input.look_delta,
        }
    }

    pub fn held(&self) -> ButtonSet {
        self.held
    }

    /// Whether `button` was let go this frame.
    pub fn released(&self, button: Button) -> bool {
        !self.held.contains(button) && self.previous.contains(button)
    }
}

impl InputIntent for IntentSnapshot {
    fn down(&self, button: Button) -> bool {
        self.held.contains(button)
    }

    fn pressed(&self, button: Button) -> bool {
        self.held.contains(button) && !self.previous.contains(button)
    }

    fn look_delta(&self) -> Vec2 {
        self.look_delta
    }
}

/// Directional keys of `input` as a physics intent.
pub fn move_intent<I: InputIntent + ?Sized>(input: &I) -> MoveIntent {
    MoveIntent {
        forward: input.down(Button::Forward),
        backward: input.down(Button::Backward),
        left: input.down(Button::Left),
        right: input.down(Button::Right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_bits_are_distinct() {
        let all = ButtonSet::of(&Button::ALL);
        assert_eq!(all.0, 0b0111_1111);

        for button in Button::ALL {
            let mut set = all;
            set.release(button);
            assert!(!set.contains(button));
            assert_eq!(set.0.count_ones(), 6);
        }
    }

    #[test]
    fn test_pressed_only_on_first_frame() {
        let jump = PlayerInput::new(ButtonSet::of(&[Button::Jump]));

        let first = IntentSnapshot::new(jump);
        assert!(first.pressed(Button::Jump));
        assert!(first.down(Button::Jump));

        let held = first.advance(jump);
        assert!(!held.pressed(Button::Jump));
        assert!(held.down(Button::Jump));

        let released = held.advance(PlayerInput::default());
        assert!(released.released(Button::Jump));
        assert!(!released.down(Button::Jump));

        let again = released.advance(jump);
        assert!(again.pressed(Button::Jump));
    }

    #[test]
    fn test_move_intent_conversion() {
        let input = PlayerInput::new(ButtonSet::of(&[Button::Forward, Button::Left, Button::Run]));
        let intent = move_intent(&IntentSnapshot::new(input));

        assert_eq!(
            intent,
            MoveIntent {
                forward: true,
                backward: false,
                left: true,
                right: false,
            }
        );
    }

    #[test]
    fn test_look_delta_carried() {
        let input = PlayerInput::default().looking(0.1, -0.2);
        let snapshot = IntentSnapshot::new(input);

        assert_eq!(snapshot.look_delta(), Vec2::new(0.1, -0.2));
        assert_eq!(snapshot.advance(PlayerInput::default()).look_delta(), Vec2::ZERO);
    }
}
