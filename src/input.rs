//! Input events and the held-key snapshot
//!
//! The input backend translates whatever the window system reports into this
//! small vocabulary; the scenes and driver consume nothing else.

use std::collections::HashSet;

/// Keys the game distinguishes. Anything else arrives as `Other` and only
/// matters as "some key was pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    P,
    Escape,
    F4,
    LAlt,
    RAlt,
    Space,
    Return,
    Other(u32),
}

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Joystick/gamepad button press (raw button id)
    ButtonDown(u8),
    ButtonUp(u8),
    /// Window-system quit request (close button etc.)
    Quit,
}

/// Snapshot of the keys held at the start of a frame
#[derive(Debug, Clone, Default)]
pub struct PressedKeys {
    held: HashSet<Key>,
}

impl PressedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// True if either alt key is held (the alt-F4 quit combo)
    pub fn alt_held(&self) -> bool {
        self.is_held(Key::LAlt) || self.is_held(Key::RAlt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_keys_tracks_held_set() {
        let mut pressed = PressedKeys::new();
        assert!(!pressed.is_held(Key::Left));
        pressed.press(Key::Left);
        assert!(pressed.is_held(Key::Left));
        pressed.release(Key::Left);
        assert!(!pressed.is_held(Key::Left));
    }

    #[test]
    fn test_alt_held_matches_either_alt() {
        let mut pressed = PressedKeys::new();
        assert!(!pressed.alt_held());
        pressed.press(Key::RAlt);
        assert!(pressed.alt_held());
        pressed.release(Key::RAlt);
        pressed.press(Key::LAlt);
        assert!(pressed.alt_held());
    }
}
