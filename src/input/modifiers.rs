//! Keyboard modifier state tracking.

use super::events::Key;

/// Keyboard modifier state.
///
/// Tracks which modifier keys are currently held. Used when matching
/// keybindings and to tell Shift+Return (newline) from Return (commit).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a press or release; returns `false` if `key` is not a modifier.
    pub fn update(&mut self, key: Key, pressed: bool) -> bool {
        match key {
            Key::Shift => self.shift = pressed,
            Key::Ctrl => self.ctrl = pressed,
            Key::Alt => self.alt = pressed,
            _ => return false,
        }
        true
    }

    /// Releases every modifier (e.g. after focus loss).
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_modifier_keys_only() {
        let mut modifiers = Modifiers::new();
        assert!(modifiers.update(Key::Ctrl, true));
        assert!(!modifiers.update(Key::Tab, true));
        assert!(modifiers.ctrl);

        modifiers.update(Key::Ctrl, false);
        assert_eq!(modifiers, Modifiers::new());
    }
}
