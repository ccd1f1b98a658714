//! Generic input event types for host-independent event handling.

use serde::{Deserialize, Serialize};

/// Generic key representation.
///
/// Hosts map their native key codes to these values before calling into
/// [`InputState`](super::InputState).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    Escape,
    Return,
    Backspace,
    Delete,
    /// Toggles region selection (not a modifier here)
    Tab,
    Space,
    Shift,
    Ctrl,
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Name used to match against configured keybindings.
    ///
    /// Modifier keys and unknown keys have no binding name.
    pub fn binding_name(&self) -> Option<String> {
        let name = match self {
            Key::Char(c) => return Some(c.to_string()),
            Key::Escape => "Escape",
            Key::Return => "Return",
            Key::Backspace => "Backspace",
            Key::Delete => "Delete",
            Key::Tab => "Tab",
            Key::Space => "Space",
            Key::Shift | Key::Ctrl | Key::Alt | Key::Unknown => return None,
        };
        Some(name.to_string())
    }

    /// Inverse of [`binding_name`](Self::binding_name), plus the modifier names.
    pub fn from_name(name: &str) -> Option<Key> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(Key::Char(c));
        }
        let key = match name.to_lowercase().as_str() {
            "escape" | "esc" => Key::Escape,
            "return" | "enter" => Key::Return,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "tab" => Key::Tab,
            "space" => Key::Space,
            "shift" => Key::Shift,
            "ctrl" | "control" => Key::Ctrl,
            "alt" => Key::Alt,
            _ => return None,
        };
        Some(key)
    }
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Draws, drags, and selects
    #[default]
    Primary,
    /// Opens the context menu for the annotation under the pointer
    Secondary,
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_names() {
        assert_eq!(Key::Char(']').binding_name().as_deref(), Some("]"));
        assert_eq!(Key::Delete.binding_name().as_deref(), Some("Delete"));
        assert_eq!(Key::Tab.binding_name().as_deref(), Some("Tab"));
        assert_eq!(Key::Ctrl.binding_name(), None);
    }

    #[test]
    fn names_parse_back_to_keys() {
        assert_eq!(Key::from_name("]"), Some(Key::Char(']')));
        assert_eq!(Key::from_name("Escape"), Some(Key::Escape));
        assert_eq!(Key::from_name("enter"), Some(Key::Return));
        assert_eq!(Key::from_name("F13"), None);
    }
}
