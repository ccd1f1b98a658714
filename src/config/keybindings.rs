//! Keybinding configuration types and parsing.
//!
//! Every editor shortcut is an [`Action`] bound to one or more key strings
//! in the `[keybindings]` table of config.toml.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Mode changes
    Exit,
    ToggleRegionSelect,
    SelectTool,
    RectangleTool,
    ArrowTool,
    TextTool,

    // History
    Undo,
    Redo,

    // Clipboard
    Copy,
    Cut,
    Paste,
    Duplicate,

    // Deletion
    DeleteSelection,
    DeleteLast,

    // Z-order
    BringForward,
    BringToFront,
    SendBackward,
    SendToBack,
}

/// A single keybinding: a key name with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+Z" or "Escape".
    ///
    /// Modifiers may appear in any order and spaces around '+' are ignored.
    /// A trailing "++" binds the '+' key itself.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" splits into ["Ctrl", "", ""]: the key is '+'.
        let key = key_parts.join("+");
        let key = if key.is_empty() { "+".to_string() } else { key };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings:
/// ```toml
/// [keybindings]
/// exit = ["Escape"]
/// undo = ["Ctrl+Z"]
/// rectangle_tool = ["R"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_exit")]
    pub exit: Vec<String>,

    #[serde(default = "default_toggle_region_select")]
    pub toggle_region_select: Vec<String>,

    #[serde(default = "default_select_tool")]
    pub select_tool: Vec<String>,

    #[serde(default = "default_rectangle_tool")]
    pub rectangle_tool: Vec<String>,

    #[serde(default = "default_arrow_tool")]
    pub arrow_tool: Vec<String>,

    #[serde(default = "default_text_tool")]
    pub text_tool: Vec<String>,

    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_copy")]
    pub copy: Vec<String>,

    #[serde(default = "default_cut")]
    pub cut: Vec<String>,

    #[serde(default = "default_paste")]
    pub paste: Vec<String>,

    #[serde(default = "default_duplicate")]
    pub duplicate: Vec<String>,

    #[serde(default = "default_delete_selection")]
    pub delete_selection: Vec<String>,

    #[serde(default = "default_delete_last")]
    pub delete_last: Vec<String>,

    #[serde(default = "default_bring_forward")]
    pub bring_forward: Vec<String>,

    #[serde(default = "default_bring_to_front")]
    pub bring_to_front: Vec<String>,

    #[serde(default = "default_send_backward")]
    pub send_backward: Vec<String>,

    #[serde(default = "default_send_to_back")]
    pub send_to_back: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            exit: default_exit(),
            toggle_region_select: default_toggle_region_select(),
            select_tool: default_select_tool(),
            rectangle_tool: default_rectangle_tool(),
            arrow_tool: default_arrow_tool(),
            text_tool: default_text_tool(),
            undo: default_undo(),
            redo: default_redo(),
            copy: default_copy(),
            cut: default_cut(),
            paste: default_paste(),
            duplicate: default_duplicate(),
            delete_selection: default_delete_selection(),
            delete_last: default_delete_last(),
            bring_forward: default_bring_forward(),
            bring_to_front: default_bring_to_front(),
            send_backward: default_send_backward(),
            send_to_back: default_send_to_back(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions.
    ///
    /// Returns an error if any keybinding string is invalid or if the same
    /// binding is assigned to two actions.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let table: [(&[String], Action); 18] = [
            (self.exit.as_slice(), Action::Exit),
            (self.toggle_region_select.as_slice(), Action::ToggleRegionSelect),
            (self.select_tool.as_slice(), Action::SelectTool),
            (self.rectangle_tool.as_slice(), Action::RectangleTool),
            (self.arrow_tool.as_slice(), Action::ArrowTool),
            (self.text_tool.as_slice(), Action::TextTool),
            (self.undo.as_slice(), Action::Undo),
            (self.redo.as_slice(), Action::Redo),
            (self.copy.as_slice(), Action::Copy),
            (self.cut.as_slice(), Action::Cut),
            (self.paste.as_slice(), Action::Paste),
            (self.duplicate.as_slice(), Action::Duplicate),
            (self.delete_selection.as_slice(), Action::DeleteSelection),
            (self.delete_last.as_slice(), Action::DeleteLast),
            (self.bring_forward.as_slice(), Action::BringForward),
            (self.bring_to_front.as_slice(), Action::BringToFront),
            (self.send_backward.as_slice(), Action::SendBackward),
            (self.send_to_back.as_slice(), Action::SendToBack),
        ];

        let mut map = HashMap::new();
        for (bindings, action) in table {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing_action) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing_action, action
                    ));
                }
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_exit() -> Vec<String> {
    vec!["Escape".to_string()]
}

fn default_toggle_region_select() -> Vec<String> {
    vec!["Tab".to_string()]
}

fn default_select_tool() -> Vec<String> {
    vec!["V".to_string()]
}

fn default_rectangle_tool() -> Vec<String> {
    vec!["R".to_string()]
}

fn default_arrow_tool() -> Vec<String> {
    vec!["A".to_string()]
}

fn default_text_tool() -> Vec<String> {
    vec!["T".to_string()]
}

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string()]
}

fn default_redo() -> Vec<String> {
    vec!["Ctrl+Shift+Z".to_string(), "Ctrl+Y".to_string()]
}

fn default_copy() -> Vec<String> {
    vec!["Ctrl+C".to_string()]
}

fn default_cut() -> Vec<String> {
    vec!["Ctrl+X".to_string()]
}

fn default_paste() -> Vec<String> {
    vec!["Ctrl+V".to_string()]
}

fn default_duplicate() -> Vec<String> {
    vec!["Ctrl+D".to_string()]
}

fn default_delete_selection() -> Vec<String> {
    vec!["Delete".to_string(), "Backspace".to_string()]
}

fn default_delete_last() -> Vec<String> {
    vec!["Ctrl+Backspace".to_string()]
}

fn default_bring_forward() -> Vec<String> {
    vec!["]".to_string()]
}

fn default_bring_to_front() -> Vec<String> {
    vec!["Ctrl+]".to_string()]
}

fn default_send_backward() -> Vec<String> {
    vec!["[".to_string()]
}

fn default_send_to_back() -> Vec<String> {
    vec!["Ctrl+[".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let binding = KeyBinding::parse("Escape").unwrap();
        assert_eq!(binding.key, "Escape");
        assert!(!binding.ctrl);
        assert!(!binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_ctrl_shift_key() {
        let binding = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        assert_eq!(binding.key, "Z");
        assert!(binding.ctrl);
        assert!(binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_with_spaces_and_any_order() {
        let spaced = KeyBinding::parse("Shift + Ctrl + Z").unwrap();
        let plain = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        assert_eq!(spaced, plain);
    }

    #[test]
    fn test_parse_plus_key() {
        let binding = KeyBinding::parse("Ctrl++").unwrap();
        assert_eq!(binding.key, "+");
        assert!(binding.ctrl);
    }

    #[test]
    fn test_parse_rejects_modifier_only() {
        assert!(KeyBinding::parse("Ctrl+Shift").is_err());
        assert!(KeyBinding::parse("   ").is_err());
    }

    #[test]
    fn test_matches() {
        let binding = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        assert!(binding.matches("Z", true, true, false));
        assert!(binding.matches("z", true, true, false)); // Case insensitive
        assert!(!binding.matches("Z", true, false, false)); // Missing shift
        assert!(!binding.matches("Y", true, true, false)); // Wrong key
    }

    #[test]
    fn test_build_action_map() {
        let map = KeybindingsConfig::default().build_action_map().unwrap();

        let tab = KeyBinding::parse("Tab").unwrap();
        assert_eq!(map.get(&tab), Some(&Action::ToggleRegionSelect));

        let ctrl_backspace = KeyBinding::parse("Ctrl+Backspace").unwrap();
        assert_eq!(map.get(&ctrl_backspace), Some(&Action::DeleteLast));

        let bracket = KeyBinding::parse("Ctrl+]").unwrap();
        assert_eq!(map.get(&bracket), Some(&Action::BringToFront));
    }

    #[test]
    fn test_duplicate_keybinding_detection() {
        let mut config = KeybindingsConfig::default();
        config.copy = vec!["Ctrl+Z".to_string()];

        let err_msg = config.build_action_map().unwrap_err();
        assert!(err_msg.contains("Duplicate keybinding"));
        assert!(err_msg.contains("Ctrl+Z"));
    }

    #[test]
    fn test_duplicate_with_different_modifier_order() {
        let mut config = KeybindingsConfig::default();
        config.redo = vec!["Shift+Ctrl+Z".to_string()];
        config.cut = vec!["Ctrl+Shift+Z".to_string()];

        assert!(config.build_action_map().is_err());
    }
}
