use crate::config::Action;
use crate::draw::Arrange;
use crate::input::{events::Key, mode::Mode};

use super::{DrawingState, InputState};

impl InputState {
    /// Processes a key press event.
    ///
    /// Modifier keys only update [`Modifiers`](crate::input::Modifiers).
    /// During text entry plain keys edit the buffer and only Escape or
    /// Ctrl/Alt chords reach the keybinding table.
    pub fn on_key_press(&mut self, key: Key) {
        if self.modifiers.update(key, true) {
            return;
        }

        if self.is_text_input() && self.handle_text_key(key) {
            return;
        }

        let Some(key_str) = key.binding_name() else {
            return;
        };
        if let Some(action) = self.find_action(&key_str) {
            self.handle_action(action);
        }
    }

    /// Returns `true` if the key was consumed by text entry.
    fn handle_text_key(&mut self, key: Key) -> bool {
        if self.modifiers.ctrl || self.modifiers.alt || key == Key::Escape {
            return false;
        }

        let shift = self.modifiers.shift;
        if key == Key::Return && !shift {
            self.commit_text();
            return true;
        }

        let DrawingState::TextInput { buffer, .. } = &mut self.state else {
            return false;
        };
        match key {
            Key::Char(c) => buffer.push(c),
            Key::Space => buffer.push(' '),
            Key::Return => buffer.push('\n'),
            Key::Backspace => {
                buffer.pop();
            }
            // Ignore other keys in text mode
            _ => return true,
        }
        self.needs_redraw = true;
        true
    }

    /// Handle an action triggered by a keybinding.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Exit => {
                // Cancel first, then leave the current mode, then close.
                if self.cancel_gesture() {
                    return;
                }
                if self.mode() != Mode::Select {
                    self.set_mode(Mode::Select);
                } else {
                    log::debug!("Exit requested");
                    self.should_exit = true;
                }
            }
            Action::ToggleRegionSelect => {
                if self.is_pointer_gesture_active() {
                    return;
                }
                self.cancel_gesture();
                let mode = self.modes.toggle_region_select();
                self.after_mode_change(mode);
            }
            Action::SelectTool => self.set_mode(Mode::Select),
            Action::RectangleTool => self.set_mode(Mode::Rectangle),
            Action::ArrowTool => self.set_mode(Mode::Arrow),
            Action::TextTool => self.set_mode(Mode::Text),
            edit => {
                if self.is_pointer_gesture_active() {
                    log::debug!("Ignoring {:?} during an active gesture", edit);
                    return;
                }
                self.handle_edit_action(edit);
            }
        }
    }

    fn handle_edit_action(&mut self, action: Action) {
        let changed = match action {
            Action::Undo => self.undo(),
            Action::Redo => self.redo(),
            Action::Copy => self.copy_selection(),
            Action::Cut => self.cut_selection(),
            Action::Paste => self.paste(),
            Action::Duplicate => self.duplicate_selection(),
            Action::DeleteSelection => self.delete_selection(),
            Action::DeleteLast => self.delete_last(),
            Action::BringForward => self.arrange_selection(Arrange::BringForward),
            Action::BringToFront => self.arrange_selection(Arrange::BringToFront),
            Action::SendBackward => self.arrange_selection(Arrange::SendBackward),
            Action::SendToBack => self.arrange_selection(Arrange::SendToBack),
            Action::Exit
            | Action::ToggleRegionSelect
            | Action::SelectTool
            | Action::RectangleTool
            | Action::ArrowTool
            | Action::TextTool => false,
        };

        if changed {
            self.refresh_cursor();
        }
    }

    /// Switches mode, abandoning any gesture or text entry in progress.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode() {
            return;
        }
        self.cancel_gesture();
        self.modes.set(mode);
        self.after_mode_change(mode);
    }

    fn after_mode_change(&mut self, mode: Mode) {
        log::debug!("Mode is now {:?}", mode);
        self.needs_redraw = true;
        self.refresh_cursor();
    }

    /// Processes a key release event.
    pub fn on_key_release(&mut self, key: Key) {
        self.modifiers.update(key, false);
    }
}
