//! Mutating edit operations: clipboard, deletion, z-order, undo/redo.
//!
//! Every operation returns whether it changed anything. When a precondition
//! fails (no selection, empty clipboard, z-order extreme) nothing is mutated
//! and no history entry is pushed.

use crate::draw::{Arrange, AnnotationSnapshot, SnapshotError};
use crate::util::Point;

use super::InputState;

impl InputState {
    /// Copies the selected annotation to the clipboard.
    pub fn copy_selection(&mut self) -> bool {
        let Some(annotation) = self.selected_annotation() else {
            return false;
        };
        let annotation = annotation.clone();
        self.clipboard.store(&annotation);
        log::debug!("Copied {}", annotation.id());
        true
    }

    /// Copy followed by delete.
    pub fn cut_selection(&mut self) -> bool {
        self.copy_selection() && self.delete_selection()
    }

    /// Pastes the clipboard offset from its reference point by the configured paste offset.
    pub fn paste(&mut self) -> bool {
        let offset = self.interaction.paste_offset;
        self.insert_from_clipboard(|_| Point::new(offset, offset))
    }

    /// Pastes so the clipboard annotation's anchor lands exactly on `target`.
    pub fn paste_at(&mut self, target: Point) -> bool {
        self.insert_from_clipboard(|snapshot| {
            let anchor = snapshot.paste_anchor();
            Point::new(target.x - anchor.x, target.y - anchor.y)
        })
    }

    /// Copy-then-paste on the selection; the duplicate becomes selected.
    pub fn duplicate_selection(&mut self) -> bool {
        self.copy_selection() && self.paste()
    }

    fn insert_from_clipboard(&mut self, offset: impl FnOnce(&AnnotationSnapshot) -> Point) -> bool {
        let Some(snapshot) = self.clipboard.content() else {
            log::debug!("Paste ignored: clipboard empty");
            return false;
        };
        let delta = offset(snapshot);
        let annotation = snapshot.instantiate_copy(delta.x, delta.y);
        let id = annotation.id();

        self.history.push(self.scene.annotations());
        self.scene.push(annotation);
        self.set_selection(Some(id));
        self.needs_redraw = true;
        log::debug!("Pasted {id} offset by ({:.1}, {:.1})", delta.x, delta.y);
        true
    }

    /// Removes the selected annotation and clears the selection.
    pub fn delete_selection(&mut self) -> bool {
        let Some(id) = self.selected_annotation().map(|a| a.id()) else {
            return false;
        };

        self.history.push(self.scene.annotations());
        self.scene.remove(id);
        self.clear_selection();
        self.reset_hover();
        self.needs_redraw = true;
        log::debug!("Deleted {id}");
        true
    }

    /// Removes the most recently added (topmost) annotation.
    pub fn delete_last(&mut self) -> bool {
        if self.scene.is_empty() {
            return false;
        }

        self.history.push(self.scene.annotations());
        if let Some(removed) = self.scene.pop() {
            log::debug!("Deleted last annotation {}", removed.id());
        }
        self.resolve_selection();
        self.reset_hover();
        self.needs_redraw = true;
        true
    }

    /// Applies a z-order change to the selected annotation.
    pub fn arrange_selection(&mut self, arrange: Arrange) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        if !self.scene.can_arrange(id, arrange) {
            log::debug!("{:?} on {id} is a no-op", arrange);
            return false;
        }

        self.history.push(self.scene.annotations());
        self.scene.arrange(id, arrange);
        self.needs_redraw = true;
        true
    }

    pub fn undo(&mut self) -> bool {
        let Some(restored) = self.history.undo(self.scene.annotations()) else {
            return false;
        };
        self.scene.replace_all(restored);
        self.after_restore();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(restored) = self.history.redo(self.scene.annotations()) else {
            return false;
        };
        self.scene.replace_all(restored);
        self.after_restore();
        true
    }

    fn after_restore(&mut self) {
        self.resolve_selection();
        self.reset_hover();
        self.needs_redraw = true;
    }

    /// Clipboard content as a JSON payload for the system pasteboard.
    pub fn export_clipboard(&self) -> Result<Option<String>, SnapshotError> {
        self.clipboard.export()
    }

    /// Loads the clipboard from a system pasteboard payload.
    pub fn import_clipboard(&mut self, payload: &str) -> Result<(), SnapshotError> {
        self.clipboard.import(payload)
    }
}
