//! Hover arbitration and cursor derivation.
//!
//! Arbitration is suspended while any pointer gesture (annotation drag,
//! shape draw, region drag) is in progress; cursor callbacks during a
//! gesture report the gesture's cursor directly.

use crate::draw::Handle;
use crate::input::cursor::{CursorIntent, intent_for_handle};
use crate::input::mode::Mode;
use crate::readout::ReadoutBuilder;
use crate::util::Point;

use super::{DrawingState, InputState};

impl InputState {
    /// Processes pointer motion with no button held.
    pub fn on_pointer_move(&mut self, point: Point) {
        self.pointer = Some(point);
        self.update_hover(point);
    }

    /// Pointer entered the surface; returns the cursor to show.
    pub fn on_pointer_enter(&mut self, point: Point) -> CursorIntent {
        self.pointer = Some(point);
        if self.is_pointer_gesture_active() {
            self.cursor = self.gesture_cursor();
        } else {
            self.update_hover(point);
        }
        self.cursor
    }

    /// Pointer left the surface.
    pub fn on_pointer_exit(&mut self) {
        self.pointer = None;
        if !self.is_pointer_gesture_active() {
            self.reset_hover();
            self.cursor = self.derive_cursor();
        }
        if self.readout.take().is_some() {
            self.needs_redraw = true;
        }
    }

    /// Re-derives the cursor (e.g. after the host reset it); returns it.
    pub fn refresh_cursor(&mut self) -> CursorIntent {
        if self.is_pointer_gesture_active() {
            self.cursor = self.gesture_cursor();
        } else if let Some(point) = self.pointer {
            self.update_hover(point);
        } else {
            self.cursor = self.derive_cursor();
        }
        self.cursor
    }

    /// Decides which annotation (or selected handle) the pointer is over.
    ///
    /// Resize handles of the selected annotation win over every hover bound,
    /// including those of annotations stacked above it. Its body only counts
    /// when it is the topmost precise hit, matching what a press would grab.
    pub(crate) fn update_hover(&mut self, point: Point) {
        if self.is_pointer_gesture_active() {
            return;
        }

        let resize_handle = self
            .selected_annotation()
            .and_then(|annotation| annotation.hit_test(point))
            .filter(|handle| *handle != Handle::Body);
        let (handle, target) = match resize_handle {
            Some(handle) => (Some(handle), None),
            None => match self.scene.hit_test(point) {
                Some((id, handle)) if Some(id) == self.selected => (Some(handle), None),
                _ => (None, self.scene.hover_target(point)),
            },
        };

        if handle != self.hovered_selected_handle || target != self.hover_target {
            self.needs_redraw = true;
        }
        self.hovered_selected_handle = handle;
        self.hover_target = target;
        self.cursor = self.derive_cursor();
    }

    /// True only when no drag, draw, selected-handle hover, or annotation
    /// hover holds, and the editor is not in `select` mode.
    pub fn should_show_coordinate_readout(&self) -> bool {
        !self.is_annotation_dragging()
            && !self.is_drawing()
            && self.hovered_selected_handle.is_none()
            && self.hover_target.is_none()
            && self.mode() != Mode::Select
    }

    fn gesture_cursor(&self) -> CursorIntent {
        match &self.state {
            DrawingState::Dragging { handle, .. } => intent_for_handle(*handle, true),
            DrawingState::Drawing { .. } => CursorIntent::Crosshair,
            DrawingState::RegionSelecting { .. } => CursorIntent::CoordinateReadout,
            DrawingState::Idle | DrawingState::TextInput { .. } => self.derive_cursor(),
        }
    }

    fn derive_cursor(&self) -> CursorIntent {
        if self.is_pointer_gesture_active() {
            return self.gesture_cursor();
        }
        if let Some(handle) = self.hovered_selected_handle {
            return intent_for_handle(handle, false);
        }
        if self.hover_target.is_some() {
            return match self.mode() {
                Mode::Select => CursorIntent::OpenHand,
                _ => CursorIntent::Crosshair,
            };
        }
        if self.should_show_coordinate_readout() {
            CursorIntent::CoordinateReadout
        } else {
            CursorIntent::Pointer
        }
    }

    /// Readout tick: rebuilds the coordinate label when the guard allows it.
    ///
    /// Returns `true` if the readout changed.
    pub fn refresh_readout(&mut self, builder: &ReadoutBuilder) -> bool {
        let next = match self.pointer {
            Some(point) if self.should_show_coordinate_readout() => Some(builder.build(point)),
            _ => None,
        };

        if next == self.readout {
            return false;
        }
        self.readout = next;
        self.needs_redraw = true;
        true
    }
}
