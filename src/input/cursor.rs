//! Abstract cursor classification for the host to materialize.

use crate::draw::Handle;

/// Cursor the host should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorIntent {
    /// Default arrow pointer
    Pointer,
    /// Hovering a body that can be dragged
    OpenHand,
    /// Dragging a body
    ClosedHand,
    /// Top-left / bottom-right corners
    ResizeDiagonalNwSe,
    /// Top-right / bottom-left corners
    ResizeDiagonalNeSw,
    ResizeVertical,
    ResizeHorizontal,
    /// Arrow endpoints and drawing gestures
    Crosshair,
    /// Crosshair annotated with live coordinates
    CoordinateReadout,
}

/// Cursor for a handle; `dragging` only affects the body.
pub fn intent_for_handle(handle: Handle, dragging: bool) -> CursorIntent {
    match handle {
        Handle::Body if dragging => CursorIntent::ClosedHand,
        Handle::Body => CursorIntent::OpenHand,
        Handle::TopLeft | Handle::BottomRight => CursorIntent::ResizeDiagonalNwSe,
        Handle::TopRight | Handle::BottomLeft => CursorIntent::ResizeDiagonalNeSw,
        Handle::Top | Handle::Bottom => CursorIntent::ResizeVertical,
        Handle::Left | Handle::Right => CursorIntent::ResizeHorizontal,
        Handle::Start | Handle::End => CursorIntent::Crosshair,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_pairs_share_cursors() {
        assert_eq!(
            intent_for_handle(Handle::TopLeft, false),
            intent_for_handle(Handle::BottomRight, false)
        );
        assert_eq!(
            intent_for_handle(Handle::TopRight, true),
            intent_for_handle(Handle::BottomLeft, false)
        );
        assert_ne!(
            intent_for_handle(Handle::TopLeft, false),
            intent_for_handle(Handle::TopRight, false)
        );
    }

    #[test]
    fn body_cursor_follows_drag_state() {
        assert_eq!(intent_for_handle(Handle::Body, false), CursorIntent::OpenHand);
        assert_eq!(intent_for_handle(Handle::Body, true), CursorIntent::ClosedHand);
        assert_eq!(intent_for_handle(Handle::End, false), CursorIntent::Crosshair);
    }
}
