//! Input handling and the interaction state machine.
//!
//! This module translates host pointer and keyboard events into editor
//! actions. It owns the mode, selection, hover, and gesture state, and
//! decides on every event which concern owns the cursor and the mutation.

pub mod cursor;
pub mod events;
pub mod mode;
pub mod modifiers;
pub mod state;

pub use cursor::CursorIntent;
pub use events::{Key, MouseButton};
pub use mode::{Mode, ModeState};
pub use modifiers::Modifiers;
pub use state::{AnnotationStyle, ContextMenuRequest, DrawingState, InputState, RegionCapture};
