mod actions;
mod core;
mod edit;
mod hover;
mod mouse;
mod render;

pub use self::core::{AnnotationStyle, ContextMenuRequest, DrawingState, InputState, RegionCapture};
