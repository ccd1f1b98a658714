//! Annotation model, scene container, and renderer-facing drawing seam.
//!
//! This module defines the core data types used for region annotation:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Annotation`]: rectangle, arrow, and text shapes with hit-testing
//! - [`AnnotationSnapshot`]: immutable records for undo/redo and the clipboard
//! - [`Scene`]: ordered container holding the z-order
//! - [`Canvas`]: the primitives a host renderer implements

pub mod annotation;
pub mod color;
pub mod font;
pub mod render;
pub mod scene;
pub mod snapshot;

pub use annotation::{
    Annotation, AnnotationId, AnnotationKind, AnnotationShape, ArrowAnnotation, Handle,
    RectangleAnnotation, TextAnnotation,
};
pub use color::Color;
pub use font::GlyphMetrics;
pub use render::{Canvas, render_annotations, render_selection_handles};
pub use scene::{Arrange, Scene};
pub use snapshot::{AnnotationSnapshot, SnapshotError};
