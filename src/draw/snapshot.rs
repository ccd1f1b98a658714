//! Immutable annotation records used by undo/redo and the clipboard.

use super::annotation::{
    Annotation, AnnotationId, ArrowAnnotation, RectangleAnnotation, TextAnnotation,
};
use super::color::Color;
use crate::util::{Point, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while decoding a snapshot payload.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Complete state of one annotation, identifier included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnotationSnapshot {
    Rectangle {
        id: AnnotationId,
        rect: Rect,
        color: Color,
        stroke_width: f64,
    },
    Arrow {
        id: AnnotationId,
        start: Point,
        end: Point,
        color: Color,
        stroke_width: f64,
        head_length: f64,
        head_angle: f64,
    },
    Text {
        id: AnnotationId,
        text: String,
        position: Point,
        font_size: f64,
        color: Color,
        background: Option<Color>,
        background_padding: f64,
        stroke_width: f64,
    },
}

impl AnnotationSnapshot {
    pub fn capture(annotation: &Annotation) -> Self {
        match annotation {
            Annotation::Rectangle(rect) => AnnotationSnapshot::Rectangle {
                id: annotation.id(),
                rect: rect.rect,
                color: rect.color,
                stroke_width: rect.stroke_width,
            },
            Annotation::Arrow(arrow) => AnnotationSnapshot::Arrow {
                id: annotation.id(),
                start: arrow.start,
                end: arrow.end,
                color: arrow.color,
                stroke_width: arrow.stroke_width,
                head_length: arrow.head_length,
                head_angle: arrow.head_angle,
            },
            Annotation::Text(text) => AnnotationSnapshot::Text {
                id: annotation.id(),
                text: text.text.clone(),
                position: text.position,
                font_size: text.font_size,
                color: text.color,
                background: text.background,
                background_padding: text.background_padding,
                stroke_width: text.stroke_width,
            },
        }
    }

    pub fn id(&self) -> AnnotationId {
        match self {
            AnnotationSnapshot::Rectangle { id, .. }
            | AnnotationSnapshot::Arrow { id, .. }
            | AnnotationSnapshot::Text { id, .. } => *id,
        }
    }

    /// Rebuilds the annotation exactly, identifier included.
    pub fn restore(&self) -> Annotation {
        self.build(self.id())
    }

    /// Builds a copy under a freshly minted identifier, shifted by `(dx, dy)`.
    pub fn instantiate_copy(&self, dx: f64, dy: f64) -> Annotation {
        let mut annotation = self.build(AnnotationId::new());
        annotation.translate(dx, dy);
        annotation
    }

    /// Point paste offsets are measured from.
    pub fn reference_point(&self) -> Point {
        self.restore().shape().reference_point()
    }

    /// Point that lands on the target of a paste-at-point.
    pub fn paste_anchor(&self) -> Point {
        self.restore().shape().paste_anchor()
    }

    /// Encodes the snapshot for the host's system pasteboard.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a pasteboard payload; unknown `kind` tags are rejected.
    pub fn from_json(payload: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(payload)?)
    }

    fn build(&self, id: AnnotationId) -> Annotation {
        match self.clone() {
            AnnotationSnapshot::Rectangle {
                rect,
                color,
                stroke_width,
                ..
            } => RectangleAnnotation::with_id(id, rect, color, stroke_width).into(),
            AnnotationSnapshot::Arrow {
                start,
                end,
                color,
                stroke_width,
                head_length,
                head_angle,
                ..
            } => ArrowAnnotation::with_id(id, start, end, color, stroke_width, head_length, head_angle)
                .into(),
            AnnotationSnapshot::Text {
                text,
                position,
                font_size,
                color,
                background,
                background_padding,
                stroke_width,
                ..
            } => TextAnnotation::with_id(
                id,
                text,
                position,
                font_size,
                color,
                background,
                background_padding,
                stroke_width,
            )
            .into(),
        }
    }
}

/// Captures an ordered scene as snapshots.
pub fn capture_all(annotations: &[Annotation]) -> Vec<AnnotationSnapshot> {
    annotations.iter().map(AnnotationSnapshot::capture).collect()
}

/// Rebuilds concrete annotations from snapshots, preserving order and identifiers.
pub fn restore_all(snapshots: &[AnnotationSnapshot]) -> Vec<Annotation> {
    snapshots.iter().map(AnnotationSnapshot::restore).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, WHITE};

    #[test]
    fn restore_preserves_identifier_and_geometry() {
        let original = Annotation::from(
            TextAnnotation::new("hi".into(), Point::new(3.0, 4.0), 18.0, WHITE)
                .with_background(BLUE, 6.0),
        );
        let restored = AnnotationSnapshot::capture(&original).restore();
        assert_eq!(restored, original);
    }

    #[test]
    fn copies_get_new_identifier_and_offset() {
        let original = Annotation::from(RectangleAnnotation::new(
            Rect::new(100.0, 100.0, 50.0, 50.0),
            BLUE,
            2.0,
        ));
        let snapshot = AnnotationSnapshot::capture(&original);
        let copy = snapshot.instantiate_copy(20.0, 20.0);
        assert_ne!(copy.id(), original.id());
        assert_eq!(copy.bounds(), Rect::new(120.0, 120.0, 50.0, 50.0));
    }

    #[test]
    fn pasteboard_payload_is_tagged_by_kind() {
        let arrow = Annotation::from(ArrowAnnotation::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            BLUE,
            2.0,
        ));
        let snapshot = AnnotationSnapshot::capture(&arrow);
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"kind\":\"arrow\""));
        assert_eq!(AnnotationSnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = AnnotationSnapshot::from_json(r#"{"kind":"ellipse"}"#).unwrap_err();
        assert!(err.to_string().contains("malformed snapshot payload"));
    }
}
