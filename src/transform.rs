//! Drag transforms: active handle + pointer delta → new annotation geometry.
//!
//! Transforms always start from the geometry captured at drag start, so
//! repeated motion events never accumulate rounding drift.

use crate::draw::{Annotation, AnnotationShape, Handle};
use crate::util::{Point, Rect};

/// Smallest font size a text resize may produce.
pub const MIN_TEXT_FONT_SIZE: f64 = 8.0;

/// Geometry captured when a drag begins.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOrigin {
    Rect(Rect),
    Arrow { start: Point, end: Point },
    Text {
        position: Point,
        font_size: f64,
        bounds: Rect,
    },
}

impl DragOrigin {
    pub fn capture(annotation: &Annotation) -> Self {
        match annotation {
            Annotation::Rectangle(rect) => DragOrigin::Rect(rect.rect),
            Annotation::Arrow(arrow) => DragOrigin::Arrow {
                start: arrow.start,
                end: arrow.end,
            },
            Annotation::Text(text) => DragOrigin::Text {
                position: text.position,
                font_size: text.font_size,
                bounds: text.bounds(),
            },
        }
    }
}

/// Rewrites `annotation`'s geometry for a drag of `handle` by `delta` from `origin`.
///
/// Mismatched origin/annotation pairs are ignored.
pub fn apply_drag(annotation: &mut Annotation, origin: &DragOrigin, handle: Handle, delta: Point) {
    match (annotation, origin) {
        (Annotation::Rectangle(rect), DragOrigin::Rect(original)) => {
            rect.rect = resize_rect(*original, handle, delta);
        }
        (Annotation::Arrow(arrow), DragOrigin::Arrow { start, end }) => match handle {
            Handle::Start => {
                arrow.start = start.offset(delta.x, delta.y);
                arrow.end = *end;
            }
            Handle::End => {
                arrow.start = *start;
                arrow.end = end.offset(delta.x, delta.y);
            }
            _ => {
                arrow.start = start.offset(delta.x, delta.y);
                arrow.end = end.offset(delta.x, delta.y);
            }
        },
        (
            Annotation::Text(text),
            DragOrigin::Text {
                position,
                font_size,
                bounds,
            },
        ) => {
            if handle == Handle::Body {
                text.position = position.offset(delta.x, delta.y);
                text.font_size = *font_size;
            } else if let Some((position, font_size)) =
                scale_text(*position, *font_size, *bounds, handle, delta)
            {
                text.position = position;
                text.font_size = font_size;
            }
        }
        (annotation, origin) => {
            log::warn!(
                "Ignoring drag: origin {:?} does not match {:?}",
                origin,
                annotation.kind()
            );
        }
    }
}

/// Moves the grabbed corner or edge while the opposite side stays fixed.
///
/// Dragging past the fixed side flips the rectangle rather than producing a
/// negative extent.
pub fn resize_rect(original: Rect, handle: Handle, delta: Point) -> Rect {
    let (mut min_x, mut min_y) = (original.min_x(), original.min_y());
    let (mut max_x, mut max_y) = (original.max_x(), original.max_y());

    match handle {
        Handle::Body => return original.translated(delta.x, delta.y),
        Handle::BottomLeft => {
            min_x += delta.x;
            min_y += delta.y;
        }
        Handle::BottomRight => {
            max_x += delta.x;
            min_y += delta.y;
        }
        Handle::TopLeft => {
            min_x += delta.x;
            max_y += delta.y;
        }
        Handle::TopRight => {
            max_x += delta.x;
            max_y += delta.y;
        }
        Handle::Top => max_y += delta.y,
        Handle::Bottom => min_y += delta.y,
        Handle::Left => min_x += delta.x,
        Handle::Right => max_x += delta.x,
        Handle::Start | Handle::End => return original,
    }

    Rect::from_points(Point::new(min_x, min_y), Point::new(max_x, max_y))
}

/// Corner that stays put while `handle` is dragged.
pub fn opposite_corner(bounds: Rect, handle: Handle) -> Option<Point> {
    match handle {
        Handle::BottomLeft => Some(bounds.top_right()),
        Handle::BottomRight => Some(bounds.top_left()),
        Handle::TopLeft => Some(bounds.bottom_right()),
        Handle::TopRight => Some(bounds.bottom_left()),
        Handle::Top => Some(bounds.bottom_left()),
        Handle::Bottom => Some(bounds.top_left()),
        _ => None,
    }
}

/// Text scales uniformly with the dragged height; the opposite corner stays fixed.
fn scale_text(
    position: Point,
    font_size: f64,
    bounds: Rect,
    handle: Handle,
    delta: Point,
) -> Option<(Point, f64)> {
    let fixed = opposite_corner(bounds, handle)?;
    if bounds.height <= 0.0 {
        return None;
    }

    let resized = resize_rect(bounds, handle, delta);
    let scale = resized.height / bounds.height;
    let new_font_size = (font_size * scale).max(MIN_TEXT_FONT_SIZE);
    let scale = new_font_size / font_size;

    let width = bounds.width * scale;
    let height = bounds.height * scale;
    let fixed_is_left = fixed.x <= bounds.min_x();
    let fixed_is_bottom = fixed.y <= bounds.min_y();
    let min_x = if fixed_is_left { fixed.x } else { fixed.x - width };
    let min_y = if fixed_is_bottom { fixed.y } else { fixed.y - height };

    // Keep the padding between the bounds and the text anchor proportional.
    let inset_x = (position.x - bounds.min_x()) * scale;
    let inset_y = (position.y - bounds.min_y()) * scale;
    Some((Point::new(min_x + inset_x, min_y + inset_y), new_font_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{RED, WHITE};
    use crate::draw::{ArrowAnnotation, RectangleAnnotation, TextAnnotation};

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Annotation {
        RectangleAnnotation::new(Rect::new(x, y, w, h), RED, 2.0).into()
    }

    fn drag(annotation: &mut Annotation, handle: Handle, dx: f64, dy: f64) {
        let origin = DragOrigin::capture(annotation);
        apply_drag(annotation, &origin, handle, Point::new(dx, dy));
    }

    #[test]
    fn body_drag_translates_rectangle() {
        let mut annotation = rect(10.0, 10.0, 20.0, 20.0);
        drag(&mut annotation, Handle::Body, 5.0, -3.0);
        assert_eq!(annotation.bounds(), Rect::new(15.0, 7.0, 20.0, 20.0));
    }

    #[test]
    fn corner_drag_keeps_opposite_corner() {
        let mut annotation = rect(10.0, 10.0, 20.0, 20.0);
        drag(&mut annotation, Handle::TopRight, 10.0, 5.0);
        assert_eq!(annotation.bounds(), Rect::new(10.0, 10.0, 30.0, 25.0));

        let mut annotation = rect(10.0, 10.0, 20.0, 20.0);
        drag(&mut annotation, Handle::BottomLeft, -5.0, 4.0);
        assert_eq!(annotation.bounds(), Rect::new(5.0, 14.0, 25.0, 16.0));
    }

    #[test]
    fn edge_drag_changes_one_axis() {
        let original = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            resize_rect(original, Handle::Right, Point::new(5.0, 99.0)),
            Rect::new(0.0, 0.0, 15.0, 10.0)
        );
        assert_eq!(
            resize_rect(original, Handle::Bottom, Point::new(99.0, -4.0)),
            Rect::new(0.0, -4.0, 10.0, 14.0)
        );
    }

    #[test]
    fn dragging_past_fixed_side_flips() {
        let original = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            resize_rect(original, Handle::TopRight, Point::new(-15.0, 0.0)),
            Rect::new(-5.0, 0.0, 5.0, 10.0)
        );
    }

    #[test]
    fn repeated_motion_does_not_accumulate() {
        let mut annotation = rect(0.0, 0.0, 10.0, 10.0);
        let origin = DragOrigin::capture(&annotation);
        for step in 1..=5 {
            apply_drag(
                &mut annotation,
                &origin,
                Handle::Body,
                Point::new(step as f64, 0.0),
            );
        }
        assert_eq!(annotation.bounds(), Rect::new(5.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn arrow_endpoint_drag_moves_only_that_end() {
        let mut annotation: Annotation =
            ArrowAnnotation::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), RED, 2.0).into();
        drag(&mut annotation, Handle::End, 0.0, 50.0);
        let Annotation::Arrow(arrow) = &annotation else {
            panic!("expected arrow");
        };
        assert_eq!(arrow.start, Point::new(0.0, 0.0));
        assert_eq!(arrow.end, Point::new(100.0, 50.0));
    }

    #[test]
    fn text_corner_drag_scales_font() {
        let mut annotation: Annotation =
            TextAnnotation::new("abc".into(), Point::new(0.0, 0.0), 20.0, WHITE).into();
        let height = annotation.bounds().height;
        drag(&mut annotation, Handle::TopRight, 0.0, height);
        let Annotation::Text(text) = &annotation else {
            panic!("expected text");
        };
        assert!((text.font_size - 40.0).abs() < 1e-9);
        assert_eq!(text.position, Point::new(0.0, 0.0));
    }

    #[test]
    fn text_font_never_shrinks_below_minimum() {
        let mut annotation: Annotation =
            TextAnnotation::new("abc".into(), Point::new(0.0, 0.0), 20.0, WHITE).into();
        let height = annotation.bounds().height;
        drag(&mut annotation, Handle::TopRight, 0.0, -height + 0.5);
        let Annotation::Text(text) = &annotation else {
            panic!("expected text");
        };
        assert_eq!(text.font_size, MIN_TEXT_FONT_SIZE);
    }
}
