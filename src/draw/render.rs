//! Renderer seam: annotations describe themselves through [`Canvas`].
//!
//! Pixel output is the host's job. The host implements `Canvas` over its
//! graphics backend and calls the functions here to paint the scene.

use super::annotation::{Annotation, HANDLE_SIZE};
use super::color::Color;
use crate::util::{Point, Rect};

/// Drawing primitives a host renderer must provide.
pub trait Canvas {
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_line(&mut self, from: Point, to: Point, color: Color, width: f64);
    /// `origin` is the left end of the text baseline.
    fn draw_text(&mut self, origin: Point, text: &str, font_size: f64, color: Color);
}

/// Renders all annotations in order (first = bottom layer).
pub fn render_annotations(canvas: &mut dyn Canvas, annotations: &[Annotation]) {
    for annotation in annotations {
        annotation.draw(canvas);
    }
}

/// Paints the square grab handles of a selected annotation.
pub fn render_selection_handles(canvas: &mut dyn Canvas, annotation: &Annotation, color: Color) {
    for (_, point) in annotation.handle_points() {
        let square = Rect::centered_square(point, HANDLE_SIZE);
        canvas.fill_rect(square, color.with_alpha(0.35));
        canvas.stroke_rect(square, color, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::annotation::{ArrowAnnotation, RectangleAnnotation, TextAnnotation};
    use crate::draw::color::{BLACK, RED, WHITE};

    #[derive(Default)]
    struct Recorder {
        ops: Vec<String>,
    }

    impl Canvas for Recorder {
        fn stroke_rect(&mut self, rect: Rect, _color: Color, width: f64) {
            self.ops.push(format!("stroke_rect {} {} {}", rect.x, rect.y, width));
        }

        fn fill_rect(&mut self, rect: Rect, _color: Color) {
            self.ops.push(format!("fill_rect {} {}", rect.x, rect.y));
        }

        fn stroke_line(&mut self, from: Point, to: Point, _color: Color, _width: f64) {
            self.ops
                .push(format!("line {} {} {} {}", from.x, from.y, to.x, to.y));
        }

        fn draw_text(&mut self, _origin: Point, text: &str, _font_size: f64, _color: Color) {
            self.ops.push(format!("text {text}"));
        }
    }

    #[test]
    fn arrow_draws_shaft_and_two_wings() {
        let mut canvas = Recorder::default();
        let arrow = ArrowAnnotation::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), RED, 2.0);
        Annotation::from(arrow).draw(&mut canvas);
        assert_eq!(canvas.ops.len(), 3);
        assert_eq!(canvas.ops[0], "line 0 0 100 0");
    }

    #[test]
    fn text_background_paints_before_each_line() {
        let mut canvas = Recorder::default();
        let text = TextAnnotation::new("one\ntwo".into(), Point::new(0.0, 0.0), 10.0, WHITE)
            .with_background(BLACK, 4.0);
        Annotation::from(text).draw(&mut canvas);
        assert_eq!(canvas.ops, vec!["fill_rect -4 -4", "text one", "text two"]);
    }

    #[test]
    fn scene_renders_in_z_order() {
        let mut canvas = Recorder::default();
        let annotations = vec![
            Annotation::from(RectangleAnnotation::new(Rect::new(1.0, 1.0, 5.0, 5.0), RED, 2.0)),
            Annotation::from(RectangleAnnotation::new(Rect::new(9.0, 9.0, 5.0, 5.0), RED, 3.0)),
        ];
        render_annotations(&mut canvas, &annotations);
        assert_eq!(canvas.ops, vec!["stroke_rect 1 1 2", "stroke_rect 9 9 3"]);
    }

    #[test]
    fn selection_handles_cover_corners_and_edges() {
        let mut canvas = Recorder::default();
        let rect = Annotation::from(RectangleAnnotation::new(Rect::new(0.0, 0.0, 20.0, 20.0), RED, 2.0));
        render_selection_handles(&mut canvas, &rect, WHITE);
        assert_eq!(canvas.ops.len(), 16);
    }
}
