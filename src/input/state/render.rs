use crate::draw::{
    Annotation, AnnotationKind, ArrowAnnotation, Canvas, Color, Handle, RectangleAnnotation,
    TextAnnotation, color, render_annotations, render_selection_handles,
};
use crate::util::{Point, Rect};

use super::{DrawingState, InputState};

/// Outline color of the region being selected.
const REGION_COLOR: Color = Color::new(0.3, 0.6, 1.0, 0.9);
/// Color of selection handles.
const HANDLE_COLOR: Color = color::WHITE;

impl InputState {
    /// Returns the annotation currently being drawn for live preview.
    ///
    /// # Returns
    /// - `Some(Annotation)` while drawing a rectangle or arrow
    /// - `None` otherwise (text is previewed through [`text_preview`](Self::text_preview))
    pub fn provisional_annotation(&self) -> Option<Annotation> {
        let DrawingState::Drawing {
            kind,
            start,
            current,
        } = &self.state
        else {
            return None;
        };

        match kind {
            AnnotationKind::Rectangle => Some(
                RectangleAnnotation::new(
                    Rect::from_points(*start, *current),
                    self.style.color,
                    self.style.stroke_width,
                )
                .into(),
            ),
            AnnotationKind::Arrow => Some(
                ArrowAnnotation::new(*start, *current, self.style.color, self.style.stroke_width)
                    .with_head(self.style.arrow_head_length, self.style.arrow_head_angle)
                    .into(),
            ),
            AnnotationKind::Text => None,
        }
    }

    /// Text being typed, with a trailing caret.
    pub fn text_preview(&self) -> Option<TextAnnotation> {
        let DrawingState::TextInput { position, buffer } = &self.state else {
            return None;
        };
        let mut preview = buffer.clone();
        preview.push('_');
        let text = TextAnnotation::new(preview, *position, self.style.font_size, self.style.color);
        Some(match self.style.text_background {
            Some(background) => text.with_background(background, self.style.text_background_padding),
            None => text,
        })
    }

    /// Capture rectangle being dragged out, if any.
    pub fn region_rect(&self) -> Option<Rect> {
        match &self.state {
            DrawingState::RegionSelecting { start, current } => {
                Some(Rect::from_points(*start, *current))
            }
            _ => None,
        }
    }

    /// Instruction text for the current mode.
    pub fn mode_hint(&self) -> &'static str {
        self.mode().hint()
    }

    /// Handles to paint for the selection; empty without one.
    pub fn selection_handles(&self) -> Vec<(Handle, Point)> {
        if !self.has_selection_handles {
            return Vec::new();
        }
        self.selected_annotation()
            .map(Annotation::handle_points)
            .unwrap_or_default()
    }

    /// Paints the editor state in z-order: scene, live previews, region, handles, readout.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        render_annotations(canvas, self.scene.annotations());

        if let Some(annotation) = self.provisional_annotation() {
            annotation.draw(canvas);
        }
        if let Some(text) = self.text_preview() {
            Annotation::from(text).draw(canvas);
        }
        if let Some(rect) = self.region_rect() {
            canvas.fill_rect(rect, REGION_COLOR.with_alpha(0.15));
            canvas.stroke_rect(rect, REGION_COLOR, 2.0);
        }
        if self.has_selection_handles {
            if let Some(annotation) = self.selected_annotation() {
                render_selection_handles(canvas, annotation, HANDLE_COLOR);
            }
        }
        if let Some(readout) = &self.readout {
            canvas.fill_rect(readout.label_rect, color::TEXT_BACKGROUND);
            let baseline = Point::new(
                readout.label_rect.x + readout.padding,
                readout.label_rect.y + readout.padding,
            );
            canvas.draw_text(baseline, &readout.label, readout.font_size, color::WHITE);
        }
    }
}
