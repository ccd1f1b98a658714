use crate::draw::{
    Annotation, AnnotationKind, ArrowAnnotation, Handle, RectangleAnnotation, TextAnnotation,
};
use crate::input::cursor::{CursorIntent, intent_for_handle};
use crate::input::{events::MouseButton, mode::Mode};
use crate::transform::{self, DragOrigin};
use crate::util::{Point, Rect};

use super::{ContextMenuRequest, DrawingState, InputState, RegionCapture};

impl InputState {
    /// Processes a pointer button press.
    ///
    /// # Behavior
    /// - Primary in `select`: grabs a resize handle of the selected annotation
    ///   if hit, otherwise the topmost hit annotation; a miss clears the
    ///   selection
    /// - Primary in `regionSelect`: starts the capture rectangle
    /// - Primary in a drawing mode: clears the selection and starts a draw
    /// - Primary during text entry: moves the text anchor
    /// - Secondary: targets the annotation under the pointer for a context menu
    pub fn on_pointer_press(&mut self, button: MouseButton, point: Point) {
        self.pointer = Some(point);

        match button {
            MouseButton::Primary => {
                if let DrawingState::TextInput { position, .. } = &mut self.state {
                    *position = point;
                    self.needs_redraw = true;
                    return;
                }
                if !matches!(self.state, DrawingState::Idle) {
                    return;
                }

                match self.mode() {
                    Mode::Select => self.begin_annotation_drag(point),
                    Mode::RegionSelect => {
                        self.reset_hover();
                        self.state = DrawingState::RegionSelecting {
                            start: point,
                            current: point,
                        };
                        self.cursor = CursorIntent::CoordinateReadout;
                        self.needs_redraw = true;
                    }
                    mode => {
                        let Some(kind) = mode.draws() else {
                            return;
                        };
                        // Drawing and selection are mutually exclusive.
                        self.clear_selection();
                        self.reset_hover();
                        self.state = DrawingState::Drawing {
                            kind,
                            start: point,
                            current: point,
                        };
                        self.cursor = CursorIntent::Crosshair;
                        self.needs_redraw = true;
                    }
                }
            }
            MouseButton::Secondary => self.open_context_menu(point),
            MouseButton::Middle => {}
        }
    }

    fn begin_annotation_drag(&mut self, point: Point) {
        // Only handles jump the z-order; bodies stay topmost-first.
        let selected_hit = self.selected_annotation().and_then(|annotation| {
            annotation
                .hit_test(point)
                .filter(|handle| *handle != Handle::Body)
                .map(|handle| (annotation.id(), handle))
        });
        let hit = selected_hit.or_else(|| self.scene.hit_test(point));

        let Some((id, handle)) = hit else {
            self.clear_selection();
            return;
        };
        let Some(annotation) = self.scene.get(id) else {
            return;
        };

        let original = DragOrigin::capture(annotation);
        self.set_selection(Some(id));
        self.reset_hover();
        self.state = DrawingState::Dragging {
            id,
            handle,
            origin: point,
            original,
            cleared_redo: None,
        };
        self.cursor = intent_for_handle(handle, true);
        self.needs_redraw = true;
        log::debug!("Dragging {id} by {:?}", handle);
    }

    fn open_context_menu(&mut self, point: Point) {
        if self.is_pointer_gesture_active() {
            return;
        }
        // Coarse targeting: visual bounds, not the strict hit-test.
        if let Some(target) = self.scene.context_target(point) {
            self.set_selection(Some(target));
            self.set_context_menu_request(ContextMenuRequest { target, point });
        }
    }

    /// Processes pointer motion with the primary button held.
    ///
    /// Updates only the active gesture; hover state is left untouched.
    pub fn on_pointer_drag(&mut self, point: Point) {
        self.pointer = Some(point);

        match &mut self.state {
            DrawingState::Dragging {
                id,
                handle,
                origin,
                original,
                cleared_redo,
            } => {
                let delta = Point::new(point.x - origin.x, point.y - origin.y);
                if cleared_redo.is_none() {
                    if delta == Point::default() {
                        return;
                    }
                    // First geometry change: record the pre-drag scene.
                    *cleared_redo = Some(self.history.push_revertible(self.scene.annotations()));
                }
                if let Some(annotation) = self.scene.get_mut(*id) {
                    transform::apply_drag(annotation, original, *handle, delta);
                }
            }
            DrawingState::Drawing { current, .. }
            | DrawingState::RegionSelecting { current, .. } => {
                *current = point;
            }
            DrawingState::Idle | DrawingState::TextInput { .. } => return,
        }

        self.needs_redraw = true;
    }

    /// Processes a pointer button release, finalizing the active gesture.
    pub fn on_pointer_release(&mut self, button: MouseButton, point: Point) {
        if button != MouseButton::Primary {
            return;
        }

        if self.is_pointer_gesture_active() {
            self.on_pointer_drag(point);
        }

        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Dragging { id, .. } => {
                // Selection and handles stay as they are.
                log::debug!("Finished dragging {id}");
            }
            DrawingState::Drawing { kind, start, .. } => self.finish_draw(kind, start, point),
            DrawingState::RegionSelecting { start, .. } => self.finish_region(start, point),
            other => {
                self.state = other;
                return;
            }
        }

        self.needs_redraw = true;
        self.update_hover(point);
    }

    fn finish_draw(&mut self, kind: AnnotationKind, start: Point, end: Point) {
        let annotation: Option<Annotation> = match kind {
            AnnotationKind::Rectangle => {
                let rect = Rect::from_points(start, end);
                let min = self.interaction.min_rectangle_size;
                (rect.width > min && rect.height > min).then(|| {
                    RectangleAnnotation::new(rect, self.style.color, self.style.stroke_width).into()
                })
            }
            AnnotationKind::Arrow => {
                let min = self.interaction.min_arrow_length;
                (start.distance_to(end) > min).then(|| {
                    ArrowAnnotation::new(start, end, self.style.color, self.style.stroke_width)
                        .with_head(self.style.arrow_head_length, self.style.arrow_head_angle)
                        .into()
                })
            }
            AnnotationKind::Text => {
                // Text is placed at the press point and typed in afterwards.
                self.state = DrawingState::TextInput {
                    position: start,
                    buffer: String::new(),
                };
                return;
            }
        };

        match annotation {
            Some(annotation) => {
                log::debug!("Adding {:?} {}", kind, annotation.id());
                self.history.push(self.scene.annotations());
                self.scene.push(annotation);
            }
            None => log::debug!("Discarding {:?} below minimum size", kind),
        }

        // A finished draw is never auto-selected.
        self.modes.set(Mode::Select);
    }

    fn finish_region(&mut self, start: Point, end: Point) {
        let rect = Rect::from_points(start, end);
        let min = self.interaction.min_region_size;
        if rect.width > min && rect.height > min {
            log::debug!(
                "Region selected: {:.0}x{:.0} at ({:.0}, {:.0})",
                rect.width,
                rect.height,
                rect.x,
                rect.y
            );
            self.set_region_capture(RegionCapture {
                rect,
                frame: self.frame,
                annotations: self.scene.annotations().to_vec(),
            });
        } else {
            log::debug!("Region selection too small; ignoring");
        }
        self.modes.set(Mode::Select);
    }

    /// Commits the text being typed; an empty buffer creates nothing.
    pub(super) fn commit_text(&mut self) {
        let DrawingState::TextInput { position, buffer } =
            std::mem::replace(&mut self.state, DrawingState::Idle)
        else {
            return;
        };

        if !buffer.is_empty() {
            let mut text = TextAnnotation::new(buffer, position, self.style.font_size, self.style.color);
            if let Some(background) = self.style.text_background {
                text = text.with_background(background, self.style.text_background_padding);
            }
            let annotation = Annotation::from(text);
            log::debug!("Adding text {}", annotation.id());
            self.history.push(self.scene.annotations());
            self.scene.push(annotation);
        }

        self.modes.set(Mode::Select);
        self.needs_redraw = true;
        self.refresh_cursor();
    }

    /// Cancels the active gesture or text entry; returns `false` if none was active.
    ///
    /// An annotation drag snaps back to its pre-drag geometry; its history
    /// entry is dropped and the redo stack it cleared comes back.
    pub fn cancel_gesture(&mut self) -> bool {
        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Idle => return false,
            DrawingState::Dragging {
                id,
                original,
                cleared_redo,
                ..
            } => {
                if let Some(annotation) = self.scene.get_mut(id) {
                    transform::apply_drag(annotation, &original, Handle::Body, Point::default());
                }
                if let Some(redo) = cleared_redo {
                    self.history.retract(redo);
                }
                log::debug!("Cancelled drag of {id}");
            }
            DrawingState::Drawing { kind, .. } => log::debug!("Cancelled {:?} draw", kind),
            DrawingState::RegionSelecting { .. } => log::debug!("Cancelled region selection"),
            DrawingState::TextInput { .. } => log::debug!("Cancelled text entry"),
        }

        self.needs_redraw = true;
        self.refresh_cursor();
        true
    }
}
