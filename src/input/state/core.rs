//! Interaction state machine: selection, gestures, and outbound requests.

use crate::config::{Action, Config, InteractionConfig, KeyBinding};
use crate::draw::{Annotation, AnnotationId, AnnotationKind, Color, Handle, Scene, color};
use crate::history::{Clipboard, History, SceneSnapshot};
use crate::input::cursor::CursorIntent;
use crate::input::mode::{Mode, ModeState};
use crate::input::modifiers::Modifiers;
use crate::readout::ReadoutCursor;
use crate::transform::DragOrigin;
use crate::util::{Point, Rect};
use std::collections::HashMap;

/// Pointer gesture or text entry currently in progress.
///
/// At most one gesture is active; each updates only its own fields.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// No gesture in progress
    Idle,
    /// Moving or resizing an existing annotation
    Dragging {
        id: AnnotationId,
        handle: Handle,
        /// Where the pointer went down
        origin: Point,
        /// Geometry before the drag started
        original: DragOrigin,
        /// Redo stack cleared by the pre-drag history push; `None` until the
        /// first geometry change pushes it
        cleared_redo: Option<Vec<SceneSnapshot>>,
    },
    /// Drawing a new annotation
    Drawing {
        kind: AnnotationKind,
        start: Point,
        current: Point,
    },
    /// Dragging out the capture rectangle
    RegionSelecting { start: Point, current: Point },
    /// Typing a text annotation anchored at `position`
    TextInput { position: Point, buffer: String },
}

/// Style applied to newly created annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationStyle {
    pub color: Color,
    pub stroke_width: f64,
    pub font_size: f64,
    /// Background behind text annotations, if enabled
    pub text_background: Option<Color>,
    pub text_background_padding: f64,
    pub arrow_head_length: f64,
    pub arrow_head_angle: f64,
}

impl AnnotationStyle {
    pub fn from_config(config: &Config) -> Self {
        Self {
            color: config.drawing.default_color.to_color(),
            stroke_width: config.drawing.stroke_width,
            font_size: config.drawing.font_size,
            text_background: config
                .drawing
                .text_background_enabled
                .then_some(color::TEXT_BACKGROUND),
            text_background_padding: config.drawing.text_background_padding,
            arrow_head_length: config.arrow.length,
            arrow_head_angle: config.arrow.angle_degrees,
        }
    }
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Completed region selection handed to the capture finalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionCapture {
    pub rect: Rect,
    /// Full-screen frame the region was selected from
    pub frame: Rect,
    pub annotations: Vec<Annotation>,
}

/// Secondary press on an annotation; the host shows its context menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenuRequest {
    pub target: AnnotationId,
    pub point: Point,
}

/// Main interaction state.
///
/// Owns the scene, history, and clipboard, and processes pointer and keyboard
/// events to decide which concern owns each event. Hosts read the public
/// fields and accessors to render, and drain outbound requests with the
/// `take_*` methods.
pub struct InputState {
    /// Annotations in z-order
    pub(crate) scene: Scene,
    pub(crate) history: History,
    pub(crate) clipboard: Clipboard,
    pub(crate) modes: ModeState,
    /// Selected annotation; resolved against the scene on each use
    pub(crate) selected: Option<AnnotationId>,
    /// Set together with `selected`
    pub(crate) has_selection_handles: bool,
    /// Annotation whose hover bounds contain the pointer
    pub(crate) hover_target: Option<AnnotationId>,
    /// Handle of the selected annotation under the pointer, if any
    pub(crate) hovered_selected_handle: Option<Handle>,
    /// Last known pointer position; `None` while outside the surface
    pub(crate) pointer: Option<Point>,
    pub(crate) cursor: CursorIntent,
    /// Latest coordinate readout, refreshed by the readout tick
    pub(crate) readout: Option<ReadoutCursor>,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Current gesture state machine
    pub state: DrawingState,
    /// Style for new annotations
    pub style: AnnotationStyle,
    /// Paste offset and minimum draw sizes
    pub interaction: InteractionConfig,
    /// Full-screen frame (set by the host after configuration)
    pub frame: Rect,
    /// Whether the user asked to close the overlay
    pub should_exit: bool,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    /// Keybinding action map for lookup
    action_map: HashMap<KeyBinding, Action>,
    pending_region: Option<RegionCapture>,
    pending_context_menu: Option<ContextMenuRequest>,
}

impl InputState {
    /// Creates a new InputState with specified defaults.
    ///
    /// The frame defaults to empty and should be updated by the host
    /// (see [`update_frame`](Self::update_frame)).
    pub fn with_defaults(
        style: AnnotationStyle,
        interaction: InteractionConfig,
        action_map: HashMap<KeyBinding, Action>,
    ) -> Self {
        Self {
            scene: Scene::new(),
            history: History::new(),
            clipboard: Clipboard::new(),
            modes: ModeState::new(),
            selected: None,
            has_selection_handles: false,
            hover_target: None,
            hovered_selected_handle: None,
            pointer: None,
            cursor: CursorIntent::Pointer,
            readout: None,
            modifiers: Modifiers::new(),
            state: DrawingState::Idle,
            style,
            interaction,
            frame: Rect::default(),
            should_exit: false,
            needs_redraw: true,
            action_map,
            pending_region: None,
            pending_context_menu: None,
        }
    }

    /// Builds the state from a loaded config.
    ///
    /// # Errors
    /// Returns the keybinding error if the configured bindings are invalid.
    pub fn from_config(config: &Config) -> Result<Self, String> {
        let action_map = config.keybindings.build_action_map()?;
        Ok(Self::with_defaults(
            AnnotationStyle::from_config(config),
            config.interaction.clone(),
            action_map,
        ))
    }

    /// Updates the full-screen frame after host configuration.
    pub fn update_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.scene.annotations()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn mode(&self) -> Mode {
        self.modes.current()
    }

    /// Mode Tab returns to from region select.
    pub fn remembered_mode(&self) -> Mode {
        self.modes.remembered()
    }

    pub fn cursor_intent(&self) -> CursorIntent {
        self.cursor
    }

    pub fn hover_target(&self) -> Option<AnnotationId> {
        self.hover_target
    }

    /// Whether the pointer is over a handle of the selected annotation.
    pub fn is_hovering_selected_handle(&self) -> bool {
        self.hovered_selected_handle.is_some()
    }

    pub fn pointer_position(&self) -> Option<Point> {
        self.pointer
    }

    pub fn readout(&self) -> Option<&ReadoutCursor> {
        self.readout.as_ref()
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn selected_id(&self) -> Option<AnnotationId> {
        self.selected
    }

    /// The selected annotation, looked up in the scene.
    pub fn selected_annotation(&self) -> Option<&Annotation> {
        self.selected.and_then(|id| self.scene.get(id))
    }

    pub fn has_selection_handles(&self) -> bool {
        self.has_selection_handles
    }

    pub(crate) fn set_selection(&mut self, id: Option<AnnotationId>) {
        if self.selected != id {
            self.needs_redraw = true;
        }
        self.selected = id;
        self.has_selection_handles = id.is_some();
    }

    pub(crate) fn clear_selection(&mut self) {
        self.set_selection(None);
    }

    /// Drops the selection if its annotation no longer exists.
    pub(crate) fn resolve_selection(&mut self) {
        if let Some(id) = self.selected {
            if self.scene.get(id).is_none() {
                log::debug!("Selected annotation {id} gone after restore; clearing selection");
                self.clear_selection();
            }
        }
    }

    // ------------------------------------------------------------------
    // Gesture queries
    // ------------------------------------------------------------------

    pub fn is_annotation_dragging(&self) -> bool {
        matches!(self.state, DrawingState::Dragging { .. })
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Drawing { .. })
    }

    pub fn is_region_selecting(&self) -> bool {
        matches!(self.state, DrawingState::RegionSelecting { .. })
    }

    pub fn is_text_input(&self) -> bool {
        matches!(self.state, DrawingState::TextInput { .. })
    }

    /// Any pointer-held gesture: annotation drag, draw, or region drag.
    pub fn is_pointer_gesture_active(&self) -> bool {
        self.is_annotation_dragging() || self.is_drawing() || self.is_region_selecting()
    }

    /// Clears hover state when a different kind of action begins.
    pub(crate) fn reset_hover(&mut self) {
        if self.hover_target.is_some() || self.hovered_selected_handle.is_some() {
            self.needs_redraw = true;
        }
        self.hover_target = None;
        self.hovered_selected_handle = None;
    }

    // ------------------------------------------------------------------
    // Keybindings and outbound requests
    // ------------------------------------------------------------------

    /// Look up an action for the given key name and current modifiers.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        self.action_map
            .iter()
            .find(|(binding, _)| {
                binding.matches(
                    key_str,
                    self.modifiers.ctrl,
                    self.modifiers.shift,
                    self.modifiers.alt,
                )
            })
            .map(|(_, action)| *action)
    }

    /// Takes and clears a completed region selection.
    pub fn take_region_capture(&mut self) -> Option<RegionCapture> {
        self.pending_region.take()
    }

    pub(super) fn set_region_capture(&mut self, capture: RegionCapture) {
        self.pending_region = Some(capture);
    }

    /// Takes and clears a pending context menu request.
    pub fn take_context_menu_request(&mut self) -> Option<ContextMenuRequest> {
        self.pending_context_menu.take()
    }

    pub(super) fn set_context_menu_request(&mut self, request: ContextMenuRequest) {
        self.pending_context_menu = Some(request);
    }
}
