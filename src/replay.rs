//! Headless event scripts.
//!
//! A script is a JSON document listing pointer and keyboard events. Running
//! it feeds every event through an [`InputState`] exactly as a host would and
//! reports the resulting scene, which makes whole interaction sequences
//! reproducible from the command line.
//!
//! ```json
//! {
//!   "events": [
//!     { "event": "key", "key": "R" },
//!     { "event": "press", "x": 10, "y": 10 },
//!     { "event": "drag", "x": 110, "y": 60 },
//!     { "event": "release", "x": 110, "y": 60 },
//!     { "event": "key", "key": "Ctrl+Z" }
//!   ]
//! }
//! ```

use crate::config::{Action, KeyBinding};
use crate::draw::{AnnotationId, AnnotationSnapshot, SnapshotError, snapshot};
use crate::input::{InputState, Key, Mode, MouseButton};
use crate::util::{Point, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to parse replay script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("event {index}: invalid key '{key}': {message}")]
    InvalidKey {
        index: usize,
        key: String,
        message: String,
    },

    #[error("event {index}: clipboard import failed: {source}")]
    Clipboard {
        index: usize,
        #[source]
        source: SnapshotError,
    },
}

/// One scripted input event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEvent {
    Press {
        x: f64,
        y: f64,
        #[serde(default)]
        button: MouseButton,
    },
    /// Motion with the primary button held
    Drag { x: f64, y: f64 },
    Release {
        x: f64,
        y: f64,
        #[serde(default)]
        button: MouseButton,
    },
    /// Motion with no button held
    Move { x: f64, y: f64 },
    Enter { x: f64, y: f64 },
    Exit,
    /// Key chord in keybinding syntax, e.g. `"Ctrl+Shift+Z"`
    Key { key: String },
    /// Types each character in turn; `\n` becomes Shift+Return
    Type { text: String },
    Action { action: Action },
    Mode { mode: Mode },
    PasteAt { x: f64, y: f64 },
    /// Loads a pasteboard payload into the clipboard
    ImportClipboard { payload: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    /// Full-screen frame; defaults to empty
    #[serde(default)]
    pub frame: Option<Rect>,
    pub events: Vec<ReplayEvent>,
}

/// State after a script ran to completion.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayOutcome {
    pub mode: Mode,
    pub selected: Option<AnnotationId>,
    pub annotations: Vec<AnnotationSnapshot>,
    /// Last completed region capture
    pub region: Option<Rect>,
    /// Target of the last context menu request
    pub context_target: Option<AnnotationId>,
    pub undo_depth: usize,
    pub redo_depth: usize,
    pub exit_requested: bool,
}

impl ReplayScript {
    pub fn from_json(payload: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Feeds every event through `state` and summarizes the result.
    pub fn run(&self, state: &mut InputState) -> Result<ReplayOutcome, ReplayError> {
        if let Some(frame) = self.frame {
            state.update_frame(frame);
        }

        let mut region = None;
        let mut context_target = None;

        for (index, event) in self.events.iter().enumerate() {
            apply_event(state, index, event)?;

            if let Some(capture) = state.take_region_capture() {
                log::info!(
                    "Region captured: {:.0}x{:.0} with {} annotations",
                    capture.rect.width,
                    capture.rect.height,
                    capture.annotations.len()
                );
                region = Some(capture.rect);
            }
            if let Some(request) = state.take_context_menu_request() {
                context_target = Some(request.target);
            }
            if state.should_exit {
                log::debug!("Exit requested at event {index}; stopping replay");
                break;
            }
        }

        Ok(ReplayOutcome {
            mode: state.mode(),
            selected: state.selected_id(),
            annotations: snapshot::capture_all(state.annotations()),
            region,
            context_target,
            undo_depth: state.history().undo_depth(),
            redo_depth: state.history().redo_depth(),
            exit_requested: state.should_exit,
        })
    }
}

fn apply_event(state: &mut InputState, index: usize, event: &ReplayEvent) -> Result<(), ReplayError> {
    match event {
        ReplayEvent::Press { x, y, button } => state.on_pointer_press(*button, Point::new(*x, *y)),
        ReplayEvent::Drag { x, y } => state.on_pointer_drag(Point::new(*x, *y)),
        ReplayEvent::Release { x, y, button } => {
            state.on_pointer_release(*button, Point::new(*x, *y))
        }
        ReplayEvent::Move { x, y } => state.on_pointer_move(Point::new(*x, *y)),
        ReplayEvent::Enter { x, y } => {
            state.on_pointer_enter(Point::new(*x, *y));
        }
        ReplayEvent::Exit => state.on_pointer_exit(),
        ReplayEvent::Key { key } => press_chord(state, index, key)?,
        ReplayEvent::Type { text } => {
            for c in text.chars() {
                match c {
                    '\n' => tap(state, &[Key::Shift], Key::Return),
                    ' ' => tap(state, &[], Key::Space),
                    c => tap(state, &[], Key::Char(c)),
                }
            }
        }
        ReplayEvent::Action { action } => state.handle_action(*action),
        ReplayEvent::Mode { mode } => state.set_mode(*mode),
        ReplayEvent::PasteAt { x, y } => {
            state.paste_at(Point::new(*x, *y));
        }
        ReplayEvent::ImportClipboard { payload } => state
            .import_clipboard(payload)
            .map_err(|source| ReplayError::Clipboard { index, source })?,
    }
    Ok(())
}

fn press_chord(state: &mut InputState, index: usize, chord: &str) -> Result<(), ReplayError> {
    let invalid = |message: String| ReplayError::InvalidKey {
        index,
        key: chord.to_string(),
        message,
    };

    let binding = KeyBinding::parse(chord).map_err(invalid)?;
    let key = Key::from_name(&binding.key)
        .ok_or_else(|| invalid(format!("unknown key name '{}'", binding.key)))?;

    let mut modifiers = Vec::new();
    if binding.ctrl {
        modifiers.push(Key::Ctrl);
    }
    if binding.shift {
        modifiers.push(Key::Shift);
    }
    if binding.alt {
        modifiers.push(Key::Alt);
    }

    tap(state, &modifiers, key);
    Ok(())
}

/// Presses the modifiers, taps `key`, then releases in reverse order.
fn tap(state: &mut InputState, modifiers: &[Key], key: Key) {
    for modifier in modifiers {
        state.on_key_press(*modifier);
    }
    state.on_key_press(key);
    state.on_key_release(key);
    for modifier in modifiers.iter().rev() {
        state.on_key_release(*modifier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn run(script: &str) -> Result<ReplayOutcome, ReplayError> {
        let mut state = InputState::from_config(&Config::default()).unwrap();
        ReplayScript::from_json(script)?.run(&mut state)
    }

    #[test]
    fn draws_copies_and_pastes() {
        let outcome = run(r#"{
            "events": [
                { "event": "key", "key": "R" },
                { "event": "press", "x": 100, "y": 100 },
                { "event": "drag", "x": 150, "y": 150 },
                { "event": "release", "x": 150, "y": 150 },
                { "event": "press", "x": 125, "y": 125 },
                { "event": "release", "x": 125, "y": 125 },
                { "event": "key", "key": "Ctrl+C" },
                { "event": "key", "key": "Ctrl+V" }
            ]
        }"#)
        .unwrap();

        assert_eq!(outcome.annotations.len(), 2);
        assert_eq!(outcome.mode, Mode::Select);
        assert_eq!(outcome.selected, Some(outcome.annotations[1].id()));
        let AnnotationSnapshot::Rectangle { rect, .. } = &outcome.annotations[1] else {
            panic!("expected a rectangle");
        };
        assert_eq!(*rect, Rect::new(120.0, 120.0, 50.0, 50.0));
        assert_eq!(outcome.undo_depth, 2);
    }

    #[test]
    fn typed_text_becomes_annotation() {
        let outcome = run(r#"{
            "events": [
                { "event": "mode", "mode": "text" },
                { "event": "press", "x": 40, "y": 40 },
                { "event": "release", "x": 40, "y": 40 },
                { "event": "type", "text": "hi there\nok" },
                { "event": "key", "key": "Return" }
            ]
        }"#)
        .unwrap();

        let [AnnotationSnapshot::Text { text, .. }] = outcome.annotations.as_slice() else {
            panic!("expected one text annotation");
        };
        assert_eq!(text, "hi there\nok");
    }

    #[test]
    fn region_capture_is_reported() {
        let outcome = run(r#"{
            "frame": { "x": 0, "y": 0, "width": 800, "height": 600 },
            "events": [
                { "event": "key", "key": "Tab" },
                { "event": "press", "x": 10, "y": 10 },
                { "event": "drag", "x": 210, "y": 110 },
                { "event": "release", "x": 210, "y": 110 }
            ]
        }"#)
        .unwrap();

        assert_eq!(outcome.region, Some(Rect::new(10.0, 10.0, 200.0, 100.0)));
    }

    #[test]
    fn exit_stops_replay() {
        let outcome = run(r#"{
            "events": [
                { "event": "action", "action": "exit" },
                { "event": "key", "key": "R" }
            ]
        }"#)
        .unwrap();

        assert!(outcome.exit_requested);
        assert_eq!(outcome.mode, Mode::Select);
    }

    #[test]
    fn unknown_key_names_event_index() {
        let err = run(r#"{
            "events": [
                { "event": "key", "key": "R" },
                { "event": "key", "key": "Ctrl+F13" }
            ]
        }"#)
        .unwrap_err();

        assert!(matches!(err, ReplayError::InvalidKey { index: 1, .. }));
        assert!(err.to_string().contains("F13"));
    }

    #[test]
    fn malformed_script_is_parse_error() {
        let err = run(r#"{ "events": [ { "event": "teleport" } ] }"#).unwrap_err();
        assert!(matches!(err, ReplayError::Parse(_)));
    }
}
