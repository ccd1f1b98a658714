//! Undo/redo history and the single-slot annotation clipboard.
//!
//! Both stacks hold whole-scene snapshots. Callers push the pre-mutation
//! scene *before* mutating; any push clears the redo stack.

use crate::draw::snapshot::{self, AnnotationSnapshot};
use crate::draw::{Annotation, SnapshotError};

/// Ordered snapshot of every annotation in a scene.
pub type SceneSnapshot = Vec<AnnotationSnapshot>;

/// Undo and redo stacks of scene snapshots. Depth is unbounded.
#[derive(Debug, Default)]
pub struct History {
    undo: Vec<SceneSnapshot>,
    redo: Vec<SceneSnapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the scene as it is right before a mutation.
    pub fn push(&mut self, annotations: &[Annotation]) {
        self.undo.push(snapshot::capture_all(annotations));
        self.redo.clear();
        log::debug!("History push ({} undo, redo cleared)", self.undo.len());
    }

    /// Like [`push`](Self::push), but hands back the cleared redo stack so a
    /// cancelled gesture can [`retract`](Self::retract) the push entirely.
    pub fn push_revertible(&mut self, annotations: &[Annotation]) -> Vec<SceneSnapshot> {
        self.undo.push(snapshot::capture_all(annotations));
        let redo = std::mem::take(&mut self.redo);
        log::debug!(
            "History push ({} undo, {} redo held back)",
            self.undo.len(),
            redo.len()
        );
        redo
    }

    /// Pops the latest pre-mutation scene, saving `current` for redo.
    ///
    /// Returns the annotations to restore, or `None` when nothing can be undone.
    pub fn undo(&mut self, current: &[Annotation]) -> Option<Vec<Annotation>> {
        let previous = self.undo.pop()?;
        self.redo.push(snapshot::capture_all(current));
        log::debug!(
            "Undo ({} undo, {} redo remaining)",
            self.undo.len(),
            self.redo.len()
        );
        Some(snapshot::restore_all(&previous))
    }

    /// Mirror of [`undo`](Self::undo) over the redo stack.
    pub fn redo(&mut self, current: &[Annotation]) -> Option<Vec<Annotation>> {
        let next = self.redo.pop()?;
        self.undo.push(snapshot::capture_all(current));
        log::debug!(
            "Redo ({} undo, {} redo remaining)",
            self.undo.len(),
            self.redo.len()
        );
        Some(snapshot::restore_all(&next))
    }

    /// Undoes a [`push_revertible`](Self::push_revertible) without touching
    /// the scene: drops the latest undo entry and puts `redo` back.
    pub fn retract(&mut self, redo: Vec<SceneSnapshot>) -> bool {
        if self.undo.pop().is_none() {
            return false;
        }
        self.redo = redo;
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}

/// Holds at most one copied annotation; outlives its source.
#[derive(Debug, Default, Clone)]
pub struct Clipboard {
    content: Option<AnnotationSnapshot>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the clipboard with a snapshot of `annotation`.
    pub fn store(&mut self, annotation: &Annotation) {
        self.content = Some(AnnotationSnapshot::capture(annotation));
    }

    pub fn content(&self) -> Option<&AnnotationSnapshot> {
        self.content.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    /// JSON payload for the host's system pasteboard.
    pub fn export(&self) -> Result<Option<String>, SnapshotError> {
        self.content.as_ref().map(AnnotationSnapshot::to_json).transpose()
    }

    /// Replaces the content from a system pasteboard payload.
    pub fn import(&mut self, payload: &str) -> Result<(), SnapshotError> {
        self.content = Some(AnnotationSnapshot::from_json(payload)?);
        Ok(())
    }
}
