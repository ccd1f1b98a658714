//! Scene container: the ordered annotation list and its z-order operations.

use super::annotation::{Annotation, AnnotationId, Handle};
use crate::util::Point;

/// Z-order rearrangement applied to a single annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrange {
    BringForward,
    BringToFront,
    SendBackward,
    SendToBack,
}

/// All annotations over the captured region.
///
/// Order is z-order: first = bottom layer, last = topmost (drawn last,
/// hit-tested first). Identifiers are unique within a scene.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    annotations: Vec<Annotation>,
}

impl Scene {
    /// Creates a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Adds an annotation on top of the existing ones.
    pub fn push(&mut self, annotation: Annotation) {
        debug_assert!(
            self.index_of(annotation.id()).is_none(),
            "duplicate annotation id {}",
            annotation.id()
        );
        self.annotations.push(annotation);
    }

    pub fn index_of(&self, id: AnnotationId) -> Option<usize> {
        self.annotations.iter().position(|a| a.id() == id)
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id() == id)
    }

    pub fn get_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.annotations.iter_mut().find(|a| a.id() == id)
    }

    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        let index = self.index_of(id)?;
        Some(self.annotations.remove(index))
    }

    /// Removes and returns the most recently added annotation, if any.
    pub fn pop(&mut self) -> Option<Annotation> {
        self.annotations.pop()
    }

    pub fn topmost(&self) -> Option<&Annotation> {
        self.annotations.last()
    }

    /// Replaces the whole scene (snapshot restore).
    pub fn replace_all(&mut self, annotations: Vec<Annotation>) {
        self.annotations = annotations;
    }

    /// First precise hit scanning from the top of the z-order.
    pub fn hit_test(&self, point: Point) -> Option<(AnnotationId, Handle)> {
        self.annotations
            .iter()
            .rev()
            .find_map(|a| a.hit_test(point).map(|handle| (a.id(), handle)))
    }

    /// Topmost annotation whose hover bounds contain `point`.
    pub fn hover_target(&self, point: Point) -> Option<AnnotationId> {
        self.annotations
            .iter()
            .rev()
            .find(|a| a.hover_bounds().contains(point))
            .map(Annotation::id)
    }

    /// Topmost annotation whose visual bounds contain `point` (coarse targeting).
    pub fn context_target(&self, point: Point) -> Option<AnnotationId> {
        self.annotations
            .iter()
            .rev()
            .find(|a| a.visual_contains(point))
            .map(Annotation::id)
    }

    /// Whether `arrange` would change the order; false at the relevant extreme,
    /// for unknown ids, and with fewer than two annotations.
    pub fn can_arrange(&self, id: AnnotationId, arrange: Arrange) -> bool {
        if self.annotations.len() < 2 {
            return false;
        }
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let last = self.annotations.len() - 1;
        match arrange {
            Arrange::BringForward | Arrange::BringToFront => index < last,
            Arrange::SendBackward | Arrange::SendToBack => index > 0,
        }
    }

    /// Applies a z-order change; returns `true` if the order changed.
    pub fn arrange(&mut self, id: AnnotationId, arrange: Arrange) -> bool {
        if !self.can_arrange(id, arrange) {
            return false;
        }
        let Some(index) = self.index_of(id) else {
            return false;
        };

        match arrange {
            Arrange::BringForward => self.annotations.swap(index, index + 1),
            Arrange::SendBackward => self.annotations.swap(index, index - 1),
            Arrange::BringToFront => {
                let annotation = self.annotations.remove(index);
                self.annotations.push(annotation);
            }
            Arrange::SendToBack => {
                let annotation = self.annotations.remove(index);
                self.annotations.insert(0, annotation);
            }
        }
        true
    }
}
