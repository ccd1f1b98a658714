//! Editor modes and the region-select toggle memory.

use crate::draw::AnnotationKind;
use serde::{Deserialize, Serialize};

/// Current editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Pick, move, and resize existing annotations
    #[default]
    Select,
    /// Drag out the capture rectangle
    RegionSelect,
    Rectangle,
    Arrow,
    Text,
}

impl Mode {
    /// Annotation kind created by pointer gestures in this mode.
    pub fn draws(self) -> Option<AnnotationKind> {
        match self {
            Mode::Rectangle => Some(AnnotationKind::Rectangle),
            Mode::Arrow => Some(AnnotationKind::Arrow),
            Mode::Text => Some(AnnotationKind::Text),
            Mode::Select | Mode::RegionSelect => None,
        }
    }

    /// Instruction line shown by the renderer's overlay.
    pub fn hint(self) -> &'static str {
        match self {
            Mode::Select => "Click an annotation to select it, drag to move",
            Mode::RegionSelect => "Drag to select the capture region, Tab to go back",
            Mode::Rectangle => "Drag to draw a rectangle",
            Mode::Arrow => "Drag to draw an arrow",
            Mode::Text => "Click to place text, Return to finish",
        }
    }
}

/// Mode plus the mode Tab returns to when leaving region select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeState {
    current: Mode,
    before_region_select: Mode,
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    /// Mode Tab will restore from region select.
    pub fn remembered(&self) -> Mode {
        self.before_region_select
    }

    /// Switches modes; returns `true` if the mode changed.
    ///
    /// The memory only updates when leaving a mode other than
    /// [`Mode::RegionSelect`]; re-entering region select leaves it untouched.
    pub fn set(&mut self, mode: Mode) -> bool {
        if mode == self.current {
            return false;
        }

        if self.current != Mode::RegionSelect {
            self.before_region_select = self.current;
        }

        log::debug!("Mode {:?} -> {:?}", self.current, mode);
        self.current = mode;
        true
    }

    /// Tab: enter region select, or return to the remembered mode.
    pub fn toggle_region_select(&mut self) -> Mode {
        let target = if self.current == Mode::RegionSelect {
            self.before_region_select
        } else {
            Mode::RegionSelect
        };
        self.set(target);
        self.current
    }
}
