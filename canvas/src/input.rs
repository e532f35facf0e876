//! Input model: tools, modifier keys, mouse buttons, and the gesture state machine.
//!
//! This module defines the types consumed by the input engine. `Tool` and
//! `Modifiers` capture the grader's intent at the time of a pointer event.
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up, carrying everything needed to apply incremental deltas, commit
//! one history entry on release, or put things back on cancel.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::BTreeMap;

use crate::doc::{AnnotationId, Geometry};
use crate::geom::{Corner, Point, Rect};
use crate::history::PageSnapshot;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Highlight tool (default): left drag draws rectangles, right click drops dots.
    #[default]
    Mark,
    /// Selection tool: click or rubber-band select, drag to move the selection.
    Select,
    /// Stamp tool: a left click on empty page places a score stamp.
    Stamp,
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Extend an existing rect annotation with another rectangle.
    #[must_use]
    pub fn extend(self) -> bool {
        self.shift
    }

    /// Make a right-click dot join the most recent group.
    #[must_use]
    pub fn group(self) -> bool {
        self.shift
    }

    /// Platform shortcut key (Ctrl, or Command on macOS).
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the host (e.g. `"Delete"`, `"Escape"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// An open editor popover and whether its annotation was just created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditSession {
    pub id: AnnotationId,
    /// Cancelling a new annotation deletes it; cancelling an existing one only closes.
    pub is_new: bool,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// Active grading category; new annotations are tagged with it.
    pub mode: String,
    /// Selected annotations, in selection order.
    pub selection: Vec<AnnotationId>,
    /// Annotation whose handles are shown and that multi-rect extension targets.
    pub focused: Option<AnnotationId>,
    /// Editor popover currently open, if any.
    pub editing: Option<EditSession>,
    /// Scroll offset of the surface container in pixels.
    pub scroll: Point,
}

/// What a single-object move drags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveAnchor {
    /// The point of a dot or stamp at gesture start.
    Point(Point),
    /// One rectangle of a rect annotation at gesture start.
    Rect { index: usize, rect: Rect },
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute deltas and
/// emit final actions on pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The grader is dragging out a new rectangle.
    Creating {
        /// Page-space point where the drag started.
        start: Point,
        /// Screen-space point where the drag started, for the click threshold.
        start_screen: Point,
        /// Latest page-space pointer position; only used to draw the box.
        current: Point,
        /// Rect annotation the finished rectangle is appended to, if extending.
        extend: Option<AnnotationId>,
    },
    /// The grader is moving one annotation (or one rectangle of it).
    Moving {
        id: AnnotationId,
        anchor: MoveAnchor,
        start: Point,
        start_screen: Point,
        /// Page state before the gesture, committed as one history entry.
        before: PageSnapshot,
    },
    /// The grader is resizing one rectangle by a corner handle.
    Resizing {
        id: AnnotationId,
        rect_index: usize,
        corner: Corner,
        /// Rectangle geometry at gesture start.
        initial: Rect,
        start: Point,
        before: PageSnapshot,
    },
    /// The grader is scrolling the surface with the middle button.
    Panning {
        /// Screen-space pointer position at gesture start.
        start_screen: Point,
        /// Scroll offset at gesture start.
        start_scroll: Point,
    },
    /// The grader is dragging a rubber-band selection box.
    Selecting {
        start: Point,
        /// Current box, rebuilt on every move.
        area: Rect,
        /// Selection before the gesture, restored on cancel.
        previous: Vec<AnnotationId>,
    },
    /// The grader is moving every selected annotation together.
    MovingMulti {
        start: Point,
        /// Geometry of each selected annotation at gesture start.
        initial: BTreeMap<AnnotationId, Geometry>,
        before: PageSnapshot,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Button that started the gesture; only its release ends it.
    #[must_use]
    pub fn button(&self) -> Option<Button> {
        match self {
            Self::Idle => None,
            Self::Panning { .. } => Some(Button::Middle),
            _ => Some(Button::Primary),
        }
    }

    /// Short name of the current state, for logs and the host's cursor logic.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Creating { .. } => "creating",
            Self::Moving { .. } => "moving",
            Self::Resizing { .. } => "resizing",
            Self::Panning { .. } => "panning",
            Self::Selecting { .. } => "selecting",
            Self::MovingMulti { .. } => "moving-multi",
        }
    }
}
