use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::consts::{
    DEFAULT_RECT_HEIGHT, DEFAULT_RECT_INSET, DEFAULT_RECT_WIDTH, DRAG_THRESHOLD_PX, MAX_HISTORY_DEPTH, STAMP_MODE,
    TYPING_IDLE_MS,
};
use crate::doc::{Annotation, AnnotationId, AnnotationPatch, AnnotationStore, DocumentId, Geometry, ScoreSnapshot};
use crate::geom::{Corner, Point, Rect, SurfaceBounds};
use crate::hit::{self, Hit, HitPart};
use crate::input::{Button, EditSession, InputState, Key, Modifiers, MoveAnchor, Tool, UiState};
use crate::labels;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AnnotationCreated(Annotation),
    AnnotationUpdated { id: AnnotationId },
    AnnotationsDeleted { ids: Vec<AnnotationId> },
    SelectionChanged(Vec<AnnotationId>),
    /// Open the editor popover for an annotation.
    EditRequested { id: AnnotationId, is_new: bool },
    EditClosed { id: AnnotationId },
    /// Scroll the surface container to this offset, in pixels.
    ScrollTo(Point),
    HistoryChanged,
    RenderNeeded,
}

/// Tunables for the engine's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Undo snapshots kept per page.
    pub history_depth: usize,
    /// Idle gap that ends a burst of text edits.
    pub typing_idle: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { history_depth: MAX_HISTORY_DEPTH, typing_idle: Duration::from_millis(TYPING_IDLE_MS) }
    }
}

/// A resize handle as the renderer should draw it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleView {
    pub id: AnnotationId,
    pub rect_index: usize,
    pub corner: Corner,
    pub at: Point,
}

/// Gesture-transient state for display only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    /// Rubber-band box while selecting.
    pub selection_box: Option<Rect>,
    /// Rectangle being dragged out while creating.
    pub draft: Option<Rect>,
    /// Handles of the focused and selected rect annotations.
    pub handles: Vec<HandleView>,
}

/// Core engine state: annotation store, UI state, and the gesture machine.
///
/// All handlers are synchronous and never block; the host feeds raw pointer
/// events and applies the returned [`Action`]s.
#[derive(Debug)]
pub struct EngineCore {
    store: AnnotationStore,
    ui: UiState,
    input: InputState,
    surface: SurfaceBounds,
    scores: ScoreSnapshot,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            store: AnnotationStore::with_history(config.history_depth, config.typing_idle),
            ui: UiState::default(),
            input: InputState::default(),
            surface: SurfaceBounds::default(),
            scores: ScoreSnapshot::default(),
        }
    }

    // --- Data inputs ---

    /// Hydrate a document from persisted annotations and make it active.
    pub fn open_document(&mut self, document: DocumentId, annotations: Vec<Annotation>) {
        self.cancel_gesture();
        self.commit_edit();
        self.store.load(document, annotations);
        self.store.open(document);
        self.clear_focus();
    }

    /// Store annotations for a document without switching to it.
    pub fn load_document(&mut self, document: DocumentId, annotations: Vec<Annotation>) {
        self.store.load(document, annotations);
    }

    /// Switch to an already loaded document at its first page. History of
    /// every document is kept across switches.
    pub fn switch_document(&mut self, document: DocumentId) -> Vec<Action> {
        let mut actions = self.cancel_gesture();
        actions.extend(self.commit_edit());
        self.store.open(document);
        self.clear_focus();
        actions.push(Action::SelectionChanged(Vec::new()));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Close a document, discarding its undo history.
    pub fn close_document(&mut self, document: DocumentId) {
        if self.store.active_document() == Some(document) {
            self.cancel_gesture();
            self.commit_edit();
            self.clear_focus();
        }
        self.store.close(document);
    }

    /// Switch pages. Any gesture in flight is cancelled first.
    pub fn set_page(&mut self, page: usize) -> Vec<Action> {
        let mut actions = self.cancel_gesture();
        self.store.set_page(page);
        self.clear_focus();
        actions.push(Action::SelectionChanged(Vec::new()));
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
    }

    /// Set the grading category new annotations are tagged with.
    pub fn set_mode(&mut self, mode: &str) {
        mode.clone_into(&mut self.ui.mode);
    }

    /// Scores the next stamp will capture.
    pub fn set_scores(&mut self, scores: ScoreSnapshot) {
        self.scores = scores;
    }

    /// Screen-space bounds of the page image, after zoom and scroll.
    pub fn set_surface(&mut self, bounds: SurfaceBounds) {
        self.surface = bounds;
    }

    /// Scroll offset reported by the host (e.g. after wheel scrolling).
    pub fn set_scroll(&mut self, scroll: Point) {
        self.ui.scroll = scroll;
    }

    // --- Queries ---

    #[must_use]
    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    #[must_use]
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    #[must_use]
    pub fn input_state(&self) -> &InputState {
        &self.input
    }

    #[must_use]
    pub fn selection(&self) -> &[AnnotationId] {
        &self.ui.selection
    }

    /// Derived dot labels for the active document.
    #[must_use]
    pub fn dot_labels(&self) -> std::collections::HashMap<AnnotationId, String> {
        labels::dot_labels(self.store.document_annotations())
    }

    /// Transient gesture state for the renderer.
    #[must_use]
    pub fn overlay(&self) -> Overlay {
        let selection_box = match &self.input {
            InputState::Selecting { area, .. } => Some(*area),
            _ => None,
        };
        let draft = match &self.input {
            InputState::Creating { start, current, .. } => Some(Rect::from_corners(*start, *current)),
            _ => None,
        };
        let ids = self.handle_ids();
        let handles = self
            .store
            .page_annotations()
            .filter(|a| ids.contains(&a.id))
            .flat_map(|a| {
                hit::handles(a)
                    .into_iter()
                    .map(move |(rect_index, corner, at)| HandleView { id: a.id, rect_index, corner, at })
            })
            .collect();
        Overlay { selection_box, draft, handles }
    }

    // --- Input events ---

    /// Pointer pressed. Gestures only start from idle.
    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        match button {
            Button::Middle => {
                self.input = InputState::Panning { start_screen: screen, start_scroll: self.ui.scroll };
                Vec::new()
            }
            Button::Secondary => self.create_dot(self.surface.to_relative(screen), modifiers),
            Button::Primary => self.primary_down(screen, modifiers),
        }
    }

    /// Pointer moved. Updates the gesture in flight, if any.
    pub fn on_pointer_move(&mut self, screen: Point, _modifiers: Modifiers) -> Vec<Action> {
        let p = self.surface.to_relative(screen);
        let mut state = std::mem::take(&mut self.input);
        let actions = match &mut state {
            InputState::Idle => Vec::new(),
            InputState::Panning { start_screen, start_scroll } => {
                let scroll = Point::new(
                    start_scroll.x - (screen.x - start_screen.x),
                    start_scroll.y - (screen.y - start_screen.y),
                );
                self.ui.scroll = scroll;
                vec![Action::ScrollTo(scroll)]
            }
            InputState::Selecting { start, area, .. } => {
                *area = Rect::from_corners(*start, p);
                let page: Vec<&Annotation> = self.store.page_annotations().collect();
                let selected = hit::annotations_in_box(&page, area);
                let mut actions = Vec::new();
                if selected != self.ui.selection {
                    self.ui.selection.clone_from(&selected);
                    actions.push(Action::SelectionChanged(selected));
                }
                actions.push(Action::RenderNeeded);
                actions
            }
            InputState::MovingMulti { start, initial, .. } => {
                let (dx, dy) = (p.x - start.x, p.y - start.y);
                for (id, geometry) in initial.iter() {
                    match geometry {
                        Geometry::Point(at) => self.store.set_point(*id, at.offset(dx, dy)),
                        Geometry::Rects(rects) => {
                            let moved: Vec<Rect> = rects.iter().map(|r| r.translated(dx, dy)).collect();
                            self.store.set_rects(*id, &moved)
                        }
                    };
                }
                vec![Action::RenderNeeded]
            }
            InputState::Moving { id, anchor, start, .. } => {
                let (dx, dy) = (p.x - start.x, p.y - start.y);
                match anchor {
                    MoveAnchor::Point(at) => self.store.set_point(*id, at.offset(dx, dy)),
                    MoveAnchor::Rect { index, rect } => self.store.set_rect(*id, *index, rect.translated(dx, dy)),
                };
                vec![Action::RenderNeeded]
            }
            InputState::Resizing { id, rect_index, corner, initial, start, .. } => {
                let resized = initial.resized(*corner, p.x - start.x, p.y - start.y);
                self.store.set_rect(*id, *rect_index, resized);
                vec![Action::RenderNeeded]
            }
            InputState::Creating { current, .. } => {
                *current = p;
                vec![Action::RenderNeeded]
            }
        };
        self.input = state;
        actions
    }

    /// Pointer released. Finalizes the gesture and returns to idle.
    pub fn on_pointer_up(&mut self, screen: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if self.input.button().is_some_and(|held| held != button) {
            return Vec::new();
        }
        let p = self.surface.to_relative(screen);
        let state = std::mem::take(&mut self.input);
        tracing::trace!(state = state.name(), "pointer up");
        match state {
            InputState::Idle | InputState::Panning { .. } => Vec::new(),
            InputState::Selecting { .. } => vec![Action::RenderNeeded],
            InputState::Moving { id, start_screen, before, .. } => {
                let mut actions = self.commit_gesture(before, &[id]);
                let clicked = screen.distance(start_screen) <= DRAG_THRESHOLD_PX;
                if clicked && self.store.get(id).is_some_and(Annotation::is_rect) {
                    actions.extend(self.open_editor(id, false));
                }
                actions.push(Action::RenderNeeded);
                actions
            }
            InputState::Resizing { id, before, .. } => {
                let mut actions = self.commit_gesture(before, &[id]);
                actions.push(Action::RenderNeeded);
                actions
            }
            InputState::MovingMulti { initial, before, .. } => {
                let ids: Vec<AnnotationId> = initial.into_keys().collect();
                let mut actions = self.commit_gesture(before, &ids);
                actions.push(Action::RenderNeeded);
                actions
            }
            InputState::Creating { start, start_screen, extend, .. } => {
                let rect = if screen.distance(start_screen) > DRAG_THRESHOLD_PX {
                    Rect::from_corners(start, p)
                } else {
                    default_rect_at(start)
                };
                match extend {
                    Some(id) => self.extend_rect(id, rect),
                    None => self.create_rect(rect),
                }
            }
        }
    }

    /// Abandon the gesture in flight, restoring pre-gesture geometry,
    /// selection and scroll. Never records history.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        match state {
            InputState::Idle => Vec::new(),
            InputState::Moving { before, .. }
            | InputState::Resizing { before, .. }
            | InputState::MovingMulti { before, .. } => {
                self.store.restore_page(before);
                tracing::debug!("gesture cancelled");
                vec![Action::RenderNeeded]
            }
            InputState::Selecting { previous, .. } => {
                self.ui.selection.clone_from(&previous);
                vec![Action::SelectionChanged(previous), Action::RenderNeeded]
            }
            InputState::Panning { start_scroll, .. } => {
                self.ui.scroll = start_scroll;
                vec![Action::ScrollTo(start_scroll)]
            }
            InputState::Creating { .. } => vec![Action::RenderNeeded],
        }
    }

    /// Keyboard shortcuts: cancel, delete, undo and redo.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if key.0 == "Escape" {
            return if self.input.is_idle() { self.cancel_edit() } else { self.cancel_gesture() };
        }
        if !self.input.is_idle() {
            return Vec::new();
        }
        match key.0.as_str() {
            "Delete" | "Backspace" if self.ui.editing.is_none() => self.delete_selection(),
            "z" | "Z" if modifiers.command() && modifiers.shift => self.redo(),
            "z" | "Z" if modifiers.command() => self.undo(),
            "y" | "Y" if modifiers.command() => self.redo(),
            _ => Vec::new(),
        }
    }

    // --- History ---

    pub fn undo(&mut self) -> Vec<Action> {
        if !self.input.is_idle() || !self.store.undo() {
            return Vec::new();
        }
        self.after_history_jump()
    }

    pub fn redo(&mut self) -> Vec<Action> {
        if !self.input.is_idle() || !self.store.redo() {
            return Vec::new();
        }
        self.after_history_jump()
    }

    /// Delete the selection, or the focused annotation when nothing is selected.
    pub fn delete_selection(&mut self) -> Vec<Action> {
        let ids: Vec<AnnotationId> = if self.ui.selection.is_empty() {
            self.ui.focused.into_iter().collect()
        } else {
            self.ui.selection.clone()
        };
        if self.store.delete_many(&ids) == 0 {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if let Some(session) = self.ui.editing.take() {
            actions.push(Action::EditClosed { id: session.id });
        }
        self.ui.selection.clear();
        self.ui.focused = None;
        actions.push(Action::AnnotationsDeleted { ids });
        actions.push(Action::SelectionChanged(Vec::new()));
        actions.push(Action::HistoryChanged);
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Editor collaborator ---

    /// A keystroke in the editor popover. Bursts coalesce into one undo step.
    pub fn edit_text(&mut self, patch: &AnnotationPatch, now: Instant) -> Vec<Action> {
        let Some(session) = self.ui.editing else {
            return Vec::new();
        };
        if !self.store.update(session.id, patch, now) {
            return Vec::new();
        }
        vec![Action::AnnotationUpdated { id: session.id }, Action::RenderNeeded]
    }

    /// Remove the code of the annotation being edited, as its own undo step.
    pub fn clear_code(&mut self) -> Vec<Action> {
        let Some(session) = self.ui.editing else {
            return Vec::new();
        };
        if !self.store.clear_code(session.id) {
            return Vec::new();
        }
        vec![Action::AnnotationUpdated { id: session.id }, Action::HistoryChanged, Action::RenderNeeded]
    }

    /// Close the editor keeping its edits.
    pub fn commit_edit(&mut self) -> Vec<Action> {
        let Some(session) = self.ui.editing.take() else {
            return Vec::new();
        };
        self.store.end_typing(session.id);
        vec![Action::EditClosed { id: session.id }]
    }

    /// Close the editor; an annotation created for this edit is deleted.
    pub fn cancel_edit(&mut self) -> Vec<Action> {
        let Some(session) = self.ui.editing.take() else {
            return Vec::new();
        };
        self.store.end_typing(session.id);
        let mut actions = vec![Action::EditClosed { id: session.id }];
        if session.is_new && self.store.delete(session.id) {
            self.ui.selection.retain(|id| *id != session.id);
            if self.ui.focused == Some(session.id) {
                self.ui.focused = None;
            }
            actions.push(Action::AnnotationsDeleted { ids: vec![session.id] });
            actions.push(Action::HistoryChanged);
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Internals ---

    fn primary_down(&mut self, screen: Point, modifiers: Modifiers) -> Vec<Action> {
        let p = self.surface.to_relative(screen);
        let hit = self.hit(p);
        if self.ui.tool == Tool::Stamp && hit.is_none() {
            return self.create_stamp(p);
        }
        if self.ui.tool == Tool::Select {
            return self.select_down(p, hit);
        }
        let Some(hit) = hit else {
            return self.begin_create_on_empty(p, screen, modifiers);
        };
        let Some(target) = self.store.get(hit.id) else {
            return Vec::new();
        };
        let target_is_rect = target.is_rect();
        match hit.part {
            HitPart::Handle { rect_index, corner } => {
                let Some(initial) = target.rects().get(rect_index).copied() else {
                    return Vec::new();
                };
                self.input = InputState::Resizing {
                    id: hit.id,
                    rect_index,
                    corner,
                    initial,
                    start: p,
                    before: self.store.snapshot_page(),
                };
                Vec::new()
            }
            HitPart::Body { .. } if modifiers.extend() && target_is_rect => {
                self.ui.focused = Some(hit.id);
                self.begin_create(p, screen, Some(hit.id))
            }
            HitPart::Body { rect_index } => {
                let anchor = match rect_index {
                    Some(index) => target.rects().get(index).map(|rect| MoveAnchor::Rect { index, rect: *rect }),
                    None => target.point().map(MoveAnchor::Point),
                };
                let Some(anchor) = anchor else {
                    return Vec::new();
                };
                let mut actions = Vec::new();
                if target_is_rect {
                    if self.ui.editing.is_some_and(|s| s.id != hit.id) {
                        actions.extend(self.commit_edit());
                    }
                    self.ui.focused = Some(hit.id);
                }
                self.input = InputState::Moving {
                    id: hit.id,
                    anchor,
                    start: p,
                    start_screen: screen,
                    before: self.store.snapshot_page(),
                };
                actions.push(Action::RenderNeeded);
                actions
            }
        }
    }

    fn select_down(&mut self, p: Point, hit: Option<Hit>) -> Vec<Action> {
        let mut actions = Vec::new();
        match hit {
            Some(hit) => {
                if !self.ui.selection.contains(&hit.id) {
                    self.ui.selection = vec![hit.id];
                    actions.push(Action::SelectionChanged(self.ui.selection.clone()));
                }
                let initial: BTreeMap<AnnotationId, Geometry> = self
                    .ui
                    .selection
                    .iter()
                    .filter_map(|id| self.store.get(*id).map(|a| (*id, a.geometry())))
                    .collect();
                self.input = InputState::MovingMulti { start: p, initial, before: self.store.snapshot_page() };
            }
            None => {
                let previous = std::mem::take(&mut self.ui.selection);
                self.input = InputState::Selecting { start: p, area: Rect::from_corners(p, p), previous };
                actions.push(Action::SelectionChanged(Vec::new()));
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    fn begin_create_on_empty(&mut self, p: Point, screen: Point, modifiers: Modifiers) -> Vec<Action> {
        let keep = self.ui.focused.filter(|id| modifiers.extend() && self.store.page_annotations().any(|a| a.id == *id && a.is_rect()));
        if keep.is_some() {
            return self.begin_create(p, screen, keep);
        }
        let mut actions = self.commit_edit();
        self.ui.focused = None;
        if !self.ui.selection.is_empty() {
            self.ui.selection.clear();
            actions.push(Action::SelectionChanged(Vec::new()));
        }
        actions.extend(self.begin_create(p, screen, None));
        actions
    }

    fn begin_create(&mut self, p: Point, screen: Point, extend: Option<AnnotationId>) -> Vec<Action> {
        if self.store.active_document().is_none() {
            return Vec::new();
        }
        self.input = InputState::Creating { start: p, start_screen: screen, current: p, extend };
        vec![Action::RenderNeeded]
    }

    fn create_rect(&mut self, rect: Rect) -> Vec<Action> {
        let id = self.store.next_id();
        let annotation = Annotation::rect(id, &self.ui.mode, self.store.page(), rect);
        if !self.store.add(annotation.clone(), true) {
            return Vec::new();
        }
        tracing::debug!(id, "rect annotation created");
        self.ui.focused = Some(id);
        let mut actions = vec![Action::AnnotationCreated(annotation)];
        actions.extend(self.open_editor(id, true));
        actions.push(Action::HistoryChanged);
        actions.push(Action::RenderNeeded);
        actions
    }

    fn extend_rect(&mut self, id: AnnotationId, rect: Rect) -> Vec<Action> {
        if !self.store.append_rect(id, rect) {
            return vec![Action::RenderNeeded];
        }
        vec![Action::AnnotationUpdated { id }, Action::HistoryChanged, Action::RenderNeeded]
    }

    fn create_dot(&mut self, p: Point, modifiers: Modifiers) -> Vec<Action> {
        let max = labels::max_dot_number(self.store.document_annotations(), &self.ui.mode);
        let (number, is_elaboration) = if modifiers.group() && max > 0 { (max, true) } else { (max + 1, false) };
        let id = self.store.next_id();
        let annotation = Annotation::dot(id, &self.ui.mode, self.store.page(), p, Some(number), is_elaboration);
        if !self.store.add(annotation.clone(), true) {
            return Vec::new();
        }
        tracing::debug!(id, number, is_elaboration, "dot created");
        vec![Action::AnnotationCreated(annotation), Action::HistoryChanged, Action::RenderNeeded]
    }

    fn create_stamp(&mut self, p: Point) -> Vec<Action> {
        let id = self.store.next_id();
        let annotation = Annotation::stamp(id, STAMP_MODE, self.store.page(), p, self.scores.clone());
        if !self.store.add(annotation.clone(), true) {
            return Vec::new();
        }
        vec![Action::AnnotationCreated(annotation), Action::HistoryChanged, Action::RenderNeeded]
    }

    fn open_editor(&mut self, id: AnnotationId, is_new: bool) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(open) = self.ui.editing {
            if open.id == id {
                return actions;
            }
            actions.extend(self.commit_edit());
        }
        self.store.end_typing(id);
        self.ui.editing = Some(EditSession { id, is_new });
        actions.push(Action::EditRequested { id, is_new });
        actions
    }

    fn commit_gesture(&mut self, before: Vec<Annotation>, ids: &[AnnotationId]) -> Vec<Action> {
        if !self.store.commit_snapshot(before) {
            return Vec::new();
        }
        let mut actions: Vec<Action> = ids
            .iter()
            .filter(|id| self.store.get(**id).is_some())
            .map(|id| Action::AnnotationUpdated { id: *id })
            .collect();
        actions.push(Action::HistoryChanged);
        actions
    }

    /// Drop references to annotations an undo/redo removed.
    fn after_history_jump(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        let before = self.ui.selection.len();
        let store = &self.store;
        self.ui.selection.retain(|id| store.get(*id).is_some());
        if self.ui.selection.len() != before {
            actions.push(Action::SelectionChanged(self.ui.selection.clone()));
        }
        if self.ui.focused.is_some_and(|id| store.get(id).is_none()) {
            self.ui.focused = None;
        }
        if let Some(session) = self.ui.editing.filter(|s| store.get(s.id).is_none()) {
            self.ui.editing = None;
            actions.push(Action::EditClosed { id: session.id });
        }
        actions.push(Action::HistoryChanged);
        actions.push(Action::RenderNeeded);
        actions
    }

    fn clear_focus(&mut self) {
        self.ui.selection.clear();
        self.ui.focused = None;
        self.ui.editing = None;
    }

    fn handle_ids(&self) -> Vec<AnnotationId> {
        let mut ids: Vec<AnnotationId> = self.ui.focused.into_iter().collect();
        ids.extend(self.ui.selection.iter().filter(|id| Some(**id) != self.ui.focused));
        ids.retain(|id| self.store.get(*id).is_some_and(Annotation::is_rect));
        ids
    }

    fn hit(&self, p: Point) -> Option<Hit> {
        let page: Vec<&Annotation> = self.store.page_annotations().collect();
        hit::hit_test(&page, p, &self.surface, &self.handle_ids())
    }
}

/// Rectangle placed by a plain click: default size, click point just inside
/// its top-left corner.
fn default_rect_at(p: Point) -> Rect {
    Rect::new(p.x - DEFAULT_RECT_INSET, p.y - DEFAULT_RECT_INSET, DEFAULT_RECT_WIDTH, DEFAULT_RECT_HEIGHT).clamped()
}
