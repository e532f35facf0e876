//! Document model: annotations, sparse edits, and the store that owns them.
//!
//! This module defines what a grader can place on a page ([`Annotation`],
//! [`AnnotationBody`]), a sparse-update type for editor input
//! ([`AnnotationPatch`]), and the [`AnnotationStore`], the single owner of
//! every annotation list. Nothing else in the crate mutates annotations; the
//! engine goes through store operations so that history stays centralized.
//!
//! Data flows into this layer from the persistence collaborator (`load`) and
//! from the input engine (mutations). The renderer reads page lists back out.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{MAX_HISTORY_DEPTH, TYPING_IDLE_MS};
use crate::geom::{Point, Rect};
use crate::history::{History, PageKey, PageSnapshot};

/// Creation-ordered identifier for an annotation. Larger means newer.
pub type AnnotationId = u64;

/// Identifier for one graded document (one subject's essay).
pub type DocumentId = Uuid;

/// Scores captured verbatim when a stamp is placed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    /// Score per rubric category.
    pub scores: BTreeMap<String, f64>,
    /// Total as reported by the scoring collaborator.
    pub total: f64,
    /// Name of the grader at stamp time.
    pub grader: String,
    /// Human-readable date at stamp time.
    pub date: String,
}

/// Per-kind payload of an annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnnotationBody {
    /// A numbered point. Dots sharing `(mode, number)` form a labeled group.
    Dot {
        point: Point,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        number: Option<u32>,
        #[serde(default)]
        is_elaboration: bool,
    },
    /// One logical highlight spanning one or more rectangles.
    Rect {
        rects: Vec<Rect>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        correction: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    /// A summary stamp carrying the scores at the moment it was placed.
    Stamp { point: Point, snapshot: ScoreSnapshot },
}

/// The kind of an annotation, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    Dot,
    Rect,
    Stamp,
}

/// An annotation as stored in the document and handed to persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    /// Grading category (or tool mode) the annotation was made under.
    pub mode: String,
    /// Zero-based page of the owning document.
    pub page_index: usize,
    #[serde(flatten)]
    pub body: AnnotationBody,
}

/// Movable geometry of an annotation, captured at gesture start.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    Rects(Vec<Rect>),
}

impl Annotation {
    #[must_use]
    pub fn dot(id: AnnotationId, mode: &str, page_index: usize, point: Point, number: Option<u32>, is_elaboration: bool) -> Self {
        Self {
            id,
            mode: mode.to_owned(),
            page_index,
            body: AnnotationBody::Dot { point: point.clamped(), number, is_elaboration },
        }
    }

    #[must_use]
    pub fn rect(id: AnnotationId, mode: &str, page_index: usize, rect: Rect) -> Self {
        Self {
            id,
            mode: mode.to_owned(),
            page_index,
            body: AnnotationBody::Rect { rects: vec![rect.clamped()], code: None, correction: None, text: None },
        }
    }

    #[must_use]
    pub fn stamp(id: AnnotationId, mode: &str, page_index: usize, point: Point, snapshot: ScoreSnapshot) -> Self {
        Self { id, mode: mode.to_owned(), page_index, body: AnnotationBody::Stamp { point: point.clamped(), snapshot } }
    }

    #[must_use]
    pub fn kind(&self) -> AnnotationKind {
        match self.body {
            AnnotationBody::Dot { .. } => AnnotationKind::Dot,
            AnnotationBody::Rect { .. } => AnnotationKind::Rect,
            AnnotationBody::Stamp { .. } => AnnotationKind::Stamp,
        }
    }

    #[must_use]
    pub fn is_rect(&self) -> bool {
        self.kind() == AnnotationKind::Rect
    }

    /// Anchor point of a dot or stamp.
    #[must_use]
    pub fn point(&self) -> Option<Point> {
        match &self.body {
            AnnotationBody::Dot { point, .. } | AnnotationBody::Stamp { point, .. } => Some(*point),
            AnnotationBody::Rect { .. } => None,
        }
    }

    /// Rectangles of a rect annotation; empty for other kinds.
    #[must_use]
    pub fn rects(&self) -> &[Rect] {
        match &self.body {
            AnnotationBody::Rect { rects, .. } => rects,
            _ => &[],
        }
    }

    #[must_use]
    pub fn geometry(&self) -> Geometry {
        match &self.body {
            AnnotationBody::Rect { rects, .. } => Geometry::Rects(rects.clone()),
            AnnotationBody::Dot { point, .. } | AnnotationBody::Stamp { point, .. } => Geometry::Point(*point),
        }
    }

    /// Dot sequence number, if this is a numbered dot.
    #[must_use]
    pub fn number(&self) -> Option<u32> {
        match self.body {
            AnnotationBody::Dot { number, .. } => number,
            _ => None,
        }
    }
}

/// Sparse update for an annotation. Only present fields are applied.
///
/// Text fields (`code`, `correction`, `text`) only apply to rect
/// annotations; an empty string clears the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_elaboration: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl AnnotationPatch {
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self { text: Some(text.to_owned()), ..Default::default() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether every present field is editor text, which coalesces in history.
    #[must_use]
    pub fn is_text_only(&self) -> bool {
        self.mode.is_none() && self.number.is_none() && self.is_elaboration.is_none()
    }

    fn apply(&self, annotation: &mut Annotation) {
        if let Some(mode) = &self.mode {
            annotation.mode.clone_from(mode);
        }
        match &mut annotation.body {
            AnnotationBody::Dot { number, is_elaboration, .. } => {
                if let Some(n) = self.number {
                    *number = Some(n);
                }
                if let Some(e) = self.is_elaboration {
                    *is_elaboration = e;
                }
            }
            AnnotationBody::Rect { code, correction, text, .. } => {
                merge_text(code, self.code.as_deref());
                merge_text(correction, self.correction.as_deref());
                merge_text(text, self.text.as_deref());
            }
            AnnotationBody::Stamp { .. } => {}
        }
    }
}

fn merge_text(slot: &mut Option<String>, incoming: Option<&str>) {
    match incoming {
        None => {}
        Some("") => *slot = None,
        Some(value) => *slot = Some(value.to_owned()),
    }
}

/// Owner of every document's annotation list, the undo history and the id
/// allocator.
#[derive(Debug)]
pub struct AnnotationStore {
    documents: HashMap<DocumentId, Vec<Annotation>>,
    active: Option<DocumentId>,
    page: usize,
    history: History,
    last_id: AnnotationId,
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationStore {
    /// Create an empty store with default history limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_history(MAX_HISTORY_DEPTH, Duration::from_millis(TYPING_IDLE_MS))
    }

    #[must_use]
    pub fn with_history(max_depth: usize, typing_idle: Duration) -> Self {
        Self {
            documents: HashMap::new(),
            active: None,
            page: 0,
            history: History::new(max_depth, typing_idle),
            last_id: 0,
        }
    }

    // --- Context ---

    /// Make `document` the active one, starting at its first page.
    pub fn open(&mut self, document: DocumentId) {
        self.documents.entry(document).or_default();
        self.active = Some(document);
        self.page = 0;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    #[must_use]
    pub fn active_document(&self) -> Option<DocumentId> {
        self.active
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// History key of the page currently shown, if a document is open.
    #[must_use]
    pub fn page_key(&self) -> Option<PageKey> {
        self.active.map(|document| PageKey::new(document, self.page))
    }

    /// Replace a document's annotations with persisted state. Clears that
    /// document's history.
    pub fn load(&mut self, document: DocumentId, annotations: Vec<Annotation>) {
        if let Some(max) = annotations.iter().map(|a| a.id).max() {
            self.last_id = self.last_id.max(max);
        }
        self.history.clear_document(document);
        self.documents.insert(document, annotations);
    }

    /// Close a document: its history is discarded, its annotations kept.
    pub fn close(&mut self, document: DocumentId) {
        self.history.clear_document(document);
        if self.active == Some(document) {
            self.active = None;
            self.page = 0;
        }
    }

    /// Drop every document, all history and the active context.
    pub fn reset(&mut self) {
        self.documents.clear();
        self.history.clear();
        self.active = None;
        self.page = 0;
    }

    /// Copy of a document's annotations in store order.
    #[must_use]
    pub fn export(&self, document: DocumentId) -> Vec<Annotation> {
        self.documents.get(&document).cloned().unwrap_or_default()
    }

    /// Allocate a fresh id, strictly greater than any id seen so far.
    pub fn next_id(&mut self) -> AnnotationId {
        self.last_id += 1;
        self.last_id
    }

    // --- Queries ---

    /// Every annotation of the active document, in store order.
    #[must_use]
    pub fn document_annotations(&self) -> &[Annotation] {
        self.active.and_then(|d| self.documents.get(&d)).map_or(&[], Vec::as_slice)
    }

    /// Annotations on the current page of the active document, in store order.
    pub fn page_annotations(&self) -> impl Iterator<Item = &Annotation> {
        let page = self.page;
        self.document_annotations().iter().filter(move |a| a.page_index == page)
    }

    #[must_use]
    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.document_annotations().iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.page_key().is_some_and(|key| self.history.can_undo(key))
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.page_key().is_some_and(|key| self.history.can_redo(key))
    }

    /// Deep copy of the current page, for gesture bracketing.
    #[must_use]
    pub fn snapshot_page(&self) -> PageSnapshot {
        self.page_annotations().cloned().collect()
    }

    // --- Structural mutations (one history entry each) ---

    /// Append to the active document. With `record_history`, the
    /// annotation's page is snapshotted first. Returns false without an
    /// active document.
    pub fn add(&mut self, annotation: Annotation, record_history: bool) -> bool {
        let Some(document) = self.active else {
            return false;
        };
        if record_history {
            self.record(PageKey::new(document, annotation.page_index));
        }
        self.last_id = self.last_id.max(annotation.id);
        self.documents.entry(document).or_default().push(annotation);
        true
    }

    /// Remove one annotation. Returns whether anything was removed.
    pub fn delete(&mut self, id: AnnotationId) -> bool {
        self.delete_many(&[id]) > 0
    }

    /// Remove every listed annotation that exists. Each affected page gets
    /// one history entry; unknown ids and an empty list touch nothing.
    pub fn delete_many(&mut self, ids: &[AnnotationId]) -> usize {
        let Some(document) = self.active else {
            return 0;
        };
        let mut pages: Vec<usize> = self
            .document_annotations()
            .iter()
            .filter(|a| ids.contains(&a.id))
            .map(|a| a.page_index)
            .collect();
        if pages.is_empty() {
            return 0;
        }
        pages.sort_unstable();
        pages.dedup();
        for page in pages {
            self.record(PageKey::new(document, page));
        }
        let list = self.documents.entry(document).or_default();
        let before = list.len();
        list.retain(|a| !ids.contains(&a.id));
        before - list.len()
    }

    /// Append a rectangle to an existing rect annotation.
    pub fn append_rect(&mut self, id: AnnotationId, rect: Rect) -> bool {
        if !self.get(id).is_some_and(Annotation::is_rect) {
            return false;
        }
        self.record_for(id);
        self.with_annotation(id, |a| {
            if let AnnotationBody::Rect { rects, .. } = &mut a.body {
                rects.push(rect.clamped());
            }
        })
    }

    /// Remove one rectangle from a rect annotation; removing the last one
    /// deletes the annotation.
    pub fn remove_rect(&mut self, id: AnnotationId, index: usize) -> bool {
        let Some(count) = self.get(id).map(|a| a.rects().len()) else {
            return false;
        };
        if index >= count {
            return false;
        }
        if count == 1 {
            return self.delete(id);
        }
        self.record_for(id);
        self.with_annotation(id, |a| {
            if let AnnotationBody::Rect { rects, .. } = &mut a.body {
                rects.remove(index);
            }
        })
    }

    /// Remove a rect annotation's error code as an immediate, standalone edit.
    pub fn clear_code(&mut self, id: AnnotationId) -> bool {
        if !self.get(id).is_some_and(Annotation::is_rect) {
            return false;
        }
        self.record_for(id);
        self.with_annotation(id, |a| {
            if let AnnotationBody::Rect { code, .. } = &mut a.body {
                *code = None;
            }
        })
    }

    /// Close the typing burst on the annotation's page, so the next keystroke
    /// there records a fresh history entry.
    pub fn end_typing(&mut self, id: AnnotationId) {
        if let Some((document, target)) = self.active.zip(self.get(id)) {
            self.history.end_typing(PageKey::new(document, target.page_index));
        }
    }

    /// Shallow-merge `patch` into an annotation.
    ///
    /// Text-only patches coalesce: a burst of calls less than the idle window
    /// apart records a single history entry. Any other field makes the edit
    /// immediate with its own entry.
    pub fn update(&mut self, id: AnnotationId, patch: &AnnotationPatch, now: Instant) -> bool {
        if patch.is_empty() {
            return false;
        }
        let Some((document, target)) = self.active.zip(self.get(id)) else {
            return false;
        };
        let key = PageKey::new(document, target.page_index);
        if patch.is_text_only() {
            if !target.is_rect() {
                return false;
            }
            let documents = &self.documents;
            self.history.record_typing(key, now, || snapshot_of(documents, key));
        } else {
            self.record(key);
        }
        self.with_annotation(id, |a| patch.apply(a))
    }

    // --- Live geometry (no history) ---

    /// Move a dot or stamp. The point is clamped to the page.
    pub fn set_point(&mut self, id: AnnotationId, point: Point) -> bool {
        self.with_annotation(id, |a| {
            if let AnnotationBody::Dot { point: p, .. } | AnnotationBody::Stamp { point: p, .. } = &mut a.body {
                *p = point.clamped();
            }
        })
    }

    /// Replace one rectangle of a rect annotation.
    pub fn set_rect(&mut self, id: AnnotationId, index: usize, rect: Rect) -> bool {
        self.with_annotation(id, |a| {
            if let AnnotationBody::Rect { rects, .. } = &mut a.body {
                if let Some(slot) = rects.get_mut(index) {
                    *slot = rect.clamped();
                }
            }
        })
    }

    /// Replace every rectangle of a rect annotation. An empty list is ignored.
    pub fn set_rects(&mut self, id: AnnotationId, new_rects: &[Rect]) -> bool {
        if new_rects.is_empty() {
            return false;
        }
        self.with_annotation(id, |a| {
            if let AnnotationBody::Rect { rects, .. } = &mut a.body {
                *rects = new_rects.iter().map(|r| r.clamped()).collect();
            }
        })
    }

    // --- Gesture bracket ---

    /// Commit a gesture: record `before` as one history entry when the
    /// current page differs from it. Returns whether an entry was pushed.
    pub fn commit_snapshot(&mut self, before: PageSnapshot) -> bool {
        let Some(key) = self.page_key() else {
            return false;
        };
        if self.snapshot_page() == before {
            return false;
        }
        self.history.record(key, before);
        true
    }

    /// Put the current page back to `before` without touching history.
    pub fn restore_page(&mut self, before: PageSnapshot) {
        if let Some(key) = self.page_key() {
            self.replace_page(key, before);
        }
    }

    // --- History ---

    /// Restore the previous state of the current page. No-op when empty.
    pub fn undo(&mut self) -> bool {
        let Some(key) = self.page_key() else {
            return false;
        };
        let current = snapshot_of(&self.documents, key);
        match self.history.undo(key, current) {
            Some(previous) => {
                self.replace_page(key, previous);
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone state of the current page. No-op when empty.
    pub fn redo(&mut self) -> bool {
        let Some(key) = self.page_key() else {
            return false;
        };
        let current = snapshot_of(&self.documents, key);
        match self.history.redo(key, current) {
            Some(next) => {
                self.replace_page(key, next);
                true
            }
            None => false,
        }
    }

    // --- Internals ---

    fn record(&mut self, key: PageKey) {
        let snapshot = snapshot_of(&self.documents, key);
        self.history.record(key, snapshot);
    }

    fn record_for(&mut self, id: AnnotationId) {
        if let Some((document, page)) = self.active.zip(self.get(id).map(|a| a.page_index)) {
            self.record(PageKey::new(document, page));
        }
    }

    fn with_annotation<F>(&mut self, id: AnnotationId, f: F) -> bool
    where
        F: FnOnce(&mut Annotation),
    {
        let Some(document) = self.active else {
            return false;
        };
        let Some(annotation) = self.documents.get_mut(&document).and_then(|list| list.iter_mut().find(|a| a.id == id))
        else {
            return false;
        };
        f(annotation);
        true
    }

    /// Swap a page's annotations for `snapshot`, keeping the page's block at
    /// the position of its first annotation.
    fn replace_page(&mut self, key: PageKey, snapshot: PageSnapshot) {
        let list = self.documents.entry(key.document).or_default();
        let at = list.iter().position(|a| a.page_index == key.page).unwrap_or(list.len());
        list.retain(|a| a.page_index != key.page);
        let at = at.min(list.len());
        list.splice(at..at, snapshot);
    }
}

fn snapshot_of(documents: &HashMap<DocumentId, Vec<Annotation>>, key: PageKey) -> PageSnapshot {
    documents
        .get(&key.document)
        .map(|list| list.iter().filter(|a| a.page_index == key.page).cloned().collect())
        .unwrap_or_default()
}
