use std::time::{Duration, Instant};

use uuid::Uuid;

use super::*;
use crate::geom::Point;

fn key() -> PageKey {
    PageKey::new(Uuid::new_v4(), 0)
}

fn snap(ids: &[u64]) -> PageSnapshot {
    ids.iter()
        .map(|&id| Annotation::dot(id, "content", 0, Point::new(0.1, 0.1), Some(1), false))
        .collect()
}

fn history() -> History {
    History::new(100, Duration::from_secs(1))
}

// =============================================================
// TypingState
// =============================================================

#[test]
fn idle_never_continues() {
    assert!(!TypingState::Idle.continues_at(Instant::now()));
}

#[test]
fn typing_continues_until_deadline() {
    let now = Instant::now();
    let state = TypingState::Typing { deadline: now + Duration::from_millis(500) };
    assert!(state.continues_at(now + Duration::from_millis(499)));
    assert!(!state.continues_at(now + Duration::from_millis(500)));
}

// =============================================================
// record / undo / redo
// =============================================================

#[test]
fn record_then_undo_returns_snapshot() {
    let mut h = history();
    let k = key();
    h.record(k, snap(&[]));
    assert_eq!(h.undo(k, snap(&[1])), Some(snap(&[])));
    assert_eq!(h.redo_len(k), 1);
}

#[test]
fn undo_on_unknown_page_is_none() {
    let mut h = history();
    assert_eq!(h.undo(key(), snap(&[1])), None);
    assert_eq!(h.redo(key(), snap(&[1])), None);
}

#[test]
fn redo_returns_parked_state() {
    let mut h = history();
    let k = key();
    h.record(k, snap(&[]));
    let restored = h.undo(k, snap(&[1])).unwrap_or_default();
    assert_eq!(h.redo(k, restored), Some(snap(&[1])));
    assert!(h.can_undo(k));
    assert!(!h.can_redo(k));
}

#[test]
fn record_clears_redo() {
    let mut h = history();
    let k = key();
    h.record(k, snap(&[]));
    h.undo(k, snap(&[1]));
    h.record(k, snap(&[]));
    assert_eq!(h.redo_len(k), 0);
}

#[test]
fn depth_is_capped_dropping_oldest() {
    let mut h = History::new(3, Duration::from_secs(1));
    let k = key();
    for id in 1..=5 {
        h.record(k, snap(&[id]));
    }
    assert_eq!(h.undo_len(k), 3);
    assert_eq!(h.undo(k, snap(&[])), Some(snap(&[5])));
    assert_eq!(h.undo(k, snap(&[])), Some(snap(&[4])));
    assert_eq!(h.undo(k, snap(&[])), Some(snap(&[3])));
    assert_eq!(h.undo(k, snap(&[])), None);
}

#[test]
fn pages_are_independent() {
    let mut h = history();
    let doc = Uuid::new_v4();
    let p0 = PageKey::new(doc, 0);
    let p1 = PageKey::new(doc, 1);
    h.record(p0, snap(&[]));
    assert!(h.can_undo(p0));
    assert!(!h.can_undo(p1));
}

#[test]
fn clear_document_only_drops_that_document() {
    let mut h = history();
    let a = PageKey::new(Uuid::new_v4(), 0);
    let b = PageKey::new(Uuid::new_v4(), 0);
    h.record(a, snap(&[]));
    h.record(b, snap(&[]));
    h.clear_document(a.document);
    assert!(!h.can_undo(a));
    assert!(h.can_undo(b));
}

// =============================================================
// Typing bursts
// =============================================================

#[test]
fn first_keystroke_snapshots() {
    let mut h = history();
    let k = key();
    assert!(h.record_typing(k, Instant::now(), || snap(&[1])));
    assert_eq!(h.undo_len(k), 1);
    assert!(matches!(h.typing_state(k), TypingState::Typing { .. }));
}

#[test]
fn keystrokes_inside_window_coalesce() {
    let mut h = history();
    let k = key();
    let t0 = Instant::now();
    h.record_typing(k, t0, || snap(&[1]));
    // Each keystroke extends the deadline, so a long burst stays one entry.
    for step in 1..=10 {
        assert!(!h.record_typing(k, t0 + Duration::from_millis(step * 800), || snap(&[2])));
    }
    assert_eq!(h.undo_len(k), 1);
}

#[test]
fn keystroke_after_window_starts_new_burst() {
    let mut h = history();
    let k = key();
    let t0 = Instant::now();
    h.record_typing(k, t0, || snap(&[1]));
    assert!(h.record_typing(k, t0 + Duration::from_millis(1001), || snap(&[2])));
    assert_eq!(h.undo_len(k), 2);
}

#[test]
fn end_typing_forces_new_burst() {
    let mut h = history();
    let k = key();
    let t0 = Instant::now();
    h.record_typing(k, t0, || snap(&[1]));
    h.end_typing(k);
    assert_eq!(h.typing_state(k), TypingState::Idle);
    assert!(h.record_typing(k, t0 + Duration::from_millis(10), || snap(&[2])));
}

#[test]
fn undo_ends_typing_burst() {
    let mut h = history();
    let k = key();
    let t0 = Instant::now();
    h.record_typing(k, t0, || snap(&[1]));
    h.undo(k, snap(&[1]));
    assert_eq!(h.typing_state(k), TypingState::Idle);
}
