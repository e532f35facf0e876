//! Shared numeric constants for the canvas crate.

// ── Geometry ────────────────────────────────────────────────────

/// Smallest width or height a resized rectangle may shrink to, in page units.
pub const MIN_RECT_SIZE: f64 = 0.01;

/// Width of the rectangle placed by a click that never turned into a drag.
pub const DEFAULT_RECT_WIDTH: f64 = 0.06;

/// Height of the rectangle placed by a click that never turned into a drag.
pub const DEFAULT_RECT_HEIGHT: f64 = 0.02;

/// How far inside the default rectangle's top-left corner the click point lands.
pub const DEFAULT_RECT_INSET: f64 = 0.005;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Screen-space hit radius in pixels for dots and stamps.
pub const POINT_RADIUS_PX: f64 = 10.0;

/// Pointer travel in pixels below which a press/release counts as a click.
pub const DRAG_THRESHOLD_PX: f64 = 4.0;

// ── History ─────────────────────────────────────────────────────

/// Idle gap in milliseconds that ends a burst of text edits.
pub const TYPING_IDLE_MS: u64 = 1000;

/// Maximum number of undo snapshots kept per page.
pub const MAX_HISTORY_DEPTH: usize = 100;

// ── Modes ───────────────────────────────────────────────────────

/// Mode tag carried by score stamps.
pub const STAMP_MODE: &str = "stamp";
