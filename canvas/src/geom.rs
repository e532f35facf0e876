//! Normalized page geometry.
//!
//! Every persisted coordinate lives in `[0,1] × [0,1]`, relative to the page
//! image bounds. Zoom and scroll only change the [`SurfaceBounds`] the host
//! reports; they never touch stored geometry.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_RECT_SIZE;

/// Clamp `v` into `[lo, hi]`.
///
/// NaN collapses to `lo` so corrupt input can never leak into stored geometry.
#[must_use]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_nan() || v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

/// A point in either page space (normalized) or screen space (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This point with both components clamped to `[0,1]`.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self { x: clamp(self.x, 0.0, 1.0), y: clamp(self.y, 0.0, 1.0) }
    }

    /// This point shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Corner handle of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Sw, Corner::Se];
}

/// Axis-aligned rectangle in page space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Bounding box of two points (order does not matter).
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self { x, y, width: (a.x - b.x).abs(), height: (a.y - b.y).abs() }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether `p` lies inside or on the edge of this rectangle.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Inclusive overlap: true unless `other` lies fully outside on some side.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(other.right() < self.x || other.x > self.right() || other.bottom() < self.y || other.y > self.bottom())
    }

    /// Position of a corner handle.
    #[must_use]
    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::Nw => Point::new(self.x, self.y),
            Corner::Ne => Point::new(self.right(), self.y),
            Corner::Sw => Point::new(self.x, self.bottom()),
            Corner::Se => Point::new(self.right(), self.bottom()),
        }
    }

    /// Restore the page invariant: size within `[MIN_RECT_SIZE, 1]`, origin
    /// within `[0, 1-width] × [0, 1-height]`. Size is kept, origin moves.
    #[must_use]
    pub fn clamped(self) -> Self {
        let width = clamp(self.width, MIN_RECT_SIZE, 1.0);
        let height = clamp(self.height, MIN_RECT_SIZE, 1.0);
        Self { x: clamp(self.x, 0.0, 1.0 - width), y: clamp(self.y, 0.0, 1.0 - height), width, height }
    }

    /// This rectangle translated by `(dx, dy)`, with its origin clamped so it
    /// stays on the page.
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: clamp(self.x + dx, 0.0, 1.0 - self.width),
            y: clamp(self.y + dy, 0.0, 1.0 - self.height),
            ..self
        }
    }

    /// Resize by dragging `corner` by `(dx, dy)`. The opposite corner stays
    /// fixed; each side is floored at `MIN_RECT_SIZE` and the result never
    /// leaves the page.
    #[must_use]
    pub fn resized(self, corner: Corner, dx: f64, dy: f64) -> Self {
        let (left, right) = match corner {
            Corner::Nw | Corner::Sw => {
                let right = self.right();
                (clamp(self.x + dx, 0.0, (right - MIN_RECT_SIZE).max(0.0)), right)
            }
            Corner::Ne | Corner::Se => {
                let left = self.x;
                (left, clamp(self.right() + dx, (left + MIN_RECT_SIZE).min(1.0), 1.0))
            }
        };
        let (top, bottom) = match corner {
            Corner::Nw | Corner::Ne => {
                let bottom = self.bottom();
                (clamp(self.y + dy, 0.0, (bottom - MIN_RECT_SIZE).max(0.0)), bottom)
            }
            Corner::Sw | Corner::Se => {
                let top = self.y;
                (top, clamp(self.bottom() + dy, (top + MIN_RECT_SIZE).min(1.0), 1.0))
            }
        };
        Self { x: left, y: top, width: right - left, height: bottom - top }
    }
}

/// Screen-space bounding box of the page image as currently displayed.
///
/// The host reports this after zoom and scroll are applied, so converting a
/// pointer position through it yields zoom-independent page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceBounds {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Convert a screen-space pointer position into a clamped page point.
    #[must_use]
    pub fn to_relative(&self, screen: Point) -> Point {
        Point { x: ratio(screen.x - self.left, self.width), y: ratio(screen.y - self.top, self.height) }.clamped()
    }

    /// Convert a screen-space distance into page units along each axis.
    #[must_use]
    pub fn px_to_relative(&self, dx_px: f64, dy_px: f64) -> (f64, f64) {
        (ratio(dx_px, self.width), ratio(dy_px, self.height))
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 { num / den } else { 0.0 }
}
