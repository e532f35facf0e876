//! Hit-testing and rubber-band selection against page annotations.
//!
//! Tolerances are specified in screen pixels (see [`crate::consts`]) and
//! converted to page units through the current [`SurfaceBounds`], so a handle
//! stays the same on-screen size at every zoom level.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{HANDLE_RADIUS_PX, POINT_RADIUS_PX};
use crate::doc::{Annotation, AnnotationId};
use crate::geom::{Corner, Point, Rect, SurfaceBounds};

/// Which part of an annotation was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// The annotation itself. For rect annotations, the index of the rectangle.
    Body { rect_index: Option<usize> },
    /// A corner resize handle of one rectangle of a rect annotation.
    Handle { rect_index: usize, corner: Corner },
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub id: AnnotationId,
    pub part: HitPart,
}

/// Corner handles of every rectangle of a rect annotation.
#[must_use]
pub fn handles(annotation: &Annotation) -> Vec<(usize, Corner, Point)> {
    annotation
        .rects()
        .iter()
        .enumerate()
        .flat_map(|(index, rect)| Corner::ALL.into_iter().map(move |corner| (index, corner, rect.corner(corner))))
        .collect()
}

/// Find what lies under `p`.
///
/// Resize handles of the annotations in `with_handles` win over everything;
/// then bodies are tested topmost first (later in `annotations` is higher).
#[must_use]
pub fn hit_test(annotations: &[&Annotation], p: Point, bounds: &SurfaceBounds, with_handles: &[AnnotationId]) -> Option<Hit> {
    let (hx, hy) = bounds.px_to_relative(HANDLE_RADIUS_PX, HANDLE_RADIUS_PX);
    for annotation in annotations.iter().rev().filter(|a| with_handles.contains(&a.id)) {
        for (rect_index, corner, at) in handles(annotation) {
            if (p.x - at.x).abs() <= hx && (p.y - at.y).abs() <= hy {
                return Some(Hit { id: annotation.id, part: HitPart::Handle { rect_index, corner } });
            }
        }
    }

    let (rx, ry) = bounds.px_to_relative(POINT_RADIUS_PX, POINT_RADIUS_PX);
    for annotation in annotations.iter().rev() {
        if let Some(at) = annotation.point() {
            if within_ellipse(p, at, rx, ry) {
                return Some(Hit { id: annotation.id, part: HitPart::Body { rect_index: None } });
            }
            continue;
        }
        if let Some(rect_index) = annotation.rects().iter().position(|r| r.contains(p)) {
            return Some(Hit { id: annotation.id, part: HitPart::Body { rect_index: Some(rect_index) } });
        }
    }
    None
}

/// Ids of the annotations a rubber-band box selects: dots and stamps whose
/// point lies inside, rect annotations with any rectangle overlapping.
#[must_use]
pub fn annotations_in_box(annotations: &[&Annotation], selection: &Rect) -> Vec<AnnotationId> {
    annotations
        .iter()
        .filter(|a| match a.point() {
            Some(p) => selection.contains(p),
            None => a.rects().iter().any(|r| selection.overlaps(r)),
        })
        .map(|a| a.id)
        .collect()
}

fn within_ellipse(p: Point, center: Point, rx: f64, ry: f64) -> bool {
    if rx <= 0.0 || ry <= 0.0 {
        return p == center;
    }
    let dx = (p.x - center.x) / rx;
    let dy = (p.y - center.y) / ry;
    dx * dx + dy * dy <= 1.0
}
