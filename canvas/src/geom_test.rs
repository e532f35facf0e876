#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn assert_on_page(r: Rect) {
    assert!(r.x >= 0.0 && r.y >= 0.0, "origin off page: {r:?}");
    assert!(r.right() <= 1.0 + EPSILON && r.bottom() <= 1.0 + EPSILON, "far edge off page: {r:?}");
}

// --- clamp ---

#[test]
fn clamp_inside_range_is_identity() {
    assert_eq!(clamp(0.4, 0.0, 1.0), 0.4);
}

#[test]
fn clamp_below_and_above() {
    assert_eq!(clamp(-0.3, 0.0, 1.0), 0.0);
    assert_eq!(clamp(1.7, 0.0, 1.0), 1.0);
}

#[test]
fn clamp_is_idempotent() {
    for v in [-5.0, -0.0001, 0.0, 0.25, 0.999, 1.0, 1.5, 1e9] {
        let once = clamp(v, 0.0, 1.0);
        assert_eq!(clamp(once, 0.0, 1.0), once);
    }
}

#[test]
fn clamp_nan_goes_to_lower_bound() {
    assert_eq!(clamp(f64::NAN, 0.0, 1.0), 0.0);
}

// --- Point ---

#[test]
fn point_clamped_pulls_into_unit_square() {
    let p = Point::new(-0.2, 1.3).clamped();
    assert_eq!(p, Point::new(0.0, 1.0));
}

#[test]
fn point_offset_and_distance() {
    let p = Point::new(0.1, 0.1).offset(0.3, 0.4);
    assert!(approx_eq(p.x, 0.4));
    assert!(approx_eq(p.y, 0.5));
    assert!(approx_eq(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0));
}

// --- SurfaceBounds ---

#[test]
fn to_relative_maps_surface_corners() {
    let bounds = SurfaceBounds::new(100.0, 50.0, 800.0, 1000.0);
    assert_eq!(bounds.to_relative(Point::new(100.0, 50.0)), Point::new(0.0, 0.0));
    assert_eq!(bounds.to_relative(Point::new(900.0, 1050.0)), Point::new(1.0, 1.0));
    let mid = bounds.to_relative(Point::new(500.0, 550.0));
    assert!(approx_eq(mid.x, 0.5));
    assert!(approx_eq(mid.y, 0.5));
}

#[test]
fn to_relative_clamps_outside_surface() {
    let bounds = SurfaceBounds::new(0.0, 0.0, 200.0, 200.0);
    assert_eq!(bounds.to_relative(Point::new(-40.0, 260.0)), Point::new(0.0, 1.0));
}

#[test]
fn to_relative_is_zoom_independent() {
    // The same page spot under two zoom levels reports the same relative point.
    let small = SurfaceBounds::new(0.0, 0.0, 400.0, 600.0);
    let zoomed = SurfaceBounds::new(-200.0, -300.0, 800.0, 1200.0);
    let a = small.to_relative(Point::new(100.0, 150.0));
    let b = zoomed.to_relative(Point::new(0.0, 0.0));
    assert!(approx_eq(a.x, b.x));
    assert!(approx_eq(a.y, b.y));
}

#[test]
fn to_relative_degenerate_bounds_maps_to_origin() {
    let bounds = SurfaceBounds::default();
    assert_eq!(bounds.to_relative(Point::new(10.0, 10.0)), Point::new(0.0, 0.0));
}

#[test]
fn px_to_relative_scales_by_surface_size() {
    let bounds = SurfaceBounds::new(0.0, 0.0, 400.0, 200.0);
    let (dx, dy) = bounds.px_to_relative(8.0, 8.0);
    assert!(approx_eq(dx, 0.02));
    assert!(approx_eq(dy, 0.04));
}

// --- Rect basics ---

#[test]
fn from_corners_normalizes_order() {
    let r = Rect::from_corners(Point::new(0.5, 0.6), Point::new(0.2, 0.1));
    assert!(approx_eq(r.x, 0.2));
    assert!(approx_eq(r.y, 0.1));
    assert!(approx_eq(r.width, 0.3));
    assert!(approx_eq(r.height, 0.5));
}

#[test]
fn contains_is_inclusive_of_edges() {
    let r = Rect::new(0.1, 0.1, 0.2, 0.2);
    assert!(r.contains(Point::new(0.1, 0.1)));
    assert!(r.contains(Point::new(0.3, 0.3)));
    assert!(!r.contains(Point::new(0.31, 0.2)));
}

#[test]
fn overlap_includes_corner_touching_rect() {
    let selection = Rect::new(0.1, 0.1, 0.3, 0.3);
    assert!(selection.overlaps(&Rect::new(0.05, 0.05, 0.1, 0.1)));
}

#[test]
fn overlap_excludes_disjoint_rect() {
    let selection = Rect::new(0.1, 0.1, 0.3, 0.3);
    assert!(!selection.overlaps(&Rect::new(0.5, 0.5, 0.1, 0.1)));
}

#[test]
fn overlap_includes_shared_edge() {
    let a = Rect::new(0.0, 0.0, 0.5, 0.5);
    let b = Rect::new(0.5, 0.2, 0.2, 0.2);
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn corners_report_expected_positions() {
    let r = Rect::new(0.1, 0.2, 0.3, 0.4);
    assert_eq!(r.corner(Corner::Nw), Point::new(0.1, 0.2));
    let se = r.corner(Corner::Se);
    assert!(approx_eq(se.x, 0.4));
    assert!(approx_eq(se.y, 0.6));
}

// --- translated ---

#[test]
fn translated_moves_origin() {
    let r = Rect::new(0.2, 0.2, 0.1, 0.05).translated(0.1, 0.0);
    assert!(approx_eq(r.x, 0.3));
    assert!(approx_eq(r.y, 0.2));
    assert!(approx_eq(r.width, 0.1));
}

#[test]
fn translated_past_edges_stays_on_page() {
    let r = Rect::new(0.8, 0.9, 0.15, 0.08);
    let pushed = r.translated(0.5, 0.5);
    assert_on_page(pushed);
    assert!(approx_eq(pushed.right(), 1.0));
    assert!(approx_eq(pushed.bottom(), 1.0));
    let pulled = r.translated(-3.0, -3.0);
    assert_eq!(pulled.x, 0.0);
    assert_eq!(pulled.y, 0.0);
}

// --- resized ---

#[test]
fn resize_se_grows_from_fixed_origin() {
    let r = Rect::new(0.3, 0.2, 0.1, 0.05).resized(Corner::Se, 0.05, 0.05);
    assert!(approx_eq(r.x, 0.3));
    assert!(approx_eq(r.y, 0.2));
    assert!(approx_eq(r.width, 0.15));
    assert!(approx_eq(r.height, 0.1));
}

#[test]
fn resize_nw_keeps_se_corner_fixed() {
    let r = Rect::new(0.3, 0.3, 0.2, 0.2);
    let out = r.resized(Corner::Nw, -0.1, 0.05);
    assert!(approx_eq(out.right(), 0.5));
    assert!(approx_eq(out.bottom(), 0.5));
    assert!(approx_eq(out.x, 0.2));
    assert!(approx_eq(out.y, 0.35));
}

#[test]
fn resize_ne_and_sw_keep_opposite_corner() {
    let r = Rect::new(0.3, 0.3, 0.2, 0.2);
    let ne = r.resized(Corner::Ne, 0.1, -0.1);
    assert!(approx_eq(ne.x, 0.3));
    assert!(approx_eq(ne.bottom(), 0.5));
    let sw = r.resized(Corner::Sw, -0.1, 0.1);
    assert!(approx_eq(sw.right(), 0.5));
    assert!(approx_eq(sw.y, 0.3));
}

#[test]
fn resize_floors_at_minimum_size() {
    let r = Rect::new(0.3, 0.3, 0.2, 0.2);
    let crushed = r.resized(Corner::Se, -1.0, -1.0);
    assert!(approx_eq(crushed.width, MIN_RECT_SIZE));
    assert!(approx_eq(crushed.height, MIN_RECT_SIZE));
    let inverted = r.resized(Corner::Nw, 1.0, 1.0);
    assert!(approx_eq(inverted.width, MIN_RECT_SIZE));
    assert!(approx_eq(inverted.right(), 0.5));
}

#[test]
fn resize_never_leaves_page() {
    let r = Rect::new(0.7, 0.7, 0.2, 0.2);
    for corner in Corner::ALL {
        assert_on_page(r.resized(corner, 2.0, 2.0));
        assert_on_page(r.resized(corner, -2.0, -2.0));
    }
}

#[test]
fn clamped_repairs_out_of_range_rect() {
    let r = Rect::new(0.95, -0.2, 0.1, 0.0).clamped();
    assert_on_page(r);
    assert!(approx_eq(r.height, MIN_RECT_SIZE));
    assert!(approx_eq(r.width, 0.1));
}
