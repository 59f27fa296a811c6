#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::{ROTATE_STEP_DEG, ROTATION_SNAPS_DEG, ROTATION_SNAP_TOLERANCE_DEG};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// =============================================================
// grid_spacing
// =============================================================

#[test]
fn grid_spacing_divides_by_scale() {
    assert!(approx_eq(grid_spacing(50.0, 2.0), 25.0));
    assert!(approx_eq(grid_spacing(50.0, 0.5), 100.0));
}

#[test]
fn grid_spacing_zero_scale_falls_back_to_base() {
    assert_eq!(grid_spacing(50.0, 0.0), 50.0);
    assert_eq!(grid_spacing(50.0, -1.0), 50.0);
}

// =============================================================
// snap_to_grid
// =============================================================

#[test]
fn snap_rounds_to_nearest_cell() {
    assert_eq!(snap_to_grid(74.0, 50.0), 50.0);
    assert_eq!(snap_to_grid(76.0, 50.0), 100.0);
    assert_eq!(snap_to_grid(-26.0, 50.0), -50.0);
}

#[test]
fn snap_is_idempotent() {
    for &g in &[7.0, 25.0, 33.333, 50.0] {
        for i in -40..40 {
            let x = f64::from(i) * 3.7;
            let once = snap_to_grid(x, g);
            assert!(approx_eq(snap_to_grid(once, g), once), "x={x} g={g}");
        }
    }
}

#[test]
fn snap_with_zero_spacing_is_identity() {
    assert_eq!(snap_to_grid(12.3, 0.0), 12.3);
}

// =============================================================
// grid_lines
// =============================================================

#[test]
fn grid_lines_cover_both_axes_inclusive() {
    let lines = grid_lines(Size::new(100.0, 50.0), 50.0);
    // x = 0, 50, 100 and y = 0, 50
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], (Point::new(0.0, 0.0), Point::new(0.0, 50.0)));
    assert_eq!(lines[2], (Point::new(100.0, 0.0), Point::new(100.0, 50.0)));
    assert_eq!(lines[4], (Point::new(0.0, 50.0), Point::new(100.0, 50.0)));
}

#[test]
fn grid_lines_empty_for_degenerate_input() {
    assert!(grid_lines(Size::new(0.0, 100.0), 10.0).is_empty());
    assert!(grid_lines(Size::new(100.0, 100.0), 0.0).is_empty());
}

// =============================================================
// resize_with_aspect_lock
// =============================================================

#[test]
fn resize_rejects_below_minimum() {
    let old = Bounds::new(0.0, 0.0, 100.0, 50.0);
    assert_eq!(resize_with_aspect_lock(old, Bounds::new(0.0, 0.0, 19.0, 60.0)), old);
    assert_eq!(resize_with_aspect_lock(old, Bounds::new(0.0, 0.0, 30.0, 15.0)), old);
}

#[test]
fn resize_checks_minimum_after_aspect_correction() {
    let old = Bounds::new(0.0, 0.0, 100.0, 100.0);
    let out = resize_with_aspect_lock(old, Bounds::new(0.0, 0.0, 200.0, 15.0));
    assert_eq!(out.width, 200.0);
    assert!(approx_eq(out.height, 200.0));
}

#[test]
fn resize_accepts_matching_aspect_unchanged() {
    let old = Bounds::new(0.0, 0.0, 100.0, 50.0);
    let new = Bounds::new(5.0, 5.0, 200.0, 100.0);
    assert_eq!(resize_with_aspect_lock(old, new), new);
}

#[test]
fn resize_derives_height_from_width() {
    let old = Bounds::new(0.0, 0.0, 100.0, 50.0);
    let out = resize_with_aspect_lock(old, Bounds::new(0.0, 0.0, 160.0, 120.0));
    assert_eq!(out.width, 160.0);
    assert!(approx_eq(out.height, 80.0));
}

#[test]
fn resize_rejects_when_derived_height_too_small() {
    let old = Bounds::new(0.0, 0.0, 400.0, 40.0);
    // aspect 10: width 150 would need height 15
    let out = resize_with_aspect_lock(old, Bounds::new(0.0, 0.0, 150.0, 30.0));
    assert_eq!(out, old);
}

#[test]
fn resize_accepted_boxes_keep_aspect_and_minimum() {
    let olds = [Bounds::new(0.0, 0.0, 100.0, 50.0), Bounds::new(0.0, 0.0, 30.0, 90.0), Bounds::new(0.0, 0.0, 64.0, 64.0)];
    for old in olds {
        for w in (10..300).step_by(13) {
            for h in (10..300).step_by(17) {
                let proposed = Bounds::new(0.0, 0.0, f64::from(w), f64::from(h));
                let out = resize_with_aspect_lock(old, proposed);
                if out == old {
                    continue;
                }
                assert!((out.aspect() - old.aspect()).abs() <= ASPECT_EPSILON);
                assert!(out.width >= MIN_ITEM_SIZE && out.height >= MIN_ITEM_SIZE);
            }
        }
    }
}

// =============================================================
// Rotation
// =============================================================

#[test]
fn normalize_wraps_negative_and_large_angles() {
    assert_eq!(normalize_degrees(-45.0), 315.0);
    assert_eq!(normalize_degrees(720.0), 0.0);
    assert_eq!(normalize_degrees(405.0), 45.0);
}

#[test]
fn rotate_snap_advances_by_step() {
    assert_eq!(rotate_snap(0.0, ROTATE_STEP_DEG), 45.0);
    assert_eq!(rotate_snap(315.0, ROTATE_STEP_DEG), 0.0);
    assert_eq!(rotate_snap(10.0, ROTATE_STEP_DEG), 55.0);
}

#[test]
fn rotate_snap_eight_steps_returns_to_start() {
    for start in [0.0, 10.0, 45.0, 123.5, 359.0] {
        let mut d = start;
        for _ in 0..8 {
            d = rotate_snap(d, ROTATE_STEP_DEG);
        }
        assert!(approx_eq(d, start), "start={start} got={d}");
    }
}

#[test]
fn snap_rotation_pulls_near_right_angles() {
    let snap = |d| snap_rotation(d, &ROTATION_SNAPS_DEG, ROTATION_SNAP_TOLERANCE_DEG);
    assert_eq!(snap(87.0), 90.0);
    assert_eq!(snap(183.0), 180.0);
    assert_eq!(snap(358.0), 0.0);
    assert_eq!(snap(2.0), 0.0);
}

#[test]
fn snap_rotation_leaves_free_angles() {
    let snap = |d| snap_rotation(d, &ROTATION_SNAPS_DEG, ROTATION_SNAP_TOLERANCE_DEG);
    assert_eq!(snap(30.0), 30.0);
    assert_eq!(snap(-30.0), 330.0);
}

#[test]
fn angle_delta_takes_short_way_round() {
    assert!(approx_eq(angle_delta(10.0, 350.0), 20.0));
    assert!(approx_eq(angle_delta(350.0, 10.0), -20.0));
}

#[test]
fn bearing_is_clockwise_from_up() {
    let c = Point::new(0.0, 0.0);
    assert!(approx_eq(bearing_deg(c, Point::new(0.0, -10.0)), 0.0));
    assert!(approx_eq(bearing_deg(c, Point::new(10.0, 0.0)), 90.0));
    assert!(approx_eq(bearing_deg(c, Point::new(0.0, 10.0)), 180.0));
    assert!(approx_eq(bearing_deg(c, Point::new(-10.0, 0.0)), 270.0));
}

#[test]
fn local_world_round_trip() {
    let origin = Point::new(40.0, 25.0);
    let p = Point::new(71.0, -3.0);
    for rot in [0.0, 33.0, 90.0, 270.0] {
        let back = to_world(origin, rot, to_local(origin, rot, p));
        assert!(point_approx_eq(back, p));
    }
}

#[test]
fn rotate_vec_quarter_turn_is_clockwise() {
    let v = rotate_vec(Point::new(1.0, 0.0), 90.0);
    assert!(point_approx_eq(v, Point::new(0.0, 1.0)));
}

#[test]
fn drag_corner_se_grows_in_place() {
    let orig = Bounds::new(0.0, 0.0, 100.0, 50.0);
    let (origin, b) = drag_corner(Point::new(10.0, 10.0), 0.0, orig, false, false, Point::new(20.0, 10.0));
    assert!(point_approx_eq(origin, Point::new(10.0, 10.0)));
    assert!(approx_eq(b.width, 120.0) && approx_eq(b.height, 60.0));
}

#[test]
fn drag_corner_nw_keeps_opposite_corner_fixed() {
    let orig = Bounds::new(0.0, 0.0, 100.0, 50.0);
    let (origin, b) = drag_corner(Point::new(10.0, 10.0), 0.0, orig, true, true, Point::new(20.0, 10.0));
    assert!(approx_eq(b.width, 80.0) && approx_eq(b.height, 40.0));
    assert!(point_approx_eq(origin, Point::new(30.0, 20.0)));
    assert!(point_approx_eq(Point::new(origin.x + b.width, origin.y + b.height), Point::new(110.0, 60.0)));
}

#[test]
fn drag_corner_follows_dominant_axis() {
    let orig = Bounds::new(0.0, 0.0, 100.0, 50.0);
    let (_, b) = drag_corner(Point::new(0.0, 0.0), 0.0, orig, false, false, Point::new(0.0, 25.0));
    assert!(approx_eq(b.width, 150.0) && approx_eq(b.height, 75.0));
}

#[test]
fn drag_corner_below_minimum_is_rejected() {
    let orig = Bounds::new(0.0, 0.0, 100.0, 50.0);
    let start = Point::new(5.0, 5.0);
    let (origin, b) = drag_corner(start, 0.0, orig, false, false, Point::new(-90.0, -40.0));
    assert_eq!(b, orig);
    assert!(point_approx_eq(origin, start));
}

#[test]
fn drag_corner_shift_follows_rotation() {
    let orig = Bounds::new(0.0, 0.0, 100.0, 50.0);
    let (origin, b) = drag_corner(Point::new(0.0, 0.0), 90.0, orig, true, true, Point::new(10.0, 5.0));
    assert!(approx_eq(b.width, 90.0) && approx_eq(b.height, 45.0));
    assert!(point_approx_eq(origin, Point::new(-5.0, 10.0)));
}

#[test]
fn drag_corner_width_driven_ignores_raw_height() {
    let orig = Bounds::new(0.0, 0.0, 100.0, 100.0);
    let (origin, b) = drag_corner(Point::new(0.0, 0.0), 0.0, orig, false, false, Point::new(100.0, -85.0));
    assert!(approx_eq(b.width, 200.0) && approx_eq(b.height, 200.0));
    assert!(point_approx_eq(origin, Point::new(0.0, 0.0)));
}
