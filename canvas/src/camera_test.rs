#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// =============================================================
// Point
// =============================================================

#[test]
fn point_distance_is_euclidean() {
    assert!(approx_eq(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0));
}

#[test]
fn point_distance_is_symmetric() {
    let a = Point::new(-2.0, 7.5);
    let b = Point::new(4.0, -1.0);
    assert!(approx_eq(a.distance(b), b.distance(a)));
}

// =============================================================
// Coordinate conversion
// =============================================================

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
    assert_eq!(cam.zoom, 1.0);
    assert!(point_approx_eq(cam.screen_to_world(Point::new(50.0, 75.0)), Point::new(50.0, 75.0)));
}

#[test]
fn screen_to_world_undoes_pan_then_zoom() {
    let cam = Camera { pan_x: 100.0, pan_y: 50.0, zoom: 2.0 };
    let world = cam.screen_to_world(Point::new(300.0, 250.0));
    assert!(point_approx_eq(world, Point::new(100.0, 100.0)));
}

#[test]
fn world_to_screen_inverts_screen_to_world() {
    let cam = Camera { pan_x: -37.0, pan_y: 12.5, zoom: 0.75 };
    let screen = Point::new(412.0, 96.0);
    let back = cam.world_to_screen(cam.screen_to_world(screen));
    assert!(point_approx_eq(back, screen));
}

#[test]
fn screen_dist_to_world_scales_by_zoom() {
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 2.5 };
    assert!(approx_eq(cam.screen_dist_to_world(10.0), 4.0));
}

// =============================================================
// Pan
// =============================================================

#[test]
fn pan_adds_delta() {
    let mut cam = Camera::default();
    cam.pan(15.0, -20.0);
    cam.pan(5.0, 5.0);
    assert_eq!(cam.pan_x, 20.0);
    assert_eq!(cam.pan_y, -15.0);
    assert_eq!(cam.zoom, 1.0);
}

// =============================================================
// Drag delta
// =============================================================

#[test]
fn drag_delta_divides_by_zoom_when_scaled() {
    let cam = Camera { pan_x: 30.0, pan_y: 30.0, zoom: 2.0 };
    let (dx, dy) = cam.drag_delta(Point::new(10.0, 10.0), Point::new(50.0, -10.0), true);
    assert!(approx_eq(dx, 20.0));
    assert!(approx_eq(dy, -10.0));
}

#[test]
fn drag_delta_raw_when_unscaled() {
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 0.5 };
    let (dx, dy) = cam.drag_delta(Point::new(0.0, 0.0), Point::new(40.0, 30.0), false);
    assert_eq!((dx, dy), (40.0, 30.0));
}

// =============================================================
// Zoom
// =============================================================

#[test]
fn zoom_in_multiplies_by_step() {
    let mut cam = Camera::default();
    assert!(cam.zoom_at(Point::new(0.0, 0.0), -100.0, &ZoomConfig::default()));
    assert!(approx_eq(cam.zoom, 1.1));
}

#[test]
fn zoom_out_divides_by_step() {
    let mut cam = Camera::default();
    assert!(cam.zoom_at(Point::new(0.0, 0.0), 100.0, &ZoomConfig::default()));
    assert!(approx_eq(cam.zoom, 1.0 / 1.1));
}

#[test]
fn zoom_keeps_point_under_pointer_fixed() {
    let limits = ZoomConfig::default();
    let mut cam = Camera { pan_x: 40.0, pan_y: -25.0, zoom: 1.3 };
    let pointer = Point::new(321.0, 187.0);
    for dy in [-1.0, -1.0, 1.0, -3.0, 2.0, 2.0, 2.0] {
        let before = cam.screen_to_world(pointer);
        cam.zoom_at(pointer, dy, &limits);
        let after = cam.screen_to_world(pointer);
        assert!(point_approx_eq(before, after), "{before:?} != {after:?}");
    }
}

#[test]
fn zoom_clamps_to_max() {
    let limits = ZoomConfig::default();
    let mut cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 2.9 };
    assert!(cam.zoom_at(Point::new(10.0, 10.0), -1.0, &limits));
    assert_eq!(cam.zoom, 3.0);
    assert!(!cam.zoom_at(Point::new(10.0, 10.0), -1.0, &limits));
    assert_eq!(cam.zoom, 3.0);
}

#[test]
fn zoom_clamps_to_min() {
    let limits = ZoomConfig::default();
    let mut cam = Camera::default();
    for _ in 0..100 {
        cam.zoom_at(Point::new(0.0, 0.0), 1.0, &limits);
    }
    assert_eq!(cam.zoom, 0.1);
}

#[test]
fn inverted_limits_settle_on_max() {
    let limits = ZoomConfig { min: 5.0, max: 3.0, step: 1.1 };
    let mut cam = Camera::default();
    assert!(cam.zoom_at(Point::new(10.0, 10.0), -1.0, &limits));
    assert_eq!(cam.zoom, 3.0);
}

#[test]
fn nan_limits_do_not_stop_zooming() {
    let limits = ZoomConfig { min: f64::NAN, max: f64::NAN, step: 1.1 };
    let mut cam = Camera::default();
    assert!(cam.zoom_at(Point::new(0.0, 0.0), -1.0, &limits));
    assert!((cam.zoom - 1.1).abs() < 1e-12);
}

#[test]
fn zoom_at_limit_leaves_pan_untouched() {
    let limits = ZoomConfig::default();
    let mut cam = Camera { pan_x: 12.0, pan_y: 34.0, zoom: 0.1 };
    assert!(!cam.zoom_at(Point::new(500.0, 500.0), 1.0, &limits));
    assert_eq!(cam.pan_x, 12.0);
    assert_eq!(cam.pan_y, 34.0);
}

#[test]
fn zoom_with_zero_delta_is_noop() {
    let mut cam = Camera { pan_x: 5.0, pan_y: 6.0, zoom: 1.5 };
    assert!(!cam.zoom_at(Point::new(100.0, 100.0), 0.0, &ZoomConfig::default()));
    assert_eq!(cam.zoom, 1.5);
    assert_eq!(cam.pan_x, 5.0);
}

#[test]
fn zoom_ignores_non_finite_delta() {
    let mut cam = Camera::default();
    assert!(!cam.zoom_at(Point::new(0.0, 0.0), f64::NAN, &ZoomConfig::default()));
    assert_eq!(cam.zoom, 1.0);
}

#[test]
fn zoom_respects_custom_limits() {
    let limits = ZoomConfig { min: 0.5, max: 1.5, step: 2.0 };
    let mut cam = Camera::default();
    cam.zoom_at(Point::new(0.0, 0.0), -1.0, &limits);
    assert_eq!(cam.zoom, 1.5);
    cam.zoom_at(Point::new(0.0, 0.0), 1.0, &limits);
    cam.zoom_at(Point::new(0.0, 0.0), 1.0, &limits);
    assert_eq!(cam.zoom, 0.5);
}
