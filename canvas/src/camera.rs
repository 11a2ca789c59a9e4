#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::config::ZoomConfig;

/// A point in either screen or board space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Camera state for pan/zoom over the board.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to board coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a board-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to board-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Board-space delta for a pointer drag from `start` to `end` (screen points).
    ///
    /// With `scale_by_zoom` the delta is divided by the zoom so the dragged card
    /// stays under the pointer; without it the screen delta is used as-is.
    #[must_use]
    pub fn drag_delta(&self, start: Point, end: Point, scale_by_zoom: bool) -> (f64, f64) {
        let (dx, dy) = (end.x - start.x, end.y - start.y);
        if scale_by_zoom { (dx / self.zoom, dy / self.zoom) } else { (dx, dy) }
    }

    /// Shift the board by a screen-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Zoom one wheel notch around `screen`, keeping the board point under it fixed.
    ///
    /// Negative `wheel_dy` (wheel up) zooms in by `limits.step`, positive zooms
    /// out. A zero delta (pure horizontal scroll) leaves the camera untouched.
    /// Returns `true` if the camera changed. Limits are applied as `max` then
    /// `min`, so an inverted range settles on `limits.max` instead of panicking.
    pub fn zoom_at(&mut self, screen: Point, wheel_dy: f64, limits: &ZoomConfig) -> bool {
        if wheel_dy == 0.0 || !wheel_dy.is_finite() {
            return false;
        }
        let anchor = self.screen_to_world(screen);
        let target = if wheel_dy > 0.0 { self.zoom / limits.step } else { self.zoom * limits.step };
        let clamped = target.max(limits.min).min(limits.max);
        if (clamped - self.zoom).abs() < f64::EPSILON {
            return false;
        }
        self.zoom = clamped;
        self.pan_x = screen.x - anchor.x * clamped;
        self.pan_y = screen.y - anchor.y * clamped;
        true
    }
}
