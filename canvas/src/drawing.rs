//! Freehand drawing on cards.
//!
//! At most one card accepts freehand input at a time: the controller holds a
//! single optional target. While a card is the target it cannot be dragged;
//! pointer gestures on it record strokes instead. Finished strokes become
//! [`DrawingPath`]s appended to that card's drawing list by the caller.

#[cfg(test)]
#[path = "drawing_test.rs"]
mod drawing_test;

use crate::camera::Point;
use crate::consts::{DEFAULT_PEN_COLOR, DEFAULT_PEN_WIDTH, MIN_STROKE_POINTS};
use crate::doc::{DrawingPath, ItemRef, new_id};

/// Drawing state of a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Idle,
    Drawing,
}

/// Stroke color and width applied to new paths.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    pub color: String,
    pub width: f64,
}

impl Default for Pen {
    fn default() -> Self {
        Self { color: DEFAULT_PEN_COLOR.to_owned(), width: DEFAULT_PEN_WIDTH }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawingController {
    target: Option<ItemRef>,
    /// Flattened points of the stroke in progress, card-local.
    stroke: Option<Vec<f64>>,
    pub pen: Pen,
}

impl DrawingController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `item` between Idle and Drawing, returning its new mode.
    ///
    /// Entering Drawing makes `item` the only target; any previous target
    /// drops back to Idle and its unfinished stroke is discarded.
    pub fn toggle(&mut self, item: &ItemRef) -> DrawMode {
        self.stroke = None;
        if self.target.as_ref() == Some(item) {
            self.target = None;
            DrawMode::Idle
        } else {
            self.target = Some(item.clone());
            DrawMode::Drawing
        }
    }

    /// Leave drawing mode entirely.
    pub fn stop(&mut self) {
        self.target = None;
        self.stroke = None;
    }

    /// The card currently accepting freehand input.
    #[must_use]
    pub fn target(&self) -> Option<&ItemRef> {
        self.target.as_ref()
    }

    #[must_use]
    pub fn mode_of(&self, item: &ItemRef) -> DrawMode {
        if self.target.as_ref() == Some(item) { DrawMode::Drawing } else { DrawMode::Idle }
    }

    #[must_use]
    pub fn is_drawing(&self, item: &ItemRef) -> bool {
        self.mode_of(item) == DrawMode::Drawing
    }

    /// Start a stroke at `local`. Ignored unless some card is the target.
    pub fn begin_stroke(&mut self, local: Point) -> bool {
        if self.target.is_none() {
            return false;
        }
        self.stroke = Some(vec![local.x, local.y]);
        true
    }

    /// Append a point to the stroke in progress. Ignored when no stroke is active.
    pub fn extend_stroke(&mut self, local: Point) -> bool {
        let Some(stroke) = self.stroke.as_mut() else {
            return false;
        };
        stroke.push(local.x);
        stroke.push(local.y);
        true
    }

    /// Finish the stroke in progress.
    ///
    /// Returns the target card and the new path, or `None` when there was no
    /// stroke or it recorded too few points to keep.
    pub fn finish_stroke(&mut self) -> Option<(ItemRef, DrawingPath)> {
        let points = self.stroke.take()?;
        if points.len() < MIN_STROKE_POINTS * 2 {
            return None;
        }
        let target = self.target.clone()?;
        let path = DrawingPath {
            id: new_id("path"),
            points,
            color: self.pen.color.clone(),
            stroke_width: self.pen.width,
        };
        Some((target, path))
    }

    /// Flattened points of the stroke in progress, if any.
    #[must_use]
    pub fn in_progress(&self) -> Option<&[f64]> {
        self.stroke.as_deref()
    }

    /// Forget the target if it is `item` (used when the card is deleted).
    pub fn forget(&mut self, item: &ItemRef) {
        if self.target.as_ref() == Some(item) {
            self.stop();
        }
    }
}
