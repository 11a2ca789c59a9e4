#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::board::{Board, Mascot};
use crate::camera::Point;
use crate::consts::MASCOT_GRIP_SIZE;
use crate::doc::{Card, ItemRef};

/// Axis-aligned rectangle in board space.
#[derive(Debug, Clone, Copy, PartialEq)]
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

    /// Whether `pt` lies inside or on the edge.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }
}

/// What was hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Item(ItemRef),
    Mascot(String),
}

/// Which part of the target was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    /// The mascot's bottom-right resize grip.
    ResizeHandle,
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub target: HitTarget,
    pub part: HitPart,
}

/// Bounding box of a card. Rotation is cosmetic and ignored.
#[must_use]
pub fn card_bounds(card: &dyn Card) -> Rect {
    let pos = card.position();
    let (w, h) = card.kind().size();
    Rect::new(pos.x, pos.y, w, h)
}

#[must_use]
pub fn mascot_bounds(mascot: &Mascot) -> Rect {
    Rect::new(mascot.x, mascot.y, mascot.width, mascot.height)
}

/// The resize grip square in the mascot's bottom-right corner.
#[must_use]
pub fn mascot_grip(mascot: &Mascot) -> Rect {
    Rect::new(
        mascot.x + mascot.width - MASCOT_GRIP_SIZE,
        mascot.y + mascot.height - MASCOT_GRIP_SIZE,
        MASCOT_GRIP_SIZE,
        MASCOT_GRIP_SIZE,
    )
}

/// Topmost thing under `world_pt`.
///
/// Mascots sit above every card. Cards are tested in reverse draw order, so
/// the last-drawn card wins an overlap.
#[must_use]
pub fn hit_test(world_pt: Point, board: &Board) -> Option<Hit> {
    for mascot in board.mascots.iter().rev() {
        if mascot_grip(mascot).contains(world_pt) {
            return Some(Hit { target: HitTarget::Mascot(mascot.id.clone()), part: HitPart::ResizeHandle });
        }
        if mascot_bounds(mascot).contains(world_pt) {
            return Some(Hit { target: HitTarget::Mascot(mascot.id.clone()), part: HitPart::Body });
        }
    }

    let cards: Vec<&dyn Card> = board.cards().collect();
    cards
        .into_iter()
        .rev()
        .find(|card| card_bounds(*card).contains(world_pt))
        .map(|card| Hit { target: HitTarget::Item(card.item_ref()), part: HitPart::Body })
}

/// Convert a board-space point into `card`'s local coordinates.
#[must_use]
pub fn to_local(card: &dyn Card, world_pt: Point) -> Point {
    let pos = card.position();
    Point::new(world_pt.x - pos.x, world_pt.y - pos.y)
}
