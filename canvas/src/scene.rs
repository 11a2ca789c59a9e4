//! Scene building: the pure, browser-free description of one frame.
//!
//! [`build`] folds the board, interaction state, and any in-progress gesture
//! into a flat list of things to paint, in paint order. Drag previews are
//! applied here (the board itself only moves on release), as are connection
//! highlights and the skipping of yarn whose endpoint no longer resolves.
//! [`crate::render`] consumes the result without consulting any other state.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::board::{Board, Mascot};
use crate::camera::{Camera, Point};
use crate::config::BoardConfig;
use crate::doc::{Card, ItemRef, LinedPaper, Photo, StickyNote, WantedPoster};
use crate::drawing::{DrawingController, Pen};
use crate::input::{DragTarget, InputState, UiState};
use crate::notify::Notification;

/// Connection-mode border state of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    None,
    /// The pending connection source.
    Source,
    /// Already connected to the pending source.
    Connected,
}

/// Variant data needed to paint a card face.
#[derive(Debug, Clone, Copy)]
pub enum CardBody<'a> {
    Photo(&'a Photo),
    Note(&'a StickyNote),
    Wanted(&'a WantedPoster),
    Paper(&'a LinedPaper),
}

impl<'a> CardBody<'a> {
    #[must_use]
    pub fn card(self) -> &'a dyn Card {
        match self {
            Self::Photo(c) => c,
            Self::Note(c) => c,
            Self::Wanted(c) => c,
            Self::Paper(c) => c,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SceneCard<'a> {
    pub body: CardBody<'a>,
    /// Top-left corner in board space, including any drag preview offset.
    pub origin: Point,
    pub highlight: Highlight,
    /// Whether the card is the active drawing target.
    pub drawing: bool,
}

/// One yarn edge between two resolved anchors.
#[derive(Debug, Clone, PartialEq)]
pub struct YarnSegment {
    pub from: Point,
    pub to: Point,
    pub color: String,
}

/// Stroke being recorded, in board space.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePreview {
    pub points: Vec<Point>,
    pub pen: Pen,
}

#[derive(Debug, Clone)]
pub struct Scene<'a> {
    pub cards: Vec<SceneCard<'a>>,
    pub yarn: Vec<YarnSegment>,
    pub mascots: Vec<Mascot>,
    pub stroke: Option<StrokePreview>,
    pub notification: Option<&'a Notification>,
}

/// Everything [`build`] reads.
pub struct SceneInput<'a> {
    pub board: &'a Board,
    pub ui: &'a UiState,
    pub input: &'a InputState,
    pub drawing: &'a DrawingController,
    pub camera: &'a Camera,
    pub config: &'a BoardConfig,
    pub notification: Option<&'a Notification>,
}

/// Build the frame for the current state.
#[must_use]
pub fn build<'a>(src: &SceneInput<'a>) -> Scene<'a> {
    let board = src.board;
    let preview = DragPreview::from_input(src);

    let bodies = board
        .photos
        .iter()
        .map(CardBody::Photo)
        .chain(board.notes.iter().map(CardBody::Note))
        .chain(board.wanted_posters.iter().map(CardBody::Wanted))
        .chain(board.papers.iter().map(CardBody::Paper));

    let cards = bodies
        .map(|body| {
            let card = body.card();
            let item = card.item_ref();
            let pos = card.position();
            let (dx, dy) = preview.offset_of(&item);
            SceneCard {
                body,
                origin: Point::new(pos.x + dx, pos.y + dy),
                highlight: highlight_of(board, src.ui, &item),
                drawing: src.drawing.is_drawing(&item),
            }
        })
        .collect();

    let yarn = board
        .connections
        .iter()
        .filter_map(|edge| {
            let from = preview.anchor(board, &edge.from_ref())?;
            let to = preview.anchor(board, &edge.to_ref())?;
            Some(YarnSegment { from, to, color: edge.color.clone() })
        })
        .collect();

    let mascots = board
        .mascots
        .iter()
        .map(|m| {
            let mut m = m.clone();
            if let Some((id, dx, dy)) = &preview.mascot {
                if *id == m.id {
                    m.x += dx;
                    m.y += dy;
                }
            }
            m
        })
        .collect();

    Scene { cards, yarn, mascots, stroke: stroke_preview(src), notification: src.notification }
}

fn highlight_of(board: &Board, ui: &UiState, item: &ItemRef) -> Highlight {
    if !ui.connection_mode {
        return Highlight::None;
    }
    let Some(source) = ui.pending_source.as_ref() else {
        return Highlight::None;
    };
    if source == item {
        Highlight::Source
    } else if board.connections.are_connected(&source.id, &item.id) {
        Highlight::Connected
    } else {
        Highlight::None
    }
}

fn stroke_preview(src: &SceneInput<'_>) -> Option<StrokePreview> {
    let points = src.drawing.in_progress()?;
    let origin = src.board.card(src.drawing.target()?)?.position();
    let points = points
        .chunks_exact(2)
        .map(|xy| Point::new(origin.x + xy[0], origin.y + xy[1]))
        .collect();
    Some(StrokePreview { points, pen: src.drawing.pen.clone() })
}

/// Offsets applied to cards and mascots that are mid-drag.
#[derive(Default)]
struct DragPreview {
    items: Vec<ItemRef>,
    delta: (f64, f64),
    mascot: Option<(String, f64, f64)>,
}

impl DragPreview {
    fn from_input(src: &SceneInput<'_>) -> Self {
        let InputState::Dragging { target, start_screen, last_screen, active: true } = src.input else {
            return Self::default();
        };
        let (dx, dy) = src.camera.drag_delta(*start_screen, *last_screen, src.config.scale_drag_by_zoom);
        match target {
            DragTarget::Item(item) => Self { items: src.board.drag_set(item), delta: (dx, dy), mascot: None },
            DragTarget::Mascot(id) => Self { items: Vec::new(), delta: (0.0, 0.0), mascot: Some((id.clone(), dx, dy)) },
        }
    }

    fn offset_of(&self, item: &ItemRef) -> (f64, f64) {
        if self.items.contains(item) { self.delta } else { (0.0, 0.0) }
    }

    fn anchor(&self, board: &Board, item: &ItemRef) -> Option<Point> {
        let anchor = board.yarn_anchor(item)?;
        let (dx, dy) = self.offset_of(item);
        Some(Point::new(anchor.x + dx, anchor.y + dy))
    }
}
