//! Document model: the four card variants, their sparse patches, and the
//! ordered per-variant store.
//!
//! Cards share one shape (an id, a board-space position, a cosmetic rotation
//! and an optional list of freehand paths) expressed by the [`Card`] trait,
//! plus variant fields. [`ItemRef`] is the tagged `(kind, id)` reference the
//! rest of the crate uses to address a card without knowing which store
//! holds it.
//!
//! Field names serialize in camelCase because they double as the board
//! document's wire format (see [`crate::persist`]).

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::{
    NOTE_SIZE, PAPER_SIZE, PAPER_YARN_ANCHOR_DX, PHOTO_SIZE, WANTED_SIZE, YARN_ANCHOR_DX, YARN_ANCHOR_DY,
};

/// Identifier of a card, path, group, or connection.
pub type ItemId = String;

/// Generate a fresh identifier with a readable prefix, e.g. `note-6f1c…`.
#[must_use]
pub fn new_id(prefix: &str) -> ItemId {
    format!("{prefix}-{}", Uuid::new_v4())
}

/// The kind of a card. Serialized as the type tag on yarn connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Polaroid-style photo.
    Photo,
    /// Sticky note, possibly part of a split group.
    Note,
    /// Wanted poster.
    Wanted,
    /// Sheet of lined paper.
    Paper,
}

impl ItemKind {
    /// Every kind, in draw order (bottom first).
    pub const ALL: [ItemKind; 4] = [Self::Photo, Self::Note, Self::Wanted, Self::Paper];

    /// Prefix used for freshly generated ids of this kind.
    #[must_use]
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Note => "note",
            Self::Wanted => "wanted",
            Self::Paper => "paper",
        }
    }

    /// Card width and height in board units.
    #[must_use]
    pub fn size(self) -> (f64, f64) {
        match self {
            Self::Photo => PHOTO_SIZE,
            Self::Note => NOTE_SIZE,
            Self::Wanted => WANTED_SIZE,
            Self::Paper => PAPER_SIZE,
        }
    }

    /// Offset from the card origin to where yarn is pinned.
    #[must_use]
    pub fn yarn_anchor(self) -> Point {
        match self {
            Self::Paper => Point::new(PAPER_YARN_ANCHOR_DX, YARN_ANCHOR_DY),
            _ => Point::new(YARN_ANCHOR_DX, YARN_ANCHOR_DY),
        }
    }
}

/// Tagged reference to a card in one of the four stores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemRef {
    pub kind: ItemKind,
    pub id: ItemId,
}

impl ItemRef {
    #[must_use]
    pub fn new(kind: ItemKind, id: impl Into<ItemId>) -> Self {
        Self { kind, id: id.into() }
    }

    #[must_use]
    pub fn photo(id: impl Into<ItemId>) -> Self {
        Self::new(ItemKind::Photo, id)
    }

    #[must_use]
    pub fn note(id: impl Into<ItemId>) -> Self {
        Self::new(ItemKind::Note, id)
    }

    #[must_use]
    pub fn wanted(id: impl Into<ItemId>) -> Self {
        Self::new(ItemKind::Wanted, id)
    }

    #[must_use]
    pub fn paper(id: impl Into<ItemId>) -> Self {
        Self::new(ItemKind::Paper, id)
    }
}

/// A freehand stroke drawn on a card, in card-local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingPath {
    pub id: ItemId,
    /// Flattened `x, y` pairs.
    pub points: Vec<f64>,
    pub color: String,
    pub stroke_width: f64,
}

impl DrawingPath {
    /// Number of recorded points (coordinate pairs).
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len() / 2
    }
}

// =============================================================
// Card variants
// =============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: ItemId,
    /// Link to the source the photo documents.
    pub url: String,
    pub title: String,
    pub notes: String,
    pub x: f64,
    pub y: f64,
    pub image_url: String,
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawings: Option<Vec<DrawingPath>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickyNote {
    pub id: ItemId,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawings: Option<Vec<DrawingPath>>,
    /// Shared by every note produced from one oversized text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<ItemId>,
    /// Position within the group, 0 = head.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_index: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WantedPoster {
    pub id: ItemId,
    pub name: String,
    pub alias: String,
    pub crime: String,
    pub description: String,
    pub reward: String,
    pub x: f64,
    pub y: f64,
    pub image_url: String,
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawings: Option<Vec<DrawingPath>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinedPaper {
    pub id: ItemId,
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawings: Option<Vec<DrawingPath>>,
}

// =============================================================
// Patches
// =============================================================

/// Sparse update for a photo. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

/// Sparse update for a sticky note. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

/// Sparse update for a wanted poster. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WantedPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

/// Sparse update for a lined paper. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

fn set<T: Clone>(slot: &mut T, value: Option<&T>) {
    if let Some(v) = value {
        *slot = v.clone();
    }
}

// =============================================================
// Card traits
// =============================================================

/// Behavior shared by every card variant, usable through `dyn Card`.
pub trait Card {
    fn id(&self) -> &str;
    fn kind(&self) -> ItemKind;
    /// Top-left corner in board space.
    fn position(&self) -> Point;
    fn translate(&mut self, dx: f64, dy: f64);
    /// Rotation in degrees. Cosmetic only.
    fn rotation(&self) -> f64;
    /// Freehand paths drawn on the card, oldest first.
    fn drawings(&self) -> &[DrawingPath];
    fn drawings_mut(&mut self) -> &mut Option<Vec<DrawingPath>>;
    /// Short text shown on the card face.
    fn caption(&self) -> &str;

    /// Tagged reference to this card.
    fn item_ref(&self) -> ItemRef {
        ItemRef::new(self.kind(), self.id())
    }

    /// Board-space point where yarn attaches.
    fn yarn_anchor(&self) -> Point {
        let pos = self.position();
        let offset = self.kind().yarn_anchor();
        Point::new(pos.x + offset.x, pos.y + offset.y)
    }
}

/// A card variant with its own store and patch type.
pub trait BoardItem: Card + Clone {
    const KIND: ItemKind;
    type Patch;

    /// Apply the present fields of `patch`.
    fn apply(&mut self, patch: &Self::Patch);
}

macro_rules! card_common {
    ($kind:expr, $caption:ident) => {
        fn id(&self) -> &str {
            &self.id
        }

        fn kind(&self) -> ItemKind {
            $kind
        }

        fn position(&self) -> Point {
            Point::new(self.x, self.y)
        }

        fn translate(&mut self, dx: f64, dy: f64) {
            self.x += dx;
            self.y += dy;
        }

        fn rotation(&self) -> f64 {
            self.rotation
        }

        fn drawings(&self) -> &[DrawingPath] {
            self.drawings.as_deref().unwrap_or_default()
        }

        fn drawings_mut(&mut self) -> &mut Option<Vec<DrawingPath>> {
            &mut self.drawings
        }

        fn caption(&self) -> &str {
            &self.$caption
        }
    };
}

impl Card for Photo {
    card_common!(ItemKind::Photo, title);
}

impl Card for StickyNote {
    card_common!(ItemKind::Note, text);
}

impl Card for WantedPoster {
    card_common!(ItemKind::Wanted, name);
}

impl Card for LinedPaper {
    card_common!(ItemKind::Paper, content);
}

impl BoardItem for Photo {
    const KIND: ItemKind = ItemKind::Photo;
    type Patch = PhotoPatch;

    fn apply(&mut self, patch: &PhotoPatch) {
        set(&mut self.url, patch.url.as_ref());
        set(&mut self.title, patch.title.as_ref());
        set(&mut self.notes, patch.notes.as_ref());
        set(&mut self.image_url, patch.image_url.as_ref());
        set(&mut self.rotation, patch.rotation.as_ref());
    }
}

impl BoardItem for StickyNote {
    const KIND: ItemKind = ItemKind::Note;
    type Patch = NotePatch;

    fn apply(&mut self, patch: &NotePatch) {
        set(&mut self.text, patch.text.as_ref());
        set(&mut self.color, patch.color.as_ref());
        set(&mut self.rotation, patch.rotation.as_ref());
    }
}

impl BoardItem for WantedPoster {
    const KIND: ItemKind = ItemKind::Wanted;
    type Patch = WantedPatch;

    fn apply(&mut self, patch: &WantedPatch) {
        set(&mut self.name, patch.name.as_ref());
        set(&mut self.alias, patch.alias.as_ref());
        set(&mut self.crime, patch.crime.as_ref());
        set(&mut self.description, patch.description.as_ref());
        set(&mut self.reward, patch.reward.as_ref());
        set(&mut self.image_url, patch.image_url.as_ref());
        set(&mut self.rotation, patch.rotation.as_ref());
    }
}

impl BoardItem for LinedPaper {
    const KIND: ItemKind = ItemKind::Paper;
    type Patch = PaperPatch;

    fn apply(&mut self, patch: &PaperPatch) {
        set(&mut self.content, patch.content.as_ref());
        set(&mut self.rotation, patch.rotation.as_ref());
    }
}

// =============================================================
// Store
// =============================================================

/// Ordered store of one card variant. Insertion order is draw order and
/// document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemStore<T> {
    items: Vec<T>,
}

impl<T> Default for ItemStore<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: BoardItem> ItemStore<T> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap items loaded from a document, keeping their order.
    #[must_use]
    pub fn from_vec(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Append a card. Returns `false` (and leaves the store unchanged) if the id is taken.
    pub fn add(&mut self, item: T) -> bool {
        if self.contains(item.id()) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Apply a sparse update. Returns `false` if the card doesn't exist.
    pub fn update(&mut self, id: &str, patch: &T::Patch) -> bool {
        let Some(item) = self.find_by_id_mut(id) else {
            return false;
        };
        item.apply(patch);
        true
    }

    /// Replace a card wholesale, keeping its slot. Returns `false` if the id is unknown.
    pub fn replace(&mut self, item: T) -> bool {
        let Some(slot) = self.find_by_id_mut(item.id()) else {
            return false;
        };
        *slot = item;
        true
    }

    /// Remove a card by id, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let idx = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(idx))
    }

    /// Remove every card matching `pred`, returning the removed cards in order.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> Vec<T> {
        let (removed, kept): (Vec<T>, Vec<T>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| pred(item));
        self.items = kept;
        removed
    }

    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Move one card by a board-space delta. Returns `false` if the card doesn't exist.
    pub fn translate(&mut self, id: &str, dx: f64, dy: f64) -> bool {
        let Some(item) = self.find_by_id_mut(id) else {
            return false;
        };
        item.translate(dx, dy);
        true
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Number of cards currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the store contains no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a ItemStore<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
