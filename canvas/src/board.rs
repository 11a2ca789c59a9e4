//! The board aggregate: four card stores, the yarn graph, and the mascot.
//!
//! Every mutation that spans stores lives here: cascade deletes (a deleted
//! card takes its yarn with it, a deleted group note takes its whole group),
//! rigid group drags, and the note split that turns one oversized note into
//! a group. Cards are addressed through [`ItemRef`] so none of these paths
//! needs to know which store holds a card.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use log::debug;
use rand::Rng;

use crate::camera::Point;
use crate::config::BoardConfig;
use crate::consts::{
    CARD_ROTATION_SPREAD_DEG, DEFAULT_BOARD_TITLE, DEFAULT_NOTE_COLOR, DEFAULT_PHOTO_TITLE, DEFAULT_WANTED_REWARD,
    MASCOT_MIN_WIDTH, PHOTO_ROTATION_SPREAD_DEG, SPAWN_ORIGIN, SPAWN_SPAN,
};
use crate::doc::{
    BoardItem, Card, DrawingPath, ItemId, ItemKind, ItemRef, ItemStore, LinedPaper, NotePatch, PaperPatch, Photo,
    PhotoPatch, StickyNote, WantedPatch, WantedPoster, new_id,
};
use crate::graph::{ConnectionGraph, Toggle, YarnConnection};
use crate::group;

/// The decorative mascot image. Draggable and resizable, never connected or saved.
#[derive(Debug, Clone, PartialEq)]
pub struct Mascot {
    pub id: ItemId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Outcome of [`Board::update_note`].
#[derive(Debug, Clone, PartialEq)]
pub enum NoteUpdate {
    /// The note was updated in place.
    Updated,
    /// The text was too long and the note became the head of a new group.
    Split {
        group_id: ItemId,
        /// Every note of the new group, head first.
        parts: Vec<ItemRef>,
    },
    /// No note has that id.
    NotFound,
}

/// What a cascade delete removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Deleted {
    pub items: Vec<ItemRef>,
    pub connections: Vec<YarnConnection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub title: String,
    pub photos: ItemStore<Photo>,
    pub notes: ItemStore<StickyNote>,
    pub wanted_posters: ItemStore<WantedPoster>,
    pub papers: ItemStore<LinedPaper>,
    pub connections: ConnectionGraph,
    pub mascots: Vec<Mascot>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_TITLE)
    }
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            photos: ItemStore::new(),
            notes: ItemStore::new(),
            wanted_posters: ItemStore::new(),
            papers: ItemStore::new(),
            connections: ConnectionGraph::new(),
            mascots: Vec::new(),
        }
    }

    // --- Lookup ---

    /// Look up any card by reference.
    #[must_use]
    pub fn card(&self, item: &ItemRef) -> Option<&dyn Card> {
        match item.kind {
            ItemKind::Photo => self.photos.find_by_id(&item.id).map(|c| c as &dyn Card),
            ItemKind::Note => self.notes.find_by_id(&item.id).map(|c| c as &dyn Card),
            ItemKind::Wanted => self.wanted_posters.find_by_id(&item.id).map(|c| c as &dyn Card),
            ItemKind::Paper => self.papers.find_by_id(&item.id).map(|c| c as &dyn Card),
        }
    }

    pub fn card_mut(&mut self, item: &ItemRef) -> Option<&mut dyn Card> {
        match item.kind {
            ItemKind::Photo => self.photos.find_by_id_mut(&item.id).map(|c| c as &mut dyn Card),
            ItemKind::Note => self.notes.find_by_id_mut(&item.id).map(|c| c as &mut dyn Card),
            ItemKind::Wanted => self.wanted_posters.find_by_id_mut(&item.id).map(|c| c as &mut dyn Card),
            ItemKind::Paper => self.papers.find_by_id_mut(&item.id).map(|c| c as &mut dyn Card),
        }
    }

    #[must_use]
    pub fn contains(&self, item: &ItemRef) -> bool {
        self.card(item).is_some()
    }

    /// Every card in draw order (photos, notes, wanted posters, papers).
    pub fn cards(&self) -> impl Iterator<Item = &dyn Card> {
        let photos = self.photos.iter().map(|c| c as &dyn Card);
        let notes = self.notes.iter().map(|c| c as &dyn Card);
        let wanted = self.wanted_posters.iter().map(|c| c as &dyn Card);
        let papers = self.papers.iter().map(|c| c as &dyn Card);
        photos.chain(notes).chain(wanted).chain(papers)
    }

    /// Total number of cards across all stores.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.photos.len() + self.notes.len() + self.wanted_posters.len() + self.papers.len()
    }

    /// Board-space point where yarn attaches to `item`.
    #[must_use]
    pub fn yarn_anchor(&self, item: &ItemRef) -> Option<Point> {
        self.card(item).map(Card::yarn_anchor)
    }

    // --- Add ---

    /// Add a photo with default content at a random spot.
    pub fn add_photo(&mut self, rng: &mut impl Rng) -> ItemRef {
        let (x, y) = spawn_position(rng);
        let photo = Photo {
            id: new_id(ItemKind::Photo.id_prefix()),
            url: String::new(),
            title: DEFAULT_PHOTO_TITLE.to_owned(),
            notes: String::new(),
            x,
            y,
            image_url: String::new(),
            rotation: spread(rng, PHOTO_ROTATION_SPREAD_DEG),
            drawings: None,
        };
        let item = photo.item_ref();
        self.photos.add(photo);
        item
    }

    /// Add an empty yellow sticky note at a random spot.
    pub fn add_note(&mut self, rng: &mut impl Rng) -> ItemRef {
        let (x, y) = spawn_position(rng);
        let note = StickyNote {
            id: new_id(ItemKind::Note.id_prefix()),
            text: String::new(),
            x,
            y,
            color: DEFAULT_NOTE_COLOR.to_owned(),
            rotation: spread(rng, CARD_ROTATION_SPREAD_DEG),
            drawings: None,
            group_id: None,
            group_index: None,
        };
        let item = note.item_ref();
        self.notes.add(note);
        item
    }

    /// Add a blank wanted poster at a random spot.
    pub fn add_wanted(&mut self, rng: &mut impl Rng) -> ItemRef {
        let (x, y) = spawn_position(rng);
        let poster = WantedPoster {
            id: new_id(ItemKind::Wanted.id_prefix()),
            name: String::new(),
            alias: String::new(),
            crime: String::new(),
            description: String::new(),
            reward: DEFAULT_WANTED_REWARD.to_owned(),
            x,
            y,
            image_url: String::new(),
            rotation: spread(rng, CARD_ROTATION_SPREAD_DEG),
            drawings: None,
        };
        let item = poster.item_ref();
        self.wanted_posters.add(poster);
        item
    }

    /// Add a blank sheet of lined paper at a random spot.
    pub fn add_paper(&mut self, rng: &mut impl Rng) -> ItemRef {
        let (x, y) = spawn_position(rng);
        let paper = LinedPaper {
            id: new_id(ItemKind::Paper.id_prefix()),
            content: String::new(),
            x,
            y,
            rotation: spread(rng, CARD_ROTATION_SPREAD_DEG),
            drawings: None,
        };
        let item = paper.item_ref();
        self.papers.add(paper);
        item
    }

    /// Add a card of `kind` with default content.
    pub fn add(&mut self, kind: ItemKind, rng: &mut impl Rng) -> ItemRef {
        match kind {
            ItemKind::Photo => self.add_photo(rng),
            ItemKind::Note => self.add_note(rng),
            ItemKind::Wanted => self.add_wanted(rng),
            ItemKind::Paper => self.add_paper(rng),
        }
    }

    // --- Update ---

    pub fn update_photo(&mut self, id: &str, patch: &PhotoPatch) -> bool {
        self.photos.update(id, patch)
    }

    pub fn update_wanted(&mut self, id: &str, patch: &WantedPatch) -> bool {
        self.wanted_posters.update(id, patch)
    }

    pub fn update_paper(&mut self, id: &str, patch: &PaperPatch) -> bool {
        self.papers.update(id, patch)
    }

    /// Update a sticky note, splitting it into a group if its new text is
    /// longer than the configured threshold.
    ///
    /// The note keeps the first chunk and becomes group index 0; every further
    /// chunk becomes a new note stacked `group_offset` below the previous one.
    /// If the note already belonged to a group, the rest of that group is
    /// renumbered to stay contiguous.
    pub fn update_note(&mut self, id: &str, patch: &NotePatch, config: &BoardConfig, rng: &mut impl Rng) -> NoteUpdate {
        let Some(existing) = self.notes.find_by_id(id) else {
            return NoteUpdate::NotFound;
        };
        let mut head = existing.clone();
        head.apply(patch);

        let threshold = config.note_split_threshold;
        let chunks = if group::exceeds_threshold(&head.text, threshold) {
            group::split_text(&head.text, threshold)
        } else {
            Vec::new()
        };
        if chunks.len() < 2 {
            self.notes.replace(head);
            return NoteUpdate::Updated;
        }

        let previous_group = head.group_id.take();
        let group_id = new_id("group");
        let mut chunks = chunks.into_iter();
        head.text = chunks.next().unwrap_or_default();
        head.group_id = Some(group_id.clone());
        head.group_index = Some(0);

        let mut parts = vec![head.item_ref()];
        let mut siblings = Vec::new();
        for (index, text) in (1u32..).zip(chunks) {
            let sibling = StickyNote {
                id: new_id(ItemKind::Note.id_prefix()),
                text,
                x: head.x,
                y: head.y + f64::from(index) * config.group_offset,
                color: head.color.clone(),
                rotation: head.rotation + spread(rng, config.group_rotation_jitter_deg * 2.0),
                drawings: None,
                group_id: Some(group_id.clone()),
                group_index: Some(index),
            };
            parts.push(sibling.item_ref());
            siblings.push(sibling);
        }

        self.notes.replace(head);
        for sibling in siblings {
            self.notes.add(sibling);
        }
        if let Some(old) = previous_group {
            group::reindex(self.notes.iter_mut(), &old);
        }

        debug!("note {id} split into {} parts ({group_id})", parts.len());
        NoteUpdate::Split { group_id, parts }
    }

    // --- Delete ---

    /// Delete a card and every yarn edge touching it. Deleting a grouped note
    /// deletes its whole group. Returns `None` if the card doesn't exist.
    pub fn delete(&mut self, item: &ItemRef) -> Option<Deleted> {
        let removed: Vec<ItemRef> = match item.kind {
            ItemKind::Note => {
                let note = self.notes.find_by_id(&item.id)?;
                match note.group_id.clone() {
                    Some(group_id) => self
                        .notes
                        .remove_where(|n| n.group_id.as_deref() == Some(group_id.as_str()))
                        .iter()
                        .map(Card::item_ref)
                        .collect(),
                    None => self.notes.remove(&item.id).iter().map(Card::item_ref).collect(),
                }
            }
            ItemKind::Photo => vec![self.photos.remove(&item.id)?.item_ref()],
            ItemKind::Wanted => vec![self.wanted_posters.remove(&item.id)?.item_ref()],
            ItemKind::Paper => vec![self.papers.remove(&item.id)?.item_ref()],
        };

        let connections = self
            .connections
            .remove_where(|e| removed.iter().any(|r| e.touches(&r.id)));
        debug!("deleted {} cards, {} connections", removed.len(), connections.len());
        Some(Deleted { items: removed, connections })
    }

    // --- Drag ---

    /// Cards that move together with `item`: its whole group for a grouped
    /// note, otherwise just the card. Empty if the card doesn't exist.
    #[must_use]
    pub fn drag_set(&self, item: &ItemRef) -> Vec<ItemRef> {
        if item.kind == ItemKind::Note {
            if let Some(group_id) = self.notes.find_by_id(&item.id).and_then(|n| n.group_id.as_deref()) {
                return self
                    .notes
                    .iter()
                    .filter(|n| n.group_id.as_deref() == Some(group_id))
                    .map(Card::item_ref)
                    .collect();
            }
        }
        if self.contains(item) { vec![item.clone()] } else { Vec::new() }
    }

    /// Translate `item` (and its group) by a board-space delta. Returns the cards moved.
    pub fn drag_item(&mut self, item: &ItemRef, dx: f64, dy: f64) -> Vec<ItemRef> {
        let moved = self.drag_set(item);
        for member in &moved {
            if let Some(card) = self.card_mut(member) {
                card.translate(dx, dy);
            }
        }
        moved
    }

    // --- Mascot ---

    #[must_use]
    pub fn mascot(&self, id: &str) -> Option<&Mascot> {
        self.mascots.iter().find(|m| m.id == id)
    }

    /// Translate a mascot by a board-space delta.
    pub fn drag_mascot(&mut self, id: &str, dx: f64, dy: f64) -> bool {
        let Some(mascot) = self.mascots.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        mascot.x += dx;
        mascot.y += dy;
        true
    }

    /// Resize a mascot to `width`, keeping its aspect ratio. Returns the new size.
    pub fn resize_mascot(&mut self, id: &str, width: f64) -> Option<(f64, f64)> {
        let mascot = self.mascots.iter_mut().find(|m| m.id == id)?;
        let aspect = mascot.width / mascot.height;
        mascot.width = width.max(MASCOT_MIN_WIDTH);
        mascot.height = mascot.width / aspect;
        Some((mascot.width, mascot.height))
    }

    // --- Yarn ---

    /// Toggle the yarn between two existing cards. Returns `None` if either is missing.
    pub fn toggle_connection(&mut self, from: &ItemRef, to: &ItemRef, color: &str) -> Option<Toggle> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        Some(self.connections.toggle_with_color(from, to, color))
    }

    /// Connections whose endpoints don't resolve to a card of the tagged kind.
    #[must_use]
    pub fn dangling_connections(&self) -> Vec<&YarnConnection> {
        self.connections
            .iter()
            .filter(|e| !self.contains(&e.from_ref()) || !self.contains(&e.to_ref()))
            .collect()
    }

    /// Drop every dangling connection, returning what was removed.
    pub fn prune_dangling(&mut self) -> Vec<YarnConnection> {
        let dangling: Vec<ItemId> = self.dangling_connections().iter().map(|e| e.id.clone()).collect();
        self.connections.remove_where(|e| dangling.contains(&e.id))
    }

    // --- Drawings ---

    /// Append a finished path to a card's drawings.
    pub fn append_drawing(&mut self, item: &ItemRef, path: DrawingPath) -> bool {
        let Some(card) = self.card_mut(item) else {
            return false;
        };
        card.drawings_mut().get_or_insert_with(Vec::new).push(path);
        true
    }

    /// Replace a card's drawings wholesale.
    pub fn set_drawings(&mut self, item: &ItemRef, paths: Vec<DrawingPath>) -> bool {
        let Some(card) = self.card_mut(item) else {
            return false;
        };
        *card.drawings_mut() = Some(paths);
        true
    }

    /// Remove every path from a card.
    pub fn clear_drawings(&mut self, item: &ItemRef) -> bool {
        self.set_drawings(item, Vec::new())
    }

    // --- Groups ---

    /// Distinct group ids in document order.
    #[must_use]
    pub fn group_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for id in self.notes.iter().filter_map(|n| n.group_id.as_deref()) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    /// Notes of one group, head first.
    #[must_use]
    pub fn group_members(&self, group_id: &str) -> Vec<&StickyNote> {
        group::members(&self.notes, group_id)
    }

    // --- Demo content ---

    /// A small starter board with a few connected cards and the mascot.
    #[must_use]
    pub fn demo() -> Self {
        let mut board = Self::new("UFO Conspiracy Board");
        let photos = [
            ("starter-1", "Area 51", "https://en.wikipedia.org/wiki/Area_51", "Top secret military installation. What are they really hiding?", 150.0, 200.0, -5.0),
            ("starter-2", "Roswell Incident", "https://en.wikipedia.org/wiki/Roswell_incident", "The 1947 crash that started it all. Weather balloon or something else?", 450.0, 150.0, 8.0),
            ("starter-3", "Project Blue Book", "https://en.wikipedia.org/wiki/Project_Blue_Book", "Official USAF investigation into UFOs (1952-1969). What about the unidentified cases?", 200.0, 450.0, -3.0),
        ];
        for (id, title, url, notes, x, y, rotation) in photos {
            board.photos.add(Photo {
                id: id.to_owned(),
                url: url.to_owned(),
                title: title.to_owned(),
                notes: notes.to_owned(),
                x,
                y,
                image_url: String::new(),
                rotation,
                drawings: None,
            });
        }
        board.notes.add(StickyNote {
            id: "note-1".to_owned(),
            text: "All incidents happen near military bases. Coincidence?".to_owned(),
            x: 350.0,
            y: 300.0,
            color: DEFAULT_NOTE_COLOR.to_owned(),
            rotation: -8.0,
            drawings: None,
            group_id: None,
            group_index: None,
        });
        board.wanted_posters.add(WantedPoster {
            id: "wanted-1".to_owned(),
            name: "Unknown Agent".to_owned(),
            alias: "The Man in Black".to_owned(),
            crime: "Witness intimidation".to_owned(),
            description: "Dark suit, dark glasses. Seen at every site.".to_owned(),
            reward: "$500,000".to_owned(),
            x: 900.0,
            y: 100.0,
            image_url: String::new(),
            rotation: -6.0,
            drawings: None,
        });
        board.papers.add(LinedPaper {
            id: "paper-1".to_owned(),
            content: "Timeline of Events:\n\n1947 - Roswell Incident\n1952 - Project Blue Book begins\n1969 - Blue Book officially ends".to_owned(),
            x: 1200.0,
            y: 250.0,
            rotation: 4.0,
            drawings: None,
        });

        let links = [
            (ItemRef::photo("starter-1"), ItemRef::photo("starter-2")),
            (ItemRef::photo("starter-2"), ItemRef::photo("starter-3")),
            (ItemRef::note("note-1"), ItemRef::photo("starter-1")),
            (ItemRef::wanted("wanted-1"), ItemRef::paper("paper-1")),
        ];
        for (from, to) in &links {
            board.connections.toggle(from, to);
        }

        board.mascots.push(Mascot { id: "mascot-1".to_owned(), x: 50.0, y: 550.0, width: 200.0, height: 200.0 });
        board
    }
}

/// Random top-left corner inside the spawn area.
fn spawn_position(rng: &mut impl Rng) -> (f64, f64) {
    let x = SPAWN_ORIGIN.0 + rng.random::<f64>() * SPAWN_SPAN.0;
    let y = SPAWN_ORIGIN.1 + rng.random::<f64>() * SPAWN_SPAN.1;
    (x, y)
}

/// Uniform value in `[-spread / 2, spread / 2)`.
fn spread(rng: &mut impl Rng, spread: f64) -> f64 {
    (rng.random::<f64>() - 0.5) * spread
}
