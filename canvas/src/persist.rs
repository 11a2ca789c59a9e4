//! Board persistence: the portable JSON board document.
//!
//! Saving wraps the current collections with a format version and an RFC 3339
//! generation timestamp. Loading is all-or-nothing: the raw text is parsed,
//! the top-level shape is checked (three string scalars, five arrays), every
//! element is decoded into its typed card, and only then is a document
//! returned. Callers apply a returned document wholesale or not at all.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

use crate::board::Board;
use crate::config::DanglingPolicy;
use crate::consts::{BOARD_FORMAT_VERSION, DEFAULT_BOARD_TITLE, DEFAULT_FILENAME_STEM};
use crate::doc::{ItemKind, ItemRef, ItemStore, LinedPaper, Photo, StickyNote, WantedPoster};
use crate::graph::{ConnectionGraph, YarnConnection};

/// Top-level scalar fields every document must carry as strings.
pub const REQUIRED_SCALARS: [&str; 3] = ["version", "timestamp", "title"];

/// Top-level collections every document must carry as arrays.
pub const REQUIRED_COLLECTIONS: [&str; 5] = ["photos", "notes", "wantedPosters", "papers", "connections"];

/// Error returned when a board document cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The text is not valid JSON.
    #[error("board file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The top level is not a JSON object.
    #[error("board file must contain a JSON object")]
    NotAnObject,
    /// A required top-level field is missing or has the wrong type.
    #[error("board field `{field}` must be {expected}")]
    Shape { field: &'static str, expected: &'static str },
    /// An element of one of the collections does not match its schema.
    #[error("board contents are malformed: {0}")]
    Schema(serde_json::Error),
    /// A connection points at a card that isn't in the document.
    #[error("connection {connection} references missing item {item}")]
    DanglingConnection { connection: String, item: String },
    /// Another load is still in flight.
    #[error("a board load is already in progress")]
    Busy,
}

/// Error returned when a board cannot be saved.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The generation timestamp could not be formatted.
    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    /// The document could not be encoded.
    #[error("failed to encode board: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The persisted board aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDocument {
    pub version: String,
    /// RFC 3339 time the document was generated.
    pub timestamp: String,
    pub title: String,
    pub photos: Vec<Photo>,
    pub notes: Vec<StickyNote>,
    pub wanted_posters: Vec<WantedPoster>,
    pub papers: Vec<LinedPaper>,
    pub connections: Vec<YarnConnection>,
}

impl BoardDocument {
    /// Whether the document holds a card of `item`'s kind with `item`'s id.
    #[must_use]
    pub fn contains(&self, item: &ItemRef) -> bool {
        let id = item.id.as_str();
        match item.kind {
            ItemKind::Photo => self.photos.iter().any(|c| c.id == id),
            ItemKind::Note => self.notes.iter().any(|c| c.id == id),
            ItemKind::Wanted => self.wanted_posters.iter().any(|c| c.id == id),
            ItemKind::Paper => self.papers.iter().any(|c| c.id == id),
        }
    }
}

/// A board file ready to hand to the browser as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedBoard {
    pub filename: String,
    pub json: String,
}

/// Wrap the board collections into a document stamped with `generated_at`.
///
/// An empty title is replaced with the default board title.
///
/// # Errors
///
/// Returns [`SaveError::Timestamp`] if `generated_at` can't be formatted as RFC 3339.
pub fn serialize(
    title: &str,
    photos: &[Photo],
    notes: &[StickyNote],
    wanted_posters: &[WantedPoster],
    papers: &[LinedPaper],
    connections: &[YarnConnection],
    generated_at: OffsetDateTime,
) -> Result<BoardDocument, SaveError> {
    let title = if title.is_empty() { DEFAULT_BOARD_TITLE } else { title };
    Ok(BoardDocument {
        version: BOARD_FORMAT_VERSION.to_owned(),
        timestamp: generated_at.format(&Rfc3339)?,
        title: title.to_owned(),
        photos: photos.to_vec(),
        notes: notes.to_vec(),
        wanted_posters: wanted_posters.to_vec(),
        papers: papers.to_vec(),
        connections: connections.to_vec(),
    })
}

/// Parse and validate a board document.
///
/// Dangling connections are not checked here; see [`deserialize_with`].
///
/// # Errors
///
/// Returns a [`LoadError`] describing the first problem found.
pub fn deserialize(raw: &str) -> Result<BoardDocument, LoadError> {
    let value: Value = serde_json::from_str(raw)?;
    let Some(fields) = value.as_object() else {
        return Err(LoadError::NotAnObject);
    };

    for field in REQUIRED_SCALARS {
        if !fields.get(field).is_some_and(Value::is_string) {
            return Err(LoadError::Shape { field, expected: "a string" });
        }
    }
    for field in REQUIRED_COLLECTIONS {
        if !fields.get(field).is_some_and(Value::is_array) {
            return Err(LoadError::Shape { field, expected: "an array" });
        }
    }

    serde_json::from_value(value).map_err(LoadError::Schema)
}

/// Parse, validate, and apply the dangling-connection policy.
///
/// Under [`DanglingPolicy::Prune`] unresolved connections are dropped with a
/// warning; under [`DanglingPolicy::Strict`] the first one fails the load.
///
/// # Errors
///
/// Returns a [`LoadError`] if the document is malformed, or has a dangling
/// connection under the strict policy.
pub fn deserialize_with(raw: &str, policy: DanglingPolicy) -> Result<BoardDocument, LoadError> {
    let mut doc = deserialize(raw)?;
    let dangling = dangling_connections(&doc);
    if dangling.is_empty() {
        return Ok(doc);
    }

    match policy {
        DanglingPolicy::Strict => {
            let (connection, item) = &dangling[0];
            Err(LoadError::DanglingConnection { connection: connection.clone(), item: item.clone() })
        }
        DanglingPolicy::Prune => {
            warn!("pruning {} dangling connection(s) from board \"{}\"", dangling.len(), doc.title);
            doc.connections.retain(|c| !dangling.iter().any(|(id, _)| *id == c.id));
            Ok(doc)
        }
    }
}

/// `(connection id, missing item id)` for every connection with an endpoint
/// that doesn't resolve to a card of its tagged kind.
#[must_use]
pub fn dangling_connections(doc: &BoardDocument) -> Vec<(String, String)> {
    doc.connections
        .iter()
        .filter_map(|c| {
            let missing = if !doc.contains(&c.from_ref()) {
                &c.from_item_id
            } else if !doc.contains(&c.to_ref()) {
                &c.to_item_id
            } else {
                return None;
            };
            Some((c.id.clone(), missing.clone()))
        })
        .collect()
}

/// Encode a document as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`SaveError::Encode`] if encoding fails.
pub fn to_json(doc: &BoardDocument) -> Result<String, SaveError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Make a title safe to use as a filename stem.
///
/// Each of `< > : " / \ | ? *` becomes `-`, each whitespace run becomes a
/// single `-`, and the result is lowercased.
#[must_use]
pub fn sanitize_filename(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut in_space = false;
    for ch in title.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if matches!(ch, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') {
            out.push('-');
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// `<sanitized-title>-<YYYY-MM-DD>.json`.
#[must_use]
pub fn export_filename(title: &str, date: Date) -> String {
    let stem = if title.is_empty() { DEFAULT_FILENAME_STEM.to_owned() } else { sanitize_filename(title) };
    format!("{stem}-{:04}-{:02}-{:02}.json", date.year(), u8::from(date.month()), date.day())
}

impl Board {
    /// Build a board from a loaded document. Mascots are not persisted, so the
    /// result has none.
    #[must_use]
    pub fn from_document(doc: BoardDocument) -> Self {
        Self {
            title: doc.title,
            photos: ItemStore::from_vec(doc.photos),
            notes: ItemStore::from_vec(doc.notes),
            wanted_posters: ItemStore::from_vec(doc.wanted_posters),
            papers: ItemStore::from_vec(doc.papers),
            connections: ConnectionGraph::from_vec(doc.connections),
            mascots: Vec::new(),
        }
    }

    /// Snapshot the board as a document stamped with `generated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Timestamp`] if `generated_at` can't be formatted.
    pub fn to_document(&self, generated_at: OffsetDateTime) -> Result<BoardDocument, SaveError> {
        serialize(
            &self.title,
            self.photos.as_slice(),
            self.notes.as_slice(),
            self.wanted_posters.as_slice(),
            self.papers.as_slice(),
            self.connections.as_slice(),
            generated_at,
        )
    }

    /// Produce the downloadable file for this board.
    ///
    /// # Errors
    ///
    /// Returns a [`SaveError`] if the timestamp or JSON encoding fails.
    pub fn save(&self, generated_at: OffsetDateTime) -> Result<SavedBoard, SaveError> {
        let doc = self.to_document(generated_at)?;
        Ok(SavedBoard { filename: export_filename(&self.title, generated_at.date()), json: to_json(&doc)? })
    }
}
