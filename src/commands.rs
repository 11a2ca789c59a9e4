//! Board file operations behind the `pinboard` subcommands.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use canvas::board::Board;
use canvas::config::DanglingPolicy;
use canvas::graph::YarnConnection;
use canvas::persist::{self, BoardDocument, LoadError, SaveError};
use time::{Date, OffsetDateTime};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: String, source: std::io::Error },
    #[error("{0} already exists; pass --force to overwrite")]
    Exists(String),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Save(#[from] SaveError),
}

pub fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read { path: path.display().to_string(), source })
}

pub fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    fs::write(path, contents).map_err(|source| CliError::Write { path: path.display().to_string(), source })
}

/// Counts and problems found in a board document.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub title: String,
    pub version: String,
    pub timestamp: String,
    pub photos: usize,
    pub notes: usize,
    pub wanted_posters: usize,
    pub papers: usize,
    pub groups: usize,
    pub connections: usize,
    /// `(connection id, missing item id)` pairs.
    pub dangling: Vec<(String, String)>,
}

impl Summary {
    fn of(doc: &BoardDocument) -> Self {
        let groups: BTreeSet<&str> = doc.notes.iter().filter_map(|n| n.group_id.as_deref()).collect();
        Self {
            title: doc.title.clone(),
            version: doc.version.clone(),
            timestamp: doc.timestamp.clone(),
            photos: doc.photos.len(),
            notes: doc.notes.len(),
            wanted_posters: doc.wanted_posters.len(),
            papers: doc.papers.len(),
            groups: groups.len(),
            connections: doc.connections.len(),
            dangling: persist::dangling_connections(doc),
        }
    }

    pub fn card_count(&self) -> usize {
        self.photos + self.notes + self.wanted_posters + self.papers
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "title:          {}", self.title)?;
        writeln!(f, "version:        {}", self.version)?;
        writeln!(f, "saved:          {}", self.timestamp)?;
        writeln!(f, "photos:         {}", self.photos)?;
        writeln!(f, "notes:          {} ({} groups)", self.notes, self.groups)?;
        writeln!(f, "wanted posters: {}", self.wanted_posters)?;
        writeln!(f, "papers:         {}", self.papers)?;
        writeln!(f, "connections:    {}", self.connections)?;
        for (connection, item) in &self.dangling {
            writeln!(f, "  dangling: {connection} -> missing {item}")?;
        }
        Ok(())
    }
}

/// JSON for a fresh board: empty, or the starter board with `--demo`.
pub fn new_board(title: Option<&str>, demo: bool, now: OffsetDateTime) -> Result<String, CliError> {
    let mut board = if demo { Board::demo() } else { Board::default() };
    if let Some(title) = title {
        board.title = title.to_owned();
    }
    Ok(persist::to_json(&board.to_document(now)?)?)
}

/// Summarize a board file, reporting dangling connections without failing on them.
pub fn inspect(raw: &str) -> Result<Summary, CliError> {
    Ok(Summary::of(&persist::deserialize(raw)?))
}

/// Load under the strict policy, so any dangling connection is an error.
pub fn validate(raw: &str) -> Result<Summary, CliError> {
    Ok(Summary::of(&persist::deserialize_with(raw, DanglingPolicy::Strict)?))
}

/// Drop dangling connections and re-save. Returns the new JSON and what was removed.
pub fn prune(raw: &str, now: OffsetDateTime) -> Result<(String, Vec<YarnConnection>), CliError> {
    let mut board = Board::from_document(persist::deserialize(raw)?);
    let removed = board.prune_dangling();
    let json = persist::to_json(&board.to_document(now)?)?;
    Ok((json, removed))
}

pub fn filename(title: &str, today: Date) -> String {
    persist::export_filename(title, today)
}
