//! Note groups: splitting oversized sticky-note text into a chain of notes.
//!
//! A group is the set of notes sharing a `group_id`. Their `group_index`
//! values are contiguous from 0 (the head). [`split_text`] decides the chunk
//! boundaries; [`crate::board::Board::update_note`] turns the chunks into
//! notes.

#[cfg(test)]
#[path = "group_test.rs"]
mod group_test;

use crate::doc::StickyNote;

/// Greedily pack the whitespace-delimited words of `text` into chunks of at
/// most `threshold` characters.
///
/// Words are joined with single spaces. A chunk is flushed as soon as the next
/// word would push it past the threshold; a word that alone exceeds the
/// threshold becomes its own chunk. Text with no words yields no chunks.
#[must_use]
pub fn split_text(text: &str, threshold: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > threshold {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if current_len > 0 {
        chunks.push(current);
    }
    chunks
}

/// Whether `text` is long enough to be split.
#[must_use]
pub fn exceeds_threshold(text: &str, threshold: usize) -> bool {
    text.chars().count() > threshold
}

/// Notes in `group_id`, ordered by `group_index`.
#[must_use]
pub fn members<'a>(notes: impl IntoIterator<Item = &'a StickyNote>, group_id: &str) -> Vec<&'a StickyNote> {
    let mut found: Vec<&StickyNote> = notes
        .into_iter()
        .filter(|n| n.group_id.as_deref() == Some(group_id))
        .collect();
    found.sort_by_key(|n| n.group_index.unwrap_or(u32::MAX));
    found
}

/// Check that the group's indices are exactly `0..len` with no gaps or duplicates.
#[must_use]
pub fn is_contiguous<'a>(notes: impl IntoIterator<Item = &'a StickyNote>, group_id: &str) -> bool {
    (0u32..)
        .zip(members(notes, group_id))
        .all(|(i, n)| n.group_index == Some(i))
}

/// Renumber the notes of `group_id` to `0..len`, preserving their order.
///
/// A group left with a single note dissolves: that note loses its group tags.
pub fn reindex<'a>(notes: impl IntoIterator<Item = &'a mut StickyNote>, group_id: &str) {
    let mut found: Vec<&mut StickyNote> = notes
        .into_iter()
        .filter(|n| n.group_id.as_deref() == Some(group_id))
        .collect();
    found.sort_by_key(|n| n.group_index.unwrap_or(u32::MAX));

    if found.len() == 1 {
        found[0].group_id = None;
        found[0].group_index = None;
        return;
    }
    for (index, note) in (0u32..).zip(found) {
        note.group_index = Some(index);
    }
}
