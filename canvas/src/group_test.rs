use super::*;

fn note(id: &str, group: Option<&str>, index: Option<u32>) -> StickyNote {
    StickyNote {
        id: id.to_owned(),
        text: String::new(),
        x: 0.0,
        y: 0.0,
        color: "#fef08a".to_owned(),
        rotation: 0.0,
        drawings: None,
        group_id: group.map(str::to_owned),
        group_index: index,
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// =============================================================
// split_text
// =============================================================

#[test]
fn short_text_is_one_chunk() {
    assert_eq!(split_text("all roads lead to roswell", 150), ["all roads lead to roswell"]);
}

#[test]
fn empty_text_has_no_chunks() {
    assert!(split_text("   \n\t ", 10).is_empty());
}

#[test]
fn chunk_fills_up_to_threshold_exactly() {
    // "aaaa bbbb" is 9 chars; threshold 9 keeps it whole.
    assert_eq!(split_text("aaaa bbbb cc", 9), ["aaaa bbbb", "cc"]);
}

#[test]
fn long_word_gets_its_own_chunk() {
    let chunks = split_text("a supercalifragilistic b", 5);
    assert_eq!(chunks, ["a", "supercalifragilistic", "b"]);
}

#[test]
fn three_hundred_ten_chars_make_three_chunks() {
    // 61 four-letter words plus one five-letter word, single-spaced: 310 chars.
    let mut words = vec!["abcd"; 61];
    words.push("abcde");
    let text = words.join(" ");
    assert_eq!(text.chars().count(), 310);

    let chunks = split_text(&text, 150);
    assert_eq!(chunks.len(), 3);
    assert!(chunks[0].chars().count() <= 150);
    assert!(chunks[1].chars().count() <= 150);
    assert_eq!(chunks.join(" "), text);
}

#[test]
fn chunks_respect_threshold_and_rebuild_text() {
    let text = "The  1947\tcrash was\nnot a weather balloon. Witnesses saw debris with strange \
                symbols, and the military changed its story twice within a single day.";
    for threshold in [10, 25, 40, 80] {
        let chunks = split_text(text, threshold);
        assert!(chunks.iter().all(|c| c.chars().count() <= threshold), "threshold {threshold}");
        assert_eq!(chunks.join(" "), collapse(text));
    }
}

#[test]
fn threshold_counts_chars_not_bytes() {
    // Each "ééé" is 3 chars but 6 bytes.
    let chunks = split_text("ééé ééé ééé", 7);
    assert_eq!(chunks, ["ééé ééé", "ééé"]);
}

#[test]
fn exceeds_threshold_is_strict() {
    assert!(!exceeds_threshold(&"x".repeat(150), 150));
    assert!(exceeds_threshold(&"x".repeat(151), 150));
}

// =============================================================
// Group membership
// =============================================================

#[test]
fn members_sorted_by_index() {
    let notes = [note("c", Some("g"), Some(2)), note("x", None, None), note("a", Some("g"), Some(0)), note("b", Some("g"), Some(1))];
    let ids: Vec<&str> = members(&notes, "g").iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
}

#[test]
fn contiguity_detects_gaps_and_duplicates() {
    let ok = [note("a", Some("g"), Some(0)), note("b", Some("g"), Some(1))];
    assert!(is_contiguous(&ok, "g"));

    let gap = [note("a", Some("g"), Some(0)), note("b", Some("g"), Some(2))];
    assert!(!is_contiguous(&gap, "g"));

    let dup = [note("a", Some("g"), Some(0)), note("b", Some("g"), Some(0))];
    assert!(!is_contiguous(&dup, "g"));
}

#[test]
fn reindex_closes_gaps() {
    let mut notes = vec![note("a", Some("g"), Some(0)), note("c", Some("g"), Some(3)), note("b", Some("g"), Some(2))];
    reindex(notes.iter_mut(), "g");
    assert!(is_contiguous(&notes, "g"));
    assert_eq!(notes[1].group_index, Some(2));
    assert_eq!(notes[2].group_index, Some(1));
}

#[test]
fn reindex_dissolves_single_member_group() {
    let mut notes = vec![note("a", Some("g"), Some(1)), note("z", Some("other"), Some(0))];
    reindex(notes.iter_mut(), "g");
    assert_eq!(notes[0].group_id, None);
    assert_eq!(notes[0].group_index, None);
    assert_eq!(notes[1].group_id.as_deref(), Some("other"));
}
