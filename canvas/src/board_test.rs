#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(7)
}

fn photo_at(id: &str, x: f64, y: f64) -> Photo {
    Photo {
        id: id.to_owned(),
        url: String::new(),
        title: String::new(),
        notes: String::new(),
        x,
        y,
        image_url: String::new(),
        rotation: 0.0,
        drawings: None,
    }
}

fn note_at(id: &str, x: f64, y: f64, group: Option<(&str, u32)>) -> StickyNote {
    StickyNote {
        id: id.to_owned(),
        text: String::new(),
        x,
        y,
        color: "#fef08a".to_owned(),
        rotation: 0.0,
        drawings: None,
        group_id: group.map(|(g, _)| g.to_owned()),
        group_index: group.map(|(_, i)| i),
    }
}

fn text_of_len_310() -> String {
    let mut words = vec!["abcd"; 61];
    words.push("abcde");
    words.join(" ")
}

fn positions(board: &Board) -> Vec<(ItemRef, Point)> {
    board.cards().map(|c| (c.item_ref(), c.position())).collect()
}

// =============================================================
// Add
// =============================================================

#[test]
fn add_uses_defaults_and_spawn_area() {
    let mut board = Board::default();
    let mut rng = rng();
    for kind in ItemKind::ALL {
        let item = board.add(kind, &mut rng);
        assert_eq!(item.kind, kind);
        assert!(item.id.starts_with(kind.id_prefix()));
        let pos = board.card(&item).unwrap().position();
        assert!((100.0..500.0).contains(&pos.x), "{pos:?}");
        assert!((100.0..400.0).contains(&pos.y), "{pos:?}");
    }
    assert_eq!(board.photos.iter().next().unwrap().title, "New Photo");
    assert_eq!(board.notes.iter().next().unwrap().color, "#fef08a");
    assert_eq!(board.wanted_posters.iter().next().unwrap().reward, "$10,000");
    assert_eq!(board.card_count(), 4);
}

#[test]
fn add_rotation_stays_in_spread() {
    let mut board = Board::default();
    let mut rng = rng();
    for _ in 0..50 {
        board.add_photo(&mut rng);
        board.add_note(&mut rng);
    }
    assert!(board.photos.iter().all(|p| p.rotation.abs() <= 10.0));
    assert!(board.notes.iter().all(|n| n.rotation.abs() <= 5.0));
}

// =============================================================
// Note split
// =============================================================

#[test]
fn long_note_splits_into_contiguous_group() {
    let mut board = Board::default();
    board.notes.add(note_at("n1", 40.0, 60.0, None));
    let text = text_of_len_310();
    let patch = NotePatch { text: Some(text.clone()), ..Default::default() };

    let NoteUpdate::Split { group_id, parts } = board.update_note("n1", &patch, &BoardConfig::default(), &mut rng())
    else {
        panic!("expected a split");
    };
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], ItemRef::note("n1"));

    let members = board.group_members(&group_id);
    let indices: Vec<Option<u32>> = members.iter().map(|n| n.group_index).collect();
    assert_eq!(indices, [Some(0), Some(1), Some(2)]);
    assert!(members[0].text.chars().count() <= 150);
    assert!(members[1].text.chars().count() <= 150);
    let joined: Vec<&str> = members.iter().map(|n| n.text.as_str()).collect();
    assert_eq!(joined.join(" "), text);
}

#[test]
fn split_siblings_stack_below_head() {
    let mut board = Board::default();
    let mut head = note_at("n1", 40.0, 60.0, None);
    head.color = "#a0e7a0".to_owned();
    head.rotation = 3.0;
    board.notes.add(head);
    let patch = NotePatch { text: Some(text_of_len_310()), ..Default::default() };
    let NoteUpdate::Split { group_id, .. } = board.update_note("n1", &patch, &BoardConfig::default(), &mut rng())
    else {
        panic!("expected a split");
    };

    for (i, note) in board.group_members(&group_id).into_iter().enumerate() {
        assert_eq!(note.x, 40.0);
        assert_eq!(note.y, 60.0 + 160.0 * i as f64);
        assert_eq!(note.color, "#a0e7a0");
        assert!((note.rotation - 3.0).abs() <= 1.5);
    }
}

#[test]
fn short_note_updates_in_place() {
    let mut board = Board::default();
    board.notes.add(note_at("n1", 0.0, 0.0, None));
    let patch = NotePatch { text: Some("a short hunch".to_owned()), ..Default::default() };
    assert_eq!(board.update_note("n1", &patch, &BoardConfig::default(), &mut rng()), NoteUpdate::Updated);
    let note = board.notes.find_by_id("n1").unwrap();
    assert_eq!(note.text, "a short hunch");
    assert!(note.group_id.is_none());
    assert_eq!(board.notes.len(), 1);
}

#[test]
fn single_long_word_degrades_to_update() {
    let mut board = Board::default();
    board.notes.add(note_at("n1", 0.0, 0.0, None));
    let word = "x".repeat(200);
    let patch = NotePatch { text: Some(word.clone()), ..Default::default() };
    assert_eq!(board.update_note("n1", &patch, &BoardConfig::default(), &mut rng()), NoteUpdate::Updated);
    assert_eq!(board.notes.find_by_id("n1").unwrap().text, word);
}

#[test]
fn update_missing_note_reports_not_found() {
    let mut board = Board::default();
    let patch = NotePatch::default();
    assert_eq!(board.update_note("ghost", &patch, &BoardConfig::default(), &mut rng()), NoteUpdate::NotFound);
}

#[test]
fn resplitting_a_group_member_reindexes_old_group() {
    let mut board = Board::default();
    board.notes.add(note_at("a", 0.0, 0.0, Some(("g", 0))));
    board.notes.add(note_at("b", 0.0, 160.0, Some(("g", 1))));
    board.notes.add(note_at("c", 0.0, 320.0, Some(("g", 2))));
    let patch = NotePatch { text: Some(text_of_len_310()), ..Default::default() };
    board.update_note("b", &patch, &BoardConfig::default(), &mut rng());

    assert!(group::is_contiguous(&board.notes, "g"));
    assert_eq!(board.group_members("g").len(), 2);
}

#[test]
fn custom_threshold_is_honored() {
    let mut board = Board::default();
    board.notes.add(note_at("n1", 0.0, 0.0, None));
    let config = BoardConfig { note_split_threshold: 10, ..Default::default() };
    let patch = NotePatch { text: Some("one two three four five".to_owned()), ..Default::default() };
    let NoteUpdate::Split { parts, .. } = board.update_note("n1", &patch, &config, &mut rng()) else {
        panic!("expected a split");
    };
    assert_eq!(parts.len(), 3);
}

// =============================================================
// Delete
// =============================================================

#[test]
fn delete_cascades_connections() {
    let mut board = Board::default();
    for id in ["p1", "p2", "p3"] {
        board.photos.add(photo_at(id, 0.0, 0.0));
    }
    board.connections.toggle(&ItemRef::photo("p1"), &ItemRef::photo("p2"));
    board.connections.toggle(&ItemRef::photo("p1"), &ItemRef::photo("p3"));

    let deleted = board.delete(&ItemRef::photo("p1")).unwrap();
    assert_eq!(deleted.items, [ItemRef::photo("p1")]);
    assert_eq!(deleted.connections.len(), 2);
    assert!(board.connections.is_empty());
    assert!(board.photos.contains("p2"));
    assert!(board.photos.contains("p3"));
}

#[test]
fn delete_keeps_unrelated_connections() {
    let mut board = Board::default();
    for id in ["a", "b", "c"] {
        board.photos.add(photo_at(id, 0.0, 0.0));
    }
    board.connections.toggle(&ItemRef::photo("a"), &ItemRef::photo("b"));
    board.connections.toggle(&ItemRef::photo("b"), &ItemRef::photo("c"));
    board.delete(&ItemRef::photo("a"));
    assert_eq!(board.connections.len(), 1);
    assert!(board.connections.are_connected("b", "c"));
}

#[test]
fn deleting_group_note_removes_whole_group() {
    let mut board = Board::default();
    board.notes.add(note_at("a", 0.0, 0.0, Some(("g", 0))));
    board.notes.add(note_at("b", 0.0, 160.0, Some(("g", 1))));
    board.notes.add(note_at("solo", 0.0, 0.0, None));
    board.photos.add(photo_at("p", 0.0, 0.0));
    board.connections.toggle(&ItemRef::note("b"), &ItemRef::photo("p"));

    let deleted = board.delete(&ItemRef::note("a")).unwrap();
    assert_eq!(deleted.items.len(), 2);
    assert_eq!(deleted.connections.len(), 1);
    assert_eq!(board.notes.len(), 1);
    assert!(board.notes.contains("solo"));
}

#[test]
fn delete_missing_is_none() {
    let mut board = Board::default();
    assert!(board.delete(&ItemRef::paper("nope")).is_none());
    assert!(board.delete(&ItemRef::note("nope")).is_none());
}

#[test]
fn delete_checks_kind_tag() {
    let mut board = Board::default();
    board.photos.add(photo_at("x", 0.0, 0.0));
    assert!(board.delete(&ItemRef::paper("x")).is_none());
    assert!(board.photos.contains("x"));
}

// =============================================================
// Drag
// =============================================================

#[test]
fn drag_group_moves_rigidly() {
    let mut board = Board::default();
    board.notes.add(note_at("a", 0.0, 0.0, Some(("g", 0))));
    board.notes.add(note_at("b", 0.0, 160.0, Some(("g", 1))));
    board.notes.add(note_at("solo", 500.0, 500.0, None));
    board.photos.add(photo_at("p", 10.0, 10.0));
    let before = positions(&board);

    let moved = board.drag_item(&ItemRef::note("b"), 25.0, -5.0);
    assert_eq!(moved.len(), 2);

    for ((item, old), (_, new)) in before.iter().zip(positions(&board)) {
        let in_group = item.id == "a" || item.id == "b";
        let (dx, dy) = if in_group { (25.0, -5.0) } else { (0.0, 0.0) };
        assert_eq!(new, Point::new(old.x + dx, old.y + dy), "{item:?}");
    }
}

#[test]
fn drag_ungrouped_note_moves_alone() {
    let mut board = Board::default();
    board.notes.add(note_at("a", 0.0, 0.0, None));
    board.notes.add(note_at("b", 0.0, 0.0, None));
    board.drag_item(&ItemRef::note("a"), 3.0, 4.0);
    assert_eq!(board.notes.find_by_id("a").unwrap().x, 3.0);
    assert_eq!(board.notes.find_by_id("b").unwrap().x, 0.0);
}

#[test]
fn drag_missing_moves_nothing() {
    let mut board = Board::default();
    assert!(board.drag_item(&ItemRef::photo("ghost"), 1.0, 1.0).is_empty());
}

// =============================================================
// Mascot
// =============================================================

#[test]
fn mascot_drag_and_resize_keep_aspect() {
    let mut board = Board::default();
    board.mascots.push(Mascot { id: "m".to_owned(), x: 0.0, y: 0.0, width: 200.0, height: 100.0 });
    assert!(board.drag_mascot("m", 10.0, 20.0));
    assert_eq!(board.mascot("m").unwrap().x, 10.0);

    assert_eq!(board.resize_mascot("m", 300.0), Some((300.0, 150.0)));
    assert_eq!(board.resize_mascot("m", 10.0), Some((50.0, 25.0)));
    assert!(board.resize_mascot("nope", 100.0).is_none());
}

// =============================================================
// Connections and drawings
// =============================================================

#[test]
fn toggle_connection_requires_both_endpoints() {
    let mut board = Board::default();
    board.photos.add(photo_at("p1", 0.0, 0.0));
    assert!(board.toggle_connection(&ItemRef::photo("p1"), &ItemRef::photo("ghost"), "#fff").is_none());
    assert!(board.connections.is_empty());
}

#[test]
fn prune_dangling_removes_unresolved_edges() {
    let mut board = Board::default();
    board.photos.add(photo_at("p1", 0.0, 0.0));
    board.photos.add(photo_at("p2", 0.0, 0.0));
    board.connections.toggle(&ItemRef::photo("p1"), &ItemRef::photo("p2"));
    board.connections.toggle(&ItemRef::photo("p1"), &ItemRef::note("gone"));
    assert_eq!(board.dangling_connections().len(), 1);
    assert_eq!(board.prune_dangling().len(), 1);
    assert_eq!(board.connections.len(), 1);
}

#[test]
fn yarn_anchor_resolves_by_kind() {
    let mut board = Board::default();
    board.papers.add(LinedPaper { id: "l".to_owned(), content: String::new(), x: 10.0, y: 10.0, rotation: 0.0, drawings: None });
    assert_eq!(board.yarn_anchor(&ItemRef::paper("l")), Some(Point::new(135.0, 40.0)));
    assert_eq!(board.yarn_anchor(&ItemRef::photo("l")), None);
}

#[test]
fn drawings_append_and_clear() {
    let mut board = Board::default();
    board.photos.add(photo_at("p", 0.0, 0.0));
    let item = ItemRef::photo("p");
    let path = DrawingPath { id: "path-1".to_owned(), points: vec![0.0; 6], color: "#000".to_owned(), stroke_width: 2.0 };
    assert!(board.append_drawing(&item, path.clone()));
    assert!(board.append_drawing(&item, path));
    assert_eq!(board.card(&item).unwrap().drawings().len(), 2);
    assert!(board.clear_drawings(&item));
    assert!(board.card(&item).unwrap().drawings().is_empty());
    assert!(!board.append_drawing(&ItemRef::photo("ghost"), DrawingPath {
        id: "x".to_owned(),
        points: Vec::new(),
        color: String::new(),
        stroke_width: 1.0,
    }));
}

// =============================================================
// Demo
// =============================================================

#[test]
fn demo_board_is_consistent() {
    let board = Board::demo();
    assert_eq!(board.title, "UFO Conspiracy Board");
    assert_eq!(board.photos.len(), 3);
    assert_eq!(board.connections.len(), 4);
    assert!(board.dangling_connections().is_empty());
    assert_eq!(board.mascots.len(), 1);
}
