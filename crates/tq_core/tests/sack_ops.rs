mod fixtures;

use std::cell::Cell;
use std::io::Cursor;

use tq_core::player::{Document, FileKind};
use tq_core::sack::Edition;

use fixtures::{FixtureItem, build_character, build_vault, default_equipment, default_sacks};

fn vault_with_named_sacks(names: &[&'static str]) -> Document {
    let sacks: Vec<Vec<FixtureItem>> = names
        .iter()
        .map(|&name| vec![FixtureItem::named(name)])
        .collect();
    let bytes = build_vault(&sacks);
    Document::parse_with_layout(Cursor::new(bytes.as_slice()), FileKind::Vault, Edition::ImmortalThrone)
        .expect("fixture should parse")
}

fn sack_order(document: &Document) -> Vec<String> {
    (0..document.sack_count())
        .map(|i| {
            let sack = document.sack(i);
            if sack.is_empty() {
                "-".to_string()
            } else {
                sack.item(0).base_name.clone()
            }
        })
        .collect()
}

#[test]
fn move_sack_uses_remove_then_insert_semantics() {
    let mut document = vault_with_named_sacks(&["A", "B", "C", "D"]);

    assert!(document.move_sack(2, 0));
    assert_eq!(sack_order(&document), vec!["C", "A", "B", "D"]);

    assert!(document.sack(0).is_modified());
    assert!(document.sack(2).is_modified());
    assert!(!document.sack(1).is_modified());
    assert!(!document.sack(3).is_modified());
}

#[test]
fn move_sack_forward_shifts_intervening_sacks_left() {
    let mut document = vault_with_named_sacks(&["A", "B", "C", "D"]);

    assert!(document.move_sack(0, 2));
    assert_eq!(sack_order(&document), vec!["B", "C", "A", "D"]);
}

#[test]
fn move_sack_rejects_same_index_and_out_of_range() {
    let mut document = vault_with_named_sacks(&["A", "B", "C", "D"]);

    assert!(!document.move_sack(1, 1));
    assert!(!document.move_sack(4, 0));
    assert!(!document.move_sack(0, 4));

    assert_eq!(sack_order(&document), vec!["A", "B", "C", "D"]);
    assert!(!document.is_modified());
}

#[test]
fn copy_sack_consults_policy_exactly_once_for_non_empty_destination() {
    let mut document = vault_with_named_sacks(&["A", "B"]);
    let calls = Cell::new(0u32);

    let ok = document.copy_sack(0, 1, |destination| {
        calls.set(calls.get() + 1);
        assert_eq!(destination.item(0).base_name, "B");
        true
    });

    assert!(ok);
    assert_eq!(calls.get(), 1);
    assert_eq!(sack_order(&document), vec!["A", "A"]);
    assert!(document.sack(1).is_modified());
    assert!(!document.sack(0).is_modified());
}

#[test]
fn copy_sack_denied_leaves_destination_unchanged() {
    let mut document = vault_with_named_sacks(&["A", "B"]);

    let ok = document.copy_sack(0, 1, |_| false);

    assert!(!ok);
    assert_eq!(sack_order(&document), vec!["A", "B"]);
    assert!(!document.is_modified());
}

#[test]
fn copy_sack_skips_policy_for_empty_destination() {
    let sacks = vec![vec![FixtureItem::named("A")], Vec::new()];
    let bytes = build_vault(&sacks);
    let mut document = Document::parse_with_layout(
        Cursor::new(bytes.as_slice()),
        FileKind::Vault,
        Edition::ImmortalThrone,
    )
    .unwrap();

    let ok = document.copy_sack(0, 1, |_| unreachable!("policy must not run"));

    assert!(ok);
    assert_eq!(sack_order(&document), vec!["A", "A"]);
}

#[test]
fn copy_sack_rejects_same_index_and_out_of_range() {
    let mut document = vault_with_named_sacks(&["A", "B"]);

    assert!(!document.copy_sack(0, 0, |_| true));
    assert!(!document.copy_sack(2, 0, |_| true));
    assert!(!document.copy_sack(0, 2, |_| true));
    assert_eq!(sack_order(&document), vec!["A", "B"]);
}

#[test]
fn copy_sack_produces_a_deep_copy() {
    let mut document = vault_with_named_sacks(&["A", "B"]);
    assert!(document.copy_sack(0, 1, |_| true));

    document.sack_mut(1).item_mut(0).stack_count = 99;
    assert_eq!(document.sack(0).item(0).stack_count, 1);
}

#[test]
fn create_empty_sacks_replaces_collection_with_unmodified_sacks() {
    let mut document = vault_with_named_sacks(&["A", "B"]);
    assert!(document.move_sack(0, 1));
    assert!(document.is_modified());

    document.create_empty_sacks(5);

    assert_eq!(document.sack_count(), 5);
    assert!((0..5).all(|i| document.sack(i).is_empty()));
    assert!(!document.is_modified());
}

#[test]
fn is_modified_reflects_equipment_sack() {
    let bytes = build_character(&default_sacks(), &default_equipment(), true);
    let mut document = Document::parse_with_layout(
        Cursor::new(bytes.as_slice()),
        FileKind::Character,
        Edition::ImmortalThrone,
    )
    .unwrap();

    assert!(!document.is_modified());
    document
        .equipment_sack_mut()
        .expect("character file has equipment")
        .item_mut(0)
        .seed = 7;
    assert!(document.is_modified());
}

#[test]
fn display_name_appends_suffix_for_immortal_throne_characters_only() {
    let bytes = build_character(&default_sacks(), &default_equipment(), true);
    let mut document = Document::parse_with_layout(
        Cursor::new(bytes.as_slice()),
        FileKind::Character,
        Edition::ImmortalThrone,
    )
    .unwrap();
    document.set_player_name("Hero");
    assert_eq!(document.display_name(), "Hero - Immortal Throne");

    let bytes = build_character(&default_sacks(), &default_equipment(), false);
    let mut document = Document::parse_with_layout(
        Cursor::new(bytes.as_slice()),
        FileKind::Character,
        Edition::TitanQuest,
    )
    .unwrap();
    document.set_player_name("Hero");
    assert_eq!(document.display_name(), "Hero");

    let bytes = build_vault(&default_sacks());
    let mut document = Document::parse_with_layout(
        Cursor::new(bytes.as_slice()),
        FileKind::Vault,
        Edition::ImmortalThrone,
    )
    .unwrap();
    document.set_player_name("Hero");
    assert_eq!(document.display_name(), "Hero");
}
