//! Synthetic save-file builders for integration tests.
//!
//! Fixtures are written tag by tag against the documented byte layout rather
//! than through the crate's own encoder, so the round-trip tests exercise
//! parse and emit independently.

#![allow(dead_code)]

use tq_core::reader::{push_i32, push_string, push_u32};
use tq_core::scanner::{BEGIN_BLOCK, END_BLOCK};

pub struct FixtureItem {
    pub base_name: &'static str,
    pub x: i32,
    pub y: i32,
}

impl FixtureItem {
    pub fn named(base_name: &'static str) -> Self {
        Self {
            base_name,
            x: 0,
            y: 0,
        }
    }
}

pub fn push_item(out: &mut Vec<u8>, item: &FixtureItem, immortal_throne: bool, equipment: bool) {
    push_string(out, "stackCount");
    push_i32(out, 1);
    push_string(out, "seed");
    push_i32(out, 42);
    push_string(out, "baseName");
    push_string(out, item.base_name);
    push_string(out, "prefixName");
    push_string(out, "");
    push_string(out, "suffixName");
    push_string(out, "");
    push_string(out, "relicName");
    push_string(out, "");
    push_string(out, "relicBonus");
    push_string(out, "");
    push_string(out, "var1");
    push_i32(out, 0);
    if immortal_throne {
        push_string(out, "relicName2");
        push_string(out, "");
        push_string(out, "relicBonus2");
        push_string(out, "");
        push_string(out, "var2");
        push_i32(out, 0);
    }
    if !equipment {
        push_string(out, "pointX");
        push_i32(out, item.x);
        push_string(out, "pointY");
        push_i32(out, item.y);
    }
}

pub fn push_sack(out: &mut Vec<u8>, items: &[FixtureItem], immortal_throne: bool, equipment: bool) {
    out.extend_from_slice(&BEGIN_BLOCK);
    push_u32(out, 0);
    push_string(out, "tempBool");
    push_i32(out, 0);
    push_string(out, "size");
    push_i32(out, items.len() as i32);
    for item in items {
        push_item(out, item, immortal_throne, equipment);
    }
    out.extend_from_slice(&END_BLOCK);
}

pub fn push_item_region(out: &mut Vec<u8>, sacks: &[Vec<FixtureItem>], immortal_throne: bool) {
    push_string(out, "numberOfSacks");
    push_i32(out, sacks.len() as i32);
    push_string(out, "currentlyFocusedSackNumber");
    push_i32(out, 0);
    push_string(out, "currentlySelectedSackNumber");
    push_i32(out, 0);
    for items in sacks {
        push_sack(out, items, immortal_throne, false);
    }
}

/// A vault is exactly one item region with no wrapping.
pub fn build_vault(sacks: &[Vec<FixtureItem>]) -> Vec<u8> {
    let mut out = Vec::new();
    push_item_region(&mut out, sacks, true);
    out
}

/// A character file: opaque prefix, wrapped item and equipment regions, and
/// an opaque suffix, mirroring the block structure the walker has to skip.
pub fn build_character(
    sacks: &[Vec<FixtureItem>],
    equipment: &[FixtureItem],
    immortal_throne: bool,
) -> Vec<u8> {
    let mut out = Vec::new();

    // Opaque header bytes the core never interprets.
    push_string(&mut out, "headerVersion");
    push_i32(&mut out, 1);

    out.extend_from_slice(&BEGIN_BLOCK);
    push_u32(&mut out, 0);
    push_string(&mut out, "playerHeader");

    out.extend_from_slice(&BEGIN_BLOCK);
    push_u32(&mut out, 0);
    push_string(&mut out, "itemPositionsSavedAsGridCoords");
    push_u32(&mut out, 1);
    push_item_region(&mut out, sacks, immortal_throne);
    out.extend_from_slice(&END_BLOCK);

    out.extend_from_slice(&BEGIN_BLOCK);
    push_u32(&mut out, 0);
    push_string(&mut out, "useAlternate");
    push_u32(&mut out, 0);
    if immortal_throne {
        push_string(&mut out, "equipmentCtrlIOStreamVersion");
        push_i32(&mut out, 0);
    }
    push_sack(&mut out, equipment, immortal_throne, true);
    out.extend_from_slice(&END_BLOCK);

    out.extend_from_slice(&END_BLOCK);

    // Opaque trailing bytes.
    push_string(&mut out, "description");
    push_string(&mut out, "synthetic fixture");

    out
}

pub fn default_sacks() -> Vec<Vec<FixtureItem>> {
    vec![
        vec![
            FixtureItem {
                base_name: "records\\item\\equipmentweapon\\sword\\sw_05.dbr",
                x: 2,
                y: 5,
            },
            FixtureItem {
                base_name: "records\\item\\equipmentarmor\\helm\\hm_01.dbr",
                x: 0,
                y: 0,
            },
        ],
        vec![FixtureItem {
            base_name: "records\\item\\questitems\\key_01.dbr",
            x: 1,
            y: 1,
        }],
    ]
}

pub fn default_equipment() -> Vec<FixtureItem> {
    vec![FixtureItem::named(
        "records\\item\\equipmentshield\\sh_02.dbr",
    )]
}
