use std::fmt::Write as _;

use serde_json::{Map as JsonMap, Value as JsonValue};
use tq_core::core_api::{ResolvedItemEntry, Snapshot};

const NAME_COL_WIDTH: usize = 36;
const STACK_COL_WIDTH: usize = 4;

/// Diagnostic listing of every inventory sack, one block per sack.
pub fn render_inventory_listing(snapshot: &Snapshot, sacks: &[Vec<ResolvedItemEntry>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", snapshot.display_name);
    let _ = writeln!(
        out,
        "Sacks: {} (focused {}, selected {})",
        snapshot.sack_count, snapshot.focused_sack, snapshot.selected_sack
    );

    for (index, items) in sacks.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Sack {} ({} items)", index, items.len());
        for item in items {
            push_item_line(&mut out, item, true);
        }
    }

    out
}

/// Diagnostic listing of the worn equipment; equipment carries no grid
/// coordinates.
pub fn render_equipment_listing(snapshot: &Snapshot, items: &[ResolvedItemEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", snapshot.display_name);
    let _ = writeln!(out, "Equipment ({} items)", items.len());
    for item in items {
        push_item_line(&mut out, item, false);
    }
    out
}

fn push_item_line(out: &mut String, item: &ResolvedItemEntry, with_position: bool) {
    let name = item.name.as_deref().unwrap_or(&item.base_name);
    let position = if with_position {
        format!("[{:2},{:2}] ", item.point_x, item.point_y)
    } else {
        String::new()
    };
    let _ = writeln!(
        out,
        "  {position}{stack:>stack_width$}x {name:<name_width$} {base}",
        stack = item.stack_count,
        stack_width = STACK_COL_WIDTH,
        name = name,
        name_width = NAME_COL_WIDTH,
        base = item.base_name
    );
}

/// Canonical JSON rendering of a snapshot: stable top-level key order.
pub fn render_json_snapshot(snapshot: &Snapshot) -> JsonValue {
    let mut map = JsonMap::new();
    map.insert("kind".into(), kind_json(snapshot));
    map.insert("edition".into(), edition_json(snapshot));
    map.insert("name".into(), JsonValue::String(snapshot.player_name.clone()));
    map.insert(
        "display_name".into(),
        JsonValue::String(snapshot.display_name.clone()),
    );
    map.insert("sack_count".into(), JsonValue::from(snapshot.sack_count));
    map.insert("focused_sack".into(), JsonValue::from(snapshot.focused_sack));
    map.insert(
        "selected_sack".into(),
        JsonValue::from(snapshot.selected_sack),
    );
    map.insert(
        "equipment_stream_version".into(),
        snapshot
            .equipment_stream_version
            .map(JsonValue::from)
            .unwrap_or(JsonValue::Null),
    );
    map.insert(
        "sacks".into(),
        JsonValue::Array(
            snapshot
                .sacks
                .iter()
                .map(|sack| {
                    let mut entry = JsonMap::new();
                    entry.insert("index".into(), JsonValue::from(sack.index));
                    entry.insert("item_count".into(), JsonValue::from(sack.item_count));
                    entry.insert("modified".into(), JsonValue::Bool(sack.modified));
                    JsonValue::Object(entry)
                })
                .collect(),
        ),
    );
    map.insert(
        "equipment_item_count".into(),
        snapshot
            .equipment
            .as_ref()
            .map(|sack| JsonValue::from(sack.item_count))
            .unwrap_or(JsonValue::Null),
    );
    JsonValue::Object(map)
}

fn kind_json(snapshot: &Snapshot) -> JsonValue {
    serde_json::to_value(snapshot.kind).unwrap_or(JsonValue::Null)
}

fn edition_json(snapshot: &Snapshot) -> JsonValue {
    serde_json::to_value(snapshot.edition).unwrap_or(JsonValue::Null)
}
