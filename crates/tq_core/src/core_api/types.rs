use serde::{Deserialize, Serialize};

use crate::player::FileKind;
use crate::sack::Edition;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SackSummary {
    pub index: usize,
    pub item_count: usize,
    pub modified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub kind: FileKind,
    pub edition: Edition,
    pub player_name: String,
    pub display_name: String,
    pub sack_count: usize,
    pub focused_sack: i32,
    pub selected_sack: i32,
    pub equipment_stream_version: Option<i32>,
    pub sacks: Vec<SackSummary>,
    pub equipment: Option<SackSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemEntry {
    pub stack_count: i32,
    pub base_name: String,
    pub prefix_name: String,
    pub suffix_name: String,
    pub relic_name: String,
    pub point_x: i32,
    pub point_y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolvedItemEntry {
    pub stack_count: i32,
    pub base_name: String,
    pub name: Option<String>,
    pub point_x: i32,
    pub point_y: i32,
}
