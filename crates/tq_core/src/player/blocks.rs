//! Nested block walk that locates the two decoded regions.
//!
//! Character files wrap the inventory in an unspecified hierarchy of named
//! blocks. The walker does not interpret that hierarchy; it only follows
//! begin/end markers until it has seen the two block names that announce the
//! item region and the equipment region.

use std::io;

use tracing::warn;

use crate::scanner::{BEGIN_BLOCK, END_BLOCK, Marker, find_next_marker};

/// Block name announcing the item region; followed by a 4-byte value and
/// then the region's first tag.
pub const ITEM_REGION_MARKER: &str = "itemPositionsSavedAsGridCoords";

/// Block name announcing the equipment region, laid out the same way.
pub const EQUIPMENT_REGION_MARKER: &str = "useAlternate";

// Stand-in name for a block whose "name" turned out to be the next marker.
const UNNAMED_BLOCK: &str = "(unnamed)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionStarts {
    pub item: usize,
    pub equipment: usize,
}

/// Walk the block structure until both region start offsets are known.
///
/// Vault files contain no wrapping blocks; callers skip the walk entirely
/// and treat the whole buffer as the item region.
pub fn locate_regions(buf: &[u8]) -> io::Result<RegionStarts> {
    let mut nest_level: i32 = 0;
    let mut offset = 0usize;
    let mut item: Option<usize> = None;
    let mut equipment: Option<usize> = None;

    while item.is_none() || equipment.is_none() {
        let Some((pos, marker)) = find_next_marker(buf, offset) else {
            break;
        };

        match marker {
            Marker::Begin => {
                nest_level += 1;
                offset = pos + BEGIN_BLOCK.len() + 4;

                let (mut name, after) = read_block_name(buf, offset)?;
                offset = after;

                // A block with no real name reads back the next marker
                // itself. Rewind by that marker's full length so the next
                // scan rediscovers it.
                if name == "begin_block" {
                    offset -= BEGIN_BLOCK.len();
                    name = UNNAMED_BLOCK.to_string();
                } else if name == "end_block" {
                    offset -= END_BLOCK.len();
                    name = UNNAMED_BLOCK.to_string();
                }

                if name == ITEM_REGION_MARKER {
                    offset += 4;
                    item = Some(offset);
                } else if name == EQUIPMENT_REGION_MARKER {
                    offset += 4;
                    equipment = Some(offset);
                }
            }
            Marker::End => {
                nest_level -= 1;
                if nest_level < 0 {
                    warn!(pos, nest_level, "end marker underflows block nesting");
                }
                offset = pos + END_BLOCK.len();
            }
        }
    }

    match (item, equipment) {
        (Some(item), Some(equipment)) => Ok(RegionStarts { item, equipment }),
        (item, _) => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "missing {} region marker",
                if item.is_none() { "item" } else { "equipment" }
            ),
        )),
    }
}

fn read_block_name(buf: &[u8], offset: usize) -> io::Result<(String, usize)> {
    let malformed = || {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("malformed block name at pos={offset}"),
        )
    };

    let len_bytes = buf.get(offset..offset + 4).ok_or_else(malformed)?;
    let len = u32::from_le_bytes([len_bytes[0], len_bytes[1], len_bytes[2], len_bytes[3]]) as usize;
    let text = buf.get(offset + 4..offset + 4 + len).ok_or_else(malformed)?;

    Ok((
        text.iter().map(|&b| b as char).collect(),
        offset + 4 + len,
    ))
}
