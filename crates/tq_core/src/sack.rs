use std::io::{self, Read, Seek};

use serde::{Deserialize, Serialize};

use crate::reader::{LittleEndianReader, push_i32, push_string, push_u32};
use crate::scanner::{BEGIN_BLOCK, END_BLOCK};

// Sanity bound on the per-sack item count tag; anything larger means the
// stream is misaligned, not that a sack really holds that many items.
const MAX_SACK_ITEMS: i32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edition {
    TitanQuest,
    ImmortalThrone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SackKind {
    /// Ordinary storage: items carry grid coordinates.
    Inventory,
    /// Worn equipment: items have no grid position.
    Equipment,
}

/// One positioned item record. Every field is tagged in the stream with its
/// literal name, so decode and encode are driven by the same tag order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub stack_count: i32,
    pub seed: i32,
    pub base_name: String,
    pub prefix_name: String,
    pub suffix_name: String,
    pub relic_name: String,
    pub relic_bonus: String,
    pub var1: i32,
    // Immortal Throne second relic slot; left at defaults for the base game.
    pub relic_name2: String,
    pub relic_bonus2: String,
    pub var2: i32,
    // Grid position within an inventory sack; unused for equipment.
    pub point_x: i32,
    pub point_y: i32,
}

impl Item {
    pub fn parse<R: Read + Seek>(
        r: &mut LittleEndianReader<R>,
        edition: Edition,
        kind: SackKind,
    ) -> io::Result<Self> {
        r.expect_string("stackCount")?;
        let stack_count = r.read_i32()?;
        r.expect_string("seed")?;
        let seed = r.read_i32()?;
        r.expect_string("baseName")?;
        let base_name = r.read_string()?;
        r.expect_string("prefixName")?;
        let prefix_name = r.read_string()?;
        r.expect_string("suffixName")?;
        let suffix_name = r.read_string()?;
        r.expect_string("relicName")?;
        let relic_name = r.read_string()?;
        r.expect_string("relicBonus")?;
        let relic_bonus = r.read_string()?;
        r.expect_string("var1")?;
        let var1 = r.read_i32()?;

        let (relic_name2, relic_bonus2, var2) = match edition {
            Edition::ImmortalThrone => {
                r.expect_string("relicName2")?;
                let relic_name2 = r.read_string()?;
                r.expect_string("relicBonus2")?;
                let relic_bonus2 = r.read_string()?;
                r.expect_string("var2")?;
                let var2 = r.read_i32()?;
                (relic_name2, relic_bonus2, var2)
            }
            Edition::TitanQuest => (String::new(), String::new(), 0),
        };

        let (point_x, point_y) = match kind {
            SackKind::Inventory => {
                r.expect_string("pointX")?;
                let point_x = r.read_i32()?;
                r.expect_string("pointY")?;
                let point_y = r.read_i32()?;
                (point_x, point_y)
            }
            SackKind::Equipment => (0, 0),
        };

        Ok(Self {
            stack_count,
            seed,
            base_name,
            prefix_name,
            suffix_name,
            relic_name,
            relic_bonus,
            var1,
            relic_name2,
            relic_bonus2,
            var2,
            point_x,
            point_y,
        })
    }

    pub fn emit_to_vec(&self, out: &mut Vec<u8>, edition: Edition, kind: SackKind) {
        push_string(out, "stackCount");
        push_i32(out, self.stack_count);
        push_string(out, "seed");
        push_i32(out, self.seed);
        push_string(out, "baseName");
        push_string(out, &self.base_name);
        push_string(out, "prefixName");
        push_string(out, &self.prefix_name);
        push_string(out, "suffixName");
        push_string(out, &self.suffix_name);
        push_string(out, "relicName");
        push_string(out, &self.relic_name);
        push_string(out, "relicBonus");
        push_string(out, &self.relic_bonus);
        push_string(out, "var1");
        push_i32(out, self.var1);

        if edition == Edition::ImmortalThrone {
            push_string(out, "relicName2");
            push_string(out, &self.relic_name2);
            push_string(out, "relicBonus2");
            push_string(out, &self.relic_bonus2);
            push_string(out, "var2");
            push_i32(out, self.var2);
        }

        if kind == SackKind::Inventory {
            push_string(out, "pointX");
            push_i32(out, self.point_x);
            push_string(out, "pointY");
            push_i32(out, self.point_y);
        }
    }
}

/// An inventory container: a begin/end-delimited block holding a `tempBool`
/// flag, an item count, and the item records themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sack {
    kind: SackKind,
    pub temp_bool: i32,
    // Uninterpreted bookkeeping dword that follows the begin marker;
    // preserved verbatim across a round trip.
    block_tag: u32,
    items: Vec<Item>,
    modified: bool,
}

impl Sack {
    pub fn empty(kind: SackKind) -> Self {
        Self {
            kind,
            temp_bool: 0,
            block_tag: 0,
            items: Vec::new(),
            modified: false,
        }
    }

    pub fn parse<R: Read + Seek>(
        r: &mut LittleEndianReader<R>,
        edition: Edition,
        kind: SackKind,
    ) -> io::Result<Self> {
        r.expect_string("begin_block")?;
        let block_tag = r.read_u32()?;
        r.expect_string("tempBool")?;
        let temp_bool = r.read_i32()?;
        r.expect_string("size")?;
        let size = r.read_i32()?;
        if !(0..=MAX_SACK_ITEMS).contains(&size) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "implausible sack item count {} at pos={}",
                    size,
                    r.position().unwrap_or(0)
                ),
            ));
        }

        let mut items = Vec::with_capacity(size as usize);
        for _ in 0..size {
            items.push(Item::parse(r, edition, kind)?);
        }
        r.expect_string("end_block")?;

        Ok(Self {
            kind,
            temp_bool,
            block_tag,
            items,
            modified: false,
        })
    }

    pub fn emit_to_vec(&self, out: &mut Vec<u8>, edition: Edition) {
        out.extend_from_slice(&BEGIN_BLOCK);
        push_u32(out, self.block_tag);
        push_string(out, "tempBool");
        push_i32(out, self.temp_bool);
        push_string(out, "size");
        push_i32(out, self.items.len() as i32);
        for item in &self.items {
            item.emit_to_vec(out, edition, self.kind);
        }
        out.extend_from_slice(&END_BLOCK);
    }

    pub fn kind(&self) -> SackKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> &Item {
        &self.items[index]
    }

    /// Mutable access marks the sack modified; callers reach for this only
    /// when they intend to change the item.
    pub fn item_mut(&mut self, index: usize) -> &mut Item {
        self.modified = true;
        &mut self.items[index]
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn push_item(&mut self, item: Item) {
        self.items.push(item);
        self.modified = true;
    }

    pub fn remove_item(&mut self, index: usize) -> Item {
        self.modified = true;
        self.items.remove(index)
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    /// Deep copy. The duplicate keeps the source's modified flag; callers
    /// decide what the copy's flag should be.
    pub fn duplicate(&self) -> Sack {
        self.clone()
    }
}
