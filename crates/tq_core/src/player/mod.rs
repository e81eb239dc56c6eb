pub mod blocks;

use std::io::{self, Cursor, Read, Seek};

use serde::{Deserialize, Serialize};

use crate::layout::{ByteRange, RegionLayout};
use crate::reader::{LittleEndianReader, push_i32, push_string};
use crate::sack::{Edition, Sack, SackKind};
use blocks::{RegionStarts, locate_regions};

// Sanity bound on the sack-count tag, same reasoning as the per-sack item cap.
const MAX_SACKS: i32 = 1000;

pub const IMMORTAL_THRONE_SUFFIX: &str = " - Immortal Throne";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    /// `Player.chr`: the two regions sit inside opaque wrapping blocks.
    Character,
    /// Storage vault: the item region is the whole file, no wrapping, no
    /// equipment region.
    Vault,
}

/// A loaded save file: the raw bytes as read from disk, the located region
/// layout, and the decoded sacks.
///
/// Everything outside the two regions is never interpreted. On save the
/// original bytes of those spans are copied through verbatim; only the two
/// regions are re-encoded. The raw buffer itself is never mutated.
#[derive(Debug)]
pub struct Document {
    raw: Vec<u8>,
    layout: RegionLayout,
    kind: FileKind,
    edition: Edition,
    player_name: String,
    pub focused_sack: i32,
    pub selected_sack: i32,
    /// Immortal Throne equipment stream version; absent for the base game
    /// and for vaults.
    pub equipment_stream_version: Option<i32>,
    sacks: Vec<Sack>,
    equipment_sack: Option<Sack>,
}

impl Document {
    /// Parse a save file, recording the region layout needed to splice a
    /// byte-faithful copy back together on save.
    pub fn parse_with_layout<R: Read + Seek>(
        mut reader: R,
        kind: FileKind,
        edition: Edition,
    ) -> io::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let file_len = bytes.len();

        let starts = match kind {
            FileKind::Character => locate_regions(&bytes)?,
            // Vaults have no block structure: both "searches" succeed
            // immediately at offset 0.
            FileKind::Vault => RegionStarts { item: 0, equipment: 0 },
        };

        let mut r = LittleEndianReader::new(Cursor::new(bytes.as_slice()));

        r.seek_to(starts.item as u64)?;
        r.expect_string("numberOfSacks")?;
        let number_of_sacks = r.read_i32()?;
        if !(0..=MAX_SACKS).contains(&number_of_sacks) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("implausible sack count {number_of_sacks}"),
            ));
        }
        r.expect_string("currentlyFocusedSackNumber")?;
        let focused_sack = r.read_i32()?;
        r.expect_string("currentlySelectedSackNumber")?;
        let selected_sack = r.read_i32()?;

        let mut sacks = Vec::with_capacity(number_of_sacks as usize);
        for _ in 0..number_of_sacks {
            sacks.push(Sack::parse(&mut r, edition, SackKind::Inventory)?);
        }
        let item = ByteRange {
            start: starts.item,
            end: r.position()? as usize,
        };

        let (equipment, equipment_sack, equipment_stream_version) = match kind {
            FileKind::Vault => (None, None, None),
            FileKind::Character => {
                r.seek_to(starts.equipment as u64)?;
                let version = match edition {
                    Edition::ImmortalThrone => {
                        r.expect_string("equipmentCtrlIOStreamVersion")?;
                        Some(r.read_i32()?)
                    }
                    Edition::TitanQuest => None,
                };
                let sack = Sack::parse(&mut r, edition, SackKind::Equipment)?;
                let range = ByteRange {
                    start: starts.equipment,
                    end: r.position()? as usize,
                };
                (Some(range), Some(sack), version)
            }
        };

        let layout = RegionLayout {
            file_len,
            item,
            equipment,
        };
        layout.validate()?;

        Ok(Self {
            raw: bytes,
            layout,
            kind,
            edition,
            player_name: String::new(),
            focused_sack,
            selected_sack,
            equipment_stream_version,
            sacks,
            equipment_sack,
        })
    }

    /// Re-encode both regions and splice them between byte-identical copies
    /// of every original byte outside them.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let item_bytes = self.emit_item_region();

        match self.kind {
            FileKind::Vault => {
                let mut out = Vec::with_capacity(item_bytes.len());
                out.extend_from_slice(&item_bytes);
                // Normally empty; preserved in case the file carries
                // trailing bytes past the decoded region.
                out.extend_from_slice(&self.raw[self.layout.item.end..]);
                Ok(out)
            }
            FileKind::Character => {
                let (equipment_sack, equipment_range) =
                    match (&self.equipment_sack, self.layout.equipment) {
                        (Some(sack), Some(range)) => (sack, range),
                        _ => {
                            return Err(io::Error::new(
                                io::ErrorKind::InvalidData,
                                "character document has no equipment region",
                            ));
                        }
                    };
                let equipment_bytes = self.emit_equipment_region(equipment_sack);

                let mut out = Vec::with_capacity(self.raw.len());
                out.extend_from_slice(&self.raw[..self.layout.item.start]);
                out.extend_from_slice(&item_bytes);
                out.extend_from_slice(&self.raw[self.layout.item.end..equipment_range.start]);
                out.extend_from_slice(&equipment_bytes);
                out.extend_from_slice(&self.raw[equipment_range.end..]);
                Ok(out)
            }
        }
    }

    fn emit_item_region(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.layout.item.len());
        push_string(&mut out, "numberOfSacks");
        push_i32(&mut out, self.sacks.len() as i32);
        push_string(&mut out, "currentlyFocusedSackNumber");
        push_i32(&mut out, self.focused_sack);
        push_string(&mut out, "currentlySelectedSackNumber");
        push_i32(&mut out, self.selected_sack);
        for sack in &self.sacks {
            sack.emit_to_vec(&mut out, self.edition);
        }
        out
    }

    fn emit_equipment_region(&self, equipment_sack: &Sack) -> Vec<u8> {
        let mut out = Vec::new();
        if let Some(version) = self.equipment_stream_version {
            push_string(&mut out, "equipmentCtrlIOStreamVersion");
            push_i32(&mut out, version);
        }
        equipment_sack.emit_to_vec(&mut out, self.edition);
        out
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn edition(&self) -> Edition {
        self.edition
    }

    pub fn layout(&self) -> &RegionLayout {
        &self.layout
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player_name = name.into();
    }

    /// Name shown to the user: Immortal Throne characters carry a fixed
    /// suffix, vaults and base-game characters do not.
    pub fn display_name(&self) -> String {
        if self.kind == FileKind::Character && self.edition == Edition::ImmortalThrone {
            format!("{}{}", self.player_name, IMMORTAL_THRONE_SUFFIX)
        } else {
            self.player_name.clone()
        }
    }

    pub fn sack_count(&self) -> usize {
        self.sacks.len()
    }

    /// Index must be caller-validated; out of range is a contract violation
    /// and panics.
    pub fn sack(&self, index: usize) -> &Sack {
        &self.sacks[index]
    }

    pub fn sack_mut(&mut self, index: usize) -> &mut Sack {
        &mut self.sacks[index]
    }

    pub fn sacks(&self) -> &[Sack] {
        &self.sacks
    }

    pub fn equipment_sack(&self) -> Option<&Sack> {
        self.equipment_sack.as_ref()
    }

    pub fn equipment_sack_mut(&mut self) -> Option<&mut Sack> {
        self.equipment_sack.as_mut()
    }

    /// Replace the sack collection with `n` fresh, unmodified, empty sacks.
    pub fn create_empty_sacks(&mut self, n: usize) {
        self.sacks = (0..n).map(|_| Sack::empty(SackKind::Inventory)).collect();
    }

    /// Relocate a sack with remove-then-insert semantics: the sack that held
    /// `destination` shifts rather than being overwritten. Both affected
    /// slots are flagged modified. Returns false (state untouched) for an
    /// out-of-range index or `source == destination`.
    pub fn move_sack(&mut self, source: usize, destination: usize) -> bool {
        if source == destination || source >= self.sacks.len() || destination >= self.sacks.len() {
            return false;
        }

        let sack = self.sacks.remove(source);
        self.sacks.insert(destination, sack);
        self.sacks[source].set_modified(true);
        self.sacks[destination].set_modified(true);
        true
    }

    /// Deep-copy `source` over `destination`. When the destination already
    /// holds items, `confirm` is consulted exactly once and a denial leaves
    /// the collection untouched. Same index-validity rule as [`move_sack`].
    ///
    /// [`move_sack`]: Document::move_sack
    pub fn copy_sack(
        &mut self,
        source: usize,
        destination: usize,
        confirm: impl FnOnce(&Sack) -> bool,
    ) -> bool {
        if source == destination || source >= self.sacks.len() || destination >= self.sacks.len() {
            return false;
        }
        if !self.sacks[destination].is_empty() && !confirm(&self.sacks[destination]) {
            return false;
        }

        let mut copy = self.sacks[source].duplicate();
        copy.set_modified(true);
        self.sacks[destination] = copy;
        true
    }

    pub fn is_modified(&self) -> bool {
        self.sacks.iter().any(Sack::is_modified)
            || self
                .equipment_sack
                .as_ref()
                .is_some_and(Sack::is_modified)
    }
}
