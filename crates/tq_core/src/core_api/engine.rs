use std::fs;
use std::io::Cursor;
use std::path::Path;

use crate::player::{Document, FileKind};
use crate::sack::{Edition, Sack};

use super::error::CoreError;
use super::item_resolver::ItemResolver;
use super::types::{ItemEntry, ResolvedItemEntry, SackSummary, Snapshot};

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

#[derive(Debug)]
pub struct Session {
    document: Document,
}

impl Engine {
    pub fn new() -> Self {
        Self
    }

    /// Parse an in-memory save file. With no edition hint, Immortal Throne
    /// is tried first, then the base game; the two tag vocabularies are
    /// mutually exclusive for any file that actually stores items.
    pub fn open_bytes<B: AsRef<[u8]>>(
        &self,
        bytes: B,
        kind: FileKind,
        edition_hint: Option<Edition>,
    ) -> Result<Session, CoreError> {
        let bytes = bytes.as_ref();

        let document = match edition_hint {
            Some(edition) => parse(bytes, kind, edition).map_err(|e| {
                CoreError::Format(format!("failed to parse as {}: {e}", edition_label(edition)))
            })?,
            None => match parse(bytes, kind, Edition::ImmortalThrone) {
                Ok(document) => document,
                Err(it_err) => parse(bytes, kind, Edition::TitanQuest).map_err(|tq_err| {
                    CoreError::Format(format!(
                        "failed to parse input: Immortal Throne: {it_err}; Titan Quest: {tq_err}"
                    ))
                })?,
            },
        };

        Ok(Session { document })
    }

    /// Read and parse a file from disk, deriving the stored player name from
    /// the Titan Quest save-path conventions.
    pub fn open_path(
        &self,
        path: &Path,
        kind: FileKind,
        edition_hint: Option<Edition>,
    ) -> Result<Session, CoreError> {
        let bytes = fs::read(path)?;
        let mut session = self.open_bytes(&bytes, kind, edition_hint)?;
        session
            .document
            .set_player_name(player_name_from_path(path, kind));
        Ok(session)
    }
}

impl Session {
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn snapshot(&self) -> Snapshot {
        let document = &self.document;
        Snapshot {
            kind: document.kind(),
            edition: document.edition(),
            player_name: document.player_name().to_string(),
            display_name: document.display_name(),
            sack_count: document.sack_count(),
            focused_sack: document.focused_sack,
            selected_sack: document.selected_sack,
            equipment_stream_version: document.equipment_stream_version,
            sacks: document
                .sacks()
                .iter()
                .enumerate()
                .map(|(index, sack)| summarize(index, sack))
                .collect(),
            equipment: document.equipment_sack().map(|sack| summarize(0, sack)),
        }
    }

    pub fn sack_items(&self, index: usize) -> Vec<ItemEntry> {
        entries(self.document.sack(index))
    }

    pub fn equipment_items(&self) -> Vec<ItemEntry> {
        self.document
            .equipment_sack()
            .map(entries)
            .unwrap_or_default()
    }

    pub fn resolved_sack_items(
        &self,
        index: usize,
        resolver: &dyn ItemResolver,
    ) -> Vec<ResolvedItemEntry> {
        resolve_entries(self.sack_items(index), resolver)
    }

    pub fn resolved_equipment_items(&self, resolver: &dyn ItemResolver) -> Vec<ResolvedItemEntry> {
        resolve_entries(self.equipment_items(), resolver)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        self.document
            .to_bytes()
            .map_err(|e| CoreError::Format(format!("failed to emit save bytes: {e}")))
    }

    /// Write the spliced byte stream to `path`, replacing any existing
    /// content. A write failure leaves the in-memory model untouched.
    pub fn save_to_path(&self, path: &Path) -> Result<(), CoreError> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

fn parse(bytes: &[u8], kind: FileKind, edition: Edition) -> std::io::Result<Document> {
    Document::parse_with_layout(Cursor::new(bytes), kind, edition)
}

fn edition_label(edition: Edition) -> &'static str {
    match edition {
        Edition::TitanQuest => "Titan Quest",
        Edition::ImmortalThrone => "Immortal Throne",
    }
}

fn summarize(index: usize, sack: &Sack) -> SackSummary {
    SackSummary {
        index,
        item_count: sack.len(),
        modified: sack.is_modified(),
    }
}

fn entries(sack: &Sack) -> Vec<ItemEntry> {
    sack.items()
        .iter()
        .map(|item| ItemEntry {
            stack_count: item.stack_count,
            base_name: item.base_name.clone(),
            prefix_name: item.prefix_name.clone(),
            suffix_name: item.suffix_name.clone(),
            relic_name: item.relic_name.clone(),
            point_x: item.point_x,
            point_y: item.point_y,
        })
        .collect()
}

fn resolve_entries(entries: Vec<ItemEntry>, resolver: &dyn ItemResolver) -> Vec<ResolvedItemEntry> {
    entries
        .into_iter()
        .map(|entry| ResolvedItemEntry {
            stack_count: entry.stack_count,
            name: resolver.resolve(&entry.base_name),
            base_name: entry.base_name,
            point_x: entry.point_x,
            point_y: entry.point_y,
        })
        .collect()
}

/// Character saves live in a directory named after the player with a leading
/// underscore (`SaveData/Main/_Hero/Player.chr`); vaults are named directly
/// (`MyVault.vault`).
fn player_name_from_path(path: &Path, kind: FileKind) -> String {
    match kind {
        FileKind::Character => path
            .parent()
            .and_then(Path::file_name)
            .map(|dir| {
                let dir = dir.to_string_lossy();
                dir.strip_prefix('_').unwrap_or(&dir).to_string()
            })
            .unwrap_or_default(),
        FileKind::Vault => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}
