use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use tq_core::core_api::{Engine, RecordPathResolver, Session};
use tq_core::player::FileKind;
use tq_core::sack::Edition;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum EditionArg {
    #[value(alias = "tq")]
    TitanQuest,
    #[value(alias = "it")]
    ImmortalThrone,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(value_name = "PLAYER.CHR|VAULT")]
    path: PathBuf,
    /// Treat the file as a storage vault instead of a character file.
    #[arg(long)]
    vault: bool,
    #[arg(long)]
    edition: Option<EditionArg>,
    #[arg(long)]
    name: bool,
    #[arg(long)]
    sacks: bool,
    #[arg(long)]
    items: bool,
    #[arg(long)]
    equipment: bool,
    #[arg(long)]
    json: bool,
    #[arg(long = "move-sack", num_args = 2, value_names = ["SOURCE", "DEST"])]
    move_sack: Option<Vec<usize>>,
    #[arg(long = "copy-sack", num_args = 2, value_names = ["SOURCE", "DEST"])]
    copy_sack: Option<Vec<usize>>,
    /// Allow --copy-sack to overwrite a non-empty destination.
    #[arg(long)]
    force: bool,
    #[arg(long = "create-empty-sacks", value_name = "N")]
    create_empty_sacks: Option<usize>,
    #[arg(long)]
    output: Option<PathBuf>,
    /// Write diagnostic item listings into this directory (failures are
    /// reported but never fatal).
    #[arg(long = "dump-dir", value_name = "DIR")]
    dump_dir: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let has_edits =
        cli.move_sack.is_some() || cli.copy_sack.is_some() || cli.create_empty_sacks.is_some();

    if has_edits && cli.output.is_none() {
        eprintln!("--move-sack/--copy-sack/--create-empty-sacks require --output <PATH>");
        process::exit(2);
    }
    if !has_edits && cli.output.is_some() {
        eprintln!("--output requires at least one edit flag");
        process::exit(2);
    }

    let kind = if cli.vault {
        FileKind::Vault
    } else {
        FileKind::Character
    };
    let edition_hint = cli.edition.map(to_core_edition);

    let mut session = Engine::new()
        .open_path(&cli.path, kind, edition_hint)
        .unwrap_or_else(|e| {
            eprintln!("Error loading {}: {e}", cli.path.display());
            process::exit(1);
        });

    apply_edits(&cli, &mut session);

    if let Some(output) = &cli.output {
        if let Err(e) = session.save_to_path(output) {
            eprintln!("Error writing {}: {e}", output.display());
            process::exit(1);
        }
        println!("wrote {}", output.display());
    }

    if let Some(dump_dir) = &cli.dump_dir {
        write_diagnostic_listings(&session, dump_dir);
    }

    print_queries(&cli, &session, has_edits);
}

fn apply_edits(cli: &Cli, session: &mut Session) {
    let document = session.document_mut();

    if let Some(n) = cli.create_empty_sacks {
        document.create_empty_sacks(n);
    }

    if let Some(indexes) = &cli.move_sack {
        let (source, destination) = (indexes[0], indexes[1]);
        if !document.move_sack(source, destination) {
            eprintln!("cannot move sack {source} to {destination}");
            process::exit(1);
        }
    }

    if let Some(indexes) = &cli.copy_sack {
        let (source, destination) = (indexes[0], indexes[1]);
        let force = cli.force;
        if !document.copy_sack(source, destination, |_| force) {
            if force {
                eprintln!("cannot copy sack {source} to {destination}");
            } else {
                eprintln!(
                    "sack {destination} is not empty; pass --force to overwrite it"
                );
            }
            process::exit(1);
        }
    }
}

fn print_queries(cli: &Cli, session: &Session, has_edits: bool) {
    let snapshot = session.snapshot();

    if cli.json {
        let value = tq_render::render_json_snapshot(&snapshot);
        match serde_json::to_string_pretty(&value) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error rendering JSON: {e}");
                process::exit(1);
            }
        }
        return;
    }

    // With no field flags and no edits, fall back to a summary dump.
    let any_field = cli.name || cli.sacks || cli.items || cli.equipment;
    let (name, sacks) = if any_field || has_edits {
        (cli.name, cli.sacks)
    } else {
        (true, true)
    };

    if name {
        println!("name={}", snapshot.display_name);
    }
    if sacks {
        for sack in &snapshot.sacks {
            println!(
                "sack {}: {} items{}",
                sack.index,
                sack.item_count,
                if sack.modified { " [modified]" } else { "" }
            );
        }
    }
    if cli.items {
        for index in 0..snapshot.sack_count {
            for item in session.resolved_sack_items(index, &RecordPathResolver) {
                let name = item.name.as_deref().unwrap_or(&item.base_name);
                println!(
                    "item sack={} [{},{}] {}x {}",
                    index, item.point_x, item.point_y, item.stack_count, name
                );
            }
        }
    }
    if cli.equipment {
        for item in session.resolved_equipment_items(&RecordPathResolver) {
            let name = item.name.as_deref().unwrap_or(&item.base_name);
            println!("equipment {}x {}", item.stack_count, name);
        }
    }
}

/// Best-effort diagnostic export: one listing for the inventory, one for the
/// equipment, next to the save data. A failed write is a warning, never an
/// error.
fn write_diagnostic_listings(session: &Session, dump_dir: &Path) {
    let snapshot = session.snapshot();

    let per_sack: Vec<_> = (0..snapshot.sack_count)
        .map(|index| session.resolved_sack_items(index, &RecordPathResolver))
        .collect();
    let inventory = tq_render::render_inventory_listing(&snapshot, &per_sack);
    let equipment = tq_render::render_equipment_listing(
        &snapshot,
        &session.resolved_equipment_items(&RecordPathResolver),
    );

    for (file_name, contents) in [("inventory.txt", inventory), ("equipment.txt", equipment)] {
        let path = dump_dir.join(file_name);
        if let Err(e) = fs::write(&path, contents) {
            warn!(path = %path.display(), error = %e, "failed to write diagnostic listing");
            eprintln!("warning: failed to write {}: {e}", path.display());
        }
    }
}

fn to_core_edition(arg: EditionArg) -> Edition {
    match arg {
        EditionArg::TitanQuest => Edition::TitanQuest,
        EditionArg::ImmortalThrone => Edition::ImmortalThrone,
    }
}
