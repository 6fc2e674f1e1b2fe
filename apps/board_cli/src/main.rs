use std::path::PathBuf;

use anyhow::{Context, Result};
use board_core::{Board, BoardIntent, BoardOptions, Effect};
use clap::{Parser, Subcommand};
use shared::OpportunityId;
use storage::{FileBackend, Store};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::{load_settings, prepare_data_dir, DEFAULT_CONFIG_FILE};

#[derive(Parser, Debug)]
#[command(name = "opportunity-board", about = "Track job applications across four stages")]
struct Cli {
    /// Directory holding the board snapshot.
    #[arg(long)]
    data_dir: Option<String>,
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Do not add sample opportunities to a brand-new board.
    #[arg(long)]
    no_seed: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Add {
        title: String,
        company: String,
    },
    /// Move a card to another column (saved, applied, interview, offer).
    Move {
        id: i64,
        status: String,
    },
    Delete {
        id: i64,
    },
    List {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        json: bool,
    },
    Search {
        query: String,
        #[arg(long)]
        json: bool,
    },
    Show {
        id: i64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config);
    if let Some(dir) = cli.data_dir {
        settings.data_dir = dir;
    }
    if cli.no_seed {
        settings.seed_samples = false;
    }

    let data_dir = prepare_data_dir(&settings.data_dir)?;
    let backend = FileBackend::open(&data_dir)
        .with_context(|| format!("failed to open board data in '{}'", data_dir.display()))?;
    let store = Store::with_key(backend, settings.storage_key.clone());
    let mut board = Board::open(
        store,
        BoardOptions {
            seed_samples: settings.seed_samples,
        },
    )
    .context("failed to open opportunity board")?;

    match cli.command {
        Command::Add { title, company } => {
            let effect = board.dispatch(BoardIntent::Add { title, company })?;
            report(&effect);
        }
        Command::Move { id, status } => {
            let intent = BoardIntent::drop_onto(OpportunityId(id), &status)?;
            report(&board.dispatch(intent)?);
        }
        Command::Delete { id } => {
            let effect = board.dispatch(BoardIntent::Delete {
                id: OpportunityId(id),
            })?;
            report(&effect);
        }
        Command::List { query, json } | Command::Search { query, json } => {
            board.dispatch(BoardIntent::Search { query })?;
            let projection = board.projection();
            if json {
                println!("{}", serde_json::to_string_pretty(&projection)?);
            } else {
                print!("{}", render::render_board(&projection));
            }
        }
        Command::Show { id } => {
            let opportunity = board
                .repository()
                .find_by_id(OpportunityId(id))
                .with_context(|| format!("no opportunity with id {id}"))?;
            print!("{}", render::render_detail(opportunity));
        }
    }

    if let Some(warning) = board.persistence_warning() {
        eprintln!("warning: {warning}; changes are kept for this run only");
    }

    Ok(())
}

fn report(effect: &Effect) {
    match effect {
        Effect::Added(opp) => println!(
            "added #{} {} @ {} ({})",
            opp.id(),
            opp.title(),
            opp.company(),
            opp.status()
        ),
        Effect::Moved { id, status } => println!("moved #{id} to {status}"),
        Effect::Deleted(opp) => println!("deleted #{} {}", opp.id(), opp.title()),
        Effect::Ignored { id } => println!("no opportunity with id {id}; nothing changed"),
        Effect::QueryChanged { .. } => {}
    }
}
