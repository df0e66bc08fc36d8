mod app;

use app::{ReviewApp, RunEnd};
use chrono::Utc;
use clap::{Parser, Subcommand};
use flashcard_review::export::json::{export_schedules_to_path, import_snapshot};
use flashcard_review::models::{DeckSummary, SessionSnapshot, SnapshotMode, seeded_rng};
use flashcard_review::persistence::JsonLinesSink;
use flashcard_review::{ReviewConfig, ReviewSession};
use std::error::Error;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flashcards", version, about = "Spaced repetition flashcard review")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Review the cards of a snapshot file in the terminal
    Review {
        /// JSON array of { id, interval, ease_factor, due_at } records
        snapshot: PathBuf,
        /// Study every card instead of only the due ones
        #[arg(long)]
        all: bool,
        /// Shuffle seed, for a reproducible card order
        #[arg(long)]
        seed: Option<u64>,
        /// TOML file with scheduler and auto-rate settings
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the updated schedule records here when the session ends
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show total, due and new card counts
    Summary { snapshot: PathBuf },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match Cli::parse().command {
        Commands::Review {
            snapshot,
            all,
            seed,
            config,
            out,
        } => {
            let mut config = match config {
                Some(path) => ReviewConfig::load(path)?,
                None => ReviewConfig::default(),
            };
            if seed.is_some() {
                config.seed = seed;
            }
            let mode = if all {
                SnapshotMode::All
            } else {
                SnapshotMode::DueOnly
            };

            let records = import_snapshot(&snapshot)?;
            let now = Utc::now();
            let snapshot =
                SessionSnapshot::build(&records, mode, now, &mut seeded_rng(config.seed));
            let mut session = ReviewSession::start(snapshot, &config, now);

            let mut sink = JsonLinesSink::new(io::stdout().lock());
            let end = ReviewApp::new(io::stdin().lock(), io::stderr(), Utc::now)
                .run(&mut session, &mut sink)?;

            let schedules = session.schedules();
            let summary = match end {
                RunEnd::Aborted => session.abort(),
                RunEnd::Finished => session.summary(),
            };
            eprintln!(
                "{} review(s), {} requeue(s), {} card(s) done, {} left{}",
                summary.reviews,
                summary.requeues,
                summary.completed.len(),
                summary.remaining.len(),
                if end == RunEnd::Aborted { " (aborted)" } else { "" }
            );

            if let Some(out) = out {
                let mut merged = records;
                for update in schedules {
                    if let Some(record) = merged.iter_mut().find(|r| r.id == update.id) {
                        record.state = update.state;
                    }
                }
                export_schedules_to_path(&merged, &out)?;
                eprintln!("Saved {} record(s) to {}", merged.len(), out.display());
            }
        }
        Commands::Summary { snapshot } => {
            let records = import_snapshot(&snapshot)?;
            let summary = DeckSummary::from_cards(&records, Utc::now());
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
