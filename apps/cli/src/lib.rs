//! `wunderbar` — import toml flashcards from org-mode files.

pub mod cli;
pub mod config;
pub mod db;
pub mod prompt;

use anyhow::Context;
use config::{Config, Verbosity};
use db::SqliteCollection;
use prompt::TerminalPrompt;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wunderbar_core::{ImportOptions, ImportOutcome, Importer, Ledger};

/// Install the global subscriber. `RUST_LOG` wins over `-v` when set.
pub fn init_tracing(verbosity: Verbosity) {
    let filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Import `config.file` into the configured collection.
pub fn run(config: &Config) -> anyhow::Result<ImportOutcome> {
    tracing::debug!(base = %config.base.display(), "anki base dir");
    tracing::debug!(collection = %config.collection.display(), "anki collection file");
    tracing::debug!(file = %config.file.display(), "input file");

    let mut collection = SqliteCollection::open(&config.collection)?;
    let ledger = Ledger::open(&config.ledger)
        .with_context(|| format!("unable to prepare ledger {}", config.ledger.display()))?;

    let options = ImportOptions {
        deck: config.deck.clone(),
        force: config.force,
    };
    let prompt = TerminalPrompt::stdio(config.collection.clone());
    let outcome = Importer::new(&mut collection, &ledger, prompt, options)
        .import_file(&config.file)?;

    Ok(outcome)
}

/// One-line report printed after a successful run.
pub fn summary(outcome: &ImportOutcome, file: &Path, deck: &str) -> String {
    match outcome {
        ImportOutcome::NoCards => format!("`{}` does not contain any cards", file.display()),
        ImportOutcome::NoUniqueCards => {
            format!("`{}` does not contain any unique cards", file.display())
        }
        ImportOutcome::Imported { uids } => {
            format!("Imported {} card(s) into `{}`", uids.len(), deck)
        }
    }
}
