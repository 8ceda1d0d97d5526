//! Command-line arguments.

use crate::config::DEFAULT_DECK;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Import org-mode toml flashcards into an Anki collection
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Org file to parse
    #[arg(short = 'F', long)]
    pub file: PathBuf,

    /// Base directory of the wunderbar collection (`User 1/collection.anki2`).
    ///
    /// The collection uses wunderbar's own Anki-style schema; collections
    /// written by Anki desktop are refused. [default: $XDG_DATA_HOME/Anki2]
    #[arg(short, long, env = "WUNDERBAR_BASE", value_parser = existing_dir)]
    pub base: Option<PathBuf>,

    /// Name of the deck cards are added to
    #[arg(short, long, env = "WUNDERBAR_DECK", default_value = DEFAULT_DECK)]
    pub deck: String,

    /// Uid ledger [default: $XDG_DATA_HOME/wunderbar/uids.log]
    #[arg(long, env = "WUNDERBAR_LEDGER")]
    pub ledger: Option<PathBuf>,

    /// Write changes without asking for confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn existing_dir(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("`{value}` is not a valid directory"))
    }
}
