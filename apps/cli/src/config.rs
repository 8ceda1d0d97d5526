//! Runtime configuration resolved from arguments and the environment.

use crate::cli::Cli;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_DECK: &str = "Wunderbar";

/// Collection location relative to the Anki base directory.
pub const REL_COLLECTION_PATH: &str = "User 1/collection.anki2";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to determine the user data directory")]
    NoDataDir,

    #[error("`{}` is not a valid directory", .0.display())]
    NotADirectory(PathBuf),
}

/// Log verbosity selected with `-v`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verbosity(pub u8);

impl Verbosity {
    /// Filter directive used when `RUST_LOG` is unset.
    pub fn directive(self) -> &'static str {
        match self.0 {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Everything a run needs, resolved up front.
#[derive(Debug, Clone)]
pub struct Config {
    pub file: PathBuf,
    pub base: PathBuf,
    pub collection: PathBuf,
    pub ledger: PathBuf,
    pub deck: String,
    pub force: bool,
    pub verbosity: Verbosity,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let base = match cli.base {
            Some(base) => base,
            None => default_base()?,
        };
        if !base.is_dir() {
            return Err(ConfigError::NotADirectory(base));
        }

        let ledger = match cli.ledger {
            Some(ledger) => ledger,
            None => default_ledger()?,
        };

        Ok(Self {
            file: cli.file,
            collection: collection_path(&base),
            base,
            ledger,
            deck: cli.deck,
            force: cli.force,
            verbosity: Verbosity(cli.verbose),
        })
    }
}

fn data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_dir().ok_or(ConfigError::NoDataDir)
}

/// `$XDG_DATA_HOME/Anki2`
pub fn default_base() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join("Anki2"))
}

/// `$XDG_DATA_HOME/wunderbar/uids.log`
pub fn default_ledger() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join("wunderbar").join("uids.log"))
}

pub fn collection_path(base: &Path) -> PathBuf {
    base.join(REL_COLLECTION_PATH)
}
