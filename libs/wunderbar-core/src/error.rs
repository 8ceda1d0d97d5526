//! Error types for wunderbar-core.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::Stage;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing a card block.
///
/// Any of these rejects the whole block; no partial card list is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed toml: {0}")]
    MalformedSyntax(String),

    #[error("`{0}` is not a valid card type")]
    InvalidModel(String),

    #[error("invalid card `{uid}` in `{model}`: {reason}")]
    InvalidCard {
        model: String,
        uid: String,
        reason: String,
    },

    #[error("duplicate uid `{0}`")]
    DuplicateUid(String),
}

/// Errors raised by the identifier ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("unable to read ledger {}: {source}", path.display())]
    Unreadable { path: PathBuf, source: io::Error },

    #[error("unable to append to ledger {}: {source}", path.display())]
    Unwritable { path: PathBuf, source: io::Error },
}

/// Errors reported by a [`NoteStore`](crate::store::NoteStore) implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("collection {} is locked by another process (is Anki running?)", .0.display())]
    Busy(PathBuf),

    #[error("failed to get card model `{0}`")]
    ModelNotFound(String),

    #[error("card model `{notetype}` has {found} fields, {required} required")]
    MissingFields {
        notetype: String,
        required: usize,
        found: usize,
    },

    #[error("store error: {0}")]
    Backend(String),
}

/// Any failure that stops an import run.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unable to read file {}: {source}", path.display())]
    Unreadable { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("confirmation prompt failed: {0}")]
    Prompt(#[source] io::Error),

    #[error("changes were not confirmed")]
    UserDeclined,
}

/// Terminal state of a failed run: the stage it stopped in and why.
#[derive(Debug, Error)]
#[error("import aborted while {stage}: {error}")]
pub struct Aborted {
    pub stage: Stage,
    #[source]
    pub error: ImportError,
}

impl Aborted {
    pub fn new(stage: Stage, error: impl Into<ImportError>) -> Self {
        Self {
            stage,
            error: error.into(),
        }
    }
}
