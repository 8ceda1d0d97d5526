//! Import flashcards written as toml blocks in org-mode documents.
//!
//! Provides:
//! - Block extraction from org documents
//! - Toml card parser
//! - Append-only uid ledger and duplicate filter
//! - Note mapping and the import pipeline over a [`NoteStore`]

pub mod error;
pub mod extract;
pub mod ledger;
pub mod mapper;
pub mod parser;
pub mod pipeline;
pub mod store;
pub mod types;

#[cfg(test)]
mod testing;

pub use error::{Aborted, ImportError, LedgerError, ParseError, Result, StoreError};
pub use extract::{extract, extract_file};
pub use ledger::{filter_known, KnownUids, Ledger};
pub use mapper::to_note;
pub use parser::parse;
pub use pipeline::{Confirm, ImportOptions, Importer, Stage};
pub use store::{Note, NoteStore, Notetype};
pub use types::{CardModel, CardRecord, ImportOutcome};
