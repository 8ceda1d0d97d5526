//! Import pipeline: document → block → cards → notes → collection.

use crate::error::{Aborted, ImportError};
use crate::extract::{extract, extract_file};
use crate::ledger::{filter_known, Ledger};
use crate::mapper::to_note;
use crate::parser;
use crate::store::{Note, NoteStore};
use crate::types::ImportOutcome;
use std::fmt;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Stage of an import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extracting,
    Parsing,
    LoadingLedger,
    Filtering,
    Mapping,
    Inserting,
    ConfirmingWithUser,
    Persisting,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Extracting => "extracting toml",
            Self::Parsing => "parsing cards",
            Self::LoadingLedger => "reading uids",
            Self::Filtering => "filtering known cards",
            Self::Mapping => "mapping notes",
            Self::Inserting => "adding notes",
            Self::ConfirmingWithUser => "confirming changes",
            Self::Persisting => "saving",
            Self::Done => "done",
        })
    }
}

/// Asks whether the pending notes should be written.
pub trait Confirm {
    fn confirm(&mut self, notes: &[Note]) -> io::Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(&[Note]) -> io::Result<bool>,
{
    fn confirm(&mut self, notes: &[Note]) -> io::Result<bool> {
        self(notes)
    }
}

/// Per-run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Deck new notes are added to.
    pub deck: String,
    /// Skip the confirmation step.
    pub force: bool,
}

/// Runs one document through the pipeline against a store and a ledger.
pub struct Importer<'a, S: NoteStore, C: Confirm> {
    store: &'a mut S,
    ledger: &'a Ledger,
    confirm: C,
    options: ImportOptions,
}

fn abort<E: Into<ImportError>>(stage: Stage) -> impl FnOnce(E) -> Aborted {
    move |error| Aborted::new(stage, error)
}

impl<'a, S: NoteStore, C: Confirm> Importer<'a, S, C> {
    pub fn new(store: &'a mut S, ledger: &'a Ledger, confirm: C, options: ImportOptions) -> Self {
        Self {
            store,
            ledger,
            confirm,
            options,
        }
    }

    /// Import the cards of the document at `path`.
    pub fn import_file(&mut self, path: &Path) -> Result<ImportOutcome, Aborted> {
        debug!(stage = %Stage::Extracting, file = %path.display());
        let block = extract_file(path).map_err(abort(Stage::Extracting))?;
        self.import_block(&block)
    }

    /// Import the cards of an in-memory document.
    pub fn import_text(&mut self, document: &str) -> Result<ImportOutcome, Aborted> {
        debug!(stage = %Stage::Extracting);
        self.import_block(&extract(document))
    }

    fn import_block(&mut self, block: &str) -> Result<ImportOutcome, Aborted> {
        if block.trim().is_empty() {
            info!("document does not contain any cards");
            return Ok(ImportOutcome::NoCards);
        }

        debug!(stage = %Stage::Parsing);
        let cards = parser::parse(block).map_err(abort(Stage::Parsing))?;
        if cards.is_empty() {
            info!("document does not contain any cards");
            return Ok(ImportOutcome::NoCards);
        }

        debug!(stage = %Stage::LoadingLedger, ledger = %self.ledger.path().display());
        let known = self.ledger.load().map_err(abort(Stage::LoadingLedger))?;

        debug!(stage = %Stage::Filtering, cards = cards.len(), known = known.len());
        let cards = filter_known(cards, &known);
        if cards.is_empty() {
            info!("document does not contain any unique cards");
            return Ok(ImportOutcome::NoUniqueCards);
        }

        // Every card is mapped before the first insert, so a missing template
        // leaves the collection untouched.
        debug!(stage = %Stage::Mapping, cards = cards.len());
        let notes = cards
            .iter()
            .map(|card| to_note(&*self.store, card))
            .collect::<Result<Vec<_>, _>>()
            .map_err(abort(Stage::Mapping))?;

        debug!(stage = %Stage::Inserting, deck = %self.options.deck);
        let deck_id = self
            .store
            .ensure_deck(&self.options.deck)
            .map_err(abort(Stage::Inserting))?;
        for note in &notes {
            self.store
                .add_note(note, deck_id)
                .map_err(abort(Stage::Inserting))?;
        }

        if !self.options.force {
            debug!(stage = %Stage::ConfirmingWithUser);
            let confirmed = self
                .confirm
                .confirm(&notes)
                .map_err(|e| Aborted::new(Stage::ConfirmingWithUser, ImportError::Prompt(e)))?;
            if !confirmed {
                return Err(Aborted::new(
                    Stage::ConfirmingWithUser,
                    ImportError::UserDeclined,
                ));
            }
        }

        debug!(stage = %Stage::Persisting);
        let uids: Vec<String> = cards.into_iter().map(|card| card.uid).collect();
        self.ledger
            .append(&uids)
            .map_err(abort(Stage::Persisting))?;
        self.store.save().map_err(abort(Stage::Persisting))?;

        info!(count = uids.len(), stage = %Stage::Done, "imported cards");
        Ok(ImportOutcome::Imported { uids })
    }
}
