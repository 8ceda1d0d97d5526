//! Core types for the import pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card template a record is imported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardModel {
    Basic,
    Reversed,
    ReversedOptional,
    TypeAnswer,
    Cloze,
}

impl CardModel {
    pub const ALL: [CardModel; 5] = [
        Self::Basic,
        Self::Reversed,
        Self::ReversedOptional,
        Self::TypeAnswer,
        Self::Cloze,
    ];

    /// Resolve a top-level block key.
    ///
    /// `type` is the key authors write; `type_answer` is accepted as well.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "basic" => Some(Self::Basic),
            "reversed" => Some(Self::Reversed),
            "reversed_optional" => Some(Self::ReversedOptional),
            "type" | "type_answer" => Some(Self::TypeAnswer),
            "cloze" => Some(Self::Cloze),
            _ => None,
        }
    }

    /// Canonical block key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Reversed => "reversed",
            Self::ReversedOptional => "reversed_optional",
            Self::TypeAnswer => "type",
            Self::Cloze => "cloze",
        }
    }

    /// Name of the note template in the collection.
    pub fn template_name(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Reversed => "Basic (and reversed card)",
            Self::ReversedOptional => "Basic (optional reversed card)",
            Self::TypeAnswer => "Basic (type in the answer)",
            Self::Cloze => "Cloze",
        }
    }

    /// Number of template fields the mapper writes to.
    pub fn required_fields(self) -> usize {
        match self {
            Self::ReversedOptional => 3,
            _ => 2,
        }
    }
}

impl fmt::Display for CardModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Card parsed and validated from a toml block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub model: CardModel,
    pub uid: String,
    pub front: String,
    pub back: String,
    pub tags: Vec<String>,
}

/// Result of a run that did not abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The document holds no card block, or the block holds no cards.
    NoCards,
    /// Every card in the document was imported by an earlier run.
    NoUniqueCards,
    /// Notes were saved and their uids recorded, in source order.
    Imported { uids: Vec<String> },
}

impl ImportOutcome {
    pub fn imported(&self) -> usize {
        match self {
            Self::Imported { uids } => uids.len(),
            _ => 0,
        }
    }
}
