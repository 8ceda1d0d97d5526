//! Narrow interface to the note collection cards are imported into.

use crate::error::StoreError;

/// Note template known to the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notetype {
    pub id: i64,
    pub name: String,
    /// Field names in template order.
    pub fields: Vec<String>,
}

/// Note ready to be added to the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub notetype_id: i64,
    pub notetype_name: String,
    pub fields: Vec<String>,
    pub tags: Vec<String>,
}

impl Note {
    /// Create an empty note for `notetype`, one blank value per field.
    pub fn new(notetype: &Notetype) -> Self {
        Self {
            notetype_id: notetype.id,
            notetype_name: notetype.name.clone(),
            fields: vec![String::new(); notetype.fields.len()],
            tags: Vec::new(),
        }
    }
}

/// Collection operations the import pipeline needs.
///
/// Changes made through `ensure_deck` and `add_note` only become durable on
/// `save`; dropping the store without saving discards them.
pub trait NoteStore {
    fn find_notetype(&self, name: &str) -> Result<Option<Notetype>, StoreError>;

    /// Return the id of deck `name`, creating the deck when missing.
    fn ensure_deck(&mut self, name: &str) -> Result<i64, StoreError>;

    fn add_note(&mut self, note: &Note, deck_id: i64) -> Result<i64, StoreError>;

    fn save(&mut self) -> Result<(), StoreError>;
}
