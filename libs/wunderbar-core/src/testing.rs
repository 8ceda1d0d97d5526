//! In-memory collection used by the unit tests.

use crate::error::StoreError;
use crate::store::{Note, NoteStore, Notetype};

#[derive(Debug, Default)]
pub struct MemoryStore {
    notetypes: Vec<Notetype>,
    decks: Vec<String>,
    pending: Vec<(String, Note)>,
    saved: Vec<(String, Note)>,
    saves: usize,
    fail_save: bool,
}

impl MemoryStore {
    pub fn with_stock_notetypes() -> Self {
        let mut store = Self::default();
        store.add_notetype("Basic", &["Front", "Back"]);
        store.add_notetype("Basic (and reversed card)", &["Front", "Back"]);
        store.add_notetype(
            "Basic (optional reversed card)",
            &["Front", "Back", "Add Reverse"],
        );
        store.add_notetype("Basic (type in the answer)", &["Front", "Back"]);
        store.add_notetype("Cloze", &["Text", "Back Extra"]);
        store
    }

    /// Add a notetype, replacing any with the same name.
    pub fn add_notetype(&mut self, name: &str, fields: &[&str]) {
        self.remove_notetype(name);
        let id = self.notetypes.iter().map(|n| n.id).max().unwrap_or(0) + 1;
        self.notetypes.push(Notetype {
            id,
            name: name.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        });
    }

    pub fn remove_notetype(&mut self, name: &str) {
        self.notetypes.retain(|n| n.name != name);
    }

    /// Saved notes with the name of their deck.
    pub fn saved_notes(&self) -> &[(String, Note)] {
        &self.saved
    }

    pub fn pending_notes(&self) -> usize {
        self.pending.len()
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// Make every later `save` fail.
    pub fn fail_saves(&mut self) {
        self.fail_save = true;
    }
}

impl NoteStore for MemoryStore {
    fn find_notetype(&self, name: &str) -> Result<Option<Notetype>, StoreError> {
        Ok(self.notetypes.iter().find(|n| n.name == name).cloned())
    }

    fn ensure_deck(&mut self, name: &str) -> Result<i64, StoreError> {
        // A new run starts a new transaction; notes an aborted run left
        // unsaved are gone.
        self.pending.clear();
        let idx = match self.decks.iter().position(|d| d == name) {
            Some(idx) => idx,
            None => {
                self.decks.push(name.to_string());
                self.decks.len() - 1
            }
        };
        Ok(idx as i64 + 1)
    }

    fn add_note(&mut self, note: &Note, deck_id: i64) -> Result<i64, StoreError> {
        let deck = self
            .decks
            .get((deck_id - 1) as usize)
            .cloned()
            .ok_or_else(|| StoreError::Backend(format!("no deck with id {deck_id}")))?;
        self.pending.push((deck, note.clone()));
        Ok((self.saved.len() + self.pending.len()) as i64)
    }

    fn save(&mut self) -> Result<(), StoreError> {
        if self.fail_save {
            return Err(StoreError::Backend("disk full".to_string()));
        }
        self.saved.append(&mut self.pending);
        self.saves += 1;
        Ok(())
    }
}
