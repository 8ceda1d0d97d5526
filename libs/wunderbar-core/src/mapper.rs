//! Map card records onto collection notes.

use crate::error::StoreError;
use crate::store::{Note, NoteStore};
use crate::types::{CardModel, CardRecord};

/// Value of the "Add Reverse" field that enables the optional reverse card.
pub const REVERSE_FLAG: &str = "yes";

/// Build the note for `record` using the template its model names.
pub fn to_note<S: NoteStore + ?Sized>(store: &S, record: &CardRecord) -> Result<Note, StoreError> {
    let name = record.model.template_name();
    let notetype = store
        .find_notetype(name)?
        .ok_or_else(|| StoreError::ModelNotFound(name.to_string()))?;

    let required = record.model.required_fields();
    if notetype.fields.len() < required {
        return Err(StoreError::MissingFields {
            notetype: notetype.name,
            required,
            found: notetype.fields.len(),
        });
    }

    let mut note = Note::new(&notetype);
    note.fields[0] = record.front.clone();
    note.fields[1] = record.back.clone();
    if record.model == CardModel::ReversedOptional {
        note.fields[2] = REVERSE_FLAG.to_string();
    }
    note.tags = record.tags.clone();

    Ok(note)
}
