//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Separator between note field values in `notes.flds`.
pub const FIELD_SEPARATOR: char = '\u{1f}';

/// Complete schema for the collection database.
pub const SCHEMA: &str = r#"
-- Note templates
CREATE TABLE IF NOT EXISTS notetypes (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    fields TEXT NOT NULL
);

-- Decks
CREATE TABLE IF NOT EXISTS decks (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

-- Notes
CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY,
    guid TEXT NOT NULL UNIQUE,
    mid INTEGER NOT NULL REFERENCES notetypes(id),
    did INTEGER NOT NULL REFERENCES decks(id),
    mod TEXT NOT NULL,
    tags TEXT NOT NULL,
    flds TEXT NOT NULL,
    sfld TEXT NOT NULL,
    csum INTEGER NOT NULL
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_notes_csum ON notes(csum);
CREATE INDEX IF NOT EXISTS idx_notes_did ON notes(did);
"#;

/// Stock templates seeded into a fresh collection: name and field names.
pub const STOCK_NOTETYPES: &[(&str, &[&str])] = &[
    ("Basic", &["Front", "Back"]),
    ("Basic (and reversed card)", &["Front", "Back"]),
    (
        "Basic (optional reversed card)",
        &["Front", "Back", "Add Reverse"],
    ),
    ("Basic (type in the answer)", &["Front", "Back"]),
    ("Cloze", &["Text", "Back Extra"]),
];
