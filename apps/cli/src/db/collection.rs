//! SQLite collection that notes are imported into.

use crate::db::error::DbError;
use crate::db::schema::{FIELD_SEPARATOR, SCHEMA, SCHEMA_VERSION, STOCK_NOTETYPES};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;
use wunderbar_core::{Note, NoteStore, Notetype, StoreError};

type Result<T> = std::result::Result<T, DbError>;

/// Note as stored in the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredNote {
    pub id: i64,
    pub guid: String,
    pub notetype: String,
    pub deck: String,
    pub fields: Vec<String>,
    pub tags: Vec<String>,
}

/// Collection opened with an exclusive lock for the lifetime of the value.
///
/// Every change runs inside one transaction that is committed by
/// [`NoteStore::save`]; dropping the collection rolls back anything unsaved.
pub struct SqliteCollection {
    conn: Connection,
    path: PathBuf,
    dirty: bool,
}

impl SqliteCollection {
    /// Open the collection at path, creating it if necessary.
    ///
    /// Fails with [`DbError::Busy`] when another process holds the collection.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path)?;
        Self::lock(conn, path)
    }

    /// Open in-memory collection (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::lock(conn, PathBuf::from(":memory:"))
    }

    fn lock(conn: Connection, path: PathBuf) -> Result<Self> {
        conn.busy_timeout(Duration::ZERO)?;
        conn.pragma_update_and_check(None, "locking_mode", "EXCLUSIVE", |row| {
            row.get::<_, String>(0)
        })?;
        conn.execute_batch("BEGIN EXCLUSIVE").map_err(|e| {
            if DbError::is_busy(&e) {
                DbError::Busy(path.clone())
            } else {
                e.into()
            }
        })?;
        debug!(collection = %path.display(), "acquired exclusive lock");

        let collection = Self {
            conn,
            path,
            dirty: false,
        };
        collection.initialize()?;
        Ok(collection)
    }

    fn initialize(&self) -> Result<()> {
        // Anki desktop keeps its own schema with a `col` table; never touch it.
        let desktop: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'col'",
            [],
            |row| row.get(0),
        )?;
        if desktop > 0 {
            return Err(DbError::Foreign(self.path.clone()));
        }

        self.conn.execute_batch(SCHEMA)?;

        let notetypes: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notetypes", [], |row| row.get(0))?;
        if notetypes == 0 {
            for (name, fields) in STOCK_NOTETYPES {
                self.conn.execute(
                    "INSERT INTO notetypes (name, fields) VALUES (?1, ?2)",
                    params![name, serde_json::to_string(fields)?],
                )?;
            }
            info!(collection = %self.path.display(), "created stock note types");
        }

        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;
        Ok(())
    }

    /// Notes of deck `name`, oldest first.
    pub fn notes_in_deck(&self, name: &str) -> Result<Vec<StoredNote>> {
        let mut stmt = self.conn.prepare(
            "SELECT n.id, n.guid, t.name, d.name, n.flds, n.tags
             FROM notes n
             JOIN notetypes t ON n.mid = t.id
             JOIN decks d ON n.did = d.id
             WHERE d.name = ?1
             ORDER BY n.id",
        )?;

        let rows = stmt
            .query_map(params![name], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, guid, notetype, deck, flds, tags)| -> Result<StoredNote> {
                Ok(StoredNote {
                    id,
                    guid,
                    notetype,
                    deck,
                    fields: flds.split(FIELD_SEPARATOR).map(str::to_string).collect(),
                    tags: serde_json::from_str(&tags)?,
                })
            })
            .collect()
    }

    /// Total number of notes, including unsaved ones.
    pub fn note_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn notetype_by_name(&self, name: &str) -> Result<Option<Notetype>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, fields FROM notetypes WHERE name = ?1",
                params![name],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(id, name, fields)| -> Result<Notetype> {
            Ok(Notetype {
                id,
                name,
                fields: serde_json::from_str(&fields)?,
            })
        })
        .transpose()
    }

    fn deck_id(&self, name: &str) -> Result<Option<i64>> {
        self.conn
            .query_row(
                "SELECT id FROM decks WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    fn insert_note(&mut self, note: &Note, deck_id: i64) -> Result<i64> {
        let sort_field = note.fields.first().map(String::as_str).unwrap_or_default();
        let flds = note.fields.join(&FIELD_SEPARATOR.to_string());
        self.conn.execute(
            "INSERT INTO notes (guid, mid, did, mod, tags, flds, sfld, csum)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                Uuid::new_v4().to_string(),
                note.notetype_id,
                deck_id,
                Utc::now().to_rfc3339(),
                serde_json::to_string(&note.tags)?,
                flds,
                sort_field,
                field_checksum(sort_field),
            ],
        )?;
        self.dirty = true;
        Ok(self.conn.last_insert_rowid())
    }

    fn commit(&mut self) -> Result<()> {
        self.conn.execute_batch("COMMIT; BEGIN EXCLUSIVE")?;
        self.dirty = false;
        Ok(())
    }
}

/// First 32 bits of the SHA-256 of the sort field.
pub fn field_checksum(field: &str) -> i64 {
    let digest = Sha256::digest(field.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]) as i64
}

impl NoteStore for SqliteCollection {
    fn find_notetype(&self, name: &str) -> std::result::Result<Option<Notetype>, StoreError> {
        Ok(self.notetype_by_name(name)?)
    }

    fn ensure_deck(&mut self, name: &str) -> std::result::Result<i64, StoreError> {
        if let Some(id) = self.deck_id(name)? {
            return Ok(id);
        }

        info!(deck = name, "unable to get deck, creating a new one");
        self.conn
            .execute("INSERT INTO decks (name) VALUES (?1)", params![name])
            .map_err(DbError::from)?;
        self.dirty = true;
        Ok(self.conn.last_insert_rowid())
    }

    fn add_note(&mut self, note: &Note, deck_id: i64) -> std::result::Result<i64, StoreError> {
        Ok(self.insert_note(note, deck_id)?)
    }

    fn save(&mut self) -> std::result::Result<(), StoreError> {
        debug!(collection = %self.path.display(), "saving collection");
        Ok(self.commit()?)
    }
}

impl Drop for SqliteCollection {
    fn drop(&mut self) {
        if self.dirty {
            warn!(collection = %self.path.display(), "discarding unsaved changes");
        }
        if let Err(e) = self.conn.execute_batch("ROLLBACK") {
            debug!(error = %e, "rollback on close failed");
        }
    }
}
