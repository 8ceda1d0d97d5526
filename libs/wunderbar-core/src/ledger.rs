//! Append-only ledger of imported card uids.
//!
//! One uid per line. Reading collapses duplicates; writing never rewrites or
//! reorders earlier entries.

use crate::error::LedgerError;
use crate::types::CardRecord;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Uids recorded by earlier runs.
pub type KnownUids = HashSet<String>;

/// Handle to the ledger file.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    /// Open the ledger at `path`, creating it and its parent directories if
    /// needed so that a first run sees an empty ledger.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| LedgerError::Unwritable {
                path: path.clone(),
                source,
            })?;
        }
        let ledger = Self { path };
        ledger.writer()?;
        Ok(ledger)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every known uid.
    pub fn load(&self) -> Result<KnownUids, LedgerError> {
        let content = fs::read_to_string(&self.path).map_err(|source| {
            LedgerError::Unreadable {
                path: self.path.clone(),
                source,
            }
        })?;

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Append `uids`, one per line, in the given order.
    ///
    /// A last entry without a line terminator is closed first so it cannot
    /// merge with the first appended uid.
    pub fn append<I, S>(&self, uids: I) -> Result<(), LedgerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut uids = uids.into_iter().peekable();
        if uids.peek().is_none() {
            return Ok(());
        }

        let open_line = self.ends_mid_line().map_err(|e| self.unwritable(e))?;
        let mut writer = self.writer()?;
        if open_line {
            writer.end_line().map_err(|e| self.unwritable(e))?;
        }
        for uid in uids {
            writer.write_uid(uid.as_ref()).map_err(|e| self.unwritable(e))?;
        }
        writer.finish().map_err(|e| self.unwritable(e))
    }

    /// Whether the file is non-empty and its last byte is not `\n`.
    fn ends_mid_line(&self) -> io::Result<bool> {
        let mut file = File::open(&self.path)?;
        if file.metadata()?.len() == 0 {
            return Ok(false);
        }
        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        Ok(last[0] != b'\n')
    }

    /// The only way to obtain a writable handle: append mode, never truncating.
    fn writer(&self) -> Result<LedgerWriter, LedgerError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.unwritable(e))?;
        Ok(LedgerWriter {
            inner: BufWriter::new(file),
        })
    }

    fn unwritable(&self, source: io::Error) -> LedgerError {
        LedgerError::Unwritable {
            path: self.path.clone(),
            source,
        }
    }
}

/// Writer over a ledger file opened in append mode.
struct LedgerWriter {
    inner: BufWriter<File>,
}

impl LedgerWriter {
    fn end_line(&mut self) -> io::Result<()> {
        writeln!(self.inner)
    }

    fn write_uid(&mut self, uid: &str) -> io::Result<()> {
        writeln!(self.inner, "{}", uid)
    }

    fn finish(self) -> io::Result<()> {
        let file = self.inner.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    }
}

/// Drop records whose uid is already known, keeping source order.
pub fn filter_known(records: Vec<CardRecord>, known: &KnownUids) -> Vec<CardRecord> {
    records
        .into_iter()
        .filter(|card| {
            if known.contains(&card.uid) {
                tracing::info!(uid = %card.uid, "discarding previously imported card");
                false
            } else {
                true
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CardModel;
    use pretty_assertions::assert_eq;

    fn record(uid: &str) -> CardRecord {
        CardRecord {
            model: CardModel::Basic,
            uid: uid.to_string(),
            front: format!("front {uid}"),
            back: format!("back {uid}"),
            tags: vec![],
        }
    }

    #[test]
    fn open_creates_missing_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wunderbar").join("uids.log");
        let ledger = Ledger::open(&path).unwrap();
        assert!(path.is_file());
        assert!(ledger.load().unwrap().is_empty());
    }

    #[test]
    fn load_trims_and_collapses_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uids.log");
        fs::write(&path, "a\n  b  \n\na\n").unwrap();
        let known = Ledger::open(&path).unwrap().load().unwrap();
        assert_eq!(known, KnownUids::from(["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn append_keeps_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uids.log");
        fs::write(&path, "old\n").unwrap();

        let ledger = Ledger::open(&path).unwrap();
        ledger.append(["b", "a", "old"]).unwrap();
        ledger.append(Vec::<String>::new()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "old\nb\na\nold\n");
    }

    #[test]
    fn append_closes_unterminated_last_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uids.log");
        fs::write(&path, "a\nold").unwrap();

        let ledger = Ledger::open(&path).unwrap();
        ledger.append(["card1"]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nold\ncard1\n");
        assert_eq!(
            ledger.load().unwrap(),
            KnownUids::from(["a".to_string(), "old".to_string(), "card1".to_string()])
        );
    }

    #[test]
    fn empty_append_leaves_unterminated_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uids.log");
        fs::write(&path, "old").unwrap();

        Ledger::open(&path).unwrap().append(Vec::<String>::new()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
    }

    #[test]
    fn load_fails_when_ledger_vanishes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uids.log");
        let ledger = Ledger::open(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(matches!(ledger.load(), Err(LedgerError::Unreadable { .. })));
    }

    #[test]
    fn open_fails_on_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = Ledger::open(dir.path());
        assert!(matches!(result, Err(LedgerError::Unwritable { .. })));
    }

    #[test]
    fn filter_with_empty_ledger_keeps_everything() {
        let records = vec![record("c"), record("a"), record("b")];
        assert_eq!(filter_known(records.clone(), &KnownUids::new()), records);
    }

    #[test]
    fn filter_with_every_uid_known_drops_everything() {
        let records = vec![record("a"), record("b")];
        let known: KnownUids = records.iter().map(|r| r.uid.clone()).collect();
        assert!(filter_known(records, &known).is_empty());
    }

    #[test]
    fn filter_drops_only_known_uids() {
        let records = vec![record("a"), record("b"), record("c")];
        let known = KnownUids::from(["b".to_string()]);
        let uids: Vec<_> = filter_known(records, &known)
            .into_iter()
            .map(|r| r.uid)
            .collect();
        assert_eq!(uids, ["a", "c"]);
    }
}
