//! Common test utilities for integration tests.
//!
//! Every test runs the `wunderbar` binary against its own temporary data
//! directory, Anki base and ledger.

pub mod fixtures;

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wunderbar::config::collection_path;
use wunderbar::db::{SqliteCollection, StoredNote};

pub const DECK: &str = "Wunderbar";

pub struct TestContext {
    dir: TempDir,
    pub base: PathBuf,
    pub ledger: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let base = dir.path().join("Anki2");
        fs::create_dir_all(base.join("User 1")).expect("create profile dir");
        let ledger = dir.path().join("data").join("wunderbar").join("uids.log");
        Self { dir, base, ledger }
    }

    pub fn collection(&self) -> PathBuf {
        collection_path(&self.base)
    }

    /// Write `content` to `name` and return its path.
    pub fn write_doc(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("write document");
        path
    }

    /// The binary with a clean environment and no arguments.
    pub fn bare_cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("wunderbar").expect("binary built");
        cmd.current_dir(self.dir.path())
            .env_remove("RUST_LOG")
            .env_remove("WUNDERBAR_BASE")
            .env_remove("WUNDERBAR_DECK")
            .env_remove("WUNDERBAR_LEDGER")
            .env("XDG_DATA_HOME", self.dir.path().join("data"));
        cmd
    }

    /// `wunderbar -F <doc> -b <base> --ledger <ledger>`
    pub fn cmd(&self, doc: &Path) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.arg("-F")
            .arg(doc)
            .arg("-b")
            .arg(&self.base)
            .arg("--ledger")
            .arg(&self.ledger);
        cmd
    }

    pub fn ledger_text(&self) -> String {
        fs::read_to_string(&self.ledger).unwrap_or_default()
    }

    pub fn notes(&self) -> Vec<StoredNote> {
        SqliteCollection::open(self.collection())
            .expect("open collection")
            .notes_in_deck(DECK)
            .expect("read notes")
    }
}
