//! Interactive confirmation before changes are written.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use wunderbar_core::{Confirm, Note};

/// Shows the pending notes and asks `[y/n]` on a terminal.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
    collection: PathBuf,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(collection: PathBuf) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), collection)
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W, collection: PathBuf) -> Self {
        Self {
            input,
            output,
            collection,
        }
    }

    fn display(&mut self, notes: &[Note]) -> io::Result<()> {
        writeln!(self.output, "----- New cards -----")?;
        for note in notes {
            writeln!(self.output, "Type : {}", note.notetype_name)?;
            writeln!(self.output, "Front: {}", field(note, 0))?;
            writeln!(self.output, "Back : {}", field(note, 1))?;
            writeln!(self.output, "Tags : {}", note.tags.join(", "))?;
            writeln!(self.output)?;
        }
        writeln!(self.output, "Collection: {}", self.collection.display())?;
        writeln!(self.output)
    }
}

fn field(note: &Note, idx: usize) -> &str {
    note.fields.get(idx).map(String::as_str).unwrap_or_default()
}

impl<R: BufRead, W: Write> Confirm for TerminalPrompt<R, W> {
    fn confirm(&mut self, notes: &[Note]) -> io::Result<bool> {
        self.display(notes)?;
        write!(self.output, "Are you sure you want to write changes? [y/n] ")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(false);
        }
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}
