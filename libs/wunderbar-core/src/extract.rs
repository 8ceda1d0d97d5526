//! Extract toml source blocks from org-mode documents.
//!
//! # Format
//! ```org
//! * Rust
//! #+begin_src toml
//! [basic.ownership]
//! front = "Who frees a value?"
//! back = "Its owner, when it goes out of scope."
//! #+end_src
//! ```

use crate::error::ImportError;
use std::fs;
use std::path::Path;

pub const BEGIN_MARKER: &str = "#+begin_src toml";
pub const END_MARKER: &str = "#+end_src";

/// Concatenate the contents of every toml block in `content`.
///
/// Markers only match when they are the whole (trimmed) line. Returns an
/// empty string when the document has no block.
pub fn extract(content: &str) -> String {
    let mut block = String::new();
    let mut inside = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if inside {
            if trimmed == END_MARKER {
                inside = false;
                continue;
            }
            block.push_str(line.trim_end());
            block.push('\n');
        } else if trimmed == BEGIN_MARKER {
            inside = true;
        }
    }

    block
}

/// Read `path` and extract its toml blocks.
pub fn extract_file(path: &Path) -> Result<String, ImportError> {
    let content = fs::read_to_string(path).map_err(|source| ImportError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(extract(&content))
}
