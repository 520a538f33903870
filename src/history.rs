//! Prompt history log
//!
//! Appends each prompt/response pair to a plain text file. The file is
//! never read back.
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Append one prompt/response pair to the history file
pub fn append(path: &Path, prompt: &str, response: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    write!(
        file,
        "\n--- PROMPT ---\n{}\n\n--- RESPONSE ---\n{}\n\n",
        prompt, response
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_writes_delimited_record() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("history.txt");

        append(&path, "What is Rust?", "A language.").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "\n--- PROMPT ---\nWhat is Rust?\n\n--- RESPONSE ---\nA language.\n\n"
        );
    }

    #[test]
    fn test_append_keeps_earlier_records() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("history.txt");

        append(&path, "first", "one").unwrap();
        append(&path, "second", "two").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("--- PROMPT ---").count(), 2);
        assert!(content.find("first").unwrap() < content.find("second").unwrap());
    }
}
