//! Clipboard collaborator
//!
//! The copy payload goes through a [`Clipboard`] so the caller can report
//! success without knowing where the text went. There is no system
//! clipboard integration; the binary writes to a file or to stdout.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, warn};

pub trait Clipboard {
    /// Returns false when the text could not be placed
    fn copy(&mut self, text: &str) -> bool;
}

/// Writes the payload to a file, replacing its contents
#[derive(Debug, Clone)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Clipboard for FileClipboard {
    fn copy(&mut self, text: &str) -> bool {
        match fs::write(&self.path, text) {
            Ok(()) => {
                debug!(path = %self.path.display(), bytes = text.len(), "copied payload");
                true
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "copy failed");
                false
            }
        }
    }
}

/// Prints the payload on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn copy(&mut self, text: &str) -> bool {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", text).and_then(|_| out.flush()).is_ok()
    }
}

/// Keeps the last payload in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> bool {
        self.contents = Some(text.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_clipboard() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.json");
        let mut clipboard = FileClipboard::new(&path);
        assert!(clipboard.copy("{\"a\": 1}"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_file_clipboard_reports_failure() {
        let dir = TempDir::new().unwrap();
        let mut clipboard = FileClipboard::new(dir.path().join("missing").join("x.json"));
        assert!(!clipboard.copy("text"));
    }

    #[test]
    fn test_memory_clipboard() {
        let mut clipboard = MemoryClipboard::default();
        assert!(clipboard.copy("payload"));
        assert_eq!(clipboard.contents.as_deref(), Some("payload"));
    }
}
