//! File-backed address book.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use wallet_models::AddressBook;

use crate::atomic::{read_json_optional, write_json};
use crate::error::Result;

/// Stores the address book as a single JSON object on disk.
#[derive(Debug, Clone)]
pub struct AddressBookStore {
    path: PathBuf,
}

impl AddressBookStore {
    /// Creates a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the book, `None` if the file does not exist yet.
    pub fn load(&self) -> Result<Option<AddressBook>> {
        read_json_optional(&self.path)
    }

    /// Loads the book, falling back to an empty one on any failure.
    pub fn load_or_default(&self) -> AddressBook {
        match self.load() {
            Ok(Some(book)) => {
                debug!(path = %self.path.display(), entries = book.len(), "address book loaded");
                book
            }
            Ok(None) => {
                warn!(path = %self.path.display(), "address book file not found");
                AddressBook::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unable to read address book");
                AddressBook::new()
            }
        }
    }

    /// Replaces the stored book.
    ///
    /// Entries are written in book order as a flat JSON object.
    ///
    /// # Arguments
    /// * `book` - The address book to persist
    ///
    /// # Errors
    /// Returns an error if serialization or the atomic write fails; the
    /// previous file is left untouched in that case.
    pub fn save(&self, book: &AddressBook) -> Result<()> {
        write_json(&self.path, book)?;
        debug!(path = %self.path.display(), entries = book.len(), "address book saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = AddressBookStore::new(dir.path().join("book.json"));

        let mut book = AddressBook::new();
        book.add("alice", "addr1").unwrap();
        book.add("bob", "addr2").unwrap();
        store.save(&book).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, book);
        assert_eq!(loaded.labels(), vec!["alice", "bob"]);
    }

    #[test]
    fn test_load_missing_file_defaults_to_empty() {
        let dir = tempdir().unwrap();
        let store = AddressBookStore::new(dir.path().join("missing.json"));

        assert!(store.load().unwrap().is_none());
        assert!(store.load_or_default().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_defaults_to_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book.json");
        std::fs::write(&path, "[\"not\", \"a\", \"map\"]").unwrap();

        let store = AddressBookStore::new(&path);
        assert!(store.load().is_err());
        assert!(store.load_or_default().is_empty());
    }
}
