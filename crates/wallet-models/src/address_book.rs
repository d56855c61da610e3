//! Address book: unique labels mapped to addresses.
//!
//! On the wire the book is a flat JSON object (`{"alice": "ab12..", ...}`).
//! Entries keep insertion order so the list renders the way it was built;
//! lookups are by label.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ModelError, Result};

/// A single label/address pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressBookEntry {
    /// Unique, non-empty, trimmed label.
    pub label: String,
    /// Non-empty, trimmed address.
    pub address: String,
}

/// Insertion-ordered mapping from label to address.
///
/// # Invariants
///
/// - Labels are unique.
/// - Entries added through [`AddressBook::add`] have non-empty trimmed
///   fields. A book loaded from the node is taken as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    entries: Vec<AddressBookEntry>,
}

impl AddressBook {
    /// Creates an empty address book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new entry after trimming both fields.
    ///
    /// Fails without touching the book if either field is empty or the
    /// label is already taken.
    pub fn add(&mut self, label: &str, address: &str) -> Result<()> {
        let label = label.trim();
        let address = address.trim();

        if address.is_empty() {
            return Err(ModelError::Validation("please enter an address".to_string()));
        }
        if label.is_empty() {
            return Err(ModelError::Validation("please enter a label".to_string()));
        }
        if self.contains(label) {
            return Err(ModelError::DuplicateLabel(label.to_string()));
        }

        self.entries.push(AddressBookEntry {
            label: label.to_string(),
            address: address.to_string(),
        });
        Ok(())
    }

    /// Removes an entry, returning its address. Absent labels are a no-op.
    pub fn remove(&mut self, label: &str) -> Option<String> {
        let index = self.position(label)?;
        Some(self.entries.remove(index).address)
    }

    /// Looks up the address for a label.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.address.as_str())
    }

    /// Returns true if the label exists.
    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &AddressBookEntry> {
        self.entries.iter()
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the book has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.label == label)
    }

    // A repeated key overwrites the earlier address but keeps its slot.
    fn upsert(&mut self, label: String, address: String) {
        match self.position(&label) {
            Some(index) => self.entries[index].address = address,
            None => self.entries.push(AddressBookEntry { label, address }),
        }
    }
}

impl<L, A> FromIterator<(L, A)> for AddressBook
where
    L: Into<String>,
    A: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (L, A)>>(iter: I) -> Self {
        let mut book = AddressBook::new();
        for (label, address) in iter {
            book.upsert(label.into(), address.into());
        }
        book
    }
}

impl Serialize for AddressBook {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.label, &entry.address)?;
        }
        map.end()
    }
}

struct AddressBookVisitor;

impl<'de> Visitor<'de> for AddressBookVisitor {
    type Value = AddressBook;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of label to address")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> std::result::Result<AddressBook, M::Error> {
        let mut book = AddressBook::new();
        while let Some((label, address)) = access.next_entry::<String, String>()? {
            book.upsert(label, address);
        }
        Ok(book)
    }
}

impl<'de> Deserialize<'de> for AddressBook {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(AddressBookVisitor)
    }
}
