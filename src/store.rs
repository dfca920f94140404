//! Keyed Entry Store
//!
//! Ordered storage for list and leaf-list entries. Entries are identified by
//! their key values only; inserting an entry whose key is already present is
//! a no-op, so the first entry for a key is the one that stays.

use std::hash::{Hash, Hasher};

use indexmap::map::Entry as MapEntry;
use indexmap::IndexMap;

use crate::value::Value;

/// Values of an entry's key fields, in key order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey(Vec<Value>);

impl EntryKey {
    pub fn new(parts: Vec<Value>) -> Self {
        Self(parts)
    }

    pub fn parts(&self) -> &[Value] {
        &self.0
    }
}

impl From<Value> for EntryKey {
    fn from(value: Value) -> Self {
        Self(vec![value])
    }
}

/// Insertion-ordered entries, unique by key
#[derive(Debug, Clone)]
pub struct EntryStore<T> {
    entries: IndexMap<EntryKey, T>,
}

impl<T> Default for EntryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EntryStore<T> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert `entry` unless its key is taken. Returns whether it was inserted.
    pub fn insert_if_absent(&mut self, key: EntryKey, entry: T) -> bool {
        match self.entries.entry(key) {
            MapEntry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
            MapEntry::Occupied(_) => false,
        }
    }

    pub fn get(&self, key: &EntryKey) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &EntryKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> indexmap::map::Values<'_, EntryKey, T> {
        self.entries.values()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, EntryKey, T> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Stores compare in insertion order, key and entry alike.
impl<T: PartialEq> PartialEq for EntryStore<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<T: Eq> Eq for EntryStore<T> {}

impl<T: Hash> Hash for EntryStore<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for (key, entry) in &self.entries {
            key.hash(state);
            entry.hash(state);
        }
    }
}

impl<'a, T> IntoIterator for &'a EntryStore<T> {
    type Item = &'a T;
    type IntoIter = indexmap::map::Values<'a, EntryKey, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
