//! The contract every table in this crate implements.

use crate::error::TableError;
use crate::probes::Probes;

/// String-keyed map whose operations report how many probes they took.
///
/// An empty string plays the part of a missing argument: `put` rejects it,
/// while `get` and `remove` answer an empty key with an absent result and
/// zero probes without touching the table.
pub trait HashTable {
    /// Insert `key -> value`. Keys are not deduplicated: putting an existing
    /// key again stores a second entry.
    fn put(&mut self, key: &str, value: &str) -> Result<Probes, TableError>;

    fn get(&self, key: &str) -> Probes;

    /// Remove one entry for `key`, returning its value.
    fn remove(&mut self, key: &str) -> Probes;

    fn contains_key(&self, key: &str) -> bool;

    fn contains_value(&self, value: &str) -> bool;

    /// Number of live entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the slot (or bucket) array; always prime.
    fn capacity(&self) -> usize;
}
