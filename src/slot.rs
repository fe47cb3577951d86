//! Entries and the three-state slot they live in.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    key: String,
    value: String,
}

impl Entry {
    pub(crate) fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn into_value(self) -> String {
        self.value
    }
}

/// One position of an open-addressing slot array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Slot {
    #[default]
    Empty,
    /// Left behind by soft deletion. Lookups walk past it; it never signals
    /// absence on its own.
    Tombstone,
    Occupied(Entry),
}

impl Slot {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    #[inline]
    pub fn entry(&self) -> Option<&Entry> {
        match self {
            Slot::Occupied(e) => Some(e),
            _ => None,
        }
    }

    /// Whether this slot holds an entry keyed `key`.
    #[inline]
    pub(crate) fn holds(&self, key: &str) -> bool {
        self.entry().is_some_and(|e| e.key == key)
    }
}

/// A fresh slot array of `capacity` empty slots.
pub(crate) fn empty_slots(capacity: usize) -> Box<[Slot]> {
    std::iter::repeat_with(Slot::default)
        .take(capacity)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_states() {
        let occ = Slot::Occupied(Entry::new("k", "v"));
        assert!(Slot::Empty.is_empty());
        assert!(Slot::Tombstone.is_tombstone());
        assert!(!occ.is_empty() && !occ.is_tombstone());
        assert_eq!(occ.entry().map(Entry::value), Some("v"));
        assert!(occ.holds("k"));
        assert!(!occ.holds("x"));
        assert!(!Slot::Tombstone.holds("k"));
    }

    #[test]
    fn empty_slots_has_requested_length() {
        let slots = empty_slots(11);
        assert_eq!(slots.len(), 11);
        assert!(slots.iter().all(Slot::is_empty));
    }
}
