//! ChainedTable: separate chaining over a prime-length bucket array.
//!
//! Each bucket is an [`OrderedList`]. There is no probing and no tombstone;
//! the table never resizes on its own. `enlarge` and `shrink` move to the
//! next or previous prime and redistribute every entry.

use crate::error::{check_entry, TableError};
use crate::hash::home_slot;
use crate::ordered_list::OrderedList;
use crate::primes::PrimeSource;
use crate::probes::Probes;
use crate::slot::Entry;
use crate::table::HashTable;
use log::debug;

#[derive(Debug, Clone)]
pub struct ChainedTable {
    buckets: Box<[OrderedList]>,
    len: usize,
    primes: PrimeSource,
}

impl ChainedTable {
    pub fn new() -> Self {
        Self::with_primes(PrimeSource::new())
    }

    pub fn with_primes(primes: PrimeSource) -> Self {
        Self {
            buckets: empty_buckets(primes.current()),
            len: 0,
            primes,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn buckets(&self) -> &[OrderedList] {
        &self.buckets
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.buckets
            .iter()
            .flat_map(OrderedList::iter)
            .map(|e| (e.key(), e.value()))
    }

    #[inline]
    fn bucket(&self, key: &str) -> &OrderedList {
        &self.buckets[home_slot(key, self.capacity())]
    }

    /// Append to the key's bucket. Always one probe.
    pub fn put(&mut self, key: &str, value: &str) -> Result<Probes, TableError> {
        check_entry(key, value)?;
        let index = home_slot(key, self.capacity());
        self.buckets[index].push_back(Entry::new(key, value));
        self.len += 1;
        Ok(Probes::found(value, 1))
    }

    pub fn get(&self, key: &str) -> Probes {
        if key.is_empty() {
            return Probes::absent(0);
        }
        self.bucket(key).get(key)
    }

    pub fn remove(&mut self, key: &str) -> Probes {
        if key.is_empty() {
            return Probes::absent(0);
        }
        let index = home_slot(key, self.capacity());
        let removed = self.buckets[index].remove(key);
        if removed.is_found() {
            self.len -= 1;
        }
        removed
    }

    pub fn contains_key(&self, key: &str) -> bool {
        !key.is_empty() && self.bucket(key).contains_key(key)
    }

    pub fn contains_value(&self, value: &str) -> bool {
        self.buckets.iter().any(|b| b.contains_value(value))
    }

    /// Move to the next larger prime and redistribute.
    pub fn enlarge(&mut self) {
        let capacity = self.primes.advance();
        self.redistribute(capacity);
    }

    /// Move to the next smaller prime and redistribute.
    pub fn shrink(&mut self) {
        let capacity = self.primes.retreat();
        self.redistribute(capacity);
    }

    fn redistribute(&mut self, capacity: usize) {
        let from = self.capacity();
        let old = core::mem::replace(&mut self.buckets, empty_buckets(capacity));
        for entry in old
            .into_vec()
            .into_iter()
            .flat_map(OrderedList::into_entries)
        {
            let index = home_slot(entry.key(), capacity);
            self.buckets[index].push_back(entry);
        }
        debug!(
            "chained table resized from {} to {} buckets ({} entries)",
            from, capacity, self.len
        );
    }
}

impl Default for ChainedTable {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_buckets(capacity: usize) -> Box<[OrderedList]> {
    std::iter::repeat_with(OrderedList::new)
        .take(capacity)
        .collect()
}

impl HashTable for ChainedTable {
    fn put(&mut self, key: &str, value: &str) -> Result<Probes, TableError> {
        ChainedTable::put(self, key, value)
    }
    fn get(&self, key: &str) -> Probes {
        ChainedTable::get(self, key)
    }
    fn remove(&mut self, key: &str) -> Probes {
        ChainedTable::remove(self, key)
    }
    fn contains_key(&self, key: &str) -> bool {
        ChainedTable::contains_key(self, key)
    }
    fn contains_value(&self, value: &str) -> bool {
        ChainedTable::contains_value(self, value)
    }
    fn len(&self) -> usize {
        self.len
    }
    fn capacity(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colliding_keys_share_a_bucket() {
        let mut t = ChainedTable::new();
        for (k, v) in [("alice", "1"), ("erin", "2"), ("heidi", "3")] {
            assert_eq!(t.put(k, v).unwrap().probes, 1);
        }
        assert_eq!(t.buckets()[6].len(), 3);
        assert_eq!(t.get("heidi"), Probes::found("3", 3));
        assert_eq!(t.get("a"), Probes::absent(3));
        assert_eq!(t.get("carol"), Probes::absent(1));
    }

    #[test]
    fn remove_updates_len_only_on_hit() {
        let mut t = ChainedTable::new();
        t.put("alice", "1").unwrap();
        assert!(!t.remove("bob").is_found());
        assert_eq!(t.len(), 1);
        assert_eq!(t.remove("alice").value(), Some("1"));
        assert!(t.is_empty());
    }

    #[test]
    fn never_grows_on_its_own() {
        let mut t = ChainedTable::new();
        for i in 0..50 {
            t.put(&format!("k{i}"), "v").unwrap();
        }
        assert_eq!(t.capacity(), 7);
        assert_eq!(t.len(), 50);
    }

    #[test]
    fn enlarge_and_shrink_keep_every_entry() {
        let mut t = ChainedTable::new();
        for i in 0..20 {
            t.put(&format!("k{i}"), &format!("v{i}")).unwrap();
        }
        t.enlarge();
        assert_eq!(t.capacity(), 17);
        for i in 0..20 {
            let got = t.get(&format!("k{i}"));
            assert_eq!(got.value(), Some(format!("v{i}").as_str()));
        }
        t.shrink();
        t.shrink();
        assert_eq!(t.capacity(), 3);
        assert_eq!(t.len(), 20);
        assert_eq!(t.iter().count(), 20);
        assert!(t.contains_key("k19"));
        assert!(t.contains_value("v0"));
    }

    #[test]
    fn empty_arguments() {
        let mut t = ChainedTable::new();
        assert!(t.put("", "v").is_err());
        assert!(t.put("k", "").is_err());
        assert!(t.is_empty());
        assert_eq!(t.get(""), Probes::absent(0));
        assert_eq!(t.remove(""), Probes::absent(0));
        assert!(!t.contains_key(""));
    }
}
