//! OrderedList: singly-linked list of entries in append order.
//!
//! Nodes live in a `SlotMap` arena and link to each other through
//! generational keys, so unlinking never leaves a dangling reference. Every
//! lookup reports one probe per node inspected, with inspecting an empty
//! list costing one probe.

use crate::probes::Probes;
use crate::slot::Entry;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug, Clone)]
struct Node {
    entry: Entry,
    next: Option<DefaultKey>,
}

#[derive(Debug, Clone, Default)]
pub struct OrderedList {
    nodes: SlotMap<DefaultKey, Node>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

/// Iterator over the entries of an `OrderedList`, head to tail.
pub struct Iter<'a> {
    nodes: &'a SlotMap<DefaultKey, Node>,
    cursor: Option<DefaultKey>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.entry)
    }
}

impl OrderedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }

    pub fn push_back(&mut self, entry: Entry) {
        let k = self.nodes.insert(Node { entry, next: None });
        match self.tail.and_then(|t| self.nodes.get_mut(t)) {
            Some(last) => last.next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
    }

    /// Value of the first entry keyed `key`.
    pub fn get(&self, key: &str) -> Probes {
        let mut probes = 0;
        for entry in self.iter() {
            probes += 1;
            if entry.key() == key {
                return Probes::found(entry.value(), probes);
            }
        }
        Probes::absent(probes.max(1))
    }

    /// Unlink the first entry keyed `key` and return its value.
    pub fn remove(&mut self, key: &str) -> Probes {
        let mut probes = 0;
        let mut prev: Option<DefaultKey> = None;
        let mut cursor = self.head;
        while let Some(k) = cursor {
            let Some(node) = self.nodes.get(k) else {
                break;
            };
            probes += 1;
            if node.entry.key() != key {
                prev = Some(k);
                cursor = node.next;
                continue;
            }
            let next = node.next;
            match prev.and_then(|p| self.nodes.get_mut(p)) {
                Some(before) => before.next = next,
                None => self.head = next,
            }
            if self.tail == Some(k) {
                self.tail = prev;
            }
            return match self.nodes.remove(k) {
                Some(node) => Probes::found(node.entry.into_value(), probes),
                None => Probes::absent(probes),
            };
        }
        Probes::absent(probes.max(1))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.iter().any(|e| e.key() == key)
    }

    pub fn contains_value(&self, value: &str) -> bool {
        self.iter().any(|e| e.value() == value)
    }

    /// Consume the list, yielding its entries head to tail.
    pub fn into_entries(mut self) -> Vec<Entry> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut cursor = self.head;
        while let Some(node) = cursor.and_then(|k| self.nodes.remove(k)) {
            cursor = node.next;
            out.push(node.entry);
        }
        out
    }
}
