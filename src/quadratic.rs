//! Quadratic probing: the n-th alternative after a collision at the home
//! slot is `(home + n² + n) mod capacity`.
//!
//! Because the sequence is not contiguous there is no cluster to repair
//! after a hard delete; the whole table is rebuilt at its current capacity
//! instead, re-placing every live entry from scratch.

use crate::deletion::{DeletionPolicy, HardDeletion};
use crate::hash::home_slot;
use crate::open_addressing::{sealed, Found, Landing, OpenAddressingTable, Placed, ProbeStrategy};
use crate::slot::{Entry, Slot};

/// Quadratic probing with the deletion policy `D` (hard by default).
pub type QuadraticProbingTable<D = HardDeletion> = OpenAddressingTable<QuadraticProbe, D>;

#[derive(Debug, Clone, Copy, Default)]
pub struct QuadraticProbe;

impl sealed::Sealed for QuadraticProbe {}

/// Slots visited from `home`: the home slot itself, then
/// `home + n(n+1)` for n = 1, 2, ... Ends when the sequence comes back to
/// the home slot, which for a prime capacity `p` happens at n = p - 1.
#[derive(Debug, Clone)]
pub struct QuadraticSequence {
    home: usize,
    capacity: usize,
    index: usize,
    n: usize,
    done: bool,
}

impl QuadraticSequence {
    pub fn new(home: usize, capacity: usize) -> Self {
        Self {
            home,
            capacity,
            index: home,
            n: 0,
            done: capacity == 0,
        }
    }
}

impl Iterator for QuadraticSequence {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }
        if self.n > 0 {
            // n(n+1) - (n-1)n = 2n
            let step = (2 * self.n) % self.capacity;
            self.index = (self.index + step) % self.capacity;
            if self.index == self.home {
                self.done = true;
                return None;
            }
        }
        self.n += 1;
        Some(self.index)
    }
}

impl ProbeStrategy for QuadraticProbe {
    const NAME: &'static str = "quadratic";

    /// First empty or tombstoned slot on the sequence. Rejects the entry if
    /// the sequence returns home first.
    fn place(slots: &mut [Slot], entry: Entry) -> Placed {
        let capacity = slots.len();
        let mut probes = 0;
        for index in QuadraticSequence::new(home_slot(entry.key(), capacity), capacity) {
            probes += 1;
            let landing = match slots[index] {
                Slot::Empty => Landing::Empty,
                Slot::Tombstone => Landing::Tombstone,
                Slot::Occupied(_) => continue,
            };
            slots[index] = Slot::Occupied(entry);
            return Placed { probes, landing };
        }
        Placed {
            probes,
            landing: Landing::Rejected(entry),
        }
    }

    fn find(slots: &[Slot], key: &str) -> Found {
        let capacity = slots.len();
        let mut probes = 0;
        for index in QuadraticSequence::new(home_slot(key, capacity), capacity) {
            probes += 1;
            match &slots[index] {
                Slot::Empty => return Found::miss(probes),
                Slot::Occupied(e) if e.key() == key => return Found::hit(index, probes),
                _ => {}
            }
        }
        Found::miss(probes)
    }

    fn repair<D: DeletionPolicy>(table: &mut OpenAddressingTable<Self, D>, _freed: usize) -> usize {
        table.rebuild()
    }
}
