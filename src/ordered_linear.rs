//! Ordered linear probing.
//!
//! Placement insertion-sorts into the cluster: walking forward from the home
//! slot, whenever the resident key is greater than the entry being carried,
//! the two swap and the displaced resident is carried onward. Every entry
//! therefore only has keys `<=` its own between its home slot and itself,
//! and a lookup can stop as soon as it meets a greater key. Tombstones are
//! transparent: never swapped with, never landed on.

use crate::deletion::{DeletionPolicy, HardDeletion};
use crate::hash::home_slot;
use crate::linear::repair_cluster;
use crate::open_addressing::{
    next_slot, sealed, Found, Landing, OpenAddressingTable, Placed, ProbeStrategy,
};
use crate::slot::{Entry, Slot};
use core::cmp::Ordering;

/// Ordered linear probing with the deletion policy `D` (hard by default).
pub type OrderedLinearProbingTable<D = HardDeletion> = OpenAddressingTable<OrderedLinearProbe, D>;

#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedLinearProbe;

impl sealed::Sealed for OrderedLinearProbe {}

impl ProbeStrategy for OrderedLinearProbe {
    const NAME: &'static str = "ordered-linear";

    fn place(slots: &mut [Slot], entry: Entry) -> Placed {
        let capacity = slots.len();
        let mut carried = entry;
        let mut index = home_slot(carried.key(), capacity);
        for probes in 1..=capacity {
            match slots[index] {
                Slot::Empty => {
                    slots[index] = Slot::Occupied(carried);
                    return Placed {
                        probes,
                        landing: Landing::Empty,
                    };
                }
                Slot::Tombstone => {}
                Slot::Occupied(ref mut resident) => {
                    if resident.key() > carried.key() {
                        core::mem::swap(resident, &mut carried);
                    }
                }
            }
            index = next_slot(index, capacity);
        }
        Placed {
            probes: capacity,
            landing: Landing::Rejected(carried),
        }
    }

    fn find(slots: &[Slot], key: &str) -> Found {
        let capacity = slots.len();
        let mut index = home_slot(key, capacity);
        for probes in 1..=capacity {
            match &slots[index] {
                Slot::Empty => return Found::miss(probes),
                Slot::Tombstone => {}
                Slot::Occupied(e) => match e.key().cmp(key) {
                    Ordering::Equal => return Found::hit(index, probes),
                    // Everything further along this cluster sorts after `key`.
                    Ordering::Greater => return Found::miss(probes),
                    Ordering::Less => {}
                },
            }
            index = next_slot(index, capacity);
        }
        Found::miss(capacity)
    }

    fn repair<D: DeletionPolicy>(table: &mut OpenAddressingTable<Self, D>, freed: usize) -> usize {
        repair_cluster(table, freed)
    }
}

/// Whether every entry only has keys `<=` its own (or tombstones) between
/// its home slot and itself.
pub fn clusters_are_ordered(slots: &[Slot]) -> bool {
    let capacity = slots.len();
    slots.iter().enumerate().all(|(at, slot)| {
        let Some(entry) = slot.entry() else {
            return true;
        };
        let mut index = home_slot(entry.key(), capacity);
        while index != at {
            match &slots[index] {
                Slot::Empty => return false,
                Slot::Tombstone => {}
                Slot::Occupied(e) if e.key() > entry.key() => return false,
                Slot::Occupied(_) => {}
            }
            index = next_slot(index, capacity);
        }
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deletion::SoftDeletion;
    use crate::slot::empty_slots;

    #[test]
    fn place_keeps_the_cluster_sorted() {
        // All three hash to slot 6 of 7; arrival order is not key order.
        let mut slots = empty_slots(7);
        for (k, want) in [("heidi", 1), ("erin", 2), ("alice", 3)] {
            let placed = OrderedLinearProbe::place(&mut slots, Entry::new(k, "v"));
            assert_eq!(placed.probes, want, "{k}");
        }
        assert!(slots[6].holds("alice"));
        assert!(slots[0].holds("erin"));
        assert!(slots[1].holds("heidi"));
        assert!(clusters_are_ordered(&slots));
    }

    #[test]
    fn place_skips_tombstones_without_landing() {
        let mut slots = empty_slots(7);
        slots[6] = Slot::Tombstone;
        let placed = OrderedLinearProbe::place(&mut slots, Entry::new("alice", "1"));
        assert_eq!(placed.probes, 2);
        assert!(matches!(placed.landing, Landing::Empty));
        assert!(slots[6].is_tombstone());
        assert!(slots[0].holds("alice"));
    }

    #[test]
    fn find_stops_early_at_a_greater_key() {
        let mut slots = empty_slots(7);
        for k in ["alice", "heidi"] {
            OrderedLinearProbe::place(&mut slots, Entry::new(k, "v"));
        }
        // "erin" sorts between them: the walk stops at "heidi".
        assert_eq!(OrderedLinearProbe::find(&slots, "erin"), Found::miss(2));
        // "a" (home 6) sorts before "alice" and stops on the first probe.
        assert_eq!(OrderedLinearProbe::find(&slots, "a"), Found::miss(1));
        assert_eq!(OrderedLinearProbe::find(&slots, "heidi"), Found::hit(0, 2));
    }

    #[test]
    fn hard_remove_keeps_order_and_reachability() {
        let mut t = OrderedLinearProbingTable::new();
        for (k, v) in [("heidi", "3"), ("erin", "2"), ("alice", "1")] {
            t.put(k, v).unwrap();
        }
        assert_eq!(t.capacity(), 7);
        assert!(t.slots()[6].holds("alice"));
        assert!(t.slots()[0].holds("erin"));
        assert!(t.slots()[1].holds("heidi"));

        let removed = t.remove("erin");
        assert_eq!(removed.value(), Some("2"));
        // lookup 2, scan slot 1 (1) + re-place heidi (2), scan slot 2 (1)
        assert_eq!(removed.probes, 6);
        assert!(t.slots()[0].holds("heidi"));
        assert!(clusters_are_ordered(t.slots()));
        assert_eq!(t.get("alice").value(), Some("1"));
        assert_eq!(t.get("heidi").probes, 2);
        assert!(!t.get("erin").is_found());
    }

    #[test]
    fn soft_remove_keeps_lookups_past_the_tombstone() {
        let mut t = OrderedLinearProbingTable::<SoftDeletion>::default();
        t.put("erin", "2").unwrap();
        t.put("alice", "1").unwrap();
        assert!(t.slots()[6].holds("alice"));
        assert!(t.slots()[0].holds("erin"));
        t.remove("alice");
        assert!(t.slots()[6].is_tombstone());
        assert_eq!(t.get("erin").value(), Some("2"));
        assert_eq!(t.get("erin").probes, 2);
    }

    #[test]
    fn detects_out_of_order_cluster() {
        let mut slots = empty_slots(7);
        slots[6] = Slot::Occupied(Entry::new("heidi", "3"));
        slots[0] = Slot::Occupied(Entry::new("alice", "1"));
        assert!(!clusters_are_ordered(&slots));
    }
}
