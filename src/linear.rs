//! Linear probing: a collision moves one slot over, wrapping at the end.

use crate::deletion::{DeletionPolicy, HardDeletion};
use crate::hash::home_slot;
use crate::open_addressing::{
    next_slot, sealed, Found, Landing, OpenAddressingTable, Placed, ProbeStrategy,
};
use crate::slot::{Entry, Slot};
use log::trace;

/// Linear probing with the deletion policy `D` (hard by default).
pub type LinearProbingTable<D = HardDeletion> = OpenAddressingTable<LinearProbe, D>;

#[derive(Debug, Clone, Copy, Default)]
pub struct LinearProbe;

impl sealed::Sealed for LinearProbe {}

impl ProbeStrategy for LinearProbe {
    const NAME: &'static str = "linear";

    /// First empty or tombstoned slot at or after the home slot.
    fn place(slots: &mut [Slot], entry: Entry) -> Placed {
        let capacity = slots.len();
        let mut index = home_slot(entry.key(), capacity);
        for probes in 1..=capacity {
            let landing = match slots[index] {
                Slot::Empty => Landing::Empty,
                Slot::Tombstone => Landing::Tombstone,
                Slot::Occupied(_) => {
                    index = next_slot(index, capacity);
                    continue;
                }
            };
            slots[index] = Slot::Occupied(entry);
            return Placed { probes, landing };
        }
        Placed {
            probes: capacity,
            landing: Landing::Rejected(entry),
        }
    }

    fn find(slots: &[Slot], key: &str) -> Found {
        let capacity = slots.len();
        let mut index = home_slot(key, capacity);
        for probes in 1..=capacity {
            match &slots[index] {
                Slot::Empty => return Found::miss(probes),
                Slot::Occupied(e) if e.key() == key => return Found::hit(index, probes),
                _ => {}
            }
            index = next_slot(index, capacity);
        }
        Found::miss(capacity)
    }

    fn repair<D: DeletionPolicy>(table: &mut OpenAddressingTable<Self, D>, freed: usize) -> usize {
        repair_cluster(table, freed)
    }
}

/// Re-place every entry of the run of occupied slots that follows `freed`,
/// so entries whose probe path crossed it stay reachable. Costs one probe
/// per scanned slot, the terminating empty one included, plus the probes of
/// every re-placement.
///
/// Each re-placed entry lands at or before the slot it was taken from (that
/// slot is empty at the time), so the scan never revisits moved entries.
pub(crate) fn repair_cluster<P, D>(table: &mut OpenAddressingTable<P, D>, freed: usize) -> usize
where
    P: ProbeStrategy,
    D: DeletionPolicy,
{
    let capacity = table.capacity();
    let mut probes = 0;
    let mut moved = 0;
    let mut index = next_slot(freed, capacity);
    while index != freed {
        probes += 1;
        match table.slot(index) {
            Slot::Empty => break,
            Slot::Tombstone => {}
            Slot::Occupied(_) => {
                if let Some(entry) = table.take(index) {
                    probes += table.reinsert(entry);
                    moved += 1;
                }
            }
        }
        index = next_slot(index, capacity);
    }
    trace!(
        "{} repair after slot {}: {} entries re-placed, {} probes",
        P::NAME,
        freed,
        moved,
        probes
    );
    probes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deletion::SoftDeletion;
    use crate::slot::empty_slots;

    fn occupied(key: &str) -> Slot {
        Slot::Occupied(Entry::new(key, "v"))
    }

    #[test]
    fn place_wraps_past_the_end() {
        // "alice" and "erin" both hash to slot 6 of 7.
        let mut slots = empty_slots(7);
        let first = LinearProbe::place(&mut slots, Entry::new("alice", "1"));
        assert_eq!(first.probes, 1);
        let second = LinearProbe::place(&mut slots, Entry::new("erin", "2"));
        assert_eq!(second.probes, 2);
        assert!(matches!(second.landing, Landing::Empty));
        assert!(slots[6].holds("alice"));
        assert!(slots[0].holds("erin"));
    }

    #[test]
    fn place_reuses_tombstones() {
        let mut slots = empty_slots(7);
        slots[6] = Slot::Tombstone;
        let placed = LinearProbe::place(&mut slots, Entry::new("alice", "1"));
        assert_eq!(placed.probes, 1);
        assert!(matches!(placed.landing, Landing::Tombstone));
        assert!(slots[6].holds("alice"));
    }

    #[test]
    fn place_rejects_when_every_slot_is_taken() {
        let mut slots: Box<[Slot]> = (0..3).map(|i| occupied(&format!("k{i}"))).collect();
        let placed = LinearProbe::place(&mut slots, Entry::new("x", "y"));
        assert_eq!(placed.probes, 3);
        let Landing::Rejected(rejected) = placed.landing else {
            panic!("a full table must reject");
        };
        assert_eq!(rejected.key(), "x");
    }

    #[test]
    fn find_walks_past_tombstones_and_stops_at_empty() {
        let mut slots = empty_slots(7);
        slots[6] = Slot::Tombstone;
        slots[0] = occupied("erin");
        assert_eq!(LinearProbe::find(&slots, "erin"), Found::hit(0, 2));
        assert_eq!(LinearProbe::find(&slots, "heidi"), Found::miss(3));
        assert_eq!(LinearProbe::find(&slots, "carol"), Found::miss(1));
    }

    #[test]
    fn find_on_a_full_lap_is_a_miss() {
        let slots: Box<[Slot]> = (0..5).map(|i| occupied(&format!("k{i}"))).collect();
        assert_eq!(LinearProbe::find(&slots, "absent"), Found::miss(5));
    }

    #[test]
    fn hard_remove_repairs_the_following_cluster() {
        let mut t = LinearProbingTable::new();
        t.put("alice", "1").unwrap();
        t.put("erin", "2").unwrap();
        assert!(t.slots()[0].holds("erin"));

        let removed = t.remove("alice");
        assert_eq!(removed.value(), Some("1"));
        // lookup 1, scan slot 0 (1) + re-place erin at 6 (1), scan slot 1 (1)
        assert_eq!(removed.probes, 4);
        assert!(t.slots()[6].holds("erin"));
        assert!(t.slots()[0].is_empty());
        assert_eq!(t.get("erin").probes, 1);
    }

    #[test]
    fn soft_remove_leaves_a_tombstone() {
        let mut t = LinearProbingTable::<SoftDeletion>::default();
        t.put("alice", "1").unwrap();
        t.put("erin", "2").unwrap();
        let removed = t.remove("alice");
        assert_eq!(removed.value(), Some("1"));
        assert_eq!(removed.probes, 1);
        assert!(t.slots()[6].is_tombstone());
        assert_eq!(t.tombstones(), 1);
        assert_eq!(t.get("erin").probes, 2);
    }
}
