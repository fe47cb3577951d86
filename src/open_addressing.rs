//! OpenAddressingTable: slot array, counts and resize machinery shared by
//! the linear, ordered-linear and quadratic probing tables.
//!
//! A table is `OpenAddressingTable<P, D>` where `P` is the probing strategy
//! (placement, lookup and hard-deletion repair) and `D` the deletion policy.
//! The strategy only ever sees a bare `&mut [Slot]`; live and tombstone
//! counts are kept here, from the `Landing` each placement reports.
//!
//! Growth runs at the start of `put`: if placing one more entry would bring
//! the policy's load (`live`, or `live + tombstones` under soft deletion) to
//! half the capacity or more, the slot array is replaced by one of the next
//! prime capacity and every live entry is re-placed with `P`'s own placement.
//! The ratio is therefore below one half whenever `put` returns.

use crate::deletion::{DeletionPolicy, HardDeletion};
use crate::error::{check_entry, TableError};
use crate::primes::PrimeSource;
use crate::probes::Probes;
use crate::slot::{empty_slots, Entry, Slot};
use crate::table::HashTable;
use core::marker::PhantomData;
use log::{debug, error, warn};

/// Where a placement put its entry.
#[derive(Debug)]
pub enum Landing {
    Empty,
    /// A tombstone was overwritten.
    Tombstone,
    /// No free slot on the probe sequence; the entry is handed back.
    Rejected(Entry),
}

#[derive(Debug)]
pub struct Placed {
    pub probes: usize,
    pub landing: Landing,
}

/// Result of walking a probe sequence for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Found {
    pub probes: usize,
    pub index: Option<usize>,
}

impl Found {
    #[inline]
    pub(crate) fn hit(index: usize, probes: usize) -> Self {
        Self {
            probes,
            index: Some(index),
        }
    }

    #[inline]
    pub(crate) fn miss(probes: usize) -> Self {
        Self {
            probes,
            index: None,
        }
    }
}

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Collision-resolution strategy plugged into [`OpenAddressingTable`].
pub trait ProbeStrategy: sealed::Sealed + Sized + 'static {
    /// Short name used in log lines and reports.
    const NAME: &'static str;

    /// Place `entry` along its probe sequence, counting one probe per slot
    /// visited including the one it lands in.
    fn place(slots: &mut [Slot], entry: Entry) -> Placed;

    /// Walk `key`'s probe sequence. A miss counts the slot that ended it.
    fn find(slots: &[Slot], key: &str) -> Found;

    /// Restore reachability after hard deletion emptied slot `freed`.
    /// Returns the probes spent.
    fn repair<D: DeletionPolicy>(table: &mut OpenAddressingTable<Self, D>, freed: usize) -> usize;
}

#[derive(Debug, Clone)]
pub struct OpenAddressingTable<P, D = HardDeletion> {
    slots: Box<[Slot]>,
    live: usize,
    tombstones: usize,
    primes: PrimeSource,
    _strategy: PhantomData<fn() -> (P, D)>,
}

impl<P: ProbeStrategy> OpenAddressingTable<P, HardDeletion> {
    pub fn new() -> Self {
        Self::with_primes(PrimeSource::new())
    }
}

impl<P: ProbeStrategy, D: DeletionPolicy> Default for OpenAddressingTable<P, D> {
    fn default() -> Self {
        Self::with_primes(PrimeSource::new())
    }
}

/// Iterator over the live entries of an open-addressing table, in slot order.
pub struct Iter<'a> {
    it: core::slice::Iter<'a, Slot>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it
            .by_ref()
            .find_map(Slot::entry)
            .map(|e| (e.key(), e.value()))
    }
}

impl<P: ProbeStrategy, D: DeletionPolicy> OpenAddressingTable<P, D> {
    /// Empty table whose capacity is `primes.current()`.
    pub fn with_primes(primes: PrimeSource) -> Self {
        Self {
            slots: empty_slots(primes.current()),
            live: 0,
            tombstones: 0,
            primes,
            _strategy: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.live
    }
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Occupancy that governs growth, over capacity.
    pub fn load_factor(&self) -> f64 {
        D::load(self.live, self.tombstones) as f64 / self.capacity() as f64
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            it: self.slots.iter(),
        }
    }

    pub fn put(&mut self, key: &str, value: &str) -> Result<Probes, TableError> {
        check_entry(key, value)?;
        let resize_probes = if self.needs_growth() { self.grow() } else { 0 };
        let placed = P::place(&mut self.slots, Entry::new(key, value));
        let result = match self.settle(placed.landing) {
            None => Probes::found(value, placed.probes),
            Some(rejected) => {
                warn!(
                    "{} table: no free slot on the probe sequence of {:?} (capacity {})",
                    P::NAME,
                    rejected.key(),
                    self.capacity()
                );
                Probes::absent(placed.probes)
            }
        };
        Ok(result.after(resize_probes))
    }

    pub fn get(&self, key: &str) -> Probes {
        if key.is_empty() {
            return Probes::absent(0);
        }
        let found = P::find(&self.slots, key);
        match found.index.and_then(|i| self.slots[i].entry()) {
            Some(entry) => Probes::found(entry.value(), found.probes),
            None => Probes::absent(found.probes),
        }
    }

    pub fn remove(&mut self, key: &str) -> Probes {
        if key.is_empty() {
            return Probes::absent(0);
        }
        let found = P::find(&self.slots, key);
        let Some(entry) = found.index.and_then(|i| self.vacate(i)) else {
            return Probes::absent(found.probes);
        };
        let mut probes = found.probes;
        if D::REPAIRS {
            if let Some(freed) = found.index {
                probes += P::repair(self, freed);
            }
        }
        Probes::found(entry.into_value(), probes)
    }

    /// Full scan; not limited to `key`'s probe path.
    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.iter().any(|s| s.holds(key))
    }

    pub fn contains_value(&self, value: &str) -> bool {
        self.slots
            .iter()
            .filter_map(Slot::entry)
            .any(|e| e.value() == value)
    }

    #[inline]
    fn needs_growth(&self) -> bool {
        2 * (D::load(self.live, self.tombstones) + 1) >= self.capacity()
    }

    /// Move to the next prime capacity. Returns the probes spent.
    fn grow(&mut self) -> usize {
        let from = self.capacity();
        let to = self.primes.advance();
        let probes = self.rehash(to);
        debug!(
            "{} table ({} deletion) grew from {} to {} slots ({} live, {} probes)",
            P::NAME,
            D::MODE,
            from,
            self.capacity(),
            self.live,
            probes
        );
        probes
    }

    /// Re-place every live entry at the current capacity, dropping all
    /// tombstones. Returns the probes spent.
    pub(crate) fn rebuild(&mut self) -> usize {
        let probes = self.rehash(self.primes.current());
        debug!(
            "{} table rebuilt at {} slots ({} live, {} probes)",
            P::NAME,
            self.capacity(),
            self.live,
            probes
        );
        probes
    }

    /// Replace the slot array with one of `capacity` slots holding every
    /// live entry. Scanning the old array costs one probe per slot. If a
    /// placement is rejected the attempt restarts one prime further up.
    fn rehash(&mut self, mut capacity: usize) -> usize {
        let old = core::mem::take(&mut self.slots);
        let mut probes = old.len();
        let mut pending: Vec<Entry> = old
            .into_vec()
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Occupied(e) => Some(e),
                _ => None,
            })
            .collect();
        loop {
            let mut slots = empty_slots(capacity);
            match place_all::<P>(&mut slots, pending) {
                Ok(placed) => {
                    probes += placed;
                    self.slots = slots;
                    break;
                }
                Err((placed, entries)) => {
                    probes += placed;
                    capacity = self.primes.advance();
                    warn!(
                        "{} rehash could not place every entry; retrying at {} slots",
                        P::NAME,
                        capacity
                    );
                    pending = entries;
                }
            }
        }
        self.tombstones = 0;
        probes
    }

    /// Account for a placement; hands back a rejected entry.
    fn settle(&mut self, landing: Landing) -> Option<Entry> {
        match landing {
            Landing::Empty => {
                self.live += 1;
                None
            }
            Landing::Tombstone => {
                self.live += 1;
                self.tombstones -= 1;
                None
            }
            Landing::Rejected(entry) => Some(entry),
        }
    }

    /// Remove the entry at `index` according to the deletion policy.
    fn vacate(&mut self, index: usize) -> Option<Entry> {
        let slot = core::mem::replace(&mut self.slots[index], D::vacated());
        match slot {
            Slot::Occupied(entry) => {
                self.live -= 1;
                if self.slots[index].is_tombstone() {
                    self.tombstones += 1;
                }
                Some(entry)
            }
            other => {
                self.slots[index] = other;
                None
            }
        }
    }

    #[inline]
    pub(crate) fn slot(&self, index: usize) -> &Slot {
        &self.slots[index]
    }

    /// Take the entry at `index` out, leaving the slot empty. Used while
    /// repairing, before the entry is placed again.
    pub(crate) fn take(&mut self, index: usize) -> Option<Entry> {
        match core::mem::take(&mut self.slots[index]) {
            Slot::Occupied(entry) => {
                self.live -= 1;
                Some(entry)
            }
            other => {
                self.slots[index] = other;
                None
            }
        }
    }

    /// Place an entry taken out by [`take`](Self::take). Returns the probes
    /// spent. Grows the table if the entry cannot be placed.
    pub(crate) fn reinsert(&mut self, entry: Entry) -> usize {
        let placed = P::place(&mut self.slots, entry);
        match self.settle(placed.landing) {
            None => placed.probes,
            Some(entry) => {
                error!(
                    "{} table lost the slot for {:?} during repair; growing",
                    P::NAME,
                    entry.key()
                );
                placed.probes + self.grow() + self.reinsert(entry)
            }
        }
    }
}

/// Place every entry into `slots`. On a rejection, all entries (placed ones
/// taken back out) are returned so the caller can retry elsewhere.
fn place_all<P: ProbeStrategy>(
    slots: &mut [Slot],
    entries: Vec<Entry>,
) -> Result<usize, (usize, Vec<Entry>)> {
    let mut probes = 0;
    let mut pending = entries.into_iter();
    while let Some(entry) = pending.next() {
        let placed = P::place(slots, entry);
        probes += placed.probes;
        if let Landing::Rejected(entry) = placed.landing {
            let mut back: Vec<Entry> = slots
                .iter_mut()
                .filter_map(|s| match core::mem::take(s) {
                    Slot::Occupied(e) => Some(e),
                    _ => None,
                })
                .collect();
            back.push(entry);
            back.extend(pending);
            return Err((probes, back));
        }
    }
    Ok(probes)
}

/// Next index of a linear walk, wrapping at `capacity`.
#[inline]
pub(crate) fn next_slot(index: usize, capacity: usize) -> usize {
    let next = index + 1;
    if next == capacity {
        0
    } else {
        next
    }
}

impl<P: ProbeStrategy, D: DeletionPolicy> HashTable for OpenAddressingTable<P, D> {
    fn put(&mut self, key: &str, value: &str) -> Result<Probes, TableError> {
        OpenAddressingTable::put(self, key, value)
    }
    fn get(&self, key: &str) -> Probes {
        OpenAddressingTable::get(self, key)
    }
    fn remove(&mut self, key: &str) -> Probes {
        OpenAddressingTable::remove(self, key)
    }
    fn contains_key(&self, key: &str) -> bool {
        OpenAddressingTable::contains_key(self, key)
    }
    fn contains_value(&self, value: &str) -> bool {
        OpenAddressingTable::contains_value(self, value)
    }
    fn len(&self) -> usize {
        self.live
    }
    fn capacity(&self) -> usize {
        self.slots.len()
    }
}
