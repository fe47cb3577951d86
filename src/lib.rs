//! probe-table: string-keyed hash tables that report how many probes each
//! operation took, for comparing collision-resolution strategies under the
//! same workload.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one map contract (`HashTable`) over four collision-resolution
//!   strategies, each returning `Probes { value, probes }` so cost can be
//!   measured per call.
//! - Layers:
//!   - `hash::home_slot`: `(31-polynomial string hash & 0x7fffffff) mod
//!     capacity`, shared by every table so comparisons are fair.
//!   - `OpenAddressingTable<P, D>`: owns the prime-length slot array
//!     (`Slot::{Empty, Tombstone, Occupied}`), live and tombstone counts,
//!     and growth. `P` is the probing strategy, `D` the deletion policy.
//!   - Strategies: `LinearProbe`, `OrderedLinearProbe`, `QuadraticProbe`
//!     supply placement, lookup and hard-deletion repair.
//!   - `ChainedTable`: bucket array of `OrderedList`s; no probing, no
//!     automatic resizing.
//!   - `workload`: parses workload files and tallies probes per operation.
//!
//! Constraints
//! - Single-threaded; mutation takes `&mut self`.
//! - Capacities come from `PrimeSource`: start at 7, grow to the next prime
//!   at least twice the current one. Open-addressing tables never shrink.
//! - Growth keeps `load / capacity < 0.5` whenever `put` returns, where load
//!   is `live` (hard deletion) or `live + tombstones` (soft deletion).
//! - Keys are not deduplicated; putting a key twice stores two entries.
//!
//! Deletion
//! - `SoftDeletion` writes a tombstone. Lookups walk past it; linear and
//!   quadratic placement may reuse it; ordered placement skips it.
//! - `HardDeletion` empties the slot and repairs: linear and ordered-linear
//!   take out and re-place every entry of the run that followed the freed
//!   slot; quadratic rebuilds the whole table at its current capacity.
//!
//! Probe accounting
//! - One probe per slot (or list node) inspected, including the slot that
//!   ends the walk. Resizes add one probe per old slot scanned plus every
//!   placement probe, ahead of the triggering `put`'s own.
//! - Empty-string arguments stand in for missing ones: `put` rejects them
//!   with `TableError::InvalidArgument`; `get`/`remove` answer absent with
//!   zero probes.
//!
//! Notes and non-goals
//! - No persistence, no non-string keys, no other rehash policy.
//! - A quadratic insertion whose whole probe sequence is occupied is
//!   dropped with a warning rather than reported as an error.

mod chained;
mod deletion;
mod error;
pub mod hash;
mod linear;
mod open_addressing;
mod open_addressing_proptest;
mod ordered_linear;
mod ordered_list;
pub mod primes;
mod probes;
mod quadratic;
mod slot;
mod table;
pub mod workload;

// Public surface
pub use chained::ChainedTable;
pub use deletion::{DeletionMode, DeletionPolicy, HardDeletion, SoftDeletion};
pub use error::{Argument, TableError};
pub use linear::{LinearProbe, LinearProbingTable};
pub use open_addressing::{Iter, OpenAddressingTable, ProbeStrategy};
pub use ordered_linear::{clusters_are_ordered, OrderedLinearProbe, OrderedLinearProbingTable};
pub use ordered_list::OrderedList;
pub use primes::PrimeSource;
pub use probes::Probes;
pub use quadratic::{QuadraticProbe, QuadraticProbingTable, QuadraticSequence};
pub use slot::{Entry, Slot};
pub use table::HashTable;
