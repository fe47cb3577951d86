//! Deletion policies for the open-addressing tables.
//!
//! The policy is a type parameter fixed at construction, so table operations
//! never branch on a runtime flag:
//! - `SoftDeletion` leaves a tombstone behind; tombstones count toward the
//!   growth threshold until the next resize clears them.
//! - `HardDeletion` empties the slot and has the probing strategy repair the
//!   probe chains that ran through it. No tombstone is ever produced.

use crate::slot::Slot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeletionMode {
    Soft,
    Hard,
}

impl core::fmt::Display for DeletionMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            DeletionMode::Soft => "soft",
            DeletionMode::Hard => "hard",
        })
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::SoftDeletion {}
    impl Sealed for super::HardDeletion {}
}

pub trait DeletionPolicy: sealed::Sealed + 'static {
    const MODE: DeletionMode;

    /// Whether a removal triggers probe-chain repair.
    const REPAIRS: bool;

    /// Occupancy measured against the growth threshold.
    fn load(live: usize, tombstones: usize) -> usize;

    /// What a removed entry's slot becomes.
    fn vacated() -> Slot;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoftDeletion;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HardDeletion;

impl DeletionPolicy for SoftDeletion {
    const MODE: DeletionMode = DeletionMode::Soft;
    const REPAIRS: bool = false;

    #[inline]
    fn load(live: usize, tombstones: usize) -> usize {
        live + tombstones
    }

    #[inline]
    fn vacated() -> Slot {
        Slot::Tombstone
    }
}

impl DeletionPolicy for HardDeletion {
    const MODE: DeletionMode = DeletionMode::Hard;
    const REPAIRS: bool = true;

    #[inline]
    fn load(live: usize, _tombstones: usize) -> usize {
        live
    }

    #[inline]
    fn vacated() -> Slot {
        Slot::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_deletion_counts_tombstones_and_leaves_one() {
        assert_eq!(SoftDeletion::MODE, DeletionMode::Soft);
        assert!(!SoftDeletion::REPAIRS);
        assert_eq!(SoftDeletion::load(3, 2), 5);
        assert!(SoftDeletion::vacated().is_tombstone());
    }

    #[test]
    fn hard_deletion_ignores_tombstones_and_repairs() {
        assert_eq!(HardDeletion::MODE, DeletionMode::Hard);
        assert!(HardDeletion::REPAIRS);
        assert_eq!(HardDeletion::load(3, 2), 3);
        assert!(HardDeletion::vacated().is_empty());
    }

    #[test]
    fn modes_display_lowercase() {
        assert_eq!(SoftDeletion::MODE.to_string(), "soft");
        assert_eq!(HardDeletion::MODE.to_string(), "hard");
    }
}
