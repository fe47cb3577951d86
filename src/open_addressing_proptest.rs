#![cfg(test)]

// Property tests for the open-addressing tables kept inside the crate so they
// can reach the probing strategies and slot arrays directly.

use crate::deletion::{DeletionMode, DeletionPolicy, HardDeletion, SoftDeletion};
use crate::linear::LinearProbe;
use crate::open_addressing::{OpenAddressingTable, ProbeStrategy};
use crate::ordered_linear::{clusters_are_ordered, OrderedLinearProbe};
use crate::quadratic::QuadraticProbe;
use crate::slot::Slot;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::HashMap;

// Pool-indexed operations: indices shrink to earlier keys, the pool shrinks,
// and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, u16),
    Get(usize),
    Remove(usize),
    ContainsKey(String),
}

fn arb_scenario(key: &'static str) -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec(key, 1..=24).prop_flat_map(move |pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => (idx.clone(), any::<u16>()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => idx.clone().prop_map(OpI::Get),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => key.prop_map(OpI::ContainsKey),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: state-machine equivalence against std::collections::HashMap.
// Keys are only put while absent, so the model stays a plain map.
// Invariants exercised after every op:
// - `get` finds every live key with its value; removed keys are absent.
// - `len` parity with the model; hard deletion never leaves tombstones.
// - load (live, or live + tombstones for soft) stays below half capacity.
// - capacity never shrinks and is always prime.
// - ordered-linear clusters stay sorted.
fn run_state_machine<P, D>(pool: &[String], ops: &[OpI]) -> Result<(), TestCaseError>
where
    P: ProbeStrategy,
    D: DeletionPolicy,
{
    let mut sut: OpenAddressingTable<P, D> = OpenAddressingTable::default();
    let mut model: HashMap<String, String> = HashMap::new();
    let mut capacity = sut.capacity();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = &pool[*i];
                if model.contains_key(k) {
                    continue;
                }
                let v = v.to_string();
                let r = sut.put(k, &v).expect("non-empty arguments");
                prop_assert_eq!(r.value(), Some(v.as_str()));
                prop_assert!(r.probes >= 1);
                model.insert(k.clone(), v);
                prop_assert!(
                    sut.load_factor() < 0.5,
                    "load {} of {}",
                    D::load(sut.len(), sut.tombstones()),
                    sut.capacity()
                );
            }
            OpI::Get(i) => {
                let k = &pool[*i];
                let r = sut.get(k);
                prop_assert_eq!(r.value(), model.get(k).map(String::as_str));
                prop_assert!(r.probes >= 1 && r.probes <= sut.capacity());
            }
            OpI::Remove(i) => {
                let k = &pool[*i];
                let r = sut.remove(k);
                prop_assert_eq!(r.value, model.remove(k));
                prop_assert!(!sut.get(k).is_found());
                prop_assert!(!sut.contains_key(k));
            }
            OpI::ContainsKey(s) => {
                prop_assert_eq!(sut.contains_key(s), model.contains_key(s));
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert!(sut.capacity() >= capacity, "capacity shrank");
        prop_assert!(crate::primes::is_prime(sut.capacity()));
        capacity = sut.capacity();
        if D::MODE == DeletionMode::Hard {
            prop_assert_eq!(sut.tombstones(), 0);
        }
        let tombstones = sut.slots().iter().filter(|s| s.is_tombstone()).count();
        prop_assert_eq!(sut.tombstones(), tombstones);
        if P::NAME == OrderedLinearProbe::NAME {
            prop_assert!(clusters_are_ordered(sut.slots()));
        }
        for (k, v) in &model {
            let got = sut.get(k);
            prop_assert_eq!(got.value(), Some(v.as_str()), "lost {}", k);
        }
    }

    let live = sut.slots().iter().filter_map(Slot::entry).count();
    prop_assert_eq!(live, model.len());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_linear_hard((pool, ops) in arb_scenario("[a-z]{1,5}")) {
        run_state_machine::<LinearProbe, HardDeletion>(&pool, &ops)?;
    }

    #[test]
    fn prop_linear_soft((pool, ops) in arb_scenario("[a-z]{1,5}")) {
        run_state_machine::<LinearProbe, SoftDeletion>(&pool, &ops)?;
    }

    #[test]
    fn prop_ordered_hard((pool, ops) in arb_scenario("[a-z]{1,5}")) {
        run_state_machine::<OrderedLinearProbe, HardDeletion>(&pool, &ops)?;
    }

    #[test]
    fn prop_ordered_soft((pool, ops) in arb_scenario("[a-z]{1,5}")) {
        run_state_machine::<OrderedLinearProbe, SoftDeletion>(&pool, &ops)?;
    }

    #[test]
    fn prop_quadratic_hard((pool, ops) in arb_scenario("[a-z]{1,5}")) {
        run_state_machine::<QuadraticProbe, HardDeletion>(&pool, &ops)?;
    }

    #[test]
    fn prop_quadratic_soft((pool, ops) in arb_scenario("[a-z]{1,5}")) {
        run_state_machine::<QuadraticProbe, SoftDeletion>(&pool, &ops)?;
    }
}

// Same invariants over a tiny alphabet, so most keys share home slots and
// clusters run long.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_linear_hard_with_collisions((pool, ops) in arb_scenario("[ahov]{1,3}")) {
        run_state_machine::<LinearProbe, HardDeletion>(&pool, &ops)?;
    }

    #[test]
    fn prop_ordered_hard_with_collisions((pool, ops) in arb_scenario("[ahov]{1,3}")) {
        run_state_machine::<OrderedLinearProbe, HardDeletion>(&pool, &ops)?;
    }

    #[test]
    fn prop_ordered_soft_with_collisions((pool, ops) in arb_scenario("[ahov]{1,3}")) {
        run_state_machine::<OrderedLinearProbe, SoftDeletion>(&pool, &ops)?;
    }

    #[test]
    fn prop_quadratic_hard_with_collisions((pool, ops) in arb_scenario("[ahov]{1,3}")) {
        run_state_machine::<QuadraticProbe, HardDeletion>(&pool, &ops)?;
    }
}
