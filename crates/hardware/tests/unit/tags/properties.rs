//! # Replacement Invariant Properties
//!
//! Random operation sequences against a single-set SRRIP store. After every
//! step the counters, order list, and victim choice must satisfy:
//!
//! - every RRPV stays within `0..=RRPV_MAX`;
//! - victims are allocatable, saturated, and the leftmost saturated way;
//! - victim search never changes a reserved way;
//! - insert leaves RRPV_INIT, invalidate RRPV_MAX, a hit 0;
//! - the order list always holds each way exactly once.

use proptest::prelude::*;
use rrip_core::config::PolicyKind;
use rrip_core::tags::policies::{ReplacementPolicy, SrripPolicy};
use rrip_core::tags::{CacheSet, RRPV_INIT, RRPV_MAX};
use rrip_core::{Addr, BlockHandle, TagStore, TagStoreConfig};

const ASSOC: usize = 8;

#[derive(Clone, Debug)]
enum Op {
    /// Demand access; fill on miss.
    Touch(u64),
    /// Victim search only.
    Victim,
    /// Install directly into any way, reserved ways included.
    InsertAt(usize, u64),
    /// Invalidate a way.
    Invalidate(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u64..24).prop_map(Op::Touch),
        2 => Just(Op::Victim),
        1 => (0..ASSOC, 0u64..24).prop_map(|(w, t)| Op::InsertAt(w, t)),
        1 => (0..ASSOC).prop_map(Op::Invalidate),
    ]
}

fn store(alloc: usize) -> TagStore {
    TagStore::new(&TagStoreConfig {
        num_sets: 1,
        associativity: ASSOC,
        alloc_assoc: Some(alloc),
        block_size: 64,
        policy: PolicyKind::Srrip,
    })
    .unwrap()
}

fn addr(tag: u64) -> Addr {
    Addr::new(tag << 6)
}

fn rrpvs(tags: &TagStore) -> Vec<u8> {
    tags.set(0).entries().iter().map(|e| e.rrpv()).collect()
}

fn check_victim(tags: &mut TagStore, alloc: usize) -> Result<BlockHandle, TestCaseError> {
    let before = rrpvs(tags);
    let victim = tags.find_victim(addr(u64::MAX >> 6));
    let after = rrpvs(tags);

    prop_assert!(victim.way < alloc);
    prop_assert_eq!(after[victim.way], RRPV_MAX);
    prop_assert!(after[..victim.way].iter().all(|&r| r < RRPV_MAX));
    prop_assert_eq!(&before[alloc..], &after[alloc..]);
    Ok(victim)
}

proptest! {
    #[test]
    fn prop_operation_sequences_keep_invariants(
        alloc in 1..=ASSOC,
        ops in prop::collection::vec(op_strategy(), 1..200),
    ) {
        let mut tags = store(alloc);

        for op in ops {
            match op {
                Op::Touch(tag) => {
                    if let Some(hit) = tags.access(addr(tag), false) {
                        prop_assert_eq!(tags.entry(hit).rrpv(), 0);
                    } else {
                        let victim = check_victim(&mut tags, alloc)?;
                        tags.insert_block(addr(tag), false, victim);
                        prop_assert_eq!(tags.entry(victim).rrpv(), RRPV_INIT);
                    }
                }
                Op::Victim => {
                    let _ = check_victim(&mut tags, alloc)?;
                }
                Op::InsertAt(way, tag) => {
                    let handle = BlockHandle::new(0, way);
                    tags.insert_block(addr(tag), false, handle);
                    prop_assert_eq!(tags.entry(handle).rrpv(), RRPV_INIT);
                    prop_assert_eq!(tags.set(0).tail(), way);
                }
                Op::Invalidate(way) => {
                    let handle = BlockHandle::new(0, way);
                    tags.invalidate(handle);
                    prop_assert!(!tags.entry(handle).valid);
                    prop_assert_eq!(tags.entry(handle).rrpv(), RRPV_MAX);
                    prop_assert_eq!(tags.set(0).tail(), way);
                }
            }

            prop_assert!(rrpvs(&tags).iter().all(|&r| r <= RRPV_MAX));
            prop_assert!(tags.set(0).order_is_consistent());
            let valid = tags.set(0).entries().iter().filter(|e| e.valid).count() as u64;
            prop_assert_eq!(tags.stats().tags_in_use, valid);
        }
    }

    #[test]
    fn prop_hit_forces_zero_regardless_of_prior(start in 0..=RRPV_MAX, way in 0..ASSOC) {
        let mut policy = SrripPolicy::new();
        let mut values = vec![RRPV_INIT; ASSOC];
        values[way] = start;
        let mut set = CacheSet::with_rrpvs(0, &values);

        policy.on_access(&mut set, way);

        prop_assert_eq!(set.entry(way).rrpv(), 0);
    }

    #[test]
    fn prop_aging_passes_are_bounded(values in prop::collection::vec(0..=RRPV_MAX, ASSOC)) {
        let mut policy = SrripPolicy::new();
        let mut set = CacheSet::with_rrpvs(0, &values);
        let max = values.iter().copied().max().unwrap_or(RRPV_MAX);
        let min = values.iter().copied().min().unwrap_or(RRPV_MAX);

        let victim = policy.find_victim(&mut set, ASSOC);

        // Every way rose by the same number of passes, and that number is
        // exactly what the largest counter needed to saturate.
        let passes = RRPV_MAX - max;
        prop_assert!(passes <= RRPV_MAX - min);
        for (entry, &before) in set.entries().iter().zip(&values) {
            prop_assert_eq!(entry.rrpv(), before + passes);
        }
        prop_assert_eq!(Some(victim), values.iter().position(|&r| r == max));
    }
}
