//! # Controller Replay Tests
//!
//! The controller issues the access → victim → insert sequence on misses and
//! find → invalidate on invalidations.

use crate::common::harness::{BLOCK, SETS, addr, config, init_tracing};
use pretty_assertions::assert_eq;
use rrip_core::config::PolicyKind;
use rrip_core::sim::{AccessOutcome, CacheController, TraceOp, parse_trace};
use rrip_core::{Addr, BlockHandle, TagStoreConfig};

fn controller(assoc: usize, alloc: usize) -> CacheController {
    init_tracing();
    CacheController::from_config(&config(assoc, alloc, PolicyKind::Srrip)).unwrap()
}

#[test]
fn miss_then_hit() {
    let mut ctl = controller(2, 2);
    let a = addr(4, 1);

    assert_eq!(
        ctl.access(a, false),
        AccessOutcome::Miss {
            handle: BlockHandle::new(4, 0),
            evicted: None
        }
    );
    assert_eq!(ctl.access(a, false), AccessOutcome::Hit(BlockHandle::new(4, 0)));
}

#[test]
fn conflict_miss_reports_evicted_block() {
    let mut ctl = controller(2, 2);
    let a = addr(0, 1);
    let b = addr(0, 2);
    let c = addr(0, 3);
    let _ = ctl.access(a, false);
    let _ = ctl.access(b, false);

    // Both at RRPV 2: one aging pass, leftmost (block a in way 0) goes.
    assert_eq!(
        ctl.access(c, false),
        AccessOutcome::Miss {
            handle: BlockHandle::new(0, 0),
            evicted: Some(a)
        }
    );
    assert_eq!(ctl.tags().find_block(a, false), None);
}

#[test]
fn invalidate_present_and_absent() {
    let mut ctl = controller(2, 2);
    let a = addr(1, 9);
    let _ = ctl.access(a, false);

    assert_eq!(ctl.invalidate(a, true), AccessOutcome::NotPresent);
    assert_eq!(
        ctl.invalidate(a, false),
        AccessOutcome::Invalidated(BlockHandle::new(1, 0))
    );
    assert_eq!(ctl.invalidate(a, false), AccessOutcome::NotPresent);
}

#[test]
fn unaligned_addresses_share_a_block() {
    let mut ctl = controller(2, 2);
    let base = addr(3, 5);
    let _ = ctl.access(base, false);

    let inside = Addr::new(base.val() + BLOCK as u64 - 1);
    assert!(matches!(ctl.access(inside, false), AccessOutcome::Hit(_)));
}

#[test]
fn run_replays_trace_and_returns_stats() {
    let stride = (SETS * BLOCK) as u64;
    let trace = format!(
        "R 0x0\nR {s1:#x}\nR 0x0\nR {s2:#x}\nI {s2:#x}\nR {s1:#x}\n",
        s1 = stride,
        s2 = 2 * stride
    );
    let ops = parse_trace(&trace).unwrap();

    let mut ctl = controller(2, 2);
    let stats = ctl.run(ops).clone();

    // 0x0 hits once; s2 displaces s1, is invalidated, and s1 refills the hole.
    assert_eq!(stats.accesses, 5);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 4);
    assert_eq!(stats.replacements, 1);
    assert_eq!(stats.invalidations, 1);
    assert_eq!(stats.tags_in_use, 2);
}

#[test]
fn step_dispatches_by_op() {
    let mut ctl = controller(4, 4);
    let a = addr(0, 1);

    assert!(matches!(
        ctl.step(TraceOp::Access { addr: a, secure: false }),
        AccessOutcome::Miss { .. }
    ));
    assert!(matches!(
        ctl.step(TraceOp::Invalidate { addr: a, secure: false }),
        AccessOutcome::Invalidated(_)
    ));
}

#[test]
fn from_config_rejects_zero_allocatable_ways() {
    let config = TagStoreConfig {
        alloc_assoc: Some(0),
        ..TagStoreConfig::default()
    };
    assert!(CacheController::from_config(&config).is_err());
}

#[test]
fn into_tags_returns_the_store() {
    let mut ctl = controller(2, 2);
    let _ = ctl.access(addr(0, 1), false);
    ctl.tags_mut().reset_stats();

    let tags = ctl.into_tags();
    assert_eq!(tags.stats().accesses, 0);
    assert_eq!(tags.stats().tags_in_use, 1);
}
