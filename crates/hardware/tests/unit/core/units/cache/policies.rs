//! Replacement Policy Tests.
//!
//! Round-robin names victims in fill order and ignores hits; LRU evicts the
//! way unused for the longest time.

use rv64pipe_core::config::ReplacementPolicy as PolicyKind;
use rv64pipe_core::core::units::cache::policies::{
    LruPolicy, ReplacementPolicy, RoundRobinPolicy, build,
};

// ══════════════════════════════════════════════════════════
// 1. Round-robin
// ══════════════════════════════════════════════════════════

#[test]
fn round_robin_cycles_through_ways() {
    let mut p = RoundRobinPolicy::new(1, 4);
    let mut order = Vec::new();
    for _ in 0..6 {
        let v = p.get_victim(0);
        order.push(v);
        p.on_fill(0, v);
    }
    assert_eq!(order, vec![0, 1, 2, 3, 0, 1]);
}

#[test]
fn round_robin_ignores_hits() {
    let mut p = RoundRobinPolicy::new(1, 2);
    p.update(0, 0);
    p.update(0, 1);
    assert_eq!(p.get_victim(0), 0);
}

#[test]
fn round_robin_sets_are_independent() {
    let mut p = RoundRobinPolicy::new(2, 2);
    p.on_fill(0, 0);
    assert_eq!(p.get_victim(0), 1);
    assert_eq!(p.get_victim(1), 0);
}

// ══════════════════════════════════════════════════════════
// 2. LRU
// ══════════════════════════════════════════════════════════

#[test]
fn lru_evicts_least_recently_used() {
    let mut p = LruPolicy::new(1, 4);
    for way in 0..4 {
        p.on_fill(0, way);
    }
    assert_eq!(p.get_victim(0), 0);
    p.update(0, 0);
    assert_eq!(p.get_victim(0), 1);
}

#[test]
fn lru_hit_protects_line_from_eviction() {
    let mut p = LruPolicy::new(1, 2);
    p.on_fill(0, 0);
    p.on_fill(0, 1);
    p.update(0, 0);
    assert_eq!(p.get_victim(0), 1);
}

// ══════════════════════════════════════════════════════════
// 3. Factory
// ══════════════════════════════════════════════════════════

#[test]
fn build_selects_policy_kind() {
    let mut rr = build(PolicyKind::RoundRobin, 1, 2);
    rr.update(0, 0);
    assert_eq!(rr.get_victim(0), 0);

    let mut lru = build(PolicyKind::Lru, 1, 2);
    lru.on_fill(0, 0);
    lru.on_fill(0, 1);
    lru.update(0, 0);
    assert_eq!(lru.get_victim(0), 1);
}
