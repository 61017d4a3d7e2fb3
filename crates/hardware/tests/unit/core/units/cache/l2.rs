//! L2 Cache Tests.
//!
//! The L2 under test is 128 bytes, direct-mapped with 64-byte lines, so
//! addresses 128 bytes apart collide.

use rv64pipe_core::core::pipeline::signals::MemWidth;
use rv64pipe_core::core::units::cache::{L2Cache, StallCause};

use super::{L2_LATENCY, MEM_BASE, MEM_LATENCY, geometry, memory};

const A: u64 = MEM_BASE;
const CONFLICT: u64 = MEM_BASE + 128;

fn small_l2() -> L2Cache {
    L2Cache::new(&geometry(128, 64, 1), L2_LATENCY, memory())
}

#[test]
fn request_latency_depends_on_presence() {
    let mut l2 = small_l2();
    assert_eq!(l2.request(A), Ok(L2_LATENCY + MEM_LATENCY));
    assert!(l2.mshr().tracks(A));
    assert_eq!(l2.request(A + 64), Err(StallCause::LowerLevelBusy));

    for _ in 0..L2_LATENCY + MEM_LATENCY {
        l2.tick();
    }
    assert!(l2.array().contains(A));
    assert!(!l2.mshr().is_busy());
    assert_eq!(l2.request(A), Ok(L2_LATENCY));
}

#[test]
fn write_allocates_and_marks_dirty() {
    let mut l2 = small_l2();
    l2.write(A + 4, MemWidth::Word, 0x55);
    let line = l2.array().line(A).unwrap();
    assert!(line.dirty);
    assert_eq!(l2.stats.misses, 1);
    assert_eq!(l2.memory().read(A + 4, MemWidth::Word), Some(0));
}

#[test]
fn dirty_victim_is_written_back() {
    let mut l2 = small_l2();
    l2.write(A, MemWidth::Double, 0xFEED);
    l2.write(CONFLICT, MemWidth::Double, 0xBEEF);

    assert_eq!(l2.stats.evictions, 1);
    assert_eq!(l2.stats.writebacks, 1);
    assert_eq!(l2.memory().read(A, MemWidth::Double), Some(0xFEED));
    assert!(!l2.array().contains(A));
}

#[test]
fn clean_victim_is_dropped() {
    let mut l2 = small_l2();
    let mut buf = [0u8; 64];
    l2.fetch_line(A, &mut buf);
    l2.write(CONFLICT, MemWidth::Byte, 1);

    assert_eq!(l2.stats.evictions, 1);
    assert_eq!(l2.stats.writebacks, 0);
}

#[test]
fn peek_prefers_cached_copy() {
    let mut l2 = small_l2();
    l2.write(A, MemWidth::Half, 0x1234);
    assert_eq!(l2.peek(A, MemWidth::Half), Some(0x1234));
    assert_eq!(l2.memory().read(A, MemWidth::Half), Some(0));
    assert_eq!(l2.peek(CONFLICT, MemWidth::Half), Some(0));
    assert_eq!(l2.peek(0x10, MemWidth::Half), None);
}

#[test]
fn fetch_line_reinstalls_evicted_line() {
    let mut l2 = small_l2();
    l2.memory_mut().load(A, &[7; 64]).unwrap();
    l2.write(CONFLICT, MemWidth::Byte, 1);

    let mut buf = [0u8; 64];
    l2.fetch_line(A, &mut buf);
    assert_eq!(buf, [7; 64]);
    assert!(l2.array().contains(A));
}
