//! Cache hierarchy tests.




/// Unified write-back L2.
pub mod l2;


/// Replacement policies.
pub mod policies;

use rv64pipe_core::config::{CacheConfig, MemoryConfig, ReplacementPolicy};
use rv64pipe_core::core::units::cache::{L1Cache, L2Cache};
use rv64pipe_core::soc::MainMemory;

/// Base of the small memory used by the cache tests.
pub const MEM_BASE: u64 = 0x8000_0000;

/// L2 hit latency used by the cache tests.
pub const L2_LATENCY: u64 = 4;

/// Memory read latency used by the cache tests.
pub const MEM_LATENCY: u64 = 1;

pub fn geometry(size_bytes: usize, line_bytes: usize, ways: usize) -> CacheConfig {
    CacheConfig {
        size_bytes,
        line_bytes,
        ways,
        policy: ReplacementPolicy::RoundRobin,
    }
}

/// 64 KiB of zeroed memory at `MEM_BASE`.
pub fn memory() -> MainMemory {
    MainMemory::new(&MemoryConfig {
        ram_base: MEM_BASE,
        ram_size: 64 * 1024,
        read_latency: MEM_LATENCY,
    })
}

/// 1 KiB, 64-byte lines, 8-way L2 over `memory()`.
pub fn l2() -> L2Cache {
    L2Cache::new(&geometry(1024, 64, 8), L2_LATENCY, memory())
}

/// 256 B, 64-byte lines, 2-way L1 (2 sets).
pub fn l1() -> L1Cache {
    L1Cache::new("L1D", &geometry(256, 64, 2))
}

/// Advances the pair one cycle in hierarchy order.
pub fn tick(l1: &mut L1Cache, l2: &mut L2Cache) {
    l2.tick();
    l1.tick(l2);
}
