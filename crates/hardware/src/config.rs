//! Configuration system for the core model.
//!
//! This module defines the configuration structures used to parameterize the
//! model. It provides:
//! 1. **Defaults:** Baseline hardware constants (memory, caches, predictor).
//! 2. **Structures:** Hierarchical config for general, memory, cache, and pipeline settings.
//! 3. **Validation:** Geometry checks performed before any unit is built.
//!
//! Configuration is read from JSON; every field is optional and falls back to
//! its default.
//!
//! ```
//! use rv64pipe_core::config::{Config, ReplacementPolicy};
//!
//! let cfg = Config::from_json(r#"{ "cache": { "l1_d": { "ways": 4, "policy": "Lru" } } }"#).unwrap();
//! assert_eq!(cfg.cache.l1_d.ways, 4);
//! assert_eq!(cfg.cache.l1_d.policy, ReplacementPolicy::Lru);
//! assert_eq!(cfg.cache.l1_i.policy, ReplacementPolicy::RoundRobin);
//! ```

use serde::Deserialize;

use crate::common::ConfigError;
use crate::common::constants::{DEFAULT_PREDICTOR_ENTRIES, DEFAULT_RAM_BASE, DEFAULT_RAM_SIZE};

/// Default configuration constants.
mod defaults {
    /// Cycle budget before a run is abandoned.
    pub const MAX_CYCLES: u64 = 10_000_000;

    /// Main memory read latency in cycles.
    pub const MEMORY_READ_LATENCY: u64 = 1;

    /// Default L1 size in bytes (4 KiB).
    pub const L1_SIZE: usize = 4096;

    /// Default L1 associativity.
    pub const L1_WAYS: usize = 2;

    /// Default L2 size in bytes (32 KiB).
    pub const L2_SIZE: usize = 32 * 1024;

    /// Default L2 associativity.
    pub const L2_WAYS: usize = 8;

    /// Default cache line size in bytes.
    pub const CACHE_LINE: usize = 64;

    /// Cycles the L2 needs to return a line it holds.
    pub const L2_LATENCY: u64 = 4;
}

/// Cache replacement policy algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ReplacementPolicy {
    /// Per-set counter advanced on every fill; the counter names the victim.
    #[default]
    RoundRobin,
    /// True least-recently-used ordering, updated on every hit and fill.
    #[serde(alias = "LRU")]
    Lru,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General simulation settings.
    pub general: GeneralConfig,
    /// Main memory layout and timing.
    pub memory: MemoryConfig,
    /// Cache hierarchy geometry and policies.
    pub cache: CacheHierarchyConfig,
    /// Pipeline front-end settings.
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses a JSON configuration and validates it.
    ///
    /// # Arguments
    ///
    /// * `text` - JSON document; missing fields take their defaults.
    ///
    /// # Returns
    ///
    /// The validated configuration or a `ConfigError`.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks every geometry parameter.
    ///
    /// # Returns
    ///
    /// `Ok(())` when every unit can be built from this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cache.l1_i.validate("l1_i")?;
        self.cache.l1_d.validate("l1_d")?;
        self.cache.l2.validate("l2")?;
        for (cache, l1) in [("l1_i", &self.cache.l1_i), ("l1_d", &self.cache.l1_d)] {
            if l1.line_bytes > self.cache.l2.line_bytes {
                return Err(ConfigError::LineMismatch {
                    cache,
                    line: l1.line_bytes,
                    l2_line: self.cache.l2.line_bytes,
                });
            }
        }

        let entries = self.pipeline.predictor_entries;
        if entries == 0 || !entries.is_power_of_two() {
            return Err(ConfigError::PredictorEntries(entries));
        }

        let widest_line = self
            .cache
            .l1_i
            .line_bytes
            .max(self.cache.l1_d.line_bytes)
            .max(self.cache.l2.line_bytes) as u64;
        if self.memory.ram_size == 0 || self.memory.ram_base % widest_line != 0 {
            return Err(ConfigError::Memory {
                base: self.memory.ram_base,
                size: self.memory.ram_size,
            });
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Emit per-stage `trace` events.
    #[serde(default)]
    pub trace_instructions: bool,

    /// Fetch start address. Defaults to the program entry point.
    #[serde(default)]
    pub start_pc: Option<u64>,

    /// Cycle budget for `Simulator::run`.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            start_pc: None,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Main memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Physical base address of main memory.
    #[serde(default = "MemoryConfig::default_ram_base")]
    pub ram_base: u64,

    /// Size of main memory in bytes.
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: usize,

    /// Cycles main memory needs to return a line to the L2.
    #[serde(default = "MemoryConfig::default_read_latency")]
    pub read_latency: u64,
}

impl MemoryConfig {
    fn default_ram_base() -> u64 {
        DEFAULT_RAM_BASE
    }

    fn default_ram_size() -> usize {
        DEFAULT_RAM_SIZE
    }

    fn default_read_latency() -> u64 {
        defaults::MEMORY_READ_LATENCY
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_base: DEFAULT_RAM_BASE,
            ram_size: DEFAULT_RAM_SIZE,
            read_latency: defaults::MEMORY_READ_LATENCY,
        }
    }
}

/// Geometry and policy of a single cache.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Total capacity in bytes.
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Line size in bytes.
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Associativity.
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Victim selection policy.
    #[serde(default)]
    pub policy: ReplacementPolicy,
}

impl CacheConfig {
    fn default_size() -> usize {
        defaults::L1_SIZE
    }

    fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    fn default_ways() -> usize {
        defaults::L1_WAYS
    }

    /// Default L2 geometry: larger and more associative than an L1.
    pub fn l2_default() -> Self {
        Self {
            size_bytes: defaults::L2_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::L2_WAYS,
            policy: ReplacementPolicy::RoundRobin,
        }
    }

    /// Number of sets implied by the geometry.
    pub const fn num_sets(&self) -> usize {
        self.size_bytes / (self.line_bytes * self.ways)
    }

    fn validate(&self, cache: &'static str) -> Result<(), ConfigError> {
        for (field, value) in [
            ("size_bytes", self.size_bytes),
            ("line_bytes", self.line_bytes),
            ("ways", self.ways),
        ] {
            if value == 0 || !value.is_power_of_two() {
                return Err(ConfigError::NotPowerOfTwo {
                    cache,
                    field,
                    value,
                });
            }
        }
        if self.line_bytes < 8 {
            return Err(ConfigError::LineTooSmall {
                cache,
                line: self.line_bytes,
            });
        }
        if self.size_bytes < self.line_bytes * self.ways {
            return Err(ConfigError::Geometry {
                cache,
                size: self.size_bytes,
                line: self.line_bytes,
                ways: self.ways,
            });
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::L1_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::L1_WAYS,
            policy: ReplacementPolicy::RoundRobin,
        }
    }
}

/// Configuration of the two-level hierarchy.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheHierarchyConfig {
    /// L1 instruction cache.
    #[serde(default)]
    pub l1_i: CacheConfig,

    /// L1 data cache.
    #[serde(default)]
    pub l1_d: CacheConfig,

    /// Unified L2 cache.
    #[serde(default = "CacheConfig::l2_default")]
    pub l2: CacheConfig,

    /// Cycles the L2 needs to return a line it holds.
    #[serde(default = "CacheHierarchyConfig::default_l2_latency")]
    pub l2_latency: u64,
}

impl CacheHierarchyConfig {
    fn default_l2_latency() -> u64 {
        defaults::L2_LATENCY
    }
}

impl Default for CacheHierarchyConfig {
    fn default() -> Self {
        Self {
            l1_i: CacheConfig::default(),
            l1_d: CacheConfig::default(),
            l2: CacheConfig::l2_default(),
            l2_latency: defaults::L2_LATENCY,
        }
    }
}

/// Pipeline front-end configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Entries in the 2-bit counter table and branch target cache.
    #[serde(default = "PipelineConfig::default_predictor_entries")]
    pub predictor_entries: usize,
}

impl PipelineConfig {
    fn default_predictor_entries() -> usize {
        DEFAULT_PREDICTOR_ENTRIES
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            predictor_entries: DEFAULT_PREDICTOR_ENTRIES,
        }
    }
}
