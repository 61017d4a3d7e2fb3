//! Stateless and stateful units driven by the pipeline stages.

/// Integer ALU.
pub mod alu;

/// Branch prediction unit (bimodal counters plus target cache).
pub mod bru;

/// Cache hierarchy implementation (split L1, unified L2) with replacement policies.
pub mod cache;
