//! Branch resolution unit (BRU).
//!
//! Holds the branch prediction interface and the bimodal predictor used by
//! the Fetch stage: a table of 2-bit saturating counters with a branch-target
//! cache, indexed by the low bits of the fetch address.

pub use self::bimodal::{BimodalPredictor, PredictorEntry};
pub use self::branch_predictor::{BranchPredictor, Prediction};

/// 2-bit counter table with branch-target cache.
pub mod bimodal;

/// Branch predictor trait.
pub mod branch_predictor;
