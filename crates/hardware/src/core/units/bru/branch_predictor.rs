//! Branch Predictor Interface.
//!
//! Defines the `BranchPredictor` trait. Fetch performs a read-only lookup for
//! every control-flow instruction it fetches; the final Execute micro-stage
//! trains the predictor when the instruction resolves.

/// Combinational prediction for one fetch address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prediction {
    /// Predicted direction.
    pub taken: bool,
    /// Predicted target; the fall-through address when no target is cached.
    pub target: u64,
}

impl Prediction {
    /// Address Fetch continues from after this instruction.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the predicted instruction.
    pub const fn next_pc(&self, pc: u64) -> u64 {
        if self.taken { self.target } else { pc.wrapping_add(4) }
    }
}

/// Trait for branch prediction algorithms.
pub trait BranchPredictor {
    /// Predicts direction and target for the instruction at `pc`.
    ///
    /// # Arguments
    ///
    /// * `pc` - Fetch address of the control-flow instruction.
    fn predict(&self, pc: u64) -> Prediction;

    /// Trains the predictor with a resolved outcome.
    ///
    /// # Arguments
    ///
    /// * `pc` - Fetch address of the resolved instruction.
    /// * `taken` - Actual direction.
    /// * `target` - Actual target; only recorded when `taken` is true.
    fn update(&mut self, pc: u64, taken: bool, target: u64);
}
