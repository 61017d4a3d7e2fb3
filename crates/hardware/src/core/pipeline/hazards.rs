//! Load-use hazard detection.
//!
//! This module decides when the pipeline must stall because forwarding
//! cannot deliver a value in time. It provides:
//! 1. **Load-Use Detection:** A consumer directly behind a load whose data is still in flight.
//! 2. **Stall Placement:** Which latch freezes and where the bubble is injected.
//!
//! ALU producers never stall; their results reach the consumer through the
//! bypass network.

use crate::core::pipeline::Stage;
use crate::core::pipeline::slot::Slot;

/// Detects load-use hazards between adjacent execute micro-stages.
#[derive(Clone, Copy, Debug, Default)]
pub struct HazardUnit;

impl HazardUnit {
    /// Checks a producer/consumer pair for a load-use hazard.
    ///
    /// # Arguments
    ///
    /// * `producer` - The older slot (the load candidate).
    /// * `consumer` - The slot directly behind it.
    ///
    /// # Returns
    ///
    /// `true` when the producer is a valid load with a nonzero destination
    /// that matches either source register of the consumer.
    pub fn load_use(producer: Option<&Slot>, consumer: Option<&Slot>) -> bool {
        let (Some(p), Some(c)) = (producer, consumer) else {
            return false;
        };
        if !p.is_load() || p.rd == 0 {
            return false;
        }
        p.rd == c.rs1 || p.rd == c.rs2
    }

    /// Finds the stall point for the current cycle.
    ///
    /// The regular case is a load about to be evaluated (`Execute4` latch)
    /// followed by a consumer in the `Execute3` latch. After a data-cache
    /// stall the load can instead still sit in the `Execute5` latch with its
    /// consumer right behind it, which is checked first.
    ///
    /// # Arguments
    ///
    /// * `latches` - Snapshot of every stage latch, indexed by `Stage::index`.
    ///
    /// # Returns
    ///
    /// The stage whose latch (and everything upstream) must hold, or `None`.
    pub fn stall_point(latches: &[Option<Slot>]) -> Option<Stage> {
        let at = |s: Stage| latches.get(s.index()).and_then(Option::as_ref);
        if Self::load_use(at(Stage::Execute5), at(Stage::Execute4)) {
            return Some(Stage::Execute4);
        }
        if Self::load_use(at(Stage::Execute4), at(Stage::Execute3)) {
            return Some(Stage::Execute3);
        }
        None
    }
}
