//! Stage functions called by the controller.
//!
//! Each stage is a pure transformation of the slot it receives, touching only
//! the unit it owns. It includes:
//! 1. **Fetch:** Reads the instruction word at the fetch PC and predicts the next PC.
//! 2. **Decode:** Generates control signals and source/destination registers.
//! 3. **Execute:** Transport micro-stages plus the evaluation point (ALU, branches, addresses).
//! 4. **Memory:** Performs loads and stores through the data cache.
//! 5. **Writeback:** Selects the value to be written.
//! 6. **Commit:** Updates the register file and produces the retirement record.

/// Register update and retirement records.
pub mod commit;

/// Control signal generation.
pub mod decode;

/// Execute micro-stages and the evaluation point.
pub mod execute;

/// Instruction fetch and next-PC prediction.
pub mod fetch;

/// Data-cache access.
pub mod memory;

/// Result selection.
pub mod writeback;

pub use commit::commit_stage;
pub use decode::decode_stage;
pub use execute::{ExecuteOutcome, execute_stage, transport_stage};
pub use fetch::{FetchOutcome, fetch_stage};
pub use memory::mem_stage;
pub use writeback::wb_stage;
