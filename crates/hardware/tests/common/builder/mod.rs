//! Fluent builders for test stimulus.



pub use instruction::InstructionBuilder;
pub use slot::SlotBuilder;
