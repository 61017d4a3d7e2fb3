//! Mock memory channels.
//!
//! Stage tests drive Fetch and Memory against these instead of a full
//! hierarchy so each access, and its stall, can be scripted.

use mockall::mock;
use rv64pipe_core::common::MemRequest;
use rv64pipe_core::core::units::cache::{Access, DataPort, InstructionPort};

mock! {
    pub InstructionPort {}
    impl InstructionPort for InstructionPort {
        fn fetch(&mut self, addr: u64) -> Access<u32>;
        fn is_mapped(&self, addr: u64, len: u64) -> bool;
    }
}

mock! {
    pub DataPort {}
    impl DataPort for DataPort {
        fn access(&mut self, req: MemRequest) -> Access<u64>;
        fn is_mapped(&self, addr: u64, len: u64) -> bool;
    }
}
