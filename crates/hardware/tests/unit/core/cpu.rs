//! CPU Tests.
//!
//! Construction, program loading and the halting interface of `Cpu`.

use rv64pipe_core::common::{ConfigError, LoadError};
use rv64pipe_core::config::Config;
use rv64pipe_core::core::pipeline::FetchState;
use rv64pipe_core::core::pipeline::signals::MemWidth;
use rv64pipe_core::isa::abi::REG_SP;
use rv64pipe_core::{Cpu, HaltReason, Program};

use crate::common::builder::instruction::asm;
use crate::common::harness::BASE;

fn cpu() -> Cpu {
    Cpu::new(&Config::default()).unwrap()
}

#[test]
fn new_cpu_points_at_ram_base() {
    let cpu = cpu();
    assert_eq!(cpu.pipeline.fetch_pc(), BASE);
    assert_eq!(cpu.pipeline.fetch_state(), FetchState::Running);
    assert!(cpu.pipeline.is_drained());
    assert_eq!(cpu.halt_reason(), None);
    assert_eq!(cpu.stream(), BASE..BASE);
}

#[test]
fn stack_pointer_starts_at_top_of_memory() {
    let cpu = cpu();
    assert_eq!(cpu.regs.read(REG_SP), 0x8100_0000);
    assert_eq!(cpu.regs.read(1), 0);
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = Config::default();
    config.pipeline.predictor_entries = 100;
    assert!(matches!(
        Cpu::new(&config),
        Err(ConfigError::PredictorEntries(100))
    ));
}

#[test]
fn load_places_text_and_data() {
    let mut cpu = cpu();
    let program = Program::from_words(BASE + 0x100, vec![0x0000_0013, 0x0000_0073])
        .with_data(BASE + 0x800, vec![1, 2, 3, 4])
        .with_entry(BASE + 0x104);
    cpu.load_program(&program).unwrap();

    assert_eq!(cpu.stream(), BASE + 0x100..BASE + 0x108);
    assert_eq!(cpu.pipeline.fetch_pc(), BASE + 0x104);
    let mem = cpu.memory.memory();
    assert_eq!(mem.read(BASE + 0x104, MemWidth::Word), Some(0x73));
    assert_eq!(mem.read(BASE + 0x800, MemWidth::Word), Some(0x0403_0201));
}

#[test]
fn configured_start_pc_overrides_entry() {
    let mut config = Config::default();
    config.general.start_pc = Some(BASE + 8);
    let mut cpu = Cpu::new(&config).unwrap();
    cpu.load_program(&Program::from_words(BASE, vec![0x13; 4])).unwrap();
    assert_eq!(cpu.pipeline.fetch_pc(), BASE + 8);
}

#[test]
fn program_outside_memory_is_rejected() {
    let mut cpu = cpu();
    let err = cpu
        .load_program(&Program::from_words(0x1000, vec![0x13]))
        .unwrap_err();
    assert!(matches!(err, LoadError::OutOfRange { start: 0x1000, end: 0x1004 }));
}

#[test]
fn data_outside_memory_is_rejected() {
    let mut cpu = cpu();
    let program = Program::from_words(BASE, vec![0x13]).with_data(0x8100_0000 - 2, vec![0; 4]);
    assert!(matches!(
        cpu.load_program(&program),
        Err(LoadError::OutOfRange { .. })
    ));
}

#[test]
fn reload_clears_halt() {
    let mut cpu = cpu();
    cpu.load_program(&Program::from_words(BASE, vec![asm().ebreak().build()])).unwrap();
    while !cpu.is_halted() {
        let _ = cpu.tick();
    }
    assert!(matches!(cpu.halt_reason(), Some(HaltReason::Exception(_))));

    cpu.load_program(&Program::from_words(BASE, vec![asm().nop().build()])).unwrap();
    assert_eq!(cpu.halt_reason(), None);
    assert_eq!(cpu.pipeline.fetch_pc(), BASE);
}

#[test]
fn force_halt_keeps_first_reason() {
    let mut cpu = cpu();
    cpu.force_halt(HaltReason::CycleLimit(10));
    cpu.force_halt(HaltReason::Exit(0));
    assert_eq!(cpu.halt_reason(), Some(HaltReason::CycleLimit(10)));
    assert_eq!(cpu.tick(), None);
    assert_eq!(cpu.stats.cycles, 0);
}

#[test]
fn dump_state_lists_pc_and_registers() {
    let cpu = cpu();
    let dump = cpu.dump_state();
    assert!(dump.starts_with("PC = 0x0000000080000000\n"));
    assert!(dump.contains("x2 =0x0000000081000000"));
    assert!(dump.contains("x31=0x0000000000000000"));
    assert_eq!(dump.lines().count(), 9);
}

#[test]
fn tracing_mode_still_runs() {
    let mut config = Config::default();
    config.general.trace_instructions = true;
    let mut cpu = Cpu::new(&config).unwrap();
    cpu.load_program(&Program::from_words(BASE, vec![asm().addi(1, 0, 2).build()])).unwrap();
    while !cpu.is_halted() {
        let _ = cpu.tick();
    }
    assert_eq!(cpu.halt_reason(), Some(HaltReason::StreamExhausted));
    assert_eq!(cpu.regs.read(1), 2);
}
