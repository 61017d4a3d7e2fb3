//! Pipeline Controller Tests.
//!
//! Drives `PipelineController` directly over a real memory hierarchy to check
//! latch movement, fetch state, bubbles and flushes cycle by cycle.

use std::ops::Range;

use rv64pipe_core::common::{RegisterFile, Trap};
use rv64pipe_core::config::Config;
use rv64pipe_core::core::pipeline::{CoreUnits, FetchState, PipelineController, Stage, TickReport};
use rv64pipe_core::core::units::bru::BimodalPredictor;
use rv64pipe_core::core::units::cache::{MemoryHierarchy, StallCause};

use crate::common::builder::instruction::asm;
use crate::common::harness::{BASE, DATA, TestContext};

struct Rig {
    pipe: PipelineController,
    regs: RegisterFile,
    memory: MemoryHierarchy,
    predictor: BimodalPredictor,
    stream: Range<u64>,
    cycle: u64,
}

impl Rig {
    fn new(words: &[u32]) -> Self {
        let mut memory = MemoryHierarchy::new(&Config::default());
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        memory.load_image(BASE, &bytes).unwrap();
        Self {
            pipe: PipelineController::new(BASE),
            regs: RegisterFile::new(),
            memory,
            predictor: BimodalPredictor::new(256).unwrap(),
            stream: BASE..BASE + 4 * words.len() as u64,
            cycle: 0,
        }
    }

    fn tick(&mut self) -> TickReport {
        self.cycle += 1;
        let report = self.pipe.tick(CoreUnits {
            regs: &mut self.regs,
            memory: &mut self.memory,
            predictor: &mut self.predictor,
            stream: &self.stream,
            cycle: self.cycle,
        });
        self.memory.tick();
        report
    }

    /// Ticks until Fetch delivers its first slot.
    fn warm_up(&mut self) -> u64 {
        while self.pipe.latch(Stage::Fetch).is_none() {
            let _ = self.tick();
            assert!(self.cycle < 50, "fetch never completed");
        }
        self.cycle
    }
}

#[test]
fn new_pipeline_is_empty() {
    let pipe = PipelineController::new(BASE);
    assert_eq!(pipe.fetch_pc(), BASE);
    assert_eq!(pipe.fetch_state(), FetchState::Running);
    assert!(pipe.is_drained());
    assert!(pipe.diagram().starts_with("IF:-- ID:--"));
}

#[test]
fn cold_fetch_waits_for_the_instruction_cache() {
    let mut rig = Rig::new(&[asm().nop().build(); 4]);
    let first = rig.tick();
    assert_eq!(first.fetch_stall, Some(StallCause::Miss));
    assert!(rig.pipe.latch(Stage::Fetch).is_none());
    assert_eq!(rig.pipe.fetch_pc(), BASE);

    assert_eq!(rig.warm_up(), 6);
    assert_eq!(rig.pipe.fetch_pc(), BASE + 4);
    assert!(rig.pipe.diagram().starts_with("IF:80000000 ID:--"));
}

#[test]
fn slots_advance_one_stage_per_cycle() {
    let mut rig = Rig::new(&[asm().nop().build(); 8]);
    let _ = rig.warm_up();
    for stage in &Stage::ALL[1..] {
        let _ = rig.tick();
        assert_eq!(rig.pipe.latch(*stage).map(|s| s.pc), Some(BASE), "{stage:?}");
    }
}

#[test]
fn first_instruction_retires_after_ten_stages() {
    let mut rig = Rig::new(&[asm().addi(1, 0, 9).build()]);
    let start = rig.warm_up();
    let retired = loop {
        let report = rig.tick();
        if let Some(r) = report.retired {
            break r;
        }
    };
    assert_eq!(retired.cycle, start + 9);
    assert_eq!(retired.rd, Some(1));
    assert_eq!(rig.regs.read(1), 9);
}

#[test]
fn end_of_stream_reports_idle() {
    let mut rig = Rig::new(&[asm().nop().build()]);
    let _ = rig.warm_up();
    assert!(rig.tick().fetch_idle);
    assert_eq!(rig.pipe.in_flight(), 1);
}

#[test]
fn misaligned_entry_halts_fetch_with_a_faulted_slot() {
    let mut rig = Rig::new(&[asm().nop().build()]);
    rig.pipe = PipelineController::new(BASE + 2);
    let _ = rig.tick();
    assert_eq!(rig.pipe.fetch_state(), FetchState::Halted);
    let slot = rig.pipe.latch(Stage::Fetch).unwrap();
    assert_eq!(
        slot.exception.map(|e| (e.trap, e.stage)),
        Some((Trap::InstructionAddressMisaligned(BASE + 2), Stage::Fetch))
    );

    let _ = rig.tick();
    assert!(rig.pipe.latch(Stage::Fetch).is_none());
    assert!(rig.pipe.latch(Stage::Decode).is_some());
}

#[test]
fn misprediction_flushes_younger_slots() {
    let mut rig = Rig::new(&[
        asm().beq(0, 0, 16).build(),
        asm().addi(1, 0, 1).build(),
        asm().addi(2, 0, 2).build(),
        asm().addi(3, 0, 3).build(),
        asm().addi(4, 0, 4).build(),
    ]);
    let report = loop {
        let r = rig.tick();
        if r.redirect.is_some() {
            break r;
        }
        assert!(rig.cycle < 50);
    };

    assert_eq!(report.redirect, Some(BASE + 16));
    assert!(report.resolved_branch);
    assert_eq!(report.flushed, 4);
    assert_eq!(rig.pipe.fetch_pc(), BASE + 16);
    for stage in &Stage::ALL[..=Stage::Execute4.index()] {
        assert!(rig.pipe.latch(*stage).is_none(), "{stage:?} not flushed");
    }
    assert_eq!(rig.pipe.latch(Stage::Execute5).map(|s| s.pc), Some(BASE));
}

#[test]
fn serializing_instruction_halts_fetch() {
    let mut rig = Rig::new(&[asm().ebreak().build(), asm().nop().build()]);
    let report = loop {
        let r = rig.tick();
        if rig.pipe.fetch_state() == FetchState::Halted {
            break r;
        }
        assert!(rig.cycle < 50);
    };
    assert_eq!(report.redirect, None);
    assert!(report.flushed >= 1);
    assert_eq!(rig.pipe.in_flight(), 1);
}

#[test]
fn load_use_inserts_one_bubble() {
    let mut ctx = TestContext::new().load_program(&[
        asm().ld(6, 5, 0).build(),
        asm().add(7, 6, 6).build(),
    ]);
    ctx.set_reg(5, DATA);
    ctx.step_until(100, |c| c.stats().stalls_data == 1);

    let pipe = &ctx.cpu().pipeline;
    assert_eq!(pipe.latch(Stage::Execute5).map(|s| s.pc), Some(BASE));
    assert!(pipe.latch(Stage::Execute4).is_none());
    assert_eq!(pipe.latch(Stage::Execute3).map(|s| s.pc), Some(BASE + 4));

    let _ = ctx.step();
    assert_eq!(ctx.stats().stalls_data, 1);
}
