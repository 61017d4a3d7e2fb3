//! Pipeline controller.
//!
//! The controller owns one latch per stage and sequences a clock tick as a
//! compute-then-commit step over a snapshot of the latches:
//! 1. **Evaluation:** Every stage reads only the previous cycle's latches,
//!    in the order Commit, Writeback, Memory, Execute5, Execute1-4, Decode, Fetch.
//! 2. **Stalls:** The most downstream stall point `N` holds latches `0..=N`
//!    and injects a bubble into `N + 1`; older stages keep draining.
//! 3. **Flushes:** A redirect or serializing instruction at `Execute5` clears
//!    every younger slot and overrides any stall on those stages.
//! 4. **Commit:** The new latch array replaces the old one atomically.

use std::ops::Range;

use tracing::debug;

use crate::common::RegisterFile;
use crate::core::pipeline::forwarding::{BypassNetwork, ForwardSelect};
use crate::core::pipeline::hazards::HazardUnit;
use crate::core::pipeline::slot::Slot;
use crate::core::pipeline::stages::{
    FetchOutcome, commit_stage, decode_stage, execute_stage, fetch_stage, mem_stage,
    transport_stage, wb_stage,
};
use crate::core::pipeline::{STAGE_COUNT, Stage};
use crate::core::retire::RetireRecord;
use crate::core::units::bru::BranchPredictor;
use crate::core::units::cache::{Access, DataPort, InstructionPort, StallCause};

/// Latch contents, indexed by `Stage::index`. `None` is a bubble.
pub type Latches = [Option<Slot>; STAGE_COUNT];

/// Whether Fetch may run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchState {
    /// Fetching at the fetch PC.
    #[default]
    Running,
    /// Stopped by a fetch fault or a serializing instruction; only a redirect restarts it.
    Halted,
}

/// Stateful units the stages operate on during one tick.
pub struct CoreUnits<'a, M, P> {
    /// Register file.
    pub regs: &'a mut RegisterFile,
    /// Instruction and data channels.
    pub memory: &'a mut M,
    /// Branch predictor.
    pub predictor: &'a mut P,
    /// Address range holding the instruction stream.
    pub stream: &'a Range<u64>,
    /// Cycle number stamped on retirement records.
    pub cycle: u64,
}

/// Control events observed during one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Record of the instruction that committed.
    pub retired: Option<RetireRecord>,
    /// Exit code requested by the committed instruction.
    pub exit_code: Option<u64>,
    /// Data-cache stall holding `Execute5` and everything upstream.
    pub mem_stall: Option<StallCause>,
    /// Instruction-cache stall at Fetch.
    pub fetch_stall: Option<StallCause>,
    /// A load-use bubble was injected.
    pub load_use: bool,
    /// Fetch PC was outside the instruction stream.
    pub fetch_idle: bool,
    /// A control-flow instruction resolved at `Execute5`.
    pub resolved_branch: bool,
    /// Fetch was redirected to this PC after a misprediction.
    pub redirect: Option<u64>,
    /// Valid slots discarded by a flush.
    pub flushed: usize,
    /// Forward selectors of the slot evaluated at `Execute5`.
    pub forwards: [ForwardSelect; 2],
}

/// Latches plus fetch state of the ten-stage pipeline.
#[derive(Clone, Debug)]
pub struct PipelineController {
    latches: Latches,
    fetch_pc: u64,
    fetch_state: FetchState,
}

impl PipelineController {
    /// Creates an empty pipeline that starts fetching at `entry`.
    pub fn new(entry: u64) -> Self {
        Self {
            latches: Latches::default(),
            fetch_pc: entry,
            fetch_state: FetchState::Running,
        }
    }

    /// Next PC Fetch will read.
    pub const fn fetch_pc(&self) -> u64 {
        self.fetch_pc
    }

    /// Fetch state.
    pub const fn fetch_state(&self) -> FetchState {
        self.fetch_state
    }

    /// Slot held in the latch of `stage`.
    pub fn latch(&self, stage: Stage) -> Option<&Slot> {
        self.latches[stage.index()].as_ref()
    }

    /// All latches.
    pub const fn latches(&self) -> &Latches {
        &self.latches
    }

    /// Number of instructions between Fetch and Writeback.
    pub fn in_flight(&self) -> usize {
        self.latches[..Stage::Commit.index()]
            .iter()
            .filter(|l| l.is_some())
            .count()
    }

    /// True when no instruction is left to commit.
    pub fn is_drained(&self) -> bool {
        self.in_flight() == 0
    }

    /// One-line occupancy diagram (`IF:80000004 ID:-- ...`).
    pub fn diagram(&self) -> String {
        Stage::ALL
            .iter()
            .map(|&s| match self.latch(s) {
                Some(slot) => format!("{}:{:x}", s.mnemonic(), slot.pc),
                None => format!("{}:--", s.mnemonic()),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Advances the pipeline by one clock cycle.
    ///
    /// # Arguments
    ///
    /// * `units` - Register file, memory channels and predictor.
    ///
    /// # Returns
    ///
    /// The control events of the cycle, including the retired record, if any.
    pub fn tick<M, P>(&mut self, units: CoreUnits<'_, M, P>) -> TickReport
    where
        M: InstructionPort + DataPort,
        P: BranchPredictor,
    {
        let CoreUnits {
            regs,
            memory,
            predictor,
            stream,
            cycle,
        } = units;
        let prev = &self.latches;
        let mut next = Latches::default();
        let mut report = TickReport::default();
        let at = |s: Stage| prev[s.index()].as_ref();

        if let Some(slot) = at(Stage::Writeback) {
            report.retired = Some(commit_stage(slot, regs, cycle));
            report.exit_code = slot.exit_code;
            next[Stage::Commit.index()] = Some(slot.clone());
        }

        next[Stage::Writeback.index()] = at(Stage::Memory).cloned().map(wb_stage);

        let mut freeze = None;
        if let Some(slot) = at(Stage::Execute5).cloned() {
            match mem_stage(slot, &mut *memory) {
                Access::Ready(slot) => next[Stage::Memory.index()] = Some(slot),
                Access::Stall(cause) => {
                    report.mem_stall = Some(cause);
                    freeze = Some(Stage::Execute5);
                }
            }
        }
        if freeze.is_none() {
            freeze = HazardUnit::stall_point(prev);
            report.load_use = freeze.is_some();
        }
        let runs = |s: Stage| freeze.is_none_or(|f| s.index() > f.index() + 1);

        let mut flush = false;
        if let Some(slot) = at(Stage::Execute4).filter(|_| runs(Stage::Execute5)).cloned() {
            let bypass = BypassNetwork {
                regs: &*regs,
                mem: at(Stage::Execute5),
                wb: at(Stage::Memory),
            };
            let mapped = |addr, len| DataPort::is_mapped(&*memory, addr, len);
            let out = execute_stage(slot, &bypass, &mut *predictor, mapped);
            report.forwards = out.forwards;
            report.resolved_branch = out.resolved_branch;
            if out.serialize {
                flush = true;
                self.fetch_state = FetchState::Halted;
                debug!("X5  pc={:#x} # SERIALIZE", out.slot.pc);
            }
            if let Some(target) = out.redirect {
                flush = true;
                report.redirect = Some(target);
                self.fetch_pc = target;
                self.fetch_state = FetchState::Running;
            }
            next[Stage::Execute5.index()] = Some(out.slot);
        }

        for s in [
            Stage::Execute1,
            Stage::Execute2,
            Stage::Execute3,
            Stage::Execute4,
        ] {
            if runs(s) {
                next[s.index()] = prev[s.index() - 1].clone().map(transport_stage);
            }
        }

        if runs(Stage::Decode) {
            next[Stage::Decode.index()] = at(Stage::Fetch).cloned().map(decode_stage);
        }

        if freeze.is_none() && !flush && self.fetch_state == FetchState::Running {
            match fetch_stage(self.fetch_pc, stream, &mut *memory, &*predictor) {
                FetchOutcome::Fetched(slot) => {
                    self.fetch_pc = slot.pred_next;
                    next[Stage::Fetch.index()] = Some(slot);
                }
                FetchOutcome::Stalled(cause) => report.fetch_stall = Some(cause),
                FetchOutcome::Faulted(slot) => {
                    self.fetch_state = FetchState::Halted;
                    next[Stage::Fetch.index()] = Some(slot);
                }
                FetchOutcome::Idle => report.fetch_idle = true,
            }
        }

        if let Some(f) = freeze {
            for s in 0..=f.index() {
                next[s] = prev[s].clone();
            }
        }

        if flush {
            report.flushed = next[..=Stage::Execute4.index()]
                .iter_mut()
                .filter_map(Option::take)
                .count();
            debug!(
                "flush: {} slot(s) discarded, fetch_pc={:#x}",
                report.flushed, self.fetch_pc
            );
        }

        self.latches = next;
        report
    }
}
