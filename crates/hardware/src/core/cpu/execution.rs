//! Main Execution Loop.
//!
//! This module implements the per-cycle step of the CPU. It performs the following:
//! 1. **Pipeline Coordination:** Runs one controller tick over the core's units.
//! 2. **Miss Handling:** Advances outstanding cache misses after the stages have run.
//! 3. **Accounting:** Folds the tick's control events into `SimStats`.
//! 4. **Halting:** Stops on exit calls, retired faults and an exhausted instruction stream.

use tracing::{info, warn};

use super::{Cpu, HaltReason};
use crate::core::pipeline::controller::{CoreUnits, FetchState, TickReport};
use crate::core::pipeline::forwarding::ForwardSelect;
use crate::core::pipeline::Stage;
use crate::core::pipeline::signals::SystemOp;
use crate::core::retire::{RetireOutcome, RetireRecord};
use crate::core::units::cache::StallCause;

impl Cpu {
    /// Advances the core by one clock cycle.
    ///
    /// # Returns
    ///
    /// The record of the instruction that committed this cycle, if any.
    /// Once the core has halted this does nothing and returns `None`.
    pub fn tick(&mut self) -> Option<RetireRecord> {
        if self.halt.is_some() {
            return None;
        }

        self.stats.cycles += 1;
        let report = self.pipeline.tick(CoreUnits {
            regs: &mut self.regs,
            memory: &mut self.memory,
            predictor: &mut self.predictor,
            stream: &self.stream,
            cycle: self.stats.cycles,
        });
        self.memory.tick();

        if self.trace {
            info!("[{:>8}] {}", self.stats.cycles, self.pipeline.diagram());
        }

        self.account(&report);
        if let Some(record) = &report.retired {
            self.retire(record, report.exit_code);
        }

        if self.halt.is_none()
            && self.pipeline.is_drained()
            && (report.fetch_idle || self.pipeline.fetch_state() == FetchState::Halted)
        {
            info!(
                "instruction stream exhausted at pc={:#x} after {} cycles",
                self.pipeline.fetch_pc(),
                self.stats.cycles
            );
            self.halt = Some(HaltReason::StreamExhausted);
        }

        report.retired
    }

    fn account(&mut self, report: &TickReport) {
        let s = &mut self.stats;
        let mshr = |c: StallCause| matches!(c, StallCause::MshrBusy | StallCause::LowerLevelBusy);

        if let Some(cause) = report.mem_stall {
            s.stalls_mem += 1;
            s.stalls_mshr += u64::from(mshr(cause));
        } else if report.load_use {
            s.stalls_data += 1;
        }
        if let Some(cause) = report.fetch_stall {
            s.stalls_fetch += 1;
            s.stalls_mshr += u64::from(mshr(cause));
        }

        if report.resolved_branch {
            if report.redirect.is_some() {
                s.branch_mispredictions += 1;
            } else {
                s.branch_correct += 1;
            }
        }
        if report.flushed > 0 || report.redirect.is_some() {
            s.flushes += 1;
            s.stalls_control += report.flushed as u64;
        }

        for sel in report.forwards {
            match sel {
                ForwardSelect::FromMem => s.forwards_mem += 1,
                ForwardSelect::FromWb => s.forwards_wb += 1,
                ForwardSelect::None => {}
            }
        }

        s.l1_i = self.memory.l1_i.stats;
        s.l1_d = self.memory.l1_d.stats;
        s.l2 = self.memory.l2.stats;
    }

    fn retire(&mut self, record: &RetireRecord, exit_code: Option<u64>) {
        self.stats.instructions_retired += 1;

        match record.outcome {
            RetireOutcome::Normal => {
                if let Some(slot) = self.pipeline.latch(Stage::Commit) {
                    let c = slot.ctrl;
                    let bucket = if c.mem_read {
                        &mut self.stats.inst_load
                    } else if c.mem_write {
                        &mut self.stats.inst_store
                    } else if c.is_control_flow() {
                        &mut self.stats.inst_branch
                    } else if c.system != SystemOp::None {
                        &mut self.stats.inst_system
                    } else {
                        &mut self.stats.inst_alu
                    };
                    *bucket += 1;
                }
            }
            RetireOutcome::DecodeError => {
                self.stats.decode_errors += 1;
                warn!("decode error at pc={:#x} inst={:#010x}", record.pc, record.inst);
            }
            RetireOutcome::Exception(exception) => {
                self.stats.exceptions += 1;
                info!("halting on {exception}");
                self.halt = Some(HaltReason::Exception(exception));
                return;
            }
        }

        if let Some(code) = exit_code {
            info!("exit({code}) at pc={:#x} after {} cycles", record.pc, self.stats.cycles);
            self.halt = Some(HaltReason::Exit(code));
        }
    }
}
