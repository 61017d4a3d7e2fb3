//! Error Type Tests.
//!
//! Verifies the display strings of architectural traps and exception
//! records, and the conversions into the umbrella `SimError`.

use rv64pipe_core::common::{ConfigError, ExceptionRecord, LoadError, SimError, Trap};
use rv64pipe_core::core::pipeline::Stage;

#[test]
fn trap_display_names_the_fault_and_address() {
    assert_eq!(
        Trap::InstructionAddressMisaligned(0x8000_0002).to_string(),
        "InstructionAddressMisaligned(0x80000002)"
    );
    assert_eq!(Trap::EnvironmentCall(64).to_string(), "EnvironmentCall(64)");
    assert_eq!(Trap::Breakpoint(0x10).to_string(), "Breakpoint(0x10)");
}

#[test]
fn exception_record_display_includes_pc_and_stage() {
    let record = ExceptionRecord {
        trap: Trap::LoadAccessFault(0x40),
        pc: 0x8000_0010,
        stage: Stage::Execute5,
    };
    assert_eq!(
        record.to_string(),
        "LoadAccessFault(0x40) at pc=0x80000010 (Execute5)"
    );
}

#[test]
fn config_error_converts_into_sim_error() {
    let err: SimError = ConfigError::PredictorEntries(3).into();
    assert!(matches!(err, SimError::Config(ConfigError::PredictorEntries(3))));
    assert_eq!(
        err.to_string(),
        "predictor_entries must be a non-zero power of two (got 3)"
    );
}

#[test]
fn load_error_converts_into_sim_error() {
    let err: SimError = LoadError::TruncatedImage(6).into();
    assert!(matches!(err, SimError::Load(LoadError::TruncatedImage(6))));
}
