//! Command-line driver for the ten-stage RV64I core model.
//!
//! This binary provides a single entry point for running programs on the model. It performs:
//! 1. **Run:** Load a flat binary or ELF executable, run it to completion and report the halt reason.
//! 2. **Retirement log:** Optionally stream every retired instruction as a JSON line.
//! 3. **Statistics:** Print selected statistics sections after the run.
//! 4. **Disassembly:** List the instruction stream of an image.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rv64pipe_core::config::Config;
use rv64pipe_core::isa::disasm::disassemble;
use rv64pipe_core::sim::ImageFormat;
use rv64pipe_core::stats::STATS_SECTIONS;
use rv64pipe_core::{HaltReason, Program, RetireObserver, RetireRecord, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Cycle-accurate ten-stage RV64I pipeline model",
    long_about = "Run RV64I programs on a cycle-accurate model of a ten-stage in-order core with split L1 caches and a unified L2.\n\nExamples:\n  pipesim run prog.bin\n  pipesim run prog.elf --retire-log trace.jsonl --stats summary --stats pred\n  pipesim disasm prog.bin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program until it exits, faults or leaves its instruction stream.
    Run {
        /// Program image (flat binary or ELF).
        file: PathBuf,

        /// Treat the image as an ELF executable.
        #[arg(long, conflicts_with = "flat")]
        elf: bool,

        /// Treat the image as a flat binary.
        #[arg(long)]
        flat: bool,

        /// Load address for flat binaries (defaults to the RAM base).
        #[arg(long, value_parser = parse_addr)]
        base: Option<u64>,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Cycle budget (overrides the configuration).
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Trace every stage of every cycle.
        #[arg(long)]
        trace: bool,

        /// Write one JSON record per retired instruction to this file.
        #[arg(long)]
        retire_log: Option<PathBuf>,

        /// Statistics sections to print (repeatable; default: all).
        #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(STATS_SECTIONS.iter().copied()))]
        stats: Vec<String>,
    },

    /// Disassemble the instruction stream of an image.
    Disasm {
        /// Program image (flat binary or ELF).
        file: PathBuf,
    },
}

/// Writes retirement records as JSON lines.
struct JsonLinesLog {
    out: BufWriter<File>,
    failed: Option<std::io::Error>,
}

impl RetireObserver for JsonLinesLog {
    fn on_retire(&mut self, record: &RetireRecord) {
        if self.failed.is_some() {
            return;
        }
        let line = serde_json::to_string(record).map_err(std::io::Error::other);
        if let Err(e) = line.and_then(|l| writeln!(self.out, "{l}")) {
            self.failed = Some(e);
        }
    }
}

fn parse_addr(s: &str) -> Result<u64, String> {
    let t = s.trim();
    let parsed = match t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => t.replace('_', "").parse(),
    };
    parsed.map_err(|e| format!("invalid address '{s}': {e}"))
}

fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config, String> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    Config::from_json(&text).map_err(|e| format!("{}: {e}", path.display()))
}

#[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
fn cmd_run(
    file: &Path,
    format: ImageFormat,
    base: Option<u64>,
    config: Option<&Path>,
    max_cycles: Option<u64>,
    trace: bool,
    retire_log: Option<&Path>,
    stats: &[String],
) -> Result<i32, String> {
    let mut config = load_config(config)?;
    if let Some(n) = max_cycles {
        config.general.max_cycles = n;
    }
    config.general.trace_instructions |= trace;

    let program = Program::from_file(file, format, base.or(Some(config.memory.ram_base)))
        .map_err(|e| format!("{}: {e}", file.display()))?;
    let mut sim = Simulator::with_program(&config, &program).map_err(|e| e.to_string())?;

    let mut log = match retire_log {
        Some(path) => Some(JsonLinesLog {
            out: BufWriter::new(
                File::create(path).map_err(|e| format!("{}: {e}", path.display()))?,
            ),
            failed: None,
        }),
        None => None,
    };

    let reason = match log.as_mut() {
        Some(l) => sim.run_with(l),
        None => sim.run(),
    };

    if let Some(mut l) = log {
        if let Some(e) = l.failed.take() {
            return Err(format!("retirement log: {e}"));
        }
        l.out.flush().map_err(|e| format!("retirement log: {e}"))?;
    }

    sim.stats().print_sections(stats);

    let code = match reason {
        HaltReason::Exit(code) => {
            info!("program exited with code {code}");
            code as i32
        }
        HaltReason::StreamExhausted => {
            info!("instruction stream exhausted");
            0
        }
        HaltReason::Exception(record) => {
            error!("fatal exception: {record}");
            eprintln!("{}", sim.cpu.dump_state());
            1
        }
        HaltReason::CycleLimit(n) => {
            error!("cycle budget of {n} exhausted");
            2
        }
    };
    Ok(code)
}

fn cmd_disasm(file: &Path) -> Result<i32, String> {
    let program = Program::from_file(file, ImageFormat::Auto, None)
        .map_err(|e| format!("{}: {e}", file.display()))?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (i, word) in program.words.iter().enumerate() {
        let pc = program.base + 4 * i as u64;
        writeln!(out, "{pc:#010x}:  {word:08x}    {}", disassemble(*word))
            .map_err(|e| e.to_string())?;
    }
    Ok(0)
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run {
            file,
            elf,
            flat,
            base,
            config,
            max_cycles,
            trace,
            retire_log,
            stats,
        } => {
            init_logging(*trace);
            let format = match (*elf, *flat) {
                (true, _) => ImageFormat::Elf,
                (_, true) => ImageFormat::Flat,
                _ => ImageFormat::Auto,
            };
            cmd_run(
                file,
                format,
                *base,
                config.as_deref(),
                *max_cycles,
                *trace,
                retire_log.as_deref(),
                stats,
            )
        }
        Commands::Disasm { file } => {
            init_logging(false);
            cmd_disasm(file)
        }
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }
}
