//! Program loading.
//!
//! This module builds the instruction stream the core executes. It performs:
//! 1. **Word streams:** Programs assembled in memory from 32-bit instruction words.
//! 2. **Flat binaries:** Raw little-endian images placed at a fixed base address.
//! 3. **ELF executables:** RV64 images whose loadable segments are placed at their
//!    virtual addresses; the first executable segment becomes the instruction stream.

use std::fs;
use std::ops::Range;
use std::path::Path;

use object::elf;
use object::read::elf::{FileHeader, ProgramHeader};
use tracing::debug;

use crate::common::LoadError;
use crate::common::constants::{DEFAULT_RAM_BASE, INSTRUCTION_SIZE};

/// Image file formats accepted by `Program::from_file`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageFormat {
    /// Pick ELF when the file starts with the ELF magic, flat otherwise.
    #[default]
    Auto,
    /// Raw little-endian instruction words.
    Flat,
    /// ELF64 RISC-V executable.
    Elf,
}

/// Bytes placed in memory outside the instruction stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Load address.
    pub addr: u64,
    /// Contents.
    pub bytes: Vec<u8>,
}

/// An instruction stream plus any data it needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    /// Address of the first instruction word.
    pub base: u64,
    /// Address Fetch starts at.
    pub entry: u64,
    /// Instruction words, in stream order.
    pub words: Vec<u32>,
    /// Additional initialized memory.
    pub data: Vec<Segment>,
}

impl Program {
    /// Builds a program from instruction words placed at `base`, entered at `base`.
    pub fn from_words(base: u64, words: impl Into<Vec<u32>>) -> Self {
        Self {
            base,
            entry: base,
            words: words.into(),
            data: Vec::new(),
        }
    }

    /// Builds a program from a flat little-endian image.
    ///
    /// # Errors
    ///
    /// `LoadError::TruncatedImage` when the length is not a multiple of 4.
    pub fn from_flat(base: u64, bytes: &[u8]) -> Result<Self, LoadError> {
        if bytes.len() % INSTRUCTION_SIZE as usize != 0 {
            return Err(LoadError::TruncatedImage(bytes.len()));
        }
        Ok(Self::from_words(base, words_of(bytes)))
    }

    /// Builds a program from an ELF64 RISC-V executable.
    ///
    /// # Errors
    ///
    /// Parse failures, non-RISC-V machines, images without an executable
    /// segment and program headers that point past the end of the file.
    pub fn from_elf(bytes: &[u8]) -> Result<Self, LoadError> {
        let header = elf::FileHeader64::<object::Endianness>::parse(bytes)?;
        let endian = header.endian()?;
        let machine = header.e_machine(endian);
        if machine != elf::EM_RISCV {
            return Err(LoadError::UnsupportedTarget(format!("e_machine={machine}")));
        }

        let entry = header.e_entry(endian);
        let mut text: Option<(u64, Vec<u32>)> = None;
        let mut data = Vec::new();

        for ph in header.program_headers(endian, bytes)? {
            if ph.p_type(endian) != elf::PT_LOAD || ph.p_filesz(endian) == 0 {
                continue;
            }
            let addr = ph.p_vaddr(endian);
            let offset = ph.p_offset(endian);
            let size = ph.p_filesz(endian);
            let contents = usize::try_from(offset)
                .ok()
                .zip(usize::try_from(size).ok())
                .and_then(|(o, n)| bytes.get(o..o.checked_add(n)?))
                .ok_or(LoadError::SegmentBounds { offset, size })?;
            debug!("ELF segment vaddr={addr:#x} filesz={size:#x} flags={:#x}", ph.p_flags(endian));

            if text.is_none() && ph.p_flags(endian) & elf::PF_X != 0 {
                let mut padded = contents.to_vec();
                padded.resize(contents.len().next_multiple_of(INSTRUCTION_SIZE as usize), 0);
                text = Some((addr, words_of(&padded)));
            } else {
                data.push(Segment {
                    addr,
                    bytes: contents.to_vec(),
                });
            }
        }

        let (base, words) =
            text.ok_or_else(|| LoadError::UnsupportedTarget("no executable segment".into()))?;
        Ok(Self {
            base,
            entry,
            words,
            data,
        })
    }

    /// Reads and parses a program file.
    ///
    /// # Arguments
    ///
    /// * `path` - Image path.
    /// * `format` - Image format, or `Auto` to sniff the ELF magic.
    /// * `base` - Load address for flat images (defaults to the RAM base).
    pub fn from_file(
        path: impl AsRef<Path>,
        format: ImageFormat,
        base: Option<u64>,
    ) -> Result<Self, LoadError> {
        let bytes = fs::read(path)?;
        let is_elf = match format {
            ImageFormat::Auto => bytes.starts_with(&elf::ELFMAG),
            ImageFormat::Elf => true,
            ImageFormat::Flat => false,
        };
        if is_elf {
            Self::from_elf(&bytes)
        } else {
            Self::from_flat(base.unwrap_or(DEFAULT_RAM_BASE), &bytes)
        }
    }

    /// Adds an initialized data region.
    #[must_use]
    pub fn with_data(mut self, addr: u64, bytes: impl Into<Vec<u8>>) -> Self {
        self.data.push(Segment {
            addr,
            bytes: bytes.into(),
        });
        self
    }

    /// Starts execution at `entry` instead of `base`.
    #[must_use]
    pub const fn with_entry(mut self, entry: u64) -> Self {
        self.entry = entry;
        self
    }

    /// Instruction stream as little-endian bytes.
    pub fn text_bytes(&self) -> Vec<u8> {
        self.words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    /// Address range covered by the instruction stream.
    pub fn stream(&self) -> Range<u64> {
        self.base..self.base + self.words.len() as u64 * INSTRUCTION_SIZE
    }
}

fn words_of(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(INSTRUCTION_SIZE as usize)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
