//! Memory transactions.
//!
//! Requests the Memory stage sends down the data-side channel: address,
//! width, extension and payload of every load and store. Instruction fetches
//! use the read-only `InstructionPort` and carry no request.

use serde::Serialize;

use crate::core::pipeline::signals::MemWidth;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AccessType {
    /// Data read (load) through the data-side channel.
    Read,
    /// Data write (store) through the data-side channel.
    Write,
}

/// One data-side memory transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemRequest {
    /// Byte address; naturally aligned to `width`.
    pub addr: u64,
    /// Transfer width.
    pub width: MemWidth,
    /// Sign-extend read data (ignored for writes).
    pub signed: bool,
    /// Read or write intent.
    pub kind: AccessType,
    /// Store payload (low `width` bytes are used).
    pub data: u64,
}

impl MemRequest {
    /// Builds a load request.
    pub const fn read(addr: u64, width: MemWidth, signed: bool) -> Self {
        Self {
            addr,
            width,
            signed,
            kind: AccessType::Read,
            data: 0,
        }
    }

    /// Builds a store request.
    pub const fn write(addr: u64, width: MemWidth, data: u64) -> Self {
        Self {
            addr,
            width,
            signed: false,
            kind: AccessType::Write,
            data,
        }
    }
}

/// Extends the low `width` bytes of `raw` to 64 bits.
///
/// # Arguments
///
/// * `raw` - Little-endian value with the transferred bytes in the low positions.
/// * `width` - Transfer width.
/// * `signed` - Sign-extend instead of zero-extend.
pub const fn extend(raw: u64, width: MemWidth, signed: bool) -> u64 {
    match (width, signed) {
        (MemWidth::Byte, true) => raw as i8 as i64 as u64,
        (MemWidth::Byte, false) => raw & 0xFF,
        (MemWidth::Half, true) => raw as i16 as i64 as u64,
        (MemWidth::Half, false) => raw & 0xFFFF,
        (MemWidth::Word, true) => raw as i32 as i64 as u64,
        (MemWidth::Word, false) => raw & 0xFFFF_FFFF,
        (MemWidth::Double, _) => raw,
        (MemWidth::Nop, _) => 0,
    }
}
