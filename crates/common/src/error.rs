//! Decode errors for Clusie byte streams.

use thiserror::Error;

/// Errors that occur while decoding a byte stream without executing it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Byte at a dispatcher position is not a known bytecode instruction.
    #[error("unknown bytecode instruction: {0:#04x}")]
    UnknownBytecode(u8),

    /// Byte at an expression position is not a known opcode.
    #[error("unknown opcode: {0:#04x}")]
    UnknownOpcode(u8),

    /// The stream ended in the middle of an instruction or immediate.
    #[error("unexpected end of stream at offset {0}")]
    UnexpectedEnd(usize),
}
