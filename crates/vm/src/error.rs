//! Runtime errors for the Clusie VM.
//!
//! The original machine this design descends from treated every malformed
//! input as undefined behavior. Here each of those cases is an explicit
//! error variant instead. Every variant carries the program offset (`at`)
//! of the faulting instruction or opcode byte for debugging.

use thiserror::Error;

/// Errors that occur during program execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Byte at a dispatcher position is not a known bytecode instruction.
    #[error("invalid bytecode instruction {byte:#04x} at offset {at}")]
    InvalidBytecode { at: usize, byte: u8 },

    /// Byte at an expression position is not a known opcode.
    #[error("invalid opcode {byte:#04x} at offset {at}")]
    InvalidOpcode { at: usize, byte: u8 },

    /// The instruction pointer ran past the end of the program.
    #[error("unexpected end of program at offset {at}")]
    UnexpectedEndOfProgram { at: usize },

    /// A jump targeted an offset past the end of the program.
    #[error("jump target {target} out of bounds (program length {len}) at offset {at}")]
    OutOfBoundsJump { at: usize, target: usize, len: usize },

    /// Integer division by zero in a DIV expression.
    #[error("division by zero at offset {at}")]
    DivisionByZero { at: usize },

    /// LOAD/LOAD2 or a stack inspection read past current capacity.
    #[error(
        "read of {width} bytes at stack offset {offset} exceeds capacity {capacity} (at offset {at})"
    )]
    OutOfBoundsRead {
        at: usize,
        offset: usize,
        width: usize,
        capacity: usize,
    },

    /// WRITE_U32 through an address that does not point into live stack
    /// memory. Raw writes never grow the stack.
    #[error("raw write through dangling address {address:#x} (capacity {capacity}) at offset {at}")]
    DanglingRawWrite {
        at: usize,
        address: u64,
        capacity: usize,
    },

    /// A store would grow stack memory past the hard capacity limit.
    #[error("stack memory limit exceeded: {required} bytes required at offset {at}")]
    StackOverflow { at: usize, required: usize },

    /// Expression nesting exceeded the evaluator recursion limit.
    #[error("expression nesting too deep at offset {at}")]
    ExpressionTooDeep { at: usize },
}
