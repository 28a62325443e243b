//! Byte-stream program construction.
//!
//! Clusie programs have no container format: a program is the raw
//! concatenation of instructions, and its only terminator is an explicit
//! `TERMINATE` byte. [`ProgramBuilder`] assembles such a stream without
//! hand-counting immediate bytes.
//!
//! Forward jumps are handled with [`here`](ProgramBuilder::here) and the
//! `patch_*` methods: emit a placeholder target, remember its position,
//! patch once the destination offset is known.

use crate::bytecode::Bytecode;
use crate::opcode::Opcode;
use crate::scalar::{Ptr, Scalar};

/// A fluent builder for flat Clusie byte programs.
#[derive(Debug, Clone, Default)]
pub struct ProgramBuilder {
    bytes: Vec<u8>,
}

impl ProgramBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a dispatcher-level instruction byte.
    pub fn op(mut self, bc: Bytecode) -> Self {
        self.bytes.push(bc as u8);
        self
    }

    /// Emit an evaluator-level opcode byte.
    pub fn expr(mut self, op: Opcode) -> Self {
        self.bytes.push(op as u8);
        self
    }

    /// Emit a u8 immediate.
    pub fn imm_u8(mut self, value: u8) -> Self {
        self.bytes.push(value);
        self
    }

    /// Emit a u16 immediate, little-endian.
    pub fn imm_u16(mut self, value: u16) -> Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Emit a u32 immediate, little-endian.
    pub fn imm_u32(mut self, value: u32) -> Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Emit a u64 immediate, little-endian.
    pub fn imm_u64(mut self, value: u64) -> Self {
        self.bytes.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Emit a slot offset (u8).
    pub fn slot(self, offset: u8) -> Self {
        self.imm_u8(offset)
    }

    /// Emit a complete `CONST` expression producing a u32.
    pub fn const_u32(self, value: u32) -> Self {
        self.expr(Opcode::Constant).imm_u32(value)
    }

    /// Emit a complete `CONST` expression producing a pointer-width value.
    pub fn const_ptr(self, value: Ptr) -> Self {
        self.expr(Opcode::Constant).imm_u64(value)
    }

    /// Emit a complete `LOAD` expression for a u8 slot offset.
    pub fn load(self, offset: u8) -> Self {
        self.expr(Opcode::Load).imm_u8(offset)
    }

    /// Current stream offset; the position the next emitted byte will take.
    pub fn here(&self) -> usize {
        self.bytes.len()
    }

    /// Overwrite the u8 at `at` with `value`.
    ///
    /// # Panics
    ///
    /// Panics if `at` is past the bytes emitted so far. Patch positions come
    /// from [`here`](Self::here), so a bad `at` is a builder bug, not input.
    pub fn patch_u8(mut self, at: usize, value: u8) -> Self {
        self.bytes[at] = value;
        self
    }

    /// Overwrite the u16 at `at` with `value`, little-endian.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two bytes were emitted at `at`; see
    /// [`patch_u8`](Self::patch_u8).
    pub fn patch_u16(mut self, at: usize, value: u16) -> Self {
        value.write_le(&mut self.bytes[at..]);
        self
    }

    /// Overwrite the u32 at `at` with `value`, little-endian.
    ///
    /// # Panics
    ///
    /// Panics if fewer than four bytes were emitted at `at`; see
    /// [`patch_u8`](Self::patch_u8).
    pub fn patch_u32(mut self, at: usize, value: u32) -> Self {
        value.write_le(&mut self.bytes[at..]);
        self
    }

    /// Number of bytes emitted so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the builder and return the program bytes.
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}
