//! Code reader: a cursor over borrowed program bytes.
//!
//! The program is immutable and externally owned; it must outlive the VM.
//! The reader decodes fixed-width little-endian values and advances the
//! instruction pointer by exactly the bytes consumed. Jumps replace the
//! instruction pointer with a caller-supplied absolute offset, validated
//! against the program length.

use crate::error::RuntimeError;
use clusie_common::Scalar;

#[derive(Debug)]
pub struct CodeReader<'a> {
    code: &'a [u8],
    ip: usize,
}

impl<'a> CodeReader<'a> {
    pub fn new(code: &'a [u8]) -> Self {
        Self { code, ip: 0 }
    }

    /// Current instruction pointer.
    pub fn ip(&self) -> usize {
        self.ip
    }

    /// Program length in bytes.
    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Rewind the instruction pointer to 0.
    pub fn rewind(&mut self) {
        self.ip = 0;
    }

    /// Read the byte at the instruction pointer and advance by 1.
    pub fn read_u8(&mut self) -> Result<u8, RuntimeError> {
        let byte = *self
            .code
            .get(self.ip)
            .ok_or(RuntimeError::UnexpectedEndOfProgram { at: self.ip })?;
        self.ip += 1;
        Ok(byte)
    }

    /// Read a little-endian scalar and advance by its width.
    pub fn read<T: Scalar>(&mut self) -> Result<T, RuntimeError> {
        if self.ip + T::WIDTH > self.code.len() {
            return Err(RuntimeError::UnexpectedEndOfProgram { at: self.ip });
        }
        let value = T::from_le(&self.code[self.ip..]);
        self.ip += T::WIDTH;
        Ok(value)
    }

    /// Set the instruction pointer to an absolute byte offset.
    ///
    /// `target == len` is permitted; the next fetch then reports end of
    /// program. Anything past that is an out-of-bounds jump.
    pub fn jump(&mut self, target: usize) -> Result<(), RuntimeError> {
        if target > self.code.len() {
            return Err(RuntimeError::OutOfBoundsJump {
                at: self.ip,
                target,
                len: self.code.len(),
            });
        }
        self.ip = target;
        Ok(())
    }
}
