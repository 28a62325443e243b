//! The expression evaluator: a recursive interpreter over the opcode table.
//!
//! `calculate<T>` is generic over result width, so one opcode encoding
//! serves 32-bit arithmetic and pointer-width address computation alike.
//! The width is fixed by the bytecode instruction that started evaluation;
//! nothing in the stream tags it.

use crate::error::RuntimeError;
use crate::machine::{Vm, MAX_EVAL_DEPTH};
use clusie_common::{Opcode, Scalar};

impl<'a> Vm<'a> {
    /// Evaluate one expression of width `T`, consuming its bytes.
    pub(crate) fn calculate<T: Scalar>(&mut self) -> Result<T, RuntimeError> {
        if self.eval_depth >= MAX_EVAL_DEPTH {
            return Err(RuntimeError::ExpressionTooDeep {
                at: self.reader.ip(),
            });
        }
        self.eval_depth += 1;
        let result = self.calculate_inner::<T>();
        self.eval_depth -= 1;
        result
    }

    fn calculate_inner<T: Scalar>(&mut self) -> Result<T, RuntimeError> {
        let at = self.reader.ip();
        let byte = self.reader.read_u8()?;
        let op = Opcode::try_from(byte)
            .map_err(|_| RuntimeError::InvalidOpcode { at, byte })?;

        match op {
            Opcode::Constant => self.reader.read::<T>(),
            Opcode::Load => {
                let slot = self.reader.read_u8()? as usize;
                self.memory.read::<T>(slot, at)
            }
            Opcode::Load2 => {
                let slot = self.reader.read::<u16>()? as usize;
                self.memory.read::<T>(slot, at)
            }
            Opcode::Add => {
                let lhs = self.calculate::<T>()?;
                let rhs = self.calculate::<T>()?;
                Ok(lhs.wrapping_add(rhs))
            }
            Opcode::Subtract => {
                let lhs = self.calculate::<T>()?;
                let rhs = self.calculate::<T>()?;
                Ok(lhs.wrapping_sub(rhs))
            }
            Opcode::Multiply => {
                let lhs = self.calculate::<T>()?;
                let rhs = self.calculate::<T>()?;
                Ok(lhs.wrapping_mul(rhs))
            }
            Opcode::Divide => {
                let lhs = self.calculate::<T>()?;
                let rhs = self.calculate::<T>()?;
                lhs.checked_div(rhs)
                    .ok_or(RuntimeError::DivisionByZero { at })
            }
            Opcode::Not => {
                let value = self.calculate::<T>()?;
                Ok(if value.is_zero() { T::ONE } else { T::ZERO })
            }
            Opcode::SlotAddress => {
                let slot = self.reader.read_u8()? as usize;
                Ok(T::from_offset(self.memory.address_of(slot)))
            }
        }
    }
}
