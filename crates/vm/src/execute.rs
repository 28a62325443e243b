//! Main execution loop and bytecode dispatch for the Clusie VM.
//!
//! Each opcode has an explicit, independent handler. The C lineage of this
//! machine fell through between WRITE_U32 and the jump cases; that behavior
//! is deliberately not reproduced.

use crate::error::RuntimeError;
use crate::machine::Vm;
use clusie_common::{Bytecode, Ptr, Scalar};

impl<'a> Vm<'a> {
    /// Execute until TERMINATE or error.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        while self.step()? {}
        Ok(())
    }

    /// Dispatch a single bytecode instruction.
    ///
    /// Returns `Ok(false)` when the instruction was TERMINATE.
    pub fn step(&mut self) -> Result<bool, RuntimeError> {
        let at = self.reader.ip();
        let byte = self.reader.read_u8()?;
        let bc = Bytecode::try_from(byte)
            .map_err(|_| RuntimeError::InvalidBytecode { at, byte })?;

        match bc {
            Bytecode::Terminate => return Ok(false),

            Bytecode::StoreU32 => self.store::<u32>(at)?,
            Bytecode::StorePtr => self.store::<Ptr>(at)?,
            Bytecode::WriteU32 => self.write_indirect(at)?,

            Bytecode::UJmpAbs => self.ujmp::<u8>()?,
            Bytecode::UJmpAbs2 => self.ujmp::<u16>()?,
            Bytecode::UJmpAbs4 => self.ujmp::<u32>()?,

            Bytecode::CJmpAbs => self.cjmp::<u8, u8>()?,
            Bytecode::CJmpAbs2 => self.cjmp::<u16, u8>()?,
            Bytecode::CJmpAbs4 => self.cjmp::<u32, u8>()?,

            Bytecode::C2JmpAbs => self.cjmp::<u8, u16>()?,
            Bytecode::C2JmpAbs2 => self.cjmp::<u16, u16>()?,
            Bytecode::C2JmpAbs4 => self.cjmp::<u32, u16>()?,

            Bytecode::C4JmpAbs => self.cjmp::<u8, u32>()?,
            Bytecode::C4JmpAbs2 => self.cjmp::<u16, u32>()?,
            Bytecode::C4JmpAbs4 => self.cjmp::<u32, u32>()?,
        }

        Ok(true)
    }

    /// STORE_*: read a u8 slot offset, evaluate a `T`, store at the slot.
    fn store<T: Scalar>(&mut self, at: usize) -> Result<(), RuntimeError> {
        let slot = self.reader.read_u8()? as usize;
        let value = self.calculate::<T>()?;
        self.memory.write(slot, value, at)
    }

    /// WRITE_U32: evaluate a pointer, then a u32, then write through the
    /// pointer. The pointer is a base-relative stack address materialized by
    /// SLOT_ADDR (or arithmetic over one); it must target live memory.
    fn write_indirect(&mut self, at: usize) -> Result<(), RuntimeError> {
        let address = self.calculate::<Ptr>()?;
        let value = self.calculate::<u32>()?;
        self.memory.write_raw(address, value, at)
    }

    /// Unconditional jump: read a target of width `A`, set the IP to it.
    fn ujmp<A: Scalar>(&mut self) -> Result<(), RuntimeError> {
        let target = self.reader.read::<A>()?;
        self.reader.jump(target.to_offset())
    }

    /// Conditional jump: read a target of width `A`, then evaluate a
    /// condition of width `C`; jump when the condition is nonzero. The
    /// target is read before the condition — operand order is part of the
    /// encoding.
    fn cjmp<A: Scalar, C: Scalar>(&mut self) -> Result<(), RuntimeError> {
        let target = self.reader.read::<A>()?;
        let cond = self.calculate::<C>()?;
        if !cond.is_zero() {
            self.reader.jump(target.to_offset())?;
        }
        Ok(())
    }
}
