//! Disassembler: flat byte stream → readable text.
//!
//! Output is one dispatcher instruction per line, prefixed with its byte
//! offset. Nested expressions print in prefix form, e.g.
//!
//! ```text
//! 0000  STORE_U32 4 (ADD (LOAD 0) (CONST 1))
//! 000c  TERMINATE
//! ```
//!
//! The width of every immediate is recovered the same way the machine
//! recovers it at run time: from the instruction that consumes the
//! expression. Disassembly is therefore exact, never heuristic.

use crate::bytecode::Bytecode;
use crate::error::DecodeError;
use crate::opcode::Opcode;
use crate::scalar::{Ptr, Scalar};

/// Disassemble a complete program.
///
/// Stops after a `TERMINATE` at the top level or at the end of the stream.
/// Returns an error for unknown bytes or a stream that ends mid-instruction.
pub fn disassemble(code: &[u8]) -> Result<String, DecodeError> {
    let mut cur = Cursor { code, pos: 0 };
    let mut out = String::new();

    while !cur.at_end() {
        let at = cur.pos;
        let byte = cur.read_u8()?;
        let bc = Bytecode::try_from(byte)?;
        let line = instruction(&mut cur, bc)?;
        out.push_str(&format!("{at:04x}  {line}\n"));
        if bc == Bytecode::Terminate {
            break;
        }
    }

    Ok(out)
}

struct Cursor<'a> {
    code: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn at_end(&self) -> bool {
        self.pos >= self.code.len()
    }

    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let byte = *self
            .code
            .get(self.pos)
            .ok_or(DecodeError::UnexpectedEnd(self.pos))?;
        self.pos += 1;
        Ok(byte)
    }

    fn read<T: Scalar>(&mut self) -> Result<T, DecodeError> {
        if self.pos + T::WIDTH > self.code.len() {
            return Err(DecodeError::UnexpectedEnd(self.pos));
        }
        let value = T::from_le(&self.code[self.pos..]);
        self.pos += T::WIDTH;
        Ok(value)
    }
}

fn instruction(cur: &mut Cursor, bc: Bytecode) -> Result<String, DecodeError> {
    let line = match bc {
        Bytecode::Terminate => bc.mnemonic().to_string(),
        Bytecode::StoreU32 => {
            let slot = cur.read_u8()?;
            let value = expr::<u32>(cur)?;
            format!("{} {slot} {value}", bc.mnemonic())
        }
        Bytecode::StorePtr => {
            let slot = cur.read_u8()?;
            let value = expr::<Ptr>(cur)?;
            format!("{} {slot} {value}", bc.mnemonic())
        }
        Bytecode::WriteU32 => {
            let address = expr::<Ptr>(cur)?;
            let value = expr::<u32>(cur)?;
            format!("{} {address} {value}", bc.mnemonic())
        }
        Bytecode::UJmpAbs => ujmp::<u8>(cur, bc)?,
        Bytecode::UJmpAbs2 => ujmp::<u16>(cur, bc)?,
        Bytecode::UJmpAbs4 => ujmp::<u32>(cur, bc)?,
        Bytecode::CJmpAbs => cjmp::<u8, u8>(cur, bc)?,
        Bytecode::CJmpAbs2 => cjmp::<u16, u8>(cur, bc)?,
        Bytecode::CJmpAbs4 => cjmp::<u32, u8>(cur, bc)?,
        Bytecode::C2JmpAbs => cjmp::<u8, u16>(cur, bc)?,
        Bytecode::C2JmpAbs2 => cjmp::<u16, u16>(cur, bc)?,
        Bytecode::C2JmpAbs4 => cjmp::<u32, u16>(cur, bc)?,
        Bytecode::C4JmpAbs => cjmp::<u8, u32>(cur, bc)?,
        Bytecode::C4JmpAbs2 => cjmp::<u16, u32>(cur, bc)?,
        Bytecode::C4JmpAbs4 => cjmp::<u32, u32>(cur, bc)?,
    };
    Ok(line)
}

fn ujmp<A: Scalar>(cur: &mut Cursor, bc: Bytecode) -> Result<String, DecodeError> {
    let target = cur.read::<A>()?;
    Ok(format!("{} {:#06x}", bc.mnemonic(), target.to_offset()))
}

fn cjmp<A: Scalar, C: Scalar>(cur: &mut Cursor, bc: Bytecode) -> Result<String, DecodeError> {
    let target = cur.read::<A>()?;
    let cond = expr::<C>(cur)?;
    Ok(format!(
        "{} {:#06x} {cond}",
        bc.mnemonic(),
        target.to_offset()
    ))
}

/// Render one expression of width `T`, consuming its bytes.
fn expr<T: Scalar>(cur: &mut Cursor) -> Result<String, DecodeError> {
    let op = Opcode::try_from(cur.read_u8()?)?;

    let text = match op {
        Opcode::Constant => {
            let value = cur.read::<T>()?;
            format!("({} {value})", op.mnemonic())
        }
        Opcode::Load => {
            let slot = cur.read_u8()?;
            format!("({} {slot})", op.mnemonic())
        }
        Opcode::Load2 => {
            let slot = cur.read::<u16>()?;
            format!("({} {slot})", op.mnemonic())
        }
        Opcode::Add | Opcode::Subtract | Opcode::Multiply | Opcode::Divide => {
            let lhs = expr::<T>(cur)?;
            let rhs = expr::<T>(cur)?;
            format!("({} {lhs} {rhs})", op.mnemonic())
        }
        Opcode::Not => {
            let operand = expr::<T>(cur)?;
            format!("({} {operand})", op.mnemonic())
        }
        Opcode::SlotAddress => {
            let slot = cur.read_u8()?;
            format!("({} {slot})", op.mnemonic())
        }
    };

    Ok(text)
}
