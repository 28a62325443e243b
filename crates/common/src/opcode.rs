//! Evaluator-level opcode table.
//!
//! These opcodes form the value-producing expression sub-language. An
//! expression is encoded prefix-style: the opcode byte comes first, operand
//! expressions follow recursively. The result width of an expression is not
//! encoded anywhere in the stream; it is fixed by the bytecode instruction
//! that requested evaluation.

use crate::error::DecodeError;

/// A value-producing operation.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// An immediate: the next `width` bytes of the stream, little-endian.
    Constant = 0,
    /// Read from the stack slot named by the next u8 byte.
    Load = 1,
    /// Read from the stack slot named by the next u16 immediate.
    Load2 = 2,
    /// Left operand plus right operand (wrapping).
    Add = 3,
    /// Left operand minus right operand (wrapping).
    Subtract = 4,
    /// Left operand times right operand (wrapping).
    Multiply = 5,
    /// Left operand divided by right operand. Zero divisor is a runtime error.
    Divide = 6,
    /// Logical negation: nonzero becomes 0, zero becomes 1.
    Not = 7,
    /// The address of the stack slot named by the next u8 byte, as a value.
    SlotAddress = 8,
}

/// All valid opcodes, in discriminant order.
pub const ALL_OPCODES: [Opcode; 9] = [
    Opcode::Constant,
    Opcode::Load,
    Opcode::Load2,
    Opcode::Add,
    Opcode::Subtract,
    Opcode::Multiply,
    Opcode::Divide,
    Opcode::Not,
    Opcode::SlotAddress,
];

impl TryFrom<u8> for Opcode {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Opcode::Constant),
            1 => Ok(Opcode::Load),
            2 => Ok(Opcode::Load2),
            3 => Ok(Opcode::Add),
            4 => Ok(Opcode::Subtract),
            5 => Ok(Opcode::Multiply),
            6 => Ok(Opcode::Divide),
            7 => Ok(Opcode::Not),
            8 => Ok(Opcode::SlotAddress),
            _ => Err(DecodeError::UnknownOpcode(value)),
        }
    }
}

impl Opcode {
    /// Returns the assembly mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Constant => "CONST",
            Opcode::Load => "LOAD",
            Opcode::Load2 => "LOAD2",
            Opcode::Add => "ADD",
            Opcode::Subtract => "SUB",
            Opcode::Multiply => "MUL",
            Opcode::Divide => "DIV",
            Opcode::Not => "NOT",
            Opcode::SlotAddress => "SLOT_ADDR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_opcodes_count() {
        assert_eq!(ALL_OPCODES.len(), 9);
    }

    #[test]
    fn roundtrip_all_valid_opcodes() {
        for &op in &ALL_OPCODES {
            let byte = op as u8;
            let decoded = Opcode::try_from(byte).unwrap();
            assert_eq!(op, decoded, "roundtrip failed for {op:?} ({byte:#04x})");
        }
    }

    #[test]
    fn rejects_bytes_past_table() {
        for byte in 9..=255u8 {
            assert_eq!(Opcode::try_from(byte), Err(DecodeError::UnknownOpcode(byte)));
        }
    }

    #[test]
    fn tables_overlap_is_allowed() {
        // Opcode::Constant and Bytecode::Terminate share byte value 0.
        // They are consumed at different stream positions, never ambiguously.
        assert_eq!(Opcode::Constant as u8, crate::Bytecode::Terminate as u8);
    }
}
