//! Dispatcher-level instruction table.
//!
//! A Clusie program is a flat byte stream. The first byte of every
//! instruction comes from this table; operand bytes (slot offsets, jump
//! targets, nested expressions) follow immediately after, little-endian.
//!
//! This table is distinct from [`Opcode`](crate::Opcode): bytecode
//! instructions are consumed by the dispatcher, opcodes by the expression
//! evaluator. The two never appear at the same stream position, so their
//! byte values may overlap freely.

use crate::error::DecodeError;

/// A top-level, potentially side-effecting instruction.
///
/// Jump targets are absolute byte offsets into the program. The
/// `UJmpAbs`/`CJmpAbs` suffix (`2`, `4`) selects the width of the target
/// immediate; the `C2`/`C4` prefix selects the width of the condition
/// expression.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bytecode {
    /// Halt the run loop.
    Terminate = 0,
    /// Store a u32 expression result at a u8 slot offset.
    StoreU32 = 1,
    /// Store a pointer-width expression result at a u8 slot offset.
    StorePtr = 2,
    /// Evaluate a pointer expression then a u32 expression; write the u32
    /// through the materialized address.
    WriteU32 = 3,

    /// Unconditional jump, u8 target.
    UJmpAbs = 4,
    /// Unconditional jump, u16 target.
    UJmpAbs2 = 5,
    /// Unconditional jump, u32 target.
    UJmpAbs4 = 6,

    /// Conditional jump, u8 target, u8 condition.
    CJmpAbs = 7,
    /// Conditional jump, u16 target, u8 condition.
    CJmpAbs2 = 8,
    /// Conditional jump, u32 target, u8 condition.
    CJmpAbs4 = 9,

    /// Conditional jump, u8 target, u16 condition.
    C2JmpAbs = 10,
    /// Conditional jump, u16 target, u16 condition.
    C2JmpAbs2 = 11,
    /// Conditional jump, u32 target, u16 condition.
    C2JmpAbs4 = 12,

    /// Conditional jump, u8 target, u32 condition.
    C4JmpAbs = 13,
    /// Conditional jump, u16 target, u32 condition.
    C4JmpAbs2 = 14,
    /// Conditional jump, u32 target, u32 condition.
    C4JmpAbs4 = 15,
}

/// All valid bytecode instructions, in discriminant order.
pub const ALL_BYTECODES: [Bytecode; 16] = [
    Bytecode::Terminate,
    Bytecode::StoreU32,
    Bytecode::StorePtr,
    Bytecode::WriteU32,
    Bytecode::UJmpAbs,
    Bytecode::UJmpAbs2,
    Bytecode::UJmpAbs4,
    Bytecode::CJmpAbs,
    Bytecode::CJmpAbs2,
    Bytecode::CJmpAbs4,
    Bytecode::C2JmpAbs,
    Bytecode::C2JmpAbs2,
    Bytecode::C2JmpAbs4,
    Bytecode::C4JmpAbs,
    Bytecode::C4JmpAbs2,
    Bytecode::C4JmpAbs4,
];

impl TryFrom<u8> for Bytecode {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Bytecode::Terminate),
            1 => Ok(Bytecode::StoreU32),
            2 => Ok(Bytecode::StorePtr),
            3 => Ok(Bytecode::WriteU32),
            4 => Ok(Bytecode::UJmpAbs),
            5 => Ok(Bytecode::UJmpAbs2),
            6 => Ok(Bytecode::UJmpAbs4),
            7 => Ok(Bytecode::CJmpAbs),
            8 => Ok(Bytecode::CJmpAbs2),
            9 => Ok(Bytecode::CJmpAbs4),
            10 => Ok(Bytecode::C2JmpAbs),
            11 => Ok(Bytecode::C2JmpAbs2),
            12 => Ok(Bytecode::C2JmpAbs4),
            13 => Ok(Bytecode::C4JmpAbs),
            14 => Ok(Bytecode::C4JmpAbs2),
            15 => Ok(Bytecode::C4JmpAbs4),
            _ => Err(DecodeError::UnknownBytecode(value)),
        }
    }
}

impl Bytecode {
    /// Returns the assembly mnemonic for this instruction.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Bytecode::Terminate => "TERMINATE",
            Bytecode::StoreU32 => "STORE_U32",
            Bytecode::StorePtr => "STORE_PTR",
            Bytecode::WriteU32 => "WRITE_U32",
            Bytecode::UJmpAbs => "UJMP_ABS",
            Bytecode::UJmpAbs2 => "UJMP_ABS2",
            Bytecode::UJmpAbs4 => "UJMP_ABS4",
            Bytecode::CJmpAbs => "CJMP_ABS",
            Bytecode::CJmpAbs2 => "CJMP_ABS2",
            Bytecode::CJmpAbs4 => "CJMP_ABS4",
            Bytecode::C2JmpAbs => "C2JMP_ABS",
            Bytecode::C2JmpAbs2 => "C2JMP_ABS2",
            Bytecode::C2JmpAbs4 => "C2JMP_ABS4",
            Bytecode::C4JmpAbs => "C4JMP_ABS",
            Bytecode::C4JmpAbs2 => "C4JMP_ABS2",
            Bytecode::C4JmpAbs4 => "C4JMP_ABS4",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_bytecodes_count() {
        assert_eq!(ALL_BYTECODES.len(), 16);
    }

    #[test]
    fn roundtrip_all_valid_bytecodes() {
        for &bc in &ALL_BYTECODES {
            let byte = bc as u8;
            let decoded = Bytecode::try_from(byte).unwrap();
            assert_eq!(bc, decoded, "roundtrip failed for {bc:?} ({byte:#04x})");
        }
    }

    #[test]
    fn rejects_bytes_past_table() {
        for byte in 16..=255u8 {
            assert_eq!(
                Bytecode::try_from(byte),
                Err(DecodeError::UnknownBytecode(byte)),
                "byte {byte:#04x} should be rejected"
            );
        }
    }

    #[test]
    fn terminate_is_zero() {
        assert_eq!(Bytecode::Terminate as u8, 0);
    }

    #[test]
    fn mnemonics_nonempty_uppercase() {
        for &bc in &ALL_BYTECODES {
            let m = bc.mnemonic();
            assert!(!m.is_empty(), "empty mnemonic for {bc:?}");
            assert_eq!(m, m.to_uppercase(), "mnemonic should be uppercase: {m}");
        }
    }
}
