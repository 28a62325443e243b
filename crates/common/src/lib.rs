//! Clusie common types: instruction tables, encoding, and disassembly.
//!
//! This crate provides the foundational pieces shared by the VM and the CLI:
//!
//! - [`Bytecode`] — the dispatcher-level instruction table
//! - [`Opcode`] — the evaluator-level expression table
//! - [`Scalar`] — the fixed-width operand abstraction (u8/u16/u32/u64)
//! - [`ProgramBuilder`] — fluent construction of flat byte programs
//! - [`disassemble`] — byte stream to readable text
//! - [`DecodeError`] — errors from decoding byte streams
//!
//! The two instruction tables share byte values but never a stream
//! position: the dispatcher reads [`Bytecode`] bytes, and only the
//! expression evaluator reads [`Opcode`] bytes.

pub mod builder;
pub mod bytecode;
pub mod disasm;
pub mod error;
pub mod opcode;
pub mod scalar;

// Re-export commonly used items at the crate root.
pub use builder::ProgramBuilder;
pub use bytecode::Bytecode;
pub use disasm::disassemble;
pub use error::DecodeError;
pub use opcode::Opcode;
pub use scalar::{Ptr, Scalar};

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy that generates a random valid Bytecode.
    fn arb_bytecode() -> impl Strategy<Value = Bytecode> {
        prop::sample::select(&bytecode::ALL_BYTECODES[..])
    }

    /// Strategy that generates a random valid Opcode.
    fn arb_opcode() -> impl Strategy<Value = Opcode> {
        prop::sample::select(&opcode::ALL_OPCODES[..])
    }

    proptest! {
        /// Every valid table entry survives a byte roundtrip.
        #[test]
        fn bytecode_byte_roundtrip(bc in arb_bytecode()) {
            prop_assert_eq!(Bytecode::try_from(bc as u8), Ok(bc));
        }

        #[test]
        fn opcode_byte_roundtrip(op in arb_opcode()) {
            prop_assert_eq!(Opcode::try_from(op as u8), Ok(op));
        }

        /// Scalar encode/decode roundtrips at every width.
        #[test]
        fn scalar_roundtrip_u32(value in any::<u32>()) {
            let mut buf = [0u8; 4];
            value.write_le(&mut buf);
            prop_assert_eq!(<u32 as Scalar>::from_le(&buf), value);
        }

        #[test]
        fn scalar_roundtrip_u64(value in any::<u64>()) {
            let mut buf = [0u8; 8];
            value.write_le(&mut buf);
            prop_assert_eq!(<u64 as Scalar>::from_le(&buf), value);
        }

        /// Any store of a constant built by the builder disassembles cleanly.
        #[test]
        fn built_store_always_disassembles(slot in any::<u8>(), value in any::<u32>()) {
            let code = ProgramBuilder::new()
                .op(Bytecode::StoreU32)
                .slot(slot)
                .const_u32(value)
                .op(Bytecode::Terminate)
                .finish();
            let text = disassemble(&code).unwrap();
            let expected = format!("STORE_U32 {slot} (CONST {value})");
            prop_assert!(text.contains(&expected));
        }
    }
}
