//! Clusie virtual machine — executes flat byte-encoded instruction streams.
//!
//! The VM is a byte-addressed stack machine with:
//! - A growable, zero-initialized operand stack addressed by byte slots
//! - A recursive, width-generic expression evaluator
//! - Absolute jumps with 1/2/4-byte targets and 1/2/4-byte conditions
//!
//! Malformed streams are never undefined behavior: every invalid byte,
//! truncated immediate, wild jump, zero divisor, and dangling indirect
//! write is a specific [`RuntimeError`].
//!
//! # Usage
//!
//! ```
//! use clusie_common::{Bytecode, ProgramBuilder};
//! use clusie_vm::run;
//!
//! let code = ProgramBuilder::new()
//!     .op(Bytecode::StoreU32)
//!     .slot(0)
//!     .const_u32(6)
//!     .op(Bytecode::Terminate)
//!     .finish();
//!
//! let vm = run(&code).unwrap();
//! assert_eq!(vm.read_stack::<u32>(0).unwrap(), 6);
//! ```

pub mod error;
pub mod eval;
pub mod execute;
pub mod machine;
pub mod memory;
pub mod reader;

pub use error::RuntimeError;
pub use machine::Vm;
pub use memory::{DEFAULT_CAPACITY, MAX_CAPACITY};

/// Execute a program and return the machine for stack inspection.
///
/// This is the primary entry point. The program bytes are borrowed and must
/// stay alive while the returned [`Vm`] is inspected.
///
/// # Errors
///
/// Returns [`RuntimeError`] if execution fails (invalid instruction byte,
/// truncated stream, out-of-bounds jump, division by zero, dangling raw
/// write, stack memory limit).
pub fn run(code: &[u8]) -> Result<Vm<'_>, RuntimeError> {
    let mut vm = Vm::new(code);
    vm.run()?;
    Ok(vm)
}
