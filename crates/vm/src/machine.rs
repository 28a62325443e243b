//! VM state: stack memory, code reader, evaluator bookkeeping.

use crate::error::RuntimeError;
use crate::memory::StackMemory;
use crate::reader::CodeReader;
use clusie_common::Scalar;

/// Maximum expression nesting depth the evaluator accepts.
///
/// The evaluator recurses per operand; a hostile stream of nested ADD bytes
/// would otherwise exhaust the host call stack.
pub const MAX_EVAL_DEPTH: usize = 256;

/// The Clusie virtual machine.
///
/// Owns exactly one [`StackMemory`] for its lifetime and borrows the
/// program bytes, which must outlive it.
#[derive(Debug)]
pub struct Vm<'a> {
    pub(crate) reader: CodeReader<'a>,
    pub(crate) memory: StackMemory,
    pub(crate) eval_depth: usize,
}

impl<'a> Vm<'a> {
    /// Create a VM over a borrowed program byte stream.
    pub fn new(code: &'a [u8]) -> Self {
        Self {
            reader: CodeReader::new(code),
            memory: StackMemory::new(),
            eval_depth: 0,
        }
    }

    /// Current instruction pointer.
    pub fn ip(&self) -> usize {
        self.reader.ip()
    }

    /// Rewind the instruction pointer to 0.
    ///
    /// Stack memory is neither cleared nor resized: values written by a
    /// prior run stay observable until overwritten. This supports tight
    /// re-run loops without reallocation.
    pub fn reset(&mut self) {
        self.reader.rewind();
        self.eval_depth = 0;
    }

    /// Inspect stack memory at a byte offset relative to the frame base.
    pub fn read_stack<T: Scalar>(&self, offset: usize) -> Result<T, RuntimeError> {
        self.memory.read(offset, self.reader.ip())
    }

    /// Current stack memory capacity in bytes.
    pub fn stack_capacity(&self) -> usize {
        self.memory.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::DEFAULT_CAPACITY;

    #[test]
    fn fresh_vm_state() {
        let code = [0u8];
        let vm = Vm::new(&code);
        assert_eq!(vm.ip(), 0);
        assert_eq!(vm.stack_capacity(), DEFAULT_CAPACITY);
        assert_eq!(vm.read_stack::<u32>(0).unwrap(), 0);
    }

    #[test]
    fn read_stack_is_bounds_checked() {
        let code = [0u8];
        let vm = Vm::new(&code);
        assert!(vm.read_stack::<u32>(DEFAULT_CAPACITY).is_err());
    }

    #[test]
    fn read_stack_at_huge_offset_is_out_of_bounds() {
        // Reachable from the CLI via `--read u32@<huge>`; must be an
        // error, not an arithmetic overflow.
        let code = [0u8];
        let vm = Vm::new(&code);
        let err = vm.read_stack::<u32>(usize::MAX - 1).unwrap_err();
        assert!(matches!(
            err,
            crate::error::RuntimeError::OutOfBoundsRead {
                offset,
                ..
            } if offset == usize::MAX - 1
        ));
    }

    #[test]
    fn vm_state_is_debug_printable() {
        let code = [0u8];
        let vm = Vm::new(&code);
        let dump = format!("{vm:?}");
        assert!(dump.contains("Vm"));
    }
}
