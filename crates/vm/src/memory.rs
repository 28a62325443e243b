//! Stack memory: the growable, byte-addressable operand store.
//!
//! All run-time storage lives here. Slots are plain byte offsets relative to
//! the frame base (`stack_top`, fixed at 0 — there is no call/frame support).
//! Writes grow the buffer on demand by doubling; growth zero-fills the new
//! region and preserves every previously written byte at the same offset.
//! Reads never grow.
//!
//! Materialized addresses (from `SLOT_ADDR`) are base-relative offsets, not
//! native pointers, so they stay valid when growth relocates the backing
//! buffer. Raw writes (`WRITE_U32`) resolve such an address at use time and
//! must land inside already-live memory.

use crate::error::RuntimeError;
use clusie_common::Scalar;

/// Initial capacity of a fresh stack, in bytes.
pub const DEFAULT_CAPACITY: usize = 256;

/// Hard upper bound on stack capacity, in bytes.
pub const MAX_CAPACITY: usize = 1 << 20;

/// A growable, zero-initialized byte buffer with a frame base.
#[derive(Debug)]
pub struct StackMemory {
    bytes: Vec<u8>,
    /// Base of the current addressing frame. Always 0 in this machine;
    /// kept explicit because every slot address is defined relative to it.
    stack_top: usize,
}

impl Default for StackMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl StackMemory {
    /// Allocate a stack with [`DEFAULT_CAPACITY`] zeroed bytes.
    pub fn new() -> Self {
        Self {
            bytes: vec![0; DEFAULT_CAPACITY],
            stack_top: 0,
        }
    }

    /// Current capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// The base-relative address of `slot`, as materialized by `SLOT_ADDR`.
    pub fn address_of(&self, slot: usize) -> usize {
        self.stack_top + slot
    }

    /// Read a scalar at `stack_top + offset`. Never grows.
    ///
    /// `at` is the program offset reported on failure.
    pub fn read<T: Scalar>(&self, offset: usize, at: usize) -> Result<T, RuntimeError> {
        // Saturating arithmetic: a near-usize::MAX offset must land in the
        // bounds check below, never wrap past it.
        let start = self.stack_top.saturating_add(offset);
        if start.saturating_add(T::WIDTH) > self.bytes.len() {
            return Err(RuntimeError::OutOfBoundsRead {
                at,
                offset,
                width: T::WIDTH,
                capacity: self.bytes.len(),
            });
        }
        Ok(T::from_le(&self.bytes[start..]))
    }

    /// Write a scalar at `stack_top + offset`, growing if needed.
    pub fn write<T: Scalar>(
        &mut self,
        offset: usize,
        value: T,
        at: usize,
    ) -> Result<(), RuntimeError> {
        let start = self.stack_top.saturating_add(offset);
        let required = start.saturating_add(T::WIDTH);
        if required > self.bytes.len() {
            self.grow(required, at)?;
        }
        value.write_le(&mut self.bytes[start..]);
        Ok(())
    }

    /// Write a u32 through a materialized base-relative address.
    ///
    /// Unlike [`write`](Self::write), this never grows: the address must
    /// point into live memory, otherwise it is dangling.
    pub fn write_raw(&mut self, address: u64, value: u32, at: usize) -> Result<(), RuntimeError> {
        let start = usize::try_from(address).unwrap_or(usize::MAX);
        if start.checked_add(4).is_none_or(|end| end > self.bytes.len()) {
            return Err(RuntimeError::DanglingRawWrite {
                at,
                address,
                capacity: self.bytes.len(),
            });
        }
        value.write_le(&mut self.bytes[start..]);
        Ok(())
    }

    /// Double capacity until at least `required` bytes, zero-filling the
    /// new region. Existing bytes keep their offsets.
    fn grow(&mut self, required: usize, at: usize) -> Result<(), RuntimeError> {
        if required > MAX_CAPACITY {
            return Err(RuntimeError::StackOverflow { at, required });
        }
        let mut new_capacity = self.bytes.len();
        while new_capacity < required {
            new_capacity *= 2;
        }
        self.bytes.resize(new_capacity.min(MAX_CAPACITY), 0);
        Ok(())
    }
}
