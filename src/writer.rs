//! The `Writer`: cursor, program-counter mirror, and the two fixup tables
//! (spec §3/§4.4).

use crate::bits::write_u16_le;
use crate::error::EmitError;
use crate::label::{Label, LabelTable};
use crate::literal_pool::LiteralPool;
use crate::target_os::TargetOs;

/// Streaming Thumb/Thumb-2 emitter over a caller-borrowed code buffer.
///
/// A `Writer` owns nothing but the buffer it borrows and its two bounded
/// fixup tables; it is not `Send`/`Sync` and is meant to be used from a
/// single thread for the lifetime of one code region.
pub struct Writer<'a> {
    buf: &'a mut [u8],
    base: u32,
    cursor: usize,
    pc: u32,
    target_os: TargetOs,
    next_label: u32,
    labels: LabelTable,
    literals: LiteralPool,
}

impl<'a> Writer<'a> {
    /// Borrows `buf` and resets it to start emitting at `address`.
    pub fn new(buf: &'a mut [u8], address: u32) -> Self {
        let mut writer = Self {
            buf,
            base: address,
            cursor: 0,
            pc: address,
            target_os: TargetOs::default(),
            next_label: 0,
            labels: LabelTable::new(),
            literals: LiteralPool::new(),
        };
        writer.reset(address);
        writer
    }

    /// Alias for [`Writer::new`]; the tables are allocated once either way.
    pub fn init(buf: &'a mut [u8], address: u32) -> Self {
        Self::new(buf, address)
    }

    /// Re-initializes the cursor, `pc`, and both fixup tables to start a
    /// fresh code region at `address`. Buffer contents below the new
    /// cursor are logically undefined.
    pub fn reset(&mut self, address: u32) {
        self.base = address;
        self.cursor = 0;
        self.pc = address;
        self.target_os = TargetOs::host();
        self.next_label = 0;
        self.labels.reset();
        self.literals.reset();
    }

    /// Flushes, then empties both fixup tables (including label
    /// definitions) so the `Writer` can be dropped or reused from scratch.
    pub fn clear(&mut self) -> Result<(), EmitError> {
        self.flush()?;
        self.labels.reset();
        self.literals.reset();
        Ok(())
    }

    /// Overrides the OS tag used by [`crate::ops::misc::breakpoint`] for
    /// subsequent emissions only.
    pub fn set_target_os(&mut self, os: TargetOs) {
        self.target_os = os;
    }

    /// The current virtual address the cursor points at.
    pub fn cur(&self) -> u32 {
        self.pc
    }

    /// Bytes written since the last `reset`.
    pub fn offset(&self) -> usize {
        self.cursor
    }

    /// Advances the cursor and `pc` by `n` bytes without writing. `n` need
    /// not be a multiple of 2; that is the caller's responsibility.
    pub fn skip(&mut self, n: usize) -> Result<(), EmitError> {
        if self.cursor + n > self.buf.len() {
            return Err(EmitError::BufferExhausted);
        }
        self.cursor += n;
        self.pc += n as u32;
        Ok(())
    }

    /// Mints a fresh, never-before-seen forward-branch target.
    pub fn new_label(&mut self) -> Label {
        let label = Label(self.next_label);
        self.next_label += 1;
        label
    }

    /// Records `label`'s address as the current `pc`. Fails on a repeat
    /// definition or a full label table (spec §4.2).
    pub fn define_label(&mut self, label: Label) -> Result<(), EmitError> {
        self.labels.define(label, self.pc)
    }

    /// Resolves every pending label reference and literal-pool load
    /// against their definitions/values, in that order (spec §4.2 then
    /// §4.3). Idempotent when both fixup tables are already empty.
    pub fn flush(&mut self) -> Result<(), EmitError> {
        self.labels.flush(self.buf)?;
        self.literals.flush(self.buf, &mut self.cursor, &mut self.pc, self.base)?;
        Ok(())
    }

    /// Emits a raw halfword, little-endian, and returns the byte offset it
    /// was written at (used by callers that must record a fixup against
    /// it).
    pub fn instruction(&mut self, hw: u16) -> Result<usize, EmitError> {
        let offset = self.cursor;
        if offset + 2 > self.buf.len() {
            return Err(EmitError::BufferExhausted);
        }
        write_u16_le(self.buf, offset, hw);
        self.cursor += 2;
        self.pc += 2;
        Ok(offset)
    }

    /// Copies `data` verbatim into the code stream. `data.len()` must be
    /// even.
    pub fn bytes(&mut self, data: &[u8]) -> Result<(), EmitError> {
        if data.len() % 2 != 0 {
            return Err(EmitError::OperandOutOfRange(
                "raw byte sequence length must be even".into(),
            ));
        }
        if self.cursor + data.len() > self.buf.len() {
            return Err(EmitError::BufferExhausted);
        }
        self.buf[self.cursor..self.cursor + data.len()].copy_from_slice(data);
        self.cursor += data.len();
        self.pc += data.len() as u32;
        Ok(())
    }

    pub(crate) fn pc(&self) -> u32 {
        self.pc
    }

    pub(crate) fn target_os(&self) -> TargetOs {
        self.target_os
    }

    pub(crate) fn emit_halfword(&mut self, hw: u16) -> Result<usize, EmitError> {
        self.instruction(hw)
    }

    pub(crate) fn reference_label(
        &mut self,
        label: Label,
        insn_offset: usize,
        pc_at_fixup: u32,
    ) -> Result<(), EmitError> {
        self.labels.reference(label, insn_offset, pc_at_fixup)
    }

    pub(crate) fn record_literal(
        &mut self,
        value: u32,
        insn_offset: usize,
        pc_at_fixup: u32,
    ) -> Result<(), EmitError> {
        self.literals.record(value, insn_offset, pc_at_fixup)
    }
}
