//! Memory transfer and literal-load mnemonics (spec §4.1, §4.1.3, §4.3).

use crate::error::EmitError;
use crate::registers::{Register, SP};
use crate::writer::Writer;

/// `ldr reg, =value` — enrolls `value` into the literal pool and emits a
/// PC-relative load, narrow when `reg` is low, otherwise the T2 wide form.
pub fn ldr_literal(w: &mut Writer, reg: Register, value: u32) -> Result<(), EmitError> {
    let insn_pc = w.pc();
    let offset = if reg.is_low() {
        w.emit_halfword(0x4800 | ((reg.into_u32() as u16) << 8))?
    } else {
        let offset = w.emit_halfword(0xF8DF)?;
        w.emit_halfword((reg.into_u32() as u16) << 12)?;
        offset
    };
    w.record_literal(value, offset, insn_pc + 4)
}

/// `ldr dst, [base, #off]`.
pub fn ldr_offset(w: &mut Writer, dst: Register, base: Register, off: u32) -> Result<(), EmitError> {
    transfer(w, true, dst, base, off)
}

/// `str dst, [base, #off]`.
pub fn str_offset(w: &mut Writer, dst: Register, base: Register, off: u32) -> Result<(), EmitError> {
    transfer(w, false, dst, base, off)
}

fn transfer(
    w: &mut Writer,
    load: bool,
    dst: Register,
    base: Register,
    off: u32,
) -> Result<(), EmitError> {
    let narrow_limit = if base == SP { 1020 } else { 124 };
    let narrow = dst.is_low() && (base.is_low() || base == SP) && off % 4 == 0 && off <= narrow_limit;

    if narrow {
        let load_bit: u16 = if load { 0x0800 } else { 0 };
        let hw = if base == SP {
            0x9000 | load_bit | ((dst.into_u32() as u16) << 8) | (off / 4) as u16
        } else {
            0x6000 | load_bit | (((off / 4) as u16) << 6) | ((base.into_u32() as u16) << 3) | dst.into_u32() as u16
        };
        w.instruction(hw)?;
    } else {
        if off > 4095 {
            return Err(EmitError::OperandOutOfRange("ldr/str offset does not fit 12 bits".into()));
        }
        let load_bit: u16 = if load { 0x10 } else { 0 };
        w.instruction(0xF8C0 | load_bit | base.into_u32() as u16)?;
        w.instruction(((dst.into_u32() as u16) << 12) | off as u16)?;
    }
    Ok(())
}
