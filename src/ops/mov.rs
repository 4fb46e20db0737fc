//! `mov` mnemonics (spec §4.1).

use crate::error::EmitError;
use crate::registers::Register;
use crate::writer::Writer;

/// `mov dst, src`. Both low: T1 `adds dst, src, #0`. Otherwise the
/// high-register T1 `mov` form.
pub fn mov_reg_reg(w: &mut Writer, dst: Register, src: Register) -> Result<(), EmitError> {
    let hw = if dst.is_low() && src.is_low() {
        0x1C00 | ((src.into_u32() as u16) << 3) | dst.into_u32() as u16
    } else {
        let dst_hi = if dst.into_u32() >= 8 { 0x80 } else { 0 };
        0x4600 | dst_hi | ((src.into_u32() as u16) << 3) | dst.low3() as u16
    };
    w.instruction(hw)?;
    Ok(())
}

/// `mov reg, #imm`. `reg` must be a low register.
pub fn mov_reg_imm8(w: &mut Writer, reg: Register, imm: u8) -> Result<(), EmitError> {
    if !reg.is_low() {
        return Err(EmitError::OperandOutOfRange("mov immediate form needs a low register".into()));
    }
    w.instruction(0x2000 | ((reg.into_u32() as u16) << 8) | imm as u16)?;
    Ok(())
}
