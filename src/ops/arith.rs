//! `add`/`sub`/`cmp` arithmetic mnemonics (spec §4.1.4).

use crate::bits::u32_fits_unsigned;
use crate::error::EmitError;
use crate::registers::{Register, SP};
use crate::writer::Writer;

/// `cmp reg, #imm`. `reg` must be a low register.
pub fn cmp_reg_imm8(w: &mut Writer, reg: Register, imm: u8) -> Result<(), EmitError> {
    if !reg.is_low() {
        return Err(EmitError::OperandOutOfRange("cmp immediate form needs a low register".into()));
    }
    w.instruction(0x2800 | ((reg.into_u32() as u16) << 8) | imm as u16)?;
    Ok(())
}

/// `add reg, #imm` (signed). For `sp` the immediate must be a multiple of
/// 4; for any other register it must fit 8 bits in magnitude.
pub fn add_reg_imm(w: &mut Writer, reg: Register, imm: i32) -> Result<(), EmitError> {
    let hw = if reg == SP {
        if imm % 4 != 0 {
            return Err(EmitError::OperandOutOfRange("add sp, #imm requires a multiple of 4".into()));
        }
        let magnitude = imm.unsigned_abs() / 4;
        if !u32_fits_unsigned(magnitude, 7) {
            return Err(EmitError::OperandOutOfRange("add sp, #imm magnitude too large".into()));
        }
        0xB000 | (((imm < 0) as u16) << 7) | magnitude as u16
    } else {
        if !reg.is_low() {
            return Err(EmitError::OperandOutOfRange("add reg, #imm needs a low register".into()));
        }
        let magnitude = imm.unsigned_abs();
        if !u32_fits_unsigned(magnitude, 8) {
            return Err(EmitError::OperandOutOfRange("add reg, #imm magnitude does not fit 8 bits".into()));
        }
        0x3000 | (((imm < 0) as u16) << 11) | ((reg.into_u32() as u16) << 8) | magnitude as u16
    };
    w.instruction(hw)?;
    Ok(())
}

/// `sub reg, #imm` is `add reg, #-imm`.
pub fn sub_reg_imm(w: &mut Writer, reg: Register, imm: i32) -> Result<(), EmitError> {
    add_reg_imm(w, reg, -imm)
}

/// `add dst, dst, src` (two-operand form, delegates to the three-op form).
pub fn add_reg_reg(w: &mut Writer, dst: Register, src: Register) -> Result<(), EmitError> {
    add_reg_reg_reg(w, dst, dst, src)
}

/// `sub dst, dst, src`.
pub fn sub_reg_reg(w: &mut Writer, dst: Register, src: Register) -> Result<(), EmitError> {
    sub_reg_reg_reg(w, dst, dst, src)
}

/// `add dst, left, right` (all registers).
pub fn add_reg_reg_reg(
    w: &mut Writer,
    dst: Register,
    left: Register,
    right: Register,
) -> Result<(), EmitError> {
    let hw = if left == dst {
        let dst_hi = if dst.into_u32() >= 8 { 0x80 } else { 0 };
        0x4400 | dst_hi | ((right.into_u32() as u16) << 3) | dst.low3() as u16
    } else {
        if !(dst.is_low() && left.is_low() && right.is_low()) {
            return Err(EmitError::OperandOutOfRange(
                "add dst, left, right needs low registers unless left == dst".into(),
            ));
        }
        0x1800 | ((right.into_u32() as u16) << 6) | ((left.into_u32() as u16) << 3) | dst.into_u32() as u16
    };
    w.instruction(hw)?;
    Ok(())
}

/// `sub dst, left, right` (low registers only).
pub fn sub_reg_reg_reg(
    w: &mut Writer,
    dst: Register,
    left: Register,
    right: Register,
) -> Result<(), EmitError> {
    if !(dst.is_low() && left.is_low() && right.is_low()) {
        return Err(EmitError::OperandOutOfRange("sub dst, left, right needs low registers".into()));
    }
    let hw = 0x1A00 | ((right.into_u32() as u16) << 6) | ((left.into_u32() as u16) << 3) | dst.into_u32() as u16;
    w.instruction(hw)?;
    Ok(())
}

/// `add dst, left, #imm`.
pub fn add_reg_reg_imm(
    w: &mut Writer,
    dst: Register,
    left: Register,
    imm: i32,
) -> Result<(), EmitError> {
    if left == dst {
        return add_reg_imm(w, dst, imm);
    }
    let hw = if (left == SP || left == crate::registers::PC) && imm >= 0 && imm % 4 == 0 {
        let magnitude = (imm as u32) / 4;
        if !dst.is_low() || !u32_fits_unsigned(magnitude, 8) {
            return Err(EmitError::OperandOutOfRange(
                "add dst, sp/pc, #imm needs a low dst and imm/4 fitting 8 bits".into(),
            ));
        }
        let sp_bit = if left == SP { 0x0800 } else { 0 };
        0xA000 | sp_bit | ((dst.into_u32() as u16) << 8) | magnitude as u16
    } else {
        if !u32_fits_unsigned(imm.unsigned_abs(), 3) || !(dst.is_low() && left.is_low()) {
            return Err(EmitError::OperandOutOfRange(
                "add dst, left, #imm needs low registers and |imm| <= 7".into(),
            ));
        }
        let magnitude = imm.unsigned_abs();
        0x1C00 | (((imm < 0) as u16) << 9) | ((magnitude as u16) << 6) | ((left.into_u32() as u16) << 3) | dst.into_u32() as u16
    };
    w.instruction(hw)?;
    Ok(())
}

/// `sub dst, left, #imm` is `add dst, left, #-imm`.
pub fn sub_reg_reg_imm(
    w: &mut Writer,
    dst: Register,
    left: Register,
    imm: i32,
) -> Result<(), EmitError> {
    add_reg_reg_imm(w, dst, left, -imm)
}
