//! Branch and branch-link mnemonics (spec §4.1, §4.1.1).

use crate::bits::bitfield;
use crate::condition::Condition;
use crate::error::EmitError;
use crate::label::Label;
use crate::registers::Register;
use crate::writer::Writer;

/// `b target` — unconditional branch to an absolute address, always the
/// 32-bit T4 encoding.
pub fn b(w: &mut Writer, target: u32) -> Result<(), EmitError> {
    emit_t4(w, target, false, true)
}

/// `bl target` — branch-and-link to an absolute address.
pub fn bl(w: &mut Writer, target: u32) -> Result<(), EmitError> {
    emit_t4(w, target, true, true)
}

/// `blx target` — branch-and-link to an absolute address, interworking to
/// ARM (clears bit 0 of `target`).
pub fn blx_imm(w: &mut Writer, target: u32) -> Result<(), EmitError> {
    emit_t4(w, target & !1, true, false)
}

/// `bx reg`.
pub fn bx_reg(w: &mut Writer, reg: Register) -> Result<(), EmitError> {
    w.instruction(0x4700 | ((reg.into_u32() as u16) << 3))?;
    Ok(())
}

/// `blx reg`.
pub fn blx_reg(w: &mut Writer, reg: Register) -> Result<(), EmitError> {
    w.instruction(0x4780 | ((reg.into_u32() as u16) << 3))?;
    Ok(())
}

/// `b label` — unconditional branch to a forward label, patched at flush
/// (T2, spec §4.2).
pub fn b_label(w: &mut Writer, label: Label) -> Result<(), EmitError> {
    let insn_pc = w.pc();
    let offset = w.emit_halfword(0xE000)?;
    w.reference_label(label, offset, insn_pc + 4)
}

/// `b<cond> label` — conditional branch to a forward label (T1).
pub fn b_cond_label(w: &mut Writer, cc: Condition, label: Label) -> Result<(), EmitError> {
    let insn_pc = w.pc();
    let opcode = 0xD000 | ((cc.hw_field() as u16) << 8);
    let offset = w.emit_halfword(opcode)?;
    w.reference_label(label, offset, insn_pc + 4)
}

/// `cbz reg, label`. `reg` must be a low register (R0..R7).
pub fn cbz(w: &mut Writer, reg: Register, label: Label) -> Result<(), EmitError> {
    emit_compare_branch(w, reg, label, 0xB100)
}

/// `cbnz reg, label`. `reg` must be a low register (R0..R7).
pub fn cbnz(w: &mut Writer, reg: Register, label: Label) -> Result<(), EmitError> {
    emit_compare_branch(w, reg, label, 0xB900)
}

fn emit_compare_branch(
    w: &mut Writer,
    reg: Register,
    label: Label,
    base: u16,
) -> Result<(), EmitError> {
    if !reg.is_low() {
        return Err(EmitError::OperandOutOfRange(
            "cbz/cbnz register must be r0..r7".into(),
        ));
    }
    let insn_pc = w.pc();
    let offset = w.emit_halfword(base | reg.into_u32() as u16)?;
    w.reference_label(label, offset, insn_pc + 4)
}

/// Unconditional/linked branch-to-immediate, T4 encoding (spec §4.1.1). No
/// range check is performed; see `SPEC_FULL.md`'s REDESIGN FLAGS.
fn emit_t4(w: &mut Writer, target: u32, link: bool, thumb: bool) -> Result<(), EmitError> {
    let insn_pc = w.pc();
    let distance = ((target as i64 - (insn_pc as i64 + 4)) / 2) as i32 as u32;

    let s = bitfield(distance, 24, 25);
    let j1 = !(bitfield(distance, 22, 23) ^ s) & 1;
    let j2 = !(bitfield(distance, 21, 22) ^ s) & 1;
    let imm10 = bitfield(distance, 11, 21);
    let imm11 = bitfield(distance, 0, 11);

    let hw1 = 0xF000 | (s << 10) | imm10;
    let hw2 = 0x8000 | ((link as u32) << 14) | (j1 << 13) | ((thumb as u32) << 12) | (j2 << 11) | imm11;

    w.instruction(hw1 as u16)?;
    w.instruction(hw2 as u16)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{LR, R0};

    #[test]
    fn bx_reg_encodes_register_field() {
        let mut buf = [0u8; 4];
        let mut w = Writer::new(&mut buf, 0x1000);
        bx_reg(&mut w, LR).unwrap();
        assert_eq!(u16::from_le_bytes([buf[0], buf[1]]), 0x4770);
    }

    #[test]
    fn cbz_rejects_high_register() {
        let mut buf = [0u8; 4];
        let mut w = Writer::new(&mut buf, 0x1000);
        let l = w.new_label();
        assert!(cbz(&mut w, crate::registers::R8, l).is_err());
    }

    #[test]
    fn b_label_patches_forward_reference() {
        let mut buf = [0u8; 8];
        let mut w = Writer::new(&mut buf, 0x1000);
        let l = w.new_label();
        b_label(&mut w, l).unwrap();
        w.instruction(0x46C0).unwrap();
        w.define_label(l).unwrap();
        w.flush().unwrap();
        assert_eq!(u16::from_le_bytes([buf[0], buf[1]]), 0xE001);
    }

    #[test]
    fn bl_unchecked_round_trips_small_forward_offset() {
        let mut buf = [0u8; 8];
        let mut w = Writer::new(&mut buf, 0x1000);
        bl(&mut w, 0x1100).unwrap();
        // distance = (0x1100 - 0x1004) / 2 = 0x7E
        let hw1 = u16::from_le_bytes([buf[0], buf[1]]);
        let hw2 = u16::from_le_bytes([buf[2], buf[3]]);
        assert_eq!(hw1 & 0xF800, 0xF000);
        assert_eq!(hw2 & 0xD000, 0xD000); // link + thumb bits set
        let _ = R0;
    }
}
