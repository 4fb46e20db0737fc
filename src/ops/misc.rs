//! `nop`, `bkpt`, and the OS-aware `breakpoint` helper (spec §4.1, §6).

use crate::error::EmitError;
use crate::ops::branch;
use crate::registers::LR;
use crate::target_os::TargetOs;
use crate::writer::Writer;

/// `nop`, encoded as `mov r8, r8`.
pub fn nop(w: &mut Writer) -> Result<(), EmitError> {
    w.instruction(0x46C0)?;
    Ok(())
}

/// `bkpt #imm`.
pub fn bkpt(w: &mut Writer, imm: u8) -> Result<(), EmitError> {
    w.instruction(0xBE00 | imm as u16)?;
    Ok(())
}

/// `breakpoint` — the kernel trap on Linux/Android, otherwise `bkpt #0; bx lr`.
pub fn breakpoint(w: &mut Writer) -> Result<(), EmitError> {
    match w.target_os() {
        TargetOs::Linux | TargetOs::Android => {
            w.instruction(0xDE01)?;
            Ok(())
        }
        TargetOs::Other => {
            bkpt(w, 0)?;
            branch::bx_reg(w, LR)
        }
    }
}
