//! `push`/`pop` register-set mnemonics (spec §4.1.2).

use crate::error::EmitError;
use crate::registers::{Register, LR, PC};
use crate::writer::Writer;

/// `push {regs...}`. Fails if `regs` is empty.
pub fn push(w: &mut Writer, regs: &[Register]) -> Result<(), EmitError> {
    encode(w, regs, true)
}

/// `pop {regs...}`. Fails if `regs` is empty.
pub fn pop(w: &mut Writer, regs: &[Register]) -> Result<(), EmitError> {
    encode(w, regs, false)
}

fn encode(w: &mut Writer, regs: &[Register], is_push: bool) -> Result<(), EmitError> {
    if regs.is_empty() {
        return Err(EmitError::OperandOutOfRange("register set must not be empty".into()));
    }
    let special = if is_push { LR } else { PC };
    let all_narrow_eligible = regs.iter().all(|r| r.is_low() || *r == special);

    if all_narrow_eligible {
        let mut mask: u16 = 0;
        let mut special_bit: u16 = 0;
        for r in regs {
            if *r == special {
                special_bit = 0x0100;
            } else {
                mask |= 1 << r.into_u32();
            }
        }
        let base = if is_push { 0xB400 } else { 0xBC00 };
        w.instruction(base | special_bit | mask)?;
    } else {
        let mut mask: u16 = 0;
        for r in regs {
            mask |= 1 << r.into_u32();
        }
        let base1 = if is_push { 0xE92D } else { 0xE8BD };
        w.instruction(base1)?;
        w.instruction(mask)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{R4, R5, R8};

    #[test]
    fn push_pop_low_plus_special_narrow() {
        let mut buf = [0u8; 4];
        let mut w = Writer::new(&mut buf, 0x1000);
        push(&mut w, &[R4, R5, LR]).unwrap();
        pop(&mut w, &[R4, R5, PC]).unwrap();
        assert_eq!(buf, [0x30, 0xB5, 0x30, 0xBD]);
    }

    #[test]
    fn mixed_low_and_high_uses_wide_encoding() {
        let mut buf = [0u8; 4];
        let mut w = Writer::new(&mut buf, 0x1000);
        push(&mut w, &[R4, R8]).unwrap();
        let hw1 = u16::from_le_bytes([buf[0], buf[1]]);
        assert_eq!(hw1, 0xE92D);
    }

    #[test]
    fn empty_set_fails() {
        let mut buf = [0u8; 4];
        let mut w = Writer::new(&mut buf, 0x1000);
        assert!(push(&mut w, &[]).is_err());
    }
}
