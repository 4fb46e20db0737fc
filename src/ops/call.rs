//! High-level AAPCS call helpers (spec §4.1.5).

use crate::error::EmitError;
use crate::ops::{branch, mem, mov, stack};
use crate::registers::{Register, LR, R0, R1, R2, R3};
use crate::writer::Writer;

/// One argument to [`call_address`]/[`call_register`]: either an absolute
/// address to materialize, or a register already holding the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallArg {
    /// An absolute address, loaded through the literal pool.
    Address(u32),
    /// A register already holding the argument value.
    Register(Register),
}

/// Loads `target` into `lr` and calls it: `ldr lr, =target; blx lr`.
pub fn call_address(w: &mut Writer, target: u32, args: &[CallArg]) -> Result<(), EmitError> {
    materialize_args(w, args)?;
    mem::ldr_literal(w, LR, target)?;
    branch::blx_reg(w, LR)
}

/// Calls through a register already holding the target: `blx reg`.
pub fn call_register(w: &mut Writer, reg: Register, args: &[CallArg]) -> Result<(), EmitError> {
    materialize_args(w, args)?;
    branch::blx_reg(w, reg)
}

/// Materializes `args` right-to-left: the first four land in R0..R3, the
/// rest are pushed one register at a time. Post-call stack cleanup is not
/// emitted.
fn materialize_args(w: &mut Writer, args: &[CallArg]) -> Result<(), EmitError> {
    const ARG_REGS: [Register; 4] = [R0, R1, R2, R3];
    for (i, arg) in args.iter().enumerate().rev() {
        if i < 4 {
            let target_reg = ARG_REGS[i];
            match arg {
                CallArg::Address(addr) => mem::ldr_literal(w, target_reg, *addr)?,
                CallArg::Register(r) if *r == target_reg => {}
                CallArg::Register(r) => mov::mov_reg_reg(w, target_reg, *r)?,
            }
        } else {
            match arg {
                CallArg::Address(addr) => {
                    mem::ldr_literal(w, R0, *addr)?;
                    stack::push(w, &[R0])?;
                }
                CallArg::Register(r) => stack::push(w, &[*r])?,
            }
        }
    }
    Ok(())
}
