//! ARM Thumb register definitions.
//!
//! The register lookup table is, per the module's own scope note, normally
//! an external collaborator supplied by the surrounding instrumentation
//! framework. Nothing else in this crate's dependency graph provides one,
//! so it is reproduced here: sixteen registers, the low/high split that
//! narrow encodings care about, and the three special aliases (`SP`, `LR`,
//! `PC`) that several encodings treat differently from a plain high
//! register.

use core::fmt;
use std::error::Error;
use std::fmt::Display;

/// Number of addressable Thumb registers (`r0`..`r15`).
pub const NUMBER_OF_REGISTERS: usize = 16;

/// General-purpose register 0
pub const R0: Register = Register(0);
/// General-purpose register 1
pub const R1: Register = Register(1);
/// General-purpose register 2
pub const R2: Register = Register(2);
/// General-purpose register 3
pub const R3: Register = Register(3);
/// General-purpose register 4
pub const R4: Register = Register(4);
/// General-purpose register 5
pub const R5: Register = Register(5);
/// General-purpose register 6
pub const R6: Register = Register(6);
/// General-purpose register 7
pub const R7: Register = Register(7);
/// General-purpose register 8
pub const R8: Register = Register(8);
/// General-purpose register 9
pub const R9: Register = Register(9);
/// General-purpose register 10
pub const R10: Register = Register(10);
/// General-purpose register 11
pub const R11: Register = Register(11);
/// General-purpose register 12
pub const R12: Register = Register(12);
/// Stack pointer, `r13`
pub const SP: Register = Register(13);
/// Link register, `r14`
pub const LR: Register = Register(14);
/// Program counter, `r15`
pub const PC: Register = Register(15);

/// The class of a register relevant to Thumb's narrow/wide encoding split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegClass {
    /// `r0`..`r7`, addressable with a 3-bit field in narrow encodings.
    Low,
    /// `r8`..`r12`, only reachable through high-register forms.
    High,
    /// The stack pointer, `r13`.
    Sp,
    /// The link register, `r14`.
    Lr,
    /// The program counter, `r15`.
    Pc,
}

/// An ARM register, `r0`..`r15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register(u8);

impl Register {
    const NBITS: usize = 4;

    /// This register's index, `0..=15`.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Whether this register is addressable with a 3-bit low-register field.
    #[must_use]
    pub const fn is_low(self) -> bool {
        self.0 < 8
    }

    /// This register's [`RegClass`].
    #[must_use]
    pub const fn class(self) -> RegClass {
        match self.0 {
            0..=7 => RegClass::Low,
            8..=12 => RegClass::High,
            13 => RegClass::Sp,
            14 => RegClass::Lr,
            _ => RegClass::Pc,
        }
    }

    /// This register's index modulo 8, as used in the 3-bit field of
    /// high-register encodings (spec §6: "Indices for R8..R12 in
    /// high-register encodings are taken modulo 8").
    pub(crate) const fn low3(self) -> u8 {
        self.0 & 0b111
    }

    pub(crate) const fn into_u32(self) -> u32 {
        self.0 as u32
    }
}

#[test]
fn into_u32() {
    assert_eq!(R8.into_u32(), 8);
}

#[test]
fn class_boundaries() {
    assert_eq!(R7.class(), RegClass::Low);
    assert_eq!(R8.class(), RegClass::High);
    assert_eq!(R12.class(), RegClass::High);
    assert_eq!(SP.class(), RegClass::Sp);
    assert_eq!(LR.class(), RegClass::Lr);
    assert_eq!(PC.class(), RegClass::Pc);
}

#[test]
fn low3_wraps_high_registers() {
    assert_eq!(R8.low3(), 0);
    assert_eq!(R12.low3(), 4);
}

impl Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            13 => write!(f, "sp"),
            14 => write!(f, "lr"),
            15 => write!(f, "pc"),
            n => write!(f, "r{n}"),
        }
    }
}

#[test]
fn register_display() {
    assert_eq!(R0.to_string(), "r0");
    assert_eq!(R12.to_string(), "r12");
    assert_eq!(SP.to_string(), "sp");
    assert_eq!(LR.to_string(), "lr");
    assert_eq!(PC.to_string(), "pc");
}

impl TryFrom<u8> for Register {
    type Error = RegisterConvError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (value as usize) < NUMBER_OF_REGISTERS {
            Ok(Self(value))
        } else {
            Err(RegisterConvError(value))
        }
    }
}

#[test]
fn conversions_from() -> Result<(), RegisterConvError> {
    assert_eq!(Register::try_from(15u8)?, PC);
    assert!(matches!(Register::try_from(16u8), Err(RegisterConvError(16))));
    Ok(())
}

impl From<Register> for u8 {
    fn from(r: Register) -> Self {
        r.0
    }
}

/// `Register` conversion error: the index did not fit in `0..16`.
#[derive(Debug)]
pub struct RegisterConvError(pub u8);

impl Display for RegisterConvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}-bit register index: {}", Register::NBITS, self.0)
    }
}

impl Error for RegisterConvError {}

#[test]
fn conv_error_display() {
    assert_eq!(
        Register::try_from(20u8).unwrap_err().to_string(),
        "invalid 4-bit register index: 20"
    );
}
