//! ARM condition codes used by conditional branches (spec §6).

use core::fmt;
use std::error::Error;
use std::fmt::Display;

/// A condition code for a `b<cond>` branch.
///
/// Numbered 1..14 rather than the usual 0-based ARM encoding: `cc = 1` is
/// `EQ`, `cc = 2` is `NE`, and so on up to `cc = 14` for `AL`. Index 0 is
/// reserved. [`Condition::hw_field`] converts to the real 0-based hardware
/// field the instruction encodes (`cc - 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Condition(u8);

impl Condition {
    /// Equal (`Z` set)
    pub const EQ: Self = Self(1);
    /// Not equal (`Z` clear)
    pub const NE: Self = Self(2);
    /// Carry set
    pub const CS: Self = Self(3);
    /// Carry clear
    pub const CC: Self = Self(4);
    /// Minus, negative
    pub const MI: Self = Self(5);
    /// Plus, positive or zero
    pub const PL: Self = Self(6);
    /// Overflow
    pub const VS: Self = Self(7);
    /// No overflow
    pub const VC: Self = Self(8);
    /// Unsigned higher
    pub const HI: Self = Self(9);
    /// Unsigned lower or same
    pub const LS: Self = Self(10);
    /// Signed greater than or equal
    pub const GE: Self = Self(11);
    /// Signed less than
    pub const LT: Self = Self(12);
    /// Signed greater than
    pub const GT: Self = Self(13);
    /// Signed less than or equal
    pub const LE: Self = Self(14);

    /// The hardware field this condition encodes to: `cc - 1`.
    pub(crate) const fn hw_field(self) -> u32 {
        (self.0 - 1) as u32
    }
}

#[test]
fn hw_field_matches_arm_encoding() {
    assert_eq!(Condition::EQ.hw_field(), 0b0000);
    assert_eq!(Condition::LE.hw_field(), 0b1101);
}

impl TryFrom<u8> for Condition {
    type Error = ConditionConvError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=14).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConditionConvError(value))
        }
    }
}

#[test]
fn conversions() -> Result<(), ConditionConvError> {
    assert_eq!(Condition::try_from(1)?, Condition::EQ);
    assert_eq!(Condition::try_from(14)?, Condition::LE);
    assert!(Condition::try_from(0).is_err());
    assert!(Condition::try_from(15).is_err());
    Ok(())
}

/// `Condition` conversion error: the code was not in `1..=14`.
#[derive(Debug)]
pub struct ConditionConvError(pub u8);

impl Display for ConditionConvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid condition code: {} (must be 1..=14)", self.0)
    }
}

impl Error for ConditionConvError {}
