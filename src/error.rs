//! The crate-wide error type (spec §7).

use core::fmt;
use std::error::Error;
use std::fmt::Display;

/// Which bounded table a capacity failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// The label definition table (spec §3: capacity 100).
    Labels,
    /// The pending label-reference table (spec §3: capacity 300).
    LabelRefs,
    /// The pending literal-reference table (spec §3: capacity 100).
    LiteralRefs,
}

impl Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Table::Labels => write!(f, "label table"),
            Table::LabelRefs => write!(f, "label reference table"),
            Table::LiteralRefs => write!(f, "literal reference table"),
        }
    }
}

/// Every way an emitter operation can fail (spec §7).
///
/// All failures are local and recoverable: a failing operation has not
/// written anything, and the caller may retry with a different operand
/// form, split the instruction, or abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitError {
    /// A bounded table (labels, label references, or literal references) is full.
    CapacityExceeded(Table),
    /// An immediate, offset, or register class does not fit the chosen
    /// encoding. Carries a short, human-readable description of the
    /// constraint that was violated.
    OperandOutOfRange(String),
    /// [`crate::label::Label`] was already defined once before.
    DuplicateLabel,
    /// A pending label reference had no matching definition at flush time.
    /// Both fixup tables are cleared; already-emitted code is untouched.
    UnresolvedLabel,
    /// The caller-provided code buffer has no room left for the halfwords,
    /// bytes, or literal-pool slot this operation would write. Not one of
    /// the four failure kinds in spec §7 — see `SPEC_FULL.md`'s REDESIGN
    /// FLAGS for why a safe, slice-backed `Writer` needs this one too.
    BufferExhausted,
}

impl Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitError::CapacityExceeded(table) => write!(f, "{table} is full"),
            EmitError::OperandOutOfRange(why) => write!(f, "operand out of range: {why}"),
            EmitError::DuplicateLabel => write!(f, "label is already defined"),
            EmitError::UnresolvedLabel => write!(f, "referenced label was never defined"),
            EmitError::BufferExhausted => write!(f, "code buffer has no room left"),
        }
    }
}

impl Error for EmitError {}

#[test]
fn display_messages() {
    assert_eq!(
        EmitError::CapacityExceeded(Table::Labels).to_string(),
        "label table is full"
    );
    assert_eq!(EmitError::DuplicateLabel.to_string(), "label is already defined");
    assert_eq!(
        EmitError::UnresolvedLabel.to_string(),
        "referenced label was never defined"
    );
    assert_eq!(EmitError::BufferExhausted.to_string(), "code buffer has no room left");
}
