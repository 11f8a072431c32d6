use std::fmt;

use crate::grid::GridKind;

/// Why an interface could not be built.
#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceError {
    /// The grid kind has no slot grid a pattern could describe.
    UnsupportedGridKind(GridKind),
    /// No generic grid kind has this many slots.
    InvalidSlotCount(usize),
    /// Pattern row count differs from the grid kind's.
    RowCount { found: usize, expected: usize },
    /// A pattern row has the wrong length (row is 0-based).
    ColumnCount { row: usize, found: usize, expected: usize },
    /// A pattern character has no mask or slot binding.
    UnboundCharacter(char),
    /// A mask or slot binding is not used by the pattern.
    UnusedBinding(char),
}

impl fmt::Display for InterfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedGridKind(kind) => write!(f, "unsupported grid kind: {kind}"),
            Self::InvalidSlotCount(slots) => write!(f, "invalid number of slots: {slots}"),
            Self::RowCount { found, expected } => {
                write!(f, "invalid number of rows in pattern: found {found} but expected {expected}")
            }
            Self::ColumnCount { row, found, expected } => write!(
                f,
                "invalid number of columns in row {row} of pattern: found {found} but expected {expected}"
            ),
            Self::UnboundCharacter(c) => {
                write!(f, "character '{c}' in pattern has no corresponding mask or slot")
            }
            Self::UnusedBinding(c) => write!(f, "mask or slot '{c}' is not defined in pattern"),
        }
    }
}

impl std::error::Error for InterfaceError {}
