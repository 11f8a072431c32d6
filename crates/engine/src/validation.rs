//! Pattern validation against a grid kind's dimensions
//!
//! Checks, in order:
//! 1. the pattern has exactly as many rows as the grid,
//! 2. every row is exactly as wide as the grid,
//! 3. every non-blank pattern character has a mask or slot binding,
//! 4. every mask and slot binding is used by the pattern.
//!
//! Characters are visited in sorted order so the reported error is stable.

use std::collections::BTreeSet;

use crate::error::InterfaceError;
use crate::grid::Dimensions;
use crate::layout::{Layout, BLANK};

pub fn validate_pattern(
    layout: &Layout,
    slot_chars: &BTreeSet<char>,
    dimensions: Dimensions,
) -> Result<(), InterfaceError> {
    let rows = layout.rows();
    if rows.len() != dimensions.rows {
        return Err(InterfaceError::RowCount {
            found: rows.len(),
            expected: dimensions.rows,
        });
    }
    for (i, row) in rows.iter().enumerate() {
        let width = row.chars().count();
        if width != dimensions.columns {
            return Err(InterfaceError::ColumnCount {
                row: i,
                found: width,
                expected: dimensions.columns,
            });
        }
    }

    let pattern_chars = layout.characters();
    for &c in &pattern_chars {
        if c != BLANK && !layout.contains_mask(c) && !slot_chars.contains(&c) {
            return Err(InterfaceError::UnboundCharacter(c));
        }
    }

    let mut bound: BTreeSet<char> = layout.masks().keys().copied().collect();
    bound.extend(slot_chars.iter().copied());
    for c in bound {
        if !pattern_chars.contains(&c) {
            return Err(InterfaceError::UnusedBinding(c));
        }
    }

    Ok(())
}
