//! Surface kinds and their fixed dimensions.
//!
//! The dimension table is used only to validate a pattern's shape. It must
//! match what the host's surfaces actually provide, so it is not
//! configurable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InterfaceError;

/// Rows × columns of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

impl Dimensions {
    pub const fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    pub fn slots(&self) -> usize {
        self.rows * self.columns
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridKind {
    #[serde(rename = "generic_9x1")]
    Generic9x1,
    #[serde(rename = "generic_9x2")]
    Generic9x2,
    #[serde(rename = "generic_9x3")]
    Generic9x3,
    #[serde(rename = "generic_9x4")]
    Generic9x4,
    #[serde(rename = "generic_9x5")]
    Generic9x5,
    #[serde(rename = "generic_9x6")]
    Generic9x6,
    #[serde(rename = "generic_3x3")]
    Generic3x3,
    #[serde(rename = "crafter_3x3")]
    Crafter3x3,
    Anvil,
    Beacon,
    BlastFurnace,
    BrewingStand,
    Crafting,
    Enchantment,
    Furnace,
    Grindstone,
    Hopper,
    ShulkerBox,
    Smithing,
    Smoker,
    CartographyTable,
    Stonecutter,
    // Known surfaces without a slot grid
    Lectern,
    Loom,
    Merchant,
}

impl GridKind {
    pub const ALL: [GridKind; 25] = [
        Self::Generic9x1,
        Self::Generic9x2,
        Self::Generic9x3,
        Self::Generic9x4,
        Self::Generic9x5,
        Self::Generic9x6,
        Self::Generic3x3,
        Self::Crafter3x3,
        Self::Anvil,
        Self::Beacon,
        Self::BlastFurnace,
        Self::BrewingStand,
        Self::Crafting,
        Self::Enchantment,
        Self::Furnace,
        Self::Grindstone,
        Self::Hopper,
        Self::ShulkerBox,
        Self::Smithing,
        Self::Smoker,
        Self::CartographyTable,
        Self::Stonecutter,
        Self::Lectern,
        Self::Loom,
        Self::Merchant,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Generic9x1 => "generic_9x1",
            Self::Generic9x2 => "generic_9x2",
            Self::Generic9x3 => "generic_9x3",
            Self::Generic9x4 => "generic_9x4",
            Self::Generic9x5 => "generic_9x5",
            Self::Generic9x6 => "generic_9x6",
            Self::Generic3x3 => "generic_3x3",
            Self::Crafter3x3 => "crafter_3x3",
            Self::Anvil => "anvil",
            Self::Beacon => "beacon",
            Self::BlastFurnace => "blast_furnace",
            Self::BrewingStand => "brewing_stand",
            Self::Crafting => "crafting",
            Self::Enchantment => "enchantment",
            Self::Furnace => "furnace",
            Self::Grindstone => "grindstone",
            Self::Hopper => "hopper",
            Self::ShulkerBox => "shulker_box",
            Self::Smithing => "smithing",
            Self::Smoker => "smoker",
            Self::CartographyTable => "cartography_table",
            Self::Stonecutter => "stonecutter",
            Self::Lectern => "lectern",
            Self::Loom => "loom",
            Self::Merchant => "merchant",
        }
    }

    /// Fixed rows × columns, or `None` for kinds a pattern cannot describe.
    pub fn dimensions(&self) -> Option<Dimensions> {
        let (rows, columns) = match self {
            Self::Generic9x1 => (1, 9),
            Self::Generic9x2 => (2, 9),
            Self::Generic9x3 => (3, 9),
            Self::Generic9x4 => (4, 9),
            Self::Generic9x5 => (5, 9),
            Self::Generic9x6 => (6, 9),
            Self::Generic3x3 => (3, 3),
            Self::Crafter3x3 => (3, 3),
            Self::Anvil => (1, 3),
            Self::Beacon => (1, 1),
            Self::BlastFurnace => (1, 1),
            Self::BrewingStand => (1, 1),
            Self::Crafting => (3, 3),
            Self::Enchantment => (1, 2),
            Self::Furnace => (3, 1),
            Self::Grindstone => (3, 1),
            Self::Hopper => (1, 5),
            Self::ShulkerBox => (3, 9),
            Self::Smithing => (1, 4),
            Self::Smoker => (3, 1),
            Self::CartographyTable => (3, 1),
            Self::Stonecutter => (1, 2),
            Self::Lectern | Self::Loom | Self::Merchant => return None,
        };
        Some(Dimensions::new(rows, columns))
    }

    /// Generic chest kinds by slot count; 5 slots is a hopper.
    pub fn from_slots(slots: usize) -> Result<Self, InterfaceError> {
        match slots {
            9 => Ok(Self::Generic9x1),
            18 => Ok(Self::Generic9x2),
            27 => Ok(Self::Generic9x3),
            36 => Ok(Self::Generic9x4),
            45 => Ok(Self::Generic9x5),
            54 => Ok(Self::Generic9x6),
            5 => Ok(Self::Hopper),
            _ => Err(InterfaceError::InvalidSlotCount(slots)),
        }
    }

    /// Generic chest kind with `rows` rows of nine.
    pub fn from_rows(rows: usize) -> Result<Self, InterfaceError> {
        // Overflow reports as usize::MAX slots
        Self::from_slots(rows.saturating_mul(9))
    }
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for GridKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.id() == lower)
            .ok_or_else(|| format!("unknown grid kind: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_dimensions() {
        for (rows, kind) in [
            (1, GridKind::Generic9x1),
            (2, GridKind::Generic9x2),
            (3, GridKind::Generic9x3),
            (4, GridKind::Generic9x4),
            (5, GridKind::Generic9x5),
            (6, GridKind::Generic9x6),
        ] {
            assert_eq!(kind.dimensions(), Some(Dimensions::new(rows, 9)));
            assert_eq!(GridKind::from_rows(rows).unwrap(), kind);
        }
    }

    #[test]
    fn test_special_dimensions() {
        assert_eq!(GridKind::Hopper.dimensions(), Some(Dimensions::new(1, 5)));
        assert_eq!(GridKind::Anvil.dimensions(), Some(Dimensions::new(1, 3)));
        assert_eq!(GridKind::Furnace.dimensions(), Some(Dimensions::new(3, 1)));
        assert_eq!(GridKind::Smithing.dimensions(), Some(Dimensions::new(1, 4)));
        assert_eq!(GridKind::ShulkerBox.dimensions(), Some(Dimensions::new(3, 9)));
        assert_eq!(GridKind::Crafter3x3.dimensions(), Some(Dimensions::new(3, 3)));
        assert_eq!(GridKind::Beacon.dimensions().unwrap().slots(), 1);
    }

    #[test]
    fn test_unsupported_kinds_have_no_dimensions() {
        assert_eq!(GridKind::Lectern.dimensions(), None);
        assert_eq!(GridKind::Loom.dimensions(), None);
        assert_eq!(GridKind::Merchant.dimensions(), None);
    }

    #[test]
    fn test_from_slots() {
        assert_eq!(GridKind::from_slots(5).unwrap(), GridKind::Hopper);
        assert_eq!(GridKind::from_slots(54).unwrap(), GridKind::Generic9x6);
        assert_eq!(GridKind::from_slots(10), Err(InterfaceError::InvalidSlotCount(10)));
        assert_eq!(GridKind::from_rows(7), Err(InterfaceError::InvalidSlotCount(63)));
    }

    #[test]
    fn test_from_rows_overflow_is_an_error() {
        assert_eq!(
            GridKind::from_rows(usize::MAX / 2),
            Err(InterfaceError::InvalidSlotCount(usize::MAX))
        );
    }

    #[test]
    fn test_kind_ids_round_trip() {
        for kind in GridKind::ALL {
            assert_eq!(kind.id().parse::<GridKind>().unwrap(), kind);
        }
        assert!("chest".parse::<GridKind>().is_err());
    }
}
