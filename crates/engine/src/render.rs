//! Per-cell render context and render results.

use serde::{Deserialize, Serialize};

use crate::cell::ItemContent;
use crate::formula::EvalError;
use crate::viewer::Viewer;

/// Where a cell sits in the grid.
///
/// - `index`: 0-based occurrence of the cell's character in the pattern
///   (row-major, counted per character, never reset per row)
/// - `row`, `column`: 1-based grid position
/// - `slot`: 0-based position in surface order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub slot: usize,
}

/// Everything a renderer may look at: the viewer and the cell's coordinates.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    viewer: &'a dyn Viewer,
    coordinates: Coordinates,
}

impl<'a> RenderContext<'a> {
    pub fn new(viewer: &'a dyn Viewer, coordinates: Coordinates) -> Self {
        Self { viewer, coordinates }
    }

    pub fn viewer(&self) -> &'a dyn Viewer {
        self.viewer
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn index(&self) -> usize {
        self.coordinates.index
    }

    pub fn row(&self) -> usize {
        self.coordinates.row
    }

    pub fn column(&self) -> usize {
        self.coordinates.column
    }

    pub fn slot(&self) -> usize {
        self.coordinates.slot
    }
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("viewer", &self.viewer.name())
            .field("coordinates", &self.coordinates)
            .finish()
    }
}

/// A cell whose renderer failed. Other cells still render.
#[derive(Debug, Clone, PartialEq)]
pub struct CellError {
    pub slot: usize,
    pub error: EvalError,
}

/// Contents of a whole interface for one viewer, indexed by slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendered {
    /// `None` for unbound positions and for cells listed in `errors`.
    pub contents: Vec<Option<ItemContent>>,
    pub errors: Vec<CellError>,
}

impl Rendered {
    pub fn get(&self, slot: usize) -> Option<&ItemContent> {
        self.contents.get(slot).and_then(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// True when no cell failed to render.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Non-empty positions as `(slot, content)`.
    pub fn filled(&self) -> impl Iterator<Item = (usize, &ItemContent)> {
        self.contents
            .iter()
            .enumerate()
            .filter_map(|(slot, c)| c.as_ref().map(|c| (slot, c)))
    }
}
