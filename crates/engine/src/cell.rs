use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::behavior::ClickAction;
use crate::events::InteractionKind;
use crate::formula::{self, EvalError};
use crate::render::{Coordinates, RenderContext};
use crate::viewer::Viewer;

/// What a cell shows: an opaque item identifier and a stack amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemContent {
    pub item: String,
    pub amount: i32,
}

impl ItemContent {
    pub fn new(item: impl Into<String>) -> Self {
        Self { item: item.into(), amount: 1 }
    }

    pub fn with_amount(mut self, amount: i32) -> Self {
        self.amount = amount;
        self
    }
}

impl fmt::Display for ItemContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.amount == 1 {
            write!(f, "{}", self.item)
        } else {
            write!(f, "{} x{}", self.item, self.amount)
        }
    }
}

/// Produces a cell's content for one viewer. Called on every render.
pub type Renderer = Arc<dyn Fn(&RenderContext<'_>) -> Result<ItemContent, EvalError> + Send + Sync>;

/// Renderer that always yields `content`.
pub fn static_renderer(content: ItemContent) -> Renderer {
    Arc::new(move |_: &RenderContext<'_>| -> Result<ItemContent, EvalError> {
        Ok(content.clone())
    })
}

/// Renderer whose amount is an expression over the cell's coordinates.
///
/// The float result is truncated towards zero, saturating at the `i32`
/// bounds; NaN becomes 0.
pub fn amount_renderer(item: impl Into<String>, expression: impl Into<String>) -> Renderer {
    let item = item.into();
    let expression = expression.into();
    Arc::new(move |context: &RenderContext<'_>| -> Result<ItemContent, EvalError> {
        let amount = formula::evaluate_in(&expression, context.coordinates())?;
        Ok(ItemContent { item: item.clone(), amount: amount as i32 })
    })
}

/// Slot binding: content plus click behavior.
#[derive(Clone)]
pub struct ActionItem {
    pub renderer: Renderer,
    pub action: ClickAction,
}

impl ActionItem {
    pub fn new(renderer: Renderer, action: ClickAction) -> Self {
        Self { renderer, action }
    }

    pub fn from_content(content: ItemContent, action: ClickAction) -> Self {
        Self::new(static_renderer(content), action)
    }
}

impl fmt::Debug for ActionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ActionItem")
    }
}

/// A resolved grid position with a binding.
#[derive(Clone)]
pub struct Cell {
    renderer: Renderer,
    action: Option<ClickAction>,
    coordinates: Coordinates,
}

impl Cell {
    pub fn new(renderer: Renderer, action: Option<ClickAction>, coordinates: Coordinates) -> Self {
        Self { renderer, action, coordinates }
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

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn action(&self) -> Option<&ClickAction> {
        self.action.as_ref()
    }

    pub fn is_interactive(&self) -> bool {
        self.action.is_some()
    }

    pub fn render(&self, viewer: &dyn Viewer) -> Result<ItemContent, EvalError> {
        (self.renderer)(&RenderContext::new(viewer, self.coordinates))
    }

    /// Run the click behavior, if any. Returns whether one was bound.
    pub fn click(&self, viewer: &dyn Viewer, kind: InteractionKind, aux: i32) -> bool {
        match &self.action {
            Some(action) => {
                action(viewer, kind, aux);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("coordinates", &self.coordinates)
            .field("interactive", &self.action.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::RecordingViewer;

    fn coords(index: usize, row: usize, column: usize, slot: usize) -> Coordinates {
        Coordinates { index, row, column, slot }
    }

    #[test]
    fn test_static_renderer_ignores_coordinates() {
        let viewer = RecordingViewer::new("Steve");
        let renderer = static_renderer(ItemContent::new("minecraft:stone").with_amount(4));
        let first = renderer(&RenderContext::new(&viewer, coords(0, 1, 1, 0))).unwrap();
        let second = renderer(&RenderContext::new(&viewer, coords(7, 3, 9, 26))).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.amount, 4);
    }

    #[test]
    fn test_amount_renderer_uses_cell_coordinates() {
        let viewer = RecordingViewer::new("Steve");
        let renderer = amount_renderer("minecraft:diamond", "index*2-1");
        let third = renderer(&RenderContext::new(&viewer, coords(3, 1, 4, 3))).unwrap();
        assert_eq!(third, ItemContent::new("minecraft:diamond").with_amount(5));
    }

    #[test]
    fn test_amount_renderer_truncates_and_saturates() {
        let viewer = RecordingViewer::new("Steve");
        let ctx = RenderContext::new(&viewer, coords(0, 1, 1, 0));
        assert_eq!(amount_renderer("a", "7/2")(&ctx).unwrap().amount, 3);
        assert_eq!(amount_renderer("a", "1/0")(&ctx).unwrap().amount, i32::MAX);
        assert_eq!(amount_renderer("a", "0/0")(&ctx).unwrap().amount, 0);
    }

    #[test]
    fn test_amount_renderer_reports_malformed_expression() {
        let viewer = RecordingViewer::new("Steve");
        let ctx = RenderContext::new(&viewer, coords(0, 1, 1, 0));
        assert_eq!(
            amount_renderer("a", "(row")(&ctx),
            Err(EvalError::UnclosedParenthesis)
        );
    }

    #[test]
    fn test_cell_click_without_action() {
        let viewer = RecordingViewer::new("Steve");
        let cell = Cell::new(static_renderer(ItemContent::new("a")), None, coords(0, 1, 1, 0));
        assert!(!cell.is_interactive());
        assert!(!cell.click(&viewer, InteractionKind::Left, -1));
    }

    #[test]
    fn test_item_content_display() {
        assert_eq!(ItemContent::new("minecraft:apple").to_string(), "minecraft:apple");
        assert_eq!(ItemContent::new("minecraft:apple").with_amount(3).to_string(), "minecraft:apple x3");
    }
}
