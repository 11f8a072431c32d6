//! Compiled interfaces
//!
//! `InterfaceBuilder` collects a grid kind, a layout, slot bindings and
//! lifecycle hooks; `build()` validates the pattern and resolves every
//! position into a `Cell` once. The resulting `Interface` is immutable and
//! can be rendered and clicked for any number of viewers concurrently.
//!
//! `Interface::open` models the host-side lifecycle: it renders, fires the
//! open hook and returns an `OpenInterface` that accepts clicks until it is
//! closed.

use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::behavior::{Action, ClickAction, CloseAction, TitleFn};
use crate::cell::{ActionItem, Cell, ItemContent, Renderer};
use crate::error::InterfaceError;
use crate::events::{CloseReason, InteractionKind};
use crate::grid::{Dimensions, GridKind};
use crate::layout::{Layout, ROW_SEPARATOR};
use crate::render::{CellError, Coordinates, Rendered};
use crate::validation;
use crate::viewer::Viewer;

#[derive(Clone)]
pub struct Interface {
    kind: GridKind,
    dimensions: Dimensions,
    title: Option<TitleFn>,
    layout: Layout,
    on_open: Option<Action>,
    on_close: Option<CloseAction>,
    slots: FxHashMap<char, ActionItem>,
    cells: Vec<Option<Cell>>,
}

impl Interface {
    pub fn builder() -> InterfaceBuilder {
        InterfaceBuilder::default()
    }

    pub fn kind(&self) -> GridKind {
        self.kind
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Interactive bindings by pattern character.
    pub fn slots(&self) -> &FxHashMap<char, ActionItem> {
        &self.slots
    }

    /// Resolved positions, indexed by slot. `None` is an unbound position.
    pub fn cells(&self) -> &[Option<Cell>] {
        &self.cells
    }

    pub fn cell(&self, slot: usize) -> Option<&Cell> {
        self.cells.get(slot).and_then(|c| c.as_ref())
    }

    pub fn title(&self, viewer: &dyn Viewer) -> Option<String> {
        self.title.as_ref().map(|title| title(viewer))
    }

    pub fn on_open(&self) -> Option<&Action> {
        self.on_open.as_ref()
    }

    pub fn on_close(&self) -> Option<&CloseAction> {
        self.on_close.as_ref()
    }

    /// Render every cell for `viewer`.
    ///
    /// A cell whose renderer fails is left empty and reported in
    /// `Rendered::errors`; the other cells are unaffected.
    pub fn render(&self, viewer: &dyn Viewer) -> Rendered {
        let mut rendered = Rendered {
            contents: vec![None; self.dimensions.slots().max(self.cells.len())],
            errors: Vec::new(),
        };

        for cell in self.cells.iter().flatten() {
            match cell.render(viewer) {
                Ok(content) => rendered.contents[cell.slot()] = Some(content),
                Err(error) => {
                    tracing::warn!(
                        slot = cell.slot(),
                        viewer = viewer.name(),
                        %error,
                        "cell failed to render"
                    );
                    rendered.errors.push(CellError { slot: cell.slot(), error });
                }
            }
        }

        rendered
    }

    /// Route a click to the cell at `slot`.
    ///
    /// Returns false (and does nothing) when the slot is out of range, empty,
    /// or has no click behavior.
    pub fn dispatch(&self, slot: usize, kind: InteractionKind, aux: i32, viewer: &dyn Viewer) -> bool {
        match self.cell(slot) {
            Some(cell) => cell.click(viewer, kind, aux),
            None => false,
        }
    }

    pub fn run_open(&self, viewer: &dyn Viewer) {
        if let Some(on_open) = &self.on_open {
            on_open(viewer);
        }
    }

    pub fn run_close(&self, viewer: &dyn Viewer, reason: CloseReason) {
        if let Some(on_close) = &self.on_close {
            on_close(viewer, reason);
        }
    }

    /// Open this interface for `viewer`: compute the title, render, then run
    /// the open hook.
    pub fn open<'v>(self: &Arc<Self>, viewer: &'v dyn Viewer) -> OpenInterface<'v> {
        let title = self.title(viewer);
        let rendered = self.render(viewer);
        self.run_open(viewer);
        OpenInterface {
            interface: Arc::clone(self),
            viewer,
            title,
            rendered,
        }
    }

    /// A builder seeded with everything this interface was built from.
    pub fn to_builder(&self) -> InterfaceBuilder {
        InterfaceBuilder {
            kind: Some(self.kind),
            title: self.title.clone(),
            layout: self.layout.clone(),
            on_open: self.on_open.clone(),
            on_close: self.on_close.clone(),
            slots: self.slots.clone(),
        }
    }
}

impl fmt::Debug for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut slots: Vec<char> = self.slots.keys().copied().collect();
        slots.sort_unstable();
        f.debug_struct("Interface")
            .field("kind", &self.kind)
            .field("layout", &self.layout)
            .field("slots", &slots)
            .field("has_title", &self.title.is_some())
            .field("has_on_open", &self.on_open.is_some())
            .field("has_on_close", &self.on_close.is_some())
            .finish()
    }
}

// ============================================================================
// Open state
// ============================================================================

/// An interface opened for one viewer.
///
/// Clicks are only meaningful while this value exists; `close` consumes it
/// and runs the close hook.
pub struct OpenInterface<'v> {
    interface: Arc<Interface>,
    viewer: &'v dyn Viewer,
    title: Option<String>,
    rendered: Rendered,
}

impl<'v> OpenInterface<'v> {
    pub fn interface(&self) -> &Arc<Interface> {
        &self.interface
    }

    pub fn viewer(&self) -> &'v dyn Viewer {
        self.viewer
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn rendered(&self) -> &Rendered {
        &self.rendered
    }

    pub fn click(&self, slot: usize, kind: InteractionKind, aux: i32) -> bool {
        self.interface.dispatch(slot, kind, aux, self.viewer)
    }

    /// Render again for the same viewer, e.g. after a click changed its state.
    pub fn refresh(&mut self) {
        self.rendered = self.interface.render(self.viewer);
    }

    pub fn close(self, reason: CloseReason) {
        self.interface.run_close(self.viewer, reason);
    }
}

impl fmt::Debug for OpenInterface<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenInterface")
            .field("viewer", &self.viewer.name())
            .field("title", &self.title)
            .field("interface", &self.interface)
            .finish()
    }
}

// ============================================================================
// Builder
// ============================================================================

#[derive(Clone, Default)]
pub struct InterfaceBuilder {
    kind: Option<GridKind>,
    title: Option<TitleFn>,
    layout: Layout,
    on_open: Option<Action>,
    on_close: Option<CloseAction>,
    slots: FxHashMap<char, ActionItem>,
}

impl InterfaceBuilder {
    pub fn kind(mut self, kind: GridKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Generic chest kind with `rows` rows.
    pub fn rows(self, rows: usize) -> Result<Self, InterfaceError> {
        Ok(self.kind(GridKind::from_rows(rows)?))
    }

    /// Generic chest kind (or hopper) by total slot count.
    pub fn size(self, slots: usize) -> Result<Self, InterfaceError> {
        Ok(self.kind(GridKind::from_slots(slots)?))
    }

    pub fn title(self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.title_with(Arc::new(move |_: &dyn Viewer| title.clone()))
    }

    pub fn title_with(mut self, title: TitleFn) -> Self {
        self.title = Some(title);
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Bind `c` to content plus a click behavior. Takes precedence over a
    /// mask for the same character.
    pub fn slot(mut self, c: char, item: ActionItem) -> Self {
        self.slots.insert(c, item);
        self
    }

    pub fn slot_with(self, c: char, renderer: Renderer, action: ClickAction) -> Self {
        self.slot(c, ActionItem::new(renderer, action))
    }

    pub fn slot_item(self, c: char, content: ItemContent, action: ClickAction) -> Self {
        self.slot(c, ActionItem::from_content(content, action))
    }

    pub fn on_open(mut self, action: Action) -> Self {
        self.on_open = Some(action);
        self
    }

    pub fn on_close(mut self, action: CloseAction) -> Self {
        self.on_close = Some(action);
        self
    }

    /// Validate and resolve.
    ///
    /// Without an explicit kind, a single row of five is a hopper and
    /// anything else a generic chest with as many rows as the pattern.
    /// Validation is skipped for an entirely empty builder.
    pub fn build(self) -> Result<Interface, InterfaceError> {
        let kind = match self.kind {
            Some(kind) => kind,
            None => infer_kind(&self.layout)?,
        };
        let dimensions = kind
            .dimensions()
            .ok_or(InterfaceError::UnsupportedGridKind(kind))?;

        if !self.layout.pattern().is_empty() || self.layout.has_masks() || !self.slots.is_empty() {
            let slot_chars: BTreeSet<char> = self.slots.keys().copied().collect();
            validation::validate_pattern(&self.layout, &slot_chars, dimensions)?;
        }

        let cells = resolve_cells(&self.layout, &self.slots);
        tracing::debug!(
            kind = %kind,
            cells = cells.iter().flatten().count(),
            masks = self.layout.masks().len(),
            slots = self.slots.len(),
            "built interface"
        );

        Ok(Interface {
            kind,
            dimensions,
            title: self.title,
            layout: self.layout,
            on_open: self.on_open,
            on_close: self.on_close,
            slots: self.slots,
            cells,
        })
    }
}

fn infer_kind(layout: &Layout) -> Result<GridKind, InterfaceError> {
    let rows = layout.rows();
    if rows.len() == 1 && rows[0].chars().count() == 5 {
        return Ok(GridKind::Hopper);
    }
    GridKind::from_rows(rows.len())
}

/// Walk the pattern row-major and resolve every position.
fn resolve_cells(layout: &Layout, slots: &FxHashMap<char, ActionItem>) -> Vec<Option<Cell>> {
    let mut cells = Vec::with_capacity(layout.pattern().len());
    let mut occurrences: FxHashMap<char, usize> = FxHashMap::default();
    let mut row = 1;
    let mut column = 1;

    for c in layout.pattern().chars() {
        if c == ROW_SEPARATOR {
            column = 1;
            row += 1;
            continue;
        }

        let seen = occurrences.entry(c).or_insert(0);
        let index = *seen;
        *seen += 1;

        let coordinates = Coordinates { index, row, column, slot: cells.len() };
        let cell = match slots.get(&c) {
            Some(item) => Some(Cell::new(item.renderer.clone(), Some(item.action.clone()), coordinates)),
            None => layout
                .renderer(c)
                .map(|renderer| Cell::new(renderer.clone(), None, coordinates)),
        };
        cells.push(cell);
        column += 1;
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{self, click_action};
    use crate::cell::amount_renderer;
    use crate::harness::RecordingViewer;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn pane() -> ItemContent {
        ItemContent::new("minecraft:black_stained_glass_pane")
    }

    fn counter() -> (Arc<AtomicUsize>, ClickAction) {
        let count = Arc::new(AtomicUsize::new(0));
        let action = {
            let count = Arc::clone(&count);
            click_action(move |_, _, _| {
                count.fetch_add(1, Ordering::SeqCst);
            })
        };
        (count, action)
    }

    fn framed(action: ClickAction) -> Interface {
        Interface::builder()
            .layout(
                Layout::builder()
                    .pattern(["#########", "#  a a  #", "#########"])
                    .mask_item('#', pane())
                    .build(),
            )
            .slot_item('a', ItemContent::new("minecraft:emerald"), action)
            .build()
            .unwrap()
    }

    #[test]
    fn test_interface_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Interface>();
    }

    #[test]
    fn test_kind_inferred_from_rows() {
        let (_, action) = counter();
        let interface = framed(action);
        assert_eq!(interface.kind(), GridKind::Generic9x3);
        assert_eq!(interface.cells().len(), 27);
    }

    #[test]
    fn test_single_row_of_five_is_hopper() {
        let interface = Interface::builder()
            .layout(Layout::builder().pattern(["#####"]).mask_item('#', pane()).build())
            .build()
            .unwrap();
        assert_eq!(interface.kind(), GridKind::Hopper);
        assert_eq!(interface.dimensions(), Dimensions::new(1, 5));
    }

    #[test]
    fn test_explicit_kind_validates_shape() {
        let layout = Layout::builder().pattern(["###"]).mask_item('#', pane()).build();
        let anvil = Interface::builder().kind(GridKind::Anvil).layout(layout.clone()).build();
        assert!(anvil.is_ok());

        let furnace = Interface::builder().kind(GridKind::Furnace).layout(layout).build();
        assert_eq!(
            furnace.unwrap_err(),
            InterfaceError::RowCount { found: 1, expected: 3 }
        );
    }

    #[test]
    fn test_unsupported_kind_fails() {
        let result = Interface::builder().kind(GridKind::Merchant).build();
        assert_eq!(result.unwrap_err(), InterfaceError::UnsupportedGridKind(GridKind::Merchant));
    }

    #[test]
    fn test_rows_and_size_reject_bad_counts() {
        assert_eq!(
            Interface::builder().rows(usize::MAX / 2).err(),
            Some(InterfaceError::InvalidSlotCount(usize::MAX))
        );
        assert_eq!(Interface::builder().rows(0).err(), Some(InterfaceError::InvalidSlotCount(0)));
        assert_eq!(Interface::builder().size(12).err(), Some(InterfaceError::InvalidSlotCount(12)));
        let interface = Interface::builder().size(5).unwrap().build().unwrap();
        assert_eq!(interface.kind(), GridKind::Hopper);
    }

    #[test]
    fn test_empty_builder_skips_validation() {
        let interface = Interface::builder().build().unwrap();
        assert_eq!(interface.kind(), GridKind::Generic9x1);
        assert!(interface.cells().is_empty());
        let rendered = interface.render(&RecordingViewer::new("Alex"));
        assert_eq!(rendered.len(), 9);
        assert_eq!(rendered.filled().count(), 0);
    }

    #[test]
    fn test_trailing_empty_row_does_not_count() {
        let layout = Layout::builder()
            .pattern(["#########", ""])
            .mask_item('#', pane())
            .build();
        let interface = Interface::builder().layout(layout).build().unwrap();
        assert_eq!(interface.kind(), GridKind::Generic9x1);
        assert_eq!(interface.cells().len(), 9);
    }

    #[test]
    fn test_invalid_row_count_for_inference() {
        let layout = Layout::builder()
            .pattern(["#########"; 7])
            .mask_item('#', pane())
            .build();
        assert_eq!(
            Interface::builder().layout(layout).build().unwrap_err(),
            InterfaceError::InvalidSlotCount(63)
        );
    }

    #[test]
    fn test_coordinates() {
        let (_, action) = counter();
        let interface = framed(action);

        let first = interface.cell(12).unwrap();
        assert_eq!(*first.coordinates(), Coordinates { index: 0, row: 2, column: 4, slot: 12 });
        assert!(first.is_interactive());

        let second = interface.cell(14).unwrap();
        assert_eq!(*second.coordinates(), Coordinates { index: 1, row: 2, column: 6, slot: 14 });

        // Blanks occupy a slot but resolve to nothing
        assert!(interface.cell(10).is_none());

        let corner = interface.cell(26).unwrap();
        assert_eq!(corner.index(), 19);
        assert_eq!((corner.row(), corner.column()), (3, 9));
        assert!(!corner.is_interactive());
    }

    #[test]
    fn test_slot_binding_wins_over_mask() {
        let (count, action) = counter();
        let interface = Interface::builder()
            .kind(GridKind::Beacon)
            .layout(Layout::builder().pattern(["x"]).mask_item('x', pane()).build())
            .slot_item('x', ItemContent::new("minecraft:beacon"), action)
            .build()
            .unwrap();

        let viewer = RecordingViewer::new("Alex");
        assert_eq!(interface.render(&viewer).get(0).unwrap().item, "minecraft:beacon");
        assert!(interface.dispatch(0, InteractionKind::Left, -1, &viewer));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_render_uses_per_cell_context() {
        let interface = Interface::builder()
            .kind(GridKind::Hopper)
            .layout(
                Layout::builder()
                    .pattern(["n n n"])
                    .mask('n', amount_renderer("minecraft:gold_nugget", "index*2+1"))
                    .build(),
            )
            .build()
            .unwrap();

        let rendered = interface.render(&RecordingViewer::new("Alex"));
        let amounts: Vec<i32> = rendered.filled().map(|(_, c)| c.amount).collect();
        assert_eq!(amounts, vec![1, 3, 5]);
        assert!(rendered.get(1).is_none());
    }

    #[test]
    fn test_render_failure_only_affects_cell() {
        let interface = Interface::builder()
            .kind(GridKind::Anvil)
            .layout(
                Layout::builder()
                    .pattern(["abc"])
                    .mask('a', amount_renderer("minecraft:apple", "slot+1"))
                    .mask('b', amount_renderer("minecraft:bread", "(slot"))
                    .mask_item('c', ItemContent::new("minecraft:carrot"))
                    .build(),
            )
            .build()
            .unwrap();

        let rendered = interface.render(&RecordingViewer::new("Alex"));
        assert!(!rendered.is_complete());
        assert_eq!(rendered.errors.len(), 1);
        assert_eq!(rendered.errors[0].slot, 1);
        assert_eq!(rendered.get(0).unwrap().amount, 1);
        assert!(rendered.get(1).is_none());
        assert_eq!(rendered.get(2).unwrap().item, "minecraft:carrot");
    }

    #[test]
    fn test_dispatch_no_ops() {
        let (count, action) = counter();
        let interface = framed(action);
        let viewer = RecordingViewer::new("Alex");

        assert!(!interface.dispatch(0, InteractionKind::Left, -1, &viewer)); // mask
        assert!(!interface.dispatch(10, InteractionKind::Left, -1, &viewer)); // blank
        assert!(!interface.dispatch(500, InteractionKind::Left, -1, &viewer)); // out of range
        assert_eq!(count.load(Ordering::SeqCst), 0);

        assert!(interface.dispatch(14, InteractionKind::Right, -1, &viewer));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_open_click_close_lifecycle() {
        let (count, action) = counter();
        let interface = Arc::new(
            framed(action)
                .to_builder()
                .title("Shop")
                .on_open(behavior::action(|viewer| viewer.send_message("opened")))
                .on_close(behavior::close_action(|viewer, reason| {
                    viewer.send_message(&format!("closed: {reason}"))
                }))
                .build()
                .unwrap(),
        );

        let viewer = RecordingViewer::new("Alex");
        let open = interface.open(&viewer);
        assert_eq!(open.title(), Some("Shop"));
        assert_eq!(open.rendered().filled().count(), 22);
        assert_eq!(viewer.messages(), vec!["opened"]);

        assert!(open.click(12, InteractionKind::Left, -1));
        open.close(CloseReason::Player);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(viewer.messages(), vec!["opened", "closed: player"]);
    }

    #[test]
    fn test_to_builder_round_trip() {
        let (_, action) = counter();
        let original = framed(action);
        let rebuilt = original.to_builder().build().unwrap();

        assert_eq!(rebuilt.kind(), original.kind());
        assert_eq!(rebuilt.layout().pattern(), original.layout().pattern());
        let coords = |i: &Interface| -> Vec<Option<(Coordinates, bool)>> {
            i.cells()
                .iter()
                .map(|c| c.as_ref().map(|c| (*c.coordinates(), c.is_interactive())))
                .collect()
        };
        assert_eq!(coords(&rebuilt), coords(&original));
    }

    #[test]
    fn test_to_builder_leaves_original_untouched() {
        let (_, action) = counter();
        let original = framed(action);
        let customized = original
            .to_builder()
            .layout(
                original
                    .layout()
                    .to_builder()
                    .pattern(["#########", "#  a a  #", "####b####"])
                    .mask_item('b', ItemContent::new("minecraft:barrier"))
                    .build(),
            )
            .build()
            .unwrap();

        assert!(customized.layout().contains_mask('b'));
        assert!(!original.layout().contains_mask('b'));
        assert!(original.cell(22).unwrap().render(&RecordingViewer::new("Alex")).unwrap().item.contains("pane"));
    }
}
