pub mod behavior;
pub mod cell;
pub mod error;
pub mod events;
pub mod formula;
pub mod grid;
pub mod interface;
pub mod layout;
pub mod render;
pub mod validation;
pub mod viewer;

#[cfg(any(test, feature = "harness"))]
pub mod harness;

pub use behavior::{Action, ClickAction, CloseAction, Condition, TitleFn};
pub use cell::{ActionItem, Cell, ItemContent, Renderer};
pub use error::InterfaceError;
pub use events::{CloseReason, InteractionKind};
pub use formula::EvalError;
pub use grid::{Dimensions, GridKind};
pub use interface::{Interface, InterfaceBuilder, OpenInterface};
pub use layout::{Layout, LayoutBuilder};
pub use render::{CellError, Coordinates, RenderContext, Rendered};
pub use viewer::{Sound, SoundCategory, Viewer};
