//! JSON interface documents
//!
//! `InterfaceReader` compiles a document into a `gridmenu_engine::Interface`.
//! Behavior keys inside `click_actions`, `on_open` and `on_close` lists are
//! resolved through three parser registries (actions, click actions and
//! conditions) that hosts can extend at runtime.

pub mod error;
pub mod fragment;
pub mod parsers;
pub mod reader;
pub mod registry;

pub use error::ReadError;
pub use fragment::{Fragment, Shape};
pub use reader::InterfaceReader;
pub use registry::{ActionParser, ClickActionParser, ConditionParser, ParserContext, ParserSet};
