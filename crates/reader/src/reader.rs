//! Document compiler
//!
//! Turns a JSON interface document into an `Interface`:
//!
//! ```text
//! {
//!   "title": "Shop",
//!   "pattern": ["#########", "#  a   #", "#########"],
//!   "#": {"item": "minecraft:black_stained_glass_pane"},
//!   "a": {"item": "minecraft:emerald", "amount": "index+1",
//!         "click_actions": [{"permission": "shop.buy"},
//!                           {"run_command": "buy <player>"}]},
//!   "on_open": [{"play_sound": {"sound": "minecraft:ui.button.click"}}]
//! }
//! ```
//!
//! Single-character keys define cells. A cell whose `click_actions` compose
//! to something becomes an interactive slot, anything else a mask. Within a
//! behavior list every object's actions run in declaration order, and the
//! conditions declared anywhere in the list gate the whole list.

use serde_json::{Map, Value};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::sync::Arc;

use gridmenu_config::ReaderConfig;
use gridmenu_engine::behavior::{self, ActionList, ClickActionList, ConditionList};
use gridmenu_engine::cell::{amount_renderer, static_renderer};
use gridmenu_engine::{
    Action, ClickAction, Condition, GridKind, Interface, ItemContent, Layout, Renderer,
};

use crate::error::ReadError;
use crate::fragment::{Fragment, Shape};
use crate::parsers;
use crate::registry::{ActionParser, ClickActionParser, ConditionParser, ParserContext, ParserSet};

pub struct InterfaceReader {
    config: ReaderConfig,
    actions: ParserSet<dyn ActionParser>,
    click_actions: ParserSet<dyn ClickActionParser>,
    conditions: ParserSet<dyn ConditionParser>,
}

impl Default for InterfaceReader {
    fn default() -> Self {
        Self::new()
    }
}

impl InterfaceReader {
    /// Reader with default configuration and the built-in parsers.
    pub fn new() -> Self {
        Self::with_config(ReaderConfig::default())
    }

    pub fn with_config(config: ReaderConfig) -> Self {
        let reader = Self {
            config,
            actions: ParserSet::new(),
            click_actions: ParserSet::new(),
            conditions: ParserSet::new(),
        };
        if reader.config.builtins {
            parsers::register_builtins(&reader);
        }
        reader
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn action_parsers(&self) -> &ParserSet<dyn ActionParser> {
        &self.actions
    }

    pub fn click_action_parsers(&self) -> &ParserSet<dyn ClickActionParser> {
        &self.click_actions
    }

    pub fn condition_parsers(&self) -> &ParserSet<dyn ConditionParser> {
        &self.conditions
    }

    pub fn register_action_parser<P>(&self, id: impl Into<String>, shape: Shape, parser: P) -> &Self
    where
        P: ActionParser + 'static,
    {
        self.actions.register(id, shape, Arc::new(parser));
        self
    }

    pub fn register_click_action_parser<P>(&self, id: impl Into<String>, shape: Shape, parser: P) -> &Self
    where
        P: ClickActionParser + 'static,
    {
        self.click_actions.register(id, shape, Arc::new(parser));
        self
    }

    pub fn register_condition_parser<P>(&self, id: impl Into<String>, shape: Shape, parser: P) -> &Self
    where
        P: ConditionParser + 'static,
    {
        self.conditions.register(id, shape, Arc::new(parser));
        self
    }

    // ========================================================================
    // Loading
    // ========================================================================

    pub fn read_str(&self, input: &str) -> Result<Interface, ReadError> {
        let value: Value = serde_json::from_str(input).map_err(|e| ReadError::Json(e.to_string()))?;
        self.read_value(&value)
    }

    pub fn read_reader<R: io::Read>(&self, reader: R) -> Result<Interface, ReadError> {
        let value: Value = serde_json::from_reader(reader).map_err(|e| {
            if e.is_io() {
                ReadError::Io(e.to_string())
            } else {
                ReadError::Json(e.to_string())
            }
        })?;
        self.read_value(&value)
    }

    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Interface, ReadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ReadError::Io(format!("{}: {e}", path.display())))?;
        self.read_reader(BufReader::new(file))
    }

    pub fn read_value(&self, value: &Value) -> Result<Interface, ReadError> {
        match value {
            Value::Object(document) => self.read(document),
            other => Err(ReadError::Json(format!(
                "expected a JSON object, found {}",
                kind_of(other)
            ))),
        }
    }

    // ========================================================================
    // Compilation
    // ========================================================================

    pub fn read(&self, document: &Map<String, Value>) -> Result<Interface, ReadError> {
        let pattern = read_pattern(document)?;
        let mut builder = Interface::builder();

        if let Some(title) = scalar(document, "title") {
            builder = builder.title(title);
        }
        if let Some(kind) = scalar(document, "type") {
            let kind = kind.parse::<GridKind>().map_err(ReadError::Structural)?;
            builder = builder.kind(kind);
        }

        let mut layout = Layout::builder().pattern(&pattern);
        for (key, value) in document {
            let mut chars = key.chars();
            let c = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => continue,
            };
            let definition = value
                .as_object()
                .ok_or_else(|| ReadError::Structural(format!("Invalid entry \"{key}\": {value}")))?;

            let renderer = read_renderer(definition)?;
            let click = match Fragment::field(definition, "click_actions").as_array() {
                Some(items) => self.read_click_list(items)?,
                None => None,
            };
            match click {
                Some(action) => builder = builder.slot_with(c, renderer, action),
                None => layout = layout.mask(c, renderer),
            }
        }

        if let Some(items) = Fragment::field(document, "on_open").as_array() {
            if let Some(action) = self.read_action_list(items)? {
                builder = builder.on_open(action);
            }
        }
        if let Some(items) = Fragment::field(document, "on_close").as_array() {
            if let Some(action) = self.read_action_list(items)? {
                builder = builder.on_close(behavior::close_from_action(action));
            }
        }

        let interface = builder.layout(layout.build()).build()?;
        tracing::debug!(
            kind = %interface.kind(),
            slots = interface.slots().len(),
            masks = interface.layout().masks().len(),
            "compiled interface document"
        );
        Ok(interface)
    }

    /// A `click_actions` list: every object's click behavior in order, gated
    /// by every condition in the list.
    fn read_click_list(&self, items: &[Value]) -> Result<Option<ClickAction>, ReadError> {
        let mut actions = ClickActionList::new();
        let mut conditions = ConditionList::new();
        for object in self.behavior_objects(items) {
            if let Some(action) = self.parse_click_actions(object)? {
                actions.push(action);
            }
            if let Some(condition) = self.parse_conditions(object)? {
                conditions.push(condition);
            }
        }
        Ok(actions
            .into_click_action()
            .map(|action| behavior::guard_click(action, conditions.into_condition())))
    }

    /// An `on_open` / `on_close` list, composed like a click list but with
    /// plain actions only.
    fn read_action_list(&self, items: &[Value]) -> Result<Option<Action>, ReadError> {
        let mut actions = ActionList::new();
        let mut conditions = ConditionList::new();
        for object in self.behavior_objects(items) {
            if let Some(action) = self.parse_actions(object)? {
                actions.push(action);
            }
            if let Some(condition) = self.parse_conditions(object)? {
                conditions.push(condition);
            }
        }
        Ok(actions
            .into_action()
            .map(|action| behavior::guard_action(action, conditions.into_condition())))
    }

    fn behavior_objects<'a>(&self, items: &'a [Value]) -> impl Iterator<Item = &'a Map<String, Value>> + 'a {
        let known = (self.actions.ids(), self.click_actions.ids(), self.conditions.ids());
        items.iter().filter_map(move |item| match item {
            Value::Object(object) => {
                for key in object.keys() {
                    if !known.0.contains(key) && !known.1.contains(key) && !known.2.contains(key) {
                        tracing::trace!(key = %key, "ignoring unknown behavior key");
                    }
                }
                Some(object)
            }
            other => {
                tracing::trace!(entry = %other, "ignoring non-object behavior entry");
                None
            }
        })
    }

    fn action_list(&self, object: &Map<String, Value>) -> Result<ActionList, ReadError> {
        let mut list = ActionList::new();
        for (parser, fragment) in self.actions.matching(object) {
            list.push(parser.parse(fragment, self)?);
        }
        Ok(list)
    }
}

impl ParserContext for InterfaceReader {
    fn parse_actions(&self, object: &Map<String, Value>) -> Result<Option<Action>, ReadError> {
        Ok(self.action_list(object)?.into_action())
    }

    fn parse_click_actions(&self, object: &Map<String, Value>) -> Result<Option<ClickAction>, ReadError> {
        let mut list = ClickActionList::new();
        for (parser, fragment) in self.click_actions.matching(object) {
            list.push(parser.parse(fragment, self)?);
        }
        list.push_actions(self.action_list(object)?);
        Ok(list.into_click_action())
    }

    fn parse_conditions(&self, object: &Map<String, Value>) -> Result<Option<Condition>, ReadError> {
        let mut list = ConditionList::new();
        for (parser, fragment) in self.conditions.matching(object) {
            list.push(parser.parse(fragment, self)?);
        }
        Ok(list.into_condition())
    }
}

impl std::fmt::Debug for InterfaceReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterfaceReader")
            .field("config", &self.config)
            .field("actions", &self.actions)
            .field("click_actions", &self.click_actions)
            .field("conditions", &self.conditions)
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Document fields
// ----------------------------------------------------------------------------

fn scalar(object: &Map<String, Value>, key: &str) -> Option<String> {
    Fragment::field(object, key).as_string()
}

fn read_pattern(document: &Map<String, Value>) -> Result<Vec<String>, ReadError> {
    let invalid = || ReadError::Structural("Missing or invalid pattern".into());
    Fragment::field(document, "pattern")
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|row| row.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}

fn read_renderer(definition: &Map<String, Value>) -> Result<Renderer, ReadError> {
    let item = scalar(definition, "item")
        .ok_or_else(|| ReadError::Structural("Missing or invalid item".into()))?;
    Ok(match scalar(definition, "amount") {
        Some(expression) => amount_renderer(item, expression),
        None => static_renderer(ItemContent::new(item)),
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
