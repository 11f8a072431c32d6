//! Parser registry
//!
//! Behavior objects in a document are `{key: value}` maps. Each registered
//! parser claims one key and the shape of value it accepts; every parser
//! whose key is present with a matching shape contributes a behavior.
//! Unknown keys and shape mismatches contribute nothing.
//!
//! Sets are append-only and ordered by registration. Lookups work on a
//! snapshot taken under the read lock, so a parser may call back into the
//! reader (and even register more parsers) while it runs.

use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use gridmenu_engine::{Action, ClickAction, Condition};

use crate::error::ReadError;
use crate::fragment::{Fragment, Shape};

/// Composition entry points available to parsers handling nested fragments.
pub trait ParserContext {
    /// Every action parser match in `object`, run in registration order.
    fn parse_actions(&self, object: &Map<String, Value>) -> Result<Option<Action>, ReadError>;

    /// Click parser matches in `object`, followed by its plain actions.
    fn parse_click_actions(&self, object: &Map<String, Value>) -> Result<Option<ClickAction>, ReadError>;

    /// Every condition parser match in `object`, combined with AND.
    fn parse_conditions(&self, object: &Map<String, Value>) -> Result<Option<Condition>, ReadError>;
}

pub trait ActionParser: Send + Sync {
    fn parse(&self, fragment: Fragment<'_>, context: &dyn ParserContext) -> Result<Action, ReadError>;
}

pub trait ClickActionParser: Send + Sync {
    fn parse(&self, fragment: Fragment<'_>, context: &dyn ParserContext) -> Result<ClickAction, ReadError>;
}

pub trait ConditionParser: Send + Sync {
    fn parse(&self, fragment: Fragment<'_>, context: &dyn ParserContext) -> Result<Condition, ReadError>;
}

impl<F> ActionParser for F
where
    F: Fn(Fragment<'_>, &dyn ParserContext) -> Result<Action, ReadError> + Send + Sync,
{
    fn parse(&self, fragment: Fragment<'_>, context: &dyn ParserContext) -> Result<Action, ReadError> {
        self(fragment, context)
    }
}

impl<F> ClickActionParser for F
where
    F: Fn(Fragment<'_>, &dyn ParserContext) -> Result<ClickAction, ReadError> + Send + Sync,
{
    fn parse(&self, fragment: Fragment<'_>, context: &dyn ParserContext) -> Result<ClickAction, ReadError> {
        self(fragment, context)
    }
}

impl<F> ConditionParser for F
where
    F: Fn(Fragment<'_>, &dyn ParserContext) -> Result<Condition, ReadError> + Send + Sync,
{
    fn parse(&self, fragment: Fragment<'_>, context: &dyn ParserContext) -> Result<Condition, ReadError> {
        self(fragment, context)
    }
}

// ============================================================================
// Parser sets
// ============================================================================

pub struct Registered<P: ?Sized> {
    id: String,
    shape: Shape,
    parser: Arc<P>,
}

impl<P: ?Sized> Registered<P> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn parser(&self) -> &Arc<P> {
        &self.parser
    }
}

impl<P: ?Sized> Clone for Registered<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            shape: self.shape,
            parser: Arc::clone(&self.parser),
        }
    }
}

pub struct ParserSet<P: ?Sized> {
    entries: RwLock<Vec<Registered<P>>>,
}

impl<P: ?Sized> Default for ParserSet<P> {
    fn default() -> Self {
        Self { entries: RwLock::new(Vec::new()) }
    }
}

impl<P: ?Sized> ParserSet<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parser. Ids need not be unique; duplicates all participate.
    pub fn register(&self, id: impl Into<String>, shape: Shape, parser: Arc<P>) {
        let id = id.into();
        tracing::debug!(id = %id, shape = %shape, "registered parser");
        self.entries.write().push(Registered { id, shape, parser });
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.read().iter().any(|entry| entry.id == id)
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> Vec<String> {
        self.entries.read().iter().map(|entry| entry.id.clone()).collect()
    }

    pub fn snapshot(&self) -> Vec<Registered<P>> {
        self.entries.read().clone()
    }

    /// Parsers whose key is present in `object` with an accepted shape,
    /// paired with their fragment, in registration order.
    pub fn matching<'a>(&self, object: &'a Map<String, Value>) -> Vec<(Arc<P>, Fragment<'a>)> {
        let mut matched = Vec::new();
        for entry in self.snapshot() {
            let fragment = Fragment::field(object, &entry.id);
            if entry.shape.accepts(&fragment) {
                matched.push((entry.parser, fragment));
            } else if fragment.is_present() {
                tracing::trace!(
                    id = %entry.id,
                    expected = %entry.shape,
                    "ignoring key with mismatched shape"
                );
            }
        }
        matched
    }
}

impl<P: ?Sized> fmt::Debug for ParserSet<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}
