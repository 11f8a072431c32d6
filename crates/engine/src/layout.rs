//! Pattern layouts
//!
//! A layout is a multi-line character pattern plus the content-only
//! bindings ("masks") for some of its characters. Interactive bindings
//! ("slots") live on the interface builder, which is also where coverage
//! of the pattern is validated.

use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::fmt;

use crate::cell::{static_renderer, ItemContent, Renderer};

/// Terminates a pattern row.
pub const ROW_SEPARATOR: char = '\n';

/// Reserved empty position; needs no binding.
pub const BLANK: char = ' ';

#[derive(Clone, Default)]
pub struct Layout {
    pattern: String,
    masks: FxHashMap<char, Renderer>,
}

impl Layout {
    pub fn builder() -> LayoutBuilder {
        LayoutBuilder::default()
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Layout with a pattern and no masks.
    pub fn new<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::builder().pattern(rows).build()
    }

    /// The rows joined with `ROW_SEPARATOR`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn rows(&self) -> Vec<&str> {
        self.pattern.split(ROW_SEPARATOR).collect()
    }

    /// Distinct characters used by the pattern, separators excluded.
    pub fn characters(&self) -> BTreeSet<char> {
        self.pattern.chars().filter(|&c| c != ROW_SEPARATOR).collect()
    }

    pub fn masks(&self) -> &FxHashMap<char, Renderer> {
        &self.masks
    }

    pub fn renderer(&self, c: char) -> Option<&Renderer> {
        self.masks.get(&c)
    }

    pub fn contains_mask(&self, c: char) -> bool {
        self.masks.contains_key(&c)
    }

    pub fn has_masks(&self) -> bool {
        !self.masks.is_empty()
    }

    /// Builder seeded with this layout's pattern and masks.
    pub fn to_builder(&self) -> LayoutBuilder {
        LayoutBuilder {
            pattern: self.pattern.clone(),
            masks: self.masks.clone(),
        }
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut masks: Vec<char> = self.masks.keys().copied().collect();
        masks.sort_unstable();
        f.debug_struct("Layout")
            .field("pattern", &self.pattern)
            .field("masks", &masks)
            .finish()
    }
}

#[derive(Clone, Default)]
pub struct LayoutBuilder {
    pattern: String,
    masks: FxHashMap<char, Renderer>,
}

impl LayoutBuilder {
    /// Set the pattern rows. Trailing empty rows are dropped, so
    /// `["#########", ""]` is a one-row pattern.
    pub fn pattern<I, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rows: Vec<String> = rows.into_iter().map(|r| r.as_ref().to_string()).collect();
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }
        self.pattern = rows.join(&*ROW_SEPARATOR.to_string());
        self
    }

    /// Bind `c` to content only. Rebinding replaces the previous renderer.
    pub fn mask(mut self, c: char, renderer: Renderer) -> Self {
        self.masks.insert(c, renderer);
        self
    }

    pub fn mask_item(self, c: char, content: ItemContent) -> Self {
        self.mask(c, static_renderer(content))
    }

    pub fn build(self) -> Layout {
        Layout {
            pattern: self.pattern,
            masks: self.masks,
        }
    }
}
