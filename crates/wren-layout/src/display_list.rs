//! Display List - the positioned words a paint surface draws.
//!
//! The display list is the output of layout. Items are stored in the order
//! their words appear in the document, and are read-only once layout has
//! finished.

use serde::Serialize;

use crate::style::TextStyle;

/// One positioned word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutItem {
    /// X coordinate of the word's left edge.
    pub x: i32,
    /// Y coordinate of the word's baseline.
    pub y: i32,
    /// The word itself, without surrounding whitespace.
    pub text: String,
    /// Style the word is drawn in.
    pub style: TextStyle,
}

/// Positioned words in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DisplayList {
    items: Vec<LayoutItem>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add an item to the end of the display list.
    pub fn push(&mut self, item: LayoutItem) {
        self.items.push(item);
    }

    /// Get the items in document order.
    #[must_use]
    pub fn items(&self) -> &[LayoutItem] {
        &self.items
    }

    /// Get the number of items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the items in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, LayoutItem> {
        self.items.iter()
    }

    /// Baseline of the last line, or `None` when nothing was laid out.
    ///
    /// Paint surfaces use this to size a scrollable canvas.
    #[must_use]
    pub fn last_baseline(&self) -> Option<i32> {
        self.items.iter().map(|item| item.y).max()
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a LayoutItem;
    type IntoIter = std::slice::Iter<'a, LayoutItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for DisplayList {
    type Item = LayoutItem;
    type IntoIter = std::vec::IntoIter<LayoutItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
