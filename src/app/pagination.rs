//! Chunked pagination over the fetched recipe list.
//!
//! The list is revealed six cards at a time. Replacing the list always starts
//! over at the first chunk; advancing appends the next chunk below the ones
//! already shown. The chunk appended by the latest advance is
//! `items[cursor * CHUNK_SIZE .. cursor * CHUNK_SIZE + CHUNK_SIZE]`.

use crate::domain::RecipeSummary;

/// Number of cards revealed per chunk.
pub const CHUNK_SIZE: usize = 6;

/// Recipe list plus the index of the last revealed chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeList {
    items: Vec<RecipeSummary>,
    cursor: usize,
}

impl RecipeList {
    #[must_use]
    pub fn new(items: Vec<RecipeSummary>) -> Self {
        Self { items, cursor: 0 }
    }

    /// Replaces the whole list and rewinds to the first chunk.
    pub fn replace(&mut self, items: Vec<RecipeSummary>) {
        tracing::debug!(
            old_count = self.items.len(),
            new_count = items.len(),
            "recipe list replaced"
        );
        self.items = items;
        self.cursor = 0;
    }

    /// Reveals the next chunk and returns it.
    ///
    /// Returns `None` without moving the cursor when every item is already
    /// rendered.
    pub fn advance(&mut self) -> Option<&[RecipeSummary]> {
        if !self.has_more() {
            return None;
        }
        self.cursor += 1;
        tracing::debug!(cursor = self.cursor, rendered = self.rendered_count(), "advanced page");
        Some(self.window())
    }

    /// The chunk at the current cursor.
    #[must_use]
    pub fn window(&self) -> &[RecipeSummary] {
        let start = (self.cursor * CHUNK_SIZE).min(self.items.len());
        let end = (start + CHUNK_SIZE).min(self.items.len());
        &self.items[start..end]
    }

    /// Every card revealed so far: chunks `0..=cursor`.
    #[must_use]
    pub fn rendered(&self) -> &[RecipeSummary] {
        &self.items[..self.rendered_count()]
    }

    #[must_use]
    pub fn rendered_count(&self) -> usize {
        ((self.cursor + 1) * CHUNK_SIZE).min(self.items.len())
    }

    /// Whether the "load more" affordance should be shown.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.rendered_count() < self.items.len()
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn items(&self) -> &[RecipeSummary] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
