//! Rendered row model.
//!
//! # Responsibility
//! - Hold the ordered rows a front end draws, with visibility and edit marker.
//! - Assign each row a stable `RowId` at render time.
//!
//! # Invariants
//! - Row order is insertion order; removal never reorders remaining rows.
//! - At most one row carries the edit marker.
//! - Newly appended rows are visible regardless of the active filter.

use crate::model::item::Item;
use uuid::Uuid;

/// Stable handle for one rendered row.
pub type RowId = Uuid;

/// One visible list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: RowId,
    pub item: Item,
    pub visible: bool,
    pub editing: bool,
}

impl Row {
    fn new(item: Item) -> Self {
        Self {
            id: Uuid::new_v4(),
            item,
            visible: true,
            editing: false,
        }
    }

    pub fn text(&self) -> &str {
        self.item.as_str()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderedList {
    rows: Vec<Row>,
}

impl RenderedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        self.rows.as_slice()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Returns the row at a zero-based position.
    pub fn at(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Returns the item texts in display order.
    pub fn texts(&self) -> Vec<&str> {
        self.rows.iter().map(Row::text).collect()
    }

    /// Appends a row and returns its new id.
    pub fn push(&mut self, item: Item) -> RowId {
        let row = Row::new(item);
        let id = row.id;
        self.rows.push(row);
        id
    }

    pub fn remove(&mut self, id: RowId) -> Option<Row> {
        let position = self.rows.iter().position(|row| row.id == id)?;
        Some(self.rows.remove(position))
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Moves the edit marker to `id`, clearing it everywhere else.
    ///
    /// Returns `false` when no row has that id; markers are untouched then.
    pub fn mark_editing(&mut self, id: RowId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        for row in &mut self.rows {
            row.editing = row.id == id;
        }
        true
    }

    pub fn clear_edit_markers(&mut self) {
        for row in &mut self.rows {
            row.editing = false;
        }
    }

    /// Shows rows containing `needle` (case-insensitive) and hides the rest.
    ///
    /// Returns the number of visible rows afterwards.
    pub fn apply_filter(&mut self, needle: &str) -> usize {
        let mut visible = 0;
        for row in &mut self.rows {
            row.visible = row.item.contains_ignore_case(needle);
            if row.visible {
                visible += 1;
            }
        }
        visible
    }
}
