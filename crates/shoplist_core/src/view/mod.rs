//! Rendering model projected by front ends.
//!
//! # Responsibility
//! - Keep the row list, control affordances and a flat snapshot shape that
//!   terminal and FFI front ends draw from.
//!
//! # Invariants
//! - The view model never touches storage; the controller pairs the writes.

pub mod affordance;
pub mod rendered_list;

use affordance::Affordances;
use rendered_list::{RenderedList, RowId};

/// Flat copy of one row for front ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSnapshot {
    pub id: RowId,
    pub text: String,
    pub visible: bool,
    pub editing: bool,
}

/// Flat copy of everything a front end needs to redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot {
    pub rows: Vec<RowSnapshot>,
    pub input_text: String,
    pub filter_text: String,
    pub submit_label: &'static str,
    pub submit_color: &'static str,
    pub clear_visible: bool,
    pub filter_visible: bool,
    pub editing: Option<RowId>,
}

impl ListSnapshot {
    pub(crate) fn capture(
        rows: &RenderedList,
        affordances: Affordances,
        input_text: &str,
        filter_text: &str,
        editing: Option<RowId>,
    ) -> Self {
        Self {
            rows: rows
                .rows()
                .iter()
                .map(|row| RowSnapshot {
                    id: row.id,
                    text: row.text().to_string(),
                    visible: row.visible,
                    editing: row.editing,
                })
                .collect(),
            input_text: input_text.to_string(),
            filter_text: filter_text.to_string(),
            submit_label: affordances.submit.label(),
            submit_color: affordances.submit.color(),
            clear_visible: affordances.clear_visible,
            filter_visible: affordances.filter_visible,
            editing,
        }
    }

    /// Returns the texts of visible rows in display order.
    pub fn visible_texts(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.visible)
            .map(|row| row.text.as_str())
            .collect()
    }
}
