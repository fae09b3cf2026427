//! Derived UI affordance state.

/// Submit button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitMode {
    #[default]
    Add,
    Update,
}

impl SubmitMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "Add Item",
            Self::Update => "Update Item",
        }
    }

    /// Background color as a CSS hex string.
    pub fn color(self) -> &'static str {
        match self {
            Self::Add => "#333",
            Self::Update => "#228B22",
        }
    }
}

/// Visibility and label state of the controls around the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Affordances {
    pub clear_visible: bool,
    pub filter_visible: bool,
    pub submit: SubmitMode,
}

impl Affordances {
    /// Derives affordances from the row count and edit state.
    pub fn derive(row_count: usize, editing: bool) -> Self {
        let has_rows = row_count > 0;
        Self {
            clear_visible: has_rows,
            filter_visible: has_rows,
            submit: if editing {
                SubmitMode::Update
            } else {
                SubmitMode::Add
            },
        }
    }
}
