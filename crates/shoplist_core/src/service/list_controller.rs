//! List intent controller.
//!
//! # Responsibility
//! - Apply each user intent as a paired mutation of rendered rows and the
//!   persisted list, then refresh derived affordances.
//! - Own the edit cursor as typed state.
//!
//! # Invariants
//! - Rendered row texts and persisted entries match (case-insensitively) after
//!   every intent returns.
//! - Storage is written before rows change; a failed write leaves rows as-is.
//! - Failed intents never mutate rows, storage or edit state.
//! - Only `submit`, `remove_row`, `clear_all` and `initial_load` leave edit
//!   mode; `refresh_affordances` only derives from current state.

use crate::model::item::Item;
use crate::prompt::{
    UserPrompt, DUPLICATE_ITEM_MESSAGE, EMPTY_INPUT_MESSAGE, REMOVE_CONFIRM_MESSAGE,
};
use crate::repo::item_repo::{ItemRepository, RepoError};
use crate::storage::KeyValueStore;
use crate::view::affordance::Affordances;
use crate::view::rendered_list::{RenderedList, Row, RowId};
use crate::view::ListSnapshot;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type IntentResult<T> = Result<T, IntentError>;

/// Intent failure taxonomy.
#[derive(Debug)]
pub enum IntentError {
    /// Submitted text is blank.
    EmptyInput,
    /// Submitted text collides case-insensitively with a stored item.
    DuplicateItem(String),
    /// Removal confirmation was declined.
    UserDeclined,
    /// Target row is not rendered.
    RowNotFound(RowId),
    /// Persisted-list failure.
    Repo(RepoError),
}

impl IntentError {
    /// Returns whether this is a recoverable user-facing rejection.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::DuplicateItem(_) | Self::UserDeclined
        )
    }
}

impl Display for IntentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "{EMPTY_INPUT_MESSAGE}"),
            Self::DuplicateItem(text) => write!(f, "item already exists: `{text}`"),
            Self::UserDeclined => write!(f, "removal declined"),
            Self::RowNotFound(id) => write!(f, "row not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for IntentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for IntentError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Edit cursor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing(RowId),
}

impl EditState {
    pub fn is_editing(self) -> bool {
        matches!(self, Self::Editing(_))
    }

    pub fn row(self) -> Option<RowId> {
        match self {
            Self::Idle => None,
            Self::Editing(id) => Some(id),
        }
    }
}

/// Result of a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added { row: RowId },
    Updated { row: RowId, previous: String },
}

/// Controller keeping rendered rows and persisted list in lockstep.
pub struct ListController<S: KeyValueStore> {
    repo: ItemRepository<S>,
    rows: RenderedList,
    edit: EditState,
    affordances: Affordances,
    input_text: String,
    filter_text: String,
}

impl<S: KeyValueStore> ListController<S> {
    /// Creates a controller with nothing rendered yet.
    ///
    /// Call [`Self::initial_load`] (or use [`Self::load`]) to render storage.
    pub fn new(repo: ItemRepository<S>) -> Self {
        Self {
            repo,
            rows: RenderedList::new(),
            edit: EditState::Idle,
            affordances: Affordances::default(),
            input_text: String::new(),
            filter_text: String::new(),
        }
    }

    /// Creates a controller and renders the persisted list.
    pub fn load(repo: ItemRepository<S>) -> IntentResult<Self> {
        let mut controller = Self::new(repo);
        controller.initial_load()?;
        Ok(controller)
    }

    pub fn rows(&self) -> &[Row] {
        self.rows.rows()
    }

    pub fn rendered(&self) -> &RenderedList {
        &self.rows
    }

    pub fn edit_state(&self) -> EditState {
        self.edit
    }

    pub fn affordances(&self) -> Affordances {
        self.affordances
    }

    pub fn input_text(&self) -> &str {
        self.input_text.as_str()
    }

    /// Mirrors the input field while the user types.
    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    pub fn filter_text(&self) -> &str {
        self.filter_text.as_str()
    }

    pub fn repository(&self) -> &ItemRepository<S> {
        &self.repo
    }

    /// Reads the persisted list as currently stored.
    pub fn persisted_items(&self) -> IntentResult<Vec<Item>> {
        Ok(self.repo.load()?)
    }

    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot::capture(
            &self.rows,
            self.affordances,
            self.input_text.as_str(),
            self.filter_text.as_str(),
            self.edit.row(),
        )
    }

    /// Case-insensitive membership test against the persisted list.
    pub fn exists(&self, text: &str) -> IntentResult<bool> {
        Ok(self.repo.contains_ignore_case(text)?)
    }

    /// Adds a new item, or replaces the edited one when in edit mode.
    ///
    /// # Errors
    /// - `EmptyInput` for blank text (alerted).
    /// - `DuplicateItem` when the text already exists ignoring case (alerted).
    ///   Editing an item to its own text is rejected the same way.
    ///
    /// The input field keeps `text` as typed until a submit succeeds.
    pub fn submit(
        &mut self,
        text: &str,
        prompt: &mut dyn UserPrompt,
    ) -> IntentResult<SubmitOutcome> {
        self.input_text = text.to_string();

        let Ok(item) = Item::parse(text) else {
            debug!("event=list_submit module=controller status=rejected reason=empty_input");
            prompt.alert(EMPTY_INPUT_MESSAGE);
            return Err(IntentError::EmptyInput);
        };

        if self.exists(item.as_str())? {
            debug!(
                "event=list_submit module=controller status=rejected reason=duplicate editing={}",
                self.edit.is_editing()
            );
            prompt.alert(DUPLICATE_ITEM_MESSAGE);
            return Err(IntentError::DuplicateItem(item.into_string()));
        }

        let outcome = match self.edit {
            EditState::Idle => {
                self.repo.append(&item)?;
                SubmitOutcome::Added {
                    row: self.rows.push(item),
                }
            }
            EditState::Editing(edited) => {
                let previous = self
                    .rows
                    .get(edited)
                    .map(|row| row.text().to_string())
                    .ok_or(IntentError::RowNotFound(edited))?;
                self.repo.replace(previous.as_str(), &item)?;
                self.rows.remove(edited);
                SubmitOutcome::Updated {
                    row: self.rows.push(item),
                    previous,
                }
            }
        };

        self.end_edit();
        self.input_text.clear();
        self.refresh_affordances();

        info!(
            "event=list_submit module=controller status=ok mode={} rows={}",
            match outcome {
                SubmitOutcome::Added { .. } => "add",
                SubmitOutcome::Updated { .. } => "update",
            },
            self.rows.len()
        );
        Ok(outcome)
    }

    /// Enters edit mode for `row`, copying its text into the input field.
    ///
    /// Does not touch storage.
    pub fn select_for_edit(&mut self, row: RowId) -> IntentResult<()> {
        if !self.rows.mark_editing(row) {
            return Err(IntentError::RowNotFound(row));
        }
        let text = self
            .rows
            .get(row)
            .map(|row| row.text().to_string())
            .ok_or(IntentError::RowNotFound(row))?;

        self.edit = EditState::Editing(row);
        self.input_text = text;
        self.refresh_affordances();

        debug!("event=list_select_for_edit module=controller status=ok");
        Ok(())
    }

    /// Removes `row` after the user confirms.
    ///
    /// # Errors
    /// - `RowNotFound` when `row` is not rendered (no prompt is shown).
    /// - `UserDeclined` when the confirmation is declined.
    pub fn remove_row(&mut self, row: RowId, prompt: &mut dyn UserPrompt) -> IntentResult<()> {
        let text = self
            .rows
            .get(row)
            .map(|row| row.text().to_string())
            .ok_or(IntentError::RowNotFound(row))?;

        if !prompt.confirm(REMOVE_CONFIRM_MESSAGE) {
            debug!("event=list_remove module=controller status=declined");
            return Err(IntentError::UserDeclined);
        }

        if !self.repo.remove_exact(text.as_str())? {
            warn!("event=list_remove module=controller status=degraded reason=missing_persisted_entry");
        }
        self.rows.remove(row);

        self.end_edit();
        self.input_text.clear();
        self.refresh_affordances();

        info!(
            "event=list_remove module=controller status=ok rows={}",
            self.rows.len()
        );
        Ok(())
    }

    /// Removes every row and deletes the storage entry.
    pub fn clear_all(&mut self) -> IntentResult<()> {
        self.repo.clear()?;
        self.rows.clear();

        self.end_edit();
        self.input_text.clear();
        self.refresh_affordances();

        info!("event=list_clear module=controller status=ok");
        Ok(())
    }

    /// Shows rows whose text contains `text` ignoring case; hides the rest.
    ///
    /// Returns the number of visible rows.
    pub fn filter(&mut self, text: &str) -> usize {
        self.filter_text = text.to_string();
        let visible = self.rows.apply_filter(text);
        debug!(
            "event=list_filter module=controller status=ok visible={} rows={}",
            visible,
            self.rows.len()
        );
        visible
    }

    /// Re-derives clear/filter visibility and the submit affordance.
    pub fn refresh_affordances(&mut self) {
        self.affordances = Affordances::derive(self.rows.len(), self.edit.is_editing());
    }

    /// Rebuilds rendered rows from storage in storage order.
    ///
    /// Returns the number of rendered rows.
    pub fn initial_load(&mut self) -> IntentResult<usize> {
        let items = self.repo.load()?;

        self.rows.clear();
        for item in items {
            self.rows.push(item);
        }

        self.end_edit();
        self.input_text.clear();
        self.filter_text.clear();
        self.refresh_affordances();

        info!(
            "event=list_load module=controller status=ok rows={}",
            self.rows.len()
        );
        Ok(self.rows.len())
    }

    fn end_edit(&mut self) {
        self.rows.clear_edit_markers();
        self.edit = EditState::Idle;
    }
}
