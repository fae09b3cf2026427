//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose list intents as sync FRB functions over one process-wide session.
//! - Return a full list view with every response so the UI can redraw
//!   without a second call.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - The session mutex serializes intents; each paired mutation runs under it.
//! - Row ids cross the boundary as hyphenated UUID strings.

use log::warn;
use shoplist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_list,
    ping as ping_inner, IntentError, ListConfig, ListController, ListSnapshot, RowId,
    ScriptedPrompt, SqliteKvStore,
};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

type Session = ListController<SqliteKvStore>;

static SESSION: Mutex<Option<Session>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One rendered row as seen by Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRowView {
    pub row_id: String,
    pub text: String,
    pub visible: bool,
    pub editing: bool,
}

/// Full redraw state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListView {
    pub rows: Vec<ListRowView>,
    /// Text the input field should show.
    pub input_text: String,
    pub filter_text: String,
    pub submit_label: String,
    /// CSS hex color for the submit button.
    pub submit_color: String,
    pub clear_visible: bool,
    pub filter_visible: bool,
    /// Row id in edit mode, if any.
    pub editing_row_id: Option<String>,
}

/// Response envelope for every list intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListResponse {
    /// Whether the intent was applied.
    pub ok: bool,
    /// Alert text to surface, or diagnostics on failure. Empty when silent.
    pub message: String,
    /// View after the intent; unchanged state when `ok == false`.
    pub view: ListView,
}

/// Opens the list session and renders the persisted list.
///
/// `db_path = None` resolves through `SHOPLIST_DB_PATH`, then the temp dir.
/// Reopening replaces any existing session.
#[flutter_rust_bridge::frb(sync)]
pub fn list_open(db_path: Option<String>) -> ListResponse {
    let mut config = ListConfig::from_env();
    if let Some(path) = db_path.map(|raw| raw.trim().to_string()) {
        if !path.is_empty() {
            config.db_path = PathBuf::from(path);
        }
    }

    let mut session = lock_session();
    match open_list(&config) {
        Ok(controller) => {
            let view = to_list_view(&controller.snapshot());
            *session = Some(controller);
            ListResponse {
                ok: true,
                message: String::new(),
                view,
            }
        }
        Err(err) => {
            *session = None;
            ListResponse {
                ok: false,
                message: format!("list_open failed: {err}"),
                view: ListView::default(),
            }
        }
    }
}

/// Returns the current view without changing state.
#[flutter_rust_bridge::frb(sync)]
pub fn list_snapshot() -> ListResponse {
    with_session("list_snapshot", |_, _| Ok(()))
}

/// Submits input-field text (add, or update while editing).
///
/// On rejection the view keeps `text` in the input field.
#[flutter_rust_bridge::frb(sync)]
pub fn list_submit(text: String) -> ListResponse {
    with_session("list_submit", |controller, prompt| {
        controller.submit(text.as_str(), prompt).map(|_| ())
    })
}

/// Enters edit mode for one row.
#[flutter_rust_bridge::frb(sync)]
pub fn list_select_for_edit(row_id: String) -> ListResponse {
    with_session("list_select_for_edit", |controller, _| {
        controller.select_for_edit(parse_row_id(&row_id))
    })
}

/// Removes one row.
///
/// The Dart side shows the confirmation dialog and passes its answer in
/// `confirmed`.
#[flutter_rust_bridge::frb(sync)]
pub fn list_remove_row(row_id: String, confirmed: bool) -> ListResponse {
    let mut prompt = ScriptedPrompt::answering(confirmed);
    with_session_prompt("list_remove_row", &mut prompt, |controller, prompt| {
        controller.remove_row(parse_row_id(&row_id), prompt)
    })
}

/// Removes every row and deletes the storage entry.
#[flutter_rust_bridge::frb(sync)]
pub fn list_clear_all() -> ListResponse {
    with_session("list_clear_all", |controller, _| controller.clear_all())
}

/// Applies the filter box text.
#[flutter_rust_bridge::frb(sync)]
pub fn list_filter(text: String) -> ListResponse {
    with_session("list_filter", |controller, _| {
        controller.filter(text.as_str());
        Ok(())
    })
}

/// Case-insensitive membership check; `false` when no session is open.
#[flutter_rust_bridge::frb(sync)]
pub fn list_exists(text: String) -> bool {
    let session = lock_session();
    match session.as_ref() {
        Some(controller) => controller.exists(text.as_str()).unwrap_or_else(|err| {
            warn!("event=ffi_call module=ffi call=list_exists status=error error={err}");
            false
        }),
        None => false,
    }
}

fn with_session(
    call: &'static str,
    f: impl FnOnce(&mut Session, &mut ScriptedPrompt) -> Result<(), IntentError>,
) -> ListResponse {
    let mut prompt = ScriptedPrompt::default();
    with_session_prompt(call, &mut prompt, f)
}

fn with_session_prompt(
    call: &'static str,
    prompt: &mut ScriptedPrompt,
    f: impl FnOnce(&mut Session, &mut ScriptedPrompt) -> Result<(), IntentError>,
) -> ListResponse {
    let mut session = lock_session();
    let Some(controller) = session.as_mut() else {
        return ListResponse {
            ok: false,
            message: format!("{call} failed: list session is not open"),
            view: ListView::default(),
        };
    };

    let result = f(controller, prompt);
    let view = to_list_view(&controller.snapshot());
    match result {
        Ok(()) => ListResponse {
            ok: true,
            message: String::new(),
            view,
        },
        Err(err) => {
            let message = match prompt.alerts().last() {
                Some(alert) => alert.clone(),
                None if matches!(err, IntentError::UserDeclined) => String::new(),
                None => {
                    warn!("event=ffi_call module=ffi call={call} status=error error={err}");
                    format!("{call} failed: {err}")
                }
            };
            ListResponse {
                ok: false,
                message,
                view,
            }
        }
    }
}

// A panic inside an earlier call must not brick every later call.
fn lock_session() -> MutexGuard<'static, Option<Session>> {
    SESSION.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// An unparsable id maps to nil, which never names a rendered row.
fn parse_row_id(raw: &str) -> RowId {
    Uuid::parse_str(raw.trim()).unwrap_or(Uuid::nil())
}

fn to_list_view(snapshot: &ListSnapshot) -> ListView {
    ListView {
        rows: snapshot
            .rows
            .iter()
            .map(|row| ListRowView {
                row_id: row.id.to_string(),
                text: row.text.clone(),
                visible: row.visible,
                editing: row.editing,
            })
            .collect(),
        input_text: snapshot.input_text.clone(),
        filter_text: snapshot.filter_text.clone(),
        submit_label: snapshot.submit_label.to_string(),
        submit_color: snapshot.submit_color.to_string(),
        clear_visible: snapshot.clear_visible,
        filter_visible: snapshot.filter_visible,
        editing_row_id: snapshot.editing.map(|id| id.to_string()),
    }
}
