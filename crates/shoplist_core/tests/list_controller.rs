use shoplist_core::prompt::{DUPLICATE_ITEM_MESSAGE, EMPTY_INPUT_MESSAGE, REMOVE_CONFIRM_MESSAGE};
use shoplist_core::{
    EditState, IntentError, ItemRepository, KeyValueStore, ListController, MemoryKvStore, RowId,
    ScriptedPrompt, StorageError, StorageResult, SubmitMode, SubmitOutcome,
};

fn empty_list() -> ListController<MemoryKvStore> {
    ListController::load(ItemRepository::new(MemoryKvStore::new())).unwrap()
}

fn list_with(items: &[&str]) -> ListController<MemoryKvStore> {
    let mut list = empty_list();
    let mut prompt = ScriptedPrompt::answering(true);
    for item in items {
        list.submit(item, &mut prompt).unwrap();
    }
    list
}

fn persisted(list: &ListController<MemoryKvStore>) -> Vec<String> {
    list.persisted_items()
        .unwrap()
        .into_iter()
        .map(|item| item.into_string())
        .collect()
}

fn rendered(list: &ListController<MemoryKvStore>) -> Vec<String> {
    list.rows().iter().map(|row| row.text().to_string()).collect()
}

fn row_id(list: &ListController<MemoryKvStore>, text: &str) -> RowId {
    list.rows()
        .iter()
        .find(|row| row.text() == text)
        .map(|row| row.id)
        .unwrap()
}

#[test]
fn submit_unique_text_appends_to_both_lists() {
    let mut list = list_with(&["Milk"]);
    let mut prompt = ScriptedPrompt::answering(true);
    list.set_input_text("Eggs");

    let outcome = list.submit("Eggs", &mut prompt).unwrap();

    assert!(matches!(outcome, SubmitOutcome::Added { .. }));
    assert_eq!(persisted(&list), vec!["Milk", "Eggs"]);
    assert_eq!(rendered(&list), vec!["Milk", "Eggs"]);
    assert_eq!(list.input_text(), "");
    assert!(prompt.alerts().is_empty());
}

#[test]
fn submit_trims_surrounding_whitespace() {
    let mut list = empty_list();
    let mut prompt = ScriptedPrompt::answering(true);

    list.submit("  Butter  ", &mut prompt).unwrap();

    assert_eq!(persisted(&list), vec!["Butter"]);
}

#[test]
fn submit_empty_text_alerts_and_changes_nothing() {
    let mut list = list_with(&["Milk"]);
    let mut prompt = ScriptedPrompt::answering(true);

    let err = list.submit("", &mut prompt).unwrap_err();
    assert!(matches!(err, IntentError::EmptyInput));
    let err = list.submit("   ", &mut prompt).unwrap_err();
    assert!(matches!(err, IntentError::EmptyInput));

    assert_eq!(prompt.alerts(), &[EMPTY_INPUT_MESSAGE, EMPTY_INPUT_MESSAGE]);
    assert_eq!(persisted(&list), vec!["Milk"]);
    assert_eq!(rendered(&list), vec!["Milk"]);
}

#[test]
fn duplicate_submit_is_rejected_ignoring_case() {
    let mut list = empty_list();
    let mut prompt = ScriptedPrompt::answering(true);

    list.submit("Milk", &mut prompt).unwrap();
    list.submit("Eggs", &mut prompt).unwrap();
    let err = list.submit("milk", &mut prompt).unwrap_err();

    assert!(matches!(err, IntentError::DuplicateItem(ref text) if text == "milk"));
    assert_eq!(prompt.alerts(), &[DUPLICATE_ITEM_MESSAGE]);
    assert_eq!(persisted(&list), vec!["Milk", "Eggs"]);
    assert_eq!(rendered(&list), vec!["Milk", "Eggs"]);
}

#[test]
fn select_for_edit_enters_edit_mode_without_touching_storage() {
    let mut list = list_with(&["Milk", "Eggs"]);
    let before = list.repository().store().get("items").unwrap();
    let eggs = row_id(&list, "Eggs");

    list.select_for_edit(eggs).unwrap();

    assert_eq!(list.edit_state(), EditState::Editing(eggs));
    assert_eq!(list.input_text(), "Eggs");
    assert_eq!(list.affordances().submit, SubmitMode::Update);
    let snapshot = list.snapshot();
    assert_eq!(snapshot.submit_label, "Update Item");
    assert_eq!(snapshot.submit_color, "#228B22");
    assert_eq!(snapshot.editing, Some(eggs));
    assert_eq!(
        snapshot.rows.iter().filter(|row| row.editing).count(),
        1
    );
    assert_eq!(list.repository().store().get("items").unwrap(), before);
}

#[test]
fn selecting_another_row_moves_the_edit_marker() {
    let mut list = list_with(&["Milk", "Eggs"]);
    let milk = row_id(&list, "Milk");
    let eggs = row_id(&list, "Eggs");

    list.select_for_edit(milk).unwrap();
    list.select_for_edit(eggs).unwrap();

    assert_eq!(list.edit_state(), EditState::Editing(eggs));
    assert!(!list.rendered().get(milk).unwrap().editing);
    assert!(list.rendered().get(eggs).unwrap().editing);
    assert_eq!(list.input_text(), "Eggs");
}

#[test]
fn select_for_edit_unknown_row_fails() {
    let mut list = list_with(&["Milk"]);
    let err = list.select_for_edit(uuid::Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, IntentError::RowNotFound(_)));
    assert_eq!(list.edit_state(), EditState::Idle);
}

#[test]
fn edit_submit_replaces_old_text_and_returns_to_idle() {
    let mut list = list_with(&["Milk", "Eggs", "Bread"]);
    let mut prompt = ScriptedPrompt::answering(true);
    let milk = row_id(&list, "Milk");

    list.select_for_edit(milk).unwrap();
    let outcome = list.submit("Oat Milk", &mut prompt).unwrap();

    match outcome {
        SubmitOutcome::Updated { previous, .. } => assert_eq!(previous, "Milk"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(persisted(&list), vec!["Eggs", "Bread", "Oat Milk"]);
    assert_eq!(rendered(&list), vec!["Eggs", "Bread", "Oat Milk"]);
    assert_eq!(list.edit_state(), EditState::Idle);
    assert!(list.rows().iter().all(|row| !row.editing));
    assert_eq!(list.affordances().submit, SubmitMode::Add);
    assert_eq!(list.input_text(), "");
}

#[test]
fn edit_to_existing_item_is_rejected_and_keeps_editing() {
    let mut list = list_with(&["Milk", "Eggs"]);
    let mut prompt = ScriptedPrompt::answering(true);
    let eggs = row_id(&list, "Eggs");

    list.select_for_edit(eggs).unwrap();
    let err = list.submit("MILK", &mut prompt).unwrap_err();

    assert!(matches!(err, IntentError::DuplicateItem(_)));
    assert_eq!(persisted(&list), vec!["Milk", "Eggs"]);
    assert_eq!(list.edit_state(), EditState::Editing(eggs));
}

#[test]
fn edit_to_own_unchanged_text_is_treated_as_duplicate() {
    let mut list = list_with(&["Bread"]);
    let mut prompt = ScriptedPrompt::answering(true);
    let bread = row_id(&list, "Bread");

    list.select_for_edit(bread).unwrap();
    let err = list.submit("Bread", &mut prompt).unwrap_err();

    assert!(matches!(err, IntentError::DuplicateItem(_)));
    assert_eq!(prompt.alerts(), &[DUPLICATE_ITEM_MESSAGE]);
    assert_eq!(persisted(&list), vec!["Bread"]);
}

#[test]
fn declined_removal_changes_nothing() {
    let mut list = list_with(&["Milk", "Eggs"]);
    let mut prompt = ScriptedPrompt::answering(false);
    let milk = row_id(&list, "Milk");

    let err = list.remove_row(milk, &mut prompt).unwrap_err();

    assert!(matches!(err, IntentError::UserDeclined));
    assert_eq!(prompt.questions(), &[REMOVE_CONFIRM_MESSAGE]);
    assert_eq!(persisted(&list), vec!["Milk", "Eggs"]);
    assert_eq!(rendered(&list), vec!["Milk", "Eggs"]);
}

#[test]
fn confirmed_removal_removes_row_and_entry() {
    let mut list = list_with(&["Milk", "Eggs", "Bread"]);
    let mut prompt = ScriptedPrompt::answering(true);
    let eggs = row_id(&list, "Eggs");

    list.remove_row(eggs, &mut prompt).unwrap();

    assert_eq!(persisted(&list), vec!["Milk", "Bread"]);
    assert_eq!(rendered(&list), vec!["Milk", "Bread"]);
    assert!(list.rendered().get(eggs).is_none());
}

#[test]
fn removal_of_unknown_row_does_not_prompt() {
    let mut list = list_with(&["Milk"]);
    let mut prompt = ScriptedPrompt::answering(true);

    let err = list.remove_row(uuid::Uuid::new_v4(), &mut prompt).unwrap_err();

    assert!(matches!(err, IntentError::RowNotFound(_)));
    assert!(prompt.questions().is_empty());
}

#[test]
fn removal_leaves_edit_mode() {
    let mut list = list_with(&["Milk", "Eggs"]);
    let mut prompt = ScriptedPrompt::answering(true);
    let milk = row_id(&list, "Milk");
    let eggs = row_id(&list, "Eggs");

    list.select_for_edit(milk).unwrap();
    list.remove_row(eggs, &mut prompt).unwrap();

    assert_eq!(list.edit_state(), EditState::Idle);
    assert!(list.rows().iter().all(|row| !row.editing));
    assert_eq!(list.input_text(), "");
}

#[test]
fn removing_last_row_hides_affordances() {
    let mut list = list_with(&["Milk"]);
    let mut prompt = ScriptedPrompt::answering(true);
    assert!(list.affordances().clear_visible);
    assert!(list.affordances().filter_visible);

    let milk = row_id(&list, "Milk");
    list.remove_row(milk, &mut prompt).unwrap();

    assert!(!list.affordances().clear_visible);
    assert!(!list.affordances().filter_visible);
    assert!(persisted(&list).is_empty());
}

#[test]
fn clear_all_deletes_entry_and_hides_affordances() {
    let mut list = list_with(&["Milk", "Eggs"]);
    let milk = row_id(&list, "Milk");
    list.select_for_edit(milk).unwrap();

    list.clear_all().unwrap();

    assert!(!list.repository().store().contains_key("items"));
    assert!(persisted(&list).is_empty());
    assert!(list.rows().is_empty());
    assert!(!list.affordances().clear_visible);
    assert!(!list.affordances().filter_visible);
    assert_eq!(list.edit_state(), EditState::Idle);
    assert!(!list.exists("milk").unwrap());
}

#[test]
fn clear_all_on_empty_list_is_harmless() {
    let mut list = empty_list();
    list.clear_all().unwrap();
    assert!(list.rows().is_empty());
}

#[test]
fn filter_toggles_visibility_without_mutation() {
    let mut list = list_with(&["Oat Milk", "Eggs", "MILKSHAKE"]);

    let visible = list.filter("milk");

    assert_eq!(visible, 2);
    assert_eq!(list.snapshot().visible_texts(), vec!["Oat Milk", "MILKSHAKE"]);
    assert_eq!(persisted(&list), vec!["Oat Milk", "Eggs", "MILKSHAKE"]);
    assert_eq!(rendered(&list), vec!["Oat Milk", "Eggs", "MILKSHAKE"]);
    assert_eq!(list.filter_text(), "milk");

    assert_eq!(list.filter(""), 3);
    assert!(list.rows().iter().all(|row| row.visible));
}

#[test]
fn filter_with_no_match_hides_everything() {
    let mut list = list_with(&["Milk", "Eggs"]);
    assert_eq!(list.filter("abc"), 0);
    assert!(list.rows().iter().all(|row| !row.visible));
}

#[test]
fn initial_load_reconstructs_rows_from_storage() {
    let mut list = empty_list();
    let mut prompt = ScriptedPrompt::answering(true);
    list.submit("Milk", &mut prompt).unwrap();
    list.submit("Eggs", &mut prompt).unwrap();
    list.submit("Bread", &mut prompt).unwrap();
    let eggs = row_id(&list, "Eggs");
    list.remove_row(eggs, &mut prompt).unwrap();
    let milk = row_id(&list, "Milk");
    list.select_for_edit(milk).unwrap();
    list.submit("Butter", &mut prompt).unwrap();
    list.filter("bu");

    let count = list.initial_load().unwrap();

    assert_eq!(count, 2);
    assert_eq!(rendered(&list), persisted(&list));
    assert_eq!(rendered(&list), vec!["Bread", "Butter"]);
    assert!(list.rows().iter().all(|row| row.visible));
    assert_eq!(list.filter_text(), "");
}

#[test]
fn reopening_the_store_renders_persisted_order() {
    let list = list_with(&["Milk", "Eggs"]);
    let store = list.repository().store().clone();

    let reopened = ListController::load(ItemRepository::new(store)).unwrap();

    assert_eq!(rendered(&reopened), vec!["Milk", "Eggs"]);
    assert_eq!(reopened.edit_state(), EditState::Idle);
    assert_eq!(reopened.affordances().submit, SubmitMode::Add);
    assert!(reopened.affordances().clear_visible);
}

#[test]
fn initial_load_on_empty_store_hides_affordances() {
    let list = empty_list();
    let snapshot = list.snapshot();
    assert!(snapshot.rows.is_empty());
    assert!(!snapshot.clear_visible);
    assert!(!snapshot.filter_visible);
    assert_eq!(snapshot.submit_label, "Add Item");
    assert_eq!(snapshot.submit_color, "#333");
}

#[test]
fn corrupt_storage_entry_is_reported() {
    let mut store = MemoryKvStore::new();
    store.set("items", "{not json").unwrap();

    let err = match ListController::load(ItemRepository::new(store)) {
        Ok(_) => panic!("corrupt entry must not load"),
        Err(err) => err,
    };
    assert!(matches!(err, IntentError::Repo(_)));
}

/// Store whose writes can be switched off to observe paired-mutation behavior.
struct FlakyStore {
    inner: MemoryKvStore,
    fail_writes: bool,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::Backend("quota exceeded".to_string()));
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::Backend("quota exceeded".to_string()));
        }
        self.inner.remove(key)
    }
}

#[test]
fn failed_storage_write_leaves_rows_untouched() {
    let mut inner = MemoryKvStore::new();
    inner.set("items", r#"["Milk"]"#).unwrap();
    let store = FlakyStore {
        inner,
        fail_writes: true,
    };
    let mut list = ListController::load(ItemRepository::new(store)).unwrap();
    let mut prompt = ScriptedPrompt::answering(true);

    let err = list.submit("Eggs", &mut prompt).unwrap_err();
    assert!(matches!(err, IntentError::Repo(_)));
    assert_eq!(
        list.rows().iter().map(|row| row.text()).collect::<Vec<_>>(),
        vec!["Milk"]
    );

    let milk = list.rows()[0].id;
    list.select_for_edit(milk).unwrap();
    assert!(list.submit("Butter", &mut prompt).is_err());
    assert_eq!(list.edit_state(), EditState::Editing(milk));
    assert_eq!(list.rows()[0].text(), "Milk");

    assert!(list.remove_row(milk, &mut prompt).is_err());
    assert_eq!(list.rows().len(), 1);

    assert!(list.clear_all().is_err());
    assert_eq!(list.rows().len(), 1);
}
