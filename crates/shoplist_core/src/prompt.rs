//! Blocking user notification and confirmation seam.
//!
//! # Responsibility
//! - Let intents surface alerts and yes/no confirmations without knowing the
//!   front end.
//!
//! # Invariants
//! - `confirm` blocks until the user answers; no intent proceeds meanwhile.

/// Alert shown when submitting blank text.
pub const EMPTY_INPUT_MESSAGE: &str = "Please add an item";
/// Alert shown when the submitted text duplicates an existing item.
pub const DUPLICATE_ITEM_MESSAGE: &str = "That item already exists!";
/// Question asked before removing a row.
pub const REMOVE_CONFIRM_MESSAGE: &str = "Do you want to remove this item?";

/// Front-end hooks for alerts and confirmations.
pub trait UserPrompt {
    fn alert(&mut self, message: &str);
    fn confirm(&mut self, message: &str) -> bool;
}

/// Prompt with a preset confirmation answer that records every message.
///
/// Used where the answer is known before the intent runs (FFI calls, tests).
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answer: bool,
    alerts: Vec<String>,
    questions: Vec<String>,
}

impl ScriptedPrompt {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }

    pub fn alerts(&self) -> &[String] {
        self.alerts.as_slice()
    }

    pub fn questions(&self) -> &[String] {
        self.questions.as_slice()
    }
}

impl UserPrompt for ScriptedPrompt {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.questions.push(message.to_string());
        self.answer
    }
}
