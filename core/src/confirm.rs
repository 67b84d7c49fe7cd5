//! Confirmation prompts for destructive actions.
//!
//! Elements carrying the `confirm-action` class ask the user before their
//! default action runs; a `confirm-message` data attribute overrides the
//! prompt text.

use std::collections::HashMap;

pub const CONFIRM_CLASS: &str = "confirm-action";
pub const CONFIRM_MESSAGE_ATTR: &str = "confirm-message";
pub const DEFAULT_CONFIRM_MESSAGE: &str = "Are you sure you want to perform this action?";

/// The clicked element, as far as confirmation cares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTarget {
    pub classes: Vec<String>,
    pub data: HashMap<String, String>,
}

impl ActionTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_data(mut self, key: &str, value: &str) -> Self {
        self.data.insert(key.to_string(), value.to_string());
        self
    }

    pub fn needs_confirmation(&self) -> bool {
        self.classes.iter().any(|c| c == CONFIRM_CLASS)
    }

    /// Prompt text. An empty attribute counts as absent.
    pub fn confirm_message(&self) -> &str {
        self.data
            .get(CONFIRM_MESSAGE_ATTR)
            .map(String::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_CONFIRM_MESSAGE)
    }
}

/// Asks the user a yes/no question.
pub trait Confirmer {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirmer for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Let the default action run.
    Proceed,
    /// The user declined; suppress the default action.
    Prevent,
}

/// Decide what happens to a click on `target`.
pub fn intercept(target: &ActionTarget, confirmer: &impl Confirmer) -> Disposition {
    if !target.needs_confirmation() {
        return Disposition::Proceed;
    }
    if confirmer.confirm(target.confirm_message()) {
        Disposition::Proceed
    } else {
        tracing::debug!("action declined");
        Disposition::Prevent
    }
}
