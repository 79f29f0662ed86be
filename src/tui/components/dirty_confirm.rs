//! Confirmation modal shown when a checkout would touch a dirty tree.

use bubbletea_rs::event::KeyMsg;
use crossterm::event::KeyCode;

use crate::tui::input;

/// The user's answer to the dirty-tree prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// No answer yet; the key was ignored.
    Pending,
    /// Proceed with the checkout despite local changes.
    Proceed,
    /// Abandon the checkout.
    Cancel,
}

/// Modal asking whether to check out over uncommitted local changes.
#[derive(Debug)]
pub struct DirtyConfirmModal {
    branch: String,
}

impl DirtyConfirmModal {
    /// Opens the prompt for a checkout of `branch`.
    #[must_use]
    pub fn new(branch: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
        }
    }

    /// Branch the pending checkout targets.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Handles a keystroke: `y`/enter proceeds, `n`/esc cancels.
    #[must_use]
    pub fn handle_key(&self, key: &KeyMsg) -> ConfirmOutcome {
        if input::is_confirm(key) {
            return ConfirmOutcome::Proceed;
        }
        if input::is_dismiss(key) {
            return ConfirmOutcome::Cancel;
        }
        match key.key {
            KeyCode::Char('y') => ConfirmOutcome::Proceed,
            KeyCode::Char('n') => ConfirmOutcome::Cancel,
            _ => ConfirmOutcome::Pending,
        }
    }

    /// Renders the prompt.
    #[must_use]
    pub fn view(&self) -> String {
        format!(
            "Working tree has uncommitted changes.\n\n\
             Check out {} anyway?\n\n\
             y/enter: proceed  n/esc: cancel",
            self.branch
        )
    }
}
