//! Input helpers for the session update loop.
//!
//! Key routing depends on which modal is active, so most key handling lives
//! next to the state it drives. The helpers here classify the few
//! combinations that behave the same everywhere.

use bubbletea_rs::event::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// Returns true for the global quit chords (`q`, ctrl-c).
#[must_use]
pub fn is_quit(key: &KeyMsg) -> bool {
    match key.key {
        KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Returns true when the key confirms (`enter`).
#[must_use]
pub const fn is_confirm(key: &KeyMsg) -> bool {
    matches!(key.key, KeyCode::Enter)
}

/// Returns true when the key dismisses (`esc`).
#[must_use]
pub const fn is_dismiss(key: &KeyMsg) -> bool {
    matches!(key.key, KeyCode::Esc)
}

/// Returns true for cursor-up movement (`k`, up arrow).
#[must_use]
pub const fn is_up(key: &KeyMsg) -> bool {
    matches!(key.key, KeyCode::Char('k') | KeyCode::Up)
}

/// Returns true for cursor-down movement (`j`, down arrow).
#[must_use]
pub const fn is_down(key: &KeyMsg) -> bool {
    matches!(key.key, KeyCode::Char('j') | KeyCode::Down)
}

/// Returns true for the search-mode entry keys (`/`, `f`).
#[must_use]
pub const fn is_search(key: &KeyMsg) -> bool {
    matches!(key.key, KeyCode::Char('/') | KeyCode::Char('f'))
}

#[cfg(test)]
pub(crate) fn key(code: KeyCode) -> KeyMsg {
    KeyMsg {
        key: code,
        modifiers: KeyModifiers::empty(),
    }
}

#[cfg(test)]
pub(crate) fn ctrl(code: KeyCode) -> KeyMsg {
    KeyMsg {
        key: code,
        modifiers: KeyModifiers::CONTROL,
    }
}
