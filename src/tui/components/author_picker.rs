//! Modal picker for choosing the author filter.

use bubbletea_rs::event::KeyMsg;
use crossterm::event::KeyCode;

use crate::platform::Author;
use crate::tui::input;

use super::text::truncate;

/// What a keystroke routed into the picker asks the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// The picker consumed the key; nothing for the session to do.
    None,
    /// The picker was dismissed without changing the filter.
    Dismiss,
    /// An author was chosen; reload the list filtered to this username.
    Selected(String),
}

/// Modal list of repository contributors, with the synthetic `@me` entry
/// prepended so the default filter is always selectable.
///
/// Search state is managed the same way as the request list: escape cancels
/// and clears, enter confirms and keeps the filter.
#[derive(Debug)]
pub struct AuthorPicker {
    authors: Vec<Author>,
    filtered: Vec<usize>,
    cursor: usize,
    searching: bool,
    query: String,
}

impl AuthorPicker {
    /// Creates a picker over `authors`, prepending the `@me` entry.
    #[must_use]
    pub fn new(authors: Vec<Author>) -> Self {
        let mut all = Vec::with_capacity(authors.len() + 1);
        all.push(Author::current_user());
        all.extend(authors);
        let filtered = (0..all.len()).collect();
        Self {
            authors: all,
            filtered,
            cursor: 0,
            searching: false,
            query: String::new(),
        }
    }

    /// Handles a keystroke while the picker is the active modal.
    pub fn handle_key(&mut self, key: &KeyMsg) -> PickerEvent {
        if self.searching {
            self.handle_search_key(key);
            return PickerEvent::None;
        }
        if input::is_dismiss(key) {
            return PickerEvent::Dismiss;
        }
        if input::is_confirm(key) {
            return PickerEvent::Selected(self.selected_username());
        }
        if input::is_up(key) {
            self.cursor = self.cursor.saturating_sub(1);
        } else if input::is_down(key) {
            if self.cursor + 1 < self.filtered.len() {
                self.cursor += 1;
            }
        } else if input::is_search(key) {
            self.searching = true;
        }
        PickerEvent::None
    }

    fn handle_search_key(&mut self, key: &KeyMsg) {
        if input::is_dismiss(key) {
            self.searching = false;
            self.query.clear();
            self.rebuild_filter();
            return;
        }
        if input::is_confirm(key) {
            self.searching = false;
            return;
        }
        match key.key {
            KeyCode::Backspace => {
                self.query.pop();
                self.rebuild_filter();
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.rebuild_filter();
            }
            _ => {}
        }
    }

    fn rebuild_filter(&mut self) {
        let needle = self.query.to_lowercase();
        self.filtered = self
            .authors
            .iter()
            .enumerate()
            .filter(|(_, author)| {
                needle.is_empty()
                    || author.username.to_lowercase().contains(&needle)
                    || author.name.to_lowercase().contains(&needle)
            })
            .map(|(index, _)| index)
            .collect();
        if self.filtered.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.filtered.len() {
            self.cursor = self.filtered.len() - 1;
        }
    }

    /// Username under the cursor, defaulting to `@me` when the filter hides
    /// every row.
    #[must_use]
    pub fn selected_username(&self) -> String {
        self.filtered
            .get(self.cursor)
            .and_then(|&index| self.authors.get(index))
            .map_or_else(|| Author::SELF.to_owned(), |a| a.username.clone())
    }

    /// Renders the picker to fit `width` columns.
    #[must_use]
    pub fn view(&self, width: usize) -> String {
        let mut lines = vec!["Filter by author".to_owned(), String::new()];
        if self.searching || !self.query.is_empty() {
            let marker = if self.searching { "/" } else { "filter: " };
            lines.push(format!("{marker}{}", self.query));
        }
        if self.filtered.is_empty() {
            lines.push("No authors match the filter.".to_owned());
        }
        for (offset, &index) in self.filtered.iter().enumerate() {
            if let Some(author) = self.authors.get(index) {
                let marker = if offset == self.cursor { ">" } else { " " };
                let label = if author.name.is_empty() || author.name == author.username {
                    author.username.clone()
                } else {
                    format!("{} ({})", author.username, author.name)
                };
                lines.push(truncate(&format!("{marker} {label}"), width.max(20)));
            }
        }
        lines.push(String::new());
        lines.push("enter: select  esc: cancel  /: search".to_owned());
        lines.join("\n")
    }
}
