//! Scrollable, searchable list of merge/pull requests.

use bubbletea_rs::event::KeyMsg;
use crossterm::event::KeyCode;

use crate::platform::MergeRequest;
use crate::tui::input;
use crate::tui::ticket::extract_ticket;

use super::text::truncate;

/// List component owning cursor, scroll and search state over an immutable
/// snapshot of requests.
///
/// Filtering is a case-insensitive substring match over the title, the
/// source branch, and the `#number` form of the request number. The filter
/// is recomputed against the full snapshot on every query edit, so deleting
/// characters restores previously hidden rows.
#[derive(Debug, Default)]
pub struct RequestList {
    requests: Vec<MergeRequest>,
    filtered: Vec<usize>,
    cursor: usize,
    searching: bool,
    query: String,
}

impl RequestList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the snapshot wholesale, clearing search state and resetting
    /// the cursor.
    pub fn set_requests(&mut self, requests: Vec<MergeRequest>) {
        self.requests = requests;
        self.searching = false;
        self.query.clear();
        self.cursor = 0;
        self.rebuild_filter();
    }

    /// Returns the request under the cursor, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&MergeRequest> {
        self.filtered
            .get(self.cursor)
            .and_then(|&index| self.requests.get(index))
    }

    /// Returns true while the search prompt captures keystrokes.
    #[must_use]
    pub const fn is_searching(&self) -> bool {
        self.searching
    }

    /// Returns the current search query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Number of rows passing the current filter.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.filtered.len()
    }

    /// Moves the cursor one row up, saturating at the top.
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor one row down, saturating at the bottom.
    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.filtered.len() {
            self.cursor += 1;
        }
    }

    /// Enters search mode; subsequent keys edit the query.
    pub fn start_search(&mut self) {
        self.searching = true;
    }

    /// Handles a keystroke while the search prompt is active.
    ///
    /// Escape cancels the search and clears the query; enter confirms and
    /// keeps the filter applied. Every edit rebuilds the filter from the
    /// full snapshot.
    pub fn handle_search_key(&mut self, key: &KeyMsg) {
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
            .requests
            .iter()
            .enumerate()
            .filter(|(_, request)| {
                needle.is_empty()
                    || request.title.to_lowercase().contains(&needle)
                    || request.branch.to_lowercase().contains(&needle)
                    || format!("#{}", request.number).contains(&needle)
            })
            .map(|(index, _)| index)
            .collect();
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        if self.filtered.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.filtered.len() {
            self.cursor = self.filtered.len() - 1;
        }
    }

    /// Renders the list to fit `width` columns and `height` rows.
    #[must_use]
    pub fn view(&self, width: usize, height: usize) -> String {
        let mut lines = Vec::new();
        if self.searching || !self.query.is_empty() {
            let marker = if self.searching { "/" } else { "filter: " };
            lines.push(format!("{marker}{}", self.query));
        }
        if self.filtered.is_empty() {
            let empty = if self.query.is_empty() {
                "No requests found."
            } else {
                "No requests match the filter."
            };
            lines.push(empty.to_owned());
            return lines.join("\n");
        }

        let rows = height.saturating_sub(lines.len()).max(1);
        let first = self.first_visible_row(rows);
        for (offset, &index) in self.filtered.iter().enumerate().skip(first).take(rows) {
            if let Some(request) = self.requests.get(index) {
                lines.push(self.render_row(request, offset == self.cursor, width));
            }
        }
        lines.join("\n")
    }

    fn first_visible_row(&self, rows: usize) -> usize {
        if self.cursor < rows {
            0
        } else {
            self.cursor + 1 - rows
        }
    }

    fn render_row(&self, request: &MergeRequest, selected: bool, width: usize) -> String {
        let marker = if selected { ">" } else { " " };
        let ticket = extract_ticket(&request.title)
            .map(|t| format!(" [{t}]"))
            .unwrap_or_default();
        let row = format!(
            "{marker} #{} {} ({}) [{}]{ticket}",
            request.number, request.title, request.branch, request.status,
        );
        truncate(&row, width.max(20))
    }
}
