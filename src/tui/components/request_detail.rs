//! Detail modal for a single merge/pull request.
//!
//! The modal opens immediately with the list-row summary and shows a
//! loading indicator until the detail arrives. Two read-only overlays (full
//! description, commit log) live inside the modal so the session never has
//! more than one modal on screen.

use bubbletea_rs::event::KeyMsg;
use crossterm::event::KeyCode;

use crate::platform::{Commit, MergeRequest, MergeRequestDetail, PlatformError};
use crate::tui::input;
use crate::tui::ticket::extract_ticket;

use super::text::{truncate, wrap};

/// What a keystroke routed into the detail modal asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailIntent {
    /// The modal consumed the key; nothing for the session to do.
    None,
    /// Close the modal and return to the list.
    Dismiss,
    /// Check out this request's source branch.
    Checkout,
    /// Open the request's web URL in a browser.
    OpenBrowser,
    /// Fetch the commit log; the commits overlay is already showing its
    /// loading state.
    LoadCommits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlay {
    Description { scroll: usize },
    Commits { cursor: usize },
}

/// Modal showing a request's description, changed files and commit log.
#[derive(Debug)]
pub struct RequestDetailModal {
    request: MergeRequest,
    detail: Option<MergeRequestDetail>,
    commits: Option<Vec<Commit>>,
    loading: bool,
    commits_loading: bool,
    error: Option<String>,
    overlay: Option<Overlay>,
    file_scroll: usize,
}

impl RequestDetailModal {
    /// Opens the modal for `request`; the detail load is still in flight.
    #[must_use]
    pub fn new(request: MergeRequest) -> Self {
        Self {
            request,
            detail: None,
            commits: None,
            loading: true,
            commits_loading: false,
            error: None,
            overlay: None,
            file_scroll: 0,
        }
    }

    /// Number of the request this modal shows.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.request.number
    }

    /// Source branch of the request this modal shows.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.request.branch
    }

    /// Summary row this modal was opened from.
    #[must_use]
    pub const fn request(&self) -> &MergeRequest {
        &self.request
    }

    /// Returns true while the detail load is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading || self.commits_loading
    }

    /// Records the outcome of the detail load.
    pub fn detail_loaded(&mut self, result: Result<MergeRequestDetail, PlatformError>) {
        self.loading = false;
        match result {
            Ok(detail) => self.detail = Some(detail),
            Err(error) => self.error = Some(error.to_string()),
        }
    }

    /// Records the outcome of the commit-log load.
    pub fn commits_loaded(&mut self, result: Result<Vec<Commit>, PlatformError>) {
        self.commits_loading = false;
        match result {
            Ok(commits) => self.commits = Some(commits),
            Err(error) => self.error = Some(error.to_string()),
        }
    }

    /// Handles a keystroke while the modal is active.
    pub fn handle_key(&mut self, key: &KeyMsg) -> DetailIntent {
        if let Some(overlay) = self.overlay {
            self.handle_overlay_key(overlay, key);
            return DetailIntent::None;
        }
        if input::is_dismiss(key) {
            return DetailIntent::Dismiss;
        }
        if input::is_confirm(key) {
            return DetailIntent::Checkout;
        }
        if input::is_up(key) {
            self.file_scroll = self.file_scroll.saturating_sub(1);
            return DetailIntent::None;
        }
        if input::is_down(key) {
            let files = self.detail.as_ref().map_or(0, |d| d.files.len());
            self.file_scroll = (self.file_scroll + 1).min(files.saturating_sub(1));
            return DetailIntent::None;
        }
        match key.key {
            KeyCode::Char('m') => DetailIntent::Checkout,
            KeyCode::Char('w') => DetailIntent::OpenBrowser,
            KeyCode::Char('v') => {
                self.overlay = Some(Overlay::Description { scroll: 0 });
                DetailIntent::None
            }
            KeyCode::Char('c') => self.open_commits_overlay(),
            _ => DetailIntent::None,
        }
    }

    fn open_commits_overlay(&mut self) -> DetailIntent {
        self.overlay = Some(Overlay::Commits { cursor: 0 });
        if self.commits.is_none() && !self.commits_loading {
            self.commits_loading = true;
            return DetailIntent::LoadCommits;
        }
        DetailIntent::None
    }

    fn handle_overlay_key(&mut self, overlay: Overlay, key: &KeyMsg) {
        if input::is_dismiss(key) {
            self.overlay = None;
            return;
        }
        let down = input::is_down(key);
        let up = input::is_up(key);
        self.overlay = Some(match overlay {
            Overlay::Description { scroll } => Overlay::Description {
                scroll: Self::step(scroll, up, down),
            },
            Overlay::Commits { cursor } => {
                let limit = self.commits.as_ref().map_or(0, Vec::len);
                let next = Self::step(cursor, up, down);
                Overlay::Commits {
                    cursor: next.min(limit.saturating_sub(1)),
                }
            }
        });
    }

    const fn step(position: usize, up: bool, down: bool) -> usize {
        if up {
            position.saturating_sub(1)
        } else if down {
            position + 1
        } else {
            position
        }
    }

    /// Renders the modal to fit `width` columns and `height` rows.
    #[must_use]
    pub fn view(&self, width: usize, height: usize, spinner: &str) -> String {
        let width = width.max(20);
        let mut lines = Vec::new();
        let ticket = extract_ticket(&self.request.title)
            .map(|t| format!(" [{t}]"))
            .unwrap_or_default();
        lines.push(truncate(
            &format!("#{} {}{ticket}", self.request.number, self.request.title),
            width,
        ));
        lines.push(format!(
            "{} <- {}",
            self.request.status, self.request.branch
        ));
        lines.push(String::new());

        match self.overlay {
            Some(Overlay::Description { scroll }) => {
                self.render_description(&mut lines, width, height, scroll);
            }
            Some(Overlay::Commits { cursor }) => {
                self.render_commits(&mut lines, width, spinner, cursor);
            }
            None => self.render_body(&mut lines, width, height, spinner),
        }

        lines.push(String::new());
        lines.push(self.footer().to_owned());
        lines.join("\n")
    }

    fn render_body(&self, lines: &mut Vec<String>, width: usize, height: usize, spinner: &str) {
        if self.loading {
            lines.push(format!("{spinner} Loading detail..."));
            return;
        }
        if let Some(error) = &self.error {
            lines.push(format!("Error: {error}"));
        }
        let Some(detail) = &self.detail else {
            return;
        };
        if !detail.body.is_empty() {
            for line in wrap(&detail.body, width).into_iter().take(4) {
                lines.push(line);
            }
            lines.push(String::new());
        }
        lines.push(format!(
            "{} files  +{} -{}",
            detail.files.len(),
            detail.additions,
            detail.deletions,
        ));
        let rows = height.saturating_sub(lines.len() + 2).max(1);
        let first = self.file_scroll.min(detail.files.len().saturating_sub(1));
        for file in detail.files.iter().skip(first).take(rows) {
            lines.push(truncate(
                &format!("  {} +{} -{}", file.path, file.additions, file.deletions),
                width,
            ));
        }
    }

    fn render_description(
        &self,
        lines: &mut Vec<String>,
        width: usize,
        height: usize,
        scroll: usize,
    ) {
        lines.push("Description".to_owned());
        let body = self.detail.as_ref().map_or("", |d| d.body.as_str());
        if body.is_empty() {
            lines.push("(no description)".to_owned());
            return;
        }
        let wrapped = wrap(body, width);
        let rows = height.saturating_sub(lines.len() + 2).max(1);
        let first = scroll.min(wrapped.len().saturating_sub(1));
        for line in wrapped.into_iter().skip(first).take(rows) {
            lines.push(line);
        }
    }

    fn render_commits(&self, lines: &mut Vec<String>, width: usize, spinner: &str, cursor: usize) {
        lines.push("Commits".to_owned());
        if self.commits_loading {
            lines.push(format!("{spinner} Loading commits..."));
            return;
        }
        let Some(commits) = &self.commits else {
            return;
        };
        if commits.is_empty() {
            lines.push("(no commits)".to_owned());
            return;
        }
        for (offset, commit) in commits.iter().enumerate() {
            let marker = if offset == cursor { ">" } else { " " };
            lines.push(truncate(
                &format!(
                    "{marker} {} {} ({}, {})",
                    commit.sha, commit.message, commit.author, commit.date,
                ),
                width,
            ));
        }
    }

    fn footer(&self) -> &'static str {
        if self.overlay.is_some() {
            "j/k: scroll  esc: back"
        } else {
            "m: checkout  v: description  c: commits  w: browser  esc: close"
        }
    }
}
