//! Modal-first keyboard routing.
//!
//! The active modal always sees keystrokes before the base view, so a `q`
//! typed into a search prompt inserts a character instead of quitting. Only
//! ctrl-c quits unconditionally.

use bubbletea_rs::Cmd;
use bubbletea_rs::event::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

use crate::tui::components::{
    AuthorPicker, ConfirmOutcome, DetailIntent, PickerEvent, RequestDetailModal,
};
use crate::tui::input;

use super::{ActiveModal, Dashboard};

fn is_interrupt(key: &KeyMsg) -> bool {
    matches!(key.key, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL)
}

impl Dashboard {
    /// Routes a keystroke to the active modal or the base view.
    pub(super) fn handle_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        if is_interrupt(key) {
            return Some(bubbletea_rs::quit());
        }
        match self.modal.take() {
            Some(modal) => self.route_modal_key(modal, key),
            None => self.handle_base_key(key),
        }
    }

    /// Routes a keystroke into `modal`, which has been taken out of the
    /// model; every branch must either restore it or deliberately leave it
    /// closed.
    fn route_modal_key(&mut self, mut modal: ActiveModal, key: &KeyMsg) -> Option<Cmd> {
        match &mut modal {
            ActiveModal::AuthorPicker(picker) => match picker.handle_key(key) {
                PickerEvent::None => {
                    self.modal = Some(modal);
                    None
                }
                PickerEvent::Dismiss => None,
                PickerEvent::Selected(author) => self.apply_author(author),
            },
            ActiveModal::Detail(detail) => match detail.handle_key(key) {
                DetailIntent::None => {
                    self.modal = Some(modal);
                    None
                }
                DetailIntent::Dismiss => {
                    // Backing out of the view that raised a checkout intent
                    // drops the intent with it; an in-flight dirty check
                    // becomes stale.
                    self.pending_checkout = None;
                    None
                }
                DetailIntent::Checkout => {
                    let branch = detail.branch().to_owned();
                    let request = detail.request().clone();
                    // The detail modal stays up while the dirty check runs;
                    // the guard's next modal replaces it.
                    self.modal = Some(modal);
                    self.request_checkout(branch, Some(request))
                }
                DetailIntent::OpenBrowser => {
                    let url = detail.request().url.clone();
                    self.modal = Some(modal);
                    Some(Self::open_browser_cmd(url))
                }
                DetailIntent::LoadCommits => {
                    let number = detail.number();
                    self.modal = Some(modal);
                    Some(Self::load_commits_cmd(number))
                }
            },
            ActiveModal::DirtyConfirm(confirm) => match confirm.handle_key(key) {
                ConfirmOutcome::Pending => {
                    self.modal = Some(modal);
                    None
                }
                ConfirmOutcome::Proceed => self.start_checkout(),
                ConfirmOutcome::Cancel => {
                    self.cancel_checkout();
                    None
                }
            },
            ActiveModal::Checkout(checkout) => {
                if checkout.is_terminal() {
                    // Any key acknowledges the outcome.
                    return self.acknowledge_checkout();
                }
                if input::is_dismiss(key) {
                    // Dismiss without killing the running checkout; its
                    // late result is dropped as stale.
                    return None;
                }
                self.modal = Some(modal);
                None
            }
        }
    }

    fn handle_base_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        if self.request_list.is_searching() {
            self.request_list.handle_search_key(key);
            return None;
        }
        if input::is_quit(key) {
            return Some(bubbletea_rs::quit());
        }
        if matches!(key.key, KeyCode::Tab) {
            self.active_tab = self.active_tab.next();
            return None;
        }
        match key.key {
            KeyCode::Char('r') => self.handle_refresh(),
            KeyCode::Char('a') => {
                self.modal = Some(ActiveModal::AuthorPicker(AuthorPicker::new(
                    self.authors.clone(),
                )));
                None
            }
            KeyCode::Char('m') => self.handle_default_branch_checkout(),
            KeyCode::Char('w') => self
                .request_list
                .selected()
                .map(|request| Self::open_browser_cmd(request.url.clone())),
            _ => self.handle_list_key(key),
        }
    }

    fn handle_list_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        if self.active_tab != super::Tab::Requests {
            return None;
        }
        if input::is_up(key) {
            self.request_list.move_up();
            return None;
        }
        if input::is_down(key) {
            self.request_list.move_down();
            return None;
        }
        if input::is_search(key) {
            self.request_list.start_search();
            return None;
        }
        if input::is_confirm(key) {
            return self.open_selected_detail();
        }
        None
    }

    /// Ignores refresh while a list load is already in flight.
    fn handle_refresh(&mut self) -> Option<Cmd> {
        if self.loading {
            return None;
        }
        self.loading = true;
        Some(Self::load_requests_cmd(self.author.clone()))
    }

    fn open_selected_detail(&mut self) -> Option<Cmd> {
        let request = self.request_list.selected()?.clone();
        let number = request.number;
        self.modal = Some(ActiveModal::Detail(RequestDetailModal::new(request)));
        Some(Self::load_detail_cmd(number))
    }

    /// Checks out the default branch when it is known and not already
    /// checked out.
    fn handle_default_branch_checkout(&mut self) -> Option<Cmd> {
        let default_branch = self
            .repository
            .as_ref()
            .map(|repo| repo.default_branch.clone())
            .filter(|branch| !branch.is_empty())?;
        if self.current_branch.as_deref() == Some(default_branch.as_str()) {
            return None;
        }
        self.request_checkout(default_branch, None)
    }

    /// Applies a new author filter: clear the list, mark it loading and
    /// reissue the load.
    fn apply_author(&mut self, author: String) -> Option<Cmd> {
        self.author = author;
        self.request_list.set_requests(Vec::new());
        self.loading = true;
        self.error = None;
        Some(Self::load_requests_cmd(self.author.clone()))
    }
}
