//! Session controller for the dashboard, implementing the MVU pattern.
//!
//! `Dashboard` owns all session state and processes every message on the
//! single update thread. Asynchronous work (platform queries, git commands)
//! is dispatched as commands that post [`AppMsg`] results back into the
//! loop.
//!
//! # Module structure
//!
//! - `routing`: modal-first keyboard routing
//! - `load_handlers`: completed-load messages and the load commands
//! - `checkout_handlers`: checkout intents, the dirty-tree guard and the
//!   checkout lifecycle
//! - `rendering`: view rendering

use std::any::Any;

use bubbletea_rs::{Cmd, Model};

use crate::platform::{Author, Host, MergeRequest, RepositoryInfo};

use super::components::{
    AuthorPicker, CheckoutModal, DirtyConfirmModal, RequestDetailModal, RequestList, Spinner,
};
use super::messages::AppMsg;
use super::session_context;

mod checkout_handlers;
mod load_handlers;
mod rendering;
mod routing;

/// The modal currently capturing input, if any.
///
/// At most one modal is ever active; opening a modal replaces the previous
/// one. Layered interactions (description and commit viewers) live inside
/// the detail modal as sub-views rather than as additional modals.
#[derive(Debug)]
pub enum ActiveModal {
    /// Author filter picker.
    AuthorPicker(AuthorPicker),
    /// Request detail.
    Detail(RequestDetailModal),
    /// Dirty-tree confirmation gate.
    DirtyConfirm(DirtyConfirmModal),
    /// Checkout progress and outcome.
    Checkout(CheckoutModal),
}

/// A checkout the user asked for that has not started running yet.
///
/// Held while the dirty check (and possibly the confirmation prompt) is in
/// flight; a new intent supersedes the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCheckout {
    /// Branch the checkout targets.
    pub branch: String,
    /// The request the intent came from, absent for default-branch
    /// checkouts.
    pub request: Option<MergeRequest>,
}

/// Base view selected with the tab key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// The merge/pull request list.
    #[default]
    Requests,
    /// Repository overview.
    Repository,
}

impl Tab {
    /// Returns the next tab in cycle order.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Requests => Self::Repository,
            Self::Repository => Self::Requests,
        }
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Requests => "Requests",
            Self::Repository => "Repository",
        }
    }
}

/// Top-level session state.
#[derive(Debug)]
pub struct Dashboard {
    /// Author filter the request list was loaded for.
    pub(crate) author: String,
    /// Contributor snapshot backing the author picker.
    pub(crate) authors: Vec<Author>,
    /// Request list for the active author filter.
    pub(crate) request_list: RequestList,
    /// Repository metadata for the header, once loaded.
    pub(crate) repository: Option<RepositoryInfo>,
    /// Currently checked-out branch, once loaded.
    pub(crate) current_branch: Option<String>,
    /// The single active modal.
    pub(crate) modal: Option<ActiveModal>,
    /// Checkout waiting on the dirty check or the confirmation prompt.
    pub(crate) pending_checkout: Option<PendingCheckout>,
    /// Base view the tab key cycles through.
    pub(crate) active_tab: Tab,
    /// Whether a request-list load is in flight.
    pub(crate) loading: bool,
    /// Most recent load failure, rendered in place.
    pub(crate) error: Option<String>,
    /// The detected hosting service, for the header.
    pub(crate) host: Option<Host>,
    spinner: Spinner,
    width: u16,
    height: u16,
}

impl Dashboard {
    /// Creates a dashboard with nothing loaded yet.
    #[must_use]
    pub fn new(host: Option<Host>) -> Self {
        Self {
            author: Author::SELF.to_owned(),
            authors: Vec::new(),
            request_list: RequestList::new(),
            repository: None,
            current_branch: None,
            modal: None,
            pending_checkout: None,
            active_tab: Tab::default(),
            loading: true,
            error: None,
            host,
            spinner: Spinner::new(),
            width: 80,
            height: 24,
        }
    }

    /// Returns true while any view is waiting on an asynchronous result.
    pub(crate) fn is_animating(&self) -> bool {
        if self.loading {
            return true;
        }
        match &self.modal {
            Some(ActiveModal::Detail(modal)) => modal.is_loading(),
            Some(ActiveModal::Checkout(modal)) => !modal.is_terminal(),
            _ => false,
        }
    }

    /// Handles a decoded application message.
    pub fn handle_message(&mut self, msg: AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::RequestsLoaded(result) => self.handle_requests_loaded(result),
            AppMsg::RepositoryLoaded(result) => self.handle_repository_loaded(result),
            AppMsg::AuthorsLoaded(result) => self.handle_authors_loaded(result),
            AppMsg::BranchLoaded(result) => self.handle_branch_loaded(result),
            AppMsg::DetailLoaded { number, result } => self.handle_detail_loaded(number, result),
            AppMsg::CommitsLoaded { number, result } => self.handle_commits_loaded(number, result),
            AppMsg::DirtyChecked(result) => self.handle_dirty_checked(result),
            AppMsg::CheckoutFinished(result) => self.handle_checkout_finished(result),
            AppMsg::SpinnerTick => self.handle_spinner_tick(),
        }
    }

    fn handle_spinner_tick(&mut self) -> Option<Cmd> {
        if self.is_animating() {
            self.spinner.advance();
        }
        Some(Self::arm_spinner_timer())
    }

    fn handle_resize(&mut self, width: u16, height: u16) -> Option<Cmd> {
        self.width = width;
        self.height = height;
        None
    }

    pub(crate) fn spinner_frame(&self) -> &'static str {
        self.spinner.frame()
    }
}

impl Model for Dashboard {
    fn init() -> (Self, Option<Cmd>) {
        let host = session_context().map(|ctx| ctx.host);
        let model = Self::new(host);

        // Four independent startup loads plus the animation timer.
        let cmd = bubbletea_rs::batch(vec![
            Self::load_repository_cmd(),
            Self::load_requests_cmd(Author::SELF.to_owned()),
            Self::load_authors_cmd(),
            Self::load_branch_cmd(),
            Self::arm_spinner_timer(),
        ]);

        (model, Some(cmd))
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        // A failed downcast hands the box back for the next event type.
        let msg = match msg.downcast::<AppMsg>() {
            Ok(app_msg) => return self.handle_message(*app_msg),
            Err(msg) => msg,
        };

        if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
            return self.handle_key(key_msg);
        }

        if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
            return self.handle_resize(size_msg.width, size_msg.height);
        }

        None
    }

    fn view(&self) -> String {
        self.render()
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
