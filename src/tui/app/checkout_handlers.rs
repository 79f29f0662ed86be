//! Checkout intents, the dirty-tree guard and the checkout lifecycle.
//!
//! Every checkout intent first records a pending checkout and runs the
//! dirty check; the checkout itself only starts once the guard has passed
//! (clean tree, failed check, or explicit confirmation).

use std::any::Any;

use bubbletea_rs::Cmd;

use crate::git::{self, CheckoutError};
use crate::platform::MergeRequest;
use crate::process::ProcessError;
use crate::tui::components::{CheckoutModal, DirtyConfirmModal};
use crate::tui::messages::AppMsg;
use crate::tui::session_context;

use super::{ActiveModal, Dashboard, PendingCheckout};

impl Dashboard {
    /// Records a checkout intent for `branch` and starts the dirty check.
    ///
    /// `request` is the originating request for checkouts launched from a
    /// detail view; it is carried through to the progress modal. A new
    /// intent supersedes any earlier pending checkout.
    pub(super) fn request_checkout(
        &mut self,
        branch: String,
        request: Option<MergeRequest>,
    ) -> Option<Cmd> {
        self.pending_checkout = Some(PendingCheckout { branch, request });
        Some(Self::check_dirty_cmd())
    }

    /// Handles the dirty-check result for the pending checkout.
    ///
    /// A failed check proceeds as if the tree were clean: blocking the
    /// checkout on a broken `git status` would strand the user.
    pub(super) fn handle_dirty_checked(
        &mut self,
        result: Result<bool, ProcessError>,
    ) -> Option<Cmd> {
        if self.pending_checkout.is_none() {
            tracing::debug!("dropping stale dirty-check result");
            return None;
        }
        match result {
            Ok(true) => {
                let branch = self
                    .pending_checkout
                    .as_ref()
                    .map(|pending| pending.branch.clone())?;
                self.modal = Some(ActiveModal::DirtyConfirm(DirtyConfirmModal::new(branch)));
                None
            }
            Ok(false) => self.start_checkout(),
            Err(error) => {
                tracing::warn!(%error, "dirty check failed; proceeding with checkout");
                self.start_checkout()
            }
        }
    }

    /// Starts the three-step checkout for the pending target.
    pub(super) fn start_checkout(&mut self) -> Option<Cmd> {
        let pending = self.pending_checkout.take()?;
        self.modal = Some(ActiveModal::Checkout(CheckoutModal::new(
            pending.branch.clone(),
            pending.request,
        )));
        Some(Self::run_checkout_cmd(pending.branch))
    }

    /// Discards the pending checkout and closes the confirmation prompt.
    pub(super) fn cancel_checkout(&mut self) {
        self.pending_checkout = None;
        self.modal = None;
    }

    /// Handles the checkout outcome.
    ///
    /// With no checkout modal on screen the result is stale (the user
    /// dismissed the modal mid-flight) and is dropped.
    pub(super) fn handle_checkout_finished(
        &mut self,
        result: Result<(), CheckoutError>,
    ) -> Option<Cmd> {
        match &mut self.modal {
            Some(ActiveModal::Checkout(modal)) => {
                if let Err(error) = &result {
                    tracing::warn!(%error, branch = modal.branch(), "checkout failed");
                }
                modal.finish(result);
            }
            _ => tracing::debug!("dropping stale checkout result"),
        }
        None
    }

    /// Dismisses a terminal checkout modal and reloads the current branch.
    pub(super) fn acknowledge_checkout(&mut self) -> Option<Cmd> {
        self.modal = None;
        Some(Self::load_branch_cmd())
    }

    fn check_dirty_cmd() -> Cmd {
        Box::pin(async {
            let ctx = session_context()?;
            let result = git::is_dirty(ctx.runner.as_ref(), &ctx.repo_path).await;
            Some(Box::new(AppMsg::DirtyChecked(result)) as Box<dyn Any + Send>)
        })
    }

    fn run_checkout_cmd(branch: String) -> Cmd {
        Box::pin(async move {
            let ctx = session_context()?;
            let result = git::checkout(ctx.runner.as_ref(), &ctx.repo_path, &branch).await;
            Some(Box::new(AppMsg::CheckoutFinished(result)) as Box<dyn Any + Send>)
        })
    }
}
