//! Completed-load handlers and the asynchronous load commands.
//!
//! Each command resolves its collaborators from the session context at
//! execution time and posts exactly one [`AppMsg`] back into the update
//! loop. In unit tests no context is installed and commands are never
//! executed; handlers are driven with synthesised results instead.

use std::any::Any;
use std::time::Duration;

use bubbletea_rs::Cmd;

use crate::git;
use crate::platform::{
    Author, Commit, MergeRequest, MergeRequestDetail, PlatformError, RepositoryInfo,
};
use crate::process::ProcessError;
use crate::tui::messages::AppMsg;
use crate::tui::session_context;

use super::{ActiveModal, Dashboard};

/// Interval between spinner animation frames.
const SPINNER_INTERVAL: Duration = Duration::from_millis(120);

fn post(msg: AppMsg) -> Option<Box<dyn Any + Send>> {
    Some(Box::new(msg) as Box<dyn Any + Send>)
}

impl Dashboard {
    pub(super) fn handle_requests_loaded(
        &mut self,
        result: Result<Vec<MergeRequest>, PlatformError>,
    ) -> Option<Cmd> {
        self.loading = false;
        match result {
            Ok(requests) => {
                self.error = None;
                self.request_list.set_requests(requests);
            }
            Err(error) => {
                tracing::warn!(%error, "request list load failed");
                self.error = Some(error.to_string());
            }
        }
        None
    }

    pub(super) fn handle_repository_loaded(
        &mut self,
        result: Result<RepositoryInfo, PlatformError>,
    ) -> Option<Cmd> {
        match result {
            Ok(repository) => self.repository = Some(repository),
            Err(error) => {
                tracing::warn!(%error, "repository info load failed");
                self.error = Some(error.to_string());
            }
        }
        None
    }

    pub(super) fn handle_authors_loaded(
        &mut self,
        result: Result<Vec<Author>, PlatformError>,
    ) -> Option<Cmd> {
        match result {
            // The picker still offers @me when the contributor load failed,
            // so the failure is logged but not surfaced.
            Ok(authors) => self.authors = authors,
            Err(error) => tracing::warn!(%error, "author list load failed"),
        }
        None
    }

    pub(super) fn handle_branch_loaded(
        &mut self,
        result: Result<String, ProcessError>,
    ) -> Option<Cmd> {
        match result {
            Ok(branch) => self.current_branch = Some(branch),
            Err(error) => tracing::warn!(%error, "current branch load failed"),
        }
        None
    }

    pub(super) fn handle_detail_loaded(
        &mut self,
        number: u64,
        result: Result<MergeRequestDetail, PlatformError>,
    ) -> Option<Cmd> {
        match &mut self.modal {
            Some(ActiveModal::Detail(modal)) if modal.number() == number => {
                modal.detail_loaded(result);
            }
            _ => tracing::debug!(number, "dropping stale detail result"),
        }
        None
    }

    pub(super) fn handle_commits_loaded(
        &mut self,
        number: u64,
        result: Result<Vec<Commit>, PlatformError>,
    ) -> Option<Cmd> {
        match &mut self.modal {
            Some(ActiveModal::Detail(modal)) if modal.number() == number => {
                modal.commits_loaded(result);
            }
            _ => tracing::debug!(number, "dropping stale commits result"),
        }
        None
    }

    /// Command loading the request list for `author`.
    pub(super) fn load_requests_cmd(author: String) -> Cmd {
        Box::pin(async move {
            let ctx = session_context()?;
            post(AppMsg::RequestsLoaded(
                ctx.platform.list_requests(&author).await,
            ))
        })
    }

    /// Command loading the repository metadata.
    pub(super) fn load_repository_cmd() -> Cmd {
        Box::pin(async {
            let ctx = session_context()?;
            post(AppMsg::RepositoryLoaded(ctx.platform.repository_info().await))
        })
    }

    /// Command loading the contributor list.
    pub(super) fn load_authors_cmd() -> Cmd {
        Box::pin(async {
            let ctx = session_context()?;
            post(AppMsg::AuthorsLoaded(ctx.platform.list_authors().await))
        })
    }

    /// Command loading the currently checked-out branch.
    pub(super) fn load_branch_cmd() -> Cmd {
        Box::pin(async {
            let ctx = session_context()?;
            post(AppMsg::BranchLoaded(
                git::current_branch(ctx.runner.as_ref(), &ctx.repo_path).await,
            ))
        })
    }

    /// Command loading the detail of request `number`.
    pub(super) fn load_detail_cmd(number: u64) -> Cmd {
        Box::pin(async move {
            let ctx = session_context()?;
            post(AppMsg::DetailLoaded {
                number,
                result: ctx.platform.request_detail(number).await,
            })
        })
    }

    /// Command loading the commit log of request `number`.
    pub(super) fn load_commits_cmd(number: u64) -> Cmd {
        Box::pin(async move {
            let ctx = session_context()?;
            post(AppMsg::CommitsLoaded {
                number,
                result: ctx.platform.request_commits(number).await,
            })
        })
    }

    /// Command opening `url` with the platform opener, fire-and-forget.
    pub(super) fn open_browser_cmd(url: String) -> Cmd {
        Box::pin(async move {
            let ctx = session_context()?;
            let spec = browser_spec(&url);
            if let Err(error) = ctx.runner.run(&ctx.repo_path, spec).await {
                tracing::warn!(%error, url, "could not open browser");
            }
            None
        })
    }

    /// Command triggering a spinner tick after the animation interval.
    pub(super) fn arm_spinner_timer() -> Cmd {
        Box::pin(async {
            tokio::time::sleep(SPINNER_INTERVAL).await;
            post(AppMsg::SpinnerTick)
        })
    }
}

#[cfg(target_os = "macos")]
fn browser_spec(url: &str) -> crate::process::CommandSpec {
    crate::process::CommandSpec::new("open", [url])
}

#[cfg(target_os = "windows")]
fn browser_spec(url: &str) -> crate::process::CommandSpec {
    crate::process::CommandSpec::new("cmd", ["/C", "start", url])
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn browser_spec(url: &str) -> crate::process::CommandSpec {
    crate::process::CommandSpec::new("xdg-open", [url])
}
