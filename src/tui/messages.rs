//! Message types for the session update loop.
//!
//! Every asynchronous operation completes by posting one of these messages.
//! Result payloads keep their typed errors so handlers can attribute
//! failures (for example, the checkout step that failed).

use crate::git::CheckoutError;
use crate::platform::{
    Author, Commit, MergeRequest, MergeRequestDetail, PlatformError, RepositoryInfo,
};
use crate::process::ProcessError;

/// Messages consumed by the dashboard update loop.
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// The request-list load finished.
    RequestsLoaded(Result<Vec<MergeRequest>, PlatformError>),
    /// The repository-info load finished.
    RepositoryLoaded(Result<RepositoryInfo, PlatformError>),
    /// The author-list load finished.
    AuthorsLoaded(Result<Vec<Author>, PlatformError>),
    /// The current-branch load finished.
    BranchLoaded(Result<String, ProcessError>),
    /// A request-detail load finished.
    ///
    /// Carries the request number so stale results for a dismissed or
    /// replaced detail modal can be dropped.
    DetailLoaded {
        /// Number of the request the detail belongs to.
        number: u64,
        /// The loaded detail or the failure to show in the modal.
        result: Result<MergeRequestDetail, PlatformError>,
    },
    /// A request-commits load finished.
    CommitsLoaded {
        /// Number of the request the commits belong to.
        number: u64,
        /// The loaded commits or the failure to show in the viewer.
        result: Result<Vec<Commit>, PlatformError>,
    },
    /// The working-tree dirtiness check finished.
    DirtyChecked(Result<bool, ProcessError>),
    /// The three-step checkout protocol finished.
    CheckoutFinished(Result<(), CheckoutError>),
    /// Animation timer fired for progress spinners.
    SpinnerTick,
}
