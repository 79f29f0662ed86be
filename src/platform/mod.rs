//! Platform gateways for merge/pull request hosting services.
//!
//! The [`Platform`] trait is the capability set every backend must satisfy:
//! list requests by author, fetch repository info, list authors, fetch a
//! request's detail, and fetch a request's commits. The two concrete
//! backends shell out to the `gh` and `glab` CLIs through the process
//! runner and decode their JSON output into the shared data model.

pub mod detect;
pub mod github;
pub mod gitlab;
pub mod models;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::process::ProcessError;

pub use detect::{detect_host, new_platform};
pub use github::GitHub;
pub use gitlab::GitLab;
pub use models::{
    Author, Commit, FileChange, MergeRequest, MergeRequestDetail, RepositoryInfo, RequestStatus,
};

/// The hosting service a repository's `origin` remote points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    /// GitHub (queried through the `gh` CLI).
    GitHub,
    /// GitLab (queried through the `glab` CLI).
    GitLab,
}

impl Host {
    /// Returns the lowercase platform tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by platform gateway operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform CLI failed or timed out.
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// The platform CLI produced JSON we could not decode.
    #[error("unexpected output from platform CLI: {message}")]
    Decode {
        /// Decode failure detail.
        message: String,
    },
}

impl PlatformError {
    pub(crate) fn decode(error: &serde_json::Error) -> Self {
        Self::Decode {
            message: error.to_string(),
        }
    }
}

/// Capability set implemented once per hosting service.
#[async_trait]
pub trait Platform: Send + Sync {
    /// The host this gateway talks to.
    fn host(&self) -> Host;

    /// Lists requests authored by `author` (use [`Author::SELF`] for the
    /// authenticated user).
    async fn list_requests(&self, author: &str) -> Result<Vec<MergeRequest>, PlatformError>;

    /// Fetches repository metadata.
    async fn repository_info(&self) -> Result<RepositoryInfo, PlatformError>;

    /// Lists repository contributors.
    async fn list_authors(&self) -> Result<Vec<Author>, PlatformError>;

    /// Fetches the detailed view of one request.
    async fn request_detail(&self, number: u64) -> Result<MergeRequestDetail, PlatformError>;

    /// Fetches the commits of one request.
    async fn request_commits(&self, number: u64) -> Result<Vec<Commit>, PlatformError>;
}
