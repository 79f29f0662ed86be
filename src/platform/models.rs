//! Shared data model for merge/pull requests across platforms.
//!
//! All entities are immutable value snapshots: a load replaces the previous
//! snapshot wholesale, nothing is patched in place.

use std::fmt;

/// Lifecycle status of a merge/pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    /// Open and ready for review.
    Open,
    /// Marked as a draft.
    Draft,
    /// Merged into the target branch.
    Merged,
    /// Closed without merging.
    Closed,
    /// Any status the backend reported that we do not recognise.
    #[default]
    Unknown,
}

impl RequestStatus {
    /// Parses a backend status string, case-insensitively.
    ///
    /// GitLab reports open requests as `opened`; both spellings map to
    /// [`RequestStatus::Open`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "open" | "opened" => Self::Open,
            "draft" => Self::Draft,
            "merged" => Self::Merged,
            "closed" => Self::Closed,
            _ => Self::Unknown,
        }
    }

    /// Returns the lowercase display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Draft => "draft",
            Self::Merged => "merged",
            Self::Closed => "closed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A merge/pull request as it appears in list views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    /// Request number, unique per repository and platform.
    pub number: u64,
    /// Title line.
    pub title: String,
    /// Source branch the request merges from.
    pub branch: String,
    /// Lifecycle status.
    pub status: RequestStatus,
    /// Web URL for opening the request in a browser.
    pub url: String,
}

/// A single changed file within a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// File path; the new path when the file was renamed.
    pub path: String,
    /// Added line count.
    pub additions: u64,
    /// Deleted line count.
    pub deletions: u64,
}

/// Detailed view of a request, loaded lazily when it is opened.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergeRequestDetail {
    /// Request number this detail belongs to.
    pub number: u64,
    /// Title line.
    pub title: String,
    /// Full description body.
    pub body: String,
    /// Changed files in backend order.
    pub files: Vec<FileChange>,
    /// Total added lines across all files.
    pub additions: u64,
    /// Total deleted lines across all files.
    pub deletions: u64,
}

/// A repository contributor usable as a request-list filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// Stable identity used as the filter key.
    pub username: String,
    /// Display name; may equal the username.
    pub name: String,
}

impl Author {
    /// Sentinel username for "the authenticated CLI user".
    pub const SELF: &'static str = "@me";

    /// Returns the synthetic self author.
    #[must_use]
    pub fn current_user() -> Self {
        Self {
            username: Self::SELF.to_owned(),
            name: String::new(),
        }
    }
}

/// Repository metadata shown in the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryInfo {
    /// Repository name.
    pub name: String,
    /// Repository description, possibly empty.
    pub description: String,
    /// Name of the default branch.
    pub default_branch: String,
}

/// A commit within a request, shown in the commits viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Short SHA (first seven hex characters).
    pub sha: String,
    /// One-line commit message.
    pub message: String,
    /// Author display name.
    pub author: String,
    /// Commit date truncated to calendar-day precision.
    pub date: String,
}

/// Truncates a full SHA to its seven-character short form.
#[must_use]
pub fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

/// Truncates an ISO-8601 timestamp to its `YYYY-MM-DD` prefix.
#[must_use]
pub fn short_date(iso_date: &str) -> &str {
    iso_date.get(..10).unwrap_or(iso_date)
}
