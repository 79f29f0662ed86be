//! GitLab gateway backed by the `glab` CLI.
//!
//! Request detail is assembled from two calls: `glab mr view` for the body
//! and the `changes` API endpoint for per-file statistics. A failure on the
//! second call degrades to a detail without file statistics rather than
//! failing the whole view.

use std::sync::Arc;

use async_trait::async_trait;
use camino::Utf8PathBuf;
use serde::Deserialize;

use super::models::{
    Author, Commit, FileChange, MergeRequest, MergeRequestDetail, RepositoryInfo, RequestStatus,
    short_date, short_sha,
};
use super::{Host, Platform, PlatformError};
use crate::process::{CommandSpec, ProcessRunner};

/// Platform gateway for repositories hosted on GitLab.
pub struct GitLab {
    repo_path: Utf8PathBuf,
    runner: Arc<dyn ProcessRunner>,
}

impl GitLab {
    /// Creates a gateway operating on the repository at `repo_path`.
    #[must_use]
    pub fn new(repo_path: Utf8PathBuf, runner: Arc<dyn ProcessRunner>) -> Self {
        Self { repo_path, runner }
    }

    async fn glab(&self, args: &[&str]) -> Result<String, PlatformError> {
        let spec = CommandSpec::new("glab", args.iter().copied());
        Ok(self.runner.run(&self.repo_path, spec).await?)
    }
}

#[derive(Debug, Deserialize)]
struct GlMergeRequest {
    iid: u64,
    title: String,
    source_branch: String,
    state: String,
    #[serde(default)]
    draft: bool,
    web_url: String,
}

#[derive(Debug, Deserialize)]
struct GlMergeRequestView {
    iid: u64,
    title: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GlChange {
    #[serde(default)]
    old_path: String,
    #[serde(default)]
    new_path: String,
    #[serde(default)]
    additions: u64,
    #[serde(default)]
    deletions: u64,
}

#[derive(Debug, Deserialize)]
struct GlChangesResponse {
    #[serde(default)]
    changes: Vec<GlChange>,
}

#[derive(Debug, Deserialize)]
struct GlProject {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct GlMember {
    username: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct GlCommit {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    created_at: String,
}

pub(crate) fn decode_requests(raw: &str) -> Result<Vec<MergeRequest>, PlatformError> {
    let merge_requests: Vec<GlMergeRequest> =
        serde_json::from_str(raw).map_err(|e| PlatformError::decode(&e))?;
    Ok(merge_requests
        .into_iter()
        .map(|mr| MergeRequest {
            number: mr.iid,
            title: mr.title,
            branch: mr.source_branch,
            status: if mr.draft {
                RequestStatus::Draft
            } else {
                RequestStatus::parse(&mr.state)
            },
            url: mr.web_url,
        })
        .collect())
}

pub(crate) fn decode_repository(raw: &str) -> Result<RepositoryInfo, PlatformError> {
    let project: GlProject = serde_json::from_str(raw).map_err(|e| PlatformError::decode(&e))?;
    Ok(RepositoryInfo {
        name: project.name,
        description: project.description.unwrap_or_default(),
        default_branch: project.default_branch,
    })
}

pub(crate) fn decode_members(raw: &str) -> Result<Vec<Author>, PlatformError> {
    let members: Vec<GlMember> = serde_json::from_str(raw).map_err(|e| PlatformError::decode(&e))?;
    Ok(members
        .into_iter()
        .map(|member| Author {
            username: member.username,
            name: member.name,
        })
        .collect())
}

/// Decodes the `changes` endpoint response into file changes plus computed
/// totals. The endpoint carries no aggregate counters, so the totals are the
/// sum over files. A renamed file keeps its new path; the old path is the
/// fallback when the new one is absent.
pub(crate) fn decode_changes(raw: &str) -> Result<(Vec<FileChange>, u64, u64), PlatformError> {
    let response: GlChangesResponse =
        serde_json::from_str(raw).map_err(|e| PlatformError::decode(&e))?;

    let mut additions = 0;
    let mut deletions = 0;
    let files = response
        .changes
        .into_iter()
        .map(|change| {
            additions += change.additions;
            deletions += change.deletions;
            let path = if change.new_path.is_empty() {
                change.old_path
            } else {
                change.new_path
            };
            FileChange {
                path,
                additions: change.additions,
                deletions: change.deletions,
            }
        })
        .collect();

    Ok((files, additions, deletions))
}

pub(crate) fn decode_view(raw: &str) -> Result<MergeRequestDetail, PlatformError> {
    let view: GlMergeRequestView = serde_json::from_str(raw).map_err(|e| PlatformError::decode(&e))?;
    Ok(MergeRequestDetail {
        number: view.iid,
        title: view.title,
        body: view.description.unwrap_or_default(),
        ..MergeRequestDetail::default()
    })
}

pub(crate) fn decode_commits(raw: &str) -> Result<Vec<Commit>, PlatformError> {
    let commits: Vec<GlCommit> = serde_json::from_str(raw).map_err(|e| PlatformError::decode(&e))?;
    Ok(commits
        .into_iter()
        .map(|commit| Commit {
            sha: short_sha(&commit.id).to_owned(),
            message: commit.title,
            author: commit.author_name,
            date: short_date(&commit.created_at).to_owned(),
        })
        .collect())
}

#[async_trait]
impl Platform for GitLab {
    fn host(&self) -> Host {
        Host::GitLab
    }

    async fn list_requests(&self, author: &str) -> Result<Vec<MergeRequest>, PlatformError> {
        let out = self
            .glab(&["mr", "list", "-F", "json", "--author", author])
            .await?;
        decode_requests(&out)
    }

    async fn repository_info(&self) -> Result<RepositoryInfo, PlatformError> {
        let out = self.glab(&["repo", "view", "-F", "json"]).await?;
        decode_repository(&out)
    }

    async fn list_authors(&self) -> Result<Vec<Author>, PlatformError> {
        let out = self.glab(&["api", "projects/:id/members/all"]).await?;
        decode_members(&out)
    }

    async fn request_detail(&self, number: u64) -> Result<MergeRequestDetail, PlatformError> {
        let id = number.to_string();
        let out = self.glab(&["mr", "view", &id, "-F", "json"]).await?;
        let mut detail = decode_view(&out)?;

        // File statistics come from a second endpoint; treat its failure as
        // a partial result, not an error.
        let endpoint = format!("projects/:id/merge_requests/{number}/changes");
        match self.glab(&["api", &endpoint]).await {
            Ok(changes_out) => {
                if let Ok((files, additions, deletions)) = decode_changes(&changes_out) {
                    detail.files = files;
                    detail.additions = additions;
                    detail.deletions = deletions;
                }
            }
            Err(error) => {
                tracing::debug!("merge request changes unavailable: {error}");
            }
        }

        Ok(detail)
    }

    async fn request_commits(&self, number: u64) -> Result<Vec<Commit>, PlatformError> {
        let endpoint = format!("projects/:id/merge_requests/{number}/commits");
        let out = self.glab(&["api", &endpoint]).await?;
        decode_commits(&out)
    }
}
