//! GitHub gateway backed by the `gh` CLI.

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

/// Platform gateway for repositories hosted on GitHub.
pub struct GitHub {
    repo_path: Utf8PathBuf,
    runner: Arc<dyn ProcessRunner>,
}

impl GitHub {
    /// Creates a gateway operating on the repository at `repo_path`.
    #[must_use]
    pub fn new(repo_path: Utf8PathBuf, runner: Arc<dyn ProcessRunner>) -> Self {
        Self { repo_path, runner }
    }

    async fn gh(&self, args: &[&str]) -> Result<String, PlatformError> {
        let spec = CommandSpec::new("gh", args.iter().copied());
        Ok(self.runner.run(&self.repo_path, spec).await?)
    }
}

#[derive(Debug, Deserialize)]
struct GhPullRequest {
    number: u64,
    title: String,
    #[serde(rename = "headRefName")]
    head_ref_name: String,
    state: String,
    #[serde(default, rename = "isDraft")]
    is_draft: bool,
    url: String,
}

#[derive(Debug, Deserialize)]
struct GhFile {
    path: String,
    #[serde(default)]
    additions: u64,
    #[serde(default)]
    deletions: u64,
}

#[derive(Debug, Deserialize)]
struct GhPullRequestDetail {
    title: String,
    // GitHub serialises an absent body as JSON null.
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    additions: u64,
    #[serde(default)]
    deletions: u64,
    #[serde(default)]
    files: Vec<GhFile>,
}

#[derive(Debug, Deserialize)]
struct GhRepository {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "defaultBranchRef")]
    default_branch_ref: Option<GhBranchRef>,
}

#[derive(Debug, Deserialize, Default)]
struct GhBranchRef {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct GhCommitAuthor {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct GhCommit {
    oid: String,
    #[serde(rename = "messageHeadline")]
    message_headline: String,
    #[serde(default)]
    authors: Vec<GhCommitAuthor>,
    #[serde(default, rename = "committedDate")]
    committed_date: String,
}

#[derive(Debug, Deserialize)]
struct GhCommitList {
    #[serde(default)]
    commits: Vec<GhCommit>,
}

pub(crate) fn decode_requests(raw: &str) -> Result<Vec<MergeRequest>, PlatformError> {
    let pulls: Vec<GhPullRequest> = serde_json::from_str(raw).map_err(|e| PlatformError::decode(&e))?;
    Ok(pulls
        .into_iter()
        .map(|pr| MergeRequest {
            number: pr.number,
            title: pr.title,
            branch: pr.head_ref_name,
            status: if pr.is_draft {
                RequestStatus::Draft
            } else {
                RequestStatus::parse(&pr.state)
            },
            url: pr.url,
        })
        .collect())
}

pub(crate) fn decode_detail(number: u64, raw: &str) -> Result<MergeRequestDetail, PlatformError> {
    let pr: GhPullRequestDetail = serde_json::from_str(raw).map_err(|e| PlatformError::decode(&e))?;
    Ok(MergeRequestDetail {
        number,
        title: pr.title,
        body: pr.body.unwrap_or_default(),
        files: pr
            .files
            .into_iter()
            .map(|file| FileChange {
                path: file.path,
                additions: file.additions,
                deletions: file.deletions,
            })
            .collect(),
        additions: pr.additions,
        deletions: pr.deletions,
    })
}

pub(crate) fn decode_repository(raw: &str) -> Result<RepositoryInfo, PlatformError> {
    let repo: GhRepository = serde_json::from_str(raw).map_err(|e| PlatformError::decode(&e))?;
    Ok(RepositoryInfo {
        name: repo.name,
        description: repo.description.unwrap_or_default(),
        default_branch: repo.default_branch_ref.unwrap_or_default().name,
    })
}

/// Decodes the newline-separated login list produced by `gh api -q`.
pub(crate) fn decode_authors(raw: &str) -> Vec<Author> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|login| Author {
            username: login.to_owned(),
            name: login.to_owned(),
        })
        .collect()
}

pub(crate) fn decode_commits(raw: &str) -> Result<Vec<Commit>, PlatformError> {
    let list: GhCommitList = serde_json::from_str(raw).map_err(|e| PlatformError::decode(&e))?;
    Ok(list
        .commits
        .into_iter()
        .map(|commit| Commit {
            sha: short_sha(&commit.oid).to_owned(),
            message: commit.message_headline,
            author: commit
                .authors
                .first()
                .map(|author| author.name.clone())
                .unwrap_or_default(),
            date: short_date(&commit.committed_date).to_owned(),
        })
        .collect())
}

#[async_trait]
impl Platform for GitHub {
    fn host(&self) -> Host {
        Host::GitHub
    }

    async fn list_requests(&self, author: &str) -> Result<Vec<MergeRequest>, PlatformError> {
        let out = self
            .gh(&[
                "pr",
                "list",
                "--author",
                author,
                "--json",
                "number,title,headRefName,state,isDraft,url",
            ])
            .await?;
        decode_requests(&out)
    }

    async fn repository_info(&self) -> Result<RepositoryInfo, PlatformError> {
        let out = self
            .gh(&["repo", "view", "--json", "name,description,defaultBranchRef"])
            .await?;
        decode_repository(&out)
    }

    async fn list_authors(&self) -> Result<Vec<Author>, PlatformError> {
        let out = self
            .gh(&[
                "api",
                "repos/{owner}/{repo}/contributors",
                "--paginate",
                "-q",
                ".[].login",
            ])
            .await?;
        Ok(decode_authors(&out))
    }

    async fn request_detail(&self, number: u64) -> Result<MergeRequestDetail, PlatformError> {
        let id = number.to_string();
        let out = self
            .gh(&[
                "pr",
                "view",
                &id,
                "--json",
                "title,body,files,additions,deletions",
            ])
            .await?;
        decode_detail(number, &out)
    }

    async fn request_commits(&self, number: u64) -> Result<Vec<Commit>, PlatformError> {
        let id = number.to_string();
        let out = self.gh(&["pr", "view", &id, "--json", "commits"]).await?;
        decode_commits(&out)
    }
}
