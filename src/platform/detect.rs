//! Host classification from remote URLs.
//!
//! Selection is a pure function over the remote URL so new hosts can be
//! added to the table without touching the session controller.

use std::sync::Arc;

use camino::Utf8PathBuf;

use super::{GitHub, GitLab, Host, Platform};
use crate::process::ProcessRunner;

/// Known hostname fragments and the host each one maps to.
///
/// Matching is a case-insensitive substring test, which covers both HTTPS
/// and SSH remote formats. `generation-y` is a self-hosted GitLab instance.
const HOST_TABLE: [(&str, Host); 3] = [
    ("github.com", Host::GitHub),
    ("gitlab.com", Host::GitLab),
    ("generation-y", Host::GitLab),
];

/// Classifies a remote URL onto a known host.
///
/// Returns `None` when the URL matches no entry in the host table.
#[must_use]
pub fn detect_host(remote_url: &str) -> Option<Host> {
    let lowered = remote_url.to_lowercase();
    HOST_TABLE
        .iter()
        .find(|(fragment, _)| lowered.contains(fragment))
        .map(|&(_, host)| host)
}

/// Creates the platform gateway for a detected host.
#[must_use]
pub fn new_platform(
    host: Host,
    repo_path: Utf8PathBuf,
    runner: Arc<dyn ProcessRunner>,
) -> Arc<dyn Platform> {
    match host {
        Host::GitHub => Arc::new(GitHub::new(repo_path, runner)),
        Host::GitLab => Arc::new(GitLab::new(repo_path, runner)),
    }
}
