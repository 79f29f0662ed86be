//! Process bootstrap: repository detection and platform selection.
//!
//! Bootstrap failures are the only fatal error class; everything after the
//! UI starts is surfaced in place instead.

use std::fmt;
use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::git;
use crate::platform::{Host, Platform, detect_host, new_platform};
use crate::process::{ProcessRunner, TokioProcessRunner};

/// Fatal start-up failures, each with its own exit message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BootstrapError {
    /// The current directory could not be resolved or is not UTF-8.
    #[error("could not resolve the working directory: {message}")]
    WorkingDirectory {
        /// Error detail from the operating system.
        message: String,
    },

    /// The working directory is not inside a git repository.
    #[error("not a git repository; run mrdash from inside a git working tree")]
    NotARepository,

    /// The repository has no usable `origin` remote.
    #[error("could not read the origin remote: {message}")]
    NoOriginRemote {
        /// Detail from the failed `git remote` invocation.
        message: String,
    },

    /// The `origin` remote points at a host we cannot talk to.
    #[error("unsupported remote host '{url}': only github.com and gitlab.com are supported")]
    UnsupportedHost {
        /// The remote URL that failed classification.
        url: String,
    },
}

/// Everything the interactive session needs, assembled at start-up.
pub struct System {
    /// Absolute path of the repository working directory.
    pub repo_path: Utf8PathBuf,
    /// The detected hosting service.
    pub host: Host,
    /// Gateway for the detected host.
    pub platform: Arc<dyn Platform>,
    /// Shared process runner for git operations.
    pub runner: Arc<dyn ProcessRunner>,
}

// The trait-object collaborators have no useful Debug form.
impl fmt::Debug for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("System")
            .field("repo_path", &self.repo_path)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

/// Detects the repository and selects the platform gateway.
///
/// # Errors
///
/// Returns a [`BootstrapError`] when the working directory is not a git
/// repository, has no `origin` remote, or points at an unsupported host.
pub async fn bootstrap() -> Result<System, BootstrapError> {
    let cwd = std::env::current_dir().map_err(|error| BootstrapError::WorkingDirectory {
        message: error.to_string(),
    })?;
    let repo_path =
        Utf8PathBuf::from_path_buf(cwd).map_err(|path| BootstrapError::WorkingDirectory {
            message: format!("{} is not valid UTF-8", path.display()),
        })?;

    let runner: Arc<dyn ProcessRunner> = Arc::new(TokioProcessRunner::default());
    bootstrap_at(repo_path, runner).await
}

/// Bootstrap with an explicit path and runner, separated for testability.
pub(crate) async fn bootstrap_at(
    repo_path: Utf8PathBuf,
    runner: Arc<dyn ProcessRunner>,
) -> Result<System, BootstrapError> {
    if !git::is_repo(&repo_path) {
        return Err(BootstrapError::NotARepository);
    }

    let remote_url = git::remote_url(runner.as_ref(), &repo_path)
        .await
        .map_err(|error| BootstrapError::NoOriginRemote {
            message: error.to_string(),
        })?;

    let host = detect_host(&remote_url).ok_or(BootstrapError::UnsupportedHost {
        url: remote_url.clone(),
    })?;

    tracing::debug!(%host, %repo_path, "bootstrap complete");

    let platform = new_platform(host, repo_path.clone(), Arc::clone(&runner));
    Ok(System {
        repo_path,
        host,
        platform,
        runner,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use camino::Utf8PathBuf;

    use super::{BootstrapError, bootstrap_at};
    use crate::platform::Host;
    use crate::process::MockProcessRunner;

    fn utf8_tempdir() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 path");
        (dir, path)
    }

    #[tokio::test]
    async fn rejects_directory_without_git() {
        let (_dir, path) = utf8_tempdir();
        let runner = MockProcessRunner::new();

        let error = bootstrap_at(path, Arc::new(runner))
            .await
            .expect_err("should fail");

        assert_eq!(error, BootstrapError::NotARepository);
    }

    #[tokio::test]
    async fn rejects_unknown_remote_host() {
        let (_dir, path) = utf8_tempdir();
        std::fs::create_dir(path.join(".git")).expect("mkdir .git");

        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .return_once(|_, _| Ok("https://example.com/user/repo.git\n".to_owned()));

        let error = bootstrap_at(path, Arc::new(runner))
            .await
            .expect_err("should fail");

        assert!(matches!(error, BootstrapError::UnsupportedHost { .. }));
    }

    #[tokio::test]
    async fn selects_platform_from_remote() {
        let (_dir, path) = utf8_tempdir();
        std::fs::create_dir(path.join(".git")).expect("mkdir .git");

        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .return_once(|_, _| Ok("git@gitlab.com:org/repo.git\n".to_owned()));

        let system = bootstrap_at(path, Arc::new(runner))
            .await
            .expect("bootstrap");

        assert_eq!(system.host, Host::GitLab);
        assert_eq!(system.platform.host(), Host::GitLab);
    }

    #[tokio::test]
    async fn system_debug_names_path_and_host_only() {
        let (_dir, path) = utf8_tempdir();
        std::fs::create_dir(path.join(".git")).expect("mkdir .git");

        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .return_once(|_, _| Ok("git@github.com:org/repo.git\n".to_owned()));

        let system = bootstrap_at(path.clone(), Arc::new(runner))
            .await
            .expect("bootstrap");

        let rendered = format!("{system:?}");
        assert!(rendered.contains(path.as_str()));
        assert!(rendered.contains("GitHub"));
        assert!(rendered.ends_with(".. }"));
    }
}
