//! Git operations executed through the external `git` binary.
//!
//! The checkout protocol is the only multi-step operation: fetch, then
//! checkout, then pull, in that fixed order. The first failing step aborts
//! the remaining steps and the error carries the step name so the UI can
//! attribute the failure.

use std::fmt;

use camino::Utf8Path;
use thiserror::Error;

use crate::process::{CommandSpec, ProcessError, ProcessRunner};

/// The step of the checkout protocol that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    /// `git fetch origin`.
    Fetch,
    /// `git checkout <branch>`.
    Checkout,
    /// `git pull`.
    Pull,
}

impl CheckoutStep {
    /// Returns the step name used in failure attribution.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Checkout => "checkout",
            Self::Pull => "pull",
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A checkout failure tagged with the step that caused it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{step}: {source}")]
pub struct CheckoutError {
    /// The protocol step that failed.
    pub step: CheckoutStep,
    /// The underlying process failure.
    #[source]
    pub source: ProcessError,
}

/// Returns true when `path` contains a `.git` directory.
#[must_use]
pub fn is_repo(path: &Utf8Path) -> bool {
    path.join(".git").is_dir()
}

/// Returns the URL of the `origin` remote.
///
/// # Errors
///
/// Returns the underlying [`ProcessError`] when the repository has no
/// `origin` remote or `git` cannot be executed.
pub async fn remote_url(runner: &dyn ProcessRunner, path: &Utf8Path) -> Result<String, ProcessError> {
    let out = runner
        .run(path, CommandSpec::git(["remote", "get-url", "origin"]))
        .await?;
    Ok(out.trim().to_owned())
}

/// Returns the name of the currently checked-out branch.
///
/// # Errors
///
/// Returns the underlying [`ProcessError`] when `git` fails.
pub async fn current_branch(
    runner: &dyn ProcessRunner,
    path: &Utf8Path,
) -> Result<String, ProcessError> {
    let out = runner
        .run(path, CommandSpec::git(["rev-parse", "--abbrev-ref", "HEAD"]))
        .await?;
    Ok(out.trim().to_owned())
}

/// Returns true when the working tree has uncommitted changes.
///
/// # Errors
///
/// Returns the underlying [`ProcessError`] when `git status` fails.
pub async fn is_dirty(runner: &dyn ProcessRunner, path: &Utf8Path) -> Result<bool, ProcessError> {
    let out = runner
        .run(path, CommandSpec::git(["status", "--porcelain"]))
        .await?;
    Ok(!out.trim().is_empty())
}

/// Runs the three-step checkout protocol: fetch, checkout, pull.
///
/// Steps execute strictly in order; the first failure aborts the remainder.
///
/// # Errors
///
/// Returns a [`CheckoutError`] naming the failed step.
pub async fn checkout(
    runner: &dyn ProcessRunner,
    path: &Utf8Path,
    branch: &str,
) -> Result<(), CheckoutError> {
    let steps = [
        (CheckoutStep::Fetch, CommandSpec::git(["fetch", "origin"])),
        (CheckoutStep::Checkout, CommandSpec::git(["checkout", branch])),
        (CheckoutStep::Pull, CommandSpec::git(["pull"])),
    ];

    for (step, spec) in steps {
        runner
            .run(path, spec)
            .await
            .map_err(|source| CheckoutError { step, source })?;
    }

    Ok(())
}
