//! Bounded execution of external command-line tools.
//!
//! Every interaction with `git`, `gh`, and `glab` goes through the
//! [`ProcessRunner`] trait so the rest of the crate never touches process
//! plumbing directly and tests can substitute a mock. The tokio-backed
//! implementation captures stdout, surfaces trimmed stderr on failure, and
//! enforces a fixed wall-clock timeout on every invocation.

use std::fmt;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use camino::Utf8Path;
use thiserror::Error;

/// Default timeout applied to every external command.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors surfaced while running an external command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessError {
    /// The program could not be started (missing from `PATH`, not executable).
    #[error("failed to launch {command}: {message}")]
    Spawn {
        /// The command line that failed to start.
        command: String,
        /// Error detail from the operating system.
        message: String,
    },

    /// The program started but exited with a non-zero status.
    #[error("{command} failed: {message}")]
    Failed {
        /// The command line that failed.
        command: String,
        /// Trimmed stderr output, or the exit status when stderr was empty.
        message: String,
    },

    /// The program exceeded the execution timeout.
    #[error("{command} timed out after {timeout_secs}s")]
    TimedOut {
        /// The command line that timed out.
        command: String,
        /// The timeout that was exceeded, in seconds.
        timeout_secs: u64,
    },
}

/// A program name plus its arguments, ready to be executed in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name resolved against `PATH`.
    pub program: String,
    /// Arguments passed verbatim to the program.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Creates a command spec from a program name and arguments.
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_owned(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a `git` command spec.
    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("git", args)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Executes external commands with bounded runtime.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Runs the command in `dir`, returning captured stdout on success.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Spawn`] when the program cannot be started,
    /// [`ProcessError::Failed`] on a non-zero exit, and
    /// [`ProcessError::TimedOut`] when the timeout elapses first.
    async fn run(&self, dir: &Utf8Path, spec: CommandSpec) -> Result<String, ProcessError>;
}

/// Tokio-backed [`ProcessRunner`] with a fixed per-invocation timeout.
#[derive(Debug, Clone)]
pub struct TokioProcessRunner {
    timeout: Duration,
}

impl Default for TokioProcessRunner {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TokioProcessRunner {
    /// Creates a runner with a custom timeout.
    #[must_use]
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, dir: &Utf8Path, spec: CommandSpec) -> Result<String, ProcessError> {
        let command_line = spec.to_string();

        let mut command = tokio::process::Command::new(&spec.program);
        command
            .args(&spec.args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // A child that outlives the timeout must not linger.
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_elapsed| ProcessError::TimedOut {
                command: command_line.clone(),
                timeout_secs: self.timeout.as_secs(),
            })?
            .map_err(|error| ProcessError::Spawn {
                command: command_line.clone(),
                message: error.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let trimmed = stderr.trim();
            let message = if trimmed.is_empty() {
                output.status.to_string()
            } else {
                trimmed.to_owned()
            };
            return Err(ProcessError::Failed {
                command: command_line,
                message,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
