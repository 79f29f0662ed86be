//! Interactive terminal session for browsing merge/pull requests.
//!
//! The session follows the Model-View-Update (MVU) pattern:
//!
//! - **Model**: session state in [`app::Dashboard`]
//! - **View**: string rendering in `app::rendering` and the components
//! - **Update**: message-driven transitions in `Dashboard::update`
//!
//! All external work (platform queries, git commands) runs as asynchronous
//! commands that post result messages back into the single-threaded update
//! loop; the transition functions themselves never block.
//!
//! # Session context
//!
//! Because bubbletea-rs's `Model` trait requires `init()` to be a static
//! function, the bootstrapped collaborators are handed over through
//! module-level storage: call [`set_session_context`] before starting the
//! program and `Dashboard::init()` will pick the context up.

use std::sync::{Arc, OnceLock};

use bubbletea_rs::Program;
use camino::Utf8PathBuf;

use crate::platform::{Host, Platform};
use crate::process::ProcessRunner;

pub mod app;
pub mod components;
pub mod input;
pub mod messages;
pub mod ticket;

pub use app::Dashboard;

/// Collaborators the session needs, assembled during bootstrap.
pub struct SessionContext {
    /// Absolute path of the repository working directory.
    pub repo_path: Utf8PathBuf,
    /// The detected hosting service.
    pub host: Host,
    /// Platform gateway for the detected host.
    pub platform: Arc<dyn Platform>,
    /// Process runner for git operations.
    pub runner: Arc<dyn ProcessRunner>,
}

/// Global storage for the session context.
///
/// Set once before the TUI program starts and read by `Dashboard::init()`
/// and by the asynchronous commands it dispatches.
static SESSION_CONTEXT: OnceLock<SessionContext> = OnceLock::new();

/// Stores the session context for the TUI program.
///
/// Returns `true` if the context was stored, `false` if one was already
/// present (the existing context is kept).
pub fn set_session_context(context: SessionContext) -> bool {
    SESSION_CONTEXT.set(context).is_ok()
}

/// Returns the stored session context, if any.
///
/// Commands degrade to posting nothing when the context is absent, which
/// only happens in unit tests that never execute commands.
pub(crate) fn session_context() -> Option<&'static SessionContext> {
    SESSION_CONTEXT.get()
}

/// Runs the interactive session until the user quits.
///
/// # Errors
///
/// Returns the underlying [`bubbletea_rs::Error`] when the terminal program
/// cannot be initialised or fails while running.
pub async fn run() -> Result<(), bubbletea_rs::Error> {
    let program = Program::<Dashboard>::builder().alt_screen(true).build()?;
    program.run().await?;
    Ok(())
}
