//! mrdash binary entrypoint.
//!
//! Bootstraps against the current working directory and hands control to
//! the interactive session. The program takes no flags; all configuration
//! comes from the repository it is started in.

use std::io::{self, Write};
use std::process::ExitCode;

use mrdash::tui::{self, SessionContext};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            if writeln!(io::stderr().lock(), "{message}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    let system = mrdash::bootstrap().await.map_err(|error| error.to_string())?;

    // The bubbletea-rs init function is static, so the session context is
    // handed over through module-level storage before the program starts.
    let _ = tui::set_session_context(SessionContext {
        repo_path: system.repo_path,
        host: system.host,
        platform: system.platform,
        runner: system.runner,
    });

    tui::run()
        .await
        .map_err(|error| format!("terminal session failed: {error}"))
}
