//! mrdash library crate: an interactive dashboard for merge/pull requests.
//!
//! The crate wraps the `gh` and `glab` CLIs behind a platform gateway,
//! drives git through the external `git` binary, and presents a
//! message-driven terminal session built on bubbletea-rs. Platform and git
//! work always runs asynchronously; the session controller itself never
//! blocks.

pub mod boot;
pub mod git;
pub mod platform;
pub mod process;
pub mod tui;

pub use boot::{BootstrapError, System, bootstrap};
pub use git::{CheckoutError, CheckoutStep};
pub use platform::{Host, Platform, PlatformError};
pub use process::{CommandSpec, ProcessError, ProcessRunner, TokioProcessRunner};
