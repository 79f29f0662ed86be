//! Progress modal for the fetch/checkout/pull protocol.

use crate::git::CheckoutError;
use crate::platform::MergeRequest;

/// Where the checkout currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    /// The three-step protocol is still running.
    Running,
    /// All three steps completed.
    Succeeded,
    /// A step failed; the message names the step and the cause.
    Failed(String),
}

/// Modal shown while a branch checkout runs and until its outcome is
/// acknowledged. In a terminal state any key dismisses the modal and the
/// session reloads the current branch.
#[derive(Debug)]
pub struct CheckoutModal {
    branch: String,
    request: Option<MergeRequest>,
    state: CheckoutState,
}

impl CheckoutModal {
    /// Opens the modal for a checkout of `branch` that has just started.
    ///
    /// `request` labels the modal with the originating request; it is
    /// absent for default-branch checkouts.
    #[must_use]
    pub fn new(branch: impl Into<String>, request: Option<MergeRequest>) -> Self {
        Self {
            branch: branch.into(),
            request,
            state: CheckoutState::Running,
        }
    }

    /// Branch the checkout targets.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// The request the checkout was launched from, if any.
    #[must_use]
    pub const fn request(&self) -> Option<&MergeRequest> {
        self.request.as_ref()
    }

    /// Current state of the checkout.
    #[must_use]
    pub const fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Records the protocol outcome, moving the modal to a terminal state.
    pub fn finish(&mut self, result: Result<(), CheckoutError>) {
        self.state = match result {
            Ok(()) => CheckoutState::Succeeded,
            Err(error) => CheckoutState::Failed(error.to_string()),
        };
    }

    /// Returns true once the checkout has succeeded or failed.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self.state, CheckoutState::Running)
    }

    /// Renders the modal; `spinner` is the current animation frame.
    #[must_use]
    pub fn view(&self, spinner: &str) -> String {
        let mut lines = Vec::new();
        if let Some(request) = &self.request {
            lines.push(format!("#{} {}", request.number, request.title));
            lines.push(String::new());
        }
        lines.push(match &self.state {
            CheckoutState::Running => {
                format!("{spinner} Checking out {}...", self.branch)
            }
            CheckoutState::Succeeded => format!(
                "Checked out {}.\n\npress any key to continue",
                self.branch
            ),
            CheckoutState::Failed(message) => format!(
                "Checkout of {} failed: {message}\n\npress any key to continue",
                self.branch
            ),
        });
        lines.join("\n")
    }
}
