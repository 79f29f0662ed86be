//! View components for the dashboard session.
//!
//! Each component owns its local selection/scroll/search state over an
//! immutable snapshot of domain entities and signals user intents back to
//! the session controller; components never launch operations themselves.

pub mod author_picker;
pub mod checkout_modal;
pub mod dirty_confirm;
pub mod request_detail;
pub mod request_list;
pub mod spinner;
pub mod text;

pub use author_picker::{AuthorPicker, PickerEvent};
pub use checkout_modal::{CheckoutModal, CheckoutState};
pub use dirty_confirm::{ConfirmOutcome, DirtyConfirmModal};
pub use request_detail::{DetailIntent, RequestDetailModal};
pub use request_list::RequestList;
pub use spinner::Spinner;
