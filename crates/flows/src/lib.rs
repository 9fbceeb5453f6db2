//! QuantumPay flow controllers.
//!
//! The business logic between a frontend and the remote services:
//!
//! - [`auth`] - multi-step signup state machine, sign-in, logout, and the
//!   session probe
//! - [`transactions`] - dashboard loading, send-money, confirmation-code
//!   completion, cancellation, stats, and filtering
//! - [`api`] - the service seam the controllers call through
//! - [`ui`] - the small traits a frontend implements (notifications,
//!   confirmations, navigation)
//! - [`draft`] - the cross-step signup draft
//!
//! Controllers are constructed once at startup with their collaborators
//! passed in explicitly; nothing is reached through shared global state.
//! Every user-facing failure goes through the injected [`ui::Notifier`]; no
//! structured error leaves a controller.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod auth;
pub mod draft;
pub mod transactions;
pub mod ui;

pub use api::QuantumApi;
pub use auth::{AuthFlow, SignupState};
pub use draft::{DraftStore, SignupDraft};
pub use transactions::TransactionFlow;
pub use ui::{Confirmer, Navigator, Notice, Notifier, Screen};
