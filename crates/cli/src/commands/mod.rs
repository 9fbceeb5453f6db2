//! CLI command implementations.

pub mod auth;
pub mod transactions;
pub mod webhooks;

use std::sync::Arc;

use quantum_pay_client::storage::KeyValueStorage;
use quantum_pay_client::{ApiClient, SessionStore};

use crate::terminal::TerminalUi;

/// Everything a command needs, wired once at startup.
pub struct App {
    /// Shared API client.
    pub api: ApiClient,
    /// Shared session (token + current-user cache).
    pub session: SessionStore,
    /// Durable storage for preferences.
    pub durable: Arc<dyn KeyValueStorage>,
    /// Terminal frontend collaborator.
    pub ui: Arc<TerminalUi>,
}
