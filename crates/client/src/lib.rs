//! QuantumPay HTTP client library.
//!
//! Single integration point with the remote QuantumPay services:
//!
//! - [`api`] - the API client, one choke point for every outbound call
//! - [`session`] - bearer-token lifecycle and the current-user cache
//! - [`storage`] - durable and ephemeral key/value storage backends
//! - [`wire`] - request/response payload types
//!
//! # Example
//!
//! ```rust,ignore
//! use quantum_pay_client::{ApiClient, ServiceEndpoints, SessionStore};
//! use quantum_pay_client::storage::FileStorage;
//! use std::sync::Arc;
//!
//! let storage = Arc::new(FileStorage::open(".quantum-pay.json")?);
//! let session = SessionStore::load(storage)?;
//! let client = ApiClient::new(endpoints, session.clone());
//!
//! let auth = client.login("user@example.com", "hunter2!A").await?;
//! session.set_token(auth.auth_token.into())?;
//! let me = client.me().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod error;
pub mod session;
pub mod storage;
pub mod wire;

pub use api::{ApiClient, ServiceEndpoints};
pub use error::ApiError;
pub use session::SessionStore;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
