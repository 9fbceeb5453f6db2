//! The cross-step signup draft.
//!
//! Registration input accumulates across three steps. The draft is an
//! explicit serializable value with an explicit clear operation, held in
//! ephemeral storage so it never outlives the process.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use quantum_pay_client::storage::{KeyValueStorage, StorageError, keys};

/// Registration input accumulated so far.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupDraft {
    /// Full name, collected at the identity step.
    pub name: Option<String>,
    /// Email address, collected at the identity step.
    pub email: Option<String>,
    /// Password, collected at the password step.
    pub password: Option<String>,
}

impl SignupDraft {
    /// Returns `true` when every field needed to create the account is
    /// present.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.name.is_some() && self.email.is_some() && self.password.is_some()
    }
}

/// Reads and writes the draft in ephemeral storage.
#[derive(Clone)]
pub struct DraftStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl DraftStore {
    /// Create a store over the given (ephemeral) backend.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Load the current draft; absent means empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or the stored value
    /// does not parse.
    pub fn load(&self) -> Result<SignupDraft, StorageError> {
        match self.storage.get(keys::SIGNUP_DRAFT)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(SignupDraft::default()),
        }
    }

    /// Replace the stored draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn save(&self, draft: &SignupDraft) -> Result<(), StorageError> {
        let json = serde_json::to_string(draft)?;
        self.storage.set(keys::SIGNUP_DRAFT, &json)
    }

    /// Remove the stored draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(keys::SIGNUP_DRAFT)
    }
}

impl std::fmt::Debug for DraftStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftStore").finish_non_exhaustive()
    }
}
