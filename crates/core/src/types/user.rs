//! User account model.

use serde::{Deserialize, Serialize};

use crate::types::email::Email;
use crate::types::id::UserId;

/// An account on the remote service.
///
/// Users are fetched from the current-user endpoint and never locally
/// mutated; the only local processing is display formatting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Remote-assigned identifier.
    pub id: UserId,
    /// Full display name.
    pub name: String,
    /// Account email address.
    pub email: Email,
}

impl User {
    /// First word of the display name, used for greetings.
    ///
    /// Falls back to the full name when it has no spaces, and to the email
    /// local part when the name is empty.
    #[must_use]
    pub fn first_name(&self) -> &str {
        match self.name.split_whitespace().next() {
            Some(first) => first,
            None => self.email.local_part(),
        }
    }
}
