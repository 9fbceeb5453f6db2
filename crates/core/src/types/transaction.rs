//! Transaction model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::{TransactionId, UserId};
use crate::types::money::{CurrencyCode, Money};
use crate::types::status::TransactionStatus;

/// A money transfer between two users.
///
/// Amounts are integers in minor currency units. `transaction_date` travels
/// as epoch milliseconds on the wire. The stored `otp_code` is whatever the
/// client last submitted for the record, not a verified secret.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    /// Remote-assigned identifier.
    pub id: TransactionId,
    /// Amount in minor currency units (cents).
    pub amount: i64,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency: CurrencyCode,
    /// The user the money leaves.
    pub sender_user_id: UserId,
    /// The user the money reaches.
    pub receiver_user_id: UserId,
    /// Lifecycle status.
    pub status: TransactionStatus,
    /// Creation time, epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub transaction_date: DateTime<Utc>,
    /// Six-digit confirmation code attached to the record.
    pub otp_code: String,
    /// Whether the confirmation code has been submitted back.
    pub otp_verified: bool,
}

impl Transaction {
    /// Returns `true` if `user` is the receiver of this transaction.
    #[must_use]
    pub fn is_incoming_for(&self, user: &UserId) -> bool {
        &self.receiver_user_id == user
    }

    /// Returns `true` if `user` is the sender of this transaction.
    #[must_use]
    pub fn is_outgoing_for(&self, user: &UserId) -> bool {
        &self.sender_user_id == user
    }

    /// The amount as [`Money`] for display.
    #[must_use]
    pub const fn money(&self) -> Money {
        Money::from_minor_units(self.amount, self.currency)
    }
}
