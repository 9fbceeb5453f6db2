//! Request and response payloads for the QuantumPay services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quantum_pay_core::{CurrencyCode, TransactionStatus, User, UserId};

/// Body for `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body for `POST /auth/signup`.
#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Response from login and signup.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Bearer credential for subsequent calls.
    #[serde(rename = "authToken")]
    pub auth_token: String,
    /// The authenticated account, when the service includes it.
    #[serde(default)]
    pub user: Option<User>,
}

/// Body for `POST /transaction`.
///
/// The service assigns the identifier; everything else is set by the client
/// at creation time.
#[derive(Debug, Clone, Serialize)]
pub struct NewTransaction {
    /// Amount in minor currency units.
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency: CurrencyCode,
    pub sender_user_id: UserId,
    pub receiver_user_id: UserId,
    /// Always `pending` at creation.
    pub status: TransactionStatus,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub transaction_date: DateTime<Utc>,
    /// Freshly generated six-digit code.
    pub otp_code: String,
    /// Always `false` at creation.
    pub otp_verified: bool,
}

/// Body for `PATCH /transaction/{id}`.
///
/// Only the fields being changed are serialized.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp_verified: Option<bool>,
}

impl TransactionPatch {
    /// Patch marking a record completed with the submitted code.
    ///
    /// The submitted code is stored as-is; this layer performs no comparison
    /// against the code generated at creation.
    #[must_use]
    pub fn completed(submitted_code: impl Into<String>) -> Self {
        Self {
            status: Some(TransactionStatus::Completed),
            otp_code: Some(submitted_code.into()),
            otp_verified: Some(true),
        }
    }

    /// Patch marking a record cancelled.
    #[must_use]
    pub fn cancelled() -> Self {
        Self {
            status: Some(TransactionStatus::Cancelled),
            ..Self::default()
        }
    }
}
