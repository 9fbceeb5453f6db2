//! Core types for the QuantumPay client.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod otp;
pub mod password;
pub mod status;
pub mod transaction;
pub mod user;
pub mod webhook;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::{CurrencyCode, CurrencyCodeError, Money, format_minor_units};
pub use otp::{OtpCode, OtpCodeError};
pub use password::{PasswordCheck, PasswordStrength};
pub use status::TransactionStatus;
pub use transaction::Transaction;
pub use user::User;
pub use webhook::WebhookLog;
