//! QuantumPay Core - Shared types library.
//!
//! This crate provides common types used across all QuantumPay client
//! components:
//! - `client` - HTTP API client and session management
//! - `flows` - Authentication and transaction flow controllers
//! - `cli` - Terminal frontend driving the flows
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no storage. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, money, OTP
//!   codes, password policy, and transaction models
//! - [`stats`] - Pure aggregation and filtering over transaction lists

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod stats;
pub mod types;

pub use stats::*;
pub use types::*;
