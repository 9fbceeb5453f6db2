//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. The remote service
//! assigns identifiers as opaque strings, so the wrappers are string-backed.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use quantum_pay_core::define_id;
/// define_id!(UserId);
/// define_id!(TransactionId);
///
/// let user_id = UserId::new("usr_01");
/// let txn_id = TransactionId::new("txn_01");
///
/// // These are different types, so this won't compile:
/// // let _: UserId = txn_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(TransactionId);
define_id!(WebhookLogId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        let id = UserId::new("usr_42");
        assert_eq!(id.as_str(), "usr_42");
        assert_eq!(id.to_string(), "usr_42");
        assert_eq!(id.clone().into_inner(), "usr_42");
    }

    #[test]
    fn test_id_equality() {
        assert_eq!(TransactionId::new("txn_1"), TransactionId::from("txn_1"));
        assert_ne!(TransactionId::new("txn_1"), TransactionId::new("txn_2"));
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = WebhookLogId::new("whl_9");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"whl_9\"");

        let parsed: WebhookLogId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, id);
    }
}
