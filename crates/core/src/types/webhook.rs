//! Webhook log pass-through record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::id::WebhookLogId;

/// An opaque webhook delivery record.
///
/// The client imposes no structure beyond the identifier; all other fields
/// are carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebhookLog {
    /// Remote-assigned identifier.
    pub id: WebhookLogId,
    /// Everything else the service stored on the record.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_pass_through() {
        let json = r#"{"id":"whl_1","event":"transaction.completed","payload":{"n":1}}"#;
        let log: WebhookLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.id, WebhookLogId::new("whl_1"));
        assert_eq!(log.fields["event"], "transaction.completed");

        let back = serde_json::to_value(&log).unwrap();
        assert_eq!(back["payload"]["n"], 1);
    }
}
