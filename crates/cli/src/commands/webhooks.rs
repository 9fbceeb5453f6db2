//! Webhook log passthrough commands.
//!
//! The client imposes no structure on these records; they are printed as
//! the service stored them.

use quantum_pay_core::WebhookLogId;
use quantum_pay_flows::Confirmer;

use crate::commands::App;

/// List all webhook log records.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn list(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let logs = app.api.list_webhook_logs().await?;

    if logs.is_empty() {
        tracing::info!("No webhook logs");
        return Ok(());
    }

    for log in logs {
        tracing::info!("{}", serde_json::to_string(&log)?);
    }
    Ok(())
}

/// Show one webhook log record.
///
/// # Errors
///
/// Returns an error if the request fails or the record does not exist.
pub async fn show(app: &App, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let log = app.api.get_webhook_log(&WebhookLogId::new(id)).await?;
    tracing::info!("{}", serde_json::to_string_pretty(&log)?);
    Ok(())
}

/// Delete a webhook log record after confirmation.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn delete(app: &App, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !app.ui.confirm("Delete this webhook log?") {
        return Ok(());
    }

    app.api.delete_webhook_log(&WebhookLogId::new(id)).await?;
    tracing::info!("Webhook log {id} deleted");
    Ok(())
}
