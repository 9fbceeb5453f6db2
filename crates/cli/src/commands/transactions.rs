//! Dashboard and transfer commands.

use std::sync::Arc;

use quantum_pay_client::ApiClient;
use quantum_pay_core::{
    CurrencyCode, OtpCode, TransactionFilter, TransactionId, TransactionStatus, format_minor_units,
};
use quantum_pay_flows::{Confirmer, Navigator, Notifier, TransactionFlow};

use crate::commands::App;
use crate::terminal::prompt;

fn transaction_flow(app: &App) -> TransactionFlow<ApiClient> {
    TransactionFlow::new(
        app.api.clone(),
        app.session.clone(),
        Arc::clone(&app.ui) as Arc<dyn Notifier>,
        Arc::clone(&app.ui) as Arc<dyn Confirmer>,
        Arc::clone(&app.ui) as Arc<dyn Navigator>,
    )
}

/// Show dashboard stats and the (optionally filtered) transaction list.
///
/// # Errors
///
/// Returns an error if the status filter does not parse.
pub async fn dashboard(
    app: &App,
    query: Option<String>,
    status: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let status = status
        .as_deref()
        .map(str::parse::<TransactionStatus>)
        .transpose()?;

    let mut flow = transaction_flow(app);
    if !flow.initialize().await {
        return Ok(());
    }

    flow.set_filter(TransactionFilter { query, status });

    let stats = flow.stats();
    if let Some(user) = flow.current_user() {
        tracing::info!("Welcome back, {}!", user.first_name());
    }
    tracing::info!(
        "Balance {}  |  Income {}  |  Expenses {}  |  Pending {}",
        format_minor_units(stats.balance, CurrencyCode::USD),
        format_minor_units(stats.income, CurrencyCode::USD),
        format_minor_units(stats.expenses, CurrencyCode::USD),
        stats.pending_count
    );

    let visible = flow.visible();
    if visible.is_empty() {
        tracing::info!("No transactions to show");
        return Ok(());
    }

    let current_user = flow.current_user().map(|user| user.id.clone());
    for txn in visible {
        let direction = if Some(&txn.receiver_user_id) == current_user.as_ref() {
            "in "
        } else {
            "out"
        };
        tracing::info!(
            "{}  {}  {:>12}  {:<9}  {}",
            txn.id,
            direction,
            txn.money().format(),
            txn.status.to_string(),
            txn.transaction_date.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

/// Create a transfer, then prompt for the confirmation code.
///
/// # Errors
///
/// Returns an error if the currency does not parse or stdin closes while
/// prompting.
pub async fn send(
    app: &App,
    amount: f64,
    to: &str,
    currency: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let currency: CurrencyCode = currency.parse()?;

    let mut flow = transaction_flow(app);
    if !flow.initialize().await {
        return Ok(());
    }

    let Some(id) = flow.send_money(amount, currency, to).await else {
        return Ok(());
    };

    loop {
        let input = prompt("Confirmation code (press enter to finish later)")?;
        if input.is_empty() {
            tracing::info!("Left pending; complete it with `qp verify {id} <code>`");
            break;
        }
        match OtpCode::parse(&input) {
            Ok(code) => {
                if flow.submit_confirmation(&id, code.as_str()).await {
                    break;
                }
            }
            Err(e) => tracing::error!("{e}"),
        }
    }
    Ok(())
}

/// Complete a pending transaction with its confirmation code.
///
/// # Errors
///
/// Returns an error if the code is not six digits.
pub async fn verify(app: &App, id: &str, code: &str) -> Result<(), Box<dyn std::error::Error>> {
    let code = OtpCode::parse(code)?;

    let mut flow = transaction_flow(app);
    if !flow.initialize().await {
        return Ok(());
    }

    flow.submit_confirmation(&TransactionId::new(id), code.as_str())
        .await;
    Ok(())
}

/// Cancel a pending transaction after confirmation.
pub async fn cancel(app: &App, id: &str) {
    let mut flow = transaction_flow(app);
    if !flow.initialize().await {
        return;
    }

    flow.cancel(&TransactionId::new(id)).await;
}
