//! Account and session commands.

use std::sync::Arc;

use quantum_pay_client::ApiClient;
use quantum_pay_client::storage::MemoryStorage;
use quantum_pay_flows::{AuthFlow, Confirmer, DraftStore, Navigator, Notifier};

use crate::commands::App;
use crate::terminal::prompt;

fn auth_flow(app: &App) -> AuthFlow<ApiClient> {
    AuthFlow::new(
        app.api.clone(),
        app.session.clone(),
        Arc::clone(&app.durable),
        // The in-progress signup draft never outlives the process.
        DraftStore::new(Arc::new(MemoryStorage::new())),
        Arc::clone(&app.ui) as Arc<dyn Notifier>,
        Arc::clone(&app.ui) as Arc<dyn Confirmer>,
        Arc::clone(&app.ui) as Arc<dyn Navigator>,
    )
}

/// Interactive three-step signup.
///
/// # Errors
///
/// Returns an error if stdin closes mid-flow.
pub async fn signup(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let mut flow = auth_flow(app);

    if flow.redirect_if_authenticated() {
        tracing::info!("Already signed in; log out first to create another account");
        return Ok(());
    }

    loop {
        let first_name = prompt("First name")?;
        let last_name = prompt("Last name")?;
        let email = prompt("Email")?;
        if flow.submit_identity(&first_name, &last_name, &email) {
            break;
        }
    }

    loop {
        let password = prompt("Password")?;
        let confirmation = prompt("Confirm password")?;
        if flow.submit_password(&password, &confirmation) {
            break;
        }
    }

    let phone = prompt("Phone number (optional, press enter to skip)")?;
    let marketing_opt_in = app.ui.confirm("Receive product updates by email?");
    let terms_accepted = app.ui.confirm("Do you accept the terms and conditions?");

    flow.finalize(Some(&phone), terms_accepted, marketing_opt_in)
        .await;
    Ok(())
}

/// Sign in, prompting for the password when it was not passed as a flag.
///
/// # Errors
///
/// Returns an error if stdin closes while prompting.
pub async fn login(
    app: &App,
    email: &str,
    password: Option<String>,
    remember: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut flow = auth_flow(app);

    if flow.redirect_if_authenticated() {
        tracing::info!("Already signed in");
        return Ok(());
    }

    let password = match password {
        Some(password) => password,
        None => prompt("Password")?,
    };

    flow.sign_in(email, &password, remember).await;
    Ok(())
}

/// Sign out after confirmation.
pub fn logout(app: &App) {
    let mut flow = auth_flow(app);
    if !flow.log_out() {
        tracing::info!("Still signed in");
    }
}

/// Show the signed-in account.
///
/// Treats any failure of the current-user check as a stale session and
/// clears the stored token.
///
/// # Errors
///
/// Returns an error if the cleared token cannot be removed from storage.
pub async fn whoami(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    if !app.session.is_authenticated() {
        tracing::info!("Not signed in; run `qp login`");
        return Ok(());
    }

    match app.api.me().await {
        Ok(user) => {
            tracing::info!("Signed in as {} <{}>", user.name, user.email);
        }
        Err(e) => {
            tracing::debug!("Session probe failed: {e}");
            app.session.clear_token()?;
            tracing::info!("Session expired; run `qp login`");
        }
    }
    Ok(())
}
