//! QuantumPay CLI - terminal frontend for the QuantumPay client.
//!
//! # Usage
//!
//! ```bash
//! # Create an account (interactive three-step signup)
//! qp signup
//!
//! # Sign in and open the dashboard
//! qp login -e user@example.com
//! qp dashboard
//!
//! # Send money and complete it with the confirmation code
//! qp send --amount 25.00 --to usr_42
//!
//! # Filter the dashboard
//! qp dashboard --status pending --query usr
//! ```
//!
//! # Commands
//!
//! - `signup` / `login` / `logout` / `whoami` - account and session
//! - `dashboard` - stats and (filtered) transaction list
//! - `send` / `verify` / `cancel` - transfers
//! - `webhooks` - webhook log passthrough

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};

use quantum_pay_client::storage::KeyValueStorage;
use quantum_pay_client::{ApiClient, FileStorage, SessionStore};

mod commands;
mod config;
mod terminal;

use commands::App;
use config::AppConfig;
use terminal::TerminalUi;

#[derive(Parser)]
#[command(name = "qp")]
#[command(author, version, about = "QuantumPay terminal client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account (interactive three-step signup)
    Signup,
    /// Sign in with email and password
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Remember this login
        #[arg(long)]
        remember: bool,
    },
    /// Sign out of the current session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Show dashboard stats and transactions
    Dashboard {
        /// Free-text filter over identifier and status
        #[arg(short, long)]
        query: Option<String>,

        /// Exact status filter (`pending`, `completed`, `cancelled`)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Send money to another user
    Send {
        /// Amount in major units (e.g. 25.00)
        #[arg(short, long)]
        amount: f64,

        /// Recipient user identifier
        #[arg(short, long)]
        to: String,

        /// ISO 4217 currency code
        #[arg(short, long, default_value = "USD")]
        currency: String,
    },
    /// Complete a pending transaction with its confirmation code
    Verify {
        /// Transaction identifier
        id: String,

        /// Six-digit confirmation code
        code: String,
    },
    /// Cancel a pending transaction
    Cancel {
        /// Transaction identifier
        id: String,
    },
    /// Inspect webhook log records
    Webhooks {
        #[command(subcommand)]
        action: WebhookAction,
    },
}

#[derive(Subcommand)]
enum WebhookAction {
    /// List all webhook log records
    List,
    /// Show one webhook log record
    Show {
        /// Webhook log identifier
        id: String,
    },
    /// Delete a webhook log record
    Delete {
        /// Webhook log identifier
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::open(&config.storage_path)?);
    let session = SessionStore::load(Arc::clone(&storage))?;
    let api = ApiClient::new(config.endpoints.clone(), session.clone());

    let app = App {
        api,
        session,
        durable: storage,
        ui: Arc::new(TerminalUi::new()),
    };

    match cli.command {
        Commands::Signup => commands::auth::signup(&app).await?,
        Commands::Login {
            email,
            password,
            remember,
        } => commands::auth::login(&app, &email, password, remember).await?,
        Commands::Logout => commands::auth::logout(&app),
        Commands::Whoami => commands::auth::whoami(&app).await?,
        Commands::Dashboard { query, status } => {
            commands::transactions::dashboard(&app, query, status).await?;
        }
        Commands::Send {
            amount,
            to,
            currency,
        } => commands::transactions::send(&app, amount, &to, &currency).await?,
        Commands::Verify { id, code } => {
            commands::transactions::verify(&app, &id, &code).await?;
        }
        Commands::Cancel { id } => commands::transactions::cancel(&app, &id).await,
        Commands::Webhooks { action } => match action {
            WebhookAction::List => commands::webhooks::list(&app).await?,
            WebhookAction::Show { id } => commands::webhooks::show(&app, &id).await?,
            WebhookAction::Delete { id } => commands::webhooks::delete(&app, &id).await?,
        },
    }
    Ok(())
}
