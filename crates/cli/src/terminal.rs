//! Terminal implementations of the flow UI traits.
//!
//! Notifications become log lines, confirmations and prompts read stdin,
//! and navigation requests shape the command loop instead of moving pages.

use std::io::{self, BufRead};

use quantum_pay_flows::{Confirmer, Navigator, Notice, Notifier, Screen};

/// Terminal frontend collaborator for the flow controllers.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalUi;

impl TerminalUi {
    /// Create the terminal UI.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Notifier for TerminalUi {
    fn notify(&self, level: Notice, message: &str) {
        match level {
            Notice::Success | Notice::Info => tracing::info!("{message}"),
            Notice::Error => tracing::error!("{message}"),
        }
    }
}

impl Confirmer for TerminalUi {
    fn confirm(&self, prompt: &str) -> bool {
        tracing::info!("{prompt} [y/N]");
        matches!(
            read_line().as_deref().map(str::to_lowercase).as_deref(),
            Ok("y" | "yes")
        )
    }
}

impl Navigator for TerminalUi {
    fn navigate(&self, screen: Screen) {
        // There is no page to move; the destination tells the user what to
        // run next.
        match screen {
            Screen::SignIn => tracing::info!("Run `qp login` to sign in"),
            Screen::Dashboard => tracing::info!("Run `qp dashboard` to see your transactions"),
            Screen::Welcome => tracing::info!("You're all set, welcome to QuantumPay!"),
            Screen::SignupIdentity | Screen::SignupPassword | Screen::SignupFinalize => {
                tracing::debug!("signup continues at {screen:?}");
            }
        }
    }
}

/// Prompt for a line of input.
///
/// # Errors
///
/// Returns an error if stdin is closed or unreadable.
pub fn prompt(label: &str) -> io::Result<String> {
    tracing::info!("{label}:");
    read_line()
}

fn read_line() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_owned())
}
