//! Transaction flow controller.
//!
//! Loads the authenticated user's transactions, supports send-money with a
//! confirmation-code prompt, completion, cancellation, and projects the
//! loaded list into dashboard stats and filtered views. Consistency model:
//! every mutation is followed by a full re-fetch of the list.

use std::sync::Arc;

use chrono::Utc;

use quantum_pay_client::SessionStore;
use quantum_pay_client::wire::{NewTransaction, TransactionPatch};
use quantum_pay_core::{
    CurrencyCode, Money, OtpCode, Transaction, TransactionFilter, TransactionId, TransactionStats,
    TransactionStatus, User, UserId,
};

use crate::api::QuantumApi;
use crate::ui::{Confirmer, Navigator, Notice, Notifier, Screen};

/// Controller for the dashboard and all transaction operations.
pub struct TransactionFlow<A> {
    api: A,
    session: SessionStore,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
    navigator: Arc<dyn Navigator>,
    current_user: Option<User>,
    transactions: Vec<Transaction>,
    filter: TransactionFilter,
    pending_confirmation: Option<TransactionId>,
}

impl<A: QuantumApi> TransactionFlow<A> {
    /// Create a new controller.
    pub fn new(
        api: A,
        session: SessionStore,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            confirmer,
            navigator,
            current_user: None,
            transactions: Vec::new(),
            filter: TransactionFilter::default(),
            pending_confirmation: None,
        }
    }

    /// Load the dashboard: requires an active session, resolves the current
    /// user (through the session cache), then fetches all transactions.
    ///
    /// Without a session, or when the current-user check fails, the flow
    /// fails closed: the token is cleared and navigation to sign-in is
    /// requested. The probe failure itself is not surfaced to the user.
    pub async fn initialize(&mut self) -> bool {
        if !self.session.is_authenticated() {
            self.navigator.navigate(Screen::SignIn);
            return false;
        }

        let user = if let Some(user) = self.session.cached_user() {
            user
        } else {
            match self.api.me().await {
                Ok(user) => {
                    self.session.cache_user(user.clone());
                    user
                }
                Err(e) => {
                    tracing::debug!("Session probe failed, treating as signed out: {e}");
                    if let Err(e) = self.session.clear_token() {
                        tracing::warn!("Failed to remove persisted token: {e}");
                    }
                    self.navigator.navigate(Screen::SignIn);
                    return false;
                }
            }
        };

        self.current_user = Some(user);
        self.refresh().await
    }

    /// Re-fetch the full transaction list.
    pub async fn refresh(&mut self) -> bool {
        match self.api.list_transactions().await {
            Ok(transactions) => {
                self.transactions = transactions;
                true
            }
            Err(e) => {
                tracing::warn!("Failed to load transactions: {e}");
                self.notifier.notify(Notice::Error, &e.to_string());
                false
            }
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Create a transfer to `recipient`.
    ///
    /// `amount_major` is in major units and is converted to minor units by
    /// multiplying by 100. Validation failures abort before any network
    /// call. On success the confirmation prompt is opened for the new
    /// record, the list is re-fetched, and the new identifier is returned.
    pub async fn send_money(
        &mut self,
        amount_major: f64,
        currency: CurrencyCode,
        recipient: &str,
    ) -> Option<TransactionId> {
        let recipient = recipient.trim();

        if !amount_major.is_finite() || amount_major <= 0.0 {
            self.notifier
                .notify(Notice::Error, "Please enter an amount greater than zero");
            return None;
        }

        if recipient.is_empty() {
            self.notifier
                .notify(Notice::Error, "Please enter a recipient");
            return None;
        }

        let Some(sender) = self.current_user.as_ref() else {
            self.notifier
                .notify(Notice::Error, "Dashboard is not loaded yet");
            return None;
        };

        let money = Money::from_major_units(amount_major, currency);
        if !money.is_positive() {
            self.notifier
                .notify(Notice::Error, "Please enter an amount greater than zero");
            return None;
        }

        let body = NewTransaction {
            amount: money.amount,
            currency,
            sender_user_id: sender.id.clone(),
            receiver_user_id: UserId::new(recipient),
            status: TransactionStatus::Pending,
            transaction_date: Utc::now(),
            otp_code: OtpCode::generate().into_inner(),
            otp_verified: false,
        };

        let created = match self.api.create_transaction(&body).await {
            Ok(created) => created,
            Err(e) => {
                tracing::warn!("Failed to create transaction: {e}");
                self.notifier.notify(Notice::Error, &e.to_string());
                return None;
            }
        };

        let id = created.id.clone();
        self.pending_confirmation = Some(id.clone());
        self.notifier.notify(
            Notice::Success,
            "Transfer created, enter the confirmation code to complete it",
        );

        self.refresh().await;
        Some(id)
    }

    /// Submit a confirmation code for a transaction.
    ///
    /// The update unconditionally marks the record completed and stores the
    /// submitted code as-is; no comparison against the code generated at
    /// creation happens on either side of this call.
    pub async fn submit_confirmation(&mut self, id: &TransactionId, code: &str) -> bool {
        let patch = TransactionPatch::completed(code);

        match self.api.update_transaction(id, &patch).await {
            Ok(_) => {
                if self.pending_confirmation.as_ref() == Some(id) {
                    self.pending_confirmation = None;
                }
                self.notifier
                    .notify(Notice::Success, "Transaction completed");
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::warn!("Confirmation failed for {id}: {e}");
                self.notifier
                    .notify(Notice::Error, "Invalid code, please try again");
                false
            }
        }
    }

    /// Cancel a pending transaction after interactive confirmation.
    ///
    /// Declining the dialog changes nothing. Failures are reported and not
    /// retried.
    pub async fn cancel(&mut self, id: &TransactionId) -> bool {
        if !self
            .confirmer
            .confirm("Are you sure you want to cancel this transaction?")
        {
            return false;
        }

        match self
            .api
            .update_transaction(id, &TransactionPatch::cancelled())
            .await
        {
            Ok(_) => {
                self.notifier
                    .notify(Notice::Success, "Transaction cancelled");
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::warn!("Failed to cancel {id}: {e}");
                self.notifier.notify(Notice::Error, &e.to_string());
                false
            }
        }
    }

    // =========================================================================
    // Projections
    // =========================================================================

    /// Dashboard stats over the full loaded list.
    #[must_use]
    pub fn stats(&self) -> TransactionStats {
        self.current_user.as_ref().map_or_else(TransactionStats::default, |user| {
            TransactionStats::compute(&self.transactions, &user.id)
        })
    }

    /// The transactions visible through the current filter.
    ///
    /// A projection only; the loaded list is never mutated by filtering.
    #[must_use]
    pub fn visible(&self) -> Vec<&Transaction> {
        self.filter.apply(&self.transactions)
    }

    /// Replace the view filter.
    pub fn set_filter(&mut self, filter: TransactionFilter) {
        self.filter = filter;
    }

    /// The current view filter.
    #[must_use]
    pub const fn filter(&self) -> &TransactionFilter {
        &self.filter
    }

    /// The full loaded list.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The resolved current user, once [`initialize`](Self::initialize) has
    /// succeeded.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// The transaction the confirmation prompt is open for, if any.
    #[must_use]
    pub const fn pending_confirmation(&self) -> Option<&TransactionId> {
        self.pending_confirmation.as_ref()
    }
}
