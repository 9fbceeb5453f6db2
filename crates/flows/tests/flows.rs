//! End-to-end flow scenarios against the in-memory service fake.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use secrecy::SecretString;

use quantum_pay_client::SessionStore;
use quantum_pay_client::storage::{KeyValueStorage, MemoryStorage, keys};
use quantum_pay_core::{
    CurrencyCode, Email, Transaction, TransactionFilter, TransactionId, TransactionStatus, User,
    UserId,
};
use quantum_pay_flows::api::test_support::InMemoryApi;
use quantum_pay_flows::ui::test_support::RecordingUi;
use quantum_pay_flows::{
    AuthFlow, Confirmer, DraftStore, Navigator, Notifier, Screen, SignupState, TransactionFlow,
};

fn me() -> User {
    User {
        id: UserId::new("usr_me"),
        name: "Quinn Fox".to_owned(),
        email: Email::parse("quinn@example.com").unwrap(),
    }
}

fn txn(
    id: &str,
    amount: i64,
    sender: &str,
    receiver: &str,
    status: TransactionStatus,
) -> Transaction {
    Transaction {
        id: TransactionId::new(id),
        amount,
        currency: CurrencyCode::USD,
        sender_user_id: UserId::new(sender),
        receiver_user_id: UserId::new(receiver),
        status,
        transaction_date: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        otp_code: "111111".to_owned(),
        otp_verified: status == TransactionStatus::Completed,
    }
}

/// 2 completed incoming, 1 completed outgoing, 1 pending for `usr_me`.
fn fixture() -> Vec<Transaction> {
    vec![
        txn("txn_a", 5000, "usr_x", "usr_me", TransactionStatus::Completed),
        txn("txn_b", 2500, "usr_y", "usr_me", TransactionStatus::Completed),
        txn("txn_c", 1000, "usr_me", "usr_z", TransactionStatus::Completed),
        txn("txn_d", 9999, "usr_me", "usr_x", TransactionStatus::Pending),
    ]
}

struct Harness {
    api: Arc<InMemoryApi>,
    session: SessionStore,
    durable: Arc<MemoryStorage>,
    ui: Arc<RecordingUi>,
}

impl Harness {
    fn new(accepting: bool) -> Self {
        let api = Arc::new(InMemoryApi::new());
        let durable = Arc::new(MemoryStorage::new());
        let session =
            SessionStore::load(Arc::clone(&durable) as Arc<dyn KeyValueStorage>).unwrap();
        let ui = Arc::new(if accepting {
            RecordingUi::accepting()
        } else {
            RecordingUi::declining()
        });
        Self {
            api,
            session,
            durable,
            ui,
        }
    }

    fn signed_in(accepting: bool) -> Self {
        let harness = Self::new(accepting);
        let api = Arc::new(InMemoryApi::with_user(me()));
        harness.session.set_token(SecretString::from("tok_test")).unwrap();
        Self {
            api,
            ..harness
        }
    }

    fn auth_flow(&self) -> AuthFlow<Arc<InMemoryApi>> {
        AuthFlow::new(
            Arc::clone(&self.api),
            self.session.clone(),
            Arc::clone(&self.durable) as Arc<dyn KeyValueStorage>,
            DraftStore::new(Arc::new(MemoryStorage::new())),
            Arc::clone(&self.ui) as Arc<dyn Notifier>,
            Arc::clone(&self.ui) as Arc<dyn Confirmer>,
            Arc::clone(&self.ui) as Arc<dyn Navigator>,
        )
    }

    fn transaction_flow(&self) -> TransactionFlow<Arc<InMemoryApi>> {
        TransactionFlow::new(
            Arc::clone(&self.api),
            self.session.clone(),
            Arc::clone(&self.ui) as Arc<dyn Notifier>,
            Arc::clone(&self.ui) as Arc<dyn Confirmer>,
            Arc::clone(&self.ui) as Arc<dyn Navigator>,
        )
    }
}

// =============================================================================
// Signup and sign-in
// =============================================================================

#[tokio::test(start_paused = true)]
async fn full_signup_flow_creates_account_and_session() {
    let harness = Harness::new(true);
    let mut auth = harness.auth_flow();

    assert!(auth.submit_identity("Quinn", "Fox", "quinn@example.com"));
    assert!(auth.submit_password("Str0ng!pass", "Str0ng!pass"));
    assert!(
        auth.finalize(Some("+1 555 0100"), true, true).await,
        "finalize should succeed"
    );

    assert_eq!(auth.state(), SignupState::SignedIn);
    assert_eq!(harness.api.calls().signup, 1);
    assert!(harness.session.is_authenticated());
    assert_eq!(
        harness.durable.get(keys::AUTH_TOKEN).unwrap(),
        Some("tok_test".to_owned())
    );
    assert_eq!(
        harness.durable.get(keys::PHONE_NUMBER).unwrap(),
        Some("+1 555 0100".to_owned())
    );
    assert_eq!(
        harness.durable.get(keys::MARKETING_OPT_IN).unwrap(),
        Some("true".to_owned())
    );
    assert_eq!(
        harness.ui.screens(),
        vec![Screen::SignupPassword, Screen::SignupFinalize, Screen::Welcome]
    );
}

#[tokio::test(start_paused = true)]
async fn finalize_without_draft_issues_no_signup_call() {
    let harness = Harness::new(true);
    let mut auth = harness.auth_flow();

    assert!(!auth.finalize(None, true, false).await);
    assert_eq!(harness.api.calls().signup, 0);
    assert!(harness.ui.last_error().contains("incomplete"));
    assert!(!harness.session.is_authenticated());
}

#[tokio::test(start_paused = true)]
async fn sign_in_sets_token_and_remember_flag() {
    let harness = Harness::new(true);
    let mut auth = harness.auth_flow();

    assert!(auth.sign_in("quinn@example.com", "Str0ng!pass", true).await);
    assert!(harness.session.is_authenticated());
    assert_eq!(
        harness.durable.get(keys::REMEMBER_ME).unwrap(),
        Some("true".to_owned())
    );
    assert_eq!(harness.ui.screens(), vec![Screen::Dashboard]);
}

// =============================================================================
// Dashboard initialization and the session probe
// =============================================================================

#[tokio::test]
async fn initialize_without_session_fails_closed() {
    let harness = Harness::new(true);
    let mut flow = harness.transaction_flow();

    assert!(!flow.initialize().await);
    assert_eq!(harness.api.calls().me, 0);
    assert_eq!(harness.ui.screens(), vec![Screen::SignIn]);
}

#[tokio::test]
async fn probe_failure_clears_token_and_redirects() {
    let harness = Harness::signed_in(true);
    harness.api.fail_me(true);
    let mut flow = harness.transaction_flow();

    assert!(!flow.initialize().await);
    assert!(!harness.session.is_authenticated());
    assert_eq!(harness.durable.get(keys::AUTH_TOKEN).unwrap(), None);
    assert_eq!(harness.ui.screens(), vec![Screen::SignIn]);
    // The probe failure is swallowed, not shown to the user.
    assert!(harness.ui.notices().is_empty());
}

#[tokio::test]
async fn initialize_loads_user_and_transactions() {
    let harness = Harness::signed_in(true);
    harness.api.seed_transactions(fixture());
    let mut flow = harness.transaction_flow();

    assert!(flow.initialize().await);
    assert_eq!(flow.current_user().unwrap().id, UserId::new("usr_me"));
    assert_eq!(flow.transactions().len(), 4);

    let stats = flow.stats();
    assert_eq!(stats.income, 7500);
    assert_eq!(stats.expenses, 1000);
    assert_eq!(stats.balance, 6500);
    assert_eq!(stats.pending_count, 1);
}

#[tokio::test]
async fn filtering_is_a_view_not_a_mutation() {
    let harness = Harness::signed_in(true);
    harness.api.seed_transactions(fixture());
    let mut flow = harness.transaction_flow();
    assert!(flow.initialize().await);

    flow.set_filter(TransactionFilter {
        query: None,
        status: Some(TransactionStatus::Completed),
    });
    let completed: Vec<_> = flow.visible();
    assert_eq!(completed.len(), 3);
    assert!(
        completed
            .iter()
            .all(|t| t.status == TransactionStatus::Completed)
    );

    // Dropping the filter shows the full list again.
    flow.set_filter(TransactionFilter::default());
    assert_eq!(flow.visible().len(), 4);
    assert_eq!(flow.transactions().len(), 4);
}

// =============================================================================
// Send money and confirmation
// =============================================================================

#[tokio::test]
async fn send_money_rejects_non_positive_amount_before_network() {
    let harness = Harness::signed_in(true);
    let mut flow = harness.transaction_flow();
    assert!(flow.initialize().await);

    assert!(
        flow.send_money(0.0, CurrencyCode::USD, "usr_x")
            .await
            .is_none()
    );
    assert!(
        flow.send_money(-5.0, CurrencyCode::USD, "usr_x")
            .await
            .is_none()
    );
    assert_eq!(harness.api.calls().create, 0);
    assert!(harness.ui.last_error().contains("greater than zero"));
}

#[tokio::test]
async fn send_money_rejects_empty_recipient_before_network() {
    let harness = Harness::signed_in(true);
    let mut flow = harness.transaction_flow();
    assert!(flow.initialize().await);

    assert!(
        flow.send_money(25.0, CurrencyCode::USD, "  ")
            .await
            .is_none()
    );
    assert_eq!(harness.api.calls().create, 0);
    assert!(harness.ui.last_error().contains("recipient"));
}

#[tokio::test]
async fn send_money_opens_confirmation_for_new_record() {
    let harness = Harness::signed_in(true);
    let mut flow = harness.transaction_flow();
    assert!(flow.initialize().await);

    let id = flow
        .send_money(123.45, CurrencyCode::USD, "usr_x")
        .await
        .expect("creation should succeed");

    assert_eq!(flow.pending_confirmation(), Some(&id));
    assert_eq!(harness.api.calls().create, 1);

    // The record was created pending, unverified, in minor units.
    let stored = harness.api.transactions();
    let created = stored.iter().find(|t| t.id == id).unwrap();
    assert_eq!(created.amount, 12345);
    assert_eq!(created.status, TransactionStatus::Pending);
    assert!(!created.otp_verified);
    assert_eq!(created.otp_code.len(), 6);

    // The list was re-fetched after the mutation.
    assert_eq!(flow.transactions().len(), 1);
}

#[tokio::test]
async fn submitted_code_is_stored_without_comparison() {
    let harness = Harness::signed_in(true);
    harness.api.seed_transactions(vec![txn(
        "txn_d",
        9999,
        "usr_me",
        "usr_x",
        TransactionStatus::Pending,
    )]);
    let mut flow = harness.transaction_flow();
    assert!(flow.initialize().await);

    // Any code completes the record; the service stores it verbatim.
    let id = TransactionId::new("txn_d");
    assert!(flow.submit_confirmation(&id, "999999").await);

    let stored = harness.api.transactions();
    let record = stored.iter().find(|t| t.id == id).unwrap();
    assert_eq!(record.status, TransactionStatus::Completed);
    assert!(record.otp_verified);
    assert_eq!(record.otp_code, "999999");
}

#[tokio::test]
async fn failed_confirmation_reports_invalid_code() {
    let harness = Harness::signed_in(true);
    harness.api.seed_transactions(vec![txn(
        "txn_d",
        9999,
        "usr_me",
        "usr_x",
        TransactionStatus::Pending,
    )]);
    let mut flow = harness.transaction_flow();
    assert!(flow.initialize().await);

    harness.api.fail_update(true);
    let id = TransactionId::new("txn_d");
    assert!(!flow.submit_confirmation(&id, "123456").await);
    assert!(harness.ui.last_error().contains("Invalid code"));
}

// =============================================================================
// Cancellation
// =============================================================================

#[tokio::test]
async fn cancel_declined_changes_nothing() {
    let harness = Harness::signed_in(false);
    harness.api.seed_transactions(vec![txn(
        "txn_d",
        9999,
        "usr_me",
        "usr_x",
        TransactionStatus::Pending,
    )]);
    let mut flow = harness.transaction_flow();
    assert!(flow.initialize().await);

    assert!(!flow.cancel(&TransactionId::new("txn_d")).await);
    assert_eq!(harness.api.calls().update, 0);
    let stored = harness.api.transactions();
    assert_eq!(stored.first().unwrap().status, TransactionStatus::Pending);
}

#[tokio::test]
async fn cancel_confirmed_marks_record_cancelled() {
    let harness = Harness::signed_in(true);
    harness.api.seed_transactions(vec![txn(
        "txn_d",
        9999,
        "usr_me",
        "usr_x",
        TransactionStatus::Pending,
    )]);
    let mut flow = harness.transaction_flow();
    assert!(flow.initialize().await);

    assert!(flow.cancel(&TransactionId::new("txn_d")).await);
    let stored = harness.api.transactions();
    assert_eq!(stored.first().unwrap().status, TransactionStatus::Cancelled);
    // Full reload after the mutation.
    assert_eq!(
        flow.transactions().first().unwrap().status,
        TransactionStatus::Cancelled
    );
}
