//! Authentication flow controller.
//!
//! Drives the three-step signup state machine, the sign-in path, logout,
//! and the signed-in redirect on auth screens. All collaborators are passed
//! in at construction; every outcome the user should see goes through the
//! injected [`Notifier`].

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use quantum_pay_client::SessionStore;
use quantum_pay_client::storage::{KeyValueStorage, keys};
use quantum_pay_core::{Email, PasswordCheck};

use crate::api::QuantumApi;
use crate::draft::{DraftStore, SignupDraft};
use crate::ui::{Confirmer, Navigator, Notice, Notifier, Screen};

/// Pause between a successful authentication and the navigation away, so
/// the success notice is visible.
pub const POST_AUTH_DELAY: Duration = Duration::from_millis(1500);

/// Named states of the signup machine.
///
/// Sign-in is a separate, non-stepped path directly into `SignedIn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupState {
    /// Collecting name and email.
    CollectingIdentity,
    /// Collecting the password and its confirmation.
    CollectingPassword,
    /// Collecting phone/terms and creating the account.
    Finalizing,
    /// Authentication finished.
    SignedIn,
}

impl SignupState {
    /// The state a returning user resumes in, given what the draft holds.
    #[must_use]
    pub const fn from_draft(draft: &SignupDraft) -> Self {
        if draft.is_complete() {
            Self::Finalizing
        } else if draft.name.is_some() && draft.email.is_some() {
            Self::CollectingPassword
        } else {
            Self::CollectingIdentity
        }
    }
}

/// Controller for signup, sign-in, and logout.
pub struct AuthFlow<A> {
    api: A,
    session: SessionStore,
    preferences: Arc<dyn KeyValueStorage>,
    drafts: DraftStore,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
    navigator: Arc<dyn Navigator>,
    state: SignupState,
}

impl<A: QuantumApi> AuthFlow<A> {
    /// Create a new controller.
    ///
    /// `preferences` is the durable store for the remember-me, phone, and
    /// marketing keys; the draft store should sit on ephemeral storage.
    pub fn new(
        api: A,
        session: SessionStore,
        preferences: Arc<dyn KeyValueStorage>,
        drafts: DraftStore,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            session,
            preferences,
            drafts,
            notifier,
            confirmer,
            navigator,
            state: SignupState::CollectingIdentity,
        }
    }

    /// Current signup state.
    #[must_use]
    pub const fn state(&self) -> SignupState {
        self.state
    }

    /// Recompute the signup state from the stored draft, as happens when a
    /// user lands back on a signup screen.
    pub fn resume(&mut self) -> SignupState {
        let draft = self.drafts.load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load signup draft: {e}");
            SignupDraft::default()
        });
        self.state = SignupState::from_draft(&draft);
        self.state
    }

    /// On auth screens: if a session token is already present, leave for
    /// the dashboard instead of re-authenticating.
    ///
    /// Returns `true` if navigation was requested.
    #[must_use]
    pub fn redirect_if_authenticated(&self) -> bool {
        if self.session.is_authenticated() {
            self.navigator.navigate(Screen::Dashboard);
            return true;
        }
        false
    }

    // =========================================================================
    // Signup steps
    // =========================================================================

    /// Identity step: both name fields non-empty and a structurally valid
    /// email. On success the draft gains `{name, email}` and the machine
    /// advances to the password step.
    pub fn submit_identity(&mut self, first_name: &str, last_name: &str, email: &str) -> bool {
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        let email = email.trim();

        if first_name.is_empty() || last_name.is_empty() {
            self.notifier
                .notify(Notice::Error, "Please enter your first and last name");
            return false;
        }

        if Email::parse(email).is_err() {
            self.notifier
                .notify(Notice::Error, "Please enter a valid email address");
            return false;
        }

        let draft = SignupDraft {
            name: Some(format!("{first_name} {last_name}")),
            email: Some(email.to_owned()),
            password: None,
        };

        if let Err(e) = self.drafts.save(&draft) {
            tracing::warn!("Failed to save signup draft: {e}");
            self.notifier
                .notify(Notice::Error, "Could not save your progress, please retry");
            return false;
        }

        self.state = SignupState::CollectingPassword;
        self.navigator.navigate(Screen::SignupPassword);
        true
    }

    /// Password step: the password must satisfy the strength policy and
    /// match its confirmation. On success it is merged into the draft and
    /// the machine advances to the final step.
    pub fn submit_password(&mut self, password: &str, confirmation: &str) -> bool {
        let check = PasswordCheck::evaluate(password);
        if !check.is_valid() {
            let message = check.first_unmet().map_or_else(
                || "Password does not meet the strength requirements".to_owned(),
                |missing| format!("Password is too weak: add {missing}"),
            );
            self.notifier.notify(Notice::Error, &message);
            return false;
        }

        if password != confirmation {
            self.notifier.notify(Notice::Error, "Passwords do not match");
            return false;
        }

        let mut draft = self.drafts.load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load signup draft: {e}");
            SignupDraft::default()
        });
        draft.password = Some(password.to_owned());

        if let Err(e) = self.drafts.save(&draft) {
            tracing::warn!("Failed to save signup draft: {e}");
            self.notifier
                .notify(Notice::Error, "Could not save your progress, please retry");
            return false;
        }

        self.state = SignupState::Finalizing;
        self.navigator.navigate(Screen::SignupFinalize);
        true
    }

    /// Final step: requires accepted terms and a complete draft, then
    /// creates the account, stores the session token, persists the optional
    /// preferences, clears the draft, and moves to the landing page.
    pub async fn finalize(
        &mut self,
        phone: Option<&str>,
        terms_accepted: bool,
        marketing_opt_in: bool,
    ) -> bool {
        if !terms_accepted {
            self.notifier
                .notify(Notice::Error, "Please accept the terms and conditions");
            return false;
        }

        let draft = self.drafts.load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load signup draft: {e}");
            SignupDraft::default()
        });

        let (Some(name), Some(email), Some(password)) =
            (&draft.name, &draft.email, &draft.password)
        else {
            self.notifier.notify(
                Notice::Error,
                "Your registration is incomplete, please restart the signup",
            );
            self.state = SignupState::CollectingIdentity;
            self.navigator.navigate(Screen::SignupIdentity);
            return false;
        };

        let auth = match self.api.signup(name, email, password).await {
            Ok(auth) => auth,
            Err(e) => {
                tracing::warn!("Signup failed: {e}");
                self.notifier.notify(Notice::Error, &e.to_string());
                return false;
            }
        };

        if let Err(e) = self.session.set_token(SecretString::from(auth.auth_token)) {
            tracing::warn!("Failed to persist session token: {e}");
        }
        if let Some(user) = auth.user {
            self.session.cache_user(user);
        }

        if let Some(phone) = phone.map(str::trim).filter(|p| !p.is_empty())
            && let Err(e) = self.preferences.set(keys::PHONE_NUMBER, phone)
        {
            tracing::warn!("Failed to persist phone number: {e}");
        }
        if let Err(e) = self
            .preferences
            .set(keys::MARKETING_OPT_IN, if marketing_opt_in { "true" } else { "false" })
        {
            tracing::warn!("Failed to persist marketing preference: {e}");
        }

        if let Err(e) = self.drafts.clear() {
            tracing::warn!("Failed to clear signup draft: {e}");
        }

        self.notifier
            .notify(Notice::Success, "Account created! Redirecting...");
        self.state = SignupState::SignedIn;

        tokio::time::sleep(POST_AUTH_DELAY).await;
        self.navigator.navigate(Screen::Welcome);
        true
    }

    // =========================================================================
    // Sign-in and logout
    // =========================================================================

    /// Sign in with email and password.
    ///
    /// `remember` is recorded as a durable flag; it has no effect on the
    /// token's lifetime.
    pub async fn sign_in(&mut self, email: &str, password: &str, remember: bool) -> bool {
        let email = email.trim();

        if Email::parse(email).is_err() {
            self.notifier
                .notify(Notice::Error, "Please enter a valid email address");
            return false;
        }

        if password.is_empty() {
            self.notifier
                .notify(Notice::Error, "Please enter your password");
            return false;
        }

        let auth = match self.api.login(email, password).await {
            Ok(auth) => auth,
            Err(e) => {
                tracing::warn!("Login failed: {e}");
                self.notifier.notify(Notice::Error, &e.to_string());
                return false;
            }
        };

        if let Err(e) = self.session.set_token(SecretString::from(auth.auth_token)) {
            tracing::warn!("Failed to persist session token: {e}");
        }
        if let Some(user) = auth.user {
            self.session.cache_user(user);
        }

        let remember_result = if remember {
            self.preferences.set(keys::REMEMBER_ME, "true")
        } else {
            self.preferences.remove(keys::REMEMBER_ME)
        };
        if let Err(e) = remember_result {
            tracing::warn!("Failed to persist remember-me flag: {e}");
        }

        self.notifier
            .notify(Notice::Success, "Welcome back! Redirecting...");
        self.state = SignupState::SignedIn;

        tokio::time::sleep(POST_AUTH_DELAY).await;
        self.navigator.navigate(Screen::Dashboard);
        true
    }

    /// Sign out after interactive confirmation.
    ///
    /// Declining the confirmation changes nothing. Confirming clears the
    /// session token and navigates to the sign-in entry point.
    pub fn log_out(&mut self) -> bool {
        if !self.confirmer.confirm("Are you sure you want to sign out?") {
            return false;
        }

        if let Err(e) = self.session.clear_token() {
            tracing::warn!("Failed to remove persisted token: {e}");
        }

        self.state = SignupState::CollectingIdentity;
        self.navigator.navigate(Screen::SignIn);
        true
    }
}
