//! Service seam between the flow controllers and the HTTP client.
//!
//! Controllers call the remote services through this trait so they can be
//! exercised against an in-memory implementation in tests. The production
//! implementation is a thin delegation to [`ApiClient`].

use async_trait::async_trait;

use quantum_pay_client::ApiClient;
use quantum_pay_client::error::ApiError;
use quantum_pay_client::wire::{AuthResponse, NewTransaction, TransactionPatch};
use quantum_pay_core::{Transaction, TransactionId, User};

/// The subset of the remote surface the flow controllers use.
#[async_trait]
pub trait QuantumApi: Send + Sync {
    /// Authenticate with email and password.
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError>;

    /// Create a new account.
    async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError>;

    /// Fetch the authenticated user.
    async fn me(&self) -> Result<User, ApiError>;

    /// List all transactions visible to the authenticated user.
    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError>;

    /// Create a transaction.
    async fn create_transaction(&self, body: &NewTransaction) -> Result<Transaction, ApiError>;

    /// Apply a partial update to a transaction.
    async fn update_transaction(
        &self,
        id: &TransactionId,
        patch: &TransactionPatch,
    ) -> Result<Transaction, ApiError>;
}

#[async_trait]
impl<T: QuantumApi + ?Sized> QuantumApi for std::sync::Arc<T> {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        (**self).login(email, password).await
    }

    async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        (**self).signup(name, email, password).await
    }

    async fn me(&self) -> Result<User, ApiError> {
        (**self).me().await
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        (**self).list_transactions().await
    }

    async fn create_transaction(&self, body: &NewTransaction) -> Result<Transaction, ApiError> {
        (**self).create_transaction(body).await
    }

    async fn update_transaction(
        &self,
        id: &TransactionId,
        patch: &TransactionPatch,
    ) -> Result<Transaction, ApiError> {
        (**self).update_transaction(id, patch).await
    }
}

#[async_trait]
impl QuantumApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        Self::login(self, email, password).await
    }

    async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        Self::signup(self, name, email, password).await
    }

    async fn me(&self) -> Result<User, ApiError> {
        Self::me(self).await
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        Self::list_transactions(self).await
    }

    async fn create_transaction(&self, body: &NewTransaction) -> Result<Transaction, ApiError> {
        Self::create_transaction(self, body).await
    }

    async fn update_transaction(
        &self,
        id: &TransactionId,
        patch: &TransactionPatch,
    ) -> Result<Transaction, ApiError> {
        Self::update_transaction(self, id, patch).await
    }
}

/// In-memory service fakes for tests.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use std::sync::{Mutex, PoisonError};

    use async_trait::async_trait;
    use chrono::Utc;

    use quantum_pay_client::error::ApiError;
    use quantum_pay_client::wire::{AuthResponse, NewTransaction, TransactionPatch};
    use quantum_pay_core::{Email, Transaction, TransactionId, User, UserId};

    use super::QuantumApi;

    /// An API that must never be reached.
    ///
    /// Use it to prove that a code path issues no network call.
    pub struct PanickingApi;

    #[async_trait]
    impl QuantumApi for PanickingApi {
        async fn login(&self, _: &str, _: &str) -> Result<AuthResponse, ApiError> {
            panic!("unexpected login call");
        }
        async fn signup(&self, _: &str, _: &str, _: &str) -> Result<AuthResponse, ApiError> {
            panic!("unexpected signup call");
        }
        async fn me(&self) -> Result<User, ApiError> {
            panic!("unexpected current-user call");
        }
        async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
            panic!("unexpected list call");
        }
        async fn create_transaction(&self, _: &NewTransaction) -> Result<Transaction, ApiError> {
            panic!("unexpected create call");
        }
        async fn update_transaction(
            &self,
            _: &TransactionId,
            _: &TransactionPatch,
        ) -> Result<Transaction, ApiError> {
            panic!("unexpected update call");
        }
    }

    /// Number of calls the fake service has seen, per operation.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct CallCounts {
        pub login: usize,
        pub signup: usize,
        pub me: usize,
        pub list: usize,
        pub create: usize,
        pub update: usize,
    }

    #[derive(Debug, Default)]
    struct FakeState {
        next_id: u64,
        authenticated_user: Option<User>,
        transactions: Vec<Transaction>,
        calls: CallCounts,
        fail_me: bool,
        fail_update: bool,
    }

    /// A minimal in-memory stand-in for both remote services.
    ///
    /// Login and signup always succeed (token `tok_test`), records get
    /// sequential identifiers, and updates patch records in place. Failure
    /// toggles simulate the service rejecting a call.
    #[derive(Debug, Default)]
    pub struct InMemoryApi {
        state: Mutex<FakeState>,
    }

    impl InMemoryApi {
        /// An empty fake with no authenticated user.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// A fake that already knows the authenticated user.
        #[must_use]
        pub fn with_user(user: User) -> Self {
            let fake = Self::new();
            fake.lock().authenticated_user = Some(user);
            fake
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
            self.state.lock().unwrap_or_else(PoisonError::into_inner)
        }

        /// Pre-load transactions.
        pub fn seed_transactions(&self, transactions: Vec<Transaction>) {
            self.lock().transactions = transactions;
        }

        /// Make the next current-user calls fail with 401.
        pub fn fail_me(&self, fail: bool) {
            self.lock().fail_me = fail;
        }

        /// Make update calls fail with 500.
        pub fn fail_update(&self, fail: bool) {
            self.lock().fail_update = fail;
        }

        /// Snapshot of the per-operation call counts.
        #[must_use]
        pub fn calls(&self) -> CallCounts {
            self.lock().calls
        }

        /// Snapshot of the stored transactions.
        #[must_use]
        pub fn transactions(&self) -> Vec<Transaction> {
            self.lock().transactions.clone()
        }

        fn make_user(name: &str, email: &str, id: &str) -> Result<User, ApiError> {
            let email = Email::parse(email).map_err(|e| ApiError::Api {
                status: 400,
                message: e.to_string(),
            })?;
            Ok(User {
                id: UserId::new(id),
                name: name.to_owned(),
                email,
            })
        }
    }

    #[async_trait]
    impl QuantumApi for InMemoryApi {
        async fn login(&self, email: &str, _password: &str) -> Result<AuthResponse, ApiError> {
            let mut state = self.lock();
            state.calls.login += 1;

            let user = match state.authenticated_user.clone() {
                Some(user) => user,
                None => {
                    let user = Self::make_user("Test User", email, "usr_login")?;
                    state.authenticated_user = Some(user.clone());
                    user
                }
            };

            Ok(AuthResponse {
                auth_token: "tok_test".to_owned(),
                user: Some(user),
            })
        }

        async fn signup(
            &self,
            name: &str,
            email: &str,
            _password: &str,
        ) -> Result<AuthResponse, ApiError> {
            let mut state = self.lock();
            state.calls.signup += 1;
            state.next_id += 1;

            let user = Self::make_user(name, email, &format!("usr_{}", state.next_id))?;
            state.authenticated_user = Some(user.clone());

            Ok(AuthResponse {
                auth_token: "tok_test".to_owned(),
                user: Some(user),
            })
        }

        async fn me(&self) -> Result<User, ApiError> {
            let mut state = self.lock();
            state.calls.me += 1;

            if state.fail_me {
                return Err(ApiError::Api {
                    status: 401,
                    message: "Unauthorized".to_owned(),
                });
            }

            state.authenticated_user.clone().ok_or(ApiError::Api {
                status: 401,
                message: "Unauthorized".to_owned(),
            })
        }

        async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
            let mut state = self.lock();
            state.calls.list += 1;
            Ok(state.transactions.clone())
        }

        async fn create_transaction(&self, body: &NewTransaction) -> Result<Transaction, ApiError> {
            let mut state = self.lock();
            state.calls.create += 1;
            state.next_id += 1;

            let created = Transaction {
                id: TransactionId::new(format!("txn_{}", state.next_id)),
                amount: body.amount,
                currency: body.currency,
                sender_user_id: body.sender_user_id.clone(),
                receiver_user_id: body.receiver_user_id.clone(),
                status: body.status,
                transaction_date: Utc::now(),
                otp_code: body.otp_code.clone(),
                otp_verified: body.otp_verified,
            };
            state.transactions.push(created.clone());
            Ok(created)
        }

        async fn update_transaction(
            &self,
            id: &TransactionId,
            patch: &TransactionPatch,
        ) -> Result<Transaction, ApiError> {
            let mut state = self.lock();
            state.calls.update += 1;

            if state.fail_update {
                return Err(ApiError::Api {
                    status: 500,
                    message: "Internal Server Error".to_owned(),
                });
            }

            let record = state
                .transactions
                .iter_mut()
                .find(|t| &t.id == id)
                .ok_or(ApiError::Api {
                    status: 404,
                    message: "Transaction not found".to_owned(),
                })?;

            if let Some(status) = patch.status {
                record.status = status;
            }
            if let Some(code) = &patch.otp_code {
                record.otp_code.clone_from(code);
            }
            if let Some(verified) = patch.otp_verified {
                record.otp_verified = verified;
            }

            Ok(record.clone())
        }
    }
}
