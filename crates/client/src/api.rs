//! QuantumPay API client.
//!
//! One choke point for every outbound call. The client injects
//! `Content-Type: application/json` on all requests and `Authorization:
//! Bearer <token>` whenever the session holds a token. Remote failures are
//! normalized into [`ApiError::Api`] carrying a user-presentable message.
//! Single attempt, fail fast: no retries, no backoff.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use quantum_pay_core::{Transaction, TransactionId, User, WebhookLog, WebhookLogId};

use crate::error::ApiError;
use crate::session::SessionStore;
use crate::wire::{AuthResponse, LoginRequest, NewTransaction, SignupRequest, TransactionPatch};

/// Base URLs of the two remote services.
#[derive(Debug, Clone)]
pub struct ServiceEndpoints {
    /// Base of the authentication service.
    pub auth_base: Url,
    /// Base of the transaction service.
    pub transaction_base: Url,
}

impl ServiceEndpoints {
    /// Build a URL under the auth service.
    #[must_use]
    pub fn auth_url(&self, path: &str) -> String {
        join(&self.auth_base, path)
    }

    /// Build a URL under the transaction service.
    #[must_use]
    pub fn transaction_url(&self, path: &str) -> String {
        join(&self.transaction_base, path)
    }
}

fn join(base: &Url, path: &str) -> String {
    format!("{}/{}", base.as_str().trim_end_matches('/'), path)
}

/// Client for the QuantumPay auth and transaction services.
///
/// Cheaply cloneable; all clones share the HTTP connection pool and the
/// session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    endpoints: ServiceEndpoints,
    session: SessionStore,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed.
    #[must_use]
    pub fn new(endpoints: ServiceEndpoints, session: SessionStore) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(ApiClientInner {
                http,
                endpoints,
                session,
            }),
        }
    }

    /// The session shared with this client.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    // =========================================================================
    // Auth service
    // =========================================================================

    /// Authenticate with email and password.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects the
    /// credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let url = self.inner.endpoints.auth_url("auth/login");
        self.post(url, &LoginRequest { email, password }).await
    }

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service rejects the
    /// registration.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let url = self.inner.endpoints.auth_url("auth/signup");
        self.post(
            url,
            &SignupRequest {
                name,
                email,
                password,
            },
        )
        .await
    }

    /// Fetch the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, including when the token is
    /// missing or no longer accepted.
    pub async fn me(&self) -> Result<User, ApiError> {
        let url = self.inner.endpoints.auth_url("auth/me");
        self.get(url).await
    }

    // =========================================================================
    // Transaction service
    // =========================================================================

    /// List all transactions visible to the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        let url = self.inner.endpoints.transaction_url("transaction");
        self.get(url).await
    }

    /// Create a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_transaction(&self, body: &NewTransaction) -> Result<Transaction, ApiError> {
        let url = self.inner.endpoints.transaction_url("transaction");
        self.post(url, body).await
    }

    /// Fetch a single transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the record does not exist.
    pub async fn get_transaction(&self, id: &TransactionId) -> Result<Transaction, ApiError> {
        let url = self
            .inner
            .endpoints
            .transaction_url(&format!("transaction/{id}"));
        self.get(url).await
    }

    /// Apply a partial update to a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_transaction(
        &self,
        id: &TransactionId,
        patch: &TransactionPatch,
    ) -> Result<Transaction, ApiError> {
        let url = self
            .inner
            .endpoints
            .transaction_url(&format!("transaction/{id}"));
        self.patch(url, patch).await
    }

    /// Delete a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_transaction(&self, id: &TransactionId) -> Result<(), ApiError> {
        let url = self
            .inner
            .endpoints
            .transaction_url(&format!("transaction/{id}"));
        self.delete(url).await
    }

    // =========================================================================
    // Webhook logs (pass-through)
    // =========================================================================

    /// List webhook log records.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_webhook_logs(&self) -> Result<Vec<WebhookLog>, ApiError> {
        let url = self.inner.endpoints.transaction_url("webhook_log");
        self.get(url).await
    }

    /// Create a webhook log record from arbitrary fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_webhook_log(
        &self,
        fields: &serde_json::Value,
    ) -> Result<WebhookLog, ApiError> {
        let url = self.inner.endpoints.transaction_url("webhook_log");
        self.post(url, fields).await
    }

    /// Fetch a webhook log record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the record does not exist.
    pub async fn get_webhook_log(&self, id: &WebhookLogId) -> Result<WebhookLog, ApiError> {
        let url = self
            .inner
            .endpoints
            .transaction_url(&format!("webhook_log/{id}"));
        self.get(url).await
    }

    /// Apply a partial update to a webhook log record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_webhook_log(
        &self,
        id: &WebhookLogId,
        fields: &serde_json::Value,
    ) -> Result<WebhookLog, ApiError> {
        let url = self
            .inner
            .endpoints
            .transaction_url(&format!("webhook_log/{id}"));
        self.patch(url, fields).await
    }

    /// Delete a webhook log record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_webhook_log(&self, id: &WebhookLogId) -> Result<(), ApiError> {
        let url = self
            .inner
            .endpoints
            .transaction_url(&format!("webhook_log/{id}"));
        self.delete(url).await
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    async fn get<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        self.request::<(), T>(Method::GET, url, None)
            .await?
            .ok_or(ApiError::EmptyBody)
    }

    async fn post<B, T>(&self, url: String, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.request(Method::POST, url, Some(body))
            .await?
            .ok_or(ApiError::EmptyBody)
    }

    async fn patch<B, T>(&self, url: String, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.request(Method::PATCH, url, Some(body))
            .await?
            .ok_or(ApiError::EmptyBody)
    }

    async fn delete(&self, url: String) -> Result<(), ApiError> {
        self.request::<(), serde_json::Value>(Method::DELETE, url, None)
            .await
            .map(|_| ())
    }

    /// The single choke point for outbound calls.
    ///
    /// Returns `Ok(None)` on HTTP 204 and the parsed body otherwise.
    async fn request<B, T>(
        &self,
        method: Method,
        url: String,
        body: Option<&B>,
    ) -> Result<Option<T>, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        tracing::debug!(%method, %url, "API request");

        let mut request = self.inner.http.request(method, url.as_str());
        if let Some(auth) = self.inner.session.authorization_value() {
            request = request.header(AUTHORIZATION, auth);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                %status,
                %url,
                body = %text.chars().take(200).collect::<String>(),
                "API request failed"
            );
            return Err(normalize_error(status, &text));
        }

        let parsed = serde_json::from_str(&text)?;
        Ok(Some(parsed))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("endpoints", &self.inner.endpoints)
            .finish_non_exhaustive()
    }
}

/// Error body shape the services use for failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Normalize a non-success response into a single message-carrying error.
fn normalize_error(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body).map_or_else(
        |_| {
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Error")
            )
        },
        |parsed| parsed.message,
    );

    ApiError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn endpoints() -> ServiceEndpoints {
        ServiceEndpoints {
            auth_base: Url::parse("https://auth.example.com/v1/").unwrap(),
            transaction_base: Url::parse("https://txn.example.com").unwrap(),
        }
    }

    #[test]
    fn test_url_joining_ignores_trailing_slash() {
        let endpoints = endpoints();
        assert_eq!(
            endpoints.auth_url("auth/login"),
            "https://auth.example.com/v1/auth/login"
        );
        assert_eq!(
            endpoints.transaction_url("transaction/txn_1"),
            "https://txn.example.com/transaction/txn_1"
        );
    }

    #[test]
    fn test_normalize_error_uses_message_field() {
        let err = normalize_error(
            StatusCode::UNAUTHORIZED,
            r#"{"message":"Invalid credentials"}"#,
        );
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_normalize_error_falls_back_to_status_line() {
        let err = normalize_error(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_normalize_error_ignores_bodies_without_message() {
        let err = normalize_error(StatusCode::NOT_FOUND, r#"{"error":"nope"}"#);
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_api_client_is_clone_send_sync() {
        fn assert_clone<T: Clone>() {}
        fn assert_send_sync<T: Send + Sync>() {}
        assert_clone::<ApiClient>();
        assert_send_sync::<ApiClient>();
    }
}
