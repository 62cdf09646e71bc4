//! REST client for the MediTrack backend.
//!
//! Every outgoing request funnels through one builder that attaches the
//! bearer token from durable storage (except for the public drug search)
//! and one dispatcher that turns non-2xx responses into [`ApiError`],
//! rewriting 429s with the server's `Retry-After` hint. The client performs
//! no retries and no token refresh; errors propagate to the caller as-is.

use gloo_net::http::{Method, Request, RequestBuilder, Response};
use leptos::prelude::expect_context;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::models::{
    AuthResponse, ChangePasswordRequest, DrugResult, LoginRequest, LogoutRequest, Medication,
    MedicationCreate, MedicationUpdate, ProfileUpdateRequest, RegisterRequest, User,
};
use crate::storage::TokenStore;

/// Paths under this prefix are public and never carry credentials.
pub const PUBLIC_DRUG_SEARCH_PREFIX: &str = "/api/drugs/";

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// API failure, split by where the request died.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused, CORS, offline).
    Network(String),
    /// The response arrived but its body could not be decoded.
    Decode(String),
    /// The server answered with a non-2xx status; `message` is the body text
    /// (already rewritten for 429s).
    Status { status: u16, message: String },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Decode(msg) => write!(f, "response decode error: {msg}"),
            ApiError::Status { status, message } => write!(f, "HTTP {status}: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw body text of a status error, if any.
    pub fn body_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => Some(message),
            _ => None,
        }
    }

    /// User-facing message: the server's body when it is a plain-text
    /// message, otherwise the caller's fallback. Structured payloads
    /// (Spring's default error JSON) never reach the screen verbatim.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message, .. } if is_plain_text(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// A body is shown to the user only when it looks like prose, not JSON.
fn is_plain_text(body: &str) -> bool {
    let trimmed = body.trim();
    !trimmed.is_empty() && !trimmed.starts_with('{') && !trimmed.starts_with('[')
}

/// The user-facing rewrite for a 429. The `Retry-After` value is reported
/// verbatim, defaulting to 60 when the header is missing.
pub fn rate_limit_message(retry_after: Option<&str>) -> String {
    format!(
        "Too many requests. Please wait {} seconds and try again.",
        retry_after.unwrap_or("60")
    )
}

/// Bearer credential for a request, as a function of the path and the token
/// currently in durable storage. Public drug-search paths never get one.
pub fn bearer_token_for(path: &str, stored: Option<String>) -> Option<String> {
    if path.starts_with(PUBLIC_DRUG_SEARCH_PREFIX) {
        return None;
    }
    stored
}

fn error_from_status(status: u16, retry_after: Option<String>, body: String) -> ApiError {
    let message = if status == 429 {
        rate_limit_message(retry_after.as_deref())
    } else {
        body
    };
    ApiError::Status { status, message }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

/// Grab the shared client from context.
pub fn use_api() -> ApiClient {
    expect_context::<ApiClient>()
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Base URL from the build environment, local backend by default.
    pub fn from_env() -> Self {
        Self::new(option_env!("MEDITRACK_API_URL").unwrap_or(DEFAULT_BASE_URL))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Single chokepoint for outgoing requests: resolves the URL and
    /// attaches the bearer header per [`bearer_token_for`].
    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = RequestBuilder::new(&self.url(path)).method(method);
        if let Some(token) = bearer_token_for(path, TokenStore::access_token()) {
            req = req.header("Authorization", &format!("Bearer {token}"));
        }
        req
    }

    /// Dispatch and map non-2xx responses to [`ApiError`].
    async fn send(req: Request) -> Result<Response, ApiError> {
        let res = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if res.ok() {
            return Ok(res);
        }
        let retry_after = res.headers().get("Retry-After");
        let body = res.text().await.unwrap_or_default();
        Err(error_from_status(res.status(), retry_after, body))
    }

    async fn send_json<T: DeserializeOwned>(req: Request) -> Result<T, ApiError> {
        Self::send(req)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn with_json<B: Serialize>(req: RequestBuilder, body: &B) -> Result<Request, ApiError> {
        req.json(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn bodyless(req: RequestBuilder) -> Result<Request, ApiError> {
        req.build().map_err(|e| ApiError::Network(e.to_string()))
    }

    // =========================================================
    // Auth endpoints
    // =========================================================

    /// Exchange credentials for a token pair plus the user.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let req = Self::with_json(
            self.builder(Method::POST, "/auth/login"),
            &LoginRequest { email, password },
        )?;
        Self::send_json(req).await
    }

    /// Create an account. The backend sends the verification email; no
    /// session is established here.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, ApiError> {
        let req = Self::with_json(
            self.builder(Method::POST, "/auth/register"),
            &RegisterRequest {
                name,
                email,
                password,
            },
        )?;
        Self::send_json(req).await
    }

    /// Invalidate a refresh token server-side.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), ApiError> {
        let req = Self::with_json(
            self.builder(Method::POST, "/auth/logout"),
            &LogoutRequest { refresh_token },
        )?;
        Self::send(req).await.map(|_| ())
    }

    /// Consume an email-verification token. Returns the server's
    /// confirmation text.
    pub async fn verify_email(&self, token: &str) -> Result<String, ApiError> {
        let req = Self::bodyless(
            self.builder(Method::GET, "/auth/verify-email")
                .query([("token", token)]),
        )?;
        let res = Self::send(req).await?;
        res.text().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn resend_verification(&self, email: &str) -> Result<(), ApiError> {
        let req = Self::bodyless(
            self.builder(Method::POST, "/auth/resend-verification")
                .query([("email", email)]),
        )?;
        Self::send(req).await.map(|_| ())
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        let req = Self::bodyless(
            self.builder(Method::POST, "/auth/forgot-password")
                .query([("email", email)]),
        )?;
        Self::send(req).await.map(|_| ())
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), ApiError> {
        let req = Self::bodyless(
            self.builder(Method::POST, "/auth/reset-password")
                .query([("token", token), ("newPassword", new_password)]),
        )?;
        Self::send(req).await.map(|_| ())
    }

    // =========================================================
    // Profile endpoints
    // =========================================================

    pub async fn get_profile(&self) -> Result<User, ApiError> {
        let req = Self::bodyless(self.builder(Method::GET, "/user/profile"))?;
        Self::send_json(req).await
    }

    pub async fn update_profile(&self, name: &str, email: &str) -> Result<User, ApiError> {
        let req = Self::with_json(
            self.builder(Method::PATCH, "/user/profile"),
            &ProfileUpdateRequest { name, email },
        )?;
        Self::send_json(req).await
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let req = Self::with_json(
            self.builder(Method::POST, "/user/change-password"),
            &ChangePasswordRequest {
                current_password,
                new_password,
            },
        )?;
        Self::send(req).await.map(|_| ())
    }

    // =========================================================
    // Drug search (public, no credentials)
    // =========================================================

    pub async fn search_drugs(&self, name: &str) -> Result<Vec<DrugResult>, ApiError> {
        let req = Self::bodyless(
            self.builder(Method::GET, "/api/drugs/search")
                .query([("name", name)]),
        )?;
        Self::send_json(req).await
    }

    // =========================================================
    // Medication endpoints
    // =========================================================

    pub async fn list_medications(&self) -> Result<Vec<Medication>, ApiError> {
        let req = Self::bodyless(self.builder(Method::GET, "/user-medications/me"))?;
        Self::send_json(req).await
    }

    pub async fn create_medication(
        &self,
        create: &MedicationCreate,
    ) -> Result<Medication, ApiError> {
        let req = Self::with_json(self.builder(Method::POST, "/user-medications"), create)?;
        Self::send_json(req).await
    }

    pub async fn update_medication(
        &self,
        id: i64,
        update: &MedicationUpdate,
    ) -> Result<Medication, ApiError> {
        let req = Self::with_json(
            self.builder(Method::PATCH, &format!("/user-medications/{id}")),
            update,
        )?;
        Self::send_json(req).await
    }

    pub async fn delete_medication(&self, id: i64) -> Result<(), ApiError> {
        let req =
            Self::bodyless(self.builder(Method::DELETE, &format!("/user-medications/{id}")))?;
        Self::send(req).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = ApiClient::new("http://localhost:8080/");
        assert_eq!(api.url("/auth/login"), "http://localhost:8080/auth/login");
    }

    #[test]
    fn bearer_attached_for_private_paths_with_token() {
        let token = Some("abc123".to_string());
        assert_eq!(
            bearer_token_for("/user/profile", token.clone()),
            Some("abc123".to_string())
        );
        assert_eq!(
            bearer_token_for("/user-medications/me", token),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn bearer_never_attached_for_public_drug_search() {
        assert_eq!(
            bearer_token_for("/api/drugs/search", Some("abc123".to_string())),
            None
        );
    }

    #[test]
    fn bearer_absent_without_stored_token() {
        assert_eq!(bearer_token_for("/user/profile", None), None);
    }

    #[test]
    fn rate_limit_message_reports_header_verbatim() {
        assert_eq!(
            rate_limit_message(Some("120")),
            "Too many requests. Please wait 120 seconds and try again."
        );
    }

    #[test]
    fn rate_limit_message_defaults_to_60() {
        assert_eq!(
            rate_limit_message(None),
            "Too many requests. Please wait 60 seconds and try again."
        );
    }

    #[test]
    fn status_429_rewrites_message() {
        let err = error_from_status(429, Some("30".to_string()), "whatever".to_string());
        assert_eq!(
            err,
            ApiError::Status {
                status: 429,
                message: "Too many requests. Please wait 30 seconds and try again.".to_string(),
            }
        );
    }

    #[test]
    fn other_statuses_keep_body_verbatim() {
        let err = error_from_status(403, None, "Please verify your email".to_string());
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.body_message(), Some("Please verify your email"));
    }

    #[test]
    fn display_message_uses_plain_text_body() {
        let err = ApiError::Status {
            status: 400,
            message: "Email already in use".to_string(),
        };
        assert_eq!(err.display_message("fallback"), "Email already in use");
    }

    #[test]
    fn display_message_falls_back_for_structured_or_empty_bodies() {
        let json_body = ApiError::Status {
            status: 500,
            message: r#"{"timestamp":"...","error":"Internal Server Error"}"#.to_string(),
        };
        assert_eq!(json_body.display_message("Update failed."), "Update failed.");

        let empty = ApiError::Status {
            status: 500,
            message: String::new(),
        };
        assert_eq!(empty.display_message("Update failed."), "Update failed.");

        let network = ApiError::Network("connection refused".to_string());
        assert_eq!(network.display_message("Update failed."), "Update failed.");
    }
}
