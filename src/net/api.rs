//! REST API client for the onboarding backend.
//!
//! Every call goes to `{base_url}/{endpoint}` with a JSON body, carries the
//! session's bearer token when one exists, and expects the backend envelope
//! `{statusCode, message, data}` back.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx statuses, transport failures, unserializable request bodies and
//! unparseable envelopes all become an [`ApiError`] with a human-readable
//! `message`, so callers can route it to a popup without inspecting the kind.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::transport::{HttpRequest, HttpResponse, HttpTransport, Method};
use crate::state::session::Session;

/// Fallback when neither the body nor the status line explains a failure.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong!";

/// Response envelope wrapping every successful backend payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub message: String,
    pub data: T,
}

/// Which stage of a call failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The backend answered with a non-2xx status.
    Status,
    /// No response was received.
    Network,
    /// A 2xx response did not match the expected envelope.
    Decode,
    /// The request body could not be serialized; nothing was sent.
    Encode,
}

/// A failed API call.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    /// HTTP status, or `0` when none was received.
    pub status: u16,
    /// Parsed response body; `{}` when the body was not JSON.
    pub body: Value,
}

impl ApiError {
    fn unsent(kind: ApiErrorKind, message: String) -> Self {
        Self { kind, message, status: 0, body: empty_body() }
    }
}

fn empty_body() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Join `base` and `endpoint` with exactly one `/` between them.
pub fn join_url(base: &str, endpoint: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), endpoint.trim_start_matches('/'))
}

/// Parse a response body as JSON, treating anything else as `{}`.
fn parse_body(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| empty_body())
}

/// The body's string `message` field, the status text, or a generic fallback.
pub fn failure_message(body: &Value, status_text: &str) -> String {
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        if !message.is_empty() {
            return message.to_owned();
        }
    }
    if status_text.is_empty() {
        GENERIC_ERROR_MESSAGE.to_owned()
    } else {
        status_text.to_owned()
    }
}

/// Convert a raw response into an envelope or an [`ApiError`].
fn interpret<T: DeserializeOwned>(resp: HttpResponse) -> Result<ApiResponse<T>, ApiError> {
    let body = parse_body(&resp.body);
    if !resp.is_success() {
        return Err(ApiError {
            kind: ApiErrorKind::Status,
            message: failure_message(&body, &resp.status_text),
            status: resp.status,
            body,
        });
    }
    serde_json::from_value::<ApiResponse<T>>(body.clone()).map_err(|e| ApiError {
        kind: ApiErrorKind::Decode,
        message: format!("unexpected response: {e}"),
        status: resp.status,
        body,
    })
}

/// HTTP client bound to one backend and one session.
#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    base_url: String,
    transport: T,
    session: Session,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T, session: Session) -> Self {
        Self { base_url: base_url.into(), transport, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Build the outgoing request, attaching the bearer token when present.
    fn build_request(&self, method: Method, endpoint: &str, body: Option<String>) -> HttpRequest {
        let mut headers = vec![("Content-Type".to_owned(), "application/json".to_owned())];
        if let Some(token) = self.session.token() {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        HttpRequest { method, url: join_url(&self.base_url, endpoint), headers, body }
    }

    /// Send a request and decode the envelope.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for non-2xx statuses, transport failures, or a
    /// success body that does not match `ApiResponse<D>`.
    pub async fn request<B, D>(&self, method: Method, endpoint: &str, body: Option<&B>) -> Result<ApiResponse<D>, ApiError>
    where
        B: Serialize + ?Sized,
        D: DeserializeOwned,
    {
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::unsent(ApiErrorKind::Encode, format!("could not encode request: {e}")))?;
        let request = self.build_request(method, endpoint, body);
        let resp = self.transport.send(request).await.map_err(|e| {
            leptos::logging::warn!("{endpoint}: {e}");
            ApiError::unsent(ApiErrorKind::Network, e.to_string())
        })?;
        interpret(resp)
    }

    /// `GET {endpoint}`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get<D: DeserializeOwned>(&self, endpoint: &str) -> Result<ApiResponse<D>, ApiError> {
        self.request::<(), D>(Method::Get, endpoint, None).await
    }

    /// `POST {endpoint}` with `body` as JSON.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post<B, D>(&self, endpoint: &str, body: &B) -> Result<ApiResponse<D>, ApiError>
    where
        B: Serialize + ?Sized,
        D: DeserializeOwned,
    {
        self.request(Method::Post, endpoint, Some(body)).await
    }
}
