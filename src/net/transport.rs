//! Raw HTTP transport seam underneath [`super::api::ApiClient`].
//!
//! SYSTEM CONTEXT
//! ==============
//! The API client builds fully-formed requests and interprets responses; a
//! transport only moves bytes. In the browser (`csr`) that is `gloo-net`;
//! natively the browser transport reports a network failure, and tests plug
//! in their own implementation.

#![allow(clippy::unused_async)]

/// HTTP methods the client issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A request ready to hand to a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response as received from the network, before envelope parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response (DNS, CORS, offline, ...).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("network request failed: {0}")]
pub struct TransportError(pub String);

/// Sends [`HttpRequest`]s. Futures are `!Send` because browser fetch is.
#[async_trait::async_trait(?Send)]
pub trait HttpTransport {
    /// Send one request and return whatever status came back.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only when no HTTP response was received.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `fetch`-backed transport used by the running app.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[async_trait::async_trait(?Send)]
impl HttpTransport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::RequestBuilder;

            let mut builder = match request.method {
                Method::Get => RequestBuilder::new(&request.url).method(gloo_net::http::Method::GET),
                Method::Post => RequestBuilder::new(&request.url).method(gloo_net::http::Method::POST),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let outgoing = match request.body {
                Some(body) => builder.body(body),
                None => builder.build(),
            }
            .map_err(|e| TransportError(e.to_string()))?;

            let resp = outgoing.send().await.map_err(|e| TransportError(e.to_string()))?;
            let status = resp.status();
            let status_text = resp.status_text();
            // An unreadable body is treated as empty; the API layer falls back to status text.
            let body = resp.text().await.unwrap_or_default();
            Ok(HttpResponse { status, status_text, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(TransportError("not available outside the browser".to_owned()))
        }
    }
}
