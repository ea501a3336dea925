//! Shared fixtures for unit tests.

use std::sync::Mutex;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::net::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::state::popup::{Notifier, PopupRequest};

/// Unsigned JWT whose payload carries `exp`.
pub fn jwt_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"u1","exp":{exp}}}"#));
    format!("{header}.{payload}.signature")
}

/// Transport that replays canned responses and records every request.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<Vec<Result<HttpResponse, TransportError>>>,
    /// Scheduler yields before the n-th reply, so calls can overlap.
    yields: Mutex<Vec<usize>>,
    pub requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self { responses: Mutex::new(responses), ..Self::default() }
    }

    /// Delay each reply, in request order, by that many scheduler yields.
    pub fn with_yields(self, yields: Vec<usize>) -> Self {
        *self.yields.lock().unwrap() = yields;
        self
    }

    pub fn replying(status: u16, status_text: &str, body: &str) -> Self {
        Self::new(vec![Ok(HttpResponse {
            status,
            status_text: status_text.to_owned(),
            body: body.to_owned(),
        })])
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request sent")
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        let reply = {
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                Err(TransportError("no canned response".to_owned()))
            } else {
                responses.remove(0)
            }
        };
        let yields = {
            let mut yields = self.yields.lock().unwrap();
            if yields.is_empty() { 0 } else { yields.remove(0) }
        };
        for _ in 0..yields {
            tokio::task::yield_now().await;
        }
        reply
    }
}

#[async_trait::async_trait(?Send)]
impl<'a> HttpTransport for &'a MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}

/// Notifier that records every popup request.
#[derive(Default)]
pub struct RecordingNotifier {
    pub shown: Mutex<Vec<PopupRequest>>,
}

impl RecordingNotifier {
    pub fn popups(&self) -> Vec<PopupRequest> {
        self.shown.lock().unwrap().clone()
    }
}

impl<'a> Notifier for &'a RecordingNotifier {
    fn show_popup(&self, request: PopupRequest) {
        self.shown.lock().unwrap().push(request);
    }
}
