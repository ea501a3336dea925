//! Auth-session orchestration for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The sign-in page calls [`AuthManager`] after collecting form input; route
//! guards read [`AuthState`] for the return location and the [`Session`] for
//! the token. On success the manager persists the issued token; on failure it
//! raises an ERROR popup and hands the error back so the page can reset.
//!
//! ERROR HANDLING
//! ==============
//! Validation failures stay inline (no popup, no request). Backend and
//! transport failures become one ERROR popup each and are never retried. An
//! unsupported social provider is an INFO popup, not an error.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::config::AuthEndpoints;
use crate::net::api::{ApiClient, ApiError};
use crate::net::transport::HttpTransport;
use crate::net::types::{AuthResponse, GoogleAuthRequest, LoginRequest, SignUpRequest};
use crate::state::popup::{Notifier, PopupRequest, PopupVariant};
use crate::state::session::Session;
use crate::util::validation::{AuthMode, Credentials, ValidationErrors, validate};

pub const SIGN_IN_FAILED: &str = "Signin Failed!";
pub const SIGN_UP_FAILED: &str = "Signup Failed!";
pub const GOOGLE_LOGIN_FAILED: &str = "Google Login Failed!";
pub const APPLE_LOGIN_FAILED: &str = "Apple Login Failed!";

/// Lifecycle of one kind of auth operation as seen by the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// The operations the manager exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthOperation {
    SignIn,
    SignUp,
    Social(SocialProvider),
}

impl AuthOperation {
    /// Popup heading used when this operation fails.
    pub fn failure_heading(self) -> &'static str {
        match self {
            Self::SignIn => SIGN_IN_FAILED,
            Self::SignUp => SIGN_UP_FAILED,
            Self::Social(SocialProvider::Google) => GOOGLE_LOGIN_FAILED,
            Self::Social(SocialProvider::Apple) => APPLE_LOGIN_FAILED,
        }
    }
}

/// Third-party identity providers offered on the sign-in page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SocialProvider {
    Google,
    Apple,
}

impl SocialProvider {
    pub fn label(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Apple => "Apple",
        }
    }
}

/// Identity proof obtained from a provider SDK.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SocialPayload {
    /// OAuth authorization code (auth-code flow).
    AuthCode(String),
    /// The provider SDK failed or was dismissed; carries its message.
    Failed(String),
}

/// Why an auth operation did not produce a session.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AuthError {
    /// Form input failed validation; nothing was sent.
    #[error("invalid input: {0}")]
    Validation(ValidationErrors),

    /// The backend or network rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The provider SDK did not yield an identity proof.
    #[error("{} login failed: {message}", .provider.label())]
    Provider { provider: SocialProvider, message: String },

    /// The provider has no backend support.
    #[error("{} login is not available", .0.label())]
    UnsupportedProvider(SocialProvider),
}

impl AuthError {
    /// Field errors to render inline, if this was a validation failure.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::Api(_) | Self::Provider { .. } | Self::UnsupportedProvider(_) => None,
        }
    }
}

/// Per-operation UI state shared through context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub sign_in: Phase,
    pub sign_up: Phase,
    pub social: Phase,
    /// Location a guard redirected away from, consumed after sign-in.
    pub return_to: Option<String>,
}

impl AuthState {
    fn phase_mut(&mut self, op: AuthOperation) -> &mut Phase {
        match op {
            AuthOperation::SignIn => &mut self.sign_in,
            AuthOperation::SignUp => &mut self.sign_up,
            AuthOperation::Social(_) => &mut self.social,
        }
    }

    pub fn phase(&self, op: AuthOperation) -> Phase {
        match op {
            AuthOperation::SignIn => self.sign_in,
            AuthOperation::SignUp => self.sign_up,
            AuthOperation::Social(_) => self.social,
        }
    }

    /// Mark `op` as in flight.
    pub fn begin(&mut self, op: AuthOperation) {
        *self.phase_mut(op) = Phase::Pending;
    }

    /// Record how `op` resolved.
    pub fn finish<T>(&mut self, op: AuthOperation, result: &Result<T, AuthError>) {
        *self.phase_mut(op) = if result.is_ok() { Phase::Succeeded } else { Phase::Failed };
    }

    /// Whether any operation is pending, used to disable the form.
    pub fn is_busy(&self) -> bool {
        [self.sign_in, self.sign_up, self.social].contains(&Phase::Pending)
    }

    /// Where to go after a successful sign-in; clears the stored location.
    pub fn take_return_to(&mut self) -> String {
        self.return_to.take().unwrap_or_else(|| "/".to_owned())
    }
}

/// Runs sign-in, sign-up, and social login against the backend.
#[derive(Clone, Debug)]
pub struct AuthManager<T, N> {
    api: ApiClient<T>,
    endpoints: AuthEndpoints,
    notifier: N,
}

impl<T: HttpTransport, N: Notifier> AuthManager<T, N> {
    pub fn new(api: ApiClient<T>, endpoints: AuthEndpoints, notifier: N) -> Self {
        Self { api, endpoints, notifier }
    }

    pub fn session(&self) -> &Session {
        self.api.session()
    }

    /// Validate and submit the sign-in form.
    ///
    /// # Errors
    ///
    /// [`AuthError::Validation`] without any request, or [`AuthError::Api`]
    /// after an ERROR popup.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, AuthError> {
        let errors = validate(AuthMode::SignIn, credentials);
        if !errors.is_valid() {
            return Err(AuthError::Validation(errors));
        }
        let body = LoginRequest { email: credentials.email.trim(), password: &credentials.password };
        self.submit(AuthOperation::SignIn, &self.endpoints.sign_in, &body).await
    }

    /// Validate and submit the sign-up form.
    ///
    /// # Errors
    ///
    /// [`AuthError::Validation`] without any request, or [`AuthError::Api`]
    /// after an ERROR popup.
    pub async fn sign_up(&self, credentials: &Credentials) -> Result<AuthResponse, AuthError> {
        let errors = validate(AuthMode::SignUp, credentials);
        if !errors.is_valid() {
            return Err(AuthError::Validation(errors));
        }
        let body = SignUpRequest {
            full_name: credentials.full_name.trim(),
            email: credentials.email.trim(),
            password: &credentials.password,
            confirm_password: &credentials.confirm_password,
        };
        self.submit(AuthOperation::SignUp, &self.endpoints.sign_up, &body).await
    }

    /// Exchange a provider's identity proof for a session.
    ///
    /// # Errors
    ///
    /// [`AuthError::UnsupportedProvider`] or [`AuthError::Provider`] (INFO
    /// popup, no request) when there is nothing to forward, otherwise
    /// [`AuthError::Api`] after an ERROR popup.
    pub async fn social_login(&self, provider: SocialProvider, payload: SocialPayload) -> Result<AuthResponse, AuthError> {
        match (provider, payload) {
            (SocialProvider::Google, SocialPayload::AuthCode(code)) => {
                let body = GoogleAuthRequest { code: &code };
                self.submit(AuthOperation::Social(provider), &self.endpoints.google, &body).await
            }
            (SocialProvider::Google, SocialPayload::Failed(message)) => {
                self.report_provider_failure(provider, &message);
                Err(AuthError::Provider { provider, message })
            }
            (SocialProvider::Apple, _) => {
                self.report_provider_failure(provider, "Apple Login Not Implemented Yet");
                Err(AuthError::UnsupportedProvider(provider))
            }
        }
    }

    /// Surface a provider-side problem (SDK error, missing support) as INFO.
    pub fn report_provider_failure(&self, provider: SocialProvider, message: &str) {
        leptos::logging::warn!("{} login unavailable: {message}", provider.label());
        self.notifier.show_popup(
            PopupRequest::new(AuthOperation::Social(provider).failure_heading(), message)
                .with_variant(PopupVariant::Info),
        );
    }

    /// Forget the current session.
    pub fn sign_out(&self) {
        self.session().clear();
    }

    async fn submit<B: serde::Serialize>(&self, op: AuthOperation, endpoint: &str, body: &B) -> Result<AuthResponse, AuthError> {
        match self.api.post::<B, AuthResponse>(endpoint, body).await {
            Ok(resp) => {
                self.session().persist(&resp.data.access_token);
                Ok(resp.data)
            }
            Err(e) => {
                leptos::logging::warn!("{endpoint} failed ({}): {}", e.status, e.message);
                self.notifier.show_popup(
                    PopupRequest::new(op.failure_heading(), e.message.clone()).with_variant(PopupVariant::Error),
                );
                Err(AuthError::Api(e))
            }
        }
    }
}
