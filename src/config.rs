//! Client configuration baked in at compile time.
//!
//! DESIGN
//! ======
//! The WASM bundle has no process environment at runtime, so values are read
//! with `option_env!` when the crate is built. Parsing lives in small pure
//! helpers so defaults and fallbacks are testable natively.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000/";
pub const DEFAULT_POPUP_AUTO_CLOSE_MS: u32 = 5000;
pub const DEFAULT_POPUP_FADE_MS: u32 = 300;

/// Errors produced while building [`ClientConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The API base URL is empty or does not use an http(s) scheme.
    #[error("invalid API_BASE_URL: {0:?}")]
    InvalidBaseUrl(String),
}

/// Backend routes used by the session manager, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthEndpoints {
    pub sign_in: String,
    pub sign_up: String,
    pub google: String,
}

impl Default for AuthEndpoints {
    fn default() -> Self {
        Self {
            sign_in: "auth/signin".to_owned(),
            sign_up: "auth/signup".to_owned(),
            google: "auth/google".to_owned(),
        }
    }
}

/// Popup countdown and exit-animation durations in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupTimings {
    pub auto_close_ms: u32,
    pub fade_ms: u32,
}

impl Default for PopupTimings {
    fn default() -> Self {
        Self { auto_close_ms: DEFAULT_POPUP_AUTO_CLOSE_MS, fade_ms: DEFAULT_POPUP_FADE_MS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub google_client_id: Option<String>,
    pub endpoints: AuthEndpoints,
    pub popup: PopupTimings,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            google_client_id: None,
            endpoints: AuthEndpoints::default(),
            popup: PopupTimings::default(),
        }
    }
}

impl ClientConfig {
    /// Build typed client config from build-time environment variables.
    ///
    /// Optional:
    /// - `API_BASE_URL`: backend root, default `http://localhost:4000/`
    /// - `GOOGLE_CLIENT_ID`: OAuth client id; Google sign-in is unavailable when absent
    /// - `POPUP_AUTO_CLOSE_MS`: default 5000
    /// - `POPUP_FADE_MS`: default 300
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if `API_BASE_URL` is set to
    /// something other than an http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            option_env!("API_BASE_URL"),
            option_env!("GOOGLE_CLIENT_ID"),
            option_env!("POPUP_AUTO_CLOSE_MS"),
            option_env!("POPUP_FADE_MS"),
        )
    }

    /// Build config from raw optional values, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for an unusable base URL.
    pub fn from_values(
        api_base_url: Option<&str>,
        google_client_id: Option<&str>,
        auto_close_ms: Option<&str>,
        fade_ms: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let api_base_url = parse_base_url(api_base_url)?;
        let google_client_id = google_client_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_owned);
        let popup = PopupTimings {
            auto_close_ms: parse_ms(auto_close_ms, DEFAULT_POPUP_AUTO_CLOSE_MS),
            fade_ms: parse_ms(fade_ms, DEFAULT_POPUP_FADE_MS),
        };
        Ok(Self { api_base_url, google_client_id, endpoints: AuthEndpoints::default(), popup })
    }

    /// [`ClientConfig::from_env`], but an unusable base URL falls back to the
    /// default while every other setting is kept. The rejected value is
    /// returned for logging.
    pub fn from_env_or_default() -> (Self, Option<ConfigError>) {
        Self::from_values_or_default(
            option_env!("API_BASE_URL"),
            option_env!("GOOGLE_CLIENT_ID"),
            option_env!("POPUP_AUTO_CLOSE_MS"),
            option_env!("POPUP_FADE_MS"),
        )
    }

    /// [`ClientConfig::from_values`] with a per-field base URL fallback.
    pub fn from_values_or_default(
        api_base_url: Option<&str>,
        google_client_id: Option<&str>,
        auto_close_ms: Option<&str>,
        fade_ms: Option<&str>,
    ) -> (Self, Option<ConfigError>) {
        match Self::from_values(api_base_url, google_client_id, auto_close_ms, fade_ms) {
            Ok(config) => (config, None),
            Err(e) => {
                let config = Self::from_values(None, google_client_id, auto_close_ms, fade_ms).unwrap_or_default();
                (config, Some(e))
            }
        }
    }
}

fn parse_base_url(raw: Option<&str>) -> Result<String, ConfigError> {
    let value = raw.map_or(DEFAULT_API_BASE_URL, str::trim);
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value.to_owned())
    } else {
        Err(ConfigError::InvalidBaseUrl(value.to_owned()))
    }
}

fn parse_ms(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok()).unwrap_or(default)
}
