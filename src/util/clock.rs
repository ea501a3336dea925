//! Wall-clock access for timers and token expiry checks.

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> f64 {
    #[cfg(feature = "csr")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(feature = "csr"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64() * 1000.0)
    }
}

/// Seconds since the Unix epoch, the unit of a JWT `exp` claim.
pub fn now_secs() -> f64 {
    now_ms() / 1000.0
}
