use thiserror::Error;

/// Top-level error type for the `merops-api` crate.
///
/// Covers every failure mode of the dashboard client: transport,
/// authentication, rate limiting, and service-level rejections.
/// `merops-core` classifies these at the gateway boundary.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Authentication ──────────────────────────────────────────────
    /// API key rejected (401) or lacks access to the resource (403).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Rate limiting ───────────────────────────────────────────────
    /// The dashboard returned 429. Includes the `Retry-After` hint
    /// in seconds when the server provided one.
    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── Service rejection ───────────────────────────────────────────
    /// Non-success status other than 401/403/429 (validation error,
    /// not found, conflict). Message parsed from the `errors` body
    /// when present.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error is a rate-limit signal the caller
    /// should back off and retry.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// The server's retry hint in seconds, if this is a rate-limit error.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        }
    }

    /// Returns `true` if this error means the API key is bad and no
    /// amount of retrying will help.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// HTTP status code, if one was observed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }
}
