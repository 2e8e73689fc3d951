// ── Core error types ──
//
// Failures are split into two layers. `CallError` is the terminal outcome
// of one gateway call: distinct variants for retries-exhausted rate
// limiting, service rejection, and connectivity, so callers can tell
// transient from permanent instead of collapsing everything into an
// absent value. `CoreError` covers run-level failures a task cannot
// continue past.

use thiserror::Error;

/// Terminal outcome of a single gateway call.
#[derive(Debug, Clone, Error)]
pub enum CallError {
    /// The rate-limit retry cap was exhausted.
    #[error("rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    /// The service rejected the request (validation, not-found, conflict,
    /// bad credentials). Retrying will not help.
    #[error("remote error{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Remote { status: Option<u16>, message: String },

    /// Connectivity or timeout failure reaching the service.
    #[error("transport error: {message}")]
    Transport { message: String },
}

impl CallError {
    /// Returns `true` if the remote rejected our credentials -- retrying
    /// other entities in the batch is pointless.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Remote { status: Some(401 | 403), .. })
    }
}

/// Missing expected configuration data: a network/interface pair with no
/// configured upload limit. Reported per entity, never fatal to the run.
#[derive(Debug, Clone, Error)]
#[error("no upload limit configured for {network_id}/{interface}")]
pub struct ConfigurationGap {
    pub network_id: String,
    pub interface: String,
}

/// Run-level errors that abort a task.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A fan-out result carried a key the correlation store has never
    /// seen. This is an internal consistency defect, not a remote
    /// failure, and is never silently skipped.
    #[error("internal error: no correlation entry for key {key:?}")]
    UnknownCorrelation { key: String },

    /// A phase-1 call failed; without it the run cannot proceed.
    #[error(transparent)]
    Call(#[from] CallError),

    /// Bad or missing local configuration.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` if this failure is an authentication rejection.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Call(c) if c.is_auth())
    }
}
