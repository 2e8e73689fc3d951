//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and distinct exit codes.

use miette::Diagnostic;
use thiserror::Error;

use merops_core::{CallError, CoreError};

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const RATE_LIMITED: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("No organization ID configured")]
    #[diagnostic(
        code(merops::no_org),
        help(
            "Pass --org, set MERAKI_ORG_ID, or add `org = \"...\"` to {config_path}"
        )
    )]
    MissingOrg { config_path: String },

    #[error("No API key configured")]
    #[diagnostic(
        code(merops::no_api_key),
        help("Pass --api-key or set MERAKI_DASHBOARD_API_KEY")
    )]
    MissingApiKey,

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(merops::validation))]
    Validation { field: String, reason: String },

    // ── Remote failures ──────────────────────────────────────────────
    #[error("The dashboard rejected our credentials")]
    #[diagnostic(
        code(merops::auth_failed),
        help(
            "Verify the API key and that it has access to this organization\n\
             (Dashboard > Organization > Settings > Dashboard API access)."
        )
    )]
    AuthFailed { message: String },

    #[error("Could not reach the dashboard API")]
    #[diagnostic(
        code(merops::connection_failed),
        help("Check connectivity and --base-url. Detail: {message}")
    )]
    ConnectionFailed { message: String },

    #[error("Rate limited after {attempts} attempts")]
    #[diagnostic(
        code(merops::rate_limited),
        help("Lower --concurrency or wait before retrying the run.")
    )]
    RateLimited { attempts: u32 },

    #[error("Run failed: {message}")]
    #[diagnostic(code(merops::run_failed))]
    RunFailed { message: String },

    #[error("Internal error: {message}")]
    #[diagnostic(
        code(merops::internal),
        help("This is a bug in merops; please report it.")
    )]
    Internal { message: String },
}

impl CliError {
    /// The process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingOrg { .. } | Self::MissingApiKey | Self::Validation { .. } => {
                exit_code::USAGE
            }
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::RateLimited { .. } => exit_code::RATE_LIMITED,
            Self::RunFailed { .. } | Self::Internal { .. } => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Call(call) => match call {
                CallError::RateLimited { attempts } => Self::RateLimited { attempts },
                CallError::Transport { message } => Self::ConnectionFailed { message },
                CallError::Remote { status: Some(401 | 403), message } => {
                    Self::AuthFailed { message }
                }
                CallError::Remote { message, .. } => Self::RunFailed { message },
            },
            CoreError::UnknownCorrelation { key } => Self::Internal {
                message: format!("no correlation entry for key {key:?}"),
            },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}
