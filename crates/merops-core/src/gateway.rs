// ── Rate-limit-aware gateway ──
//
// Every orchestrated call, read or write, goes through `Gateway::call` so
// backoff behavior is uniform and no caller re-implements it. The gateway
// is stateless across calls; the retry counter is scoped to one call.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::CallError;

/// Default cap on attempts per call (initial attempt + retries).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Wraps a single logical dashboard call with bounded 429 retry.
///
/// On a rate-limit error the attempt is repeated after a delay that is the
/// larger of the server's `Retry-After` hint and a schedule that doubles
/// from the previous wait, starting at `base_delay` -- the wait sequence
/// is monotonically non-decreasing even when hints fluctuate.
/// After `max_attempts` total attempts the call fails with
/// [`CallError::RateLimited`]. Every other error class is terminal on the
/// first occurrence.
#[derive(Debug, Clone)]
pub struct Gateway {
    max_attempts: u32,
    base_delay: Duration,
}

impl Default for Gateway {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl Gateway {
    /// Create a gateway with the given attempt cap (clamped to >= 1).
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: DEFAULT_BASE_DELAY,
        }
    }

    /// Override the first retry delay (mainly for tests).
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// The configured attempt cap.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run one logical call, retrying rate-limited attempts.
    ///
    /// `attempt` is invoked once per try and must issue a fresh request
    /// each time.
    pub async fn call<T, F, Fut>(&self, op: &'static str, mut attempt: F) -> Result<T, CallError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, merops_api::Error>>,
    {
        let mut delay = self.base_delay;

        for n in 1..=self.max_attempts {
            match attempt().await {
                Ok(payload) => {
                    if n > 1 {
                        debug!(op, attempt = n, "call succeeded after retry");
                    }
                    return Ok(payload);
                }
                Err(err) if err.is_rate_limited() => {
                    if n == self.max_attempts {
                        warn!(op, attempts = n, "rate-limit retries exhausted");
                        return Err(CallError::RateLimited { attempts: n });
                    }
                    let hinted = Duration::from_secs(err.retry_after().unwrap_or(0));
                    let wait = delay.max(hinted);
                    debug!(op, attempt = n, wait_secs = wait.as_secs(), "rate limited, backing off");
                    tokio::time::sleep(wait).await;
                    // Double from the last wait, not the raw schedule, so a
                    // large server hint can never be followed by a shorter
                    // delay.
                    delay = wait.saturating_mul(2);
                }
                Err(err) => return Err(classify(err)),
            }
        }

        // Loop always returns within max_attempts iterations.
        Err(CallError::RateLimited {
            attempts: self.max_attempts,
        })
    }
}

/// Map a terminal api error into the core taxonomy.
fn classify(err: merops_api::Error) -> CallError {
    match err {
        merops_api::Error::Transport(e) => {
            // reqwest wraps HTTP status failures and IO failures in one
            // type; only the latter are transport errors here.
            match e.status() {
                Some(status) => CallError::Remote {
                    status: Some(status.as_u16()),
                    message: e.to_string(),
                },
                None => CallError::Transport {
                    message: e.to_string(),
                },
            }
        }
        merops_api::Error::InvalidUrl(e) => CallError::Transport {
            message: e.to_string(),
        },
        merops_api::Error::Authentication { message } => CallError::Remote {
            status: Some(401),
            message,
        },
        merops_api::Error::Api { status, message } => CallError::Remote {
            status: Some(status),
            message,
        },
        merops_api::Error::Deserialization { message, .. } => CallError::Remote {
            status: None,
            message,
        },
        // Not reachable through `call` (handled by the retry loop), but
        // classified sensibly for direct users.
        merops_api::Error::RateLimited { .. } => CallError::RateLimited { attempts: 1 },
    }
}
