//! Bounded retry with a fixed backoff.
//!
//! Attempts are counted, not timed: the operation runs at most `max_attempts` times with
//! `backoff` slept between consecutive attempts. Exhaustion is reported as `None`.

use crate::error::ApiError;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(3);

    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_BACKOFF)
    }
}

/// Run `op` until it succeeds or the policy's attempts are spent.
///
/// `op` receives the 1-based attempt number. Transport failures and unparsable payloads both
/// consume an attempt but are logged under different messages.
pub async fn retry_bounded<T, F, Fut>(policy: &RetryPolicy, label: &str, mut op: F) -> Option<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    for attempt in 1..=policy.max_attempts {
        debug!(
            label,
            attempt,
            max_attempts = policy.max_attempts,
            "Generation attempt started"
        );
        match op(attempt).await {
            Ok(value) => return Some(value),
            Err(err) if err.is_transport() => warn!(
                label,
                attempt,
                max_attempts = policy.max_attempts,
                error = %err,
                "Generation client call failed"
            ),
            Err(err) => warn!(
                label,
                attempt,
                max_attempts = policy.max_attempts,
                error = %err,
                "Generation response could not be parsed"
            ),
        }

        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.backoff).await;
        }
    }

    warn!(
        label,
        max_attempts = policy.max_attempts,
        "Generation attempts exhausted"
    );
    None
}
