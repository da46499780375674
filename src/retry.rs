//! Retry policy capability and reference implementations.

use std::cmp;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;
use tracing::warn;

use crate::error::DrawResult;

/// A fallible unit of work a [`RetryPolicy`] may run one or more times.
pub type Operation<'a> = Box<dyn FnMut() -> BoxFuture<'a, DrawResult<()>> + Send + 'a>;

/// A capability deciding whether and how a failed operation is repeated.
///
/// One policy instance is shared across draws and must tolerate repeated
/// and possibly concurrent invocation.
#[async_trait]
pub trait RetryPolicy: Send + Sync {
    /// Run `op` one or more times, returning the final outcome.
    ///
    /// A policy that gives up must return the error of the last attempt.
    async fn execute<'a>(&self, op: Operation<'a>) -> DrawResult<()>;
}

/// Policy that runs the operation exactly once and never retries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleAttempt;

#[async_trait]
impl RetryPolicy for SingleAttempt {
    async fn execute<'a>(&self, mut op: Operation<'a>) -> DrawResult<()> {
        op().await
    }
}

/// Policy that retries with exponentially growing, capped delays.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    /// Maximum number of attempts before giving up.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on the delay between retries.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each failed attempt.
    pub backoff_multiplier: f64,
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }
}

#[async_trait]
impl RetryPolicy for ExponentialBackoff {
    async fn execute<'a>(&self, mut op: Operation<'a>) -> DrawResult<()> {
        let mut attempts = 0;
        let mut delay = self.initial_delay;

        loop {
            let err = match op().await {
                Ok(()) => return Ok(()),
                Err(err) => err,
            };

            attempts += 1;
            if attempts >= self.max_attempts {
                return Err(err);
            }

            warn!(
                attempt = attempts,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "attempt failed, retrying"
            );
            tokio::time::sleep(delay).await;
            delay = cmp::min(
                Duration::from_secs_f64(delay.as_secs_f64() * self.backoff_multiplier),
                self.max_delay,
            );
        }
    }
}
