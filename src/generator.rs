//! Bounded random draws and the values derived from them.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::{oneshot, Mutex};
use tokio::time;
use tracing::{debug, instrument, warn};

use crate::config::GeneratorConfig;
use crate::entropy::EntropySource;
use crate::error::{DrawError, DrawResult};
use crate::retry::{Operation, RetryPolicy};

/// Attempts the float generator makes before declaring the digit stream
/// degenerate.
const FLOAT_RETRIES: usize = 5;

/// The value-producing surface of a [`Generator`].
///
/// Consumers that only need random values can depend on this trait and
/// substitute a test double, keeping the draw machinery out of their tests.
#[async_trait]
pub trait Randomizer: Send + Sync {
    /// Decide whether probability `f` activates by chance.
    async fn activate(&self, f: f64) -> DrawResult<bool>;

    /// Produce a float in `(0, 1)` with `precision` decimal digits.
    async fn float(&self, precision: usize) -> DrawResult<f64>;

    /// Draw one integer in `[0, bound)`.
    async fn max(&self, bound: u64) -> DrawResult<u64>;

    /// Draw `n` integers, each in `[0, bound)`.
    async fn n_max(&self, n: usize, bound: u64) -> DrawResult<Vec<u64>>;

    /// Flip a coin: 0 or 1.
    async fn binary(&self) -> DrawResult<u64>;
}

/// Produces pseudo-random integers, floats, and activation decisions.
///
/// Every draw is raced against the configured timeout and repeated under the
/// configured retry policy. The generator holds no mutable state; one
/// instance can serve concurrent callers.
pub struct Generator {
    entropy: Arc<dyn EntropySource>,
    retry: Arc<dyn RetryPolicy>,
    timeout: Duration,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Generator {
    /// Build a generator from a configuration bundle.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::InvalidConfig`] when the entropy source or the
    /// retry policy is absent.
    pub fn new(config: GeneratorConfig) -> DrawResult<Self> {
        let entropy = config.entropy.ok_or_else(|| {
            DrawError::InvalidConfig("entropy source must not be empty".to_string())
        })?;
        let retry = config
            .retry
            .ok_or_else(|| DrawError::InvalidConfig("retry policy must not be empty".to_string()))?;

        Ok(Self {
            entropy,
            retry,
            timeout: config.timeout,
        })
    }

    /// Draw one integer in `[0, bound)`.
    ///
    /// A single attempt races one entropy draw against the configured
    /// timeout; the retry policy decides how often a failed attempt is
    /// repeated. The error returned is the last one the policy gave up on.
    #[instrument(skip(self))]
    pub async fn max(&self, bound: u64) -> DrawResult<u64> {
        let drawn = Arc::new(Mutex::new(None));

        let op: Operation<'_> = {
            let drawn = Arc::clone(&drawn);
            Box::new(move || {
                let drawn = Arc::clone(&drawn);
                async move {
                    let value = self.attempt(bound).await?;
                    *drawn.lock().await = Some(value);
                    Ok(())
                }
                .boxed()
            })
        };

        self.retry.execute(op).await?;

        let value = drawn.lock().await.take().ok_or_else(|| {
            DrawError::ExecutionFailed(
                "retry policy reported success without a drawn value".to_string(),
            )
        })?;

        debug!(value, "draw complete");
        Ok(value)
    }

    /// Draw `n` integers, each in `[0, bound)`, strictly one after another.
    ///
    /// Fails on the first failing draw and returns no partial sequence.
    /// `n = 0` yields an empty sequence without touching the source.
    #[instrument(skip(self))]
    pub async fn n_max(&self, n: usize, bound: u64) -> DrawResult<Vec<u64>> {
        let mut values = Vec::with_capacity(n);

        for _ in 0..n {
            values.push(self.max(bound).await?);
        }

        Ok(values)
    }

    /// Produce a float in `(0, 1)` with `precision` decimal digits.
    ///
    /// The value is assembled from `precision` digit draws. A sequence of
    /// all zeros would construct exactly 0 and is discarded and redrawn, up
    /// to five times in total. `float(0)` always exhausts those attempts:
    /// the empty sequence carries no nonzero digit.
    #[instrument(skip(self))]
    pub async fn float(&self, precision: usize) -> DrawResult<f64> {
        for _ in 0..FLOAT_RETRIES {
            let digits = self.n_max(precision, 10).await?;

            if digits.iter().all(|&d| d == 0) {
                debug!(precision, "discarding all-zero digit sequence");
                continue;
            }

            return digits_to_float(&digits);
        }

        Err(DrawError::ExecutionFailed(format!(
            "no usable digit sequence after {} attempts",
            FLOAT_RETRIES
        )))
    }

    /// Decide whether probability `f` activates by chance.
    ///
    /// A fresh float with the same precision as `f` is drawn and compared;
    /// the decision is true when it lands inside `(0, f)`. Probabilities are
    /// expected in `[0, 1)` as produced by [`float`](Generator::float).
    #[instrument(skip(self))]
    pub async fn activate(&self, f: f64) -> DrawResult<bool> {
        let x = self.float(precision_of(f)).await?;

        Ok(x < f)
    }

    /// Flip a coin: returns 0 or 1.
    ///
    /// Routed through [`max`](Generator::max) with a bound of 2, so the flip
    /// carries the same timeout and retry semantics as any other draw.
    pub async fn binary(&self) -> DrawResult<u64> {
        self.max(2).await
    }

    /// Run one timeout-raced attempt against the entropy source.
    ///
    /// The worker is spawned and never joined: when the race is lost the
    /// caller stops waiting while the draw keeps running in the background,
    /// its eventual outcome discarded.
    async fn attempt(&self, bound: u64) -> DrawResult<u64> {
        let (tx, rx) = oneshot::channel();

        let entropy = Arc::clone(&self.entropy);
        tokio::spawn(async move {
            // Fails silently once the race is lost and the receiver is gone.
            let _ = tx.send(entropy.draw(bound).await);
        });

        tokio::select! {
            _ = time::sleep(self.timeout) => {
                warn!(bound, timeout_ms = self.timeout.as_millis() as u64, "draw timed out");
                Err(DrawError::Timeout {
                    elapsed: self.timeout,
                    bound,
                })
            }
            outcome = rx => match outcome {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(source)) => Err(DrawError::Source { bound, source }),
                Err(_) => Err(DrawError::Source {
                    bound,
                    source: "entropy worker dropped before reporting".into(),
                }),
            },
        }
    }
}

#[async_trait]
impl Randomizer for Generator {
    async fn activate(&self, f: f64) -> DrawResult<bool> {
        Generator::activate(self, f).await
    }

    async fn float(&self, precision: usize) -> DrawResult<f64> {
        Generator::float(self, precision).await
    }

    async fn max(&self, bound: u64) -> DrawResult<u64> {
        Generator::max(self, bound).await
    }

    async fn n_max(&self, n: usize, bound: u64) -> DrawResult<Vec<u64>> {
        Generator::n_max(self, n, bound).await
    }

    async fn binary(&self) -> DrawResult<u64> {
        Generator::binary(self).await
    }
}

/// Count of digits after the decimal point in the shortest exact decimal
/// rendering of `f`.
fn precision_of(f: f64) -> usize {
    let s = format!("{}", f);

    // Probabilities live in [0, 1): whenever a decimal point is present the
    // rendering is "0." followed by the fraction digits.
    if s.contains('.') {
        s.len() - 2
    } else {
        0
    }
}

/// Parse the digit sequence as the fraction of `"0.<digits>"`.
fn digits_to_float(digits: &[u64]) -> DrawResult<f64> {
    let mut s = String::with_capacity(2 + digits.len());
    s.push_str("0.");
    for digit in digits {
        s.push_str(&digit.to_string());
    }

    s.parse()
        .map_err(|err| DrawError::ExecutionFailed(format!("parsing {} as a float: {}", s, err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_of() {
        let cases = [
            (0.0, 0),
            (0.3, 1),
            (0.01, 2),
            (0.12345678, 8),
            (0.87654321, 8),
        ];

        for (f, precision) in cases {
            assert_eq!(precision_of(f), precision, "precision of {}", f);
        }
    }

    #[test]
    fn test_digits_to_float() {
        assert_eq!(digits_to_float(&[2, 7, 3]).unwrap(), 0.273);
        assert_eq!(digits_to_float(&[0, 2, 7, 3]).unwrap(), 0.0273);
        assert_eq!(digits_to_float(&[1]).unwrap(), 0.1);
        assert_eq!(digits_to_float(&[9, 0]).unwrap(), 0.9);
    }
}
