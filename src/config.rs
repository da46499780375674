//! Configuration for the draw generator.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::entropy::EntropySource;
use crate::retry::RetryPolicy;

/// Default patience for a single bounded draw.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Configuration bundle for a [`Generator`](crate::Generator).
///
/// The entropy source and the retry policy have no usable defaults and must
/// both be provided; construction fails without them. The timeout defaults
/// to [`DEFAULT_TIMEOUT`]. A zero timeout is valid and times out every draw
/// that cannot complete within the race's own scheduling latency.
#[derive(Clone)]
pub struct GeneratorConfig {
    /// Capability producing uniformly distributed integers below a bound.
    pub entropy: Option<Arc<dyn EntropySource>>,
    /// Strategy deciding whether failed draws are repeated.
    pub retry: Option<Arc<dyn RetryPolicy>>,
    /// Patience for a single bounded draw before it is abandoned.
    pub timeout: Duration,
}

impl GeneratorConfig {
    /// Create an empty configuration with the default timeout.
    pub fn new() -> Self {
        Self {
            entropy: None,
            retry: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the entropy source capability.
    pub fn with_entropy(mut self, entropy: impl EntropySource + 'static) -> Self {
        self.entropy = Some(Arc::new(entropy));
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: impl RetryPolicy + 'static) -> Self {
        self.retry = Some(Arc::new(retry));
        self
    }

    /// Set the patience for a single bounded draw.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("entropy", &self.entropy.is_some())
            .field("retry", &self.retry.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::OsEntropy;
    use crate::retry::SingleAttempt;

    #[test]
    fn test_config_defaults() {
        let config = GeneratorConfig::new();

        assert!(config.entropy.is_none());
        assert!(config.retry.is_none());
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_config_builder() {
        let config = GeneratorConfig::new()
            .with_entropy(OsEntropy)
            .with_retry(SingleAttempt)
            .with_timeout(Duration::from_millis(20));

        assert!(config.entropy.is_some());
        assert!(config.retry.is_some());
        assert_eq!(config.timeout, Duration::from_millis(20));
    }
}
