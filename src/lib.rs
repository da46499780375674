//! Timeout-bounded random draws from a pluggable entropy source.
//!
//! This crate produces pseudo-random integers, floating-point values, and
//! boolean activation decisions, deriving each from a cryptographically
//! strong random source while bounding every individual draw with a timeout
//! and retrying failed draws under a caller-supplied policy.
//!
//! ## Features
//!
//! - Every entropy draw is raced against a configured timeout
//! - Pluggable retry via the [`RetryPolicy`] capability, with
//!   [`SingleAttempt`] and [`ExponentialBackoff`] shipped as references
//! - Pluggable randomness via the [`EntropySource`] capability, with the
//!   OS-backed [`OsEntropy`] shipped as reference
//! - Fixed-precision floats and chance-based activation decisions derived
//!   from sequences of bounded digit draws
//! - Typed errors with predicates for timeout and invalid-configuration
//!   conditions
//!
//! ## Example
//!
//! ```no_run
//! use entropy_draw::{ExponentialBackoff, Generator, GeneratorConfig, OsEntropy};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GeneratorConfig::new()
//!         .with_entropy(OsEntropy)
//!         .with_retry(ExponentialBackoff::default())
//!         .with_timeout(Duration::from_millis(50));
//!
//!     let generator = Generator::new(config)?;
//!
//!     // One integer in [0, 6).
//!     let die = generator.max(6).await?;
//!
//!     // A float in (0, 1) with three decimal digits, e.g. 0.273.
//!     let chance = generator.float(3).await?;
//!
//!     // Does a 27.3% probability fire this time?
//!     let fired = generator.activate(0.273).await?;
//!
//!     println!("die={} chance={} fired={}", die, chance, fired);
//!     Ok(())
//! }
//! ```
//!
//! ## Timeout semantics
//!
//! A timeout only means the caller stops waiting. The in-flight entropy draw
//! is spawned as an independent task and never aborted; when the race is
//! lost it keeps running in the background and its eventual outcome is
//! discarded. Callers retrying aggressively with short timeouts should
//! expect one abandoned worker per lost race.

mod config;
mod entropy;
mod error;
mod generator;
mod retry;

pub use config::{GeneratorConfig, DEFAULT_TIMEOUT};
pub use entropy::{EntropySource, OsEntropy};
pub use error::{BoxError, DrawError, DrawResult};
pub use generator::{Generator, Randomizer};
pub use retry::{ExponentialBackoff, Operation, RetryPolicy, SingleAttempt};
