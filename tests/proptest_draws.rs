//! Property tests for the public draw surface.
//!
//! Covers:
//! - Bounded draws never reach their exclusive upper bound
//! - Sequences have exactly the requested length
//! - Scripted digit streams reproduce their decimal expansion in (0, 1)

#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use entropy_draw::{
    BoxError, EntropySource, Generator, GeneratorConfig, OsEntropy, SingleAttempt,
};
use proptest::prelude::*;

/// Source that replays a fixed script of values, wrapping around.
#[derive(Clone)]
struct ScriptedSource {
    script: Vec<u64>,
    cursor: Arc<AtomicUsize>,
}

impl ScriptedSource {
    fn new(script: Vec<u64>) -> Self {
        Self {
            script,
            cursor: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl EntropySource for ScriptedSource {
    async fn draw(&self, _bound: u64) -> Result<u64, BoxError> {
        let i = self.cursor.fetch_add(1, Ordering::SeqCst);
        Ok(self.script[i % self.script.len()])
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn generator(entropy: impl EntropySource + 'static) -> Generator {
    Generator::new(
        GeneratorConfig::new()
            .with_entropy(entropy)
            .with_retry(SingleAttempt)
            .with_timeout(Duration::from_secs(1)),
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn draws_stay_below_bound(bound in 1u64..1_000) {
        let value = runtime().block_on(generator(OsEntropy).max(bound)).unwrap();

        prop_assert!(value < bound);
    }

    #[test]
    fn sequences_have_requested_length(n in 0usize..32, bound in 1u64..100) {
        let values = runtime().block_on(generator(OsEntropy).n_max(n, bound)).unwrap();

        prop_assert_eq!(values.len(), n);
        prop_assert!(values.iter().all(|&v| v < bound));
    }

    #[test]
    fn scripted_floats_match_their_decimal_expansion(
        digits in proptest::collection::vec(0u64..10, 1..12),
    ) {
        prop_assume!(digits.iter().any(|&d| d != 0));

        let expected: f64 = {
            let mut s = String::from("0.");
            for d in &digits {
                s.push_str(&d.to_string());
            }
            s.parse().unwrap()
        };

        let scripted = generator(ScriptedSource::new(digits.clone()));
        let value = runtime().block_on(scripted.float(digits.len())).unwrap();

        prop_assert!(value > 0.0 && value < 1.0);
        prop_assert_eq!(value, expected);
    }
}
