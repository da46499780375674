//! Entropy source capability and the OS-backed reference adapter.

use async_trait::async_trait;

use crate::error::BoxError;

/// A capability producing uniformly distributed integers below a bound.
///
/// The generator shares one instance across every draw it makes, so
/// implementations must tolerate repeated and possibly concurrent
/// invocation.
#[async_trait]
pub trait EntropySource: Send + Sync {
    /// Draw one uniformly distributed integer in `[0, bound)`.
    ///
    /// `bound` is exclusive and must be positive for the draw to be
    /// meaningful.
    async fn draw(&self, bound: u64) -> Result<u64, BoxError>;
}

/// Entropy source backed by the operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

#[async_trait]
impl EntropySource for OsEntropy {
    async fn draw(&self, bound: u64) -> Result<u64, BoxError> {
        if bound == 0 {
            return Err("bound must be greater than zero".into());
        }

        // Values at or above the largest multiple of `bound` below 2^64
        // would bias the draw toward small residues; reject and redraw.
        let cutoff = u64::MAX - u64::MAX % bound;

        loop {
            let mut bytes = [0u8; 8];
            getrandom::getrandom(&mut bytes)?;

            let value = u64::from_le_bytes(bytes);
            if value < cutoff {
                return Ok(value % bound);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_os_entropy_stays_below_bound() {
        for _ in 0..100 {
            let value = OsEntropy.draw(10).await.unwrap();
            assert!(value < 10);
        }
    }

    #[tokio::test]
    async fn test_os_entropy_bound_one_always_zero() {
        for _ in 0..10 {
            assert_eq!(OsEntropy.draw(1).await.unwrap(), 0);
        }
    }

    #[tokio::test]
    async fn test_os_entropy_rejects_zero_bound() {
        assert!(OsEntropy.draw(0).await.is_err());
    }
}
