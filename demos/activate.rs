//! Draws a handful of bounded values and activation decisions from OS
//! entropy.
//!
//! Run with: `cargo run --example activate`

use std::error::Error;
use std::time::Duration;

use entropy_draw::{ExponentialBackoff, Generator, GeneratorConfig, OsEntropy};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let config = GeneratorConfig::new()
        .with_entropy(OsEntropy)
        .with_retry(ExponentialBackoff::default())
        .with_timeout(Duration::from_millis(50));

    let generator = Generator::new(config)?;

    let die = generator.max(6).await?;
    println!("one die face in [0, 6): {}", die);

    let digits = generator.n_max(10, 10).await?;
    println!("ten digits: {:?}", digits);

    let chance = generator.float(3).await?;
    println!("a chance with three digits: {}", chance);

    let coin = generator.binary().await?;
    println!("coin flip: {}", coin);

    for _ in 0..5 {
        let fired = generator.activate(0.273).await?;
        println!("activation at p=0.273: {}", fired);
    }

    Ok(())
}
