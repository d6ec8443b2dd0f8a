//! Pokedex - A PokeAPI REPL with an expiring response cache

use anyhow::Context;
use tokio::io::BufReader;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::{Cache, Config, PokeApiClient, Repl};

/// Entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber (stderr, so logs stay out of the REPL)
/// 2. Load configuration from environment variables
/// 3. Create the cache, which starts its reaper
/// 4. Run the REPL on stdin until `exit`, end of input or Ctrl+C
/// 5. Stop the cache reaper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn", can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_ttl={}s, api_base_url={}",
        config.cache_ttl_secs, config.api_base_url
    );

    let cache = Cache::new(config.cache_ttl()).context("failed to create response cache")?;
    let client = PokeApiClient::with_base_url(&config.api_base_url)
        .context("failed to build HTTP client")?;
    let mut repl = Repl::new(client, rand::thread_rng());

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    let outcome = tokio::select! {
        result = repl.run(stdin, &cache, &mut stdout) => result.context("REPL failed"),
        _ = signal::ctrl_c() => {
            warn!("Received Ctrl+C, shutting down");
            println!();
            Ok(())
        }
    };

    let stats = cache.stats();
    info!(
        "Cache at exit: entries={}, hits={}, misses={}, reaped={}, hit_rate={:.2}",
        stats.total_entries,
        stats.hits,
        stats.misses,
        stats.reaped,
        stats.hit_rate()
    );

    cache.stop().await;
    outcome
}
