//! Pokedex - an interactive shell over the PokeAPI
//!
//! Reads commands from stdin and memoizes every remote lookup in an expiring
//! in-memory cache.

use std::io::{self, BufReader, Write};

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::api::PokeApiClient;
use pokedex::repl::{spawn_line_reader, Flow, Session, PROMPT};
use pokedex::{Cache, Config};

/// Main entry point for the Pokedex shell.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber (stderr, so it stays out of shell output)
/// 2. Load configuration from environment variables
/// 3. Create the cache, which starts its reaper
/// 4. Build the PokeAPI client and the shell session
/// 5. Run the prompt loop until `exit`, end of input, or Ctrl+C
/// 6. Stop the cache reaper
#[tokio::main]
async fn main() -> Result<()> {
    // Defaults to warnings only, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_ttl={}s, api_base_url={}, http_timeout={}s",
        config.cache_ttl, config.api_base_url, config.http_timeout
    );

    let cache = Cache::new(config.cache_ttl()).context("failed to create lookup cache")?;
    let client = PokeApiClient::from_config(&config).context("failed to build HTTP client")?;
    let mut session = Session::new(client, cache);

    let result = tokio::select! {
        result = run_prompt(&mut session) => result,
        _ = shutdown_signal() => {
            println!();
            Ok(())
        }
    };

    session.shutdown();
    info!("Shell shutdown complete");
    result
}

/// Reads lines from stdin and feeds them to the session until it asks to exit.
///
/// Stdin is read on its own thread, so a pending read does not hold up
/// shutdown after Ctrl+C.
async fn run_prompt(session: &mut Session) -> Result<()> {
    let mut lines = spawn_line_reader(BufReader::new(io::stdin()))
        .context("failed to start input reader")?;
    let mut stdout = io::stdout();

    loop {
        print!("{}", PROMPT);
        stdout.flush().context("failed to write prompt")?;

        let Some(line) = lines.recv().await else {
            info!("End of input");
            return Ok(());
        };
        let line = line.context("failed to read input")?;

        let flow = session
            .handle_line(&line, &mut stdout)
            .await
            .context("failed to write output")?;
        if flow == Flow::Exit {
            return Ok(());
        }
    }
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
