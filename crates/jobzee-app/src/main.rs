//! JobZee client binary.
//!
//! Resolves the session once, then walks the given paths through the
//! navigation shell and logs what each one renders.

use anyhow::Context as _;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jobzee_app::{App, AppConfig, LogFormat, ResolveOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(config.log_format)?;

    // Install rustls crypto provider (required for rustls 0.23+)
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("rustls crypto provider was already installed");
    }

    info!("Starting jobzee");

    let (app, mut board) = App::new(config).context("failed to build application")?;

    let mut paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        paths.push("/".to_string());
    }

    let mut shell = app.shell();
    let first = shell.navigate(&paths[0]);
    info!(path = %paths[0], route = %first.route, held = first.held, "Initial render");

    let outcome = app.start().join().await;
    info!(?outcome, session = ?app.session().get().role(), "Session resolution finished");
    if outcome == ResolveOutcome::Discarded {
        warn!("Startup resolution was discarded");
    }

    for path in &paths {
        let nav = shell.navigate(path);
        let header = shell.header();
        info!(
            path = %path,
            route = %nav.route,
            redirected = nav.redirected(),
            held = nav.held,
            header = ?header.as_ref().map(|h| h.labels()),
            "Navigated"
        );
        println!("{}", serde_json::to_string(&header)?);
    }

    for notice in board.drain() {
        info!(level = ?notice.level, message = %notice.message, "Notice");
    }

    info!("Done");
    Ok(())
}

fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let env_filter = EnvFilter::from_default_env().add_directive("jobzee=info".parse()?);

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init(),
    }

    Ok(())
}
