//! chatlog CLI and REST API entry point.
//!
//! Binary name: `chatlog`
//!
//! Parses CLI arguments, initializes the database and service, then starts
//! the REST API server or prints a status summary.

mod http;
mod state;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chatlog_infra::config::load_config;
use state::AppState;

#[derive(Parser)]
#[command(name = "chatlog", about = "A minimal message-logging service", version)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Machine-readable JSON output for `status`
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server
    Serve {
        /// Port to listen on (overrides config.toml)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind (overrides config.toml)
        #[arg(long)]
        host: Option<String>,
    },

    /// Show the data directory and database location
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,chatlog=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Initialize application state (DB, service)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Serve { port, host } => {
            let config = load_config(&state.data_dir).await;
            let host = host.unwrap_or(config.host);
            let port = port.unwrap_or(config.port);

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} chatlog API listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Status => {
            let config = load_config(&state.data_dir).await;
            let db_path = state.data_dir.join("chatlog.db");

            if cli.json {
                let status = serde_json::json!({
                    "data_dir": state.data_dir,
                    "database": db_path,
                    "host": config.host,
                    "port": config.port,
                });
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!();
                println!(
                    "  Data directory: {}",
                    console::style(state.data_dir.display()).cyan()
                );
                println!(
                    "  Database:       {}",
                    console::style(db_path.display()).cyan()
                );
                println!(
                    "  Bind address:   {}",
                    console::style(format!("{}:{}", config.host, config.port)).cyan()
                );
                println!();
            }
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
