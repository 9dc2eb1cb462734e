//! Nimchat entry point.
//!
//! `nimchat serve` runs the relay; `nimchat chat` runs the terminal client;
//! `nimchat models` prints the grouped catalog.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use nimchat::client::{self, ChatOpts};
use nimchat::config::Config;
use nimchat::server::{AppState, build_app};

#[derive(Parser)]
#[command(name = "nimchat", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay server
    Serve {
        /// Listen host (overrides HOST)
        #[arg(long)]
        host: Option<String>,
        /// Listen port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Chat from the terminal
    Chat {
        /// Relay API base URL
        #[arg(long, env = "NIMCHAT_API_URL", default_value = "http://localhost:3002/api/v1")]
        api_url: String,
        /// Initial model id
        #[arg(long)]
        model: Option<String>,
    },
    /// Print the model catalog grouped by category
    Models {
        /// Relay API base URL
        #[arg(long, env = "NIMCHAT_API_URL", default_value = "http://localhost:3002/api/v1")]
        api_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,nimchat=debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = Config::from_env()?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            if config.api_key.is_none() {
                tracing::warn!(
                    "NVIDIA_API_KEY is not set; chat requests will fail until it is configured"
                );
            }

            let state = AppState::from_config(&config);
            let app = build_app(state);

            let addr = format!("{}:{}", config.host, config.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!("Server running on http://{addr}");

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }

        Commands::Chat { api_url, model } => {
            client::run_chat(ChatOpts { api_url, model }).await?;
        }

        Commands::Models { api_url } => {
            client::show_models(api_url).await?;
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
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
