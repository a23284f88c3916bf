use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use liferadar::api::{ProfileArgs, render_report, run_http_server};
use liferadar::config::{Config, LogFormat, LoggingConfig, generate_default_config};

#[derive(Parser, Debug)]
#[command(
    name = "liferadar",
    version,
    about = "Life Radar: lifespan and personal-finance dashboard"
)]
struct Cli {
    #[arg(long, global = true, help = "Path to a liferadar.toml configuration file")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the dashboard page and JSON API
    Serve {
        #[arg(long, help = "Port to listen on; overrides the configuration file")]
        port: Option<u16>,
    },
    /// Print the dashboard JSON for one profile
    Report {
        #[command(flatten)]
        profile: ProfileArgs,
        #[arg(long)]
        pretty: bool,
    },
    /// Print a commented configuration template
    InitConfig,
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));
    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match Config::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(&config.logging);

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            tracing::info!("Starting Life Radar v{}", env!("CARGO_PKG_VERSION"));
            if let Err(e) = run_http_server(config).await {
                tracing::error!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Report { profile, pretty } => {
            let dashboard = match render_report(&profile, &config) {
                Ok(dashboard) => dashboard,
                Err(e) => {
                    tracing::error!("{e}");
                    std::process::exit(1);
                }
            };
            let rendered = if pretty {
                serde_json::to_string_pretty(&dashboard)
            } else {
                serde_json::to_string(&dashboard)
            };
            match rendered {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    tracing::error!("Failed to serialize dashboard: {e}");
                    std::process::exit(1);
                }
            }
        }
        Command::InitConfig => print!("{}", generate_default_config()),
    }
}
