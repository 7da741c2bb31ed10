use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Payroll calculation service.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory containing settings.yaml.
    #[arg(long, env = "PAYROLL_CONFIG_DIR", default_value = "./config/default")]
    config_dir: PathBuf,

    /// Address the HTTP server listens on.
    #[arg(long = "bind", env = "PAYROLL_BIND_ADDR", default_value = "0.0.0.0:3000")]
    bind_addr: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,payroll_engine=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = ConfigLoader::load(&args.config_dir)?;
    let router = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(args.bind_addr).await?;
    tracing::info!(addr = %args.bind_addr, "Payroll engine listening");
    axum::serve(listener, router).await?;

    Ok(())
}
