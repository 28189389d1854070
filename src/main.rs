use anyhow::{Context, Result};
use clap::Parser;
use spectrum_virtualize_exporter::{config::Config, credentials::Credentials, server};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml")]
    config: String,

    /// File containing the credential map for the arrays (overrides config)
    #[arg(long, env = "SPECTRUM_AUTH_FILE")]
    auth_file: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long, env = "EXPORTER_PORT")]
    port: Option<u16>,

    /// Address to bind to (overrides config)
    #[arg(short, long, env = "EXPORTER_ADDR")]
    addr: Option<String>,

    /// Max seconds to allow a probe to take (overrides config)
    #[arg(long)]
    scrape_timeout: Option<u64>,

    /// Allow insecure certificates
    #[arg(long)]
    insecure: bool,

    /// File containing extra PEMs to add to the CA trust store
    #[arg(long)]
    extra_ca_cert: Option<PathBuf>,

    /// Stop a probe at the first collector that fails
    #[arg(long)]
    fail_fast: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Spectrum Virtualize Exporter v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;

    // Override with CLI arguments if provided
    if let Some(auth_file) = args.auth_file {
        config.auth_file = auth_file;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(addr) = args.addr {
        config.server.addr = addr;
    }
    if let Some(timeout) = args.scrape_timeout {
        config.probe.timeout_seconds = timeout;
    }
    if args.insecure {
        config.tls.insecure = true;
    }
    if let Some(extra_ca_cert) = args.extra_ca_cert {
        config.tls.extra_ca_cert = Some(extra_ca_cert);
    }
    if args.fail_fast {
        config.probe.fail_fast = true;
    }
    config.validate()?;

    let credentials = Credentials::load(&config.auth_file).with_context(|| {
        format!(
            "Failed to read API authentication map file {}",
            config.auth_file.display()
        )
    })?;

    info!("Loaded {} API credentials", credentials.len());
    info!(
        "Probe endpoint: http://{}:{}/probe?target=<url>",
        config.server.addr, config.server.port
    );

    if let Err(e) = server::start(config, credentials).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
