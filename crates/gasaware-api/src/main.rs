//! Gas awareness API server

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gasaware_api::ApiServer;
use gasaware_config::{AppConfig, ConfigManager};

#[derive(Debug, Parser)]
#[command(name = "gasaware-api", version, about = "Gas awareness platform REST API")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "GASAWARE_CONFIG", default_value = "config/gasaware.toml")]
    config: PathBuf,

    /// Override the listen address
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Skip demo data seeding
    #[arg(long)]
    no_seed: bool,
}

impl Cli {
    /// Apply command-line overrides and validate the result
    fn apply(&self, mut config: AppConfig) -> gasaware_config::Result<AppConfig> {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.no_seed {
            config.app.seed_demo_data = false;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigManager::with_path(&cli.config)
        .load()
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    let config = cli.apply(config).context("applying command-line overrides")?;

    init_tracing(&config);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config.display(),
        "Starting gas awareness API"
    );

    ApiServer::new(config).run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use gasaware_config::ConfigError;

    #[test]
    fn test_overrides_are_applied() {
        let cli = Cli::parse_from([
            "gasaware-api",
            "--host",
            "127.0.0.1",
            "-p",
            "9000",
            "--no-seed",
        ]);
        let config = cli.apply(AppConfig::default()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert!(!config.app.seed_demo_data);
    }

    #[test]
    fn test_zero_port_override_is_rejected() {
        let cli = Cli::parse_from(["gasaware-api", "--port", "0"]);
        let err = cli.apply(AppConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
