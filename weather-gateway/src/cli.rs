use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use weather_core::{AppState, Config, OpenWeatherProvider, router};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-gateway", version, about = "Weather gateway HTTP server")]
pub struct Cli {
    /// OpenWeather API key.
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Port to listen on; overrides the config file.
    #[arg(short, long, env = "WEATHER_GATEWAY_PORT")]
    pub port: Option<u16>,

    /// Path to a TOML config file. Defaults to the platform config directory.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Resolve configuration from the config file, flags and environment.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let config = Config::load(self.config.as_deref())?
            .with_api_key(self.api_key.clone())
            .with_port(self.port);

        config.require_api_key()?;
        Ok(config)
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.resolve_config()?;

        info!(
            port = config.port,
            provider = %config.provider.base_url,
            api_version = %config.provider.api_version,
            "Configuration loaded"
        );

        let api_key = config.require_api_key()?.to_owned();
        let provider = Arc::new(OpenWeatherProvider::new(config.provider.clone()));
        let app = router(AppState::new(api_key, provider));

        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("Starting server on {addr}");
        axum::serve(listener, app)
            .await
            .context("Server terminated unexpectedly")?;

        Ok(())
    }
}
