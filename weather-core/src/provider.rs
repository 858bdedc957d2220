use crate::model::WeatherPayload;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Failures talking to the upstream weather service. Never shown to gateway callers.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("error fetching weather data: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("received non-success status from weather provider: {status}")]
    Upstream { status: StatusCode },

    #[error("error decoding weather data: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Source of current weather for a coordinate pair.
///
/// Coordinates arrive as the caller sent them and are expected to have been
/// validated already.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_weather(
        &self,
        api_key: &str,
        lat: &str,
        lon: &str,
    ) -> Result<WeatherPayload, ProviderError>;
}
