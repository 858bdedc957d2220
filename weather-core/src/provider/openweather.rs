use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::{config::ProviderConfig, model::WeatherPayload};

use super::{ProviderError, WeatherProvider};

/// Client for the OpenWeather current-weather endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    config: ProviderConfig,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// `{base_url}/data/{version}/weather`, without the query string.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/data/{}/weather",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_weather(
        &self,
        api_key: &str,
        lat: &str,
        lon: &str,
    ) -> Result<WeatherPayload, ProviderError> {
        let url = self.endpoint();
        debug!(%url, lat, lon, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", lat),
                ("lon", lon),
                ("appid", api_key),
                ("units", "metric"),
            ])
            .send()
            .await
            // The URL carries the API key; keep it out of errors and logs.
            .map_err(|e| ProviderError::Transport(e.without_url()))?;

        let status = res.status();

        if !status.is_success() {
            match res.text().await {
                Ok(body) => warn!(
                    %status,
                    body = %truncate_body(&body),
                    "OpenWeather returned non-success response"
                ),
                Err(e) => warn!(
                    %status,
                    error = %e.without_url(),
                    "failed to read OpenWeather non-success response body"
                ),
            }
            return Err(ProviderError::Upstream { status });
        }

        // Reading and decoding the body is one step: a cut-off body is a decode failure.
        res.json::<WeatherPayload>()
            .await
            .map_err(|e| ProviderError::Decode(e.without_url()))
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body;
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
