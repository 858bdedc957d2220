//! HTTP surface of the gateway: `GET /weather?lat=..&lon=..`.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::{
    model::WeatherReport,
    provider::{ProviderError, WeatherProvider},
    validate::{ValidationError, validate_coordinates},
};

// Handles only; cloned into every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub api_key: Arc<str>,
    pub provider: Arc<dyn WeatherProvider>,
}

impl AppState {
    pub fn new(api_key: impl Into<Arc<str>>, provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            api_key: api_key.into(),
            provider,
        }
    }
}

/// Raw query parameters. Absent values stay empty and are rejected by validation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CoordinateQuery {
    pub lat: String,
    pub lon: String,
}

impl CoordinateQuery {
    /// Take the first `lat` and first `lon`; later repeats are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut lat = None;
        let mut lon = None;

        for (key, value) in pairs {
            match key.as_str() {
                "lat" if lat.is_none() => lat = Some(value),
                "lon" if lon.is_none() => lon = Some(value),
                _ => {}
            }
        }

        Self {
            lat: lat.unwrap_or_default(),
            lon: lon.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("weather service failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("error encoding JSON response: {0}")]
    Encoding(#[source] serde_json::Error),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match &self {
            GatewayError::Validation(err) => {
                (StatusCode::BAD_REQUEST, format!("Invalid request: {err}")).into_response()
            }
            GatewayError::Provider(_) | GatewayError::Encoding(_) => {
                // Detail stays in the server log only.
                error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn get_weather(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, GatewayError> {
    let query = CoordinateQuery::from_pairs(pairs);
    validate_coordinates(&query.lat, &query.lon)?;

    let payload = state
        .provider
        .fetch_weather(&state.api_key, &query.lat, &query.lon)
        .await?;

    let report = WeatherReport::from_payload(&payload);
    let body = serde_json::to_vec(&report).map_err(GatewayError::Encoding)?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::to_bytes, http::Uri};

    fn query_from(uri: &str) -> CoordinateQuery {
        let uri: Uri = uri.parse().expect("uri should parse");
        let Query(pairs) =
            Query::<Vec<(String, String)>>::try_from_uri(&uri).expect("query should extract");
        CoordinateQuery::from_pairs(pairs)
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        String::from_utf8(bytes.to_vec()).expect("body should be utf-8")
    }

    #[tokio::test]
    async fn validation_error_maps_to_bad_request() {
        let response = GatewayError::from(ValidationError::MissingField).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_text(response).await,
            "Invalid request: both latitude (\"lat\") and longitude (\"lon\") must be provided"
        );
    }

    #[tokio::test]
    async fn provider_error_is_not_leaked() {
        let err = GatewayError::from(ProviderError::Upstream {
            status: StatusCode::UNAUTHORIZED,
        });
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Internal server error");
    }

    #[tokio::test]
    async fn encoding_error_is_not_leaked() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let response = GatewayError::Encoding(source).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Internal server error");
    }

    #[test]
    fn missing_query_parameters_default_to_empty() {
        assert_eq!(query_from("/weather"), CoordinateQuery::default());

        let query = query_from("/weather?lat=35");
        assert_eq!(query.lat, "35");
        assert!(query.lon.is_empty());
    }

    #[test]
    fn repeated_query_parameters_keep_first_value() {
        let query = query_from("/weather?lat=35&lat=36&lon=139&lon=140&units=imperial");
        assert_eq!(
            query,
            CoordinateQuery {
                lat: "35".into(),
                lon: "139".into()
            }
        );
    }

    #[test]
    fn query_values_are_percent_decoded() {
        let query = query_from("/weather?lat=%2D33.86&lon=151.2");
        assert_eq!(query.lat, "-33.86");
        assert_eq!(query.lon, "151.2");
    }
}
