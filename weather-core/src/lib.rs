//! Core library for the `weather-gateway` service.
//!
//! This crate defines:
//! - Coordinate validation for incoming queries
//! - Abstraction over the upstream weather provider
//! - Shaping of provider payloads into the gateway's response
//! - The axum router and request handler
//! - Configuration loading
//!
//! It is used by `weather-gateway`, but can also be reused by other binaries or services.

pub mod config;
pub mod handler;
pub mod model;
pub mod provider;
pub mod validate;

pub use config::{Config, ProviderConfig};
pub use handler::{AppState, GatewayError, router};
pub use model::{TemperatureCategory, WeatherPayload, WeatherReport};
pub use provider::{OpenWeatherProvider, ProviderError, WeatherProvider};
pub use validate::{ValidationError, validate_coordinates};
