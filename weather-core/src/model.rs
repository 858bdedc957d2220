use serde::{Deserialize, Serialize};

/// Upper bound (inclusive, Celsius) of the `cold` bucket.
pub const COLD_THRESHOLD_C: f64 = 10.0;
/// Upper bound (inclusive, Celsius) of the `moderate` bucket.
pub const MODERATE_THRESHOLD_C: f64 = 25.0;

const NO_CONDITIONS: &str = "No specific weather data available";

/// The parts of the provider's current-weather payload the gateway uses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    #[serde(default)]
    pub main: MainReadings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    /// Short category label, e.g. "Clouds".
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    /// Degrees Celsius (the provider is asked for metric units).
    #[serde(default)]
    pub temp: f64,
}

impl WeatherPayload {
    /// Join each condition's description (or its label when the description is empty).
    pub fn combined_description(&self) -> String {
        if self.weather.is_empty() {
            return NO_CONDITIONS.to_string();
        }

        self.weather
            .iter()
            .map(|w| {
                if w.description.is_empty() {
                    w.main.as_str()
                } else {
                    w.description.as_str()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn temperature_category(&self) -> TemperatureCategory {
        TemperatureCategory::from_celsius(self.main.temp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureCategory {
    Cold,
    Moderate,
    Hot,
}

impl TemperatureCategory {
    pub fn from_celsius(temp: f64) -> Self {
        if temp <= COLD_THRESHOLD_C {
            TemperatureCategory::Cold
        } else if temp <= MODERATE_THRESHOLD_C {
            TemperatureCategory::Moderate
        } else {
            TemperatureCategory::Hot
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureCategory::Cold => "cold",
            TemperatureCategory::Moderate => "moderate",
            TemperatureCategory::Hot => "hot",
        }
    }
}

impl std::fmt::Display for TemperatureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body returned to gateway callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub description: String,
    pub temperature_category: TemperatureCategory,
}

impl WeatherReport {
    pub fn from_payload(payload: &WeatherPayload) -> Self {
        Self {
            description: payload.combined_description(),
            temperature_category: payload.temperature_category(),
        }
    }
}
