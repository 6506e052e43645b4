use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cityscope_core::{AppError, NetworkError, ParseError};

/// Number of forecast entries shown to the user.
pub const FORECAST_DISPLAY_LIMIT: usize = 5;

/// Unit system preference, session-wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// The `units` query string value the weather provider expects.
    pub fn as_query_param(self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Metric => Self::Imperial,
            Self::Imperial => Self::Metric,
        }
    }

    /// Temperature suffix for display ("C" or "F").
    pub fn temperature_suffix(self) -> &'static str {
        match self {
            Self::Metric => "C",
            Self::Imperial => "F",
        }
    }

    /// Wind speed unit for display ("m/s" or "mph").
    pub fn wind_speed_suffix(self) -> &'static str {
        match self {
            Self::Metric => "m/s",
            Self::Imperial => "mph",
        }
    }
}

/// Current conditions for one city at fetch time.
///
/// Replaced wholesale on each fetch; no history is retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub description: String,
    /// Relative humidity in percent
    pub humidity: u8,
    pub wind_speed: f64,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
}

/// One 3-hour forecast slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Unix timestamp (seconds) of the slot
    pub timestamp: i64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub description: String,
    /// Precipitation probability in [0, 1]
    pub precipitation_probability: f64,
}

impl ForecastEntry {
    /// Slot time as a UTC datetime, if the timestamp is representable.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// Chronological forecast slots as returned by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub entries: Vec<ForecastEntry>,
}

impl ForecastSeries {
    /// The leading slots shown to the user (at most
    /// [`FORECAST_DISPLAY_LIMIT`]).
    pub fn display_entries(&self) -> &[ForecastEntry] {
        let end = self.entries.len().min(FORECAST_DISPLAY_LIMIT);
        &self.entries[..end]
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Server error: {0}")]
    Status(reqwest::StatusCode),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<WeatherError> for AppError {
    fn from(err: WeatherError) -> Self {
        match err {
            WeatherError::Network(e) if e.is_timeout() => {
                AppError::Network(NetworkError::Timeout)
            }
            WeatherError::Network(e) => {
                AppError::Network(NetworkError::ConnectionFailed(e.to_string()))
            }
            WeatherError::Status(status) => AppError::Network(NetworkError::ServerError {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("").to_string(),
            }),
            WeatherError::Parse(msg) => AppError::Parse(ParseError(msg)),
        }
    }
}

// Raw provider response shapes. Only the fields the app consumes are
// declared; everything else in the payloads is ignored.

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentResponse {
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
    pub wind: WindReadings,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainReadings {
    pub temp: f64,
    pub humidity: u8,
    pub pressure: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionEntry {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WindReadings {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    pub list: Vec<ForecastSlot>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastSlot {
    pub dt: i64,
    pub main: SlotReadings,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
    /// Precipitation probability; absent on some provider plans
    #[serde(default)]
    pub pop: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SlotReadings {
    pub temp_min: f64,
    pub temp_max: f64,
}

fn first_description(mut conditions: Vec<ConditionEntry>) -> String {
    if conditions.is_empty() {
        return String::new();
    }
    conditions.swap_remove(0).description
}

impl From<CurrentResponse> for WeatherSnapshot {
    fn from(raw: CurrentResponse) -> Self {
        Self {
            temperature: raw.main.temp,
            description: first_description(raw.weather),
            humidity: raw.main.humidity,
            wind_speed: raw.wind.speed,
            pressure: raw.main.pressure,
        }
    }
}

impl From<ForecastResponse> for ForecastSeries {
    fn from(raw: ForecastResponse) -> Self {
        Self {
            entries: raw
                .list
                .into_iter()
                .map(|slot| ForecastEntry {
                    timestamp: slot.dt,
                    temp_min: slot.main.temp_min,
                    temp_max: slot.main.temp_max,
                    description: first_description(slot.weather),
                    precipitation_probability: slot.pop,
                })
                .collect(),
        }
    }
}
