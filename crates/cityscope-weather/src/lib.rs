//! Weather data access for Cityscope.
//!
//! Fetches current conditions and the short-term forecast for a named city
//! from the OpenWeatherMap API, with a metric/imperial unit system carried
//! on every request.

pub mod provider;
pub mod types;

pub use provider::WeatherProvider;
pub use types::{ForecastEntry, ForecastSeries, UnitSystem, WeatherError, WeatherSnapshot};
