use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::types::{
    CurrentResponse, ForecastResponse, ForecastSeries, UnitSystem, WeatherError, WeatherSnapshot,
};

const CURRENT_PATH: &str = "data/2.5/weather";
const FORECAST_PATH: &str = "data/2.5/forecast";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Client for the weather provider's current-conditions and forecast
/// endpoints.
///
/// The API credential is plain configuration; how it is provisioned is the
/// caller's concern.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: Url,
    api_key: String,
}

impl WeatherProvider {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, WeatherError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| WeatherError::Parse(format!("Invalid base URL: {}", e)))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Fetch current conditions for a city.
    pub async fn fetch_current(
        &self,
        city: &str,
        unit: UnitSystem,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let raw: CurrentResponse = self.get_json(CURRENT_PATH, city, unit).await?;
        Ok(WeatherSnapshot::from(raw))
    }

    /// Fetch the 5-day/3-hour forecast for a city.
    pub async fn fetch_forecast(
        &self,
        city: &str,
        unit: UnitSystem,
    ) -> Result<ForecastSeries, WeatherError> {
        let raw: ForecastResponse = self.get_json(FORECAST_PATH, city, unit).await?;
        Ok(ForecastSeries::from(raw))
    }

    /// Fetch current conditions and forecast concurrently.
    ///
    /// The two halves resolve independently: either side failing leaves the
    /// other side's result intact, so callers can keep whichever half
    /// succeeded.
    pub async fn fetch_weather(
        &self,
        city: &str,
        unit: UnitSystem,
    ) -> (
        Result<WeatherSnapshot, WeatherError>,
        Result<ForecastSeries, WeatherError>,
    ) {
        tracing::debug!("Fetching weather for {} ({})", city, unit.as_query_param());
        tokio::join!(
            self.fetch_current(city, unit),
            self.fetch_forecast(city, unit)
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
        unit: UnitSystem,
    ) -> Result<T, WeatherError> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| WeatherError::Parse(format!("Invalid endpoint URL: {}", e)))?;

        let response = self
            .client
            .get(url)
            .query(&[
                ("q", city),
                ("appid", &self.api_key),
                ("units", unit.as_query_param()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))
    }
}
