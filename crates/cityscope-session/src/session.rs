//! The shared session state container.
//!
//! One `Session` instance is shared (via `Arc`) by every view that needs
//! weather data, the unit preference, or favorites. Mutations are
//! synchronous under an internal lock; the only async operation is the
//! weather fetch, which holds no lock while requests are in flight.

use parking_lot::Mutex;

use cityscope_weather::{ForecastSeries, UnitSystem, WeatherProvider, WeatherSnapshot};

use crate::favorites::FavoritesStore;

struct SessionInner {
    weather: Option<WeatherSnapshot>,
    forecast: Option<ForecastSeries>,
    unit: UnitSystem,
    favorites: FavoritesStore,
    active_city: Option<String>,
    /// Bumped on every fetch; late responses carrying an older value are
    /// dropped instead of overwriting a newer city's data.
    generation: u64,
}

/// Shared holder of the current weather, forecast, unit preference, and
/// favorites.
pub struct Session {
    provider: WeatherProvider,
    inner: Mutex<SessionInner>,
}

impl Session {
    pub fn new(provider: WeatherProvider, favorites: FavoritesStore) -> Self {
        Self {
            provider,
            inner: Mutex::new(SessionInner {
                weather: None,
                forecast: None,
                unit: UnitSystem::default(),
                favorites,
                active_city: None,
                generation: 0,
            }),
        }
    }

    /// Fetch current conditions and forecast for a city and store them.
    ///
    /// The two provider calls run concurrently and land independently: a
    /// failed half is logged and leaves whatever that half held before,
    /// while a successful half overwrites the previous city's data. If
    /// another fetch started while this one was in flight, the late results
    /// are dropped entirely.
    pub async fn fetch_weather(&self, city: &str) {
        let (generation, unit) = {
            let mut inner = self.inner.lock();
            inner.generation += 1;
            inner.active_city = Some(city.to_string());
            (inner.generation, inner.unit)
        };

        let (current, forecast) = self.provider.fetch_weather(city, unit).await;

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            tracing::debug!("Dropping stale weather response for {}", city);
            return;
        }

        match current {
            Ok(snapshot) => inner.weather = Some(snapshot),
            Err(e) => tracing::warn!("Error fetching current weather for {}: {}", city, e),
        }
        match forecast {
            Ok(series) => inner.forecast = Some(series),
            Err(e) => tracing::warn!("Error fetching forecast for {}: {}", city, e),
        }
    }

    /// The most recent successfully fetched snapshot, if any.
    pub fn weather(&self) -> Option<WeatherSnapshot> {
        self.inner.lock().weather.clone()
    }

    /// The most recent successfully fetched forecast, if any.
    pub fn forecast(&self) -> Option<ForecastSeries> {
        self.inner.lock().forecast.clone()
    }

    /// The city the last fetch targeted.
    pub fn active_city(&self) -> Option<String> {
        self.inner.lock().active_city.clone()
    }

    pub fn unit(&self) -> UnitSystem {
        self.inner.lock().unit
    }

    /// Flip between Metric and Imperial and return the new value.
    ///
    /// Does not re-fetch; previously stored data keeps its old unit until
    /// the next explicit fetch.
    pub fn toggle_unit(&self) -> UnitSystem {
        let mut inner = self.inner.lock();
        inner.unit = inner.unit.toggled();
        inner.unit
    }

    pub fn add_favorite(&self, city: &str) -> bool {
        self.inner.lock().favorites.add(city)
    }

    pub fn remove_favorite(&self, city: &str) -> bool {
        self.inner.lock().favorites.remove(city)
    }

    pub fn is_favorite(&self, city: &str) -> bool {
        self.inner.lock().favorites.is_favorite(city)
    }

    /// Favorite city names in insertion order.
    pub fn favorites(&self) -> Vec<String> {
        self.inner.lock().favorites.names().to_vec()
    }
}
