//! Persisted favorite-city list.
//!
//! A deduplicated, insertion-ordered list of city names, serialized as a
//! JSON array to a single file under the application's config directory.
//! Every mutation writes through synchronously; a failed write keeps the
//! in-memory state and logs, so the user never loses an interaction to a
//! storage fault.

use std::fs;
use std::path::{Path, PathBuf};

const FAVORITES_FILE: &str = "favorites.json";

/// Ordered set of favorite city names, uniqueness by exact match.
#[derive(Debug)]
pub struct FavoritesStore {
    path: PathBuf,
    names: Vec<String>,
}

impl FavoritesStore {
    /// Load the store from the config directory.
    ///
    /// An absent file starts empty; a corrupt file is treated as empty with
    /// a warning. Never fails.
    pub fn load(config_dir: &Path) -> Self {
        let path = config_dir.join(FAVORITES_FILE);
        let names = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Vec<String>>(&contents) {
                Ok(names) => names,
                Err(e) => {
                    tracing::warn!("Corrupt favorites file {:?}, starting empty: {}", path, e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        Self { path, names }
    }

    /// Add a city to the favorites, ignoring duplicates.
    ///
    /// Returns true if the city was newly added.
    pub fn add(&mut self, city: &str) -> bool {
        if self.is_favorite(city) {
            return false;
        }
        self.names.push(city.to_string());
        self.persist();
        true
    }

    /// Remove a city from the favorites.
    ///
    /// Returns true if the city was present.
    pub fn remove(&mut self, city: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|name| name != city);
        let removed = self.names.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Exact, case-sensitive membership test.
    pub fn is_favorite(&self, city: &str) -> bool {
        self.names.iter().any(|name| name == city)
    }

    /// Favorite city names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.names) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize favorites: {}", e);
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!("Failed to create favorites directory: {}", e);
                return;
            }
        }
        if let Err(e) = fs::write(&self.path, json) {
            tracing::warn!("Failed to write favorites to {:?}: {}", self.path, e);
        }
    }
}
