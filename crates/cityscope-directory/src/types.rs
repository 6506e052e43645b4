use serde::{Deserialize, Serialize};

use cityscope_core::{AppError, NetworkError, ParseError};

/// Number of city records requested per directory page.
pub const PAGE_SIZE: usize = 20;

/// A single city record from the directory provider.
///
/// Immutable once fetched; identity is the geoname `id`. The accumulated
/// collection is not deduplicated, so a provider that repeats a record will
/// produce a duplicate row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// External geoname identifier
    pub id: i64,
    pub name: String,
    pub country: String,
    pub timezone: String,
    pub population: i64,
    pub latitude: f64,
    pub longitude: f64,
}

/// One batch of directory results.
#[derive(Debug, Clone, Default)]
pub struct CityPage {
    pub cities: Vec<City>,
}

impl CityPage {
    /// Whether more pages should be requested after this one.
    ///
    /// Policy: any short page (fewer than [`PAGE_SIZE`] records, including
    /// zero) exhausts pagination. This is stricter than trusting only an
    /// empty page and saves the trailing guaranteed-empty request; the
    /// provider's total-count field is never consulted.
    pub fn has_more(&self) -> bool {
        self.cities.len() == PAGE_SIZE
    }
}

/// Directory client errors
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Server error: {0}")]
    Status(reqwest::StatusCode),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Network(e) if e.is_timeout() => {
                AppError::Network(NetworkError::Timeout)
            }
            DirectoryError::Network(e) => {
                AppError::Network(NetworkError::ConnectionFailed(e.to_string()))
            }
            DirectoryError::Status(status) => AppError::Network(NetworkError::ServerError {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("").to_string(),
            }),
            DirectoryError::Parse(msg) => AppError::Parse(ParseError(msg)),
        }
    }
}

/// Raw response shape of the OpenDataSoft records search endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct DirectoryResponse {
    pub records: Vec<DirectoryRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DirectoryRecord {
    pub fields: RecordFields,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordFields {
    pub geoname_id: i64,
    pub name: String,
    pub cou_name_en: String,
    pub timezone: String,
    #[serde(default)]
    pub population: i64,
    /// Provider serves a 2-element pair; index 0 is latitude, index 1 is
    /// longitude. The order is provider-defined, not labelled in the
    /// payload, so a schema change would silently swap the axes.
    pub coordinates: [f64; 2],
}

impl From<RecordFields> for City {
    fn from(fields: RecordFields) -> Self {
        Self {
            id: fields.geoname_id,
            name: fields.name,
            country: fields.cou_name_en,
            timezone: fields.timezone,
            population: fields.population,
            latitude: fields.coordinates[0],
            longitude: fields.coordinates[1],
        }
    }
}
