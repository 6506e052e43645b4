use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::types::{City, CityPage, DirectoryError, DirectoryResponse, PAGE_SIZE};

const RECORDS_PATH: &str = "api/records/1.0/search/";
const DATASET: &str = "geonames-all-cities-with-a-population-1000";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Client for the paginated city records API.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    client: Arc<Client>,
    base_url: Url,
}

impl DirectoryClient {
    /// Create a client against the given provider base URL.
    pub fn new(base_url: &str) -> Result<Self, DirectoryError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DirectoryError::Parse(format!("Invalid base URL: {}", e)))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url,
        })
    }

    /// Fetch one page of city records.
    ///
    /// The offset is `page * PAGE_SIZE`; the provider is always asked for
    /// exactly [`PAGE_SIZE`] rows. Transport failures, non-2xx statuses, and
    /// undecodable bodies all fail the call; callers treat any failure as
    /// "no more pages".
    pub async fn fetch_city_page(&self, page: u32) -> Result<CityPage, DirectoryError> {
        let offset = page as usize * PAGE_SIZE;
        tracing::debug!("Fetching city page {} (offset {})", page, offset);

        let url = self
            .base_url
            .join(RECORDS_PATH)
            .map_err(|e| DirectoryError::Parse(format!("Invalid records URL: {}", e)))?;

        let response = self
            .client
            .get(url)
            .query(&[
                ("dataset", DATASET),
                ("q", ""),
                ("rows", &PAGE_SIZE.to_string()),
                ("start", &offset.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status));
        }

        let body = response.text().await?;
        let parsed: DirectoryResponse = serde_json::from_str(&body)
            .map_err(|e| DirectoryError::Parse(e.to_string()))?;

        let cities: Vec<City> = parsed
            .records
            .into_iter()
            .map(|record| City::from(record.fields))
            .collect();

        tracing::debug!("Page {} returned {} cities", page, cities.len());
        Ok(CityPage { cities })
    }
}
