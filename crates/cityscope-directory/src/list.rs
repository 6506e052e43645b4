use std::cmp::Ordering;

use crate::client::DirectoryClient;
use crate::types::City;

/// Sortable city columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityColumn {
    Id,
    Name,
    Country,
    Timezone,
    Population,
    Latitude,
    Longitude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Owns the accumulated city set and the user-visible view over it.
///
/// The accumulated `cities` grow monotonically; search and sort only shape
/// the `visible` projection. All methods take `&mut self`, so concurrent
/// `load_next_page` calls on one controller instance cannot race; callers
/// issuing loads from multiple tasks need their own instances.
pub struct CityListController {
    client: DirectoryClient,
    cities: Vec<City>,
    visible: Vec<City>,
    search_term: String,
    sort: Option<(CityColumn, SortDirection)>,
    page: u32,
    has_more: bool,
}

impl CityListController {
    pub fn new(client: DirectoryClient) -> Self {
        Self {
            client,
            cities: Vec::new(),
            visible: Vec::new(),
            search_term: String::new(),
            sort: None,
            page: 0,
            has_more: true,
        }
    }

    /// Fetch the next directory page and append it to the accumulated set.
    ///
    /// No-op once pagination is exhausted. A client failure logs and stops
    /// pagination rather than surfacing an error; the accumulated set keeps
    /// whatever was already loaded. Returns the number of records appended.
    ///
    /// Newly loaded records surface in insertion order: the active search
    /// filter is re-applied but an active sort is not, until the user sorts
    /// again.
    pub async fn load_next_page(&mut self) -> usize {
        if !self.has_more {
            return 0;
        }

        let page = match self.client.fetch_city_page(self.page).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Error fetching city page {}: {}", self.page, e);
                self.has_more = false;
                return 0;
            }
        };

        let appended = page.cities.len();
        self.has_more = page.has_more();
        self.cities.extend(page.cities);
        self.page += 1;
        self.recompute_visible();

        appended
    }

    /// Set the free-text search term.
    ///
    /// Matching is a case-insensitive substring test against the city name,
    /// always recomputed from the full accumulated set; clearing the term
    /// restores every loaded city. An active sort is re-applied to the new
    /// view.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.recompute_visible();
        if let Some((column, direction)) = self.sort {
            self.apply_sort(column, direction);
        }
    }

    /// Sort the visible view by the given column.
    ///
    /// Clicking the same column twice toggles the direction; a new column
    /// resets to ascending. Equal values keep their relative order.
    pub fn sort_by(&mut self, column: CityColumn) {
        let direction = match self.sort {
            Some((current, SortDirection::Ascending)) if current == column => {
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        };
        self.sort = Some((column, direction));
        self.apply_sort(column, direction);
    }

    /// Every city loaded so far, in insertion order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// The current filtered (and possibly sorted) view.
    pub fn visible(&self) -> &[City] {
        &self.visible
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort(&self) -> Option<(CityColumn, SortDirection)> {
        self.sort
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    fn recompute_visible(&mut self) {
        if self.search_term.is_empty() {
            self.visible = self.cities.clone();
            return;
        }
        let needle = self.search_term.to_lowercase();
        self.visible = self
            .cities
            .iter()
            .filter(|city| city.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
    }

    fn apply_sort(&mut self, column: CityColumn, direction: SortDirection) {
        self.visible.sort_by(|a, b| {
            let ordering = compare_column(a, b, column);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
}

/// Natural per-column ordering: lexicographic for strings, numeric otherwise.
fn compare_column(a: &City, b: &City, column: CityColumn) -> Ordering {
    match column {
        CityColumn::Id => a.id.cmp(&b.id),
        CityColumn::Name => a.name.cmp(&b.name),
        CityColumn::Country => a.country.cmp(&b.country),
        CityColumn::Timezone => a.timezone.cmp(&b.timezone),
        CityColumn::Population => a.population.cmp(&b.population),
        CityColumn::Latitude => a.latitude.total_cmp(&b.latitude),
        CityColumn::Longitude => a.longitude.total_cmp(&b.longitude),
    }
}
