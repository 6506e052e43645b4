//! City directory access for Cityscope.
//!
//! Wraps the OpenDataSoft geonames dataset behind a paginated client and an
//! in-memory list controller handling search, column sort, and load-more
//! accumulation.

pub mod client;
pub mod list;
pub mod types;

pub use client::DirectoryClient;
pub use list::{CityColumn, CityListController, SortDirection};
pub use types::{City, CityPage, DirectoryError, PAGE_SIZE};
