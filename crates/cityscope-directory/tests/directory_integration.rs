//! Integration tests for the directory client and list controller against a
//! mock provider.

use cityscope_directory::{CityColumn, CityListController, DirectoryClient, SortDirection};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RECORDS_PATH: &str = "/api/records/1.0/search/";

/// Build a provider response body with `count` records starting at `offset`.
fn page_body(offset: i64, count: i64) -> serde_json::Value {
    let records: Vec<serde_json::Value> = (offset..offset + count)
        .map(|i| {
            serde_json::json!({
                "fields": {
                    "geoname_id": 1000 + i,
                    "name": format!("City {}", i),
                    "cou_name_en": "Testland",
                    "timezone": "Etc/UTC",
                    "population": 1000 * (i + 1),
                    "coordinates": [10.0 + i as f64, 20.0 + i as f64]
                }
            })
        })
        .collect();
    serde_json::json!({ "records": records })
}

async fn mount_page(server: &MockServer, start: i64, count: i64) {
    Mock::given(method("GET"))
        .and(path(RECORDS_PATH))
        .and(query_param("start", start.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(start, count)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_city_page_maps_records() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 20).await;

    let client = DirectoryClient::new(&server.uri()).unwrap();
    let page = client.fetch_city_page(0).await.unwrap();

    assert_eq!(page.cities.len(), 20);
    assert!(page.has_more());

    let first = &page.cities[0];
    assert_eq!(first.id, 1000);
    assert_eq!(first.name, "City 0");
    assert_eq!(first.country, "Testland");
    assert!((first.latitude - 10.0).abs() < f64::EPSILON);
    assert!((first.longitude - 20.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_fetch_city_page_requests_correct_offset() {
    let server = MockServer::start().await;
    mount_page(&server, 40, 20).await;

    let client = DirectoryClient::new(&server.uri()).unwrap();
    let page = client.fetch_city_page(2).await.unwrap();

    assert_eq!(page.cities[0].name, "City 40");
}

#[tokio::test]
async fn test_fetch_city_page_server_error_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RECORDS_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = DirectoryClient::new(&server.uri()).unwrap();
    assert!(client.fetch_city_page(0).await.is_err());
}

#[tokio::test]
async fn test_fetch_city_page_malformed_body_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RECORDS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = DirectoryClient::new(&server.uri()).unwrap();
    assert!(client.fetch_city_page(0).await.is_err());
}

#[tokio::test]
async fn test_load_more_accumulates_monotonically() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 20).await;
    mount_page(&server, 20, 20).await;
    mount_page(&server, 40, 7).await;

    let client = DirectoryClient::new(&server.uri()).unwrap();
    let mut controller = CityListController::new(client);

    assert_eq!(controller.load_next_page().await, 20);
    assert_eq!(controller.cities().len(), 20);
    assert!(controller.has_more());

    assert_eq!(controller.load_next_page().await, 20);
    assert_eq!(controller.cities().len(), 40);
    assert!(controller.has_more());

    // Short page: 7 < 20 exhausts pagination immediately
    assert_eq!(controller.load_next_page().await, 7);
    assert_eq!(controller.cities().len(), 47);
    assert!(!controller.has_more());

    // Further calls are no-ops and issue no requests
    assert_eq!(controller.load_next_page().await, 0);
    assert_eq!(controller.cities().len(), 47);
    assert_eq!(controller.page(), 3);
}

#[tokio::test]
async fn test_empty_page_exhausts_pagination() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 0).await;

    let client = DirectoryClient::new(&server.uri()).unwrap();
    let mut controller = CityListController::new(client);

    assert_eq!(controller.load_next_page().await, 0);
    assert!(controller.cities().is_empty());
    assert!(!controller.has_more());
}

#[tokio::test]
async fn test_directory_failure_stops_pagination_without_losing_cities() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 20).await;
    Mock::given(method("GET"))
        .and(path(RECORDS_PATH))
        .and(query_param("start", "20"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = DirectoryClient::new(&server.uri()).unwrap();
    let mut controller = CityListController::new(client);

    controller.load_next_page().await;
    assert_eq!(controller.cities().len(), 20);

    // Failure flips has_more without discarding the accumulated set
    assert_eq!(controller.load_next_page().await, 0);
    assert_eq!(controller.cities().len(), 20);
    assert!(!controller.has_more());
}

#[tokio::test]
async fn test_server_error_surfaces_a_user_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RECORDS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = DirectoryClient::new(&server.uri()).unwrap();
    let err = client.fetch_city_page(0).await.unwrap_err();

    let app_err: cityscope_core::AppError = err.into();
    assert_eq!(
        app_err.user_message(),
        "The service is experiencing issues. Please try again later."
    );
}

#[tokio::test]
async fn test_connection_failure_maps_to_app_network_error() {
    // Nothing listens on this port; the connection is refused immediately
    let client = DirectoryClient::new("http://127.0.0.1:9").unwrap();
    let err = client.fetch_city_page(0).await.unwrap_err();

    let app_err: cityscope_core::AppError = err.into();
    assert!(matches!(
        app_err,
        cityscope_core::AppError::Network(cityscope_core::NetworkError::ConnectionFailed(_))
    ));
    assert_eq!(
        app_err.user_message(),
        "Unable to connect. Check your internet connection."
    );
}

#[tokio::test]
async fn test_load_preserves_active_filter() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 20).await;
    mount_page(&server, 20, 20).await;

    let client = DirectoryClient::new(&server.uri()).unwrap();
    let mut controller = CityListController::new(client);

    controller.load_next_page().await;
    controller.set_search_term("city 1");
    // "City 1" plus "City 10".."City 19"
    assert_eq!(controller.visible().len(), 11);

    controller.load_next_page().await;
    // Filter re-applied to the grown set; no record in 20..39 matches
    assert_eq!(controller.visible().len(), 11);

    controller.set_search_term("");
    assert_eq!(controller.visible().len(), 40);
}

#[tokio::test]
async fn test_load_resets_visible_order_until_resorted() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 20).await;
    mount_page(&server, 20, 20).await;

    let client = DirectoryClient::new(&server.uri()).unwrap();
    let mut controller = CityListController::new(client);

    controller.load_next_page().await;
    controller.sort_by(CityColumn::Id);
    controller.sort_by(CityColumn::Id); // descending
    assert_eq!(controller.visible()[0].name, "City 19");

    // A fresh page rebuilds the view in insertion order; the sort state
    // stays put but is not re-applied until the user sorts again
    controller.load_next_page().await;
    assert_eq!(controller.visible()[0].name, "City 0");
    assert_eq!(
        controller.sort(),
        Some((CityColumn::Id, SortDirection::Descending))
    );

    controller.sort_by(CityColumn::Id);
    assert_eq!(controller.visible()[0].name, "City 0");
    assert_eq!(
        controller.sort(),
        Some((CityColumn::Id, SortDirection::Ascending))
    );
}
