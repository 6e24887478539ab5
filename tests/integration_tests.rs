// Integration tests for Reef Index: HTTP endpoints against a mocked OBIS upstream

use actix_web::{http::StatusCode, test, web, App};
use reef_index::core::ReefAnalyzer;
use reef_index::routes::{self, reef::AppState};
use reef_index::services::ObisClient;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

const BOUNDS_QUERY: &str = "min_lat=0&max_lat=10&min_lon=0&max_lon=10";

/// 30 located records spread over three sectors, plus two without coordinates
fn occurrence_body() -> String {
    let mut results = Vec::new();
    for i in 0..30 {
        let (lat, lon) = match i % 3 {
            0 => (5.0, 5.0),
            1 => (0.2, 9.7),
            _ => (9.99, 0.01),
        };
        results.push(serde_json::json!({
            "decimalLatitude": lat,
            "decimalLongitude": lon,
            "scientificName": format!("Species {}", i),
        }));
    }
    results.push(serde_json::json!({ "decimalLatitude": 3.0 }));
    results.push(serde_json::json!({ "scientificName": "Unlocated" }));

    serde_json::json!({ "total": results.len(), "results": results }).to_string()
}

async fn mock_obis(server: &mut mockito::ServerGuard, status: usize, body: String) -> mockito::Mock {
    server
        .mock("GET", "/occurrence")
        .match_query(mockito::Matcher::Any)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

fn app_state(obis_url: String, seed: Option<u64>) -> AppState {
    let obis = ObisClient::new(obis_url, 500, Duration::from_secs(5)).unwrap();
    AppState {
        obis: Arc::new(obis),
        analyzer: ReefAnalyzer::new(seed),
    }
}

macro_rules! reef_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(web::QueryConfig::default().error_handler(routes::handle_query_payload_error))
                .configure(routes::configure_routes),
        )
        .await
    };
}

fn sectors(grid: &Value) -> Vec<&Value> {
    grid.as_array()
        .unwrap()
        .iter()
        .flat_map(|row| row.as_array().unwrap())
        .collect()
}

#[actix_web::test]
async fn test_ocean_matrix_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let mock = mock_obis(&mut server, 200, occurrence_body()).await;
    let app = reef_app!(app_state(server.url(), None));

    let req = test::TestRequest::get()
        .uri(&format!("/ocean-matrix?{}", BOUNDS_QUERY))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    mock.assert_async().await;
    assert_eq!(body["raw_point_count"], 32);

    let grid = &body["grid"];
    assert_eq!(grid.as_array().unwrap().len(), 10);
    assert!(grid.as_array().unwrap().iter().all(|row| row.as_array().unwrap().len() == 10));

    assert_eq!(grid[5][5]["species_count"], 10);
    assert_eq!(grid[0][9]["species_count"], 10);
    assert_eq!(grid[9][0]["species_count"], 10);
    assert_eq!(grid[5][5]["id"], "Sector-5-5");

    let total: u64 = sectors(grid).iter().map(|s| s["species_count"].as_u64().unwrap()).sum();
    assert_eq!(total, 30);

    for sector in sectors(grid) {
        let score = sector["health_score"].as_u64().unwrap();
        assert!(score <= 100);
        let temp = sector["water_temp_c"].as_f64().unwrap();
        assert!((26.0..=33.0).contains(&temp));
    }
}

#[actix_web::test]
async fn test_restoration_roadmap_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_obis(&mut server, 200, occurrence_body()).await;
    let app = reef_app!(app_state(server.url(), Some(314)));

    let req = test::TestRequest::get()
        .uri(&format!("/restoration-roadmap?{}", BOUNDS_QUERY))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let urgent = body["urgent_restoration_needed"].as_array().unwrap();
    let healthy = body["healthy_sectors"].as_array().unwrap();
    assert_eq!(urgent.len(), 10);
    assert_eq!(healthy.len(), 10);

    let scores = |list: &Vec<Value>| list.iter().map(|s| s["health_score"].as_u64().unwrap()).collect::<Vec<_>>();
    let urgent_scores = scores(urgent);
    let healthy_scores = scores(healthy);

    assert!(urgent_scores.windows(2).all(|w| w[0] <= w[1]));
    assert!(healthy_scores.windows(2).all(|w| w[0] <= w[1]));
    assert!(urgent_scores.last() <= healthy_scores.first());
}

#[actix_web::test]
async fn test_roadmap_matches_matrix_for_same_seed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_obis(&mut server, 200, occurrence_body()).await;
    let app = reef_app!(app_state(server.url(), None));

    let req = test::TestRequest::get()
        .uri(&format!("/ocean-matrix?{}&seed=9", BOUNDS_QUERY))
        .to_request();
    let matrix: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!("/restoration-roadmap?{}&seed=9", BOUNDS_QUERY))
        .to_request();
    let roadmap: Value = test::call_and_read_body_json(&app, req).await;

    let mut all_scores: Vec<u64> = sectors(&matrix["grid"])
        .iter()
        .map(|s| s["health_score"].as_u64().unwrap())
        .collect();
    all_scores.sort();

    let urgent: Vec<u64> = roadmap["urgent_restoration_needed"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["health_score"].as_u64().unwrap())
        .collect();
    assert_eq!(urgent, all_scores[..10].to_vec());
}

#[actix_web::test]
async fn test_upstream_failure_yields_empty_grid() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_obis(&mut server, 500, "{}".to_string()).await;
    let app = reef_app!(app_state(server.url(), None));

    let req = test::TestRequest::get()
        .uri(&format!("/ocean-matrix?{}", BOUNDS_QUERY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["raw_point_count"], 0);
    assert!(sectors(&body["grid"]).iter().all(|s| s["species_count"] == 0));
}

#[actix_web::test]
async fn test_ocean_stats_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_obis(&mut server, 200, occurrence_body()).await;
    let app = reef_app!(app_state(server.url(), Some(1)));

    let req = test::TestRequest::get()
        .uri(&format!("/ocean-stats?{}", BOUNDS_QUERY))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["raw_point_count"], 32);
    assert_eq!(body["neighborhood_averages"].as_array().unwrap().len(), 10);

    let distribution = &body["stats"]["distribution"];
    let total: u64 = ["critical", "warning", "moderate", "healthy", "pristine"]
        .iter()
        .map(|band| distribution[band].as_u64().unwrap())
        .sum();
    assert_eq!(total, 100);
    assert!(body["stats"]["average_health"].as_u64().unwrap() <= 100);
}

#[actix_web::test]
async fn test_exports() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_obis(&mut server, 200, occurrence_body()).await;
    let app = reef_app!(app_state(server.url(), Some(77)));

    let req = test::TestRequest::get()
        .uri(&format!("/exports/health-map?{}", BOUNDS_QUERY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .contains("reef_health_map.txt"));
    let map = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(map.starts_with("Reef Health Map\n"));
    assert_eq!(map.lines().count(), 13);

    let req = test::TestRequest::get()
        .uri(&format!("/exports/restoration-priority?{}", BOUNDS_QUERY))
        .to_request();
    let csv = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Rank,Row,Col,Health Score");
    assert_eq!(lines.len(), 11);
    assert!(lines[1].starts_with("1,"));
}

#[actix_web::test]
async fn test_invalid_queries_are_rejected() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/occurrence")
        .match_query(mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let app = reef_app!(app_state(server.url(), None));

    for uri in [
        "/ocean-matrix?min_lat=0&max_lat=10&min_lon=0",
        "/ocean-matrix?min_lat=abc&max_lat=10&min_lon=0&max_lon=10",
        "/restoration-roadmap?min_lat=0&max_lat=100&min_lon=0&max_lon=10",
        "/ocean-stats?min_lat=0&max_lat=10&min_lon=-200&max_lon=10",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }

    mock.assert_async().await;
}
