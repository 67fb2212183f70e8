//! Integration tests using mock HTTP server
//!
//! Tests the full flow: API verb → paginated HTTP requests → typed records

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use futures::StreamExt;
use octo_api::auth::AuthConfig;
use octo_api::http::{HttpClient, HttpClientConfig};
use octo_api::{
    Consumption, ConsumptionQuery, Error, Fuel, OctoApi, ProductQuery, RateQuery, RateType,
    Settings,
};
use serde_json::{json, Value};
use std::io::Write;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const MPAN: &str = "2000024512368";
const SERIAL: &str = "21L4381884";
const CONSUMPTION_PATH: &str = "/electricity-meter-points/2000024512368/meters/21L4381884/consumption/";

// ============================================================================
// Paged Fixtures
// ============================================================================

fn query_value(request: &Request, key: &str) -> Option<usize> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .and_then(|(_, v)| v.parse().ok())
}

/// Responder serving `total` synthetic records generated by `record`
fn paged(
    total: usize,
    record: fn(usize) -> Value,
) -> impl Fn(&Request) -> ResponseTemplate + Send + Sync + 'static {
    move |request: &Request| {
        let page = query_value(request, "page").unwrap_or(1);
        let size = query_value(request, "page_size").unwrap_or(100);
        let start = (page - 1) * size;
        let end = (start + size).min(total);
        let results: Vec<Value> = (start..end).map(record).collect();

        let next = (end < total).then(|| format!("{}?page={}", request.url.path(), page + 1));
        let previous = (page > 1).then(|| format!("{}?page={}", request.url.path(), page - 1));

        ResponseTemplate::new(200).set_body_json(json!({
            "count": total,
            "next": next,
            "previous": previous,
            "results": results
        }))
    }
}

fn reading(i: usize) -> Value {
    let end = Utc.with_ymd_and_hms(2020, 10, 2, 23, 30, 0).unwrap() - ChronoDuration::minutes(30 * i as i64);
    let start = end - ChronoDuration::minutes(30);
    json!({
        "consumption": format!("{:.3}", i as f64 / 1000.0),
        "interval_start": start.to_rfc3339(),
        "interval_end": end.to_rfc3339()
    })
}

fn half_hour_rate(i: usize) -> Value {
    let to = Utc.with_ymd_and_hms(2020, 10, 4, 0, 0, 0).unwrap() - ChronoDuration::minutes(30 * i as i64);
    let from = to - ChronoDuration::minutes(30);
    json!({
        "value_exc_vat": 10.0 + i as f64 / 100.0,
        "value_inc_vat": (10.0 + i as f64 / 100.0) * 1.05,
        "valid_from": from.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        "valid_to": to.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    })
}

fn api_for(server: &MockServer) -> OctoApi {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .no_rate_limit()
        .build();
    OctoApi::with_client(HttpClient::with_auth(config, AuthConfig::api_key("sk_test")).unwrap())
}

// ============================================================================
// Consumption
// ============================================================================

#[tokio::test]
async fn test_consumption_random_access() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONSUMPTION_PATH))
        .and(header("Authorization", "Basic c2tfdGVzdDo="))
        .respond_with(paged(2_496, reading))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut readings = api
        .get_consumption(MPAN, SERIAL, Fuel::Electricity, &ConsumptionQuery::default())
        .unwrap();

    assert_eq!(readings.len().await.unwrap(), 2_496);

    let expected_first = Consumption::new(
        0.0,
        Utc.with_ymd_and_hms(2020, 10, 2, 23, 0, 0).unwrap().fixed_offset(),
        Utc.with_ymd_and_hms(2020, 10, 2, 23, 30, 0).unwrap().fixed_offset(),
    );
    assert_eq!(readings.get(0).await.unwrap(), &expected_first);

    let later = readings.get(115).await.unwrap().clone();
    assert_eq!(later.consumption, 0.115);
    assert_ne!(later, expected_first);

    for index in [2_496, 2_497] {
        let err = readings.get(index).await.unwrap_err();
        assert!(err.to_string().contains("index out of range"));
    }

    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_consumption_page_size_ceiling_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(paged(10, reading))
        .expect(0)
        .mount(&server)
        .await;

    let err = api_for(&server)
        .get_consumption(
            MPAN,
            SERIAL,
            Fuel::Electricity,
            &ConsumptionQuery::new().page_size(10_000_000),
        )
        .unwrap_err();

    assert!(matches!(err, Error::PageSizeTooLarge { max: 25_000 }));
    assert_eq!(err.to_string(), "'page_size' may not be greater than 25,000");
}

#[tokio::test]
async fn test_consumption_iteration_matches_indexing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONSUMPTION_PATH))
        .respond_with(paged(250, reading))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut readings = api
        .get_consumption(MPAN, SERIAL, Fuel::Electricity, &ConsumptionQuery::default())
        .unwrap();

    let all = readings.collect_all().await.unwrap();
    assert_eq!(all.len(), 250);
    for (i, record) in all.iter().enumerate() {
        assert_eq!(readings.get(i as isize).await.unwrap(), record);
    }
    assert_eq!(readings.get(-1).await.unwrap(), &all[249]);

    let pages: Vec<usize> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter_map(|r| query_value(r, "page"))
        .collect();
    assert_eq!(pages, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_consumption_transport_failure_then_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONSUMPTION_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CONSUMPTION_PATH))
        .respond_with(paged(250, reading))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut readings = api
        .get_consumption(MPAN, SERIAL, Fuel::Electricity, &ConsumptionQuery::default())
        .unwrap();

    let err = readings.get(150).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
    assert_eq!(readings.materialized().len(), 100);

    assert_eq!(readings.get(150).await.unwrap().consumption, 0.15);
    assert_eq!(readings.materialized().len(), 200);
}

#[tokio::test]
async fn test_consumption_limit_stops_fetching() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CONSUMPTION_PATH))
        .respond_with(paged(1_000, reading))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut readings = api
        .get_consumption(
            MPAN,
            SERIAL,
            Fuel::Electricity,
            &ConsumptionQuery::new().page_size(50),
        )
        .unwrap();

    let first: Vec<Consumption> = readings
        .iter()
        .take(60)
        .map(Result::unwrap)
        .collect()
        .await;

    assert_eq!(first.len(), 60);
    assert_eq!(readings.pages_fetched(), 2);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

// ============================================================================
// Tariff Charges
// ============================================================================

#[tokio::test]
async fn test_agile_rates_cache_growth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/products/AGILE-18-02-21/electricity-tariffs/E-1R-AGILE-18-02-21-C/standard-unit-rates/",
        ))
        .respond_with(paged(65_611, half_hour_rate))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut rates = api
        .get_tariff_charges(
            "AGILE-18-02-21",
            "E-1R-AGILE-18-02-21-C",
            Fuel::Electricity,
            RateType::StandardUnitRates,
            &RateQuery::default(),
        )
        .unwrap();

    assert_eq!(rates.len().await.unwrap(), 65_611);
    assert_eq!(rates.materialized().len(), 100);

    let rate = rates.get(100).await.unwrap();
    assert_eq!(rate.value_exc_vat, 11.0);
    assert_eq!(rates.materialized().len(), 200);
}

#[tokio::test]
async fn test_rates_slice_is_exclusive() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(paged(300, half_hour_rate))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut rates = api
        .get_tariff_charges(
            "VAR-17-01-11",
            "E-1R-VAR-17-01-11-A",
            Fuel::Electricity,
            RateType::StandardUnitRates,
            &RateQuery::default(),
        )
        .unwrap();

    let one = rates.slice(Some(115), Some(116), 1).await.unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(&one[0], rates.get(115).await.unwrap());
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn test_products_filters_and_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/"))
        .and(query_param("is_tracker", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 0,
            "next": null,
            "previous": null,
            "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut products = api.get_products(&ProductQuery::new().tracker(true)).unwrap();

    assert!(products.is_empty().await.unwrap());
    assert!(products.collect_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_default_products_listing_excludes_business() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/"))
        .and(query_param("is_business", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 0,
            "next": null,
            "previous": null,
            "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut products = api.get_products(&ProductQuery::default()).unwrap();

    assert_eq!(products.len().await.unwrap(), 0);
}

#[tokio::test]
async fn test_products_malformed_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{ "code": "AGILE-18-02-21" }]
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut products = api.get_products(&ProductQuery::default()).unwrap();

    let err = products.get(0).await.unwrap_err();
    assert!(matches!(err, Error::RecordFormat { record: "product", .. }));
    assert!(products.materialized().is_empty());
}

// ============================================================================
// Settings
// ============================================================================

#[tokio::test]
async fn test_client_from_settings_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/electricity-meter-points/2000024512368/"))
        .and(header("Authorization", "Basic c2tfZmlsZTo="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "gsp": "_H",
            "mpan": MPAN,
            "profile_class": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "api_key: sk_file").unwrap();
    writeln!(file, "base_url: {}", server.uri()).unwrap();
    writeln!(file, "requests_per_second: 0").unwrap();
    writeln!(file, "page_size: 500").unwrap();

    let settings = Settings::from_yaml(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
    let api = OctoApi::from_settings(&settings).unwrap();

    assert_eq!(api.default_page_size(), 500);
    let details = api.get_meter_point_details(MPAN).await.unwrap();
    assert_eq!(details.mpan, MPAN);
}
