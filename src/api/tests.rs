//! Tests for the API verb layer

use super::*;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig};
use crate::models::{bst, Fuel, GroupBy, RateType, Region};
use chrono::TimeZone;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn api_for(server: &MockServer) -> OctoApi {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .no_rate_limit()
        .build();
    OctoApi::with_client(HttpClient::with_config(config).unwrap())
}

fn offline_api() -> OctoApi {
    let config = HttpClientConfig::builder()
        .base_url("http://127.0.0.1:9")
        .no_rate_limit()
        .build();
    OctoApi::with_client(HttpClient::with_config(config).unwrap())
}

fn query_pairs(request: &Request) -> Vec<(String, String)> {
    request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

// ============================================================================
// Query Parameter Tests
// ============================================================================

#[test]
fn test_product_query_params() {
    let query = ProductQuery::new()
        .green(true)
        .variable(false)
        .available_at(bst().with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap());

    assert_eq!(
        query.to_params(),
        vec![
            ("is_variable".to_string(), "false".to_string()),
            ("is_green".to_string(), "true".to_string()),
            ("is_business".to_string(), "false".to_string()),
            ("available_at".to_string(), "2020-06-01T00:00:00+01:00".to_string()),
        ]
    );
}

#[test]
fn test_default_product_query_excludes_business() {
    assert_eq!(
        ProductQuery::default().to_params(),
        vec![("is_business".to_string(), "false".to_string())]
    );
    assert_eq!(
        ProductQuery::new().business(true).to_params(),
        vec![("is_business".to_string(), "true".to_string())]
    );
}

#[test]
fn test_empty_queries_send_nothing() {
    assert!(RateQuery::default().to_params().is_empty());
    assert!(ConsumptionQuery::default().to_params().is_empty());
}

#[test]
fn test_consumption_query_params() {
    let query = ConsumptionQuery::new()
        .period_from(bst().with_ymd_and_hms(2020, 8, 3, 0, 0, 0).unwrap())
        .reverse(true)
        .group_by(GroupBy::Week);

    assert_eq!(
        query.to_params(),
        vec![
            ("period_from".to_string(), "2020-08-03T00:00:00+01:00".to_string()),
            ("order_by".to_string(), "period".to_string()),
            ("group_by".to_string(), "week".to_string()),
        ]
    );
}

// ============================================================================
// Page Size Ceilings
// ============================================================================

#[test]
fn test_consumption_page_size_ceiling() {
    let api = offline_api();
    let err = api
        .get_consumption(
            "2000024512368",
            "-------------",
            Fuel::Electricity,
            &ConsumptionQuery::new().page_size(10_000_000),
        )
        .unwrap_err();

    assert_eq!(err.to_string(), "'page_size' may not be greater than 25,000");
}

#[test]
fn test_tariff_page_size_ceiling() {
    let api = offline_api();
    let err = api
        .get_tariff_charges(
            "VAR-17-01-11",
            "E-1R-VAR-17-01-11-A",
            Fuel::Electricity,
            RateType::StandingCharges,
            &RateQuery::new().page_size(2_000),
        )
        .unwrap_err();

    assert_eq!(err.to_string(), "'page_size' may not be greater than 1,500");
}

#[test]
fn test_default_page_size_applies() {
    let api = offline_api().with_default_page_size(250);
    let seq = api.get_products(&ProductQuery::default()).unwrap();
    assert_eq!(seq.page_size(), 250);

    let seq = offline_api().get_products(&ProductQuery::default()).unwrap();
    assert_eq!(seq.page_size(), DEFAULT_PAGE_SIZE);
}

#[test_case(RateType::DayUnitRates ; "day")]
#[test_case(RateType::NightUnitRates ; "night")]
fn test_gas_has_no_dual_register_rates(rate_type: RateType) {
    let err = offline_api()
        .get_tariff_charges("P", "G-1R-P-A", Fuel::Gas, rate_type, &RateQuery::default())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
}

#[test_case("" ; "empty")]
#[test_case("A/B" ; "slash")]
#[test_case("A?B" ; "query")]
fn test_path_segments_are_validated(code: &str) {
    let err = offline_api()
        .get_tariff_charges(
            code,
            "E-1R-X-A",
            Fuel::Electricity,
            RateType::StandingCharges,
            &RateQuery::default(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
}

// ============================================================================
// Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_tariff_charges_path_and_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/products/AGILE-18-02-21/electricity-tariffs/E-1R-AGILE-18-02-21-C/standard-unit-rates/",
        ))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{
                "value_exc_vat": 5.25,
                "value_inc_vat": 5.5125,
                "valid_from": "2020-10-03T22:30:00Z",
                "valid_to": "2020-10-03T23:00:00Z"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut charges = api_for(&server)
        .get_tariff_charges(
            "AGILE-18-02-21",
            "E-1R-AGILE-18-02-21-C",
            Fuel::Electricity,
            RateType::StandardUnitRates,
            &RateQuery::default(),
        )
        .unwrap();

    assert_eq!(charges.len().await.unwrap(), 1);
    assert_eq!(charges.get(0).await.unwrap().value_exc_vat, 5.25);
}

#[tokio::test]
async fn test_consumption_sends_fixed_params_on_every_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/electricity-meter-points/2000024512368/meters/ABC123/consumption/",
        ))
        .respond_with(|request: &Request| {
            let page: usize = request
                .url
                .query_pairs()
                .find(|(k, _)| k == "page")
                .and_then(|(_, v)| v.parse().ok())
                .unwrap_or(1);
            let next = (page < 2).then(|| format!("https://example.test/?page={}", page + 1));
            ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "next": next,
                "previous": null,
                "results": [{
                    "consumption": page,
                    "interval_start": "2020-10-03T00:00:00+01:00",
                    "interval_end": "2020-10-03T00:30:00+01:00"
                }]
            }))
        })
        .mount(&server)
        .await;

    let api = api_for(&server);
    let query = ConsumptionQuery::new().page_size(1).group_by(GroupBy::Day).reverse(true);
    let mut readings = api
        .get_consumption("2000024512368", "ABC123", Fuel::Electricity, &query)
        .unwrap();

    let all = readings.collect_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].consumption, 2.0);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    for (i, request) in requests.iter().enumerate() {
        assert_eq!(
            query_pairs(request),
            vec![
                ("order_by".to_string(), "period".to_string()),
                ("group_by".to_string(), "day".to_string()),
                ("page".to_string(), (i + 1).to_string()),
                ("page_size".to_string(), "1".to_string()),
            ]
        );
    }
}

#[tokio::test]
async fn test_meter_point_details() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/electricity-meter-points/2000024512368/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "gsp": "_H",
            "mpan": "2000024512368",
            "profile_class": 1
        })))
        .mount(&server)
        .await;

    let details = api_for(&server)
        .get_meter_point_details("2000024512368")
        .await
        .unwrap();

    assert_eq!(details.gsp, Region::Southern);
    assert_eq!(details.profile_class, 1);
}

#[tokio::test]
async fn test_grid_supply_point() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/industry/grid-supply-points/"))
        .and(query_param("postcode", "SW1A 1AA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{ "group_id": "_C" }]
        })))
        .mount(&server)
        .await;

    let region = api_for(&server).get_grid_supply_point("SW1A 1AA").await.unwrap();
    assert_eq!(region, Region::London);
}

#[tokio::test]
async fn test_grid_supply_point_unmapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/industry/grid-supply-points/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 0,
            "next": null,
            "previous": null,
            "results": []
        })))
        .mount(&server)
        .await;

    let err = api_for(&server).get_grid_supply_point("12345").await.unwrap_err();
    assert_eq!(err.to_string(), "Cannot map the postcode '12345' to a GSP.");
}

#[tokio::test]
async fn test_product_info_with_active_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/VAR-17-01-11/"))
        .and(query_param("tariffs_active_at", "2020-01-01T00:00:00+00:00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "VAR-17-01-11",
            "full_name": "Flexible Octopus January 2017",
            "display_name": "Flexible Octopus",
            "description": "Flexible Octopus offers great value.",
            "is_variable": true,
            "is_green": false,
            "is_tracker": false,
            "is_prepay": false,
            "is_business": false,
            "is_restricted": false,
            "term": null,
            "available_from": "2017-01-11T10:00:00Z",
            "available_to": "2018-02-15T00:00:00Z",
            "tariffs_active_at": "2020-01-01T00:00:00Z",
            "brand": "OCTOPUS_ENERGY",
            "links": [],
            "single_register_electricity_tariffs": {},
            "dual_register_electricity_tariffs": {},
            "single_register_gas_tariffs": {},
            "sample_quotes": {},
            "sample_consumption": {}
        })))
        .mount(&server)
        .await;

    let at = crate::models::parse_iso_zulu("2020-01-01T00:00:00Z").unwrap();
    let product = api_for(&server)
        .get_product_info("VAR-17-01-11", Some(at))
        .await
        .unwrap();

    assert_eq!(product.base.display_name, "Flexible Octopus");
    assert_eq!(product.tariffs_active_at, Some(at));
    assert_eq!(product.base.term, None);
}

#[tokio::test]
async fn test_http_error_surfaces_as_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let mut products = api_for(&server).get_products(&ProductQuery::default()).unwrap();
    let err = products.len().await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, ref body } if body == "boom"));
    assert_eq!(products.total_count(), None);
}
