use monitor_core::{FetchError, OpenWeatherProvider, WeatherProvider};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param, query_param_is_missing},
};

fn sample_payload() -> serde_json::Value {
    json!({
        "name": "Delhi",
        "dt": 1717243200,
        "main": { "temp": 300.0, "feels_like": 305.15, "humidity": 40 },
        "weather": [{ "id": 721, "main": "Haze", "description": "haze" }],
        "wind": { "speed": 3.6 }
    })
}

#[tokio::test]
async fn fetch_converts_kelvin_and_maps_fields() {
    let server = MockServer::start().await;

    // No `units` parameter: the API answers in Kelvin and conversion
    // happens client-side.
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Delhi"))
        .and(query_param("appid", "KEY"))
        .and(query_param_is_missing("units"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_payload()))
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::with_base_url("KEY".to_string(), server.uri());
    let reading = provider.fetch_current("Delhi").await.expect("fetch should succeed");

    assert_eq!(reading.city, "Delhi");
    assert!((reading.temperature_c - 26.85).abs() < 1e-9);
    assert!((reading.feels_like_c - 32.0).abs() < 1e-9);
    assert_eq!(reading.condition, "Haze");
    assert_eq!(reading.humidity_pct, 40);
    assert_eq!(reading.wind_speed_mps, 3.6);
    assert_eq!(reading.observed_at.timestamp(), 1717243200);
}

#[tokio::test]
async fn missing_city_reports_api_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::with_base_url("KEY".to_string(), server.uri());
    let err = provider.fetch_current("Atlantis").await.expect_err("404 must fail");

    assert!(matches!(err, FetchError::Api { status: 404, .. }));
    assert_eq!(err.status_code(), 404);
    assert!(err.to_string().contains("city not found"));
}

#[tokio::test]
async fn long_error_body_is_truncated_on_a_character_boundary() {
    let server = MockServer::start().await;

    // 'é' is two bytes and straddles the 200-byte truncation limit.
    let long_body = format!("{}é upstream gateway error", "x".repeat(199));

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(502).set_body_string(long_body))
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::with_base_url("KEY".to_string(), server.uri());
    let err = provider.fetch_current("Delhi").await.expect_err("502 must fail");

    match err {
        FetchError::Api { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, format!("{}...", "x".repeat(199)));
        }
        other => panic!("expected an API error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_counts_as_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::with_base_url("KEY".to_string(), server.uri());
    let err = provider.fetch_current("Delhi").await.expect_err("parse must fail");

    assert!(matches!(err, FetchError::Parse(_)));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn empty_weather_array_falls_back_to_unknown() {
    let server = MockServer::start().await;

    let mut payload = sample_payload();
    payload["weather"] = json!([]);

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::with_base_url("KEY".to_string(), server.uri());
    let reading = provider.fetch_current("Delhi").await.expect("fetch should succeed");

    assert_eq!(reading.condition, "Unknown");
}
