//! Dashboard session driven over HTTP through `ProxyClient`.

use std::sync::Arc;
use std::time::Duration;

use chrono::FixedOffset;
use serde_json::{json, Value};
use weather_dashboard::application::dashboard_session::{
    DashboardError, DashboardSession, RequestOutcome,
};
use weather_dashboard::application::geolocation::UnsupportedGeolocation;
use weather_dashboard::application::proxy_service::ProxyService;
use weather_dashboard::application::session_state::Status;
use weather_dashboard::domain::forecast::{LocalZone, MAX_FORECAST_DAYS};
use weather_dashboard::domain::subject::Coordinates;
use weather_dashboard::domain::units::UnitSystem;
use weather_dashboard::infrastructure::openweather_client::OpenWeatherClient;
use weather_dashboard::infrastructure::proxy_client::ProxyClient;
use weather_dashboard::presentation::app_state::AppState;
use weather_dashboard::presentation::router::build_router;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_payload(name: &str, country: &str, temp: f64) -> Value {
    json!({
        "name": name,
        "sys": { "country": country },
        "main": { "temp": temp, "feels_like": temp - 1.0, "humidity": 48, "pressure": 1009 },
        "weather": [{ "description": "broken clouds", "icon": "04d" }],
        "wind": { "speed": 5.2 },
        "visibility": 8000
    })
}

/// Six days of 3-hour samples starting 2024-03-04 00:00 UTC
fn forecast_payload() -> Value {
    let start = 1_709_510_400_i64;
    let list: Vec<Value> = (0..48)
        .map(|step| {
            json!({
                "dt": start + step * 3 * 3600,
                "main": { "temp": 10.0 + step as f64, "humidity": 66 },
                "weather": [{ "description": "light rain", "icon": "10d" }],
                "wind": { "speed": 4.0 }
            })
        })
        .collect();
    json!({ "cod": "200", "message": 0, "cnt": list.len(), "list": list })
}

fn session_for(api_base: String) -> DashboardSession {
    let gateway = Arc::new(ProxyClient::new(api_base).unwrap());
    DashboardSession::new(gateway, Arc::new(UnsupportedGeolocation))
        .with_zone(LocalZone::Fixed(FixedOffset::east_opt(0).unwrap()))
}

async fn mount_city(server: &MockServer, city: &str, units: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("q", city))
        .and(query_param("units", units))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_payload(city, "JP", 20.4)))
        .expect(expected_calls)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/forecast"))
        .and(query_param("q", city))
        .and(query_param("units", units))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_reduces_forecast_to_five_days() {
    let proxy = MockServer::start().await;
    mount_city(&proxy, "Tokyo", "metric", 1).await;

    let mut session = session_for(format!("{}/api", proxy.uri()));
    let outcome = session.query_by_subject("Tokyo").await;

    let RequestOutcome::Success(report) = outcome else {
        panic!("expected a successful query");
    };
    assert_eq!(report.current.place_name, "Tokyo");
    assert_eq!(report.daily.len(), MAX_FORECAST_DAYS);
    assert_eq!(report.daily[0].label, "Mon, Mar 4");
    assert_eq!(report.daily[0].temperature, 14.0);
    assert!(report.daily.windows(2).all(|w| w[0].date < w[1].date));
    assert_eq!(
        session.state().status(),
        &Status::Success("Weather data for Tokyo, JP".to_string())
    );
}

#[tokio::test]
async fn test_unit_toggle_requeries_once_with_new_units() {
    let proxy = MockServer::start().await;
    mount_city(&proxy, "Tokyo", "metric", 1).await;
    mount_city(&proxy, "Tokyo", "imperial", 1).await;

    let mut session = session_for(format!("{}/api", proxy.uri()));
    session.query_by_subject("Tokyo").await;
    let outcome = session.set_unit(UnitSystem::Imperial).await;

    assert!(outcome.is_some_and(|o| o.is_success()));
    assert_eq!(
        session.state().report().map(|r| r.units),
        Some(UnitSystem::Imperial)
    );
    // wiremock verifies the expected call counts on drop
}

#[tokio::test]
async fn test_coordinate_lookup_remembers_resolved_name() {
    let proxy = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("lat", "35"))
        .and(query_param("lon", "139"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_payload("Hadano", "JP", 17.0)),
        )
        .mount(&proxy)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/forecast"))
        .and(query_param("lat", "35"))
        .and(query_param("lon", "139"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload()))
        .mount(&proxy)
        .await;
    mount_city(&proxy, "Hadano", "imperial", 1).await;

    let mut session = session_for(format!("{}/api", proxy.uri()));
    let outcome = session
        .query_by_coordinates(Coordinates::new(35.0, 139.0))
        .await;

    assert!(outcome.is_success());
    assert_eq!(session.state().last_subject(), Some("Hadano"));

    // the unit toggle re-queries by name, not by coordinates
    let requery = session.set_unit(UnitSystem::Imperial).await;
    assert!(requery.is_some_and(|o| o.is_success()));
}

#[tokio::test]
async fn test_city_not_found_through_real_proxy() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&upstream)
        .await;

    let provider =
        OpenWeatherClient::new(upstream.uri(), "key".to_string(), Duration::from_secs(2)).unwrap();
    let state = Arc::new(AppState {
        proxy_service: ProxyService::new(Arc::new(provider)),
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });

    let mut session = session_for(format!("http://{addr}/api"));
    let outcome = session.query_by_subject("Paris").await;

    assert_eq!(
        outcome,
        RequestOutcome::Failure(DashboardError::Upstream("city not found".to_string()))
    );
    assert_eq!(
        session.state().status(),
        &Status::Error("city not found".to_string())
    );
    assert_eq!(session.state().last_subject(), None);
}

#[tokio::test]
async fn test_geolocation_unavailable() {
    let proxy = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&proxy)
        .await;

    let mut session = session_for(format!("{}/api", proxy.uri()));
    let outcome = session.request_geolocation().await;

    assert_eq!(
        outcome,
        RequestOutcome::Failure(DashboardError::Geolocation(
            "Unable to retrieve your location. Geolocation is not supported on this device."
                .to_string()
        ))
    );
}
