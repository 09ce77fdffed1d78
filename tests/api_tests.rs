use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use heatpump_contribution::{
    api, config::Config, config::PlotConfig, dataset::Dataset, state::AppState,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::io::Write;
use tower::ServiceExt;

const DATASET: &str = "\
timestamp,Location,Town,County,total_energy_kWh,heatpump_pct
2024-01-01 00:00:00+00:00,tregattu 11,Gjovik,Innlandet,10.0,20.0
2024-01-01 00:30:00+00:00,tregattu 11,Gjovik,Innlandet,12.0,40.0
2024-01-01 01:00:00+00:00,tregattu 11,Gjovik,Innlandet,8.0,30.0
2024-01-02 00:00:00+00:00,tregattu 11,Gjovik,Innlandet,9.0,
2024-02-01 12:00:00+00:00,tregattu 11,Gjovik,Innlandet,11.0,50.0
2024-01-01 00:00:00+00:00,brugata 2,Hamar,Innlandet,5.0,10.0
2024-01-01 00:00:00+00:00,storgata 5,Stor-Hamar,Innlandet,6.0,15.0
";

fn test_app() -> Router {
    test_app_with(&Config::default())
}

fn test_app_with(cfg: &Config) -> Router {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(DATASET.as_bytes()).unwrap();
    file.flush().unwrap();

    let dataset = Dataset::load(file.path()).unwrap();
    let state = AppState::new(
        dataset,
        PlotConfig {
            width: 400,
            height: 300,
        },
    );
    api::router(state, cfg)
}

async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, headers, body)
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = get(test_app(), uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_root_serves_manual() {
    let (status, headers, body) = get(test_app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Heat Pump Contribution API"));
    assert!(html.contains("/heatpump/share"));
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "readings": 7, "locations": 3 }));

    let (status, _, _) = get(test_app(), "/health/live").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) = get(test_app(), "/health/ready").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_without_readings() {
    let app = api::router(
        AppState::new(Dataset::default(), PlotConfig::default()),
        &Config::default(),
    );
    let (status, _, _) = get(app, "/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_cors_allows_get_from_any_origin() {
    let mut cfg = Config::default();
    cfg.server.enable_cors = true;

    let response = test_app_with(&cfg)
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://dashboard.local")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let preflight = test_app_with(&cfg)
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/locations")
                .header(header::ORIGIN, "http://dashboard.local")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(preflight.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(preflight.headers()[header::ACCESS_CONTROL_ALLOW_METHODS], "GET");
}

#[tokio::test]
async fn test_cors_disabled_by_default() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://dashboard.local")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(!response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_locations_listing_and_filter() {
    let (status, body) = get_json("/locations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "locations": [
            { "Location": "brugata 2", "Town": "Hamar" },
            { "Location": "storgata 5", "Town": "Stor-Hamar" },
            { "Location": "tregattu 11", "Town": "Gjovik" },
        ]})
    );

    let (_, body) = get_json("/locations?Town=hamar").await;
    assert_eq!(body["locations"].as_array().unwrap().len(), 2);

    let (_, body) = get_json("/locations?Town=Oslo").await;
    assert_eq!(body, json!({ "locations": [] }));
}

#[tokio::test]
async fn test_share_defaults_to_daily() {
    let (status, body) = get_json("/heatpump/share?location=tregattu%2011").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "date": "2024-01-01", "heatpump_pct": 30.0 },
            { "date": "2024-01-02", "heatpump_pct": null },
            { "date": "2024-02-01", "heatpump_pct": 50.0 },
        ])
    );
}

#[tokio::test]
async fn test_share_hourly_and_monthly() {
    let (_, hourly) = get_json("/heatpump/share?location=tregattu%2011&resolution=hourly").await;
    assert_eq!(hourly[0], json!({ "date": "2024-01-01", "hour": 0, "heatpump_pct": 30.0 }));
    assert_eq!(hourly[1], json!({ "date": "2024-01-01", "hour": 1, "heatpump_pct": 30.0 }));
    assert_eq!(hourly.as_array().unwrap().len(), 4);

    let (_, monthly) = get_json("/heatpump/share?location=tregattu%2011&resolution=monthly").await;
    assert_eq!(
        monthly,
        json!([
            { "month": "2024-01", "heatpump_pct": 30.0 },
            { "month": "2024-02", "heatpump_pct": 50.0 },
        ])
    );
}

#[tokio::test]
async fn test_share_rejects_bad_resolution() {
    let (status, body) = get_json("/heatpump/share?location=tregattu%2011&resolution=weekly").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");
}

#[tokio::test]
async fn test_missing_location_parameter() {
    let (status, body) = get_json("/heatpump/summary").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");

    let (status, body) = get_json("/heatpump/summary?location=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
}

#[tokio::test]
async fn test_unknown_location_is_404() {
    for endpoint in ["share", "summary", "plot", "report"] {
        let uri = format!("/heatpump/{endpoint}?location=nowhere");
        let (status, body) = get_json(&uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({ "error": "NotFound", "message": "Location not found" }));
    }
}

#[tokio::test]
async fn test_location_match_is_exact() {
    let (status, _) = get_json("/heatpump/summary?location=Tregattu%2011").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_summary_metrics() {
    let (status, body) = get_json("/heatpump/summary?location=tregattu%2011").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "location": "tregattu 11",
            "average_heatpump_pct": 35.0,
            "max_heatpump_pct": 50.0,
            "min_heatpump_pct": 20.0,
            "data_points": 5,
        })
    );
}

#[tokio::test]
async fn test_plot_returns_png() {
    let (status, headers, body) = get(test_app(), "/heatpump/plot?location=tregattu%2011").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/png");
    assert_eq!(&body[..8], b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn test_report_download() {
    let (status, headers, body) = get(test_app(), "/heatpump/report?location=brugata%202").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"brugata 2_report.csv\""
    );

    let text = String::from_utf8(body).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "timestamp,Location,Town,total_energy_kWh,heatpump_pct,County,hour,date,month,time",
            "2024-01-01 00:00:00+00:00,brugata 2,Hamar,5.0,10.0,Innlandet,0,2024-01-01,2024-01,00:00:00",
        ]
    );
}
