#[cfg(feature = "swagger")]
pub mod openapi;
pub mod error;
pub mod extract;
pub mod health;
pub mod heatpump;
pub mod locations;
pub mod manual;

use axum::{
    http::{Method, StatusCode},
    routing::get,
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{config::Config, state::AppState};

pub fn router(state: AppState, cfg: &Config) -> Router {
    let mut router = Router::new()
        .route("/", get(manual::root))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/locations", get(locations::list_locations))
        .route("/heatpump/share", get(heatpump::get_share))
        .route("/heatpump/summary", get(heatpump::get_summary))
        .route("/heatpump/plot", get(heatpump::get_plot))
        .route("/heatpump/report", get(heatpump::get_report))
        .with_state(state);

    if cfg.server.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::any())
            .allow_methods([Method::GET]);
        router = router.layer(cors);
    }

    router
        .layer(ServiceBuilder::new().layer(request_timeout(Duration::from_secs(
            cfg.server.request_timeout_secs,
        ))))
        .layer(TraceLayer::new_for_http())
}

/// Requests running past `timeout` are answered with 408
fn request_timeout(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

#[cfg(feature = "swagger")]
pub fn with_swagger(app: Router) -> Router {
    use crate::api::openapi::ApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;
    app.merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

#[cfg(feature = "metrics")]
pub fn with_metrics(app: Router) -> Router {
    use axum_prometheus::PrometheusMetricLayer;
    let (layer, handle) = PrometheusMetricLayer::pair();

    let metrics_router =
        Router::new().route("/metrics", get(move || async move { handle.render() }));

    app.layer(layer).merge(metrics_router)
}
