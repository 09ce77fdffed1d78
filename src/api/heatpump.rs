//! Heat pump share endpoints

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use super::{error::ApiError, extract::ApiQuery};
use crate::{
    analysis::{heatpump_share, summarize, SharePoint, SummaryMetrics},
    domain::{EnergyReading, Resolution},
    report::{render_comparison_png, report_filename, write_csv_report},
    state::AppState,
};

#[cfg_attr(feature = "swagger", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "swagger", into_params(parameter_in = Query))]
#[derive(Debug, Deserialize, Validate)]
pub struct LocationQuery {
    /// Location name or ID
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: String,
}

#[cfg_attr(feature = "swagger", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "swagger", into_params(parameter_in = Query))]
#[derive(Debug, Deserialize, Validate)]
pub struct ShareQuery {
    /// Location name or ID
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: String,
    /// Aggregation level
    #[serde(default)]
    pub resolution: Resolution,
}

fn location_readings<'a>(st: &'a AppState, location: &str) -> Result<Vec<&'a EnergyReading>, ApiError> {
    let readings = st.dataset.for_location(location);
    if readings.is_empty() {
        return Err(ApiError::location_not_found());
    }
    Ok(readings)
}

/// Time-resolved heat pump share for a location
#[cfg_attr(feature = "swagger", utoipa::path(
    get,
    path = "/heatpump/share",
    params(ShareQuery),
    responses(
        (status = 200, description = "Mean share per period", body = [SharePoint]),
        (status = 400, description = "Invalid parameters", body = super::error::ErrorResponse),
        (status = 404, description = "Location not found", body = super::error::ErrorResponse),
    ),
    tag = "heatpump"
))]
pub async fn get_share(
    State(st): State<AppState>,
    ApiQuery(q): ApiQuery<ShareQuery>,
) -> Result<Json<Vec<SharePoint>>, ApiError> {
    q.validate()?;
    info!(location = %q.location, resolution = %q.resolution, "share requested");

    let readings = location_readings(&st, &q.location)?;
    Ok(Json(heatpump_share(readings, q.resolution)))
}

/// Average, max and min heat pump share for a location
#[cfg_attr(feature = "swagger", utoipa::path(
    get,
    path = "/heatpump/summary",
    params(LocationQuery),
    responses(
        (status = 200, description = "Summary metrics", body = SummaryMetrics),
        (status = 404, description = "Location not found", body = super::error::ErrorResponse),
    ),
    tag = "heatpump"
))]
pub async fn get_summary(
    State(st): State<AppState>,
    ApiQuery(q): ApiQuery<LocationQuery>,
) -> Result<Json<SummaryMetrics>, ApiError> {
    q.validate()?;
    info!(location = %q.location, "summary requested");

    let readings = location_readings(&st, &q.location)?;
    Ok(Json(summarize(&q.location, readings)))
}

/// PNG chart of total vs heat pump consumption
#[cfg_attr(feature = "swagger", utoipa::path(
    get,
    path = "/heatpump/plot",
    params(LocationQuery),
    responses(
        (status = 200, description = "PNG chart", content_type = "image/png"),
        (status = 404, description = "Location not found", body = super::error::ErrorResponse),
    ),
    tag = "heatpump"
))]
pub async fn get_plot(
    State(st): State<AppState>,
    ApiQuery(q): ApiQuery<LocationQuery>,
) -> Result<Response, ApiError> {
    q.validate()?;
    info!(location = %q.location, "plot requested");

    location_readings(&st, &q.location)?;

    let dataset = st.dataset.clone();
    let plot = st.plot.clone();
    let location = q.location;
    let png = tokio::task::spawn_blocking(move || {
        render_comparison_png(dataset.for_location(&location), plot.width, plot.height)
    })
    .await??;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

/// CSV download of every reading for a location
#[cfg_attr(feature = "swagger", utoipa::path(
    get,
    path = "/heatpump/report",
    params(LocationQuery),
    responses(
        (status = 200, description = "CSV report", content_type = "text/csv"),
        (status = 404, description = "Location not found", body = super::error::ErrorResponse),
    ),
    tag = "heatpump"
))]
pub async fn get_report(
    State(st): State<AppState>,
    ApiQuery(q): ApiQuery<LocationQuery>,
) -> Result<Response, ApiError> {
    q.validate()?;
    info!(location = %q.location, "report requested");

    let readings = location_readings(&st, &q.location)?;
    let csv = write_csv_report(&st.dataset, readings)?;
    let disposition = format!("attachment; filename=\"{}\"", report_filename(&q.location));

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}
