use utoipa::OpenApi;

use crate::analysis::{SharePeriod, SharePoint, SummaryMetrics};
use crate::api::{error::ErrorResponse, health::HealthResponse, locations::LocationsResponse};
use crate::domain::{LocationEntry, Resolution};

#[derive(OpenApi)]
#[openapi(
    info(title = "Heat Pump Contribution API"),
    paths(
        crate::api::health::health_check,
        crate::api::locations::list_locations,
        crate::api::heatpump::get_share,
        crate::api::heatpump::get_summary,
        crate::api::heatpump::get_plot,
        crate::api::heatpump::get_report,
    ),
    components(schemas(
        HealthResponse,
        LocationsResponse,
        LocationEntry,
        Resolution,
        SharePeriod,
        SharePoint,
        SummaryMetrics,
        ErrorResponse,
    )),
    tags(
        (name = "heatpump", description = "Heat pump share of facility energy use"),
        (name = "locations", description = "Metered locations"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;
