use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{error::ApiError, extract::ApiQuery};
use crate::{analysis, domain::LocationEntry, state::AppState};

#[cfg_attr(feature = "swagger", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "swagger", into_params(parameter_in = Query))]
#[derive(Debug, Deserialize)]
pub struct LocationsQuery {
    /// Optional Town filter to narrow the list
    #[serde(rename = "Town")]
    pub town: Option<String>,
}

#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub locations: Vec<LocationEntry>,
}

/// Every distinct location with its town
#[cfg_attr(feature = "swagger", utoipa::path(
    get,
    path = "/locations",
    params(LocationsQuery),
    responses((status = 200, description = "Known locations", body = LocationsResponse)),
    tag = "locations"
))]
pub async fn list_locations(
    State(st): State<AppState>,
    ApiQuery(q): ApiQuery<LocationsQuery>,
) -> Result<Json<LocationsResponse>, ApiError> {
    info!(town = q.town.as_deref().unwrap_or(""), "locations requested");

    let locations = analysis::list_locations(&st.dataset, q.town.as_deref());
    Ok(Json(LocationsResponse { locations }))
}
