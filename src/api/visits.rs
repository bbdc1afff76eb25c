//! Visit entry endpoints

use axum::{extract::State, http::StatusCode, Json};

use super::{AppJson, AppQuery};
use crate::{
    error::AppResult,
    models::visit::{CreateVisit, RangeQuery, Visit},
    services::analytics::DateRange,
};

/// List visits in range, newest first
#[utoipa::path(
    get,
    path = "/visits",
    tag = "visits",
    params(RangeQuery),
    responses(
        (status = 200, description = "Visits list", body = Vec<Visit>)
    )
)]
pub async fn list_visits(
    State(state): State<crate::AppState>,
    AppQuery(query): AppQuery<RangeQuery>,
) -> AppResult<Json<Vec<Visit>>> {
    let range = DateRange::from_query(&query)?;
    let visits = state.services.visits.list(range).await?;
    Ok(Json(visits))
}

/// Record a visit
#[utoipa::path(
    post,
    path = "/visits",
    tag = "visits",
    request_body = CreateVisit,
    responses(
        (status = 201, description = "Visit recorded", body = Visit),
        (status = 400, description = "Invalid visit data", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_visit(
    State(state): State<crate::AppState>,
    AppJson(data): AppJson<CreateVisit>,
) -> AppResult<(StatusCode, Json<Visit>)> {
    let visit = state.services.visits.create(&data).await?;
    Ok((StatusCode::CREATED, Json(visit)))
}
