//! Analytics endpoints
//!
//! All reports accept optional `from` / `to` dates and default to the
//! current month up to today.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use super::AppQuery;
use crate::{
    error::{AppError, AppResult},
    models::visit::RangeQuery,
    services::{
        analytics::{DateRange, EmployeeDetail, EmployeeStat, RepeatCustomers, ServiceStat, Summary},
        export,
    },
};

/// Revenue, visit count, distinct customers and average ticket
#[utoipa::path(
    get,
    path = "/analytics/summary",
    tag = "analytics",
    params(RangeQuery),
    responses(
        (status = 200, description = "Summary for the range", body = Summary),
        (status = 400, description = "Invalid date", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_summary(
    State(state): State<crate::AppState>,
    AppQuery(query): AppQuery<RangeQuery>,
) -> AppResult<Json<Summary>> {
    let range = DateRange::from_query(&query)?;
    Ok(Json(state.services.analytics.summary(range).await?))
}

/// Services by booking count
#[utoipa::path(
    get,
    path = "/analytics/top-services",
    tag = "analytics",
    params(RangeQuery),
    responses(
        (status = 200, description = "Services, most booked first", body = Vec<ServiceStat>)
    )
)]
pub async fn get_top_services(
    State(state): State<crate::AppState>,
    AppQuery(query): AppQuery<RangeQuery>,
) -> AppResult<Json<Vec<ServiceStat>>> {
    let range = DateRange::from_query(&query)?;
    Ok(Json(state.services.analytics.top_services(range).await?))
}

/// Employee leaderboard ranked by revenue
#[utoipa::path(
    get,
    path = "/analytics/employees",
    tag = "analytics",
    params(RangeQuery),
    responses(
        (status = 200, description = "Artists ranked by revenue", body = Vec<EmployeeStat>)
    )
)]
pub async fn get_employees(
    State(state): State<crate::AppState>,
    AppQuery(query): AppQuery<RangeQuery>,
) -> AppResult<Json<Vec<EmployeeStat>>> {
    let range = DateRange::from_query(&query)?;
    Ok(Json(state.services.analytics.employees(range).await?))
}

/// Stats, top services and rank of one artist
#[utoipa::path(
    get,
    path = "/analytics/employee/{name}",
    tag = "analytics",
    params(
        ("name" = String, Path, description = "Artist name"),
        RangeQuery
    ),
    responses(
        (status = 200, description = "Artist detail (all zero when the artist has no visits)", body = EmployeeDetail)
    )
)]
pub async fn get_employee(
    State(state): State<crate::AppState>,
    Path(name): Path<String>,
    AppQuery(query): AppQuery<RangeQuery>,
) -> AppResult<Json<EmployeeDetail>> {
    let range = DateRange::from_query(&query)?;
    Ok(Json(state.services.analytics.employee(range, &name).await?))
}

/// New versus repeat customers
#[utoipa::path(
    get,
    path = "/analytics/repeat-customers",
    tag = "analytics",
    params(RangeQuery),
    responses(
        (status = 200, description = "Repeat customer breakdown", body = RepeatCustomers)
    )
)]
pub async fn get_repeat_customers(
    State(state): State<crate::AppState>,
    AppQuery(query): AppQuery<RangeQuery>,
) -> AppResult<Json<RepeatCustomers>> {
    let range = DateRange::from_query(&query)?;
    Ok(Json(state.services.analytics.repeat_customers(range).await?))
}

/// Download visits in range as an xlsx workbook
#[utoipa::path(
    get,
    path = "/analytics/export",
    tag = "analytics",
    params(RangeQuery),
    responses(
        (status = 200, description = "xlsx attachment, header row only when there are no visits")
    )
)]
pub async fn export_visits(
    State(state): State<crate::AppState>,
    AppQuery(query): AppQuery<RangeQuery>,
) -> AppResult<impl IntoResponse> {
    let range = DateRange::from_query(&query)?;
    let visits = state.services.analytics.visits(range).await?;
    let count = visits.len();
    let workbook = tokio::task::spawn_blocking(move || export::visits_workbook(&visits))
        .await
        .map_err(|e| AppError::Internal(format!("Export task failed: {}", e)))??;
    tracing::info!("Exported {} visits ({} bytes)", count, workbook.len());

    let disposition = format!(
        "attachment; filename=\"{}\"",
        export::export_filename(range.from, range.to)
    );
    Ok((
        [
            (header::CONTENT_TYPE, export::XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        workbook,
    ))
}
