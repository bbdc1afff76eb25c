//! Booking form catalogue endpoint

use axum::Json;

use crate::models::catalog::{form_data, FormData};

/// Artists, service types, staff and priced services for the booking form
#[utoipa::path(
    get,
    path = "/form-data",
    tag = "form_data",
    responses(
        (status = 200, description = "Booking form catalogue", body = FormData)
    )
)]
pub async fn get_form_data() -> Json<FormData> {
    Json(form_data().clone())
}
