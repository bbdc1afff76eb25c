//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{analytics, form_data, health, payments, visits};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Salon API",
        version = "1.0.0",
        description = "Salon booking, payments and analytics REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        // Form data
        form_data::get_form_data,
        // Payments
        payments::create_order,
        payments::verify_order_payment,
        payments::create_payment_link,
        payments::verify_payment,
        // Visits
        visits::list_visits,
        visits::create_visit,
        // Analytics
        analytics::get_summary,
        analytics::get_top_services,
        analytics::get_employees,
        analytics::get_employee,
        analytics::get_repeat_customers,
        analytics::export_visits,
    ),
    components(
        schemas(
            // Visits
            crate::models::visit::Visit,
            crate::models::visit::CreateVisit,
            crate::models::visit::ServiceLine,
            crate::models::visit::PaymentStatus,
            crate::models::visit::RangeQuery,
            // Form data
            crate::models::catalog::FormData,
            // Payments
            crate::models::payment::PaymentRequest,
            crate::models::payment::CreateOrderResponse,
            crate::models::payment::VerifyOrderRequest,
            crate::models::payment::VerifyOrderResponse,
            crate::models::payment::CreatePaymentLinkResponse,
            crate::models::payment::VerifyPaymentLinkQuery,
            crate::models::payment::VerifyPaymentLinkResponse,
            // Analytics
            crate::services::analytics::Summary,
            crate::services::analytics::ServiceStat,
            crate::services::analytics::EmployeeStat,
            crate::services::analytics::EmployeeDetail,
            crate::services::analytics::RepeatCustomer,
            crate::services::analytics::RepeatCustomers,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "form_data", description = "Booking form catalogue"),
        (name = "payments", description = "Razorpay order and payment link flows"),
        (name = "visits", description = "Visit records"),
        (name = "analytics", description = "Revenue, employee and customer reports")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
