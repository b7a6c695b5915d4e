//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{equipment, health, repairs, requests, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Equiloan API",
        version = "1.0.0",
        description = "School Equipment Lending Portal REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::root,
        health::health_check,
        health::readiness_check,
        // Users
        users::register,
        users::token,
        users::me,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Requests
        requests::create_request,
        requests::my_requests,
        requests::pending_requests,
        requests::approve_request,
        requests::reject_request,
        requests::return_request,
        requests::overdue_requests,
        requests::check_overdue,
        requests::user_requests,
        requests::usage_analytics,
        // Repairs
        repairs::report_damage,
        repairs::list_repairs,
        repairs::complete_repair,
    ),
    components(
        schemas(
            // Users
            crate::models::user::User,
            crate::models::user::RegisterUser,
            crate::models::user::TokenForm,
            crate::models::user::TokenResponse,
            crate::models::user::Role,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentStatus,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            // Requests
            crate::models::request::BorrowRequest,
            crate::models::request::RequestStatus,
            crate::models::request::CreateRequest,
            crate::models::request::ApproveRequest,
            crate::models::request::UsageAnalytics,
            // Repairs
            crate::models::repair::Repair,
            crate::models::repair::RepairStatus,
            crate::models::repair::CreateRepair,
            // Health
            health::WelcomeResponse,
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "Registration and authentication"),
        (name = "equipment", description = "Equipment inventory management"),
        (name = "requests", description = "Borrow request lifecycle"),
        (name = "repairs", description = "Damage reports and repair tracking")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
