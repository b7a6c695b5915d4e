//! Damage reporting and repair tracking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::repair::{CreateRepair, Repair},
};

use super::{equipment::Pagination, AuthenticatedUser};

/// Report damage for a piece of equipment
#[utoipa::path(
    post,
    path = "/equipment/{id}/report-damage",
    tag = "repairs",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Equipment ID")
    ),
    request_body = CreateRepair,
    responses(
        (status = 201, description = "Damage report filed", body = Repair),
        (status = 400, description = "Equipment ID in URL and body do not match"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn report_damage(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(equipment_id): Path<i64>,
    Json(report): Json<CreateRepair>,
) -> AppResult<(StatusCode, Json<Repair>)> {
    if report.equipment_id != equipment_id {
        return Err(AppError::BadRequest(
            "Equipment ID in URL and body do not match".to_string(),
        ));
    }

    let created = state.services.repairs.report(claims.user_id, &report).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// List all repair reports
#[utoipa::path(
    get,
    path = "/repairs",
    tag = "repairs",
    security(("bearer_auth" = [])),
    params(
        ("skip" = Option<i64>, Query, description = "Rows to skip (default: 0)"),
        ("limit" = Option<i64>, Query, description = "Maximum rows returned (default: 100)")
    ),
    responses(
        (status = 200, description = "Repair reports", body = Vec<Repair>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_repairs(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<Vec<Repair>>> {
    claims.require_admin()?;

    let skip = pagination.skip.unwrap_or(0);
    let limit = pagination.limit.unwrap_or(100);

    let repairs = state.services.repairs.list(skip, limit).await?;
    Ok(Json(repairs))
}

/// Mark a repair as completed
#[utoipa::path(
    post,
    path = "/repairs/{id}/complete",
    tag = "repairs",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Repair ID")
    ),
    responses(
        (status = 200, description = "Repair completed", body = Repair),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Repair report not found or not pending")
    )
)]
pub async fn complete_repair(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Repair>> {
    claims.require_admin()?;

    let repair = state.services.repairs.complete(id).await?;
    Ok(Json(repair))
}
