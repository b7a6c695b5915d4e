//! Borrow request lifecycle endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::request::{ApproveRequest, BorrowRequest, CreateRequest, UsageAnalytics},
};

use super::AuthenticatedUser;

/// Submit a borrow request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request submitted", body = BorrowRequest),
        (status = 400, description = "Equipment not available or not found")
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<BorrowRequest>)> {
    let created = state
        .services
        .requests
        .submit(claims.user_id, &request)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Requests submitted by the authenticated user
#[utoipa::path(
    get,
    path = "/requests/my",
    tag = "requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's requests", body = Vec<BorrowRequest>)
    )
)]
pub async fn my_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowRequest>>> {
    let requests = state.services.requests.list_for_user(claims.user_id).await?;
    Ok(Json(requests))
}

/// All pending requests awaiting a decision
#[utoipa::path(
    get,
    path = "/requests/pending",
    tag = "requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending requests", body = Vec<BorrowRequest>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn pending_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowRequest>>> {
    claims.require_admin()?;

    let requests = state.services.requests.list_pending().await?;
    Ok(Json(requests))
}

/// Approve a pending request
#[utoipa::path(
    post,
    path = "/requests/{id}/approve",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Request ID")
    ),
    request_body = ApproveRequest,
    responses(
        (status = 200, description = "Request approved", body = BorrowRequest),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Request not found, not pending, or equipment unavailable")
    )
)]
pub async fn approve_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(approval): Json<ApproveRequest>,
) -> AppResult<Json<BorrowRequest>> {
    claims.require_admin()?;

    let updated = state
        .services
        .requests
        .approve(id, claims.user_id, approval.expected_return_date)
        .await?;

    Ok(Json(updated))
}

/// Reject a pending request
#[utoipa::path(
    post,
    path = "/requests/{id}/reject",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request rejected", body = BorrowRequest),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Request not found or not pending")
    )
)]
pub async fn reject_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<BorrowRequest>> {
    claims.require_admin()?;

    let updated = state.services.requests.reject(id, claims.user_id).await?;
    Ok(Json(updated))
}

/// Return borrowed equipment
#[utoipa::path(
    post,
    path = "/requests/{id}/return",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Equipment returned", body = BorrowRequest),
        (status = 400, description = "Request not in approved state"),
        (status = 403, description = "Not the requester or an admin"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn return_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<BorrowRequest>> {
    let updated = state.services.requests.return_equipment(id, &claims).await?;
    Ok(Json(updated))
}

/// All requests currently marked overdue
#[utoipa::path(
    get,
    path = "/requests/overdue",
    tag = "requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Overdue requests", body = Vec<BorrowRequest>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn overdue_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowRequest>>> {
    claims.require_admin()?;

    let requests = state.services.requests.list_overdue().await?;
    Ok(Json(requests))
}

/// Flip approved requests past their return date to overdue
#[utoipa::path(
    post,
    path = "/requests/check-overdue",
    tag = "requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Requests flipped to overdue", body = Vec<BorrowRequest>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn check_overdue(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowRequest>>> {
    claims.require_admin()?;

    let flipped = state.services.requests.sweep_overdue().await?;
    Ok(Json(flipped))
}

/// Borrowing history of any user
#[utoipa::path(
    get,
    path = "/users/{id}/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User's requests", body = Vec<BorrowRequest>),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn user_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<BorrowRequest>>> {
    claims.require_admin()?;

    let requests = state.services.requests.history_for_user(user_id).await?;
    Ok(Json(requests))
}

/// Equipment usage ranking, most requested first
#[utoipa::path(
    get,
    path = "/analytics/usage",
    tag = "requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Usage analytics", body = Vec<UsageAnalytics>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn usage_analytics(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<UsageAnalytics>>> {
    claims.require_admin()?;

    let analytics = state.services.requests.usage_analytics().await?;
    Ok(Json(analytics))
}
