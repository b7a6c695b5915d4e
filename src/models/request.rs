//! Borrow request model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Borrow request lifecycle status
///
/// Transitions are one-directional: pending -> approved | rejected,
/// approved -> returned, approved -> overdue (sweep).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Returned,
    Overdue,
}

/// Borrow request record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRequest {
    pub id: i64,
    pub user_id: i64,
    pub equipment_id: i64,
    pub status: RequestStatus,
    pub request_date: NaiveDate,
    pub borrow_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub actual_return_date: Option<NaiveDate>,
    pub approved_by_user_id: Option<i64>,
}

/// Create borrow request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRequest {
    pub equipment_id: i64,
    pub borrow_date: NaiveDate,
    /// Return date proposed by the requester; the admin sets the
    /// official one at approval time.
    pub expected_return_date: NaiveDate,
}

/// Approval body: the admin provides the official return date
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApproveRequest {
    pub expected_return_date: NaiveDate,
}

/// Usage analytics entry (most requested equipment first)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UsageAnalytics {
    pub equipment_id: i64,
    pub name: String,
    pub request_count: i64,
}
