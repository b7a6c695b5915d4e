//! Repair report model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Repair lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RepairStatus {
    Pending,
    Completed,
}

/// Repair report record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Repair {
    pub id: i64,
    pub equipment_id: i64,
    pub reported_by_user_id: i64,
    pub description: String,
    pub report_date: NaiveDate,
    pub repair_status: RepairStatus,
    pub completed_date: Option<NaiveDate>,
}

/// Damage report request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRepair {
    pub equipment_id: i64,
    pub description: String,
}
