//! Equipment model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Equipment availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Available,
    OnLoan,
    UnderRepair,
}

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i64,
    pub name: String,
    pub category: String,
    /// Physical condition, free text ("new", "good", "worn", ...)
    pub condition: String,
    pub total_quantity: i64,
    pub available_quantity: i64,
    pub status: EquipmentStatus,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    pub category: String,
    pub condition: String,
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub total_quantity: i64,
    pub status: Option<EquipmentStatus>,
}

/// Update equipment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEquipment {
    pub name: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub total_quantity: Option<i64>,
    pub status: Option<EquipmentStatus>,
}
