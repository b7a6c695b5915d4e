//! Repair reports repository for database operations

use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::repair::{CreateRepair, Repair, RepairStatus},
};

#[derive(Clone)]
pub struct RepairsRepository {
    pool: Pool<Sqlite>,
}

impl RepairsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get repair report by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Repair> {
        sqlx::query_as::<_, Repair>("SELECT * FROM repairs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Repair with id {} not found", id)))
    }

    /// List repair reports with pagination
    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<Repair>> {
        let repairs =
            sqlx::query_as::<_, Repair>("SELECT * FROM repairs ORDER BY id LIMIT ? OFFSET ?")
                .bind(limit)
                .bind(skip)
                .fetch_all(&self.pool)
                .await?;

        Ok(repairs)
    }

    /// File a damage report and pull the equipment out of circulation
    pub async fn create(&self, user_id: i64, report: &CreateRepair) -> AppResult<Repair> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM equipment WHERE id = ?)")
                .bind(report.equipment_id)
                .fetch_one(&self.pool)
                .await?;

        if !exists {
            return Err(AppError::NotFound(format!(
                "Equipment with id {} not found",
                report.equipment_id
            )));
        }

        let today = Utc::now().date_naive();

        let created = sqlx::query_as::<_, Repair>(
            r#"
            INSERT INTO repairs (equipment_id, reported_by_user_id, description, report_date, repair_status)
            VALUES (?, ?, ?, ?, 'pending')
            RETURNING *
            "#,
        )
        .bind(report.equipment_id)
        .bind(user_id)
        .bind(&report.description)
        .bind(today)
        .fetch_one(&self.pool)
        .await?;

        sqlx::query("UPDATE equipment SET status = 'under_repair' WHERE id = ?")
            .bind(report.equipment_id)
            .execute(&self.pool)
            .await?;

        Ok(created)
    }

    /// Close a pending repair and mark the equipment available again
    pub async fn complete(&self, id: i64) -> AppResult<Repair> {
        let repair = self.get_by_id(id).await?;

        if repair.repair_status != RepairStatus::Pending {
            return Err(AppError::NotFound(format!("Repair {} is not pending", id)));
        }

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM equipment WHERE id = ?)")
                .bind(repair.equipment_id)
                .fetch_one(&self.pool)
                .await?;

        if !exists {
            return Err(AppError::NotFound(format!(
                "Equipment with id {} not found",
                repair.equipment_id
            )));
        }

        let today = Utc::now().date_naive();

        let updated = sqlx::query_as::<_, Repair>(
            r#"
            UPDATE repairs
            SET repair_status = 'completed', completed_date = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(today)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        sqlx::query("UPDATE equipment SET status = 'available' WHERE id = ?")
            .bind(repair.equipment_id)
            .execute(&self.pool)
            .await?;

        Ok(updated)
    }
}
