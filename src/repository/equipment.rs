//! Equipment repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, EquipmentStatus, UpdateEquipment},
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Sqlite>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment with id {} not found", id)))
    }

    /// List equipment with pagination
    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<Equipment>> {
        let items =
            sqlx::query_as::<_, Equipment>("SELECT * FROM equipment ORDER BY id LIMIT ? OFFSET ?")
                .bind(limit)
                .bind(skip)
                .fetch_all(&self.pool)
                .await?;

        Ok(items)
    }

    /// Create equipment; every unit starts available
    pub async fn create(&self, equipment: &CreateEquipment) -> AppResult<Equipment> {
        let status = equipment.status.unwrap_or(EquipmentStatus::Available);

        let created = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (name, category, condition, total_quantity, available_quantity, status)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&equipment.name)
        .bind(&equipment.category)
        .bind(&equipment.condition)
        .bind(equipment.total_quantity)
        .bind(equipment.total_quantity)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update equipment fields. Changing the total keeps the number of
    /// units currently on loan unchanged.
    pub async fn update(&self, id: i64, update: &UpdateEquipment) -> AppResult<Equipment> {
        let current = self.get_by_id(id).await?;

        let on_loan = current.total_quantity - current.available_quantity;
        let total = update.total_quantity.unwrap_or(current.total_quantity);
        let available = if update.total_quantity.is_some() {
            (total - on_loan).max(0)
        } else {
            current.available_quantity
        };

        let updated = sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET name = ?, category = ?, condition = ?,
                total_quantity = ?, available_quantity = ?, status = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(update.name.as_ref().unwrap_or(&current.name))
        .bind(update.category.as_ref().unwrap_or(&current.category))
        .bind(update.condition.as_ref().unwrap_or(&current.condition))
        .bind(total)
        .bind(available)
        .bind(update.status.unwrap_or(current.status))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete equipment regardless of outstanding requests
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Equipment with id {} not found",
                id
            )));
        }

        Ok(())
    }

    /// Set the lifecycle status flag
    pub async fn set_status(&self, id: i64, status: EquipmentStatus) -> AppResult<()> {
        sqlx::query("UPDATE equipment SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
