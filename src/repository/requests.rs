//! Borrow requests repository for database operations

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::Equipment,
        request::{BorrowRequest, CreateRequest, RequestStatus, UsageAnalytics},
    },
};

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Sqlite>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get borrow request by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<BorrowRequest> {
        sqlx::query_as::<_, BorrowRequest>("SELECT * FROM requests WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request with id {} not found", id)))
    }

    /// Get all requests submitted by a user
    pub async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<BorrowRequest>> {
        let requests =
            sqlx::query_as::<_, BorrowRequest>("SELECT * FROM requests WHERE user_id = ? ORDER BY id")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(requests)
    }

    /// Get all pending requests awaiting a decision
    pub async fn list_pending(&self) -> AppResult<Vec<BorrowRequest>> {
        let requests = sqlx::query_as::<_, BorrowRequest>(
            "SELECT * FROM requests WHERE status = 'pending' ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Get all requests currently marked overdue
    pub async fn list_overdue(&self) -> AppResult<Vec<BorrowRequest>> {
        let requests = sqlx::query_as::<_, BorrowRequest>(
            "SELECT * FROM requests WHERE status = 'overdue' ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Create a pending borrow request. The equipment must exist and have
    /// at least one available unit at submission time.
    pub async fn create(&self, user_id: i64, request: &CreateRequest) -> AppResult<BorrowRequest> {
        let equipment =
            sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = ?")
                .bind(request.equipment_id)
                .fetch_optional(&self.pool)
                .await?;

        match equipment {
            Some(ref e) if e.available_quantity > 0 => {}
            _ => {
                return Err(AppError::BadRequest(
                    "Equipment not available or not found".to_string(),
                ))
            }
        }

        let today = Utc::now().date_naive();

        let created = sqlx::query_as::<_, BorrowRequest>(
            r#"
            INSERT INTO requests (user_id, equipment_id, status, request_date, borrow_date, expected_return_date)
            VALUES (?, ?, 'pending', ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(request.equipment_id)
        .bind(today)
        .bind(request.borrow_date)
        .bind(request.expected_return_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Approve a pending request: record the deciding admin, set the
    /// official return date and take one unit off the shelf.
    pub async fn approve(
        &self,
        id: i64,
        admin_user_id: i64,
        expected_return_date: NaiveDate,
    ) -> AppResult<BorrowRequest> {
        let request = self.get_by_id(id).await?;

        if request.status != RequestStatus::Pending {
            return Err(AppError::NotFound(format!("Request {} is not pending", id)));
        }

        let equipment = self.fetch_equipment(request.equipment_id).await?;

        if equipment.available_quantity <= 0 {
            return Err(AppError::NotFound(format!(
                "No available units of equipment {}",
                equipment.id
            )));
        }

        let updated = sqlx::query_as::<_, BorrowRequest>(
            r#"
            UPDATE requests
            SET status = 'approved', approved_by_user_id = ?, expected_return_date = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(admin_user_id)
        .bind(expected_return_date)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        sqlx::query("UPDATE equipment SET available_quantity = available_quantity - 1 WHERE id = ?")
            .bind(request.equipment_id)
            .execute(&self.pool)
            .await?;

        Ok(updated)
    }

    /// Reject a pending request, recording the deciding admin
    pub async fn reject(&self, id: i64, admin_user_id: i64) -> AppResult<BorrowRequest> {
        let request = self.get_by_id(id).await?;

        if request.status != RequestStatus::Pending {
            return Err(AppError::NotFound(format!("Request {} is not pending", id)));
        }

        let updated = sqlx::query_as::<_, BorrowRequest>(
            r#"
            UPDATE requests
            SET status = 'rejected', approved_by_user_id = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(admin_user_id)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Return an approved loan: stamp today's date and put the unit back
    /// on the shelf.
    pub async fn return_equipment(&self, id: i64) -> AppResult<BorrowRequest> {
        let request = self.get_by_id(id).await?;

        if request.status != RequestStatus::Approved {
            return Err(AppError::BadRequest(format!(
                "Request {} is not approved",
                id
            )));
        }

        self.fetch_equipment(request.equipment_id).await?;

        let today = Utc::now().date_naive();

        let updated = sqlx::query_as::<_, BorrowRequest>(
            r#"
            UPDATE requests
            SET status = 'returned', actual_return_date = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(today)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        sqlx::query("UPDATE equipment SET available_quantity = available_quantity + 1 WHERE id = ?")
            .bind(request.equipment_id)
            .execute(&self.pool)
            .await?;

        Ok(updated)
    }

    /// Flip every approved request whose return date has passed to
    /// overdue, returning the requests that changed.
    pub async fn sweep_overdue(&self) -> AppResult<Vec<BorrowRequest>> {
        let today = Utc::now().date_naive();

        let flipped = sqlx::query_as::<_, BorrowRequest>(
            r#"
            UPDATE requests
            SET status = 'overdue'
            WHERE status = 'approved' AND expected_return_date < ?
            RETURNING *
            "#,
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(flipped)
    }

    /// Request counts per equipment, most requested first. Equipment that
    /// has never been requested does not appear.
    pub async fn usage_analytics(&self) -> AppResult<Vec<UsageAnalytics>> {
        let rows = sqlx::query_as::<_, UsageAnalytics>(
            r#"
            SELECT e.id AS equipment_id, e.name AS name, COUNT(r.id) AS request_count
            FROM equipment e
            JOIN requests r ON r.equipment_id = e.id
            GROUP BY e.id, e.name
            ORDER BY request_count DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn fetch_equipment(&self, equipment_id: i64) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = ?")
            .bind(equipment_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Equipment with id {} not found", equipment_id))
            })
    }
}
