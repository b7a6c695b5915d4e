//! Borrow request lifecycle service

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::{
        request::{BorrowRequest, CreateRequest, UsageAnalytics},
        user::UserClaims,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Submit a borrow request on behalf of a user
    pub async fn submit(&self, user_id: i64, request: &CreateRequest) -> AppResult<BorrowRequest> {
        self.repository.requests.create(user_id, request).await
    }

    /// Get a single request
    pub async fn get_by_id(&self, id: i64) -> AppResult<BorrowRequest> {
        self.repository.requests.get_by_id(id).await
    }

    /// Requests submitted by the given user
    pub async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<BorrowRequest>> {
        self.repository.requests.list_by_user(user_id).await
    }

    /// Borrowing history of any user; the user must exist
    pub async fn history_for_user(&self, user_id: i64) -> AppResult<Vec<BorrowRequest>> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository.requests.list_by_user(user_id).await
    }

    /// All pending requests awaiting a decision
    pub async fn list_pending(&self) -> AppResult<Vec<BorrowRequest>> {
        self.repository.requests.list_pending().await
    }

    /// Approve a pending request with the official return date
    pub async fn approve(
        &self,
        id: i64,
        admin_user_id: i64,
        expected_return_date: NaiveDate,
    ) -> AppResult<BorrowRequest> {
        self.repository
            .requests
            .approve(id, admin_user_id, expected_return_date)
            .await
    }

    /// Reject a pending request
    pub async fn reject(&self, id: i64, admin_user_id: i64) -> AppResult<BorrowRequest> {
        self.repository.requests.reject(id, admin_user_id).await
    }

    /// Return borrowed equipment. Allowed for the requester themselves
    /// or for an admin.
    pub async fn return_equipment(
        &self,
        id: i64,
        claims: &UserClaims,
    ) -> AppResult<BorrowRequest> {
        let request = self.repository.requests.get_by_id(id).await?;

        if request.user_id != claims.user_id && !claims.is_admin() {
            return Err(AppError::Authorization(
                "Only the requester or an admin can return this equipment".to_string(),
            ));
        }

        self.repository.requests.return_equipment(id).await
    }

    /// Flip overdue loans and report which requests changed
    pub async fn sweep_overdue(&self) -> AppResult<Vec<BorrowRequest>> {
        self.repository.requests.sweep_overdue().await
    }

    /// All requests currently marked overdue
    pub async fn list_overdue(&self) -> AppResult<Vec<BorrowRequest>> {
        self.repository.requests.list_overdue().await
    }

    /// Request counts per equipment, most requested first
    pub async fn usage_analytics(&self) -> AppResult<Vec<UsageAnalytics>> {
        self.repository.requests.usage_analytics().await
    }
}
