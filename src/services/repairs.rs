//! Damage reporting and repair tracking service

use crate::{
    error::AppResult,
    models::repair::{CreateRepair, Repair},
    repository::Repository,
};

#[derive(Clone)]
pub struct RepairsService {
    repository: Repository,
}

impl RepairsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// File a damage report; the equipment goes under repair
    pub async fn report(&self, user_id: i64, report: &CreateRepair) -> AppResult<Repair> {
        self.repository.repairs.create(user_id, report).await
    }

    /// List repair reports with pagination
    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<Repair>> {
        self.repository.repairs.list(skip, limit).await
    }

    /// Mark a repair as completed; the equipment becomes available
    pub async fn complete(&self, id: i64) -> AppResult<Repair> {
        self.repository.repairs.complete(id).await
    }
}
