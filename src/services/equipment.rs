//! Equipment inventory service

use crate::{
    error::AppResult,
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add new equipment to the inventory
    pub async fn create(&self, equipment: &CreateEquipment) -> AppResult<Equipment> {
        self.repository.equipment.create(equipment).await
    }

    /// List equipment with pagination
    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list(skip, limit).await
    }

    /// Get a single equipment record
    pub async fn get_by_id(&self, id: i64) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    /// Update an equipment record
    pub async fn update(&self, id: i64, update: &UpdateEquipment) -> AppResult<Equipment> {
        self.repository.equipment.update(id, update).await
    }

    /// Remove equipment from the inventory
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.equipment.delete(id).await
    }
}
