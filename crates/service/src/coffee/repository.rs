use async_trait::async_trait;

use super::domain::{Coffee, UpsertOutcome};
use crate::errors::ServiceError;

/// Storage abstraction for coffee records.
///
/// Every implementation serializes mutations against each other and against
/// reads, and keeps `list` in insertion order. `upsert` decides
/// existed-vs-absent and writes under one exclusive section.
#[async_trait]
pub trait CoffeeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Coffee>, ServiceError>;
    async fn get(&self, id: &str) -> Result<Option<Coffee>, ServiceError>;
    /// Insert a new record; `Conflict` if the id is taken.
    async fn insert(&self, coffee: Coffee) -> Result<Coffee, ServiceError>;
    /// Replace the name of `coffee.id` or insert it; returns the stored record.
    async fn upsert(&self, coffee: Coffee) -> Result<(Coffee, UpsertOutcome), ServiceError>;
    /// Remove by id; `Ok(false)` if it was not there.
    async fn delete(&self, id: &str) -> Result<bool, ServiceError>;
    async fn count(&self) -> Result<usize, ServiceError>;
}
