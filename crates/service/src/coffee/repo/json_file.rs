use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;

use crate::coffee::domain::{Coffee, UpsertOutcome};
use crate::coffee::repository::CoffeeRepository;
use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

/// Durable backing: coffee records persisted as a JSON object keyed by id.
#[derive(Clone)]
pub struct JsonFileCoffeeRepository {
    store: Arc<JsonMapStore<String, Coffee>>,
}

impl JsonFileCoffeeRepository {
    /// Open (or create) the store file at `path`.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let store = JsonMapStore::<String, Coffee>::new(path).await?;
        Ok(Self { store })
    }

    pub fn path(&self) -> &std::path::Path {
        self.store.path()
    }
}

#[async_trait]
impl CoffeeRepository for JsonFileCoffeeRepository {
    async fn list(&self) -> Result<Vec<Coffee>, ServiceError> {
        Ok(self.store.values().await)
    }

    async fn get(&self, id: &str) -> Result<Option<Coffee>, ServiceError> {
        Ok(self.store.get(&id.to_string()).await)
    }

    async fn insert(&self, coffee: Coffee) -> Result<Coffee, ServiceError> {
        self.store.update_map(|m| super::insert_new(m, coffee)).await
    }

    async fn upsert(&self, coffee: Coffee) -> Result<(Coffee, UpsertOutcome), ServiceError> {
        self.store.update_map(|m| Ok(super::upsert(m, coffee))).await
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        self.store.remove(&id.to_string()).await
    }

    async fn count(&self) -> Result<usize, ServiceError> {
        Ok(self.store.len().await)
    }
}
