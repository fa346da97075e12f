use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CoffeeMap;
use crate::coffee::domain::{Coffee, UpsertOutcome};
use crate::coffee::repository::CoffeeRepository;
use crate::errors::ServiceError;

/// Process-local backing: one `RwLock` around an insertion-ordered map.
#[derive(Default)]
pub struct InMemoryCoffeeRepository {
    inner: RwLock<CoffeeMap>,
}

impl InMemoryCoffeeRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl CoffeeRepository for InMemoryCoffeeRepository {
    async fn list(&self) -> Result<Vec<Coffee>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Coffee>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(id).cloned())
    }

    async fn insert(&self, coffee: Coffee) -> Result<Coffee, ServiceError> {
        let mut map = self.inner.write().await;
        super::insert_new(&mut map, coffee)
    }

    async fn upsert(&self, coffee: Coffee) -> Result<(Coffee, UpsertOutcome), ServiceError> {
        let mut map = self.inner.write().await;
        Ok(super::upsert(&mut map, coffee))
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        Ok(map.shift_remove(id).is_some())
    }

    async fn count(&self) -> Result<usize, ServiceError> {
        Ok(self.inner.read().await.len())
    }
}
