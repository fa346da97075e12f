use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{Coffee, CoffeeInput, UpsertOutcome};
use super::repository::CoffeeRepository;
use crate::errors::ServiceError;

/// The coffee store: identity, lookup and upsert rules over a pluggable backing.
/// Owned by whoever serves it; there is no process-wide instance.
pub struct CoffeeService<R: CoffeeRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CoffeeRepository + ?Sized> CoffeeService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Insert one record per seed name, each with a fresh id, in order.
    ///
    /// # Examples
    /// ```
    /// use service::coffee::{CoffeeService, InMemoryCoffeeRepository};
    /// use std::sync::Arc;
    /// let svc = CoffeeService::new(Arc::new(InMemoryCoffeeRepository::new()));
    /// let seeded = tokio_test::block_on(svc.initialize(["Cafe Cereza", "Cafe Ganador"])).unwrap();
    /// assert_eq!(seeded.len(), 2);
    /// assert_ne!(seeded[0].id, seeded[1].id);
    /// ```
    #[instrument(skip_all)]
    pub async fn initialize<I, S>(&self, seed: I) -> Result<Vec<Coffee>, ServiceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seeded = Vec::new();
        for name in seed {
            seeded.push(self.repo.insert(Coffee::new(name)).await?);
        }
        info!(count = seeded.len(), "coffees_seeded");
        Ok(seeded)
    }

    /// Seed only when the backing holds nothing yet, so a durable store is not
    /// seeded again on every restart. Returns how many records were added.
    pub async fn initialize_if_empty<I, S>(&self, seed: I) -> Result<usize, ServiceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let existing = self.repo.count().await?;
        if existing > 0 {
            debug!(existing, "store already populated; skipping seed");
            return Ok(0);
        }
        Ok(self.initialize(seed).await?.len())
    }

    pub async fn list_all(&self) -> Result<Vec<Coffee>, ServiceError> {
        self.repo.list().await
    }

    /// Exact-match lookup; absence is `ServiceError::NotFound`.
    pub async fn get_by_id(&self, id: &str) -> Result<Coffee, ServiceError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("coffee", id))
    }

    /// Create a record. An omitted or empty id is generated; a supplied id
    /// that is already taken is rejected with `Conflict`.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: CoffeeInput) -> Result<Coffee, ServiceError> {
        let coffee = match input.supplied_id() {
            Some(id) => Coffee::with_id(id, input.name.clone())?,
            None => Coffee::new(input.name),
        };
        let created = self.repo.insert(coffee).await?;
        info!(id = %created.id, "coffee_created");
        Ok(created)
    }

    /// Replace the name of `id` if present, otherwise create it with exactly that id.
    #[instrument(skip(self, name), fields(id = %id))]
    pub async fn upsert(&self, id: &str, name: impl Into<String>) -> Result<(Coffee, UpsertOutcome), ServiceError> {
        let coffee = Coffee::with_id(id, name)?;
        let (stored, outcome) = self.repo.upsert(coffee).await?;
        info!(outcome = outcome.as_str(), "coffee_upserted");
        Ok((stored, outcome))
    }

    /// Remove `id`; removing an absent id is a no-op. Returns whether a record was removed.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError> {
        let removed = self.repo.delete(id).await?;
        if removed {
            info!("coffee_deleted");
        } else {
            debug!("delete of absent coffee ignored");
        }
        Ok(removed)
    }

    pub async fn count(&self) -> Result<usize, ServiceError> {
        self.repo.count().await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::coffee::{InMemoryCoffeeRepository, JsonFileCoffeeRepository};

    fn memory_service() -> CoffeeService<InMemoryCoffeeRepository> {
        CoffeeService::new(Arc::new(InMemoryCoffeeRepository::new()))
    }

    fn id_of(all: &[Coffee], name: &str) -> String {
        all.iter().find(|c| c.name == name).map(|c| c.id.clone()).unwrap_or_default()
    }

    #[tokio::test]
    async fn initialize_seeds_in_order_with_unique_ids() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        let seed = ["Cafe Cereza", "Cafe Ganador", "Cafe Lareno", "Cafe Tres Pontas"];
        svc.initialize(seed).await?;

        let all = svc.list_all().await?;
        assert_eq!(all.len(), seed.len());
        let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, seed);
        let ids: HashSet<_> = all.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), seed.len());
        assert!(ids.iter().all(|id| !id.is_empty()));

        for c in &all {
            assert_eq!(&svc.get_by_id(&c.id).await?, c);
        }
        Ok(())
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        svc.initialize(["A"]).await?;
        assert!(matches!(svc.get_by_id("never-issued").await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn create_generates_id_when_missing_or_empty() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        let x = svc.create(CoffeeInput::named("X")).await?;
        assert!(!x.id.is_empty());
        assert_eq!(svc.get_by_id(&x.id).await?.name, "X");

        let y = svc.create(CoffeeInput { id: Some(String::new()), name: "Y".into() }).await?;
        assert!(!y.id.is_empty());
        assert_ne!(x.id, y.id);
        Ok(())
    }

    #[tokio::test]
    async fn create_with_taken_id_conflicts() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        let first = svc.create(CoffeeInput { id: Some("house".into()), name: "House".into() }).await?;
        assert_eq!(first.id, "house");

        let dup = svc.create(CoffeeInput { id: Some("house".into()), name: "Other".into() }).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));
        assert_eq!(svc.count().await?, 1);
        assert_eq!(svc.get_by_id("house").await?.name, "House");
        Ok(())
    }

    #[tokio::test]
    async fn upsert_existing_updates_in_place() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        let seeded = svc.initialize(["A", "B"]).await?;
        let id = seeded[0].id.clone();

        let (stored, outcome) = svc.upsert(&id, "Y").await?;
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(stored, Coffee { id: id.clone(), name: "Y".into() });
        assert_eq!(svc.count().await?, 2);
        assert_eq!(svc.get_by_id(&id).await?.name, "Y");
        Ok(())
    }

    #[tokio::test]
    async fn upsert_unknown_creates_with_given_id() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        svc.initialize(["A"]).await?;

        let (stored, outcome) = svc.upsert("new-id", "Z").await?;
        assert_eq!(outcome, UpsertOutcome::Created);
        assert_eq!(stored.id, "new-id");
        assert_eq!(svc.count().await?, 2);
        assert_eq!(svc.get_by_id("new-id").await?.name, "Z");
        Ok(())
    }

    #[tokio::test]
    async fn upsert_with_empty_id_is_rejected() {
        let svc = memory_service();
        assert!(matches!(svc.upsert("", "Z").await, Err(ServiceError::Model(_))));
    }

    #[tokio::test]
    async fn delete_is_idempotent() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        let seeded = svc.initialize(["A", "B"]).await?;
        let id = seeded[0].id.clone();

        assert!(svc.delete_by_id(&id).await?);
        assert!(matches!(svc.get_by_id(&id).await, Err(ServiceError::NotFound(_))));

        let before = svc.list_all().await?;
        assert!(!svc.delete_by_id(&id).await?);
        assert_eq!(svc.list_all().await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn seed_create_upsert_delete_scenario() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        svc.initialize(["A", "B"]).await?;
        svc.create(CoffeeInput::named("C")).await?;
        assert_eq!(svc.count().await?, 3);

        let all = svc.list_all().await?;
        let a = id_of(&all, "A");
        let b = id_of(&all, "B");

        let (_, outcome) = svc.upsert(&a, "A2").await?;
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(svc.get_by_id(&a).await?.name, "A2");

        svc.delete_by_id(&b).await?;
        let names: Vec<_> = svc.list_all().await?.into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["A2", "C"]);
        Ok(())
    }

    #[tokio::test]
    async fn initialize_if_empty_skips_populated_store() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("coffee_service_{}.json", uuid::Uuid::new_v4()));

        let svc = CoffeeService::new(Arc::new(JsonFileCoffeeRepository::open(&tmp).await?));
        assert_eq!(svc.initialize_if_empty(["A", "B"]).await?, 2);

        let reopened = CoffeeService::new(Arc::new(JsonFileCoffeeRepository::open(&tmp).await?));
        assert_eq!(reopened.initialize_if_empty(["A", "B"]).await?, 0);
        assert_eq!(reopened.count().await?, 2);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn works_through_a_trait_object() -> Result<(), anyhow::Error> {
        let repo: Arc<dyn CoffeeRepository> = Arc::new(InMemoryCoffeeRepository::new());
        let svc: CoffeeService<dyn CoffeeRepository> = CoffeeService::new(repo);
        let c = svc.create(CoffeeInput::named("Cafe Lareno")).await?;
        assert_eq!(svc.get_by_id(&c.id).await?, c);
        Ok(())
    }
}
