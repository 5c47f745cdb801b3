use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::{Backend, Filter, Latency, Op, Record};
use crate::error::{Error, Result};

/// Uniquely keyed collection of one entity kind, persisted whole through a
/// [`Backend`] and seeded on first use.
///
/// Every value handed out is a copy; callers never share state with the
/// stored collection.
pub struct Repository<T: Record> {
    backend: Arc<dyn Backend>,
    seed: Vec<T>,
    latency: Latency,
    writes: Mutex<()>,
}

impl<T: Record> Repository<T> {
    pub fn new(backend: Arc<dyn Backend>, latency: Latency) -> Self {
        Self::with_seed(backend, T::seed(), latency)
    }

    pub fn with_seed(backend: Arc<dyn Backend>, seed: Vec<T>, latency: Latency) -> Self {
        Self {
            backend,
            seed,
            latency,
            writes: Mutex::new(()),
        }
    }

    /// Reads the whole collection. Missing collections are seeded; unreadable
    /// ones fall back to the seed without overwriting what is stored.
    fn load(&self) -> Vec<T> {
        match self.backend.read(T::KIND) {
            Ok(Some(document)) => match serde_json::from_str(&document) {
                Ok(records) => records,
                Err(e) => {
                    error!("Corrupt {} collection, using defaults: {e}", T::KIND);
                    self.seed.clone()
                }
            },
            Ok(None) => {
                info!("Seeding {} with {} records", T::KIND, self.seed.len());
                if let Err(e) = self.persist(&self.seed) {
                    error!("Failed to seed {}: {e}", T::KIND);
                }
                self.seed.clone()
            }
            Err(e) => {
                error!("Failed to read {}, using defaults: {e}", T::KIND);
                self.seed.clone()
            }
        }
    }

    fn persist(&self, records: &[T]) -> Result<()> {
        let document = serde_json::to_string(records)?;
        self.backend.write(T::KIND, &document)
    }

    pub async fn list(&self, filter: Option<&Filter>) -> Vec<T> {
        self.latency.wait(Op::List).await;
        let records = self.load();
        match filter {
            Some(filter) => records.into_iter().filter(|r| filter.matches(r)).collect(),
            None => records,
        }
    }

    /// Returns `None` for unknown ids; never an error.
    pub async fn get_by_id(&self, id: &str) -> Option<T> {
        self.latency.wait(Op::Get).await;
        self.load().into_iter().find(|r| r.id() == id)
    }

    /// First record matching `filter`, in collection order.
    pub async fn find(&self, filter: &Filter) -> Option<T> {
        self.latency.wait(Op::Get).await;
        self.load().into_iter().find(|r| filter.matches(r))
    }

    pub async fn create(&self, draft: T::Draft) -> Result<T> {
        self.latency.wait(Op::Write).await;
        let _guard = self.writes.lock().await;

        let mut records = self.load();
        let record = T::from_draft(T::next_id(&records), draft);
        records.push(record.clone());
        self.persist(&records)?;

        debug!("Created {} {}", T::LABEL, record.id());
        Ok(record)
    }

    /// Whole-record overwrite. Fails with `NotFound` when the id is unknown.
    pub async fn update(&self, record: T) -> Result<T> {
        self.latency.wait(T::UPDATE_OP).await;
        let _guard = self.writes.lock().await;

        let mut records = self.load();
        let slot = records
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| Error::not_found(T::LABEL, record.id()))?;
        *slot = record.clone();
        self.persist(&records)?;

        debug!("Updated {} {}", T::LABEL, record.id());
        Ok(record)
    }

    /// Returns the first record matching `filter`, creating one from `draft`
    /// when none exists. The lookup and the insert share one write lock, so
    /// concurrent callers never create duplicates. The flag is `true` when a
    /// record was created.
    pub async fn find_or_create<F>(&self, filter: &Filter, draft: F) -> Result<(T, bool)>
    where
        F: FnOnce() -> T::Draft + Send,
    {
        self.latency.wait(Op::Write).await;
        let _guard = self.writes.lock().await;

        let mut records = self.load();
        if let Some(existing) = records.iter().find(|r| filter.matches(*r)) {
            return Ok((existing.clone(), false));
        }

        let record = T::from_draft(T::next_id(&records), draft());
        records.push(record.clone());
        self.persist(&records)?;

        debug!("Created {} {}", T::LABEL, record.id());
        Ok((record, true))
    }

    /// Applies `change` to the stored record with `id` and persists it, under
    /// the same write lock as every other mutation. An error from `change`
    /// aborts the write and leaves the collection untouched.
    pub async fn modify<F, E>(&self, id: &str, change: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut T) -> std::result::Result<(), E> + Send,
        E: From<Error>,
    {
        self.latency.wait(T::UPDATE_OP).await;
        let _guard = self.writes.lock().await;

        let mut records = self.load();
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| Error::not_found(T::LABEL, id))?;
        change(slot)?;
        let record = slot.clone();
        self.persist(&records)?;

        debug!("Modified {} {}", T::LABEL, id);
        Ok(record)
    }

    /// Returns `false` when nothing had that id.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.latency.wait(Op::Write).await;
        let _guard = self.writes.lock().await;

        let mut records = self.load();
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        self.persist(&records)?;

        debug!("Deleted {} {}", T::LABEL, id);
        Ok(true)
    }

    pub async fn reset_to_defaults(&self) -> Result<()> {
        self.latency.wait(Op::Reset).await;
        let _guard = self.writes.lock().await;

        self.persist(&self.seed)?;
        info!("Reset {} to {} default records", T::KIND, self.seed.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::store::MemoryBackend;
    use crate::types::{NewStore, Store};

    fn repo() -> (Arc<MemoryBackend>, Repository<Store>) {
        let backend = Arc::new(MemoryBackend::new());
        let repo = Repository::new(backend.clone(), Latency::NONE);
        (backend, repo)
    }

    fn new_store(name: &str) -> NewStore {
        NewStore {
            name: name.to_string(),
            description: None,
            is_active: true,
            game_id: None,
            theme: None,
        }
    }

    #[tokio::test]
    async fn test_first_read_seeds_backend() {
        let (backend, repo) = repo();
        assert!(backend.read(Store::KIND).unwrap().is_none());

        let stores = repo.list(None).await;
        assert_eq!(stores.len(), 3);
        assert!(backend.read(Store::KIND).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_corrupt_document_falls_back_to_seed() {
        let (backend, repo) = repo();
        backend.write(Store::KIND, "{not json").unwrap();

        let stores = repo.list(None).await;
        assert_eq!(stores.len(), 3);
        assert_eq!(
            backend.read(Store::KIND).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[tokio::test]
    async fn test_values_are_copies() {
        let (_, repo) = repo();
        let mut store = repo.get_by_id("store1").await.unwrap();
        store.name = "Changed locally".to_string();

        let stored = repo.get_by_id("store1").await.unwrap();
        assert_eq!(stored.name, "Boutique principale");
    }

    #[tokio::test]
    async fn test_modify_unknown_id() {
        let (_, repo) = repo();
        let result = repo
            .modify("store99", |s| {
                s.is_active = false;
                Ok::<_, Error>(())
            })
            .await;
        assert!(matches!(result, Err(Error::NotFound { entity: "Store", .. })));
    }

    #[tokio::test]
    async fn test_rejected_change_is_not_persisted() {
        let (_, repo) = repo();
        let result = repo
            .modify("store1", |s| {
                s.name = "Half-written".to_string();
                Err(Error::BadRequest("rejected".to_string()))
            })
            .await;
        assert!(matches!(result, Err(Error::BadRequest(_))));

        let stored = repo.get_by_id("store1").await.unwrap();
        assert_eq!(stored.name, "Boutique principale");
    }

    #[tokio::test(start_paused = true)]
    async fn test_find_or_create_is_atomic() {
        let backend = Arc::new(MemoryBackend::new());
        let repo = Repository::<Store>::new(backend, Latency::default());
        let filter = Filter::eq("name", "Unique");

        let (a, b) = tokio::join!(
            repo.find_or_create(&filter, || new_store("Unique")),
            repo.find_or_create(&filter, || new_store("Unique")),
        );
        let (a, a_created) = a.unwrap();
        let (b, b_created) = b.unwrap();

        assert_eq!(a.id, b.id);
        assert!(a_created != b_created);
        assert_eq!(repo.list(Some(&filter)).await.len(), 1);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let (_, repo) = repo();
        repo.create(new_store("Extra")).await.unwrap();
        repo.delete("store1").await.unwrap();

        repo.reset_to_defaults().await.unwrap();

        let ids: Vec<String> = repo.list(None).await.into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["store1", "store2", "store3"]);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let backend = Arc::new(MemoryBackend::new());
        let repo = Arc::new(Repository::<Store>::new(backend, Latency::NONE));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(new_store(&format!("s{i}"))).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
        assert_eq!(repo.list(None).await.len(), 11);
    }

    #[tokio::test(start_paused = true)]
    async fn test_operations_wait_for_latency() {
        let backend = Arc::new(MemoryBackend::new());
        let repo = Repository::<Store>::new(backend, Latency::default());

        let start = tokio::time::Instant::now();
        repo.get_by_id("store1").await;
        assert_eq!(start.elapsed(), Duration::from_millis(500));

        let start = tokio::time::Instant::now();
        repo.delete("missing").await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(600));
    }
}
