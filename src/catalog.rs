//! The set of repositories a running process works with, built once at
//! start-up around a single backend.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::error::{Error, Result};
use crate::layout;
use crate::store::{Backend, Filter, Latency, Repository};
use crate::types::{Banner, NewStoreConfig, Product, Promotion, Store, StoreConfig};

pub struct Catalog {
    pub stores: Repository<Store>,
    pub products: Repository<Product>,
    pub promotions: Repository<Promotion>,
    pub configs: StoreConfigs,
}

impl Catalog {
    /// Repositories seeded with the default dataset.
    pub fn new(backend: Arc<dyn Backend>, latency: Latency) -> Self {
        Self {
            stores: Repository::new(backend.clone(), latency),
            products: Repository::new(backend.clone(), latency),
            promotions: Repository::new(backend.clone(), latency),
            configs: StoreConfigs::new(Repository::new(backend, latency)),
        }
    }

    /// Factory reset of every collection.
    pub async fn reset_to_defaults(&self) -> Result<()> {
        self.stores.reset_to_defaults().await?;
        self.products.reset_to_defaults().await?;
        self.promotions.reset_to_defaults().await?;
        self.configs.repository().reset_to_defaults().await?;
        info!("Catalog reset to defaults");
        Ok(())
    }
}

/// Store layouts: at most one configuration per store.
pub struct StoreConfigs {
    repo: Repository<StoreConfig>,
}

impl StoreConfigs {
    pub fn new(repo: Repository<StoreConfig>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Repository<StoreConfig> {
        &self.repo
    }

    /// The live configuration of a store, if one was ever created.
    pub async fn fetch(&self, store_id: &str) -> Option<StoreConfig> {
        self.repo.find(&Filter::store(store_id)).await
    }

    /// Returns the store's configuration, creating an empty one on first
    /// access.
    pub async fn open(&self, store_id: &str) -> Result<StoreConfig> {
        if store_id.trim().is_empty() {
            return Err(Error::BadRequest("store id cannot be empty".to_string()));
        }
        let (config, created) = self
            .repo
            .find_or_create(&Filter::store(store_id), || NewStoreConfig {
                store_id: store_id.to_string(),
                sections: Vec::new(),
            })
            .await?;
        if created {
            info!("Created layout {} for store {}", config.id, store_id);
        }
        Ok(config)
    }

    /// Runs `edit` on the store's normalized layout and stores the result,
    /// all under the repository write lock. `last_modified` only moves when
    /// the edit changed something; an error from `edit` leaves the layout as
    /// it was.
    pub async fn edit<F, E>(&self, store_id: &str, edit: F) -> std::result::Result<StoreConfig, E>
    where
        F: FnOnce(StoreConfig) -> std::result::Result<StoreConfig, E> + Send,
        E: From<Error>,
    {
        let current = self.open(store_id).await?;
        self.repo
            .modify(&current.id, move |config| {
                let draft = layout::normalize(config.clone());
                let next = edit(draft.clone())?;
                if next != draft {
                    *config = next;
                    config.last_modified = Utc::now();
                }
                Ok(())
            })
            .await
    }

    /// Persists a draft, refreshing `last_modified`. The draft itself is left
    /// untouched so a failed save loses no work.
    pub async fn save(&self, draft: &StoreConfig) -> Result<StoreConfig> {
        let mut config = draft.clone();
        config.last_modified = Utc::now();
        self.repo.update(config).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.repo.delete(id).await
    }

    /// Flat projection of banners nested in banner sections, optionally for
    /// a single store. Rebuilt from the layouts on every call.
    pub async fn banners(&self, store_id: Option<&str>) -> Vec<Banner> {
        let filter = store_id.map(Filter::store);
        self.repo
            .list(filter.as_ref())
            .await
            .iter()
            .flat_map(|config| config.banners().into_iter().cloned())
            .collect()
    }

    pub async fn banner(&self, id: &str) -> Result<Banner> {
        self.banners(None)
            .await
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| Error::not_found("Banner", id))
    }
}
