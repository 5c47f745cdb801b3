//! Repository contract checks over the memory and SQLite backends.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tempfile::TempDir;

use vitrine::error::Error;
use vitrine::store::{Backend, Latency, MemoryBackend, Record, Repository, SqliteBackend, seed};
use vitrine::types::{
    AppliesTo, DiscountType, NewProduct, NewPromotion, NewStore, NewStoreConfig, Product,
    Promotion, Store, StoreConfig,
};

fn memory() -> Arc<dyn Backend> {
    Arc::new(MemoryBackend::new())
}

fn new_product(name: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: "Test item".to_string(),
        price: 10.0,
        currency: "gold".to_string(),
        image_url: String::new(),
        category: "misc".to_string(),
        is_active: true,
        store_id: "store1".to_string(),
        tags: Some(vec!["new".to_string()]),
        discount_percentage: None,
        stock: Some(5),
        start_date: None,
        end_date: None,
    }
}

fn new_store(name: &str) -> NewStore {
    NewStore {
        name: name.to_string(),
        description: None,
        is_active: true,
        game_id: Some("game1".to_string()),
        theme: None,
    }
}

fn new_promotion() -> NewPromotion {
    NewPromotion {
        store_id: "store1".to_string(),
        name: "Spring".to_string(),
        code: "SPRING".to_string(),
        discount_type: DiscountType::Fixed,
        discount_value: 5.0,
        start_date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
        is_active: true,
        applies_to: AppliesTo::All,
        product_ids: Vec::new(),
        minimum_purchase: 0.0,
        usage_limit: 10,
    }
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let repo = Repository::<Product>::new(memory(), Latency::NONE);
    let draft = new_product("Amulette");

    let created = repo.create(draft.clone()).await.unwrap();
    let fetched = repo.get_by_id(&created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.name, draft.name);
    assert_eq!(fetched.tags, draft.tags);
    assert_eq!(fetched.stock, draft.stock);
    assert_eq!(fetched.store_id, draft.store_id);
}

#[tokio::test]
async fn test_promotion_round_trip_resets_usage() {
    let repo = Repository::<Promotion>::new(memory(), Latency::NONE);
    let created = repo.create(new_promotion()).await.unwrap();

    assert!(created.id.starts_with("promo-"));
    assert_eq!(created.usage_count, 0);
    assert_eq!(repo.get_by_id(&created.id).await.unwrap(), created);
}

#[tokio::test]
async fn test_promotion_ids_unique_within_a_millisecond() {
    let repo = Repository::<Promotion>::new(memory(), Latency::NONE);
    let a = repo.create(new_promotion()).await.unwrap();
    let b = repo.create(new_promotion()).await.unwrap();
    assert_ne!(a.id, b.id);
}

async fn assert_update_miss<T: Record + std::fmt::Debug>(mut record: T, set_id: impl FnOnce(&mut T)) {
    let repo = Repository::<T>::new(memory(), Latency::NONE);
    set_id(&mut record);

    let err = repo.update(record).await.unwrap_err();
    match err {
        Error::NotFound { entity, id } => {
            assert_eq!(entity, T::LABEL);
            assert_eq!(id, "does-not-exist");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_update_miss_for_every_kind() {
    let missing = "does-not-exist".to_string();

    let store = seed::stores().remove(0);
    assert_update_miss(store, |s: &mut Store| s.id = missing.clone()).await;

    let product = seed::products().remove(0);
    assert_update_miss(product, |p: &mut Product| p.id = missing.clone()).await;

    let promotion = seed::promotions().remove(0);
    assert_update_miss(promotion, |p: &mut Promotion| p.id = missing.clone()).await;

    let config = seed::store_configs().remove(0);
    assert_update_miss(config, |c: &mut StoreConfig| c.id = missing.clone()).await;
}

#[tokio::test]
async fn test_delete_twice_returns_false() {
    let repo = Repository::<Store>::new(memory(), Latency::NONE);

    assert!(repo.delete("store2").await.unwrap());
    assert!(!repo.delete("store2").await.unwrap());
    assert!(!repo.delete("store2").await.unwrap());
    assert!(repo.get_by_id("store2").await.is_none());
}

#[tokio::test]
async fn test_product_id_follows_max() {
    let seeded: Vec<Product> = seed::products().into_iter().take(3).collect();
    let ids: Vec<&str> = seeded.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);

    let repo = Repository::with_seed(memory(), seeded, Latency::NONE);
    let created = repo.create(new_product("Anneau")).await.unwrap();
    assert_eq!(created.id, "4");
}

#[tokio::test]
async fn test_store_id_format() {
    let seeded: Vec<Store> = seed::stores().into_iter().take(2).collect();
    let repo = Repository::with_seed(memory(), seeded, Latency::NONE);

    let created = repo.create(new_store("Boutique été")).await.unwrap();
    assert_eq!(created.id, "store3");
}

#[tokio::test]
async fn test_config_id_skips_deleted_suffixes() {
    let repo = Repository::<StoreConfig>::new(memory(), Latency::NONE);
    let second = repo
        .create(NewStoreConfig {
            store_id: "store2".to_string(),
            sections: Vec::new(),
        })
        .await
        .unwrap();
    assert_eq!(second.id, "config2");

    assert!(repo.delete("config1").await.unwrap());
    let third = repo
        .create(NewStoreConfig {
            store_id: "store3".to_string(),
            sections: Vec::new(),
        })
        .await
        .unwrap();
    assert_eq!(third.id, "config3");
}

#[tokio::test]
async fn test_list_filter_by_store() {
    let repo = Repository::<Product>::new(memory(), Latency::NONE);
    let filter = vitrine::store::Filter::store("store3");

    let products = repo.list(Some(&filter)).await;
    let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["9"]);
    assert_eq!(repo.list(None).await.len(), 12);
}

#[tokio::test]
async fn test_sqlite_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("vitrine.db");

    {
        let backend = SqliteBackend::new(&db_path).unwrap();
        backend.initialize().unwrap();
        let repo = Repository::<Store>::new(Arc::new(backend), Latency::NONE);
        repo.create(new_store("Boutique persistante")).await.unwrap();
    }

    let backend = SqliteBackend::new(&db_path).unwrap();
    backend.initialize().unwrap();
    let repo = Repository::<Store>::new(Arc::new(backend), Latency::NONE);
    let store = repo.get_by_id("store4").await.unwrap();
    assert_eq!(store.name, "Boutique persistante");
}

#[tokio::test]
async fn test_update_persists_whole_record() {
    let repo = Repository::<StoreConfig>::new(memory(), Latency::NONE);
    let mut config = repo.get_by_id("config1").await.unwrap();
    let before = Utc::now();
    config.last_modified = before;

    let saved = repo.update(config).await.unwrap();
    assert_eq!(saved.last_modified, before);
    assert_eq!(repo.get_by_id("config1").await.unwrap().last_modified, before);
}
