use chrono::Utc;

use super::ids::{next_numeric_id, next_prefixed_id, next_timestamped_id};
use super::{Op, Record, seed};
use crate::types::{
    NewProduct, NewPromotion, NewStore, NewStoreConfig, Product, Promotion, Store, StoreConfig,
};

impl Record for Store {
    const KIND: &'static str = "store_shops";
    const LABEL: &'static str = "Store";

    type Draft = NewStore;

    fn id(&self) -> &str {
        &self.id
    }

    fn next_id(existing: &[Self]) -> String {
        next_prefixed_id("store", existing.iter().map(|s| s.id.as_str()))
    }

    fn from_draft(id: String, draft: NewStore) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            is_active: draft.is_active,
            game_id: draft.game_id,
            theme: draft.theme,
        }
    }

    fn seed() -> Vec<Self> {
        seed::stores()
    }
}

impl Record for Product {
    const KIND: &'static str = "store_products";
    const LABEL: &'static str = "Product";

    type Draft = NewProduct;

    fn id(&self) -> &str {
        &self.id
    }

    fn next_id(existing: &[Self]) -> String {
        next_numeric_id(existing.iter().map(|p| p.id.as_str()))
    }

    fn from_draft(id: String, draft: NewProduct) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            currency: draft.currency,
            image_url: draft.image_url,
            category: draft.category,
            is_active: draft.is_active,
            store_id: draft.store_id,
            tags: draft.tags,
            discount_percentage: draft.discount_percentage,
            stock: draft.stock,
            start_date: draft.start_date,
            end_date: draft.end_date,
        }
    }

    fn seed() -> Vec<Self> {
        seed::products()
    }
}

impl Record for Promotion {
    const KIND: &'static str = "store_promotions";
    const LABEL: &'static str = "Promotion";

    type Draft = NewPromotion;

    fn id(&self) -> &str {
        &self.id
    }

    fn next_id(existing: &[Self]) -> String {
        next_timestamped_id(
            "promo-",
            existing.iter().map(|p| p.id.as_str()),
            Utc::now().timestamp_millis(),
        )
    }

    fn from_draft(id: String, draft: NewPromotion) -> Self {
        Self {
            id,
            store_id: draft.store_id,
            name: draft.name,
            code: draft.code,
            discount_type: draft.discount_type,
            discount_value: draft.discount_value,
            start_date: draft.start_date,
            end_date: draft.end_date,
            is_active: draft.is_active,
            applies_to: draft.applies_to,
            product_ids: draft.product_ids,
            minimum_purchase: draft.minimum_purchase,
            usage_limit: draft.usage_limit,
            usage_count: 0,
        }
    }

    fn seed() -> Vec<Self> {
        seed::promotions()
    }
}

impl Record for StoreConfig {
    const KIND: &'static str = "store_configs";
    const LABEL: &'static str = "Store configuration";
    const UPDATE_OP: Op = Op::Save;

    type Draft = NewStoreConfig;

    fn id(&self) -> &str {
        &self.id
    }

    fn next_id(existing: &[Self]) -> String {
        next_prefixed_id("config", existing.iter().map(|c| c.id.as_str()))
    }

    fn from_draft(id: String, draft: NewStoreConfig) -> Self {
        Self {
            id,
            store_id: draft.store_id,
            sections: draft.sections,
            last_modified: Utc::now(),
        }
    }

    fn seed() -> Vec<Self> {
        seed::store_configs()
    }
}
