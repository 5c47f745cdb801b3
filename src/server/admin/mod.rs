mod layouts;
mod products;
mod promotions;
mod stores;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post, put},
};

use crate::server::AppState;

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        // Store routes
        .route("/stores", get(stores::list_stores).post(stores::create_store))
        .route(
            "/stores/{id}",
            get(stores::get_store)
                .put(stores::update_store)
                .delete(stores::delete_store),
        )
        // Product routes
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        // Promotion routes
        .route(
            "/promotions",
            get(promotions::list_promotions).post(promotions::create_promotion),
        )
        .route(
            "/promotions/{id}",
            get(promotions::get_promotion)
                .put(promotions::update_promotion)
                .delete(promotions::delete_promotion),
        )
        .route(
            "/promotions/{id}/products",
            put(promotions::set_products),
        )
        .route(
            "/promotions/{id}/eligibility",
            get(promotions::check_eligibility),
        )
        // Layout routes
        .route(
            "/stores/{id}/config",
            get(layouts::get_config).put(layouts::save_config),
        )
        .route("/stores/{id}/config/sections", post(layouts::add_section))
        .route(
            "/stores/{id}/config/sections/{section_id}",
            patch(layouts::set_section_field).delete(layouts::remove_section),
        )
        .route("/stores/{id}/config/reorder", post(layouts::reorder))
        .route(
            "/stores/{id}/config/sections/{section_id}/banners",
            post(layouts::add_banner),
        )
        .route(
            "/stores/{id}/config/sections/{section_id}/banners/{banner_id}",
            patch(layouts::update_banner).delete(layouts::remove_banner),
        )
        .route("/stores/{id}/banners", get(layouts::list_banners))
        .route("/banners/{id}", get(layouts::get_banner))
        .route("/stores/{id}/preview", get(layouts::preview))
        // Maintenance
        .route("/reset", post(stores::reset))
}
