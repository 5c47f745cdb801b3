use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::dto::StoreFilterParams;
use crate::server::response::{ApiError, ApiResponse, OptionExt};
use crate::server::validation::validate_product;
use crate::store::Filter;
use crate::types::{NewProduct, Product};

pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StoreFilterParams>,
) -> impl IntoResponse {
    let filter = params.store_id.map(Filter::store);
    let products = state.catalog.products.list(filter.as_ref()).await;
    Json(ApiResponse::success(products))
}

pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let product = state
        .catalog
        .products
        .get_by_id(&id)
        .await
        .or_not_found("Product", &id)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(product)))
}

pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewProduct>,
) -> impl IntoResponse {
    validate_product(&req.name, req.price)?;

    let product = state.catalog.products.create(req).await?;

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(product))))
}

pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut product): Json<Product>,
) -> impl IntoResponse {
    validate_product(&product.name, product.price)?;
    product.id = id;

    let product = state.catalog.products.update(product).await?;

    Ok::<_, ApiError>(Json(ApiResponse::success(product)))
}

pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    if !state.catalog.products.delete(&id).await? {
        return Err(ApiError::already_deleted("Product", &id));
    }

    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
}
