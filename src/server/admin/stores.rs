use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::response::{ApiError, ApiResponse, OptionExt};
use crate::server::validation::validate_store;
use crate::types::{NewStore, Store};

pub async fn list_stores(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let stores = state.catalog.stores.list(None).await;
    Json(ApiResponse::success(stores))
}

pub async fn get_store(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let store = state
        .catalog
        .stores
        .get_by_id(&id)
        .await
        .or_not_found("Store", &id)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(store)))
}

pub async fn create_store(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewStore>,
) -> impl IntoResponse {
    validate_store(&req.name)?;

    let store = state.catalog.stores.create(req).await?;

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(store))))
}

pub async fn update_store(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut store): Json<Store>,
) -> impl IntoResponse {
    validate_store(&store.name)?;
    store.id = id;

    let store = state.catalog.stores.update(store).await?;

    Ok::<_, ApiError>(Json(ApiResponse::success(store)))
}

pub async fn delete_store(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    if !state.catalog.stores.delete(&id).await? {
        return Err(ApiError::already_deleted("Store", &id));
    }

    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
}

pub async fn reset(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.catalog.reset_to_defaults().await?;

    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
}
