use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::layout::{self, BannerField, SectionField, set_field};
use crate::server::AppState;
use crate::server::dto::{AddSectionRequest, PreviewParams, ReorderRequest};
use crate::server::response::{ApiError, ApiResponse, OptionExt};
use crate::types::StoreConfig;

/// Runs `edit` on the store's layout as one atomic read-modify-write.
/// Checks inside `edit` see the same layout the write replaces.
async fn edit_layout<F>(state: &AppState, store_id: &str, edit: F) -> Result<StoreConfig, ApiError>
where
    F: FnOnce(StoreConfig) -> Result<StoreConfig, ApiError> + Send,
{
    require_store(state, store_id).await?;
    state.catalog.configs.edit(store_id, edit).await
}

async fn require_store(state: &AppState, store_id: &str) -> Result<(), ApiError> {
    state
        .catalog
        .stores
        .get_by_id(store_id)
        .await
        .or_not_found("Store", store_id)
        .map(|_| ())
}

fn has_banner(config: &StoreConfig, section_id: &str, banner_id: &str) -> bool {
    config
        .section(section_id)
        .and_then(|s| s.banners())
        .is_some_and(|banners| banners.iter().any(|b| b.id == banner_id))
}

pub async fn get_config(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    require_store(&state, &id).await?;

    let config = state.catalog.configs.open(&id).await?;

    Ok::<_, ApiError>(Json(ApiResponse::success(config)))
}

/// Replaces the store's whole layout. The draft must be that store's own
/// configuration; it can neither target another store nor take over
/// another store's configuration id.
pub async fn save_config(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(draft): Json<StoreConfig>,
) -> impl IntoResponse {
    if draft.store_id != id {
        return Err(ApiError::bad_request(format!(
            "Configuration {} belongs to store {}, not {id}",
            draft.id, draft.store_id
        )));
    }

    let config = edit_layout(&state, &id, move |current| {
        if draft.id != current.id {
            return Err(ApiError::bad_request(format!(
                "Store {} is laid out by configuration {}, not {}",
                current.store_id, current.id, draft.id
            )));
        }
        Ok(layout::normalize(draft))
    })
    .await?;

    Ok::<_, ApiError>(Json(ApiResponse::success(config)))
}

pub async fn add_section(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<AddSectionRequest>,
) -> impl IntoResponse {
    let config = edit_layout(&state, &id, |c| Ok(layout::add_section(c, req.kind))).await?;

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(config))))
}

pub async fn set_section_field(
    State(state): State<Arc<AppState>>,
    Path((id, section_id)): Path<(String, String)>,
    Json(field): Json<SectionField>,
) -> impl IntoResponse {
    let config = edit_layout(&state, &id, move |c| {
        // The editor absorbs rejected writes; report them here instead.
        let section = c.section(&section_id).or_not_found("Section", &section_id)?;
        set_field(section.clone(), field.clone())?;
        Ok(layout::set_section_field(c, &section_id, field))
    })
    .await?;

    Ok::<_, ApiError>(Json(ApiResponse::success(config)))
}

pub async fn remove_section(
    State(state): State<Arc<AppState>>,
    Path((id, section_id)): Path<(String, String)>,
) -> impl IntoResponse {
    let config = edit_layout(&state, &id, move |c| {
        if c.section(&section_id).is_none() {
            return Err(ApiError::already_deleted("Section", &section_id));
        }
        Ok(layout::remove_section(c, &section_id))
    })
    .await?;

    Ok::<_, ApiError>(Json(ApiResponse::success(config)))
}

pub async fn reorder(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ReorderRequest>,
) -> impl IntoResponse {
    let config = edit_layout(&state, &id, move |c| {
        Ok(layout::reorder(c, &req.source_id, &req.target_id))
    })
    .await?;

    Ok::<_, ApiError>(Json(ApiResponse::success(config)))
}

pub async fn add_banner(
    State(state): State<Arc<AppState>>,
    Path((id, section_id)): Path<(String, String)>,
) -> impl IntoResponse {
    let config = edit_layout(&state, &id, move |c| {
        let section = c.section(&section_id).or_not_found("Section", &section_id)?;
        if section.banners().is_none() {
            return Err(ApiError::bad_request(format!(
                "Section {section_id} is a {} section and holds no banners",
                section.kind()
            )));
        }
        Ok(layout::add_banner(c, &section_id))
    })
    .await?;

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(config))))
}

pub async fn update_banner(
    State(state): State<Arc<AppState>>,
    Path((id, section_id, banner_id)): Path<(String, String, String)>,
    Json(field): Json<BannerField>,
) -> impl IntoResponse {
    let config = edit_layout(&state, &id, move |c| {
        if !has_banner(&c, &section_id, &banner_id) {
            return Err(ApiError::not_found(format!("Banner with ID {banner_id} not found")));
        }
        Ok(layout::update_banner_field(c, &section_id, &banner_id, field))
    })
    .await?;

    Ok::<_, ApiError>(Json(ApiResponse::success(config)))
}

pub async fn remove_banner(
    State(state): State<Arc<AppState>>,
    Path((id, section_id, banner_id)): Path<(String, String, String)>,
) -> impl IntoResponse {
    let config = edit_layout(&state, &id, move |c| {
        if !has_banner(&c, &section_id, &banner_id) {
            return Err(ApiError::already_deleted("Banner", &banner_id));
        }
        Ok(layout::remove_banner(c, &section_id, &banner_id))
    })
    .await?;

    Ok::<_, ApiError>(Json(ApiResponse::success(config)))
}

pub async fn list_banners(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let banners = state.catalog.configs.banners(Some(&id)).await;
    Json(ApiResponse::success(banners))
}

pub async fn get_banner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let banner = state.catalog.configs.banner(&id).await?;

    Ok::<_, ApiError>(Json(ApiResponse::success(banner)))
}

pub async fn preview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<PreviewParams>,
) -> impl IntoResponse {
    require_store(&state, &id).await?;

    let viewport = params.viewport.unwrap_or_default();
    let plan = layout::render_store(&state.catalog, &id, viewport).await;

    Ok::<_, ApiError>(Json(ApiResponse::success(plan)))
}
