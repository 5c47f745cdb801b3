use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::promotion::{self, set_applied_products, set_applies_to};
use crate::server::AppState;
use crate::server::dto::{
    EligibilityParams, EligibilityResponse, SetProductsRequest, StoreFilterParams,
};
use crate::server::response::{ApiError, ApiResponse, OptionExt};
use crate::server::validation::validate_promotion;
use crate::store::Filter;
use crate::types::{AppliesTo, NewPromotion, Promotion};

pub async fn list_promotions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StoreFilterParams>,
) -> impl IntoResponse {
    let filter = params.store_id.map(Filter::store);
    let promotions = state.catalog.promotions.list(filter.as_ref()).await;
    Json(ApiResponse::success(promotions))
}

pub async fn get_promotion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let promotion = state
        .catalog
        .promotions
        .get_by_id(&id)
        .await
        .or_not_found("Promotion", &id)?;

    Ok::<_, ApiError>(Json(ApiResponse::success(promotion)))
}

pub async fn create_promotion(
    State(state): State<Arc<AppState>>,
    Json(mut req): Json<NewPromotion>,
) -> impl IntoResponse {
    validate_promotion(&req.name, &req.code, req.start_date, req.end_date)?;
    if req.applies_to == AppliesTo::All {
        req.product_ids.clear();
    }

    let promotion = state.catalog.promotions.create(req).await?;

    Ok::<_, ApiError>((StatusCode::CREATED, Json(ApiResponse::success(promotion))))
}

pub async fn update_promotion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut promotion): Json<Promotion>,
) -> impl IntoResponse {
    validate_promotion(
        &promotion.name,
        &promotion.code,
        promotion.start_date,
        promotion.end_date,
    )?;
    promotion.id = id;
    let applies_to = promotion.applies_to;
    set_applies_to(&mut promotion, applies_to);

    let promotion = state.catalog.promotions.update(promotion).await?;

    Ok::<_, ApiError>(Json(ApiResponse::success(promotion)))
}

pub async fn delete_promotion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    if !state.catalog.promotions.delete(&id).await? {
        return Err(ApiError::already_deleted("Promotion", &id));
    }

    Ok::<_, ApiError>(StatusCode::NO_CONTENT)
}

pub async fn set_products(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SetProductsRequest>,
) -> impl IntoResponse {
    let promotion = set_applied_products(&state.catalog.promotions, &id, req.product_ids).await?;

    Ok::<_, ApiError>(Json(ApiResponse::success(promotion)))
}

pub async fn check_eligibility(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<EligibilityParams>,
) -> impl IntoResponse {
    let promotion = state
        .catalog
        .promotions
        .get_by_id(&id)
        .await
        .or_not_found("Promotion", &id)?;

    let date = params.date.unwrap_or_else(promotion::today);
    let result = promotion::check(&promotion, &params.product_id, date);

    Ok::<_, ApiError>(Json(ApiResponse::success(EligibilityResponse {
        promotion_id: promotion.id.clone(),
        product_id: params.product_id,
        date,
        eligible: result.is_eligible(),
        result,
        phase: promotion::phase(&promotion, date),
    })))
}
