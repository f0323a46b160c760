use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::ApiError;
use super::{credential_from, AppState};
use crate::auth::{self, gate};
use crate::domain::{Principal, ProductCreate, ProductPatch, Role};

#[derive(Deserialize)]
pub struct SubmitReviewBody {
    pub product_id: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

#[derive(Deserialize)]
pub struct RemoveProductsBody {
    pub ids: Vec<String>,
}

#[derive(Deserialize)]
pub struct ReviewQuery {
    /// Product identifier.
    pub id: String,
    /// Review owner; defaults to the caller. Deleting another reviewer's
    /// review requires the admin role.
    pub reviewer: Option<String>,
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Principal, ApiError> {
    let credential = credential_from(headers);
    auth::resolve(&state.token_secret, credential.as_deref(), &state.directory)
        .await
        .map_err(ApiError::from)
}

async fn authenticate_role(
    state: &AppState,
    headers: &HeaderMap,
    required: &[Role],
) -> Result<Principal, ApiError> {
    let principal = authenticate(state, headers).await?;
    gate::authorize(&principal, required)?;
    Ok(principal)
}

pub async fn list_products(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let products = state.catalog.list_products().await?;
    Ok(Json(json!({ "success": true, "products": products })))
}

pub async fn product_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let product = state
        .catalog
        .get_product(id.clone())
        .await?
        .ok_or(ApiError::ProductMissing(id))?;
    Ok(Json(json!({ "success": true, "product": product })))
}

pub async fn create_product(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(create): Json<ProductCreate>,
) -> Result<Json<Value>, ApiError> {
    authenticate_role(&state, &headers, &[Role::Admin]).await?;
    let id = state.catalog.create_product(create).await?;
    Ok(Json(json!({ "success": true, "product_id": id })))
}

pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Value>, ApiError> {
    authenticate_role(&state, &headers, &[Role::Admin]).await?;
    let product = state.catalog.update_product(id, patch).await?;
    Ok(Json(json!({ "success": true, "product": product })))
}

pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authenticate_role(&state, &headers, &[Role::Admin]).await?;
    state.catalog.delete_product(id).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn remove_products(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<RemoveProductsBody>,
) -> Result<Json<Value>, ApiError> {
    authenticate_role(&state, &headers, &[Role::Admin]).await?;
    let outcome = state.reviews.remove_products(body.ids).await?;
    Ok(Json(json!({ "success": true, "outcome": outcome })))
}

pub async fn submit_review(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<SubmitReviewBody>,
) -> Result<Json<Value>, ApiError> {
    let principal = authenticate(&state, &headers).await?;
    let rating = state
        .reviews
        .submit_review(principal, body.product_id, body.rating, body.comment)
        .await?;
    Ok(Json(json!({ "success": true, "rating": rating })))
}

pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ReviewQuery>,
) -> Result<Json<Value>, ApiError> {
    authenticate(&state, &headers).await?;
    let listing = state.reviews.list_reviews(query.id).await?;
    Ok(Json(json!({
        "success": true,
        "reviews": listing.reviews,
        "rating": listing.rating,
    })))
}

pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ReviewQuery>,
) -> Result<Json<Value>, ApiError> {
    let principal = authenticate(&state, &headers).await?;
    let rating = state
        .reviews
        .delete_review(principal, query.id, query.reviewer)
        .await?;
    Ok(Json(json!({ "success": true, "rating": rating })))
}
