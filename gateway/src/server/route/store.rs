//! Off-chain store endpoints: plain inserts and filtered finds over the
//! listing and vesting-recipient collections.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use tracing::instrument;

use super::super::error::RouteError;
use super::super::types::{ApiResponse, MarketplaceQuery, RouteResult, VestingContractQuery};
use crate::config::Config;
use crate::types::store::{Listing, VestingRecipientRecord};

pub(super) fn store_router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/listings", post(create_listing).get(get_listings))
        .route("/vesting/recipients/records", post(create_vesting_recipient).get(get_vesting_recipients))
        .with_state(config)
}

#[instrument(skip(config, listing))]
async fn create_listing(State(config): State<Arc<Config>>, Json(listing): Json<Listing>) -> RouteResult {
    let stored = config.database().create_listing(listing).await?;
    let value = serde_json::to_value(stored).map_err(|e| RouteError::Database(e.to_string()))?;
    Ok(Json(ApiResponse::success_with_data(value)).into_response())
}

#[instrument(skip(config))]
async fn get_listings(State(config): State<Arc<Config>>, Query(q): Query<MarketplaceQuery>) -> RouteResult {
    let listings = config.database().get_listings(&q.marketplace).await?;
    let value = serde_json::to_value(listings).map_err(|e| RouteError::Database(e.to_string()))?;
    Ok(Json(ApiResponse::success_with_data(value)).into_response())
}

#[instrument(skip(config, record))]
async fn create_vesting_recipient(
    State(config): State<Arc<Config>>,
    Json(record): Json<VestingRecipientRecord>,
) -> RouteResult {
    let stored = config.database().create_vesting_recipient(record).await?;
    let value = serde_json::to_value(stored).map_err(|e| RouteError::Database(e.to_string()))?;
    Ok(Json(ApiResponse::success_with_data(value)).into_response())
}

#[instrument(skip(config))]
async fn get_vesting_recipients(
    State(config): State<Arc<Config>>,
    Query(q): Query<VestingContractQuery>,
) -> RouteResult {
    let records = config.database().get_vesting_recipients(&q.contract).await?;
    let value = serde_json::to_value(records).map_err(|e| RouteError::Database(e.to_string()))?;
    Ok(Json(ApiResponse::success_with_data(value)).into_response())
}
