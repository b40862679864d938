//! Read endpoints: cache read-through in front of the entity assemblers.
//!
//! Every handler derives its cache key from the entity-kind tag plus the
//! identifying parameters, serves the cached record if unexpired, and
//! otherwise pins a state root and runs the assembler.

use std::future::Future;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::{debug, instrument};

use super::super::error::RouteError;
use super::super::types::{
    AccountQuery, ApiResponse, CollectionQuery, ContractQuery, IndexedQuery, RouteResult, StakePoolQuery,
};
use crate::cache::{tags, EntityCache, Ttl};
use crate::client::node::ReadOutcome;
use crate::config::Config;
use crate::entity::{self, EntityResult};

pub(super) fn chain_router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/state-root-hash", get(get_state_root_hash))
        .route("/token", get(get_token))
        .route("/collection", get(get_collection))
        .route("/nft", get(get_nft))
        .route("/marketplace", get(get_marketplace))
        .route("/vesting", get(get_vesting))
        .route("/vesting/recipients", get(get_vesting_recipients))
        .route("/raffle", get(get_raffle))
        .route("/raffles", get(get_raffles))
        .route("/lootbox", get(get_lootbox))
        .route("/lootbox/item", get(get_lootbox_item))
        .route("/lootbox/items", get(get_lootbox_items))
        .route("/stake-pool", get(get_stake_pool))
        .route("/validators", get(get_validators))
        .route("/named-keys", get(get_named_keys))
        .with_state(config)
}

/// Serves `key` from the cache or assembles it with `fetch` and stores the
/// result. A cache hit issues no remote reads at all.
async fn read_through<T, Fut, F>(cache: &EntityCache, key: &str, ttl: Ttl, fetch: F) -> Result<serde_json::Value, RouteError>
where
    T: Serialize,
    Fut: Future<Output = EntityResult<T>>,
    F: FnOnce() -> Fut,
{
    if let Some(cached) = cache.get(key).await {
        debug!(key, "serving cached entity");
        return Ok(cached);
    }

    let entity = fetch().await?;
    let value = serde_json::to_value(entity).map_err(|e| RouteError::Upstream(e.to_string()))?;
    cache.set(key, value.clone(), ttl).await;
    Ok(value)
}

fn ok(value: serde_json::Value) -> RouteResult {
    Ok(Json(ApiResponse::success_with_data(value)).into_response())
}

#[instrument(skip(config))]
async fn get_state_root_hash(State(config): State<Arc<Config>>) -> RouteResult {
    let state_root = config.node().state_root_hash().await?;
    ok(serde_json::Value::String(state_root))
}

#[instrument(skip(config))]
async fn get_token(State(config): State<Arc<Config>>, Query(q): Query<ContractQuery>) -> RouteResult {
    let key = format!("{}{}", tags::TOKEN, q.contract_hash);
    let node = config.node();
    let contract = q.contract_hash;
    let value = read_through(config.cache(), &key, Ttl::Long, || async move {
        let root = node.state_root_hash().await?;
        entity::token::fetch_token(node, &root, &contract).await
    })
    .await?;
    ok(value)
}

#[instrument(skip(config))]
async fn get_collection(State(config): State<Arc<Config>>, Query(q): Query<CollectionQuery>) -> RouteResult {
    let key = format!("{}{}{}", tags::COLLECTION, q.contract_hash, if q.full { "full" } else { "" });
    let node = config.node();
    let contract = q.contract_hash;
    let full = q.full;
    let value = read_through(config.cache(), &key, Ttl::Long, || async move {
        let root = node.state_root_hash().await?;
        entity::collection::fetch_collection(node, &root, &contract, full).await
    })
    .await?;
    ok(value)
}

#[instrument(skip(config))]
async fn get_nft(State(config): State<Arc<Config>>, Query(q): Query<IndexedQuery>) -> RouteResult {
    let key = format!("{}{}{}", tags::NFT, q.contract_hash, q.index);
    let node = config.node();
    let contract = q.contract_hash;
    let index = q.index;
    let value = read_through(config.cache(), &key, Ttl::Short, || async move {
        let root = node.state_root_hash().await?;
        entity::nft::fetch_nft(node, &root, &contract, index).await
    })
    .await?;
    ok(value)
}

#[instrument(skip(config))]
async fn get_marketplace(State(config): State<Arc<Config>>, Query(q): Query<ContractQuery>) -> RouteResult {
    let key = format!("{}{}", tags::MARKETPLACE, q.contract_hash);
    let node = config.node();
    let contract = q.contract_hash;
    let value = read_through(config.cache(), &key, Ttl::Short, || async move {
        let root = node.state_root_hash().await?;
        entity::marketplace::fetch_marketplace(node, &root, &contract).await
    })
    .await?;
    ok(value)
}

#[instrument(skip(config))]
async fn get_vesting(State(config): State<Arc<Config>>, Query(q): Query<ContractQuery>) -> RouteResult {
    let key = format!("{}{}", tags::VESTING, q.contract_hash);
    let node = config.node();
    let contract = q.contract_hash;
    let value = read_through(config.cache(), &key, Ttl::Long, || async move {
        let root = node.state_root_hash().await?;
        entity::vesting::fetch_vesting(node, &root, &contract).await
    })
    .await?;
    ok(value)
}

#[instrument(skip(config))]
async fn get_vesting_recipients(State(config): State<Arc<Config>>, Query(q): Query<ContractQuery>) -> RouteResult {
    let key = format!("{}{}", tags::VESTING_RECIPIENTS, q.contract_hash);
    let node = config.node();
    let contract = q.contract_hash;
    let value = read_through(config.cache(), &key, Ttl::Short, || async move {
        let root = node.state_root_hash().await?;
        entity::vesting::fetch_vesting_recipients(node, &root, &contract).await
    })
    .await?;
    ok(value)
}

#[instrument(skip(config))]
async fn get_raffle(State(config): State<Arc<Config>>, Query(q): Query<ContractQuery>) -> RouteResult {
    let key = format!("{}{}", tags::RAFFLE, q.contract_hash);
    let node = config.node();
    let contract = q.contract_hash;
    let value = read_through(config.cache(), &key, Ttl::Short, || async move {
        let root = node.state_root_hash().await?;
        entity::raffle::fetch_raffle(node, &root, &contract).await
    })
    .await?;
    ok(value)
}

#[instrument(skip(config))]
async fn get_raffles(State(config): State<Arc<Config>>, Query(q): Query<ContractQuery>) -> RouteResult {
    let key = format!("{}{}", tags::RAFFLES, q.contract_hash);
    let node = config.node();
    let contract = q.contract_hash;
    let value = read_through(config.cache(), &key, Ttl::Short, || async move {
        let root = node.state_root_hash().await?;
        entity::raffle::fetch_raffles(node, &root, &contract).await
    })
    .await?;
    ok(value)
}

#[instrument(skip(config))]
async fn get_lootbox(State(config): State<Arc<Config>>, Query(q): Query<ContractQuery>) -> RouteResult {
    let key = format!("{}{}", tags::LOOTBOX, q.contract_hash);
    let node = config.node();
    let contract = q.contract_hash;
    let value = read_through(config.cache(), &key, Ttl::Short, || async move {
        let root = node.state_root_hash().await?;
        entity::lootbox::fetch_lootbox(node, &root, &contract).await
    })
    .await?;
    ok(value)
}

#[instrument(skip(config))]
async fn get_lootbox_item(State(config): State<Arc<Config>>, Query(q): Query<IndexedQuery>) -> RouteResult {
    let key = format!("{}{}{}", tags::LOOTBOX_ITEM, q.contract_hash, q.index);
    let node = config.node();
    let contract = q.contract_hash;
    let index = q.index;
    let value = read_through(config.cache(), &key, Ttl::Short, || async move {
        let root = node.state_root_hash().await?;
        entity::lootbox::fetch_lootbox_item(node, &root, &contract, index).await
    })
    .await?;
    ok(value)
}

#[instrument(skip(config))]
async fn get_lootbox_items(State(config): State<Arc<Config>>, Query(q): Query<ContractQuery>) -> RouteResult {
    let key = format!("{}{}", tags::LOOTBOX_ITEMS, q.contract_hash);
    let node = config.node();
    let contract = q.contract_hash;
    let value = read_through(config.cache(), &key, Ttl::Short, || async move {
        let root = node.state_root_hash().await?;
        entity::lootbox::fetch_lootbox_items(node, &root, &contract).await
    })
    .await?;
    ok(value)
}

#[instrument(skip(config))]
async fn get_stake_pool(State(config): State<Arc<Config>>, Query(q): Query<StakePoolQuery>) -> RouteResult {
    let key = format!("{}{}{}", tags::STAKE_POOL, q.contract_hash, q.account);
    let node = config.node();
    let contract = q.contract_hash;
    let account = q.account;
    let value = read_through(config.cache(), &key, Ttl::Short, || async move {
        let root = node.state_root_hash().await?;
        entity::staking::fetch_stake_pool(node, &root, &contract, &account).await
    })
    .await?;
    ok(value)
}

#[instrument(skip(config))]
async fn get_validators(State(config): State<Arc<Config>>) -> RouteResult {
    let node = config.node();
    let value = read_through(config.cache(), tags::VALIDATORS, Ttl::Short, || async move {
        entity::validators::fetch_validators(node).await
    })
    .await?;
    ok(value)
}

/// Account named keys, straight from the node. Uncached: the result is tied
/// to an account, not a contract, and is queried rarely.
#[instrument(skip(config))]
async fn get_named_keys(State(config): State<Arc<Config>>, Query(q): Query<AccountQuery>) -> RouteResult {
    let node = config.node();
    let root = node.state_root_hash().await?;
    match node.account_state(&root, &q.account_hash).await? {
        ReadOutcome::Found(account) => {
            let value = serde_json::to_value(account.named_keys).map_err(|e| RouteError::Upstream(e.to_string()))?;
            ok(value)
        }
        ReadOutcome::NotFound => Err(RouteError::NotFound(format!("account {}", q.account_hash))),
    }
}
