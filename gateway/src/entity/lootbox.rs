use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use super::{parsed_u64, require, EntityResult};
use crate::client::node::{NodeClient, ReadOutcome};
use crate::decode::{decode_lootbox_item, LootboxItem};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lootbox {
    pub contract: String,
    pub asset: serde_json::Value,
    pub nft_collection: serde_json::Value,
    pub deposited_item_count: u64,
    pub description: serde_json::Value,
    pub item_count: serde_json::Value,
    pub items_per_lootbox: serde_json::Value,
    pub lootbox_count: serde_json::Value,
    pub lootbox_price: serde_json::Value,
    pub name: serde_json::Value,
    pub max_lootboxes: serde_json::Value,
    /// Motes held by the contract's purse; defaults to "0" when the purse
    /// cannot be resolved.
    pub purse_balance: String,
}

/// Resolves the contract's `purse` named key and queries its balance.
/// This is an auxiliary lookup: any failure along the way yields 0.
async fn purse_balance_or_zero(node: &NodeClient, state_root: &str, contract_ref: &str) -> String {
    let named_keys = match node.contract_named_keys(state_root, contract_ref).await {
        Ok(ReadOutcome::Found(contract)) => contract.named_keys,
        _ => return "0".to_string(),
    };
    let Some(purse) = named_keys.into_iter().find(|nk| nk.name == "purse") else {
        return "0".to_string();
    };
    node.purse_balance(state_root, &purse.key).await.unwrap_or_else(|_| "0".to_string())
}

pub async fn fetch_lootbox(node: &NodeClient, state_root: &str, contract_ref: &str) -> EntityResult<Lootbox> {
    let asset = require(node.read_field(state_root, contract_ref, &["asset"]).await?, "asset")?;
    let nft_collection =
        require(node.read_field(state_root, contract_ref, &["nft_collection"]).await?, "nft_collection")?;
    let deposited_item_count = require(
        node.read_field(state_root, contract_ref, &["deposited_item_count"]).await?,
        "deposited_item_count",
    )?;
    let description = require(node.read_field(state_root, contract_ref, &["description"]).await?, "description")?;
    let item_count = require(node.read_field(state_root, contract_ref, &["item_count"]).await?, "item_count")?;
    let items_per_lootbox =
        require(node.read_field(state_root, contract_ref, &["items_per_lootbox"]).await?, "items_per_lootbox")?;
    let lootbox_count =
        require(node.read_field(state_root, contract_ref, &["lootbox_count"]).await?, "lootbox_count")?;
    let lootbox_price =
        require(node.read_field(state_root, contract_ref, &["lootbox_price"]).await?, "lootbox_price")?;
    let name = require(node.read_field(state_root, contract_ref, &["name"]).await?, "name")?;
    let max_lootboxes =
        require(node.read_field(state_root, contract_ref, &["max_lootboxes"]).await?, "max_lootboxes")?;

    let purse_balance = purse_balance_or_zero(node, state_root, contract_ref).await;

    Ok(Lootbox {
        contract: contract_ref.to_string(),
        asset: asset.parsed,
        nft_collection: nft_collection.parsed,
        deposited_item_count: parsed_u64(&deposited_item_count, "deposited_item_count")?,
        description: description.parsed,
        item_count: item_count.parsed,
        items_per_lootbox: items_per_lootbox.parsed,
        lootbox_count: lootbox_count.parsed,
        lootbox_price: lootbox_price.parsed,
        name: name.parsed,
        max_lootboxes: max_lootboxes.parsed,
        purse_balance,
    })
}

/// One `items[index]` dictionary read, decoded at fixed byte offsets.
pub async fn fetch_lootbox_item(
    node: &NodeClient,
    state_root: &str,
    contract_ref: &str,
    index: u64,
) -> EntityResult<LootboxItem> {
    let entry = require(node.read_dictionary(state_root, contract_ref, "items", &index.to_string()).await?, "items")?;
    Ok(decode_lootbox_item(&entry.bytes)?)
}

/// All deposited items, fetched concurrently in index order. One failed
/// item read aborts the whole list.
pub async fn fetch_lootbox_items(
    node: &NodeClient,
    state_root: &str,
    contract_ref: &str,
) -> EntityResult<Vec<LootboxItem>> {
    let counter = require(
        node.read_field(state_root, contract_ref, &["deposited_item_count"]).await?,
        "deposited_item_count",
    )?;
    let count = parsed_u64(&counter, "deposited_item_count")?;

    try_join_all((0..count).map(|index| fetch_lootbox_item(node, state_root, contract_ref, index))).await
}
