use serde::{Deserialize, Serialize};

use super::{require, EntityResult};
use crate::client::node::NodeClient;

/// A CEP-78 NFT collection. The modality fields are only read for the full
/// variant; both variants share one assembler so the field set cannot drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub collection_name: serde_json::Value,
    pub collection_symbol: serde_json::Value,
    pub total_token_supply: serde_json::Value,
    pub number_of_minted_tokens: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_mutability: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minting_mode: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burn_mode: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporting_mode: Option<serde_json::Value>,
}

pub async fn fetch_collection(
    node: &NodeClient,
    state_root: &str,
    contract_ref: &str,
    full: bool,
) -> EntityResult<Collection> {
    let collection_name =
        require(node.read_field(state_root, contract_ref, &["collection_name"]).await?, "collection_name")?;
    let collection_symbol =
        require(node.read_field(state_root, contract_ref, &["collection_symbol"]).await?, "collection_symbol")?;
    let total_token_supply =
        require(node.read_field(state_root, contract_ref, &["total_token_supply"]).await?, "total_token_supply")?;
    let number_of_minted_tokens = require(
        node.read_field(state_root, contract_ref, &["number_of_minted_tokens"]).await?,
        "number_of_minted_tokens",
    )?;

    let mut collection = Collection {
        collection_name: collection_name.parsed,
        collection_symbol: collection_symbol.parsed,
        total_token_supply: total_token_supply.parsed,
        number_of_minted_tokens: number_of_minted_tokens.parsed,
        json_schema: None,
        metadata_mutability: None,
        minting_mode: None,
        burn_mode: None,
        reporting_mode: None,
    };

    if full {
        let json_schema = require(node.read_field(state_root, contract_ref, &["json_schema"]).await?, "json_schema")?;
        let metadata_mutability = require(
            node.read_field(state_root, contract_ref, &["metadata_mutability"]).await?,
            "metadata_mutability",
        )?;
        let minting_mode =
            require(node.read_field(state_root, contract_ref, &["minting_mode"]).await?, "minting_mode")?;
        let burn_mode = require(node.read_field(state_root, contract_ref, &["burn_mode"]).await?, "burn_mode")?;
        let reporting_mode =
            require(node.read_field(state_root, contract_ref, &["reporting_mode"]).await?, "reporting_mode")?;

        collection.json_schema = Some(json_schema.parsed);
        collection.metadata_mutability = Some(metadata_mutability.parsed);
        collection.minting_mode = Some(minting_mode.parsed);
        collection.burn_mode = Some(burn_mode.parsed);
        collection.reporting_mode = Some(reporting_mode.parsed);
    }

    Ok(collection)
}
