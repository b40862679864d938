use serde::{Deserialize, Serialize};

use super::{require, EntityResult};
use crate::client::node::NodeClient;

/// A CEP-18 fungible token's descriptive state. Every field is an
/// unconditional read; a token missing any of them is malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub name: serde_json::Value,
    pub symbol: serde_json::Value,
    pub decimals: serde_json::Value,
    pub total_supply: serde_json::Value,
    pub balances: serde_json::Value,
    pub enable_mint_burn: serde_json::Value,
}

pub async fn fetch_token(node: &NodeClient, state_root: &str, contract_ref: &str) -> EntityResult<Token> {
    let name = require(node.read_field(state_root, contract_ref, &["name"]).await?, "name")?;
    let symbol = require(node.read_field(state_root, contract_ref, &["symbol"]).await?, "symbol")?;
    let decimals = require(node.read_field(state_root, contract_ref, &["decimals"]).await?, "decimals")?;
    let total_supply = require(node.read_field(state_root, contract_ref, &["total_supply"]).await?, "total_supply")?;
    let balances = require(node.read_field(state_root, contract_ref, &["balances"]).await?, "balances")?;
    let enable_mint_burn =
        require(node.read_field(state_root, contract_ref, &["enable_mint_burn"]).await?, "enable_mint_burn")?;

    Ok(Token {
        name: name.parsed,
        symbol: symbol.parsed,
        decimals: decimals.parsed,
        total_supply: total_supply.parsed,
        balances: balances.parsed,
        enable_mint_burn: enable_mint_burn.parsed,
    })
}
