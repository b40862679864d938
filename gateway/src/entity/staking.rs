use serde::{Deserialize, Serialize};

use super::{parsed_string, require, EntityResult};
use crate::client::node::{NodeClient, ReadOutcome};
use crate::decode::hex_to_ascii;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakePool {
    pub contract: String,
    pub deposit_end_time: serde_json::Value,
    pub deposit_start_time: serde_json::Value,
    pub fixed_apr: serde_json::Value,
    pub lock_period: serde_json::Value,
    pub max_apr: serde_json::Value,
    pub max_cap: serde_json::Value,
    pub max_stake: serde_json::Value,
    pub min_apr: serde_json::Value,
    pub min_stake: serde_json::Value,
    /// The staked token's contract reference, stored hex-packed on-chain.
    pub token: String,
    pub total_supply: serde_json::Value,
    /// The querying account's stake; 0 when the account never staked or the
    /// lookup fails.
    pub stake: serde_json::Value,
}

pub async fn fetch_stake_pool(
    node: &NodeClient,
    state_root: &str,
    contract_ref: &str,
    account_ref: &str,
) -> EntityResult<StakePool> {
    let deposit_end_time =
        require(node.read_field(state_root, contract_ref, &["deposit_end_time"]).await?, "deposit_end_time")?;
    let deposit_start_time =
        require(node.read_field(state_root, contract_ref, &["deposit_start_time"]).await?, "deposit_start_time")?;
    let fixed_apr = require(node.read_field(state_root, contract_ref, &["fixed_apr"]).await?, "fixed_apr")?;
    let lock_period = require(node.read_field(state_root, contract_ref, &["lock_period"]).await?, "lock_period")?;
    let max_apr = require(node.read_field(state_root, contract_ref, &["max_apr"]).await?, "max_apr")?;
    let max_cap = require(node.read_field(state_root, contract_ref, &["max_cap"]).await?, "max_cap")?;
    let max_stake = require(node.read_field(state_root, contract_ref, &["max_stake"]).await?, "max_stake")?;
    let min_apr = require(node.read_field(state_root, contract_ref, &["min_apr"]).await?, "min_apr")?;
    let min_stake = require(node.read_field(state_root, contract_ref, &["min_stake"]).await?, "min_stake")?;
    let token = require(node.read_field(state_root, contract_ref, &["token"]).await?, "token")?;
    let total_supply = require(node.read_field(state_root, contract_ref, &["total_supply"]).await?, "total_supply")?;

    // Account-scoped lookup is auxiliary: absence or failure means no stake.
    let stake = node
        .read_dictionary(state_root, contract_ref, "stakes_dict", account_ref)
        .await
        .ok()
        .and_then(ReadOutcome::into_option)
        .map(|value| value.parsed)
        .unwrap_or_else(|| serde_json::Value::from(0));

    Ok(StakePool {
        contract: contract_ref.to_string(),
        deposit_end_time: deposit_end_time.parsed,
        deposit_start_time: deposit_start_time.parsed,
        fixed_apr: fixed_apr.parsed,
        lock_period: lock_period.parsed,
        max_apr: max_apr.parsed,
        max_cap: max_cap.parsed,
        max_stake: max_stake.parsed,
        min_apr: min_apr.parsed,
        min_stake: min_stake.parsed,
        token: hex_to_ascii(&parsed_string(&token))?,
        total_supply: total_supply.parsed,
        stake,
    })
}
