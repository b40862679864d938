use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use super::{parsed_string, parsed_u64, require, EntityResult};
use crate::client::node::NodeClient;
use crate::decode::contract_ref_from_wire;

/// Derived vesting phase, inferred purely from wall-clock time against the
/// schedule timestamps (milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VestingStatus {
    Pending,
    Cliff,
    Releasable,
    Ended,
}

pub fn derive_vesting_status(now_ms: u64, start_date: u64, cliff_timestamp: u64, end_date: u64) -> VestingStatus {
    if now_ms < start_date {
        VestingStatus::Pending
    } else if now_ms < cliff_timestamp {
        VestingStatus::Cliff
    } else if now_ms <= end_date {
        VestingStatus::Releasable
    } else {
        VestingStatus::Ended
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VestingContract {
    pub contract_name: serde_json::Value,
    pub cep18_contract_hash: String,
    pub token_symbol: serde_json::Value,
    pub token_decimals: serde_json::Value,
    pub cliff_timestamp: u64,
    pub duration: serde_json::Value,
    pub end_date: u64,
    pub owner: serde_json::Value,
    pub period: serde_json::Value,
    pub recipient_count: u64,
    pub release_date: serde_json::Value,
    pub released: serde_json::Value,
    pub start_date: u64,
    pub vesting_amount: serde_json::Value,
    pub status: VestingStatus,
}

/// Assembles a vesting contract. The secondary lookup against the
/// referenced CEP-18 contract is part of the fixed sequence; its failure
/// fails the whole entity.
pub async fn fetch_vesting(node: &NodeClient, state_root: &str, contract_ref: &str) -> EntityResult<VestingContract> {
    let contract_name =
        require(node.read_field(state_root, contract_ref, &["contract_name"]).await?, "contract_name")?;
    let cep18_field =
        require(node.read_field(state_root, contract_ref, &["cep18_contract_hash"]).await?, "cep18_contract_hash")?;
    let cep18_ref = contract_ref_from_wire(&cep18_field.bytes)?;

    let token_decimals = require(node.read_field(state_root, &cep18_ref, &["decimals"]).await?, "decimals")?;
    let token_symbol = require(node.read_field(state_root, &cep18_ref, &["symbol"]).await?, "symbol")?;

    let cliff_timestamp =
        require(node.read_field(state_root, contract_ref, &["cliff_timestamp"]).await?, "cliff_timestamp")?;
    let duration = require(node.read_field(state_root, contract_ref, &["duration"]).await?, "duration")?;
    let end_date = require(node.read_field(state_root, contract_ref, &["end_date"]).await?, "end_date")?;
    let owner = require(node.read_field(state_root, contract_ref, &["owner"]).await?, "owner")?;
    let period = require(node.read_field(state_root, contract_ref, &["period"]).await?, "period")?;
    let recipient_count =
        require(node.read_field(state_root, contract_ref, &["recipient_count"]).await?, "recipient_count")?;
    let release_date = require(node.read_field(state_root, contract_ref, &["release_date"]).await?, "release_date")?;
    let released = require(node.read_field(state_root, contract_ref, &["released"]).await?, "released")?;
    let start_date = require(node.read_field(state_root, contract_ref, &["start_date"]).await?, "start_date")?;
    let vesting_amount =
        require(node.read_field(state_root, contract_ref, &["vesting_amount"]).await?, "vesting_amount")?;

    let cliff_ms = parsed_u64(&cliff_timestamp, "cliff_timestamp")?;
    let start_ms = parsed_u64(&start_date, "start_date")?;
    let end_ms = parsed_u64(&end_date, "end_date")?;
    let now_ms = chrono::Utc::now().timestamp_millis() as u64;

    Ok(VestingContract {
        contract_name: contract_name.parsed,
        cep18_contract_hash: cep18_ref,
        token_symbol: token_symbol.parsed,
        token_decimals: token_decimals.parsed,
        cliff_timestamp: cliff_ms,
        duration: duration.parsed,
        end_date: end_ms,
        owner: owner.parsed,
        period: period.parsed,
        recipient_count: parsed_u64(&recipient_count, "recipient_count")?,
        release_date: release_date.parsed,
        released: released.parsed,
        start_date: start_ms,
        vesting_amount: vesting_amount.parsed,
        status: derive_vesting_status(now_ms, start_ms, cliff_ms, end_ms),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VestingRecipient {
    pub index: u64,
    pub recipient: String,
    pub allocation: u64,
    /// Amount released to this recipient so far. `claimed_dict` is only
    /// written on the first claim, so absence means 0.
    pub claimed_amount: u64,
    pub token: String,
    pub contract: String,
}

/// Fans out over the recipient ledger: paired dictionary reads per index,
/// zipped positionally. The join is all-or-nothing; a single failed read
/// fails the whole list and no partial tuples are returned.
pub async fn fetch_vesting_recipients(
    node: &NodeClient,
    state_root: &str,
    contract_ref: &str,
) -> EntityResult<Vec<VestingRecipient>> {
    let recipient_count =
        require(node.read_field(state_root, contract_ref, &["recipient_count"]).await?, "recipient_count")?;
    let count = parsed_u64(&recipient_count, "recipient_count")?;
    let cep18_field =
        require(node.read_field(state_root, contract_ref, &["cep18_contract_hash"]).await?, "cep18_contract_hash")?;
    let token_ref = contract_ref_from_wire(&cep18_field.bytes)?;

    let token_ref = &token_ref;
    try_join_all((0..count).map(|index| async move {
        let item_key = index.to_string();
        let (recipient, allocation, claimed) = futures::try_join!(
            node.read_dictionary(state_root, contract_ref, "recipients_dict", &item_key),
            node.read_dictionary(state_root, contract_ref, "allocations_dict", &item_key),
            node.read_dictionary(state_root, contract_ref, "claimed_dict", &item_key),
        )?;
        let recipient = require(recipient, "recipients_dict")?;
        let allocation = require(allocation, "allocations_dict")?;
        let claimed_amount = match claimed.into_option() {
            Some(value) => parsed_u64(&value, "claimed_dict")?,
            None => 0,
        };

        Ok(VestingRecipient {
            index,
            recipient: parsed_string(&recipient),
            allocation: parsed_u64(&allocation, "allocations_dict")?,
            claimed_amount,
            token: token_ref.clone(),
            contract: contract_ref.to_string(),
        })
    }))
    .await
}
