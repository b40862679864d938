use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use super::fanout::child_contract_refs;
use super::{parsed_string, parsed_u64, require, EntityResult};
use crate::client::node::types::ClValue;
use crate::client::node::{NodeClient, ReadOutcome};
use crate::decode::contract_ref_from_wire;

/// Raffle lifecycle, inferred from which on-chain fields exist and from
/// wall-clock time. There is no explicit state storage on-chain and no
/// externally triggered transition visible to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RaffleStatus {
    WaitingDeposit,
    WaitingStart,
    Ongoing,
    WaitingDraw,
    WaitingClaim,
    Completed,
}

/// Pure derivation over the read-outcome set and `now` (milliseconds).
///
/// * before `start_date`: waiting for the NFT deposit, or for the start once
///   the raffle contract already owns the NFT;
/// * between the dates: ongoing;
/// * after `end_date`: `claimed` beats `winner` beats neither.
pub fn derive_raffle_status(
    now_ms: u64,
    start_date: u64,
    end_date: u64,
    deposited: bool,
    claimed: bool,
    has_winner: bool,
) -> RaffleStatus {
    if now_ms < start_date {
        if deposited {
            RaffleStatus::WaitingStart
        } else {
            RaffleStatus::WaitingDeposit
        }
    } else if now_ms <= end_date {
        RaffleStatus::Ongoing
    } else if claimed {
        RaffleStatus::Completed
    } else if has_winner {
        RaffleStatus::WaitingClaim
    } else {
        RaffleStatus::WaitingDraw
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Raffle {
    pub contract: String,
    pub owner: serde_json::Value,
    pub name: serde_json::Value,
    pub collection: String,
    pub nft_index: u64,
    pub start_date: u64,
    pub end_date: u64,
    pub price: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nft_owner: Option<String>,
    pub claimed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_account: Option<serde_json::Value>,
    pub status: RaffleStatus,
}

/// Fail-soft boundary for the conditional reads: absence or any read
/// failure collapses to an absent field and assembly continues.
async fn read_field_soft(node: &NodeClient, state_root: &str, contract_ref: &str, field: &str) -> Option<ClValue> {
    node.read_field(state_root, contract_ref, &[field]).await.ok().and_then(ReadOutcome::into_option)
}

fn dict_key_from(value: &ClValue) -> String {
    match &value.parsed {
        serde_json::Value::Number(n) => n.to_string(),
        _ => parsed_string(value),
    }
}

pub async fn fetch_raffle(node: &NodeClient, state_root: &str, contract_ref: &str) -> EntityResult<Raffle> {
    let owner = require(node.read_field(state_root, contract_ref, &["owner"]).await?, "owner")?;
    let name = require(node.read_field(state_root, contract_ref, &["name"]).await?, "name")?;
    let collection = require(node.read_field(state_root, contract_ref, &["collection"]).await?, "collection")?;
    let nft_index = require(node.read_field(state_root, contract_ref, &["nft_index"]).await?, "nft_index")?;
    let start_date = require(node.read_field(state_root, contract_ref, &["start_date"]).await?, "start_date")?;
    let end_date = require(node.read_field(state_root, contract_ref, &["end_date"]).await?, "end_date")?;
    let price = require(node.read_field(state_root, contract_ref, &["price"]).await?, "price")?;

    let collection_ref = contract_ref_from_wire(&collection.bytes)?;
    let nft_index = parsed_u64(&nft_index, "nft_index")?;
    let start_ms = parsed_u64(&start_date, "start_date")?;
    let end_ms = parsed_u64(&end_date, "end_date")?;

    // The NFT's current owner decides whether the deposit has been made.
    let nft_owner = node
        .read_dictionary(state_root, &collection_ref, "token_owners", &nft_index.to_string())
        .await
        .ok()
        .and_then(ReadOutcome::into_option)
        .map(|value| parsed_string(&value));
    let deposited = nft_owner.as_deref().is_some_and(|owner_key| super::same_hash(owner_key, contract_ref));

    let now_ms = chrono::Utc::now().timestamp_millis() as u64;

    let (claimed, winner, winner_account) = if now_ms > end_ms {
        let claimed = read_field_soft(node, state_root, contract_ref, "claimed").await.is_some();
        let winner = if claimed { None } else { read_field_soft(node, state_root, contract_ref, "winner").await };
        let winner_account = match &winner {
            Some(winner_value) => {
                node.read_dictionary(state_root, contract_ref, "partipiciant_dict", &dict_key_from(winner_value))
                    .await
                    .ok()
                    .and_then(ReadOutcome::into_option)
                    .map(|value| value.parsed)
            }
            None => None,
        };
        (claimed, winner, winner_account)
    } else {
        (false, None, None)
    };

    let status = derive_raffle_status(now_ms, start_ms, end_ms, deposited, claimed, winner.is_some());

    Ok(Raffle {
        contract: contract_ref.to_string(),
        owner: owner.parsed,
        name: name.parsed,
        collection: collection_ref,
        nft_index,
        start_date: start_ms,
        end_date: end_ms,
        price: price.parsed,
        nft_owner,
        claimed,
        winner: winner.map(|value| value.parsed),
        winner_account,
        status,
    })
}

/// Lists every raffle registered with the deployer contract, assembling all
/// children concurrently under one pinned state root. All-or-nothing: one
/// failed child aborts the whole list.
pub async fn fetch_raffles(node: &NodeClient, state_root: &str, deployer_ref: &str) -> EntityResult<Vec<Raffle>> {
    let refs = child_contract_refs(node, state_root, deployer_ref, "raffle_count", "raffles").await?;
    try_join_all(refs.iter().map(|child_ref| fetch_raffle(node, state_root, child_ref))).await
}
