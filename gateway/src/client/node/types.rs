use serde::{Deserialize, Serialize};

/// A decoded CL value as returned by the node: the type descriptor, the raw
/// little-endian serialized bytes as hex, and the node's own parsed rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClValue {
    pub cl_type: serde_json::Value,
    pub bytes: String,
    pub parsed: serde_json::Value,
}

/// One entry of a contract's or account's named-key table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedKey {
    pub name: String,
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractData {
    #[serde(default)]
    pub named_keys: Vec<NamedKey>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountData {
    pub account_hash: String,
    #[serde(default)]
    pub named_keys: Vec<NamedKey>,
    pub main_purse: String,
}

/// The subset of stored-value variants this gateway reads.
#[derive(Debug, Clone, Deserialize)]
pub enum StoredValue {
    CLValue(ClValue),
    Contract(ContractData),
    Account(AccountData),
}

#[derive(Debug, Deserialize)]
pub(super) struct StateItemResult {
    pub stored_value: StoredValue,
}

#[derive(Debug, Deserialize)]
pub(super) struct DictionaryItemResult {
    pub stored_value: StoredValue,
}

#[derive(Debug, Deserialize)]
pub(super) struct StateRootHashResult {
    pub state_root_hash: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct BalanceResult {
    pub balance_value: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct PutDeployResult {
    pub deploy_hash: String,
}

/// The auction snapshot returned by `state_get_auction_info`. Bids are kept
/// as raw JSON; the validator assembler only inspects the `inactive` flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionState {
    pub era_validators: serde_json::Value,
    #[serde(default)]
    pub bids: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuctionInfoResult {
    pub auction_state: AuctionState,
}
