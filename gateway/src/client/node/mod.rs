//! JSON-RPC client for the Casper node. This is the only component that
//! talks to the chain; everything above it works in terms of [`ReadOutcome`].

pub mod types;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::types::params::NodeParams;
use types::{
    AccountData, AuctionInfoResult, AuctionState, BalanceResult, ClValue, ContractData, DictionaryItemResult,
    PutDeployResult, StateItemResult, StateRootHashResult, StoredValue,
};

/// RPC error code the node uses for global-state queries that hit a key
/// which was never written. Mapped to [`ReadOutcome::NotFound`]; every other
/// error is a hard failure.
const VALUE_NOT_FOUND_CODE: i64 = -32003;

#[derive(Debug, Error)]
pub enum NodeClientError {
    #[error("transport error during {operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("node rejected {operation} (code {code}): {message}")]
    Rpc { operation: &'static str, code: i64, message: String },

    #[error("malformed response for {operation}: {reason}")]
    MalformedResponse { operation: &'static str, reason: String },
}

/// Three-way outcome of a single state read. Absence is a first-class signal
/// consumed by status inference, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<T> {
    Found(T),
    NotFound,
}

impl<T> ReadOutcome<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            ReadOutcome::Found(value) => Some(value),
            ReadOutcome::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ReadOutcome::Found(_))
    }
}

#[derive(Serialize)]
struct RpcRequest<'a, P: Serialize> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

/// Async Casper JSON-RPC client. No retries, no backoff; a request timeout
/// is carried by the underlying `reqwest` client so no call blocks forever.
#[derive(Debug, Clone)]
pub struct NodeClient {
    http: reqwest::Client,
    rpc_url: Url,
}

impl NodeClient {
    pub fn new(params: &NodeParams) -> Result<Self, NodeClientError> {
        let http = reqwest::Client::builder()
            .timeout(params.request_timeout)
            .build()
            .map_err(|source| NodeClientError::Transport { operation: "client_init", source })?;
        Ok(Self { http, rpc_url: params.rpc_url.clone() })
    }

    async fn call<P, T>(&self, operation: &'static str, method: &str, params: P) -> Result<T, NodeClientError>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let request = RpcRequest { jsonrpc: "2.0", id: 0, method, params };
        let response = self
            .http
            .post(self.rpc_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|source| NodeClientError::Transport { operation, source })?;

        let body: RpcResponse<T> =
            response.json().await.map_err(|source| NodeClientError::Transport { operation, source })?;

        if let Some(error) = body.error {
            return Err(NodeClientError::Rpc { operation, code: error.code, message: error.message });
        }
        body.result.ok_or(NodeClientError::MalformedResponse { operation, reason: "neither result nor error".into() })
    }

    /// Same as [`Self::call`] but folds the node's value-not-found failure
    /// into [`ReadOutcome::NotFound`].
    async fn call_read<P, T>(
        &self,
        operation: &'static str,
        method: &str,
        params: P,
    ) -> Result<ReadOutcome<T>, NodeClientError>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        match self.call(operation, method, params).await {
            Ok(result) => Ok(ReadOutcome::Found(result)),
            Err(NodeClientError::Rpc { code: VALUE_NOT_FOUND_CODE, .. }) => Ok(ReadOutcome::NotFound),
            Err(other) => Err(other),
        }
    }

    /// Fetches the current state root. Callers pin one root per top-level
    /// aggregation and pass it to every dependent read.
    pub async fn state_root_hash(&self) -> Result<String, NodeClientError> {
        let result: StateRootHashResult =
            self.call("state_root_hash", "chain_get_state_root_hash", json!({})).await?;
        Ok(result.state_root_hash)
    }

    /// Reads a named field from a contract's storage under the given root.
    pub async fn read_field(
        &self,
        state_root: &str,
        contract_ref: &str,
        path: &[&str],
    ) -> Result<ReadOutcome<ClValue>, NodeClientError> {
        debug!(contract = contract_ref, ?path, "reading contract field");
        let outcome: ReadOutcome<StateItemResult> = self
            .call_read(
                "read_field",
                "state_get_item",
                json!({ "state_root_hash": state_root, "key": contract_ref, "path": path }),
            )
            .await?;
        expect_cl_value(outcome, "read_field")
    }

    /// Reads one dictionary entry via the contract's named dictionary.
    pub async fn read_dictionary(
        &self,
        state_root: &str,
        contract_ref: &str,
        dictionary_name: &str,
        item_key: &str,
    ) -> Result<ReadOutcome<ClValue>, NodeClientError> {
        debug!(contract = contract_ref, dictionary = dictionary_name, key = item_key, "reading dictionary entry");
        let outcome: ReadOutcome<DictionaryItemResult> = self
            .call_read(
                "read_dictionary",
                "state_get_dictionary_item",
                json!({
                    "state_root_hash": state_root,
                    "dictionary_identifier": {
                        "ContractNamedKey": {
                            "key": contract_ref,
                            "dictionary_name": dictionary_name,
                            "dictionary_item_key": item_key,
                        }
                    }
                }),
            )
            .await?;
        expect_cl_value(outcome, "read_dictionary")
    }

    /// Fetches a contract's named-key table (raw block state for the key).
    pub async fn contract_named_keys(
        &self,
        state_root: &str,
        contract_ref: &str,
    ) -> Result<ReadOutcome<ContractData>, NodeClientError> {
        let outcome: ReadOutcome<StateItemResult> = self
            .call_read(
                "contract_named_keys",
                "state_get_item",
                json!({ "state_root_hash": state_root, "key": contract_ref, "path": [] }),
            )
            .await?;
        match outcome {
            ReadOutcome::NotFound => Ok(ReadOutcome::NotFound),
            ReadOutcome::Found(StateItemResult { stored_value: StoredValue::Contract(contract) }) => {
                Ok(ReadOutcome::Found(contract))
            }
            ReadOutcome::Found(_) => Err(NodeClientError::MalformedResponse {
                operation: "contract_named_keys",
                reason: "stored value is not a contract".into(),
            }),
        }
    }

    /// Fetches an account's state (named keys, main purse) by account hash.
    pub async fn account_state(
        &self,
        state_root: &str,
        account_hash: &str,
    ) -> Result<ReadOutcome<AccountData>, NodeClientError> {
        let key = format!("account-hash-{}", account_hash.trim_start_matches("account-hash-"));
        let outcome: ReadOutcome<StateItemResult> = self
            .call_read(
                "account_state",
                "state_get_item",
                json!({ "state_root_hash": state_root, "key": key, "path": [] }),
            )
            .await?;
        match outcome {
            ReadOutcome::NotFound => Ok(ReadOutcome::NotFound),
            ReadOutcome::Found(StateItemResult { stored_value: StoredValue::Account(account) }) => {
                Ok(ReadOutcome::Found(account))
            }
            ReadOutcome::Found(_) => Err(NodeClientError::MalformedResponse {
                operation: "account_state",
                reason: "stored value is not an account".into(),
            }),
        }
    }

    /// Queries a purse balance in motes, returned as a decimal string.
    pub async fn purse_balance(&self, state_root: &str, purse_uref: &str) -> Result<String, NodeClientError> {
        let result: BalanceResult = self
            .call(
                "purse_balance",
                "state_get_balance",
                json!({ "state_root_hash": state_root, "purse_uref": purse_uref }),
            )
            .await?;
        Ok(result.balance_value)
    }

    /// Fetches the full auction snapshot (era validators plus bids).
    pub async fn auction_info(&self) -> Result<AuctionState, NodeClientError> {
        let result: AuctionInfoResult = self.call("auction_info", "state_get_auction_info", json!({})).await?;
        Ok(result.auction_state)
    }

    /// Relays a pre-signed deploy verbatim. The node's rejection reason, if
    /// any, is surfaced untouched; there is no retry.
    pub async fn put_deploy(&self, deploy: &serde_json::Value) -> Result<String, NodeClientError> {
        let result: PutDeployResult =
            self.call("put_deploy", "account_put_deploy", json!({ "deploy": deploy })).await?;
        Ok(result.deploy_hash)
    }
}

fn expect_cl_value<R>(outcome: ReadOutcome<R>, operation: &'static str) -> Result<ReadOutcome<ClValue>, NodeClientError>
where
    R: Into<StoredValueCarrier>,
{
    match outcome {
        ReadOutcome::NotFound => Ok(ReadOutcome::NotFound),
        ReadOutcome::Found(result) => match result.into().0 {
            StoredValue::CLValue(value) => Ok(ReadOutcome::Found(value)),
            _ => Err(NodeClientError::MalformedResponse { operation, reason: "stored value is not a CLValue".into() }),
        },
    }
}

pub(super) struct StoredValueCarrier(StoredValue);

impl From<StateItemResult> for StoredValueCarrier {
    fn from(result: StateItemResult) -> Self {
        Self(result.stored_value)
    }
}

impl From<DictionaryItemResult> for StoredValueCarrier {
    fn from(result: DictionaryItemResult) -> Self {
        Self(result.stored_value)
    }
}
