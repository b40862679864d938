//! Entity assemblers: each one turns a contract reference into a structured
//! record by issuing a fixed, ordered sequence of state reads against a
//! single pinned state root.
//!
//! Unconditional reads that come back absent fail the whole entity; reads
//! that feed status inference fail soft into an explicit absent marker.
//! Partial entities are never returned.

pub mod collection;
pub mod fanout;
pub mod lootbox;
pub mod marketplace;
pub mod nft;
pub mod raffle;
pub mod staking;
pub mod token;
pub mod validators;
pub mod vesting;

use thiserror::Error;

use crate::client::node::types::ClValue;
use crate::client::node::{NodeClientError, ReadOutcome};
use crate::decode::DecodeError;

#[derive(Debug, Error)]
pub enum EntityError {
    /// An unconditional read found nothing on-chain.
    #[error("required field `{0}` is missing on-chain")]
    MissingField(String),

    #[error("unexpected value shape for `{field}`: {reason}")]
    UnexpectedValue { field: String, reason: String },

    #[error(transparent)]
    Node(#[from] NodeClientError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

pub type EntityResult<T> = Result<T, EntityError>;

/// Promotes absence on an unconditional read to a hard entity failure.
pub(crate) fn require(outcome: ReadOutcome<ClValue>, field: &str) -> EntityResult<ClValue> {
    match outcome {
        ReadOutcome::Found(value) => Ok(value),
        ReadOutcome::NotFound => Err(EntityError::MissingField(field.to_string())),
    }
}

/// Extracts an unsigned counter from a parsed CL value. The node renders
/// small ints as JSON numbers and U256/U512 as decimal strings.
pub(crate) fn parsed_u64(value: &ClValue, field: &str) -> EntityResult<u64> {
    match &value.parsed {
        serde_json::Value::Number(n) => {
            n.as_u64().ok_or_else(|| EntityError::UnexpectedValue {
                field: field.to_string(),
                reason: "number is negative or fractional".into(),
            })
        }
        serde_json::Value::String(s) => s.parse().map_err(|_| EntityError::UnexpectedValue {
            field: field.to_string(),
            reason: format!("`{s}` is not an unsigned integer"),
        }),
        other => Err(EntityError::UnexpectedValue {
            field: field.to_string(),
            reason: format!("expected number or numeric string, got {other}"),
        }),
    }
}

/// Renders a parsed CL value as a plain string, falling back to the raw
/// wire bytes for key-typed values the node does not stringify.
pub(crate) fn parsed_string(value: &ClValue) -> String {
    match &value.parsed {
        serde_json::Value::String(s) => s.clone(),
        _ => value.bytes.clone(),
    }
}

/// Compares two key renderings by their 64-char hex payload, ignoring
/// `hash-` / `account-hash-` / `contract-` prefixes.
pub(crate) fn same_hash(a: &str, b: &str) -> bool {
    fn payload(s: &str) -> &str {
        s.rsplit('-').next().unwrap_or(s)
    }
    payload(a).eq_ignore_ascii_case(payload(b))
}
