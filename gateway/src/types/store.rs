use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A marketplace listing, persisted off-chain alongside its on-chain
/// counterpart. The chain remains the source of truth for price and
/// ownership; this record only carries display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub marketplace: String,
    pub collection_hash: String,
    pub price: u64,
    pub token_id: u64,
    pub nft_name: String,
    pub nft_description: String,
    pub nft_image: String,
    pub listing_index: u64,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

/// One vesting-recipient ledger entry, mirrored off-chain after a fan-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VestingRecipientRecord {
    pub v_index: u64,
    pub v_token: String,
    pub v_contract: String,
    pub recipient: String,
    pub allocation: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
