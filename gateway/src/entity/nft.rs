use serde::{Deserialize, Serialize};

use super::{parsed_string, require, EntityResult};
use crate::client::node::{NodeClient, ReadOutcome};

/// One NFT, addressed by collection and dense mint index. A burnt token is
/// reported as such and carries no metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nft {
    pub burnt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// The burnt check comes first: if `burnt_tokens[index]` exists no further
/// reads are issued at all.
pub async fn fetch_nft(node: &NodeClient, state_root: &str, collection_ref: &str, index: u64) -> EntityResult<Nft> {
    let item_key = index.to_string();

    match node.read_dictionary(state_root, collection_ref, "burnt_tokens", &item_key).await? {
        ReadOutcome::Found(_) => Ok(Nft { burnt: true, metadata: None, owner: None }),
        ReadOutcome::NotFound => {
            let (metadata, owner) = futures::try_join!(
                node.read_dictionary(state_root, collection_ref, "metadata_raw", &item_key),
                node.read_dictionary(state_root, collection_ref, "token_owners", &item_key),
            )?;
            let metadata = require(metadata, "metadata_raw")?;
            let owner = require(owner, "token_owners")?;
            Ok(Nft { burnt: false, metadata: Some(metadata.parsed), owner: Some(parsed_string(&owner)) })
        }
    }
}
