use serde::{Deserialize, Serialize};

use super::{parsed_u64, require, EntityResult};
use crate::client::node::NodeClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marketplace {
    pub contract_name: serde_json::Value,
    pub listing_count: u64,
}

pub async fn fetch_marketplace(node: &NodeClient, state_root: &str, contract_ref: &str) -> EntityResult<Marketplace> {
    let contract_name =
        require(node.read_field(state_root, contract_ref, &["contract_name"]).await?, "contract_name")?;
    let listing_counter =
        require(node.read_field(state_root, contract_ref, &["listing_counter"]).await?, "listing_counter")?;

    Ok(Marketplace {
        contract_name: contract_name.parsed,
        listing_count: parsed_u64(&listing_counter, "listing_counter")?,
    })
}
