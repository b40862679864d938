use super::EntityResult;
use crate::client::node::NodeClient;

/// Active validator bids from the auction snapshot. Bids flagged inactive
/// are dropped; the rest pass through untouched.
pub async fn fetch_validators(node: &NodeClient) -> EntityResult<Vec<serde_json::Value>> {
    let auction = node.auction_info().await?;
    Ok(auction
        .bids
        .into_iter()
        .filter(|bid| !bid.pointer("/bid/inactive").and_then(serde_json::Value::as_bool).unwrap_or(false))
        .collect())
}
