//! List aggregation: a counter read followed by N concurrent dictionary
//! reads, each yielding a child contract reference.

use futures::future::try_join_all;

use super::{parsed_u64, require, EntityResult};
use crate::client::node::NodeClient;
use crate::decode::contract_ref_from_wire;

/// Resolves every child contract reference registered under `parent_ref`.
/// Dictionary entries hold the child's 32-byte little-endian hash. Results
/// come back in index order; one failed read aborts the whole list.
pub(crate) async fn child_contract_refs(
    node: &NodeClient,
    state_root: &str,
    parent_ref: &str,
    counter_field: &str,
    children_dict: &str,
) -> EntityResult<Vec<String>> {
    let counter = require(node.read_field(state_root, parent_ref, &[counter_field]).await?, counter_field)?;
    let count = parsed_u64(&counter, counter_field)?;

    try_join_all((0..count).map(|index| async move {
        let entry =
            require(node.read_dictionary(state_root, parent_ref, children_dict, &index.to_string()).await?, children_dict)?;
        Ok(contract_ref_from_wire(&entry.bytes)?)
    }))
    .await
}
