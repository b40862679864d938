//! Shared fixtures: an httpmock-backed node speaking the JSON-RPC bodies
//! the client sends, plus builders for isolated configs and in-process
//! servers. Each test gets its own mock node and its own cache.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};
use url::Url;

use crate::cache::EntityCache;
use crate::client::database::MockDatabaseClient;
use crate::client::node::NodeClient;
use crate::config::Config;
use crate::server::setup_server;
use crate::types::params::{CacheParams, NodeParams, ServerParams};

pub const STATE_ROOT: &str = "99d5a2d71af4561682a2b84bd9b4627ff18f2b4fd43f75e09fa4db31c00cbb9f";
pub const CONTRACT: &str = "hash-2f3a81ec4746a5a70b795f4e1c2a3dd9ab84aef31f1a8a4e2f3f67eb5a9d9c01";

pub fn test_node(server: &MockServer) -> NodeClient {
    let params =
        NodeParams { rpc_url: Url::parse(&server.base_url()).unwrap(), request_timeout: Duration::from_secs(5) };
    NodeClient::new(&params).unwrap()
}

pub fn test_cache(ttl_short: Duration) -> EntityCache {
    EntityCache::new(&CacheParams { ttl_long: Duration::from_secs(60), ttl_short })
}

/// Binds the full router on an OS-assigned port against the mock node.
pub async fn spawn_test_server(server: &MockServer, database: MockDatabaseClient) -> SocketAddr {
    let config = Arc::new(Config::new(
        test_node(server),
        test_cache(Duration::from_secs(60)),
        Box::new(database),
        ServerParams { host: "127.0.0.1".to_string(), port: 0 },
    ));
    setup_server(config).await.unwrap()
}

pub fn rpc_result(result: Value) -> Value {
    json!({ "jsonrpc": "2.0", "id": 0, "result": result })
}

pub fn rpc_error(code: i64, message: &str) -> Value {
    json!({ "jsonrpc": "2.0", "id": 0, "error": { "code": code, "message": message } })
}

/// The node's value-not-found failure, which the client folds into absence.
pub fn rpc_value_not_found() -> Value {
    rpc_error(-32003, "state query failed: ValueNotFound")
}

pub fn cl_value(parsed: Value) -> Value {
    json!({ "cl_type": "Any", "bytes": "", "parsed": parsed })
}

pub fn cl_value_with_bytes(bytes: &str, parsed: Value) -> Value {
    json!({ "cl_type": "Any", "bytes": bytes, "parsed": parsed })
}

pub fn mock_state_root(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(POST).json_body_partial(r#"{ "method": "chain_get_state_root_hash" }"#);
        then.status(200).json_body(rpc_result(json!({ "state_root_hash": STATE_ROOT })));
    })
}

pub fn mock_field<'a>(server: &'a MockServer, contract: &str, field: &str, value: Value) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(POST).json_body_partial(format!(
            r#"{{ "method": "state_get_item", "params": {{ "key": "{contract}", "path": ["{field}"] }} }}"#
        ));
        then.status(200).json_body(rpc_result(json!({ "stored_value": { "CLValue": value }, "merkle_proof": "" })));
    })
}

pub fn mock_field_absent<'a>(server: &'a MockServer, contract: &str, field: &str) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(POST).json_body_partial(format!(
            r#"{{ "method": "state_get_item", "params": {{ "key": "{contract}", "path": ["{field}"] }} }}"#
        ));
        then.status(200).json_body(rpc_value_not_found());
    })
}

pub fn mock_dict<'a>(
    server: &'a MockServer,
    contract: &str,
    dictionary: &str,
    item_key: &str,
    value: Value,
) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(POST).json_body_partial(format!(
            r#"{{ "method": "state_get_dictionary_item", "params": {{ "dictionary_identifier": {{ "ContractNamedKey": {{ "key": "{contract}", "dictionary_name": "{dictionary}", "dictionary_item_key": "{item_key}" }} }} }} }}"#
        ));
        then.status(200).json_body(rpc_result(json!({ "stored_value": { "CLValue": value }, "merkle_proof": "" })));
    })
}

pub fn mock_dict_absent<'a>(server: &'a MockServer, contract: &str, dictionary: &str, item_key: &str) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(POST).json_body_partial(format!(
            r#"{{ "method": "state_get_dictionary_item", "params": {{ "dictionary_identifier": {{ "ContractNamedKey": {{ "key": "{contract}", "dictionary_name": "{dictionary}", "dictionary_item_key": "{item_key}" }} }} }} }}"#
        ));
        then.status(200).json_body(rpc_value_not_found());
    })
}

pub fn mock_deploy_accepted<'a>(server: &'a MockServer, deploy_hash: &str) -> Mock<'a> {
    let body = rpc_result(json!({ "deploy_hash": deploy_hash }));
    server.mock(|when, then| {
        when.method(POST).json_body_partial(r#"{ "method": "account_put_deploy" }"#);
        then.status(200).json_body(body);
    })
}

pub fn mock_deploy_rejected<'a>(server: &'a MockServer, code: i64, message: &str) -> Mock<'a> {
    let body = rpc_error(code, message);
    server.mock(|when, then| {
        when.method(POST).json_body_partial(r#"{ "method": "account_put_deploy" }"#);
        then.status(200).json_body(body);
    })
}
