//! End-to-end route tests: a real listener on an OS-assigned port, a mocked
//! node behind it and a mocked store. Mock hit counts prove what the cache
//! did and did not re-read.

use httpmock::prelude::*;
use rstest::rstest;
use serde_json::{json, Value};

use crate::client::database::MockDatabaseClient;
use crate::tests::common::{
    cl_value, mock_deploy_accepted, mock_deploy_rejected, mock_field, mock_field_absent, mock_state_root, rpc_result,
    spawn_test_server, CONTRACT, STATE_ROOT,
};
use crate::types::store::{Listing, VestingRecipientRecord};

fn mock_token_fields(server: &MockServer) -> Vec<httpmock::Mock<'_>> {
    vec![
        mock_field(server, CONTRACT, "name", cl_value(json!("Dragon Coin"))),
        mock_field(server, CONTRACT, "symbol", cl_value(json!("DRG"))),
        mock_field(server, CONTRACT, "decimals", cl_value(json!(9))),
        mock_field(server, CONTRACT, "total_supply", cl_value(json!("1000000000"))),
        mock_field(server, CONTRACT, "balances", cl_value(json!("uref-0011-007"))),
        mock_field(server, CONTRACT, "enable_mint_burn", cl_value(json!(1))),
    ]
}

fn sample_listing() -> Listing {
    Listing {
        marketplace: "hash-market".to_string(),
        collection_hash: "hash-cc".to_string(),
        price: 5_000_000_000,
        token_id: 7,
        nft_name: "Dragon #7".to_string(),
        nft_description: "A dragon".to_string(),
        nft_image: "ipfs://dragon/7".to_string(),
        listing_index: 0,
        active: true,
        created_at: None,
    }
}

#[rstest]
#[tokio::test]
async fn health_endpoint_is_up() {
    let server = MockServer::start();
    let addr = spawn_test_server(&server, MockDatabaseClient::new()).await;

    let response = reqwest::get(format!("http://{addr}/health")).await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "UP");
}

#[rstest]
#[tokio::test]
async fn unknown_routes_fall_through_to_404() {
    let server = MockServer::start();
    let addr = spawn_test_server(&server, MockDatabaseClient::new()).await;

    let response = reqwest::get(format!("http://{addr}/nope")).await.unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[rstest]
#[tokio::test]
async fn state_root_hash_is_served_uncached() {
    let server = MockServer::start();
    let root_mock = mock_state_root(&server);
    let addr = spawn_test_server(&server, MockDatabaseClient::new()).await;

    let body: Value =
        reqwest::get(format!("http://{addr}/state-root-hash")).await.unwrap().json().await.unwrap();
    reqwest::get(format!("http://{addr}/state-root-hash")).await.unwrap();

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"], json!(STATE_ROOT));
    assert_eq!(root_mock.hits(), 2);
}

#[rstest]
#[tokio::test]
async fn second_token_read_is_served_from_the_cache() {
    let server = MockServer::start();
    let root_mock = mock_state_root(&server);
    let field_mocks = mock_token_fields(&server);
    let addr = spawn_test_server(&server, MockDatabaseClient::new()).await;
    let url = format!("http://{addr}/token?contract_hash={CONTRACT}");

    let first: Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
    let second: Value = reqwest::get(&url).await.unwrap().json().await.unwrap();

    assert_eq!(first["success"], json!(true));
    assert_eq!(first["data"]["symbol"], json!("DRG"));
    assert_eq!(first, second);
    assert_eq!(root_mock.hits(), 1);
    for mock in &field_mocks {
        assert_eq!(mock.hits(), 1);
    }
}

#[rstest]
#[tokio::test]
async fn collection_variants_cache_under_distinct_keys() {
    let server = MockServer::start();
    mock_state_root(&server);
    let base_mocks = vec![
        mock_field(&server, CONTRACT, "collection_name", cl_value(json!("Dragons"))),
        mock_field(&server, CONTRACT, "collection_symbol", cl_value(json!("DRGN"))),
        mock_field(&server, CONTRACT, "total_token_supply", cl_value(json!(10000))),
        mock_field(&server, CONTRACT, "number_of_minted_tokens", cl_value(json!(41))),
    ];
    mock_field(&server, CONTRACT, "json_schema", cl_value(json!("{}")));
    mock_field(&server, CONTRACT, "metadata_mutability", cl_value(json!(1)));
    mock_field(&server, CONTRACT, "minting_mode", cl_value(json!(0)));
    mock_field(&server, CONTRACT, "burn_mode", cl_value(json!(0)));
    let reporting_mock = mock_field(&server, CONTRACT, "reporting_mode", cl_value(json!(1)));
    let addr = spawn_test_server(&server, MockDatabaseClient::new()).await;

    let basic: Value = reqwest::get(format!("http://{addr}/collection?contract_hash={CONTRACT}"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let full: Value = reqwest::get(format!("http://{addr}/collection?contract_hash={CONTRACT}&full=true"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // The cached basic record must not be served for the full variant.
    assert_eq!(basic["data"].get("minting_mode"), None);
    assert_eq!(full["data"]["minting_mode"], json!(0));
    assert_eq!(reporting_mock.hits(), 1);
    for mock in &base_mocks {
        assert_eq!(mock.hits(), 2);
    }
}

#[rstest]
#[tokio::test]
async fn a_relayed_deploy_invalidates_every_cached_entity() {
    let server = MockServer::start();
    mock_state_root(&server);
    let field_mocks = mock_token_fields(&server);
    let deploy_mock = mock_deploy_accepted(&server, "deadbeef");
    let addr = spawn_test_server(&server, MockDatabaseClient::new()).await;
    let url = format!("http://{addr}/token?contract_hash={CONTRACT}");
    let client = reqwest::Client::new();

    reqwest::get(&url).await.unwrap();
    let relay: Value = client
        .post(format!("http://{addr}/deploy"))
        .json(&json!({ "header": {}, "approvals": [] }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    reqwest::get(&url).await.unwrap();

    assert_eq!(relay["data"]["deploy_hash"], json!("deadbeef"));
    deploy_mock.assert();
    // The write flushed the cache, so the second read hit the node again.
    for mock in &field_mocks {
        assert_eq!(mock.hits(), 2);
    }
}

#[rstest]
#[tokio::test]
async fn a_rejected_deploy_leaves_the_cache_alone() {
    let server = MockServer::start();
    mock_state_root(&server);
    let field_mocks = mock_token_fields(&server);
    mock_deploy_rejected(&server, -32008, "Invalid Deploy: invalid associated keys");
    let addr = spawn_test_server(&server, MockDatabaseClient::new()).await;
    let url = format!("http://{addr}/token?contract_hash={CONTRACT}");
    let client = reqwest::Client::new();

    reqwest::get(&url).await.unwrap();
    let response = client.post(format!("http://{addr}/deploy")).json(&json!({})).send().await.unwrap();
    let status = response.status().as_u16();
    let body: Value = response.json().await.unwrap();
    reqwest::get(&url).await.unwrap();

    assert_eq!(status, 400);
    assert_eq!(body["success"], json!(false));
    for mock in &field_mocks {
        assert_eq!(mock.hits(), 1);
    }
}

#[rstest]
#[tokio::test]
async fn a_missing_required_field_maps_to_404() {
    let server = MockServer::start();
    mock_state_root(&server);
    mock_field_absent(&server, CONTRACT, "name");
    let addr = spawn_test_server(&server, MockDatabaseClient::new()).await;

    let response = reqwest::get(format!("http://{addr}/token?contract_hash={CONTRACT}")).await.unwrap();
    let status = response.status().as_u16();
    let body: Value = response.json().await.unwrap();

    assert_eq!(status, 404);
    assert_eq!(body["success"], json!(false));
}

#[rstest]
#[tokio::test]
async fn named_keys_are_fetched_per_account() {
    let server = MockServer::start();
    mock_state_root(&server);
    let account_hash = "a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f90";
    server.mock(|when, then| {
        when.method(POST).json_body_partial(format!(
            r#"{{ "method": "state_get_item", "params": {{ "key": "account-hash-{account_hash}" }} }}"#
        ));
        then.status(200).json_body(rpc_result(json!({
            "stored_value": {
                "Account": {
                    "account_hash": format!("account-hash-{account_hash}"),
                    "named_keys": [{ "name": "purse", "key": "uref-0000-007" }],
                    "main_purse": "uref-0000-007",
                }
            },
            "merkle_proof": ""
        })));
    });
    let addr = spawn_test_server(&server, MockDatabaseClient::new()).await;

    let body: Value = reqwest::get(format!("http://{addr}/named-keys?account_hash={account_hash}"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"], json!([{ "name": "purse", "key": "uref-0000-007" }]));
}

#[rstest]
#[tokio::test]
async fn listings_round_trip_through_the_store() {
    let server = MockServer::start();
    let mut database = MockDatabaseClient::new();
    database.expect_create_listing().times(1).returning(|listing| {
        Ok(Listing { created_at: Some(chrono::Utc::now()), ..listing })
    });
    database
        .expect_get_listings()
        .withf(|marketplace| marketplace == "hash-market")
        .times(1)
        .returning(|_| Ok(vec![sample_listing()]));
    let addr = spawn_test_server(&server, database).await;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("http://{addr}/listings"))
        .json(&sample_listing())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let fetched: Value = reqwest::get(format!("http://{addr}/listings?marketplace=hash-market"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(created["success"], json!(true));
    assert_eq!(created["data"]["marketplace"], json!("hash-market"));
    assert!(created["data"]["created_at"].is_string());
    assert_eq!(fetched["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(fetched["data"][0]["nft_name"], json!("Dragon #7"));
}

#[rstest]
#[tokio::test]
async fn vesting_recipient_records_round_trip_through_the_store() {
    let server = MockServer::start();
    let record = VestingRecipientRecord {
        v_index: 0,
        v_token: "hash-token".to_string(),
        v_contract: "hash-vesting".to_string(),
        recipient: "account-hash-aa".to_string(),
        allocation: 10,
        created_at: None,
    };
    let mut database = MockDatabaseClient::new();
    database.expect_create_vesting_recipient().times(1).returning(|record| Ok(record));
    let stored = record.clone();
    database
        .expect_get_vesting_recipients()
        .withf(|contract| contract == "hash-vesting")
        .times(1)
        .returning(move |_| Ok(vec![stored.clone()]));
    let addr = spawn_test_server(&server, database).await;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("http://{addr}/vesting/recipients/records"))
        .json(&record)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let fetched: Value = reqwest::get(format!("http://{addr}/vesting/recipients/records?contract=hash-vesting"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(created["success"], json!(true));
    assert_eq!(created["data"]["recipient"], json!("account-hash-aa"));
    assert_eq!(fetched["data"][0]["allocation"], json!(10));
}
