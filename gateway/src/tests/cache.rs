use std::time::Duration;

use rstest::rstest;
use serde_json::json;

use crate::cache::{tags, Ttl};
use crate::tests::common::test_cache;

#[rstest]
#[tokio::test]
async fn set_then_get_round_trips() {
    let cache = test_cache(Duration::from_secs(60));
    let key = format!("{}hash-aa", tags::TOKEN);

    cache.set(&key, json!({ "symbol": "DRG" }), Ttl::Long).await;

    assert_eq!(cache.get(&key).await, Some(json!({ "symbol": "DRG" })));
}

#[rstest]
#[tokio::test]
async fn missing_key_is_a_miss() {
    let cache = test_cache(Duration::from_secs(60));

    assert_eq!(cache.get("nope").await, None);
}

#[rstest]
#[tokio::test]
async fn expired_entries_are_never_served() {
    let cache = test_cache(Duration::from_millis(40));
    cache.set("raffle-x", json!(1), Ttl::Short).await;

    tokio::time::sleep(Duration::from_millis(80)).await;

    assert_eq!(cache.get("raffle-x").await, None);
}

#[rstest]
#[tokio::test]
async fn ttl_classes_expire_independently() {
    let cache = test_cache(Duration::from_millis(40));
    cache.set("short-lived", json!(1), Ttl::Short).await;
    cache.set("long-lived", json!(2), Ttl::Long).await;

    tokio::time::sleep(Duration::from_millis(80)).await;

    assert_eq!(cache.get("short-lived").await, None);
    assert_eq!(cache.get("long-lived").await, Some(json!(2)));
}

#[rstest]
#[tokio::test]
async fn flush_all_drops_every_entry() {
    let cache = test_cache(Duration::from_secs(60));
    cache.set("a", json!(1), Ttl::Long).await;
    cache.set("b", json!(2), Ttl::Short).await;

    cache.flush_all().await;

    assert_eq!(cache.get("a").await, None);
    assert_eq!(cache.get("b").await, None);
}

#[rstest]
#[tokio::test]
async fn set_overwrites_and_refreshes_the_deadline() {
    let cache = test_cache(Duration::from_millis(40));
    cache.set("k", json!("old"), Ttl::Short).await;

    tokio::time::sleep(Duration::from_millis(25)).await;
    cache.set("k", json!("new"), Ttl::Short).await;
    tokio::time::sleep(Duration::from_millis(25)).await;

    // 50ms after the first set, but only 25ms after the overwrite.
    assert_eq!(cache.get("k").await, Some(json!("new")));
}
