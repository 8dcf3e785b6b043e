mod helpers;

use std::time::Duration;

use helpers::{TestHarness, RELEASE_TOPIC};
use meridian_server::ReleaseMessage;

#[tokio::test]
async fn release_message_forces_re_resolution() {
    let harness = TestHarness::new();
    harness.seed("app1", "default", "ns1", &[("k", "v")]);

    let first = harness.client.get("/configfiles/app1/default/ns1").await;
    assert_eq!(first.text(), "k=v\n");
    assert_eq!(harness.resolver.query_count(), 1);

    // upstream publishes a new release for the watched key
    harness.seed("app1", "default", "ns1", &[("k", "v2")]);
    harness
        .listener()
        .handle_message(&ReleaseMessage::new("app1+default+ns1"), RELEASE_TOPIC)
        .await;

    let second = harness.client.get("/configfiles/app1/default/ns1").await;
    assert_eq!(second.text(), "k=v2\n");
    assert_eq!(harness.resolver.query_count(), 2);
}

#[tokio::test]
async fn unrelated_release_keeps_entry_cached() {
    let harness = TestHarness::new();
    harness.seed("app1", "default", "ns1", &[("k", "v")]);

    harness.client.get("/configfiles/app1/default/ns1").await;
    harness
        .listener()
        .handle_message(&ReleaseMessage::new("app2+default+ns1"), RELEASE_TOPIC)
        .await;

    harness.client.get("/configfiles/app1/default/ns1").await;
    assert_eq!(harness.resolver.query_count(), 1);
}

#[tokio::test]
async fn foreign_channel_is_ignored() {
    let harness = TestHarness::new();
    harness.seed("app1", "default", "ns1", &[("k", "v")]);

    harness.client.get("/configfiles/app1/default/ns1").await;
    harness
        .listener()
        .handle_message(&ReleaseMessage::new("app1+default+ns1"), "other-topic")
        .await;

    harness.client.get("/configfiles/app1/default/ns1").await;
    assert_eq!(harness.resolver.query_count(), 1);
}

#[tokio::test]
async fn watch_index_is_empty_after_invalidation() {
    let harness = TestHarness::new();
    harness.seed("app1", "default", "ns1", &[("k", "v")]);

    harness.client.get("/configfiles/app1/default/ns1").await;
    assert_eq!(harness.watch_index.cache_key_count(), 1);

    harness
        .listener()
        .handle_message(&ReleaseMessage::new("app1+default+ns1"), RELEASE_TOPIC)
        .await;

    assert_eq!(harness.watch_index.cache_key_count(), 0);
    assert_eq!(harness.watch_index.watched_key_count(), 0);
}

#[tokio::test]
async fn default_cluster_release_invalidates_custom_cluster_entry() {
    let harness = TestHarness::new();
    harness.seed("app1", "shadow-qa", "ns1", &[("k", "v")]);

    harness.client.get("/configfiles/app1/shadow-qa/ns1").await;
    assert_eq!(harness.resolver.query_count(), 1);

    // the entry watches its own cluster and the default-cluster fallback
    harness
        .listener()
        .handle_message(&ReleaseMessage::new("app1+default+ns1"), RELEASE_TOPIC)
        .await;

    harness.client.get("/configfiles/app1/shadow-qa/ns1").await;
    assert_eq!(harness.resolver.query_count(), 2);
}

#[tokio::test]
async fn all_renderings_invalidated_together() {
    let harness = TestHarness::new();
    harness.seed("app1", "default", "ns1", &[("k", "v")]);

    harness.client.get("/configfiles/app1/default/ns1").await;
    harness.client.get("/configfiles/json/app1/default/ns1").await;
    assert_eq!(harness.resolver.query_count(), 2);

    harness
        .listener()
        .handle_message(&ReleaseMessage::new("app1+default+ns1"), RELEASE_TOPIC)
        .await;

    harness.client.get("/configfiles/app1/default/ns1").await;
    harness.client.get("/configfiles/json/app1/default/ns1").await;
    assert_eq!(harness.resolver.query_count(), 4);
}

#[tokio::test]
async fn bus_delivery_reaches_the_spawned_listener() {
    let harness = TestHarness::new();
    harness.seed("app1", "default", "ns1", &[("k", "v")]);

    let handle = harness.listener().spawn(&harness.bus);

    harness.client.get("/configfiles/app1/default/ns1").await;
    assert_eq!(harness.resolver.query_count(), 1);

    let delivered = harness
        .bus
        .publish(RELEASE_TOPIC, ReleaseMessage::new("app1+default+ns1"));
    assert_eq!(delivered, 1);

    // the listener task runs independently; wait for it to drain the delivery
    let mut invalidated = false;
    for _ in 0..200 {
        harness.client.get("/configfiles/app1/default/ns1").await;
        if harness.resolver.query_count() > 1 {
            invalidated = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(invalidated, "release message never invalidated the entry");

    handle.abort();
}
