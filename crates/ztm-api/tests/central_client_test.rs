#![allow(clippy::unwrap_used)]
// Integration tests for `CentralClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ztm_api::{CentralClient, Error, Member, MemberConfig, TransportConfig};

const NWID: &str = "8056c2e21c000001";
const NODE: &str = "0123456789";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CentralClient) {
    let server = MockServer::start().await;
    let client = CentralClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn member_path() -> String {
    format!("/api/v1/network/{NWID}/member/{NODE}")
}

fn member_body() -> serde_json::Value {
    json!({
        "id": format!("{NWID}-{NODE}"),
        "networkId": NWID,
        "nodeId": NODE,
        "name": "laptop",
        "description": "Managed by ztm",
        "hidden": false,
        "offlineNotifyDelay": 0,
        "lastOnline": 0,
        "config": {
            "authorized": true,
            "activeBridge": false,
            "noAutoAssignIps": false,
            "capabilities": [],
            "tags": [[1000, 2]],
            "ipAssignments": ["10.147.17.5"]
        }
    })
}

fn desired() -> Member {
    Member {
        network_id: NWID.into(),
        node_id: NODE.into(),
        name: "laptop".into(),
        description: "Managed by ztm".into(),
        config: MemberConfig {
            tags: vec![(1000, 2)],
            ip_assignments: vec!["10.147.17.5".into()],
            ..MemberConfig::default()
        },
        ..Member::default()
    }
}

// ── Member reads ────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_member() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(member_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(member_body()))
        .mount(&server)
        .await;

    let member = client.get_member(NWID, NODE).await.unwrap().unwrap();

    assert_eq!(member.id, format!("{NWID}-{NODE}"));
    assert_eq!(member.name, "laptop");
    assert_eq!(member.config.tags, vec![(1000, 2)]);
    assert_eq!(member.config.ip_assignments, vec!["10.147.17.5".to_owned()]);
}

#[tokio::test]
async fn test_get_member_missing_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(member_path()))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .mount(&server)
        .await;

    let member = client.get_member(NWID, NODE).await.unwrap();
    assert!(member.is_none());
}

#[tokio::test]
async fn test_member_exists() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(member_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(member_body()))
        .mount(&server)
        .await;

    assert!(client.member_exists(NWID, NODE).await.unwrap());
    assert!(!client.member_exists(NWID, "ffffffffff").await.unwrap());
}

// ── Member writes ───────────────────────────────────────────────────

#[tokio::test]
async fn test_create_member_posts_camel_case_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(member_path()))
        .and(body_partial_json(json!({
            "networkId": NWID,
            "nodeId": NODE,
            "config": { "tags": [[1000, 2]], "activeBridge": false }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(member_body()))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_member(&desired()).await.unwrap();
    assert_eq!(created.id, format!("{NWID}-{NODE}"));
}

#[tokio::test]
async fn test_update_member_validation_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(member_path()))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "invalid ipAssignments"})),
        )
        .mount(&server)
        .await;

    let result = client.update_member(&desired()).await;
    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "invalid ipAssignments");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_member() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(member_path()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_member(&desired()).await.unwrap();
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(member_path()))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.member_exists(NWID, NODE).await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_rate_limited_reads_retry_after() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(member_path()))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "12"))
        .mount(&server)
        .await;

    let result = client.delete_member(&desired()).await;
    assert!(
        matches!(result, Err(Error::RateLimited { retry_after_secs: 12 })),
        "expected RateLimited, got: {result:?}"
    );
}

#[tokio::test]
async fn test_token_header_is_sent() {
    let server = MockServer::start().await;
    let token = SecretString::from("s3cr3t".to_owned());
    let client = CentralClient::new(&server.uri(), &token, &TransportConfig::default()).unwrap();

    Mock::given(method("GET"))
        .and(path(member_path()))
        .and(header("Authorization", "token s3cr3t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(member_body()))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.get_member(NWID, NODE).await.unwrap().is_some());
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(member_path()))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.get_member(NWID, NODE).await;
    match result {
        Err(Error::Deserialization { body, .. }) => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
