//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SolrClient {
    let uri = url::Url::parse(&server.uri()).unwrap();
    SolrClient::new(
        SolrClientConfig::builder()
            .host(uri.host_str().unwrap())
            .port(uri.port().unwrap())
            .credentials("user", "password")
            .max_retries(2)
            .backoff(Duration::from_millis(1), Duration::from_millis(10))
            .build(),
    )
}

#[test]
fn test_config_default() {
    let config = SolrClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 10);
    assert!(!config.use_tls);
}

#[test]
fn test_config_builder() {
    let config = SolrClientConfig::builder()
        .host("solr.example.com")
        .port(7512)
        .credentials("admin", "secret")
        .use_tls(true)
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .build();

    assert_eq!(config.host, "solr.example.com");
    assert_eq!(config.port, 7512);
    assert_eq!(config.username, "admin");
    assert_eq!(config.password, "secret");
    assert!(config.use_tls);
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
}

#[test]
fn test_base_url() {
    let client = SolrClient::connect("vc0330.example.com", 7512, "u", "p");
    assert_eq!(client.base_url(), "http://vc0330.example.com:7512/solr");

    let tls = SolrClient::new(
        SolrClientConfig::builder()
            .host("vc0330.example.com")
            .port(7512)
            .use_tls(true)
            .build(),
    );
    assert_eq!(tls.base_url(), "https://vc0330.example.com:7512/solr");
    assert_eq!(tls.api_url(9), "https://vc0330.example.com:7512/api/v9");
}

#[tokio::test]
async fn test_get_json_with_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/admin/cores"))
        .and(query_param("action", "STATUS"))
        .and(query_param("wt", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": {}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let url = format!("{}/solr/admin/cores", mock_server.uri());
    let params = vec![
        ("action".to_string(), "STATUS".to_string()),
        ("wt".to_string(), "json".to_string()),
    ];

    let body: serde_json::Value = client.get_json(&url, &params).await.unwrap();
    assert!(body["status"].is_object());
}

#[tokio::test]
async fn test_post_form_encodes_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/solr/nav_elements/select"))
        .and(body_string_contains("q=*%3A*"))
        .and(body_string_contains("wt=json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": {"numFound": 0, "docs": []}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let url = format!("{}/solr/nav_elements/select", mock_server.uri());
    let params = vec![
        ("q".to_string(), "*:*".to_string()),
        ("wt".to_string(), "json".to_string()),
    ];

    let body: serde_json::Value = client.post_json(&url, &params).await.unwrap();
    assert_eq!(body["response"]["numFound"], 0);
}

#[tokio::test]
async fn test_get_retries_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/solr/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let url = format!("{}/solr/flaky", mock_server.uri());

    let body: serde_json::Value = client.get_json(&url, &Vec::new()).await.unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_get_surfaces_error_after_retries_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let url = format!("{}/solr/down", mock_server.uri());

    let err = client.get(&url, &Vec::new()).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_forbidden_carries_hint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/admin/cores"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let url = format!("{}/solr/admin/cores", mock_server.uri());

    let err = client.get(&url, &Vec::new()).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));
    assert!(err.to_string().contains("Dev Mode"));
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/solr/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such core"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let url = format!("{}/solr/missing", mock_server.uri());

    let err = client.get(&url, &Vec::new()).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
}
