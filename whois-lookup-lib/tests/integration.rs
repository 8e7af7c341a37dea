// whois-lookup-lib/tests/integration.rs

//! Integration tests for the upstream client and session against a mock server

use serde_json::json;
use std::time::Duration;
use whois_lookup_lib::{
    DisplayMode, LookupConfig, LookupError, LookupSession, Phase, SubmitOutcome, WhoisSource,
    WhoisXmlClient, PLACEHOLDER,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOOKUP_PATH: &str = "/whoisserver/WhoisService";

async fn setup() -> (MockServer, WhoisXmlClient) {
    let server = MockServer::start().await;
    let config = LookupConfig::default()
        .with_endpoint(format!("{}{}", server.uri(), LOOKUP_PATH))
        .with_api_key("test-key")
        .with_timeout(Duration::from_secs(2));
    let client = WhoisXmlClient::new(&config).unwrap();
    (server, client)
}

fn full_record() -> serde_json::Value {
    json!({
        "WhoisRecord": {
            "domainName": "example.com",
            "registrarName": "RESERVED-Internet Assigned Numbers Authority",
            "createdDate": "1995-08-14T04:00:00Z",
            "expiresDate": "2025-08-13T04:00:00Z",
            "estimatedDomainAge": 29,
            "nameServers": { "hostNames": ["A.IANA-SERVERS.NET", "B.IANA-SERVERS.NET"] },
            "registrant": { "name": "Internet Assigned Numbers Authority" },
            "technicalContact": { "name": "NA" },
            "administrativeContact": { "name": "NA" },
            "contactEmail": "hostmaster@iana.org"
        }
    })
}

#[tokio::test]
async fn test_request_carries_query_parameters() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(LOOKUP_PATH))
        .and(query_param("domainName", "example.com"))
        .and(query_param("apiKey", "test-key"))
        .and(query_param("outputFormat", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_record()))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client.fetch("example.com").await.unwrap();
    assert!(payload.get("WhoisRecord").is_some());
}

#[tokio::test]
async fn test_full_record_renders_both_tables() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_record()))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = LookupSession::new(client);
    session.set_input("example.com");
    assert_eq!(session.submit().await, SubmitOutcome::Found);

    let view = session.view();
    let tables = view.tables();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].title, "Domain Info");
    assert_eq!(tables[0].rows[0].1, "example.com");
    assert_eq!(tables[0].rows[4].1, "29 years");
    assert_eq!(tables[0].rows[5].1, "A.IANA-SERVERS.NET, B.IAN...");
    assert_eq!(tables[1].title, "Contact Info");
    assert_eq!(tables[1].rows[3].1, "hostmaster@iana.org");
}

#[tokio::test]
async fn test_record_without_fields_uses_placeholders() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(LOOKUP_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "WhoisRecord": { "domainName": "sparse.org" } })),
        )
        .mount(&server)
        .await;

    let mut session = LookupSession::new(client);
    session.set_input("sparse.org");
    session.submit().await;

    let record = session.state().record.clone().unwrap();
    assert_eq!(record.domain.domain_name, "sparse.org");
    assert_eq!(record.domain.registrar_name, PLACEHOLDER);
    assert_eq!(record.contact.contact_email, PLACEHOLDER);
}

#[tokio::test]
async fn test_missing_whois_record_shows_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let mut session = LookupSession::new(client);
    session.set_input("bogus-domain-xyz");
    assert_eq!(session.submit().await, SubmitOutcome::Failed);
    assert!(session.view().is_error());
    assert!(session.view().tables().is_empty());
}

#[tokio::test]
async fn test_server_error_is_http_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let err = client.fetch("example.com").await.unwrap_err();
    assert!(matches!(err, LookupError::HttpStatus { status_code: 503, .. }));
    assert!(err.shows_no_records_banner());
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.fetch("example.com").await.unwrap_err();
    assert!(matches!(err, LookupError::Parse { .. }));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let server = MockServer::start().await;
    let config = LookupConfig::default()
        .with_endpoint(format!("{}{}", server.uri(), LOOKUP_PATH))
        .with_api_key("test-key")
        .with_timeout(Duration::from_millis(200));
    let client = WhoisXmlClient::new(&config).unwrap();

    Mock::given(method("GET"))
        .and(path(LOOKUP_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(full_record())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = client.fetch("example.com").await.unwrap_err();
    assert!(matches!(err, LookupError::Timeout { .. }));
}

#[tokio::test]
async fn test_failure_clears_previous_record() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(query_param("domainName", "example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_record()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("domainName", "bogus-domain-xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let mut session = LookupSession::new(client);
    session.set_input("example.com");
    session.submit().await;
    assert_eq!(session.phase(), Phase::Displayed(DisplayMode::Both));

    session.set_input("bogus-domain-xyz");
    session.submit().await;
    assert_eq!(session.phase(), Phase::Error);
    assert!(session.state().record.is_none());
}

#[tokio::test]
async fn test_mode_switch_sends_no_request() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(LOOKUP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_record()))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = LookupSession::new(client);
    session.set_input("example.com");
    session.submit().await;

    session.set_mode(DisplayMode::Contact);
    let titles: Vec<_> = session.view().tables().iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["Contact Info"]);
    // expect(1) is verified when the server drops
}

#[tokio::test]
async fn test_blank_input_sends_no_request() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_record()))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = LookupSession::new(client);
    session.set_input("   ");
    assert_eq!(session.submit().await, SubmitOutcome::EmptyInput);
    assert_eq!(session.phase(), Phase::ModalOpen);
}
