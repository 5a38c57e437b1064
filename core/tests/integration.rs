//! End-to-end test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, points a `LucentClient` at it
//! and executes every request over real HTTP using ureq. Validates that
//! request building, header handling and envelope parsing work end-to-end.

use std::time::Duration;

use lucent_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, LucentClient, Payload};
use serde_json::json;

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data, letting the core client interpret them.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(Some(req.timeout))
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => {
            let mut builder = agent.get(&req.url);
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.call()
        }
        (HttpMethod::Delete, _) => {
            let mut builder = agent.delete(&req.url);
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.call()
        }
        (HttpMethod::Post, body) => {
            let mut builder = agent.post(&req.url);
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.send(body.unwrap_or_default().as_bytes())
        }
        (HttpMethod::Put, body) => {
            let mut builder = agent.put(&req.url);
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.send(body.unwrap_or_default().as_bytes())
        }
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn payload(value: serde_json::Value) -> Payload {
    value.as_object().cloned().unwrap()
}

#[test]
fn document_lifecycle() {
    // Step 1: start mock server on a random port.
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    let client = LucentClient::new("store1", "abc", "editor", "en-US", Duration::from_secs(5))
        .with_base_url(&format!("http://{addr}/api"));

    // Step 2: list documents, should be empty.
    let req = client.build_request("documents", Payload::new()).unwrap();
    let envelope = client
        .parse_document_list(execute(req.into_http(HttpMethod::Get).unwrap()))
        .unwrap();
    assert!(!envelope.has_errors());
    let (_, found) = envelope.first();
    assert!(!found, "expected empty list");

    // Step 3: create a document.
    let req = client
        .build_request(
            "documents/",
            payload(json!({"schema": "articles", "content": {"title": "Hello"}})),
        )
        .unwrap();
    let created = client
        .parse_document(execute(req.into_http(HttpMethod::Post).unwrap()))
        .unwrap();
    assert!(!created.has_errors(), "{}", created.error());
    let doc = created.into_data();
    assert_eq!(doc.schema, "articles");
    assert_eq!(doc.field("title"), Some(&json!("Hello")));
    assert_eq!(doc.creator, "editor");
    assert_eq!(doc.locale, "en-US");
    assert_eq!(doc.channel, "store1");

    // Step 4: list again, should contain the document.
    let req = client.build_request("documents", Payload::new()).unwrap();
    let envelope = client
        .parse_document_list(execute(req.into_http(HttpMethod::Get).unwrap()))
        .unwrap();
    let (first, found) = envelope.first();
    assert!(found);
    assert_eq!(first, doc);
    assert_eq!(envelope.meta()["total"], 1);

    // Step 5: channels describe the configured channel.
    let req = client.build_request("channels", Payload::new()).unwrap();
    let envelope = client
        .parse_document_list(execute(req.into_http(HttpMethod::Get).unwrap()))
        .unwrap();
    assert_eq!(envelope.data()[0].id, "store1");

    // Step 6: files are empty.
    let req = client.build_request("files/", Payload::new()).unwrap();
    let envelope = client
        .parse_document_list(execute(req.into_http(HttpMethod::Get).unwrap()))
        .unwrap();
    assert!(envelope.data().is_empty());

    // Step 7: empty token, API errors come back as envelope data.
    let anonymous = LucentClient::new("store1", "", "", "en-US", Duration::from_secs(5))
        .with_base_url(&format!("http://{addr}/api"));
    let req = anonymous.build_request("documents", Payload::new()).unwrap();
    let envelope = anonymous
        .parse_document_list(execute(req.into_http(HttpMethod::Get).unwrap()))
        .unwrap();
    assert!(envelope.has_errors());
    assert_eq!(envelope.error(), "Unauthenticated.");

    // Step 8: unsupported method on a known endpoint is an HTTP error.
    let req = client.build_request("files", Payload::new()).unwrap();
    let err = client
        .parse_document_list(execute(req.into_http(HttpMethod::Delete).unwrap()))
        .unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 405, .. }));

    // Step 9: unsupported endpoint never reaches the network.
    let err = client.build_request("widgets", Payload::new()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidEndpoint { .. }));
}
