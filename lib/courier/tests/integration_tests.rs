//! Integration tests for `RestClient` over `HyperTransport` using wiremock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use courier::{ExecutionContext, Outcome, RestClient, Verb};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, method, path, query_param, query_param_is_missing},
};

const FORM: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Execute once and wait for the outcome on the context.
async fn run(client: &RestClient, context: &mut ExecutionContext, verb: Verb) -> Outcome {
    let seen = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&seen);
    client
        .execute_with(verb, move |outcome| {
            *slot.lock().expect("lock") = Some(outcome);
        })
        .expect("execute");

    let ran = tokio::time::timeout(Duration::from_secs(10), context.dispatch_next())
        .await
        .expect("completion within timeout");
    assert!(ran);

    seen.lock().expect("lock").take().expect("callback ran")
}

#[tokio::test]
async fn test_get_request_with_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("a", "1"))
        .and(query_param("b", "2 c"))
        .and(header("Accept", "text/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("first\nsecond"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut context = ExecutionContext::new();
    let mut client = RestClient::new(format!("{}/api", mock_server.uri()), context.handle());
    client
        .add_param("a", "1")
        .add_param("b", "2 c")
        .add_header("Accept", "text/plain");

    let outcome = run(&client, &mut context, Verb::Get).await;
    let success = outcome.into_result().expect("success");

    assert_eq!(success.verb(), Verb::Get);
    assert_eq!(success.status(), 200);
    assert_eq!(success.reason(), "OK");
    assert_eq!(success.body(), Some("first\nsecond\n"));
}

#[tokio::test]
async fn test_post_request_with_form_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("Content-Type", FORM))
        .and(body_string("name=Bob&role=site+admin"))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut context = ExecutionContext::new();
    let mut client = RestClient::new(format!("{}/users", mock_server.uri()), context.handle());
    client.add_param("name", "Bob").add_param("role", "site admin");

    let success = run(&client, &mut context, Verb::Post)
        .await
        .into_result()
        .expect("success");

    assert_eq!(success.status(), 201);
    assert_eq!(success.reason(), "Created");
    assert_eq!(success.body(), Some("created\n"));
}

#[tokio::test]
async fn test_put_request_with_form_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/1"))
        .and(header("Content-Type", FORM))
        .and(body_string("name=Alice"))
        .respond_with(ResponseTemplate::new(200).set_body_string("updated"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut context = ExecutionContext::new();
    let mut client = RestClient::new(format!("{}/users/1", mock_server.uri()), context.handle());
    client.add_param("name", "Alice");

    let success = run(&client, &mut context, Verb::Put)
        .await
        .into_result()
        .expect("success");

    assert_eq!(success.verb(), Verb::Put);
    assert_eq!(success.body(), Some("updated\n"));
}

#[tokio::test]
async fn test_delete_request_sends_no_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/1"))
        .and(query_param_is_missing("cascade"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut context = ExecutionContext::new();
    let mut client = RestClient::new(format!("{}/users/1", mock_server.uri()), context.handle());
    client.add_param("cascade", "true");

    let success = run(&client, &mut context, Verb::Delete)
        .await
        .into_result()
        .expect("success");

    assert_eq!(success.status(), 204);
    assert_eq!(success.reason(), "No Content");
    assert_eq!(success.body(), None);
}

#[tokio::test]
async fn test_http_error_status_is_finish() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such thing"))
        .mount(&mock_server)
        .await;

    let mut context = ExecutionContext::new();
    let client = RestClient::new(format!("{}/missing", mock_server.uri()), context.handle());

    let success = run(&client, &mut context, Verb::Get)
        .await
        .into_result()
        .expect("HTTP errors are still a finished call");

    assert!(!success.is_success());
    assert_eq!(success.status(), 404);
    assert_eq!(success.reason(), "Not Found");
    assert_eq!(success.body(), Some("no such thing\n"));
}

#[tokio::test]
async fn test_logging_layer_over_hyper() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&mock_server)
        .await;

    let mut context = ExecutionContext::new();
    let client = RestClient::builder(format!("{}/ping", mock_server.uri()), context.handle())
        .with_debug_logging()
        .max_workers(1)
        .build();

    let success = run(&client, &mut context, Verb::Get)
        .await
        .into_result()
        .expect("success");

    assert_eq!(success.body(), Some("pong\n"));
}

#[tokio::test]
async fn test_connection_refused_is_error() {
    // Bind then release a port so nothing listens on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let mut context = ExecutionContext::new();
    let client = RestClient::new(format!("http://{addr}/api"), context.handle());

    let failure = run(&client, &mut context, Verb::Get)
        .await
        .into_result()
        .expect_err("connection refused");

    assert_eq!(failure.verb(), Verb::Get);
    assert!(failure.error().is_transport());
    assert!(failure.error().is_connection());
}

#[tokio::test]
async fn test_custom_reason_phrase_is_kept() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buf = [0_u8; 1024];
        let _ = socket.read(&mut buf).await.expect("read request");
        socket
            .write_all(
                b"HTTP/1.1 200 Everything Fine\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
            )
            .await
            .expect("write response");
    });

    let mut context = ExecutionContext::new();
    let client = RestClient::new(format!("http://{addr}/status"), context.handle());

    let success = run(&client, &mut context, Verb::Get)
        .await
        .into_result()
        .expect("success");

    assert_eq!(success.status(), 200);
    assert_eq!(success.reason(), "Everything Fine");
    assert_eq!(success.body(), Some("ok\n"));
}
