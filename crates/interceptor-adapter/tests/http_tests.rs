/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for HTTP client and ResourceApi dispatch
[POS]:    Integration tests - HTTP endpoints
[UPDATE]: When HTTP endpoints change
*/

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{client_for, fresh_task_json, setup_mock_server};
use interceptor_adapter::{ClientConfig, InterceptorClient, InterceptorError, ResourceApi};
use rstest::rstest;
use tokio_test::assert_ok;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_creation() {
    let client = assert_ok!(InterceptorClient::new("http://localhost:8080"));
    assert_eq!(client.base_url().as_str(), "http://localhost:8080/");
}

#[test]
fn test_client_with_config() {
    let config = ClientConfig {
        timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(1),
    };
    let _client = assert_ok!(InterceptorClient::with_config(config, "http://127.0.0.1:9000"));
}

#[test]
fn test_client_rejects_garbage_url() {
    let err = InterceptorClient::new("not a url").expect_err("should fail");
    assert!(matches!(err, InterceptorError::UrlParse(_)));
}

#[tokio::test]
async fn test_started_task_is_immediately_fetchable() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/modules/test/start"))
        .respond_with(ResponseTemplate::new(200).set_body_string("task-42"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/task-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fresh_task_json("task-42")))
        .expect(1)
        .mount(&server)
        .await;

    let api: Arc<dyn ResourceApi> = Arc::new(client_for(&server));
    let name = assert_ok!(
        api.start_module("test", &[("verbose".to_string(), "true".to_string())])
            .await
    );
    assert_eq!(name, "task-42");

    let task = assert_ok!(api.get_task(&name).await);
    assert_eq!(task.name, "task-42");
    assert!(task.running);
    assert_eq!(task.full_output, "");
}

#[rstest]
#[case(500, true)]
#[case(503, true)]
#[case(429, true)]
#[case(404, false)]
#[case(400, false)]
#[tokio::test]
async fn test_status_codes_map_to_api_errors(#[case] status: u16, #[case] retryable: bool) {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/hosts"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.list_hosts().await.expect_err("should fail");
    match &err {
        InterceptorError::Api { code, message } => {
            assert_eq!(*code, status);
            assert!(!message.is_empty());
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
    assert_eq!(err.is_retryable(), retryable);
}

#[tokio::test]
async fn test_connection_refused_is_retryable() {
    let listener = assert_ok!(std::net::TcpListener::bind("127.0.0.1:0"));
    let addr = assert_ok!(listener.local_addr());
    drop(listener);

    let client = assert_ok!(InterceptorClient::new(&format!("http://{addr}")));
    let err = client.list_tasks().await.expect_err("server is gone");
    assert!(matches!(err, InterceptorError::Http(_)));
    assert!(err.is_retryable());
}
