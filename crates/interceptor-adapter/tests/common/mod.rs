/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for interceptor-adapter tests

use interceptor_adapter::InterceptorClient;
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> InterceptorClient {
    InterceptorClient::new(&server.uri()).expect("client init")
}

/// Task body as the service reports it right after creation
pub fn fresh_task_json(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "running": true,
        "full_output": "",
        "new_output": ""
    })
}
