//! Shared test helpers for `etherscan-core` unit tests.
//!
//! HTTP tests run the real `HttpTransport` against a `mockito` server bound
//! to a loopback port.

use std::time::Duration;

use mockito::{Mock, Server};

use crate::api::Network;
use crate::config::ClientConfig;

/// Path the client configuration from [`config_for`] posts to.
pub const API_PATH: &str = "/api";

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Client configuration pointed at `server`, without throttling.
pub fn config_for(server: &Server, api_key: &str) -> ClientConfig {
    ClientConfig::new(api_key)
        .with_network(Network::Custom(format!("{}{API_PATH}", server.url())))
        .with_throttle_interval(Duration::ZERO)
}

/// Form POST to [`API_PATH`] answered with `status` and a JSON `body`.
/// Callers add body matchers and create the mock.
pub fn api_mock(server: &mut Server, status: usize, body: impl Into<String>) -> Mock {
    server
        .mock("POST", API_PATH)
        .match_header("content-type", FORM_CONTENT_TYPE)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.into())
}

/// Wrap `result` in a successful Etherscan envelope.
pub fn ok_envelope(result: serde_json::Value) -> String {
    serde_json::json!({"status": "1", "message": "OK", "result": result}).to_string()
}
