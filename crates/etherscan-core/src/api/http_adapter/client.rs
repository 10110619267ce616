use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, trace, warn};

use crate::config::ClientConfig;
use crate::error::{CoreError, TransportError};
use crate::types::Params;

use super::super::{Transport, API_KEY_PARAM};
use super::protocol::{decode_envelope, is_envelope};
use super::throttle::Throttle;

/// Timeout for [`HttpTransport::fetch_json`], independent of the request
/// timeout used for API calls.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Etherscan API transport over HTTP(S).
///
/// Owns one `reqwest::Client` for the lifetime of the transport. Every call
/// builds its own request, so concurrent calls never share request state;
/// they do share the throttle gate.
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    api_key: String,
    throttle: Throttle,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        if config.accept_invalid_certs {
            warn!(network = %config.network, "TLS certificate verification is disabled");
        }

        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .tcp_nodelay(true)
            .build()
            .map_err(TransportError::Http)?;

        Ok(Self {
            client,
            url: config.network.base_url(),
            api_key: config.api_key.clone(),
            throttle: Throttle::new(config.throttle_interval),
        })
    }

    /// Base URL requests are posted to.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    /// Plain GET of a JSON document, without API key, throttling or
    /// envelope inspection.
    pub async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, CoreError> {
        debug!(url, "fetch json");
        let response = self
            .client
            .get(url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(TransportError::Http)?;
        let status = response.status();
        let body = response.text().await.map_err(TransportError::Http)?;
        trace!(url, %status, body = %body, "fetch json body");

        serde_json::from_str(&body)
            .map_err(|e| CoreError::Decode(format!("decode JSON document: {e}; body={body}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, params: &Params) -> Result<serde_json::Value, CoreError> {
        self.throttle.wait().await;

        let module = params.get("module").unwrap_or_default();
        let action = params.get("action").unwrap_or_default();
        debug!(
            etherscan.module = module,
            etherscan.action = action,
            etherscan.params = params.len(),
            "etherscan call"
        );

        let form = params.merged(API_KEY_PARAM, &self.api_key);
        let response = self
            .client
            .post(&self.url)
            .form(&form)
            .send()
            .await
            .map_err(TransportError::Http)?;
        let status = response.status();

        let body = response.text().await.map_err(TransportError::Http)?;
        debug!(
            etherscan.module = module,
            etherscan.action = action,
            %status,
            body_len = body.len(),
            "etherscan response"
        );
        trace!(etherscan.action = action, body = %body, "etherscan response body");

        let decoded: serde_json::Value = match serde_json::from_str(&body) {
            Ok(decoded) => decoded,
            Err(_) if !status.is_success() => {
                return Err(TransportError::Status {
                    status: status.as_u16(),
                    body,
                }
                .into());
            }
            Err(e) => {
                return Err(CoreError::Decode(format!(
                    "decode Etherscan response: {e}; body={body}"
                )));
            }
        };

        // Gateways answer throttled or failed requests with their own JSON.
        if !status.is_success() && !is_envelope(&decoded) {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        decode_envelope(decoded)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use mockito::{Matcher, Server};
    use serde_json::json;

    use super::*;
    use crate::test_util::{api_mock, config_for, ok_envelope, API_PATH};

    const ADDRESS: &str = "0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae";

    fn balance_params() -> Params {
        Params::for_action("account", "balance")
            .with("address", ADDRESS)
            .with("tag", "latest")
    }

    #[tokio::test]
    async fn posts_form_body_with_api_key_last() {
        let mut server = Server::new_async().await;
        let mock = api_mock(&mut server, 200, ok_envelope(json!("669816494134519564")))
            .match_header("user-agent", Matcher::Regex("^etherscan-core/".to_owned()))
            .match_body(Matcher::Exact(format!(
                "module=account&action=balance&address={ADDRESS}&tag=latest&apikey=KEY123"
            )))
            .create_async()
            .await;
        let transport = HttpTransport::new(&config_for(&server, "KEY123")).expect("transport");

        let params = balance_params();
        let result = transport.execute(&params).await.expect("call must succeed");
        assert_eq!(result, json!("669816494134519564"));
        assert!(!params.contains_key(API_KEY_PARAM), "caller params untouched");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn form_values_are_percent_encoded() {
        let mut server = Server::new_async().await;
        let mock = api_mock(&mut server, 200, ok_envelope(json!([])))
            .match_body(Matcher::Exact(
                "module=account&action=balancemulti&address=0xa%2C0xb&apikey=k".to_owned(),
            ))
            .create_async()
            .await;
        let transport = HttpTransport::new(&config_for(&server, "k")).expect("transport");

        let params = Params::for_action("account", "balancemulti").with("address", "0xa,0xb");
        transport.execute(&params).await.expect("call must succeed");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn configured_user_agent_and_timeouts_are_applied() {
        let mut server = Server::new_async().await;
        let mock = api_mock(&mut server, 200, ok_envelope(json!("1")))
            .match_header("user-agent", "wallet-audit/2.1")
            .create_async()
            .await;
        let config = config_for(&server, "k")
            .with_user_agent("wallet-audit/2.1")
            .with_connect_timeout(Duration::from_secs(2))
            .with_request_timeout(Duration::from_secs(5));
        let transport = HttpTransport::new(&config).expect("transport");

        transport.execute(&balance_params()).await.expect("call must succeed");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn envelope_failure_surfaces_remote_message() {
        let mut server = Server::new_async().await;
        let _mock = api_mock(
            &mut server,
            200,
            json!({"status": "0", "message": "NOTOK", "result": "Invalid API Key"}).to_string(),
        )
        .create_async()
        .await;
        let transport = HttpTransport::new(&config_for(&server, "bad")).expect("transport");

        let err = transport
            .execute(&balance_params())
            .await
            .expect_err("envelope failure must fail");
        assert_eq!(err.api_message(), Some("NOTOK"));
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let mut server = Server::new_async().await;
        let _mock = api_mock(&mut server, 200, "<html>oops</html>")
            .create_async()
            .await;
        let transport = HttpTransport::new(&config_for(&server, "k")).expect("transport");

        let err = transport
            .execute(&balance_params())
            .await
            .expect_err("html must not decode");
        assert!(matches!(err, CoreError::Decode(_)));
    }

    #[tokio::test]
    async fn error_status_with_non_json_body_is_a_transport_error() {
        let mut server = Server::new_async().await;
        let _mock = api_mock(&mut server, 502, "bad gateway")
            .create_async()
            .await;
        let transport = HttpTransport::new(&config_for(&server, "k")).expect("transport");

        let err = transport
            .execute(&balance_params())
            .await
            .expect_err("502 must fail");
        assert!(matches!(
            err,
            CoreError::Transport(TransportError::Status { status: 502, .. })
        ));
    }

    #[tokio::test]
    async fn error_status_with_foreign_json_body_is_a_transport_error() {
        let mut server = Server::new_async().await;
        let _mock = api_mock(
            &mut server,
            503,
            json!({"message": "Service Unavailable"}).to_string(),
        )
        .create_async()
        .await;
        let transport = HttpTransport::new(&config_for(&server, "k")).expect("transport");

        let err = transport
            .execute(&balance_params())
            .await
            .expect_err("503 must fail");
        match err {
            CoreError::Transport(TransportError::Status { status, body }) => {
                assert_eq!(status, 503);
                assert!(body.contains("Service Unavailable"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn error_status_with_envelope_body_keeps_remote_message() {
        let mut server = Server::new_async().await;
        let _mock = api_mock(
            &mut server,
            429,
            json!({"status": "0", "message": "NOTOK", "result": "Max rate limit reached"})
                .to_string(),
        )
        .create_async()
        .await;
        let transport = HttpTransport::new(&config_for(&server, "k")).expect("transport");

        let err = transport
            .execute(&balance_params())
            .await
            .expect_err("429 must fail");
        match err {
            CoreError::Api { message, result } => {
                assert_eq!(message, "NOTOK");
                assert_eq!(result.as_deref(), Some("Max rate limit reached"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let url = format!("http://{addr}/api");
        let config = ClientConfig::new("k")
            .with_selector(Some(url.as_str()))
            .with_throttle_interval(Duration::ZERO);
        let transport = HttpTransport::new(&config).expect("transport");
        assert_eq!(transport.url(), url);

        let err = transport
            .execute(&balance_params())
            .await
            .expect_err("nothing is listening");
        assert!(matches!(err, CoreError::Transport(TransportError::Http(_))));
    }

    #[tokio::test]
    async fn consecutive_calls_are_throttled() {
        let interval = Duration::from_millis(150);
        let mut server = Server::new_async().await;
        let mock = api_mock(&mut server, 200, ok_envelope(json!("1")))
            .expect(2)
            .create_async()
            .await;
        let config = config_for(&server, "k").with_throttle_interval(interval);
        let transport = HttpTransport::new(&config).expect("transport");
        assert!(transport.throttle().is_enabled());
        assert_eq!(transport.throttle().interval(), interval);

        let start = Instant::now();
        transport.execute(&balance_params()).await.expect("first");
        transport.execute(&balance_params()).await.expect("second");

        // Small slack for governor's clock being sampled separately.
        assert!(start.elapsed() + Duration::from_millis(5) >= interval);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_json_skips_envelope_and_api_key() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", API_PATH)
            .match_body(Matcher::Exact(String::new()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"status": "0", "message": "raw"}).to_string())
            .create_async()
            .await;
        let transport = HttpTransport::new(&config_for(&server, "k")).expect("transport");

        let doc = transport
            .fetch_json(&format!("{}{API_PATH}", server.url()))
            .await
            .expect("fetch");
        assert_eq!(doc, json!({"status": "0", "message": "raw"}));
        mock.assert_async().await;
    }
}
