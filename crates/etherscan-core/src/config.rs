//! Client configuration.

use std::fmt;
use std::time::Duration;

use crate::api::Network;

/// Minimum spacing between two requests, keeping a client under Etherscan's
/// free-tier request rate.
pub const DEFAULT_THROTTLE_INTERVAL: Duration = Duration::from_millis(250);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to build an [`HttpTransport`](crate::api::HttpTransport).
///
/// TLS certificates are verified unless `accept_invalid_certs` is set, which
/// is meant for sandbox endpoints with self-signed certificates only.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub network: Network,
    pub throttle_interval: Duration,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub accept_invalid_certs: bool,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            network: Network::Mainnet,
            throttle_interval: DEFAULT_THROTTLE_INTERVAL,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            accept_invalid_certs: false,
            user_agent: concat!("etherscan-core/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Select the network from an optional selector (testnet name or URL).
    pub fn with_selector(self, selector: Option<&str>) -> Self {
        self.with_network(Network::from_selector(selector))
    }

    /// `Duration::ZERO` disables throttling.
    pub fn with_throttle_interval(mut self, interval: Duration) -> Self {
        self.throttle_interval = interval;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

// The API key stays out of debug output.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("network", &self.network)
            .field("throttle_interval", &self.throttle_interval)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
