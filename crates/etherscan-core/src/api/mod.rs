//! Etherscan transport abstraction layer.
//!
//! Defines the [`Transport`] trait and provides the HTTP implementation
//! ([`HttpTransport`]) plus a recording test mock (`mock::MockTransport`).

mod http_adapter;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use http_adapter::{resolve_endpoint, HttpTransport, Network, Throttle, MAINNET_URL};
pub use types::{
    AccountBalance, BlockReward, EthPrice, ExecutionStatus, InternalTransaction, MinedBlock,
    Transaction, UncleReward,
};

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::Params;

/// Parameter name the API key is sent under.
pub const API_KEY_PARAM: &str = "apikey";

/// The single point of contact with the remote endpoint.
///
/// Implementations own throttling, API-key injection, request encoding and
/// envelope decoding, and return the envelope's `result` payload.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, params: &Params) -> Result<serde_json::Value, CoreError>;
}
