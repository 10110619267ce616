//! Typed async client for the Etherscan explorer API.
//!
//! [`EtherscanClient`] maps one method per supported query onto a
//! form-encoded request, sent through a [`Transport`](api::Transport) that
//! throttles, injects the API key and unwraps Etherscan's response envelope.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
#[cfg(test)]
pub(crate) mod test_util;
pub mod types;
pub mod units;

pub use client::EtherscanClient;
pub use config::ClientConfig;
pub use error::{CoreError, TransportError};
pub use types::{Addresses, BlockType, Params, Sort, TxListOptions, TAG_LATEST};
pub use units::{convert_amount, is_input_transaction, is_output_transaction};
