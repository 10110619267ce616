//! Native HTTP transport for the Etherscan API.
//!
//! Implements [`Transport`](super::Transport) with `reqwest`: form-encoded
//! POST requests, a minimum-interval throttle gate, network endpoint
//! resolution and Etherscan envelope decoding.

mod client;
mod connection;
mod protocol;
mod throttle;

pub use client::HttpTransport;
pub use connection::{resolve_endpoint, Network, MAINNET_URL};
pub use throttle::Throttle;
