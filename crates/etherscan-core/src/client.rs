//! The Etherscan API facade.
//!
//! [`EtherscanClient`] exposes one async method per supported query. Each
//! method flattens its arguments into [`Params`], hands them to the
//! [`Transport`], and decodes the returned `result` payload into a typed
//! value. Nothing is retried or cached.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::api::{
    AccountBalance, BlockReward, EthPrice, ExecutionStatus, HttpTransport, InternalTransaction,
    MinedBlock, Transaction, Transport,
};
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::types::{Addresses, BlockType, Params, TxListOptions};
use crate::units::parse_base_units;

/// Length of a `0x`-prefixed hex contract address. Token identifiers of
/// exactly this length are sent as `contractaddress`, anything else as
/// `tokenname`. No further address validation is done.
const CONTRACT_ADDRESS_LEN: usize = 42;

pub struct EtherscanClient {
    transport: Arc<dyn Transport>,
}

impl EtherscanClient {
    /// Client for `network` (`None` for mainnet, a testnet name, or an
    /// explicit base URL) with default settings.
    pub fn new(api_key: impl Into<String>, network: Option<&str>) -> Result<Self, CoreError> {
        Self::from_config(ClientConfig::new(api_key).with_selector(network))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, CoreError> {
        let transport = HttpTransport::new(&config)?;
        debug!(
            network = %config.network,
            url = transport.url(),
            throttle_ms = config.throttle_interval.as_millis() as u64,
            "etherscan client ready"
        );
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    // ==========================================================================
    // Accounts
    // ==========================================================================

    /// Ether balance of a single address, in Wei.
    pub async fn balance(&self, address: &str, tag: &str) -> Result<String, CoreError> {
        let params = Params::for_action("account", "balance")
            .with("address", address)
            .with("tag", tag);
        let raw = self.transport.execute(&params).await?;
        decode_amount(raw, "balance")
    }

    /// Ether balances of several addresses in one call.
    pub async fn balance_multi(
        &self,
        addresses: impl Into<Addresses>,
        tag: &str,
    ) -> Result<Vec<AccountBalance>, CoreError> {
        let params = Params::for_action("account", "balancemulti")
            .with("address", addresses.into().to_param())
            .with("tag", tag);
        self.call(params).await
    }

    /// "Normal" transactions of an address.
    pub async fn transaction_list(
        &self,
        address: &str,
        options: TxListOptions,
    ) -> Result<Vec<Transaction>, CoreError> {
        self.call(tx_list_params("txlist", address, &options)).await
    }

    /// Internal transactions of an address.
    pub async fn transaction_list_internal_by_address(
        &self,
        address: &str,
        options: TxListOptions,
    ) -> Result<Vec<InternalTransaction>, CoreError> {
        self.call(tx_list_params("txlistinternal", address, &options))
            .await
    }

    /// Internal transactions of one transaction.
    pub async fn transaction_list_internal_by_hash(
        &self,
        tx_hash: &str,
    ) -> Result<Vec<InternalTransaction>, CoreError> {
        let params = Params::for_action("account", "txlistinternal").with("txhash", tx_hash);
        self.call(params).await
    }

    /// Blocks (or uncles) mined by an address.
    ///
    /// `block_type` must be `"blocks"` or `"uncles"`; anything else fails with
    /// [`CoreError::InvalidArgument`] before any request is made.
    pub async fn get_mined_blocks(
        &self,
        address: &str,
        block_type: &str,
        page: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<MinedBlock>, CoreError> {
        let block_type: BlockType = block_type.parse()?;
        let params = Params::for_action("account", "getminedblocks")
            .with("address", address)
            .with("blocktype", block_type)
            .with_opt("page", page)
            .with_opt("offset", offset);
        self.call(params).await
    }

    // ==========================================================================
    // Contracts & Transactions
    // ==========================================================================

    /// ABI of a verified contract. The ABI arrives as a JSON-encoded string;
    /// it is parsed when possible and returned as a raw string otherwise.
    pub async fn get_abi(&self, address: &str) -> Result<Value, CoreError> {
        let params = Params::for_action("contract", "getabi").with("address", address);
        let raw = self.transport.execute(&params).await?;
        Ok(match raw {
            Value::String(abi) => serde_json::from_str(&abi).unwrap_or(Value::String(abi)),
            other => other,
        })
    }

    /// Contract execution status of a transaction (`is_error` 0 = pass,
    /// 1 = error during execution).
    pub async fn get_status(&self, tx_hash: &str) -> Result<ExecutionStatus, CoreError> {
        let params = Params::for_action("transaction", "getstatus").with("txhash", tx_hash);
        self.call(params).await
    }

    // ==========================================================================
    // Blocks
    // ==========================================================================

    pub async fn get_block_reward(&self, block_number: u64) -> Result<BlockReward, CoreError> {
        let params = Params::for_action("block", "getblockreward").with("blockno", block_number);
        self.call(params).await
    }

    // ==========================================================================
    // Tokens
    // ==========================================================================

    /// Total supply of a token, by contract address or token name.
    pub async fn token_supply(&self, identifier: &str) -> Result<String, CoreError> {
        let params = token_params("tokensupply", identifier);
        let raw = self.transport.execute(&params).await?;
        decode_amount(raw, "tokensupply")
    }

    /// Token balance of `address`, by contract address or token name.
    pub async fn token_balance(
        &self,
        identifier: &str,
        address: &str,
        tag: &str,
    ) -> Result<String, CoreError> {
        let params = token_params("tokenbalance", identifier)
            .with("address", address)
            .with("tag", tag);
        let raw = self.transport.execute(&params).await?;
        decode_amount(raw, "tokenbalance")
    }

    // ==========================================================================
    // Stats
    // ==========================================================================

    /// Total Ether supply, in Wei.
    pub async fn eth_supply(&self) -> Result<u128, CoreError> {
        let raw = self
            .transport
            .execute(&Params::for_action("stats", "ethsupply"))
            .await?;
        parse_base_units(&decode_amount(raw, "ethsupply")?)
    }

    pub async fn eth_price(&self) -> Result<EthPrice, CoreError> {
        self.call(Params::for_action("stats", "ethprice")).await
    }

    async fn call<T: DeserializeOwned>(&self, params: Params) -> Result<T, CoreError> {
        let raw = self.transport.execute(&params).await?;
        decode_result(raw, params.get("action").unwrap_or_default())
    }
}

// ==============================================================================
// Parameter Builders
// ==============================================================================

fn tx_list_params(action: &str, address: &str, options: &TxListOptions) -> Params {
    Params::for_action("account", action)
        .with("address", address)
        .with("startblock", options.start_block)
        .with("endblock", options.end_block)
        .with("sort", options.sort)
        .with_opt("page", options.page)
        .with_opt("offset", options.offset)
}

fn token_params(action: &str, identifier: &str) -> Params {
    Params::for_action("stats", action).with(token_identifier_key(identifier), identifier)
}

fn token_identifier_key(identifier: &str) -> &'static str {
    if identifier.len() == CONTRACT_ADDRESS_LEN {
        "contractaddress"
    } else {
        "tokenname"
    }
}

// ==============================================================================
// Result Decoding
// ==============================================================================

fn decode_result<T: DeserializeOwned>(raw: Value, action: &str) -> Result<T, CoreError> {
    serde_json::from_value(raw)
        .map_err(|e| CoreError::Decode(format!("invalid {action} result: {e}")))
}

/// Amounts arrive as decimal strings; plain JSON numbers are accepted too.
fn decode_amount(raw: Value, action: &str) -> Result<String, CoreError> {
    match raw {
        Value::String(amount) => Ok(amount),
        Value::Number(amount) => Ok(amount.to_string()),
        other => Err(CoreError::Decode(format!(
            "invalid {action} result: expected an amount, got {other}"
        ))),
    }
}
