//! Typed `result` payloads of the Etherscan API.
//!
//! Etherscan reports almost every number as a decimal string. Identifiers
//! and amounts stay strings here (amounts routinely exceed `u64`); only the
//! fields callers compute with directly are decoded into numbers.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};

// ==============================================================================
// Account
// ==============================================================================

/// One entry of a `balancemulti` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    #[serde(alias = "account")]
    pub address: String,
    pub balance: String,
}

/// A "normal" transaction record from `txlist`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transaction {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub nonce: String,
    pub block_hash: String,
    pub transaction_index: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub gas: String,
    pub gas_price: String,
    pub is_error: String,
    #[serde(rename = "txreceipt_status")]
    pub txreceipt_status: String,
    pub input: String,
    pub contract_address: String,
    pub cumulative_gas_used: String,
    pub gas_used: String,
    pub confirmations: String,
    pub method_id: String,
    pub function_name: String,
}

/// An internal (message-call) transaction from `txlistinternal`.
///
/// Results looked up by transaction hash omit `hash`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InternalTransaction {
    pub block_number: String,
    pub time_stamp: String,
    pub hash: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub contract_address: String,
    pub input: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub gas: String,
    pub gas_used: String,
    pub trace_id: String,
    pub is_error: String,
    pub err_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MinedBlock {
    pub block_number: String,
    pub time_stamp: String,
    pub block_reward: String,
}

// ==============================================================================
// Transactions
// ==============================================================================

/// Contract execution status from `getstatus`.
///
/// `is_error` keeps Etherscan's encoding: `0` means the execution passed,
/// `1` means an error occurred during contract execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStatus {
    #[serde(deserialize_with = "string_or_number")]
    pub is_error: u8,
    #[serde(default)]
    pub err_description: String,
}

impl ExecutionStatus {
    pub fn is_success(&self) -> bool {
        self.is_error == 0
    }
}

// ==============================================================================
// Blocks
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockReward {
    pub block_number: String,
    pub time_stamp: String,
    pub block_miner: String,
    pub block_reward: String,
    pub uncles: Vec<UncleReward>,
    pub uncle_inclusion_reward: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UncleReward {
    pub miner: String,
    pub uncle_position: String,
    #[serde(rename = "blockreward")]
    pub block_reward: String,
}

// ==============================================================================
// Stats
// ==============================================================================

/// Last Ether price quotes from `ethprice`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EthPrice {
    #[serde(deserialize_with = "string_or_number")]
    pub ethbtc: f64,
    #[serde(deserialize_with = "string_or_number")]
    pub ethbtc_timestamp: u64,
    #[serde(deserialize_with = "string_or_number")]
    pub ethusd: f64,
    #[serde(deserialize_with = "string_or_number")]
    pub ethusd_timestamp: u64,
}

// ==============================================================================
// Lenient Numeric Decoding
// ==============================================================================

// Accepts `"123"` as well as `123`; surrounding whitespace is ignored.
fn string_or_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s.trim().parse().map_err(de::Error::custom),
        serde_json::Value::Number(n) => n.to_string().parse().map_err(de::Error::custom),
        other => Err(de::Error::custom(format!(
            "expected a number or numeric string, got {other}"
        ))),
    }
}
