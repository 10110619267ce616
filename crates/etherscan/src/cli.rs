use clap::{Args, Parser, Subcommand};

use etherscan_core::types::{DEFAULT_END_BLOCK, DEFAULT_START_BLOCK, TAG_LATEST};
use etherscan_core::{Sort, TxListOptions};

/// Query the Etherscan explorer API from the command line.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Etherscan API key token.
    #[arg(long, env = "ETHERSCAN_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Network: omit for mainnet, a testnet name (e.g. `sepolia`), or a full API URL.
    #[arg(long, env = "ETHERSCAN_NETWORK", global = true)]
    pub network: Option<String>,

    /// Minimum delay between requests, in milliseconds (0 disables throttling).
    #[arg(long, default_value = "250", env = "ETHERSCAN_THROTTLE_MS", global = true)]
    pub throttle_ms: u64,

    /// Request timeout in seconds.
    #[arg(long, default_value = "30", env = "ETHERSCAN_TIMEOUT_SECS", global = true)]
    pub timeout_secs: u64,

    /// Connect timeout in seconds.
    #[arg(long, default_value = "10", env = "ETHERSCAN_CONNECT_TIMEOUT_SECS", global = true)]
    pub connect_timeout_secs: u64,

    /// User-Agent header sent with every request.
    #[arg(long, env = "ETHERSCAN_USER_AGENT", global = true)]
    pub user_agent: Option<String>,

    /// Skip TLS certificate verification (sandbox endpoints only).
    #[arg(long, env = "ETHERSCAN_ACCEPT_INVALID_CERTS", global = true)]
    pub accept_invalid_certs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ether balance of one address.
    Balance {
        address: String,
        #[arg(long, default_value = TAG_LATEST)]
        tag: String,
        /// Also print the balance converted to Ether.
        #[arg(long)]
        ether: bool,
    },

    /// Ether balances of several addresses in one request.
    BalanceMulti {
        #[arg(required = true)]
        addresses: Vec<String>,
        #[arg(long, default_value = TAG_LATEST)]
        tag: String,
    },

    /// Normal transactions of an address.
    Txlist {
        address: String,
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Internal transactions, by address or by transaction hash.
    TxlistInternal {
        #[arg(long, required_unless_present = "txhash", conflicts_with = "txhash")]
        address: Option<String>,
        /// Lookup by hash takes no block range or paging.
        #[arg(
            long,
            conflicts_with_all = ["start_block", "end_block", "sort", "page", "offset"]
        )]
        txhash: Option<String>,
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Blocks or uncles mined by an address.
    MinedBlocks {
        address: String,
        /// `blocks` or `uncles`.
        #[arg(long, default_value = "blocks")]
        block_type: String,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },

    /// ABI of a verified contract.
    Abi { address: String },

    /// Contract execution status of a transaction.
    Status { txhash: String },

    /// Block and uncle rewards of a block.
    BlockReward { block: u64 },

    /// Total supply of a token (contract address or token name).
    TokenSupply { token: String },

    /// Token balance of an address (token by contract address or name).
    TokenBalance {
        token: String,
        address: String,
        #[arg(long, default_value = TAG_LATEST)]
        tag: String,
    },

    /// Total Ether supply.
    EthSupply {
        /// Also print the supply converted to Ether.
        #[arg(long)]
        ether: bool,
    },

    /// Last Ether price.
    EthPrice,

    /// Convert a Wei amount to Ether (no request is made).
    Convert { wei: u128 },
}

#[derive(Args)]
pub struct RangeArgs {
    #[arg(long, default_value_t = DEFAULT_START_BLOCK)]
    pub start_block: u64,

    #[arg(long, default_value_t = DEFAULT_END_BLOCK)]
    pub end_block: u64,

    /// `asc` or `desc`.
    #[arg(long, default_value = "asc")]
    pub sort: Sort,

    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub offset: Option<u32>,
}

impl From<RangeArgs> for TxListOptions {
    fn from(range: RangeArgs) -> Self {
        Self {
            start_block: range.start_block,
            end_block: range.end_block,
            sort: range.sort,
            page: range.page,
            offset: range.offset,
        }
    }
}
