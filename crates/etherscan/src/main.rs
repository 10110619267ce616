mod cli;

use std::time::Duration;

use clap::Parser;
use eyre::{eyre, WrapErr};
use serde::Serialize;
use serde_json::{json, Value};

use etherscan_core::units::parse_base_units;
use etherscan_core::{convert_amount, ClientConfig, CoreError, EtherscanClient, TransportError};

use cli::Command;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    // stdout carries the JSON output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    if let Command::Convert { wei } = args.command {
        println!("{}", convert_amount(wei));
        return Ok(());
    }

    let api_key = args
        .api_key
        .clone()
        .ok_or_else(|| eyre!("an API key is required; pass --api-key or set ETHERSCAN_API_KEY"))?;
    let config = client_config(&args, api_key);
    let network = config.network.clone();
    let client = EtherscanClient::from_config(config).wrap_err("build Etherscan client")?;
    tracing::debug!(%network, "client configured");

    let output = run(&client, args.command).await.map_err(|err| match err.downcast::<CoreError>() {
        Ok(core) => eyre!(format_request_error(&network.to_string(), &core))
            .wrap_err("while querying the Etherscan API"),
        Err(other) => other,
    })?;

    println!(
        "{}",
        serde_json::to_string_pretty(&output).wrap_err("render output")?
    );
    Ok(())
}

async fn run(client: &EtherscanClient, command: Command) -> eyre::Result<Value> {
    match command {
        Command::Balance {
            address,
            tag,
            ether,
        } => {
            let wei = client.balance(&address, &tag).await?;
            with_ether(wei, ether)
        }
        Command::BalanceMulti { addresses, tag } => {
            to_json(client.balance_multi(addresses, &tag).await?)
        }
        Command::Txlist { address, range } => {
            to_json(client.transaction_list(&address, range.into()).await?)
        }
        Command::TxlistInternal {
            address,
            txhash,
            range,
        } => match (address, txhash) {
            (_, Some(txhash)) => to_json(client.transaction_list_internal_by_hash(&txhash).await?),
            (Some(address), None) => to_json(
                client
                    .transaction_list_internal_by_address(&address, range.into())
                    .await?,
            ),
            (None, None) => Err(eyre!("either --address or --txhash is required")),
        },
        Command::MinedBlocks {
            address,
            block_type,
            page,
            offset,
        } => to_json(
            client
                .get_mined_blocks(&address, &block_type, page, offset)
                .await?,
        ),
        Command::Abi { address } => Ok(client.get_abi(&address).await?),
        Command::Status { txhash } => to_json(client.get_status(&txhash).await?),
        Command::BlockReward { block } => to_json(client.get_block_reward(block).await?),
        Command::TokenSupply { token } => to_json(client.token_supply(&token).await?),
        Command::TokenBalance {
            token,
            address,
            tag,
        } => to_json(client.token_balance(&token, &address, &tag).await?),
        Command::EthSupply { ether } => {
            let wei = client.eth_supply().await?;
            with_ether(wei.to_string(), ether)
        }
        Command::EthPrice => to_json(client.eth_price().await?),
        Command::Convert { wei } => Ok(json!(convert_amount(wei))),
    }
}

fn to_json<T: Serialize>(value: T) -> eyre::Result<Value> {
    serde_json::to_value(value).wrap_err("serialize result")
}

fn with_ether(wei: String, ether: bool) -> eyre::Result<Value> {
    if !ether {
        return Ok(Value::String(wei));
    }
    let amount = parse_base_units(&wei)?;
    Ok(json!({ "wei": wei, "ether": convert_amount(amount) }))
}

fn format_request_error(network: &str, err: &CoreError) -> String {
    let mut lines = vec![
        format!("request to Etherscan ({network}) failed"),
        format!("error: {err}"),
    ];

    match err {
        CoreError::Api {
            result: Some(detail),
            ..
        } => {
            lines.push(format!("detail: {detail}"));
            if detail.contains("Invalid API Key") {
                lines.push("hint: verify --api-key or ETHERSCAN_API_KEY".into());
            } else if detail.contains("rate limit") {
                lines.push("hint: raise --throttle-ms to slow down requests".into());
            }
        }
        CoreError::Transport(TransportError::Http(source)) => {
            let source = source.to_string();
            if source.contains("dns error") || source.contains("error sending request") {
                lines.push(
                    "hint: the endpoint could not be reached; verify --network and your network access"
                        .into(),
                );
            } else if source.contains("certificate") || source.contains("tls") {
                lines.push("hint: TLS handshake failed; verify the endpoint certificate".into());
            }
        }
        CoreError::Transport(TransportError::Status { status: 404, .. }) => {
            lines.push("hint: endpoint path is invalid; verify the full API URL".into());
        }
        _ => {}
    }

    lines.join("\n")
}

fn client_config(args: &cli::Cli, api_key: String) -> ClientConfig {
    let mut config = ClientConfig::new(api_key)
        .with_selector(args.network.as_deref())
        .with_throttle_interval(Duration::from_millis(args.throttle_ms))
        .with_connect_timeout(Duration::from_secs(args.connect_timeout_secs))
        .with_request_timeout(Duration::from_secs(args.timeout_secs))
        .with_accept_invalid_certs(args.accept_invalid_certs);
    if let Some(user_agent) = &args.user_agent {
        config = config.with_user_agent(user_agent.as_str());
    }
    config
}
