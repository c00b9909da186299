use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crosschain_transfer::client::DEFAULT_RPC_TIMEOUT;
use crosschain_transfer::config::{resolve_rpc_url, DEFAULT_CONFIG_PATH};
use crosschain_transfer::prelude::Result;
use crosschain_transfer::transfer::parse_amount;
use crosschain_transfer::{
    connect_signer, ChannelId, ContractPort, EndpointTable, Error, Network, TransferDispatcher,
    TransferResult,
};
use ethers::types::Address;
use log::{error, info};

/// Send a Polymer cross-chain token transfer from the active network to its
/// counterpart.
#[derive(Parser, Debug)]
#[command(name = "crosschain_transfer", version)]
struct Args {
    /// Network to send from (optimism or base)
    #[arg(long, short, env = "NETWORK")]
    network: Network,

    /// JSON file holding the crosschainTransfer section
    #[arg(long, env = "CONFIG_PATH", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// RPC endpoint, defaults to OPTIMISM_RPC_URL or BASE_RPC_URL
    #[arg(long)]
    rpc_url: Option<String>,

    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: String,

    /// Receiving address on the destination network, defaults to the sender
    #[arg(long)]
    recipient: Option<String>,

    /// Token amount in base units
    #[arg(long, default_value = "12000000")]
    amount: String,

    /// Give up if the node has not accepted the transaction after this long
    #[arg(long, env = "SUBMIT_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

async fn run(args: Args) -> Result<TransferResult> {
    let endpoints = EndpointTable::from_file(&args.config)?;

    // Fail on bad input before opening a connection.
    let (source, _) = endpoints.select(args.network)?;
    ChannelId::encode(&source.channel_id)?;
    let amount = parse_amount(&args.amount)?;
    let recipient = args
        .recipient
        .as_deref()
        .map(|r| {
            r.trim()
                .parse::<Address>()
                .map_err(|e| Error::Config(format!("invalid recipient {r:?}: {e}")))
        })
        .transpose()?;

    let rpc_url = resolve_rpc_url(args.network, args.rpc_url.as_deref())?;
    let client =
        connect_signer(args.network, &rpc_url, &args.private_key, DEFAULT_RPC_TIMEOUT).await?;
    let recipient = recipient.unwrap_or_else(|| client.address());
    info!("Sending from {} to {}", args.network, args.network.counterpart());

    let mut dispatcher = TransferDispatcher::new(ContractPort::new(client));
    if let Some(secs) = args.timeout_secs {
        dispatcher = dispatcher.with_submit_timeout(Duration::from_secs(secs));
    }
    dispatcher
        .dispatch_transfer(args.network, &endpoints, recipient, amount)
        .await
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();
    let args = Args::parse();

    match run(args).await {
        Ok(result) => println!("crosschainTransfer TX hash: {:?}", result.transaction_hash()),
        Err(e) => {
            error!("crosschainTransfer failed: {e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
