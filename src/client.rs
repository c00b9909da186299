use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};

use crate::network::Network;
use crate::prelude::*;
use crate::Error;

pub type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

pub fn parse_wallet(private_key: &str) -> Result<LocalWallet> {
    let key = private_key.trim();
    let key = key.strip_prefix("0x").unwrap_or(key);
    LocalWallet::from_str(key).map_err(|e| Error::PrivateKeyParse(e.to_string()))
}

pub fn http_provider(rpc_url: &str, timeout: Duration) -> Result<Provider<Http>> {
    let url = reqwest::Url::parse(rpc_url.trim())
        .map_err(|e| Error::Config(format!("invalid RPC url {rpc_url:?}: {e}")))?;
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Network(format!("failed to build HTTP client: {e}")))?;
    Ok(Provider::new(Http::new_with_client(url, client)))
}

/// Fetches the chain id served by `provider` and checks it belongs to `network`.
pub async fn connected_chain_id<M: Middleware>(provider: &M, network: Network) -> Result<u64> {
    let chain_id = provider
        .get_chainid()
        .await
        .map_err(|e| Error::Network(format!("failed to get chain id: {e}")))?
        .as_u64();
    network.ensure_chain_id(chain_id)?;
    Ok(chain_id)
}

/// Connects to `rpc_url`, checks it serves `network` and binds the wallet to
/// the chain id the node reports, so signed transactions carry the right
/// replay protection.
pub async fn connect_signer(
    network: Network,
    rpc_url: &str,
    private_key: &str,
    timeout: Duration,
) -> Result<Arc<SignerClient>> {
    let provider = http_provider(rpc_url, timeout)?;
    let chain_id = connected_chain_id(&provider, network).await?;

    let wallet = parse_wallet(private_key)?.with_chain_id(chain_id);
    info!("Connected to chain {chain_id} as {:?}", wallet.address());
    Ok(Arc::new(SignerMiddleware::new(provider, wallet)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::types::U256;

    // Randomly generated for testing, holds no funds
    const TEST_KEY: &str = "e908f86dbb4d55ac876378565aafeabc187f6690f046459397b17d9b9a19688e";

    #[test]
    fn test_parse_wallet_accepts_optional_prefix() {
        let plain = parse_wallet(TEST_KEY).unwrap();
        let prefixed = parse_wallet(&format!("0x{TEST_KEY}")).unwrap();
        assert_eq!(plain.address(), prefixed.address());
    }

    #[test]
    fn test_parse_wallet_rejects_garbage() {
        assert!(matches!(parse_wallet("not-a-key"), Err(Error::PrivateKeyParse(_))));
    }

    #[test]
    fn test_http_provider_rejects_bad_url() {
        assert!(matches!(
            http_provider("not a url", DEFAULT_RPC_TIMEOUT),
            Err(Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_connected_chain_id_matches_network() {
        let (provider, mock) = Provider::mocked();
        mock.push::<U256, _>(U256::from(10u64)).unwrap();
        assert_eq!(connected_chain_id(&provider, Network::Optimism).await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_connected_chain_id_rejects_counterpart_rpc() {
        let (provider, mock) = Provider::mocked();
        mock.push::<U256, _>(U256::from(10u64)).unwrap();
        let err = connected_chain_id(&provider, Network::Base).await.unwrap_err();
        assert!(matches!(err, Error::ConfigMismatch { network: Network::Base, .. }));
    }

    #[tokio::test]
    async fn test_connected_chain_id_allows_local_devnet() {
        let (provider, mock) = Provider::mocked();
        mock.push::<U256, _>(U256::from(31_337u64)).unwrap();
        assert_eq!(connected_chain_id(&provider, Network::Base).await.unwrap(), 31_337);
    }

    #[test]
    fn test_http_provider_accepts_local_node() {
        assert!(http_provider("http://127.0.0.1:8545", DEFAULT_RPC_TIMEOUT).is_ok());
    }
}
