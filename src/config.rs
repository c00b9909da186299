//! Endpoint configuration for the two sides of the bridge.
//!
//! The config file is JSON shaped like:
//!
//! ```json
//! {
//!   "crosschainTransfer": {
//!     "optimism": { "portAddr": "0x...", "channelId": "channel-10" },
//!     "base":     { "portAddr": "0x...", "channelId": "channel-11" }
//!   }
//! }
//! ```
//!
//! Other top-level sections are ignored so the same file can be shared with
//! deployment tooling.

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fs;
use std::path::Path;

use ethers::types::Address;
use serde::Deserialize;

use crate::network::Network;
use crate::prelude::*;
use crate::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub crosschain_transfer: HashMap<String, EndpointEntry>,
}

/// Raw, unvalidated endpoint entry as it appears in the file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointEntry {
    pub port_addr: String,
    pub channel_id: String,
}

/// A validated endpoint: the port contract on one network and the channel it
/// sends over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkEndpoint {
    pub network: Network,
    pub port_address: Address,
    pub channel_id: String,
}

impl NetworkEndpoint {
    pub fn new(network: Network, port_address: Address, channel_id: impl Into<String>) -> Self {
        NetworkEndpoint {
            network,
            port_address,
            channel_id: channel_id.into(),
        }
    }
}

/// Lookup table from network to endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointTable {
    endpoints: BTreeMap<Network, NetworkEndpoint>,
}

impl EndpointTable {
    /// Builds a table holding both sides of the bridge.
    pub fn new(a: NetworkEndpoint, b: NetworkEndpoint) -> Result<Self> {
        if a.network == b.network {
            return Err(Error::Config(format!(
                "both endpoints are configured for {}",
                a.network
            )));
        }
        Ok([a, b].into_iter().collect())
    }

    pub fn get(&self, network: Network) -> Option<&NetworkEndpoint> {
        self.endpoints.get(&network)
    }

    /// Returns `(source, destination)` for a transfer sent from `active`.
    pub fn select(&self, active: Network) -> Result<(&NetworkEndpoint, &NetworkEndpoint)> {
        let source = self.get(active).ok_or_else(|| Error::ConfigMismatch {
            network: active,
            reason: "no endpoint configured".to_string(),
        })?;
        let destination = self
            .get(active.counterpart())
            .ok_or_else(|| Error::Config(format!("no endpoint configured for {}", active.counterpart())))?;
        Ok((source, destination))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading endpoint config from {}", path.display());
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(raw)?;
        Self::from_config(&file)
    }

    pub fn from_config(file: &ConfigFile) -> Result<Self> {
        let mut entries: BTreeMap<Network, (&str, &EndpointEntry)> = BTreeMap::new();
        for (key, entry) in &file.crosschain_transfer {
            let Ok(network) = key.parse::<Network>() else {
                warn!("Ignoring crosschainTransfer entry for unsupported network {key:?}");
                continue;
            };
            if let Some((previous, _)) = entries.insert(network, (key.as_str(), entry)) {
                return Err(Error::Config(format!(
                    "crosschainTransfer has both {previous:?} and {key:?} for {network}"
                )));
            }
        }

        let endpoint = |network: Network| -> Result<NetworkEndpoint> {
            let (_, entry) = entries.get(&network).ok_or_else(|| {
                Error::Config(format!("missing crosschainTransfer.{network} entry"))
            })?;
            let port_address = entry.port_addr.trim().parse::<Address>().map_err(|e| {
                Error::Config(format!(
                    "invalid crosschainTransfer.{network}.portAddr {:?}: {e}",
                    entry.port_addr
                ))
            })?;
            if entry.channel_id.is_empty() {
                return Err(Error::Config(format!(
                    "crosschainTransfer.{network}.channelId is empty"
                )));
            }
            Ok(NetworkEndpoint::new(network, port_address, entry.channel_id.clone()))
        };

        Self::new(endpoint(Network::Optimism)?, endpoint(Network::Base)?)
    }
}

impl FromIterator<NetworkEndpoint> for EndpointTable {
    fn from_iter<I: IntoIterator<Item = NetworkEndpoint>>(iter: I) -> Self {
        EndpointTable {
            endpoints: iter.into_iter().map(|e| (e.network, e)).collect(),
        }
    }
}

/// Picks the RPC endpoint for `network`: an explicit override wins, otherwise
/// the network's `*_RPC_URL` environment variable.
pub fn resolve_rpc_url(network: Network, override_url: Option<&str>) -> Result<String> {
    if let Some(url) = override_url {
        return Ok(url.to_string());
    }
    env::var(network.rpc_url_env()).map_err(|_| {
        Error::Config(format!(
            "no RPC url for {network}: pass --rpc-url or set {}",
            network.rpc_url_env()
        ))
    })
}
