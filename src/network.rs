//! Networks the Polymer port contracts are deployed on.

use std::fmt;
use std::str::FromStr;

use crate::prelude::warn;
use crate::Error;

/// One side of the supported bridge pair.
///
/// The set is closed: every transfer goes from one variant to its
/// [`counterpart`](Network::counterpart), so source and destination can never
/// collapse onto the same network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Network {
    Optimism,
    Base,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Optimism, Network::Base];

    /// The other end of the bridge.
    pub fn counterpart(self) -> Network {
        match self {
            Network::Optimism => Network::Base,
            Network::Base => Network::Optimism,
        }
    }

    /// Key used for this network in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Network::Optimism => "optimism",
            Network::Base => "base",
        }
    }

    /// Maps an EIP-155 chain id to the network it belongs to, mainnet or
    /// Sepolia testnet.
    pub fn from_chain_id(chain_id: u64) -> Option<Network> {
        match chain_id {
            10 | 11_155_420 => Some(Network::Optimism),
            8453 | 84_532 => Some(Network::Base),
            _ => None,
        }
    }

    /// Fails when `chain_id` belongs to the other side of the bridge. Unknown
    /// chains (local devnets) only warn.
    pub fn ensure_chain_id(self, chain_id: u64) -> Result<(), Error> {
        match Network::from_chain_id(chain_id) {
            Some(network) if network == self => Ok(()),
            Some(other) => Err(Error::ConfigMismatch {
                network: self,
                reason: format!("RPC is connected to chain {chain_id} ({other})"),
            }),
            None => {
                warn!("Chain id {chain_id} is not a known {self} chain, assuming a local network");
                Ok(())
            }
        }
    }

    /// Environment variable holding the RPC endpoint for this network.
    pub fn rpc_url_env(self) -> &'static str {
        match self {
            Network::Optimism => "OPTIMISM_RPC_URL",
            Network::Base => "BASE_RPC_URL",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "optimism" => Ok(Network::Optimism),
            "base" => Ok(Network::Base),
            _ => Err(Error::UnsupportedNetwork(s.to_string())),
        }
    }
}
