use thiserror::Error;

use crate::network::Network;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Unsupported network {0:?}, expected one of: optimism, base")]
    UnsupportedNetwork(String),
    #[error("Config mismatch for active network {network}: {reason}")]
    ConfigMismatch { network: Network, reason: String },
    #[error("Channel id encoding error: {0}")]
    Encoding(String),
    #[error("Invalid transfer amount: {0}")]
    InvalidAmount(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Contract reverted: {0}")]
    Contract(String),
    #[error("Private key parse error: {0}")]
    PrivateKeyParse(String),
    #[error("Json parse error: {0}")]
    JsonParse(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::JsonParse(e.to_string())
    }
}
