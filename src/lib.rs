//! Sends Polymer cross-chain token transfers between Optimism and Base.
//!
//! The active network picks the direction: the port contract on the active
//! network is called, the port on the other network is the destination, and
//! the active network's channel carries the packet.

pub mod channel;
pub mod client;
pub mod config;
mod errors;
pub mod network;
pub mod prelude;
pub mod transfer;

pub use channel::ChannelId;
pub use client::{connect_signer, SignerClient};
pub use config::{EndpointTable, NetworkEndpoint};
pub use errors::Error;
pub use network::Network;
pub use transfer::{
    ContractPort, TransferDispatcher, TransferPort, TransferRequest, TransferResult,
};
