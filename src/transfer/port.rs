use std::sync::Arc;

use async_trait::async_trait;
use ethers::contract::{abigen, ContractCall, ContractError};
use ethers::providers::Middleware;
use ethers::types::{Address, H256};

use super::TransferRequest;
use crate::prelude::*;
use crate::Error;

abigen!(
    PolymerL2CrosschainToken,
    r#"[
        function crosschainTransfer(address destPortAddr, bytes32 channelId, address to, uint256 amount) external
    ]"#
);

/// Anything able to submit a `crosschainTransfer` to a port contract.
#[async_trait]
pub trait TransferPort: Send + Sync {
    /// Submits `request` to the port contract at `source_port` and returns the
    /// transaction hash as soon as the node accepts it.
    async fn crosschain_transfer(
        &self,
        source_port: Address,
        request: &TransferRequest,
    ) -> Result<H256>;
}

/// [`TransferPort`] backed by the generated contract binding.
#[derive(Debug)]
pub struct ContractPort<M> {
    client: Arc<M>,
}

impl<M> Clone for ContractPort<M> {
    fn clone(&self) -> Self {
        ContractPort {
            client: self.client.clone(),
        }
    }
}

impl<M: Middleware + 'static> ContractPort<M> {
    pub fn new(client: Arc<M>) -> Self {
        ContractPort { client }
    }

    /// Builds the unsent contract call, useful for inspecting calldata.
    pub fn build_call(&self, source_port: Address, request: &TransferRequest) -> ContractCall<M, ()> {
        PolymerL2CrosschainToken::new(source_port, self.client.clone()).crosschain_transfer(
            request.destination_port_address,
            request.channel_id.into(),
            request.recipient,
            request.amount,
        )
    }
}

#[async_trait]
impl<M: Middleware + 'static> TransferPort for ContractPort<M> {
    async fn crosschain_transfer(
        &self,
        source_port: Address,
        request: &TransferRequest,
    ) -> Result<H256> {
        let call = self.build_call(source_port, request);
        let pending = call.send().await.map_err(classify_contract_error)?;
        let tx_hash = pending.tx_hash();
        debug!("crosschainTransfer accepted by node: {tx_hash:?}");
        Ok(tx_hash)
    }
}

/// Splits ethers contract failures into reverts and transport failures.
fn classify_contract_error<M: Middleware>(err: ContractError<M>) -> Error {
    if let Some(reason) = err.decode_revert::<String>() {
        return Error::Contract(reason);
    }
    match err {
        ContractError::Revert(data) => Error::Contract(format!("0x{}", hex::encode(data))),
        ContractError::MiddlewareError { .. } | ContractError::ProviderError { .. } => {
            Error::Network(err.to_string())
        }
        other => Error::Contract(other.to_string()),
    }
}
