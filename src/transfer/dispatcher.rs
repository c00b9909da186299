use std::time::Duration;

use chrono::Utc;
use ethers::types::{Address, U256};
use uuid::Uuid;

use super::{TransferPort, TransferRequest, TransferResult};
use crate::channel::ChannelId;
use crate::config::EndpointTable;
use crate::network::Network;
use crate::prelude::*;
use crate::Error;

/// Sends a transfer from whichever network is active to the other side of
/// the bridge.
#[derive(Debug)]
pub struct TransferDispatcher<P> {
    port: P,
    submit_timeout: Option<Duration>,
}

impl<P: TransferPort> TransferDispatcher<P> {
    pub fn new(port: P) -> Self {
        TransferDispatcher {
            port,
            submit_timeout: None,
        }
    }

    /// Bounds the wait for the node to accept the transaction. Expiry is
    /// reported as [`Error::Network`]; once accepted the transaction is out of
    /// our hands either way.
    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = Some(timeout);
        self
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Resolves source and destination for `active` and builds the request,
    /// without touching the network.
    pub fn prepare(
        &self,
        active: Network,
        endpoints: &EndpointTable,
        recipient: Address,
        amount: U256,
    ) -> Result<(Address, TransferRequest)> {
        if amount.is_zero() {
            return Err(Error::InvalidAmount("amount must be positive".to_string()));
        }

        let (source, destination) = endpoints.select(active)?;
        let channel_id = ChannelId::encode(&source.channel_id)?;

        let request = TransferRequest {
            destination_port_address: destination.port_address,
            channel_id,
            recipient,
            amount,
        };
        Ok((source.port_address, request))
    }

    pub async fn dispatch_transfer(
        &self,
        active: Network,
        endpoints: &EndpointTable,
        recipient: Address,
        amount: U256,
    ) -> Result<TransferResult> {
        let dispatch_id = Uuid::new_v4();
        let (source_port, request) = self.prepare(active, endpoints, recipient, amount)?;
        let destination = active.counterpart();

        info!(
            "[{dispatch_id}] crosschainTransfer {amount} from {active} ({source_port:?}) to {destination} ({:?}) over {:?}, recipient {recipient:?}",
            request.destination_port_address, request.channel_id
        );

        let submission = self.port.crosschain_transfer(source_port, &request);
        let transaction_hash = match self.submit_timeout {
            Some(limit) => tokio::time::timeout(limit, submission).await.map_err(|_| {
                Error::Network(format!("transaction not accepted within {limit:?}"))
            })??,
            None => submission.await?,
        };

        info!("[{dispatch_id}] submitted {transaction_hash:?}, not awaiting confirmation");
        Ok(TransferResult::SubmittedNotConfirmed {
            transaction_hash,
            source: active,
            destination,
            submitted_at: Utc::now(),
        })
    }
}
