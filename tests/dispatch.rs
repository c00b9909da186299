//! End-to-end dispatch behaviour against recording and mocked ports.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use crosschain_transfer::prelude::Result;
use crosschain_transfer::{
    ChannelId, ContractPort, EndpointTable, Error, Network, NetworkEndpoint, TransferDispatcher,
    TransferPort, TransferRequest,
};
use ethers::providers::Provider;
use ethers::types::{Address, H256, U256};

const AMOUNT: u64 = 12_000_000;

#[derive(Default)]
struct RecordingPort {
    calls: Mutex<Vec<(Address, TransferRequest)>>,
}

#[async_trait]
impl TransferPort for RecordingPort {
    async fn crosschain_transfer(
        &self,
        source_port: Address,
        request: &TransferRequest,
    ) -> Result<H256> {
        self.calls.lock().unwrap().push((source_port, request.clone()));
        Ok(H256::repeat_byte(0x01))
    }
}

fn port_a() -> Address {
    Address::repeat_byte(0x0a)
}

fn port_b() -> Address {
    Address::repeat_byte(0x0b)
}

fn recipient() -> Address {
    Address::repeat_byte(0x0e)
}

fn endpoints() -> EndpointTable {
    EndpointTable::new(
        NetworkEndpoint::new(Network::Optimism, port_a(), "chan-op"),
        NetworkEndpoint::new(Network::Base, port_b(), "chan-base"),
    )
    .unwrap()
}

async fn dispatch_recorded(active: Network, table: &EndpointTable) -> (Address, TransferRequest) {
    let dispatcher = TransferDispatcher::new(RecordingPort::default());
    dispatcher
        .dispatch_transfer(active, table, recipient(), U256::from(AMOUNT))
        .await
        .unwrap();

    let mut calls = dispatcher.port().calls.lock().unwrap();
    assert_eq!(calls.len(), 1, "exactly one contract call per dispatch");
    calls.pop().unwrap()
}

#[tokio::test]
async fn test_optimism_sends_to_base() {
    let (called, request) = dispatch_recorded(Network::Optimism, &endpoints()).await;

    assert_eq!(called, port_a());
    assert_eq!(request.destination_port_address, port_b());
    assert_eq!(request.channel_id, ChannelId::encode("chan-op").unwrap());
    assert_eq!(request.recipient, recipient());
    assert_eq!(request.amount, U256::from(AMOUNT));
}

#[tokio::test]
async fn test_base_sends_to_optimism() {
    let (called, request) = dispatch_recorded(Network::Base, &endpoints()).await;

    assert_eq!(called, port_b());
    assert_eq!(request.destination_port_address, port_a());
    assert_eq!(request.channel_id.decode().unwrap(), "chan-base");
}

#[tokio::test]
async fn test_selection_is_symmetric() {
    let table = endpoints();
    for active in Network::ALL {
        let (called, request) = dispatch_recorded(active, &table).await;
        let source = table.get(active).unwrap();
        let destination = table.get(active.counterpart()).unwrap();

        assert_eq!(called, source.port_address);
        assert_eq!(request.destination_port_address, destination.port_address);
        assert_ne!(called, request.destination_port_address);
    }
}

#[tokio::test]
async fn test_oversized_channel_fails_before_submission() {
    let table = EndpointTable::new(
        NetworkEndpoint::new(Network::Optimism, port_a(), "c".repeat(33)),
        NetworkEndpoint::new(Network::Base, port_b(), "chan-base"),
    )
    .unwrap();
    let dispatcher = TransferDispatcher::new(RecordingPort::default());

    let err = dispatcher
        .dispatch_transfer(Network::Optimism, &table, recipient(), U256::from(AMOUNT))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Encoding(_)));
    assert!(dispatcher.port().calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_rpc_failure_is_network_error() {
    // No queued responses: every RPC request made by the mock fails.
    let (provider, _mock) = Provider::mocked();
    let dispatcher = TransferDispatcher::new(ContractPort::new(Arc::new(provider)));

    let err = dispatcher
        .dispatch_transfer(Network::Optimism, &endpoints(), recipient(), U256::from(AMOUNT))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Network(_)), "unexpected error: {err:?}");
}
