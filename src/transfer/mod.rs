mod dispatcher;
mod port;

pub use dispatcher::TransferDispatcher;
pub use port::{ContractPort, PolymerL2CrosschainToken, TransferPort};

use chrono::{DateTime, Utc};
use ethers::types::{Address, H256, U256};

use crate::channel::ChannelId;
use crate::network::Network;
use crate::prelude::Result;
use crate::Error;

/// Arguments of one `crosschainTransfer` call on a source port contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub destination_port_address: Address,
    pub channel_id: ChannelId,
    pub recipient: Address,
    pub amount: U256,
}

/// Outcome of a dispatch.
///
/// Only acceptance by the RPC node is observed; the transaction may still be
/// dropped or revert once mined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferResult {
    SubmittedNotConfirmed {
        transaction_hash: H256,
        source: Network,
        destination: Network,
        submitted_at: DateTime<Utc>,
    },
}

impl TransferResult {
    pub fn transaction_hash(&self) -> H256 {
        match self {
            TransferResult::SubmittedNotConfirmed {
                transaction_hash, ..
            } => *transaction_hash,
        }
    }
}

/// Parses a decimal token amount in base units. Zero is rejected.
pub fn parse_amount(raw: &str) -> Result<U256> {
    let amount = U256::from_dec_str(raw.trim())
        .map_err(|e| Error::InvalidAmount(format!("{raw:?}: {e}")))?;
    if amount.is_zero() {
        return Err(Error::InvalidAmount("amount must be positive".to_string()));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12000000").unwrap(), U256::from(12_000_000u64));
        assert_eq!(parse_amount(" 1 ").unwrap(), U256::one());
    }

    #[test]
    fn test_parse_amount_rejects_zero_and_garbage() {
        for raw in ["0", "000", "", "-5", "1.5", "0x10"] {
            assert!(
                matches!(parse_amount(raw), Err(Error::InvalidAmount(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
