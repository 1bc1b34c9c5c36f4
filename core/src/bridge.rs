//! External-transfer escrow book.
//!
//! Tracks how much each address has pre-approved to leave the ledger toward
//! a specific destination on an external network. The network identifier and
//! external address are opaque to the ledger; they are recorded and matched
//! byte-for-byte, never interpreted.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::{CoinError, CoinResult};

/// Opaque external network identifier.
pub type NetworkId = String;

/// Opaque destination address blob on an external network.
pub type ExternalAddress = Vec<u8>;

/// Escrow key: one allowance per (owner, network, destination) triple.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EscrowKey {
    pub owner: Address,
    pub network: NetworkId,
    pub external_address: ExternalAddress,
}

impl EscrowKey {
    pub fn new(
        owner: Address,
        network: impl Into<NetworkId>,
        external_address: impl Into<ExternalAddress>,
    ) -> Self {
        Self {
            owner,
            network: network.into(),
            external_address: external_address.into(),
        }
    }
}

/// Per-destination escrow allowances, decremented as value leaves the ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalBridge {
    escrow: IndexMap<EscrowKey, u64>,
}

impl ExternalBridge {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn escrow_of(&self, key: &EscrowKey) -> u64 {
        self.escrow.get(key).copied().unwrap_or(0)
    }

    /// Absolute set, not additive.
    pub fn set_escrow(&mut self, key: EscrowKey, amount: u64) {
        self.escrow.insert(key, amount);
    }

    /// Consume part of an escrow allowance, returning the remainder.
    pub fn spend_escrow(&mut self, key: &EscrowKey, amount: u64) -> CoinResult<u64> {
        let allowance = self.escrow_of(key);
        let remaining = allowance
            .checked_sub(amount)
            .ok_or(CoinError::InsufficientAllowance {
                allowance,
                required: amount,
            })?;
        self.escrow.insert(key.clone(), remaining);
        Ok(remaining)
    }
}
