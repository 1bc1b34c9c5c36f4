//! Notification events.
//!
//! Every state-changing call appends one typed record per mutation to an
//! [`EventLog`] supplied by the caller. The log is an output channel, not
//! global state: the ledger never reads it back.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::bridge::{ExternalAddress, NetworkId};

/// One record per state change, carrying the fields consumers index on.
///
/// Mint and burn are reported as `Transfer` with [`Address::ZERO`] on the
/// created/destroyed side, following the usual token convention.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum CoinEvent {
    ProposeOwner {
        owner: Address,
        proposed: Address,
    },
    ClaimOwnership {
        previous_owner: Address,
        new_owner: Address,
    },
    ChangeSupplyManager {
        previous_manager: Address,
        new_manager: Address,
    },
    ChangeComplianceManager {
        previous_manager: Address,
        new_manager: Address,
    },
    ChangeEnforcementManager {
        previous_manager: Address,
        new_manager: Address,
    },
    SetKycPassed {
        account: Address,
    },
    UnsetKycPassed {
        account: Address,
    },
    Freeze {
        account: Address,
    },
    Unfreeze {
        account: Address,
    },
    Pause,
    Unpause,
    Transfer {
        from: Address,
        to: Address,
        amount: u64,
    },
    Approve {
        owner: Address,
        spender: Address,
        amount: u64,
    },
    /// Carries the new allowance total, not the delta
    IncreaseAllowance {
        owner: Address,
        spender: Address,
        allowance: u64,
    },
    /// Carries the new allowance total, not the delta
    DecreaseAllowance {
        owner: Address,
        spender: Address,
        allowance: u64,
    },
    Wipe {
        account: Address,
        amount: u64,
    },
    ApproveExternalTransfer {
        owner: Address,
        network: NetworkId,
        external_address: ExternalAddress,
        amount: u64,
    },
    ExternalTransfer {
        owner: Address,
        network: NetworkId,
        external_address: ExternalAddress,
        amount: u64,
    },
    ExternalTransferFrom {
        external_address: ExternalAddress,
        network: NetworkId,
        recipient: Address,
        amount: u64,
    },
}

/// Append-only, ordered log of [`CoinEvent`] records.
///
/// Passed as an output parameter to every mutating operation. Records are
/// appended in mutation order and never removed or reordered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<CoinEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record to the log.
    pub fn record(&mut self, event: CoinEvent) {
        self.entries.push(event);
    }

    pub fn entries(&self) -> &[CoinEvent] {
        &self.entries
    }

    pub fn last(&self) -> Option<&CoinEvent> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CoinEvent> {
        self.entries.iter()
    }
}
