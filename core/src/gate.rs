//! Compliance admission gate.
//!
//! Composes the KYC-passed set, the frozen set and the global pause flag
//! into a single admission check run before every balance-mutating call.
//! The gate itself performs no role authorization; callers resolve that
//! against the role registry first.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::{CoinError, CoinResult};
use crate::identity::IdentitySet;

/// Per-account compliance state plus the ledger-wide pause flag.
///
/// Conceptual per-account state machine: unknown → KYC-approved ⇄ frozen,
/// where freezing is reachable only for approved accounts and blocks outbound
/// movement only. Pause is global and overrides everything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceGate {
    kyc_passed: IdentitySet,
    frozen: IdentitySet,
    paused: bool,
}

impl ComplianceGate {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_kyc_passed(&self, account: &Address) -> bool {
        self.kyc_passed.contains(account)
    }

    #[inline]
    pub fn is_frozen(&self, account: &Address) -> bool {
        self.frozen.contains(account)
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Admission check for a value-moving operation.
    ///
    /// Failure order is fixed: global pause, then sender KYC, then sender
    /// freeze, then counterparty KYC (recipient or spender, where one is
    /// required). Freeze blocks outbound movement only, so the counterparty
    /// is never checked against the frozen set.
    pub fn check_transfer_allowed(
        &self,
        sender: &Address,
        counterparty: Option<&Address>,
    ) -> CoinResult<()> {
        if self.paused {
            return Err(CoinError::Paused);
        }
        if !self.kyc_passed.contains(sender) {
            return Err(CoinError::NotKycApproved(*sender));
        }
        if self.frozen.contains(sender) {
            return Err(CoinError::AccountFrozen(*sender));
        }
        if let Some(party) = counterparty {
            if !self.kyc_passed.contains(party) {
                return Err(CoinError::NotKycApproved(*party));
            }
        }
        Ok(())
    }

    /// KYC check for a single account, independent of pause/freeze.
    pub fn require_kyc(&self, account: &Address) -> CoinResult<()> {
        if !self.kyc_passed.contains(account) {
            return Err(CoinError::NotKycApproved(*account));
        }
        Ok(())
    }

    /// Grant KYC approval. Idempotent.
    pub fn set_kyc_passed(&mut self, account: Address) {
        self.kyc_passed.insert(account);
    }

    /// Revoke KYC approval. Idempotent; freeze state is untouched.
    pub fn unset_kyc_passed(&mut self, account: &Address) {
        self.kyc_passed.remove(account);
    }

    /// Block outbound movement from an account. Independent of KYC.
    pub fn freeze(&mut self, account: Address) {
        self.frozen.insert(account);
    }

    pub fn unfreeze(&mut self, account: &Address) {
        self.frozen.remove(account);
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn unpause(&mut self) {
        self.paused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(tag: u8) -> Address {
        Address::new([tag; 32])
    }

    fn approved_gate() -> ComplianceGate {
        let mut gate = ComplianceGate::new();
        gate.set_kyc_passed(addr(1));
        gate.set_kyc_passed(addr(2));
        gate
    }

    #[test]
    fn test_admission_passes_for_approved_accounts() {
        let gate = approved_gate();
        assert!(gate.check_transfer_allowed(&addr(1), Some(&addr(2))).is_ok());
        assert!(gate.check_transfer_allowed(&addr(1), None).is_ok());
    }

    #[test]
    fn test_failure_order_pause_kyc_freeze_counterparty() {
        let mut gate = approved_gate();
        gate.freeze(addr(1));
        gate.unset_kyc_passed(&addr(1));
        gate.pause();

        // Pause masks everything
        assert_eq!(
            gate.check_transfer_allowed(&addr(1), Some(&addr(3))),
            Err(CoinError::Paused)
        );
        gate.unpause();

        // Then sender KYC
        assert_eq!(
            gate.check_transfer_allowed(&addr(1), Some(&addr(3))),
            Err(CoinError::NotKycApproved(addr(1)))
        );
        gate.set_kyc_passed(addr(1));

        // Then sender freeze
        assert_eq!(
            gate.check_transfer_allowed(&addr(1), Some(&addr(3))),
            Err(CoinError::AccountFrozen(addr(1)))
        );
        gate.unfreeze(&addr(1));

        // Then counterparty KYC
        assert_eq!(
            gate.check_transfer_allowed(&addr(1), Some(&addr(3))),
            Err(CoinError::NotKycApproved(addr(3)))
        );
    }

    #[test]
    fn test_frozen_counterparty_is_admitted() {
        let mut gate = approved_gate();
        gate.freeze(addr(2));
        // Freeze blocks outbound only
        assert!(gate.check_transfer_allowed(&addr(1), Some(&addr(2))).is_ok());
    }

    #[test]
    fn test_freeze_is_independent_of_kyc() {
        let mut gate = ComplianceGate::new();
        gate.freeze(addr(9));
        assert!(gate.is_frozen(&addr(9)));
        assert!(!gate.is_kyc_passed(&addr(9)));
        gate.unset_kyc_passed(&addr(9));
        assert!(gate.is_frozen(&addr(9)));
    }
}
