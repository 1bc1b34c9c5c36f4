//! Role registry.
//!
//! Holds the five singleton role bindings and authorizes every role-changing
//! operation. Exactly one live holder per role at any time; `proposed_owner`
//! is `Some` only between a proposal and its claim.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::{CoinError, CoinResult};

/// Which manager is authorized to wipe frozen accounts.
///
/// Recorded at initialization rather than hard-coded; deployments differ on
/// whether enforcement or compliance holds this power.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WipeAuthority {
    EnforcementManager,
    ComplianceManager,
}

/// The five singleton role bindings plus the wipe authority configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRegistry {
    owner: Address,
    proposed_owner: Option<Address>,
    supply_manager: Address,
    compliance_manager: Address,
    enforcement_manager: Address,
    wipe_authority: WipeAuthority,
}

impl RoleRegistry {
    pub fn new(
        owner: Address,
        supply_manager: Address,
        compliance_manager: Address,
        enforcement_manager: Address,
        wipe_authority: WipeAuthority,
    ) -> Self {
        Self {
            owner,
            proposed_owner: None,
            supply_manager,
            compliance_manager,
            enforcement_manager,
            wipe_authority,
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn proposed_owner(&self) -> Option<Address> {
        self.proposed_owner
    }

    pub fn supply_manager(&self) -> Address {
        self.supply_manager
    }

    pub fn compliance_manager(&self) -> Address {
        self.compliance_manager
    }

    pub fn enforcement_manager(&self) -> Address {
        self.enforcement_manager
    }

    pub fn wipe_authority(&self) -> WipeAuthority {
        self.wipe_authority
    }

    /// The address currently authorized to wipe frozen accounts.
    pub fn wiper(&self) -> Address {
        match self.wipe_authority {
            WipeAuthority::EnforcementManager => self.enforcement_manager,
            WipeAuthority::ComplianceManager => self.compliance_manager,
        }
    }

    pub fn require_owner(&self, caller: &Address) -> CoinResult<()> {
        if *caller != self.owner {
            return Err(CoinError::Unauthorized);
        }
        Ok(())
    }

    pub fn require_supply_manager(&self, caller: &Address) -> CoinResult<()> {
        if *caller != self.supply_manager {
            return Err(CoinError::Unauthorized);
        }
        Ok(())
    }

    pub fn require_compliance_manager(&self, caller: &Address) -> CoinResult<()> {
        if *caller != self.compliance_manager {
            return Err(CoinError::Unauthorized);
        }
        Ok(())
    }

    pub fn require_wiper(&self, caller: &Address) -> CoinResult<()> {
        if *caller != self.wiper() {
            return Err(CoinError::Unauthorized);
        }
        Ok(())
    }

    /// Propose a new owner. Owner-gated; overwrites any pending proposal.
    pub fn propose_owner(&mut self, caller: &Address, candidate: Address) -> CoinResult<()> {
        self.require_owner(caller)?;
        self.proposed_owner = Some(candidate);
        Ok(())
    }

    /// Claim a pending ownership proposal.
    ///
    /// Only the proposed owner may claim. Clears the proposal and returns the
    /// previous owner so the caller can report the handover.
    pub fn claim_ownership(&mut self, caller: &Address) -> CoinResult<Address> {
        let proposed = self.proposed_owner.ok_or(CoinError::NoProposalPending)?;
        if *caller != proposed {
            return Err(CoinError::Unauthorized);
        }
        let previous = self.owner;
        self.owner = proposed;
        self.proposed_owner = None;
        Ok(previous)
    }

    /// Reassign the supply manager role. Returns the outgoing holder.
    ///
    /// No role change revokes the outgoing holder's KYC or freeze state; that
    /// cleanup is the owner's responsibility.
    pub fn change_supply_manager(
        &mut self,
        caller: &Address,
        new_manager: Address,
    ) -> CoinResult<Address> {
        self.require_owner(caller)?;
        let previous = self.supply_manager;
        self.supply_manager = new_manager;
        Ok(previous)
    }

    /// Reassign the compliance manager role. Returns the outgoing holder.
    pub fn change_compliance_manager(
        &mut self,
        caller: &Address,
        new_manager: Address,
    ) -> CoinResult<Address> {
        self.require_owner(caller)?;
        let previous = self.compliance_manager;
        self.compliance_manager = new_manager;
        Ok(previous)
    }

    /// Reassign the enforcement manager role. Returns the outgoing holder.
    pub fn change_enforcement_manager(
        &mut self,
        caller: &Address,
        new_manager: Address,
    ) -> CoinResult<Address> {
        self.require_owner(caller)?;
        let previous = self.enforcement_manager;
        self.enforcement_manager = new_manager;
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(tag: u8) -> Address {
        Address::new([tag; 32])
    }

    fn registry() -> RoleRegistry {
        RoleRegistry::new(
            addr(1),
            addr(2),
            addr(3),
            addr(4),
            WipeAuthority::EnforcementManager,
        )
    }

    #[test]
    fn test_role_checks() {
        let roles = registry();
        assert!(roles.require_owner(&addr(1)).is_ok());
        assert_eq!(roles.require_owner(&addr(2)), Err(CoinError::Unauthorized));
        assert!(roles.require_supply_manager(&addr(2)).is_ok());
        assert!(roles.require_compliance_manager(&addr(3)).is_ok());
        assert!(roles.require_wiper(&addr(4)).is_ok());
        assert_eq!(roles.require_wiper(&addr(3)), Err(CoinError::Unauthorized));
    }

    #[test]
    fn test_wipe_authority_selects_manager() {
        let mut roles = registry();
        assert_eq!(roles.wiper(), addr(4));
        roles.wipe_authority = WipeAuthority::ComplianceManager;
        assert_eq!(roles.wiper(), addr(3));
    }

    #[test]
    fn test_propose_and_claim_ownership() {
        let mut roles = registry();

        // Claim without a proposal pending
        assert_eq!(
            roles.claim_ownership(&addr(5)),
            Err(CoinError::NoProposalPending)
        );

        // Only the owner may propose
        assert_eq!(
            roles.propose_owner(&addr(2), addr(5)),
            Err(CoinError::Unauthorized)
        );
        roles.propose_owner(&addr(1), addr(5)).unwrap();
        assert_eq!(roles.proposed_owner(), Some(addr(5)));

        // Only the proposed owner may claim
        assert_eq!(roles.claim_ownership(&addr(6)), Err(CoinError::Unauthorized));
        let previous = roles.claim_ownership(&addr(5)).unwrap();
        assert_eq!(previous, addr(1));
        assert_eq!(roles.owner(), addr(5));
        assert_eq!(roles.proposed_owner(), None);
    }

    #[test]
    fn test_manager_reassignment_is_owner_gated() {
        let mut roles = registry();
        assert_eq!(
            roles.change_supply_manager(&addr(2), addr(9)),
            Err(CoinError::Unauthorized)
        );
        let previous = roles.change_supply_manager(&addr(1), addr(9)).unwrap();
        assert_eq!(previous, addr(2));
        assert_eq!(roles.supply_manager(), addr(9));

        let previous = roles.change_compliance_manager(&addr(1), addr(8)).unwrap();
        assert_eq!(previous, addr(3));
        let previous = roles.change_enforcement_manager(&addr(1), addr(7)).unwrap();
        assert_eq!(previous, addr(4));
        assert_eq!(roles.wiper(), addr(7));
    }
}
