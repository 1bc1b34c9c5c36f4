//! The stablecoin contract: composition root of roles, gate, ledger and
//! bridge.
//!
//! Every public mutating operation resolves the caller, runs the role check
//! (for privileged calls) or the compliance gate (for balance-affecting
//! calls), mutates state, and appends one event per state change to the
//! caller-supplied [`EventLog`]. All checks complete before the first write,
//! so a returned error implies no observable mutation.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::bridge::{EscrowKey, ExternalAddress, ExternalBridge, NetworkId};
use crate::error::{CoinError, CoinResult};
use crate::events::{CoinEvent, EventLog};
use crate::gate::ComplianceGate;
use crate::ledger::Ledger;
use crate::roles::{RoleRegistry, WipeAuthority};

/// Parameters for the single-shot initializer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitParams {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Minted to the supply manager at initialization.
    pub initial_supply: u64,
    pub supply_manager: Address,
    pub compliance_manager: Address,
    pub enforcement_manager: Address,
    /// Which manager may wipe frozen accounts; deployments differ here, so
    /// it is recorded at init rather than hard-coded.
    pub wipe_authority: WipeAuthority,
}

/// In-process state of the coin.
///
/// Single-writer: callers must serialize mutating calls externally; the
/// contract holds no locks of its own and performs no I/O.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StableCoin {
    name: String,
    symbol: String,
    decimals: u8,
    /// `None` until `init` succeeds; doubles as the initialized flag.
    roles: Option<RoleRegistry>,
    gate: ComplianceGate,
    ledger: Ledger,
    bridge: ExternalBridge,
}

impl StableCoin {
    /// An uninitialized coin. Every mutating operation other than [`init`]
    /// fails with `NotInitialized` until the initializer has run.
    ///
    /// [`init`]: StableCoin::init
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct-and-initialize in one step, for callers that do not need
    /// the separate deploy-then-init lifecycle.
    pub fn initialized(caller: Address, params: InitParams) -> CoinResult<Self> {
        let mut coin = Self::new();
        coin.init(caller, params)?;
        Ok(coin)
    }

    /// Single-shot initializer.
    ///
    /// Assigns `caller` as owner and the three manager roles from `params`,
    /// mints the initial supply to the supply manager, and grants initial
    /// KYC approval to the owner and all three managers. A second call fails
    /// with `AlreadyInitialized` and changes nothing. Emits no events: the
    /// event stream starts with the first post-init operation.
    pub fn init(&mut self, caller: Address, params: InitParams) -> CoinResult<()> {
        if self.roles.is_some() {
            return Err(CoinError::AlreadyInitialized);
        }
        debug!(
            "initializing coin {} ({}) with supply {}",
            params.name, params.symbol, params.initial_supply
        );

        self.name = params.name;
        self.symbol = params.symbol;
        self.decimals = params.decimals;

        self.gate.set_kyc_passed(caller);
        self.gate.set_kyc_passed(params.supply_manager);
        self.gate.set_kyc_passed(params.compliance_manager);
        self.gate.set_kyc_passed(params.enforcement_manager);

        // Cannot overflow: supply starts at zero.
        self.ledger.mint(params.supply_manager, params.initial_supply)?;

        self.roles = Some(RoleRegistry::new(
            caller,
            params.supply_manager,
            params.compliance_manager,
            params.enforcement_manager,
            params.wipe_authority,
        ));
        Ok(())
    }

    fn roles(&self) -> CoinResult<&RoleRegistry> {
        self.roles.as_ref().ok_or(CoinError::NotInitialized)
    }

    fn roles_mut(&mut self) -> CoinResult<&mut RoleRegistry> {
        self.roles.as_mut().ok_or(CoinError::NotInitialized)
    }

    // ===== Read accessors =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn total_supply(&self) -> u64 {
        self.ledger.total_supply()
    }

    pub fn balance_of(&self, account: &Address) -> u64 {
        self.ledger.balance_of(account)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> u64 {
        self.ledger.allowance_of(owner, spender)
    }

    /// All accounts with a recorded balance, in insertion order.
    pub fn balances(&self) -> impl Iterator<Item = (&Address, u64)> {
        self.ledger.balances()
    }

    pub fn is_kyc_passed(&self, account: &Address) -> bool {
        self.gate.is_kyc_passed(account)
    }

    pub fn is_frozen(&self, account: &Address) -> bool {
        self.gate.is_frozen(account)
    }

    pub fn is_paused(&self) -> bool {
        self.gate.is_paused()
    }

    /// `None` before initialization.
    pub fn owner(&self) -> Option<Address> {
        self.roles.as_ref().map(|roles| roles.owner())
    }

    /// `None` before initialization or when no proposal is pending.
    pub fn proposed_owner(&self) -> Option<Address> {
        self.roles.as_ref().and_then(|roles| roles.proposed_owner())
    }

    pub fn supply_manager(&self) -> Option<Address> {
        self.roles.as_ref().map(|roles| roles.supply_manager())
    }

    pub fn compliance_manager(&self) -> Option<Address> {
        self.roles.as_ref().map(|roles| roles.compliance_manager())
    }

    pub fn enforcement_manager(&self) -> Option<Address> {
        self.roles.as_ref().map(|roles| roles.enforcement_manager())
    }

    pub fn wipe_authority(&self) -> Option<WipeAuthority> {
        self.roles.as_ref().map(|roles| roles.wipe_authority())
    }

    pub fn external_allowance_of(
        &self,
        owner: &Address,
        network: &str,
        external_address: &[u8],
    ) -> u64 {
        self.bridge
            .escrow_of(&EscrowKey::new(*owner, network, external_address))
    }

    // ===== Role administration =====

    pub fn propose_owner(
        &mut self,
        caller: Address,
        candidate: Address,
        log: &mut EventLog,
    ) -> CoinResult<()> {
        self.roles_mut()?.propose_owner(&caller, candidate)?;
        log.record(CoinEvent::ProposeOwner {
            owner: caller,
            proposed: candidate,
        });
        Ok(())
    }

    /// Claim a pending ownership proposal. The new owner is granted KYC
    /// approval and unfrozen as part of the handover.
    pub fn claim_ownership(&mut self, caller: Address, log: &mut EventLog) -> CoinResult<()> {
        let previous_owner = self.roles_mut()?.claim_ownership(&caller)?;
        self.gate.set_kyc_passed(caller);
        self.gate.unfreeze(&caller);
        debug!("ownership transferred {} -> {}", previous_owner, caller);
        log.record(CoinEvent::ClaimOwnership {
            previous_owner,
            new_owner: caller,
        });
        Ok(())
    }

    pub fn change_supply_manager(
        &mut self,
        caller: Address,
        new_manager: Address,
        log: &mut EventLog,
    ) -> CoinResult<()> {
        let previous_manager = self.roles_mut()?.change_supply_manager(&caller, new_manager)?;
        log.record(CoinEvent::ChangeSupplyManager {
            previous_manager,
            new_manager,
        });
        Ok(())
    }

    pub fn change_compliance_manager(
        &mut self,
        caller: Address,
        new_manager: Address,
        log: &mut EventLog,
    ) -> CoinResult<()> {
        let previous_manager = self
            .roles_mut()?
            .change_compliance_manager(&caller, new_manager)?;
        log.record(CoinEvent::ChangeComplianceManager {
            previous_manager,
            new_manager,
        });
        Ok(())
    }

    pub fn change_enforcement_manager(
        &mut self,
        caller: Address,
        new_manager: Address,
        log: &mut EventLog,
    ) -> CoinResult<()> {
        let previous_manager = self
            .roles_mut()?
            .change_enforcement_manager(&caller, new_manager)?;
        log.record(CoinEvent::ChangeEnforcementManager {
            previous_manager,
            new_manager,
        });
        Ok(())
    }

    // ===== Compliance administration =====

    fn require_kyc_admin(&self, caller: &Address) -> CoinResult<()> {
        let roles = self.roles()?;
        if *caller != roles.compliance_manager() && *caller != roles.owner() {
            return Err(CoinError::Unauthorized);
        }
        Ok(())
    }

    /// Grant KYC approval. Idempotent, but the event is emitted on every
    /// accepted call so consumers see each attestation.
    pub fn set_kyc_passed(
        &mut self,
        caller: Address,
        account: Address,
        log: &mut EventLog,
    ) -> CoinResult<()> {
        self.require_kyc_admin(&caller)?;
        self.gate.set_kyc_passed(account);
        log.record(CoinEvent::SetKycPassed { account });
        Ok(())
    }

    /// Revoke KYC approval. Idempotent; freeze state is untouched.
    pub fn unset_kyc_passed(
        &mut self,
        caller: Address,
        account: Address,
        log: &mut EventLog,
    ) -> CoinResult<()> {
        self.require_kyc_admin(&caller)?;
        self.gate.unset_kyc_passed(&account);
        log.record(CoinEvent::UnsetKycPassed { account });
        Ok(())
    }

    /// Block outbound movement from `account`.
    pub fn freeze(
        &mut self,
        caller: Address,
        account: Address,
        log: &mut EventLog,
    ) -> CoinResult<()> {
        self.roles()?.require_compliance_manager(&caller)?;
        self.gate.freeze(account);
        debug!("froze account {}", account);
        log.record(CoinEvent::Freeze { account });
        Ok(())
    }

    pub fn unfreeze(
        &mut self,
        caller: Address,
        account: Address,
        log: &mut EventLog,
    ) -> CoinResult<()> {
        self.roles()?.require_compliance_manager(&caller)?;
        self.gate.unfreeze(&account);
        log.record(CoinEvent::Unfreeze { account });
        Ok(())
    }

    /// Block every transfer-class operation ledger-wide.
    pub fn pause(&mut self, caller: Address, log: &mut EventLog) -> CoinResult<()> {
        self.roles()?.require_compliance_manager(&caller)?;
        self.gate.pause();
        debug!("ledger paused");
        log.record(CoinEvent::Pause);
        Ok(())
    }

    pub fn unpause(&mut self, caller: Address, log: &mut EventLog) -> CoinResult<()> {
        self.roles()?.require_compliance_manager(&caller)?;
        self.gate.unpause();
        debug!("ledger unpaused");
        log.record(CoinEvent::Unpause);
        Ok(())
    }

    // ===== Supply management =====

    /// Mint `amount` to the supply manager's own balance.
    pub fn mint(&mut self, caller: Address, amount: u64, log: &mut EventLog) -> CoinResult<()> {
        self.roles()?.require_supply_manager(&caller)?;
        self.ledger.mint(caller, amount)?;
        log.record(CoinEvent::Transfer {
            from: Address::ZERO,
            to: caller,
            amount,
        });
        Ok(())
    }

    /// Burn `amount` from the supply manager's own balance.
    pub fn burn(&mut self, caller: Address, amount: u64, log: &mut EventLog) -> CoinResult<()> {
        self.roles()?.require_supply_manager(&caller)?;
        self.ledger.burn(&caller, amount)?;
        log.record(CoinEvent::Transfer {
            from: caller,
            to: Address::ZERO,
            amount,
        });
        Ok(())
    }

    // ===== Transfers and allowances =====

    pub fn transfer(
        &mut self,
        caller: Address,
        recipient: Address,
        amount: u64,
        log: &mut EventLog,
    ) -> CoinResult<()> {
        self.roles()?;
        self.gate.check_transfer_allowed(&caller, Some(&recipient))?;
        self.ledger.transfer(&caller, recipient, amount)?;
        log.record(CoinEvent::Transfer {
            from: caller,
            to: recipient,
            amount,
        });
        Ok(())
    }

    /// Absolute allowance set, not additive.
    pub fn approve_allowance(
        &mut self,
        caller: Address,
        spender: Address,
        amount: u64,
        log: &mut EventLog,
    ) -> CoinResult<()> {
        self.roles()?;
        self.gate.check_transfer_allowed(&caller, Some(&spender))?;
        self.ledger.set_allowance(caller, spender, amount);
        log.record(CoinEvent::Approve {
            owner: caller,
            spender,
            amount,
        });
        Ok(())
    }

    pub fn increase_allowance(
        &mut self,
        caller: Address,
        spender: Address,
        delta: u64,
        log: &mut EventLog,
    ) -> CoinResult<()> {
        self.roles()?;
        self.gate.check_transfer_allowed(&caller, Some(&spender))?;
        let allowance = self.ledger.increase_allowance(caller, spender, delta)?;
        log.record(CoinEvent::IncreaseAllowance {
            owner: caller,
            spender,
            allowance,
        });
        Ok(())
    }

    pub fn decrease_allowance(
        &mut self,
        caller: Address,
        spender: Address,
        delta: u64,
        log: &mut EventLog,
    ) -> CoinResult<()> {
        self.roles()?;
        self.gate.check_transfer_allowed(&caller, Some(&spender))?;
        let allowance = self.ledger.decrease_allowance(caller, spender, delta)?;
        log.record(CoinEvent::DecreaseAllowance {
            owner: caller,
            spender,
            allowance,
        });
        Ok(())
    }

    /// Spend a previously granted allowance: moves `amount` owner → recipient
    /// and decrements allowance(owner, caller). Emits the Transfer and the
    /// updated Approve as a pair.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        owner: Address,
        recipient: Address,
        amount: u64,
        log: &mut EventLog,
    ) -> CoinResult<()> {
        self.roles()?;
        self.gate.check_transfer_allowed(&owner, Some(&recipient))?;
        // The spender moves value, so it needs approval too
        self.gate.require_kyc(&caller)?;

        let allowance = self.ledger.allowance_of(&owner, &caller);
        if allowance < amount {
            return Err(CoinError::InsufficientAllowance {
                allowance,
                required: amount,
            });
        }
        self.ledger.transfer(&owner, recipient, amount)?;
        let remaining = self.ledger.spend_allowance(&owner, &caller, amount)?;

        log.record(CoinEvent::Transfer {
            from: owner,
            to: recipient,
            amount,
        });
        log.record(CoinEvent::Approve {
            owner,
            spender: caller,
            amount: remaining,
        });
        Ok(())
    }

    // ===== Enforcement =====

    /// Zero a frozen account's balance, reducing total supply by the wiped
    /// amount. The account stays frozen; unfreezing is a separate call.
    pub fn wipe(
        &mut self,
        caller: Address,
        account: Address,
        log: &mut EventLog,
    ) -> CoinResult<()> {
        self.roles()?.require_wiper(&caller)?;
        if !self.gate.is_frozen(&account) {
            return Err(CoinError::AccountNotFrozen(account));
        }
        let amount = self.ledger.wipe_balance(&account)?;
        debug!("wiped {} units from {}", amount, account);
        log.record(CoinEvent::Wipe { account, amount });
        Ok(())
    }

    // ===== External bridge =====

    /// Pre-approve `amount` to leave the ledger toward one external
    /// destination. Absolute set, not additive.
    pub fn approve_external_transfer(
        &mut self,
        caller: Address,
        network: NetworkId,
        external_address: ExternalAddress,
        amount: u64,
        log: &mut EventLog,
    ) -> CoinResult<()> {
        self.roles()?;
        self.gate.check_transfer_allowed(&caller, None)?;
        self.bridge.set_escrow(
            EscrowKey::new(caller, network.clone(), external_address.clone()),
            amount,
        );
        log.record(CoinEvent::ApproveExternalTransfer {
            owner: caller,
            network,
            external_address,
            amount,
        });
        Ok(())
    }

    /// Outbound transfer: burns `amount` from `owner` against its escrow
    /// allowance for the destination. Only the supply manager may execute,
    /// acting on behalf of `owner`.
    pub fn external_transfer(
        &mut self,
        caller: Address,
        owner: Address,
        network: NetworkId,
        external_address: ExternalAddress,
        amount: u64,
        log: &mut EventLog,
    ) -> CoinResult<()> {
        self.roles()?.require_supply_manager(&caller)?;

        let key = EscrowKey::new(owner, network.clone(), external_address.clone());
        let escrow = self.bridge.escrow_of(&key);
        if escrow < amount {
            return Err(CoinError::InsufficientAllowance {
                allowance: escrow,
                required: amount,
            });
        }
        self.gate.check_transfer_allowed(&owner, None)?;
        let balance = self.ledger.balance_of(&owner);
        if balance < amount {
            return Err(CoinError::InsufficientBalance {
                balance,
                required: amount,
            });
        }

        // All checks passed; the value is burned as it leaves the ledger.
        self.ledger.burn(&owner, amount)?;
        self.bridge.spend_escrow(&key, amount)?;
        debug!("external transfer of {} from {} to {}", amount, owner, network);
        log.record(CoinEvent::ExternalTransfer {
            owner,
            network,
            external_address,
            amount,
        });
        Ok(())
    }

    /// Inbound transfer: mints `amount` to `recipient` on the supply
    /// manager's attestation that value arrived from an external network.
    /// No independent verification of the external network happens here.
    pub fn external_transfer_from(
        &mut self,
        caller: Address,
        external_address: ExternalAddress,
        network: NetworkId,
        recipient: Address,
        amount: u64,
        log: &mut EventLog,
    ) -> CoinResult<()> {
        self.roles()?.require_supply_manager(&caller)?;
        self.gate.require_kyc(&recipient)?;
        self.ledger.mint(recipient, amount)?;
        debug!("external transfer of {} from {} to {}", amount, network, recipient);
        log.record(CoinEvent::ExternalTransferFrom {
            external_address,
            network,
            recipient,
            amount,
        });
        Ok(())
    }
}
