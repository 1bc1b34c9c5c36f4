//! Compliance-gated stablecoin ledger.
//!
//! This crate implements the in-process state machine of a permissioned,
//! fungible balance ledger:
//!
//! - Balance/allowance bookkeeping with checked arithmetic
//! - Five singleton administrative roles (owner, proposed owner, supply
//!   manager, compliance manager, enforcement manager)
//! - KYC/freeze/pause admission gating on every value-moving operation
//! - Enforcement wipe of frozen accounts
//! - External-transfer bridge (escrow-and-burn outbound, mint-on-attestation
//!   inbound)
//!
//! The ledger is single-writer and serialized: every mutating call is atomic
//! relative to every other, all checks run before the first write, and a
//! returned error implies no state change. Persistence, transport and key
//! management are external concerns.

pub mod address;
pub mod bridge;
pub mod contract;
pub mod error;
pub mod events;
pub mod gate;
pub mod identity;
pub mod ledger;
pub mod roles;

pub use address::Address;
pub use bridge::{EscrowKey, ExternalAddress, ExternalBridge, NetworkId};
pub use contract::{InitParams, StableCoin};
pub use error::{CoinError, CoinResult};
pub use events::{CoinEvent, EventLog};
pub use gate::ComplianceGate;
pub use identity::IdentitySet;
pub use ledger::Ledger;
pub use roles::{RoleRegistry, WipeAuthority};
