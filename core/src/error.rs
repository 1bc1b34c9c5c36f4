//! Error types for ledger operations.
//!
//! Every documented revert condition maps to a distinct variant. Checks run
//! before any write, so a returned error always means zero state mutation.

use thiserror::Error;

use crate::address::Address;

/// Errors surfaced by ledger, gate, role and bridge operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoinError {
    /// Caller does not hold the role required for this operation
    #[error("caller lacks the required role")]
    Unauthorized,

    /// A party to a value-moving operation is missing KYC approval
    #[error("account {0} is not KYC approved")]
    NotKycApproved(Address),

    /// The source account is frozen
    #[error("account {0} is frozen")]
    AccountFrozen(Address),

    /// Wipe attempted on an account that is not frozen
    #[error("account {0} is not frozen")]
    AccountNotFrozen(Address),

    /// The global pause flag is set
    #[error("ledger is paused")]
    Paused,

    #[error("insufficient balance: have {balance}, need {required}")]
    InsufficientBalance { balance: u64, required: u64 },

    /// Covers both spender allowances and external escrow allowances
    #[error("insufficient allowance: have {allowance}, need {required}")]
    InsufficientAllowance { allowance: u64, required: u64 },

    #[error("arithmetic overflow")]
    Overflow,

    #[error("arithmetic underflow")]
    Underflow,

    #[error("ledger is already initialized")]
    AlreadyInitialized,

    #[error("ledger is not initialized")]
    NotInitialized,

    /// Ownership claim with no proposal pending
    #[error("no ownership proposal is pending")]
    NoProposalPending,
}

/// Result type for ledger operations
pub type CoinResult<T> = Result<T, CoinError>;
