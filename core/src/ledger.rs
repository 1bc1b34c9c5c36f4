//! Balance and allowance bookkeeping.
//!
//! Pure arithmetic layer with no knowledge of roles or compliance gating.
//! Every primitive validates all bounds before its first write, so a
//! returned error implies no mutation. The conservation invariant
//! `sum(balances) == total_supply` holds after every successful call because
//! each balance change is paired with the matching supply adjustment.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::{CoinError, CoinResult};

/// Balances, allowances and the total-supply counter.
///
/// Entries are created on first non-zero write and kept at an explicit zero
/// on exhaustion; absent and zero entries are indistinguishable to queries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    balances: IndexMap<Address, u64>,
    allowances: IndexMap<(Address, Address), u64>,
    total_supply: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    #[inline]
    pub fn balance_of(&self, account: &Address) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    #[inline]
    pub fn allowance_of(&self, owner: &Address, spender: &Address) -> u64 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    /// All accounts with a recorded balance, in insertion order.
    pub fn balances(&self) -> impl Iterator<Item = (&Address, u64)> {
        self.balances.iter().map(|(address, amount)| (address, *amount))
    }

    /// Create `amount` units and credit them to `to`.
    pub fn mint(&mut self, to: Address, amount: u64) -> CoinResult<()> {
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(CoinError::Overflow)?;
        let balance = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(CoinError::Overflow)?;
        self.total_supply = supply;
        self.balances.insert(to, balance);
        Ok(())
    }

    /// Destroy `amount` units held by `from`.
    pub fn burn(&mut self, from: &Address, amount: u64) -> CoinResult<()> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(CoinError::InsufficientBalance {
                balance,
                required: amount,
            });
        }
        // Cannot underflow while conservation holds, but never wrap silently.
        let supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(CoinError::Underflow)?;
        self.total_supply = supply;
        self.balances.insert(*from, balance - amount);
        Ok(())
    }

    /// Move `amount` units `from` → `to`. Supply is unchanged.
    pub fn transfer(&mut self, from: &Address, to: Address, amount: u64) -> CoinResult<()> {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(CoinError::InsufficientBalance {
                balance: from_balance,
                required: amount,
            });
        }
        if *from == to || amount == 0 {
            // Nothing moves once the balance check passed; skipping the
            // writes keeps zero-amount calls from creating zero entries
            return Ok(());
        }
        let to_balance = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(CoinError::Overflow)?;
        self.balances.insert(*from, from_balance - amount);
        self.balances.insert(to, to_balance);
        Ok(())
    }

    /// Zero an account's balance, reducing supply by the wiped amount.
    /// Returns how much was wiped.
    pub fn wipe_balance(&mut self, account: &Address) -> CoinResult<u64> {
        let balance = self.balance_of(account);
        // Cannot underflow while conservation holds, but never wrap silently.
        let supply = self
            .total_supply
            .checked_sub(balance)
            .ok_or(CoinError::Underflow)?;
        self.total_supply = supply;
        self.balances.insert(*account, 0);
        Ok(balance)
    }

    /// Absolute set, not additive.
    pub fn set_allowance(&mut self, owner: Address, spender: Address, amount: u64) {
        self.allowances.insert((owner, spender), amount);
    }

    /// Raise the allowance by `delta`, returning the new total.
    pub fn increase_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        delta: u64,
    ) -> CoinResult<u64> {
        let updated = self
            .allowance_of(&owner, &spender)
            .checked_add(delta)
            .ok_or(CoinError::Overflow)?;
        self.allowances.insert((owner, spender), updated);
        Ok(updated)
    }

    /// Lower the allowance by `delta`, returning the new total.
    pub fn decrease_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        delta: u64,
    ) -> CoinResult<u64> {
        let allowance = self.allowance_of(&owner, &spender);
        let updated = allowance
            .checked_sub(delta)
            .ok_or(CoinError::InsufficientAllowance {
                allowance,
                required: delta,
            })?;
        self.allowances.insert((owner, spender), updated);
        Ok(updated)
    }

    /// Consume `amount` of an allowance at spend time, returning the
    /// remaining total.
    pub fn spend_allowance(
        &mut self,
        owner: &Address,
        spender: &Address,
        amount: u64,
    ) -> CoinResult<u64> {
        let allowance = self.allowance_of(owner, spender);
        let remaining = allowance
            .checked_sub(amount)
            .ok_or(CoinError::InsufficientAllowance {
                allowance,
                required: amount,
            })?;
        self.allowances.insert((*owner, *spender), remaining);
        Ok(remaining)
    }
}
