//! Address set with explicit default-false membership.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::address::Address;

/// Set of addresses with idempotent add/remove semantics.
///
/// Used twice by the compliance gate: once for the KYC-passed set, once for
/// the frozen set. Membership queries return `false` for addresses never
/// seen, and iteration follows insertion order for determinism.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySet {
    members: IndexSet<Address>,
}

impl IdentitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an address. Returns `true` if it was not already a member.
    pub fn insert(&mut self, address: Address) -> bool {
        self.members.insert(address)
    }

    /// Remove an address. Returns `true` if it was a member.
    pub fn remove(&mut self, address: &Address) -> bool {
        self.members.shift_remove(address)
    }

    #[inline]
    pub fn contains(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.members.iter()
    }
}
