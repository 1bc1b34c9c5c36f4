//! Account addressing.
//!
//! Addresses are opaque 32-byte identifiers. The ledger never interprets
//! them; it only compares them and uses them as map keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account identifier (32 bytes).
///
/// Totally ordered so that map iteration can be made deterministic where it
/// matters. Displayed and parsed as lowercase hex.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Address(#[serde(with = "hex")] [u8; 32]);

impl Address {
    /// The all-zero sentinel address. Used as the mint/burn counterparty in
    /// `Transfer` events; never holds a balance of its own.
    pub const ZERO: Address = Address([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse from a byte slice, returning `None` on length mismatch.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; 32] = slice.try_into().ok()?;
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}
