//! Balance and gas unit types.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseBalanceError;

/// A token balance in the network's smallest (atomic) denomination.
///
/// Its transport form is the plain decimal string of the atomic amount.
///
/// ```
/// use vm_query::Balance;
///
/// let value: Balance = "1000000000000000000".parse().unwrap();
/// assert_eq!(value, Balance::from_atomic(1_000_000_000_000_000_000));
/// assert_eq!(Balance::ZERO.to_string(), "0");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Balance(u128);

impl Balance {
    /// Zero balance.
    pub const ZERO: Self = Self(0);

    /// Create from an atomic amount.
    pub const fn from_atomic(atomic: u128) -> Self {
        Self(atomic)
    }

    /// Get the atomic amount.
    pub const fn as_atomic(&self) -> u128 {
        self.0
    }

    /// Check if zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl FromStr for Balance {
    type Err = ParseBalanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseBalanceError::InvalidNumber(s.to_string()));
        }
        // All digits, so the only remaining failure is overflow.
        s.parse::<u128>()
            .map(Self)
            .map_err(|_| ParseBalanceError::Overflow)
    }
}

impl TryFrom<&str> for Balance {
    type Error = ParseBalanceError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<u128> for Balance {
    fn from(atomic: u128) -> Self {
        Self(atomic)
    }
}

impl Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Serde: serialize as a decimal string, u128 does not fit a JSON number
impl Serialize for Balance {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Balance {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s: String = serde::Deserialize::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Gas units consumed by a contract execution.
///
/// ```
/// use vm_query::Gas;
///
/// let gas = Gas::from_gas(1_500_000);
/// assert_eq!(gas.as_gas(), 1_500_000);
/// assert_eq!(gas.to_string(), "1500000 gas");
/// ```
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Gas(u64);

impl Gas {
    /// Zero gas.
    pub const ZERO: Self = Self(0);

    /// The widest value the network's 64-bit gas accounting can hold.
    pub const MAX: Self = Self(u64::MAX);

    /// Create from raw gas units.
    pub const fn from_gas(gas: u64) -> Self {
        Self(gas)
    }

    /// Get raw gas value.
    pub const fn as_gas(&self) -> u64 {
        self.0
    }

    /// Check if zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for Gas {
    fn from(gas: u64) -> Self {
        Self(gas)
    }
}

impl Display for Gas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} gas", self.0)
    }
}
