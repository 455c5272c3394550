//! Contract call arguments.
//!
//! Arguments travel to the virtual machine as hex strings. This module only
//! knows how to produce that hex form; it does not implement any contract
//! ABI encoding beyond it.

use std::fmt::{self, Display};

use num_bigint::BigUint;
use serde::{Serialize, Serializer};

use crate::error::ParseArgumentError;

use super::Address;

/// A single argument of a contract query, held in its hex transport form.
///
/// # Examples
///
/// ```
/// use vm_query::{Address, Argument};
///
/// assert_eq!(Argument::u64(0).value_of(), "00");
/// assert_eq!(Argument::u64(256).value_of(), "0100");
/// assert_eq!(Argument::utf8("abc").value_of(), "616263");
/// assert_eq!(Argument::address(&Address::empty()).value_of(), "00".repeat(32));
/// assert_eq!(Argument::from_hex("0A0b").unwrap().value_of(), "0a0b");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Argument(String);

impl Argument {
    /// An unsigned integer, as minimal even-length big-endian hex.
    pub fn u64(value: u64) -> Self {
        Self::big_uint(&BigUint::from(value))
    }

    /// An arbitrary-precision unsigned integer, as minimal even-length
    /// big-endian hex.
    pub fn big_uint(value: &BigUint) -> Self {
        let hex = value.to_str_radix(16);
        if hex.len() % 2 == 1 {
            Self(format!("0{hex}"))
        } else {
            Self(hex)
        }
    }

    /// UTF-8 text.
    pub fn utf8(value: &str) -> Self {
        Self::bytes(value.as_bytes())
    }

    /// Raw bytes.
    pub fn bytes(value: impl AsRef<[u8]>) -> Self {
        Self(hex::encode(value))
    }

    /// An account public key.
    pub fn address(address: &Address) -> Self {
        Self(address.to_hex())
    }

    /// Pre-encoded hex. Must have even length; normalized to lowercase.
    pub fn from_hex(hex: &str) -> Result<Self, ParseArgumentError> {
        if hex.len() % 2 == 1 {
            return Err(ParseArgumentError::OddLength(hex.to_string()));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseArgumentError::InvalidHex(hex.to_string()));
        }
        Ok(Self(hex.to_ascii_lowercase()))
    }

    /// The hex form sent to the network.
    pub fn value_of(&self) -> &str {
        &self.0
    }
}

impl Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Argument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl From<u64> for Argument {
    fn from(value: u64) -> Self {
        Self::u64(value)
    }
}

impl From<&BigUint> for Argument {
    fn from(value: &BigUint) -> Self {
        Self::big_uint(value)
    }
}

impl From<&Address> for Argument {
    fn from(address: &Address) -> Self {
        Self::address(address)
    }
}
