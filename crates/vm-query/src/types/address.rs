//! Account address type with bech32 encoding.

use std::fmt::{self, Display};
use std::str::FromStr;

use bech32::{FromBase32, ToBase32, Variant};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, ParseAddressError};

/// Human-readable prefix of every account address.
pub const ADDRESS_HRP: &str = "erd";

/// Length of an account public key, in bytes.
pub const PUBKEY_LENGTH: usize = 32;

/// An account address: a 32-byte public key, displayed as bech32.
///
/// The all-zero key is the *empty* address. It is the default value and is
/// what an unset caller looks like.
///
/// # Examples
///
/// ```
/// use vm_query::Address;
///
/// let address: Address = "erd1qyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqsl6e0p7"
///     .parse()
///     .unwrap();
/// assert!(!address.is_empty());
/// assert_eq!(address.to_hex(), "01".repeat(32));
///
/// assert!(Address::empty().is_empty());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; PUBKEY_LENGTH]);

impl Address {
    /// The empty (all-zero) address.
    pub const fn empty() -> Self {
        Self([0; PUBKEY_LENGTH])
    }

    /// Create from raw public key bytes.
    pub const fn from_bytes(bytes: [u8; PUBKEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Create from a 64-character hex public key.
    pub fn from_hex(s: &str) -> Result<Self, ParseAddressError> {
        let bytes =
            hex::decode(s).map_err(|e| ParseAddressError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    fn from_slice(bytes: &[u8]) -> Result<Self, ParseAddressError> {
        let pubkey: [u8; PUBKEY_LENGTH] = bytes
            .try_into()
            .map_err(|_| ParseAddressError::InvalidLength(bytes.len()))?;
        Ok(Self(pubkey))
    }

    /// Raw public key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBKEY_LENGTH] {
        &self.0
    }

    /// Lowercase hex of the public key.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Bech32 form of the address (`erd1...`).
    pub fn bech32(&self) -> String {
        self.to_string()
    }

    /// Check if this is the empty address.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Fail with [`Error::InvalidArgument`] if this is the empty address.
    pub fn assert_not_empty(&self) -> Result<(), Error> {
        if self.is_empty() {
            return Err(Error::invalid_argument("address is empty"));
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hrp, data, variant) =
            bech32::decode(s).map_err(|e| ParseAddressError::InvalidBech32(e.to_string()))?;

        if hrp != ADDRESS_HRP {
            return Err(ParseAddressError::WrongHrp {
                expected: ADDRESS_HRP.to_string(),
                actual: hrp,
            });
        }
        if variant != Variant::Bech32 {
            return Err(ParseAddressError::InvalidBech32(
                "expected bech32 variant, got bech32m".to_string(),
            ));
        }

        let bytes = Vec::<u8>::from_base32(&data)
            .map_err(|e| ParseAddressError::InvalidBech32(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl TryFrom<&str> for Address {
    type Error = ParseAddressError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<[u8; PUBKEY_LENGTH]> for Address {
    fn from(bytes: [u8; PUBKEY_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only fails for an invalid HRP, and ours is a valid constant.
        match bech32::encode(ADDRESS_HRP, self.0.to_base32(), Variant::Bech32) {
            Ok(encoded) => f.write_str(&encoded),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.bech32())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONES_BECH32: &str = "erd1qyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqsl6e0p7";

    #[test]
    fn test_empty_address() {
        let address = Address::default();
        assert!(address.is_empty());
        assert_eq!(address, Address::empty());
        assert!(address.assert_not_empty().is_err());
    }

    #[test]
    fn test_bech32_roundtrip() {
        let address = Address::from_bytes([1; PUBKEY_LENGTH]);
        let encoded = address.bech32();
        assert!(encoded.starts_with("erd1"));
        assert_eq!(encoded.parse::<Address>().unwrap(), address);
    }

    #[test]
    fn test_parse_known_address() {
        let address: Address = ONES_BECH32.parse().unwrap();
        assert_eq!(address.as_bytes(), &[1; PUBKEY_LENGTH]);
        assert_eq!(address.to_string(), ONES_BECH32);
        assert!(address.assert_not_empty().is_ok());
    }

    #[test]
    fn test_parse_wrong_hrp() {
        let other = bech32::encode("bc", [1u8; 32].to_base32(), Variant::Bech32).unwrap();
        let err = other.parse::<Address>().unwrap_err();
        assert!(matches!(err, ParseAddressError::WrongHrp { .. }));
    }

    #[test]
    fn test_parse_wrong_length() {
        let short = bech32::encode(ADDRESS_HRP, [1u8; 20].to_base32(), Variant::Bech32).unwrap();
        assert_eq!(
            short.parse::<Address>().unwrap_err(),
            ParseAddressError::InvalidLength(20)
        );
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            "not-an-address".parse::<Address>(),
            Err(ParseAddressError::InvalidBech32(_))
        ));
    }

    #[test]
    fn test_from_hex() {
        let address = Address::from_hex(&"01".repeat(32)).unwrap();
        assert_eq!(address.to_string(), ONES_BECH32);

        assert!(matches!(
            Address::from_hex("zz"),
            Err(ParseAddressError::InvalidHex(_))
        ));
        assert_eq!(
            Address::from_hex("0102").unwrap_err(),
            ParseAddressError::InvalidLength(2)
        );
    }

    #[test]
    fn test_serde_as_bech32_string() {
        let address: Address = ONES_BECH32.parse().unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", ONES_BECH32));

        let parsed: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, address);
    }
}
