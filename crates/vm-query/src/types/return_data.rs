//! Multi-format view of one value returned by a contract.

use std::num::IntErrorKind;

use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{Engine as _, alphabet};
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Serialize, Serializer};

/// Padding optional, trailing bits tolerated.
const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// One value returned by a contract, decoded from its base64 transport form.
///
/// Every interpretation is computed once, at construction, from the same
/// decoded bytes, so the views can never disagree with each other.
///
/// # Interpretations
///
/// | Accessor | Meaning |
/// |----------|---------|
/// | [`as_bytes`](Self::as_bytes) | Raw decoded bytes |
/// | [`as_hex`](Self::as_hex) | Lowercase hex of the bytes |
/// | [`as_u64`](Self::as_u64) | Best-effort integer, saturates at `u64::MAX` |
/// | [`as_big_uint`](Self::as_big_uint) | Exact unsigned big-endian integer |
/// | [`as_str`](Self::as_str) | UTF-8 text, invalid sequences replaced |
/// | [`as_bool`](Self::as_bool) | Truthiness (see below) |
///
/// The boolean view is `true` only when the integer is non-zero, the text is
/// neither `"false"` nor empty, and the big integer is non-zero.
///
/// # Example
///
/// ```
/// use vm_query::ContractReturnData;
///
/// let item = ContractReturnData::new("Kg==");
/// assert_eq!(item.as_bytes(), &[42]);
/// assert_eq!(item.as_hex(), "2a");
/// assert_eq!(item.as_u64(), 42);
/// assert!(item.as_bool());
///
/// let zero = ContractReturnData::new("AAAAAA==");
/// assert_eq!(zero.as_u64(), 0);
/// assert!(!zero.as_bool());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractReturnData {
    base64: String,
    bytes: Vec<u8>,
    hex: String,
    number: u64,
    big_uint: BigUint,
    text: String,
    boolean: bool,
}

impl ContractReturnData {
    /// Decode a base64 value. Undecodable input yields the empty value.
    pub fn new(base64: impl Into<String>) -> Self {
        let base64 = base64.into();
        let bytes = decode_lenient(&base64);
        Self::from_parts(base64, bytes)
    }

    /// Build from raw bytes; the base64 form is derived by encoding them.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::from_parts(STANDARD.encode(&bytes), bytes)
    }

    fn from_parts(base64: String, bytes: Vec<u8>) -> Self {
        let hex = hex::encode(&bytes);
        let number = best_effort_u64(&hex);
        let big_uint = parse_big_uint(&hex);
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let boolean = number != 0 && text != "false" && !text.is_empty() && !big_uint.is_zero();

        Self {
            base64,
            bytes,
            hex,
            number,
            big_uint,
            text,
            boolean,
        }
    }

    /// The base64 text this value was built from.
    pub fn as_base64(&self) -> &str {
        &self.base64
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lowercase hex of the bytes; empty for an empty value.
    pub fn as_hex(&self) -> &str {
        &self.hex
    }

    /// Best-effort unsigned integer.
    ///
    /// Values wider than 64 bits saturate at `u64::MAX`, so precision is lost
    /// but a non-zero value never reads as zero. Use
    /// [`as_big_uint`](Self::as_big_uint) when the exact value matters.
    pub fn as_u64(&self) -> u64 {
        self.number
    }

    /// Exact unsigned big-endian integer; zero for an empty value.
    pub fn as_big_uint(&self) -> &BigUint {
        &self.big_uint
    }

    /// UTF-8 text of the bytes.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Truthiness of the value.
    pub fn as_bool(&self) -> bool {
        self.boolean
    }

    /// Consume the value, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Check if the value decoded to no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Default for ContractReturnData {
    fn default() -> Self {
        Self::from_parts(String::new(), Vec::new())
    }
}

fn decode_lenient(base64: &str) -> Vec<u8> {
    let compact: String = base64.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Vec::new();
    }
    match STANDARD_LENIENT
        .decode(&compact)
        .or_else(|_| URL_SAFE_LENIENT.decode(&compact))
    {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!(value = %base64, error = %err, "undecodable return data, using empty value");
            Vec::new()
        }
    }
}

fn best_effort_u64(hex: &str) -> u64 {
    match u64::from_str_radix(hex, 16) {
        Ok(n) => n,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => u64::MAX,
        Err(_) => 0,
    }
}

fn parse_big_uint(hex: &str) -> BigUint {
    let digits = if hex.is_empty() { "00" } else { hex };
    BigUint::parse_bytes(digits.as_bytes(), 16).unwrap_or_default()
}

/// Plain JSON shape of a return value.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReturnDataJson<'a> {
    as_base64: &'a str,
    as_hex: &'a str,
    as_number: u64,
    as_big_int: String,
    as_string: &'a str,
    as_bool: bool,
}

impl Serialize for ContractReturnData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ReturnDataJson {
            as_base64: &self.base64,
            as_hex: &self.hex,
            as_number: self.number,
            as_big_int: self.big_uint.to_string(),
            as_string: &self.text,
            as_bool: self.boolean,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_zero_bytes() {
        let item = ContractReturnData::new("AAAAAA==");
        assert_eq!(item.as_bytes(), &[0, 0, 0, 0]);
        assert_eq!(item.as_hex(), "00000000");
        assert_eq!(item.as_u64(), 0);
        assert!(item.as_big_uint().is_zero());
        assert_eq!(item.as_str(), "\0\0\0\0");
        assert!(!item.as_bool());
    }

    #[test]
    fn test_text_true() {
        let item = ContractReturnData::new("dHJ1ZQ==");
        assert_eq!(item.as_str(), "true");
        assert_eq!(item.as_hex(), "74727565");
        assert_eq!(item.as_u64(), 0x7472_7565);
        assert_eq!(item.as_big_uint(), &BigUint::from(0x7472_7565u32));
        assert!(item.as_bool());
    }

    #[test]
    fn test_text_false_is_false() {
        let item = ContractReturnData::new("ZmFsc2U=");
        assert_eq!(item.as_str(), "false");
        assert_ne!(item.as_u64(), 0);
        assert!(!item.as_bool());
    }

    #[test]
    fn test_empty_input() {
        let item = ContractReturnData::new("");
        assert!(item.is_empty());
        assert_eq!(item.as_hex(), "");
        assert_eq!(item.as_u64(), 0);
        assert!(item.as_big_uint().is_zero());
        assert_eq!(item.as_str(), "");
        assert!(!item.as_bool());
        assert_eq!(item, ContractReturnData::default());
    }

    #[test]
    fn test_single_byte_number() {
        let item = ContractReturnData::new("Kg==");
        assert_eq!(item.as_u64(), 42);
        assert_eq!(item.as_big_uint(), &BigUint::from(42u32));
        assert_eq!(item.as_str(), "*");
        assert!(item.as_bool());
    }

    #[test]
    fn test_wide_number_saturates_but_big_uint_is_exact() {
        // 9 bytes: 0x010203040506070809
        let item = ContractReturnData::new("AQIDBAUGBwgJ");
        assert_eq!(item.as_hex(), "010203040506070809");
        assert_eq!(item.as_u64(), u64::MAX);
        assert_eq!(
            item.as_big_uint(),
            &BigUint::parse_bytes(b"010203040506070809", 16).unwrap()
        );
        assert!(item.as_bool());
    }

    #[test]
    fn test_leading_zeros_fit_u64() {
        let item = ContractReturnData::from_bytes(vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(item.as_u64(), 1);
        assert_eq!(item.as_big_uint(), &BigUint::from(1u32));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let item = ContractReturnData::from_bytes(vec![0xff, 0xfe]);
        assert_eq!(item.as_str(), "\u{fffd}\u{fffd}");
        assert!(item.as_bool());
    }

    #[test]
    fn test_unpadded_and_url_safe_input() {
        assert_eq!(ContractReturnData::new("Kg").as_u64(), 42);
        // 0xfb 0xff encodes to "+/8=" in standard and "-_8=" in url-safe
        assert_eq!(ContractReturnData::new("-_8=").as_bytes(), &[0xfb, 0xff]);
        assert_eq!(ContractReturnData::new("+/8=").as_bytes(), &[0xfb, 0xff]);
    }

    #[test]
    fn test_whitespace_in_input_is_skipped() {
        let item = ContractReturnData::new("AQID\nBA==");
        assert_eq!(item.as_bytes(), &[1, 2, 3, 4]);
        assert_eq!(item.as_base64(), "AQID\nBA==");
        assert_eq!(item.as_hex(), "01020304");
        assert!(item.as_bool());

        assert_eq!(ContractReturnData::new("AQ ID").as_bytes(), &[1, 2, 3]);
        assert!(ContractReturnData::new(" \t\n").is_empty());
    }

    #[test]
    fn test_garbage_input_degrades_to_empty() {
        let item = ContractReturnData::new("!!not base64!!");
        assert_eq!(item.as_base64(), "!!not base64!!");
        assert!(item.is_empty());
        assert!(!item.as_bool());
    }

    #[test]
    fn test_from_bytes_matches_new() {
        let from_bytes = ContractReturnData::from_bytes(b"true".to_vec());
        assert_eq!(from_bytes.as_base64(), "dHJ1ZQ==");
        assert_eq!(from_bytes, ContractReturnData::new("dHJ1ZQ=="));
    }

    #[test]
    fn test_serialize_plain_shape() {
        let value = serde_json::to_value(ContractReturnData::new("Kg==")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "asBase64": "Kg==",
                "asHex": "2a",
                "asNumber": 42,
                "asBigInt": "42",
                "asString": "*",
                "asBool": true,
            })
        );
    }
}
