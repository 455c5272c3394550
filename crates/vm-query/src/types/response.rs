//! Decoded virtual machine output of a contract query.

use num_bigint::{BigInt, BigUint};
use num_traits::FromPrimitive;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::Error;

use super::{ContractReturnData, Gas};

// Candidate keys, tried in order. Nodes and proxies disagree on casing.
const RETURN_DATA_KEYS: [&str; 2] = ["returnData", "ReturnData"];
const RETURN_CODE_KEYS: [&str; 2] = ["returnCode", "ReturnCode"];
const RETURN_MESSAGE_KEYS: [&str; 2] = ["returnMessage", "ReturnMessage"];
const GAS_REMAINING_KEYS: [&str; 2] = ["gasRemaining", "GasRemaining"];

/// Return codes that mean the call succeeded.
const SUCCESS_CODES: [&str; 2] = ["ok", "0"];

/// Result of a contract query.
///
/// Built once from the untyped payload a transport returns, with
/// [`QueryResponse::from_http_response`]. Decoding is lenient: a missing or
/// malformed field reads as its zero value, and a failed on-chain call is
/// still a valid response. Use [`assert_success`](Self::assert_success) to
/// turn a failure into an error.
///
/// # Example
///
/// ```
/// use vm_query::QueryResponse;
///
/// let payload = serde_json::json!({
///     "returnData": ["Kg=="],
///     "returnCode": "ok",
///     "returnMessage": "",
///     "gasRemaining": 18446744073709551515u64,
/// });
///
/// let response = QueryResponse::from_http_response(&payload);
/// assert!(response.is_success());
/// assert_eq!(response.gas_used().as_gas(), 100);
/// assert_eq!(response.first_result().unwrap().as_u64(), 42);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct QueryResponse {
    return_data: Vec<ContractReturnData>,
    return_code: String,
    return_message: String,
    gas_used: Gas,
}

impl QueryResponse {
    /// Decode the payload returned by a transport.
    ///
    /// Field names are accepted in both `camelCase` and `PascalCase`; the
    /// `camelCase` field wins when both are present.
    pub fn from_http_response(payload: &Value) -> Self {
        let return_data = lookup(payload, &RETURN_DATA_KEYS)
            .map(decode_return_data)
            .unwrap_or_default();
        let return_code = lookup(payload, &RETURN_CODE_KEYS)
            .map(stringify)
            .unwrap_or_default();
        let return_message = lookup(payload, &RETURN_MESSAGE_KEYS)
            .map(stringify)
            .unwrap_or_default();
        let gas_remaining = lookup(payload, &GAS_REMAINING_KEYS)
            .and_then(parse_gas_remaining)
            .unwrap_or_default();
        let gas_used = gas_used_from_remaining(&gas_remaining);

        tracing::trace!(
            items = return_data.len(),
            return_code = %return_code,
            gas_used = gas_used.as_gas(),
            "decoded query response"
        );

        Self {
            return_data,
            return_code,
            return_message,
            gas_used,
        }
    }

    /// The returned values, in order.
    pub fn return_data(&self) -> &[ContractReturnData] {
        &self.return_data
    }

    /// The virtual machine return code (`"ok"` on success).
    pub fn return_code(&self) -> &str {
        &self.return_code
    }

    /// The virtual machine return message; usually empty on success.
    pub fn return_message(&self) -> &str {
        &self.return_message
    }

    /// Gas consumed by the call.
    pub fn gas_used(&self) -> Gas {
        self.gas_used
    }

    /// Check if the call succeeded.
    ///
    /// Only the exact codes `"ok"` and `"0"` count as success.
    pub fn is_success(&self) -> bool {
        SUCCESS_CODES.contains(&self.return_code.as_str())
    }

    /// Fail with [`Error::Contract`] unless the call succeeded.
    ///
    /// The error message is `"{return_code}: {return_message}"`.
    pub fn assert_success(&self) -> Result<(), Error> {
        if self.is_success() {
            return Ok(());
        }
        Err(Error::Contract(format!(
            "{}: {}",
            self.return_code, self.return_message
        )))
    }

    /// The first returned value, if any.
    pub fn first_result(&self) -> Option<&ContractReturnData> {
        self.return_data.first()
    }

    /// Raw bytes of every returned value, in order.
    pub fn buffers(&self) -> Vec<&[u8]> {
        self.return_data
            .iter()
            .map(ContractReturnData::as_bytes)
            .collect()
    }

    /// Plain JSON projection, for logging and serialization.
    ///
    /// Contains `success`, `returnData`, `returnCode`, `returnMessage` and
    /// `gasUsed` (as a plain number).
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Plain JSON shape of a query response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryResponseJson<'a> {
    success: bool,
    return_data: &'a [ContractReturnData],
    return_code: &'a str,
    return_message: &'a str,
    gas_used: u64,
}

impl Serialize for QueryResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        QueryResponseJson {
            success: self.is_success(),
            return_data: &self.return_data,
            return_code: &self.return_code,
            return_message: &self.return_message,
            gas_used: self.gas_used.as_gas(),
        }
        .serialize(serializer)
    }
}

/// First candidate key that is present and not `null`.
fn lookup<'a>(payload: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| payload.get(*key))
        .find(|value| !value.is_null())
}

fn decode_return_data(value: &Value) -> Vec<ContractReturnData> {
    let Some(items) = value.as_array() else {
        tracing::debug!(value = %value, "returnData is not an array, ignoring");
        return Vec::new();
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(base64) => ContractReturnData::new(base64.as_str()),
            Value::Null => ContractReturnData::default(),
            other => {
                tracing::debug!(value = %other, "non-string return data item, using empty value");
                ContractReturnData::default()
            }
        })
        .collect()
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_gas_remaining(value: &Value) -> Option<BigUint> {
    let parsed = match value {
        Value::Number(n) => n
            .as_u64()
            .map(BigUint::from)
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).and_then(|f| BigUint::from_f64(f.trunc()))),
        Value::String(s) => s.trim().parse::<BigUint>().ok(),
        _ => None,
    };
    if parsed.is_none() {
        tracing::debug!(value = %value, "unreadable gasRemaining, using 0");
    }
    parsed
}

/// `(2^64 - 1) - gas_remaining`, narrowed to [`Gas`].
///
/// The node reports remaining gas as the complement of used gas within
/// 64-bit accounting. A remaining value above `u64::MAX` has no meaningful
/// complement and yields zero.
fn gas_used_from_remaining(gas_remaining: &BigUint) -> Gas {
    let used = BigInt::from(u64::MAX) - BigInt::from(gas_remaining.clone());
    match u64::try_from(&used) {
        Ok(gas) => Gas::from_gas(gas),
        Err(_) => {
            tracing::warn!(gas_remaining = %gas_remaining, "gasRemaining exceeds 64-bit range, reporting zero gas used");
            Gas::ZERO
        }
    }
}
