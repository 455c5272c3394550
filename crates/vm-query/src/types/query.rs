//! Contract query request.

use serde::Serialize;

use crate::error::Error;

use super::{Address, Argument, Balance, ContractFunction};

/// A read-only invocation of a contract function.
///
/// A `Query` is always valid: it can only be obtained from
/// [`QueryBuilder::build`], which rejects a missing or empty contract address
/// and a missing function.
///
/// # Example
///
/// ```
/// use vm_query::{Address, Argument, Query};
///
/// # fn main() -> Result<(), vm_query::Error> {
/// let contract = Address::from_bytes([1; 32]);
///
/// let query = Query::builder()
///     .address(contract)
///     .function("getSum".parse()?)
///     .arg(Argument::u64(7))
///     .build()?;
///
/// let request = query.to_http_request();
/// assert_eq!(request.func_name, "getSum");
/// assert_eq!(request.args, vec!["07".to_string()]);
/// assert!(request.caller.is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    caller: Address,
    address: Address,
    function: ContractFunction,
    arguments: Vec<Argument>,
    value: Balance,
}

impl Query {
    /// Start building a query.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::default()
    }

    /// Build a query with no arguments, no caller and zero value.
    pub fn new(address: Address, function: ContractFunction) -> Result<Self, Error> {
        Self::builder().address(address).function(function).build()
    }

    /// The account on whose behalf the query runs; empty if unset.
    pub fn caller(&self) -> &Address {
        &self.caller
    }

    /// The contract address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The function to invoke.
    pub fn function(&self) -> &ContractFunction {
        &self.function
    }

    /// Arguments, in call order.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Value transferred with the call.
    pub fn value(&self) -> Balance {
        self.value
    }

    /// The transport-ready request object.
    ///
    /// `caller` is omitted entirely when it is the empty address.
    pub fn to_http_request(&self) -> QueryRequest {
        QueryRequest {
            sc_address: self.address.bech32(),
            func_name: self.function.to_string(),
            args: self
                .arguments
                .iter()
                .map(|arg| arg.value_of().to_string())
                .collect(),
            value: self.value.to_string(),
            caller: (!self.caller.is_empty()).then(|| self.caller.bech32()),
        }
    }
}

/// Builder for [`Query`].
///
/// `address` and `function` are required. Everything else defaults:
/// no caller, no arguments, zero value.
#[derive(Clone, Debug, Default)]
pub struct QueryBuilder {
    caller: Option<Address>,
    address: Option<Address>,
    function: Option<ContractFunction>,
    arguments: Vec<Argument>,
    value: Option<Balance>,
}

impl QueryBuilder {
    /// Set the calling account.
    pub fn caller(mut self, caller: Address) -> Self {
        self.caller = Some(caller);
        self
    }

    /// Set the contract address.
    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Set the function to invoke.
    pub fn function(mut self, function: ContractFunction) -> Self {
        self.function = Some(function);
        self
    }

    /// Append one argument.
    pub fn arg(mut self, argument: impl Into<Argument>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    /// Append several arguments, keeping their order.
    pub fn args(mut self, arguments: impl IntoIterator<Item = Argument>) -> Self {
        self.arguments.extend(arguments);
        self
    }

    /// Set the value transferred with the call.
    pub fn value(mut self, value: Balance) -> Self {
        self.value = Some(value);
        self
    }

    /// Validate and build the query.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the address is unset or empty, or the
    /// function is unset or [`ContractFunction::none`].
    pub fn build(self) -> Result<Query, Error> {
        let address = self
            .address
            .ok_or_else(|| Error::invalid_argument("address is not set"))?;
        let function = self
            .function
            .filter(|function| !function.is_none())
            .ok_or_else(|| Error::invalid_argument("function is not set"))?;

        address.assert_not_empty()?;

        Ok(Query {
            caller: self.caller.unwrap_or_default(),
            address,
            function,
            arguments: self.arguments,
            value: self.value.unwrap_or(Balance::ZERO),
        })
    }
}

/// Request object handed to a [`Transport`](crate::Transport).
///
/// Serializes to `{"scAddress", "funcName", "args", "value"}` plus `"caller"`
/// when a caller is set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// Bech32 contract address.
    pub sc_address: String,
    /// Function name.
    pub func_name: String,
    /// Hex-encoded arguments, in call order.
    pub args: Vec<String>,
    /// Decimal value.
    pub value: String,
    /// Bech32 caller address, absent when no caller is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn contract() -> Address {
        Address::from_bytes([1; 32])
    }

    fn get_sum() -> ContractFunction {
        "getSum".parse().unwrap()
    }

    #[test]
    fn test_build_with_required_fields() {
        let query = Query::new(contract(), get_sum()).unwrap();

        assert_eq!(query.address(), &contract());
        assert_eq!(query.function(), &get_sum());
        assert!(query.caller().is_empty());
        assert!(query.arguments().is_empty());
        assert_eq!(query.value(), Balance::ZERO);
    }

    #[test]
    fn test_missing_address_fails() {
        let err = Query::builder().function(get_sum()).build().unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_missing_function_fails() {
        let err = Query::builder().address(contract()).build().unwrap_err();
        assert!(err.is_invalid_argument());

        let err = Query::builder()
            .address(contract())
            .function(ContractFunction::none())
            .build()
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_empty_address_fails() {
        let err = Query::new(Address::empty(), get_sum()).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_request_without_caller() {
        let query = Query::builder()
            .address(contract())
            .function(get_sum())
            .arg(Argument::u64(1))
            .arg(Argument::utf8("ab"))
            .build()
            .unwrap();

        let value = serde_json::to_value(query.to_http_request()).unwrap();
        assert_eq!(
            value,
            json!({
                "scAddress": contract().bech32(),
                "funcName": "getSum",
                "args": ["01", "6162"],
                "value": "0",
            })
        );
        assert!(value.get("caller").is_none());
    }

    #[test]
    fn test_request_with_caller_and_value() {
        let caller = Address::from_bytes([2; 32]);
        let query = Query::builder()
            .caller(caller)
            .address(contract())
            .function(get_sum())
            .args([Argument::u64(3), Argument::u64(4)])
            .value(Balance::from_atomic(1_000))
            .build()
            .unwrap();

        let request = query.to_http_request();
        assert_eq!(request.caller, Some(caller.bech32()));
        assert_eq!(request.value, "1000");
        assert_eq!(request.args, vec!["03".to_string(), "04".to_string()]);

        let value = serde_json::to_value(request).unwrap();
        assert_eq!(value["caller"], json!(caller.bech32()));
    }

    #[test]
    fn test_explicit_empty_caller_is_omitted() {
        let query = Query::builder()
            .caller(Address::empty())
            .address(contract())
            .function(get_sum())
            .build()
            .unwrap();

        assert!(query.to_http_request().caller.is_none());
    }
}
