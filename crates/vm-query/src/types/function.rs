//! Contract function name.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseFunctionError;

/// The name of a contract function (endpoint) to invoke.
///
/// [`ContractFunction::none`] is the unset sentinel. A query built with it is
/// rejected.
///
/// ```
/// use vm_query::ContractFunction;
///
/// let function: ContractFunction = "getSum".parse().unwrap();
/// assert_eq!(function.to_string(), "getSum");
/// assert!(ContractFunction::none().is_none());
/// assert!("get sum".parse::<ContractFunction>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ContractFunction(Option<String>);

impl ContractFunction {
    /// Parse and validate a function name.
    pub fn new(name: impl Into<String>) -> Result<Self, ParseFunctionError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(Some(name)))
    }

    /// The unset function.
    pub const fn none() -> Self {
        Self(None)
    }

    fn validate(name: &str) -> Result<(), ParseFunctionError> {
        if name.is_empty() {
            return Err(ParseFunctionError::Empty);
        }
        if let Some(c) = name.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(ParseFunctionError::InvalidChar(name.to_string(), c));
        }
        Ok(())
    }

    /// Check if this is the unset sentinel.
    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// The function name, or an empty string for [`ContractFunction::none`].
    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or_default()
    }
}

impl FromStr for ContractFunction {
    type Err = ParseFunctionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ContractFunction {
    type Error = ParseFunctionError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl Display for ContractFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ContractFunction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContractFunction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
