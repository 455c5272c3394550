//! Core types for contract queries.
//!
//! Value types for building a query ([`Address`], [`ContractFunction`],
//! [`Argument`], [`Balance`]) and for reading its result ([`QueryResponse`],
//! [`ContractReturnData`], [`Gas`]).

mod address;
mod argument;
mod function;
mod query;
mod response;
mod return_data;
mod units;

pub use address::{ADDRESS_HRP, Address, PUBKEY_LENGTH};
pub use argument::Argument;
pub use function::ContractFunction;
pub use query::{Query, QueryBuilder, QueryRequest};
pub use response::QueryResponse;
pub use return_data::ContractReturnData;
pub use units::{Balance, Gas};
