//! Read-only smart contract queries and their results.
//!
//! **vm-query** builds well-formed contract query requests from typed values
//! and decodes the untyped output of the network's virtual machine into
//! strongly typed results.
//!
//! # Quick Start
//!
//! ```rust
//! use vm_query::*;
//!
//! # fn main() -> Result<(), vm_query::Error> {
//! // Build a query
//! let query = Query::builder()
//!     .address("erd1qyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqsl6e0p7".parse()?)
//!     .function("getSum".parse()?)
//!     .arg(Argument::u64(7))
//!     .build()?;
//! let request = query.to_http_request();
//! assert_eq!(request.args, vec!["07".to_string()]);
//!
//! // ... hand `request` to a transport, get a payload back ...
//! let payload = serde_json::json!({
//!     "ReturnData": ["Kg=="],
//!     "ReturnCode": "ok",
//!     "GasRemaining": 18446744073709551515u64,
//! });
//!
//! // Decode it
//! let response = QueryResponse::from_http_response(&payload);
//! response.assert_success()?;
//! assert_eq!(response.first_result().map(|item| item.as_u64()), Some(42));
//! assert_eq!(response.gas_used(), Gas::from_gas(100));
//! # Ok(())
//! # }
//! ```
//!
//! # Core Types
//!
//! - [`Query`] / [`QueryBuilder`] - A validated query and its builder
//! - [`QueryRequest`] - The transport-ready request object
//! - [`QueryResponse`] - Decoded virtual machine output
//! - [`ContractReturnData`] - One returned value, under every interpretation
//! - [`Address`] - Account address (bech32, `erd1...`)
//!
//! # Running Queries
//!
//! [`QueryClient`] composes build, send and decode over any [`Transport`]:
//!
//! ```rust,no_run
//! # use vm_query::*;
//! # async fn example(transport: impl Transport + 'static) -> Result<(), vm_query::Error> {
//! let client = QueryClient::builder(transport).build();
//! let response = client
//!     .query("erd1qyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqsl6e0p7", "getSum")
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::Error;
pub use types::*;

// Re-export client types
pub use client::{
    CALLER_ENV_VAR, ClientConfig, ContractQuery, QueryClient, QueryClientBuilder, Transport,
    TransportFuture,
};
