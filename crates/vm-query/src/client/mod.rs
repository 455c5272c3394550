//! Client module for running contract queries.
//!
//! - [`QueryClient`] — The main client, owns a [`Transport`]
//! - [`QueryClientBuilder`] — Fluent builder for configuring the client
//! - [`ContractQuery`] — Awaitable builder for a single query
//! - [`Transport`] — The seam to whatever actually talks to the network

mod query;
mod query_client;
mod transport;

pub use query::ContractQuery;
pub use query_client::{CALLER_ENV_VAR, ClientConfig, QueryClient, QueryClientBuilder};
pub use transport::{Transport, TransportFuture};
