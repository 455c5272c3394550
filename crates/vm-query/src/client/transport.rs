//! Transport trait.
//!
//! A `Transport` carries a [`QueryRequest`] to a node or proxy and hands back
//! the raw, untyped virtual machine output. It owns everything about the wire:
//! protocol, endpoints, retries and timeouts. This crate ships no
//! implementation; plug in whatever HTTP or in-process client you use.
//!
//! # Example Implementation
//!
//! ```rust
//! use vm_query::{QueryRequest, Transport, TransportFuture};
//!
//! /// Answers every query with a fixed payload.
//! struct Fixed(serde_json::Value);
//!
//! impl Transport for Fixed {
//!     fn query_contract(&self, _request: &QueryRequest) -> TransportFuture<'_> {
//!         let payload = self.0.clone();
//!         Box::pin(async move { Ok(payload) })
//!     }
//! }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use crate::error::Error;
use crate::types::QueryRequest;

/// Future returned by [`Transport::query_contract`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, Error>> + Send + 'a>>;

/// Sends query requests and returns raw virtual machine output.
///
/// The returned value is the payload object holding `returnData`,
/// `returnCode`, `returnMessage` and `gasRemaining` (in either camel or
/// Pascal case). Transport failures should be reported as
/// [`Error::Transport`].
pub trait Transport: Send + Sync {
    /// Run a query against a contract.
    fn query_contract(&self, request: &QueryRequest) -> TransportFuture<'_>;
}

/// Implement `Transport` for `Arc<dyn Transport>` for convenience.
impl Transport for Arc<dyn Transport> {
    fn query_contract(&self, request: &QueryRequest) -> TransportFuture<'_> {
        (**self).query_contract(request)
    }
}
