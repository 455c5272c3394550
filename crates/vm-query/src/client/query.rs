//! Fluent contract query builder.
//!
//! [`ContractQuery`] implements `IntoFuture` so it can be `.await`ed directly.

use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;

use crate::error::Error;
use crate::types::{Address, Argument, Balance, ContractFunction, Query, QueryResponse};

use super::query_client::execute;
use super::transport::Transport;

/// Query builder for calling contract functions.
///
/// Created by [`QueryClient::query`](crate::QueryClient::query). The contract
/// address and function name are parsed when the query is awaited, so every
/// error (bad address, empty address, bad function name, transport failure)
/// surfaces at the `.await`.
///
/// Awaiting never fails because of the contract's own return code: a failed
/// call is a valid [`QueryResponse`]. Call
/// [`assert_success`](QueryResponse::assert_success) on it, or use
/// [`expect_success`](Self::expect_success).
///
/// # Example
///
/// ```rust,no_run
/// # use vm_query::*;
/// # async fn example(client: QueryClient) -> Result<(), vm_query::Error> {
/// let response = client
///     .query("erd1qyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqsl6e0p7", "getSum")
///     .arg(Argument::u64(7))
///     .await?;
///
/// response.assert_success()?;
/// let sum = response.first_result().map(|item| item.as_u64()).unwrap_or_default();
/// # Ok(())
/// # }
/// ```
pub struct ContractQuery {
    transport: Arc<dyn Transport>,
    address: String,
    function: String,
    caller: Option<Address>,
    arguments: Vec<Argument>,
    value: Balance,
    require_success: bool,
}

impl ContractQuery {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        address: String,
        function: String,
        default_caller: Option<Address>,
    ) -> Self {
        Self {
            transport,
            address,
            function,
            caller: default_caller,
            arguments: vec![],
            value: Balance::ZERO,
            require_success: false,
        }
    }

    /// Run the query on behalf of an account.
    ///
    /// Overrides the client's default caller.
    pub fn caller(mut self, caller: Address) -> Self {
        self.caller = Some(caller);
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
        self.value = value;
        self
    }

    /// Fail with [`Error::Contract`] when the call does not succeed.
    pub fn expect_success(mut self) -> Self {
        self.require_success = true;
        self
    }

    fn build_query(&self) -> Result<Query, Error> {
        let address: Address = self.address.parse()?;
        let function: ContractFunction = self.function.parse()?;

        let mut builder = Query::builder()
            .address(address)
            .function(function)
            .args(self.arguments.iter().cloned())
            .value(self.value);
        if let Some(caller) = self.caller {
            builder = builder.caller(caller);
        }
        builder.build()
    }
}

impl IntoFuture for ContractQuery {
    type Output = Result<QueryResponse, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            let query = self.build_query()?;
            let response = execute(self.transport.as_ref(), &query).await?;
            if self.require_success {
                response.assert_success()?;
            }
            Ok(response)
        })
    }
}
