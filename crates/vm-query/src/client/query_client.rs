//! The main query client.

use std::sync::Arc;

use crate::error::Error;
use crate::types::{Address, Query, QueryResponse};

use super::query::ContractQuery;
use super::transport::Transport;

/// Environment variable holding the default caller address.
pub const CALLER_ENV_VAR: &str = "VM_QUERY_CALLER";

/// Client configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Caller used by queries that do not set one.
    pub default_caller: Option<Address>,
}

impl ClientConfig {
    /// Read configuration from environment variables.
    ///
    /// - `VM_QUERY_CALLER` (optional): bech32 address used as the default
    ///   caller. An empty value is treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `VM_QUERY_CALLER` is not a valid address.
    pub fn from_env() -> Result<Self, Error> {
        let caller = std::env::var(CALLER_ENV_VAR).ok();
        Self::from_caller_var(caller.as_deref())
    }

    fn from_caller_var(caller: Option<&str>) -> Result<Self, Error> {
        let default_caller = match caller.map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(value.parse::<Address>().map_err(|e| {
                Error::Config(format!("{CALLER_ENV_VAR} is not a valid address: {e}"))
            })?),
        };
        Ok(Self { default_caller })
    }
}

/// Client for running read-only contract queries.
///
/// The client owns a [`Transport`] and composes the full round trip: build
/// the request, send it, decode the response.
///
/// # Example
///
/// ```rust,no_run
/// use vm_query::*;
///
/// # async fn example(transport: impl Transport + 'static) -> Result<(), vm_query::Error> {
/// let client = QueryClient::builder(transport)
///     .default_caller("erd1qyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqsl6e0p7".parse()?)
///     .build();
///
/// let response = client
///     .query("erd1qyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqsl6e0p7", "getSum")
///     .expect_success()
///     .await?;
/// println!("{}", response.to_json());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct QueryClient {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
}

impl QueryClient {
    /// Create a builder around a transport.
    pub fn builder(transport: impl Transport + 'static) -> QueryClientBuilder {
        QueryClientBuilder::new(Arc::new(transport))
    }

    /// Create a client configured from environment variables.
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_env(transport: impl Transport + 'static) -> Result<QueryClient, Error> {
        Ok(Self::builder(transport)
            .config(ClientConfig::from_env()?)
            .build())
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Query a contract function.
    ///
    /// Returns a builder that can be customized with arguments, caller and
    /// value before awaiting.
    pub fn query(&self, address: impl AsRef<str>, function: impl AsRef<str>) -> ContractQuery {
        ContractQuery::new(
            self.transport.clone(),
            address.as_ref().to_string(),
            function.as_ref().to_string(),
            self.config.default_caller,
        )
    }

    /// Run a prebuilt query.
    ///
    /// The client's default caller is not applied; the query is sent as is.
    pub async fn run(&self, query: &Query) -> Result<QueryResponse, Error> {
        execute(self.transport.as_ref(), query).await
    }
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`QueryClient`].
pub struct QueryClientBuilder {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
}

impl QueryClientBuilder {
    fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            config: ClientConfig::default(),
        }
    }

    /// Set the caller used by queries that do not set one.
    pub fn default_caller(mut self, caller: Address) -> Self {
        self.config.default_caller = Some(caller);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the client.
    pub fn build(self) -> QueryClient {
        QueryClient {
            transport: self.transport,
            config: self.config,
        }
    }
}

/// Send a query and decode whatever comes back.
pub(crate) async fn execute(
    transport: &dyn Transport,
    query: &Query,
) -> Result<QueryResponse, Error> {
    let request = query.to_http_request();
    tracing::debug!(
        contract = %request.sc_address,
        function = %request.func_name,
        args = request.args.len(),
        "sending contract query"
    );

    let payload = transport.query_contract(&request).await?;
    let response = QueryResponse::from_http_response(&payload);

    tracing::debug!(
        contract = %request.sc_address,
        function = %request.func_name,
        return_code = %response.return_code(),
        gas_used = response.gas_used().as_gas(),
        "contract query finished"
    );
    Ok(response)
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::TransportFuture;
    use crate::types::QueryRequest;

    struct NullTransport;

    impl Transport for NullTransport {
        fn query_contract(&self, _request: &QueryRequest) -> TransportFuture<'_> {
            Box::pin(async { Ok(Value::Null) })
        }
    }

    const CALLER: &str = "erd1qyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqsl6e0p7";

    #[test]
    fn test_config_from_caller_var() {
        assert_eq!(ClientConfig::from_caller_var(None).unwrap(), ClientConfig::default());
        assert_eq!(
            ClientConfig::from_caller_var(Some("  ")).unwrap(),
            ClientConfig::default()
        );

        let config = ClientConfig::from_caller_var(Some(CALLER)).unwrap();
        assert_eq!(config.default_caller, Some(CALLER.parse().unwrap()));
    }

    #[test]
    fn test_config_invalid_caller() {
        let err = ClientConfig::from_caller_var(Some("erd1bogus")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains(CALLER_ENV_VAR));
    }

    #[test]
    fn test_builder_sets_default_caller() {
        let caller: Address = CALLER.parse().unwrap();
        let client = QueryClient::builder(NullTransport)
            .default_caller(caller)
            .build();
        assert_eq!(client.config().default_caller, Some(caller));

        let client = QueryClient::builder(NullTransport).build();
        assert_eq!(client.config().default_caller, None);
    }

    #[test]
    fn test_debug_hides_transport() {
        let client = QueryClient::builder(NullTransport).build();
        let debug = format!("{:?}", client);
        assert!(debug.starts_with("QueryClient"));
        assert!(debug.contains("config"));
    }
}
