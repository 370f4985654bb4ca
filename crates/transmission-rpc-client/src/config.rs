//! Client configuration.

use std::{env, fmt};

use transmission_rpc_types::{DEFAULT_ADDRESS, RpcError};
use url::Url;

/// Connection settings for a [`Client`](crate::Client).
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// RPC endpoint. Defaults to [`DEFAULT_ADDRESS`].
    pub address: String,
    /// Basic auth user.
    pub user: Option<String>,
    /// Basic auth password.
    pub password: Option<String>,
    /// Accept invalid TLS certificates. Only for daemons behind a self-signed certificate.
    pub skip_check_ssl: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            user: None,
            password: None,
            skip_check_ssl: false,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("address", &self.address)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("skip_check_ssl", &self.skip_check_ssl)
            .finish()
    }
}

impl ClientConfig {
    /// Configuration for the daemon at `address`.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    /// Set basic auth credentials.
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    /// Enable or disable TLS certificate verification bypass.
    pub fn with_skip_check_ssl(mut self, skip: bool) -> Self {
        self.skip_check_ssl = skip;
        self
    }

    /// Read the configuration from the environment:
    /// - `TRANSMISSION_RPC_URL` (default: http://localhost:9091/transmission/rpc)
    /// - `TRANSMISSION_USER`, `TRANSMISSION_PASSWORD`
    /// - `TRANSMISSION_SKIP_CHECK_SSL` (`1`, `true` or `yes`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            address: non_empty("TRANSMISSION_RPC_URL").unwrap_or_else(|| DEFAULT_ADDRESS.into()),
            user: non_empty("TRANSMISSION_USER"),
            password: non_empty("TRANSMISSION_PASSWORD"),
            skip_check_ssl: non_empty("TRANSMISSION_SKIP_CHECK_SSL")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    /// Credentials to send, if both parts are set.
    pub(crate) fn credentials(&self) -> Option<(&str, &str)> {
        match (self.user.as_deref(), self.password.as_deref()) {
            (Some(user), Some(password)) if !user.is_empty() && !password.is_empty() => {
                Some((user, password))
            }
            _ => None,
        }
    }

    /// Parse the endpoint. An empty address means the default one.
    pub(crate) fn endpoint(&self) -> Result<Url, RpcError> {
        let address = if self.address.is_empty() {
            DEFAULT_ADDRESS
        } else {
            self.address.as_str()
        };
        Url::parse(address).map_err(|e| RpcError::InvalidConfig(format!("Invalid RPC URL: {}", e)))
    }
}
