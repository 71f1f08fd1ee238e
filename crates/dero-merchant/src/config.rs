//! Client configuration and API defaults.

use std::time::Duration;

/// Default URL scheme.
pub const DEFAULT_SCHEME: &str = "https";

/// Default Dero Merchant host.
pub const DEFAULT_HOST: &str = "merchant.dero.io";

/// Default API version path segment.
pub const DEFAULT_API_VERSION: &str = "v1";

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("DeroMerchant_Client_Rust/", env!("CARGO_PKG_VERSION"));

/// Per-request transport timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Immutable client configuration.
///
/// Owned by one [`Client`](crate::Client) and never mutated after
/// construction. The base URL is derived from it as
/// `{scheme}://{host}/api/{api_version}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub scheme: String,
    pub host: String,
    pub api_version: String,
    /// Store API key, sent as `X-API-Key` on every request.
    pub api_key: String,
    /// Store secret key (hex), used to sign request bodies.
    pub secret_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            api_key: String::new(),
            secret_key: String::new(),
        }
    }
}

impl ClientConfig {
    /// Base URL for API calls: `{scheme}://{host}/api/{api_version}`.
    pub fn base_url(&self) -> String {
        format!("{}://{}/api/{}", self.scheme, self.host, self.api_version)
    }

    /// Pay helper page for a payment: `{scheme}://{host}/pay/{payment_id}`.
    /// A link for end users, not an API call.
    pub fn pay_helper_url(&self, payment_id: &str) -> String {
        format!("{}://{}/pay/{}", self.scheme, self.host, payment_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url() {
        assert_eq!(
            ClientConfig::default().base_url(),
            "https://merchant.dero.io/api/v1"
        );
    }

    #[test]
    fn pay_helper_url_is_exact() {
        assert_eq!(
            ClientConfig::default().pay_helper_url("abc123"),
            "https://merchant.dero.io/pay/abc123"
        );
    }
}
