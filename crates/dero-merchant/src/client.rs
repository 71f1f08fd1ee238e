//! Request dispatch against the Dero Merchant REST API.
//!
//! [`Client`] holds immutable configuration and a `reqwest::Client` built
//! once with the fixed default headers; each call is independent and carries
//! no state between requests.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::config::{self, ClientConfig, REQUEST_TIMEOUT};
use crate::error::Error;
use crate::hmac;

/// Header carrying the store API key on every request.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Header carrying the HMAC-SHA256 signature of a signed body.
pub const SIGNATURE_HEADER: &str = "X-Signature";

/// A single request to dispatch. Built by the convenience methods on
/// [`Client`]; constructed and consumed within one call.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub endpoint: String,
    pub query_params: Option<Vec<(String, String)>>,
    pub body: Option<Value>,
    pub sign_body: bool,
}

impl RequestSpec {
    fn get(endpoint: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            endpoint: endpoint.into(),
            query_params: None,
            body: None,
            sign_body: false,
        }
    }

    fn post(endpoint: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            endpoint: endpoint.into(),
            query_params: None,
            body: Some(body),
            sign_body: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct CreatePaymentRequest<'a> {
    currency: &'a str,
    amount: u64,
}

/// Filters for [`Client::get_filtered_payments`]. Unset fields are omitted
/// from the query string.
#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub limit: Option<u64>,
    pub page: Option<u64>,
    pub sort_by: Option<String>,
    pub order_by: Option<String>,
    pub status: Option<String>,
    pub currency: Option<String>,
}

impl PaymentFilter {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(ref sort_by) = self.sort_by {
            params.push(("sort_by".to_string(), sort_by.clone()));
        }
        if let Some(ref order_by) = self.order_by {
            params.push(("order_by".to_string(), order_by.clone()));
        }
        if let Some(ref status) = self.status {
            params.push(("status".to_string(), status.clone()));
        }
        if let Some(ref currency) = self.currency {
            params.push(("currency".to_string(), currency.clone()));
        }
        params
    }
}

/// Dero Merchant API client.
pub struct Client {
    config: ClientConfig,
    base_url: String,
    http: reqwest::Client,
}

impl Client {
    /// Build a client from configuration. Derives the base URL and installs
    /// the fixed default headers and timeout on the underlying transport.
    pub fn new(cfg: ClientConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(config::USER_AGENT));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(&cfg.api_key)
                .map_err(|e| Error::Config(format!("API key is not a valid header value: {e}")))?,
        );

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        let base_url = cfg.base_url();
        Ok(Self {
            config: cfg,
            base_url,
            http,
        })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Dispatch a request and normalize the outcome.
    ///
    /// A body is serialized to JSON text exactly once; when `sign_body` is
    /// set, the signature is computed over that same string, so the signed
    /// bytes are the transmitted bytes. The signature travels in
    /// `X-Signature` alongside the client's default headers (reqwest merges
    /// per-request headers into the defaults).
    ///
    /// Failure precedence: an `error` field in the response body wins over
    /// the HTTP status regardless of the status code, the status wins over
    /// the raw transport description.
    pub async fn send_request(&self, spec: RequestSpec) -> Result<Value, Error> {
        let url = format!("{}{}", self.base_url, spec.endpoint);
        let mut req = self.http.request(spec.method.clone(), &url);

        if let Some(ref params) = spec.query_params {
            req = req.query(params);
        }

        if let Some(ref body) = spec.body {
            let serialized = serde_json::to_string(body)?;
            if spec.sign_body {
                let signature = hmac::sign_message(&serialized, &self.config.secret_key)?;
                req = req.header(SIGNATURE_HEADER, signature);
            }
            req = req.body(serialized);
        }

        tracing::debug!(method = %spec.method, url = %url, signed = spec.sign_body, "dispatching request");

        let resp = req
            .send()
            .await
            .map_err(|e| Error::Transport(format!("request failed: {e}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| Error::Transport(format!("failed to read response body: {e}")))?;
        let parsed: Option<Value> = serde_json::from_str(&text).ok();

        // The server's own error payload wins over the HTTP status.
        if let Some(error_value) = parsed.as_ref().and_then(|v| v.get("error")) {
            tracing::warn!(url = %url, "API reported an error");
            return Err(Error::Api(error_value.clone()));
        }

        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "request failed");
            return Err(if status == reqwest::StatusCode::NOT_FOUND {
                Error::NotFound { url }
            } else {
                Error::Status {
                    status: status.as_u16(),
                    url,
                }
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        parsed.ok_or_else(|| Error::Transport(format!("response from {url} is not valid JSON")))
    }

    /// Ping the API.
    pub async fn ping(&self) -> Result<Value, Error> {
        self.send_request(RequestSpec::get("/ping")).await
    }

    /// Create a new payment. The body is signed with the store secret key.
    pub async fn create_payment(&self, currency: &str, amount: u64) -> Result<Value, Error> {
        let body = serde_json::to_value(CreatePaymentRequest { currency, amount })?;
        let mut spec = RequestSpec::post("/payment", body);
        spec.sign_body = true;
        self.send_request(spec).await
    }

    /// Fetch a payment by ID.
    pub async fn get_payment(&self, payment_id: &str) -> Result<Value, Error> {
        self.send_request(RequestSpec::get(format!("/payment/{payment_id}")))
            .await
    }

    /// Fetch a batch of payments by their IDs.
    pub async fn get_payments(&self, payment_ids: &[&str]) -> Result<Value, Error> {
        let body = serde_json::to_value(payment_ids)?;
        self.send_request(RequestSpec::post("/payments", body)).await
    }

    /// Fetch payments matching `filter`, paginated.
    pub async fn get_filtered_payments(&self, filter: &PaymentFilter) -> Result<Value, Error> {
        let mut spec = RequestSpec::get("/payments");
        spec.query_params = Some(filter.to_query());
        self.send_request(spec).await
    }

    /// Pay helper page URL for a payment. Pure string composition, no
    /// network call.
    pub fn pay_helper_url(&self, payment_id: &str) -> String {
        self.config.pay_helper_url(payment_id)
    }
}
