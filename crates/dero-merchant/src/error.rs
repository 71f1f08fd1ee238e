use thiserror::Error;

/// Errors returned by Dero Merchant client operations.
///
/// HTTP failures are normalized with a fixed precedence: an `error` field in
/// the response body wins over the status code, and the status code wins over
/// a raw transport description.
#[derive(Debug, Error)]
pub enum Error {
    /// Error payload reported by the API itself, passed through unmodified.
    #[error("{}", api_error_text(.0))]
    Api(serde_json::Value),

    #[error("error 404: page {url} not found")]
    NotFound { url: String },

    #[error("error {status} returned by {url}")]
    Status { status: u16, url: String },

    /// Connection failure, timeout, or a malformed response.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("config error: {0}")]
    Config(String),

    /// Key material handed to the signer was not valid hexadecimal.
    #[error("invalid hex encoding: {0}")]
    InvalidHex(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Render the server's `error` field as plain text when it is a JSON string,
/// otherwise as compact JSON.
fn api_error_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_error_string_renders_unquoted() {
        let err = Error::Api(json!("insufficient funds"));
        assert_eq!(err.to_string(), "insufficient funds");
    }

    #[test]
    fn api_error_object_renders_as_json() {
        let err = Error::Api(json!({"code": 42}));
        assert_eq!(err.to_string(), r#"{"code":42}"#);
    }

    #[test]
    fn not_found_names_the_url() {
        let err = Error::NotFound {
            url: "https://merchant.dero.io/api/v1/payment/x".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("not found"));
        assert!(msg.contains("https://merchant.dero.io/api/v1/payment/x"));
    }

    #[test]
    fn status_names_status_and_url() {
        let err = Error::Status {
            status: 500,
            url: "https://merchant.dero.io/api/v1/ping".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("https://merchant.dero.io/api/v1/ping"));
    }
}
