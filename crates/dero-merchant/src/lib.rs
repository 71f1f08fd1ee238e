//! Client SDK for the Dero Merchant REST API.
//!
//! Builds authenticated HTTP requests, HMAC-signs request bodies where the
//! API requires it, normalizes responses and errors into one shape, and
//! verifies inbound webhook signatures.
//!
//! # Three parts
//!
//! - **Signer** ([`hmac`]) — HMAC-SHA256 over hex keys, constant-time
//!   verification
//! - **Client** ([`Client`]) — request dispatch and error normalization
//! - **Webhook verifier** ([`verify_webhook_signature`]) — inbound
//!   signature checks
//!
//! # Quick example
//!
//! ```no_run
//! use dero_merchant::{Client, ClientConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), dero_merchant::Error> {
//! let client = Client::new(ClientConfig {
//!     api_key: "YOUR_API_KEY".to_string(),
//!     secret_key: "YOUR_SECRET_KEY".to_string(),
//!     ..Default::default()
//! })?;
//!
//! let payment = client.create_payment("DERO", 100).await?;
//! println!("pay at {}", client.pay_helper_url(payment["paymentID"].as_str().unwrap_or("")));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod hmac;
pub mod webhook;

pub use client::{Client, PaymentFilter, RequestSpec, API_KEY_HEADER, SIGNATURE_HEADER};
pub use config::ClientConfig;
pub use error::Error;
pub use hmac::{sign_message, valid_mac};
pub use webhook::verify_webhook_signature;
