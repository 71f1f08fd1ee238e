//! Inbound webhook signature verification.

use crate::error::Error;
use crate::hmac;

/// Verify the `X-Signature` header of an inbound webhook against the store's
/// webhook secret key.
///
/// `raw_body` must be the request body text exactly as received off the
/// wire. Parsing and re-serializing the payload first changes the bytes and
/// legitimate webhooks would be rejected. A mismatch is `Ok(false)`; only a
/// non-hex secret key is an error.
pub fn verify_webhook_signature(
    raw_body: &str,
    signature_header: &str,
    store_secret_key: &str,
) -> Result<bool, Error> {
    hmac::valid_mac(raw_body, signature_header, store_secret_key)
}
