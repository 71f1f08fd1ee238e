//! HMAC-SHA256 signing and verification for request bodies and webhooks.
//!
//! Keys are hex-encoded strings (the form the merchant dashboard hands out)
//! and are decoded to raw bytes before use. MACs are lowercase hex.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::Error;

type HmacSha256 = Hmac<Sha256>;

/// Compute HMAC-SHA256 over `message` using `key` decoded from hex.
/// Returns the lowercase hex-encoded MAC. Deterministic.
pub fn sign_message(message: &str, key: &str) -> Result<String, Error> {
    let key_bytes = decode_key(key)?;
    let mut mac = HmacSha256::new_from_slice(&key_bytes).expect("HMAC accepts any key length");
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verify `candidate_mac` against the MAC of `message` under `key`.
///
/// The comparison is constant-time, so timing does not reveal where the
/// first mismatching byte sits. A candidate that is not valid hex or has the
/// wrong length is an ordinary `Ok(false)`; only a non-hex `key` is an error.
pub fn valid_mac(message: &str, candidate_mac: &str, key: &str) -> Result<bool, Error> {
    let expected = sign_message(message, key)?;
    let expected_bytes = hex::decode(&expected).expect("sign_message emits valid hex");

    let candidate_bytes = match hex::decode(candidate_mac) {
        Ok(bytes) => bytes,
        Err(_) => return Ok(false),
    };
    if candidate_bytes.len() != expected_bytes.len() {
        return Ok(false);
    }

    Ok(expected_bytes.as_slice().ct_eq(candidate_bytes.as_slice()).into())
}

fn decode_key(key: &str) -> Result<Vec<u8>, Error> {
    hex::decode(key).map_err(|_| Error::InvalidHex("key is not valid hexadecimal".to_string()))
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().fold(String::new(), |mut s, b| {
            use std::fmt::Write;
            let _ = write!(s, "{b:02x}");
            s
        })
    }

    pub fn decode(s: &str) -> Result<Vec<u8>, ()> {
        if s.len() % 2 != 0 || !s.is_ascii() {
            return Err(());
        }
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| ()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4231 test case 2: key "Jefe", data "what do ya want for nothing?".
    const JEFE_KEY: &str = "4a656665";
    const JEFE_MSG: &str = "what do ya want for nothing?";
    const JEFE_MAC: &str = "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843";

    const KEY: &str = "aabbccddeeff00112233445566778899";

    #[test]
    fn known_vector() {
        assert_eq!(sign_message(JEFE_MSG, JEFE_KEY).unwrap(), JEFE_MAC);
    }

    #[test]
    fn signing_is_deterministic_and_lowercase() {
        let a = sign_message("payload", KEY).unwrap();
        let b = sign_message("payload", KEY).unwrap();
        assert_eq!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn sign_then_verify_roundtrip() {
        let mac = sign_message("payload", KEY).unwrap();
        assert!(valid_mac("payload", &mac, KEY).unwrap());
    }

    #[test]
    fn tampered_mac_is_rejected() {
        let mac = sign_message("payload", KEY).unwrap();
        // Flip one nibble of the MAC.
        let first = mac.as_bytes()[0];
        let flipped = if first == b'0' { 'f' } else { '0' };
        let mut tampered = mac.clone();
        tampered.replace_range(0..1, &flipped.to_string());
        assert!(!valid_mac("payload", &tampered, KEY).unwrap());
    }

    #[test]
    fn tampered_message_is_rejected() {
        let mac = sign_message("payload", KEY).unwrap();
        assert!(!valid_mac("payload2", &mac, KEY).unwrap());
    }

    #[test]
    fn wrong_key_is_rejected() {
        let mac = sign_message("payload", KEY).unwrap();
        assert!(!valid_mac("payload", &mac, JEFE_KEY).unwrap());
    }

    #[test]
    fn non_hex_candidate_is_false_not_error() {
        assert!(!valid_mac("payload", "not-hex-zz", KEY).unwrap());
    }

    #[test]
    fn wrong_length_candidate_is_false() {
        assert!(!valid_mac("payload", "deadbeef", KEY).unwrap());
    }

    #[test]
    fn non_hex_key_is_an_error() {
        assert!(matches!(
            sign_message("payload", "zzzz"),
            Err(Error::InvalidHex(_))
        ));
        assert!(matches!(
            valid_mac("payload", "deadbeef", "zzzz"),
            Err(Error::InvalidHex(_))
        ));
    }
}
