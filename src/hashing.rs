//! Hashing - HMAC-SHA256 Hex Digests
//!
//! Backs signed cookie values.

use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub type HmacSha256 = Hmac<Sha256>;

/// Keyed HMAC-SHA256 state, reusable across messages.
pub fn keyed_mac(key: &[u8]) -> Result<HmacSha256, InvalidLength> {
    HmacSha256::new_from_slice(key)
}

/// MAC of `data` under the keyed state, as hex.
pub fn mac_hex(mac: &HmacSha256, data: &[u8]) -> String {
    let mut mac = mac.clone();
    mac.update(data);
    hex::encode(mac.finalize().into_bytes())
}

/// Check a hex MAC for `data` in constant time.
pub fn verify_mac_hex(mac: &HmacSha256, data: &[u8], expected: &str) -> bool {
    let Some(expected) = hex::decode(expected) else {
        return false;
    };
    let mut mac = mac.clone();
    mac.update(data);
    mac.verify_slice(&expected).is_ok()
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }

    pub fn decode(text: &str) -> Option<Vec<u8>> {
        if text.len() % 2 != 0 || !text.is_ascii() {
            return None;
        }
        (0..text.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&text[i..i + 2], 16).ok())
            .collect()
    }
}
