//! Cookies - Host Cookie Store Capability
//!
//! Templates read request cookies and queue response cookies through a
//! `CookieJar` supplied by the host. Values can optionally be signed.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::hashing::{keyed_mac, mac_hex, verify_mac_hex, HmacSha256};

const MAC_HEX_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum CookieError {
    #[error("Invalid cookie name: {0:?}")]
    InvalidName(String),

    #[error("Invalid cookie expiry timestamp: {0}")]
    InvalidExpiry(i64),

    #[error("Invalid cookie validation key")]
    InvalidKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    /// `None` lives for the browser session.
    #[serde(default)]
    pub expire: Option<DateTime<Utc>>,
}

impl Cookie {
    /// Build a cookie from a unix `expire` timestamp, `0` meaning session.
    pub fn new(name: &str, value: &str, expire: i64) -> Result<Self, CookieError> {
        if name.is_empty() || name.contains(|c: char| c.is_whitespace() || "=;,".contains(c)) {
            return Err(CookieError::InvalidName(name.to_string()));
        }

        let expire = match expire {
            0 => None,
            ts if ts < 0 => return Err(CookieError::InvalidExpiry(ts)),
            ts => Some(DateTime::from_timestamp(ts, 0).ok_or(CookieError::InvalidExpiry(ts))?),
        };

        Ok(Self {
            name: name.to_string(),
            value: value.to_string(),
            expire,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expire.is_some_and(|at| at <= now)
    }
}

pub trait CookieJar {
    fn get(&self, name: &str) -> Option<&Cookie>;
    fn add(&mut self, cookie: Cookie);
}

/// A `CookieJar` kept in memory, one cookie per name.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: HashMap<String, Cookie>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<&Cookie> {
        self.cookies.get(name)
    }

    fn add(&mut self, cookie: Cookie) {
        self.cookies.insert(cookie.name.clone(), cookie);
    }
}

/// Queue a cookie on the jar. `expire` is a unix timestamp, `0` for session.
pub fn set_cookie<J: CookieJar + ?Sized>(
    jar: &mut J,
    name: &str,
    value: &str,
    expire: i64,
) -> Result<(), CookieError> {
    let cookie = Cookie::new(name, value, expire)?;
    debug!(name, session = cookie.expire.is_none(), "setting cookie");
    jar.add(cookie);
    Ok(())
}

/// Read a cookie value. Expired cookies read as absent.
pub fn get_cookie<J: CookieJar + ?Sized>(jar: &J, name: &str, now: DateTime<Utc>) -> Option<String> {
    jar.get(name)
        .filter(|cookie| !cookie.is_expired(now))
        .map(|cookie| cookie.value.clone())
}

/// Signs cookie values with HMAC-SHA256 under a validation key.
///
/// Signed form is the hex MAC followed by the plain value. The MAC covers
/// the cookie name as well as the value.
#[derive(Clone)]
pub struct CookieSigner {
    mac: HmacSha256,
}

impl CookieSigner {
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self, CookieError> {
        let mac = keyed_mac(key.as_ref()).map_err(|_| CookieError::InvalidKey)?;
        Ok(Self { mac })
    }

    pub fn sign(&self, name: &str, value: &str) -> String {
        format!("{}{}", mac_hex(&self.mac, &signed_data(name, value)), value)
    }

    /// The plain value if `signed` carries a valid MAC for `name`.
    pub fn verify<'a>(&self, name: &str, signed: &'a str) -> Option<&'a str> {
        if signed.len() < MAC_HEX_LEN || !signed.is_char_boundary(MAC_HEX_LEN) {
            return None;
        }
        let (mac, value) = signed.split_at(MAC_HEX_LEN);
        verify_mac_hex(&self.mac, &signed_data(name, value), mac).then_some(value)
    }
}

fn signed_data(name: &str, value: &str) -> Vec<u8> {
    format!("{}\0{}", name, value).into_bytes()
}

impl std::fmt::Debug for CookieSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieSigner").finish_non_exhaustive()
    }
}
