//! Signed visitor session cookie.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Name of the cookie carrying the visitor session id.
pub const SESSION_COOKIE: &str = "plotpilot_sid";

/// Length of random bytes before base64 encoding.
const SESSION_ID_BYTES: usize = 32;

/// Issues and verifies `plotpilot_sid=<id>.<mac>` cookies.
///
/// The id is 32 random bytes in URL-safe base64; the MAC is a hex
/// HMAC-SHA256 of the id keyed by the server secret. A cookie whose MAC does
/// not verify is treated as absent.
#[derive(Clone)]
pub struct SessionCookie {
    signing_secret: String,
    max_age_seconds: u64,
    secure: bool,
}

impl SessionCookie {
    /// # Arguments
    ///
    /// - `signing_secret` - HMAC key; rotating it invalidates every session
    /// - `max_age_seconds` - cookie lifetime, matching the session store TTL
    /// - `secure` - adds the `Secure` attribute (HTTPS deployments)
    pub fn new(signing_secret: String, max_age_seconds: u64, secure: bool) -> Self {
        Self {
            signing_secret,
            max_age_seconds,
            secure,
        }
    }

    /// Generates a fresh random session id.
    ///
    /// # Panics
    ///
    /// Panics if the system random number generator fails (extremely rare).
    pub fn new_session_id() -> String {
        let mut buffer = [0u8; SESSION_ID_BYTES];

        getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
    }

    fn mac(&self, id: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(id.as_bytes());
        mac
    }

    /// Cookie value for `id`: `<id>.<hex mac>`.
    pub fn sign(&self, id: &str) -> String {
        let tag = hex::encode(self.mac(id).finalize().into_bytes());
        format!("{id}.{tag}")
    }

    /// Returns the session id if `value` carries a valid signature.
    pub fn verify(&self, value: &str) -> Option<String> {
        let (id, tag) = value.rsplit_once('.')?;
        if id.is_empty() {
            return None;
        }

        let tag = hex::decode(tag).ok()?;
        self.mac(id).verify_slice(&tag).ok()?;

        Some(id.to_string())
    }

    /// Extracts and verifies the session id from a request's `Cookie` headers.
    pub fn session_id(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|header| header.to_str().ok())
            .flat_map(|cookies| cookies.split(';'))
            .find_map(|cookie| {
                let (name, value) = cookie.trim().split_once('=')?;
                if name == SESSION_COOKIE {
                    self.verify(value)
                } else {
                    None
                }
            })
    }

    /// `Set-Cookie` value establishing the session `id`.
    pub fn set_cookie(&self, id: &str) -> String {
        let mut cookie = format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.sign(id),
            self.max_age_seconds
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// `Set-Cookie` value that deletes the session cookie.
    pub fn clear_cookie(&self) -> String {
        let mut cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}
