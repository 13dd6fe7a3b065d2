//! Signed session cookies.
//!
//! The session id is an opaque UUID. The cookie value carries
//! `{id}.{hex(hmac_sha256(secret, id))}`, so a tampered or forged
//! cookie can never address another session's record. Cookies are
//! only minted on upload; requests without a valid cookie simply have
//! no session.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "medchat_session";

/// Mint a fresh session id and the Set-Cookie value that carries it.
pub fn issue(secret: &str) -> (String, String) {
    let id = Uuid::new_v4().to_string();
    let cookie = format!(
        "{SESSION_COOKIE}={id}.{}; Path=/; HttpOnly; SameSite=Lax",
        sign(secret, &id)
    );
    (id, cookie)
}

/// Extract and verify the session id from request headers.
///
/// Missing, malformed, and tampered cookies all count as "no session".
pub fn session_id(secret: &str, headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    let value = raw
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix(SESSION_COOKIE)?.strip_prefix('='))?;

    let (id, sig) = value.split_once('.')?;
    if verify(secret, id, sig) {
        Some(id.to_string())
    } else {
        None
    }
}

fn sign(secret: &str, id: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn verify(secret: &str, id: &str, sig_hex: &str) -> bool {
    let Ok(sig) = hex::decode(sig_hex) else {
        return false;
    };
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(id.as_bytes());
    mac.verify_slice(&sig).is_ok()
}
