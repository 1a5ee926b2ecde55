//! Flash cookie
//!
//! A flash set by a redirect or navigation script survives exactly one
//! request: it is stored as `flash=<kind>:<percent-encoded text>` and the
//! next rendered page shows it and clears the cookie.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};

use crate::handlers::{FlashKind, FlashMessage};

const COOKIE_NAME: &str = "flash";

/// `Set-Cookie` value carrying the flash to the next request
pub fn set_cookie(flash: &FlashMessage) -> String {
    format!(
        "{}={}:{}; Path=/; HttpOnly; SameSite=Lax",
        COOKIE_NAME,
        flash.kind.as_str(),
        utf8_percent_encode(&flash.text, NON_ALPHANUMERIC)
    )
}

/// `Set-Cookie` value removing the flash
pub fn clear_cookie() -> String {
    format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", COOKIE_NAME)
}

/// Flash left by the previous response, if any
pub fn read(headers: &HeaderMap) -> Option<FlashMessage> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .and_then(|(_, value)| decode(value))
}

fn decode(value: &str) -> Option<FlashMessage> {
    let (kind, text) = value.split_once(':')?;
    let kind = FlashKind::from_str(kind)?;
    let text = percent_decode_str(text).decode_utf8().ok()?.into_owned();
    Some(FlashMessage { kind, text })
}
