//! One-shot notices carried across a redirect in a cookie.
//!
//! A handler that redirects sets the cookie; the next page render reads it, shows the
//! notice, and removes it.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "flash_message";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Info,
    Danger,
}

impl FlashKind {
    pub fn css_class(self) -> &'static str {
        match self {
            FlashKind::Success => "flash-success",
            FlashKind::Info => "flash-info",
            FlashKind::Danger => "flash-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Info,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Danger,
            message: message.into(),
        }
    }

    /// URL-encoded JSON, safe to place in a cookie value.
    pub fn to_cookie_value(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        urlencoding::encode(&json).into_owned()
    }

    /// Tampered or stale cookies are ignored rather than rejected.
    pub fn from_cookie_value(raw: &str) -> Option<Self> {
        let json = urlencoding::decode(raw).ok()?;
        serde_json::from_str(&json).ok()
    }
}

/// Redirect with `303 See Other`, attaching `flash` for the next page render.
pub fn redirect_with_flash(jar: CookieJar, to: &str, flash: FlashMessage) -> Response {
    let cookie = Cookie::build((FLASH_COOKIE, flash.to_cookie_value()))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(true);

    (jar.add(cookie), Redirect::to(to)).into_response()
}

/// Read the pending notice, if any, and schedule its removal.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<FlashMessage>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let flash = FlashMessage::from_cookie_value(cookie.value());
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, flash)
}
