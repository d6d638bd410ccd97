use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use feedback_db::models::FeedbackRow;

use crate::AppState;
use crate::error::AuthFailure;

pub const SESSION_COOKIE: &str = "session";

const SESSION_DAYS: i64 = 14;

/// Signed claims carried inside the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn create_session_token(secret: &str, username: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: username.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(SESSION_DAYS)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Returns the claimed username, or None for an expired or tampered token.
pub fn verify_session_token(secret: &str, token: &str) -> Option<String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims.sub)
    .ok()
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

/// Matching cookie for `CookieJar::remove`; path must agree with the one
/// set at login or the browser keeps the original.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie
}

/// The session's identity claim, resolved once per request. A missing,
/// expired, or tampered cookie is treated the same as being logged out,
/// so authorization checks below never need to distinguish the cases.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub identity: Option<String>,
}

impl AuthContext {
    /// Self-check: the session identity must equal the target username.
    /// Returns the matched identity so callers attribute writes to the
    /// session, never to caller-supplied input.
    pub fn require_self(&self, username: &str) -> Result<&str, AuthFailure> {
        match self.identity.as_deref() {
            None => Err(AuthFailure::NotAuthenticated),
            Some(me) if me == username => Ok(me),
            Some(_) => Err(AuthFailure::NotAuthorized),
        }
    }

    /// Ownership-check: the session identity must own the feedback row.
    pub fn require_owner<'a>(&'a self, feedback: &FeedbackRow) -> Result<&'a str, AuthFailure> {
        self.require_self(&feedback.username)
    }
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let identity = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| verify_session_token(&state.session_secret, cookie.value()));
        Ok(AuthContext { identity })
    }
}
