//! Session token handling: the cookie carries an opaque token that maps to a user row.

use axum_extra::extract::cookie::{Cookie, CookieJar};
use time::Duration;
use uuid::Uuid;

use crate::{
    config::{SessionConfig, MAX_SESSION_AGE_DAYS},
    storage::Store,
    storage::StoreResult,
    users::repo_types::User,
};

pub mod extractors;

pub use extractors::SessionUser;

/// Outcome of looking up a session token.
#[derive(Debug)]
pub enum SessionLookup {
    /// The request carried no token.
    Missing,
    /// A token was sent but no user is bound to it.
    Unknown(String),
    Resolved(User),
}

/// Reads the session cookie. An empty value counts as absent.
pub fn session_token(jar: &CookieJar, cookie_name: &str) -> Option<String> {
    jar.get(cookie_name)
        .map(|c| c.value().trim().to_owned())
        .filter(|v| !v.is_empty())
}

pub async fn resolve(store: &dyn Store, token: Option<String>) -> StoreResult<SessionLookup> {
    let Some(token) = token else {
        return Ok(SessionLookup::Missing);
    };
    Ok(match store.find_user_by_session(&token).await? {
        Some(user) => SessionLookup::Resolved(user),
        None => SessionLookup::Unknown(token),
    })
}

pub fn new_token() -> String {
    Uuid::new_v4().to_string()
}

/// Site-wide, long-lived cookie carrying `token`.
/// The lifetime is clamped to `1..=MAX_SESSION_AGE_DAYS` days.
pub fn session_cookie(config: &SessionConfig, token: String) -> Cookie<'static> {
    let days = config.max_age_days.clamp(1, MAX_SESSION_AGE_DAYS);
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .max_age(Duration::days(days))
        .build()
}
