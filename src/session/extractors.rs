use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;
use uuid::Uuid;

use super::{resolve, session_token, SessionLookup};
use crate::{error::ApiError, state::AppState};

/// Resolves the session cookie to the acting user's id.
pub struct SessionUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = session_token(&jar, &state.config.session.cookie_name);

        match resolve(state.store.as_ref(), token).await? {
            SessionLookup::Resolved(user) => Ok(SessionUser(user.id)),
            SessionLookup::Missing => {
                warn!("request without session cookie");
                Err(ApiError::MissingSession)
            }
            SessionLookup::Unknown(_) => {
                warn!("session cookie does not match any user");
                Err(ApiError::UnknownSession)
            }
        }
    }
}
