use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument, warn};

use super::{
    dto::{MetricsResponse, RegisterUserRequest},
    repo_types::NewUser,
    services::validate_registration,
};
use crate::{
    error::ApiError,
    meals::metrics::MealMetrics,
    session::{self, SessionLookup, SessionUser},
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/users/metrics", get(get_metrics))
}

/// Creates a user bound to the caller's session, minting the session cookie if needed.
#[instrument(skip(state, jar, payload))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<(StatusCode, CookieJar, Json<RegisterUserRequest>), ApiError> {
    let Json(body) = payload?;
    validate_registration(&body).map_err(|e| {
        warn!(email = %body.email, "invalid registration");
        e
    })?;

    let session_cfg = &state.config.session;
    let presented = session::session_token(&jar, &session_cfg.cookie_name);

    let (jar, session_id) = match session::resolve(state.store.as_ref(), presented).await? {
        SessionLookup::Missing => {
            let token = session::new_token();
            let jar = jar.add(session::session_cookie(session_cfg, token.clone()));
            (jar, token)
        }
        SessionLookup::Unknown(token) => (jar, token),
        SessionLookup::Resolved(existing) => {
            warn!(user_id = %existing.id, "session already bound to a user");
            return Err(ApiError::SessionTaken);
        }
    };

    let user = state
        .store
        .insert_user(NewUser {
            session_id,
            email: body.email.clone(),
            name: body.name.clone(),
        })
        .await?;

    info!(
        user_id = %user.id,
        email = %user.email,
        name = %user.name,
        created_at = %user.created_at,
        "user registered"
    );
    Ok((StatusCode::CREATED, jar, Json(body)))
}

#[instrument(skip(state))]
pub async fn get_metrics(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
) -> Result<Json<MetricsResponse>, ApiError> {
    let meals = state.store.list_meals_by_user(user_id).await?;
    let metrics = MealMetrics::from_meals(&meals);
    Ok(Json(MetricsResponse { metrics }))
}
