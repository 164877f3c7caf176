use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{CreateMealRequest, EditMealRequest, MealListResponse, MealResponse};
use super::services::{find_owned_meal, new_meal};
use crate::{error::ApiError, session::SessionUser, state::AppState};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals))
        .route("/meals/:id", get(get_meal))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", post(create_meal))
        .route("/meals/:id", put(edit_meal))
}

#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    payload: Result<Json<CreateMealRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(body) = payload?;
    let meal = state.store.insert_meal(new_meal(user_id, body)).await?;
    info!(%user_id, meal_id = %meal.id, "meal created");
    Ok(StatusCode::CREATED)
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
) -> Result<Json<MealListResponse>, ApiError> {
    let meals = state.store.list_meals_by_user(user_id).await?;
    Ok(Json(MealListResponse { meals }))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MealResponse>, ApiError> {
    let Path(meal_id) = id?;
    let selected_meal = find_owned_meal(state.store.as_ref(), user_id, meal_id).await?;
    Ok(Json(MealResponse { selected_meal }))
}

#[instrument(skip(state, payload))]
pub async fn edit_meal(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<EditMealRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(meal_id) = id?;
    find_owned_meal(state.store.as_ref(), user_id, meal_id).await?;
    let Json(body) = payload?;

    state
        .store
        .update_meal(meal_id, body.into())
        .await?
        .ok_or(ApiError::MealNotFound)?;

    info!(%user_id, %meal_id, "meal updated");
    Ok(StatusCode::OK)
}
