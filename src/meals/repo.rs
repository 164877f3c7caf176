use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Meal, MealChanges, NewMeal};

const MEAL_COLUMNS: &str =
    "id, user_id, name, description, date, is_on_diet, created_at, updated_at";

pub async fn insert(db: &PgPool, new: &NewMeal) -> sqlx::Result<Meal> {
    sqlx::query_as::<_, Meal>(&format!(
        r#"
        INSERT INTO meals (id, user_id, name, description, date, is_on_diet)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {MEAL_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(new.user_id)
    .bind(&new.name)
    .bind(&new.description)
    .bind(new.date)
    .bind(new.is_on_diet)
    .fetch_one(db)
    .await
}

/// All meals of a user in the order they were recorded.
pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<Meal>> {
    sqlx::query_as::<_, Meal>(&format!(
        r#"
        SELECT {MEAL_COLUMNS}
        FROM meals
        WHERE user_id = $1
        ORDER BY created_at ASC
        "#
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn find_by_id(db: &PgPool, meal_id: Uuid) -> sqlx::Result<Option<Meal>> {
    sqlx::query_as::<_, Meal>(&format!(
        r#"
        SELECT {MEAL_COLUMNS}
        FROM meals
        WHERE id = $1
        "#
    ))
    .bind(meal_id)
    .fetch_optional(db)
    .await
}

pub async fn update(
    db: &PgPool,
    meal_id: Uuid,
    changes: &MealChanges,
) -> sqlx::Result<Option<Meal>> {
    sqlx::query_as::<_, Meal>(&format!(
        r#"
        UPDATE meals
           SET name        = COALESCE($2, name),
               description = COALESCE($3, description),
               is_on_diet  = COALESCE($4, is_on_diet),
               updated_at  = now()
         WHERE id = $1
        RETURNING {MEAL_COLUMNS}
        "#
    ))
    .bind(meal_id)
    .bind(changes.name.as_deref())
    .bind(changes.description.as_deref())
    .bind(changes.is_on_diet)
    .fetch_optional(db)
    .await
}
