use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use super::dto::CreateMealRequest;
use super::repo_types::{Meal, NewMeal};
use crate::{error::ApiError, storage::Store};

/// True only when the meal exists and belongs to `user_id`.
pub fn is_owner(user_id: Uuid, meal: Option<&Meal>) -> bool {
    matches!(meal, Some(m) if m.user_id == user_id)
}

/// Loads a meal for reading or writing. Foreign and missing meals both yield `MealNotFound`.
pub async fn find_owned_meal(
    store: &dyn Store,
    user_id: Uuid,
    meal_id: Uuid,
) -> Result<Meal, ApiError> {
    let meal = store.find_meal(meal_id).await?;
    match meal {
        Some(m) if is_owner(user_id, Some(&m)) => Ok(m),
        _ => {
            warn!(%user_id, %meal_id, "meal missing or not owned");
            Err(ApiError::MealNotFound)
        }
    }
}

pub fn new_meal(user_id: Uuid, body: CreateMealRequest) -> NewMeal {
    NewMeal {
        user_id,
        name: body.name,
        description: body.description,
        is_on_diet: body.is_on_diet,
        date: OffsetDateTime::now_utc(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal_of(user_id: Uuid) -> Meal {
        let now = OffsetDateTime::now_utc();
        Meal {
            id: Uuid::new_v4(),
            user_id,
            name: "salad".into(),
            description: "greens".into(),
            date: now,
            is_on_diet: true,
            created_at: now,
            updated_at: None,
        }
    }

    #[test]
    fn owner_passes_others_fail() {
        let owner = Uuid::new_v4();
        let meal = meal_of(owner);
        assert!(is_owner(owner, Some(&meal)));
        assert!(!is_owner(Uuid::new_v4(), Some(&meal)));
    }

    #[test]
    fn missing_meal_fails() {
        assert!(!is_owner(Uuid::new_v4(), None));
    }
}
