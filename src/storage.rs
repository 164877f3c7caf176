use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    meals::{
        repo as meal_repo,
        repo_types::{Meal, MealChanges, NewMeal},
    },
    users::repo_types::{NewUser, User},
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session token is already bound to a user")]
    SessionTaken,
    #[error("user {0} does not exist")]
    UnknownUser(Uuid),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Constraint names from `migrations/`.
const USERS_SESSION_ID_KEY: &str = "users_session_id_key";
const MEALS_USER_ID_FKEY: &str = "meals_user_id_fkey";

/// Maps a violated constraint to its domain error. `owner` is the user a meal insert referenced.
fn constraint_violation(constraint: Option<&str>, owner: Option<Uuid>) -> Option<StoreError> {
    match (constraint, owner) {
        (Some(USERS_SESSION_ID_KEY), _) => Some(StoreError::SessionTaken),
        (Some(MEALS_USER_ID_FKEY), Some(user_id)) => Some(StoreError::UnknownUser(user_id)),
        _ => None,
    }
}

impl StoreError {
    fn from_sqlx(e: sqlx::Error, owner: Option<Uuid>) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if let Some(mapped) = constraint_violation(db.constraint(), owner) {
                return mapped;
            }
        }
        StoreError::Backend(e.into())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::from_sqlx(e, None)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Row access over the `users` and `meals` collections.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_user(&self, new: NewUser) -> StoreResult<User>;
    async fn find_user_by_session(&self, session_id: &str) -> StoreResult<Option<User>>;
    async fn insert_meal(&self, new: NewMeal) -> StoreResult<Meal>;
    /// Meals owned by `user_id`, oldest first.
    async fn list_meals_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Meal>>;
    async fn find_meal(&self, meal_id: Uuid) -> StoreResult<Option<Meal>>;
    /// Applies the set fields and refreshes `updated_at`. `None` if the meal is gone.
    async fn update_meal(&self, meal_id: Uuid, changes: MealChanges) -> StoreResult<Option<Meal>>;
}

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, new: NewUser) -> StoreResult<User> {
        Ok(User::create(&self.db, &new).await?)
    }

    async fn find_user_by_session(&self, session_id: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_session(&self.db, session_id).await?)
    }

    async fn insert_meal(&self, new: NewMeal) -> StoreResult<Meal> {
        meal_repo::insert(&self.db, &new)
            .await
            .map_err(|e| StoreError::from_sqlx(e, Some(new.user_id)))
    }

    async fn list_meals_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Meal>> {
        Ok(meal_repo::list_by_user(&self.db, user_id).await?)
    }

    async fn find_meal(&self, meal_id: Uuid) -> StoreResult<Option<Meal>> {
        Ok(meal_repo::find_by_id(&self.db, meal_id).await?)
    }

    async fn update_meal(&self, meal_id: Uuid, changes: MealChanges) -> StoreResult<Option<Meal>> {
        Ok(meal_repo::update(&self.db, meal_id, &changes).await?)
    }
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    meals: Vec<Meal>,
}

/// Process-local store. Vec order is insertion order.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, new: NewUser) -> StoreResult<User> {
        let mut t = self.tables.write().await;
        if t.users.iter().any(|u| u.session_id == new.session_id) {
            return Err(StoreError::SessionTaken);
        }
        let user = User {
            id: Uuid::new_v4(),
            session_id: new.session_id,
            email: new.email,
            name: new.name,
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_session(&self, session_id: &str) -> StoreResult<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users.iter().find(|u| u.session_id == session_id).cloned())
    }

    async fn insert_meal(&self, new: NewMeal) -> StoreResult<Meal> {
        let mut t = self.tables.write().await;
        if !t.users.iter().any(|u| u.id == new.user_id) {
            return Err(StoreError::UnknownUser(new.user_id));
        }
        let meal = Meal {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            name: new.name,
            description: new.description,
            date: new.date,
            is_on_diet: new.is_on_diet,
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        };
        t.meals.push(meal.clone());
        Ok(meal)
    }

    async fn list_meals_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Meal>> {
        let t = self.tables.read().await;
        Ok(t.meals.iter().filter(|m| m.user_id == user_id).cloned().collect())
    }

    async fn find_meal(&self, meal_id: Uuid) -> StoreResult<Option<Meal>> {
        let t = self.tables.read().await;
        Ok(t.meals.iter().find(|m| m.id == meal_id).cloned())
    }

    async fn update_meal(&self, meal_id: Uuid, changes: MealChanges) -> StoreResult<Option<Meal>> {
        let mut t = self.tables.write().await;
        let Some(meal) = t.meals.iter_mut().find(|m| m.id == meal_id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            meal.name = name;
        }
        if let Some(description) = changes.description {
            meal.description = description;
        }
        if let Some(is_on_diet) = changes.is_on_diet {
            meal.is_on_diet = is_on_diet;
        }
        meal.updated_at = Some(OffsetDateTime::now_utc());
        Ok(Some(meal.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(session: &str) -> NewUser {
        NewUser {
            session_id: session.into(),
            email: "ana@example.com".into(),
            name: "Ana".into(),
        }
    }

    fn new_meal(user_id: Uuid, name: &str, is_on_diet: bool) -> NewMeal {
        NewMeal {
            user_id,
            name: name.into(),
            description: "plate".into(),
            is_on_diet,
            date: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn constraint_names_map_to_domain_errors() {
        let owner = Uuid::new_v4();
        assert!(matches!(
            constraint_violation(Some("users_session_id_key"), None),
            Some(StoreError::SessionTaken)
        ));
        assert!(matches!(
            constraint_violation(Some("meals_user_id_fkey"), Some(owner)),
            Some(StoreError::UnknownUser(id)) if id == owner
        ));
        assert!(constraint_violation(Some("users_pkey"), None).is_none());
        assert!(constraint_violation(Some("meals_user_id_fkey"), None).is_none());
        assert!(constraint_violation(None, Some(owner)).is_none());
    }

    #[tokio::test]
    async fn session_token_binds_one_user() {
        let store = MemoryStore::new();
        store.insert_user(new_user("tok")).await.unwrap();
        let err = store.insert_user(new_user("tok")).await.unwrap_err();
        assert!(matches!(err, StoreError::SessionTaken));
    }

    #[tokio::test]
    async fn meal_requires_existing_owner() {
        let store = MemoryStore::new();
        let ghost = Uuid::new_v4();
        let err = store.insert_meal(new_meal(ghost, "x", true)).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownUser(id) if id == ghost));
    }

    #[tokio::test]
    async fn list_keeps_insertion_order_and_filters_owner() {
        let store = MemoryStore::new();
        let a = store.insert_user(new_user("a")).await.unwrap();
        let b = store.insert_user(new_user("b")).await.unwrap();
        store.insert_meal(new_meal(a.id, "first", true)).await.unwrap();
        store.insert_meal(new_meal(b.id, "other", true)).await.unwrap();
        store.insert_meal(new_meal(a.id, "second", false)).await.unwrap();

        let names: Vec<_> = store
            .list_meals_by_user(a.id)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[tokio::test]
    async fn update_is_partial_and_stamps_updated_at() {
        let store = MemoryStore::new();
        let user = store.insert_user(new_user("s")).await.unwrap();
        let meal = store.insert_meal(new_meal(user.id, "soup", true)).await.unwrap();
        assert!(meal.updated_at.is_none());

        let changes = MealChanges {
            is_on_diet: Some(false),
            ..Default::default()
        };
        let updated = store.update_meal(meal.id, changes).await.unwrap().unwrap();
        assert_eq!(updated.name, "soup");
        assert_eq!(updated.description, "plate");
        assert!(!updated.is_on_diet);
        assert!(updated.updated_at.is_some());

        let missing = store
            .update_meal(Uuid::new_v4(), MealChanges::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
