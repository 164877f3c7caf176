use sqlx::PgPool;
use uuid::Uuid;

use crate::users::repo_types::{NewUser, User};

impl User {
    /// Find the user bound to a session token.
    pub async fn find_by_session(db: &PgPool, session_id: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, session_id, email, name, created_at
            FROM users
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(db)
        .await
    }

    /// Insert a new user bound to `new.session_id`.
    pub async fn create(db: &PgPool, new: &NewUser) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, session_id, email, name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, session_id, email, name, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.session_id)
        .bind(&new.email)
        .bind(&new.name)
        .fetch_one(db)
        .await
    }
}
