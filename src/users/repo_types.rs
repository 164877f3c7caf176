use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database. `session_id` is the opaque cookie token.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub session_id: String,
    pub email: String,
    pub name: String,
    pub created_at: OffsetDateTime,
}

/// Values needed to insert a user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub session_id: String,
    pub email: String,
    pub name: String,
}
