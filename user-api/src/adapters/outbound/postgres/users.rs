use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use crate::domain::{
    models::{AvatarToken, NewUser, User, UserId},
    ports::outbound::UserRepository,
    UserError,
};

/// User records in the `users` table. Also serves as the avatar record
/// store, see the `avatar` module.
pub struct PostgresUserRepository {
    pub(super) pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    email: String,
    first_name: String,
    last_name: String,
    avatar: Option<String>,
    created_at: OffsetDateTime,
    modified_at: OffsetDateTime,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            avatar: AvatarToken::from_stored(row.avatar),
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

/// Maps insert failures onto the user error taxonomy. A unique violation can
/// only come from the email index.
fn map_insert_error(err: sqlx::Error) -> UserError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => UserError::EmailTaken,
        _ => {
            tracing::error!("Database error: {:?}", err);
            UserError::Storage(err.to_string())
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, first_name, last_name)
            VALUES ($1, $2, $3)
            RETURNING id, email, first_name, last_name, avatar, created_at, modified_at
            "#,
        )
        .bind(user.email.as_ref())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(row.into())
    }
}
