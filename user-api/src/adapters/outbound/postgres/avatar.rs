use async_trait::async_trait;

use super::PostgresUserRepository;
use crate::domain::{
    models::{AvatarToken, UserAvatarRecord, UserId},
    ports::outbound::AvatarRecordStore,
    AvatarError,
};

#[derive(sqlx::FromRow)]
struct AvatarRow {
    id: i32,
    avatar: Option<String>,
}

#[async_trait]
impl AvatarRecordStore for PostgresUserRepository {
    async fn find_user_avatar(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserAvatarRecord>, AvatarError> {
        let row = sqlx::query_as::<_, AvatarRow>(
            r#"
            SELECT id, avatar
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(AvatarError::storage)?;

        Ok(row.map(|row| {
            UserAvatarRecord::new(UserId::new(row.id), AvatarToken::from_stored(row.avatar))
        }))
    }

    async fn update_avatar_token(
        &self,
        user_id: &UserId,
        token: Option<&AvatarToken>,
    ) -> Result<(), AvatarError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET avatar = $2,
                modified_at = now()
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_i32())
        .bind(token.map(AvatarToken::as_str))
        .execute(&self.pool)
        .await
        .map_err(AvatarError::storage)?;

        if result.rows_affected() == 0 {
            return Err(AvatarError::USER_NOT_EXISTING);
        }

        Ok(())
    }
}
