use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::{DatabaseError, NewUser, User, UserType};

const USER_COLUMNS: &str = "id, email, display_name, user_type, created_at, updated_at";

pub struct UserRepository;

impl UserRepository {
    /// Creates the user or, when the email is already registered, updates the
    /// name and type in place. Emails are stored lowercased.
    pub async fn upsert_user(
        tx: &mut Transaction<'_, Postgres>,
        new_user: &NewUser,
    ) -> Result<User, DatabaseError> {
        let query = format!(
            r#"
            INSERT INTO users (id, email, display_name, user_type)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE
            SET display_name = EXCLUDED.display_name,
                user_type = EXCLUDED.user_type,
                updated_at = NOW()
            RETURNING {USER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, User>(&query)
            .bind(Uuid::now_v7())
            .bind(new_user.email.trim().to_lowercase())
            .bind(new_user.display_name.trim())
            .bind(new_user.user_type)
            .fetch_one(&mut **tx)
            .await
            .map_err(DatabaseError::from_write)
    }

    pub async fn get_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, DatabaseError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    pub async fn list_users_by_type(pool: &PgPool, user_type: UserType) -> Result<Vec<User>, DatabaseError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE user_type = $1 ORDER BY created_at, id");
        let users = sqlx::query_as::<_, User>(&query)
            .bind(user_type)
            .fetch_all(pool)
            .await?;
        Ok(users)
    }
}
