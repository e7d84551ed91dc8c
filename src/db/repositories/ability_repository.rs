use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::{DatabaseError, UserAbility};

pub struct AbilityRepository;

impl AbilityRepository {
    pub async fn replace_for_user(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        abilities: &[String],
    ) -> Result<usize, DatabaseError> {
        sqlx::query("DELETE FROM user_abilities WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut **tx)
            .await?;

        if abilities.is_empty() {
            return Ok(0);
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO user_abilities (user_id, ability)
            SELECT $1, tag FROM UNNEST($2::text[]) AS tag
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(abilities)
        .execute(&mut **tx)
        .await
        .map_err(DatabaseError::from_write)?;

        Ok(inserted.rows_affected() as usize)
    }

    /// Ability tags keyed by user id. Users without tags are absent.
    pub async fn list_for_users(
        pool: &PgPool,
        user_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<String>>, DatabaseError> {
        let rows = sqlx::query_as::<_, UserAbility>(
            "SELECT user_id, ability FROM user_abilities WHERE user_id = ANY($1) ORDER BY user_id, ability",
        )
        .bind(user_ids)
        .fetch_all(pool)
        .await?;

        let mut by_user: HashMap<Uuid, Vec<String>> = HashMap::new();
        for row in rows {
            by_user.entry(row.user_id).or_default().push(row.ability);
        }
        Ok(by_user)
    }
}
