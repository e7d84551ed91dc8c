use sqlx::{PgPool, Postgres, Transaction};
use time::Date;
use uuid::Uuid;

use crate::db::{AvailabilitySlot, DatabaseError, SlotColumns, UserType};
use crate::matching::TimeSlot;

pub struct AvailabilityRepository;

impl AvailabilityRepository {
    /// Replaces every stored slot of the user with `slots`, keeping their
    /// submitted order. Returns the number of rows written.
    pub async fn replace_for_user(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        slots: &[TimeSlot],
    ) -> Result<usize, DatabaseError> {
        sqlx::query("DELETE FROM availability_slots WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut **tx)
            .await?;

        for (position, slot) in slots.iter().enumerate() {
            let columns = SlotColumns::from(slot);
            sqlx::query(
                r#"
                INSERT INTO availability_slots
                    (id, user_id, week_key, day_of_week, start_minute, end_minute, position)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(Uuid::now_v7())
            .bind(user_id)
            .bind(columns.week_key)
            .bind(columns.day_of_week)
            .bind(columns.start_minute)
            .bind(columns.end_minute)
            .bind(position as i32)
            .execute(&mut **tx)
            .await
            .map_err(DatabaseError::from_write)?;
        }

        Ok(slots.len())
    }

    pub async fn list_for_user_from_week(
        pool: &PgPool,
        user_id: Uuid,
        from_week: Date,
    ) -> Result<Vec<AvailabilitySlot>, DatabaseError> {
        let rows = sqlx::query_as::<_, AvailabilitySlot>(
            r#"
            SELECT id, user_id, week_key, day_of_week, start_minute, end_minute, position, created_at
            FROM availability_slots
            WHERE user_id = $1 AND week_key >= $2
            ORDER BY position
            "#,
        )
        .bind(user_id)
        .bind(from_week)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Slots of every user of `user_type`, grouped by user in registration
    /// order and then by submitted position.
    pub async fn list_for_type_from_week(
        pool: &PgPool,
        user_type: UserType,
        from_week: Date,
    ) -> Result<Vec<AvailabilitySlot>, DatabaseError> {
        let rows = sqlx::query_as::<_, AvailabilitySlot>(
            r#"
            SELECT a.id, a.user_id, a.week_key, a.day_of_week, a.start_minute, a.end_minute,
                   a.position, a.created_at
            FROM availability_slots a
            JOIN users u ON u.id = a.user_id
            WHERE u.user_type = $1 AND a.week_key >= $2
            ORDER BY u.created_at, u.id, a.position
            "#,
        )
        .bind(user_type)
        .bind(from_week)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}
