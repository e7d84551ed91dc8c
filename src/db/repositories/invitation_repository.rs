use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{DatabaseError, Invitation, NewInvitation, SlotColumns};

const INVITATION_COLUMNS: &str =
    "id, mentor_id, mentee_id, sent_by, week_key, day_of_week, start_minute, end_minute, created_at";

pub struct InvitationRepository;

impl InvitationRepository {
    /// Records a confirmed match. Recording the same pair and window twice
    /// yields `DatabaseError::Duplicate`.
    pub async fn create_invitation(
        pool: &PgPool,
        invitation: &NewInvitation,
    ) -> Result<Invitation, DatabaseError> {
        let columns = SlotColumns::from(&invitation.slot);
        let query = format!(
            r#"
            INSERT INTO invitations
                (id, mentor_id, mentee_id, sent_by, week_key, day_of_week, start_minute, end_minute)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {INVITATION_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Invitation>(&query)
            .bind(Uuid::now_v7())
            .bind(invitation.mentor_id)
            .bind(invitation.mentee_id)
            .bind(invitation.sent_by)
            .bind(columns.week_key)
            .bind(columns.day_of_week)
            .bind(columns.start_minute)
            .bind(columns.end_minute)
            .fetch_one(pool)
            .await
            .map_err(DatabaseError::from_write)
    }

    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Invitation>, DatabaseError> {
        let query = format!(
            r#"
            SELECT {INVITATION_COLUMNS}
            FROM invitations
            WHERE mentor_id = $1 OR mentee_id = $1
            ORDER BY week_key, day_of_week, start_minute
            "#
        );
        let rows = sqlx::query_as::<_, Invitation>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }
}
