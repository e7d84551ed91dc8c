use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::{InvitationRepository, InvitationView, NewInvitation, UserType};
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::matching::{TimeSlot, WeekKey, MIN_SESSION_MINUTES};
use crate::modules::matches::handlers::{current_week, require_user};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationPayload {
    pub sender_id: Uuid,
    pub partner_id: Uuid,
    pub slot: TimeSlot,
}

impl InvitationPayload {
    /// Checks that need no stored data.
    pub fn check(&self, current_week: WeekKey) -> AppResult<()> {
        if self.sender_id == self.partner_id {
            return Err(AppError::Validation("Cannot invite yourself".to_string()));
        }
        if self.slot.duration_minutes() < MIN_SESSION_MINUTES {
            return Err(AppError::Validation(format!(
                "Sessions must last at least {} minutes",
                MIN_SESSION_MINUTES
            )));
        }
        if self.slot.week_key() < current_week {
            return Err(AppError::Validation(format!(
                "Week {} has already passed",
                self.slot.week_key()
            )));
        }
        Ok(())
    }
}

/// Records a confirmed match. Sending the email or calendar invite is left to
/// whoever consumes the stored invitation.
pub async fn send_invitation(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<InvitationPayload>,
) -> AppResult<(StatusCode, Json<InvitationView>)> {
    payload.check(current_week(&state))?;

    let sender = require_user(&state, payload.sender_id).await?;
    let partner = require_user(&state, payload.partner_id).await?;
    if sender.user_type == partner.user_type {
        return Err(AppError::Validation(
            "Invitations must pair a mentor with a mentee".to_string(),
        ));
    }

    let (mentor_id, mentee_id) = match sender.user_type {
        UserType::Mentor => (sender.id, partner.id),
        UserType::Mentee => (partner.id, sender.id),
    };

    let invitation = InvitationRepository::create_invitation(
        &state.db,
        &NewInvitation {
            mentor_id,
            mentee_id,
            sent_by: sender.id,
            slot: payload.slot,
        },
    )
    .await?;

    info!(
        invitation_id = %invitation.id,
        mentor_id = %mentor_id,
        mentee_id = %mentee_id,
        "Invitation recorded"
    );

    Ok((StatusCode::CREATED, Json(InvitationView::try_from(invitation)?)))
}

pub async fn list_invitations(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<InvitationView>>> {
    let user = require_user(&state, user_id).await?;
    let invitations = InvitationRepository::list_for_user(&state.db, user.id)
        .await?
        .into_iter()
        .map(InvitationView::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(invitations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::DayOfWeek;

    fn payload(start: &str, end: &str, week: &str) -> InvitationPayload {
        InvitationPayload {
            sender_id: Uuid::from_u128(1),
            partner_id: Uuid::from_u128(2),
            slot: TimeSlot::new(DayOfWeek::MONDAY, start.parse().unwrap(), end.parse().unwrap(), week.parse().unwrap())
                .unwrap(),
        }
    }

    fn this_week() -> WeekKey {
        "2026-10-12".parse().unwrap()
    }

    #[test]
    fn test_minimum_length_session_is_accepted() {
        assert!(payload("09:30", "10:00", "2026-10-12").check(this_week()).is_ok());
        assert!(payload("09:30", "10:00", "2026-10-19").check(this_week()).is_ok());
    }

    #[test]
    fn test_short_session_is_rejected() {
        assert!(matches!(
            payload("09:30", "09:45", "2026-10-12").check(this_week()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_past_week_is_rejected() {
        assert!(matches!(
            payload("09:00", "10:00", "2026-10-05").check(this_week()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_self_invitation_is_rejected() {
        let mut p = payload("09:00", "10:00", "2026-10-12");
        p.partner_id = p.sender_id;
        assert!(p.check(this_week()).is_err());
    }
}
