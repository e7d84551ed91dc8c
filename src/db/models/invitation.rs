use serde::Serialize;
use sqlx::types::Uuid;
use time::{Date, OffsetDateTime};

use super::availability::slot_from_columns;
use crate::matching::{SlotError, TimeSlot};

/// A confirmed match between a mentor and a mentee for one window.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Invitation {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub sent_by: Uuid,
    pub week_key: Date,
    pub day_of_week: i16,
    pub start_minute: i16,
    pub end_minute: i16,
    pub created_at: OffsetDateTime,
}

impl Invitation {
    pub fn slot(&self) -> Result<TimeSlot, SlotError> {
        slot_from_columns(self.week_key, self.day_of_week, self.start_minute, self.end_minute)
    }
}

#[derive(Debug, Clone)]
pub struct NewInvitation {
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub sent_by: Uuid,
    pub slot: TimeSlot,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationView {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub sent_by: Uuid,
    #[serde(flatten)]
    pub slot: TimeSlot,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl TryFrom<Invitation> for InvitationView {
    type Error = SlotError;

    fn try_from(invitation: Invitation) -> Result<Self, Self::Error> {
        Ok(InvitationView {
            slot: invitation.slot()?,
            id: invitation.id,
            mentor_id: invitation.mentor_id,
            mentee_id: invitation.mentee_id,
            sent_by: invitation.sent_by,
            created_at: invitation.created_at,
        })
    }
}
