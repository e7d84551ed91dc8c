use sqlx::types::Uuid;
use time::{Date, OffsetDateTime};

use crate::matching::{AvailabilityRecord, ClockTime, DayOfWeek, SlotError, TimeSlot, WeekKey};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AvailabilitySlot {
    pub id: Uuid,
    pub user_id: Uuid,
    pub week_key: Date,
    pub day_of_week: i16,
    pub start_minute: i16,
    pub end_minute: i16,
    pub position: i32,
    pub created_at: OffsetDateTime,
}

impl AvailabilitySlot {
    pub fn slot(&self) -> Result<TimeSlot, SlotError> {
        slot_from_columns(self.week_key, self.day_of_week, self.start_minute, self.end_minute)
    }
}

impl TryFrom<&AvailabilitySlot> for AvailabilityRecord {
    type Error = SlotError;

    fn try_from(row: &AvailabilitySlot) -> Result<Self, Self::Error> {
        Ok(AvailabilityRecord {
            user_id: row.user_id,
            slot: row.slot()?,
        })
    }
}

/// Column values of a slot as stored in `availability_slots` and `invitations`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotColumns {
    pub week_key: Date,
    pub day_of_week: i16,
    pub start_minute: i16,
    pub end_minute: i16,
}

impl From<&TimeSlot> for SlotColumns {
    fn from(slot: &TimeSlot) -> Self {
        SlotColumns {
            week_key: slot.week_key().monday(),
            day_of_week: i16::from(slot.day_of_week().index()),
            start_minute: slot.start().minutes() as i16,
            end_minute: slot.end().minutes() as i16,
        }
    }
}

pub fn slot_from_columns(
    week_key: Date,
    day_of_week: i16,
    start_minute: i16,
    end_minute: i16,
) -> Result<TimeSlot, SlotError> {
    TimeSlot::new(
        DayOfWeek::new(day_of_week.into())?,
        ClockTime::from_minutes(start_minute.into())?,
        ClockTime::from_minutes(end_minute.into())?,
        WeekKey::from_monday(week_key)?,
    )
}
