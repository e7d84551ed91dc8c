use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::{format_description::FormatItem, macros::format_description, Date, Duration, OffsetDateTime, UtcOffset, Weekday};

use super::SlotError;

const WEEK_KEY_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// The Monday that anchors a calendar week, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekKey(Date);

impl WeekKey {
    /// Anchors `date` to the Monday on or before it.
    pub fn containing(date: Date) -> Self {
        let back = i64::from(date.weekday().number_days_from_monday());
        WeekKey(date - Duration::days(back))
    }

    /// Week key for "today" as seen at `offset`.
    pub fn current(offset: UtcOffset) -> Self {
        Self::containing(OffsetDateTime::now_utc().to_offset(offset).date())
    }

    pub fn from_monday(date: Date) -> Result<Self, SlotError> {
        if date.weekday() != Weekday::Monday {
            return Err(SlotError::WeekKeyNotMonday(date.to_string()));
        }
        Ok(WeekKey(date))
    }

    pub fn monday(self) -> Date {
        self.0
    }

    pub fn next(self) -> Self {
        WeekKey(self.0 + Duration::weeks(1))
    }
}

impl FromStr for WeekKey {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = Date::parse(s, WEEK_KEY_FORMAT)
            .map_err(|_| SlotError::InvalidWeekKey(s.to_string()))?;
        WeekKey::from_monday(date)
    }
}

impl TryFrom<String> for WeekKey {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeekKey> for String {
    fn from(key: WeekKey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.0.format(WEEK_KEY_FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}
