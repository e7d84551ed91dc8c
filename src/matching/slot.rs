use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::WeekKey;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("invalid clock time '{0}', expected HH:MM")]
    InvalidClockTime(String),

    #[error("invalid day of week {0}, expected 0 (Sunday) to 6 (Saturday)")]
    InvalidDayOfWeek(i64),

    #[error("invalid week key '{0}'")]
    InvalidWeekKey(String),

    #[error("week key '{0}' is not a Monday")]
    WeekKeyNotMonday(String),

    #[error("slot start {start} must be before end {end}")]
    EmptyRange { start: ClockTime, end: ClockTime },
}

/// Day of the week with Sunday = 0 through Saturday = 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub const SUNDAY: DayOfWeek = DayOfWeek(0);
    pub const MONDAY: DayOfWeek = DayOfWeek(1);
    pub const TUESDAY: DayOfWeek = DayOfWeek(2);
    pub const WEDNESDAY: DayOfWeek = DayOfWeek(3);
    pub const THURSDAY: DayOfWeek = DayOfWeek(4);
    pub const FRIDAY: DayOfWeek = DayOfWeek(5);
    pub const SATURDAY: DayOfWeek = DayOfWeek(6);

    pub fn new(day: i64) -> Result<Self, SlotError> {
        match u8::try_from(day) {
            Ok(d) if d <= 6 => Ok(DayOfWeek(d)),
            _ => Err(SlotError::InvalidDayOfWeek(day)),
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = SlotError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DayOfWeek::new(value.into())
    }
}

impl From<DayOfWeek> for u8 {
    fn from(day: DayOfWeek) -> Self {
        day.0
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.0 {
            0 => "Sun",
            1 => "Mon",
            2 => "Tue",
            3 => "Wed",
            4 => "Thu",
            5 => "Fri",
            _ => "Sat",
        };
        f.write_str(name)
    }
}

/// Wall-clock time as minutes since midnight. `24:00` is allowed so a slot
/// can run to the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    pub fn from_minutes(minutes: i64) -> Result<Self, SlotError> {
        match u16::try_from(minutes) {
            Ok(m) if m <= MINUTES_PER_DAY => Ok(ClockTime(m)),
            _ => Err(SlotError::InvalidClockTime(minutes.to_string())),
        }
    }

    pub fn from_hm(hour: u8, minute: u8) -> Result<Self, SlotError> {
        if minute > 59 || hour > 24 || (hour == 24 && minute != 0) {
            return Err(SlotError::InvalidClockTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(ClockTime(u16::from(hour) * 60 + u16::from(minute)))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl FromStr for ClockTime {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SlotError::InvalidClockTime(s.to_string());
        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        if hour.len() != 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        ClockTime::from_hm(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// One availability window on a given weekday of a given week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSlot", into = "RawTimeSlot")]
pub struct TimeSlot {
    day_of_week: DayOfWeek,
    start: ClockTime,
    end: ClockTime,
    week_key: WeekKey,
}

impl TimeSlot {
    pub fn new(
        day_of_week: DayOfWeek,
        start: ClockTime,
        end: ClockTime,
        week_key: WeekKey,
    ) -> Result<Self, SlotError> {
        if start >= end {
            return Err(SlotError::EmptyRange { start, end });
        }
        Ok(Self {
            day_of_week,
            start,
            end,
            week_key,
        })
    }

    pub fn day_of_week(&self) -> DayOfWeek {
        self.day_of_week
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    pub fn week_key(&self) -> WeekKey {
        self.week_key
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }
}

/// Wire shape of a slot, matching what the calendar UI submits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTimeSlot {
    day_of_week: DayOfWeek,
    start_time: ClockTime,
    end_time: ClockTime,
    week_key: WeekKey,
}

impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = SlotError;

    fn try_from(raw: RawTimeSlot) -> Result<Self, Self::Error> {
        TimeSlot::new(raw.day_of_week, raw.start_time, raw.end_time, raw.week_key)
    }
}

impl From<TimeSlot> for RawTimeSlot {
    fn from(slot: TimeSlot) -> Self {
        RawTimeSlot {
            day_of_week: slot.day_of_week,
            start_time: slot.start,
            end_time: slot.end,
            week_key: slot.week_key,
        }
    }
}
