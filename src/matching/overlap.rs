use super::{ClockTime, DayOfWeek, TimeSlot, WeekKey, MIN_SESSION_MINUTES};

/// Intersection of two slots on the same day of the same week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlapWindow {
    pub day_of_week: DayOfWeek,
    pub week_key: WeekKey,
    pub start: ClockTime,
    pub end: ClockTime,
}

impl OverlapWindow {
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }
}

/// Returns the shared window of `a` and `b` when they fall on the same day
/// and week and share at least [`MIN_SESSION_MINUTES`].
pub fn overlap(a: &TimeSlot, b: &TimeSlot) -> Option<OverlapWindow> {
    if a.day_of_week() != b.day_of_week() || a.week_key() != b.week_key() {
        return None;
    }

    let window = OverlapWindow {
        day_of_week: a.day_of_week(),
        week_key: a.week_key(),
        start: a.start().max(b.start()),
        end: a.end().min(b.end()),
    };

    (window.duration_minutes() >= MIN_SESSION_MINUTES).then_some(window)
}
