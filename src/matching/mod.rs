pub mod candidates;
pub mod overlap;
pub mod selection;
pub mod slot;
pub mod week;

pub use candidates::{generate_candidates, AvailabilityRecord, MatchCandidate, Participant};
pub use overlap::{overlap, OverlapWindow};
pub use selection::{dedup_candidates, distribute_by_day, select_matches, DedupPolicy};
pub use slot::{ClockTime, DayOfWeek, SlotError, TimeSlot};
pub use week::WeekKey;

use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Shortest overlap worth offering as a session.
pub const MIN_SESSION_MINUTES: u16 = 30;

/// Most matches returned per request.
pub const MAX_MATCHES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("user {0} not found")]
    UserNotFound(Uuid),
}

/// Everything a single match computation reads. Borrowed so callers can keep
/// their loaded rows.
#[derive(Debug, Clone, Copy)]
pub struct MatchInput<'a> {
    pub requester_id: Uuid,
    pub current_week: WeekKey,
    pub participants: &'a [Participant],
    pub availability: &'a [AvailabilityRecord],
    /// Ability tags keyed by mentor id.
    pub abilities: &'a HashMap<Uuid, Vec<String>>,
    pub policy: DedupPolicy,
}

/// Computes up to [`MAX_MATCHES`] day-diversified matches for the requester.
pub fn find_matches(input: &MatchInput<'_>) -> Result<Vec<MatchCandidate>, MatchError> {
    let requester = input
        .participants
        .iter()
        .find(|p| p.id == input.requester_id)
        .ok_or(MatchError::UserNotFound(input.requester_id))?;

    let raw = generate_candidates(
        requester,
        input.current_week,
        input.participants,
        input.availability,
        input.abilities,
    );
    let raw_count = raw.len();
    let matches = select_matches(raw, input.policy, MAX_MATCHES);

    debug!(
        requester = %requester.id,
        user_type = ?requester.user_type,
        raw_count,
        selected = matches.len(),
        "computed matches"
    );

    Ok(matches)
}
