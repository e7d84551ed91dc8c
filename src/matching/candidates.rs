use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use super::{overlap, ClockTime, DayOfWeek, OverlapWindow, TimeSlot, WeekKey};
use crate::db::UserType;

/// A registered user as the engine sees them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: Uuid,
    pub email: String,
    pub user_type: UserType,
}

/// One stored availability slot and its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityRecord {
    pub user_id: Uuid,
    pub slot: TimeSlot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    pub partner_id: Uuid,
    pub partner_email: String,
    pub day_of_week: DayOfWeek,
    pub week_key: WeekKey,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub duration: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abilities: Option<Vec<String>>,
}

impl MatchCandidate {
    fn new(partner: &Participant, window: OverlapWindow, abilities: Option<Vec<String>>) -> Self {
        Self {
            partner_id: partner.id,
            partner_email: partner.email.clone(),
            day_of_week: window.day_of_week,
            week_key: window.week_key,
            start_time: window.start,
            end_time: window.end,
            duration: window.duration_minutes(),
            abilities,
        }
    }

    pub fn window_key(&self) -> (DayOfWeek, ClockTime, ClockTime) {
        (self.day_of_week, self.start_time, self.end_time)
    }
}

/// Compares every current-or-future slot of `requester` against every
/// current-or-future slot of opposite-type participants.
///
/// Output order follows the requester's slots, then the partner slots, in the
/// order they appear in `availability`.
pub fn generate_candidates(
    requester: &Participant,
    current_week: WeekKey,
    participants: &[Participant],
    availability: &[AvailabilityRecord],
    abilities: &HashMap<Uuid, Vec<String>>,
) -> Vec<MatchCandidate> {
    let partner_type = requester.user_type.opposite();
    let partners: HashMap<Uuid, &Participant> = participants
        .iter()
        .filter(|p| p.user_type == partner_type && p.id != requester.id)
        .map(|p| (p.id, p))
        .collect();

    let is_upcoming = |record: &&AvailabilityRecord| record.slot.week_key() >= current_week;

    let own_slots: Vec<&TimeSlot> = availability
        .iter()
        .filter(|r| r.user_id == requester.id)
        .filter(is_upcoming)
        .map(|r| &r.slot)
        .collect();

    let partner_slots: Vec<(&Participant, &TimeSlot)> = availability
        .iter()
        .filter(is_upcoming)
        .filter_map(|r| partners.get(&r.user_id).map(|p| (*p, &r.slot)))
        .collect();

    let mut candidates = Vec::new();
    for own in &own_slots {
        for (partner, theirs) in &partner_slots {
            let Some(window) = overlap(own, theirs) else {
                continue;
            };
            let tags = match requester.user_type {
                UserType::Mentee => abilities
                    .get(&partner.id)
                    .filter(|tags| !tags.is_empty())
                    .cloned(),
                UserType::Mentor => None,
            };
            candidates.push(MatchCandidate::new(partner, window, tags));
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: &str = "2026-10-12";

    fn person(n: u128, user_type: UserType) -> Participant {
        Participant {
            id: Uuid::from_u128(n),
            email: format!("user{n}@example.com"),
            user_type,
        }
    }

    fn record(owner: &Participant, day: DayOfWeek, start: &str, end: &str, week: &str) -> AvailabilityRecord {
        AvailabilityRecord {
            user_id: owner.id,
            slot: TimeSlot::new(day, start.parse().unwrap(), end.parse().unwrap(), week.parse().unwrap())
                .unwrap(),
        }
    }

    #[test]
    fn test_mentee_candidates_carry_mentor_abilities() {
        let mentor = person(1, UserType::Mentor);
        let mentee = person(2, UserType::Mentee);
        let availability = vec![
            record(&mentor, DayOfWeek::MONDAY, "09:00", "10:00", W),
            record(&mentee, DayOfWeek::MONDAY, "09:30", "10:30", W),
        ];
        let abilities = HashMap::from([(mentor.id, vec!["interview-prep".to_string()])]);

        let found = generate_candidates(
            &mentee,
            W.parse().unwrap(),
            &[mentor.clone(), mentee.clone()],
            &availability,
            &abilities,
        );

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].partner_id, mentor.id);
        assert_eq!(found[0].partner_email, mentor.email);
        assert_eq!(found[0].duration, 30);
        assert_eq!(found[0].abilities, Some(vec!["interview-prep".to_string()]));
    }

    #[test]
    fn test_mentor_candidates_have_no_abilities() {
        let mentor = person(1, UserType::Mentor);
        let mentee = person(2, UserType::Mentee);
        let availability = vec![
            record(&mentor, DayOfWeek::MONDAY, "09:00", "10:00", W),
            record(&mentee, DayOfWeek::MONDAY, "09:00", "10:00", W),
        ];
        let abilities = HashMap::from([(mentor.id, vec!["leadership".to_string()])]);

        let found = generate_candidates(
            &mentor,
            W.parse().unwrap(),
            &[mentor.clone(), mentee.clone()],
            &availability,
            &abilities,
        );

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].partner_id, mentee.id);
        assert_eq!(found[0].abilities, None);
    }

    #[test]
    fn test_mentor_without_tags_leaves_abilities_empty() {
        let mentor = person(1, UserType::Mentor);
        let mentee = person(2, UserType::Mentee);
        let availability = vec![
            record(&mentor, DayOfWeek::MONDAY, "09:00", "10:00", W),
            record(&mentee, DayOfWeek::MONDAY, "09:00", "10:00", W),
        ];
        let abilities = HashMap::from([(mentor.id, Vec::new())]);

        let found = generate_candidates(&mentee, W.parse().unwrap(), &[mentor, mentee.clone()], &availability, &abilities);
        assert_eq!(found[0].abilities, None);
    }

    #[test]
    fn test_same_type_users_are_never_compared() {
        let a = person(1, UserType::Mentee);
        let b = person(2, UserType::Mentee);
        let availability = vec![
            record(&a, DayOfWeek::MONDAY, "09:00", "10:00", W),
            record(&b, DayOfWeek::MONDAY, "09:00", "10:00", W),
        ];

        let found = generate_candidates(&a, W.parse().unwrap(), &[a.clone(), b], &availability, &HashMap::new());
        assert!(found.is_empty());
    }

    #[test]
    fn test_past_weeks_are_excluded_on_both_sides() {
        let mentor = person(1, UserType::Mentor);
        let mentee = person(2, UserType::Mentee);
        let past = "2026-10-05";
        let availability = vec![
            record(&mentor, DayOfWeek::MONDAY, "09:00", "10:00", past),
            record(&mentee, DayOfWeek::MONDAY, "09:00", "10:00", past),
            record(&mentor, DayOfWeek::TUESDAY, "09:00", "10:00", "2026-10-19"),
            record(&mentee, DayOfWeek::TUESDAY, "09:00", "10:00", "2026-10-19"),
        ];

        let found = generate_candidates(
            &mentee,
            W.parse().unwrap(),
            &[mentor, mentee.clone()],
            &availability,
            &HashMap::new(),
        );

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].week_key.to_string(), "2026-10-19");
    }

    #[test]
    fn test_order_follows_own_slots_then_partner_slots() {
        let mentee = person(1, UserType::Mentee);
        let m1 = person(2, UserType::Mentor);
        let m2 = person(3, UserType::Mentor);
        let availability = vec![
            record(&m1, DayOfWeek::WEDNESDAY, "10:00", "12:00", W),
            record(&m2, DayOfWeek::MONDAY, "10:00", "12:00", W),
            record(&mentee, DayOfWeek::MONDAY, "10:00", "11:00", W),
            record(&mentee, DayOfWeek::WEDNESDAY, "11:00", "12:00", W),
        ];

        let found = generate_candidates(
            &mentee,
            W.parse().unwrap(),
            &[mentee.clone(), m1.clone(), m2.clone()],
            &availability,
            &HashMap::new(),
        );

        let partners: Vec<Uuid> = found.iter().map(|c| c.partner_id).collect();
        assert_eq!(partners, vec![m2.id, m1.id]);
    }

    #[test]
    fn test_empty_inputs_produce_no_candidates() {
        let mentee = person(1, UserType::Mentee);
        let found = generate_candidates(&mentee, W.parse().unwrap(), &[mentee.clone()], &[], &HashMap::new());
        assert!(found.is_empty());
    }
}
