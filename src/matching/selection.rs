use std::collections::HashSet;
use std::str::FromStr;
use uuid::Uuid;

use super::{ClockTime, DayOfWeek, MatchCandidate, WeekKey};

/// How identical windows offered by different partners are collapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DedupPolicy {
    /// Keep the first candidate per `(day, start, end)` and drop the rest.
    /// Alternate partners sharing a window are lost, as are the same window
    /// in a later week.
    #[default]
    FirstSeen,
    /// Keep one candidate per partner, week and window.
    PreservePartners,
}

impl FromStr for DedupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first_seen" => Ok(DedupPolicy::FirstSeen),
            "preserve_partners" => Ok(DedupPolicy::PreservePartners),
            _ => Err(format!("Unknown dedup policy: {}", s)),
        }
    }
}

#[derive(Hash, PartialEq, Eq)]
enum DedupKey {
    Window(DayOfWeek, ClockTime, ClockTime),
    Partner(Uuid, WeekKey, DayOfWeek, ClockTime, ClockTime),
}

impl DedupPolicy {
    fn key(self, candidate: &MatchCandidate) -> DedupKey {
        let (day, start, end) = candidate.window_key();
        match self {
            DedupPolicy::FirstSeen => DedupKey::Window(day, start, end),
            DedupPolicy::PreservePartners => {
                DedupKey::Partner(candidate.partner_id, candidate.week_key, day, start, end)
            }
        }
    }
}

/// Drops later candidates whose key under `policy` was already seen.
pub fn dedup_candidates(candidates: Vec<MatchCandidate>, policy: DedupPolicy) -> Vec<MatchCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(policy.key(c)))
        .collect()
}

/// Round-robins over per-day groups, taking one candidate from each day per
/// pass, until `limit` candidates are picked or every group is empty.
/// Groups are visited in the order their day first appears.
pub fn distribute_by_day(candidates: Vec<MatchCandidate>, limit: usize) -> Vec<MatchCandidate> {
    let mut by_day: Vec<(DayOfWeek, Vec<MatchCandidate>)> = Vec::new();
    for candidate in candidates {
        match by_day.iter_mut().find(|(day, _)| *day == candidate.day_of_week) {
            Some((_, group)) => group.push(candidate),
            None => by_day.push((candidate.day_of_week, vec![candidate])),
        }
    }
    let mut groups: Vec<_> = by_day.into_iter().map(|(_, group)| group.into_iter()).collect();

    let mut picked = Vec::with_capacity(limit);
    while picked.len() < limit {
        let mut took_any = false;
        for group in groups.iter_mut() {
            if picked.len() >= limit {
                break;
            }
            if let Some(candidate) = group.next() {
                picked.push(candidate);
                took_any = true;
            }
        }
        if !took_any {
            break;
        }
    }

    picked
}

/// Dedup followed by the per-day round robin.
pub fn select_matches(
    candidates: Vec<MatchCandidate>,
    policy: DedupPolicy,
    limit: usize,
) -> Vec<MatchCandidate> {
    distribute_by_day(dedup_candidates(candidates, policy), limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(partner: u128, day: u8, start: &str, end: &str) -> MatchCandidate {
        candidate_in(partner, day, start, end, "2026-10-12")
    }

    fn candidate_in(partner: u128, day: u8, start: &str, end: &str, week: &str) -> MatchCandidate {
        let start: ClockTime = start.parse().unwrap();
        let end: ClockTime = end.parse().unwrap();
        MatchCandidate {
            partner_id: Uuid::from_u128(partner),
            partner_email: format!("p{partner}@example.com"),
            day_of_week: DayOfWeek::new(day.into()).unwrap(),
            week_key: week.parse().unwrap(),
            start_time: start,
            end_time: end,
            duration: end.minutes() - start.minutes(),
            abilities: None,
        }
    }

    fn days(picked: &[MatchCandidate]) -> Vec<u8> {
        picked.iter().map(|c| c.day_of_week.index()).collect()
    }

    #[test]
    fn test_first_seen_collapses_identical_windows() {
        let raw = vec![
            candidate(1, 1, "09:00", "10:00"),
            candidate(2, 1, "09:00", "10:00"),
            candidate(3, 1, "09:00", "10:30"),
        ];

        let kept = dedup_candidates(raw, DedupPolicy::FirstSeen);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].partner_id, Uuid::from_u128(1));
        assert_eq!(kept[1].partner_id, Uuid::from_u128(3));
    }

    #[test]
    fn test_first_seen_ignores_week_when_collapsing() {
        let raw = vec![
            candidate_in(1, 1, "09:00", "10:00", "2026-10-12"),
            candidate_in(1, 1, "09:00", "10:00", "2026-10-19"),
        ];
        assert_eq!(dedup_candidates(raw, DedupPolicy::FirstSeen).len(), 1);
    }

    #[test]
    fn test_preserve_partners_keeps_alternates() {
        let raw = vec![
            candidate(1, 1, "09:00", "10:00"),
            candidate(2, 1, "09:00", "10:00"),
            candidate(2, 1, "09:00", "10:00"),
            candidate_in(2, 1, "09:00", "10:00", "2026-10-19"),
        ];

        let kept = dedup_candidates(raw, DedupPolicy::PreservePartners);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_distribution_caps_at_limit_one_per_day() {
        let raw: Vec<_> = (0..7).map(|d| candidate(1, d, "09:00", "10:00")).collect();
        let picked = distribute_by_day(raw, 5);
        assert_eq!(days(&picked), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_distribution_cycles_after_all_days_used() {
        let raw = vec![
            candidate(1, 1, "09:00", "10:00"),
            candidate(1, 1, "11:00", "12:00"),
            candidate(1, 1, "13:00", "14:00"),
            candidate(1, 3, "09:00", "10:00"),
            candidate(1, 3, "11:00", "12:00"),
            candidate(1, 5, "09:00", "10:00"),
        ];

        let picked = distribute_by_day(raw, 5);
        assert_eq!(days(&picked), vec![1, 3, 5, 1, 3]);
        assert_eq!(picked[3].start_time.to_string(), "11:00");
    }

    #[test]
    fn test_distribution_uses_first_appearance_order() {
        let raw = vec![
            candidate(1, 4, "09:00", "10:00"),
            candidate(1, 2, "09:00", "10:00"),
            candidate(1, 4, "11:00", "12:00"),
        ];
        assert_eq!(days(&distribute_by_day(raw, 5)), vec![4, 2, 4]);
    }

    #[test]
    fn test_distribution_returns_everything_when_short() {
        let raw = vec![candidate(1, 1, "09:00", "10:00"), candidate(1, 1, "11:00", "12:00")];
        assert_eq!(distribute_by_day(raw, 5).len(), 2);
        assert!(distribute_by_day(Vec::new(), 5).is_empty());
    }

    #[test]
    fn test_select_dedups_before_distributing() {
        let raw = vec![
            candidate(1, 1, "09:00", "10:00"),
            candidate(2, 1, "09:00", "10:00"),
            candidate(1, 2, "09:00", "10:00"),
        ];
        let picked = select_matches(raw, DedupPolicy::FirstSeen, 5);
        assert_eq!(picked.len(), 2);
        assert_eq!(days(&picked), vec![1, 2]);
    }

    #[test]
    fn test_policy_parses_from_config_value() {
        assert_eq!("first_seen".parse(), Ok(DedupPolicy::FirstSeen));
        assert_eq!("PRESERVE_PARTNERS".parse(), Ok(DedupPolicy::PreservePartners));
        assert!("random".parse::<DedupPolicy>().is_err());
    }
}
