use chrono::{DateTime, Utc};
use rand::Rng;

use super::error::QueueError;
use super::types::{QueueEntry, QueueStats, QueueStatus};

/// Base wait in minutes for a small party.
pub const BASE_WAIT_MINUTES: u32 = 15;

/// Upper bound (inclusive) of the random jitter added to every estimate.
pub const MAX_WAIT_JITTER_MINUTES: u32 = 10;

/// Entries expire from the store this many days after check-in.
pub const ENTRY_TTL_DAYS: i64 = 30;

/// Multiplier applied to the base wait for larger parties.
pub fn size_factor(party_size: u32) -> f64 {
    if party_size > 4 {
        1.5
    } else if party_size > 2 {
        1.2
    } else {
        1.0
    }
}

/// Estimates the wait in minutes for a party of the given size.
///
/// `floor(15 * size_factor) + random(0..=10)`. The jitter makes the value
/// non-deterministic; callers may only rely on the rough monotonic
/// relationship to party size, not on exact values.
pub fn estimate_wait_minutes(party_size: u32, rng: &mut impl Rng) -> u32 {
    let base = (f64::from(BASE_WAIT_MINUTES) * size_factor(party_size)).floor() as u32;
    base + rng.random_range(0..=MAX_WAIT_JITTER_MINUTES)
}

/// Builds the display queue number from the check-in time plus a random
/// two-digit suffix, e.g. `"142305-83"`.
pub fn queue_number(check_in_time: DateTime<Utc>, rng: &mut impl Rng) -> String {
    format!(
        "{}-{:02}",
        check_in_time.format("%H%M%S"),
        rng.random_range(0..100)
    )
}

/// Sorts entries by check-in time ascending (FIFO order).
///
/// The scan path returns items in no particular order, so list responses
/// always sort after retrieval.
pub fn sort_by_check_in(entries: &mut [QueueEntry]) {
    entries.sort_by_key(|entry| entry.check_in_time);
}

/// Computes aggregate statistics over a set of entries.
pub fn queue_stats(entries: &[QueueEntry]) -> QueueStats {
    let waiting: Vec<&QueueEntry> = entries
        .iter()
        .filter(|e| e.status == QueueStatus::Waiting)
        .collect();
    let total_seated = entries
        .iter()
        .filter(|e| e.status == QueueStatus::Seated)
        .count();

    let average_wait_time = if waiting.is_empty() {
        0.0
    } else {
        let sum: u64 = waiting.iter().map(|e| u64::from(e.estimated_wait_time)).sum();
        sum as f64 / waiting.len() as f64
    };

    QueueStats {
        total_waiting: waiting.len(),
        total_seated,
        average_wait_time,
    }
}

/// Validates a status transition.
///
/// Allowed: `waiting -> seated`, `waiting -> cancelled`, `seated -> waiting`
/// (staff correction), and any status to itself. `cancelled` is terminal.
pub fn validate_transition(from: QueueStatus, to: QueueStatus) -> Result<(), QueueError> {
    let allowed = from == to
        || matches!(
            (from, to),
            (QueueStatus::Waiting, QueueStatus::Seated)
                | (QueueStatus::Waiting, QueueStatus::Cancelled)
                | (QueueStatus::Seated, QueueStatus::Waiting)
        );

    if allowed {
        Ok(())
    } else {
        Err(QueueError::InvalidTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Uuid;

    fn entry(status: QueueStatus, wait: u32, check_in_secs: i64) -> QueueEntry {
        let check_in = Utc.timestamp_opt(check_in_secs, 0).unwrap();
        QueueEntry {
            id: Uuid::new_v4(),
            name: "Guest".to_string(),
            party_size: 2,
            phone: String::new(),
            special_request: String::new(),
            status,
            check_in_time: check_in,
            estimated_wait_time: wait,
            queue_number: "000000-00".to_string(),
            seated_time: None,
            created_at: check_in,
            updated_at: check_in,
            ttl: check_in_secs + ENTRY_TTL_DAYS * 24 * 60 * 60,
        }
    }

    #[test]
    fn test_size_factor_tiers() {
        assert_eq!(size_factor(1), 1.0);
        assert_eq!(size_factor(2), 1.0);
        assert_eq!(size_factor(3), 1.2);
        assert_eq!(size_factor(4), 1.2);
        assert_eq!(size_factor(5), 1.5);
        assert_eq!(size_factor(12), 1.5);
    }

    #[test]
    fn test_estimate_ranges_per_tier() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let small = estimate_wait_minutes(2, &mut rng);
            assert!((15..=25).contains(&small), "small party estimate {small}");

            let medium = estimate_wait_minutes(3, &mut rng);
            assert!((18..=28).contains(&medium), "medium party estimate {medium}");

            let large = estimate_wait_minutes(6, &mut rng);
            assert!((22..=32).contains(&large), "large party estimate {large}");
        }
    }

    #[test]
    fn test_queue_number_format() {
        let mut rng = StdRng::seed_from_u64(1);
        let check_in = Utc.with_ymd_and_hms(2025, 3, 14, 14, 23, 5).unwrap();
        let number = queue_number(check_in, &mut rng);

        let (time_part, suffix) = number.split_once('-').unwrap();
        assert_eq!(time_part, "142305");
        assert_eq!(suffix.len(), 2);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_sort_by_check_in_ascending() {
        let mut entries = vec![
            entry(QueueStatus::Waiting, 20, 300),
            entry(QueueStatus::Waiting, 20, 100),
            entry(QueueStatus::Seated, 20, 200),
        ];
        sort_by_check_in(&mut entries);

        let times: Vec<i64> = entries.iter().map(|e| e.check_in_time.timestamp()).collect();
        assert_eq!(times, vec![100, 200, 300]);
    }

    #[test]
    fn test_stats_counts_and_average() {
        let entries = vec![
            entry(QueueStatus::Waiting, 20, 1),
            entry(QueueStatus::Waiting, 30, 2),
            entry(QueueStatus::Seated, 99, 3),
            entry(QueueStatus::Cancelled, 99, 4),
        ];

        let stats = queue_stats(&entries);
        assert_eq!(stats.total_waiting, 2);
        assert_eq!(stats.total_seated, 1);
        assert_eq!(stats.average_wait_time, 25.0);
        // cancelled entries count toward neither bucket
        assert!(stats.total_waiting + stats.total_seated <= entries.len());
    }

    #[test]
    fn test_stats_average_zero_without_waiting() {
        let entries = vec![entry(QueueStatus::Seated, 40, 1)];
        let stats = queue_stats(&entries);
        assert_eq!(stats.total_waiting, 0);
        assert_eq!(stats.average_wait_time, 0.0);
    }

    #[test]
    fn test_transitions() {
        use QueueStatus::*;

        assert!(validate_transition(Waiting, Seated).is_ok());
        assert!(validate_transition(Waiting, Cancelled).is_ok());
        assert!(validate_transition(Seated, Waiting).is_ok());
        // self-transitions are idempotent no-ops
        assert!(validate_transition(Seated, Seated).is_ok());
        assert!(validate_transition(Cancelled, Cancelled).is_ok());
        // cancelled is terminal
        assert!(validate_transition(Cancelled, Waiting).is_err());
        assert!(validate_transition(Cancelled, Seated).is_err());
        assert!(validate_transition(Seated, Cancelled).is_err());
    }
}
