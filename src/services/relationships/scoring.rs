//! Strength Scoring
//!
//! Pure transition function for the relationship strength score. It
//! runs only when a relationship's `last_interaction_date` is written
//! (see the store's write paths); there is no scheduled decay job, so
//! a score can go stale between interactions. That staleness is
//! intentional.

use chrono::{DateTime, Utc};

/// Lower bound of the strength score range
pub const MIN_SCORE: i64 = 0;
/// Upper bound of the strength score range
pub const MAX_SCORE: i64 = 100;
/// Score assigned when no interaction has ever been recorded
pub const BASELINE_SCORE: i64 = 30;

/// Compute the next strength score from the previous score and the
/// newly written `last_interaction_date`.
///
/// Transition rule, with `days_since = floor(now - last, days)`:
/// - no interaction recorded -> baseline 30
/// - `days_since <= 3`       -> +10
/// - `3 < days_since <= 7`   -> +5
/// - `days_since > 30`       -> -15
/// - otherwise                  unchanged
///
/// A future-dated interaction (negative `days_since`) lands in the
/// unchanged branch. The result is always clamped to [0, 100].
pub fn next_score(
    previous: i64,
    last_interaction: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> i64 {
    let score = match last_interaction {
        None => BASELINE_SCORE,
        Some(last) => {
            let days_since = (now - last).num_days();
            if (0..=3).contains(&days_since) {
                previous + 10
            } else if (4..=7).contains(&days_since) {
                previous + 5
            } else if days_since > 30 {
                previous - 15
            } else {
                // 8..=30 days, or a future-dated interaction
                previous
            }
        }
    };

    score.clamp(MIN_SCORE, MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2025-06-15T12:00:00Z".parse().unwrap()
    }

    fn days_ago(days: i64) -> Option<DateTime<Utc>> {
        Some(now() - Duration::days(days))
    }

    #[test]
    fn test_null_interaction_resets_to_baseline() {
        assert_eq!(next_score(0, None, now()), 30);
        assert_eq!(next_score(50, None, now()), 30);
        assert_eq!(next_score(100, None, now()), 30);
    }

    #[test]
    fn test_bucket_values_from_prior_50() {
        assert_eq!(next_score(50, days_ago(2), now()), 60);
        assert_eq!(next_score(50, days_ago(5), now()), 55);
        assert_eq!(next_score(50, days_ago(45), now()), 35);
        assert_eq!(next_score(50, days_ago(15), now()), 50);
    }

    #[test]
    fn test_bucket_boundaries() {
        // 3 is still in the +10 bucket, 7 in the +5 bucket
        assert_eq!(next_score(50, days_ago(3), now()), 60);
        assert_eq!(next_score(50, days_ago(7), now()), 55);
        // 30 is unchanged, 31 drops
        assert_eq!(next_score(50, days_ago(30), now()), 50);
        assert_eq!(next_score(50, days_ago(31), now()), 35);
    }

    #[test]
    fn test_clamping_at_both_ends() {
        assert_eq!(next_score(95, days_ago(1), now()), 100);
        assert_eq!(next_score(100, days_ago(0), now()), 100);
        assert_eq!(next_score(10, days_ago(60), now()), 0);
        assert_eq!(next_score(0, days_ago(60), now()), 0);
    }

    #[test]
    fn test_clamping_holds_over_sequences() {
        let mut score = 50;
        for days in [1, 1, 2, 3, 0, 1, 2] {
            score = next_score(score, days_ago(days), now());
            assert!((MIN_SCORE..=MAX_SCORE).contains(&score));
        }
        assert_eq!(score, 100);

        for _ in 0..10 {
            score = next_score(score, days_ago(90), now());
            assert!((MIN_SCORE..=MAX_SCORE).contains(&score));
        }
        assert_eq!(score, 0);
    }

    #[test]
    fn test_future_interaction_leaves_score_unchanged() {
        // Negative days_since is treated as the unchanged bucket
        assert_eq!(next_score(50, days_ago(-5), now()), 50);
    }
}
