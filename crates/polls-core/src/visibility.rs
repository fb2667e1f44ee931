//! Publication visibility and recency rules
//!
//! A question is *visible* once its publication time has passed, and
//! *recently published* while it is visible and at most one day old.
//! Both rules take the current time as an argument.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the trailing window that counts as "recent"
pub fn recent_window() -> Duration {
    Duration::days(1)
}

/// Whether a question published at `pub_date` can be seen at `now`
pub fn is_visible(pub_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    pub_date <= now
}

/// Whether a question published at `pub_date` counts as recent at `now`
///
/// The window is inclusive on both ends: exactly one day ago is recent,
/// and anything after `now` is not.
pub fn is_recently_published(pub_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - recent_window() <= pub_date && pub_date <= now
}

/// Publication state of a question relative to some instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Publication {
    /// Publication time is still in the future
    Scheduled,
    /// Published within the recent window
    Recent,
    /// Published before the recent window
    Published,
}

impl Publication {
    /// Whether questions in this state can be listed or looked up
    pub fn is_visible(&self) -> bool {
        !matches!(self, Publication::Scheduled)
    }
}

impl fmt::Display for Publication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Publication::Scheduled => "scheduled",
            Publication::Recent => "recent",
            Publication::Published => "published",
        };
        f.write_str(label)
    }
}

/// Classify a publication time relative to `now`
pub fn classify(pub_date: DateTime<Utc>, now: DateTime<Utc>) -> Publication {
    if !is_visible(pub_date, now) {
        Publication::Scheduled
    } else if is_recently_published(pub_date, now) {
        Publication::Recent
    } else {
        Publication::Published
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_future_question_is_neither_recent_nor_visible() {
        let now = now();
        for offset in [Duration::seconds(1), Duration::hours(1), Duration::days(30)] {
            let pub_date = now + offset;
            assert!(!is_recently_published(pub_date, now));
            assert!(!is_visible(pub_date, now));
        }
    }

    #[test]
    fn test_old_question_is_visible_but_not_recent() {
        let now = now();
        let pub_date = now - Duration::days(1) - Duration::seconds(1);
        assert!(!is_recently_published(pub_date, now));
        assert!(is_visible(pub_date, now));

        let pub_date = now - Duration::days(30);
        assert!(!is_recently_published(pub_date, now));
        assert!(is_visible(pub_date, now));
    }

    #[test]
    fn test_recent_question() {
        let now = now();
        let pub_date = now - Duration::hours(23) - Duration::minutes(59) - Duration::seconds(59);
        assert!(is_recently_published(pub_date, now));
        assert!(is_visible(pub_date, now));
    }

    #[test]
    fn test_window_boundaries_are_inclusive() {
        let now = now();
        assert!(is_recently_published(now - Duration::hours(24), now));
        assert!(!is_recently_published(now - Duration::hours(24) - Duration::seconds(1), now));
        assert!(is_recently_published(now, now));
        assert!(is_visible(now, now));
    }

    #[test]
    fn test_classify() {
        let now = now();
        assert_eq!(classify(now + Duration::seconds(1), now), Publication::Scheduled);
        assert_eq!(classify(now, now), Publication::Recent);
        assert_eq!(classify(now - Duration::hours(24), now), Publication::Recent);
        assert_eq!(classify(now - Duration::days(2), now), Publication::Published);
    }

    #[test]
    fn test_classify_agrees_with_predicates() {
        let now = now();
        for minutes in (-3000..3000).step_by(97) {
            let pub_date = now + Duration::minutes(minutes);
            let state = classify(pub_date, now);
            assert_eq!(state.is_visible(), is_visible(pub_date, now));
            assert_eq!(state == Publication::Recent, is_recently_published(pub_date, now));
        }
    }

    #[test]
    fn test_publication_display() {
        assert_eq!(Publication::Scheduled.to_string(), "scheduled");
        assert_eq!(Publication::Recent.to_string(), "recent");
    }
}
