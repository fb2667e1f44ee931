//! Question filtering and ordering
//!
//! Listings are built by collecting polls from storage and running them
//! through a [`QuestionQuery`]; storage backends never filter or sort.

use super::model::{Poll, Question};
use crate::error::PollsError;
use crate::visibility;
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

/// Publication date filter for administrative listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFilter {
    /// No restriction, scheduled questions included
    #[default]
    Any,
    /// Published since midnight UTC
    Today,
    /// Published within the last seven days
    Past7Days,
    /// Published since the first of the month
    ThisMonth,
    /// Published since January 1st
    ThisYear,
}

impl DateFilter {
    /// Start of the range covered by this filter, relative to `now`
    pub fn since(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let today = now.date_naive();
        let start = match self {
            DateFilter::Any => return None,
            DateFilter::Past7Days => return Some(now - Duration::days(7)),
            DateFilter::Today => Some(today),
            DateFilter::ThisMonth => today.with_day(1),
            DateFilter::ThisYear => NaiveDate::from_ymd_opt(today.year(), 1, 1),
        };
        start
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| Utc.from_utc_datetime(&midnight))
    }

    /// Names accepted by `FromStr`
    pub fn variants() -> &'static [&'static str] {
        &["any", "today", "past-7-days", "this-month", "this-year"]
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DateFilter::Any => "any",
            DateFilter::Today => "today",
            DateFilter::Past7Days => "past-7-days",
            DateFilter::ThisMonth => "this-month",
            DateFilter::ThisYear => "this-year",
        };
        f.write_str(name)
    }
}

impl FromStr for DateFilter {
    type Err = PollsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "any" => Ok(DateFilter::Any),
            "today" => Ok(DateFilter::Today),
            "past-7-days" | "week" => Ok(DateFilter::Past7Days),
            "this-month" | "month" => Ok(DateFilter::ThisMonth),
            "this-year" | "year" => Ok(DateFilter::ThisYear),
            other => Err(PollsError::Validation(format!(
                "Unknown date filter '{}', expected one of: {}",
                other,
                DateFilter::variants().join(", ")
            ))),
        }
    }
}

/// Filter criteria and limit for question listings
#[derive(Debug, Clone, Default)]
pub struct QuestionQuery {
    /// Only questions visible at this instant
    pub visible_at: Option<DateTime<Utc>>,
    /// Case-insensitive substring of the question text
    pub text: Option<String>,
    /// Only questions published at or after this instant
    pub published_after: Option<DateTime<Utc>>,
    /// Maximum number of results, applied after ordering
    pub limit: Option<usize>,
}

impl QuestionQuery {
    /// Create a new empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only questions visible at `now`
    pub fn visible_at(mut self, now: DateTime<Utc>) -> Self {
        self.visible_at = Some(now);
        self
    }

    /// Search question text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Restrict by publication date; any filter other than `Any` also hides scheduled questions
    pub fn published(mut self, filter: DateFilter, now: DateTime<Utc>) -> Self {
        if let Some(since) = filter.since(now) {
            self.published_after = Some(since);
            self.visible_at = Some(now);
        }
        self
    }

    /// Limit the number of results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check if a question matches this query
    pub fn matches(&self, question: &Question) -> bool {
        if let Some(now) = self.visible_at {
            if !visibility::is_visible(question.pub_date, now) {
                return false;
            }
        }

        if let Some(ref text) = self.text {
            let needle = text.to_lowercase();
            if !question.text.to_lowercase().contains(&needle) {
                return false;
            }
        }

        if let Some(after) = self.published_after {
            if question.pub_date < after {
                return false;
            }
        }

        true
    }

    /// Filter, order latest first, then limit
    pub fn apply(&self, polls: Vec<Poll>) -> Vec<Poll> {
        let mut selected: Vec<Poll> = polls
            .into_iter()
            .filter(|p| self.matches(&p.question))
            .collect();
        sort_latest_first(&mut selected);
        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}

/// Order by publication time descending, ties by ID ascending
pub fn sort_latest_first(polls: &mut [Poll]) {
    polls.sort_by(|a, b| {
        b.question
            .pub_date
            .cmp(&a.question.pub_date)
            .then_with(|| a.question.id.cmp(&b.question.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuestionId;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap()
    }

    fn poll(id: u64, text: &str, days: i64) -> Poll {
        Poll::new(Question::new(QuestionId(id), text, now() + Duration::days(days)))
    }

    fn ids(polls: &[Poll]) -> Vec<u64> {
        polls.iter().map(|p| p.id().0).collect()
    }

    #[test]
    fn test_empty_listing() {
        let result = QuestionQuery::new().visible_at(now()).apply(Vec::new());
        assert!(result.is_empty());
    }

    #[test]
    fn test_visible_listing_is_latest_first() {
        let polls = vec![poll(1, "Past question 1.", -30), poll(2, "Past question 2.", -5)];
        let result = QuestionQuery::new().visible_at(now()).apply(polls);
        assert_eq!(ids(&result), vec![2, 1]);
    }

    #[test]
    fn test_future_questions_hidden() {
        let polls = vec![poll(1, "Past question.", -30), poll(2, "Future question.", 30)];
        let result = QuestionQuery::new().visible_at(now()).apply(polls);
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_question_published_exactly_now_is_visible() {
        let result = QuestionQuery::new().visible_at(now()).apply(vec![poll(1, "Now", 0)]);
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_ties_broken_by_id() {
        let polls = vec![poll(3, "c", -1), poll(1, "a", -1), poll(2, "b", -1)];
        let result = QuestionQuery::new().apply(polls);
        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn test_limit_applies_after_ordering() {
        let polls = (1..=7).map(|i| poll(i, "q", -(i as i64))).collect();
        let result = QuestionQuery::new().visible_at(now()).limit(5).apply(polls);
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_unrestricted_query_includes_scheduled() {
        let polls = vec![poll(1, "Past", -3), poll(2, "Future", 3)];
        let result = QuestionQuery::new().apply(polls);
        assert_eq!(ids(&result), vec![2, 1]);
    }

    #[test]
    fn test_text_search_is_case_insensitive() {
        let polls = vec![poll(1, "What's up?", -1), poll(2, "Favourite colour", -2)];
        let result = QuestionQuery::new().with_text("WHAT").apply(polls);
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_date_filter_since() {
        let now = now();
        assert_eq!(DateFilter::Any.since(now), None);
        assert_eq!(
            DateFilter::Today.since(now),
            Some(Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(DateFilter::Past7Days.since(now), Some(now - Duration::days(7)));
        assert_eq!(
            DateFilter::ThisMonth.since(now),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            DateFilter::ThisYear.since(now),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_published_filter_excludes_future() {
        let polls = vec![poll(1, "a", -3), poll(2, "b", -10), poll(3, "c", 2)];
        let result = QuestionQuery::new()
            .published(DateFilter::Past7Days, now())
            .apply(polls);
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_date_filter_parse() {
        assert_eq!("today".parse::<DateFilter>().unwrap(), DateFilter::Today);
        assert_eq!("Past-7-Days".parse::<DateFilter>().unwrap(), DateFilter::Past7Days);
        assert_eq!("year".parse::<DateFilter>().unwrap(), DateFilter::ThisYear);
        assert!("yesterday".parse::<DateFilter>().is_err());

        for name in DateFilter::variants() {
            let filter: DateFilter = name.parse().unwrap();
            assert_eq!(filter.to_string(), *name);
        }
    }
}
