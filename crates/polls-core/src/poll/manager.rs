//! Poll manager: the operations callers run against stored polls

use super::model::{Choice, Poll, PollResults, Question, QuestionSummary};
use super::persistence::PollStorage;
use super::query::QuestionQuery;
use super::validator::PollValidator;
use crate::clock::{Clock, SystemClock};
use crate::config::PollsConfig;
use crate::error::{PollsError, Result};
use crate::types::{ChoiceId, QuestionId};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// Manager for questions, choices and votes
pub struct PollManager {
    /// Storage backend
    storage: Arc<dyn PollStorage>,
    /// Source of "now" for every visibility decision
    clock: Arc<dyn Clock>,
    /// Index limit and validation settings
    config: PollsConfig,
}

impl PollManager {
    /// Create a new manager with the system clock and default configuration
    pub fn new(storage: impl PollStorage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
            clock: Arc::new(SystemClock),
            config: PollsConfig::default(),
        }
    }

    /// Create a new manager with shared storage
    pub fn with_storage(storage: Arc<dyn PollStorage>) -> Self {
        Self {
            storage,
            clock: Arc::new(SystemClock),
            config: PollsConfig::default(),
        }
    }

    /// Replace the clock
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: PollsConfig) -> Self {
        self.config = config;
        self
    }

    /// Current time according to the manager's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Active configuration
    pub fn config(&self) -> &PollsConfig {
        &self.config
    }

    /// Create a question; the publication date may lie in the future
    pub fn create_question(&self, text: &str, pub_date: DateTime<Utc>) -> Result<Question> {
        let text = self.validator().question_text(text)?;
        let id = self.next_question_id()?;

        let question = Question::new(id, text, pub_date);
        self.storage.save(&Poll::new(question.clone()))?;

        info!("Created question {} published at {}", id, pub_date);
        Ok(question)
    }

    /// Add a choice to any question, scheduled ones included
    pub fn add_choice(&self, question_id: QuestionId, text: &str) -> Result<Choice> {
        let text = self.validator().choice_text(text)?;
        let mut poll = self.storage.load(&question_id)?;
        let id = self.next_choice_id()?;

        let choice = Choice::new(id, question_id, text);
        poll.add_choice(choice.clone())?;
        self.storage.save(&poll)?;

        debug!("Added choice {} to question {}", id, question_id);
        Ok(choice)
    }

    /// Public listing: visible questions, latest first, with recency flags
    pub fn index(&self) -> Result<Vec<QuestionSummary>> {
        let now = self.now();
        let mut query = QuestionQuery::new().visible_at(now);
        if let Some(limit) = self.config.index.latest_limit {
            query = query.limit(limit);
        }
        self.summaries(&query, now)
    }

    /// Administrative listing; scheduled questions appear unless the query excludes them
    pub fn search(&self, query: &QuestionQuery) -> Result<Vec<QuestionSummary>> {
        self.summaries(query, self.now())
    }

    /// Look up a published question and its choices
    ///
    /// A question that is not yet visible is reported exactly like one
    /// that does not exist.
    pub fn detail(&self, id: QuestionId) -> Result<Poll> {
        let now = self.now();
        let poll = self.storage.load(&id)?;
        if !poll.question.is_visible(now) {
            debug!("Question {} is scheduled for {}, hiding it", id, poll.question.pub_date);
            return Err(PollsError::QuestionNotFound(id));
        }
        Ok(poll)
    }

    /// Vote totals for a published question
    pub fn results(&self, id: QuestionId) -> Result<PollResults> {
        self.detail(id).map(|poll| poll.results())
    }

    /// Cast one vote for `choice_id` on a published question
    pub fn vote(&self, question_id: QuestionId, choice_id: ChoiceId) -> Result<Choice> {
        let mut poll = self.detail(question_id)?;

        let choice = poll
            .choice_mut(choice_id)
            .ok_or(PollsError::ChoiceNotFound {
                question: question_id,
                choice: choice_id,
            })?;
        choice.vote()?;
        let updated = choice.clone();

        self.storage.save(&poll)?;
        debug!(
            "Vote recorded for choice {} on question {} ({} votes)",
            choice_id, question_id, updated.votes
        );
        Ok(updated)
    }

    /// Total number of questions, scheduled ones included
    pub fn count(&self) -> Result<usize> {
        self.storage.count()
    }

    /// Get access to the underlying storage
    pub fn storage(&self) -> &dyn PollStorage {
        self.storage.as_ref()
    }

    fn summaries(&self, query: &QuestionQuery, now: DateTime<Utc>) -> Result<Vec<QuestionSummary>> {
        let polls = self.storage.list()?;
        Ok(query
            .apply(polls)
            .iter()
            .map(|poll| poll.summary(now))
            .collect())
    }

    fn validator(&self) -> PollValidator {
        PollValidator::from_config(&self.config.validation)
    }

    fn next_question_id(&self) -> Result<QuestionId> {
        match self.storage.list()?.iter().map(|p| p.id()).max() {
            None => Ok(QuestionId(1)),
            Some(max) => max.next().ok_or_else(|| {
                PollsError::Validation(format!("No question id available after {}", max))
            }),
        }
    }

    fn next_choice_id(&self) -> Result<ChoiceId> {
        let max = self
            .storage
            .list()?
            .iter()
            .filter_map(|p| p.max_choice_id())
            .max();
        match max {
            None => Ok(ChoiceId(1)),
            Some(max) => max.next().ok_or_else(|| {
                PollsError::Validation(format!("No choice id available after {}", max))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::poll::MemoryStorage;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap()
    }

    fn create_manager() -> PollManager {
        PollManager::new(MemoryStorage::new()).with_clock(FixedClock::new(now()))
    }

    fn create_question(manager: &PollManager, text: &str, days: i64) -> Question {
        manager
            .create_question(text, now() + Duration::days(days))
            .unwrap()
    }

    fn texts(summaries: &[QuestionSummary]) -> Vec<&str> {
        summaries.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_no_questions() {
        let manager = create_manager();
        assert!(manager.index().unwrap().is_empty());
    }

    #[test]
    fn test_past_question() {
        let manager = create_manager();
        create_question(&manager, "Past question.", -30);
        assert_eq!(texts(&manager.index().unwrap()), vec!["Past question."]);
    }

    #[test]
    fn test_future_question() {
        let manager = create_manager();
        create_question(&manager, "Future question.", 30);
        assert!(manager.index().unwrap().is_empty());
    }

    #[test]
    fn test_future_question_and_past_question() {
        let manager = create_manager();
        create_question(&manager, "Past question.", -30);
        create_question(&manager, "Future question.", 30);
        assert_eq!(texts(&manager.index().unwrap()), vec!["Past question."]);
    }

    #[test]
    fn test_two_past_questions() {
        let manager = create_manager();
        create_question(&manager, "Past question 1.", -30);
        create_question(&manager, "Past question 2.", -5);
        assert_eq!(
            texts(&manager.index().unwrap()),
            vec!["Past question 2.", "Past question 1."]
        );
    }

    #[test]
    fn test_index_reports_recency() {
        let manager = create_manager();
        manager
            .create_question("Fresh", now() - Duration::hours(3))
            .unwrap();
        create_question(&manager, "Stale", -3);

        let index = manager.index().unwrap();
        assert_eq!(texts(&index), vec!["Fresh", "Stale"]);
        assert!(index[0].recently_published);
        assert!(!index[1].recently_published);
    }

    #[test]
    fn test_index_lists_every_published_question_by_default() {
        let manager = create_manager();
        for day in 1..=7 {
            create_question(&manager, &format!("Day {}", day), -day);
        }
        create_question(&manager, "Future question.", 1);

        let index = manager.index().unwrap();
        assert_eq!(index.len(), 7);
        assert_eq!(index[0].text, "Day 1");
        assert_eq!(index[6].text, "Day 7");
    }

    #[test]
    fn test_index_respects_limit() {
        let mut config = PollsConfig::default();
        config.index.latest_limit = Some(2);
        let manager = create_manager().with_config(config);
        for day in 1..=4 {
            create_question(&manager, &format!("Day {}", day), -day);
        }

        assert_eq!(texts(&manager.index().unwrap()), vec!["Day 1", "Day 2"]);
    }

    #[test]
    fn test_detail_future_question_not_found() {
        let manager = create_manager();
        let future = create_question(&manager, "Future question.", 5);

        let result = manager.detail(future.id);
        assert!(matches!(result, Err(PollsError::QuestionNotFound(id)) if id == future.id));
    }

    #[test]
    fn test_detail_hidden_matches_missing() {
        let manager = create_manager();
        let future = create_question(&manager, "Future question.", 5);

        let hidden = manager.detail(future.id).unwrap_err();
        let missing = manager.detail(QuestionId(999)).unwrap_err();
        assert_eq!(hidden.to_string(), format!("Question not found: {}", future.id));
        assert_eq!(missing.to_string(), "Question not found: 999");
    }

    #[test]
    fn test_detail_past_question() {
        let manager = create_manager();
        let past = create_question(&manager, "Past question.", -5);

        let poll = manager.detail(past.id).unwrap();
        assert_eq!(poll.question.text, "Past question.");
    }

    #[test]
    fn test_question_ids_are_sequential() {
        let manager = create_manager();
        let a = create_question(&manager, "a", -1);
        let b = create_question(&manager, "b", 1);
        assert_eq!(a.id, QuestionId(1));
        assert_eq!(b.id, QuestionId(2));
        assert_eq!(manager.count().unwrap(), 2);
    }

    #[test]
    fn test_create_question_validates_text() {
        let manager = create_manager();
        assert!(matches!(
            manager.create_question("   ", now()),
            Err(PollsError::Validation(_))
        ));
        assert_eq!(manager.count().unwrap(), 0);
    }

    #[test]
    fn test_add_choice_ids_are_global() {
        let manager = create_manager();
        let q1 = create_question(&manager, "q1", -1);
        let q2 = create_question(&manager, "q2", 3);

        let c1 = manager.add_choice(q1.id, "a").unwrap();
        let c2 = manager.add_choice(q2.id, "b").unwrap();
        let c3 = manager.add_choice(q1.id, "c").unwrap();

        assert_eq!((c1.id, c2.id, c3.id), (ChoiceId(1), ChoiceId(2), ChoiceId(3)));
        assert_eq!(manager.storage().load(&q1.id).unwrap().choices.len(), 2);
    }

    #[test]
    fn test_add_choice_unknown_question() {
        let manager = create_manager();
        assert!(matches!(
            manager.add_choice(QuestionId(9), "a"),
            Err(PollsError::QuestionNotFound(_))
        ));
    }

    #[test]
    fn test_vote_increments_and_persists() {
        let manager = create_manager();
        let question = create_question(&manager, "q", -1);
        let choice = manager.add_choice(question.id, "yes").unwrap();
        manager.add_choice(question.id, "no").unwrap();

        assert_eq!(manager.vote(question.id, choice.id).unwrap().votes, 1);
        assert_eq!(manager.vote(question.id, choice.id).unwrap().votes, 2);

        let results = manager.results(question.id).unwrap();
        assert_eq!(results.total_votes, 2);
        assert_eq!(results.choices[0].votes, 2);
        assert_eq!(results.choices[1].votes, 0);
    }

    #[test]
    fn test_vote_on_scheduled_question_not_found() {
        let manager = create_manager();
        let question = create_question(&manager, "q", 2);
        let choice = manager.add_choice(question.id, "yes").unwrap();

        assert!(matches!(
            manager.vote(question.id, choice.id),
            Err(PollsError::QuestionNotFound(_))
        ));
        assert_eq!(manager.storage().load(&question.id).unwrap().total_votes(), 0);
    }

    #[test]
    fn test_vote_with_foreign_choice() {
        let manager = create_manager();
        let q1 = create_question(&manager, "q1", -1);
        let q2 = create_question(&manager, "q2", -1);
        let other = manager.add_choice(q2.id, "elsewhere").unwrap();

        let result = manager.vote(q1.id, other.id);
        assert!(matches!(
            result,
            Err(PollsError::ChoiceNotFound { question, choice }) if question == q1.id && choice == other.id
        ));
    }

    #[test]
    fn test_results_hidden_for_scheduled_question() {
        let manager = create_manager();
        let question = create_question(&manager, "q", 1);
        assert!(manager.results(question.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_search_includes_scheduled() {
        let manager = create_manager();
        create_question(&manager, "Past question.", -30);
        create_question(&manager, "Future question.", 30);

        let all = manager.search(&QuestionQuery::new()).unwrap();
        assert_eq!(texts(&all), vec!["Future question.", "Past question."]);

        let found = manager
            .search(&QuestionQuery::new().with_text("future"))
            .unwrap();
        assert_eq!(texts(&found), vec!["Future question."]);
    }

    #[test]
    fn test_exhausted_ids_are_rejected() {
        let storage: Arc<dyn PollStorage> = Arc::new(MemoryStorage::new());
        let mut poll = Poll::new(Question::new(
            QuestionId(u64::MAX),
            "Imported",
            now() - Duration::days(1),
        ));
        poll.add_choice(Choice::new(ChoiceId(u64::MAX), QuestionId(u64::MAX), "Last"))
            .unwrap();
        storage.save(&poll).unwrap();

        let manager = PollManager::with_storage(storage).with_clock(FixedClock::new(now()));
        assert!(matches!(
            manager.create_question("One more", now()),
            Err(PollsError::Validation(_))
        ));
        assert!(matches!(
            manager.add_choice(QuestionId(u64::MAX), "Another"),
            Err(PollsError::Validation(_))
        ));
        assert_eq!(manager.count().unwrap(), 1);
    }

    #[test]
    fn test_question_becomes_visible_when_clock_passes() {
        let storage: Arc<dyn PollStorage> = Arc::new(MemoryStorage::new());
        let before = PollManager::with_storage(storage.clone()).with_clock(FixedClock::new(now()));
        let question = before
            .create_question("Scheduled", now() + Duration::hours(1))
            .unwrap();
        assert!(before.detail(question.id).is_err());

        let after = PollManager::with_storage(storage)
            .with_clock(FixedClock::new(now() + Duration::hours(1)));
        assert_eq!(after.detail(question.id).unwrap().question.text, "Scheduled");
        assert!(after.index().unwrap()[0].recently_published);
    }
}
