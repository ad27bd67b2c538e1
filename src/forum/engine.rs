//! Engine facade
//!
//! `Forum` resolves the current user, routes each operation to the identity
//! provider, entity store, vote ledger or query engine, and records the
//! outcome in metrics and, when enabled, the structured log.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::Uuid;

use crate::aggregate::{AnswerView, QuestionView};
use crate::clock::{system_clock, SharedClock};
use crate::config::Config;
use crate::identity::{IdentityProvider, DEFAULT_IDENTITY_KEY};
use crate::ledger::{VoteLedger, VoteOutcome};
use crate::model::{NewAnswer, NewQuestion, SortOption, Target, TargetType, User, VoteType};
use crate::observability::{Event, Logger, MetricsRegistry, MetricsSnapshot, Severity};
use crate::query::QueryEngine;
use crate::storage::{FileMedium, Medium};
use crate::store::{parse_tags, EntityStore, StoreError, StoreResult};

/// The engine: identity, entity store, vote ledger and queries over one medium.
pub struct Forum {
    identity: IdentityProvider,
    store: Arc<EntityStore>,
    ledger: VoteLedger,
    query: QueryEngine,
    metrics: MetricsRegistry,
    log_events: bool,
}

impl Forum {
    /// Opens a file-backed engine rooted at `config.data_dir`.
    pub fn open(config: &Config) -> StoreResult<Self> {
        let medium: Arc<dyn Medium> = Arc::new(FileMedium::open(config.data_path())?);
        let identity = IdentityProvider::new(medium.clone(), config.identity_key());
        let forum = Self::assemble(medium, system_clock(), identity, config.log_events);

        let data_dir = config.data_path().display().to_string();
        forum.emit(
            Severity::Info,
            Event::EngineOpened,
            &[("data_dir", data_dir.as_str()), ("identity_key", forum.identity.key())],
        );
        Ok(forum)
    }

    /// Builds an engine from explicit parts. Logging is off.
    pub fn with_parts(
        medium: Arc<dyn Medium>,
        clock: SharedClock,
        rng: Box<dyn RngCore + Send>,
    ) -> Self {
        let identity = IdentityProvider::with_rng(medium.clone(), DEFAULT_IDENTITY_KEY, rng);
        Self::assemble(medium, clock, identity, false)
    }

    /// Like [`Forum::with_parts`] with a deterministic random source.
    pub fn seeded(medium: Arc<dyn Medium>, clock: SharedClock, seed: u64) -> Self {
        Self::with_parts(medium, clock, Box::new(StdRng::seed_from_u64(seed)))
    }

    fn assemble(
        medium: Arc<dyn Medium>,
        clock: SharedClock,
        identity: IdentityProvider,
        log_events: bool,
    ) -> Self {
        let store = Arc::new(EntityStore::new(medium, clock));
        Self {
            identity,
            ledger: VoteLedger::new(store.clone()),
            query: QueryEngine::new(store.clone()),
            store,
            metrics: MetricsRegistry::new(),
            log_events,
        }
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Returns the client identity, creating and persisting it on first use.
    pub fn initialize_identity(&self) -> StoreResult<User> {
        let existed = self.observe(self.identity.stored().map_err(StoreError::from))?;
        let user = self.observe(self.identity.initialize().map_err(StoreError::from))?;

        if existed.is_none() {
            let id = user.id.to_string();
            self.emit(
                Severity::Info,
                Event::IdentityCreated,
                &[("display_name", user.display_name.as_str()), ("user_id", id.as_str())],
            );
        }
        Ok(user)
    }

    pub fn current_user(&self) -> StoreResult<User> {
        self.initialize_identity()
    }

    /// Posts a question as the current user.
    ///
    /// Tags are trimmed before they are stored.
    pub fn create_question(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
        tags: Vec<String>,
    ) -> StoreResult<QuestionView> {
        let author = self.current_user()?;
        let input = NewQuestion {
            title: title.into(),
            content: content.into(),
            tags,
        };

        let record = self.observe(self.store.create_question(&author, input))?;
        self.metrics.increment_questions_created();

        let author_id = author.id.to_string();
        let question_id = record.id.to_string();
        self.emit(
            Severity::Info,
            Event::QuestionCreated,
            &[("author_id", author_id.as_str()), ("question_id", question_id.as_str())],
        );

        Ok(QuestionView {
            record,
            upvotes: 0,
            downvotes: 0,
            score: 0,
            answer_count: 0,
        })
    }

    /// Posts a question whose tags arrive as one comma-separated string.
    pub fn create_question_with_raw_tags(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
        raw_tags: &str,
    ) -> StoreResult<QuestionView> {
        let tags = self.observe(parse_tags(raw_tags))?;
        self.create_question(title, content, tags)
    }

    /// Posts an answer to `question_id` as the current user.
    pub fn create_answer(
        &self,
        question_id: Uuid,
        content: impl Into<String>,
    ) -> StoreResult<AnswerView> {
        let author = self.current_user()?;
        let input = NewAnswer {
            question_id,
            content: content.into(),
        };

        let record = self.observe(self.store.create_answer(&author, input))?;
        self.metrics.increment_answers_created();

        let answer_id = record.id.to_string();
        let question_field = question_id.to_string();
        self.emit(
            Severity::Info,
            Event::AnswerCreated,
            &[
                ("answer_id", answer_id.as_str()),
                ("question_id", question_field.as_str()),
            ],
        );

        Ok(AnswerView {
            record,
            upvotes: 0,
            downvotes: 0,
            score: 0,
        })
    }

    /// Toggles the current user's vote. Returns `true` once applied.
    pub fn vote(
        &self,
        target_id: Uuid,
        target_type: TargetType,
        vote_type: VoteType,
    ) -> StoreResult<bool> {
        self.cast_vote(Target::new(target_id, target_type), vote_type)
            .map(|_| true)
    }

    /// Toggles the current user's vote and reports the transition taken.
    pub fn cast_vote(&self, target: Target, vote_type: VoteType) -> StoreResult<VoteOutcome> {
        let user = self.current_user()?;
        let outcome = self.observe(self.ledger.vote(&user, target, vote_type))?;

        let event = if outcome.retracted() {
            self.metrics.increment_votes_retracted();
            Event::VoteRetracted
        } else {
            self.metrics.increment_votes_applied();
            Event::VoteApplied
        };

        let target_field = format!("{}:{}", target.target_type, target.id);
        let state = format!("{:?}", outcome.current);
        let user_id = user.id.to_string();
        self.emit(
            Severity::Info,
            event,
            &[
                ("state", state.as_str()),
                ("target", target_field.as_str()),
                ("user_id", user_id.as_str()),
            ],
        );
        Ok(outcome)
    }

    /// The current user's vote on a target, if any.
    pub fn user_vote(
        &self,
        target_id: Uuid,
        target_type: TargetType,
    ) -> StoreResult<Option<VoteType>> {
        let user = self.current_user()?;
        self.read(self.ledger.user_vote(user.id, Target::new(target_id, target_type)))
    }

    pub fn list_questions(&self, sort: SortOption) -> StoreResult<Vec<QuestionView>> {
        self.read(self.query.list_questions(sort))
    }

    pub fn get_question(&self, id: Uuid) -> StoreResult<Option<QuestionView>> {
        self.read(self.query.get_question(id))
    }

    pub fn get_answers(&self, question_id: Uuid) -> StoreResult<Vec<AnswerView>> {
        self.read(self.query.get_answers(question_id))
    }

    pub fn search_questions(&self, query: &str) -> StoreResult<Vec<QuestionView>> {
        self.read(self.query.search_questions(query))
    }

    fn read<T>(&self, result: StoreResult<T>) -> StoreResult<T> {
        self.metrics.increment_reads();
        self.observe(result)
    }

    /// Counts and logs a failed result; passes the result through unchanged.
    fn observe<T>(&self, result: StoreResult<T>) -> StoreResult<T> {
        if let Err(err) = &result {
            let message = err.to_string();
            let fields = [("code", err.code()), ("message", message.as_str())];

            match err {
                StoreError::Validation { .. } | StoreError::TargetNotFound { .. } => {
                    self.metrics.increment_writes_rejected();
                    self.emit(Severity::Warn, Event::WriteRejected, &fields);
                }
                StoreError::Storage(e) if e.is_fatal() => {
                    self.metrics.increment_storage_failures();
                    self.emit(Severity::Fatal, Event::DataCorruption, &fields);
                }
                StoreError::Storage(_) => {
                    self.metrics.increment_storage_failures();
                    self.emit(Severity::Error, Event::StorageFailed, &fields);
                }
            }
        }
        result
    }

    fn emit(&self, severity: Severity, event: Event, fields: &[(&str, &str)]) {
        if self.log_events {
            Logger::log(severity, event.as_str(), fields);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SteppingClock;
    use crate::ledger::VoteState;
    use crate::storage::MemoryMedium;
    use chrono::{TimeZone, Utc};

    fn forum() -> Forum {
        let clock = SteppingClock::per_second(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
        Forum::seeded(Arc::new(MemoryMedium::new()), Arc::new(clock), 7)
    }

    fn ask(forum: &Forum, title: &str) -> QuestionView {
        forum
            .create_question(
                title,
                "Long enough content to pass validation.",
                vec!["rust".into()],
            )
            .unwrap()
    }

    #[test]
    fn test_identity_is_created_once() {
        let forum = forum();
        let first = forum.initialize_identity().unwrap();
        let second = forum.current_user().unwrap();
        assert_eq!(first, second);
        assert!(first.display_name.starts_with("Anonymous User #"));
    }

    #[test]
    fn test_question_authored_by_current_user() {
        let forum = forum();
        let user = forum.current_user().unwrap();
        let q = ask(&forum, "How do lifetimes work?");

        assert_eq!(q.record.author.author_id, user.id);
        assert_eq!(q.record.author.author_name, user.display_name);
        assert_eq!((q.upvotes, q.downvotes, q.score, q.answer_count), (0, 0, 0, 0));
        assert_eq!(forum.metrics().questions_created, 1);
    }

    #[test]
    fn test_raw_tags_are_split() {
        let forum = forum();
        let q = forum
            .create_question_with_raw_tags(
                "Tags from a single field",
                "Long enough content to pass validation.",
                " rust , async,, tokio ",
            )
            .unwrap();
        assert_eq!(q.record.tags, vec!["rust", "async", "tokio"]);
    }

    #[test]
    fn test_vote_scenario() {
        let forum = forum();
        let q = ask(&forum, "Why does my borrow fail?");
        let score = |f: &Forum| f.get_question(q.id()).unwrap().unwrap();

        assert!(forum.vote(q.id(), TargetType::Question, VoteType::Upvote).unwrap());
        let view = score(&forum);
        assert_eq!((view.upvotes, view.downvotes, view.score), (1, 0, 1));
        assert_eq!(
            forum.user_vote(q.id(), TargetType::Question).unwrap(),
            Some(VoteType::Upvote)
        );

        forum.vote(q.id(), TargetType::Question, VoteType::Upvote).unwrap();
        assert_eq!(score(&forum).score, 0);
        assert_eq!(forum.user_vote(q.id(), TargetType::Question).unwrap(), None);

        forum.vote(q.id(), TargetType::Question, VoteType::Downvote).unwrap();
        let view = score(&forum);
        assert_eq!((view.upvotes, view.downvotes, view.score), (0, 1, -1));

        let metrics = forum.metrics();
        assert_eq!(metrics.votes_applied, 2);
        assert_eq!(metrics.votes_retracted, 1);
    }

    #[test]
    fn test_cast_vote_reports_transition() {
        let forum = forum();
        let q = ask(&forum, "What does a flip look like?");
        let target = Target::question(q.id());

        forum.cast_vote(target, VoteType::Upvote).unwrap();
        let outcome = forum.cast_vote(target, VoteType::Downvote).unwrap();
        assert_eq!(outcome.previous, VoteState::Upvoted);
        assert_eq!(outcome.current, VoteState::Downvoted);
    }

    #[test]
    fn test_rejections_are_counted() {
        let forum = forum();
        let err = forum.create_question("short", "also short", vec![]).unwrap_err();
        assert_eq!(err.code(), "QRM_VALIDATION_FAILED");

        let err = forum
            .vote(Uuid::new_v4(), TargetType::Answer, VoteType::Upvote)
            .unwrap_err();
        assert_eq!(err.code(), "QRM_TARGET_NOT_FOUND");

        assert_eq!(forum.metrics().writes_rejected, 2);
        assert!(forum.list_questions(SortOption::Latest).unwrap().is_empty());
    }

    #[test]
    fn test_answers_count_toward_question() {
        let forum = forum();
        let q = ask(&forum, "Where do answers show up?");
        let a = forum
            .create_answer(q.id(), "They show up right underneath the question.")
            .unwrap();

        assert_eq!(a.record.question_id, q.id());
        assert_eq!(forum.get_question(q.id()).unwrap().unwrap().answer_count, 1);
        assert_eq!(forum.get_answers(q.id()).unwrap().len(), 1);
        assert_eq!(forum.metrics().answers_created, 1);
    }
}
