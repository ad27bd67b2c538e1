//! Entity Store
//!
//! Sole owner of the persisted aggregate. Every mutation runs through
//! [`EntityStore::transact`]:
//!
//! 1. Acquire the store mutex
//! 2. Read the entire aggregate
//! 3. Apply the change to an owned copy
//! 4. Write the entire aggregate back (only if step 3 succeeded)
//!
//! A failure at any step leaves the previously persisted aggregate intact.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::clock::SharedClock;
use crate::model::{
    AnswerRecord, AuthorSnapshot, ForumData, NewAnswer, NewQuestion, QuestionRecord, TargetType,
    User,
};
use crate::storage::{read_json, write_json, Medium, StorageError};

use super::errors::{StoreError, StoreResult};
use super::validation::{validate_answer, validate_question};

/// Storage key of the forum aggregate
pub const FORUM_DATA_KEY: &str = "forum_data";

pub struct EntityStore {
    medium: Arc<dyn Medium>,
    clock: SharedClock,
    /// Serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl EntityStore {
    pub fn new(medium: Arc<dyn Medium>, clock: SharedClock) -> Self {
        Self {
            medium,
            clock,
            lock: Mutex::new(()),
        }
    }

    /// Current time according to the injected clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Returns an owned copy of the whole aggregate.
    ///
    /// A medium that has never been written reads as an empty aggregate.
    pub fn snapshot(&self) -> StoreResult<ForumData> {
        Ok(read_json(self.medium.as_ref(), FORUM_DATA_KEY)?.unwrap_or_default())
    }

    /// Runs `f` against the aggregate inside one transaction.
    ///
    /// The aggregate is persisted only when `f` returns `Ok`.
    pub fn transact<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut ForumData) -> StoreResult<T>,
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StorageError::unavailable_no_source("store lock poisoned"))?;

        let mut data = self.snapshot()?;
        let out = f(&mut data)?;
        write_json(self.medium.as_ref(), FORUM_DATA_KEY, &data)?;
        Ok(out)
    }

    /// Validates and appends a new question authored by `author`.
    ///
    /// Title, content and tags are stored trimmed.
    pub fn create_question(&self, author: &User, input: NewQuestion) -> StoreResult<QuestionRecord> {
        validate_question(&input)?;

        let question = QuestionRecord {
            id: Uuid::new_v4(),
            title: input.title.trim().to_string(),
            content: input.content.trim().to_string(),
            tags: input.tags.iter().map(|t| t.trim().to_string()).collect(),
            author: AuthorSnapshot::from(author),
            created_at: self.now(),
        };

        self.transact(|data| {
            data.questions.push(question.clone());
            data.register_user(author);
            Ok(())
        })?;

        Ok(question)
    }

    /// Validates and appends a new answer authored by `author`.
    ///
    /// Content is stored trimmed.
    ///
    /// # Errors
    ///
    /// `QRM_TARGET_NOT_FOUND` if `input.question_id` names no question.
    pub fn create_answer(&self, author: &User, input: NewAnswer) -> StoreResult<AnswerRecord> {
        validate_answer(&input)?;

        let answer = AnswerRecord {
            id: Uuid::new_v4(),
            question_id: input.question_id,
            content: input.content.trim().to_string(),
            author: AuthorSnapshot::from(author),
            created_at: self.now(),
        };

        self.transact(|data| {
            if data.question(answer.question_id).is_none() {
                return Err(StoreError::target_not_found(
                    TargetType::Question,
                    answer.question_id,
                ));
            }
            data.answers.push(answer.clone());
            data.register_user(author);
            Ok(())
        })?;

        Ok(answer)
    }

    pub fn question(&self, id: Uuid) -> StoreResult<Option<QuestionRecord>> {
        Ok(self.snapshot()?.question(id).cloned())
    }

    /// Answers to `question_id` in storage order
    pub fn answers_for(&self, question_id: Uuid) -> StoreResult<Vec<AnswerRecord>> {
        Ok(self.snapshot()?.answers_to(question_id).cloned().collect())
    }
}
