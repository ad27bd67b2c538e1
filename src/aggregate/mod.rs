//! Aggregation Engine
//!
//! Derives vote tallies and answer counts from raw records. Nothing here is
//! cached or stored: every view handed to a caller is recomputed from the
//! aggregate it was built from, so counts can never drift from the ledger.

use serde::Serialize;
use uuid::Uuid;

use crate::model::{AnswerRecord, ForumData, QuestionRecord, Target, VoteType};

/// Vote counts for one target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub upvotes: u64,
    pub downvotes: u64,
}

impl Tally {
    /// `upvotes - downvotes`
    pub fn score(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }
}

/// Question with its derived fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    #[serde(flatten)]
    pub record: QuestionRecord,
    pub upvotes: u64,
    pub downvotes: u64,
    pub score: i64,
    pub answer_count: u64,
}

/// Answer with its derived fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerView {
    #[serde(flatten)]
    pub record: AnswerRecord,
    pub upvotes: u64,
    pub downvotes: u64,
    pub score: i64,
}

impl QuestionView {
    pub fn id(&self) -> Uuid {
        self.record.id
    }
}

impl AnswerView {
    pub fn id(&self) -> Uuid {
        self.record.id
    }
}

pub fn tally(data: &ForumData, target: Target) -> Tally {
    data.votes_on(target).fold(Tally::default(), |mut t, vote| {
        match vote.vote_type {
            VoteType::Upvote => t.upvotes += 1,
            VoteType::Downvote => t.downvotes += 1,
        }
        t
    })
}

pub fn upvotes(data: &ForumData, target: Target) -> u64 {
    tally(data, target).upvotes
}

pub fn downvotes(data: &ForumData, target: Target) -> u64 {
    tally(data, target).downvotes
}

pub fn score(data: &ForumData, target: Target) -> i64 {
    tally(data, target).score()
}

pub fn answer_count(data: &ForumData, question_id: Uuid) -> u64 {
    data.answers_to(question_id).count() as u64
}

pub fn question_view(data: &ForumData, record: &QuestionRecord) -> QuestionView {
    let t = tally(data, Target::question(record.id));
    QuestionView {
        record: record.clone(),
        upvotes: t.upvotes,
        downvotes: t.downvotes,
        score: t.score(),
        answer_count: answer_count(data, record.id),
    }
}

pub fn answer_view(data: &ForumData, record: &AnswerRecord) -> AnswerView {
    let t = tally(data, Target::answer(record.id));
    AnswerView {
        record: record.clone(),
        upvotes: t.upvotes,
        downvotes: t.downvotes,
        score: t.score(),
    }
}

/// Every question, in storage order
pub fn question_views(data: &ForumData) -> Vec<QuestionView> {
    data.questions.iter().map(|q| question_view(data, q)).collect()
}

/// Answers to `question_id`, in storage order
pub fn answer_views(data: &ForumData, question_id: Uuid) -> Vec<AnswerView> {
    data.answers_to(question_id)
        .map(|a| answer_view(data, a))
        .collect()
}
