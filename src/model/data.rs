//! The single persisted aggregate
//!
//! `ForumData` is read and written as a whole on every operation. The vote
//! primitives here do not enforce the one-vote-per-user-per-target rule on
//! their own; `crate::ledger` is the only caller and preserves it by
//! inserting only when `find_vote` returns nothing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::options::{Target, TargetType, VoteType};
use super::records::{AnswerRecord, QuestionRecord, User, Vote};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumData {
    #[serde(default)]
    pub questions: Vec<QuestionRecord>,
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
    #[serde(default)]
    pub votes: Vec<Vote>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl ForumData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question(&self, id: Uuid) -> Option<&QuestionRecord> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn answer(&self, id: Uuid) -> Option<&AnswerRecord> {
        self.answers.iter().find(|a| a.id == id)
    }

    /// Answers to `question_id` in storage order
    pub fn answers_to(&self, question_id: Uuid) -> impl Iterator<Item = &AnswerRecord> {
        self.answers
            .iter()
            .filter(move |a| a.question_id == question_id)
    }

    /// Votes cast on `target` in storage order
    pub fn votes_on(&self, target: Target) -> impl Iterator<Item = &Vote> {
        self.votes
            .iter()
            .filter(move |v| v.target() == target)
    }

    pub fn target_exists(&self, target: Target) -> bool {
        match target.target_type {
            TargetType::Question => self.question(target.id).is_some(),
            TargetType::Answer => self.answer(target.id).is_some(),
        }
    }

    /// Adds `user` to the users collection unless already present.
    ///
    /// Returns whether the user was newly added.
    pub fn register_user(&mut self, user: &User) -> bool {
        if self.users.iter().any(|u| u.id == user.id) {
            return false;
        }
        self.users.push(user.clone());
        true
    }

    pub fn find_vote(&self, user_id: Uuid, target: Target) -> Option<&Vote> {
        self.votes.iter().find(|v| v.is_keyed_by(user_id, target))
    }

    pub fn push_vote(&mut self, vote: Vote) {
        self.votes.push(vote);
    }

    /// Changes the direction of the vote keyed by `(user_id, target)`.
    ///
    /// Returns false if no such vote exists.
    pub fn retype_vote(&mut self, user_id: Uuid, target: Target, vote_type: VoteType) -> bool {
        match self.votes.iter_mut().find(|v| v.is_keyed_by(user_id, target)) {
            Some(vote) => {
                vote.vote_type = vote_type;
                true
            }
            None => false,
        }
    }

    /// Removes the vote keyed by `(user_id, target)`, preserving the order
    /// of the remaining votes.
    pub fn remove_vote(&mut self, user_id: Uuid, target: Target) -> Option<Vote> {
        let index = self.votes.iter().position(|v| v.is_keyed_by(user_id, target))?;
        Some(self.votes.remove(index))
    }
}
