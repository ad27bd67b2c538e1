//! Vote Ledger
//!
//! Applies the toggle state machine against the stored votes. Records are
//! only inserted when no record exists for the `(user, target)` key and
//! only the unique match is retyped or deleted, so the one-vote-per-user-
//! per-target invariant holds before and after every call.

use std::sync::Arc;

use uuid::Uuid;

use crate::model::{Target, User, Vote, VoteType};
use crate::store::{EntityStore, StoreError, StoreResult};

use super::transition::{LedgerEffect, VoteState};

/// Result of one `vote` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    pub previous: VoteState,
    pub current: VoteState,
    pub effect: LedgerEffect,
}

impl VoteOutcome {
    /// Whether the call removed the user's vote
    pub fn retracted(&self) -> bool {
        self.effect == LedgerEffect::Delete
    }
}

pub struct VoteLedger {
    store: Arc<EntityStore>,
}

impl VoteLedger {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }

    /// Toggles `user`'s vote on `target` and persists the result.
    ///
    /// # Errors
    ///
    /// `QRM_TARGET_NOT_FOUND` if the target does not exist; nothing is
    /// recorded in that case.
    pub fn vote(&self, user: &User, target: Target, action: VoteType) -> StoreResult<VoteOutcome> {
        let now = self.store.now();

        self.store.transact(|data| {
            if !data.target_exists(target) {
                return Err(StoreError::target_not_found(target.target_type, target.id));
            }

            let previous = VoteState::from_vote(data.find_vote(user.id, target).map(|v| v.vote_type));
            let (current, effect) = previous.apply(action);

            match effect {
                LedgerEffect::Insert(vote_type) => data.push_vote(Vote {
                    id: Uuid::new_v4(),
                    user_id: user.id,
                    target_id: target.id,
                    target_type: target.target_type,
                    vote_type,
                    created_at: now,
                }),
                LedgerEffect::Retype(vote_type) => {
                    data.retype_vote(user.id, target, vote_type);
                }
                LedgerEffect::Delete => {
                    data.remove_vote(user.id, target);
                }
            }

            Ok(VoteOutcome {
                previous,
                current,
                effect,
            })
        })
    }

    /// Returns `user_id`'s current vote on `target`, if any. No side effects.
    pub fn user_vote(&self, user_id: Uuid, target: Target) -> StoreResult<Option<VoteType>> {
        Ok(self
            .store
            .snapshot()?
            .find_vote(user_id, target)
            .map(|v| v.vote_type))
    }
}
