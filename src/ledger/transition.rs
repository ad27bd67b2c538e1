//! Vote toggle state machine
//!
//! Pure transition table for one `(user, target)` pair. The storage effect
//! is returned alongside the next state so the ledger can apply it without
//! re-deriving anything.

use crate::model::VoteType;

/// What a user currently has recorded on a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteState {
    NoVote,
    Upvoted,
    Downvoted,
}

/// Change to make to the single vote record for the pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEffect {
    /// No record exists; insert one with this direction
    Insert(VoteType),
    /// Flip the existing record to this direction
    Retype(VoteType),
    /// Remove the existing record
    Delete,
}

impl VoteState {
    pub fn from_vote(vote: Option<VoteType>) -> Self {
        match vote {
            None => VoteState::NoVote,
            Some(VoteType::Upvote) => VoteState::Upvoted,
            Some(VoteType::Downvote) => VoteState::Downvoted,
        }
    }

    pub fn as_vote(&self) -> Option<VoteType> {
        match self {
            VoteState::NoVote => None,
            VoteState::Upvoted => Some(VoteType::Upvote),
            VoteState::Downvoted => Some(VoteType::Downvote),
        }
    }

    /// Applies `action` and returns the next state with its ledger effect.
    ///
    /// Repeating the current direction cancels it; the opposite direction
    /// flips it.
    pub fn apply(self, action: VoteType) -> (VoteState, LedgerEffect) {
        match (self, action) {
            (VoteState::NoVote, VoteType::Upvote) => (VoteState::Upvoted, LedgerEffect::Insert(action)),
            (VoteState::NoVote, VoteType::Downvote) => {
                (VoteState::Downvoted, LedgerEffect::Insert(action))
            }
            (VoteState::Upvoted, VoteType::Upvote) => (VoteState::NoVote, LedgerEffect::Delete),
            (VoteState::Upvoted, VoteType::Downvote) => {
                (VoteState::Downvoted, LedgerEffect::Retype(action))
            }
            (VoteState::Downvoted, VoteType::Downvote) => (VoteState::NoVote, LedgerEffect::Delete),
            (VoteState::Downvoted, VoteType::Upvote) => {
                (VoteState::Upvoted, LedgerEffect::Retype(action))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_transition_table() {
        use LedgerEffect::*;
        use VoteState::*;
        use VoteType::*;

        let table = [
            (NoVote, Upvote, Upvoted, Insert(Upvote)),
            (NoVote, Downvote, Downvoted, Insert(Downvote)),
            (Upvoted, Upvote, NoVote, Delete),
            (Upvoted, Downvote, Downvoted, Retype(Downvote)),
            (Downvoted, Downvote, NoVote, Delete),
            (Downvoted, Upvote, Upvoted, Retype(Upvote)),
        ];

        for (state, action, next, effect) in table {
            assert_eq!(state.apply(action), (next, effect), "{:?} + {:?}", state, action);
        }
    }

    #[test]
    fn test_same_action_twice_returns_to_start() {
        for action in [VoteType::Upvote, VoteType::Downvote] {
            let (once, _) = VoteState::NoVote.apply(action);
            let (twice, _) = once.apply(action);
            assert_eq!(twice, VoteState::NoVote);
        }
    }

    #[test]
    fn test_state_vote_conversion() {
        for state in [VoteState::NoVote, VoteState::Upvoted, VoteState::Downvoted] {
            assert_eq!(VoteState::from_vote(state.as_vote()), state);
        }
    }
}
