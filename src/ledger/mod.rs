//! Vote Ledger subsystem for quorum
//!
//! Enforces at most one vote record per `(user, target_id, target_type)`
//! and the three-state toggle: repeating a vote cancels it, the opposite
//! vote flips it.

#[allow(clippy::module_inception)]
mod ledger;
mod transition;

pub use ledger::{VoteLedger, VoteOutcome};
pub use transition::{LedgerEffect, VoteState};
