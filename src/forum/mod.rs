//! Engine facade
//!
//! [`Forum`] is what callers hold. It resolves the current user, routes
//! each operation to the store, ledger or query engine, and records the
//! outcome in the logger and metrics.
//!
//! ```ignore
//! let forum = Forum::open(&Config::new("./data"))?;
//! let q = forum.create_question("Why does X fail?", "...", vec!["debugging".into()])?;
//! forum.vote(q.id(), TargetType::Question, VoteType::Upvote)?;
//! ```

mod engine;

pub use engine::Forum;
