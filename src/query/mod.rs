//! Query Engine subsystem for quorum
//!
//! # Execution Flow
//!
//! 1. Load one snapshot of the aggregate
//! 2. Derive views (scores, answer counts)
//! 3. Filter (search only)
//! 4. Apply a stable sort
//! 5. Return owned views

mod engine;
mod search;
mod sorter;

pub use engine::{answers, list, search, QueryEngine};
pub use search::SearchQuery;
pub use sorter::ResultSorter;
