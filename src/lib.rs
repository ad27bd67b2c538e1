//! quorum - anonymous Q&A persistence and ranking engine
//!
//! Questions, answers and toggle votes stored as one aggregate on a
//! pluggable medium, with scores and answer counts derived on read.

pub mod aggregate;
pub mod api;
pub mod cli;
pub mod clock;
pub mod config;
pub mod forum;
pub mod identity;
pub mod ledger;
pub mod model;
pub mod observability;
pub mod query;
pub mod storage;
pub mod store;

pub use config::Config;
pub use forum::Forum;
