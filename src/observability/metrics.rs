//! Operation counters
//!
//! - Counters only, monotonic
//! - Reset only when the engine is constructed
//! - Relaxed atomics; exactness per counter, not across counters

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Default)]
pub struct MetricsRegistry {
    questions_created: AtomicU64,
    answers_created: AtomicU64,
    votes_applied: AtomicU64,
    votes_retracted: AtomicU64,
    reads: AtomicU64,
    writes_rejected: AtomicU64,
    storage_failures: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_questions_created(&self) {
        self.questions_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_answers_created(&self) {
        self.answers_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_votes_applied(&self) {
        self.votes_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_votes_retracted(&self) {
        self.votes_retracted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_reads(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_writes_rejected(&self) {
        self.writes_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_storage_failures(&self) {
        self.storage_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            questions_created: self.questions_created.load(Ordering::Relaxed),
            answers_created: self.answers_created.load(Ordering::Relaxed),
            votes_applied: self.votes_applied.load(Ordering::Relaxed),
            votes_retracted: self.votes_retracted.load(Ordering::Relaxed),
            reads: self.reads.load(Ordering::Relaxed),
            writes_rejected: self.writes_rejected.load(Ordering::Relaxed),
            storage_failures: self.storage_failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of every counter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub questions_created: u64,
    pub answers_created: u64,
    pub votes_applied: u64,
    pub votes_retracted: u64,
    pub reads: u64,
    pub writes_rejected: u64,
    pub storage_failures: u64,
}
