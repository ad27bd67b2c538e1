//! Observability subsystem for quorum
//!
//! - Structured logging (one JSON object per line on stderr)
//! - Typed events
//! - Operation counters
//!
//! Observability is read-only: it never changes the outcome of the
//! operation it observes.
//!
//! ```ignore
//! use quorum::observability::{Event, Logger, MetricsRegistry};
//!
//! Logger::info(Event::VoteApplied.as_str(), &[("target", "question:...")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_votes_applied();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
