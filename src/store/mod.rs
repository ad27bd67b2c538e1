//! Entity Store subsystem for quorum
//!
//! Owns the four collections (questions, answers, votes, users) and is the
//! only path to the persistence medium for them.
//!
//! # Invariants
//!
//! - Input is validated before any mutation is attempted
//! - Answers reference an existing question
//! - Each mutating call persists the whole aggregate or nothing
//! - Reads hand out owned copies

mod entity_store;
mod errors;
mod validation;

pub use entity_store::{EntityStore, FORUM_DATA_KEY};
pub use errors::{StoreError, StoreResult};
pub use validation::{
    parse_tags, validate_answer, validate_question, CONTENT_MAX_CHARS, CONTENT_MIN_CHARS, MAX_TAGS,
    RAW_TAGS_MAX_CHARS, TAG_MAX_CHARS, TITLE_MAX_CHARS, TITLE_MIN_CHARS,
};
