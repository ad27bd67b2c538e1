//! Data model for quorum
//!
//! Persisted records, the aggregate that holds them, and the small enums
//! shared by every layer. Wire names follow the camelCase layout of the
//! persisted blob (`authorId`, `createdAt`, `targetType`, ...).

mod data;
mod options;
mod records;

pub use data::ForumData;
pub use options::{SortOption, Target, TargetType, VoteType};
pub use records::{AnswerRecord, AuthorSnapshot, NewAnswer, NewQuestion, QuestionRecord, User, Vote};
