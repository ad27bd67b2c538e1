//! API Layer for quorum
//!
//! JSON in, JSON out. Each request names its operation in `op`:
//!
//! - current_user
//! - create_question
//! - create_answer
//! - vote
//! - user_vote
//! - list_questions
//! - get_question
//! - get_answers
//! - search_questions
//!
//! Engine error codes pass through unchanged.

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiErrorCode, ApiResult, Severity};
pub use handler::ApiHandler;
pub use request::{CreateAnswerRequest, CreateQuestionRequest, Request, TagInput, VoteRequest};
pub use response::{ErrorResponse, Response, SuccessResponse};
