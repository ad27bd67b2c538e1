//! API Handler for quorum
//!
//! Parses one request, runs it against the engine, and shapes the result.
//! Writes are serialized by the entity store, so the handler can be shared
//! across threads without a lock of its own.

use serde::Serialize;
use serde_json::{json, Value};

use crate::forum::Forum;
use crate::model::Target;

use super::errors::{ApiError, ApiResult};
use super::request::{CreateQuestionRequest, Request, TagInput, VoteRequest};
use super::response::Response;

pub struct ApiHandler {
    forum: Forum,
}

impl ApiHandler {
    pub fn new(forum: Forum) -> Self {
        Self { forum }
    }

    pub fn forum(&self) -> &Forum {
        &self.forum
    }

    /// Handle a raw JSON request string
    pub fn handle(&self, json_request: &str) -> Response {
        self.respond(Request::parse(json_request))
    }

    /// Handle a request that was already decoded as JSON
    pub fn handle_value(&self, value: Value) -> Response {
        self.respond(Request::from_value(value))
    }

    fn respond(&self, request: ApiResult<Request>) -> Response {
        let result = request.and_then(|r| self.execute(r));
        match result {
            Ok(data) => Response::success(data),
            Err(e) => Response::error(&e),
        }
    }

    /// Runs a parsed request
    pub fn execute(&self, request: Request) -> ApiResult<Value> {
        match request {
            Request::CurrentUser => to_data(self.forum.current_user()?),
            Request::CreateQuestion(r) => self.handle_create_question(r),
            Request::CreateAnswer(r) => {
                to_data(self.forum.create_answer(r.question_id, r.content)?)
            }
            Request::Vote(r) => self.handle_vote(r),
            Request::UserVote {
                target_id,
                target_type,
            } => {
                let vote = self.forum.user_vote(target_id, target_type)?;
                Ok(json!({ "vote": vote }))
            }
            Request::ListQuestions { sort } => to_data(self.forum.list_questions(sort)?),
            Request::GetQuestion { id } => to_data(self.forum.get_question(id)?),
            Request::GetAnswers { question_id } => {
                to_data(self.forum.get_answers(question_id)?)
            }
            Request::SearchQuestions { query } => {
                to_data(self.forum.search_questions(&query)?)
            }
        }
    }

    fn handle_create_question(&self, req: CreateQuestionRequest) -> ApiResult<Value> {
        let view = match req.tags {
            TagInput::List(tags) => self.forum.create_question(req.title, req.content, tags)?,
            TagInput::Raw(raw) => {
                self.forum
                    .create_question_with_raw_tags(req.title, req.content, &raw)?
            }
        };
        to_data(view)
    }

    /// `applied` mirrors the engine's return value; `vote` is the state after the toggle.
    fn handle_vote(&self, req: VoteRequest) -> ApiResult<Value> {
        let target = Target::new(req.target_id, req.target_type);
        let outcome = self.forum.cast_vote(target, req.vote_type)?;
        Ok(json!({
            "applied": true,
            "vote": outcome.current.as_vote(),
        }))
    }
}

fn to_data<T: Serialize>(value: T) -> ApiResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::invalid_request(format!("Failed to serialize response: {}", e)))
}
