//! API request types
//!
//! One JSON object per request, dispatched on its `op` field.

use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::model::{SortOption, TargetType, VoteType};

use super::errors::{ApiError, ApiResult};

/// How the tags of a new question were supplied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagInput {
    /// Already split
    List(Vec<String>),
    /// One comma-separated field, split by the engine
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateQuestionRequest {
    pub title: String,
    pub content: String,
    pub tags: TagInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAnswerRequest {
    pub question_id: Uuid,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteRequest {
    pub target_id: Uuid,
    pub target_type: TargetType,
    pub vote_type: VoteType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    CurrentUser,
    CreateQuestion(CreateQuestionRequest),
    CreateAnswer(CreateAnswerRequest),
    Vote(VoteRequest),
    UserVote { target_id: Uuid, target_type: TargetType },
    ListQuestions { sort: SortOption },
    GetQuestion { id: Uuid },
    GetAnswers { question_id: Uuid },
    SearchQuestions { query: String },
}

/// Raw request for parsing
#[derive(Debug, Clone, Default, Deserialize)]
struct RawRequest {
    op: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    raw_tags: Option<String>,
    #[serde(default)]
    question_id: Option<String>,
    #[serde(default)]
    target_id: Option<String>,
    #[serde(default)]
    target_type: Option<String>,
    #[serde(default)]
    vote_type: Option<String>,
    #[serde(default)]
    sort: Option<String>,
    #[serde(default)]
    query: Option<String>,
}

impl Request {
    /// Parse a request from a JSON string
    pub fn parse(json: &str) -> ApiResult<Self> {
        let raw: RawRequest = serde_json::from_str(json)
            .map_err(|e| ApiError::invalid_request(format!("Invalid JSON: {}", e)))?;
        Self::from_raw(raw)
    }

    /// Parse a request from an already decoded JSON value
    pub fn from_value(value: Value) -> ApiResult<Self> {
        let raw: RawRequest = serde_json::from_value(value)
            .map_err(|e| ApiError::invalid_request(format!("Invalid request: {}", e)))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawRequest) -> ApiResult<Self> {
        match raw.op.as_str() {
            "current_user" => Ok(Request::CurrentUser),
            "create_question" => {
                let tags = match (raw.tags, raw.raw_tags) {
                    (Some(_), Some(_)) => {
                        return Err(ApiError::invalid_request(
                            "Provide either tags or raw_tags, not both",
                        ))
                    }
                    (Some(list), None) => TagInput::List(list),
                    (None, Some(raw_tags)) => TagInput::Raw(raw_tags),
                    (None, None) => TagInput::List(Vec::new()),
                };

                Ok(Request::CreateQuestion(CreateQuestionRequest {
                    title: required(raw.title, "title")?,
                    content: required(raw.content, "content")?,
                    tags,
                }))
            }
            "create_answer" => Ok(Request::CreateAnswer(CreateAnswerRequest {
                question_id: uuid_field(raw.question_id, "question_id")?,
                content: required(raw.content, "content")?,
            })),
            "vote" => Ok(Request::Vote(VoteRequest {
                target_id: uuid_field(raw.target_id, "target_id")?,
                target_type: enum_field(raw.target_type, "target_type")?,
                vote_type: enum_field(raw.vote_type, "vote_type")?,
            })),
            "user_vote" => Ok(Request::UserVote {
                target_id: uuid_field(raw.target_id, "target_id")?,
                target_type: enum_field(raw.target_type, "target_type")?,
            }),
            "list_questions" => {
                let sort = match raw.sort {
                    Some(s) => parse_enum(&s, "sort")?,
                    None => SortOption::default(),
                };
                Ok(Request::ListQuestions { sort })
            }
            "get_question" => Ok(Request::GetQuestion {
                id: uuid_field(raw.id, "id")?,
            }),
            "get_answers" => Ok(Request::GetAnswers {
                question_id: uuid_field(raw.question_id, "question_id")?,
            }),
            "search_questions" => Ok(Request::SearchQuestions {
                query: raw.query.unwrap_or_default(),
            }),
            other => Err(ApiError::unknown_operation(other)),
        }
    }
}

fn required<T>(value: Option<T>, field: &str) -> ApiResult<T> {
    value.ok_or_else(|| ApiError::invalid_request(format!("Missing {}", field)))
}

fn uuid_field(value: Option<String>, field: &str) -> ApiResult<Uuid> {
    let s = required(value, field)?;
    Uuid::parse_str(&s)
        .map_err(|e| ApiError::invalid_request(format!("Invalid {}: {}", field, e)))
}

fn enum_field<T: FromStr<Err = String>>(value: Option<String>, field: &str) -> ApiResult<T> {
    parse_enum(&required(value, field)?, field)
}

fn parse_enum<T: FromStr<Err = String>>(s: &str, field: &str) -> ApiResult<T> {
    s.parse()
        .map_err(|e| ApiError::invalid_request(format!("Invalid {}: {}", field, e)))
}
