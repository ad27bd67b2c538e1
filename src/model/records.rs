//! Persisted entity records
//!
//! These are the authoritative stored shapes. Vote counts and answer counts
//! are absent: they only exist on the computed views in
//! `crate::aggregate`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::options::{Target, TargetType, VoteType};

/// Anonymous participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub display_name: String,
    pub color: String,
}

/// Author fields copied onto a post when it is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSnapshot {
    pub author_id: Uuid,
    pub author_name: String,
    pub author_color: String,
}

impl From<&User> for AuthorSnapshot {
    fn from(user: &User) -> Self {
        Self {
            author_id: user.id,
            author_name: user.display_name.clone(),
            author_color: user.color.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub author: AuthorSnapshot,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub id: Uuid,
    pub question_id: Uuid,
    pub content: String,
    #[serde(flatten)]
    pub author: AuthorSnapshot,
    pub created_at: DateTime<Utc>,
}

/// One user's vote on one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target_id: Uuid,
    pub target_type: TargetType,
    #[serde(rename = "type")]
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    pub fn target(&self) -> Target {
        Target::new(self.target_id, self.target_type)
    }

    /// Whether this vote is keyed by `(user_id, target)`
    pub fn is_keyed_by(&self, user_id: Uuid, target: Target) -> bool {
        self.user_id == user_id
            && self.target_id == target.id
            && self.target_type == target.target_type
    }
}

/// Input for creating a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Input for creating an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAnswer {
    pub question_id: Uuid,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_question_wire_layout() {
        let question = QuestionRecord {
            id: Uuid::nil(),
            title: "How do lifetimes work?".to_string(),
            content: "I keep fighting the borrow checker.".to_string(),
            tags: vec!["rust".to_string()],
            author: AuthorSnapshot {
                author_id: Uuid::nil(),
                author_name: "Anonymous User #0042".to_string(),
                author_color: "#3b82f6".to_string(),
            },
            created_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        };

        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["authorName"], json!("Anonymous User #0042"));
        assert_eq!(value["authorColor"], json!("#3b82f6"));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("score").is_none());
        assert!(value.get("answerCount").is_none());

        let back: QuestionRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, question);
    }

    #[test]
    fn test_vote_type_field_named_type() {
        let vote = Vote {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            target_id: Uuid::nil(),
            target_type: TargetType::Answer,
            vote_type: VoteType::Upvote,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        };

        let value = serde_json::to_value(&vote).unwrap();
        assert_eq!(value["type"], json!("upvote"));
        assert_eq!(value["targetType"], json!("answer"));
    }
}
