//! Enumerations shared across the engine and the wire format

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of entity a vote is cast on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Question,
    Answer,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Question => "question",
            TargetType::Answer => "answer",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "question" => Ok(TargetType::Question),
            "answer" => Ok(TargetType::Answer),
            other => Err(format!("unknown target type: {}", other)),
        }
    }
}

/// Direction of a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Upvote => "upvote",
            VoteType::Downvote => "downvote",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upvote" => Ok(VoteType::Upvote),
            "downvote" => Ok(VoteType::Downvote),
            other => Err(format!("unknown vote type: {}", other)),
        }
    }
}

/// Ordering applied by `list_questions`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Newest first
    #[default]
    Latest,
    /// Highest score first
    Popular,
    /// Most answers first
    MostAnswers,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Latest => "latest",
            SortOption::Popular => "popular",
            SortOption::MostAnswers => "most-answers",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(SortOption::Latest),
            "popular" => Ok(SortOption::Popular),
            "most-answers" => Ok(SortOption::MostAnswers),
            other => Err(format!("unknown sort option: {}", other)),
        }
    }
}

/// A vote target, identified by id and kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    pub id: Uuid,
    pub target_type: TargetType,
}

impl Target {
    pub fn new(id: Uuid, target_type: TargetType) -> Self {
        Self { id, target_type }
    }

    pub fn question(id: Uuid) -> Self {
        Self::new(id, TargetType::Question)
    }

    pub fn answer(id: Uuid) -> Self {
        Self::new(id, TargetType::Answer)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.target_type, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_option_wire_names() {
        assert_eq!(
            serde_json::to_string(&SortOption::MostAnswers).unwrap(),
            "\"most-answers\""
        );
        assert_eq!("popular".parse::<SortOption>().unwrap(), SortOption::Popular);
        assert!("oldest".parse::<SortOption>().is_err());
        assert_eq!(SortOption::default(), SortOption::Latest);
    }

    #[test]
    fn test_vote_and_target_wire_names() {
        assert_eq!(serde_json::to_string(&VoteType::Downvote).unwrap(), "\"downvote\"");
        assert_eq!(serde_json::to_string(&TargetType::Answer).unwrap(), "\"answer\"");
        assert_eq!("upvote".parse::<VoteType>().unwrap(), VoteType::Upvote);
        assert!("Question".parse::<TargetType>().is_err());
    }
}
