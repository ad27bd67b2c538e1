//! Text search over questions
//!
//! Case-insensitive substring match against title, content, and tags. The
//! needle is lowercased as given; only an all-whitespace query is treated as
//! "no filter".

use crate::model::QuestionRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: Option<String>,
}

impl SearchQuery {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self { needle: None };
        }
        Self {
            needle: Some(raw.to_lowercase()),
        }
    }

    /// Whether this query filters nothing out
    pub fn is_blank(&self) -> bool {
        self.needle.is_none()
    }

    pub fn matches(&self, question: &QuestionRecord) -> bool {
        let needle = match &self.needle {
            Some(needle) => needle.as_str(),
            None => return true,
        };

        question.title.to_lowercase().contains(needle)
            || question.content.to_lowercase().contains(needle)
            || question
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}
