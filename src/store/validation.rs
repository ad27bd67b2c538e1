//! Boundary validation for new posts
//!
//! Lengths are counted in UTF-16 code units, so a character outside the
//! Basic Multilingual Plane counts twice. Limits apply to the text as
//! submitted; a field that is blank after trimming is reported as missing
//! rather than as too short.

use crate::model::{NewAnswer, NewQuestion};

use super::errors::{StoreError, StoreResult};

pub const TITLE_MIN_CHARS: usize = 10;
pub const TITLE_MAX_CHARS: usize = 300;
pub const CONTENT_MIN_CHARS: usize = 20;
pub const CONTENT_MAX_CHARS: usize = 5000;
pub const MAX_TAGS: usize = 5;
pub const TAG_MAX_CHARS: usize = 50;
/// Limit on the comma-separated tag string accepted by [`parse_tags`]
pub const RAW_TAGS_MAX_CHARS: usize = 500;

fn text_len(value: &str) -> usize {
    value.encode_utf16().count()
}

fn check_length(field: &'static str, value: &str, min: usize, max: usize) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::validation(field, "is required"));
    }
    let len = text_len(value);
    if len < min {
        return Err(StoreError::validation(
            field,
            format!("must be at least {} characters, got {}", min, len),
        ));
    }
    if len > max {
        return Err(StoreError::validation(
            field,
            format!("must be at most {} characters, got {}", max, len),
        ));
    }
    Ok(())
}

fn check_tags(tags: &[String]) -> StoreResult<()> {
    if tags.len() > MAX_TAGS {
        return Err(StoreError::validation(
            "tags",
            format!("at most {} tags allowed, got {}", MAX_TAGS, tags.len()),
        ));
    }
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(StoreError::validation("tags", "tags must not be blank"));
        }
        if text_len(trimmed) > TAG_MAX_CHARS {
            return Err(StoreError::validation(
                "tags",
                format!("tag '{}' exceeds {} characters", trimmed, TAG_MAX_CHARS),
            ));
        }
    }
    Ok(())
}

pub fn validate_question(input: &NewQuestion) -> StoreResult<()> {
    check_length("title", &input.title, TITLE_MIN_CHARS, TITLE_MAX_CHARS)?;
    check_length("content", &input.content, CONTENT_MIN_CHARS, CONTENT_MAX_CHARS)?;
    check_tags(&input.tags)
}

pub fn validate_answer(input: &NewAnswer) -> StoreResult<()> {
    check_length("content", &input.content, CONTENT_MIN_CHARS, CONTENT_MAX_CHARS)
}

/// Splits a comma-separated tag string.
///
/// Tags are trimmed, blanks are dropped, and only the first [`MAX_TAGS`]
/// are kept.
pub fn parse_tags(raw: &str) -> StoreResult<Vec<String>> {
    let len = text_len(raw);
    if len > RAW_TAGS_MAX_CHARS {
        return Err(StoreError::validation(
            "tags",
            format!("tag list must be at most {} characters, got {}", RAW_TAGS_MAX_CHARS, len),
        ));
    }

    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .take(MAX_TAGS)
        .map(str::to_string)
        .collect())
}
