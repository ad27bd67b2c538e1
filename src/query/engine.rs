//! Query Engine
//!
//! Every read loads one snapshot of the aggregate, derives views through
//! `crate::aggregate`, then orders or filters them.

use std::sync::Arc;

use uuid::Uuid;

use crate::aggregate::{answer_views, question_view, question_views, AnswerView, QuestionView};
use crate::model::{ForumData, SortOption};
use crate::store::{EntityStore, StoreResult};

use super::search::SearchQuery;
use super::sorter::ResultSorter;

/// Questions ordered by `option`
pub fn list(data: &ForumData, option: SortOption) -> Vec<QuestionView> {
    let mut views = question_views(data);
    ResultSorter::sort_questions(&mut views, option);
    views
}

/// Questions matching `query`, in `latest` order
pub fn search(data: &ForumData, query: &SearchQuery) -> Vec<QuestionView> {
    let latest = list(data, SortOption::Latest);
    if query.is_blank() {
        return latest;
    }
    latest
        .into_iter()
        .filter(|view| query.matches(&view.record))
        .collect()
}

/// Answers to `question_id`, highest score first
pub fn answers(data: &ForumData, question_id: Uuid) -> Vec<AnswerView> {
    let mut views = answer_views(data, question_id);
    ResultSorter::sort_answers(&mut views);
    views
}

pub struct QueryEngine {
    store: Arc<EntityStore>,
}

impl QueryEngine {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }

    pub fn list_questions(&self, option: SortOption) -> StoreResult<Vec<QuestionView>> {
        Ok(list(&self.store.snapshot()?, option))
    }

    pub fn search_questions(&self, raw: &str) -> StoreResult<Vec<QuestionView>> {
        Ok(search(&self.store.snapshot()?, &SearchQuery::parse(raw)))
    }

    pub fn get_question(&self, id: Uuid) -> StoreResult<Option<QuestionView>> {
        let data = self.store.snapshot()?;
        Ok(data.question(id).map(|q| question_view(&data, q)))
    }

    /// Empty when the question does not exist
    pub fn get_answers(&self, question_id: Uuid) -> StoreResult<Vec<AnswerView>> {
        Ok(answers(&self.store.snapshot()?, question_id))
    }
}
