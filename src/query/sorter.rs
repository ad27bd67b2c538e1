//! Result ordering
//!
//! All sorts are stable: views with equal keys keep the order they came in,
//! which is storage (insertion) order. No secondary key is applied.

use crate::aggregate::{AnswerView, QuestionView};
use crate::model::SortOption;

pub struct ResultSorter;

impl ResultSorter {
    /// Sorts questions according to `option`, descending on its key.
    pub fn sort_questions(views: &mut [QuestionView], option: SortOption) {
        match option {
            SortOption::Latest => {
                views.sort_by(|a, b| b.record.created_at.cmp(&a.record.created_at))
            }
            SortOption::Popular => views.sort_by(|a, b| b.score.cmp(&a.score)),
            SortOption::MostAnswers => views.sort_by(|a, b| b.answer_count.cmp(&a.answer_count)),
        }
    }

    /// Sorts answers by score, highest first.
    pub fn sort_answers(views: &mut [AnswerView]) {
        views.sort_by(|a, b| b.score.cmp(&a.score));
    }
}
