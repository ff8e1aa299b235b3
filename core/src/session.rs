use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::{CategoryIx, QuestionIx};
use crowns_protocol as wire;

/// One answered question, kept in play order. These are what gets written
/// to local storage and replayed on the next visit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnsweredRecord {
    pub category: CategoryIx,
    pub question: QuestionIx,
    pub selected: String,
    pub correct: bool,
}

impl From<&wire::SavedAnswer> for AnsweredRecord {
    fn from(saved: &wire::SavedAnswer) -> Self {
        Self {
            category: saved.category_index,
            question: saved.question_index,
            selected: saved.selected_option.clone(),
            correct: saved.correct,
        }
    }
}

impl From<&AnsweredRecord> for wire::SavedAnswer {
    fn from(record: &AnsweredRecord) -> Self {
        Self {
            category_index: record.category,
            question_index: record.question,
            selected_option: record.selected.clone(),
            correct: record.correct,
        }
    }
}
