use serde::{Deserialize, Serialize};

use crate::domain::question::NewQuestion;
use crate::domain::types::{CategoryId, CategoryTitle, QuestionId};

/// Stored category record. `question_ids` are non-owning references kept in
/// display order; they are resolved into full questions at read time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub title: CategoryTitle,
    pub question_ids: Vec<QuestionId>,
}

/// Minimal category reference attached to search results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub title: CategoryTitle,
}

/// Data required to insert a new [`Category`] referencing existing questions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCategory {
    pub title: CategoryTitle,
    pub question_ids: Vec<QuestionId>,
}

/// One category of a bulk import together with the questions it introduces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSection {
    pub title: CategoryTitle,
    pub questions: Vec<NewQuestion>,
}
