use serde::{Deserialize, Serialize};

use crate::domain::category::{Category, CategorySummary};
use crate::domain::question::Question;
use crate::domain::types::{CategoryId, CategoryTitle, QuestionId};

/// Category with its question references expanded, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: CategoryId,
    pub title: CategoryTitle,
    pub questions: Vec<Question>,
}

impl CategoryDto {
    /// Expands the category references using `lookup`, keeping stored order.
    /// References with no matching question are skipped.
    pub fn expand<'a>(
        category: Category,
        lookup: impl Fn(&QuestionId) -> Option<&'a Question>,
    ) -> Self {
        let questions = category
            .question_ids
            .iter()
            .filter_map(|id| lookup(id).cloned())
            .collect();

        Self {
            id: category.id,
            title: category.title,
            questions,
        }
    }
}

/// Search hit together with the category it is filed under, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedQuestionDto {
    #[serde(flatten)]
    pub question: Question,
    pub category: Option<CategorySummary>,
}
