use std::collections::HashMap;

use crate::db::{DbConnection, DbPool};
use crate::domain::category::{CatalogSection, Category, CategorySummary, NewCategory};
use crate::domain::question::{NewQuestion, Question};
use crate::domain::types::{CategoryId, QuestionId, SearchTerm, Tag};

use self::errors::RepositoryResult;

pub mod catalog;
pub mod category;
pub mod errors;
pub mod question;
#[cfg(test)]
pub mod test;

/// Largest number of bound parameters sent in one `IN (...)` clause.
const MAX_IN_CLAUSE: usize = 500;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Filters applied when searching questions.
#[derive(Debug, Clone, Default)]
pub struct QuestionSearchQuery {
    /// Title substring; `None` matches every question.
    pub term: Option<SearchTerm>,
    /// Keep questions carrying at least one of these tags. Empty disables the filter.
    pub tags: Vec<Tag>,
}

impl QuestionSearchQuery {
    pub fn term(mut self, term: SearchTerm) -> Self {
        self.term = Some(term);
        self
    }
    pub fn tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }
}

/// Number of rows written by a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportCounts {
    pub categories: usize,
    pub questions: usize,
}

/// Read-only operations for question entities.
pub trait QuestionReader {
    /// List every question in creation order.
    fn list_questions(&self) -> RepositoryResult<Vec<Question>>;
    /// List questions matching the title term and tag filter, in creation order.
    fn search_questions(&self, query: QuestionSearchQuery) -> RepositoryResult<Vec<Question>>;
    /// Fetch the questions with the given identifiers. Unknown identifiers are ignored.
    fn get_questions_by_ids(&self, ids: &[QuestionId]) -> RepositoryResult<Vec<Question>>;
}

/// Write operations for question entities.
pub trait QuestionWriter {
    /// Persist a new question with its tags.
    fn create_question(&self, question: &NewQuestion) -> RepositoryResult<QuestionId>;
    /// Delete a question, its tags and every category reference to it.
    fn delete_question(&self, id: QuestionId) -> RepositoryResult<usize>;
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List every category in creation order with its question references.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Map each question to the first category (lowest id) referencing it.
    /// Questions no category references are absent from the map.
    fn categories_for_questions(
        &self,
        ids: &[QuestionId],
    ) -> RepositoryResult<HashMap<QuestionId, CategorySummary>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category referencing existing questions.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<CategoryId>;
}

/// Categories together with the questions they reference, read at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    /// Every category in creation order.
    pub categories: Vec<Category>,
    /// Every question some category references, in creation order.
    pub questions: Vec<Question>,
}

/// Consistent reads spanning categories and questions.
pub trait CatalogReader {
    /// Load categories and their referenced questions in a single read transaction,
    /// so a concurrent re-seed cannot leave the references dangling.
    fn catalog_snapshot(&self) -> RepositoryResult<CatalogSnapshot>;
}

/// Bulk operations over the whole catalog.
pub trait CatalogWriter {
    /// Wipe every category and question, then import `sections` in one transaction.
    fn replace_catalog(&self, sections: &[CatalogSection]) -> RepositoryResult<ImportCounts>;
}

/// Reachability check for the backing store.
pub trait StoreProbe {
    fn ping(&self) -> RepositoryResult<()>;
}
