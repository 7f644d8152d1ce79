use std::cell::RefCell;
use std::collections::HashMap;

use crate::domain::category::{CatalogSection, Category, CategorySummary, NewCategory};
use crate::domain::question::{NewQuestion, Question};
use crate::domain::types::{CategoryId, QuestionId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CatalogReader, CatalogSnapshot, CatalogWriter, CategoryReader, CategoryWriter, ImportCounts,
    QuestionReader, QuestionSearchQuery, QuestionWriter, StoreProbe,
};

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    categories: Vec<Category>,
    questions: Vec<Question>,
    unavailable: bool,
    imported: RefCell<Vec<CatalogSection>>,
}

impl TestRepository {
    pub fn new(categories: Vec<Category>, questions: Vec<Question>) -> Self {
        Self {
            categories,
            questions,
            ..Self::default()
        }
    }

    /// A repository whose every call fails as if the store were down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Sections received by the last `replace_catalog` call.
    pub fn imported(&self) -> Vec<CatalogSection> {
        self.imported.borrow().clone()
    }

    fn check(&self) -> RepositoryResult<()> {
        if self.unavailable {
            Err(RepositoryError::Unavailable("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

impl QuestionReader for TestRepository {
    fn list_questions(&self) -> RepositoryResult<Vec<Question>> {
        self.check()?;
        Ok(self.questions.clone())
    }

    fn search_questions(&self, query: QuestionSearchQuery) -> RepositoryResult<Vec<Question>> {
        self.check()?;
        let mut items = self.questions.clone();
        if let Some(term) = &query.term {
            items.retain(|q| term.matches(q.title.as_str()));
        }
        if !query.tags.is_empty() {
            items.retain(|q| q.tags.iter().any(|t| query.tags.contains(t)));
        }
        Ok(items)
    }

    fn get_questions_by_ids(&self, ids: &[QuestionId]) -> RepositoryResult<Vec<Question>> {
        self.check()?;
        Ok(self
            .questions
            .iter()
            .filter(|q| ids.contains(&q.id))
            .cloned()
            .collect())
    }
}

impl QuestionWriter for TestRepository {
    fn create_question(&self, _question: &NewQuestion) -> RepositoryResult<QuestionId> {
        self.check()?;
        Ok(QuestionId::new(self.questions.len() as i32 + 1)?)
    }

    fn delete_question(&self, id: QuestionId) -> RepositoryResult<usize> {
        self.check()?;
        Ok(self.questions.iter().filter(|q| q.id == id).count())
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        self.check()?;
        Ok(self.categories.clone())
    }

    fn categories_for_questions(
        &self,
        ids: &[QuestionId],
    ) -> RepositoryResult<HashMap<QuestionId, CategorySummary>> {
        self.check()?;
        let mut summaries = HashMap::new();
        for category in &self.categories {
            for id in category.question_ids.iter().filter(|id| ids.contains(id)) {
                summaries.entry(*id).or_insert_with(|| CategorySummary {
                    id: category.id,
                    title: category.title.clone(),
                });
            }
        }
        Ok(summaries)
    }
}

impl CategoryWriter for TestRepository {
    fn create_category(&self, _category: &NewCategory) -> RepositoryResult<CategoryId> {
        self.check()?;
        Ok(CategoryId::new(self.categories.len() as i32 + 1)?)
    }
}

impl CatalogReader for TestRepository {
    fn catalog_snapshot(&self) -> RepositoryResult<CatalogSnapshot> {
        self.check()?;
        let questions = self
            .questions
            .iter()
            .filter(|q| self.categories.iter().any(|c| c.question_ids.contains(&q.id)))
            .cloned()
            .collect();
        Ok(CatalogSnapshot {
            categories: self.categories.clone(),
            questions,
        })
    }
}

impl CatalogWriter for TestRepository {
    fn replace_catalog(&self, sections: &[CatalogSection]) -> RepositoryResult<ImportCounts> {
        self.check()?;
        *self.imported.borrow_mut() = sections.to_vec();
        Ok(ImportCounts {
            categories: sections.len(),
            questions: sections.iter().map(|s| s.questions.len()).sum(),
        })
    }
}

impl StoreProbe for TestRepository {
    fn ping(&self) -> RepositoryResult<()> {
        self.check()
    }
}
