use std::collections::HashMap;

use crate::domain::category::NewCategory;
use crate::domain::question::Question;
use crate::domain::types::{CategoryId, QuestionId};
use crate::dto::categories::{CategorizedQuestionDto, CategoryDto};
use crate::forms::questions::{QuestionSearchForm, QuestionSearchPayload};
use crate::repository::{CatalogReader, CategoryReader, CategoryWriter, QuestionReader};

use super::{ServiceError, ServiceResult};

/// Every category in creation order with its questions expanded.
///
/// Categories and questions are read together in one snapshot, and
/// references keep their stored order.
/// References to questions that no longer exist are skipped, and a category
/// without questions is returned with an empty list.
pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CatalogReader,
{
    let snapshot = repo.catalog_snapshot().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::from(e)
    })?;

    let by_id: HashMap<QuestionId, Question> = snapshot
        .questions
        .into_iter()
        .map(|q| (q.id, q))
        .collect();

    Ok(snapshot
        .categories
        .into_iter()
        .map(|category| CategoryDto::expand(category, |id| by_id.get(id)))
        .collect())
}

/// Question search where each hit names the category it belongs to.
pub fn search_categorized_questions<R>(
    form: QuestionSearchForm,
    repo: &R,
) -> ServiceResult<Vec<CategorizedQuestionDto>>
where
    R: CategoryReader + QuestionReader,
{
    let payload: QuestionSearchPayload = form.try_into()?;

    let questions = repo.search_questions(payload.into_query()).map_err(|e| {
        log::error!("Failed to search questions: {e}");
        ServiceError::from(e)
    })?;

    let ids: Vec<QuestionId> = questions.iter().map(|q| q.id).collect();
    let mut categories = repo.categories_for_questions(&ids).map_err(|e| {
        log::error!("Failed to resolve question categories: {e}");
        ServiceError::from(e)
    })?;

    Ok(questions
        .into_iter()
        .map(|question| CategorizedQuestionDto {
            category: categories.remove(&question.id),
            question,
        })
        .collect())
}

/// Stores a category referencing existing questions in the given order.
///
/// Every referenced question must exist; unknown identifiers are reported as
/// validation failures and nothing is written.
pub fn add_category<R>(category: NewCategory, repo: &R) -> ServiceResult<CategoryId>
where
    R: CategoryWriter + QuestionReader,
{
    let known = repo
        .get_questions_by_ids(&category.question_ids)
        .map_err(|e| {
            log::error!("Failed to resolve category questions: {e}");
            ServiceError::from(e)
        })?;

    let missing: Vec<String> = category
        .question_ids
        .iter()
        .filter(|id| !known.iter().any(|q| q.id == **id))
        .map(|id| format!("question {id} does not exist"))
        .collect();
    if !missing.is_empty() {
        return Err(ServiceError::Validation(missing));
    }

    match repo.create_category(&category) {
        Ok(id) => {
            log::info!("Created category {id} \"{}\"", category.title);
            Ok(id)
        }
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::question::QuestionLinks;
    use crate::domain::types::{CategoryId, CategoryTitle, QuestionTitle};
    use crate::repository::test::TestRepository;

    fn question(id: i32, title: &str) -> Question {
        Question {
            id: QuestionId::new(id).unwrap(),
            title: QuestionTitle::new(title).unwrap(),
            url: QuestionLinks::default(),
            tags: vec![],
        }
    }

    fn category(id: i32, title: &str, question_ids: &[i32]) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            title: CategoryTitle::new(title).unwrap(),
            question_ids: question_ids
                .iter()
                .map(|id| QuestionId::new(*id).unwrap())
                .collect(),
        }
    }

    #[test]
    fn expands_questions_in_stored_order() {
        let repo = TestRepository::new(
            vec![category(1, "Linked List", &[3, 1])],
            vec![question(1, "Reverse a Linked List"), question(3, "Detect a Cycle")],
        );

        let result = list_categories(&repo).unwrap();

        assert_eq!(result.len(), 1);
        let titles: Vec<&str> = result[0].questions.iter().map(|q| q.title.as_str()).collect();
        assert_eq!(titles, vec!["Detect a Cycle", "Reverse a Linked List"]);
    }

    #[test]
    fn skips_dangling_references_and_keeps_empty_categories() {
        let repo = TestRepository::new(
            vec![category(1, "Graphs", &[9]), category(2, "Empty", &[])],
            vec![question(1, "Orphan")],
        );

        let result = list_categories(&repo).unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|c| c.questions.is_empty()));
    }

    #[test]
    fn empty_store_yields_empty_list() {
        let repo = TestRepository::new(vec![], vec![]);
        assert!(list_categories(&repo).unwrap().is_empty());
    }

    #[test]
    fn duplicate_titles_stay_distinct() {
        let repo = TestRepository::new(
            vec![category(1, "Arrays", &[1]), category(2, "Arrays", &[2])],
            vec![question(1, "Two Sum"), question(2, "Three Sum")],
        );

        let result = list_categories(&repo).unwrap();

        assert_eq!(result.len(), 2);
        assert_ne!(result[0].id, result[1].id);
        assert_eq!(result[0].questions[0].title.as_str(), "Two Sum");
        assert_eq!(result[1].questions[0].title.as_str(), "Three Sum");
    }

    #[test]
    fn categorized_search_attaches_category_or_none() {
        let repo = TestRepository::new(
            vec![category(1, "Linked List", &[1])],
            vec![question(1, "Reverse a Linked List"), question(2, "Linked orphan")],
        );
        let form = QuestionSearchForm {
            search: Some("LINKED".into()),
            tags: None,
        };

        let result = search_categorized_questions(form, &repo).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(
            result[0].category.as_ref().map(|c| c.title.as_str()),
            Some("Linked List")
        );
        assert_eq!(result[1].category, None);
    }

    #[test]
    fn add_category_requires_known_questions() {
        let repo = TestRepository::new(
            vec![category(1, "Arrays", &[1])],
            vec![question(1, "Two Sum"), question(2, "Three Sum")],
        );
        let new = |ids: &[i32]| NewCategory {
            title: CategoryTitle::new("Favourites").unwrap(),
            question_ids: ids.iter().map(|id| QuestionId::new(*id).unwrap()).collect(),
        };

        assert_eq!(add_category(new(&[2, 1]), &repo).unwrap().get(), 2);
        assert_eq!(
            add_category(new(&[2, 7]), &repo).unwrap_err(),
            ServiceError::Validation(vec!["question 7 does not exist".to_string()])
        );
    }

    #[test]
    fn unavailable_store_is_reported() {
        let repo = TestRepository::unavailable();
        assert_eq!(
            list_categories(&repo).unwrap_err(),
            ServiceError::StoreUnavailable
        );
    }
}
