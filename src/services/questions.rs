use crate::domain::question::{NewQuestion, Question};
use crate::domain::types::QuestionId;
use crate::forms::questions::{QuestionSearchForm, QuestionSearchPayload};
use crate::repository::{QuestionReader, QuestionWriter};

use super::{ServiceError, ServiceResult};

/// Every question, unfiltered, in creation order.
pub fn list_questions<R>(repo: &R) -> ServiceResult<Vec<Question>>
where
    R: QuestionReader,
{
    repo.list_questions().map_err(|e| {
        log::error!("Failed to list questions: {e}");
        ServiceError::from(e)
    })
}

/// Core business logic for the question search endpoint.
///
/// The title term is matched as a plain case-insensitive substring. A blank
/// or missing term matches every question, so the result equals
/// [`list_questions`] narrowed by the optional tag filter.
pub fn search_questions<R>(form: QuestionSearchForm, repo: &R) -> ServiceResult<Vec<Question>>
where
    R: QuestionReader,
{
    let payload: QuestionSearchPayload = form.try_into()?;

    match repo.search_questions(payload.into_query()) {
        Ok(questions) => {
            log::debug!("Question search matched {} item(s)", questions.len());
            Ok(questions)
        }
        Err(e) => {
            log::error!("Failed to search questions: {e}");
            Err(e.into())
        }
    }
}

/// Stores a single question outside of a bulk import.
pub fn add_question<R>(question: NewQuestion, repo: &R) -> ServiceResult<QuestionId>
where
    R: QuestionWriter,
{
    match repo.create_question(&question) {
        Ok(id) => {
            log::info!("Created question {id} \"{}\"", question.title);
            Ok(id)
        }
        Err(e) => {
            log::error!("Failed to create question: {e}");
            Err(e.into())
        }
    }
}

/// Deletes a question and every category reference to it.
pub fn delete_question<R>(question_id: i32, repo: &R) -> ServiceResult<()>
where
    R: QuestionWriter,
{
    let id = QuestionId::new(question_id).map_err(|_| ServiceError::NotFound)?;

    match repo.delete_question(id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete question {id}: {e}");
            Err(e.into())
        }
    }
}
