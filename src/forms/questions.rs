use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{SearchTerm, Tag, TypeConstraintError, parse_tag_list};
use crate::forms::describe_validation_errors;
use crate::repository::QuestionSearchQuery;

/// Query string accepted by the search endpoints.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct QuestionSearchForm {
    /// Title substring. Missing or blank matches every question. The length
    /// cap is checked on the trimmed term by [`SearchTerm::parse`].
    pub search: Option<String>,
    /// Comma-separated tags; a question matches when it has any of them.
    #[validate(length(max = 1000, message = "tags must be at most 1000 characters"))]
    pub tags: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSearchPayload {
    pub term: Option<SearchTerm>,
    pub tags: Vec<Tag>,
}

impl QuestionSearchPayload {
    pub fn into_query(self) -> QuestionSearchQuery {
        QuestionSearchQuery {
            term: self.term,
            tags: self.tags,
        }
    }
}

#[derive(Debug, Error)]
pub enum QuestionSearchFormError {
    #[error("search parameters failed validation: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("search parameters contain invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for QuestionSearchFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(describe_validation_errors(&value))
    }
}

impl From<TypeConstraintError> for QuestionSearchFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<QuestionSearchForm> for QuestionSearchPayload {
    type Error = QuestionSearchFormError;

    fn try_from(value: QuestionSearchForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            term: SearchTerm::parse(value.search.as_deref())?,
            tags: value.tags.as_deref().map(parse_tag_list).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_form_matches_everything() {
        let payload: QuestionSearchPayload = QuestionSearchForm::default().try_into().unwrap();

        assert_eq!(payload.term, None);
        assert!(payload.tags.is_empty());
    }

    #[test]
    fn parses_term_and_tags() {
        let form = QuestionSearchForm {
            search: Some(" linked ".into()),
            tags: Some("list, pointers".into()),
        };

        let payload: QuestionSearchPayload = form.try_into().unwrap();

        assert_eq!(payload.term.unwrap().as_str(), "linked");
        let tags: Vec<&str> = payload.tags.iter().map(Tag::as_str).collect();
        assert_eq!(tags, vec!["list", "pointers"]);
    }

    #[test]
    fn rejects_overlong_term_with_rule_message() {
        let form = QuestionSearchForm {
            search: Some("a".repeat(201)),
            tags: None,
        };

        let err = QuestionSearchPayload::try_from(form).unwrap_err();

        match err {
            QuestionSearchFormError::TypeConstraint(rule) => {
                assert!(rule.contains("at most 200 characters"), "{rule}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn padding_does_not_count_towards_the_length_cap() {
        let form = QuestionSearchForm {
            search: Some(format!("   {}   ", "a".repeat(198))),
            tags: None,
        };

        let payload = QuestionSearchPayload::try_from(form).unwrap();

        assert_eq!(payload.term.unwrap().as_str(), "a".repeat(198));
    }

    #[test]
    fn rejects_overlong_tag_list() {
        let form = QuestionSearchForm {
            search: None,
            tags: Some("t,".repeat(501)),
        };

        assert!(matches!(
            QuestionSearchPayload::try_from(form).unwrap_err(),
            QuestionSearchFormError::Validation(_)
        ));
    }
}
