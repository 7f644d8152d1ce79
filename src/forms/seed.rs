//! Parsing and validation of bulk-import documents.
//!
//! A seed document has the shape
//! `{ "data": [ { "title": ..., "ques": [ { "title": ..., "yt_link": ..., "tags": "a, b" } ] } ] }`.
//! Invalid entries are skipped and reported instead of aborting the import.
//! Links are stored as given; ones that do not parse as absolute URLs are
//! kept and only reported.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::category::CatalogSection;
use crate::domain::question::{NewQuestion, QuestionLinks};
use crate::domain::types::{CategoryTitle, QuestionTitle, ResourceLink, Tag, parse_tag_list};

#[derive(Debug, Default, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub data: Vec<SeedCategory>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeedCategory {
    pub title: Option<String>,
    #[serde(default)]
    pub ques: Vec<SeedQuestion>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeedQuestion {
    pub title: Option<String>,
    pub yt_link: Option<String>,
    pub p1_link: Option<String>,
    pub p2_link: Option<String>,
    pub tags: Option<SeedTags>,
}

/// Tags arrive either as one comma-separated string or as a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SeedTags {
    Joined(String),
    List(Vec<String>),
}

impl SeedTags {
    fn into_tags(self) -> Vec<Tag> {
        match self {
            Self::Joined(raw) => parse_tag_list(&raw),
            Self::List(items) => items.into_iter().filter_map(|t| Tag::new(t).ok()).collect(),
        }
    }
}

/// Something left out of the import, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedIssue {
    /// 1-based position of the category in the document.
    pub category_number: usize,
    /// 1-based position of the question within its category, if the issue is about a question.
    pub question_number: Option<usize>,
    pub message: String,
}

/// Validated import ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPlan {
    pub sections: Vec<CatalogSection>,
    pub issues: Vec<SeedIssue>,
    /// Questions dropped because they had no usable title.
    pub skipped_questions: usize,
    /// Categories dropped for a missing title or having no valid question.
    pub skipped_categories: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedDocumentError {
    #[error("seed document contains no categories")]
    Empty,
    #[error("seed document is not valid JSON: {0}")]
    Malformed(String),
}

impl SeedDocument {
    pub fn from_json(raw: &str) -> Result<Self, SeedDocumentError> {
        serde_json::from_str(raw).map_err(|e| SeedDocumentError::Malformed(e.to_string()))
    }

    /// Validates every entry, keeping what is importable.
    pub fn into_plan(self) -> Result<SeedPlan, SeedDocumentError> {
        if self.data.is_empty() {
            return Err(SeedDocumentError::Empty);
        }

        let mut plan = SeedPlan {
            sections: Vec::with_capacity(self.data.len()),
            issues: Vec::new(),
            skipped_questions: 0,
            skipped_categories: 0,
        };

        for (index, category) in self.data.into_iter().enumerate() {
            let category_number = index + 1;

            let title = match category.title.map(CategoryTitle::new) {
                Some(Ok(title)) => title,
                Some(Err(_)) | None => {
                    plan.skipped_categories += 1;
                    plan.issues.push(SeedIssue {
                        category_number,
                        question_number: None,
                        message: "category has no title".to_string(),
                    });
                    continue;
                }
            };

            let mut questions = Vec::with_capacity(category.ques.len());
            for (question_index, question) in category.ques.into_iter().enumerate() {
                let question_number = Some(question_index + 1);
                let mut report = |message: String| {
                    plan.issues.push(SeedIssue {
                        category_number,
                        question_number,
                        message,
                    })
                };

                let Some(question_title) = question
                    .title
                    .and_then(|t| QuestionTitle::new(t).ok())
                else {
                    plan.skipped_questions += 1;
                    report("question has no title".to_string());
                    continue;
                };

                let mut link = |field: &str, value: Option<String>| -> Option<ResourceLink> {
                    let link = ResourceLink::new(value?).ok()?;
                    if !link.is_web_url() {
                        report(format!(
                            "kept {field} of \"{question_title}\" although it is not an absolute URL"
                        ));
                    }
                    Some(link)
                };

                let url = QuestionLinks {
                    yt_link: link("yt_link", question.yt_link),
                    p1_link: link("p1_link", question.p1_link),
                    p2_link: link("p2_link", question.p2_link),
                };

                questions.push(NewQuestion {
                    title: question_title,
                    url,
                    tags: question.tags.map(SeedTags::into_tags).unwrap_or_default(),
                });
            }

            if questions.is_empty() {
                plan.skipped_categories += 1;
                plan.issues.push(SeedIssue {
                    category_number,
                    question_number: None,
                    message: format!("category \"{title}\" has no valid questions"),
                });
                continue;
            }

            plan.sections.push(CatalogSection { title, questions });
        }

        Ok(plan)
    }
}
