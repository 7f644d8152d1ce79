use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::question::{NewQuestion as DomainNewQuestion, Question as DomainQuestion, QuestionLinks};
use crate::domain::types::{QuestionTitle, ResourceLink, Tag, TypeConstraintError};

/// Diesel model representing the `questions` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::questions)]
pub struct Question {
    pub id: i32,
    pub title: String,
    pub yt_link: Option<String>,
    pub p1_link: Option<String>,
    pub p2_link: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Question`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::questions)]
pub struct NewQuestion {
    pub title: String,
    pub yt_link: Option<String>,
    pub p1_link: Option<String>,
    pub p2_link: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Row of the `question_tags` table.
#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = crate::schema::question_tags)]
pub struct QuestionTag {
    pub question_id: i32,
    pub position: i32,
    pub tag: String,
}

fn link(value: Option<String>) -> Result<Option<ResourceLink>, TypeConstraintError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(ResourceLink::new)
        .transpose()
}

impl Question {
    /// Builds the domain record from the row and its tags, already in position order.
    pub fn into_domain(self, tags: Vec<String>) -> Result<DomainQuestion, TypeConstraintError> {
        Ok(DomainQuestion {
            id: self.id.try_into()?,
            title: QuestionTitle::new(self.title)?,
            url: QuestionLinks {
                yt_link: link(self.yt_link)?,
                p1_link: link(self.p1_link)?,
                p2_link: link(self.p2_link)?,
            },
            tags: tags
                .into_iter()
                .map(Tag::new)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

impl NewQuestion {
    pub fn from_domain(question: &DomainNewQuestion, created_at: NaiveDateTime) -> Self {
        Self {
            title: question.title.as_str().to_string(),
            yt_link: question.url.yt_link.as_ref().map(|l| l.as_str().to_string()),
            p1_link: question.url.p1_link.as_ref().map(|l| l.as_str().to_string()),
            p2_link: question.url.p2_link.as_ref().map(|l| l.as_str().to_string()),
            created_at,
        }
    }
}

/// Tag rows for a freshly inserted question, numbered in import order.
pub fn tag_rows(question_id: i32, tags: &[Tag]) -> Vec<QuestionTag> {
    tags.iter()
        .enumerate()
        .map(|(position, tag)| QuestionTag {
            question_id,
            position: position as i32,
            tag: tag.as_str().to_string(),
        })
        .collect()
}
