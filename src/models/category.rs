use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::Category as DomainCategory;
use crate::domain::types::{CategoryTitle, QuestionId, TypeConstraintError};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub title: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Category`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub title: String,
    pub created_at: NaiveDateTime,
}

/// Row of the `category_questions` link table.
#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = crate::schema::category_questions)]
pub struct CategoryQuestion {
    pub category_id: i32,
    pub position: i32,
    pub question_id: i32,
}

impl Category {
    /// Builds the domain record from the row and its question references in position order.
    pub fn into_domain(self, question_ids: Vec<i32>) -> Result<DomainCategory, TypeConstraintError> {
        Ok(DomainCategory {
            id: self.id.try_into()?,
            title: CategoryTitle::new(self.title)?,
            question_ids: question_ids
                .into_iter()
                .map(QuestionId::new)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

/// Link rows for a category, numbered in display order.
pub fn link_rows(category_id: i32, question_ids: &[i32]) -> Vec<CategoryQuestion> {
    question_ids
        .iter()
        .enumerate()
        .map(|(position, question_id)| CategoryQuestion {
            category_id,
            position: position as i32,
            question_id: *question_id,
        })
        .collect()
}
