use std::collections::HashMap;

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::category::{Category, CategorySummary, NewCategory};
use crate::domain::types::{CategoryId, CategoryTitle, QuestionId};
use crate::models::category::{
    Category as DbCategory, CategoryQuestion, NewCategory as DbNewCategory, link_rows,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository, MAX_IN_CLAUSE};

/// Loads every category in creation order with its ordered question references.
pub(crate) fn load_categories(conn: &mut SqliteConnection) -> RepositoryResult<Vec<Category>> {
    use crate::schema::{categories, category_questions};

    let rows = categories::table
        .order(categories::id.asc())
        .load::<DbCategory>(conn)?;

    let links = category_questions::table
        .order((
            category_questions::category_id.asc(),
            category_questions::position.asc(),
        ))
        .load::<CategoryQuestion>(conn)?;

    let mut question_ids: HashMap<i32, Vec<i32>> = HashMap::new();
    for link in links {
        question_ids
            .entry(link.category_id)
            .or_default()
            .push(link.question_id);
    }

    let categories = rows
        .into_iter()
        .map(|row| {
            let ids = question_ids.remove(&row.id).unwrap_or_default();
            row.into_domain(ids)
        })
        .collect::<Result<Vec<Category>, _>>()?;

    Ok(categories)
}

/// Inserts a category and its ordered question references, returning the new identifier.
pub(crate) fn insert_category(
    conn: &mut SqliteConnection,
    title: &CategoryTitle,
    question_ids: &[i32],
    now: NaiveDateTime,
) -> QueryResult<i32> {
    use crate::schema::{categories, category_questions};

    let id = diesel::insert_into(categories::table)
        .values(DbNewCategory {
            title: title.as_str().to_string(),
            created_at: now,
        })
        .returning(categories::id)
        .get_result::<i32>(conn)?;

    let links = link_rows(id, question_ids);
    if !links.is_empty() {
        diesel::insert_into(category_questions::table)
            .values(&links)
            .execute(conn)?;
    }

    Ok(id)
}

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        let mut conn = self.conn()?;
        load_categories(&mut conn)
    }

    fn categories_for_questions(
        &self,
        ids: &[QuestionId],
    ) -> RepositoryResult<HashMap<QuestionId, CategorySummary>> {
        use crate::schema::{categories, category_questions};

        let mut conn = self.conn()?;

        let raw_ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();
        let mut summaries = HashMap::new();
        for chunk in raw_ids.chunks(MAX_IN_CLAUSE) {
            let rows: Vec<(i32, i32, String)> = category_questions::table
                .inner_join(categories::table)
                .filter(category_questions::question_id.eq_any(chunk.to_vec()))
                .select((
                    category_questions::question_id,
                    categories::id,
                    categories::title,
                ))
                .order(categories::id.asc())
                .load(&mut conn)?;

            for (question_id, category_id, title) in rows {
                let question_id = QuestionId::new(question_id)?;
                if summaries.contains_key(&question_id) {
                    continue;
                }
                summaries.insert(
                    question_id,
                    CategorySummary {
                        id: CategoryId::new(category_id)?,
                        title: CategoryTitle::new(title)?,
                    },
                );
            }
        }

        Ok(summaries)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<CategoryId> {
        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();
        let question_ids: Vec<i32> = category.question_ids.iter().map(|id| id.get()).collect();

        let id = conn.transaction(|conn| insert_category(conn, &category.title, &question_ids, now))?;

        Ok(CategoryId::new(id)?)
    }
}
