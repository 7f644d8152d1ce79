use std::collections::HashMap;

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::db::unicode_lower;
use crate::domain::question::{NewQuestion, Question};
use crate::domain::types::QuestionId;
use crate::models::question::{
    NewQuestion as DbNewQuestion, Question as DbQuestion, QuestionTag, tag_rows,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    DieselRepository, MAX_IN_CLAUSE, QuestionReader, QuestionSearchQuery, QuestionWriter,
};

/// Wraps `term` for substring matching with `LIKE ... ESCAPE '\'`, escaping
/// `%`, `_` and `\` so they match literally.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn load_tags(
    conn: &mut SqliteConnection,
    ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<String>>> {
    use crate::schema::question_tags;

    let mut tags: HashMap<i32, Vec<String>> = HashMap::new();
    for chunk in ids.chunks(MAX_IN_CLAUSE) {
        let rows = question_tags::table
            .filter(question_tags::question_id.eq_any(chunk.to_vec()))
            .order((question_tags::question_id.asc(), question_tags::position.asc()))
            .load::<QuestionTag>(conn)?;
        for row in rows {
            tags.entry(row.question_id).or_default().push(row.tag);
        }
    }
    Ok(tags)
}

/// Attaches tags to loaded rows and converts them into domain questions.
fn into_domain(
    conn: &mut SqliteConnection,
    rows: Vec<DbQuestion>,
) -> RepositoryResult<Vec<Question>> {
    let ids: Vec<i32> = rows.iter().map(|q| q.id).collect();
    let mut tags = load_tags(conn, &ids)?;

    let questions = rows
        .into_iter()
        .map(|row| {
            let row_tags = tags.remove(&row.id).unwrap_or_default();
            row.into_domain(row_tags)
        })
        .collect::<Result<Vec<Question>, _>>()?;

    Ok(questions)
}

/// Loads the questions with the given identifiers. Unknown identifiers are ignored.
pub(crate) fn load_questions_by_ids(
    conn: &mut SqliteConnection,
    ids: &[QuestionId],
) -> RepositoryResult<Vec<Question>> {
    use crate::schema::questions;

    let raw_ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();
    let mut rows = Vec::with_capacity(raw_ids.len());
    for chunk in raw_ids.chunks(MAX_IN_CLAUSE) {
        rows.extend(
            questions::table
                .filter(questions::id.eq_any(chunk.to_vec()))
                .order(questions::id.asc())
                .load::<DbQuestion>(conn)?,
        );
    }

    into_domain(conn, rows)
}

/// Inserts a question and its tags, returning the new identifier.
pub(crate) fn insert_question(
    conn: &mut SqliteConnection,
    question: &NewQuestion,
    now: NaiveDateTime,
) -> QueryResult<i32> {
    use crate::schema::{question_tags, questions};

    let id = diesel::insert_into(questions::table)
        .values(DbNewQuestion::from_domain(question, now))
        .returning(questions::id)
        .get_result::<i32>(conn)?;

    let tags = tag_rows(id, &question.tags);
    if !tags.is_empty() {
        diesel::insert_into(question_tags::table)
            .values(&tags)
            .execute(conn)?;
    }

    Ok(id)
}

impl QuestionReader for DieselRepository {
    fn list_questions(&self) -> RepositoryResult<Vec<Question>> {
        use crate::schema::questions;

        let mut conn = self.conn()?;

        let rows = questions::table
            .order(questions::id.asc())
            .load::<DbQuestion>(&mut conn)?;

        into_domain(&mut conn, rows)
    }

    fn search_questions(&self, query: QuestionSearchQuery) -> RepositoryResult<Vec<Question>> {
        use crate::schema::{question_tags, questions};

        let mut conn = self.conn()?;

        let mut items = questions::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(term) = &query.term {
            items = items.filter(
                unicode_lower(questions::title)
                    .like(contains_pattern(&term.folded()))
                    .escape('\\'),
            );
        }

        if !query.tags.is_empty() {
            let tags: Vec<String> = query.tags.iter().map(|t| t.as_str().to_string()).collect();
            items = items.filter(
                questions::id.eq_any(
                    question_tags::table
                        .filter(question_tags::tag.eq_any(tags))
                        .select(question_tags::question_id),
                ),
            );
        }

        let rows = items
            .order(questions::id.asc())
            .load::<DbQuestion>(&mut conn)?;

        into_domain(&mut conn, rows)
    }

    fn get_questions_by_ids(&self, ids: &[QuestionId]) -> RepositoryResult<Vec<Question>> {
        let mut conn = self.conn()?;
        load_questions_by_ids(&mut conn, ids)
    }
}

impl QuestionWriter for DieselRepository {
    fn create_question(&self, question: &NewQuestion) -> RepositoryResult<QuestionId> {
        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let id = conn.transaction(|conn| insert_question(conn, question, now))?;

        Ok(QuestionId::new(id)?)
    }

    fn delete_question(&self, id: QuestionId) -> RepositoryResult<usize> {
        use crate::schema::{category_questions, question_tags, questions};

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let unlinked = diesel::delete(
                category_questions::table.filter(category_questions::question_id.eq(id.get())),
            )
            .execute(conn)?;
            if unlinked > 0 {
                log::info!("Removed {unlinked} category reference(s) to question {id}");
            }

            diesel::delete(question_tags::table.filter(question_tags::question_id.eq(id.get())))
                .execute(conn)?;

            diesel::delete(questions::table.filter(questions::id.eq(id.get()))).execute(conn)
        })?;

        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn pattern_wraps_plain_terms() {
        assert_eq!(contains_pattern("linked"), "%linked%");
    }

    #[test]
    fn pattern_escapes_like_metacharacters() {
        assert_eq!(contains_pattern("100%_a\\b"), "%100\\%\\_a\\\\b%");
    }
}
