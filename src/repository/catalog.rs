use chrono::Utc;
use diesel::prelude::*;

use crate::domain::category::CatalogSection;
use crate::domain::types::QuestionId;
use crate::repository::category::{insert_category, load_categories};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::question::{insert_question, load_questions_by_ids};
use crate::repository::{
    CatalogReader, CatalogSnapshot, CatalogWriter, DieselRepository, ImportCounts, StoreProbe,
};

impl CatalogReader for DieselRepository {
    fn catalog_snapshot(&self) -> RepositoryResult<CatalogSnapshot> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let categories = load_categories(conn)?;

            let mut referenced: Vec<QuestionId> = categories
                .iter()
                .flat_map(|c| c.question_ids.iter().copied())
                .collect();
            referenced.sort_unstable();
            referenced.dedup();

            let questions = load_questions_by_ids(conn, &referenced)?;

            Ok(CatalogSnapshot {
                categories,
                questions,
            })
        })
    }
}

impl CatalogWriter for DieselRepository {
    fn replace_catalog(&self, sections: &[CatalogSection]) -> RepositoryResult<ImportCounts> {
        use crate::schema::{categories, category_questions, question_tags, questions};

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let counts = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(category_questions::table).execute(conn)?;
            diesel::delete(categories::table).execute(conn)?;
            diesel::delete(question_tags::table).execute(conn)?;
            diesel::delete(questions::table).execute(conn)?;

            let mut counts = ImportCounts::default();
            for section in sections {
                // A category is only stored together with at least one question.
                if section.questions.is_empty() {
                    continue;
                }

                let mut question_ids = Vec::with_capacity(section.questions.len());
                for question in &section.questions {
                    question_ids.push(insert_question(conn, question, now)?);
                }
                insert_category(conn, &section.title, &question_ids, now)?;

                counts.questions += question_ids.len();
                counts.categories += 1;
            }

            Ok(counts)
        })?;

        Ok(counts)
    }
}

impl StoreProbe for DieselRepository {
    fn ping(&self) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        diesel::sql_query("SELECT 1").execute(&mut conn)?;
        Ok(())
    }
}
