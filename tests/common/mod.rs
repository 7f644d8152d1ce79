//! Helpers for integration tests.
#![allow(dead_code)]

use question_catalog::db::{DbPool, establish_connection_pool, run_migrations};
use question_catalog::domain::category::CatalogSection;
use question_catalog::domain::question::{NewQuestion, QuestionLinks};
use question_catalog::domain::types::{CategoryTitle, QuestionTitle, ResourceLink, Tag};
use tempfile::NamedTempFile;

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        run_migrations(&pool).expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

pub fn new_question(title: &str, yt_link: Option<&str>, tags: &[&str]) -> NewQuestion {
    NewQuestion {
        title: QuestionTitle::new(title).expect("valid title"),
        url: QuestionLinks {
            yt_link: yt_link.map(|l| ResourceLink::new(l).expect("valid link")),
            ..QuestionLinks::default()
        },
        tags: tags.iter().map(|t| Tag::new(*t).expect("valid tag")).collect(),
    }
}

pub fn section(title: &str, questions: Vec<NewQuestion>) -> CatalogSection {
    CatalogSection {
        title: CategoryTitle::new(title).expect("valid category title"),
        questions,
    }
}
