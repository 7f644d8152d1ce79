use serde::Serialize;

use crate::forms::seed::{SeedDocument, SeedIssue};
use crate::repository::CatalogWriter;

use super::{ServiceError, ServiceResult};

/// Outcome of a bulk import.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SeedReport {
    pub categories_created: usize,
    pub questions_created: usize,
    pub categories_skipped: usize,
    pub questions_skipped: usize,
    /// Skipped entries, plus links kept even though they are not absolute URLs.
    pub issues: Vec<SeedIssue>,
}

/// Replaces the whole catalog with the contents of `document`.
///
/// The document is validated before anything is written: untitled questions
/// and categories left without a valid question are skipped and reported. A
/// document with no categories is rejected and the store stays untouched.
pub fn seed_catalog<R>(document: SeedDocument, repo: &R) -> ServiceResult<SeedReport>
where
    R: CatalogWriter,
{
    let plan = document.into_plan()?;

    for issue in &plan.issues {
        log::warn!(
            "Seed category #{} question #{}: {}",
            issue.category_number,
            issue
                .question_number
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
            issue.message
        );
    }

    let counts = repo.replace_catalog(&plan.sections).map_err(|e| {
        log::error!("Failed to import catalog: {e}");
        ServiceError::from(e)
    })?;

    log::info!(
        "Seeded {} categories with {} questions",
        counts.categories,
        counts.questions
    );

    Ok(SeedReport {
        categories_created: counts.categories,
        questions_created: counts.questions,
        categories_skipped: plan.skipped_categories,
        questions_skipped: plan.skipped_questions,
        issues: plan.issues,
    })
}
