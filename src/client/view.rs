//! State machine behind the catalog browsing screen.
//!
//! The view starts in [`ViewState::Loading`], shows categories while
//! [`ViewState::Browsing`] and switches to [`ViewState::Searching`] once a
//! search result arrives for a non-empty query. Rendering and transport are
//! left to the caller: methods that need a network call return what to fetch,
//! and the caller reports the outcome back.
//!
//! Searches are never cancelled. Each one is issued with a [`SearchTicket`]
//! and only the response carrying the most recent ticket is applied, so a
//! slow older response cannot overwrite newer results.

use std::collections::HashSet;

use crate::domain::question::Question;
use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;

/// Categories expanded when the list first loads.
pub const DEFAULT_PRE_EXPANDED: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    /// Category load failed; the message is shown with a retry action.
    Error(String),
    Browsing,
    Searching,
}

/// Sequence number attached to an outgoing search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

/// Request the caller must send for a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: SearchTicket,
    pub term: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Applied,
    /// A newer search was issued or the query was cleared; the response was dropped.
    Stale,
}

#[derive(Debug, Clone)]
pub struct CatalogView {
    state: ViewState,
    categories: Vec<CategoryDto>,
    expanded: HashSet<CategoryId>,
    pre_expanded: usize,
    query: String,
    results: Vec<Question>,
    search_error: Option<String>,
    last_issued: u64,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new(DEFAULT_PRE_EXPANDED)
    }
}

impl CatalogView {
    /// Creates a view in the loading state. The caller fetches categories next.
    pub fn new(pre_expanded: usize) -> Self {
        Self {
            state: ViewState::Loading,
            categories: Vec::new(),
            expanded: HashSet::new(),
            pre_expanded,
            query: String::new(),
            results: Vec::new(),
            search_error: None,
            last_issued: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn categories(&self) -> &[CategoryDto] {
        &self.categories
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Question] {
        &self.results
    }

    /// Message of the last failed search, cleared by the next successful one.
    pub fn search_error(&self) -> Option<&str> {
        self.search_error.as_deref()
    }

    pub fn is_expanded(&self, id: CategoryId) -> bool {
        self.expanded.contains(&id)
    }

    /// Records the outcome of the category fetch.
    pub fn categories_loaded(&mut self, result: Result<Vec<CategoryDto>, String>) {
        if self.state != ViewState::Loading {
            log::debug!("Ignoring category load outside the loading state");
            return;
        }

        match result {
            Ok(categories) => {
                self.expanded = categories
                    .iter()
                    .take(self.pre_expanded)
                    .map(|c| c.id)
                    .collect();
                self.categories = categories;
                self.state = ViewState::Browsing;
            }
            Err(message) => {
                log::error!("Failed to load categories: {message}");
                self.state = ViewState::Error(message);
            }
        }
    }

    /// Leaves the error state. Returns `true` when the caller should fetch
    /// categories again.
    pub fn retry(&mut self) -> bool {
        if matches!(self.state, ViewState::Error(_)) {
            self.state = ViewState::Loading;
            true
        } else {
            false
        }
    }

    /// Updates the search box. Returns the search to send, if any.
    ///
    /// A blank query returns to browsing at once without a request and
    /// invalidates every outstanding search.
    pub fn set_query(&mut self, query: &str) -> Option<SearchRequest> {
        self.query = query.to_string();

        let term = query.trim();
        if term.is_empty() {
            self.last_issued += 1;
            self.results.clear();
            self.search_error = None;
            if self.state == ViewState::Searching {
                self.state = ViewState::Browsing;
            }
            return None;
        }

        if !matches!(self.state, ViewState::Browsing | ViewState::Searching) {
            return None;
        }

        self.last_issued += 1;
        Some(SearchRequest {
            ticket: SearchTicket(self.last_issued),
            term: term.to_string(),
        })
    }

    /// Records a search response. Only the latest issued ticket is applied.
    pub fn search_finished(
        &mut self,
        ticket: SearchTicket,
        result: Result<Vec<Question>, String>,
    ) -> SearchOutcome {
        if ticket.0 != self.last_issued {
            log::debug!("Dropping stale search response #{}", ticket.0);
            return SearchOutcome::Stale;
        }

        match result {
            Ok(questions) => {
                self.results = questions;
                self.search_error = None;
                self.state = ViewState::Searching;
            }
            Err(message) => {
                log::warn!("Search failed: {message}");
                self.search_error = Some(message);
            }
        }
        SearchOutcome::Applied
    }

    /// Opens or closes one category without touching the others.
    pub fn toggle(&mut self, id: CategoryId) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::question::QuestionLinks;
    use crate::domain::types::{CategoryTitle, QuestionId, QuestionTitle};

    fn category(id: i32, title: &str) -> CategoryDto {
        CategoryDto {
            id: CategoryId::new(id).unwrap(),
            title: CategoryTitle::new(title).unwrap(),
            questions: vec![],
        }
    }

    fn question(id: i32, title: &str) -> Question {
        Question {
            id: QuestionId::new(id).unwrap(),
            title: QuestionTitle::new(title).unwrap(),
            url: QuestionLinks::default(),
            tags: vec![],
        }
    }

    fn browsing_view() -> CatalogView {
        let mut view = CatalogView::default();
        view.categories_loaded(Ok(vec![category(1, "Arrays"), category(2, "Graphs")]));
        view
    }

    #[test]
    fn loading_success_pre_expands_first_category() {
        let view = browsing_view();

        assert_eq!(view.state(), &ViewState::Browsing);
        assert!(view.is_expanded(CategoryId::new(1).unwrap()));
        assert!(!view.is_expanded(CategoryId::new(2).unwrap()));
    }

    #[test]
    fn pre_expanded_count_is_configurable() {
        let mut view = CatalogView::new(3);
        view.categories_loaded(Ok(vec![category(1, "Arrays"), category(2, "Graphs")]));

        assert!(view.is_expanded(CategoryId::new(1).unwrap()));
        assert!(view.is_expanded(CategoryId::new(2).unwrap()));
    }

    #[test]
    fn loading_failure_offers_retry() {
        let mut view = CatalogView::default();
        view.categories_loaded(Err("connection refused".into()));

        assert_eq!(view.state(), &ViewState::Error("connection refused".into()));
        assert!(view.retry());
        assert_eq!(view.state(), &ViewState::Loading);
        assert!(!view.retry());

        view.categories_loaded(Ok(vec![category(1, "Arrays")]));
        assert_eq!(view.state(), &ViewState::Browsing);
    }

    #[test]
    fn search_result_switches_to_searching() {
        let mut view = browsing_view();

        let request = view.set_query(" two ").unwrap();
        assert_eq!(request.term, "two");
        assert_eq!(view.state(), &ViewState::Browsing);

        let outcome = view.search_finished(request.ticket, Ok(vec![question(1, "Two Sum")]));

        assert_eq!(outcome, SearchOutcome::Applied);
        assert_eq!(view.state(), &ViewState::Searching);
        assert_eq!(view.results().len(), 1);
    }

    #[test]
    fn stale_response_does_not_overwrite_newer_results() {
        let mut view = browsing_view();
        let older = view.set_query("tw").unwrap();
        let newer = view.set_query("two s").unwrap();

        assert_eq!(
            view.search_finished(newer.ticket, Ok(vec![question(1, "Two Sum")])),
            SearchOutcome::Applied
        );
        assert_eq!(
            view.search_finished(
                older.ticket,
                Ok(vec![question(1, "Two Sum"), question(2, "Between Two Sets")])
            ),
            SearchOutcome::Stale
        );
        assert_eq!(view.results().len(), 1);
    }

    #[test]
    fn clearing_query_returns_to_browsing_and_drops_inflight_search() {
        let mut view = browsing_view();
        let first = view.set_query("two").unwrap();
        view.search_finished(first.ticket, Ok(vec![question(1, "Two Sum")]));
        let pending = view.set_query("two s").unwrap();

        assert_eq!(view.set_query("   "), None);
        assert_eq!(view.state(), &ViewState::Browsing);
        assert!(view.results().is_empty());

        assert_eq!(
            view.search_finished(pending.ticket, Ok(vec![question(1, "Two Sum")])),
            SearchOutcome::Stale
        );
        assert_eq!(view.state(), &ViewState::Browsing);
    }

    #[test]
    fn search_failure_is_surfaced_and_keeps_previous_results() {
        let mut view = browsing_view();
        let first = view.set_query("two").unwrap();
        view.search_finished(first.ticket, Ok(vec![question(1, "Two Sum")]));

        let second = view.set_query("three").unwrap();
        view.search_finished(second.ticket, Err("timeout".into()));

        assert_eq!(view.search_error(), Some("timeout"));
        assert_eq!(view.results().len(), 1);
        assert_eq!(view.state(), &ViewState::Searching);
    }

    #[test]
    fn no_search_is_issued_while_loading() {
        let mut view = CatalogView::default();
        assert_eq!(view.set_query("two"), None);
        assert_eq!(view.query(), "two");
    }

    #[test]
    fn toggle_is_independent_per_category() {
        let mut view = browsing_view();
        let first = CategoryId::new(1).unwrap();
        let second = CategoryId::new(2).unwrap();

        view.toggle(second);
        view.toggle(first);

        assert!(!view.is_expanded(first));
        assert!(view.is_expanded(second));
    }
}
