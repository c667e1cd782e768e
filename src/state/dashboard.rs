//! Book-list dashboard state.
//!
//! Owns the listing, the accumulated facts and the sort/page/cursor state. All
//! transitions are synchronous; network results arrive as [`Completion`]s and
//! are folded in through [`DashboardState::apply`].

use super::FactStore;
use crate::enrich::{plan_lookups, Completion, LookupRequest};
use crate::model::{
    CatalogError, InvalidPageSize, PageSize, PageSpec, ReadingLog, SortField, SortSpec,
};
use crate::projection::{self, Pagination, Projection};
use tracing::{debug, info, warn};

/// Where the one-shot listing fetch stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListingStatus {
    /// Fetch in flight.
    #[default]
    Loading,
    /// Fetch failed; the reason is for logs only.
    Failed(String),
    /// Listing received.
    Loaded(ReadingLog),
}

/// State of the book-list screen.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    listing: ListingStatus,
    facts: FactStore,
    sort: SortSpec,
    page: PageSpec,
    /// Row cursor within the visible page (0-based).
    selected_row: usize,
}

impl DashboardState {
    /// Loading state on page 1 with `page_size` rows per page.
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page: PageSpec::new(page_size, 1),
            ..Self::default()
        }
    }

    // ===== Accessors =====

    /// Where the listing fetch stands.
    pub fn listing(&self) -> &ListingStatus {
        &self.listing
    }

    /// Enrichment facts merged so far.
    pub fn facts(&self) -> &FactStore {
        &self.facts
    }

    /// Active sort.
    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    /// Active page size and index.
    pub fn page(&self) -> PageSpec {
        self.page
    }

    /// Row cursor within the visible page.
    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    /// Visible page, or `None` until the listing has loaded.
    pub fn projection(&self) -> Option<Projection> {
        match &self.listing {
            ListingStatus::Loaded(log) => {
                Some(projection::project(log, &self.facts, self.sort, self.page))
            }
            _ => None,
        }
    }

    fn pagination(&self) -> Option<Pagination> {
        match &self.listing {
            ListingStatus::Loaded(log) => Some(Pagination::new(
                projection::filter(log).len(),
                self.page,
            )),
            _ => None,
        }
    }

    /// Pages over the filtered listing; 0 until loaded.
    pub fn page_count(&self) -> usize {
        self.pagination().map_or(0, |p| p.page_count)
    }

    // ===== Sort and pagination =====

    /// Sort by `field`; selecting the current field toggles direction.
    pub fn set_sort(&mut self, field: SortField) {
        self.sort = self.sort.toggle(field);
        debug!(field = field.key(), direction = ?self.sort.direction, "Sort changed");
    }

    /// Change records per page. Only 10, 50 and 100 are accepted; the page
    /// index is preserved.
    pub fn set_page_size(&mut self, size: usize) -> Result<(), InvalidPageSize> {
        let size = PageSize::try_from(size)?;
        self.page = self.page.with_size(size);
        self.clamp_cursor();
        Ok(())
    }

    /// Step to the next page size, wrapping around.
    pub fn cycle_page_size(&mut self) {
        self.page = self.page.with_size(self.page.size().cycled());
        self.clamp_cursor();
    }

    /// Jump to page `index` (1-based). Not clamped against the page count.
    pub fn set_page(&mut self, index: usize) {
        self.page = self.page.with_index(index);
        self.selected_row = 0;
    }

    /// Advance one page unless already on (or past) the last page.
    pub fn next_page(&mut self) {
        if self.page.index() < self.page_count() {
            self.set_page(self.page.index() + 1);
        }
    }

    /// Go back one page unless on the first.
    pub fn prev_page(&mut self) {
        if self.page.index() > 1 {
            self.set_page(self.page.index() - 1);
        }
    }

    /// Jump to page 1.
    pub fn first_page(&mut self) {
        self.set_page(1);
    }

    /// Jump to the last page.
    pub fn last_page(&mut self) {
        self.set_page(self.page_count().max(1));
    }

    // ===== Row cursor =====

    /// Move the row cursor down, stopping at the last visible row.
    pub fn select_next_row(&mut self) {
        let visible = self.pagination().map_or(0, |p| p.visible_len());
        if self.selected_row + 1 < visible {
            self.selected_row += 1;
        }
    }

    /// Move the row cursor up, stopping at the first row.
    pub fn select_prev_row(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    fn clamp_cursor(&mut self) {
        let visible = self.pagination().map_or(0, |p| p.visible_len());
        self.selected_row = self.selected_row.min(visible.saturating_sub(1));
    }

    // ===== Enrichment =====

    /// Plan the outstanding lookups and mark each one pending.
    ///
    /// The caller must dispatch every returned request; a request that is never
    /// completed stays pending for the rest of the visit.
    pub fn begin_lookups(&mut self) -> Vec<LookupRequest> {
        let ListingStatus::Loaded(log) = &self.listing else {
            return Vec::new();
        };
        let planned = plan_lookups(log, &self.facts);
        for request in &planned {
            self.facts.mark_pending(request);
        }
        planned
    }

    /// Fold a background result into the state.
    pub fn apply(&mut self, completion: Completion) {
        let request = completion.request();
        match completion {
            Completion::ReadingLog(Ok(log)) => {
                info!(entries = log.entries().len(), "Reading log loaded");
                self.listing = ListingStatus::Loaded(log);
                self.clamp_cursor();
            }
            Completion::ReadingLog(Err(e)) => {
                warn!(error = %e, "Reading log fetch failed");
                self.listing = ListingStatus::Failed(e.to_string());
            }
            Completion::Author { name, result } => match result {
                Ok(fact) => self.facts.merge_author(name, fact),
                Err(e) => self.lookup_failed(request, &e),
            },
            Completion::Rating { work_id, result } => match result {
                Ok(Some(fact)) => self.facts.merge_rating(work_id, fact),
                Ok(None) => self.lookup_empty(request),
                Err(e) => self.lookup_failed(request, &e),
            },
            Completion::Subject { work_id, result } => match result {
                Ok(Some(fact)) => self.facts.merge_subject(work_id, fact),
                Ok(None) => self.lookup_empty(request),
                Err(e) => self.lookup_failed(request, &e),
            },
        }
    }

    fn lookup_empty(&mut self, request: Option<LookupRequest>) {
        if let Some(request) = request {
            debug!(request = %request, "Lookup returned no fact");
            self.facts.record_missing(&request);
        }
    }

    fn lookup_failed(&mut self, request: Option<LookupRequest>, error: &CatalogError) {
        if let Some(request) = request {
            match error {
                CatalogError::NotFound { .. } => {
                    debug!(request = %request, "No matching catalog record")
                }
                _ => warn!(request = %request, error = %error, "Enrichment lookup failed"),
            }
            self.facts.record_missing(&request);
        }
    }
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
