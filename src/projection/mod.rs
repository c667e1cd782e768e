//! Listing projection (pure).
//!
//! Turns the immutable listing plus the accumulated facts into the rows of the
//! visible page:
//!
//! 1. [`filter`] keeps displayable works
//! 2. [`sort_works`] orders them by the active [`SortSpec`]
//! 3. [`Pagination`] computes the visible slice
//! 4. [`materialize`] renders each visible work as a [`BookRow`]
//!
//! [`project`] runs the whole pipeline. Nothing here touches the network or the
//! terminal, so every step is unit- and property-testable.

pub mod export;

pub use export::{to_csv, write_export, EXPORT_FILE_NAME};

use crate::model::{
    AuthorFact, PageSpec, ReadingLog, SortDirection, SortField, SortSpec, Work, UNKNOWN,
};
use crate::state::FactStore;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// ===== Filter =====

/// Works that have a non-empty title and at least one author, in listing order.
pub fn filter(listing: &ReadingLog) -> Vec<&Work> {
    listing
        .entries()
        .iter()
        .filter_map(|entry| entry.displayable_work())
        .collect()
}

// ===== Sort =====

/// Locale-style string comparison.
///
/// Base letters compare first, ignoring case and accents, so `É` sorts with
/// `E`. Ties are broken by accents (unaccented first), then by case (lowercase
/// first), then by code point so distinct strings never compare equal.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    fn case_rank(c: char) -> u8 {
        u8::from(c.is_uppercase())
    }

    fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
        s.nfd().flat_map(char::to_lowercase)
    }

    folded(a)
        .filter(|c| !is_combining_mark(*c))
        .cmp(folded(b).filter(|c| !is_combining_mark(*c)))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| a.chars().map(case_rank).cmp(b.chars().map(case_rank)))
        .then_with(|| a.cmp(b))
}

/// The string a work is compared by for `field`. Missing values are empty.
pub fn sort_key(work: &Work, facts: &FactStore, field: SortField) -> String {
    let work_id = work.work_id();
    match field {
        SortField::Ratings => work_id
            .and_then(|id| facts.rating(&id).map(ToString::to_string))
            .unwrap_or_default(),
        SortField::Author => work.author_names.join(", "),
        SortField::Title => work.title.clone(),
        SortField::Year => work
            .first_publish_year
            .map(|y| y.to_string())
            .unwrap_or_default(),
        SortField::Subject => work_id
            .and_then(|id| facts.subject(&id).map(ToString::to_string))
            .unwrap_or_default(),
        SortField::AuthorBirthDate => per_author(work, facts, |fact| &fact.birth_date, ""),
        SortField::AuthorTopWork => per_author(work, facts, |fact| &fact.top_work, ""),
    }
}

/// Stable sort of `works` by `sort`. No field keeps listing order.
pub fn sort_works(works: &mut [&Work], facts: &FactStore, sort: SortSpec) {
    let Some(field) = sort.field else {
        return;
    };

    let mut keyed: Vec<(String, &Work)> = works
        .iter()
        .map(|work| (sort_key(work, facts, field), *work))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match sort.direction {
        SortDirection::Ascending => locale_compare(a, b),
        SortDirection::Descending => locale_compare(b, a),
    });

    for (slot, (_, work)) in works.iter_mut().zip(keyed) {
        *slot = work;
    }
}

// ===== Paginate =====

/// Page geometry over the filtered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of filtered rows.
    pub total: usize,
    /// Pages needed for `total` rows; 0 when empty.
    pub page_count: usize,
    /// 1-based page index as requested (not clamped).
    pub page_index: usize,
    /// Visible slice `[start, end)`, clamped to `[0, total]`.
    pub start: usize,
    /// Exclusive end of the visible slice.
    pub end: usize,
}

impl Pagination {
    /// Geometry of `page` over `total` rows.
    pub fn new(total: usize, page: PageSpec) -> Self {
        let size = page.size().get();
        let index = page.index();
        Self {
            total,
            page_count: total.div_ceil(size),
            page_index: index,
            start: (index - 1).saturating_mul(size).min(total),
            end: index.saturating_mul(size).min(total),
        }
    }

    /// Rows on the visible page.
    pub fn visible_len(&self) -> usize {
        self.end - self.start
    }

    /// Footer text, e.g. `Showing 1-10 of 25`.
    pub fn summary(&self) -> String {
        if self.visible_len() == 0 {
            format!("Showing 0-0 of {}", self.total)
        } else {
            format!("Showing {}-{} of {}", self.start + 1, self.end, self.total)
        }
    }
}

// ===== Materialize =====

/// One display row. Field order matches [`SortField::ALL`] and the CSV header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    /// Average rating with one decimal.
    pub rating: String,
    /// Author names joined with `, `.
    pub authors: String,
    /// Work title.
    pub title: String,
    /// First publish year.
    pub year: String,
    /// Primary subject.
    pub subject: String,
    /// Birth date per author, joined with `, `.
    pub author_birth_dates: String,
    /// Top work per author, joined with `, `.
    pub author_top_works: String,
}

impl BookRow {
    /// Cells in column order.
    pub fn fields(&self) -> [&str; 7] {
        [
            &self.rating,
            &self.authors,
            &self.title,
            &self.year,
            &self.subject,
            &self.author_birth_dates,
            &self.author_top_works,
        ]
    }
}

/// Render `work` with whatever facts have arrived so far.
pub fn materialize(work: &Work, facts: &FactStore) -> BookRow {
    let work_id = work.work_id();
    let rating = work_id
        .as_ref()
        .and_then(|id| facts.rating(id))
        .map(ToString::to_string);
    let subject = work_id
        .as_ref()
        .and_then(|id| facts.subject(id))
        .map(ToString::to_string);

    BookRow {
        rating: rating.unwrap_or_else(|| UNKNOWN.to_string()),
        authors: work.author_names.join(", "),
        title: work.title.clone(),
        year: work
            .first_publish_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        subject: subject.unwrap_or_else(|| UNKNOWN.to_string()),
        author_birth_dates: per_author(work, facts, |fact| &fact.birth_date, UNKNOWN),
        author_top_works: per_author(work, facts, |fact| &fact.top_work, UNKNOWN),
    }
}

fn per_author(
    work: &Work,
    facts: &FactStore,
    pick: impl Fn(&AuthorFact) -> &String,
    missing: &str,
) -> String {
    work.author_names
        .iter()
        .map(|name| facts.author(name).map(&pick).map_or(missing, String::as_str))
        .collect::<Vec<_>>()
        .join(", ")
}

// ===== Pipeline =====

/// Rows of the visible page plus its geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// Rows of the visible page.
    pub rows: Vec<BookRow>,
    /// Geometry of the visible page.
    pub pagination: Pagination,
}

/// Filter, sort, paginate and materialize `listing`.
pub fn project(
    listing: &ReadingLog,
    facts: &FactStore,
    sort: SortSpec,
    page: PageSpec,
) -> Projection {
    let mut works = filter(listing);
    sort_works(&mut works, facts, sort);

    let pagination = Pagination::new(works.len(), page);
    let rows = works[pagination.start..pagination.end]
        .iter()
        .map(|work| materialize(work, facts))
        .collect();

    Projection { rows, pagination }
}

#[cfg(test)]
#[path = "projection_tests.rs"]
mod tests;
