//! Property-based tests for the projection pipeline and fact store.
//!
//! Tests validate:
//! 1. Filtering never grows the listing
//! 2. Sorting is ordered, idempotent and toggling twice restores ascending
//!    order, with and without enrichment facts
//! 3. Page geometry stays within the filtered listing
//! 4. Facts merged for one key never leak into another, and a resolved fact
//!    is never replaced

use bookdash::model::{
    AuthorFact, PageSize, PageSpec, RatingFact, ReadingLog, ReadingLogEntry, SortDirection,
    SortField, SortSpec, SubjectFact, Work, WorkId,
};
use bookdash::projection::{filter, locale_compare, project, sort_key, sort_works, Pagination};
use bookdash::state::FactStore;
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeSet;

fn arb_work() -> impl Strategy<Value = Option<Work>> {
    let work = (
        "[A-Za-z ]{0,8}",
        prop::collection::vec("[A-Za-z]{1,6}", 0..3),
        prop::option::of(1800i32..2030),
        prop::option::of("OL[0-9]{1,4}W"),
    )
        .prop_map(|(title, author_names, year, key)| Work {
            key: key.map(|k| format!("/works/{k}")),
            title,
            author_names,
            first_publish_year: year,
            subjects: None,
        });
    prop::option::weighted(0.9, work)
}

fn arb_listing() -> impl Strategy<Value = ReadingLog> {
    prop::collection::vec(arb_work(), 0..60).prop_map(|works| {
        ReadingLog::new(
            works
                .into_iter()
                .map(|work| ReadingLogEntry { work })
                .collect(),
        )
    })
}

/// A listing plus a store holding random facts for some of its authors and works.
fn arb_listing_with_facts() -> impl Strategy<Value = (ReadingLog, FactStore)> {
    arb_listing()
        .prop_flat_map(|listing| {
            let works: Vec<&Work> = listing
                .entries()
                .iter()
                .filter_map(|e| e.work.as_ref())
                .collect();
            let names: BTreeSet<String> =
                works.iter().flat_map(|w| w.author_names.iter().cloned()).collect();
            let ids: BTreeSet<WorkId> = works.iter().filter_map(|w| w.work_id()).collect();
            let names: Vec<String> = names.into_iter().collect();
            let ids: Vec<WorkId> = ids.into_iter().collect();

            let authors = prop::collection::vec(
                prop::option::of((
                    prop::option::of("[1-9] [A-Z][a-z]{2} 19[0-9]{2}"),
                    prop::option::of("[A-Za-z ]{1,8}"),
                )),
                names.len(),
            );
            let ratings = prop::collection::vec(prop::option::of(0.0f64..5.0), ids.len());
            let subjects =
                prop::collection::vec(prop::option::of("[A-Za-z]{0,8}(, [a-z]{1,5})?"), ids.len());

            (Just(listing), Just(names), Just(ids), authors, ratings, subjects)
        })
        .prop_map(|(listing, names, ids, authors, ratings, subjects)| {
            let mut store = FactStore::new();
            for (name, fact) in names.into_iter().zip(authors) {
                if let Some((birth, top)) = fact {
                    store.merge_author(name, AuthorFact::new(birth.as_deref(), top.as_deref()));
                }
            }
            for ((id, rating), subject) in ids.into_iter().zip(ratings).zip(subjects) {
                if let Some(rating) = rating.and_then(RatingFact::from_average) {
                    store.merge_rating(id.clone(), rating);
                }
                if let Some(subject) = subject.and_then(|s| SubjectFact::from_subjects(&[s])) {
                    store.merge_subject(id, subject);
                }
            }
            (listing, store)
        })
}

fn arb_field() -> impl Strategy<Value = SortField> {
    prop::sample::select(SortField::ALL.to_vec())
}

fn arb_page() -> impl Strategy<Value = PageSpec> {
    (prop::sample::select(PageSize::ALL.to_vec()), 1usize..12)
        .prop_map(|(size, index)| PageSpec::new(size, index))
}

fn titles(works: &[&Work]) -> Vec<String> {
    works.iter().map(|w| w.title.clone()).collect()
}

// ===== Property 1: Filter =====

proptest! {
    #[test]
    fn filter_never_grows_listing(listing in arb_listing()) {
        let kept = filter(&listing);
        prop_assert!(kept.len() <= listing.entries().len());
        for work in kept {
            prop_assert!(!work.title.is_empty());
            prop_assert!(!work.author_names.is_empty());
        }
    }
}

// ===== Property 2: Sort =====

proptest! {
    #[test]
    fn sort_orders_by_key(
        (listing, facts) in arb_listing_with_facts(),
        field in arb_field(),
        descending in any::<bool>(),
    ) {
        let direction = if descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        let mut works = filter(&listing);
        sort_works(&mut works, &facts, SortSpec::new(field, direction));

        for pair in works.windows(2) {
            let order = locale_compare(
                &sort_key(pair[0], &facts, field),
                &sort_key(pair[1], &facts, field),
            );
            let expected_not = if descending { Ordering::Less } else { Ordering::Greater };
            prop_assert_ne!(order, expected_not);
        }
    }

    #[test]
    fn sort_is_idempotent((listing, facts) in arb_listing_with_facts(), field in arb_field()) {
        let spec = SortSpec::new(field, SortDirection::Ascending);

        let mut once = filter(&listing);
        sort_works(&mut once, &facts, spec);
        let mut twice = once.clone();
        sort_works(&mut twice, &facts, spec);

        prop_assert_eq!(titles(&once), titles(&twice));
    }

    #[test]
    fn toggling_twice_restores_ascending(
        (listing, facts) in arb_listing_with_facts(),
        field in arb_field(),
    ) {
        let ascending = SortSpec::default().toggle(field);
        let again = ascending.toggle(field).toggle(field);
        prop_assert_eq!(ascending, again);

        let mut first = filter(&listing);
        sort_works(&mut first, &facts, ascending);
        let mut third = filter(&listing);
        sort_works(&mut third, &facts, again);

        prop_assert_eq!(titles(&first), titles(&third));
    }
}

// ===== Property 3: Pagination =====

proptest! {
    #[test]
    fn page_count_is_ceiling(total in 0usize..500, page in arb_page()) {
        let pagination = Pagination::new(total, page);
        let size = page.size().get();
        prop_assert_eq!(pagination.page_count, (total + size - 1) / size);
    }

    #[test]
    fn visible_slice_is_bounded(
        (listing, facts) in arb_listing_with_facts(),
        page in arb_page(),
        field in arb_field(),
    ) {
        let sort = SortSpec::new(field, SortDirection::Descending);
        let projection = project(&listing, &facts, sort, page);
        let p = projection.pagination;

        prop_assert!(p.start <= p.end);
        prop_assert!(p.end <= p.total);
        prop_assert!(projection.rows.len() <= page.size().get());
        prop_assert_eq!(projection.rows.len(), p.visible_len());
        prop_assert_eq!(p.total, filter(&listing).len());
    }
}

// ===== Property 4: Fact isolation =====

proptest! {
    #[test]
    fn merging_one_key_leaves_others_untouched(
        names in prop::collection::hash_set("[a-z]{1,6}", 2..6),
        average in 0.1f64..5.0,
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let mut store = FactStore::new();

        store.merge_author(names[0].clone(), AuthorFact::new(Some("1900"), None));
        let id = WorkId::new("OL1W").unwrap();
        if let Some(rating) = RatingFact::from_average(average) {
            store.merge_rating(id.clone(), rating);
        }

        prop_assert!(store.author(&names[0]).is_some());
        for other in &names[1..] {
            prop_assert!(store.author(other).is_none());
        }
        prop_assert!(store.subject(&id).is_none());
        prop_assert!(store.rating(&WorkId::new("OL2W").unwrap()).is_none());
    }

    #[test]
    fn remerging_a_resolved_key_changes_nothing(
        names in prop::collection::hash_set("[a-z]{1,6}", 2..6),
        first in 0.1f64..5.0,
        second in 0.1f64..5.0,
        subject in "[A-Za-z]{1,8}",
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let id = WorkId::new("OL1W").unwrap();
        let other = WorkId::new("OL2W").unwrap();
        let mut store = FactStore::new();

        store.merge_author(names[0].clone(), AuthorFact::new(Some("1900"), Some("First")));
        let first_rating = RatingFact::from_average(first).unwrap();
        store.merge_rating(id.clone(), first_rating);
        let first_subject = SubjectFact::from_subjects(&[subject.clone()]).unwrap();
        store.merge_subject(id.clone(), first_subject.clone());

        store.merge_author(names[0].clone(), AuthorFact::new(Some("2000"), Some("Second")));
        store.merge_rating(id.clone(), RatingFact::from_average(second).unwrap());
        let replacement = SubjectFact::from_subjects(&[format!("{subject}x")]).unwrap();
        store.merge_subject(id.clone(), replacement);

        prop_assert_eq!(
            store.author(&names[0]),
            Some(&AuthorFact::new(Some("1900"), Some("First")))
        );
        prop_assert_eq!(store.rating(&id), Some(&first_rating));
        prop_assert_eq!(store.subject(&id), Some(&first_subject));
        for name in &names[1..] {
            prop_assert!(store.author(name).is_none());
        }
        prop_assert!(store.rating(&other).is_none());
        prop_assert!(store.subject(&other).is_none());
    }
}
