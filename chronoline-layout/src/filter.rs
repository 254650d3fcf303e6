//! Filtering and display ordering of person records

use crate::person::{FilterState, Person};

/// Whether a record passes every active filter predicate.
///
/// Category and country selections are exact token matches; an empty
/// selection passes everything. The time predicate is interval overlap:
/// `birth_year <= range.end && death_year >= range.start`.
pub fn matches(person: &Person, filters: &FilterState) -> bool {
    let category_ok = filters.categories.is_empty()
        || filters.categories.iter().any(|c| c == &person.category);

    let country_ok = filters.countries.is_empty()
        || person
            .country_tokens()
            .any(|token| filters.countries.iter().any(|c| c == token));

    let time_ok = person.birth_year <= filters.time_range.end
        && person.death_year >= filters.time_range.start;

    category_ok && country_ok && time_ok
}

/// Keep only the records passing [`matches`]. Pure; input order preserved.
pub fn filter(records: &[Person], filters: &FilterState) -> Vec<Person> {
    records
        .iter()
        .filter(|p| matches(p, filters))
        .cloned()
        .collect()
}

/// Rank of a category within the display order. Categories missing from the
/// order rank after every known one.
fn category_rank(order: &[String], category: &str) -> usize {
    order
        .iter()
        .position(|c| c == category)
        .unwrap_or(usize::MAX)
}

/// Sort records by category display order, then by birth year ascending.
///
/// The sort is stable, so records with equal keys keep their input order;
/// row packing depends on this determinism.
pub fn sort_for_display(records: &mut [Person], category_order: &[String]) {
    records.sort_by(|a, b| {
        category_rank(category_order, &a.category)
            .cmp(&category_rank(category_order, &b.category))
            .then(a.birth_year.cmp(&b.birth_year))
    });
}
