//! Row packing: assigning life intervals to non-overlapping display rows
//!
//! Greedy first-fit interval coloring, one block of rows per category. Two
//! records may share a row only if their life intervals are more than
//! [`BUFFER_YEARS`] apart.

use crate::person::Person;

/// Minimum year gap between intervals placed in the same row.
pub const BUFFER_YEARS: i32 = 20;

/// Height of an occupied row.
pub const ROW_HEIGHT: i64 = 60;

/// Bottom margin below an occupied row.
pub const ROW_MARGIN: i64 = 10;

/// Height of an empty separator row between category blocks.
pub const EMPTY_ROW_HEIGHT: i64 = 20;

/// Ordered rows of packed records. An empty row separates category blocks.
pub type RowPlacement = Vec<Vec<Person>>;

/// Whether `person` comes within the buffer of any record already in `row`.
fn conflicts(person: &Person, row: &[Person]) -> bool {
    row.iter().any(|existing| {
        person.birth_year - BUFFER_YEARS <= existing.death_year
            && person.death_year + BUFFER_YEARS >= existing.birth_year
    })
}

/// Pack pre-sorted records into display rows, grouped by category.
///
/// Categories are visited in `category_order`; categories with no records
/// are skipped without leaving a separator. Records whose category is not in
/// the order at all are packed after the known blocks, in first-appearance
/// order. Within a block each record lands in the first existing row it does
/// not conflict with, else a new row opens. Deterministic for a given input.
pub fn pack(sorted: &[Person], category_order: &[String]) -> RowPlacement {
    let mut order: Vec<&str> = category_order.iter().map(String::as_str).collect();
    for person in sorted {
        if !order.iter().any(|c| *c == person.category) {
            order.push(person.category.as_str());
        }
    }

    let mut rows: RowPlacement = Vec::new();
    for category in order {
        let group: Vec<&Person> = sorted.iter().filter(|p| p.category == category).collect();
        if group.is_empty() {
            continue;
        }

        if !rows.is_empty() {
            rows.push(Vec::new());
        }

        let block_start = rows.len();
        'people: for person in group {
            for row in &mut rows[block_start..] {
                if !conflicts(person, row) {
                    row.push((*person).clone());
                    continue 'people;
                }
            }
            rows.push(vec![(*person).clone()]);
        }
    }

    rows
}

/// Height contributed by one row.
pub fn row_height(row: &[Person]) -> i64 {
    if row.is_empty() {
        EMPTY_ROW_HEIGHT
    } else {
        ROW_HEIGHT + ROW_MARGIN
    }
}

/// Absolute top offset of each row.
pub fn row_tops(rows: &RowPlacement) -> Vec<i64> {
    let mut tops = Vec::with_capacity(rows.len());
    let mut acc = 0;
    for row in rows {
        tops.push(acc);
        acc += row_height(row);
    }
    tops
}

/// Total pixel height of the packed rows.
pub fn total_height(rows: &RowPlacement) -> i64 {
    rows.iter().map(|row| row_height(row)).sum()
}
