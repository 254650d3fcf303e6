//! The presentation engine entry point
//!
//! [`compute_layout`] is a pure function from a snapshot of person records
//! plus the active filters to a complete drawable layout: packed rows with
//! pixel geometry, reign sub-bars, achievement markers, century bands, and
//! category dividers. It is recomputed from scratch on every filter change;
//! for a few hundred records this is sub-millisecond work.

use serde::Serialize;
use tracing::debug;

use crate::century::{century_boundaries, century_label};
use crate::filter::{filter, sort_for_display};
use crate::person::{FilterState, Person};
use crate::rows::{self, pack, RowPlacement};
use crate::scale::TimeScale;

/// Vertical offset of a divider band above its anchor row.
const DIVIDER_OFFSET: i64 = 5;

/// A fully computed timeline layout.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub scale: TimeScale,
    pub total_width: i64,
    pub total_height: i64,
    pub rows: Vec<LayoutRow>,
    pub centuries: Vec<CenturyBand>,
    pub dividers: Vec<CategoryDivider>,
}

/// One display row. A row with no bars is a separator between category
/// blocks and contributes only its reduced height.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutRow {
    pub top: i64,
    pub bars: Vec<LifeBar>,
}

/// A person's life span placed on the timeline.
#[derive(Debug, Clone, Serialize)]
pub struct LifeBar {
    pub person: Person,
    pub x: i64,
    pub width: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reign: Option<ReignBar>,
    pub achievements: Vec<AchievementMarker>,
}

/// Reign sub-interval overlay within a life bar.
#[derive(Debug, Clone, Serialize)]
pub struct ReignBar {
    pub x: i64,
    pub width: i64,
}

/// Point-in-time achievement tick mark.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementMarker {
    /// Position within the person's achievement list.
    pub index: usize,
    pub year: i32,
    pub x: i64,
    /// The matching achievements entry, when one exists at this index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Decorative century background band with its Roman-numeral label.
#[derive(Debug, Clone, Serialize)]
pub struct CenturyBand {
    pub start_year: i32,
    pub x: i64,
    pub width: i64,
    pub label: String,
}

/// Labelled band at the bottom edge of a category block.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDivider {
    pub category: String,
    pub top: i64,
}

/// Compute the full layout for the given records and filters.
///
/// `category_order` is the display order of categories as returned by the
/// data source; it drives both sorting and block grouping.
pub fn compute_layout(
    records: &[Person],
    filters: &FilterState,
    category_order: &[String],
) -> Layout {
    let mut visible = filter(records, filters);
    sort_for_display(&mut visible, category_order);

    let scale = TimeScale::fit(&visible, &filters.time_range);
    let placement = pack(&visible, category_order);
    let tops = rows::row_tops(&placement);
    let total_height = rows::total_height(&placement);

    let layout_rows = placement
        .iter()
        .zip(&tops)
        .map(|(row, &top)| LayoutRow {
            top,
            bars: row
                .iter()
                .map(|p| life_bar(p, &scale, filters.show_achievements))
                .collect(),
        })
        .collect();

    debug!(
        total = records.len(),
        visible = visible.len(),
        rows = placement.len(),
        "timeline layout computed"
    );

    Layout {
        total_width: scale.total_width(),
        total_height,
        rows: layout_rows,
        centuries: century_bands(&scale),
        dividers: category_dividers(&placement, &tops, total_height),
        scale,
    }
}

fn life_bar(person: &Person, scale: &TimeScale, show_achievements: bool) -> LifeBar {
    let reign = match (person.reign_start, person.reign_end) {
        (Some(start), Some(end)) => Some(ReignBar {
            x: scale.position(start),
            width: scale.width(start, end),
        }),
        _ => None,
    };

    let achievements = if show_achievements {
        person
            .achievement_years()
            .into_iter()
            .map(|(index, year)| AchievementMarker {
                index,
                year,
                x: scale.position(year),
                label: person.achievements.get(index).cloned(),
            })
            .collect()
    } else {
        Vec::new()
    };

    LifeBar {
        x: scale.position(person.birth_year),
        width: scale.width(person.birth_year, person.death_year),
        reign,
        achievements,
        person: person.clone(),
    }
}

fn century_bands(scale: &TimeScale) -> Vec<CenturyBand> {
    let boundaries = century_boundaries(scale.min_year, scale.max_year);
    boundaries
        .iter()
        .enumerate()
        .map(|(i, &year)| {
            let next = boundaries.get(i + 1).copied().unwrap_or(year + 100);
            let x = scale.position(year);
            CenturyBand {
                start_year: year,
                x,
                width: scale.position(next) - x,
                label: century_label(year),
            }
        })
        .collect()
}

/// One divider per category block, anchored at the block's bottom edge.
fn category_dividers(
    placement: &RowPlacement,
    tops: &[i64],
    total_height: i64,
) -> Vec<CategoryDivider> {
    let mut dividers = Vec::new();
    let mut current: Option<&str> = None;

    for (row, &top) in placement.iter().zip(tops) {
        let Some(first) = row.first() else { continue };
        if current != Some(first.category.as_str()) {
            if let Some(category) = current {
                dividers.push(CategoryDivider {
                    category: category.to_string(),
                    top: top - DIVIDER_OFFSET,
                });
            }
            current = Some(first.category.as_str());
        }
    }

    if let Some(category) = current {
        dividers.push(CategoryDivider {
            category: category.to_string(),
            top: total_height - DIVIDER_OFFSET,
        });
    }

    dividers
}
