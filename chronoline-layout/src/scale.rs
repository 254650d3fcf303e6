//! Year-to-pixel coordinate mapping

use serde::Serialize;

use crate::person::{Person, TimeRange};

/// Horizontal scale of the timeline.
pub const PIXELS_PER_YEAR: i64 = 3;

/// Left padding so the leftmost year label does not touch the edge.
pub const LEFT_PADDING: i64 = 30;

/// Linear mapping from calendar years to horizontal pixel offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeScale {
    pub min_year: i32,
    pub max_year: i32,
    pub pixels_per_year: i64,
    pub left_padding: i64,
}

impl TimeScale {
    /// Derive the scale from the visible records and the active time range.
    ///
    /// `min_year`/`max_year` extend to cover both the records and the range;
    /// with no visible records the scale spans the range alone, so the
    /// mapping stays well defined for an empty result set.
    pub fn fit(records: &[Person], range: &TimeRange) -> Self {
        let min_year = records
            .iter()
            .map(|p| p.birth_year)
            .min()
            .map_or(range.start, |m| m.min(range.start));
        let max_year = records
            .iter()
            .map(|p| p.death_year)
            .max()
            .map_or(range.end, |m| m.max(range.end));

        Self {
            min_year,
            max_year,
            pixels_per_year: PIXELS_PER_YEAR,
            left_padding: LEFT_PADDING,
        }
    }

    /// Horizontal offset of a year.
    pub fn position(&self, year: i32) -> i64 {
        self.left_padding + i64::from(year - self.min_year) * self.pixels_per_year
    }

    /// Horizontal extent of an interval.
    pub fn width(&self, start_year: i32, end_year: i32) -> i64 {
        i64::from(end_year - start_year) * self.pixels_per_year
    }

    /// Total pixel width of the timeline.
    pub fn total_width(&self) -> i64 {
        i64::from(self.max_year - self.min_year) * self.pixels_per_year + self.left_padding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(birth: i32, death: i32) -> Person {
        Person {
            id: "p".to_string(),
            name: "P".to_string(),
            birth_year: birth,
            death_year: death,
            reign_start: None,
            reign_end: None,
            category: "Philosopher".to_string(),
            country: "Greece".to_string(),
            description: String::new(),
            achievements: Vec::new(),
            achievement_year_1: None,
            achievement_year_2: None,
            achievement_year_3: None,
            image_url: None,
        }
    }

    #[test]
    fn min_year_maps_to_left_padding() {
        let scale = TimeScale::fit(&[person(-470, -399)], &TimeRange { start: 0, end: 100 });
        assert_eq!(scale.min_year, -470);
        assert_eq!(scale.position(scale.min_year), LEFT_PADDING);
    }

    #[test]
    fn positions_are_linear_in_years() {
        let scale = TimeScale::fit(&[person(100, 200)], &TimeRange { start: 0, end: 300 });
        for (a, b) in [(0, 300), (17, 123), (-5, 299)] {
            assert_eq!(
                scale.position(b) - scale.position(a),
                i64::from(b - a) * PIXELS_PER_YEAR
            );
        }
        assert_eq!(scale.width(100, 200), 100 * PIXELS_PER_YEAR);
    }

    #[test]
    fn empty_records_fall_back_to_the_time_range() {
        let range = TimeRange {
            start: -800,
            end: 2000,
        };
        let scale = TimeScale::fit(&[], &range);
        assert_eq!(scale.min_year, -800);
        assert_eq!(scale.max_year, 2000);
        assert_eq!(scale.total_width(), 2800 * PIXELS_PER_YEAR + LEFT_PADDING);
    }

    #[test]
    fn records_extend_the_range_on_both_sides() {
        let range = TimeRange { start: 0, end: 100 };
        let scale = TimeScale::fit(&[person(-50, 150)], &range);
        assert_eq!(scale.min_year, -50);
        assert_eq!(scale.max_year, 150);
    }
}
