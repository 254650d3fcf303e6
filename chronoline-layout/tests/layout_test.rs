//! End-to-end layout engine tests over a realistic record set

use chronoline_layout::filter::matches;
use chronoline_layout::person::{FilterState, Person, TimeRange};
use chronoline_layout::rows::BUFFER_YEARS;
use chronoline_layout::scale::{LEFT_PADDING, PIXELS_PER_YEAR};
use chronoline_layout::compute_layout;

fn person(id: &str, birth: i32, death: i32, category: &str, country: &str) -> Person {
    Person {
        id: id.to_string(),
        name: id.to_string(),
        birth_year: birth,
        death_year: death,
        reign_start: None,
        reign_end: None,
        category: category.to_string(),
        country: country.to_string(),
        description: String::new(),
        achievements: Vec::new(),
        achievement_year_1: None,
        achievement_year_2: None,
        achievement_year_3: None,
        image_url: None,
    }
}

fn dataset() -> Vec<Person> {
    let mut augustus = person("augustus", -63, 14, "Ruler", "Rome");
    augustus.reign_start = Some(-27);
    augustus.reign_end = Some(14);

    let mut napoleon = person("napoleon", 1769, 1821, "Ruler", "France");
    napoleon.reign_start = Some(1804);
    napoleon.reign_end = Some(1815);

    let mut newton = person("newton", 1643, 1727, "Scientist", "England");
    newton.achievements = vec!["Principia Mathematica".to_string()];
    newton.achievement_year_1 = Some(1687);

    vec![
        person("socrates", -470, -399, "Philosopher", "Greece"),
        person("plato", -428, -348, "Philosopher", "Greece"),
        person("aristotle", -384, -322, "Philosopher", "Greece"),
        person("kant", 1724, 1804, "Philosopher", "Germany"),
        person("cassini", 1625, 1712, "Scientist", "Italy/France"),
        newton,
        augustus,
        napoleon,
    ]
}

fn category_order() -> Vec<String> {
    ["Philosopher", "Ruler", "Scientist"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// No pair of bars in one row violates the buffer rule, and every visible
/// record passes the filters it was selected by.
#[test]
fn layout_rows_are_a_valid_interval_coloring() {
    let filters = FilterState::default();
    let layout = compute_layout(&dataset(), &filters, &category_order());

    for row in &layout.rows {
        for (i, a) in row.bars.iter().enumerate() {
            for b in &row.bars[i + 1..] {
                let pa = &a.person;
                let pb = &b.person;
                assert!(
                    pa.birth_year - BUFFER_YEARS > pb.death_year
                        || pa.death_year + BUFFER_YEARS < pb.birth_year,
                    "{} and {} share a row but conflict",
                    pa.id,
                    pb.id
                );
                assert_eq!(pa.category, pb.category, "rows never mix categories");
            }
        }
        for bar in &row.bars {
            assert!(matches(&bar.person, &filters));
        }
    }
}

#[test]
fn filtering_excludes_everything_that_fails_a_predicate() {
    let filters = FilterState {
        categories: vec!["Philosopher".to_string()],
        time_range: TimeRange { start: -500, end: 0 },
        ..FilterState::default()
    };
    let layout = compute_layout(&dataset(), &filters, &category_order());

    let visible: Vec<String> = layout
        .rows
        .iter()
        .flat_map(|row| row.bars.iter().map(|b| b.person.id.clone()))
        .collect();
    assert_eq!(visible.len(), 3);
    assert!(visible.contains(&"socrates".to_string()));
    assert!(visible.contains(&"plato".to_string()));
    assert!(visible.contains(&"aristotle".to_string()));
}

#[test]
fn country_token_filter_reaches_composite_records() {
    let filters = FilterState {
        countries: vec!["France".to_string()],
        ..FilterState::default()
    };
    let layout = compute_layout(&dataset(), &filters, &category_order());

    let visible: Vec<String> = layout
        .rows
        .iter()
        .flat_map(|row| row.bars.iter().map(|b| b.person.id.clone()))
        .collect();
    assert!(visible.contains(&"cassini".to_string()), "Italy/France splits");
    assert!(visible.contains(&"napoleon".to_string()));
    assert!(!visible.contains(&"socrates".to_string()));
}

#[test]
fn layout_is_deterministic() {
    let filters = FilterState::default();
    let a = compute_layout(&dataset(), &filters, &category_order());
    let b = compute_layout(&dataset(), &filters, &category_order());

    assert_eq!(a.total_width, b.total_width);
    assert_eq!(a.total_height, b.total_height);
    assert_eq!(a.rows.len(), b.rows.len());
    for (ra, rb) in a.rows.iter().zip(&b.rows) {
        assert_eq!(ra.top, rb.top);
        let ids_a: Vec<_> = ra.bars.iter().map(|b| &b.person.id).collect();
        let ids_b: Vec<_> = rb.bars.iter().map(|b| &b.person.id).collect();
        assert_eq!(ids_a, ids_b);
    }
}

#[test]
fn coordinate_round_trip_holds_across_the_layout() {
    let filters = FilterState::default();
    let layout = compute_layout(&dataset(), &filters, &category_order());

    assert_eq!(layout.scale.position(layout.scale.min_year), LEFT_PADDING);
    for row in &layout.rows {
        for bar in &row.bars {
            let p = &bar.person;
            assert_eq!(
                bar.x,
                LEFT_PADDING + i64::from(p.birth_year - layout.scale.min_year) * PIXELS_PER_YEAR
            );
            assert_eq!(
                bar.width,
                i64::from(p.death_year - p.birth_year) * PIXELS_PER_YEAR
            );
        }
    }
}

#[test]
fn filtering_to_nothing_yields_an_empty_placement() {
    let filters = FilterState {
        categories: vec!["Astronaut".to_string()],
        ..FilterState::default()
    };
    let layout = compute_layout(&dataset(), &filters, &category_order());
    assert!(layout.rows.is_empty());
    assert_eq!(layout.total_height, 0);
    // Scale falls back to the filter range, so decoration still renders.
    assert_eq!(layout.scale.min_year, -800);
    assert!(!layout.centuries.is_empty());
}

#[test]
fn category_blocks_appear_in_display_order() {
    let layout = compute_layout(&dataset(), &FilterState::default(), &category_order());

    let block_order: Vec<String> = layout
        .rows
        .iter()
        .filter_map(|row| row.bars.first().map(|b| b.person.category.clone()))
        .fold(Vec::new(), |mut acc, cat| {
            if acc.last() != Some(&cat) {
                acc.push(cat);
            }
            acc
        });
    assert_eq!(block_order, vec!["Philosopher", "Ruler", "Scientist"]);
}
