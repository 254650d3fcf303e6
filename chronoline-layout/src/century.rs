//! Century boundaries and Roman-numeral labels

/// Century-start years covering `[floor(min/100)*100, ceil(max/100)*100]`,
/// keeping only boundaries at or before `max_year`. Ascending.
pub fn century_boundaries(min_year: i32, max_year: i32) -> Vec<i32> {
    let start = min_year.div_euclid(100) * 100;
    let end = if max_year.rem_euclid(100) == 0 {
        max_year
    } else {
        max_year.div_euclid(100) * 100 + 100
    };

    let mut boundaries = Vec::new();
    let mut year = start;
    while year <= end {
        if year <= max_year {
            boundaries.push(year);
        }
        year += 100;
    }
    boundaries
}

/// Historical century number, no-year-zero convention: years 1..=100 are
/// century 1, and -1..=-100 are the 1st century BCE. Year 0 does not exist
/// in the calendar; treat it as century 1.
pub fn century_number(year: i32) -> i32 {
    if year < 0 {
        (year.abs() - 1) / 100 + 1
    } else if year == 0 {
        1
    } else {
        (year - 1) / 100 + 1
    }
}

/// Roman numeral rendering; negative input gets a leading minus.
pub fn to_roman(value: i32) -> String {
    const NUMERALS: [(i32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    let mut out = String::new();
    let mut remaining = value.abs();
    for (unit, numeral) in NUMERALS {
        while remaining >= unit {
            out.push_str(numeral);
            remaining -= unit;
        }
    }

    if value < 0 {
        format!("-{out}")
    } else {
        out
    }
}

/// Label for the century band starting at `band_start`, e.g. `XIX` or `-V`.
///
/// The century is taken from the band's center year so the 100-year span
/// maps to a single number; BCE bands are prefixed with a minus.
pub fn century_label(band_start: i32) -> String {
    let number = century_number(band_start + 50);
    if band_start < 0 {
        format!("-{}", to_roman(number))
    } else {
        to_roman(number)
    }
}
