//! Fiscal-year labels.
//!
//! A fiscal year starting in calendar year `y` is labelled `"y-(y+1)"`.

/// Month abbreviations in calendar order, as used in month cache keys.
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn fiscal_year_label(start_year: i32) -> String {
    format!("{}-{}", start_year, start_year + 1)
}

/// Labels for every fiscal year starting in `[start, end)`.
///
/// `end` is exclusive, so `2022..2024` yields `2022-2023` and `2023-2024`.
pub fn fiscal_years_between(start: i32, end: i32) -> Vec<String> {
    (start..end).map(fiscal_year_label).collect()
}

/// The `count` most recent fiscal years, newest first, the newest starting in `current_year`.
pub fn rolling_fiscal_years(current_year: i32, count: usize) -> Vec<String> {
    (0..count as i32)
        .map(|offset| fiscal_year_label(current_year - offset))
        .collect()
}
