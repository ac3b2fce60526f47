use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

use crate::domain::entities::campaign::round_half_up;
use crate::domain::entities::view::DateRangeFilter;

pub fn format_count(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// Whole US dollars, e.g. `$125,000` or `-$40`.
pub fn format_currency(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let rounded = round_half_up(value);
    let digits = (rounded.abs() as u64).to_formatted_string(&Locale::en);
    if rounded < 0.0 {
        format!("-${digits}")
    } else {
        format!("${digits}")
    }
}

/// Date inputs yield `YYYY-MM-DD` or an empty string.
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn date_filter(start: &str, end: &str) -> DateRangeFilter {
    DateRangeFilter {
        start: parse_date_input(start),
        end: parse_date_input(end),
    }
}
