/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the table
use chrono::{DateTime, NaiveDate, Utc};

/// Format timestamp to DD-MMM-YYYY HH:MM format
/// Example: 2024-03-15T14:02:26Z -> "15-Mar-2024 14:02"
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%d-%b-%Y %H:%M").to_string()
}

/// Parse value of `<input type="date">` (yyyy-mm-dd)
/// Empty or malformed input means "no bound"
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Format date for `<input type="date">`
pub fn format_date_input(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
