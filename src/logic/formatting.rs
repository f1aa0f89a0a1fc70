//! Formatting and display logic
//!
//! Pure functions for formatting record values for display and for
//! pre-filling edit forms.

use chrono::NaiveDateTime;

/// Date-time layout of the `datetime-local` inputs the backend expects
pub const DATETIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Format a number the way the backend's JSON shows it (no trailing ".0")
///
/// # Examples
/// ```
/// use admintui::logic::formatting::format_number;
///
/// assert_eq!(format_number(499.0), "499");
/// assert_eq!(format_number(12.5), "12.5");
/// ```
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Optional number as form text; missing values become an empty field
pub fn number_field(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_default()
}

pub fn format_price(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("₹{}", format_number(v)),
        None => "-".to_string(),
    }
}

pub fn format_discount(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}%", format_number(v)),
        None => "-".to_string(),
    }
}

/// Cut a backend timestamp down to minute precision ("2030-01-01T10:00:00" -> "2030-01-01T10:00")
pub fn truncate_to_minutes(timestamp: &str) -> String {
    timestamp.chars().take(16).collect()
}

/// Parse a form date-time, tolerating a seconds suffix
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, DATETIME_INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

/// Human-readable schedule time; unparseable values are shown as-is
pub fn format_schedule(value: Option<&str>) -> String {
    match value {
        Some(raw) => match parse_datetime(&truncate_to_minutes(raw)) {
            Some(dt) => dt.format("%d %b %Y, %H:%M").to_string(),
            None => raw.to_string(),
        },
        None => "-".to_string(),
    }
}

/// Truncate text to `max` display columns, adding an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if text.width() <= max {
        return text.to_string();
    }

    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += w;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_and_discount() {
        assert_eq!(format_price(Some(1999.0)), "₹1999");
        assert_eq!(format_price(None), "-");
        assert_eq!(format_discount(Some(12.5)), "12.5%");
    }

    #[test]
    fn test_number_field() {
        assert_eq!(number_field(Some(10.0)), "10");
        assert_eq!(number_field(None), "");
    }

    #[test]
    fn test_truncate_to_minutes() {
        assert_eq!(truncate_to_minutes("2030-01-01T10:00:00.000"), "2030-01-01T10:00");
        assert_eq!(truncate_to_minutes("2030-01-01"), "2030-01-01");
    }

    #[test]
    fn test_parse_datetime_variants() {
        assert!(parse_datetime("2030-01-01T10:00").is_some());
        assert!(parse_datetime("2030-01-01T10:00:59").is_some());
        assert!(parse_datetime("01/01/2030 10:00").is_none());
    }

    #[test]
    fn test_format_schedule() {
        assert_eq!(format_schedule(Some("2030-01-05T09:30:00")), "05 Jan 2030, 09:30");
        assert_eq!(format_schedule(Some("soon")), "soon");
        assert_eq!(format_schedule(None), "-");
    }

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 6), "hello…");
    }
}
