//! Validation rules for submitted form fields
//!
//! All rules are pure predicates: they never panic and never allocate an
//! error, so callers decide how a failed rule is reported.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

/// Shortest accepted phone number, counted after trimming.
pub const MIN_PHONE_LENGTH: usize = 7;

lazy_static! {
    static ref PHONE_CHARS_REGEX: Regex = Regex::new(r"^[0-9+ \-]+$").unwrap();
}

// Date-time shapes emitted by browser date inputs and common API clients.
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

// Offset-carrying forms without seconds, which RFC 3339 does not allow.
const OFFSET_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

pub fn is_non_empty_text(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn is_phone_like(value: &str) -> bool {
    value.trim().chars().count() >= MIN_PHONE_LENGTH && PHONE_CHARS_REGEX.is_match(value)
}

/// True when `value` is blank, or names a valid calendar date-time.
pub fn is_optional_date(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return true;
    }

    DateTime::parse_from_rfc3339(value).is_ok()
        || DateTime::parse_from_rfc2822(value).is_ok()
        || OFFSET_DATE_TIME_FORMATS
            .iter()
            .any(|fmt| DateTime::parse_from_str(value, fmt).is_ok())
        || NAIVE_DATE_TIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
        || NAIVE_DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(value, fmt).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_text() {
        assert!(is_non_empty_text("Ada"));
        assert!(is_non_empty_text("  padded  "));
        assert!(!is_non_empty_text(""));
        assert!(!is_non_empty_text("   \t\n"));
    }

    #[test]
    fn test_phone_like() {
        assert!(is_phone_like("+91 98765-43210"));
        assert!(is_phone_like("5550100"));
        assert!(is_phone_like("555 0100"));

        assert!(!is_phone_like("555010"));
        assert!(!is_phone_like("555-CALL-NOW"));
        assert!(!is_phone_like("(555) 0100"));
        assert!(!is_phone_like(""));
        assert!(!is_phone_like("       "));
    }

    #[test]
    fn test_optional_date_accepts_blank() {
        assert!(is_optional_date(""));
        assert!(is_optional_date("   "));
    }

    #[test]
    fn test_optional_date_accepts_common_forms() {
        assert!(is_optional_date("2025-03-14T09:30"));
        assert!(is_optional_date("2025-03-14T09:30:00"));
        assert!(is_optional_date("2025-03-14T09:30:00.250"));
        assert!(is_optional_date("2025-03-14T09:30:00Z"));
        assert!(is_optional_date("2025-03-14T09:30:00+05:30"));
        assert!(is_optional_date("2025-03-14 09:30"));
        assert!(is_optional_date("2025-03-14"));
        assert!(is_optional_date("Fri, 14 Mar 2025 09:30:00 +0000"));
        assert!(is_optional_date("2025-09-01T08:30Z"));
        assert!(is_optional_date("2025-09-01T08:30+05:30"));
        assert!(is_optional_date("2025-09-01T08:30-0400"));
        assert!(is_optional_date("2025/09/01"));
        assert!(is_optional_date("2025/09/01 08:30"));
        assert!(is_optional_date("2025/09/01 08:30:15"));
    }

    #[test]
    fn test_optional_date_rejects_garbage() {
        assert!(!is_optional_date("not-a-date"));
        assert!(!is_optional_date("tomorrow morning"));
        assert!(!is_optional_date("2025-13-01"));
        assert!(!is_optional_date("2025-02-30T10:00"));
        assert!(!is_optional_date("2025/02/30"));
        assert!(!is_optional_date("2025-09-01T25:30Z"));
    }
}
