//! Export file naming
//!
//! File names are built from a user-facing label: characters that are illegal
//! on common filesystems become `-`, whitespace runs collapse to one space and
//! a `_YYYY-MM-DD_HHMM` suffix records when the export ran.

use chrono::{Local, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// Base name used when the sanitized label is empty
pub const FALLBACK_BASE_NAME: &str = "export";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H%M";

fn illegal_chars() -> &'static Regex {
    static ILLEGAL: OnceLock<Regex> = OnceLock::new();
    ILLEGAL.get_or_init(|| Regex::new(r#"[\\/:*?"<>|]"#).expect("static pattern is valid"))
}

fn whitespace_runs() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static pattern is valid"))
}

/// Sanitizes a label for use as a file name stem
pub fn sanitize_base_name(base: &str) -> String {
    let replaced = illegal_chars().replace_all(base, "-");
    let collapsed = whitespace_runs().replace_all(&replaced, " ");
    let trimmed = collapsed.trim();

    if trimmed.is_empty() {
        FALLBACK_BASE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Builds a file name stem stamped with the local time
///
/// # Examples
///
/// ```
/// use tabex::core::filename::build_file_name;
///
/// let name = build_file_name("Payroll: Q1/Q2");
/// assert!(name.starts_with("Payroll- Q1-Q2_"));
/// ```
pub fn build_file_name(base: &str) -> String {
    build_file_name_at(base, Local::now().naive_local())
}

/// Builds a file name stem stamped with the given time
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tabex::core::filename::build_file_name_at;
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(7, 5, 0).unwrap();
/// assert_eq!(build_file_name_at("  Open   invoices ", at), "Open invoices_2024-03-09_0705");
/// ```
pub fn build_file_name_at(base: &str, at: NaiveDateTime) -> String {
    format!("{}_{}", sanitize_base_name(base), at.format(TIMESTAMP_FORMAT))
}
