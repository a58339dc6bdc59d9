//! Format checks shared by the record parsers

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Number;

/// Wire format of date fields
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is valid")
});

/// Syntactic email check: `local@domain.tld`, no leading, trailing or doubled
/// dots in the local part, and a top-level label that is alphabetic or an
/// IDNA `xn--` label.
pub fn is_valid_email(value: &str) -> bool {
    if value.len() > 254 || !EMAIL_REGEX.is_match(value) {
        return false;
    }
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    if local.len() > 64 || local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    domain
        .rsplit('.')
        .next()
        .map(is_valid_tld)
        .unwrap_or(false)
}

fn is_valid_tld(tld: &str) -> bool {
    if let Some(encoded) = tld.strip_prefix("xn--") {
        return !encoded.is_empty() && tld.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    }
    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Parse a calendar date in `YYYY-MM-DD` form. Timestamps are rejected.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Parse a finite number carried in a string. Integral text stays an
/// integer so it encodes back without a fractional part.
pub fn parse_number(value: &str) -> Option<Number> {
    let value = value.trim();
    if let Ok(i) = value.parse::<i64>() {
        return Some(Number::from(i));
    }
    if let Ok(u) = value.parse::<u64>() {
        return Some(Number::from(u));
    }
    value.parse::<f64>().ok().and_then(Number::from_f64)
}
