//! Post metadata: the `Title:` / `Date:` header and trailing hashtags
//!
//! A post looks like this:
//!
//! ```text
//! Title: Hello
//! Date: 2024-01-01
//! Body text.
//! #greeting
//! #demo
//! ```
//!
//! Missing metadata is never an error; callers fall back to the slug for
//! the title and leave the date blank.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

const TITLE_PREFIX: &str = "Title:";
const DATE_PREFIX: &str = "Date:";

lazy_static! {
    static ref HASHTAG_RE: Regex = Regex::new(r"#[A-Za-z0-9_]+").unwrap();
}

/// Header fields of a post. Empty when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub date: String,
}

/// Scan lines from the top for `Title:` and `Date:`, stopping once both
/// have been seen.
pub fn extract_metadata(markdown: &str) -> Metadata {
    let mut meta = Metadata::default();

    for line in markdown.lines() {
        if let Some(rest) = line.strip_prefix(TITLE_PREFIX) {
            meta.title = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(DATE_PREFIX) {
            meta.date = rest.trim().to_string();
        }
        if !meta.title.is_empty() && !meta.date.is_empty() {
            break;
        }
    }

    meta
}

/// Remove the header lines from the top of a post.
///
/// Only leading lines that really are `Title:` or `Date:` lines are
/// removed, at most two of them. Anything else is body content.
pub fn strip_header(markdown: &str) -> &str {
    let mut rest = markdown;

    for _ in 0..2 {
        if !(rest.starts_with(TITLE_PREFIX) || rest.starts_with(DATE_PREFIX)) {
            break;
        }
        rest = match rest.find('\n') {
            Some(pos) => &rest[pos + 1..],
            None => "",
        };
    }

    rest
}

/// All `#word` tokens in the body, in order of appearance, without the `#`.
/// Duplicates are kept.
pub fn extract_hashtags(body: &str) -> Vec<String> {
    HASHTAG_RE
        .find_iter(body)
        .map(|m| m.as_str()[1..].to_string())
        .collect()
}

/// Drop the run of `#`-prefixed lines at the end of the body.
///
/// Trailing blank lines are ignored first so a final newline does not hide
/// the tag lines. A `#` line with ordinary content below it stays.
pub fn strip_trailing_hashtags(body: &str) -> String {
    let mut lines: Vec<&str> = body.split('\n').collect();

    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    while lines.last().is_some_and(|l| l.starts_with('#')) {
        lines.pop();
    }

    lines.join("\n")
}

/// Best-effort parse of a free-form post date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}
