//! Post model

use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::SystemTime;

use super::metadata::{
    extract_hashtags, extract_metadata, parse_date, strip_header, strip_trailing_hashtags,
};

/// A `.md` file found in the posts directory, not yet read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSource {
    /// File name without the `.md` extension
    pub slug: String,
    /// Full path to the markdown file
    pub path: PathBuf,
    /// Last modification time, used for ordering
    pub modified: SystemTime,
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Identifier and output file base name
    pub slug: String,

    /// From the `Title:` header, or the slug
    pub title: String,

    /// From the `Date:` header, verbatim; may be empty
    pub date: String,

    /// Markdown with the header and trailing hashtag lines removed
    pub body: String,

    /// Every `#tag` in the body, in order
    pub hashtags: Vec<String>,
}

impl Post {
    /// Parse a post from its raw markdown
    pub fn parse(slug: &str, raw: &str) -> Self {
        let meta = extract_metadata(raw);
        let title = if meta.title.is_empty() {
            slug.to_string()
        } else {
            meta.title
        };

        let body = strip_header(raw);
        let hashtags = extract_hashtags(body);
        let body = strip_trailing_hashtags(body);

        Self {
            slug: slug.to_string(),
            title,
            date: meta.date,
            body,
            hashtags,
        }
    }

    /// The date, if it is in a recognisable format
    pub fn published_on(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}
