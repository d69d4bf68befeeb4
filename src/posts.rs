//! Post view models and listing pagination.
//!
//! Everything the pages render is normalized here from raw gateway
//! documents: only the fields the views need are extracted, extra fields are
//! ignored, and both the listing and detail paths go through the same
//! tolerant field accessors.

use chrono::{DateTime, Utc};

use crate::prismic::{Document, QueryResponse};
use crate::richtext::RichText;

/// Fixed reading rate used for the read-time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/// A post as shown on the listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct PostSummary {
    /// Unique slug.
    pub uid: String,
    pub first_publication_date: Option<DateTime<Utc>>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl PostSummary {
    /// Normalize a gateway document into a summary.
    ///
    /// Returns `None` for documents without a uid — they cannot be linked to
    /// a detail page.
    pub fn from_document(doc: &Document) -> Option<Self> {
        let uid = doc.uid.clone()?;
        Some(Self {
            uid,
            first_publication_date: parse_timestamp(doc.first_publication_date.as_deref()),
            title: text_field(&doc.data, "title"),
            subtitle: text_field(&doc.data, "subtitle"),
            author: text_field(&doc.data, "author"),
        })
    }
}

/// A content section of a post: a heading followed by rich-text body blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSection {
    pub heading: String,
    pub body: RichText,
}

/// A fully normalized post for the detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDetail {
    pub uid: String,
    pub first_publication_date: Option<DateTime<Utc>>,
    pub title: String,
    pub banner_url: String,
    pub author: String,
    pub content: Vec<ContentSection>,
}

impl PostDetail {
    /// Normalize a gateway document into a detail view model.
    pub fn from_document(doc: &Document) -> Option<Self> {
        let uid = doc.uid.clone()?;

        let banner_url = doc
            .data
            .get("banner")
            .and_then(|b| b.get("url"))
            .and_then(|u| u.as_str())
            .unwrap_or_default()
            .to_string();

        let content = doc
            .data
            .get("content")
            .and_then(|c| c.as_array())
            .map(|sections| {
                sections
                    .iter()
                    .map(|section| ContentSection {
                        heading: text_field(section, "heading"),
                        body: section
                            .get("body")
                            .map(RichText::from_value)
                            .unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            uid,
            first_publication_date: parse_timestamp(doc.first_publication_date.as_deref()),
            title: text_field(&doc.data, "title"),
            banner_url,
            author: text_field(&doc.data, "author"),
            content,
        })
    }

    /// Estimated read time in whole minutes.
    ///
    /// Words are counted across every section's heading and plain-text body,
    /// split on whitespace runs, then divided by [`WORDS_PER_MINUTE`] and
    /// rounded up. Recomputed on every render, never stored.
    pub fn reading_minutes(&self) -> usize {
        let total: usize = self
            .content
            .iter()
            .map(|section| {
                let text = format!("{} {}", section.heading, section.body.as_text());
                text.split_whitespace().count()
            })
            .sum();
        total.div_ceil(WORDS_PER_MINUTE)
    }
}

/// Accumulated listing state: an append-only collection of summaries plus
/// the cursor for the next page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaginationState {
    /// Next-page URL; `None` or empty means no more pages.
    pub next_page: Option<String>,
    pub results: Vec<PostSummary>,
}

impl PaginationState {
    /// Seed the state from an initial query response.
    pub fn new(response: QueryResponse) -> Self {
        let mut state = Self::default();
        state.apply_page(response);
        state
    }

    /// Append one page of results in received order and replace the cursor
    /// wholesale. No de-duplication, no re-sorting: an overlapping page from
    /// the gateway shows up as duplicates.
    pub fn apply_page(&mut self, response: QueryResponse) {
        self.results
            .extend(response.results.iter().filter_map(PostSummary::from_document));
        self.next_page = response.next_page;
    }

    /// Whether a load-more action is available.
    pub fn has_more(&self) -> bool {
        self.next_page.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Parse a gateway timestamp, tolerating both `+00:00` and `+0000` offsets.
fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = value?;
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Extract a text field that may be either a plain string or a rich-text
/// array (the gateway allows both for title-like fields).
fn text_field(data: &serde_json::Value, name: &str) -> String {
    match data.get(name) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(value @ serde_json::Value::Array(_)) => RichText::from_value(value).as_text(),
        _ => String::new(),
    }
}
