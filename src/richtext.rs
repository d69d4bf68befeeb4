//! Rich-text document handling.
//!
//! The content repository stores post bodies as structured rich text: an
//! ordered list of blocks (paragraphs, headings, list items, images), each
//! carrying inline spans addressed by character offsets. This module parses
//! that JSON shape and converts it two ways:
//!
//! - [`RichText::as_text`] — plain text, used for read-time word counting
//! - [`RichText::as_html`] — markup for page injection
//!
//! Text content is HTML-escaped while the markup is generated; the resulting
//! string is then embedded unescaped into the page shell.

use serde::{Deserialize, Serialize};

use crate::render::components::is_safe_url;

/// An ordered sequence of rich-text blocks.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct RichText(pub Vec<Block>);

/// A single rich-text block.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Block {
    /// Block type: "paragraph", "heading1".."heading6", "list-item",
    /// "o-list-item", "preformatted", "image".
    #[serde(rename = "type")]
    pub kind: String,
    /// Block text (empty for images).
    #[serde(default)]
    pub text: String,
    /// Inline formatting spans, addressed by character offset into `text`.
    #[serde(default)]
    pub spans: Vec<Span>,
    /// Image URL (image blocks only).
    #[serde(default)]
    pub url: Option<String>,
    /// Image alt text (image blocks only).
    #[serde(default)]
    pub alt: Option<String>,
}

/// An inline formatting span over `[start, end)` character offsets.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    /// Span type: "strong", "em", "hyperlink".
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Option<SpanData>,
}

/// Extra span payload (currently only hyperlink targets).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct SpanData {
    #[serde(default)]
    pub url: Option<String>,
}

impl RichText {
    /// Parse from a JSON value, falling back to empty on any shape mismatch.
    pub fn from_value(value: &serde_json::Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// Plain-text rendering: block texts joined by a single space.
    pub fn as_text(&self) -> String {
        let texts: Vec<&str> = self
            .0
            .iter()
            .filter(|b| !b.text.is_empty())
            .map(|b| b.text.as_str())
            .collect();
        texts.join(" ")
    }

    /// Convert to HTML markup.
    ///
    /// Consecutive list items are grouped into a single `<ul>` or `<ol>`.
    /// Unknown block types fall back to paragraphs.
    pub fn as_html(&self) -> String {
        let mut out = String::new();
        let mut open_list: Option<&str> = None;

        for block in &self.0 {
            let list_tag = match block.kind.as_str() {
                "list-item" => Some("ul"),
                "o-list-item" => Some("ol"),
                _ => None,
            };

            // Close the current list when the block is not a matching item
            if let Some(tag) = open_list
                && list_tag != Some(tag)
            {
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
                open_list = None;
            }

            match block.kind.as_str() {
                "image" => {
                    if let Some(url) = block.url.as_deref()
                        && is_safe_url(url)
                    {
                        out.push_str("<img src=\"");
                        out.push_str(&escape(url));
                        out.push_str("\" alt=\"");
                        out.push_str(&escape(block.alt.as_deref().unwrap_or_default()));
                        out.push_str("\" />");
                    }
                }
                "list-item" | "o-list-item" => {
                    let tag = list_tag.unwrap_or("ul");
                    if open_list.is_none() {
                        out.push('<');
                        out.push_str(tag);
                        out.push('>');
                        open_list = Some(tag);
                    }
                    out.push_str("<li>");
                    out.push_str(&render_spans(&block.text, &block.spans));
                    out.push_str("</li>");
                }
                kind => {
                    let tag = match kind {
                        "heading1" => "h1",
                        "heading2" => "h2",
                        "heading3" => "h3",
                        "heading4" => "h4",
                        "heading5" => "h5",
                        "heading6" => "h6",
                        "preformatted" => "pre",
                        _ => "p",
                    };
                    out.push('<');
                    out.push_str(tag);
                    out.push('>');
                    out.push_str(&render_spans(&block.text, &block.spans));
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                }
            }
        }

        if let Some(tag) = open_list {
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }

        out
    }
}

/// Apply inline spans to block text, escaping as we go.
///
/// Spans are applied in offset order; spans that overlap an earlier one or
/// run past the end of the text are ignored.
fn render_spans(text: &str, spans: &[Span]) -> String {
    let chars: Vec<char> = text.chars().collect();

    let mut ordered: Vec<&Span> = spans.iter().collect();
    ordered.sort_by_key(|s| (s.start, s.end));

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;

    for span in ordered {
        if span.start < cursor || span.end > chars.len() || span.start >= span.end {
            continue;
        }

        push_escaped(&mut out, &chars[cursor..span.start]);

        let inner: String = chars[span.start..span.end].iter().collect();
        match span.kind.as_str() {
            "strong" => {
                out.push_str("<strong>");
                out.push_str(&escape(&inner));
                out.push_str("</strong>");
            }
            "em" => {
                out.push_str("<em>");
                out.push_str(&escape(&inner));
                out.push_str("</em>");
            }
            "hyperlink" => {
                let href = span
                    .data
                    .as_ref()
                    .and_then(|d| d.url.as_deref())
                    .unwrap_or_default();
                if is_safe_url(href) {
                    out.push_str("<a href=\"");
                    out.push_str(&escape(href));
                    out.push_str("\">");
                    out.push_str(&escape(&inner));
                    out.push_str("</a>");
                } else {
                    out.push_str(&escape(&inner));
                }
            }
            _ => out.push_str(&escape(&inner)),
        }

        cursor = span.end;
    }

    push_escaped(&mut out, &chars[cursor..]);
    out
}

fn push_escaped(out: &mut String, chars: &[char]) {
    for &c in chars {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let chars: Vec<char> = text.chars().collect();
    push_escaped(&mut out, &chars);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> Block {
        Block {
            kind: "paragraph".to_string(),
            text: text.to_string(),
            ..Default::default()
        }
    }

    fn span(start: usize, end: usize, kind: &str) -> Span {
        Span {
            start,
            end,
            kind: kind.to_string(),
            data: None,
        }
    }

    // -- parsing --

    #[test]
    fn from_value_parses_blocks() {
        let value = serde_json::json!([
            {"type": "heading2", "text": "Intro", "spans": []},
            {"type": "paragraph", "text": "Hello world", "spans": [
                {"start": 0, "end": 5, "type": "strong"}
            ]}
        ]);
        let rt = RichText::from_value(&value);
        assert_eq!(rt.0.len(), 2);
        assert_eq!(rt.0[0].kind, "heading2");
        assert_eq!(rt.0[1].spans[0].end, 5);
    }

    #[test]
    fn from_value_tolerates_extra_fields() {
        let value = serde_json::json!([
            {"type": "paragraph", "text": "hi", "spans": [], "direction": "ltr"}
        ]);
        let rt = RichText::from_value(&value);
        assert_eq!(rt.0.len(), 1);
    }

    #[test]
    fn from_value_garbage_is_empty() {
        let rt = RichText::from_value(&serde_json::json!({"not": "an array"}));
        assert!(rt.0.is_empty());
        let rt = RichText::from_value(&serde_json::Value::Null);
        assert!(rt.0.is_empty());
    }

    // -- as_text --

    #[test]
    fn as_text_joins_blocks_with_space() {
        let rt = RichText(vec![paragraph("one two"), paragraph("three")]);
        assert_eq!(rt.as_text(), "one two three");
    }

    #[test]
    fn as_text_skips_empty_blocks() {
        let image = Block {
            kind: "image".to_string(),
            url: Some("https://example.com/a.png".to_string()),
            ..Default::default()
        };
        let rt = RichText(vec![paragraph("before"), image, paragraph("after")]);
        assert_eq!(rt.as_text(), "before after");
    }

    #[test]
    fn as_text_empty_document() {
        assert_eq!(RichText::default().as_text(), "");
    }

    // -- as_html blocks --

    #[test]
    fn as_html_paragraph() {
        let rt = RichText(vec![paragraph("Hello")]);
        assert_eq!(rt.as_html(), "<p>Hello</p>");
    }

    #[test]
    fn as_html_headings() {
        let mut h = paragraph("Title");
        h.kind = "heading3".to_string();
        assert_eq!(RichText(vec![h]).as_html(), "<h3>Title</h3>");
    }

    #[test]
    fn as_html_preformatted() {
        let mut b = paragraph("let x = 1;");
        b.kind = "preformatted".to_string();
        assert_eq!(RichText(vec![b]).as_html(), "<pre>let x = 1;</pre>");
    }

    #[test]
    fn as_html_unknown_block_falls_back_to_paragraph() {
        let mut b = paragraph("mystery");
        b.kind = "embed".to_string();
        assert_eq!(RichText(vec![b]).as_html(), "<p>mystery</p>");
    }

    #[test]
    fn as_html_groups_consecutive_list_items() {
        let mut a = paragraph("first");
        a.kind = "list-item".to_string();
        let mut b = paragraph("second");
        b.kind = "list-item".to_string();
        let rt = RichText(vec![a, b, paragraph("end")]);
        assert_eq!(
            rt.as_html(),
            "<ul><li>first</li><li>second</li></ul><p>end</p>"
        );
    }

    #[test]
    fn as_html_ordered_list() {
        let mut a = paragraph("um");
        a.kind = "o-list-item".to_string();
        assert_eq!(RichText(vec![a]).as_html(), "<ol><li>um</li></ol>");
    }

    #[test]
    fn as_html_separates_ul_from_ol() {
        let mut a = paragraph("bullet");
        a.kind = "list-item".to_string();
        let mut b = paragraph("numbered");
        b.kind = "o-list-item".to_string();
        let rt = RichText(vec![a, b]);
        assert_eq!(
            rt.as_html(),
            "<ul><li>bullet</li></ul><ol><li>numbered</li></ol>"
        );
    }

    #[test]
    fn as_html_image_block() {
        let b = Block {
            kind: "image".to_string(),
            url: Some("https://example.com/a.png".to_string()),
            alt: Some("a picture".to_string()),
            ..Default::default()
        };
        assert_eq!(
            RichText(vec![b]).as_html(),
            "<img src=\"https://example.com/a.png\" alt=\"a picture\" />"
        );
    }

    #[test]
    fn as_html_image_rejects_non_http_url() {
        let b = Block {
            kind: "image".to_string(),
            url: Some("javascript:alert(1)".to_string()),
            ..Default::default()
        };
        assert_eq!(RichText(vec![b]).as_html(), "");
    }

    // -- as_html spans --

    #[test]
    fn as_html_strong_span() {
        let mut b = paragraph("Hello world");
        b.spans = vec![span(0, 5, "strong")];
        assert_eq!(
            RichText(vec![b]).as_html(),
            "<p><strong>Hello</strong> world</p>"
        );
    }

    #[test]
    fn as_html_em_span_mid_text() {
        let mut b = paragraph("one two three");
        b.spans = vec![span(4, 7, "em")];
        assert_eq!(RichText(vec![b]).as_html(), "<p>one <em>two</em> three</p>");
    }

    #[test]
    fn as_html_hyperlink_span() {
        let mut b = paragraph("read this post");
        b.spans = vec![Span {
            start: 5,
            end: 9,
            kind: "hyperlink".to_string(),
            data: Some(SpanData {
                url: Some("https://example.com".to_string()),
            }),
        }];
        assert_eq!(
            RichText(vec![b]).as_html(),
            "<p>read <a href=\"https://example.com\">this</a> post</p>"
        );
    }

    #[test]
    fn as_html_hyperlink_without_url_renders_plain() {
        let mut b = paragraph("dead link");
        b.spans = vec![span(0, 4, "hyperlink")];
        assert_eq!(RichText(vec![b]).as_html(), "<p>dead link</p>");
    }

    #[test]
    fn as_html_out_of_range_span_ignored() {
        let mut b = paragraph("short");
        b.spans = vec![span(0, 99, "strong")];
        assert_eq!(RichText(vec![b]).as_html(), "<p>short</p>");
    }

    #[test]
    fn as_html_overlapping_spans_first_wins() {
        let mut b = paragraph("abcdef");
        b.spans = vec![span(0, 4, "strong"), span(2, 6, "em")];
        assert_eq!(RichText(vec![b]).as_html(), "<p><strong>abcd</strong>ef</p>");
    }

    #[test]
    fn as_html_unknown_span_kind_renders_plain() {
        let mut b = paragraph("labeled");
        b.spans = vec![span(0, 7, "label")];
        assert_eq!(RichText(vec![b]).as_html(), "<p>labeled</p>");
    }

    #[test]
    fn as_html_span_offsets_are_character_based() {
        // "café" is 4 characters but 5 bytes
        let mut b = paragraph("café au lait");
        b.spans = vec![span(0, 4, "strong")];
        assert_eq!(
            RichText(vec![b]).as_html(),
            "<p><strong>café</strong> au lait</p>"
        );
    }

    #[test]
    fn as_html_escapes_text_content() {
        let rt = RichText(vec![paragraph("<script>alert('x')</script>")]);
        assert_eq!(
            rt.as_html(),
            "<p>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn as_html_escapes_inside_spans() {
        let mut b = paragraph("a<b & c");
        b.spans = vec![span(0, 3, "strong")];
        assert_eq!(
            RichText(vec![b]).as_html(),
            "<p><strong>a&lt;b</strong> &amp; c</p>"
        );
    }
}
