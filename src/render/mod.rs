//! HTML rendering for the blog pages.
//!
//! The listing page and the post detail page each have a dedicated renderer
//! producing a complete HTML page with Open Graph tags.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/) for compile-time HTML
//! generation with automatic XSS protection (all dynamic values are escaped).
//! The one exception is converted rich-text markup, which is produced by
//! [`crate::richtext`] and injected pre-escaped — the content source is
//! trusted, and the page CSP blocks external script execution anyway.

pub mod components;
pub mod home;
pub mod post;
