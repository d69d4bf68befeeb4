//! Shared HTML components used across all blog pages.
//!
//! These are maud functions that return `Markup` fragments for composition
//! into full pages.

use chrono::{DateTime, Datelike, Utc};
use maud::{Markup, PreEscaped, html};

/// Inline CSS for all blog pages.
///
/// Flat, dark design. Uses spacing and subtle background shifts for
/// hierarchy. Icons are inline Phosphor SVGs.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#1a1d23;--fg:#f8f8f8;--fg2:#d7d7d7;--fg3:#bbbbbb;--accent:#ff57b2;--surface:#252832;--border:rgba(255,255,255,.08);--mono:"SF Mono",SFMono-Regular,ui-monospace,Menlo,monospace}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column;align-items:center;padding:0 1rem}
main{max-width:700px;width:100%;flex:1}
a{color:inherit;text-decoration:none}
img{max-width:100%;height:auto}
svg.icon{width:20px;height:20px;fill:currentColor;stroke:none;vertical-align:-4px;flex-shrink:0}

.site-header{width:100%;max-width:700px;padding:2rem 0 4rem;display:flex}
.site-logo{font-size:1.5rem;font-weight:700;letter-spacing:-.02em;color:var(--fg)}
.site-logo span{color:var(--fg3);font-weight:400}
.site-logo em{color:var(--accent);font-style:normal}

.post-list{display:flex;flex-direction:column;gap:3rem}
.post-item h1{font-size:1.75rem;font-weight:700;line-height:1.3;letter-spacing:-.01em}
.post-item h1:hover{color:var(--accent)}
.post-item p{color:var(--fg3);margin-top:.5rem;font-size:1.1rem}
.post-meta{display:flex;gap:1.5rem;margin-top:1rem;font-size:.9rem;color:var(--fg3);align-items:center}
.post-meta span,.post-meta time{display:flex;align-items:center;gap:.5rem}

.load-more{margin:3rem 0 4rem;background:none;border:none;cursor:pointer;color:var(--accent);font-size:1rem;font-weight:700;padding:0}
.load-more:hover{text-decoration:underline}

.post-banner{width:100%;max-height:400px;object-fit:cover;display:block}
.post-banner-wrap{width:100vw;max-width:100vw;margin:0 calc(50% - 50vw)}
article.post{padding:3rem 0 4rem}
article.post>h1{font-size:2.25rem;font-weight:700;line-height:1.25;letter-spacing:-.02em}
.post-content{margin-top:2.5rem}
.post-content h2{font-size:1.5rem;font-weight:700;margin:2rem 0 1rem}
.post-content p{margin:.85rem 0;font-size:1.05rem;line-height:1.75;color:var(--fg2)}
.post-content ul,.post-content ol{margin:.85rem 0;padding-left:1.5rem;color:var(--fg2)}
.post-content li{margin:.3rem 0}
.post-content a{color:var(--accent)}
.post-content a:hover{text-decoration:underline}
.post-content pre{background:var(--surface);border:1px solid var(--border);border-radius:6px;padding:.75rem 1rem;overflow-x:auto;margin:.85rem 0;font-family:var(--mono);font-size:.85rem;line-height:1.5}
.post-content img{border-radius:6px;margin:.85rem 0}

.footer{text-align:center;margin-top:auto;padding:1.5rem 0;font-size:.8rem;color:var(--fg3);width:100%;max-width:700px;border-top:1px solid var(--border)}
.footer a{color:var(--accent)}
.footer a:hover{text-decoration:underline}
"#;

/// Inline CSS for error pages.
pub const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#1a1d23;color:#f8f8f8;padding:1rem}
.error-page{text-align:center;max-width:400px}
.error-page h1{font-size:1.5rem;margin-bottom:.75rem}
.error-page p{color:#bbb;margin-bottom:1rem;line-height:1.5}
.error-page a{color:#ff57b2}
"#;

/// Content-Security-Policy header value.
///
/// Allows inline styles and the small inline load-more script. No external
/// scripts, no iframes, only HTTPS images, fetch restricted to this origin.
pub const CSP_HEADER: &str = "default-src 'none'; style-src 'unsafe-inline'; script-src 'unsafe-inline'; img-src https: data:; connect-src 'self'; form-action 'none'; frame-ancestors 'none'";

/// Calendar icon (Phosphor calendar-blank)
pub const ICON_CALENDAR: &str = r#"<svg class="icon" viewBox="0 0 256 256"><path d="M208,32H184V24a8,8,0,0,0-16,0v8H88V24a8,8,0,0,0-16,0v8H48A16,16,0,0,0,32,48V208a16,16,0,0,0,16,16H208a16,16,0,0,0,16-16V48A16,16,0,0,0,208,32ZM72,48v8a8,8,0,0,0,16,0V48h80v8a8,8,0,0,0,16,0V48h24V80H48V48ZM208,208H48V96H208V208Z"/></svg>"#;

/// Person icon (Phosphor user)
pub const ICON_PERSON: &str = r#"<svg class="icon" viewBox="0 0 256 256"><path d="M230.92,212c-15.23-26.33-38.7-45.21-66.09-54.16a72,72,0,1,0-73.66,0C63.78,166.78,40.31,185.66,25.08,212a8,8,0,1,0,13.85,8c18.84-32.56,52.14-52,89.07-52s70.23,19.44,89.07,52a8,8,0,1,0,13.85-8ZM72,96a56,56,0,1,1,56,56A56.06,56.06,0,0,1,72,96Z"/></svg>"#;

/// Clock icon (Phosphor clock)
pub const ICON_CLOCK: &str = r#"<svg class="icon" viewBox="0 0 256 256"><path d="M128,24A104,104,0,1,0,232,128,104.11,104.11,0,0,0,128,24Zm0,192a88,88,0,1,1,88-88A88.1,88.1,0,0,1,128,216Zm64-88a8,8,0,0,1-8,8H128a8,8,0,0,1-8-8V72a8,8,0,0,1,16,0v48h48A8,8,0,0,1,192,128Z"/></svg>"#;

/// Abbreviated month names for the fixed pt-BR display locale.
const MONTHS_ABBREV: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Format a publication date as "15 mar 2021" (day, abbreviated month, year).
/// Returns `None` when the post has no publication date.
pub fn format_date(date: Option<DateTime<Utc>>) -> Option<String> {
    let date = date?;
    let month = MONTHS_ABBREV[date.month0() as usize];
    Some(format!("{:02} {} {}", date.day(), month, date.year()))
}

/// Open Graph metadata for a page.
pub struct OpenGraphData<'a> {
    /// OG title.
    pub title: &'a str,
    /// OG description.
    pub description: &'a str,
    /// OG type (e.g., "article", "website").
    pub og_type: &'a str,
    /// OG image URL (must be HTTPS).
    pub image: Option<&'a str>,
}

/// Render the full HTML page shell with `<head>`, OG tags, the site header,
/// and body content.
pub fn page_shell(
    title: &str,
    description: &str,
    canonical_url: &str,
    og: OpenGraphData<'_>,
    body_content: Markup,
    site_name: &str,
) -> Markup {
    html! {
        (maud::DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="description" content=(description);
                link rel="canonical" href=(canonical_url);

                // Open Graph
                meta property="og:title" content=(og.title);
                meta property="og:description" content=(og.description);
                meta property="og:url" content=(canonical_url);
                meta property="og:site_name" content=(site_name);
                meta property="og:type" content=(og.og_type);
                @if let Some(image) = og.image {
                    meta property="og:image" content=(image);
                }

                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                header class="site-header" {
                    a href="/" class="site-logo" {
                        "space" em { "traveling" } span { "." }
                    }
                }
                main { (body_content) }
                footer class="footer" {
                    (site_name)
                }
            }
        }
    }
}

/// Check if a URL is safe to use in `src` or `href` attributes.
pub fn is_safe_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Truncate a string to a maximum length, appending "..." if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut end = max_len;
        while !s.is_char_boundary(end) && end > 0 {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}
