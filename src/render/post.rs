//! Post detail page renderer.

use maud::{Markup, PreEscaped, html};

use super::components::{
    ICON_CALENDAR, ICON_CLOCK, ICON_PERSON, OpenGraphData, format_date, is_safe_url, page_shell,
    truncate,
};
use crate::posts::PostDetail;

/// Render a post detail page: banner, title, metadata line (date, author,
/// read time), then each content section as a heading plus converted
/// rich-text markup.
pub fn detail_page(post: &PostDetail, base_url: &str, site_name: &str) -> Markup {
    let description = post
        .content
        .first()
        .map(|section| truncate(&section.body.as_text(), 200))
        .unwrap_or_default();

    let canonical = format!("{base_url}/post/{}", post.uid);
    let banner = is_safe_url(&post.banner_url).then_some(post.banner_url.as_str());

    let og = OpenGraphData {
        title: &post.title,
        description: &description,
        og_type: "article",
        image: banner,
    };

    let minutes = post.reading_minutes();

    let body = html! {
        @if let Some(banner_url) = banner {
            div class="post-banner-wrap" {
                img class="post-banner" src=(banner_url) alt="banner";
            }
        }
        article class="post" {
            h1 { (post.title) }
            div class="post-meta" {
                @if let Some(date) = format_date(post.first_publication_date) {
                    time { (PreEscaped(ICON_CALENDAR)) (date) }
                }
                span { (PreEscaped(ICON_PERSON)) (post.author) }
                span { (PreEscaped(ICON_CLOCK)) (minutes) " min" }
            }
            div class="post-content" {
                @for section in &post.content {
                    section {
                        h2 { (section.heading) }
                        div { (PreEscaped(section.body.as_html())) }
                    }
                }
            }
        }
    };

    page_shell(&post.title, &description, &canonical, og, body, site_name)
}
