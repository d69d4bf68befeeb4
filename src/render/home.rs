//! Listing page renderer.
//!
//! Renders the accumulated post summaries plus, when the gateway reports a
//! next page, a "load more" button wired to the `/feed` endpoint by a small
//! inline script. The script appends returned fragments to the list in
//! received order and swaps the stored cursor; on failure it logs to the
//! console and leaves the page untouched, so the action stays retriable.
//! Only one fetch runs at a time: the button is disabled until the current
//! one settles.

use maud::{Markup, PreEscaped, html};

use super::components::{ICON_CALENDAR, ICON_PERSON, OpenGraphData, format_date, page_shell};
use crate::posts::{PaginationState, PostSummary};

/// Inline load-more script.
///
/// Kept intentionally close to vanilla fetch semantics: a failed or
/// non-2xx response is logged and the DOM is not modified. The button is
/// disabled while a fetch is in flight, so a second click cannot re-fetch
/// the same cursor and append a page twice.
const LOAD_MORE_JS: &str = r#"
(function () {
  var btn = document.getElementById('load-more');
  if (!btn) return;
  btn.addEventListener('click', function () {
    if (btn.disabled) return;
    btn.disabled = true;
    fetch('/feed?next=' + encodeURIComponent(btn.dataset.next))
      .then(function (res) {
        if (!res.ok) throw new Error('load more failed: ' + res.status);
        return res.json();
      })
      .then(function (page) {
        document.getElementById('post-list').insertAdjacentHTML('beforeend', page.html);
        if (page.next_page) {
          btn.dataset.next = page.next_page;
          btn.disabled = false;
        } else {
          btn.remove();
        }
      })
      .catch(function (error) {
        console.error(error);
        btn.disabled = false;
      });
  });
})();
"#;

/// Render the full listing page.
pub fn listing_page(pagination: &PaginationState, base_url: &str, site_name: &str) -> Markup {
    let og = OpenGraphData {
        title: "Posts",
        description: "Posts sobre desenvolvimento e tecnologia.",
        og_type: "website",
        image: None,
    };

    let body = html! {
        div class="post-list" id="post-list" {
            (summaries_fragment(&pagination.results))
        }
        @if pagination.has_more() {
            button class="load-more" id="load-more" type="button"
                data-next=(pagination.next_page.as_deref().unwrap_or_default()) {
                "Carregar mais posts"
            }
            script { (PreEscaped(LOAD_MORE_JS)) }
        }
    };

    page_shell(
        "Posts",
        "Posts sobre desenvolvimento e tecnologia.",
        &format!("{base_url}/"),
        og,
        body,
        site_name,
    )
}

/// Render a run of post summaries.
///
/// Used both for the initial page and for `/feed` fragments, so appended
/// pages look identical to the initial one.
pub fn summaries_fragment(posts: &[PostSummary]) -> Markup {
    html! {
        @for post in posts {
            a class="post-item" href=(format!("/post/{}", post.uid)) {
                h1 { (post.title) }
                p { (post.subtitle) }
                div class="post-meta" {
                    @if let Some(date) = format_date(post.first_publication_date) {
                        time { (PreEscaped(ICON_CALENDAR)) (date) }
                    }
                    span { (PreEscaped(ICON_PERSON)) (post.author) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(uid: &str) -> PostSummary {
        PostSummary {
            uid: uid.to_string(),
            first_publication_date: Some("2021-03-15T00:00:00Z".parse().unwrap()),
            title: format!("Title {uid}"),
            subtitle: "sub".to_string(),
            author: "Ana".to_string(),
        }
    }

    #[test]
    fn listing_with_cursor_renders_load_more() {
        let state = PaginationState {
            next_page: Some("https://gateway.example.com/page2".to_string()),
            results: vec![summary("a")],
        };
        let html = listing_page(&state, "https://blog.example.com", "spacetraveling").into_string();
        assert!(html.contains("id=\"load-more\""));
        assert!(html.contains("data-next=\"https://gateway.example.com/page2\""));
        assert!(html.contains("Carregar mais posts"));
    }

    #[test]
    fn listing_without_cursor_has_no_load_more() {
        let state = PaginationState {
            next_page: None,
            results: vec![summary("a")],
        };
        let html = listing_page(&state, "https://blog.example.com", "spacetraveling").into_string();
        assert!(!html.contains("load-more"));
    }

    #[test]
    fn listing_empty_cursor_has_no_load_more() {
        let state = PaginationState {
            next_page: Some(String::new()),
            results: vec![],
        };
        let html = listing_page(&state, "https://blog.example.com", "spacetraveling").into_string();
        assert!(!html.contains("load-more"));
    }

    #[test]
    fn load_more_script_disables_button_before_fetching() {
        let disable = LOAD_MORE_JS.find("btn.disabled = true").unwrap();
        let fetch = LOAD_MORE_JS.find("fetch(").unwrap();
        assert!(disable < fetch);
    }

    #[test]
    fn load_more_script_reenables_button_on_both_settle_paths() {
        // once after the cursor swap, once in the failure handler
        assert_eq!(LOAD_MORE_JS.matches("btn.disabled = false").count(), 2);
        let reenable = LOAD_MORE_JS.rfind("btn.disabled = false").unwrap();
        let catch = LOAD_MORE_JS.find(".catch(").unwrap();
        assert!(reenable > catch);
    }

    #[test]
    fn fragment_preserves_order() {
        let html = summaries_fragment(&[summary("first"), summary("second")]).into_string();
        let first = html.find("/post/first").unwrap();
        let second = html.find("/post/second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn fragment_links_and_metadata() {
        let html = summaries_fragment(&[summary("my-post")]).into_string();
        assert!(html.contains("href=\"/post/my-post\""));
        assert!(html.contains("Title my-post"));
        assert!(html.contains("15 mar 2021"));
        assert!(html.contains("Ana"));
    }

    #[test]
    fn fragment_without_date_omits_time_element() {
        let mut post = summary("undated");
        post.first_publication_date = None;
        let html = summaries_fragment(&[post]).into_string();
        assert!(!html.contains("<time>"));
    }

    #[test]
    fn fragment_escapes_title() {
        let mut post = summary("x");
        post.title = "<b>bold</b>".to_string();
        let html = summaries_fragment(&[post]).into_string();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }
}
