use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use scraper::{ElementRef, Html};
use tracing::{debug, error};

use crate::intelligence::PageFetcher;

/// Chrome-less boilerplate removed before the text reaches the model.
const STRIP_TAGS: [&str; 6] = ["script", "style", "noscript", "nav", "footer", "header"];

/// Fetches a target page and reduces it to whitespace-collapsed visible text.
pub struct PageTextClient {
    http: reqwest::Client,
    user_agent: String,
}

impl PageTextClient {
    pub fn new(user_agent: String, timeout_secs: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { http, user_agent })
    }
}

#[async_trait]
impl PageFetcher for PageTextClient {
    async fn fetch_page_text(&self, url: &str, max_chars: usize) -> Result<String> {
        debug!(%url, "page_fetcher: fetching target page");

        let resp = self
            .http
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            error!(%url, status = status.as_u16(), "page_fetcher: target returned non-success");
            anyhow::bail!("Target page fetch failed: HTTP {} for {}", status, url);
        }

        let html = resp.text().await?;
        let text = extract_page_text(&html, max_chars);
        debug!(%url, chars = text.chars().count(), "page_fetcher: text extracted");
        Ok(text)
    }
}

/// Strips non-content markup, collapses whitespace and truncates to
/// `max_chars` characters so downstream prompt cost stays bounded
/// regardless of target page size.
pub fn extract_page_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();
    collect_visible_text(&document.root_element(), &mut raw);

    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(max_chars).collect()
}

fn collect_visible_text(element: &ElementRef<'_>, out: &mut String) {
    if STRIP_TAGS.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_visible_text(&child_element, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_style_and_page_chrome() {
        let html = r#"<html><head><script>evil();</script><style>p{}</style></head>
            <body><nav>Menu</nav><header>Top</header>
            <p>Pricing starts at $49.</p>
            <footer>Legal</footer></body></html>"#;

        let text = extract_page_text(html, 2000);
        assert_eq!(text, "Pricing starts at $49.");
    }

    #[test]
    fn collapses_whitespace_runs() {
        let html = "<body><p>Hello\n\n   world</p>\t<p>again</p></body>";
        assert_eq!(extract_page_text(html, 2000), "Hello world again");
    }

    #[test]
    fn truncates_to_char_budget() {
        let html = format!("<body><p>{}</p></body>", "a".repeat(5000));
        let text = extract_page_text(&html, 2000);
        assert_eq!(text.chars().count(), 2000);
    }

    #[test]
    fn keeps_nested_content_outside_stripped_tags() {
        let html = "<body><div><span>keep</span><script>drop()</script></div></body>";
        assert_eq!(extract_page_text(html, 2000), "keep");
    }
}
