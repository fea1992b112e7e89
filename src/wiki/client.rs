// src/wiki/client.rs
// =============================================================================
// This module talks to Wikipedia: fetch an article, extract the titles it
// links to.
//
// Link extraction rules (what counts as an article link):
// - The href must start with "/wiki/" - that is where articles live;
//   external links and /w/index.php machinery are ignored
// - The anchor text must be non-empty (image maps and icon links have
//   empty text and are navigation noise, not content)
// - The title must not contain ':' - those are namespace pages
//   (Category:, File:, Help:, Special:, ...), not articles
// - Any "#section" fragment is dropped so a section link and the page
//   itself count as the same article
//
// Every fetch first passes through the shared RateLimiter, so ten workers
// still produce politely spaced requests.
//
// Rust concepts:
// - Implementing a trait (LinkSource) to plug into the search engine
// - scraper's CSS selectors to walk <a href> elements
// - url::Url::join to build the request URL from the base
// =============================================================================

use std::collections::HashSet;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use super::limiter::RateLimiter;
use crate::search::LinkSource;

/// URL path prefix under which articles are served
pub const ARTICLE_PATH_PREFIX: &str = "/wiki/";

/// Base URL article titles are joined onto
const EN_WIKI_BASE: &str = "https://en.wikipedia.org/wiki/";

// Rate-limited Wikipedia client, shared by all workers of a search
pub struct WikiClient {
    http: Client,
    limiter: RateLimiter,
    base: Url,
}

impl WikiClient {
    // Creates a client enforcing the given minimum request spacing
    pub fn new(request_interval: Duration) -> Result<Self> {
        // One client for all requests (connection pooling); redirects are
        // followed by reqwest's default policy, matching how article
        // redirects should behave
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to create HTTP client")?;

        Ok(WikiClient {
            http,
            limiter: RateLimiter::new(request_interval),
            // The base is a compile-time constant; parsing it can only
            // fail if the constant itself is wrong
            base: Url::parse(EN_WIKI_BASE).expect("base URL is valid"),
        })
    }

    // Fetches the raw HTML of one article
    async fn fetch_page(&self, title: &str) -> Result<String> {
        self.limiter.acquire().await;

        println!("Get page: {title}");

        let url = self
            .base
            .join(title)
            .map_err(|e| anyhow!("invalid article title '{}': {}", title, e))?;

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("HTTP {} fetching '{}'", response.status(), title));
        }

        Ok(response.text().await?)
    }
}

impl LinkSource for WikiClient {
    // Fetch one page and return the article titles it links to.
    // Errors here mean "this one page failed"; the search engine treats
    // that as zero links and keeps going.
    async fn fetch_links(&self, title: &str) -> Result<HashSet<String>> {
        let html = self.fetch_page(title).await?;
        Ok(extract_article_links(&html))
    }
}

// Extracts qualifying article titles from a page's HTML
//
// Pure function over the HTML, so it is testable without any network.
// Returns a HashSet: a page linking to the same article five times still
// contributes it once.
pub fn extract_article_links(html: &str) -> HashSet<String> {
    let mut links = HashSet::new();

    let document = Html::parse_document(html);

    // Our selector is a constant and known to be valid, so unwrap is safe
    let selector = Selector::parse("a[href]").unwrap();

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(rest) = href.strip_prefix(ARTICLE_PATH_PREFIX) {
                // Links with no visible text are navigation chrome
                let text: String = element.text().collect();
                if text.trim().is_empty() {
                    continue;
                }

                // "Foo#History" and "Foo" are the same page
                let title = rest.split('#').next().unwrap_or(rest);

                // ':' marks namespace pages (Category:, File:, ...)
                if title.is_empty() || title.contains(':') {
                    continue;
                }

                links.insert(title.to_string());
            }
        }
    }

    links
}
