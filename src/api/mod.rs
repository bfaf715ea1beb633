use crate::internal::models::SearchResponse;
use anyhow::{Context, Result};
use reqwest::Client;

const SEARCH_API_BASE_URL: &str = "https://hn.algolia.com/api/v1";

/// Page size for every search request. The API caps this at 1000; the app
/// always asks for 100.
pub const HITS_PER_PAGE: u32 = 100;

/// HTTP client for the Algolia Hacker News search API.
///
/// Returns `anyhow::Result` with contextualized errors to preserve diagnostic
/// information instead of erasing it into plain strings. Every failure mode
/// (connection error, non-success status, malformed body) surfaces as one
/// error kind to the caller; the app does not distinguish them.
#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    base_url: String,
}

impl SearchClient {
    /// Create a new `SearchClient` against the public API.
    pub fn new() -> Self {
        Self::with_base_url(SEARCH_API_BASE_URL.to_string())
    }

    /// Create a client against an explicit base URL (used by tests to point
    /// at a mock server).
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// GET one page of search results for `query`.
    ///
    /// `page` is 0-based; `hitsPerPage` is fixed at [`HITS_PER_PAGE`].
    /// A non-success status is an error, same as a transport failure.
    pub async fn search(&self, query: &str, page: u32) -> Result<SearchResponse> {
        let url = format!("{}/search", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("query", query),
                ("page", &page.to_string()),
                ("hitsPerPage", &HITS_PER_PAGE.to_string()),
            ])
            .send()
            .await
            .with_context(|| format!("failed to send GET request to {}", url))?
            .error_for_status()
            .with_context(|| format!("search request for '{}' page {} failed", query, page))?;

        resp.json::<SearchResponse>()
            .await
            .with_context(|| format!("failed to parse JSON response from {}", url))
    }
}

impl Default for SearchClient {
    fn default() -> Self {
        Self::new()
    }
}
