use serde::Deserialize;

/// One search result as returned by the Algolia search endpoint.
///
/// Identity is `id` (`objectID` on the wire). Duplicate ids within one
/// accumulated result list are possible and are not deduplicated.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Hit {
    #[serde(rename = "objectID")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub num_comments: u32,
    #[serde(default)]
    pub points: u32,
}

/// One page of the search response.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<Hit>,
    #[serde(default)]
    pub page: u32,
}

/// Fetch lifecycle as a single tagged state so the render layer never sees
/// an inconsistent loading/error combination.
///
/// `Failed` is sticky for the rest of the session: nothing clears it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Failed(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
