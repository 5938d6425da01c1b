use serde::{Deserialize, Serialize};

use crate::engine::{TopPick, DEFAULT_DAILY_COUNT, DEFAULT_RECOMMEND_COUNT};

#[derive(Debug, Serialize)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub title: String,
    #[serde(default = "default_recommend_count")]
    pub n: usize,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub query: String,
    /// Set when the title was unknown and a random sample was served.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub movies: Vec<RecommendedItem>,
}

#[derive(Debug, Serialize)]
pub struct RecommendedItem {
    pub id: i64,
    pub title: String,
    pub poster: String,
}

#[derive(Debug, Deserialize)]
pub struct CountParams {
    #[serde(default = "default_daily_count")]
    pub n: usize,
}

#[derive(Debug, Serialize)]
pub struct TopPicksResponse {
    pub picks: Vec<TopPick>,
}

#[derive(Debug, Serialize)]
pub struct MovieDetailResponse {
    pub id: i64,
    pub title: String,
    pub poster: String,
    pub genres: String,
    pub cast: String,
    pub director: String,
    pub release_date: String,
    pub overview: String,
}

fn default_recommend_count() -> usize {
    DEFAULT_RECOMMEND_COUNT
}

fn default_daily_count() -> usize {
    DEFAULT_DAILY_COUNT
}
