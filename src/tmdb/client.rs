use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

use crate::config::TmdbConfig;
use super::types::{MovieDetails, MovieResponse, TrendingResponse};

/// External metadata boundary. Implemented by the real TMDB client and
/// by in-memory stubs in tests.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch display details for one movie. Never fails: transport and
    /// decode errors degrade to the named default values.
    async fn movie_details(&self, movie_id: i64) -> MovieDetails;

    /// The external "trending today" list, in feed order.
    async fn trending_movie_ids(&self) -> Result<Vec<i64>, TmdbError>;
}

pub struct TmdbClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Result<Self, TmdbError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(TmdbError::Client)?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            image_base_url: config.image_base_url.clone(),
        })
    }

    async fn get_movie(&self, movie_id: i64) -> Result<MovieResponse, TmdbError> {
        let url = format!(
            "{}/movie/{}?api_key={}&language=en-US&append_to_response=credits",
            self.base_url, movie_id, self.api_key
        );

        let response = self.http.get(&url).send().await.map_err(TmdbError::Request)?;
        if !response.status().is_success() {
            return Err(TmdbError::Status(response.status()));
        }
        let movie = response.json::<MovieResponse>().await.map_err(TmdbError::Decode)?;

        Ok(movie)
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    async fn movie_details(&self, movie_id: i64) -> MovieDetails {
        match self.get_movie(movie_id).await {
            Ok(resp) => MovieDetails::from_response(resp, &self.image_base_url),
            Err(e) => {
                warn!("Metadata fetch for movie {} failed: {}", movie_id, e);
                MovieDetails::unavailable()
            }
        }
    }

    async fn trending_movie_ids(&self) -> Result<Vec<i64>, TmdbError> {
        let url = format!(
            "{}/trending/movie/day?api_key={}",
            self.base_url, self.api_key
        );

        let response = self.http.get(&url).send().await.map_err(TmdbError::Request)?;
        if !response.status().is_success() {
            return Err(TmdbError::Status(response.status()));
        }
        let trending = response
            .json::<TrendingResponse>()
            .await
            .map_err(TmdbError::Decode)?;

        Ok(trending.results.into_iter().map(|m| m.id).collect())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),
    #[error("Failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}
