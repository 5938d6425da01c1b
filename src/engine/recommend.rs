use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

use crate::catalog::{Catalog, SimilarityMatrix};

/// Candidates kept after ranking, before the diversifying shuffle.
pub const CANDIDATE_POOL: usize = 250;

pub const DEFAULT_RECOMMEND_COUNT: usize = 20;

#[derive(Debug, Clone, serde::Serialize)]
pub struct RecommendedMovie {
    pub title: String,
    pub id: i64,
}

#[derive(Debug, Clone)]
pub struct Recommendations {
    pub movies: Vec<RecommendedMovie>,
    /// True when the title was not in the catalog and the result is a
    /// uniform random sample instead of a similarity ranking.
    pub fallback: bool,
}

/// Similarity-based recommendation lookup over the loaded artifacts.
pub struct Recommender {
    catalog: Arc<Catalog>,
    similarity: Arc<SimilarityMatrix>,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>, similarity: Arc<SimilarityMatrix>) -> Self {
        Self {
            catalog,
            similarity,
        }
    }

    /// Recommend up to `n` movies similar to `title` (exact match). An
    /// unknown title degrades to a random sample, flagged in the result
    /// so the caller can show a notice. Never an error.
    pub fn recommend(&self, title: &str, n: usize) -> Recommendations {
        self.recommend_with(title, n, &mut rand::rng())
    }

    /// Same as [`recommend`](Self::recommend) with a caller-supplied
    /// generator, locally scoped so concurrent requests never share
    /// RNG state.
    pub fn recommend_with<R: Rng>(&self, title: &str, n: usize, rng: &mut R) -> Recommendations {
        let Some(index) = self.catalog.index_of_title(title) else {
            return Recommendations {
                movies: self.random_sample(n, rng),
                fallback: true,
            };
        };

        let mut pool = self.ranked_candidates(index);
        pool.shuffle(rng);

        let movies = pool
            .into_iter()
            .take(n)
            .filter_map(|(idx, _)| self.catalog.get(idx))
            .map(|movie| RecommendedMovie {
                title: movie.title.clone(),
                id: movie.id,
            })
            .collect();

        Recommendations {
            movies,
            fallback: false,
        }
    }

    /// The ranked candidate pool for one catalog index: every other
    /// movie scored by the similarity row, sorted descending, ties kept
    /// in catalog order, capped at [`CANDIDATE_POOL`].
    fn ranked_candidates(&self, index: usize) -> Vec<(usize, f32)> {
        let row = self.similarity.row(index).unwrap_or(&[]);

        let mut scored: Vec<(usize, f32)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .collect();

        // Stable sort: equal scores keep ascending catalog index order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(CANDIDATE_POOL);

        scored
    }

    /// Uniform sample of `n` distinct catalog entries.
    pub fn random_sample<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<RecommendedMovie> {
        let mut indices: Vec<usize> = (0..self.catalog.len()).collect();
        indices.shuffle(rng);

        indices
            .into_iter()
            .take(n)
            .filter_map(|idx| self.catalog.get(idx))
            .map(|movie| RecommendedMovie {
                title: movie.title.clone(),
                id: movie.id,
            })
            .collect()
    }
}
