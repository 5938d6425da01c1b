use arc_swap::ArcSwap;
use chrono::{Datelike, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::tmdb::MetadataProvider;

pub const DEFAULT_DAILY_COUNT: usize = 10;

#[derive(Debug, Clone, serde::Serialize)]
pub struct TopPick {
    pub title: String,
    pub id: i64,
    pub poster: String,
}

type PickMap = HashMap<(NaiveDate, usize), Vec<TopPick>>;

/// Daily top picks, deterministic per calendar date.
///
/// The trending feed supplies picks in feed order, filtered to catalog
/// membership; the remainder is filled from a permutation of the
/// catalog seeded with the date, so the whole set is stable for the
/// day. Computed sets are held behind an [`ArcSwap`] read-through
/// cache, one entry per (date, count) pair so callers asking for
/// different counts within the same day each hit their own entry;
/// entries for past dates are dropped at rollover. A duplicate
/// recomputation in a rollover race is harmless: both computations
/// produce the same set.
pub struct DailyPicks {
    catalog: Arc<Catalog>,
    provider: Arc<dyn MetadataProvider>,
    cached: ArcSwap<PickMap>,
}

impl DailyPicks {
    pub fn new(catalog: Arc<Catalog>, provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            catalog,
            provider,
            cached: ArcSwap::from_pointee(PickMap::new()),
        }
    }

    pub async fn top_picks(&self, n: usize) -> Vec<TopPick> {
        self.top_picks_for_date(Local::now().date_naive(), n).await
    }

    pub async fn top_picks_for_date(&self, date: NaiveDate, n: usize) -> Vec<TopPick> {
        if let Some(picks) = self.cached.load().get(&(date, n)) {
            return picks.clone();
        }

        let picks = self.compute(date, n).await;

        let mut updated: PickMap = (**self.cached.load()).clone();
        updated.retain(|&(entry_date, _), _| entry_date == date);
        updated.insert((date, n), picks.clone());
        self.cached.store(Arc::new(updated));

        picks
    }

    async fn compute(&self, date: NaiveDate, n: usize) -> Vec<TopPick> {
        info!("Computing top picks for {}", date);

        let trending = match self.provider.trending_movie_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                warn!("Trending feed unavailable, using seeded fallback: {}", e);
                Vec::new()
            }
        };

        let mut picks: Vec<TopPick> = Vec::with_capacity(n);

        for id in trending {
            if picks.len() >= n {
                break;
            }
            let Some(index) = self.catalog.index_of_id(id) else {
                continue;
            };
            if let Some(movie) = self.catalog.get(index) {
                let details = self.provider.movie_details(id).await;
                picks.push(TopPick {
                    title: movie.title.clone(),
                    id,
                    poster: details.poster,
                });
            }
        }

        if picks.len() < n {
            // Walk a date-seeded permutation of the catalog so the
            // filled portion is also stable for the day.
            let mut rng = StdRng::seed_from_u64(date_seed(date));
            let mut order: Vec<usize> = (0..self.catalog.len()).collect();
            order.shuffle(&mut rng);

            for index in order {
                if picks.len() >= n {
                    break;
                }
                let Some(movie) = self.catalog.get(index) else {
                    continue;
                };
                if picks.iter().any(|p| p.id == movie.id) {
                    continue;
                }
                let details = self.provider.movie_details(movie.id).await;
                picks.push(TopPick {
                    title: movie.title.clone(),
                    id: movie.id,
                    poster: details.poster,
                });
            }
        }

        picks
    }
}

/// Integer encoding of the date (YYYYMMDD) used as the RNG seed.
fn date_seed(date: NaiveDate) -> u64 {
    date.year() as u64 * 10_000 + date.month() as u64 * 100 + date.day() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MovieRecord;
    use crate::tmdb::{MovieDetails, TmdbError};
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubProvider {
        trending: Result<Vec<i64>, ()>,
        trending_calls: AtomicUsize,
    }

    impl StubProvider {
        fn with_trending(ids: Vec<i64>) -> Self {
            Self {
                trending: Ok(ids),
                trending_calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                trending: Err(()),
                trending_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MetadataProvider for StubProvider {
        async fn movie_details(&self, movie_id: i64) -> MovieDetails {
            let mut details = MovieDetails::unavailable();
            details.poster = format!("poster://{}", movie_id);
            details
        }

        async fn trending_movie_ids(&self) -> Result<Vec<i64>, TmdbError> {
            self.trending_calls.fetch_add(1, Ordering::SeqCst);
            match &self.trending {
                Ok(ids) => Ok(ids.clone()),
                Err(()) => Err(TmdbError::Status(
                    reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                )),
            }
        }
    }

    fn catalog(size: usize) -> Arc<Catalog> {
        Arc::new(Catalog::new(
            (0..size)
                .map(|i| MovieRecord {
                    id: i as i64 + 1,
                    title: format!("Movie {}", i + 1),
                    overview: None,
                    genres: Vec::new(),
                })
                .collect(),
        ))
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_trending_taken_in_feed_order() {
        let daily = DailyPicks::new(
            catalog(50),
            Arc::new(StubProvider::with_trending(vec![7, 3, 19, 4, 30])),
        );

        let picks = daily.top_picks_for_date(date("2025-06-01"), 5).await;
        let ids: Vec<i64> = picks.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![7, 3, 19, 4, 30]);
        assert_eq!(picks[0].title, "Movie 7");
        assert_eq!(picks[0].poster, "poster://7");
    }

    #[tokio::test]
    async fn test_unknown_trending_ids_filtered_and_filled() {
        // Only two trending ids exist in the catalog.
        let daily = DailyPicks::new(
            catalog(20),
            Arc::new(StubProvider::with_trending(vec![999, 5, 888, 12])),
        );

        let picks = daily.top_picks_for_date(date("2025-06-01"), 6).await;
        assert_eq!(picks.len(), 6);
        assert_eq!(picks[0].id, 5);
        assert_eq!(picks[1].id, 12);

        let ids: HashSet<i64> = picks.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 6);
    }

    #[tokio::test]
    async fn test_same_date_is_deterministic() {
        let provider = Arc::new(StubProvider::with_trending(vec![2]));
        let daily_a = DailyPicks::new(catalog(40), provider.clone());
        let daily_b = DailyPicks::new(catalog(40), provider);

        let d = date("2025-03-15");
        let picks_a = daily_a.top_picks_for_date(d, 8).await;
        let picks_b = daily_b.top_picks_for_date(d, 8).await;

        let ids_a: Vec<i64> = picks_a.iter().map(|p| p.id).collect();
        let ids_b: Vec<i64> = picks_b.iter().map(|p| p.id).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[tokio::test]
    async fn test_different_dates_differ_only_in_fill_order() {
        let daily = DailyPicks::new(catalog(200), Arc::new(StubProvider::with_trending(vec![1])));

        let picks_a = daily.top_picks_for_date(date("2025-03-15"), 10).await;
        let picks_b = daily.top_picks_for_date(date("2025-03-16"), 10).await;

        // Trending portion is identical; the seeded fill reshuffles.
        assert_eq!(picks_a[0].id, 1);
        assert_eq!(picks_b[0].id, 1);
        let ids_a: Vec<i64> = picks_a.iter().map(|p| p.id).collect();
        let ids_b: Vec<i64> = picks_b.iter().map(|p| p.id).collect();
        assert_ne!(ids_a, ids_b);

        // And each date reproduces on recomputation.
        let again = daily.top_picks_for_date(date("2025-03-15"), 10).await;
        assert_eq!(ids_a, again.iter().map(|p| p.id).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_feed_failure_falls_back_entirely() {
        let daily = DailyPicks::new(catalog(40), Arc::new(StubProvider::failing()));

        let picks = daily.top_picks_for_date(date("2025-03-15"), 10).await;
        assert_eq!(picks.len(), 10);
        let ids: HashSet<i64> = picks.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 10);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_feed_lookup() {
        let provider = Arc::new(StubProvider::with_trending(vec![1, 2, 3]));
        let daily = DailyPicks::new(catalog(10), provider.clone());

        let d = date("2025-07-04");
        let first = daily.top_picks_for_date(d, 3).await;
        let second = daily.top_picks_for_date(d, 3).await;

        assert_eq!(
            first.iter().map(|p| p.id).collect::<Vec<_>>(),
            second.iter().map(|p| p.id).collect::<Vec<_>>()
        );
        assert_eq!(provider.trending_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_alternating_counts_cached_independently() {
        let provider = Arc::new(StubProvider::with_trending(vec![1, 2, 3]));
        let daily = DailyPicks::new(catalog(20), provider.clone());

        let d = date("2025-07-04");
        let three = daily.top_picks_for_date(d, 3).await;
        let five = daily.top_picks_for_date(d, 5).await;
        assert_eq!(provider.trending_calls.load(Ordering::SeqCst), 2);

        // Neither count evicts the other within the same day.
        let three_again = daily.top_picks_for_date(d, 3).await;
        let five_again = daily.top_picks_for_date(d, 5).await;
        assert_eq!(provider.trending_calls.load(Ordering::SeqCst), 2);

        assert_eq!(
            three.iter().map(|p| p.id).collect::<Vec<_>>(),
            three_again.iter().map(|p| p.id).collect::<Vec<_>>()
        );
        assert_eq!(
            five.iter().map(|p| p.id).collect::<Vec<_>>(),
            five_again.iter().map(|p| p.id).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_date_rollover_invalidates_cache() {
        let provider = Arc::new(StubProvider::with_trending(vec![1]));
        let daily = DailyPicks::new(catalog(10), provider.clone());

        daily.top_picks_for_date(date("2025-07-04"), 3).await;
        daily.top_picks_for_date(date("2025-07-05"), 3).await;
        assert_eq!(provider.trending_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_date_seed_encoding() {
        assert_eq!(date_seed(date("2025-03-15")), 2025_03_15);
        assert_eq!(date_seed(date("1999-12-01")), 1999_12_01);
    }
}
