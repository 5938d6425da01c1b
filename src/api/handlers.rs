use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::types::*;
use crate::server::AppState;

pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<MovieSummary>> {
    let movies = state
        .catalog
        .movies()
        .iter()
        .map(|m| MovieSummary {
            id: m.id,
            title: m.title.clone(),
        })
        .collect();

    Json(movies)
}

pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<RecommendResponse>, StatusCode> {
    if params.title.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let result = state.recommender.recommend(&params.title, params.n);

    let notice = result.fallback.then(|| {
        format!(
            "'{}' not found! Suggesting {} random movies instead.",
            params.title, params.n
        )
    });

    let mut movies = Vec::with_capacity(result.movies.len());
    for movie in result.movies {
        let details = state.metadata.movie_details(movie.id).await;
        movies.push(RecommendedItem {
            id: movie.id,
            title: movie.title,
            poster: details.poster,
        });
    }

    Ok(Json(RecommendResponse {
        query: params.title,
        notice,
        movies,
    }))
}

pub async fn top_picks(
    State(state): State<AppState>,
    Query(params): Query<CountParams>,
) -> Json<TopPicksResponse> {
    let picks = state.daily.top_picks(params.n).await;
    Json(TopPicksResponse { picks })
}

pub async fn random_picks(
    State(state): State<AppState>,
    Query(params): Query<CountParams>,
) -> Json<Vec<RecommendedItem>> {
    let sample = state
        .recommender
        .random_sample(params.n, &mut rand::rng());

    let mut movies = Vec::with_capacity(sample.len());
    for movie in sample {
        let details = state.metadata.movie_details(movie.id).await;
        movies.push(RecommendedItem {
            id: movie.id,
            title: movie.title,
            poster: details.poster,
        });
    }

    Json(movies)
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> Result<Json<MovieDetailResponse>, StatusCode> {
    let index = state
        .catalog
        .index_of_id(movie_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let movie = state.catalog.get(index).ok_or(StatusCode::NOT_FOUND)?;

    let details = state.metadata.movie_details(movie_id).await;

    Ok(Json(MovieDetailResponse {
        id: movie.id,
        title: movie.title.clone(),
        poster: details.poster,
        genres: details.genres,
        cast: details.cast,
        director: details.director,
        release_date: details.release_date,
        overview: details.overview,
    }))
}
