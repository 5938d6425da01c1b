use axum::{extract::Request, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::engine::{DailyPicks, Recommender};
use crate::tmdb::MetadataProvider;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    pub recommender: Arc<Recommender>,
    pub daily: Arc<DailyPicks>,
    pub metadata: Arc<dyn MetadataProvider>,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: Arc<Catalog>,
        recommender: Arc<Recommender>,
        daily: Arc<DailyPicks>,
        metadata: Arc<dyn MetadataProvider>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
            recommender,
            daily,
            metadata,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/movies", get(crate::api::list_movies))
        .route("/api/recommend", get(crate::api::recommend))
        .route("/api/top-picks", get(crate::api::top_picks))
        .route("/api/random", get(crate::api::random_picks))
        .route("/api/movie/:id", get(crate::api::get_movie));

    let mut router = Router::new()
        .route("/robots.txt", get(robots_txt_handler))
        .merge(api_routes)
        .fallback(fallback_handler);

    if let Some(ref appdir) = state.config.appdir {
        router = router.fallback_service(ServeDir::new(appdir));
    }

    router
        .layer(axum::middleware::from_fn(crate::middleware::normalize_path))
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nDisallow: /\n"
}

async fn fallback_handler(req: Request<axum::body::Body>) -> impl IntoResponse {
    // OPTIONS preflights get a 200; CORS headers come from the layer.
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
