pub mod handlers;
pub mod types;

pub use handlers::{get_movie, list_movies, random_picks, recommend, top_picks};
