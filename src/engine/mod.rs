pub mod daily;
pub mod recommend;

pub use daily::{DailyPicks, TopPick, DEFAULT_DAILY_COUNT};
pub use recommend::{Recommendations, RecommendedMovie, Recommender, DEFAULT_RECOMMEND_COUNT};
