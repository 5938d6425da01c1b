pub mod client;
pub mod types;

pub use client::{MetadataProvider, TmdbClient, TmdbError};
pub use types::MovieDetails;
