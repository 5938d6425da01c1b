pub mod catalog;
pub mod loader;

pub use catalog::{Catalog, MovieRecord, SimilarityMatrix};
pub use loader::{load_artifacts, CatalogError};
